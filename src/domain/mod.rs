// Domain layer - Sensor readings and dashboard view model
pub mod dashboard;
pub mod sample;
pub mod series;
