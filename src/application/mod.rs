// Application layer - Use cases over the sensor data
pub mod dashboard_service;
pub mod sample_source;
pub mod series_loader;
