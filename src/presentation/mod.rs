// Presentation layer - HTTP routes and HTML rendering
pub mod app_state;
pub mod handlers;
pub mod page;
pub mod router;
