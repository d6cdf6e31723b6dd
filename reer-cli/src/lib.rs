pub mod app;
pub mod logging;
pub mod render;
