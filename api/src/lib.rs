pub mod app;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod render;
pub mod schema;
pub mod scorer;
pub mod session;
pub mod store;
pub mod upload;
