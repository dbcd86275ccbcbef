pub mod analytics;
pub mod config;
pub mod error;
pub mod geo;
pub mod map;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
