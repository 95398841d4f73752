pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod matching;
pub mod models;
pub mod observability;
pub mod pricing;
pub mod state;
