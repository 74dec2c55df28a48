pub mod catalog;
pub mod config;
pub mod error;
pub mod h2h;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod server;
pub mod stats;
