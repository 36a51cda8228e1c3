pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod ops;
pub mod server;
pub mod tui;
pub mod validate;
