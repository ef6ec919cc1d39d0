pub mod application;
pub mod certificate;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod service;
pub mod status;
pub mod store;
pub mod theme;
pub mod utils;

pub use config::Config;
pub use logging::init_logging;
