pub mod config;
pub mod stats_client;

pub use config::ConfigError;
pub use stats_client::StatsClientError;
