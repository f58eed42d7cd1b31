pub mod config;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod fixtures;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod render;
pub mod schedule;
pub mod sidebar;
pub mod splice;
pub mod standings;
pub mod types;
pub mod utils;
