pub mod config;
pub mod dissolve;
pub mod error;
pub mod motion;
pub mod progress;
pub mod properties;
pub mod target;
pub mod trail;
pub mod vologram;

mod cadence;

#[cfg(test)]
mod mock;

pub use config::ToolkitConfig;
pub use error::ConfigError;
