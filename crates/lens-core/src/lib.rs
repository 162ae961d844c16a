pub mod config;
pub mod types;

pub use config::{ConfigError, LensConfig};
pub use types::*;
