pub mod config;
pub mod error;

pub use config::{GeneratorConfig, TestFramework, CONFIG_FILE};
pub use error::{TendrilError, TendrilResult};

