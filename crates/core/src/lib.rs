pub mod config;
pub mod config_loader;
pub mod error;
pub mod traits;

pub use config::{AppConfig, FeatureConfig, FilterConfig, OutputConfig, Partition, SourcesConfig};
pub use config_loader::ConfigLoader;
pub use error::ConfigError;
pub use traits::ReportSource;
