pub mod config;
pub mod error;
pub mod fs;

pub use config::{AemkitConfig, ConfigError, MissingProfilePolicy};
pub use error::ResolveError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
