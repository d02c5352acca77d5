//! FileSystem abstraction so discovery can run against real trees or in-memory fixtures

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
