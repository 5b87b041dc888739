// Public modules
pub mod argv;
pub mod bench;
pub mod config;
pub mod error;
pub mod lint;
pub mod version;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
