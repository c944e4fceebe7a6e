pub mod access;
pub mod credentials;
pub mod entities;
pub mod error;

pub use error::ModelError;

// Re-export tracing for use in this crate
pub use tracing;
