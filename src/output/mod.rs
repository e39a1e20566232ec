// Thu Oct 15 2026 - Alex

pub mod error;
pub mod json;

pub use error::OutputError;
pub use json::JsonSerializer;
