// Thu Oct 15 2026 - Alex

pub mod references;
pub mod report;

pub use references::ReferenceValidator;
pub use report::{ReferenceIssue, ReferenceReport};
