// Wed Oct 14 2026 - Alex

use crate::frontend::FrontendError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Frontend reported {0} error(s); refusing to build from an unusable unit")]
    UnusableUnit(usize),
    #[error("No complete record named {0}")]
    UnknownRoot(String),
    #[error("Frontend error: {0}")]
    Frontend(#[from] FrontendError),
}
