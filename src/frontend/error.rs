// Mon Oct 12 2026 - Alex

use crate::frontend::{DeclId, TypeRef};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown type handle: {0}")]
    UnknownType(TypeRef),
    #[error("Unknown declaration handle: {0}")]
    UnknownDecl(DeclId),
    #[error("Target mismatch: invocation targets {requested}, unit was resolved for {actual}")]
    TargetMismatch { requested: String, actual: String },
    #[error("Enum {decl} has non-integral underlying type {ty}")]
    InvalidUnderlying { decl: DeclId, ty: TypeRef },
    #[error("Layout unavailable for {0}")]
    LayoutUnavailable(String),
}
