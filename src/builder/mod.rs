// Wed Oct 14 2026 - Alex

//! Graph construction: interning, record expansion, dispatch synthesis and
//! the worklist-driven traversal.

pub mod driver;
pub mod enums;
pub mod error;
pub mod interner;
pub mod record;
pub mod vtable;
pub mod worklist;

#[cfg(test)]
pub(crate) mod fixtures;

pub use driver::{build_type_db, build_type_db_from_roots, find_roots, BuildStats, DeclState, TypeDbBuilder};
pub use enums::extract_enum;
pub use error::BuildError;
pub use interner::TypeInterner;
pub use record::{ExpandedRecord, RecordExpander};
pub use vtable::{vftable_name, SyntheticTable};
pub use worklist::Worklist;
