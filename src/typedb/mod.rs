// Tue Oct 13 2026 - Alex

pub mod field;
pub mod node;
pub mod database;

pub use field::{Field, FieldFlags};
pub use node::{Node, NodeKind, FunctionData, ObjectData, EnumData, VfTableData};
pub use database::{TypeDb, NodeArena};

pub const SCHEMA_VERSION: &str = "5.0.0";
