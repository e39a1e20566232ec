// Fri Oct 16 2026 - Alex

pub mod builder;
pub mod config;
pub mod frontend;
pub mod output;
pub mod typedb;
pub mod ui;
pub mod utils;
pub mod validation;

pub use builder::{build_type_db, build_type_db_from_roots, BuildError, TypeDbBuilder};
pub use config::Config;
pub use frontend::{Frontend, SnapshotFrontend};
pub use output::JsonSerializer;
pub use typedb::{TypeDb, SCHEMA_VERSION};
pub use validation::ReferenceValidator;
