// Mon Oct 12 2026 - Alex

//! Query contract between the type-database builder and the semantic
//! analyzer that owns the resolved declaration graph.
//!
//! The builder treats a [`Frontend`] as a pure, read-only oracle: every query
//! either returns data or reports that the layout is unavailable.

pub mod types;
pub mod decl;
pub mod error;
pub mod invocation;
pub mod snapshot;

pub use types::{DeclId, TypeRef, TypeShape, TemplateArg, FunctionSignature, TypeLayout, RecordLayout, TargetInfo};
pub use decl::{
    Declaration, RecordInfo, RecordTemplate, TemplateParamDecl, EnumInfo, Enumerator, BaseSpecifier,
    FieldDecl, MethodDecl, DispatchSlot, DispatchTable, pattern_display_name,
};
pub use error::FrontendError;
pub use invocation::{CompileInvocation, BASELINE_ARGS, baseline_args};
pub use snapshot::{SnapshotFrontend, SnapshotBuilder, UnitSnapshot, RecordDef};

pub trait Frontend {
    fn target(&self) -> &TargetInfo;

    /// Number of errors the frontend reported for the unit.
    fn error_count(&self) -> usize;

    /// Every declaration of the unit, nested ones included, in source order.
    fn declarations(&self) -> Vec<DeclId>;

    fn declaration(&self, decl: DeclId) -> Option<Declaration>;

    /// Strips all aliases.
    fn canonical_type(&self, ty: TypeRef) -> TypeRef;

    fn type_shape(&self, ty: TypeRef) -> TypeShape;

    /// Printed form of a type, tag keywords included.
    fn type_spelling(&self, ty: TypeRef) -> String;

    fn type_layout(&self, ty: TypeRef) -> Result<TypeLayout, FrontendError>;

    fn record_layout(&self, decl: DeclId) -> Result<RecordLayout, FrontendError>;

    fn bases(&self, decl: DeclId) -> Vec<BaseSpecifier>;

    fn fields(&self, decl: DeclId) -> Vec<FieldDecl>;

    /// Methods declared directly on the record, in declaration order.
    fn methods(&self, decl: DeclId) -> Vec<MethodDecl>;

    /// Dispatch tables of a complete polymorphic record, per the target ABI.
    fn dispatch_tables(&self, decl: DeclId) -> Vec<DispatchTable>;

    fn record(&self, decl: DeclId) -> Option<RecordInfo> {
        match self.declaration(decl)? {
            Declaration::Record(info) => Some(info),
            _ => None,
        }
    }

    fn enumeration(&self, decl: DeclId) -> Option<EnumInfo> {
        match self.declaration(decl)? {
            Declaration::Enum(info) => Some(info),
            _ => None,
        }
    }
}
