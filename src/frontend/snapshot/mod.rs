// Tue Oct 13 2026 - Alex

//! A frontend backed by a serialized, already-resolved unit.

pub mod builder;

pub use builder::SnapshotBuilder;

use crate::frontend::{
    BaseSpecifier, CompileInvocation, DeclId, Declaration, DispatchTable, EnumInfo, Enumerator, FieldDecl,
    Frontend, FrontendError, MethodDecl, RecordInfo, RecordLayout, RecordTemplate, TargetInfo, TemplateArg,
    TemplateParamDecl, TypeLayout, TypeRef, TypeShape,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub spelling: String,
    pub shape: TypeShape,
}

/// Definition of a complete record. Absent for forward declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDef {
    #[serde(default)]
    pub polymorphic: bool,
    #[serde(default)]
    pub template: RecordTemplate,
    /// `None` when the frontend cannot lay the record out.
    #[serde(default)]
    pub layout: Option<RecordLayout>,
    #[serde(default)]
    pub bases: Vec<BaseSpecifier>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub dispatch_tables: Vec<DispatchTable>,
}

impl RecordDef {
    pub fn new(size_bytes: u64, align_bytes: u64) -> Self {
        Self {
            layout: Some(RecordLayout::new(size_bytes, align_bytes)),
            ..Self::default()
        }
    }

    /// A class template pattern; never laid out.
    pub fn pattern(params: Vec<TemplateParamDecl>) -> Self {
        Self {
            template: RecordTemplate::Pattern { params },
            ..Self::default()
        }
    }

    /// A complete record whose layout the frontend cannot compute.
    pub fn without_layout() -> Self {
        Self::default()
    }

    pub fn with_specialization(mut self, pattern: Option<DeclId>, args: Vec<TemplateArg>) -> Self {
        self.template = RecordTemplate::Specialization { pattern, args };
        self
    }

    pub fn with_base(mut self, base: BaseSpecifier) -> Self {
        if base.is_virtual {
            self.polymorphic = true;
        }
        self.bases.push(base);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        if method.is_virtual {
            self.polymorphic = true;
        }
        self.methods.push(method);
        self
    }

    pub fn with_dispatch_table(mut self, table: DispatchTable) -> Self {
        self.polymorphic = true;
        self.dispatch_tables.push(table);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(default)]
    pub underlying: Option<TypeRef>,
    #[serde(default)]
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclEntry {
    Record {
        name: String,
        ty: TypeRef,
        #[serde(default)]
        definition: Option<RecordDef>,
    },
    Enum {
        name: String,
        ty: TypeRef,
        #[serde(default)]
        definition: Option<EnumDef>,
    },
    Other {
        name: String,
    },
}

/// Serialized form of one resolved translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub target: TargetInfo,
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    /// Declarations in source order.
    #[serde(default)]
    pub decls: Vec<DeclEntry>,
}

impl UnitSnapshot {
    pub fn new(target: TargetInfo) -> Self {
        Self {
            target,
            error_count: 0,
            types: Vec::new(),
            decls: Vec::new(),
        }
    }

    /// Checks that every handle inside the snapshot resolves.
    pub fn validate(&self) -> Result<(), FrontendError> {
        for entry in &self.types {
            self.check_shape(&entry.shape)?;
        }
        for (index, decl) in self.decls.iter().enumerate() {
            match decl {
                DeclEntry::Record { ty, definition, .. } => {
                    self.check_type(*ty)?;
                    if let Some(def) = definition {
                        self.check_record(def)?;
                    }
                }
                DeclEntry::Enum { ty, definition, .. } => {
                    self.check_type(*ty)?;
                    if let Some(underlying) = definition.as_ref().and_then(|d| d.underlying) {
                        self.check_type(underlying)?;
                        let canonical = self.canonical(underlying);
                        if !matches!(self.types[canonical.index()].shape, TypeShape::Builtin { .. }) {
                            return Err(FrontendError::InvalidUnderlying {
                                decl: DeclId::new(index as u32),
                                ty: underlying,
                            });
                        }
                    }
                }
                DeclEntry::Other { .. } => {}
            }
        }
        Ok(())
    }

    /// Follows aliases. Bounded so a malformed alias loop cannot spin forever.
    pub fn canonical(&self, ty: TypeRef) -> TypeRef {
        let mut current = ty;
        for _ in 0..=self.types.len() {
            match self.types.get(current.index()).map(|e| &e.shape) {
                Some(TypeShape::Alias { target }) => current = *target,
                _ => break,
            }
        }
        current
    }

    fn check_type(&self, ty: TypeRef) -> Result<(), FrontendError> {
        if ty.index() < self.types.len() {
            Ok(())
        } else {
            Err(FrontendError::UnknownType(ty))
        }
    }

    fn check_decl(&self, decl: DeclId) -> Result<(), FrontendError> {
        if decl.index() < self.decls.len() {
            Ok(())
        } else {
            Err(FrontendError::UnknownDecl(decl))
        }
    }

    fn check_args(&self, args: &[TemplateArg]) -> Result<(), FrontendError> {
        args.iter().filter_map(TemplateArg::as_type).try_for_each(|ty| self.check_type(ty))
    }

    fn check_shape(&self, shape: &TypeShape) -> Result<(), FrontendError> {
        match shape {
            TypeShape::Pointer { pointee }
            | TypeShape::LValueReference { pointee }
            | TypeShape::RValueReference { pointee } => self.check_type(*pointee),
            TypeShape::ConstantArray { element, .. } | TypeShape::IncompleteArray { element } => {
                self.check_type(*element)
            }
            TypeShape::Function(sig) => {
                self.check_type(sig.return_type)?;
                sig.params.iter().try_for_each(|p| self.check_type(*p))
            }
            TypeShape::TemplateSpecialization { args, .. } => self.check_args(args),
            TypeShape::Record { decl } | TypeShape::Enum { decl } => self.check_decl(*decl),
            TypeShape::Alias { target } => self.check_type(*target),
            TypeShape::Builtin { .. } | TypeShape::TemplateParam { .. } | TypeShape::Other => Ok(()),
        }
    }

    fn check_record(&self, def: &RecordDef) -> Result<(), FrontendError> {
        match &def.template {
            RecordTemplate::None => {}
            RecordTemplate::Pattern { params } => {
                for param in params {
                    if let TemplateParamDecl::Type { ty, .. } = param {
                        self.check_type(*ty)?;
                    }
                }
            }
            RecordTemplate::Specialization { pattern, args } => {
                if let Some(pattern) = pattern {
                    self.check_decl(*pattern)?;
                }
                self.check_args(args)?;
            }
        }
        def.bases.iter().try_for_each(|b| self.check_type(b.ty))?;
        def.fields.iter().try_for_each(|f| self.check_type(f.ty))?;
        def.methods.iter().try_for_each(|m| self.check_type(m.ty))?;
        def.dispatch_tables
            .iter()
            .flat_map(|t| t.slots.iter())
            .try_for_each(|s| self.check_type(s.ty))
    }
}

/// Answers frontend queries from a [`UnitSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotFrontend {
    unit: UnitSnapshot,
}

impl SnapshotFrontend {
    pub fn new(unit: UnitSnapshot) -> Result<Self, FrontendError> {
        unit.validate()?;
        Ok(Self { unit })
    }

    pub fn from_json(text: &str) -> Result<Self, FrontendError> {
        Self::new(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, FrontendError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Loads the invocation's source as a snapshot and checks that it was
    /// resolved for the invocation's target.
    pub fn open(invocation: &CompileInvocation) -> Result<Self, FrontendError> {
        log::debug!(
            "Opening {} with args: {}",
            invocation.source().display(),
            invocation.args().join(" ")
        );
        let frontend = Self::load(invocation.source())?;
        if let Some(requested) = invocation.target_triple() {
            if requested != frontend.unit.target.triple {
                return Err(FrontendError::TargetMismatch {
                    requested: requested.to_string(),
                    actual: frontend.unit.target.triple.clone(),
                });
            }
        }
        Ok(frontend)
    }

    pub fn to_json(&self) -> Result<String, FrontendError> {
        Ok(serde_json::to_string_pretty(&self.unit)?)
    }

    fn type_entry(&self, ty: TypeRef) -> Option<&TypeEntry> {
        self.unit.types.get(ty.index())
    }

    fn decl_entry(&self, decl: DeclId) -> Option<&DeclEntry> {
        self.unit.decls.get(decl.index())
    }

    fn record_def(&self, decl: DeclId) -> Option<&RecordDef> {
        match self.decl_entry(decl)? {
            DeclEntry::Record { definition, .. } => definition.as_ref(),
            _ => None,
        }
    }

    fn unavailable(&self, ty: TypeRef) -> FrontendError {
        FrontendError::LayoutUnavailable(self.type_spelling(ty))
    }
}

impl Frontend for SnapshotFrontend {
    fn target(&self) -> &TargetInfo {
        &self.unit.target
    }

    fn error_count(&self) -> usize {
        self.unit.error_count
    }

    fn declarations(&self) -> Vec<DeclId> {
        (0..self.unit.decls.len() as u32).map(DeclId::new).collect()
    }

    fn declaration(&self, decl: DeclId) -> Option<Declaration> {
        Some(match self.decl_entry(decl)? {
            DeclEntry::Record { name, ty, definition } => {
                let spelling = self.type_spelling(*ty);
                Declaration::Record(RecordInfo {
                    id: decl,
                    qualified_name: name.clone(),
                    spelling,
                    complete: definition.is_some(),
                    polymorphic: definition.as_ref().map(|d| d.polymorphic).unwrap_or(false),
                    template: definition.as_ref().map(|d| d.template.clone()).unwrap_or_default(),
                })
            }
            DeclEntry::Enum { name, ty, definition } => Declaration::Enum(EnumInfo {
                id: decl,
                qualified_name: name.clone(),
                complete: definition.is_some(),
                ty: *ty,
                underlying: definition.as_ref().and_then(|d| d.underlying),
                enumerators: definition.as_ref().map(|d| d.enumerators.clone()).unwrap_or_default(),
            }),
            DeclEntry::Other { .. } => Declaration::Other,
        })
    }

    fn canonical_type(&self, ty: TypeRef) -> TypeRef {
        self.unit.canonical(ty)
    }

    fn type_shape(&self, ty: TypeRef) -> TypeShape {
        self.type_entry(ty).map(|e| e.shape.clone()).unwrap_or(TypeShape::Other)
    }

    fn type_spelling(&self, ty: TypeRef) -> String {
        self.type_entry(ty)
            .map(|e| e.spelling.clone())
            .unwrap_or_else(|| format!("<{}>", ty))
    }

    fn type_layout(&self, ty: TypeRef) -> Result<TypeLayout, FrontendError> {
        let mut current = self.canonical_type(ty);
        let mut count = 1u64;
        for _ in 0..=self.unit.types.len() {
            let layout = match self.type_shape(current) {
                TypeShape::ConstantArray { count: n, element } => {
                    count = count.saturating_mul(n);
                    current = self.canonical_type(element);
                    continue;
                }
                TypeShape::Builtin { size_bits, align_bits, .. } => TypeLayout::new(size_bits, align_bits),
                TypeShape::Pointer { .. } | TypeShape::LValueReference { .. } | TypeShape::RValueReference { .. } => {
                    let width = u64::from(self.unit.target.pointer_width_bits);
                    TypeLayout::new(width, width)
                }
                TypeShape::Record { decl } => {
                    let layout = self.record_layout(decl)?;
                    match (layout.size_bytes.checked_mul(8), layout.align_bytes.checked_mul(8)) {
                        (Some(size), Some(align)) => TypeLayout::new(size, align),
                        _ => return Err(self.unavailable(current)),
                    }
                }
                // Only integral underlying types are laid out; anything else is malformed.
                TypeShape::Enum { decl } => {
                    let underlying = self
                        .enumeration(decl)
                        .filter(|info| info.complete)
                        .and_then(|info| info.underlying)
                        .map(|u| self.canonical_type(u))
                        .ok_or_else(|| self.unavailable(current))?;
                    match self.type_shape(underlying) {
                        TypeShape::Builtin { size_bits, align_bits, .. } => TypeLayout::new(size_bits, align_bits),
                        _ => return Err(self.unavailable(current)),
                    }
                }
                _ => return Err(self.unavailable(current)),
            };
            return Ok(TypeLayout::new(layout.size_bits.saturating_mul(count), layout.align_bits));
        }
        Err(self.unavailable(ty))
    }

    fn record_layout(&self, decl: DeclId) -> Result<RecordLayout, FrontendError> {
        let def = self
            .record_def(decl)
            .ok_or_else(|| FrontendError::LayoutUnavailable(format!("incomplete record {}", decl)))?;
        if matches!(def.template, RecordTemplate::Pattern { .. }) {
            return Err(FrontendError::LayoutUnavailable(format!("template pattern {}", decl)));
        }
        def.layout
            .ok_or_else(|| FrontendError::LayoutUnavailable(format!("record {}", decl)))
    }

    fn bases(&self, decl: DeclId) -> Vec<BaseSpecifier> {
        self.record_def(decl).map(|d| d.bases.clone()).unwrap_or_default()
    }

    fn fields(&self, decl: DeclId) -> Vec<FieldDecl> {
        self.record_def(decl).map(|d| d.fields.clone()).unwrap_or_default()
    }

    fn methods(&self, decl: DeclId) -> Vec<MethodDecl> {
        self.record_def(decl).map(|d| d.methods.clone()).unwrap_or_default()
    }

    fn dispatch_tables(&self, decl: DeclId) -> Vec<DispatchTable> {
        self.record_def(decl).map(|d| d.dispatch_tables.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> SnapshotFrontend {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let int = b.builtin("int", 32);
        let long_t = b.alias("long_t", int);
        let arr = b.array(long_t, 4);
        let (point, _) = b.record("Point");
        b.define(point, RecordDef::new(8, 4).with_field(FieldDecl::new("x", int)).with_field(FieldDecl::new("y", arr)));
        b.finish()
    }

    #[test]
    fn test_alias_is_stripped() {
        let fe = sample();
        let alias = TypeRef(1);
        assert_eq!(fe.canonical_type(alias), TypeRef(0));
        assert_eq!(fe.type_spelling(fe.canonical_type(alias)), "int");
    }

    #[test]
    fn test_array_layout_multiplies() {
        let fe = sample();
        let layout = fe.type_layout(TypeRef(2)).unwrap();
        assert_eq!(layout, TypeLayout::new(128, 32));
    }

    #[test]
    fn test_invalid_handle_rejected() {
        let mut unit = UnitSnapshot::new(TargetInfo::msvc_x64());
        unit.types.push(TypeEntry {
            spelling: "int *".to_string(),
            shape: TypeShape::Pointer { pointee: TypeRef(7) },
        });
        assert!(matches!(SnapshotFrontend::new(unit), Err(FrontendError::UnknownType(TypeRef(7)))));
    }

    #[test]
    fn test_open_checks_target() {
        let json = sample().to_json().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let ok = CompileInvocation::new(file.path()).with_arg("--target=x86_64-pc-windows-msvc");
        let fe = SnapshotFrontend::open(&ok).unwrap();
        assert_eq!(fe.declarations().len(), 1);

        let bad = ok.with_arg("--target=aarch64-apple-darwin");
        assert!(matches!(
            SnapshotFrontend::open(&bad),
            Err(FrontendError::TargetMismatch { .. })
        ));
    }

    fn self_typed_enum() -> UnitSnapshot {
        let mut unit = UnitSnapshot::new(TargetInfo::msvc_x64());
        unit.types.push(TypeEntry {
            spelling: "Loop".to_string(),
            shape: TypeShape::Enum { decl: DeclId(0) },
        });
        unit.decls.push(DeclEntry::Enum {
            name: "Loop".to_string(),
            ty: TypeRef(0),
            definition: Some(EnumDef {
                underlying: Some(TypeRef(0)),
                enumerators: Vec::new(),
            }),
        });
        unit
    }

    #[test]
    fn test_enum_underlying_must_be_integral() {
        assert!(matches!(
            SnapshotFrontend::new(self_typed_enum()),
            Err(FrontendError::InvalidUnderlying { decl: DeclId(0), ty: TypeRef(0) })
        ));

        // Unvalidated units still answer without recursing.
        let fe = SnapshotFrontend { unit: self_typed_enum() };
        assert!(matches!(fe.type_layout(TypeRef(0)), Err(FrontendError::LayoutUnavailable(_))));
    }

    #[test]
    fn test_oversized_record_layout_unavailable() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let (huge, ty) = b.record("Huge");
        b.define(huge, RecordDef::new(u64::MAX / 2, 8));
        let fe = b.finish();
        assert!(fe.record_layout(huge).is_ok());
        assert!(matches!(fe.type_layout(ty), Err(FrontendError::LayoutUnavailable(_))));
    }

    #[test]
    fn test_pattern_layout_unavailable() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let t = b.template_param(Some("T"), 0, 0);
        let (vec, _) = b.record("Vec");
        b.define(vec, RecordDef::pattern(vec![TemplateParamDecl::Type { index: 0, name: Some("T".into()), ty: t }]));
        let fe = b.finish();
        assert!(matches!(fe.record_layout(vec), Err(FrontendError::LayoutUnavailable(_))));
        assert!(fe.type_layout(t).is_err());
    }
}
