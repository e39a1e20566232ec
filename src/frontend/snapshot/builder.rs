// Tue Oct 13 2026 - Alex

use crate::frontend::snapshot::{DeclEntry, EnumDef, RecordDef, SnapshotFrontend, TypeEntry, UnitSnapshot};
use crate::frontend::{DeclId, Enumerator, FunctionSignature, TargetInfo, TemplateArg, TypeRef, TypeShape};
use itertools::Itertools;

/// Assembles a [`UnitSnapshot`] in memory. Spellings follow the C printer:
/// `T *`, `T &`, `T[N]`, `R (P1, P2)`.
pub struct SnapshotBuilder {
    unit: UnitSnapshot,
}

impl SnapshotBuilder {
    pub fn new(target: TargetInfo) -> Self {
        Self {
            unit: UnitSnapshot::new(target),
        }
    }

    pub fn with_error_count(mut self, errors: usize) -> Self {
        self.unit.error_count = errors;
        self
    }

    pub fn push_type(&mut self, spelling: &str, shape: TypeShape) -> TypeRef {
        let ty = TypeRef::new(self.unit.types.len() as u32);
        self.unit.types.push(TypeEntry {
            spelling: spelling.to_string(),
            shape,
        });
        ty
    }

    fn push_decl(&mut self, entry: DeclEntry) -> DeclId {
        let decl = DeclId::new(self.unit.decls.len() as u32);
        self.unit.decls.push(entry);
        decl
    }

    fn spelling(&self, ty: TypeRef) -> String {
        self.unit
            .types
            .get(ty.index())
            .map(|e| e.spelling.clone())
            .unwrap_or_default()
    }

    fn param_list(&self, sig: &FunctionSignature) -> String {
        let mut params = sig.params.iter().map(|p| self.spelling(*p)).collect::<Vec<_>>();
        if sig.variadic {
            params.push("...".to_string());
        }
        params.join(", ")
    }

    pub fn builtin(&mut self, spelling: &str, size_bits: u64) -> TypeRef {
        self.builtin_aligned(spelling, size_bits, size_bits)
    }

    pub fn builtin_aligned(&mut self, spelling: &str, size_bits: u64, align_bits: u64) -> TypeRef {
        self.push_type(
            spelling,
            TypeShape::Builtin {
                size_bits,
                align_bits,
                name: Some(spelling.to_string()),
            },
        )
    }

    /// `ty` with a cv-qualifier: `const int`, `int *const`. The shape is
    /// unchanged, so builtins keep their unqualified name.
    pub fn qualified(&mut self, ty: TypeRef, qualifier: &str) -> TypeRef {
        let base = self.spelling(ty);
        let spelling = if base.ends_with('*') {
            format!("{}{}", base, qualifier)
        } else {
            format!("{} {}", qualifier, base)
        };
        let shape = self
            .unit
            .types
            .get(ty.index())
            .map(|e| e.shape.clone())
            .unwrap_or(TypeShape::Other);
        self.push_type(&spelling, shape)
    }

    pub fn pointer(&mut self, pointee: TypeRef) -> TypeRef {
        let shape = self.unit.types.get(pointee.index()).map(|e| e.shape.clone());
        let spelling = match shape {
            Some(TypeShape::Function(sig)) => {
                format!("{} (*)({})", self.spelling(sig.return_type), self.param_list(&sig))
            }
            Some(TypeShape::ConstantArray { count, element }) => {
                format!("{} (*)[{}]", self.spelling(element), count)
            }
            Some(TypeShape::IncompleteArray { element }) => format!("{} (*)[]", self.spelling(element)),
            _ => format!("{} *", self.spelling(pointee)),
        };
        self.push_type(&spelling, TypeShape::Pointer { pointee })
    }

    pub fn lvalue_ref(&mut self, pointee: TypeRef) -> TypeRef {
        let spelling = format!("{} &", self.spelling(pointee));
        self.push_type(&spelling, TypeShape::LValueReference { pointee })
    }

    pub fn rvalue_ref(&mut self, pointee: TypeRef) -> TypeRef {
        let spelling = format!("{} &&", self.spelling(pointee));
        self.push_type(&spelling, TypeShape::RValueReference { pointee })
    }

    pub fn array(&mut self, element: TypeRef, count: u64) -> TypeRef {
        let spelling = format!("{}[{}]", self.spelling(element), count);
        self.push_type(&spelling, TypeShape::ConstantArray { count, element })
    }

    pub fn incomplete_array(&mut self, element: TypeRef) -> TypeRef {
        let spelling = format!("{}[]", self.spelling(element));
        self.push_type(&spelling, TypeShape::IncompleteArray { element })
    }

    pub fn function(&mut self, return_type: TypeRef, params: &[TypeRef], variadic: bool) -> TypeRef {
        let sig = FunctionSignature::new(return_type, params.to_vec()).with_variadic(variadic);
        let spelling = format!("{} ({})", self.spelling(return_type), self.param_list(&sig));
        self.push_type(&spelling, TypeShape::Function(sig))
    }

    /// Canonical template parameters print positionally.
    pub fn template_param(&mut self, name: Option<&str>, depth: u32, index: u32) -> TypeRef {
        let spelling = format!("type-parameter-{}-{}", depth, index);
        self.push_type(
            &spelling,
            TypeShape::TemplateParam {
                depth,
                index,
                name: name.map(str::to_string),
            },
        )
    }

    pub fn template_specialization(&mut self, template: &str, args: Vec<TemplateArg>) -> TypeRef {
        let spelled = args
            .iter()
            .map(|arg| match arg {
                TemplateArg::Type { ty } => self.spelling(*ty),
                TemplateArg::NonType { spelling } => spelling.clone(),
            })
            .join(", ");
        let spelling = format!("{}<{}>", template, spelled);
        self.push_type(
            &spelling,
            TypeShape::TemplateSpecialization {
                template: Some(template.to_string()),
                args,
            },
        )
    }

    pub fn alias(&mut self, name: &str, target: TypeRef) -> TypeRef {
        self.push_type(name, TypeShape::Alias { target })
    }

    /// A type the frontend cannot classify.
    pub fn opaque(&mut self, spelling: &str) -> TypeRef {
        self.push_type(spelling, TypeShape::Other)
    }

    /// Declares a record; it stays incomplete until [`Self::define`].
    pub fn record(&mut self, name: &str) -> (DeclId, TypeRef) {
        self.record_spelled(name, name)
    }

    /// Declares a record whose type prints differently from its qualified
    /// name, e.g. a specialization `Box<int>` of `Box`.
    pub fn record_spelled(&mut self, name: &str, spelling: &str) -> (DeclId, TypeRef) {
        let decl = DeclId::new(self.unit.decls.len() as u32);
        let ty = self.push_type(spelling, TypeShape::Record { decl });
        self.push_decl(DeclEntry::Record {
            name: name.to_string(),
            ty,
            definition: None,
        });
        (decl, ty)
    }

    pub fn define(&mut self, decl: DeclId, def: RecordDef) {
        if let Some(DeclEntry::Record { definition, .. }) = self.unit.decls.get_mut(decl.index()) {
            *definition = Some(def);
        }
    }

    pub fn enumeration(&mut self, name: &str, underlying: TypeRef, enumerators: &[(&str, i128)]) -> (DeclId, TypeRef) {
        let (decl, ty) = self.forward_enum(name);
        if let Some(DeclEntry::Enum { definition, .. }) = self.unit.decls.get_mut(decl.index()) {
            *definition = Some(EnumDef {
                underlying: Some(underlying),
                enumerators: enumerators.iter().map(|(n, v)| Enumerator::new(n, *v)).collect(),
            });
        }
        (decl, ty)
    }

    pub fn forward_enum(&mut self, name: &str) -> (DeclId, TypeRef) {
        let decl = DeclId::new(self.unit.decls.len() as u32);
        let ty = self.push_type(name, TypeShape::Enum { decl });
        self.push_decl(DeclEntry::Enum {
            name: name.to_string(),
            ty,
            definition: None,
        });
        (decl, ty)
    }

    /// A declaration that is neither a record nor an enum.
    pub fn other(&mut self, name: &str) -> DeclId {
        self.push_decl(DeclEntry::Other { name: name.to_string() })
    }

    pub fn finish(self) -> SnapshotFrontend {
        SnapshotFrontend { unit: self.unit }
    }
}
