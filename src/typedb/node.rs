// Tue Oct 13 2026 - Alex

use crate::typedb::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionData {
    pub return_type: String,
    pub params: Vec<String>,
    pub variadic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectData {
    pub size_bytes: u64,
    pub align_bytes: u64,
    /// Uninstantiated template pattern; layout not meaningful.
    pub template_primary: bool,
    pub layout_dependent: bool,
    pub template_type_args: Vec<String>,
    pub primary_template: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumData {
    pub size_bytes: u64,
    pub align_bytes: u64,
    pub integer_width_bits: u64,
    /// `(name, decimal value)` pairs.
    pub enumerators: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VfTableData {
    pub original_record: String,
    pub size_bytes: u64,
    pub align_bytes: u64,
    pub fields: Vec<Field>,
}

/// The closed set of node payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Builtin { name: String },
    TemplateParameter { index: u32, depth: u32, name: String },
    Pointer { pointee: String },
    FixedArray { size: u64, elem: String },
    UnsizedArray { elem: String },
    Function(FunctionData),
    FunctionPointer(FunctionData),
    TemplateSpecialization { name: String, type_args: Vec<String> },
    Object(ObjectData),
    Enum(EnumData),
    VfTable(VfTableData),
    Unknown { spelling: String },
}

impl NodeKind {
    /// Names of every node this payload refers to, in payload order.
    pub fn references(&self) -> Vec<&str> {
        match self {
            NodeKind::Builtin { .. }
            | NodeKind::TemplateParameter { .. }
            | NodeKind::Enum(_)
            | NodeKind::Unknown { .. } => Vec::new(),
            NodeKind::Pointer { pointee } => vec![pointee.as_str()],
            NodeKind::FixedArray { elem, .. } | NodeKind::UnsizedArray { elem } => vec![elem.as_str()],
            NodeKind::Function(data) | NodeKind::FunctionPointer(data) => std::iter::once(data.return_type.as_str())
                .chain(data.params.iter().map(String::as_str))
                .collect(),
            NodeKind::TemplateSpecialization { type_args, .. } => type_args.iter().map(String::as_str).collect(),
            NodeKind::Object(obj) => obj
                .template_type_args
                .iter()
                .map(String::as_str)
                .chain(obj.fields.iter().map(|f| f.type_id.as_str()))
                .collect(),
            NodeKind::VfTable(table) => std::iter::once(table.original_record.as_str())
                .chain(table.fields.iter().map(|f| f.type_id.as_str()))
                .collect(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectData> {
        match self {
            NodeKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumData> {
        match self {
            NodeKind::Enum(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_vftable(&self) -> Option<&VfTableData> {
        match self {
            NodeKind::VfTable(table) => Some(table),
            _ => None,
        }
    }
}

/// A uniquely named vertex of the type graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Best-effort C spelling; empty when there is none.
    pub cdecl: String,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cdecl: String::new(),
        }
    }

    pub fn with_cdecl(mut self, cdecl: impl Into<String>) -> Self {
        self.cdecl = cdecl.into();
        self
    }
}
