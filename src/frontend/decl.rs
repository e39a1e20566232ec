// Mon Oct 12 2026 - Alex

use crate::frontend::{DeclId, TemplateArg, TypeRef};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A declaration as enumerated by the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Record(RecordInfo),
    Enum(EnumInfo),
    Other,
}

/// A template parameter of a class template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateParamDecl {
    Type {
        index: u32,
        #[serde(default)]
        name: Option<String>,
        /// The template-parameter type this parameter introduces.
        ty: TypeRef,
    },
    NonType {
        index: u32,
        #[serde(default)]
        name: Option<String>,
    },
}

impl TemplateParamDecl {
    /// Display name of a type parameter, `T<index>` when anonymous.
    /// Non-type parameters have no display form.
    pub fn display_name(&self) -> Option<String> {
        match self {
            TemplateParamDecl::Type { index, name, .. } => Some(match name {
                Some(name) if !name.is_empty() => name.clone(),
                _ => format!("T{}", index),
            }),
            TemplateParamDecl::NonType { .. } => None,
        }
    }
}

/// Renders `Name<P1,P2>` from the type parameters of a template; bare `Name`
/// when there are none.
pub fn pattern_display_name(qualified_name: &str, params: &[TemplateParamDecl]) -> String {
    let names = params.iter().filter_map(TemplateParamDecl::display_name).join(",");
    if names.is_empty() {
        qualified_name.to_string()
    } else {
        format!("{}<{}>", qualified_name, names)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordTemplate {
    /// Plain record, no template involvement.
    None,
    /// Uninstantiated class template pattern.
    Pattern { params: Vec<TemplateParamDecl> },
    /// Instantiation or explicit specialization of a class template.
    Specialization {
        #[serde(default)]
        pattern: Option<DeclId>,
        #[serde(default)]
        args: Vec<TemplateArg>,
    },
}

impl Default for RecordTemplate {
    fn default() -> Self {
        RecordTemplate::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInfo {
    pub id: DeclId,
    pub qualified_name: String,
    /// Canonical spelling of the record's type, tag keyword suppressed.
    pub spelling: String,
    pub complete: bool,
    /// Has virtual functions or virtual bases.
    pub polymorphic: bool,
    pub template: RecordTemplate,
}

impl RecordInfo {
    pub fn is_pattern(&self) -> bool {
        matches!(self.template, RecordTemplate::Pattern { .. })
    }

    /// Name under which this record is emitted and referenced.
    pub fn display_name(&self) -> String {
        match &self.template {
            RecordTemplate::None => self.qualified_name.clone(),
            RecordTemplate::Pattern { params } => pattern_display_name(&self.qualified_name, params),
            RecordTemplate::Specialization { .. } => {
                if self.spelling.is_empty() {
                    self.qualified_name.clone()
                } else {
                    self.spelling.clone()
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    pub value: i128,
}

impl Enumerator {
    pub fn new(name: &str, value: i128) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumInfo {
    pub id: DeclId,
    pub qualified_name: String,
    pub complete: bool,
    /// The enum's own type.
    pub ty: TypeRef,
    pub underlying: Option<TypeRef>,
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSpecifier {
    pub ty: TypeRef,
    #[serde(default)]
    pub is_virtual: bool,
}

impl BaseSpecifier {
    pub fn new(ty: TypeRef) -> Self {
        Self { ty, is_virtual: false }
    }

    pub fn virtual_base(ty: TypeRef) -> Self {
        Self { ty, is_virtual: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub bit_width: Option<u64>,
}

impl FieldDecl {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            bit_width: None,
        }
    }

    pub fn bitfield(name: &str, ty: TypeRef, bits: u64) -> Self {
        Self {
            name: name.to_string(),
            ty,
            bit_width: Some(bits),
        }
    }
}

/// A method declared directly on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// Function type of the method.
    pub ty: TypeRef,
    #[serde(default)]
    pub is_virtual: bool,
}

impl MethodDecl {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_virtual: false,
        }
    }

    pub fn virtual_method(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_virtual: true,
        }
    }
}

/// One function slot of a dispatch table, as the ABI model lays it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSlot {
    /// Declared or overriding function name; empty for anonymous functions.
    #[serde(default)]
    pub name: String,
    pub ty: TypeRef,
}

impl DispatchSlot {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// One dispatch table of an object. ABIs with multiple tables per object
/// report one of these per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchTable {
    pub slots: Vec<DispatchSlot>,
}

impl DispatchTable {
    pub fn new(slots: Vec<DispatchSlot>) -> Self {
        Self { slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_display_name() {
        let params = vec![
            TemplateParamDecl::Type { index: 0, name: Some("K".to_string()), ty: TypeRef(0) },
            TemplateParamDecl::NonType { index: 1, name: Some("N".to_string()) },
            TemplateParamDecl::Type { index: 2, name: None, ty: TypeRef(1) },
        ];
        assert_eq!(pattern_display_name("ns::Map", &params), "ns::Map<K,T2>");
        assert_eq!(pattern_display_name("ns::Map", &[]), "ns::Map");
    }

    #[test]
    fn test_specialization_display_falls_back_to_qualified_name() {
        let info = RecordInfo {
            id: DeclId(3),
            qualified_name: "Box".to_string(),
            spelling: String::new(),
            complete: true,
            polymorphic: false,
            template: RecordTemplate::Specialization { pattern: None, args: Vec::new() },
        };
        assert_eq!(info.display_name(), "Box");
    }
}
