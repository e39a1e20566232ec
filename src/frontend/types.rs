// Mon Oct 12 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a declaration owned by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl DeclId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Opaque handle to a type reference. Not necessarily canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(pub u32);

impl TypeRef {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Ordered return/parameter list of a function type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub return_type: TypeRef,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub variadic: bool,
}

impl FunctionSignature {
    pub fn new(return_type: TypeRef, params: Vec<TypeRef>) -> Self {
        Self {
            return_type,
            params,
            variadic: false,
        }
    }

    pub fn with_variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }
}

/// A template argument as the frontend reports it. Only type arguments carry
/// identity into the type database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateArg {
    Type { ty: TypeRef },
    NonType { spelling: String },
}

impl TemplateArg {
    pub fn as_type(&self) -> Option<TypeRef> {
        match self {
            TemplateArg::Type { ty } => Some(*ty),
            TemplateArg::NonType { .. } => None,
        }
    }
}

/// Answer to "what is this canonical type?". Variants mirror the frontend's
/// type predicates; anything the frontend cannot classify is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    Builtin {
        size_bits: u64,
        align_bits: u64,
        /// Spelling without qualifiers, e.g. `int` for `const int`.
        #[serde(default)]
        name: Option<String>,
    },
    TemplateParam {
        depth: u32,
        index: u32,
        #[serde(default)]
        name: Option<String>,
    },
    Pointer {
        pointee: TypeRef,
    },
    LValueReference {
        pointee: TypeRef,
    },
    RValueReference {
        pointee: TypeRef,
    },
    ConstantArray {
        count: u64,
        element: TypeRef,
    },
    IncompleteArray {
        element: TypeRef,
    },
    Function(FunctionSignature),
    TemplateSpecialization {
        #[serde(default)]
        template: Option<String>,
        #[serde(default)]
        args: Vec<TemplateArg>,
    },
    Record {
        decl: DeclId,
    },
    Enum {
        decl: DeclId,
    },
    /// Sugar over another type; `canonical_type` strips it.
    Alias {
        target: TypeRef,
    },
    Other,
}

/// Size/alignment of a complete, non-dependent type, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLayout {
    pub size_bits: u64,
    pub align_bits: u64,
}

impl TypeLayout {
    pub fn new(size_bits: u64, align_bits: u64) -> Self {
        Self {
            size_bits,
            align_bits,
        }
    }
}

/// Record layout as the target ABI computes it, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    pub size_bytes: u64,
    pub align_bytes: u64,
}

impl RecordLayout {
    pub fn new(size_bytes: u64, align_bytes: u64) -> Self {
        Self {
            size_bytes,
            align_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub triple: String,
    pub pointer_width_bits: u32,
    pub char_width_bits: u32,
    pub long_width_bits: u32,
}

impl TargetInfo {
    pub fn new(triple: &str, pointer_width_bits: u32, char_width_bits: u32, long_width_bits: u32) -> Self {
        Self {
            triple: triple.to_string(),
            pointer_width_bits,
            char_width_bits,
            long_width_bits,
        }
    }

    /// 64-bit Windows, LLP64.
    pub fn msvc_x64() -> Self {
        Self::new("x86_64-pc-windows-msvc", 64, 8, 32)
    }

    /// 64-bit Linux, LP64.
    pub fn linux_x64() -> Self {
        Self::new("x86_64-unknown-linux-gnu", 64, 8, 64)
    }

    pub fn pointer_bytes(&self) -> u64 {
        u64::from(self.pointer_width_bits) / 8
    }
}

impl Default for TargetInfo {
    fn default() -> Self {
        Self::msvc_x64()
    }
}
