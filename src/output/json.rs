// Thu Oct 15 2026 - Alex

use crate::output::OutputError;
use crate::typedb::{Field, FunctionData, Node, NodeKind, ObjectData, TypeDb, SCHEMA_VERSION};
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Renders a [`TypeDb`] as the versioned JSON document. Object keys are
/// sorted, so equal databases render byte-identically.
pub struct JsonSerializer {
    pretty_print: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn to_value(&self, db: &TypeDb) -> Value {
        let mut nodes = Map::new();
        for node in db.iter() {
            nodes.insert(node.name.clone(), node_json(node));
        }

        let mut root = Map::new();
        root.insert("schema_version".to_string(), json!(SCHEMA_VERSION));
        root.insert("triple".to_string(), json!(db.triple));
        root.insert("pointer_width_bits".to_string(), json!(db.pointer_width_bits));
        root.insert("char_width_bits".to_string(), json!(db.char_width_bits));
        root.insert("long_width_bits".to_string(), json!(db.long_width_bits));
        root.insert("nodes".to_string(), Value::Object(nodes));
        Value::Object(root)
    }

    pub fn serialize(&self, db: &TypeDb) -> Result<String, OutputError> {
        let value = self.to_value(db);
        let text = if self.pretty_print {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    /// Writes the document followed by a newline to `path`, or to stdout.
    pub fn write_to(&self, db: &TypeDb, path: Option<&Path>) -> Result<(), OutputError> {
        let text = self.serialize(db)?;
        match path {
            Some(path) => {
                let mut writer = BufWriter::new(File::create(path)?);
                writeln!(writer, "{}", text)?;
                writer.flush()?;
                log::info!("Wrote {} nodes to {}", db.len(), path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                writeln!(lock, "{}", text)?;
                lock.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn node_json(node: &Node) -> Value {
    let mut obj = match &node.kind {
        NodeKind::Builtin { name } => object(json!({ "kind": "builtin", "name": name })),
        NodeKind::TemplateParameter { index, depth, name } => object(json!({
            "kind": "template_param",
            "index": index,
            "depth": depth,
            "name": name,
        })),
        NodeKind::Pointer { pointee } => object(json!({ "kind": "pointer", "pointee": pointee })),
        NodeKind::FixedArray { size, elem } => object(json!({ "kind": "const_array", "size": size, "elem": elem })),
        NodeKind::UnsizedArray { elem } => object(json!({ "kind": "incomplete_array", "elem": elem })),
        NodeKind::Function(data) => function_json("function", data),
        NodeKind::FunctionPointer(data) => function_json("function_pointer", data),
        NodeKind::TemplateSpecialization { name, type_args } => object(json!({
            "kind": "template_specialization",
            "name": name,
            "type_args": type_args,
        })),
        NodeKind::Object(data) => object_json(data),
        NodeKind::Enum(data) => {
            let mut obj = object(json!({
                "kind": "enum",
                "size_bytes": data.size_bytes,
                "align_bytes": data.align_bytes,
                "integer_width_bits": data.integer_width_bits,
            }));
            if !data.enumerators.is_empty() {
                let enumerators: Vec<Value> = data
                    .enumerators
                    .iter()
                    .map(|(name, value)| json!({ "name": name, "value": value }))
                    .collect();
                obj.insert("enumerators".to_string(), Value::Array(enumerators));
            }
            obj
        }
        NodeKind::VfTable(data) => object(json!({
            "kind": "vftable",
            "synthetic": true,
            "original_record": data.original_record,
            "size_bytes": data.size_bytes,
            "align_bytes": data.align_bytes,
            "fields": data.fields.iter().map(field_json).collect::<Vec<_>>(),
        })),
        NodeKind::Unknown { spelling } => object(json!({ "kind": "unknown", "spelling": spelling })),
    };
    if !node.cdecl.is_empty() {
        obj.insert("cdecl".to_string(), json!(node.cdecl));
    }
    Value::Object(obj)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn function_json(kind: &str, data: &FunctionData) -> Map<String, Value> {
    let mut obj = object(json!({
        "kind": kind,
        "return_type": data.return_type,
        "params": data.params,
    }));
    if data.variadic {
        obj.insert("variadic".to_string(), json!(true));
    }
    obj
}

// Records carry no "kind"; consumers tell them apart by the absence.
fn object_json(data: &ObjectData) -> Map<String, Value> {
    let mut obj = Map::new();
    if data.template_primary {
        obj.insert("template_primary".to_string(), json!(true));
    }
    if let Some(primary) = &data.primary_template {
        obj.insert("primary_template".to_string(), json!(primary));
    }
    if data.layout_dependent {
        obj.insert("layout_dependent".to_string(), json!(true));
        if data.size_bytes != 0 {
            obj.insert("size_bytes".to_string(), json!(data.size_bytes));
        }
        if data.align_bytes != 0 {
            obj.insert("align_bytes".to_string(), json!(data.align_bytes));
        }
    } else {
        obj.insert("size_bytes".to_string(), json!(data.size_bytes));
        obj.insert("align_bytes".to_string(), json!(data.align_bytes));
    }
    if !data.template_type_args.is_empty() {
        obj.insert("template_type_args".to_string(), json!(data.template_type_args));
    }
    obj.insert(
        "fields".to_string(),
        Value::Array(data.fields.iter().map(field_json).collect()),
    );
    obj
}

fn field_json(field: &Field) -> Value {
    let mut obj = Map::new();
    obj.insert("kind".to_string(), json!(field.kind_str()));
    obj.insert("name".to_string(), json!(field.name));
    if field.is_virtual_base() {
        obj.insert("is_virtual_base".to_string(), json!(true));
    }
    if let Some(bits) = field.bit_width.filter(|_| field.is_bitfield()) {
        obj.insert("bit_width".to_string(), json!(bits));
    }
    if field.layout_known && field.size_bytes != 0 {
        obj.insert("size_bytes".to_string(), json!(field.size_bytes));
    }
    obj.insert("type".to_string(), json!(field.type_id));
    Value::Object(obj)
}
