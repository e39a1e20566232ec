// Wed Oct 14 2026 - Alex

use crate::builder::vtable::{self, SyntheticTable};
use crate::builder::TypeInterner;
use crate::frontend::{pattern_display_name, RecordInfo, RecordLayout, RecordTemplate, TemplateParamDecl, TypeShape};
use crate::typedb::{Field, Node, NodeKind, ObjectData};

/// Output of expanding one record declaration.
#[derive(Debug, Clone)]
pub struct ExpandedRecord {
    pub name: String,
    pub object: ObjectData,
    /// Vtable nodes synthesized for this record.
    pub synthetic: Vec<Node>,
}

impl ExpandedRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &ObjectData {
        &self.object
    }

    pub fn into_nodes(self) -> (Node, Vec<Node>) {
        (Node::new(self.name, NodeKind::Object(self.object)), self.synthetic)
    }
}

/// Expands a class/struct/union into its object node. Degraded information
/// (dependent or incomplete parts) lowers detail; expansion itself never
/// fails.
pub struct RecordExpander<'a, 'f> {
    interner: &'a mut TypeInterner<'f>,
}

impl<'a, 'f> RecordExpander<'a, 'f> {
    pub fn new(interner: &'a mut TypeInterner<'f>) -> Self {
        Self { interner }
    }

    pub fn expand(&mut self, record: &RecordInfo) -> ExpandedRecord {
        let mut name = record.display_name();
        if name.is_empty() {
            name = record.qualified_name.clone();
        }

        let mut obj = ObjectData::default();
        self.apply_template_info(record, &mut obj);

        let layout = if record.is_pattern() {
            obj.template_primary = true;
            obj.layout_dependent = true;
            None
        } else {
            match self.interner.frontend().record_layout(record.id) {
                Ok(layout) => {
                    obj.size_bytes = layout.size_bytes;
                    obj.align_bytes = layout.align_bytes;
                    Some(layout)
                }
                Err(e) => {
                    log::debug!("{}: {}", name, e);
                    obj.layout_dependent = true;
                    None
                }
            }
        };

        let mut fields = Vec::new();
        self.expand_bases(record, layout, &mut fields);

        let tables = self.synthesize_dispatch(&name, record);
        let mut synthetic = Vec::with_capacity(tables.len());
        for SyntheticTable { table, vfptr } in tables {
            fields.push(vfptr);
            synthetic.push(table);
        }

        self.expand_members(record, layout, &mut fields);
        obj.fields = fields;

        log::debug!(
            "Expanded record {} ({} fields, {} vtables)",
            name,
            obj.fields.len(),
            synthetic.len()
        );

        ExpandedRecord {
            name,
            object: obj,
            synthetic,
        }
    }

    fn apply_template_info(&mut self, record: &RecordInfo, obj: &mut ObjectData) {
        let fe = self.interner.frontend();
        match &record.template {
            RecordTemplate::None => {}
            RecordTemplate::Pattern { params } => {
                for param in params {
                    if let TemplateParamDecl::Type { ty, .. } = param {
                        let id = self.interner.resolve(*ty);
                        obj.template_type_args.push(id);
                    }
                }
            }
            RecordTemplate::Specialization { pattern, args } => {
                if let Some(pattern) = pattern {
                    self.interner.queue_record(*pattern);
                    if let Some(pattern_info) = fe.record(*pattern) {
                        obj.primary_template = Some(match &pattern_info.template {
                            RecordTemplate::Pattern { params } => {
                                pattern_display_name(&pattern_info.qualified_name, params)
                            }
                            _ => pattern_info.qualified_name.clone(),
                        });
                    }
                }
                for arg in args.iter().filter_map(|a| a.as_type()) {
                    let id = self.interner.resolve(arg);
                    obj.template_type_args.push(id);
                }
            }
        }
    }

    fn expand_bases(&mut self, record: &RecordInfo, layout: Option<RecordLayout>, fields: &mut Vec<Field>) {
        let fe = self.interner.frontend();
        for base in fe.bases(record.id) {
            let canon = fe.canonical_type(base.ty);
            let type_id = self.interner.resolve(base.ty);
            let field = match fe.type_shape(canon) {
                TypeShape::Record { decl } => {
                    let base_info = fe.record(decl);
                    let base_name = base_info
                        .as_ref()
                        .map(|info| info.qualified_name.clone())
                        .unwrap_or_else(|| type_id.clone());
                    let field = Field::base(&base_name, type_id, base.is_virtual);
                    let complete = base_info.map(|info| info.complete).unwrap_or(false);
                    self.interner.queue_record(decl);
                    match (layout, complete) {
                        (Some(_), true) => match fe.record_layout(decl) {
                            Ok(base_layout) => field.with_size(base_layout.size_bytes),
                            Err(_) => field.without_layout(),
                        },
                        _ => field.without_layout(),
                    }
                }
                // Dependent base of a template pattern.
                _ => Field::base(&fe.type_spelling(canon), type_id, base.is_virtual).without_layout(),
            };
            fields.push(field);
        }
    }

    fn synthesize_dispatch(&mut self, name: &str, record: &RecordInfo) -> Vec<SyntheticTable> {
        if !record.polymorphic {
            return Vec::new();
        }
        if record.is_pattern() {
            return vec![vtable::synthesize_pattern_table(self.interner, name, record)];
        }
        // Records with bases reuse the vfptr inherited through their bases.
        if self.interner.frontend().bases(record.id).is_empty() {
            return vtable::synthesize_root_tables(self.interner, name, record);
        }
        Vec::new()
    }

    fn expand_members(&mut self, record: &RecordInfo, layout: Option<RecordLayout>, fields: &mut Vec<Field>) {
        let fe = self.interner.frontend();
        for decl in fe.fields(record.id) {
            let type_id = self.interner.resolve(decl.ty);
            let mut field = Field::new(&decl.name, type_id);
            if let Some(bits) = decl.bit_width {
                field = field.with_bit_width(bits);
            }
            let size = layout.and_then(|_| fe.type_layout(decl.ty).ok());
            field = match size {
                Some(type_layout) => field.with_size(type_layout.size_bits / 8),
                None => field.without_layout(),
            };
            fields.push(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{
        BaseSpecifier, DispatchSlot, DispatchTable, FieldDecl, Frontend, MethodDecl, RecordDef, SnapshotBuilder,
        TargetInfo, TemplateArg,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_order_bases_vfptr_members() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let int = b.builtin("int", 32);
        let void = b.builtin("void", 0);
        let f = b.function(void, &[], false);
        let (base, base_ty) = b.record("Base");
        b.define(base, RecordDef::new(4, 4).with_field(FieldDecl::new("b", int)));
        let (root, _) = b.record("Root");
        b.define(
            root,
            RecordDef::new(16, 8)
                .with_method(MethodDecl::virtual_method("run", f))
                .with_dispatch_table(DispatchTable::new(vec![DispatchSlot::new("run", f)]))
                .with_field(FieldDecl::new("x", int)),
        );
        let (derived, _) = b.record("Derived");
        b.define(
            derived,
            RecordDef::new(8, 4)
                .with_base(BaseSpecifier::new(base_ty))
                .with_field(FieldDecl::new("d", int)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let root_rec = RecordExpander::new(&mut interner).expand(&fe.record(root).unwrap());
        let kinds: Vec<_> = root_rec.object().fields.iter().map(|f| f.kind_str()).collect();
        assert_eq!(kinds, vec!["vfptr", "field"]);

        let derived_rec = RecordExpander::new(&mut interner).expand(&fe.record(derived).unwrap());
        let obj = derived_rec.object();
        assert_eq!(obj.fields[0].name, "Base");
        assert_eq!(obj.fields[0].size_bytes, 4);
        assert_eq!(obj.fields[1].name, "d");
        assert!(derived_rec.synthetic.is_empty());
    }

    #[test]
    fn test_root_with_two_tables_gets_two_vfptrs() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let int = b.builtin("int", 32);
        let void = b.builtin("void", 0);
        let f = b.function(void, &[], false);
        let g = b.function(int, &[int], false);
        let (multi, _) = b.record("Multi");
        b.define(
            multi,
            RecordDef::new(24, 8)
                .with_dispatch_table(DispatchTable::new(vec![DispatchSlot::new("draw", f)]))
                .with_dispatch_table(DispatchTable::new(vec![DispatchSlot::new("hash", g)]))
                .with_field(FieldDecl::new("x", int)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let rec = RecordExpander::new(&mut interner).expand(&fe.record(multi).unwrap());
        let fields = &rec.object().fields;
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["__vfptr0", "__vfptr1", "x"]);
        assert!(fields[1].is_vfptr());
        assert_eq!(fields[1].type_id, "Multi__vftable_1 *");
        assert_eq!(fields[1].size_bytes, 8);

        let tables: Vec<_> = rec.synthetic.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(tables, vec!["Multi__vftable_0", "Multi__vftable_1"]);
        let second = rec.synthetic[1].kind.as_vftable().unwrap();
        assert_eq!(second.fields[0].name, "hash");
        assert_eq!(second.fields[0].type_id, "int (int) *");
        assert!(interner.arena().contains("Multi__vftable_1 *"));
    }

    #[test]
    fn test_dependent_base_keeps_spelling() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let t = b.template_param(Some("T"), 0, 0);
        let base_t = b.template_specialization("Base", vec![TemplateArg::Type { ty: t }]);
        let (derived, _) = b.record("Derived");
        b.define(
            derived,
            RecordDef::pattern(vec![TemplateParamDecl::Type { index: 0, name: Some("T".into()), ty: t }])
                .with_base(BaseSpecifier::new(base_t))
                .with_field(FieldDecl::new("value", t)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let rec = RecordExpander::new(&mut interner).expand(&fe.record(derived).unwrap());
        let base = &rec.object().fields[0];
        assert!(base.is_base() && !base.is_virtual_base());
        assert_eq!(base.name, "Base<type-parameter-0-0>");
        assert_eq!(base.type_id, "Base<type-parameter-0-0>");
        assert!(!base.layout_known);
        assert_eq!(base.size_bytes, 0);
        assert!(matches!(
            interner.arena().get("Base<type-parameter-0-0>").unwrap().kind,
            NodeKind::TemplateSpecialization { .. }
        ));
        // Nothing to expand behind a dependent base.
        assert_eq!(interner.worklist_mut().pop(), None);
    }

    #[test]
    fn test_bitfield_widths() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let uint = b.builtin("unsigned int", 32);
        let (flags, _) = b.record("Flags");
        b.define(
            flags,
            RecordDef::new(4, 4)
                .with_field(FieldDecl::bitfield("lo", uint, 3))
                .with_field(FieldDecl::bitfield("hi", uint, 5)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let rec = RecordExpander::new(&mut interner).expand(&fe.record(flags).unwrap());
        let fields = &rec.object().fields;
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.is_bitfield()));
        assert_eq!(fields[0].bit_width, Some(3));
        assert_eq!(fields[1].bit_width, Some(5));
    }

    #[test]
    fn test_pattern_has_no_layout() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let t = b.template_param(Some("T"), 0, 0);
        let tp = b.pointer(t);
        let (list, _) = b.record("List");
        b.define(
            list,
            RecordDef::pattern(vec![TemplateParamDecl::Type { index: 0, name: Some("T".into()), ty: t }])
                .with_field(FieldDecl::new("head", tp))
                .with_field(FieldDecl::new("value", t)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let rec = RecordExpander::new(&mut interner).expand(&fe.record(list).unwrap());
        assert_eq!(rec.name(), "List<T>");
        let obj = rec.object();
        assert!(obj.template_primary && obj.layout_dependent);
        assert_eq!((obj.size_bytes, obj.align_bytes), (0, 0));
        assert_eq!(obj.template_type_args, vec!["type-parameter-0-0".to_string()]);
        assert!(obj.fields.iter().all(|f| !f.layout_known && f.size_bytes == 0));
        assert_eq!(obj.fields[0].type_id, "type-parameter-0-0 *");
    }

    #[test]
    fn test_specialization_records_primary_and_queues_pattern() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let int = b.builtin("int", 32);
        let t = b.template_param(Some("T"), 0, 0);
        let (pattern, _) = b.record("Box");
        b.define(
            pattern,
            RecordDef::pattern(vec![TemplateParamDecl::Type { index: 0, name: Some("T".into()), ty: t }])
                .with_field(FieldDecl::new("value", t)),
        );
        let (spec, _) = b.record_spelled("Box", "Box<int>");
        b.define(
            spec,
            RecordDef::new(4, 4)
                .with_specialization(Some(pattern), vec![TemplateArg::Type { ty: int }])
                .with_field(FieldDecl::new("value", int)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let rec = RecordExpander::new(&mut interner).expand(&fe.record(spec).unwrap());
        assert_eq!(rec.name(), "Box<int>");
        let obj = rec.object();
        assert_eq!(obj.primary_template.as_deref(), Some("Box<T>"));
        assert_eq!(obj.template_type_args, vec!["int".to_string()]);
        assert_eq!(obj.size_bytes, 4);
        assert_eq!(interner.worklist_mut().pop(), Some(pattern));
    }

    #[test]
    fn test_unavailable_layout_degrades() {
        let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
        let int = b.builtin("int", 32);
        let (base, base_ty) = b.record("Base");
        b.define(base, RecordDef::new(4, 4));
        let (odd, _) = b.record("Odd");
        b.define(
            odd,
            RecordDef::without_layout()
                .with_base(BaseSpecifier::virtual_base(base_ty))
                .with_field(FieldDecl::new("x", int)),
        );
        let fe = b.finish();

        let mut interner = TypeInterner::new(&fe);
        let rec = RecordExpander::new(&mut interner).expand(&fe.record(odd).unwrap());
        let obj = rec.object();
        assert!(obj.layout_dependent);
        assert!(obj.fields[0].is_virtual_base());
        assert!(obj.fields.iter().all(|f| !f.layout_known));
        // Virtual base makes it polymorphic but it has a base, so no own table.
        assert!(rec.synthetic.is_empty());
    }
}
