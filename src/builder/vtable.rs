// Wed Oct 14 2026 - Alex

//! Synthesis of virtual dispatch tables and the vfptr fields that point at
//! them.

use crate::builder::TypeInterner;
use crate::frontend::{DispatchSlot, RecordInfo};
use crate::typedb::{Field, Node, NodeKind, VfTableData};

/// A synthesized table together with the owner's field pointing at it.
#[derive(Debug, Clone)]
pub struct SyntheticTable {
    pub table: Node,
    pub vfptr: Field,
}

pub fn vftable_name(record_name: &str, index: usize) -> String {
    format!("{}__vftable_{}", record_name, index)
}

fn build_table(
    interner: &mut TypeInterner<'_>,
    record_name: &str,
    index: usize,
    slots: &[DispatchSlot],
) -> SyntheticTable {
    let ptr_bytes = interner.frontend().target().pointer_bytes();
    let name = vftable_name(record_name, index);

    let mut fields = Vec::with_capacity(slots.len());
    for (slot_index, slot) in slots.iter().enumerate() {
        let fn_name = if slot.name.is_empty() {
            format!("fn{}", slot_index)
        } else {
            slot.name.clone()
        };
        let fn_id = interner.resolve(slot.ty);
        let type_id = interner.pointer_to(&fn_id);
        fields.push(Field::new(&fn_name, type_id).with_size(ptr_bytes));
    }

    let table = VfTableData {
        original_record: record_name.to_string(),
        size_bytes: fields.len() as u64 * ptr_bytes,
        align_bytes: ptr_bytes,
        fields,
    };
    let vfptr_type = interner.pointer_to(&name);
    SyntheticTable {
        table: Node::new(name, NodeKind::VfTable(table)),
        vfptr: Field::vfptr(index, vfptr_type, ptr_bytes),
    }
}

/// Table 0 of an uninstantiated pattern, listing only the virtuals declared
/// on the pattern itself.
pub fn synthesize_pattern_table(
    interner: &mut TypeInterner<'_>,
    record_name: &str,
    record: &RecordInfo,
) -> SyntheticTable {
    let slots = interner
        .frontend()
        .methods(record.id)
        .into_iter()
        .filter(|m| m.is_virtual)
        .map(|m| DispatchSlot { name: m.name, ty: m.ty })
        .collect::<Vec<_>>();
    build_table(interner, record_name, 0, &slots)
}

/// One table per dispatch table the ABI model reports for a dispatch root.
pub fn synthesize_root_tables(
    interner: &mut TypeInterner<'_>,
    record_name: &str,
    record: &RecordInfo,
) -> Vec<SyntheticTable> {
    interner
        .frontend()
        .dispatch_tables(record.id)
        .iter()
        .enumerate()
        .map(|(index, table)| build_table(interner, record_name, index, &table.slots))
        .collect()
}
