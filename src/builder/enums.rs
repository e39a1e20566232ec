// Wed Oct 14 2026 - Alex

use crate::frontend::{EnumInfo, Frontend};
use crate::typedb::{EnumData, Node, NodeKind};

/// Builds the node for a complete enum. Values are kept as decimal text so
/// 64-bit enumerators survive JSON consumers with double-precision numbers.
pub fn extract_enum(frontend: &dyn Frontend, info: &EnumInfo) -> Node {
    let mut data = EnumData::default();
    match frontend.type_layout(info.ty) {
        Ok(layout) => {
            data.size_bytes = layout.size_bits / 8;
            data.align_bytes = layout.align_bits / 8;
        }
        Err(e) => log::debug!("{}: {}", info.qualified_name, e),
    }
    if let Some(underlying) = info.underlying {
        if let Ok(layout) = frontend.type_layout(underlying) {
            data.integer_width_bits = layout.size_bits;
        }
    }
    data.enumerators = info
        .enumerators
        .iter()
        .map(|e| (e.name.clone(), e.value.to_string()))
        .collect();

    log::debug!("Extracted enum {} ({} enumerators)", info.qualified_name, data.enumerators.len());
    Node::new(info.qualified_name.clone(), NodeKind::Enum(data))
}
