// Tue Oct 13 2026 - Alex

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        const BASE = 1 << 0;
        const VIRTUAL_BASE = 1 << 1;
        const VFPTR = 1 << 2;
        const BITFIELD = 1 << 3;
    }
}

/// One entry of a record's or a vtable's field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub size_bytes: u64,
    /// Present iff the field is a bitfield.
    pub bit_width: Option<u64>,
    pub flags: FieldFlags,
    /// Name of the referenced node.
    pub type_id: String,
    /// False when the frontend could not size the field.
    pub layout_known: bool,
}

impl Field {
    pub fn new(name: &str, type_id: String) -> Self {
        Self {
            name: name.to_string(),
            size_bytes: 0,
            bit_width: None,
            flags: FieldFlags::empty(),
            type_id,
            layout_known: true,
        }
    }

    pub fn base(name: &str, type_id: String, is_virtual: bool) -> Self {
        let mut flags = FieldFlags::BASE;
        flags.set(FieldFlags::VIRTUAL_BASE, is_virtual);
        Self {
            flags,
            ..Self::new(name, type_id)
        }
    }

    pub fn vfptr(index: usize, type_id: String, size_bytes: u64) -> Self {
        Self {
            size_bytes,
            flags: FieldFlags::VFPTR,
            ..Self::new(&format!("__vfptr{}", index), type_id)
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    pub fn with_bit_width(mut self, bits: u64) -> Self {
        self.flags.insert(FieldFlags::BITFIELD);
        self.bit_width = Some(bits);
        self
    }

    /// Drops size information; the field keeps its name and type.
    pub fn without_layout(mut self) -> Self {
        self.size_bytes = 0;
        self.layout_known = false;
        self
    }

    pub fn is_base(&self) -> bool {
        self.flags.contains(FieldFlags::BASE)
    }

    pub fn is_virtual_base(&self) -> bool {
        self.flags.contains(FieldFlags::VIRTUAL_BASE)
    }

    pub fn is_vfptr(&self) -> bool {
        self.flags.contains(FieldFlags::VFPTR)
    }

    pub fn is_bitfield(&self) -> bool {
        self.flags.contains(FieldFlags::BITFIELD)
    }

    /// Wire kind; base wins over vfptr wins over bitfield.
    pub fn kind_str(&self) -> &'static str {
        if self.is_base() {
            "base"
        } else if self.is_vfptr() {
            "vfptr"
        } else if self.is_bitfield() {
            "bitfield"
        } else {
            "field"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kinds() {
        let base = Field::base("Base", "Base".into(), true);
        assert!(base.is_base() && base.is_virtual_base());
        assert_eq!(base.kind_str(), "base");

        let vfptr = Field::vfptr(1, "A__vftable_1 *".into(), 8);
        assert_eq!(vfptr.name, "__vfptr1");
        assert_eq!(vfptr.kind_str(), "vfptr");

        let bits = Field::new("flags", "unsigned int".into()).with_size(4).with_bit_width(3);
        assert_eq!(bits.kind_str(), "bitfield");
        assert_eq!(bits.bit_width, Some(3));

        let degraded = Field::new("x", "T".into()).with_size(4).without_layout();
        assert_eq!(degraded.size_bytes, 0);
        assert!(!degraded.layout_known);
    }
}
