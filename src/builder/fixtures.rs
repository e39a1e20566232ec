// Thu Oct 15 2026 - Alex

use crate::frontend::{
    BaseSpecifier, DispatchSlot, DispatchTable, FieldDecl, MethodDecl, RecordDef, SnapshotBuilder, SnapshotFrontend,
    TargetInfo,
};

/// Two dispatch roots, an enum, and a class deriving from both roots.
pub(crate) fn sample_unit() -> SnapshotFrontend {
    let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
    let int = b.builtin("int", 32);
    let void = b.builtin("void", 0);
    let thunk = b.function(void, &[], false);
    let getter = b.function(int, &[], false);

    let (parent, parent_ty) = b.record("SomeParentClass");
    b.define(
        parent,
        RecordDef::new(16, 8)
            .with_method(MethodDecl::virtual_method("help", thunk))
            .with_method(MethodDecl::virtual_method("test", getter))
            .with_dispatch_table(DispatchTable::new(vec![
                DispatchSlot::new("help", thunk),
                DispatchSlot::new("test", getter),
            ]))
            .with_field(FieldDecl::new("value", int)),
    );

    let (iface, iface_ty) = b.record("SomePureVirtualClass");
    b.define(
        iface,
        RecordDef::new(8, 8)
            .with_method(MethodDecl::virtual_method("start", thunk))
            .with_method(MethodDecl::virtual_method("stop", thunk))
            .with_dispatch_table(DispatchTable::new(vec![
                DispatchSlot::new("start", thunk),
                DispatchSlot::new("stop", thunk),
            ])),
    );

    let (_, color_ty) = b.enumeration("MyEnum", int, &[("v1", 0), ("v2", 1), ("v3", 5), ("v4", 6)]);
    let parent_ptr = b.pointer(parent_ty);

    let (derived, _) = b.record("MyClass");
    b.define(
        derived,
        RecordDef::new(40, 8)
            .with_base(BaseSpecifier::new(iface_ty))
            .with_base(BaseSpecifier::new(parent_ty))
            .with_method(MethodDecl::virtual_method("start", thunk))
            .with_method(MethodDecl::virtual_method("help", thunk))
            .with_dispatch_table(DispatchTable::new(vec![
                DispatchSlot::new("start", thunk),
                DispatchSlot::new("stop", thunk),
            ]))
            .with_dispatch_table(DispatchTable::new(vec![
                DispatchSlot::new("help", thunk),
                DispatchSlot::new("test", getter),
            ]))
            .with_field(FieldDecl::new("kind", color_ty))
            .with_field(FieldDecl::new("link", parent_ptr)),
    );
    b.finish()
}

/// `A` and `B` pointing at each other.
pub(crate) fn cyclic_unit() -> SnapshotFrontend {
    let mut b = SnapshotBuilder::new(TargetInfo::msvc_x64());
    let (a, a_ty) = b.record("A");
    let (bb, b_ty) = b.record("B");
    let a_ptr = b.pointer(a_ty);
    let b_ptr = b.pointer(b_ty);
    b.define(a, RecordDef::new(8, 8).with_field(FieldDecl::new("b", b_ptr)));
    b.define(bb, RecordDef::new(8, 8).with_field(FieldDecl::new("a", a_ptr)));
    b.finish()
}
