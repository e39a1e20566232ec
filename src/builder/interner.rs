// Wed Oct 14 2026 - Alex

use crate::builder::Worklist;
use crate::frontend::{DeclId, FunctionSignature, Frontend, TemplateArg, TypeRef, TypeShape};
use crate::typedb::{FunctionData, Node, NodeArena, NodeKind};
use indexmap::IndexSet;

/// Type nesting deeper than this is interned as unknown.
const MAX_TYPE_DEPTH: usize = 256;

/// Maps canonical type references to node names, creating each node the
/// first time its name is seen.
pub struct TypeInterner<'f> {
    frontend: &'f dyn Frontend,
    arena: NodeArena,
    worklist: Worklist,
    referenced_enums: IndexSet<DeclId>,
}

impl<'f> TypeInterner<'f> {
    pub fn new(frontend: &'f dyn Frontend) -> Self {
        Self {
            frontend,
            arena: NodeArena::new(),
            worklist: Worklist::new(),
            referenced_enums: IndexSet::new(),
        }
    }

    pub fn frontend(&self) -> &'f dyn Frontend {
        self.frontend
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn worklist(&self) -> &Worklist {
        &self.worklist
    }

    pub fn worklist_mut(&mut self) -> &mut Worklist {
        &mut self.worklist
    }

    /// Complete enums reached through [`Self::resolve`], first-reached first.
    pub fn referenced_enums(&self) -> &IndexSet<DeclId> {
        &self.referenced_enums
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Queues a record for expansion unless it is incomplete or was queued
    /// before.
    pub fn queue_record(&mut self, decl: DeclId) -> bool {
        match self.frontend.record(decl) {
            Some(info) if info.complete => self.worklist.enqueue(decl),
            _ => false,
        }
    }

    fn intern(&mut self, id: String, kind: NodeKind, cdecl: String) -> String {
        if self.arena.contains(&id) {
            return id;
        }
        let cdecl = if cdecl.is_empty() { id.clone() } else { cdecl };
        log::trace!("Interned {}", id);
        self.arena.push(Node::new(id.clone(), kind).with_cdecl(cdecl));
        id
    }

    /// Pointer node to an already-resolved name, named `<pointee> *`.
    pub fn pointer_to(&mut self, pointee: &str) -> String {
        self.pointer_spelled(pointee, String::new())
    }

    /// Like [`Self::pointer_to`], but keeps `cdecl` as the declarator
    /// text, e.g. `int (*)[4]` for the node `int[4] *`.
    fn pointer_spelled(&mut self, pointee: &str, cdecl: String) -> String {
        let id = format!("{} *", pointee);
        if self.arena.contains(&id) {
            return id;
        }
        let kind = NodeKind::Pointer {
            pointee: pointee.to_string(),
        };
        self.intern(id, kind, cdecl)
    }

    pub fn resolve(&mut self, ty: TypeRef) -> String {
        self.resolve_at(ty, 0)
    }

    fn unknown(&mut self, spelling: String) -> String {
        let kind = NodeKind::Unknown {
            spelling: spelling.clone(),
        };
        self.intern(spelling.clone(), kind, spelling)
    }

    fn function_data(&mut self, sig: &FunctionSignature, depth: usize) -> FunctionData {
        FunctionData {
            return_type: self.resolve_at(sig.return_type, depth + 1),
            params: sig.params.iter().map(|p| self.resolve_at(*p, depth + 1)).collect(),
            variadic: sig.variadic,
        }
    }

    fn resolve_at(&mut self, ty: TypeRef, depth: usize) -> String {
        let fe = self.frontend;
        let canon = fe.canonical_type(ty);
        let printed = fe.type_spelling(canon);
        if depth > MAX_TYPE_DEPTH {
            log::warn!("Type nesting too deep at {}, interning as unknown", printed);
            return self.unknown(printed);
        }

        match fe.type_shape(canon) {
            TypeShape::Builtin { name, .. } => {
                let name = name.filter(|n| !n.is_empty()).unwrap_or_else(|| printed.clone());
                let kind = NodeKind::Builtin { name };
                self.intern(printed.clone(), kind, printed)
            }
            TypeShape::TemplateParam { depth: param_depth, index, name } => {
                let name = name.filter(|n| !n.is_empty()).unwrap_or_else(|| "(anon)".to_string());
                let kind = NodeKind::TemplateParameter {
                    index,
                    depth: param_depth,
                    name,
                };
                self.intern(printed.clone(), kind, printed)
            }
            TypeShape::Pointer { pointee } => {
                let pointee_canon = fe.canonical_type(pointee);
                if let TypeShape::Function(sig) = fe.type_shape(pointee_canon) {
                    if self.arena.contains(&printed) {
                        return printed;
                    }
                    let data = self.function_data(&sig, depth);
                    return self.intern(printed.clone(), NodeKind::FunctionPointer(data), printed);
                }
                let pointee_id = self.resolve_at(pointee, depth + 1);
                self.pointer_spelled(&pointee_id, printed)
            }
            TypeShape::LValueReference { pointee } | TypeShape::RValueReference { pointee } => {
                let pointee_id = self.resolve_at(pointee, depth + 1);
                self.pointer_to(&pointee_id)
            }
            TypeShape::ConstantArray { count, element } => {
                if self.arena.contains(&printed) {
                    return printed;
                }
                let elem = self.resolve_at(element, depth + 1);
                self.intern(printed.clone(), NodeKind::FixedArray { size: count, elem }, printed)
            }
            TypeShape::IncompleteArray { element } => {
                if self.arena.contains(&printed) {
                    return printed;
                }
                let elem = self.resolve_at(element, depth + 1);
                self.intern(printed.clone(), NodeKind::UnsizedArray { elem }, printed)
            }
            TypeShape::Function(sig) => {
                if self.arena.contains(&printed) {
                    return printed;
                }
                let data = self.function_data(&sig, depth);
                self.intern(printed.clone(), NodeKind::Function(data), printed)
            }
            TypeShape::TemplateSpecialization { template, args } => {
                if self.arena.contains(&printed) {
                    return printed;
                }
                let name = template.unwrap_or_else(|| printed.clone());
                let type_args = args
                    .iter()
                    .filter_map(TemplateArg::as_type)
                    .map(|arg| self.resolve_at(arg, depth + 1))
                    .collect();
                self.intern(
                    printed.clone(),
                    NodeKind::TemplateSpecialization { name, type_args },
                    printed,
                )
            }
            TypeShape::Record { decl } => match fe.record(decl) {
                Some(info) if info.complete => {
                    self.worklist.enqueue(decl);
                    info.display_name()
                }
                // Never defined in this unit: keep the reference resolvable.
                Some(info) => {
                    let name = info.display_name();
                    let kind = NodeKind::Unknown { spelling: printed.clone() };
                    self.intern(name, kind, printed)
                }
                None => self.unknown(printed),
            },
            TypeShape::Enum { decl } => match fe.enumeration(decl) {
                Some(info) if info.complete => {
                    self.referenced_enums.insert(decl);
                    info.qualified_name
                }
                _ => self.unknown(printed),
            },
            TypeShape::Alias { .. } | TypeShape::Other => self.unknown(printed),
        }
    }
}
