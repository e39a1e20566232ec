// Wed Oct 14 2026 - Alex

use crate::builder::enums::extract_enum;
use crate::builder::{BuildError, RecordExpander, TypeInterner};
use crate::frontend::{DeclId, Declaration, EnumInfo, Frontend};
use crate::typedb::{Node, TypeDb};
use crate::utils::logging::scoped_timer;
use ahash::AHashSet;
use std::fmt;

/// Where a declaration is in its single pass through the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclState {
    Unseen,
    Queued,
    Emitted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records_expanded: usize,
    pub enums_extracted: usize,
    pub vtables_synthesized: usize,
    pub degraded_fields: usize,
    /// Declarations dropped because an earlier one rendered to the same name.
    pub collisions: usize,
    pub nodes: usize,
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes: {} records, {} enums, {} vtables, {} degraded fields, {} collisions",
            self.nodes,
            self.records_expanded,
            self.enums_extracted,
            self.vtables_synthesized,
            self.degraded_fields,
            self.collisions
        )
    }
}

/// Drives one traversal of a unit into a [`TypeDb`].
pub struct TypeDbBuilder<'f> {
    frontend: &'f dyn Frontend,
    interner: TypeInterner<'f>,
    expanded: AHashSet<DeclId>,
    extracted_enums: AHashSet<DeclId>,
    stats: BuildStats,
}

impl<'f> TypeDbBuilder<'f> {
    pub fn new(frontend: &'f dyn Frontend) -> Result<Self, BuildError> {
        let errors = frontend.error_count();
        if errors > 0 {
            return Err(BuildError::UnusableUnit(errors));
        }
        Ok(Self {
            frontend,
            interner: TypeInterner::new(frontend),
            expanded: AHashSet::new(),
            extracted_enums: AHashSet::new(),
            stats: BuildStats::default(),
        })
    }

    pub fn state(&self, decl: DeclId) -> DeclState {
        if self.expanded.contains(&decl) || self.extracted_enums.contains(&decl) {
            DeclState::Emitted
        } else if self.interner.worklist().is_seen(decl) || self.interner.referenced_enums().contains(&decl) {
            DeclState::Queued
        } else {
            DeclState::Unseen
        }
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Visits every declaration of the unit once, then drains to fixpoint.
    pub fn visit_unit(&mut self) {
        for decl in self.frontend.declarations() {
            match self.frontend.declaration(decl) {
                Some(Declaration::Record(info)) if info.complete => self.ensure_record_emitted(decl),
                Some(Declaration::Enum(info)) if info.complete => self.emit_enum(&info),
                _ => {}
            }
        }
        self.emit_referenced_enums();
    }

    /// Seeds the given records and drains; enums reached along the way are
    /// extracted afterwards.
    pub fn visit_roots(&mut self, roots: &[DeclId]) {
        for &root in roots {
            self.ensure_record_emitted(root);
        }
        self.emit_referenced_enums();
    }

    pub fn ensure_record_emitted(&mut self, root: DeclId) {
        if self.interner.queue_record(root) {
            self.drain();
        }
    }

    fn drain(&mut self) {
        let fe = self.frontend;
        let mut synthetic = Vec::new();
        while let Some(decl) = self.interner.worklist_mut().pop() {
            let info = match fe.record(decl) {
                Some(info) if info.complete => info,
                _ => continue,
            };
            let expanded = RecordExpander::new(&mut self.interner).expand(&info);
            self.expanded.insert(decl);
            self.stats.records_expanded += 1;
            self.stats.degraded_fields += expanded.object().fields.iter().filter(|f| !f.layout_known).count();

            let (node, tables) = expanded.into_nodes();
            self.emit(node);
            synthetic.extend(tables);
        }
        for table in synthetic {
            if self.emit(table) {
                self.stats.vtables_synthesized += 1;
            }
        }
    }

    fn emit_enum(&mut self, info: &EnumInfo) {
        if !self.extracted_enums.insert(info.id) {
            return;
        }
        let node = extract_enum(self.frontend, info);
        if self.emit(node) {
            self.stats.enums_extracted += 1;
        }
    }

    fn emit_referenced_enums(&mut self) {
        let pending: Vec<DeclId> = self.interner.referenced_enums().iter().copied().collect();
        for decl in pending {
            if let Some(info) = self.frontend.enumeration(decl) {
                self.emit_enum(&info);
            }
        }
    }

    fn emit(&mut self, node: Node) -> bool {
        let name = node.name.clone();
        if self.interner.arena_mut().push(node) {
            true
        } else {
            log::warn!("Name collision on {}; keeping the first definition", name);
            self.stats.collisions += 1;
            false
        }
    }

    pub fn finish(mut self) -> (TypeDb, BuildStats) {
        let mut db = TypeDb::for_target(self.frontend.target());
        db.nodes = self.interner.into_arena().into_nodes();
        db.build_indices();
        self.stats.nodes = db.len();
        log::info!("Built type database: {}", self.stats);
        (db, self.stats)
    }
}

/// Builds the database for every declaration of the unit.
pub fn build_type_db(frontend: &dyn Frontend) -> Result<TypeDb, BuildError> {
    let _timer = scoped_timer("build_type_db");
    let mut builder = TypeDbBuilder::new(frontend)?;
    builder.visit_unit();
    Ok(builder.finish().0)
}

/// Builds the database for the closure of the given records.
pub fn build_type_db_from_roots(frontend: &dyn Frontend, roots: &[DeclId]) -> Result<TypeDb, BuildError> {
    let _timer = scoped_timer("build_type_db_from_roots");
    let mut builder = TypeDbBuilder::new(frontend)?;
    builder.visit_roots(roots);
    Ok(builder.finish().0)
}

/// Looks up complete records by qualified or rendered name.
pub fn find_roots(frontend: &dyn Frontend, names: &[String]) -> Result<Vec<DeclId>, BuildError> {
    let records: Vec<_> = frontend
        .declarations()
        .into_iter()
        .filter_map(|decl| frontend.record(decl))
        .filter(|info| info.complete)
        .collect();

    let mut roots = Vec::new();
    for name in names {
        let before = roots.len();
        roots.extend(
            records
                .iter()
                .filter(|info| &info.qualified_name == name || &info.display_name() == name)
                .map(|info| info.id),
        );
        if roots.len() == before {
            return Err(BuildError::UnknownRoot(name.clone()));
        }
    }
    Ok(roots)
}
