// Thu Oct 15 2026 - Alex

use crate::typedb::{NodeKind, TypeDb};
use crate::validation::{ReferenceIssue, ReferenceReport};

/// Checks that every name a node mentions resolves inside the same database,
/// and that the structural invariants of records hold.
pub struct ReferenceValidator<'a> {
    db: &'a TypeDb,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(db: &'a TypeDb) -> Self {
        Self { db }
    }

    pub fn validate(&self) -> ReferenceReport {
        let mut report = ReferenceReport::new();
        for node in self.db.iter() {
            report.nodes_checked += 1;
            for target in node.kind.references() {
                report.references_checked += 1;
                if !self.db.contains(target) {
                    report.add_issue(ReferenceIssue::Dangling {
                        owner: node.name.clone(),
                        target: target.to_string(),
                    });
                }
            }

            if let NodeKind::Object(obj) = &node.kind {
                if obj.template_primary && (obj.size_bytes != 0 || obj.align_bytes != 0 || !obj.layout_dependent) {
                    report.add_issue(ReferenceIssue::PatternLayout {
                        owner: node.name.clone(),
                    });
                }
                for field in obj.fields.iter().filter(|f| f.is_vfptr()) {
                    if !self.is_vtable_pointer(&field.type_id) {
                        report.add_issue(ReferenceIssue::VfptrTarget {
                            owner: node.name.clone(),
                            field: field.name.clone(),
                            type_id: field.type_id.clone(),
                        });
                    }
                }
            }
        }

        for issue in &report.issues {
            log::warn!("{}", issue);
        }
        log::debug!(
            "Checked {} references across {} nodes",
            report.references_checked,
            report.nodes_checked
        );
        report
    }

    fn is_vtable_pointer(&self, type_id: &str) -> bool {
        match self.db.get(type_id).map(|n| &n.kind) {
            Some(NodeKind::Pointer { pointee }) => {
                matches!(self.db.get(pointee).map(|n| &n.kind), Some(NodeKind::VfTable(_)))
            }
            _ => false,
        }
    }
}
