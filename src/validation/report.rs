// Thu Oct 15 2026 - Alex

use indexmap::IndexSet;
use std::fmt;

/// A structural problem found in a finished database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceIssue {
    /// `owner` names `target`, which is not a node.
    Dangling { owner: String, target: String },
    /// A vfptr field whose type is not a pointer to a vtable node.
    VfptrTarget { owner: String, field: String, type_id: String },
    /// An uninstantiated pattern carrying a size or alignment.
    PatternLayout { owner: String },
}

impl ReferenceIssue {
    pub fn owner(&self) -> &str {
        match self {
            ReferenceIssue::Dangling { owner, .. }
            | ReferenceIssue::VfptrTarget { owner, .. }
            | ReferenceIssue::PatternLayout { owner } => owner,
        }
    }
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceIssue::Dangling { owner, target } => write!(f, "{} refers to missing node {}", owner, target),
            ReferenceIssue::VfptrTarget { owner, field, type_id } => {
                write!(f, "{}.{} has type {}, not a vtable pointer", owner, field, type_id)
            }
            ReferenceIssue::PatternLayout { owner } => write!(f, "template pattern {} carries a layout", owner),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceReport {
    pub nodes_checked: usize,
    pub references_checked: usize,
    /// Deduplicated, in discovery order.
    pub issues: IndexSet<ReferenceIssue>,
}

impl ReferenceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: ReferenceIssue) {
        self.issues.insert(issue);
    }

    pub fn dangling(&self) -> impl Iterator<Item = (&str, &str)> {
        self.issues.iter().filter_map(|issue| match issue {
            ReferenceIssue::Dangling { owner, target } => Some((owner.as_str(), target.as_str())),
            _ => None,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn format_report(&self) -> String {
        let mut output = String::new();
        output.push_str("=== Reference Check ===\n");
        output.push_str(&format!(
            "Checked {} references across {} nodes\n",
            self.references_checked, self.nodes_checked
        ));
        if self.issues.is_empty() {
            output.push_str("No issues\n");
            return output;
        }
        output.push_str(&format!("Issues ({}):\n", self.issues.len()));
        for issue in &self.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
        output
    }
}
