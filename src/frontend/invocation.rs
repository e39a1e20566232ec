// Mon Oct 12 2026 - Alex

use std::path::{Path, PathBuf};

/// Compile flags prepended to every invocation before user extras.
pub const BASELINE_ARGS: &[&str] = &["-std=c++17", "--target=x86_64-pc-windows-msvc", "-O0", "-g"];

/// A single-unit frontend invocation: one source path plus the full argument
/// list forwarded to the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    source: PathBuf,
    args: Vec<String>,
}

impl CompileInvocation {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            args: Vec::new(),
        }
    }

    /// Baseline flags followed by `extra`, in order.
    pub fn with_baseline(source: impl Into<PathBuf>, baseline: &[String], extra: &[String]) -> Self {
        let mut invocation = Self::new(source);
        invocation.args.extend(baseline.iter().cloned());
        invocation.args.extend(extra.iter().cloned());
        invocation
    }

    pub fn with_arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Effective target triple: the last `--target=<t>`, `--target <t>` or
    /// `-target <t>` wins.
    pub fn target_triple(&self) -> Option<&str> {
        let mut triple = None;
        let mut iter = self.args.iter();
        while let Some(arg) = iter.next() {
            if let Some(value) = arg.strip_prefix("--target=") {
                triple = Some(value);
            } else if arg == "-target" || arg == "--target" {
                if let Some(value) = iter.next() {
                    triple = Some(value.as_str());
                }
            }
        }
        triple
    }
}

pub fn baseline_args() -> Vec<String> {
    BASELINE_ARGS.iter().map(|s| s.to_string()).collect()
}
