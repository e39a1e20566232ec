// Fri Oct 16 2026 - Alex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dump-layouts")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Dumps the type and layout database of one translation unit as JSON", long_about = None)]
pub struct Args {
    /// Unit to analyze.
    pub source: PathBuf,

    /// Extra argument forwarded to the frontend after the baseline flags.
    #[arg(long = "extra-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub extra_arg: Vec<String>,

    /// Only dump the closure of this record (repeatable).
    #[arg(long, value_name = "NAME")]
    pub root: Vec<String>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub compact: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the dangling-reference check.
    #[arg(long)]
    pub no_verify: bool,

    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if self.source.as_os_str().is_empty() {
            return Err("Source path must not be empty".to_string());
        }
        if let Some(output) = &self.output {
            if output == &self.source {
                return Err("Output would overwrite the source".to_string());
            }
        }
        Ok(())
    }
}
