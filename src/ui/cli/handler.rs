// Fri Oct 16 2026 - Alex

use super::args::Args;
use crate::builder::{build_type_db, build_type_db_from_roots, find_roots};
use crate::config::Config;
use crate::frontend::{CompileInvocation, SnapshotFrontend};
use crate::output::JsonSerializer;
use crate::typedb::TypeDb;
use crate::utils::logging::{init_logger, level_from_str};
use crate::validation::ReferenceValidator;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        init_logger(level_from_str(&args.log_level));
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.resolve_config(&args)?;
        let db = self.build(&args, &config)?;

        if config.verify_references {
            let report = ReferenceValidator::new(&db).validate();
            if !report.is_valid() {
                anyhow::bail!("{}", report.format_report());
            }
        }

        JsonSerializer::new()
            .with_pretty_print(config.pretty)
            .write_to(&db, config.output_file.as_deref())?;
        Ok(())
    }

    /// File config first, command-line flags on top.
    fn resolve_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if args.compact {
            config.pretty = false;
        }
        if args.no_verify {
            config.verify_references = false;
        }
        if let Some(output) = &args.output {
            config.output_file = Some(output.clone());
        }
        config.roots.extend(args.root.iter().cloned());
        config.validate()?;
        Ok(config)
    }

    fn build(&self, args: &Args, config: &Config) -> anyhow::Result<TypeDb> {
        let invocation = CompileInvocation::with_baseline(&args.source, &config.baseline_args, &args.extra_arg);
        let frontend = SnapshotFrontend::open(&invocation)?;

        let db = if config.roots.is_empty() {
            build_type_db(&frontend)?
        } else {
            let roots = find_roots(&frontend, &config.roots)?;
            build_type_db_from_roots(&frontend, &roots)?
        };
        Ok(db)
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
