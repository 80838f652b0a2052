use std::path::PathBuf;

use anyhow::{Context, Result};
use beast_cli::config::BeastConfig;
use beast_cli::summary::{RunSummary, code_table, print_run_summary};
use beast_codes::CodeExpander;
use beast_core::run_pipeline;
use beast_output::{SourceFile, write_outputs};
use tracing::{info, info_span};

use crate::cli::{CodesArgs, ExpandArgs, RunArgs};

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = BeastConfig::load(args.config.as_deref())?;
    config.apply(&args.overrides());
    let _run = info_span!("run", dry_run = args.dry_run).entered();

    let pipeline = config.pipeline();
    let outcome = run_pipeline(&pipeline).context("pipeline failed")?;

    let written = if args.dry_run {
        info!("dry run, skipping output");
        None
    } else {
        let sources: Vec<SourceFile> = outcome.sources.paths().map(SourceFile::from).collect();
        let written = write_outputs(&outcome.collections, &sources, &config.output)
            .with_context(|| {
                format!(
                    "failed to write outputs to {}",
                    config.output.output_dir.display()
                )
            })?;
        Some(written)
    };

    print_run_summary(&RunSummary {
        collections: &outcome.collections,
        quality: &outcome.quality,
        written: written.as_ref(),
        output_dir: &config.output.output_dir,
    });
    Ok(())
}

/// `--codes-dir`, else the directory of the default configuration.
fn codes_dir(explicit: Option<&PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.clone()),
        None => Ok(BeastConfig::load(None)?.sources.codes_dir()),
    }
}

pub fn codes(args: &CodesArgs) -> Result<()> {
    let dir = codes_dir(args.codes_dir.as_ref())?;
    let table = CodeExpander::from_dir(&dir)
        .table(args.field)
        .with_context(|| format!("failed to load code table '{}'", args.field))?;
    println!("{}", code_table(&table));
    Ok(())
}

pub fn expand(args: &ExpandArgs) -> Result<()> {
    let dir = codes_dir(args.codes_dir.as_ref())?;
    let codes = CodeExpander::from_dir(&dir);
    codes
        .warm(&[args.field])
        .with_context(|| format!("failed to load code table '{}'", args.field))?;
    println!("{}", codes.expand(args.field, &args.code));
    Ok(())
}
