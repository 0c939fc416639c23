//! `tplload load` command - import template records from a delimited file

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::store::TemplateStore;
use crate::ingest::{self, LineOutcome, LoadOptions};

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Pipe-delimited source file (10 fields per line, no header)
    pub file: PathBuf,

    /// Validate rows without writing to the catalog
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: LoadArgs, global: &GlobalOpts) -> Result<()> {
    let db_path = super::catalog_path(global);

    // The store comes up before the source file is touched; an unreachable
    // catalog aborts the run with nothing read and nothing mutated.
    let store = TemplateStore::open(&db_path).map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Loading templates from {} into {}{}",
            style("→").blue(),
            style(args.file.display()).yellow(),
            style(db_path.display()).cyan(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
        println!();
    }

    let options = LoadOptions {
        dry_run: args.dry_run,
    };
    let quiet = global.quiet;

    let stats = ingest::load_file(&store, &args.file, &options, |line_no, outcome| {
        match outcome {
            LineOutcome::Inserted {
                domain, category, ..
            } => {
                if !quiet {
                    println!(
                        "{} Line {}: {} [{}]",
                        style("✓").green(),
                        line_no,
                        domain,
                        style(category).cyan()
                    );
                }
            }
            LineOutcome::Valid { domain, category } => {
                if !quiet {
                    println!(
                        "{} Line {}: would insert {} [{}]",
                        style("○").dim(),
                        line_no,
                        domain,
                        style(category).cyan()
                    );
                }
            }
            LineOutcome::Skipped { reason } => {
                eprintln!(
                    "{} Line {}: skipped: {}",
                    style("✗").red(),
                    line_no,
                    reason
                );
            }
        }
    })
    .map_err(|e| miette::miette!("{}", e))?;

    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Load Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  Rows processed:    {}",
        style(stats.rows_processed).cyan()
    );
    if args.dry_run {
        println!(
            "  Rows valid:        {}",
            style(stats.records_inserted).green()
        );
    } else {
        println!(
            "  Records inserted:  {}",
            style(stats.records_inserted).green()
        );
    }
    if stats.skipped_malformed > 0 {
        println!(
            "  Malformed rows:    {}",
            style(stats.skipped_malformed).red()
        );
    }
    if stats.skipped_category > 0 {
        println!(
            "  Category failures: {}",
            style(stats.skipped_category).red()
        );
    }
    if stats.skipped_insert > 0 {
        println!(
            "  Insert failures:   {}",
            style(stats.skipped_insert).red()
        );
    }

    if args.dry_run {
        println!();
        println!(
            "{}",
            style("Dry run complete. Nothing was written.").yellow()
        );
    }

    Ok(())
}
