//! `tplload init` command - create the catalog database

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::store::TemplateStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Database path to create (defaults to the configured catalog)
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let db_path = args.path.unwrap_or_else(|| super::catalog_path(global));
    let existed = db_path.exists();

    // Opening the store creates the file and schema
    TemplateStore::open(&db_path).map_err(|e| miette::miette!("{}", e))?;

    if existed {
        println!(
            "{} Catalog already initialized at {}",
            style("✓").green(),
            style(db_path.display()).cyan()
        );
    } else {
        println!(
            "{} Created catalog at {}",
            style("✓").green(),
            style(db_path.display()).cyan()
        );
    }

    Ok(())
}
