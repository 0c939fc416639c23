//! `tplload stats` command - catalog metrics

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::store::TemplateStore;

#[derive(clap::Args, Debug)]
pub struct StatsArgs {}

pub fn run(_args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let db_path = super::catalog_path(global);
    let store = TemplateStore::open(&db_path).map_err(|e| miette::miette!("{}", e))?;

    let metrics = store.metrics().map_err(|e| miette::miette!("{}", e))?;

    println!("{}", style("Template Catalog").bold());
    println!("  Database:     {}", style(db_path.display()).cyan());
    println!("  Templates:    {}", metrics.total_templates);
    println!("  Alive:        {}", metrics.alive);
    println!("  High value:   {}", metrics.high_value);
    println!("  2FA required: {}", metrics.twofa_required);
    println!("  Categories:   {}", metrics.total_categories);

    Ok(())
}
