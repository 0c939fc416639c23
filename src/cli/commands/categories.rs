//! `tplload categories` command - list categories with usage counts

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::GlobalOpts;
use crate::core::store::TemplateStore;

#[derive(clap::Args, Debug)]
pub struct CategoriesArgs {
    /// Only show categories with no templates
    #[arg(long)]
    pub empty: bool,
}

pub fn run(args: CategoriesArgs, global: &GlobalOpts) -> Result<()> {
    let db_path = super::catalog_path(global);
    let store = TemplateStore::open(&db_path).map_err(|e| miette::miette!("{}", e))?;

    let mut summaries = store
        .category_summaries()
        .map_err(|e| miette::miette!("{}", e))?;
    if args.empty {
        summaries.retain(|c| c.template_count == 0);
    }

    if summaries.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record(["ID", "Category", "Templates"]);
    for cat in &summaries {
        table.push_record([
            cat.id.to_string(),
            cat.name.clone(),
            cat.template_count.to_string(),
        ]);
    }
    println!("{}", table.build().with(Style::markdown()));

    println!();
    println!("{} {} category(s)", style("✓").green(), summaries.len());

    Ok(())
}
