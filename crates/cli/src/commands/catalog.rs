//! The fixed portal catalogs the submission form offers.

use anyhow::Result;
use clap::Subcommand;

use scholarbase_core::Tag;

use crate::commands::friendly;
use crate::context::Portal;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Every tag a project can carry
    Tags,
    /// Departments with registered accounts
    Departments,
    /// Academic years with submissions
    Years,
}

pub async fn run(portal: &Portal, command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::Tags => {
            let tags = portal.api.tags().await.map_err(friendly)?;
            print_list(tags.iter().map(Tag::as_str));
        }
        CatalogCommand::Departments => {
            let departments = portal.api.departments().await.map_err(friendly)?;
            print_list(departments.iter().map(String::as_str));
        }
        CatalogCommand::Years => {
            let years = portal.api.years().await.map_err(friendly)?;
            print_list(years.iter().map(String::as_str));
        }
    }
    Ok(())
}

fn print_list<'a>(items: impl Iterator<Item = &'a str>) {
    let mut any = false;
    for item in items {
        println!("- {item}");
        any = true;
    }
    if !any {
        println!("(empty)");
    }
}
