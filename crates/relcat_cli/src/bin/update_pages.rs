//! update_pages - publish one release into the static catalog.

use anyhow::Result;
use clap::Parser;
use relcat_cli::{run_update_pages, UpdatePagesArgs};

fn main() -> Result<()> {
    let args = UpdatePagesArgs::parse();
    let report = run_update_pages(&args)?;
    println!("{}", report.confirmation());
    Ok(())
}
