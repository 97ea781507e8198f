//! make_cover - draw the deterministic cover for one release date.

use anyhow::Result;
use clap::Parser;
use relcat_cli::{run_make_cover, MakeCoverArgs};

fn main() -> Result<()> {
    let args = MakeCoverArgs::parse();
    let path = run_make_cover(&args)?;
    println!("{}", path.display());
    Ok(())
}
