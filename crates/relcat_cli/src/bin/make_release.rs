//! make_release - write the demo page and readme for one release.

use anyhow::Result;
use clap::Parser;
use relcat_cli::{run_make_release, MakeReleaseArgs};

fn main() -> Result<()> {
    let args = MakeReleaseArgs::parse();
    let artifacts = run_make_release(&args)?;
    println!("{}", serde_json::to_string_pretty(&artifacts)?);
    Ok(())
}
