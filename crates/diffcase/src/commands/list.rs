//! Handler for the `diffcase list` command.

use anyhow::Result;

use crate::catalog;

pub(crate) fn handle() -> Result<()> {
    let width = catalog::all().iter().map(|b| b.name.len()).max().unwrap_or(0);
    for bench in catalog::all() {
        println!("{:<width$}  {}", bench.name, bench.summary);
    }
    Ok(())
}
