use std::path::Path;

use anyhow::{Context, Result};
use vcal2ics_core::ConverterConfig;
use vcal2ics_core::output::write_split;

use super::convert_input;
use crate::render::Render;

pub fn run(config: &ConverterConfig, input: &Path, dir: &Path, quiet: bool) -> Result<()> {
    let conversion = convert_input(config, input, quiet)?;

    let written = write_split(dir, &conversion.events, &config.prodid, &config.split_prefix)
        .with_context(|| format!("Failed to write event files to {}", dir.display()))?;

    if !quiet {
        eprintln!("{}", conversion.summary.render());
        eprintln!("Wrote {} files to {}", written.len(), dir.display());
    }

    Ok(())
}
