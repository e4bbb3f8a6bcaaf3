use std::path::Path;

use anyhow::{Context, Result};
use vcal2ics_core::ConverterConfig;
use vcal2ics_core::output::{render_calendar, write_calendar};

use super::convert_input;
use crate::render::Render;

pub fn run(config: &ConverterConfig, input: &Path, output: &Path, quiet: bool) -> Result<()> {
    let conversion = convert_input(config, input, quiet)?;

    if output == Path::new("-") {
        print!("{}", render_calendar(&conversion.events, &config.prodid));
    } else {
        write_calendar(output, &conversion.events, &config.prodid)
            .with_context(|| format!("Failed to write calendar for {}", input.display()))?;
    }

    if !quiet {
        eprintln!("{}", conversion.summary.render());
        if output != Path::new("-") {
            eprintln!("Wrote {}", output.display());
        }
    }

    Ok(())
}
