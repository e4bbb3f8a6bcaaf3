use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use vcal2ics_core::ConverterConfig;
use vcal2ics_core::config::expand_path;

pub fn run(config: &ConverterConfig, explicit: Option<&Path>) -> Result<()> {
    let config_path = match explicit {
        Some(path) => expand_path(path),
        None => ConverterConfig::config_path()?,
    };

    let status = if config_path.exists() {
        ""
    } else {
        " (not found, using defaults)"
    };

    println!("{}", "Paths".bold());
    println!("  Config:  {}{}", config_path.display(), status.dimmed());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
