pub mod config;
pub mod convert;
pub mod split;

use std::path::Path;

use anyhow::Result;
use vcal2ics_core::{Conversion, ConvertObserver, Converter, ConverterConfig, TracingObserver};

use crate::progress::ProgressReporter;

/// Run the converter over `input`, with a progress bar unless `quiet`.
fn convert_input(config: &ConverterConfig, input: &Path, quiet: bool) -> Result<Conversion> {
    let converter = Converter::from_config(config);

    let mut progress = ProgressReporter::new();
    let mut log = TracingObserver;
    let observer: &mut dyn ConvertObserver = if quiet { &mut log } else { &mut progress };

    Ok(converter.convert_file(input, observer)?)
}
