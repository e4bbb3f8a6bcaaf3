use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_progress_bar(total: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30} {pos}/{len} {wide_msg}")?
            .progress_chars("=> "),
    );
    Ok(bar)
}
