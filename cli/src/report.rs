use std::path::{Path, PathBuf};

use persistence::files;
use skill_analyzer::report::render_report;

use crate::error::Result;

/// Render the ranked report for `file`, or for the newest processed batch.
pub fn report(data_dir: &Path, file: Option<PathBuf>) -> Result<String> {
    let path = match file {
        Some(path) => path,
        None => files::latest_processed(data_dir)?,
    };
    let jobs = files::read_jobs(&path)?;
    log::info!("loaded {} jobs from {}", jobs.len(), path.display());

    let mut out = format!(
        "Using processed file: {}\nLoaded {} jobs.\n\n",
        path.display(),
        jobs.len()
    );
    out.push_str(&render_report(&jobs));
    Ok(out)
}
