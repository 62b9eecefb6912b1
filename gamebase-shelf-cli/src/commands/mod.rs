pub(crate) mod config;
pub(crate) mod fields;
pub(crate) mod organize;
pub(crate) mod scan;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner used while archives are processed; hidden in quiet mode.
pub(crate) fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb
}

/// File name of an archive for display.
pub(crate) fn archive_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
