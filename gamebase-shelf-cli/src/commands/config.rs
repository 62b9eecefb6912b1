use gamebase_shelf_lib::settings::{self, AppSettings};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Show the saved settings and where they come from.
pub(crate) fn run_config_show() {
    let path = settings::settings_path();
    let organize = settings::load_settings().organize;

    log::info!(
        "{}",
        "gamebase-shelf settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let flags = [
        ("english_only", organize.english_only),
        ("include_no_text", organize.include_no_text),
        ("collapse_publishers", organize.collapse_publishers),
        ("keep_zipped", organize.keep_zipped),
        ("move_files", organize.move_files),
    ];
    log::info!(
        "  {:<20} {}",
        "template",
        organize.template.if_supports_color(Stdout, |t| t.green()),
    );
    for (name, value) in flags {
        log::info!("  {:<20} {}", name, value);
    }
}

pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Validate and save a default template.
pub(crate) fn run_config_set_template(template: &str) -> Result<(), CliError> {
    let mut current = settings::load_settings();
    current
        .organize
        .set_template(template)
        .map_err(|e| CliError::config(e.to_string()))?;
    settings::save_settings(&current)?;
    log::info!(
        "{} Default template set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        template.if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_config_reset() -> Result<(), CliError> {
    settings::save_settings(&AppSettings::default())?;
    log::info!(
        "{} Settings reset to defaults",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
