use gamebase_shelf_core::{DEFAULT_TEMPLATE, TemplateField};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// List every template placeholder.
pub(crate) fn run_fields() {
    log::info!(
        "{}",
        "Template placeholders".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    for field in TemplateField::all() {
        log::info!(
            "  {} {}",
            format!("{:<20}", field.to_string()).if_supports_color(Stdout, |t| t.cyan()),
            field.description(),
        );
    }
    log::info!("");
    log::info!(
        "Default: {}",
        DEFAULT_TEMPLATE.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!(
        "{}",
        "Use '/' between folder levels. Write {{ or }} for a literal brace."
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
}
