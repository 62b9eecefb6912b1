use std::path::Path;

use gamebase_shelf_core::PathTemplate;
use gamebase_shelf_lib::settings::{self, OrganizeSettings};
use gamebase_shelf_lib::{
    ArchiveOutcome, LanguageFilter, OrganizeError, OrganizeOptions, OrganizeProgress,
    OrganizeSummary, Transfer, organize,
};
use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::OrganizeArgs;
use crate::error::CliError;
use crate::logging;

use super::{archive_label, spinner};

/// Name of the run log written into the destination.
pub(crate) const RUN_LOG_NAME: &str = "organization_log.txt";

const RULE_WIDTH: usize = 60;

/// Merge command-line flags over the saved settings.
///
/// Flags can only switch options on; an unset flag falls back to the file.
pub(crate) fn build_options(args: &OrganizeArgs, saved: OrganizeSettings) -> OrganizeOptions {
    let move_files = args.move_files || saved.move_files;
    OrganizeOptions {
        template: args.template.clone().unwrap_or(saved.template),
        transfer: if move_files { Transfer::Move } else { Transfer::Copy },
        language: LanguageFilter {
            english_only: args.language.english_only || saved.english_only,
            include_no_text: args.language.include_no_text || saved.include_no_text,
        },
        collapse_publishers: args.collapse_publishers || saved.collapse_publishers,
        keep_zipped: args.keep_zipped || saved.keep_zipped,
        dry_run: args.dry_run,
        limit: args.limit,
    }
}

pub(crate) fn run_organize(args: OrganizeArgs, quiet: bool) -> Result<(), CliError> {
    let options = build_options(&args, settings::load_settings().organize);
    let source = args.source.as_path();
    let dest = args.destination.as_path();

    // Fail on a bad template or source before the destination gets a log file.
    PathTemplate::parse(&options.template).map_err(OrganizeError::from)?;
    if !source.is_dir() {
        return Err(OrganizeError::SourceMissing(source.to_path_buf()).into());
    }

    let run_log = dest.join(RUN_LOG_NAME);
    let wrote_run_log = if args.no_log || options.dry_run {
        false
    } else {
        logging::attach_logfile(&run_log)?
    };

    print_header(source, dest, &options);

    let pb = spinner(quiet);
    let summary = organize(source, dest, &options, &|p| match p {
        OrganizeProgress::Found { total } => {
            pb.set_message(format!("Found {total} archives"));
            pb.tick();
        }
        OrganizeProgress::Processing {
            archive,
            index,
            total,
        } => {
            pb.set_message(format!("[{}/{}] {}", index + 1, total, archive_label(archive)));
            pb.tick();
        }
        OrganizeProgress::Finished(outcome) => {
            pb.suspend(|| print_outcome(outcome, dest, &options));
        }
    });
    pb.finish_and_clear();
    let summary = summary?;

    print_summary(&summary, &options);
    if wrote_run_log {
        log::info!(
            "Log file saved to: {}",
            run_log.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}

fn print_header(source: &Path, dest: &Path, options: &OrganizeOptions) {
    log::info!(
        "Scanning: {}",
        source.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "Destination: {}",
        dest.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "Template: {}",
        options.template.if_supports_color(Stdout, |t| t.green()),
    );

    let mut notes = Vec::new();
    if options.dry_run {
        notes.push("Dry run: nothing will be copied, moved or renamed".to_string());
    }
    if options.transfer == Transfer::Move {
        notes.push("Move mode: source archives are removed".to_string());
    }
    if options.keep_zipped {
        notes.push("Keeping archives zipped".to_string());
    }
    if options.language.english_only {
        let extra = if options.language.include_no_text {
            " (plus games without text)"
        } else {
            ""
        };
        notes.push(format!("English only{extra}"));
    }
    if options.collapse_publishers {
        notes.push("Collapsing publisher names".to_string());
    }
    if let Some(n) = options.limit {
        notes.push(format!("Limit: {n} archives"));
    }
    for note in notes {
        log::info!("{}", note.if_supports_color(Stdout, |t| t.dimmed()));
    }
    log::info!("{}", "-".repeat(RULE_WIDTH));
}

fn print_outcome(outcome: &ArchiveOutcome, dest: &Path, options: &OrganizeOptions) {
    let label = archive_label(outcome.archive());
    match outcome {
        ArchiveOutcome::Organized { destination, .. } => {
            let verb = if options.dry_run {
                "PLANNED"
            } else if options.keep_zipped {
                options.transfer.verb()
            } else {
                "EXTRACTED"
            };
            let shown = pathdiff::diff_paths(&destination.path, dest)
                .unwrap_or_else(|| destination.path.clone());
            log::info!(
                "{} {}: {}",
                "\u{2713}".if_supports_color(Stdout, |t| t.green()),
                verb,
                label,
            );
            log::info!(
                "  \u{2192} {}",
                shown.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        ArchiveOutcome::Skipped { reason, .. } => {
            log::warn!("\u{26A0} SKIP: {} - {}", label, reason);
        }
        ArchiveOutcome::Failed { error, .. } => {
            log::warn!("\u{2717} ERROR: {} - {}", label, error);
        }
    }
}

fn print_summary(summary: &OrganizeSummary, options: &OrganizeOptions) {
    let level = if summary.failed > 0 {
        Level::Warn
    } else {
        Level::Info
    };
    let organized = if options.dry_run {
        "Games planned"
    } else {
        "Games organized"
    };

    log::info!("{}", "-".repeat(RULE_WIDTH));
    log::log!(level, "{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Archives found:  {}", summary.found);
    log::info!("  {organized}: {}", summary.organized);
    log::info!("  Skipped:         {}", summary.skipped);
    log::log!(level, "  Failed:          {}", summary.failed);

    let details = detail_lines(summary);
    if !details.is_empty() {
        log::info!("");
        log::info!("Details:");
        for line in details {
            log::info!("  {line}");
        }
    }
}

/// One line per skipped or failed archive, in processing order.
fn detail_lines(summary: &OrganizeSummary) -> Vec<String> {
    summary
        .errors()
        .filter_map(|outcome| {
            let label = archive_label(outcome.archive());
            match outcome {
                ArchiveOutcome::Skipped { reason, .. } => Some(format!("{label}: {reason}")),
                ArchiveOutcome::Failed { error, .. } => Some(format!("{label}: {error}")),
                ArchiveOutcome::Organized { .. } => None,
            }
        })
        .collect()
}
