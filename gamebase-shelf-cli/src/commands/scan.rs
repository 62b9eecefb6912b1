use std::path::{Path, PathBuf};

use gamebase_shelf_core::GameMetadata;
use gamebase_shelf_lib::{LanguageFilter, OrganizeProgress, ScannedGame, scan_archives};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::LanguageArgs;
use crate::error::CliError;

use super::{archive_label, spinner};

const NAME_WIDTH: usize = 32;
const GENRE_WIDTH: usize = 28;
const LANGUAGE_WIDTH: usize = 14;

pub(crate) fn run_scan(
    source: PathBuf,
    json: bool,
    language: LanguageArgs,
    limit: Option<usize>,
    quiet: bool,
) -> Result<(), CliError> {
    let filter = LanguageFilter {
        english_only: language.english_only,
        include_no_text: language.include_no_text,
    };

    let pb = spinner(quiet || json);
    let games = scan_archives(&source, filter, limit, &|p| {
        if let OrganizeProgress::Processing {
            archive,
            index,
            total,
        } = p
        {
            pb.set_message(format!("[{}/{}] Reading {}", index + 1, total, archive_label(archive)));
            pb.tick();
        }
    });
    pb.finish_and_clear();
    let games = games?;

    if json {
        let out = serde_json::to_string_pretty(&games).map_err(|e| CliError::other(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    print_table(&source, &games);
    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('\u{2026}');
        cut
    }
}

fn genre_label(meta: &GameMetadata) -> String {
    if meta.secondary_genre.is_default() {
        meta.primary_genre.clone()
    } else {
        format!("{} - {}", meta.primary_genre, meta.secondary_genre)
    }
}

fn row(meta: &GameMetadata) -> String {
    format!(
        "{:<nw$} {:<gw$} {:<lw$} {:<4} {}",
        truncate(&meta.name, NAME_WIDTH),
        truncate(&genre_label(meta), GENRE_WIDTH),
        truncate(meta.language.value(), LANGUAGE_WIDTH),
        meta.published_year.value(),
        meta.publisher.value(),
        nw = NAME_WIDTH,
        gw = GENRE_WIDTH,
        lw = LANGUAGE_WIDTH,
    )
}

fn print_table(source: &Path, games: &[ScannedGame]) {
    log::info!(
        "Archives in: {}",
        source.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("");
    let header = format!(
        "{:<nw$} {:<gw$} {:<lw$} {:<4} {}",
        "Name",
        "Genre",
        "Language",
        "Year",
        "Publisher",
        nw = NAME_WIDTH,
        gw = GENRE_WIDTH,
        lw = LANGUAGE_WIDTH,
    );
    log::info!("{}", header.if_supports_color(Stdout, |t| t.bold()));

    let mut unreadable = 0usize;
    for game in games {
        match (&game.metadata, &game.error) {
            (Some(meta), _) => log::info!("{}", row(meta)),
            (None, error) => {
                unreadable += 1;
                log::warn!(
                    "\u{26A0} {}: {}",
                    archive_label(&game.archive),
                    error.as_deref().unwrap_or("unreadable"),
                );
            }
        }
    }

    log::info!("");
    log::info!(
        "{} games listed, {} unreadable",
        games.len() - unreadable,
        unreadable,
    );
}
