use std::fs;

use super::*;
use crate::archive::tests::write_zip;

fn nfo(name: &str, language: &str, published: &str) -> Vec<u8> {
    format!(
        "GAME INFO\n\
         Name: {name}\n\
         Published: {published}\n\
         Genre: Action - Platformer\n\
         Language: {language}\n\
         \n\
         GAME HISTORY\n\
         Nothing to see here.\n"
    )
    .into_bytes()
}

fn zorro_archive(dir: &Path, file: &str) -> PathBuf {
    let path = dir.join(file);
    let info = nfo("Zorro", "English", "1985 Datasoft/US Gold");
    write_zip(
        &path,
        &[
            ("Zorro/VERSION.NFO", info.as_slice()),
            ("Zorro/zorro.d64", b"side one"),
            ("Zorro/Side2.D64", b"side two"),
        ],
    );
    path
}

struct Fixture {
    _tmp: tempfile::TempDir,
    source: PathBuf,
    dest: PathBuf,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("source");
    let dest = tmp.path().join("dest");
    fs::create_dir_all(&source).unwrap();
    Fixture {
        _tmp: tmp,
        source,
        dest,
    }
}

fn run(fx: &Fixture, options: &OrganizeOptions) -> OrganizeSummary {
    organize(&fx.source, &fx.dest, options, &|_| {}).unwrap()
}

fn destinations(summary: &OrganizeSummary) -> Vec<PathBuf> {
    summary
        .details
        .iter()
        .filter_map(|o| match o {
            ArchiveOutcome::Organized { destination, .. } => Some(destination.path.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn copies_game_folder_and_renames_disks() {
    let fx = fixture();
    let archive = zorro_archive(&fx.source, "zorro.zip");

    let summary = run(&fx, &OrganizeOptions::default());
    assert_eq!(summary.found, 1);
    assert_eq!(summary.organized, 1);

    let game = fx.dest.join("Action/Platformer/English/Zorro");
    assert_eq!(destinations(&summary), vec![game.clone()]);
    assert!(game.join("VERSION.NFO").is_file());
    // Side2.D64 sorts before zorro.d64
    assert_eq!(fs::read(game.join("Zorro_d1.d64")).unwrap(), b"side two");
    assert_eq!(fs::read(game.join("Zorro_d2.d64")).unwrap(), b"side one");
    assert!(archive.exists());
}

#[test]
fn same_name_gets_version_suffix() {
    let fx = fixture();
    zorro_archive(&fx.source, "a.zip");
    zorro_archive(&fx.source, "b.zip");

    let summary = run(&fx, &OrganizeOptions::default());
    let root = fx.dest.join("Action/Platformer/English");
    assert_eq!(
        destinations(&summary),
        vec![root.join("Zorro"), root.join("Zorro [v2]")]
    );
    assert!(root.join("Zorro [v2]/Zorro_d1.d64").is_file());
}

#[test]
fn template_without_name_gets_name_appended() {
    let fx = fixture();
    zorro_archive(&fx.source, "zorro.zip");

    let options = OrganizeOptions {
        template: "{published_year}".into(),
        ..Default::default()
    };
    let summary = run(&fx, &options);
    assert_eq!(destinations(&summary), vec![fx.dest.join("1985/Zorro")]);
}

#[test]
fn dry_run_plans_collisions_without_writing() {
    let fx = fixture();
    zorro_archive(&fx.source, "a.zip");
    zorro_archive(&fx.source, "b.zip");

    let options = OrganizeOptions {
        dry_run: true,
        ..Default::default()
    };
    let summary = run(&fx, &options);
    let root = fx.dest.join("Action/Platformer/English");
    assert_eq!(
        destinations(&summary),
        vec![root.join("Zorro"), root.join("Zorro [v2]")]
    );
    assert!(!fx.dest.exists());
}

#[test]
fn keep_zipped_places_archive_under_expanded_path() {
    let fx = fixture();
    let a = zorro_archive(&fx.source, "a.zip");
    zorro_archive(&fx.source, "b.zip");

    let options = OrganizeOptions {
        keep_zipped: true,
        ..Default::default()
    };
    let summary = run(&fx, &options);
    let folder = fx.dest.join("Action/Platformer/English/Zorro");
    assert_eq!(
        destinations(&summary),
        vec![folder.join("Zorro.zip"), folder.join("Zorro [v2].zip")]
    );
    assert_eq!(fs::read(folder.join("Zorro.zip")).unwrap(), fs::read(&a).unwrap());
    assert!(a.exists());
}

#[test]
fn move_removes_source_archives() {
    let fx = fixture();
    let folder_src = zorro_archive(&fx.source, "a.zip");

    let options = OrganizeOptions {
        transfer: Transfer::Move,
        ..Default::default()
    };
    let summary = run(&fx, &options);
    assert_eq!(summary.organized, 1);
    assert!(!folder_src.exists());

    let zipped_src = zorro_archive(&fx.source, "b.zip");
    let options = OrganizeOptions {
        transfer: Transfer::Move,
        keep_zipped: true,
        ..Default::default()
    };
    let summary = run(&fx, &options);
    assert_eq!(summary.organized, 1);
    assert!(!zipped_src.exists());
    assert!(
        fx.dest
            .join("Action/Platformer/English/Zorro/Zorro.zip")
            .is_file()
    );
}

#[test]
fn english_only_filter() {
    let fx = fixture();
    write_zip(
        &fx.source.join("german.zip"),
        &[("VERSION.NFO", nfo("Katakis", "German", "1988 Rainbow Arts").as_slice())],
    );
    write_zip(
        &fx.source.join("silent.zip"),
        &[("VERSION.NFO", nfo("Boulder Dash", "(No Text)", "1984 First Star").as_slice())],
    );
    zorro_archive(&fx.source, "zorro.zip");

    let mut options = OrganizeOptions {
        dry_run: true,
        language: LanguageFilter {
            english_only: true,
            include_no_text: false,
        },
        ..Default::default()
    };
    let summary = run(&fx, &options);
    assert_eq!((summary.organized, summary.skipped), (1, 2));
    assert!(summary.details.iter().any(|o| matches!(
        o,
        ArchiveOutcome::Skipped { reason: SkipReason::Language(lang), .. } if lang == "German"
    )));

    options.language.include_no_text = true;
    let summary = run(&fx, &options);
    assert_eq!((summary.organized, summary.skipped), (2, 1));
}

#[test]
fn collapse_publishers_cuts_at_slash() {
    let fx = fixture();
    zorro_archive(&fx.source, "zorro.zip");

    let mut options = OrganizeOptions {
        template: "{publisher}/{name}".into(),
        dry_run: true,
        ..Default::default()
    };
    assert_eq!(
        destinations(&run(&fx, &options)),
        vec![fx.dest.join("Datasoft-US Gold/Zorro")]
    );

    options.collapse_publishers = true;
    assert_eq!(
        destinations(&run(&fx, &options)),
        vec![fx.dest.join("Datasoft/Zorro")]
    );
}

#[test]
fn bad_archives_are_reported_not_fatal() {
    let fx = fixture();
    write_zip(&fx.source.join("a_no_info.zip"), &[("game.d64", b"disk")]);
    write_zip(
        &fx.source.join("b_no_name.zip"),
        &[("VERSION.NFO", b"GAME INFO\nGenre: Action\n".as_slice())],
    );
    fs::write(fx.source.join("c_corrupt.zip"), b"not a zip").unwrap();
    zorro_archive(&fx.source, "d_zorro.zip");

    let summary = run(&fx, &OrganizeOptions::default());
    assert_eq!(summary.found, 4);
    assert_eq!(summary.organized, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errors().count(), 3);
    assert!(matches!(
        &summary.details[1],
        ArchiveOutcome::Skipped {
            reason: SkipReason::Unparseable(gamebase_shelf_core::ParseError::MissingRequiredField { .. }),
            ..
        }
    ));
}

#[test]
fn limit_caps_archives_processed() {
    let fx = fixture();
    zorro_archive(&fx.source, "a.zip");
    zorro_archive(&fx.source, "b.zip");

    let options = OrganizeOptions {
        limit: Some(1),
        dry_run: true,
        ..Default::default()
    };
    let summary = run(&fx, &options);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.details[0].archive(), fx.source.join("a.zip"));
}

#[test]
fn progress_reports_every_archive() {
    let fx = fixture();
    zorro_archive(&fx.source, "a.zip");
    zorro_archive(&fx.source, "b.zip");

    let events = std::cell::RefCell::new(Vec::new());
    let options = OrganizeOptions {
        dry_run: true,
        ..Default::default()
    };
    organize(&fx.source, &fx.dest, &options, &|p| {
        events.borrow_mut().push(match p {
            OrganizeProgress::Found { total } => format!("found {total}"),
            OrganizeProgress::Processing { index, .. } => format!("processing {index}"),
            OrganizeProgress::Finished(_) => "finished".to_string(),
        });
    })
    .unwrap();
    assert_eq!(
        events.into_inner(),
        vec!["found 2", "processing 0", "finished", "processing 1", "finished"]
    );
}

#[test]
fn bad_template_aborts_before_touching_archives() {
    let fx = fixture();
    let archive = zorro_archive(&fx.source, "zorro.zip");
    let options = OrganizeOptions {
        template: "{genre}/{name}".into(),
        transfer: Transfer::Move,
        ..Default::default()
    };
    let err = organize(&fx.source, &fx.dest, &options, &|_| {}).unwrap_err();
    assert!(matches!(err, OrganizeError::Template(_)));
    assert!(archive.exists());
    assert!(!fx.dest.exists());
}

#[test]
fn scan_lists_games_and_errors() {
    let fx = fixture();
    zorro_archive(&fx.source, "a.zip");
    write_zip(
        &fx.source.join("b.zip"),
        &[("VERSION.NFO", nfo("Katakis", "German", "1988 Rainbow Arts").as_slice())],
    );
    fs::write(fx.source.join("c.zip"), b"junk").unwrap();

    let games = scan_archives(&fx.source, LanguageFilter::default(), None, &|_| {}).unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].metadata.as_ref().unwrap().name, "Zorro");
    assert!(games[2].metadata.is_none());
    assert!(games[2].error.is_some());

    let english = LanguageFilter {
        english_only: true,
        include_no_text: false,
    };
    let games = scan_archives(&fx.source, english, None, &|_| {}).unwrap();
    assert_eq!(games.len(), 2);
}

#[test]
fn skip_reasons_read_like_the_log() {
    assert_eq!(
        SkipReason::NoInfoFile.to_string(),
        "No VERSION.NFO found in archive"
    );
    assert_eq!(
        SkipReason::Language("German".into()).to_string(),
        "Not English (Language: German)"
    );
}

#[test]
fn disks_are_renamed_after_the_sanitized_folder_name() {
    let fx = fixture();
    write_zip(
        &fx.source.join("Zorro_1985.zip"),
        &[
            ("VERSION.NFO", nfo("???", "English", "1985 Datasoft").as_slice()),
            ("a.d64", b"disk"),
        ],
    );
    write_zip(
        &fx.source.join("zorro2.zip"),
        &[
            ("VERSION.NFO", nfo("Zorro/Part 2?", "English", "1986 Datasoft").as_slice()),
            ("a.d64", b"disk"),
        ],
    );

    let summary = run(&fx, &OrganizeOptions::default());
    assert_eq!(summary.organized, 2);
    let root = fx.dest.join("Action/Platformer/English");
    assert!(root.join("Zorro_1985/Zorro_1985_d1.d64").is_file());
    assert!(root.join("Zorro-Part 2/Zorro-Part 2_d1.d64").is_file());
}

#[test]
fn archive_stem_drops_extension() {
    assert_eq!(archive_stem(Path::new("/a/Turrican II.zip")), "Turrican II");
}
