use std::fs;
use std::path::Path;

use crate::batch::BatchScheduler;
use crate::config::AppSettings;
use crate::error::{FcgError, Result};
use crate::history::JsonHistoryStore;
use crate::model::parse_roster;
use crate::ui;

/// Runs the `batch` command: roster file in, comments out.
pub async fn run(
    settings: &AppSettings,
    roster_path: &Path,
    traits: &[String],
    yes: bool,
    output: Option<&Path>,
    colored: bool,
) -> Result<()> {
    let raw = fs::read_to_string(roster_path)?;
    let mut students = parse_roster(&raw);
    if students.is_empty() {
        return Err(FcgError::InvalidInput(
            rust_i18n::t!("batch.empty_roster", path = roster_path.display()).to_string(),
        ));
    }

    // CLI rosters carry no per-student tags, so one shared trait set
    // applies to everyone.
    for student in &mut students {
        student.traits = traits.to_vec();
    }

    if !yes {
        let prompt = rust_i18n::t!("batch.confirm", count = students.len()).to_string();
        let confirmed = inquire::Confirm::new(&prompt).with_default(true).prompt()?;
        if !confirmed {
            return Err(FcgError::UserCancelled);
        }
    }

    let mut store = JsonHistoryStore::open_default()?;
    let pb = ui::batch_progress_bar(students.len() as u64);
    let outcome = BatchScheduler::new()
        .run(settings, &mut students, &mut store, &mut |progress| {
            pb.set_position(progress.current as u64);
        })
        .await;
    pb.finish_and_clear();

    ui::success(
        &rust_i18n::t!(
            "batch.summary",
            generated = outcome.generated,
            failed = outcome.failed,
            skipped = outcome.skipped
        ),
        colored,
    );

    if let Some(path) = output {
        let mut buffer = String::new();
        for student in &students {
            if let Some(comment) = &student.generated_comment {
                buffer.push_str(&format!(
                    "{} {}\n{}\n\n",
                    student.seat_number, student.name, comment
                ));
            }
        }
        fs::write(path, buffer)?;
        ui::success(
            &rust_i18n::t!("batch.written", path = path.display()),
            colored,
        );
    } else {
        for student in &students {
            if let Some(comment) = &student.generated_comment {
                println!();
                println!("── {} {} ──", student.seat_number, student.name);
                println!("{}", comment);
            }
        }
    }

    if outcome.failed > 0 {
        ui::warning(
            &rust_i18n::t!("batch.some_failed", count = outcome.failed),
            colored,
        );
    }

    Ok(())
}
