use std::fs;
use std::path::Path;

use crate::config::AppSettings;
use crate::error::{FcgError, Result};
use crate::history::{HistoryRecorder, JsonHistoryStore};
use crate::model::{HistoryRecord, Student};
use crate::orchestrator;
use crate::ui;

/// Runs the `rewrite` command.
pub async fn run(
    settings: &AppSettings,
    comment: Option<&str>,
    file: Option<&Path>,
    instruction: &str,
    colored: bool,
) -> Result<()> {
    let original = match (comment, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(FcgError::InvalidInput(
                rust_i18n::t!("rewrite.missing_comment").to_string(),
            ));
        }
    };

    if original.trim().is_empty() {
        return Err(FcgError::InvalidInput(
            rust_i18n::t!("rewrite.empty_comment").to_string(),
        ));
    }
    if instruction.trim().is_empty() {
        return Err(FcgError::InvalidInput(
            rust_i18n::t!("rewrite.empty_instruction").to_string(),
        ));
    }

    let spinner = ui::Spinner::new(&rust_i18n::t!("rewrite.spinner"));
    let result = orchestrator::rewrite(settings, &original, instruction).await;
    spinner.finish_and_clear();

    match result {
        Ok(rewritten) => {
            ui::success(&rust_i18n::t!("rewrite.done"), colored);
            println!();
            println!("{}", rewritten);

            // Rewrites of free text carry no roster identity; record them
            // under a placeholder name with the instruction as the note.
            let mut student = Student::new("?", "（改寫）");
            student.note = Some(instruction.to_string());
            let record = HistoryRecord::for_student(
                &student,
                rewritten,
                &settings.style_label(),
                settings.target_word_count,
            );
            if let Err(e) = JsonHistoryStore::open_default().and_then(|mut s| s.record(record)) {
                tracing::warn!("failed to persist history record: {}", e);
            }
            Ok(())
        }
        Err(err) => {
            ui::error(&err.message, colored);
            if let Some(hint) = err.suggestion() {
                println!("{}", ui::info(&hint, colored));
            }
            tracing::debug!("provider failure detail: {}", err.detail);
            Err(err.into())
        }
    }
}
