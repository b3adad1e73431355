use crate::config::AppSettings;
use crate::error::{FcgError, Result};
use crate::history::HistoryRecorder;
use crate::history::JsonHistoryStore;
use crate::model::{HistoryRecord, Student};
use crate::orchestrator;
use crate::ui;

/// Runs the `generate` command for one student.
pub async fn run(
    settings: &AppSettings,
    name: &str,
    traits: &[String],
    style: Option<&str>,
    word_count: Option<u32>,
    note: Option<&str>,
    colored: bool,
) -> Result<()> {
    if traits.is_empty() {
        return Err(FcgError::InvalidInput(
            rust_i18n::t!("generate.no_traits").to_string(),
        ));
    }

    let style = style
        .map(String::from)
        .unwrap_or_else(|| settings.style_label());
    let word_count = word_count.unwrap_or(settings.target_word_count);

    let spinner = ui::Spinner::new(&rust_i18n::t!("generate.spinner", name = name));
    let result = orchestrator::generate(settings, name, traits, &style, word_count, note).await;
    spinner.finish_and_clear();

    match result {
        Ok(comment) => {
            ui::success(&rust_i18n::t!("generate.done", name = name), colored);
            println!();
            println!("{}", comment);

            let mut student = Student::new("?", name);
            student.traits = traits.to_vec();
            student.note = note.map(String::from);
            let record = HistoryRecord::for_student(&student, comment, &style, word_count);
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
