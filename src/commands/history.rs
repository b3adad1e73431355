use colored::Colorize;

use crate::error::Result;
use crate::history::JsonHistoryStore;
use crate::ui;

/// Lists the most recent history records.
pub fn list(limit: usize, colored: bool) -> Result<()> {
    let store = JsonHistoryStore::open_default()?;
    let records = store.records();

    if records.is_empty() {
        println!("{}", ui::info(&rust_i18n::t!("history.empty"), colored));
        return Ok(());
    }

    for record in records.iter().take(limit) {
        let time = record.generated_at.format("%Y-%m-%d %H:%M");
        if colored {
            println!(
                "{} {} {} {}",
                record.id.bright_black(),
                time.to_string().bright_black(),
                record.student_name.cyan().bold(),
                format!("[{}]", record.style).yellow()
            );
        } else {
            println!(
                "{} {} {} [{}]",
                record.id, time, record.student_name, record.style
            );
        }
        println!("  {}", record.comment);
        println!();
    }

    if records.len() > limit {
        println!(
            "{}",
            ui::info(
                &rust_i18n::t!("history.more", count = records.len() - limit),
                colored
            )
        );
    }
    Ok(())
}

/// Deletes a single record by id.
pub fn delete(id: &str, colored: bool) -> Result<()> {
    let mut store = JsonHistoryStore::open_default()?;
    if store.delete(id)? {
        ui::success(&rust_i18n::t!("history.deleted", id = id), colored);
    } else {
        ui::warning(&rust_i18n::t!("history.not_found", id = id), colored);
    }
    Ok(())
}

/// Clears the whole history, with a confirmation gate unless `--yes`.
pub fn clear(yes: bool, colored: bool) -> Result<()> {
    let mut store = JsonHistoryStore::open_default()?;
    if store.records().is_empty() {
        println!("{}", ui::info(&rust_i18n::t!("history.empty"), colored));
        return Ok(());
    }

    if !yes {
        let confirmed = inquire::Confirm::new(&rust_i18n::t!(
            "history.confirm_clear",
            count = store.records().len()
        ))
        .with_default(false)
        .prompt()?;
        if !confirmed {
            return Err(crate::error::FcgError::UserCancelled);
        }
    }

    store.clear()?;
    ui::success(&rust_i18n::t!("history.cleared"), colored);
    Ok(())
}
