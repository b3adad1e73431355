use crate::config::{AppSettings, Provider};
use crate::error::Result;
use crate::orchestrator;
use crate::ui;

/// Runs the `validate-key` command.
///
/// Tests the candidate against a throwaway settings overlay; nothing is
/// persisted whichever way the probe goes.
pub async fn run(
    settings: &AppSettings,
    key: &str,
    provider: Option<Provider>,
    model: Option<&str>,
    colored: bool,
) -> Result<()> {
    let provider = provider.unwrap_or(settings.provider);

    let spinner = ui::Spinner::new(&rust_i18n::t!("validate.spinner", provider = provider));
    let result = orchestrator::validate_key(settings, key, provider, model).await;
    spinner.finish_and_clear();

    match result {
        Ok(true) => {
            ui::success(&rust_i18n::t!("validate.ok", provider = provider), colored);
            Ok(())
        }
        Ok(false) => {
            ui::warning(&rust_i18n::t!("validate.empty_response"), colored);
            Ok(())
        }
        Err(err) => {
            ui::error(&err.message, colored);
            if let Some(hint) = err.suggestion() {
                println!("{}", ui::info(&hint, colored));
            }
            tracing::debug!("validation failure detail: {}", err.detail);
            Err(err.into())
        }
    }
}
