use colored::Colorize;

use crate::config::{self, mask_api_key, AppSettings};
use crate::error::{FcgError, Result};
use crate::ui;

pub fn run(action: Option<crate::cli::ConfigAction>, settings: &AppSettings, colored: bool) -> Result<()> {
    // 默认行为：show
    let action = action.unwrap_or(crate::cli::ConfigAction::Show);

    match action {
        crate::cli::ConfigAction::Show => show(settings, colored),
        crate::cli::ConfigAction::Path => path(colored),
    }
}

/// 显示当前生效的配置（金钥遮罩）
fn show(settings: &AppSettings, colored: bool) -> Result<()> {
    let rendered = toml::to_string_pretty(settings)
        .map_err(|e| FcgError::Config(format!("failed to render settings: {}", e)))?;

    if colored {
        println!("{}", rust_i18n::t!("config.effective").cyan().bold());
    } else {
        println!("{}", rust_i18n::t!("config.effective"));
    }
    println!();
    print!("{}", rendered);
    // Keys are skipped by the serializer; show them masked instead.
    println!("api_key = \"{}\"", mask_api_key(&settings.api_key));
    println!("openai_key = \"{}\"", mask_api_key(&settings.openai_key));
    println!();

    if let Some(path) = config::get_config_path() {
        if path.exists() {
            println!(
                "{}",
                ui::info(
                    &rust_i18n::t!("config.loaded_from", path = path.display()),
                    colored
                )
            );
        } else {
            println!("{}", ui::info(&rust_i18n::t!("config.defaults_only"), colored));
        }
    }
    Ok(())
}

/// 显示配置文件路径
fn path(colored: bool) -> Result<()> {
    let path = config::get_config_path().ok_or_else(|| {
        FcgError::Config("Failed to determine config directory".to_string())
    })?;
    println!("{}", path.display());
    if !path.exists() {
        ui::warning(&rust_i18n::t!("config.not_initialized"), colored);
    }
    Ok(())
}
