#[macro_use]
extern crate rust_i18n;

// Re-export all library modules
use fcg_rs::*;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use cli::{Cli, Commands, HistoryAction};
use tokio::runtime::Runtime;

// Initialize i18n for binary crate
// This ensures translations are available in main.rs context
i18n!("locales", fallback = "en");

fn main() -> Result<()> {
    human_panic::setup_panic!();

    // 在解析 CLI 之前初始化语言（支持多语言 help text）
    init_locale_early();

    // 解析 CLI 参数并注入国际化 help text
    let cli = parse_cli_localized()?;

    // 根据 verbose 标志设置日志级别
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 初始化 tracing 日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // rustls 使用 no-provider 特性，进程级 provider 必须在首个请求前安装
    llm::provider::install_crypto_provider();

    let colored = !cli.no_color;

    // 判断是否需要加载配置
    // init/config/history 命令不需要完整配置，可以在配置损坏时运行
    let needs_config = matches!(
        &cli.command,
        Commands::Generate { .. } | Commands::Rewrite { .. } | Commands::Batch { .. }
    );

    let settings = if needs_config {
        config::load_settings()?
    } else {
        config::load_settings().unwrap_or_default()
    };

    // 创建 tokio 运行时
    let rt = Runtime::new()?;

    // 根据子命令路由
    rt.block_on(async {
        let outcome = match cli.command {
            Commands::Generate {
                ref name,
                ref traits,
                ref style,
                word_count,
                ref note,
            } => {
                commands::generate::run(
                    &settings,
                    name,
                    traits,
                    style.as_deref(),
                    word_count,
                    note.as_deref(),
                    colored,
                )
                .await
            }
            Commands::Rewrite {
                ref comment,
                ref file,
                ref instruction,
            } => {
                commands::rewrite::run(
                    &settings,
                    comment.as_deref(),
                    file.as_deref(),
                    instruction,
                    colored,
                )
                .await
            }
            Commands::Batch {
                ref roster,
                ref traits,
                yes,
                ref output,
            } => {
                commands::batch::run(&settings, roster, traits, yes, output.as_deref(), colored)
                    .await
            }
            Commands::ValidateKey {
                ref key,
                provider,
                ref model,
            } => {
                commands::validate::run(&settings, key, provider, model.as_deref(), colored).await
            }
            Commands::History { action } => match action.unwrap_or(HistoryAction::List {
                limit: 20,
            }) {
                HistoryAction::List { limit } => commands::history::list(limit, colored),
                HistoryAction::Delete { ref id } => commands::history::delete(id, colored),
                HistoryAction::Clear { yes } => commands::history::clear(yes, colored),
            },
            Commands::Init { force } => commands::init::run(force, colored),
            Commands::Config { action } => commands::config::run(action, &settings, colored),
        };

        if let Err(e) = outcome {
            match e {
                error::FcgError::UserCancelled => {
                    // 用户取消不算错误，正常退出
                    std::process::exit(0);
                }
                error::FcgError::Generation(_) => {
                    // 生成错误已由命令输出过了，直接退出
                    std::process::exit(1);
                }
                _ => {
                    ui::error(&e.to_string(), colored);
                    std::process::exit(1);
                }
            }
        }
        Ok(())
    })
}

/// Parse CLI arguments with localized help text
///
/// Uses clap's derive + runtime override pattern:
/// 1. Get Command from derive macro (type-safe parsing)
/// 2. Override help text at runtime with rust_i18n::t!()
/// 3. Parse and reconstruct the Cli struct
fn parse_cli_localized() -> Result<Cli> {
    let cmd = Cli::command()
        .about(rust_i18n::t!("cli.about").to_string())
        .mut_arg("verbose", |arg| {
            arg.help(rust_i18n::t!("cli.verbose").to_string())
        })
        .mut_subcommand("generate", |cmd| {
            cmd.about(rust_i18n::t!("cli.generate").to_string())
                .mut_arg("name", |arg| {
                    arg.help(rust_i18n::t!("cli.generate.name").to_string())
                })
                .mut_arg("traits", |arg| {
                    arg.help(rust_i18n::t!("cli.generate.traits").to_string())
                })
                .mut_arg("style", |arg| {
                    arg.help(rust_i18n::t!("cli.generate.style").to_string())
                })
                .mut_arg("word_count", |arg| {
                    arg.help(rust_i18n::t!("cli.generate.word_count").to_string())
                })
                .mut_arg("note", |arg| {
                    arg.help(rust_i18n::t!("cli.generate.note").to_string())
                })
        })
        .mut_subcommand("rewrite", |cmd| {
            cmd.about(rust_i18n::t!("cli.rewrite").to_string())
                .mut_arg("comment", |arg| {
                    arg.help(rust_i18n::t!("cli.rewrite.comment").to_string())
                })
                .mut_arg("file", |arg| {
                    arg.help(rust_i18n::t!("cli.rewrite.file").to_string())
                })
                .mut_arg("instruction", |arg| {
                    arg.help(rust_i18n::t!("cli.rewrite.instruction").to_string())
                })
        })
        .mut_subcommand("batch", |cmd| {
            cmd.about(rust_i18n::t!("cli.batch").to_string())
                .mut_arg("roster", |arg| {
                    arg.help(rust_i18n::t!("cli.batch.roster").to_string())
                })
                .mut_arg("traits", |arg| {
                    arg.help(rust_i18n::t!("cli.batch.traits").to_string())
                })
                .mut_arg("yes", |arg| {
                    arg.help(rust_i18n::t!("cli.batch.yes").to_string())
                })
                .mut_arg("output", |arg| {
                    arg.help(rust_i18n::t!("cli.batch.output").to_string())
                })
        })
        .mut_subcommand("validate-key", |cmd| {
            cmd.about(rust_i18n::t!("cli.validate_key").to_string())
                .mut_arg("key", |arg| {
                    arg.help(rust_i18n::t!("cli.validate_key.key").to_string())
                })
                .mut_arg("provider", |arg| {
                    arg.help(rust_i18n::t!("cli.validate_key.provider").to_string())
                })
                .mut_arg("model", |arg| {
                    arg.help(rust_i18n::t!("cli.validate_key.model").to_string())
                })
        })
        .mut_subcommand("history", |cmd| {
            cmd.about(rust_i18n::t!("cli.history").to_string())
                .mut_subcommand("list", |s| {
                    s.about(rust_i18n::t!("cli.history.list").to_string())
                })
                .mut_subcommand("delete", |s| {
                    s.about(rust_i18n::t!("cli.history.delete").to_string())
                })
                .mut_subcommand("clear", |s| {
                    s.about(rust_i18n::t!("cli.history.clear").to_string())
                })
        })
        .mut_subcommand("init", |cmd| {
            cmd.about(rust_i18n::t!("cli.init").to_string())
                .mut_arg("force", |arg| {
                    arg.help(rust_i18n::t!("cli.init.force").to_string())
                })
        })
        .mut_subcommand("config", |cmd| {
            cmd.about(rust_i18n::t!("cli.config").to_string())
                .mut_subcommand("show", |s| {
                    s.about(rust_i18n::t!("cli.config.show").to_string())
                })
                .mut_subcommand("path", |s| {
                    s.about(rust_i18n::t!("cli.config.path").to_string())
                })
        });

    let matches = cmd.get_matches();
    Cli::from_arg_matches(&matches)
        .map_err(|e| anyhow::anyhow!("Failed to parse CLI arguments: {}", e))
}

/// Initialize locale early in the startup process
///
/// Priority order:
/// 1. Environment variable FCG_UI_LANGUAGE (highest priority)
/// 2. System locale detection
/// 3. Fallback to English
fn init_locale_early() {
    let locale = std::env::var("FCG_UI_LANGUAGE")
        .ok()
        .or_else(detect_system_locale)
        .unwrap_or_else(|| "en".to_string());

    rust_i18n::set_locale(&locale);
}

/// Detect system locale using sys-locale crate
///
/// Returns locale in BCP 47 format (e.g., "en", "zh-TW")
fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale().map(|locale| {
        // Normalize locale format: "zh_TW" -> "zh-TW"
        locale.replace('_', "-")
    })
}
