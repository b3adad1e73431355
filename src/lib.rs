//! # fcg-rs
//!
//! AI 驅動的期末評語產生器，為教師批次生成學生評語。
//!
//! ## 功能
//! - **單人生成**：根據特質標籤、風格與字數產生繁體中文評語
//! - **批次生成**：讀取班級名單，依序為每位學生生成並自動節流
//! - **評語改寫**：以自由指令改寫既有評語
//! - **多 Provider 支持**：Gemini、OpenAI（可自訂 endpoint）
//! - **錯誤分類與重試**：金鑰、模型、額度等錯誤給出可讀訊息；速率限制自動退避重試
//! - **歷史紀錄**：每次成功生成都記錄到本機 JSON 檔
//! - **國際化**：支持中英文介面
//!
//! ## 快速開始
//!
//! ### 作為 CLI 使用
//! ```bash
//! # 安裝
//! cargo install fcg-rs
//!
//! # 初始化配置
//! fcg-rs init
//!
//! # 單人生成
//! fcg-rs generate --name 王小明 --traits 樂於助人,上課專心
//!
//! # 批次生成
//! fcg-rs batch roster.txt --traits 認真負責 --yes
//! ```
//!
//! ### 作為庫使用
//! ```ignore
//! use fcg_rs::config::AppSettings;
//! use fcg_rs::orchestrator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut settings = AppSettings::default();
//! settings.api_key = "AIza...".to_string();
//!
//! let comment = orchestrator::generate(
//!     &settings,
//!     "王小明",
//!     &["樂於助人".to_string()],
//!     "溫馨",
//!     100,
//!     None,
//! )
//! .await?;
//! println!("{}", comment);
//! # Ok(())
//! # }
//! ```
//!
//! ## 核心模組
//! - [`llm`] - Provider 介面、提示詞組裝、錯誤分類與重試
//! - [`orchestrator`] - 生成、改寫、金鑰驗證三個入口
//! - [`batch`] - 批次排程（節流、跳過、續行）
//! - [`model`] - 學生與歷史紀錄資料模型
//! - [`history`] - 歷史紀錄持久化
//! - [`commands`] - CLI 命令實現
//! - [`config`] - 配置管理
//! - [`error`] - 統一錯誤類型
//! - [`ui`] - 終端輸出工具
//!
//! ## 配置
//! 配置文件位置：
//! - Linux: `~/.config/fcg/config.toml`
//! - macOS: `~/Library/Application Support/fcg/config.toml`
//! - Windows: `%APPDATA%\fcg\config.toml`

#[macro_use]
extern crate rust_i18n;

pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod model;
pub mod orchestrator;
pub mod ui;

// Initialize i18n for library modules
i18n!("locales", fallback = "en");
