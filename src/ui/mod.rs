//! Terminal output helpers.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// 显示成功消息（绿色 ✓）
pub fn success(msg: &str, colored: bool) {
    if colored {
        println!("{} {}", "✓".green().bold(), msg.green());
    } else {
        println!("✓ {}", msg);
    }
}

/// 显示错误消息（红色 ✗）
pub fn error(msg: &str, colored: bool) {
    if colored {
        eprintln!("{} {}", "✗".red().bold(), msg.red());
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// 显示警告消息（黄色 ⚠）
pub fn warning(msg: &str, colored: bool) {
    if colored {
        println!("{} {}", "⚠".yellow().bold(), msg.yellow());
    } else {
        println!("⚠ {}", msg);
    }
}

/// 显示信息消息（蓝色 ℹ）
pub fn info(msg: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "ℹ".blue().bold(), msg.blue())
    } else {
        format!("ℹ {}", msg)
    }
}

/// Progress bar for batch generation, driven by `BatchProgress` updates.
pub fn batch_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid template")
            .progress_chars("=>-"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Spinner shown while a single request is in flight.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}
