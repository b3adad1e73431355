use std::fs;

use crate::config;
use crate::error::{FcgError, Result};
use crate::ui;

/// 初始化配置文件
pub fn run(force: bool, colored: bool) -> Result<()> {
    let config_dir = config::get_config_dir()
        .ok_or_else(|| FcgError::Config("Failed to determine config directory".to_string()))?;

    let config_file = config_dir.join("config.toml");

    if config_file.exists() && !force {
        ui::warning(
            &rust_i18n::t!("init.exists", path = config_file.display()),
            colored,
        );
        println!();
        println!("{}", rust_i18n::t!("init.use_force"));
        return Ok(());
    }

    fs::create_dir_all(&config_dir)?;

    let example_config = include_str!("../../config.toml.example");
    fs::write(&config_file, example_config)?;
    ui::success(
        &rust_i18n::t!("init.file_created", path = config_file.display()),
        colored,
    );

    // 设置文件权限（仅 Unix）
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&config_file)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&config_file, perms)?;
        ui::success(&rust_i18n::t!("init.permissions"), colored);
    }

    println!();
    println!("{}", ui::info(&rust_i18n::t!("init.next_steps"), colored));
    println!("{}", rust_i18n::t!("init.step_key"));
    println!("{}", rust_i18n::t!("init.step_validate"));
    println!();

    Ok(())
}
