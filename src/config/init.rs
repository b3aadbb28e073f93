use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, ThemeSetting, DEFAULT_ASSET_PATH, DEFAULT_MODEL_PATH};
use crate::model::ScoringEngine;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a theme answer from the wizard.
fn parse_theme(input: &str) -> Option<ThemeSetting> {
    match input.trim().to_lowercase().as_str() {
        "auto" => Some(ThemeSetting::Auto),
        "dark" => Some(ThemeSetting::Dark),
        "light" => Some(ThemeSetting::Light),
        _ => None,
    }
}

/// Check that a model artifact loads. A missing file is allowed (the user may
/// copy it in later) but a present-and-broken one is not.
fn check_model_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    ScoringEngine::load(path).map(|_| ()).map_err(|e| e.to_string())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Loan Risk Configuration Wizard");
    println!("==============================");
    println!();

    // 1. Model artifact
    println!("The model artifact is the trained classifier exported as YAML.");
    println!("Relative paths are resolved from the directory you run loan-risk in.");
    let model_path = loop {
        let input = prompt_with_default("Model artifact path", DEFAULT_MODEL_PATH)?;
        let path = PathBuf::from(&input);
        match check_model_path(&path) {
            Ok(()) => {
                if !path.exists() {
                    println!("  Note: {} does not exist yet.", path.display());
                }
                break path;
            }
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 2. Banner image
    println!();
    println!("An optional banner image. If it is missing you only get a warning.");
    let asset_path = PathBuf::from(prompt_with_default("Banner image path", DEFAULT_ASSET_PATH)?);

    // 3. Theme
    println!();
    let theme = loop {
        let input = prompt_with_default("Theme (auto, dark, light)", "auto")?;
        match parse_theme(&input) {
            Some(t) => break t,
            None => println!("  Invalid: expected auto, dark or light. Try again."),
        }
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        model_path,
        asset_path,
        theme,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `loan-risk` to open the assessment form.");

    Ok(())
}

/// Serialize `config` as YAML at `path`, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, &yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}
