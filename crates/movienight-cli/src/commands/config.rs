use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Table};
use movienight_config::{Config, PathManager};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, paths, output),
        ConfigCommands::Init { force } => init_config(paths, force, output),
        ConfigCommands::Path => {
            let file = paths.config_file();
            if output.is_human() {
                println!("{}", file.display());
            } else {
                output.json(&json!({ "config_file": file.display().to_string(), "exists": file.exists() }));
            }
            Ok(())
        }
    }
}

fn show_config(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "exists": config_file.exists(),
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}, showing defaults. Create one with 'movienight config init'.",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("backend.url", config.backend.url.clone()),
        ("search.debounce_ms", config.search.debounce_ms.to_string()),
        ("search.min_query_len", config.search.min_query_len.to_string()),
        ("search.default_mode", config.search.default_mode.to_string()),
        ("watchlog.default_limit", config.watchlog.default_limit.to_string()),
        ("watchlog.recent_limit", config.watchlog.recent_limit.to_string()),
        ("logging.file", log_file),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    output.render(|| table, &json!({}));
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
