use super::render::watchlog_table;
use super::ui::spin;
use crate::output::Output;
use chrono::NaiveDate;
use color_eyre::Result;
use movienight_config::Config;
use movienight_core::HomeScreen;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_home(config: &Config, output: &Output) -> Result<()> {
    let screen = HomeScreen::new(super::connect(config)?);
    let view = spin("Loading rotation...", output, screen.load()).await?;

    if !output.is_human() {
        output.json(&json!({ "next": view.next, "recent": view.recent }));
        return Ok(());
    }

    match &view.next {
        Some(next) => output.info(format!("Next up: {}", next.name.bright_cyan().bold())),
        None => output.warn("No one is in the rotation yet. Add someone with 'movienight users add <name>'."),
    }

    if view.recent.is_empty() {
        output.info("Nothing watched yet.");
    } else {
        output.info("\nRecently watched:");
        output.render(|| watchlog_table(&view.recent), &json!(view.recent));
    }
    Ok(())
}

pub async fn run_confirm(config: &Config, date: Option<NaiveDate>, output: &Output) -> Result<()> {
    let screen = HomeScreen::new(super::connect(config)?);
    let view = spin("Loading rotation...", output, screen.load()).await?;
    let picker = view.next.as_ref().map(|n| n.name.clone());

    let ack = spin("Confirming turn...", output, screen.confirm_next(&view, date)).await?;

    if output.is_human() {
        output.success(format!(
            "Confirmed {}'s turn. Attach the title later with 'movienight watchlog edit {} --attach <query>'.",
            picker.unwrap_or_default(),
            ack.id.map(|id| id.to_string()).unwrap_or_else(|| "<id>".to_string()),
        ));
    } else {
        output.json(&json!({ "ok": ack.ok, "id": ack.id, "picker": picker }));
    }
    Ok(())
}
