use super::render::search_table;
use super::ui::spin;
use super::{connect, index_from_position};
use crate::output::Output;
use chrono::NaiveDate;
use color_eyre::Result;
use movienight_config::Config;
use movienight_core::{debounce_channel, SearchQuery, SearchScreen, Settings, WorkflowError};
use movienight_models::{SearchMode, UserId};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn run_search(
    config: &Config,
    text: &str,
    mode: Option<SearchMode>,
    pick: Option<usize>,
    picker: Option<UserId>,
    date: Option<NaiveDate>,
    output: &Output,
) -> Result<()> {
    let screen = SearchScreen::new(connect(config)?);
    let query = match mode {
        Some(mode) => SearchQuery::new(text, mode),
        None => screen.query(text),
    };

    let results = spin("Searching...", output, screen.search(&query)).await?;

    let Some(position) = pick else {
        if results.is_empty() {
            output.warn(format!("No results for \"{}\"", query.text()));
        } else {
            output.render(|| search_table(&results), &json!({ "results": results }));
        }
        return Ok(());
    };

    let index = index_from_position(position, results.len())?;
    let mut form = screen.open_selection(results[index].clone()).await?;
    if picker.is_some() {
        form.picker = picker;
    }
    if let Some(date) = date {
        form.date = date;
    }

    let ack = spin("Recording selection...", output, screen.submit(&form)).await?;
    if output.is_human() {
        output.success(format!(
            "Recorded \"{}\" for {} ({})",
            form.result.title,
            form.date.format("%Y-%m-%d"),
            form.link.url()
        ));
    } else {
        output.json(&json!({ "ok": ack.ok, "id": ack.id, "title": form.result.title }));
    }
    Ok(())
}

/// Every stdin line is a new version of the query; only the latest one is
/// searched once typing has paused.
pub async fn run_interactive(config: &Config, mode: Option<SearchMode>, output: &Output) -> Result<()> {
    let screen = SearchScreen::new(connect(config)?);
    let settings = Settings::from(config);
    let mode = mode.unwrap_or(settings.default_mode);

    output.info(format!(
        "Type a query and press enter ({} search). Ctrl-D to quit.",
        mode
    ));

    let (tx, rx) = mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let mut debounced = debounce_channel(rx, settings.debounce);
    while let Some(line) = debounced.recv().await {
        let query = SearchQuery::new(&line, mode);
        match screen.search(&query).await {
            Ok(results) if results.is_empty() => {
                output.warn(format!("No results for \"{}\"", query.text()))
            }
            Ok(results) => output.render(
                || search_table(&results),
                &json!({ "query": query.text(), "results": results }),
            ),
            Err(WorkflowError::QueryTooShort { min }) => {
                output.info(format!("Type at least {} characters", min))
            }
            Err(e) => output.error(format!("Search failed: {}", e)),
        }
    }
    Ok(())
}

