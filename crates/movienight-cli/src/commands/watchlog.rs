use super::prompts::{confirmer, prompt_choice};
use super::render::{search_table, watchlog_table};
use super::ui::spin;
use super::{connect, index_from_position};
use crate::output::Output;
use crate::WatchlogCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movienight_config::Config;
use movienight_core::{Outcome, SearchQuery, WatchlogScreen};
use movienight_models::{SearchMode, WatchEventId, WatchlogItem};
use serde_json::json;

pub async fn run_watchlog(config: &Config, cmd: WatchlogCommands, output: &Output) -> Result<()> {
    let screen = WatchlogScreen::new(connect(config)?);

    match cmd {
        WatchlogCommands::List { limit } => {
            let limit = limit.unwrap_or_else(|| screen.default_limit());
            let items = spin("Loading watch log...", output, screen.load(limit)).await?;
            if items.is_empty() {
                output.info("Nothing watched yet.");
            } else {
                output.render(|| watchlog_table(&items), &json!({ "items": items }));
            }
            Ok(())
        }
        WatchlogCommands::Edit {
            id,
            date,
            picker,
            title,
            attach,
            pick,
            mode,
            limit,
        } => {
            let item = find_event(&screen, id, limit).await?;
            let mut form = screen.edit(&item);
            if let Some(date) = date {
                form.date = date;
            }
            form.picker = picker;

            let Some(text) = attach else {
                if date.is_none() && picker.is_none() && title.is_none() {
                    return Err(eyre!("Nothing to change: use --date, --picker, --title or --attach"));
                }
                if let Some(title) = title {
                    form.title = title;
                }
                spin("Saving...", output, screen.save_meta(&form)).await?;
                output.success(format!("Updated watch event {}", id));
                return Ok(());
            };

            let mode = mode.map(SearchMode::from).unwrap_or(config.search.default_mode);
            let results = spin("Searching...", output, screen.search(&SearchQuery::new(&text, mode))).await?;
            if results.is_empty() {
                return Err(eyre!("No results for \"{}\"", text.trim()));
            }
            let position = match pick {
                Some(position) => position,
                None => {
                    output.render(|| search_table(&results), &json!({ "results": results }));
                    prompt_choice("Attach which result?", results.len(), output)?
                }
            };
            let result = &results[index_from_position(position, results.len())?];

            spin("Saving...", output, screen.attach_title(&form, result)).await?;
            output.success(format!("Watch event {} is now \"{}\"", id, result.title));
            Ok(())
        }
        WatchlogCommands::Delete { id, yes, limit } => {
            let item = find_event(&screen, id, limit).await?;
            match screen.delete_event(&item, confirmer(yes).as_ref()).await? {
                Outcome::Done(_) => output.success(format!("Deleted \"{}\"", item.title)),
                Outcome::Cancelled => output.info("Cancelled, nothing was deleted."),
            }
            Ok(())
        }
    }
}

async fn find_event(screen: &WatchlogScreen, id: WatchEventId, limit: Option<u32>) -> Result<WatchlogItem> {
    let limit = limit.unwrap_or_else(|| screen.default_limit());
    screen
        .find(id, limit)
        .await?
        .ok_or_else(|| eyre!("Watch event {} is not among the latest {} (try --limit)", id, limit))
}
