use super::{Confirmer, SearchQuery};
use crate::context::{AppContext, Mutation};
use crate::dates::{local_watch_date, normalize_watch_date, today};
use crate::error::{Outcome, WorkflowError};
use crate::guard::MutationGuard;
use crate::links::resolve_title_link;
use chrono::{Local, NaiveDate, TimeZone};
use movienight_config::WATCHLOG_LIMIT_CHOICES;
use movienight_models::{
    Ack, SearchResult, UpdateWatchEvent, User, UserId, WatchEventId, WatchlogItem,
};
use tracing::info;

/// The edit dialog for one watch event
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub event_id: WatchEventId,
    pub date: NaiveDate,
    /// `None` keeps the current picker
    pub picker: Option<UserId>,
    pub title: String,
    /// Whether the title is being replaced from search; placeholders start with it on
    pub change_title: bool,
}

impl EditForm {
    pub fn for_item<Tz: TimeZone>(item: &WatchlogItem, tz: &Tz) -> Self {
        Self {
            event_id: item.id,
            date: local_watch_date(&item.watched_at, tz).unwrap_or_else(|| today(tz)),
            picker: None,
            title: item.title.clone(),
            change_title: item.is_placeholder,
        }
    }

    /// Date, picker and free-text title only
    pub fn meta_payload<Tz: TimeZone>(&self, tz: &Tz) -> UpdateWatchEvent {
        let title = self.title.trim();
        UpdateWatchEvent {
            watched_at: Some(normalize_watch_date(self.date, tz)),
            picker_user_id: self.picker,
            title: (!title.is_empty()).then(|| title.to_string()),
            ..Default::default()
        }
    }

    /// Same submission as a new selection, against this event
    pub fn attach_payload<Tz: TimeZone>(&self, result: &SearchResult, tz: &Tz) -> UpdateWatchEvent {
        let link = resolve_title_link(result);
        UpdateWatchEvent {
            watched_at: Some(normalize_watch_date(self.date, tz)),
            picker_user_id: self.picker,
            title: Some(result.title.clone()),
            movie_id: Some(result.id.clone()),
            search_url: Some(Some(link.url().to_string())),
            poster_url: Some(result.poster.clone()),
        }
    }
}

pub struct WatchlogScreen {
    ctx: AppContext,
    edit: MutationGuard,
    delete: MutationGuard,
}

impl WatchlogScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            edit: MutationGuard::new("event update"),
            delete: MutationGuard::new("event deletion"),
        }
    }

    pub fn default_limit(&self) -> u32 {
        self.ctx.settings().default_watchlog_limit
    }

    /// One page of history; `limit` is one of [`WATCHLOG_LIMIT_CHOICES`]
    pub async fn load(&self, limit: u32) -> Result<Vec<WatchlogItem>, WorkflowError> {
        if !WATCHLOG_LIMIT_CHOICES.contains(&limit) {
            return Err(WorkflowError::UnsupportedPageSize(limit));
        }
        self.ctx.watchlog(limit).await
    }

    /// Look up one event among the latest `limit`
    pub async fn find(&self, id: WatchEventId, limit: u32) -> Result<Option<WatchlogItem>, WorkflowError> {
        Ok(self.load(limit).await?.into_iter().find(|item| item.id == id))
    }

    pub async fn pickers(&self) -> Result<Vec<User>, WorkflowError> {
        self.ctx.users().await
    }

    pub fn edit(&self, item: &WatchlogItem) -> EditForm {
        EditForm::for_item(item, &Local)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, WorkflowError> {
        self.ctx.search(query).await
    }

    pub fn is_saving(&self) -> bool {
        self.edit.is_pending()
    }

    pub async fn save_meta(&self, form: &EditForm) -> Result<Ack, WorkflowError> {
        let payload = form.meta_payload(&Local);
        self.patch(form.event_id, &payload).await
    }

    /// Resolve the event (typically a placeholder) into a concrete title
    pub async fn attach_title(
        &self,
        form: &EditForm,
        result: &SearchResult,
    ) -> Result<Ack, WorkflowError> {
        let payload = form.attach_payload(result, &Local);
        self.patch(form.event_id, &payload).await
    }

    async fn patch(&self, id: WatchEventId, payload: &UpdateWatchEvent) -> Result<Ack, WorkflowError> {
        let _in_flight = self.edit.try_begin()?;

        let ack = self.ctx.api().update_watch_event(id, payload).await?;
        self.ctx.invalidate_after(Mutation::UpdateWatchEvent);

        info!(event_id = id, "Updated watch event");
        Ok(ack)
    }

    pub async fn delete_event(
        &self,
        item: &WatchlogItem,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<Ack>, WorkflowError> {
        if !confirmer.confirm(&format!("Really delete \"{}\"?", item.title)) {
            return Ok(Outcome::Cancelled);
        }
        let _in_flight = self.delete.try_begin()?;

        let ack = self.ctx.api().delete_watch_event(item.id).await?;
        self.ctx.invalidate_after(Mutation::DeleteWatchEvent);

        info!(event_id = item.id, "Deleted watch event");
        Ok(Outcome::Done(ack))
    }
}
