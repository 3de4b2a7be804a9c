use super::SearchQuery;
use crate::context::{AppContext, Mutation};
use crate::dates::{normalize_watch_date, today};
use crate::error::WorkflowError;
use crate::guard::MutationGuard;
use crate::links::{resolve_title_link, TitleLink};
use chrono::{Local, NaiveDate, TimeZone};
use movienight_models::{Ack, SearchResult, SelectMovie, User, UserId};
use tracing::info;

/// The "assign title" dialog: a chosen result, who picked it and when.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionForm {
    pub result: SearchResult,
    pub link: TitleLink,
    pub picker: Option<UserId>,
    pub date: NaiveDate,
}

impl SelectionForm {
    pub fn new(result: SearchResult, picker: Option<UserId>, date: NaiveDate) -> Self {
        let link = resolve_title_link(&result);
        Self { result, link, picker, date }
    }

    pub fn can_submit(&self) -> bool {
        self.picker.is_some()
    }

    /// Request body for `POST /movies/select`, with the date taken as local
    /// midnight in `tz`
    pub fn payload<Tz: TimeZone>(&self, tz: &Tz) -> Result<SelectMovie, WorkflowError> {
        let picker = self.picker.ok_or(WorkflowError::MissingPicker)?;
        Ok(SelectMovie {
            movie_id: self.result.id.clone(),
            title: self.result.title.clone(),
            picker_user_id: picker,
            watched_at: normalize_watch_date(self.date, tz),
            search_url: self.link.url().to_string(),
            poster_url: self.result.poster.clone(),
        })
    }
}

pub struct SearchScreen {
    ctx: AppContext,
    select: MutationGuard,
}

impl SearchScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            select: MutationGuard::new("title selection"),
        }
    }

    pub fn query(&self, text: impl AsRef<str>) -> SearchQuery {
        SearchQuery::new(text, self.ctx.settings().default_mode)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, WorkflowError> {
        self.ctx.search(query).await
    }

    /// Candidates for the picker dropdown
    pub async fn pickers(&self) -> Result<Vec<User>, WorkflowError> {
        self.ctx.users().await
    }

    /// Open the dialog for `result`, preselecting whoever is next and today
    pub async fn open_selection(&self, result: SearchResult) -> Result<SelectionForm, WorkflowError> {
        let next = self.ctx.rotation_next().await?;
        let picker = next.next.map(|n| n.id);
        Ok(SelectionForm::new(result, picker, today(&Local)))
    }

    pub fn can_submit(&self, form: &SelectionForm) -> bool {
        form.can_submit() && !self.select.is_pending()
    }

    /// Record the watch event; the server advances the rotation.
    pub async fn submit(&self, form: &SelectionForm) -> Result<Ack, WorkflowError> {
        let payload = form.payload(&Local)?;
        let _in_flight = self.select.try_begin()?;

        let ack = self.ctx.api().select_movie(&payload).await?;
        self.ctx.invalidate_after(Mutation::SelectMovie);

        info!(title = %payload.title, picker = payload.picker_user_id, "Recorded selection");
        Ok(ack)
    }
}
