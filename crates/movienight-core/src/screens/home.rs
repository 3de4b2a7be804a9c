use crate::context::{AppContext, Mutation};
use crate::dates::normalize_watch_date;
use crate::error::WorkflowError;
use crate::guard::MutationGuard;
use chrono::{Local, NaiveDate};
use movienight_models::{Ack, ConfirmRotation, NextPicker, WatchlogItem};
use tracing::info;

/// Next picker plus the most recent watch events
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub next: Option<NextPicker>,
    pub recent: Vec<WatchlogItem>,
}

impl HomeView {
    /// Confirming needs someone whose turn it is
    pub fn can_confirm(&self) -> bool {
        self.next.is_some()
    }
}

pub struct HomeScreen {
    ctx: AppContext,
    confirm: MutationGuard,
}

impl HomeScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            confirm: MutationGuard::new("turn confirmation"),
        }
    }

    pub async fn load(&self) -> Result<HomeView, WorkflowError> {
        let (next, recent) =
            futures::try_join!(self.ctx.rotation_next(), self.ctx.recent_watchlog())?;
        Ok(HomeView {
            next: next.next,
            recent,
        })
    }

    pub fn can_confirm(&self, view: &HomeView) -> bool {
        view.can_confirm() && !self.confirm.is_pending()
    }

    /// Confirm the current turn without a title, leaving a placeholder event
    /// to be resolved from the watch history later.
    pub async fn confirm_next(
        &self,
        view: &HomeView,
        date: Option<NaiveDate>,
    ) -> Result<Ack, WorkflowError> {
        let Some(next) = view.next.as_ref() else {
            return Err(WorkflowError::NoUsers);
        };
        let _in_flight = self.confirm.try_begin()?;

        let request = ConfirmRotation {
            watched_at: date.map(|d| normalize_watch_date(d, &Local)),
            ..Default::default()
        };
        let ack = self.ctx.api().confirm_rotation(&request).await?;
        self.ctx.invalidate_after(Mutation::ConfirmRotation);

        info!(picker = %next.name, event_id = ?ack.id, "Confirmed turn with placeholder");
        Ok(ack)
    }
}
