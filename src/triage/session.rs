//! Adapter between gestures, the reducer, and the stores.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::HouseholdSettings;
use crate::models::care_log::NewCareLog;
use crate::models::catch_up::{CatchUpItem, CatchUpPayload, NoticeSource};
use crate::store::{AckTarget, AlertStore, CareStore};
use crate::Result;

use super::gesture::{classify, Swipe, SwipeThresholds, Vector2};
use super::reducer::{reduce, Action, CatStep, CommitEffect, Decision, TriageState};

/// One user's pass through the catch-up deck.
///
/// Store failures never escape as errors: a failed commit leaves the card in
/// place and queues a notification, and the user may simply swipe again.
pub struct TriageSession<S> {
    store: Arc<S>,
    state: TriageState,
    done_memo: String,
    thresholds: SwipeThresholds,
}

impl<S> TriageSession<S>
where
    S: CareStore + AlertStore,
{
    /// Start a session over `items`; `cats` drives vertical cat switching.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        items: Vec<CatchUpItem>,
        cats: Vec<String>,
        settings: &HouseholdSettings,
    ) -> Self {
        let state = reduce(TriageState::new(items, cats), Action::Start);
        Self {
            store,
            state,
            done_memo: settings.done_memo.clone(),
            thresholds: SwipeThresholds::default(),
        }
    }

    /// Override the default swipe thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SwipeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Current deck state.
    #[must_use]
    pub fn state(&self) -> &TriageState {
        &self.state
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<String> {
        self.state.take_notifications()
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::replace(&mut self.state, TriageState::new(Vec::new(), Vec::new()));
        self.state = reduce(state, action);
    }

    /// Handle a released drag and return how it was classified.
    pub async fn release(&mut self, offset: Vector2, velocity: Vector2) -> Swipe {
        let swipe = classify(offset, velocity, self.thresholds);
        match swipe {
            Swipe::Right => {
                let memo = Some(self.done_memo.clone());
                self.decide(Decision::Done { memo }).await;
            }
            Swipe::Left => self.decide(Decision::Later).await,
            Swipe::Up => self.dispatch(Action::SwitchCat(CatStep::Next)),
            Swipe::Down => self.dispatch(Action::SwitchCat(CatStep::Previous)),
            Swipe::None => {}
        }
        swipe
    }

    /// Commit a decision on the current card.
    pub async fn decide(&mut self, decision: Decision) {
        let Some(item) = self.state.current().cloned() else {
            return;
        };
        self.dispatch(Action::Commit(decision.clone()));

        let memo = match decision {
            Decision::Later => {
                self.dispatch(Action::CommitSucceeded(CommitEffect::Skipped));
                return;
            }
            Decision::Done { memo } => memo,
        };

        match self.persist(&item, memo).await {
            Ok(effect) => {
                info!(item_id = %item.id, "triage item committed");
                self.dispatch(Action::CommitSucceeded(effect));
            }
            Err(err) => {
                warn!(item_id = %item.id, %err, "triage commit failed");
                self.dispatch(Action::CommitFailed(format!(
                    "Could not save \"{}\": {err}",
                    item.title
                )));
            }
        }
    }

    /// Revert the last committed decision and step back one card.
    pub async fn undo(&mut self) {
        let Some(last) = self.state.last_commit().cloned() else {
            return;
        };

        let reverted = match &last.effect {
            CommitEffect::LogAdded { log_id } => self.store.delete_care_log(log_id).await,
            CommitEffect::Acknowledged(target) => {
                self.store.set_acknowledged(target.clone(), false).await
            }
            CommitEffect::Skipped => Ok(()),
        };

        match reverted {
            Ok(()) => self.dispatch(Action::Undo),
            Err(err) => {
                warn!(item_id = %last.item_id, %err, "triage undo failed");
                self.dispatch(Action::Notify(format!("Could not undo: {err}")));
            }
        }
    }

    /// Replace the deck with a recomputed item list.
    pub fn reset(&mut self, items: Vec<CatchUpItem>) {
        self.dispatch(Action::Reset(items));
    }

    async fn persist(&self, item: &CatchUpItem, memo: Option<String>) -> Result<CommitEffect> {
        let target = match &item.payload {
            CatchUpPayload::Task(instance) => {
                let log = self
                    .store
                    .add_care_log(NewCareLog {
                        task_type: instance.completion_type(),
                        cat_id: instance.cat_id.clone(),
                        notes: memo,
                        images: Vec::new(),
                    })
                    .await?;
                return Ok(CommitEffect::LogAdded { log_id: log.id });
            }
            CatchUpPayload::Incident(incident) => AckTarget::Incident(incident.id.clone()),
            CatchUpPayload::Inventory(stock) => AckTarget::Inventory(stock.id.clone()),
            CatchUpPayload::Notice(NoticeSource::Observation(obs)) => {
                AckTarget::Observation(obs.id.clone())
            }
            CatchUpPayload::Notice(NoticeSource::Photos { photo_ids }) => {
                AckTarget::Photos(photo_ids.clone())
            }
        };
        self.store.set_acknowledged(target.clone(), true).await?;
        Ok(CommitEffect::Acknowledged(target))
    }
}
