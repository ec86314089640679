//! Pure state machine behind the triage deck.
//!
//! ```text
//! Idle -> Presenting(i) -> Committing(decision) -> Presenting(i + 1) ... -> Completed
//! ```
//!
//! The reducer never touches storage. The session adapter persists a
//! decision between `Commit` and `CommitSucceeded`/`CommitFailed`, and
//! reverts the remembered effect before dispatching `Undo`.
//!
//! Decided cards stay out of the deck when the cat filter changes; only a
//! `Reset` with a recomputed item list brings them back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::catch_up::CatchUpItem;
use crate::store::AckTarget;

/// What the user decided for the current card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Completed, with a fixed or typed memo.
    Done {
        /// Memo stored alongside the completion.
        memo: Option<String>,
    },
    /// Skipped; nothing is persisted.
    Later,
}

/// Direction for switching the cat filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatStep {
    /// Advance to the next cat (wrapping through "all cats").
    Next,
    /// Go back to the previous cat.
    Previous,
}

/// Persisted side effect of a committed decision, kept for undo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommitEffect {
    /// A care log was appended.
    LogAdded {
        /// Id of the new log.
        log_id: String,
    },
    /// An alert record was acknowledged.
    Acknowledged(AckTarget),
    /// Nothing was written.
    Skipped,
}

/// The single decision that `Undo` can revert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Committed {
    /// Deck index the decision was made at.
    pub index: usize,
    /// Item the decision applied to.
    pub item_id: String,
    /// The decision.
    pub decision: Decision,
    /// What was persisted.
    pub effect: CommitEffect,
}

/// Lifecycle phase of the deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started.
    Idle,
    /// Showing the card at `index`.
    Presenting,
    /// Waiting for persistence of a decision on the card at `index`.
    Committing(Decision),
    /// Every card has been handled.
    Completed,
}

/// Input to [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Leave `Idle`.
    Start,
    /// Begin committing a decision on the current card.
    Commit(Decision),
    /// Persistence finished; advance.
    CommitSucceeded(CommitEffect),
    /// Persistence failed; stay on the card and notify.
    CommitFailed(String),
    /// Step back one card, forgetting the last commit.
    Undo,
    /// Change the cat filter.
    SwitchCat(CatStep),
    /// Replace the items with a freshly computed list.
    Reset(Vec<CatchUpItem>),
    /// Record a non-blocking message without changing position.
    Notify(String),
}

/// Complete deck state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageState {
    items: Vec<CatchUpItem>,
    cats: Vec<String>,
    cat_filter: Option<usize>,
    deck: Vec<CatchUpItem>,
    decided: BTreeSet<String>,
    index: usize,
    phase: Phase,
    last: Option<Committed>,
    notifications: Vec<String>,
}

impl TriageState {
    /// Idle deck over `items`, switching between `cats` on vertical swipes.
    #[must_use]
    pub fn new(items: Vec<CatchUpItem>, cats: Vec<String>) -> Self {
        let deck = items.clone();
        Self {
            items,
            cats,
            cat_filter: None,
            deck,
            decided: BTreeSet::new(),
            index: 0,
            phase: Phase::Idle,
            last: None,
            notifications: Vec::new(),
        }
    }

    /// Cards visible under the current cat filter.
    #[must_use]
    pub fn deck(&self) -> &[CatchUpItem] {
        &self.deck
    }

    /// Position in the deck.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Card currently shown, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CatchUpItem> {
        match self.phase {
            Phase::Presenting | Phase::Committing(_) => self.deck.get(self.index),
            Phase::Idle | Phase::Completed => None,
        }
    }

    /// Cards not yet decided, current card included.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.index)
    }

    /// The commit `Undo` would revert.
    #[must_use]
    pub fn last_commit(&self) -> Option<&Committed> {
        self.last.as_ref()
    }

    /// Selected cat, or `None` for all cats.
    #[must_use]
    pub fn cat_filter(&self) -> Option<&str> {
        self.cat_filter
            .and_then(|i| self.cats.get(i))
            .map(String::as_str)
    }

    /// Pending non-blocking messages.
    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Drain pending messages.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    fn rebuild_deck(&mut self) {
        let filter = self.cat_filter().map(str::to_owned);
        self.deck = self
            .items
            .iter()
            .filter(|item| !self.decided.contains(&item.id))
            .filter(|item| match (&filter, &item.cat_id) {
                (Some(cat), Some(item_cat)) => cat == item_cat,
                _ => true,
            })
            .cloned()
            .collect();
        self.index = 0;
        self.last = None;
        self.phase = self.presenting_or_completed();
    }

    fn presenting_or_completed(&self) -> Phase {
        if self.index >= self.deck.len() {
            Phase::Completed
        } else {
            Phase::Presenting
        }
    }
}

/// Apply one action. Actions that do not fit the current phase are ignored.
#[must_use]
pub fn reduce(mut state: TriageState, action: Action) -> TriageState {
    match action {
        Action::Start => {
            if state.phase == Phase::Idle {
                state.phase = state.presenting_or_completed();
            }
        }
        Action::Commit(decision) => {
            if state.phase == Phase::Presenting && state.index < state.deck.len() {
                state.phase = Phase::Committing(decision);
            }
        }
        Action::CommitSucceeded(effect) => {
            if let Phase::Committing(decision) = state.phase.clone() {
                let item_id = state
                    .deck
                    .get(state.index)
                    .map(|item| item.id.clone())
                    .unwrap_or_default();
                state.decided.insert(item_id.clone());
                state.last = Some(Committed {
                    index: state.index,
                    item_id,
                    decision,
                    effect,
                });
                state.index += 1;
                state.phase = state.presenting_or_completed();
            }
        }
        Action::CommitFailed(message) => {
            if matches!(state.phase, Phase::Committing(_)) {
                state.phase = Phase::Presenting;
                state.notifications.push(message);
            }
        }
        Action::Undo => {
            if matches!(state.phase, Phase::Presenting | Phase::Completed) {
                if let Some(last) = state.last.take() {
                    state.decided.remove(&last.item_id);
                    state.index = last.index.min(state.deck.len());
                    state.phase = state.presenting_or_completed();
                }
            }
        }
        Action::SwitchCat(step) => {
            if !matches!(state.phase, Phase::Committing(_)) && !state.cats.is_empty() {
                // Cursor positions: 0 = all cats, 1..=n = cats[i - 1].
                let positions = state.cats.len() + 1;
                let current = state.cat_filter.map_or(0, |i| i + 1);
                let next = match step {
                    CatStep::Next => (current + 1) % positions,
                    CatStep::Previous => (current + positions - 1) % positions,
                };
                state.cat_filter = next.checked_sub(1);
                state.rebuild_deck();
            }
        }
        Action::Reset(items) => {
            if !matches!(state.phase, Phase::Committing(_)) {
                state.items = items;
                state.decided.clear();
                state.rebuild_deck();
            }
        }
        Action::Notify(message) => state.notifications.push(message),
    }
    state
}
