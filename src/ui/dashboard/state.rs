//! Dashboard state management
//!
//! Contains the dashboard state struct and the enums derived from it

use super::view::ListView;
use crate::controller::form::CreateForm;
use crate::environment::Environment;
use crate::events::Event;
use crate::notification::NotificationSlot;
use crate::proposal::Proposal;
use crate::wallet::WalletSession;

use std::collections::VecDeque;

/// Readiness of the encryption service for the current connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FheStatus {
    Uninitialized,
    Initializing,
    Ready,
    Failed(String),
}

/// Which top-level view is shown. Derived from state, never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DashboardScreen {
    Disconnected,
    FheInitializing,
    DataLoading,
    Ready,
}

/// Bookkeeping for overlapping refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshTracker {
    /// Newest generation whose start was applied.
    latest_started: u64,
    /// Newest generation whose result was applied.
    latest_applied: u64,
    /// Results up to and including this generation are discarded.
    stale_through: u64,
}

impl RefreshTracker {
    pub fn start(&mut self, generation: u64) {
        if generation > self.stale_through {
            self.latest_started = self.latest_started.max(generation);
        }
    }

    /// Records a completion. Returns whether its result should be applied.
    pub fn complete(&mut self, generation: u64) -> bool {
        if generation <= self.stale_through || generation <= self.latest_applied {
            return false;
        }
        self.latest_applied = generation;
        true
    }

    pub fn invalidate(&mut self, stale_through: u64) {
        self.stale_through = self.stale_through.max(stale_through);
        self.latest_started = self.latest_started.max(self.stale_through);
        self.latest_applied = self.latest_applied.max(self.stale_through);
    }

    /// A refresh is in flight until the newest started one has completed.
    pub fn is_refreshing(&self) -> bool {
        self.latest_started > self.latest_applied
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// The environment the collaborators were built for.
    pub environment: Environment,
    pub contract_address: String,
    /// Whether to enable background colors
    pub with_background_color: bool,

    /// Address the connect key binds to, from the configuration.
    pub configured_wallet: Option<String>,
    pub wallet: Option<WalletSession>,
    pub fhe_status: FheStatus,
    /// Projection of the ledger records in enumeration order.
    pub proposals: Vec<Proposal>,
    /// Whether a load finished since the wallet connected.
    pub has_loaded: bool,
    pub refresh: RefreshTracker,
    pub is_creating: bool,

    pub show_create_form: bool,
    pub form: CreateForm,
    pub search_term: String,
    /// Keystrokes go to the search box.
    pub search_focused: bool,
    /// 1-based page of the filtered list.
    pub current_page: usize,
    /// Highlighted row within the visible page.
    pub cursor: usize,
    /// Proposal shown in the details view.
    pub details: Option<String>,

    pub history: Vec<String>,
    pub notification: NotificationSlot,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(environment: Environment, contract_address: String, with_background_color: bool) -> Self {
        Self {
            environment,
            contract_address,
            with_background_color,
            configured_wallet: None,
            wallet: None,
            fhe_status: FheStatus::Uninitialized,
            proposals: Vec::new(),
            has_loaded: false,
            refresh: RefreshTracker::default(),
            is_creating: false,
            show_create_form: false,
            form: CreateForm::default(),
            search_term: String::new(),
            search_focused: false,
            current_page: 1,
            cursor: 0,
            details: None,
            history: Vec::new(),
            notification: NotificationSlot::default(),
            activity_logs: VecDeque::new(),
            tick: 0,
        }
    }

    pub fn screen(&self) -> DashboardScreen {
        if self.wallet.is_none() {
            DashboardScreen::Disconnected
        } else if self.fhe_status != FheStatus::Ready {
            DashboardScreen::FheInitializing
        } else if !self.has_loaded {
            DashboardScreen::DataLoading
        } else {
            DashboardScreen::Ready
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_refreshing()
    }

    /// Whether encryption initialization should be kicked off now.
    pub fn needs_fhe_init(&self) -> bool {
        self.wallet.is_some() && self.fhe_status == FheStatus::Uninitialized
    }

    /// The list as currently searched and paged.
    pub fn list_view(&self) -> ListView<'_> {
        ListView::new(&self.proposals, &self.search_term, self.current_page)
    }

    /// Proposal under the cursor on the visible page.
    pub fn selected_proposal(&self) -> Option<&Proposal> {
        self.list_view().visible().get(self.cursor).copied()
    }

    pub fn details_proposal(&self) -> Option<&Proposal> {
        let id = self.details.as_deref()?;
        self.proposals.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_applies_only_newer_results() {
        let mut tracker = RefreshTracker::default();
        tracker.start(1);
        tracker.start(2);
        assert!(tracker.is_refreshing());

        assert!(tracker.complete(2));
        assert!(!tracker.is_refreshing());
        // The older refresh resolves last and must not overwrite.
        assert!(!tracker.complete(1));
        assert!(!tracker.is_refreshing());
    }

    #[test]
    fn tracker_keeps_refreshing_until_newest_completes() {
        let mut tracker = RefreshTracker::default();
        tracker.start(1);
        tracker.start(2);
        assert!(tracker.complete(1));
        assert!(tracker.is_refreshing());
        assert!(tracker.complete(2));
        assert!(!tracker.is_refreshing());
    }

    #[test]
    fn tracker_discards_invalidated_generations() {
        let mut tracker = RefreshTracker::default();
        tracker.start(3);
        tracker.invalidate(4);
        assert!(!tracker.is_refreshing());
        assert!(!tracker.complete(3));
        // Started before the invalidation, applied after it.
        tracker.start(4);
        assert!(!tracker.complete(4));
        tracker.start(5);
        assert!(tracker.complete(5));
    }

    #[test]
    fn screen_follows_connection_lifecycle() {
        let mut state = DashboardState::new(Environment::Sandbox, "0x0".to_string(), false);
        assert_eq!(state.screen(), DashboardScreen::Disconnected);

        state.wallet =
            Some(WalletSession::connect("0xde709f2102306220921060314715629080e2fb77").unwrap());
        assert_eq!(state.screen(), DashboardScreen::FheInitializing);
        assert!(state.needs_fhe_init());

        state.fhe_status = FheStatus::Ready;
        assert_eq!(state.screen(), DashboardScreen::DataLoading);

        state.has_loaded = true;
        assert_eq!(state.screen(), DashboardScreen::Ready);
    }
}
