//! Dashboard state update logic
//!
//! Applies controller actions to the dashboard state, reducer style.

use super::state::{DashboardState, FheStatus};
use super::view::{clamp_page, total_pages};

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::controller::action::Action;
use crate::controller::form::CreateForm;
use crate::events::Event;

use std::time::Instant;

impl DashboardState {
    /// Advance the animation tick and expire the notification.
    pub fn update(&mut self, now: Instant) {
        self.tick += 1;
        self.notification.expire(now);
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::WalletConnected(session) => {
                self.wallet = Some(session);
                self.fhe_status = FheStatus::Uninitialized;
                self.has_loaded = false;
            }
            Action::WalletDisconnected { stale_through } => {
                self.wallet = None;
                self.fhe_status = FheStatus::Uninitialized;
                self.proposals.clear();
                self.has_loaded = false;
                self.refresh.invalidate(stale_through);
                self.is_creating = false;
                self.show_create_form = false;
                self.details = None;
                self.current_page = 1;
                self.cursor = 0;
            }

            Action::FheInitStarted => {
                self.fhe_status = FheStatus::Initializing;
            }
            Action::FheInitFinished { connection, result } => {
                if !self.is_current_connection(connection) {
                    return;
                }
                self.fhe_status = match result {
                    Ok(()) => FheStatus::Ready,
                    Err(reason) => FheStatus::Failed(reason),
                };
            }

            Action::RefreshStarted {
                connection,
                generation,
            } => {
                if self.is_current_connection(connection) {
                    self.refresh.start(generation);
                }
            }
            Action::ProposalsLoaded {
                connection,
                generation,
                proposals,
            } => {
                if !self.is_current_connection(connection) || !self.refresh.complete(generation) {
                    return;
                }
                if let Some(proposals) = proposals {
                    self.proposals = proposals;
                }
                self.has_loaded = true;
                self.clamp_position();
            }

            Action::CreationStarted => self.is_creating = true,
            Action::CreationFinished { succeeded } => {
                self.is_creating = false;
                if succeeded {
                    self.show_create_form = false;
                    self.form = CreateForm::default();
                }
            }

            Action::Notify(notification) => self.notification.show(notification, now),
            Action::RecordHistory(entry) => self.history.push(entry),
            Action::Log(event) => self.add_to_activity_log(event),

            Action::OpenCreateForm => self.show_create_form = true,
            Action::CloseCreateForm => self.show_create_form = false,
            Action::SetSearchTerm(term) => {
                self.search_term = term;
                self.current_page = 1;
                self.cursor = 0;
            }
            Action::NextPage => {
                let pages = total_pages(self.list_view().filtered.len());
                self.current_page = clamp_page(self.current_page + 1, pages);
                self.cursor = 0;
            }
            Action::PreviousPage => {
                self.current_page = self.current_page.saturating_sub(1).max(1);
                self.cursor = 0;
            }
            Action::MoveCursor(delta) => {
                let visible = self.list_view().visible().len();
                if visible == 0 {
                    self.cursor = 0;
                } else {
                    let target = self.cursor.saturating_add_signed(delta);
                    self.cursor = target.min(visible - 1);
                }
            }
            Action::ShowDetails(id) => self.details = Some(id),
            Action::CloseDetails => self.details = None,
        }
    }

    /// Work issued under an ended connection must not touch the state.
    fn is_current_connection(&self, connection: u64) -> bool {
        self.wallet
            .as_ref()
            .is_some_and(|wallet| wallet.connection() == connection)
    }

    /// Keeps the page and cursor inside the list after it changed.
    fn clamp_position(&mut self) {
        let pages = total_pages(self.list_view().filtered.len());
        self.current_page = clamp_page(self.current_page, pages);
        let visible = self.list_view().visible().len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
        if self
            .details
            .as_deref()
            .is_some_and(|id| !self.proposals.iter().any(|p| p.id == id))
        {
            self.details = None;
        }
    }

    /// Add an event to the activity logs with size limit
    fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::events::Source;
    use crate::ledger::types::BusinessData;
    use crate::notification::Notification;
    use crate::proposal::Proposal;
    use crate::ui::dashboard::state::DashboardScreen;
    use crate::wallet::WalletSession;

    const WALLET: &str = "0xde709f2102306220921060314715629080e2fb77";

    fn state() -> DashboardState {
        DashboardState::new(Environment::Sandbox, "0x0".to_string(), false)
    }

    fn proposals(count: usize) -> Vec<Proposal> {
        (0..count)
            .map(|n| {
                Proposal::from_record(
                    &format!("multisig-{}", n),
                    BusinessData {
                        name: format!("Proposal {}", n),
                        creator: WALLET.to_string(),
                        ..BusinessData::default()
                    },
                )
            })
            .collect()
    }

    fn started(generation: u64) -> Action {
        Action::RefreshStarted {
            connection: 0,
            generation,
        }
    }

    fn loaded(generation: u64, proposals: Option<Vec<Proposal>>) -> Action {
        Action::ProposalsLoaded {
            connection: 0,
            generation,
            proposals,
        }
    }

    fn fhe_finished(connection: u64, result: Result<(), String>) -> Action {
        Action::FheInitFinished { connection, result }
    }

    fn ready_state(count: usize) -> DashboardState {
        let now = Instant::now();
        let mut state = state();
        state.apply(
            Action::WalletConnected(WalletSession::connect(WALLET).unwrap()),
            now,
        );
        state.apply(Action::FheInitStarted, now);
        state.apply(fhe_finished(0, Ok(())), now);
        state.apply(started(1), now);
        state.apply(loaded(1, Some(proposals(count))), now);
        state
    }

    #[test]
    fn connection_walks_through_screens() {
        let now = Instant::now();
        let mut state = state();
        state.apply(
            Action::WalletConnected(WalletSession::connect(WALLET).unwrap()),
            now,
        );
        assert_eq!(state.screen(), DashboardScreen::FheInitializing);
        state.apply(Action::FheInitStarted, now);
        assert!(!state.needs_fhe_init());
        state.apply(fhe_finished(0, Ok(())), now);
        assert_eq!(state.screen(), DashboardScreen::DataLoading);
        state.apply(started(1), now);
        assert!(state.is_refreshing());
        state.apply(loaded(1, None), now);
        // A failed first load still reaches the dashboard, with an empty list.
        assert_eq!(state.screen(), DashboardScreen::Ready);
        assert!(state.proposals.is_empty());
        assert!(!state.is_refreshing());
    }

    #[test]
    fn failed_initialization_stays_on_initializing_screen() {
        let now = Instant::now();
        let mut state = state();
        state.apply(
            Action::WalletConnected(WalletSession::connect(WALLET).unwrap()),
            now,
        );
        state.apply(Action::FheInitStarted, now);
        state.apply(fhe_finished(0, Err("relayer down".to_string())), now);
        assert_eq!(state.screen(), DashboardScreen::FheInitializing);
        assert_eq!(state.fhe_status, FheStatus::Failed("relayer down".to_string()));
    }

    #[test]
    fn stale_results_do_not_overwrite_newer_ones() {
        let now = Instant::now();
        let mut state = ready_state(1);
        state.apply(started(2), now);
        state.apply(started(3), now);
        state.apply(loaded(3, Some(proposals(4))), now);
        state.apply(loaded(2, Some(proposals(2))), now);
        assert_eq!(state.proposals.len(), 4);
        assert!(!state.is_refreshing());
    }

    #[test]
    fn enumeration_failure_keeps_previous_list() {
        let now = Instant::now();
        let mut state = ready_state(3);
        state.apply(started(2), now);
        state.apply(loaded(2, None), now);
        assert_eq!(state.proposals.len(), 3);
    }

    #[test]
    fn disconnect_discards_state_and_in_flight_loads() {
        let now = Instant::now();
        let mut state = ready_state(3);
        state.apply(Action::RecordHistory("Signed multi-signature: x".to_string()), now);
        state.apply(started(2), now);
        state.apply(Action::WalletDisconnected { stale_through: 2 }, now);

        assert_eq!(state.screen(), DashboardScreen::Disconnected);
        assert!(state.proposals.is_empty());
        assert!(!state.is_refreshing());
        assert_eq!(state.history.len(), 1);

        state.apply(loaded(2, Some(proposals(3))), now);
        assert!(state.proposals.is_empty());
    }

    #[test]
    fn refresh_issued_after_disconnect_is_ignored() {
        let now = Instant::now();
        let mut state = ready_state(3);
        state.apply(Action::WalletDisconnected { stale_through: 1 }, now);

        // A sign that finished late refreshes with a fresh generation.
        state.apply(started(2), now);
        state.apply(loaded(2, Some(proposals(3))), now);

        assert_eq!(state.screen(), DashboardScreen::Disconnected);
        assert!(state.proposals.is_empty());
        assert!(!state.has_loaded);
        assert!(!state.is_refreshing());
    }

    #[test]
    fn work_from_a_previous_connection_does_not_leak_into_the_next() {
        let now = Instant::now();
        let mut state = ready_state(3);
        state.apply(Action::WalletDisconnected { stale_through: 1 }, now);
        let session = WalletSession::connect(WALLET).unwrap().with_connection(1);
        state.apply(Action::WalletConnected(session), now);
        state.apply(Action::FheInitStarted, now);

        state.apply(fhe_finished(0, Err("relayer down".to_string())), now);
        state.apply(started(2), now);
        state.apply(loaded(2, Some(proposals(3))), now);

        assert_eq!(state.fhe_status, FheStatus::Initializing);
        assert!(!state.is_refreshing());
        assert!(!state.has_loaded);

        state.apply(fhe_finished(1, Ok(())), now);
        state.apply(
            Action::RefreshStarted {
                connection: 1,
                generation: 3,
            },
            now,
        );
        assert!(state.is_refreshing());
        state.apply(
            Action::ProposalsLoaded {
                connection: 1,
                generation: 3,
                proposals: Some(proposals(1)),
            },
            now,
        );
        assert_eq!(state.screen(), DashboardScreen::Ready);
        assert_eq!(state.proposals.len(), 1);
    }

    #[test]
    fn same_load_applied_twice_is_idempotent() {
        let now = Instant::now();
        let mut state = ready_state(0);
        for generation in [2, 3] {
            state.apply(started(generation), now);
            state.apply(loaded(generation, Some(proposals(2))), now);
        }
        assert_eq!(state.proposals, proposals(2));
    }

    #[test]
    fn successful_creation_resets_form() {
        let now = Instant::now();
        let mut state = ready_state(0);
        state.apply(Action::OpenCreateForm, now);
        state.form.name = "Test".to_string();
        state.form.amount = "100".to_string();
        state.apply(Action::CreationStarted, now);
        assert!(state.is_creating);
        state.apply(Action::CreationFinished { succeeded: true }, now);

        assert!(!state.show_create_form);
        assert!(!state.is_creating);
        assert_eq!(state.form, CreateForm::default());
        assert_eq!(state.form.required_signatures, "2");
    }

    #[test]
    fn failed_creation_keeps_form_open() {
        let now = Instant::now();
        let mut state = ready_state(0);
        state.apply(Action::OpenCreateForm, now);
        state.form.name = "Test".to_string();
        state.apply(Action::CreationStarted, now);
        state.apply(Action::CreationFinished { succeeded: false }, now);
        assert!(state.show_create_form);
        assert_eq!(state.form.name, "Test");
    }

    #[test]
    fn paging_and_search() {
        let now = Instant::now();
        let mut state = ready_state(12);
        state.apply(Action::NextPage, now);
        state.apply(Action::NextPage, now);
        state.apply(Action::NextPage, now);
        assert_eq!(state.current_page, 3);
        assert_eq!(state.list_view().visible().len(), 2);

        state.apply(Action::SetSearchTerm("proposal 1".to_string()), now);
        assert_eq!(state.current_page, 1);
        // "Proposal 1", "Proposal 10", "Proposal 11"
        assert_eq!(state.list_view().filtered.len(), 3);

        state.apply(Action::PreviousPage, now);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn cursor_stays_on_visible_page() {
        let now = Instant::now();
        let mut state = ready_state(7);
        state.apply(Action::MoveCursor(10), now);
        assert_eq!(state.cursor, 4);
        state.apply(Action::NextPage, now);
        assert_eq!(state.cursor, 0);
        state.apply(Action::MoveCursor(5), now);
        assert_eq!(state.cursor, 1);
        assert_eq!(
            state.selected_proposal().map(|p| p.id.as_str()),
            Some("multisig-6")
        );
        state.apply(Action::MoveCursor(-3), now);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn notifications_expire() {
        let now = Instant::now();
        let mut state = state();
        state.apply(Action::Notify(Notification::success("done")), now);
        state.update(now + std::time::Duration::from_millis(1_999));
        assert!(state.notification.current().is_some());
        state.update(now + std::time::Duration::from_secs(2));
        assert!(state.notification.current().is_none());

        state.apply(Action::Notify(Notification::pending("working")), now);
        state.update(now + std::time::Duration::from_secs(60));
        assert!(state.notification.current().is_some());
    }

    #[test]
    fn activity_log_is_bounded() {
        let now = Instant::now();
        let mut state = state();
        for n in 0..(MAX_ACTIVITY_LOGS + 5) {
            state.apply(
                Action::Log(Event::success(Source::Loader, format!("event {}", n))),
                now,
            );
        }
        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(
            state.activity_logs.front().map(|e| e.msg.as_str()),
            Some("event 5")
        );
    }
}
