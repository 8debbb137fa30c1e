//! Keyboard handling
//!
//! Maps key presses to state edits and to commands the app loop carries
//! out. Text editing (search box, creation form) happens in place; anything
//! that reaches the controller is returned as a [`UiCommand`].

use crate::controller::action::Action;
use crate::controller::form::CreateForm;
use crate::proposal::Proposal;
use crate::ui::dashboard::{DashboardScreen, DashboardState, FheStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Quit,
    Connect,
    Disconnect,
    RetryFheInit,
    Refresh,
    CheckAvailability,
    Create(CreateForm),
    Sign(String),
    Decrypt(String),
    /// A pure state change.
    Apply(Action),
}

pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> Option<UiCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiCommand::Quit);
    }
    if state.show_create_form {
        return handle_form_key(state, key);
    }
    if state.details.is_some() {
        return handle_details_key(state, key);
    }
    if state.search_focused {
        return handle_search_key(state, key);
    }

    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        return Some(UiCommand::Quit);
    }

    match state.screen() {
        DashboardScreen::Disconnected => match key.code {
            KeyCode::Char('c') | KeyCode::Enter => Some(UiCommand::Connect),
            _ => None,
        },
        DashboardScreen::FheInitializing => match key.code {
            KeyCode::Char('r') if matches!(state.fhe_status, FheStatus::Failed(_)) => {
                Some(UiCommand::RetryFheInit)
            }
            KeyCode::Char('x') => Some(UiCommand::Disconnect),
            _ => None,
        },
        DashboardScreen::DataLoading => match key.code {
            KeyCode::Char('x') => Some(UiCommand::Disconnect),
            _ => None,
        },
        DashboardScreen::Ready => handle_dashboard_key(state, key),
    }
}

fn handle_dashboard_key(state: &mut DashboardState, key: KeyEvent) -> Option<UiCommand> {
    let selected = state.selected_proposal().map(|p| p.id.clone());
    let signable = signable_id(state.selected_proposal());
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(UiCommand::Apply(Action::MoveCursor(-1))),
        KeyCode::Down | KeyCode::Char('j') => Some(UiCommand::Apply(Action::MoveCursor(1))),
        KeyCode::Left | KeyCode::Char('[') => Some(UiCommand::Apply(Action::PreviousPage)),
        KeyCode::Right | KeyCode::Char(']') => Some(UiCommand::Apply(Action::NextPage)),
        KeyCode::Enter => selected.map(|id| UiCommand::Apply(Action::ShowDetails(id))),
        KeyCode::Char('s') => signable.map(UiCommand::Sign),
        KeyCode::Char('d') => selected.map(UiCommand::Decrypt),
        KeyCode::Char('n') => Some(UiCommand::Apply(Action::OpenCreateForm)),
        KeyCode::Char('/') => {
            state.search_focused = true;
            None
        }
        KeyCode::Char('r') if !state.is_refreshing() => Some(UiCommand::Refresh),
        KeyCode::Char('c') => Some(UiCommand::CheckAvailability),
        KeyCode::Char('x') => Some(UiCommand::Disconnect),
        _ => None,
    }
}

fn handle_search_key(state: &mut DashboardState, key: KeyEvent) -> Option<UiCommand> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            state.search_focused = false;
            None
        }
        KeyCode::Backspace => {
            let mut term = state.search_term.clone();
            term.pop();
            Some(UiCommand::Apply(Action::SetSearchTerm(term)))
        }
        KeyCode::Char(c) => Some(UiCommand::Apply(Action::SetSearchTerm(format!(
            "{}{}",
            state.search_term, c
        )))),
        _ => None,
    }
}

fn handle_form_key(state: &mut DashboardState, key: KeyEvent) -> Option<UiCommand> {
    match key.code {
        KeyCode::Esc => Some(UiCommand::Apply(Action::CloseCreateForm)),
        KeyCode::Enter if !state.is_creating => Some(UiCommand::Create(state.form.clone())),
        KeyCode::Tab | KeyCode::Down => {
            state.form.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.form.focus_previous();
            None
        }
        KeyCode::Backspace => {
            state.form.pop_char();
            None
        }
        KeyCode::Char(c) => {
            state.form.push_char(c);
            None
        }
        _ => None,
    }
}

fn handle_details_key(state: &mut DashboardState, key: KeyEvent) -> Option<UiCommand> {
    let id = state.details.clone()?;
    let signable = signable_id(state.details_proposal());
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            Some(UiCommand::Apply(Action::CloseDetails))
        }
        KeyCode::Char('s') => signable.map(UiCommand::Sign),
        KeyCode::Char('d') => Some(UiCommand::Decrypt(id)),
        _ => None,
    }
}

/// Verified proposals take no further signatures.
fn signable_id(proposal: Option<&Proposal>) -> Option<String> {
    proposal.filter(|p| !p.is_verified).map(|p| p.id.clone())
}
