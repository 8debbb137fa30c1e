//! Headless mode execution
//!
//! Runs a single dashboard operation without a terminal UI. The controller
//! reports through the same actions the dashboard consumes; here they are
//! applied to a [`DashboardState`] and echoed to the console.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting},
};
use crate::cli_messages::print_notification;
use crate::controller::action::Action;
use crate::controller::error::ActionError;
use crate::controller::form::CreateForm;
use crate::controller::{DashboardController, DecryptOutcome};
use crate::proposal::Proposal;
use crate::ui::dashboard::DashboardState;
use crate::ui::dashboard::view::{ListView, stats};
use crate::wallet::WalletSession;
use std::error::Error;
use std::time::Instant;
use tokio::sync::mpsc;

/// A one-shot operation run against the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    List {
        search: Option<String>,
        page: usize,
        json: bool,
    },
    Create(CreateForm),
    Sign {
        id: String,
    },
    Decrypt {
        id: String,
    },
    Status,
}

impl HeadlessCommand {
    fn needs_wallet(&self) -> bool {
        !matches!(self, HeadlessCommand::Status)
    }

    fn needs_fhe(&self) -> bool {
        matches!(self, HeadlessCommand::Create(_) | HeadlessCommand::Decrypt { .. })
    }

    /// JSON output must stay machine-readable.
    fn quiet(&self) -> bool {
        matches!(self, HeadlessCommand::List { json: true, .. })
    }
}

/// Runs the application in headless mode
///
/// # Returns
/// * `Ok(())` - The operation succeeded
/// * `Err` - The operation failed; its notification has been printed
pub async fn run_headless_mode(
    session: SessionData,
    command: HeadlessCommand,
) -> Result<(), Box<dyn Error>> {
    let quiet = command.quiet();
    if !quiet {
        print_session_starting(
            "headless",
            session.environment,
            session.wallet_address.as_deref(),
        );
    }

    let SessionData {
        controller,
        mut action_receiver,
        environment,
        wallet_address,
    } = session;

    let mut state = DashboardState::new(environment, controller.contract_address(), false);
    let wallet = match wallet_address
        .as_deref()
        .map(|address| controller.connect_wallet(address))
    {
        Some(Ok(wallet)) => Some(wallet),
        Some(Err(e)) => return Err(e.to_string().into()),
        None if command.needs_wallet() => {
            return Err(Box::from(
                "No wallet connected. Run `fhe-multisig connect --wallet-address <ADDRESS>` first.",
            ));
        }
        None => None,
    };
    if let Some(wallet) = &wallet {
        state.apply(Action::WalletConnected(wallet.clone()), Instant::now());
    }

    let connection = wallet.as_ref().map(WalletSession::connection);
    if let (HeadlessCommand::List { .. }, Some(connection)) = (&command, connection) {
        let generation = controller.next_generation();
        state.apply(
            Action::RefreshStarted {
                connection,
                generation,
            },
            Instant::now(),
        );
        spawn_and_report(&mut state, &mut action_receiver, quiet, async move {
            controller.load_data(wallet.as_ref(), generation).await
        })
        .await?;
    } else {
        let op = command.clone();
        spawn_and_report(&mut state, &mut action_receiver, quiet, async move {
            execute(&controller, wallet.as_ref(), op).await
        })
        .await?;
    }

    if let HeadlessCommand::List { search, page, json } = &command {
        let term = search.as_deref().unwrap_or_default();
        print_list(&state.proposals, term, *page, *json)?;
    }
    if !quiet {
        print_session_exit_success();
    }
    Ok(())
}

async fn execute(
    controller: &DashboardController,
    wallet: Option<&WalletSession>,
    command: HeadlessCommand,
) -> Result<(), ActionError> {
    if command.needs_fhe() {
        let session = wallet.ok_or(ActionError::NotConnected)?;
        controller.initialize_fhe(session).await?;
    }
    match command {
        HeadlessCommand::List { .. } => Ok(()),
        HeadlessCommand::Create(form) => controller.create_multisig(wallet, &form).await.map(|_| ()),
        HeadlessCommand::Sign { id } => controller.sign_multisig(wallet, &id).await,
        HeadlessCommand::Decrypt { id } => match controller.decrypt_data(wallet, &id).await {
            DecryptOutcome::Failed(error) => Err(error),
            DecryptOutcome::Decrypted(_) | DecryptOutcome::AlreadyVerified { .. } => Ok(()),
        },
        HeadlessCommand::Status => controller.check_availability().await.map(|_| ()),
    }
}

/// Runs `op` on its own task, applying and echoing every action until it
/// completes and the channel is drained.
async fn spawn_and_report<F>(
    state: &mut DashboardState,
    receiver: &mut mpsc::Receiver<Action>,
    quiet: bool,
    op: F,
) -> Result<(), Box<dyn Error>>
where
    F: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    let mut handle = tokio::spawn(op);
    let result = loop {
        tokio::select! {
            Some(action) = receiver.recv() => report(state, action, quiet),
            joined = &mut handle => break joined,
        }
    };
    while let Ok(action) = receiver.try_recv() {
        report(state, action, quiet);
    }

    // Errors reach the console through `main`, which prints their debug form.
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(error.to_string().into()),
        Err(join_error) => Err(join_error.to_string().into()),
    }
}

fn report(state: &mut DashboardState, action: Action, quiet: bool) {
    if !quiet {
        match &action {
            Action::Log(event) if event.should_display() => println!("{}", event),
            Action::Notify(notification) => print_notification(notification),
            _ => {}
        }
    }
    state.apply(action, Instant::now());
}

fn print_list(
    proposals: &[Proposal],
    term: &str,
    page: usize,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let view = ListView::new(proposals, term, page);
    if json {
        let output = serde_json::json!({
            "proposals": view.visible(),
            "stats": stats(proposals),
            "page": view.page,
            "totalPages": view.total_pages,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if view.filtered.is_empty() {
        println!("No multi-signature proposals found");
        return Ok(());
    }
    for line in list_lines(&view) {
        println!("{}", line);
    }
    let totals = stats(proposals);
    println!(
        "Total: {}  Pending: {}  Completed: {}  Waiting: {}",
        totals.total, totals.pending, totals.completed, totals.waiting
    );
    Ok(())
}

fn list_lines(view: &ListView<'_>) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<28} {:<24} {:>10} {:<9} {}",
        "ID", "NAME", "SIGNATURES", "STATUS", "CREATED"
    )];
    lines.extend(view.visible().iter().map(|p| {
        let created = p
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        format!(
            "{:<28} {:<24} {:>10} {:<9} {}",
            p.id,
            p.name,
            format!("{}/{}", p.current_signatures, p.required_signatures),
            p.status_label(),
            created
        )
    }));
    if view.total_pages > 1 {
        lines.push(format!("Page {} of {}", view.page, view.total_pages));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::environment::Environment;
    use crate::ledger::types::BusinessData;
    use crate::sandbox::SANDBOX_CONTRACT_ADDRESS;
    use crate::session::setup_session;

    const WALLET: &str = "0xde709f2102306220921060314715629080e2fb77";

    fn proposal(n: usize) -> Proposal {
        Proposal::from_record(
            &format!("multisig-{}", n),
            BusinessData {
                name: format!("Payout {}", n),
                creator: WALLET.to_string(),
                public_value1: 2,
                public_value2: 1,
                ..BusinessData::default()
            },
        )
    }

    fn sandbox_session(wallet: Option<&str>) -> SessionData {
        let config = wallet.map(|w| Config::new(w.to_string())).unwrap_or_default();
        setup_session(&config, Environment::Sandbox, None).unwrap()
    }

    #[test]
    fn list_lines_show_pager_only_when_needed() {
        let proposals: Vec<Proposal> = (1..=7).map(proposal).collect();
        let lines = list_lines(&ListView::new(&proposals, "", 2));
        assert_eq!(lines.len(), 1 + 2 + 1);
        assert!(lines[1].starts_with("multisig-6"));
        assert!(lines[1].contains("1/2"));
        assert_eq!(lines[3], "Page 2 of 2");

        let lines = list_lines(&ListView::new(&proposals[..1], "", 1));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn only_writes_need_encryption() {
        assert!(HeadlessCommand::Create(CreateForm::default()).needs_fhe());
        assert!(!HeadlessCommand::Sign { id: "x".into() }.needs_fhe());
        assert!(!HeadlessCommand::Status.needs_wallet());
    }

    #[tokio::test]
    async fn status_needs_no_wallet() {
        let result = run_headless_mode(sandbox_session(None), HeadlessCommand::Status).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_requires_a_wallet() {
        let command = HeadlessCommand::List {
            search: None,
            page: 1,
            json: true,
        };
        assert!(run_headless_mode(sandbox_session(None), command).await.is_err());
    }

    #[tokio::test]
    async fn create_in_sandbox_succeeds() {
        let form = CreateForm {
            name: "Team budget".to_string(),
            amount: "250".to_string(),
            ..CreateForm::default()
        };
        let result =
            run_headless_mode(sandbox_session(Some(WALLET)), HeadlessCommand::Create(form)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn signing_an_unknown_proposal_fails() {
        let command = HeadlessCommand::Sign {
            id: "multisig-404".to_string(),
        };
        let err = run_headless_mode(sandbox_session(Some(WALLET)), command)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Signing failed");
    }

    #[tokio::test]
    async fn list_fails_when_the_ledger_cannot_be_read() {
        let config = Config {
            contract_address: Some(SANDBOX_CONTRACT_ADDRESS.to_string()),
            gateway_url: Some("http://127.0.0.1:9".to_string()),
            ..Config::new(WALLET.to_string())
        };
        let session = setup_session(&config, Environment::Local, None).unwrap();
        let command = HeadlessCommand::List {
            search: None,
            page: 1,
            json: true,
        };
        let err = run_headless_mode(session, command).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to load data"));
    }
}
