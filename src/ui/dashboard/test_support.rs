//! Fixtures shared by the dashboard tests.

use super::state::{DashboardState, FheStatus};
use crate::environment::Environment;
use crate::ledger::types::BusinessData;
use crate::proposal::Proposal;
use crate::sandbox::SANDBOX_CONTRACT_ADDRESS;
use crate::wallet::WalletSession;

pub const WALLET: &str = "0xde709f2102306220921060314715629080e2fb77";

pub fn proposal(n: u64, name: &str, verified: bool) -> Proposal {
    Proposal::from_record(
        &format!("multisig-{}", n),
        BusinessData {
            name: name.to_string(),
            description: format!("{} description", name),
            creator: WALLET.to_string(),
            timestamp: 1_700_000_000,
            public_value1: 2,
            public_value2: if verified { 2 } else { 1 },
            is_verified: verified,
            decrypted_value: if verified { 100 } else { 0 },
        },
    )
}

pub fn empty_state() -> DashboardState {
    DashboardState::new(
        Environment::Sandbox,
        SANDBOX_CONTRACT_ADDRESS.to_string(),
        false,
    )
}

pub fn ready_state(proposals: Vec<Proposal>) -> DashboardState {
    let mut state = empty_state();
    state.wallet = WalletSession::connect(WALLET).ok();
    state.fhe_status = FheStatus::Ready;
    state.has_loaded = true;
    state.proposals = proposals;
    state
}
