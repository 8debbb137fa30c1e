//! State transitions of the dashboard.
//!
//! Controller tasks report what happened as `Action`s over a channel; the UI
//! loop (or a headless command) applies them to its
//! [`DashboardState`](crate::ui::dashboard::DashboardState) in arrival order.

use crate::events::Event;
use crate::notification::Notification;
use crate::proposal::Proposal;
use crate::wallet::WalletSession;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A wallet session became available.
    WalletConnected(WalletSession),
    /// The wallet session ended; all proposal state is discarded and every
    /// refresh up to `stale_through` is ignored when it completes.
    WalletDisconnected { stale_through: u64 },

    /// Encryption initialization started; guards against re-entry.
    FheInitStarted,
    /// Encryption initialization finished, with the failure reason if any.
    ///
    /// This and the refresh actions carry the wallet connection they were
    /// issued under and are dropped unless it is still the current one.
    FheInitFinished {
        connection: u64,
        result: Result<(), String>,
    },

    /// A refresh with the given generation was issued.
    RefreshStarted { connection: u64, generation: u64 },
    /// A refresh finished; `None` when the enumeration failed.
    ProposalsLoaded {
        connection: u64,
        generation: u64,
        proposals: Option<Vec<Proposal>>,
    },

    /// A creation transaction is being prepared.
    CreationStarted,
    /// The creation attempt ended. A success closes and resets the form.
    CreationFinished { succeeded: bool },

    /// Replaces the notification slot.
    Notify(Notification),
    /// Appends an entry to the operation history.
    RecordHistory(String),
    /// Appends an entry to the activity log.
    Log(Event),

    OpenCreateForm,
    CloseCreateForm,
    SetSearchTerm(String),
    NextPage,
    PreviousPage,
    /// Moves the highlighted row within the visible page.
    MoveCursor(isize),
    ShowDetails(String),
    CloseDetails,
}
