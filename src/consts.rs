pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Values shared by the controller, the dashboard and the collaborator
    //! clients, organized by functional area.

    // =============================================================================
    // VIEW CONFIGURATION
    // =============================================================================

    /// Number of proposals shown per page.
    pub const PAGE_SIZE: usize = 5;

    /// Number of operation history entries shown in the sidebar.
    pub const HISTORY_DISPLAY_LIMIT: usize = 5;

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channel carrying controller actions to the UI loop.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // PROPOSAL DEFAULTS
    // =============================================================================

    /// Prefix of generated proposal identifiers, followed by a millisecond timestamp.
    pub const PROPOSAL_ID_PREFIX: &str = "multisig-";

    /// Signature threshold used when the form value is missing or unparseable.
    pub const DEFAULT_REQUIRED_SIGNATURES: u32 = 2;

    /// Value written to the second public field when a proposal is created.
    pub const INITIAL_PUBLIC_VALUE: u32 = 0;

    /// Key/value pair written by a signing transaction.
    pub const SIGNED_KEY: &str = "signed";
    pub const SIGNED_VALUE: u64 = 1;

    // =============================================================================
    // NOTIFICATIONS
    // =============================================================================

    pub mod notifications {
        use std::time::Duration;

        /// How long a success notification stays visible.
        pub const SUCCESS_DISPLAY_MS: u64 = 2_000;

        /// How long an error notification stays visible.
        pub const ERROR_DISPLAY_MS: u64 = 3_000;

        pub fn success_display() -> Duration {
            Duration::from_millis(SUCCESS_DISPLAY_MS)
        }

        pub fn error_display() -> Duration {
            Duration::from_millis(ERROR_DISPLAY_MS)
        }
    }

    // =============================================================================
    // ERROR MARKERS
    // =============================================================================

    /// Substrings the wallet and the contract put in their error messages.
    pub mod error_markers {
        /// Raised by the wallet when the user declines a transaction prompt.
        pub const USER_REJECTED: &str = "user rejected transaction";

        /// Raised by the contract when a record was verified before.
        pub const ALREADY_VERIFIED: &str = "Data already verified";
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        /// Connect timeout for gateway and relayer requests (seconds).
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Overall timeout for a single gateway or relayer request (seconds).
        pub const REQUEST_TIMEOUT_SECS: u64 = 30;

        /// Delay between two transaction status polls (milliseconds).
        pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 1_500;

        /// Number of polls before a transaction is reported as unconfirmed.
        pub const CONFIRMATION_MAX_POLLS: u32 = 120;

        pub fn confirmation_poll_interval() -> Duration {
            Duration::from_millis(CONFIRMATION_POLL_INTERVAL_MS)
        }
    }
}
