//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod footer;
pub mod header;
pub mod history;
pub mod info_panel;
pub mod logs;
pub mod modals;
pub mod notification;
pub mod proposals;
pub mod screens;
pub mod stats;
