//! Brand and creator campaign collaboration client.
//!
//! The backend owns all campaign data. This crate validates requests against
//! explicit state machines, sends them, and refreshes its local copy from
//! the backend afterwards.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod paths;
pub mod presentation;
pub mod session;
pub mod structured_logger;
pub mod workflow;
