//! Dashboard controller
//!
//! This module handles:
//! - Polling the drone and order collections on independent, cancellable loops
//! - Holding the latest snapshot of each collection
//! - Deriving map markers from the snapshot
//! - Turning map clicks into order creation requests

mod controller;
mod order_id;
mod poller;

pub use controller::{DashboardController, DashboardEvent};
