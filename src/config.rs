//! Dashboard configuration

use dashboard_shared::{timing, Position};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variables read by [`DashboardConfig::apply_env`]
pub mod env {
    pub const SERVICE_URL: &str = "DASHBOARD_SERVICE_URL";
    pub const ORDER_IDS: &str = "DASHBOARD_ORDER_IDS";
    pub const TRACK_ORDERS: &str = "DASHBOARD_TRACK_ORDERS";
    pub const PROVISION_DRONES: &str = "DASHBOARD_PROVISION_DRONES";
}

/// Errors from reading configuration overrides
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Map center used when nothing else is configured
pub const DEFAULT_CENTER: Position = Position {
    latitude: 53.117046,
    longitude: 23.146447,
};

/// Who assigns the identifier of a newly created order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderIdMode {
    /// The dashboard sends a millisecond timestamp as the id
    ClientGenerated,
    /// The id is left out and the service assigns one
    #[default]
    ServerAssigned,
}

impl FromStr for OrderIdMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" | "client-generated" => Ok(OrderIdMode::ClientGenerated),
            "server" | "server-assigned" => Ok(OrderIdMode::ServerAssigned),
            _ => Err(()),
        }
    }
}

/// Configuration for the dashboard controller
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Fleet service base URL
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Delay after a poll cycle settles before the next one starts
    pub poll_interval: Duration,
    /// Initial map center
    pub center: Position,
    pub order_id_mode: OrderIdMode,
    /// Poll `/orders` alongside `/drones`
    pub track_orders: bool,
    /// Fleet size to request once at startup
    pub provision_drones: Option<u32>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".into(),
            request_timeout: Duration::from_millis(timing::REQUEST_TIMEOUT_MS),
            poll_interval: Duration::from_millis(timing::POLL_INTERVAL_MS),
            center: DEFAULT_CENTER,
            order_id_mode: OrderIdMode::default(),
            track_orders: true,
            provision_drones: None,
        }
    }
}

impl DashboardConfig {
    /// Apply overrides looked up by variable name (see [`env`]).
    /// Unset variables keep their current value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env::SERVICE_URL) {
            self.base_url = url;
        }

        if let Some(value) = lookup(env::ORDER_IDS) {
            self.order_id_mode = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: env::ORDER_IDS,
                value: value.clone(),
                expected: "client or server",
            })?;
        }

        if let Some(value) = lookup(env::TRACK_ORDERS) {
            self.track_orders = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: env::TRACK_ORDERS,
                        value,
                        expected: "true or false",
                    })
                }
            };
        }

        if let Some(value) = lookup(env::PROVISION_DRONES) {
            let count = value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: env::PROVISION_DRONES,
                value: value.clone(),
                expected: "a drone count",
            })?;
            self.provision_drones = (count > 0).then_some(count);
        }

        Ok(())
    }
}
