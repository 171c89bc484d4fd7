//! Drone Dashboard Shared Types
//!
//! This crate provides the wire model, body codec and marker derivation shared
//! by the dashboard client and its tests. Nothing in here performs I/O.

pub mod codec;
pub mod marker;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub use marker::{derive_markers, DroneIcon, Marker, MarkerIcon, OrderIcon};

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Timing and lifecycle parameters agreed with the fleet service
pub mod timing {
    /// Delay between the end of one poll cycle and the start of the next
    pub const POLL_INTERVAL_MS: u64 = 1000;

    /// Every request to the fleet service fails after this long
    pub const REQUEST_TIMEOUT_MS: u64 = 500;

    /// Age at which the service retires a drone
    pub const DRONE_RETIREMENT_AGE: f64 = 10.0;
}

/// A point on the map, `{"lat": .., "long": ..}` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Opaque identifier echoed by the service.
///
/// The service has sent both strings and integers over time, so both are
/// accepted and normalized to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntityId(s),
            RawId::Signed(n) => EntityId(n.to_string()),
            RawId::Unsigned(n) => EntityId(n.to_string()),
            RawId::Float(n) => EntityId(n.to_string()),
        })
    }
}

/// A drone as reported by the fleet service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub id: EntityId,
    /// Older service builds named this field `loc`
    #[serde(alias = "loc")]
    pub current: Position,
    #[serde(default)]
    pub age: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Position>,
}

impl Drone {
    /// Create an idle drone at the given position
    pub fn new(id: impl Into<String>, current: Position, age: f64) -> Self {
        Self {
            id: EntityId::new(id),
            current,
            age,
            order_id: None,
            target: None,
        }
    }

    /// Whether the service considers this drone past its service life
    pub fn is_retired(&self) -> bool {
        self.age >= timing::DRONE_RETIREMENT_AGE
    }
}

/// A delivery order as reported by the fleet service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub loc: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<EntityId>,
}

impl Order {
    /// Create an unclaimed order
    pub fn new(id: impl Into<String>, loc: Position) -> Self {
        Self {
            id: EntityId::new(id),
            loc,
            drone_id: None,
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.drone_id.is_some()
    }
}

/// Body of `POST /drones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    pub number: u32,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub loc: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl CreateOrderRequest {
    /// Order whose id is assigned by the service
    pub fn server_assigned(loc: Position) -> Self {
        Self { loc, id: None }
    }

    /// Order carrying an id generated on this side
    pub fn with_id(loc: Position, id: impl Into<String>) -> Self {
        Self {
            loc,
            id: Some(id.into()),
        }
    }
}
