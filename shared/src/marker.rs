//! Marker Derivation
//!
//! Turns a snapshot of drones and orders into the markers the map renders.
//! The icon of each marker encodes where the entity is in its lifecycle.

use crate::{timing, Drone, Order, Position};

/// Visual state of a drone, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DroneIcon {
    /// Past its service life
    Retired,
    /// Carrying out an order
    Fulfilling,
    /// Heading to a target without a committed order
    MovingUnassigned,
    /// Waiting for work
    Idle,
}

impl DroneIcon {
    /// Select the icon for a drone. The first matching rule wins.
    pub fn for_drone(drone: &Drone) -> Self {
        if drone.is_retired() {
            DroneIcon::Retired
        } else if drone.order_id.is_some() {
            DroneIcon::Fulfilling
        } else if drone.target.is_some() {
            DroneIcon::MovingUnassigned
        } else {
            DroneIcon::Idle
        }
    }

    pub fn asset(&self) -> &'static str {
        match self {
            DroneIcon::Retired => "drone-retired.png",
            DroneIcon::Fulfilling => "drone-flying-red.png",
            DroneIcon::MovingUnassigned => "drone-flying-green.png",
            DroneIcon::Idle => "drone-idle.png",
        }
    }
}

/// Visual state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderIcon {
    /// A drone has been assigned
    Claimed,
    /// Still waiting for a drone
    Unclaimed,
}

impl OrderIcon {
    pub fn for_order(order: &Order) -> Self {
        if order.is_claimed() {
            OrderIcon::Claimed
        } else {
            OrderIcon::Unclaimed
        }
    }

    pub fn asset(&self) -> &'static str {
        match self {
            OrderIcon::Claimed => "order-claimed.png",
            OrderIcon::Unclaimed => "order-unclaimed.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Drone(DroneIcon),
    Order(OrderIcon),
}

impl MarkerIcon {
    pub fn asset(&self) -> &'static str {
        match self {
            MarkerIcon::Drone(icon) => icon.asset(),
            MarkerIcon::Order(icon) => icon.asset(),
        }
    }
}

/// A renderable point on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Position,
    pub title: String,
    pub icon: MarkerIcon,
    pub opacity: f64,
}

/// Opacity of a drone marker.
///
/// `(10 - age) / 10` below the retirement age, `1` from then on. A freshly
/// spawned drone therefore starts near full opacity and fades as it ages.
pub fn drone_opacity(age: f64) -> f64 {
    if age < timing::DRONE_RETIREMENT_AGE {
        (timing::DRONE_RETIREMENT_AGE - age) / timing::DRONE_RETIREMENT_AGE
    } else {
        1.0
    }
}

pub fn drone_marker(drone: &Drone) -> Marker {
    Marker {
        position: drone.current,
        title: drone.id.to_string(),
        icon: MarkerIcon::Drone(DroneIcon::for_drone(drone)),
        opacity: drone_opacity(drone.age),
    }
}

pub fn order_marker(order: &Order) -> Marker {
    Marker {
        position: order.loc,
        title: order.id.to_string(),
        icon: MarkerIcon::Order(OrderIcon::for_order(order)),
        opacity: 1.0,
    }
}

/// Derive the full marker list: drones first, then orders, each in the order
/// the service returned them.
pub fn derive_markers(drones: &[Drone], orders: &[Order]) -> Vec<Marker> {
    drones
        .iter()
        .map(drone_marker)
        .chain(orders.iter().map(order_marker))
        .collect()
}
