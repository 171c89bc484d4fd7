//! Service trait abstraction for the drone and order endpoints

use super::ApiError;
use async_trait::async_trait;
use dashboard_shared::{Drone, Order, Position};

/// Access to the drone collection
#[async_trait]
pub trait DroneApi: Send + Sync {
    /// Fetch the current drone list
    async fn fetch_drones(&self) -> Result<Vec<Drone>, ApiError>;

    /// Ask the service to bring the fleet to `count` drones
    async fn provision_drones(&self, count: u32) -> Result<(), ApiError>;
}

/// Access to the order collection
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Fetch the current order list
    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Create an order at `location`. When `id` is `None` the service assigns one.
    async fn create_order(&self, location: Position, id: Option<String>) -> Result<(), ApiError>;
}
