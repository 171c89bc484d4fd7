//! Scripted fleet service for driving the dashboard in tests

use super::{ApiError, DroneApi, OrderApi};
use async_trait::async_trait;
use dashboard_shared::{Drone, Order, Position};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Answers fetches from a script. Once a script runs dry the fetch never
/// completes, so the last snapshot stays put.
#[derive(Default)]
pub struct FakeService {
    drones: Mutex<VecDeque<Result<Vec<Drone>, ApiError>>>,
    orders: Mutex<VecDeque<Result<Vec<Order>, ApiError>>>,
    latency: Duration,
    fail_writes: bool,
    pub drone_fetches: Mutex<Vec<Instant>>,
    pub order_fetches: Mutex<Vec<Instant>>,
    pub created: Mutex<Vec<(Position, Option<String>)>>,
    pub provisioned: Mutex<Vec<u32>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drones(self, script: Vec<Result<Vec<Drone>, ApiError>>) -> Self {
        *self.drones.lock().unwrap() = script.into();
        self
    }

    pub fn with_orders(self, script: Vec<Result<Vec<Order>, ApiError>>) -> Self {
        *self.orders.lock().unwrap() = script.into();
        self
    }

    /// Delay every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Reject every write with a 500
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn drone_fetch_count(&self) -> usize {
        self.drone_fetches.lock().unwrap().len()
    }

    pub fn order_fetch_count(&self) -> usize {
        self.order_fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl DroneApi for FakeService {
    async fn fetch_drones(&self) -> Result<Vec<Drone>, ApiError> {
        self.drone_fetches.lock().unwrap().push(Instant::now());
        tokio::time::sleep(self.latency).await;

        let next = self.drones.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn provision_drones(&self, count: u32) -> Result<(), ApiError> {
        self.provisioned.lock().unwrap().push(count);
        if self.fail_writes {
            return Err(ApiError::Status(500));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderApi for FakeService {
    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.order_fetches.lock().unwrap().push(Instant::now());
        tokio::time::sleep(self.latency).await;

        let next = self.orders.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn create_order(&self, location: Position, id: Option<String>) -> Result<(), ApiError> {
        self.created.lock().unwrap().push((location, id));
        if self.fail_writes {
            return Err(ApiError::Status(500));
        }
        Ok(())
    }
}
