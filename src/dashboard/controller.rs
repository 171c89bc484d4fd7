//! Dashboard controller with per-collection polling and click handling

use super::order_id::ClientOrderIds;
use super::poller::PollLoop;
use crate::api::{DroneApi, OrderApi};
use crate::config::{DashboardConfig, OrderIdMode};
use crate::map::{MapClick, MapView};
use dashboard_shared::{derive_markers, Drone, Marker, Order, Position};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Collections tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Drones,
    Orders,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Drones => write!(f, "drones"),
            Collection::Orders => write!(f, "orders"),
        }
    }
}

/// Events emitted by the dashboard controller
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// A fetch succeeded and replaced the collection
    SnapshotUpdated { collection: Collection, count: usize },
    /// A fetch failed; the previous snapshot is kept
    FetchFailed { collection: Collection, reason: String },
    /// The service accepted a new order
    OrderSubmitted { location: Position, id: Option<String> },
    /// Order creation failed
    OrderFailed { location: Position, reason: String },
    /// The service accepted a provisioning request
    DronesProvisioned { count: u32 },
    /// Provisioning failed
    ProvisionFailed { count: u32, reason: String },
}

/// Latest state received from the fleet service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub drones: Vec<Drone>,
    pub orders: Vec<Order>,
}

impl Snapshot {
    /// Markers for this snapshot, drones first then orders
    pub fn markers(&self) -> Vec<Marker> {
        derive_markers(&self.drones, &self.orders)
    }

    fn drones_mut(&mut self) -> &mut Vec<Drone> {
        &mut self.drones
    }

    fn orders_mut(&mut self) -> &mut Vec<Order> {
        &mut self.orders
    }
}

/// Owns the snapshot and drives the fleet service
pub struct DashboardController {
    config: DashboardConfig,
    drones: Arc<dyn DroneApi>,
    orders: Arc<dyn OrderApi>,
    state: Arc<RwLock<Snapshot>>,
    order_ids: ClientOrderIds,
    event_tx: mpsc::UnboundedSender<DashboardEvent>,
}

impl DashboardController {
    /// Create a new controller and the receiving end of its event channel
    pub fn new(
        config: DashboardConfig,
        drones: Arc<dyn DroneApi>,
        orders: Arc<dyn OrderApi>,
    ) -> (Self, mpsc::UnboundedReceiver<DashboardEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self {
            config,
            drones,
            orders,
            state: Arc::new(RwLock::new(Snapshot::default())),
            order_ids: ClientOrderIds::new(),
            event_tx,
        };

        (controller, event_rx)
    }

    /// Start polling. Each collection fetches immediately and then keeps
    /// polling until the returned handle is shut down.
    pub fn start(&self) -> DashboardHandle {
        let cancel = CancellationToken::new();
        let mut tasks = Vec::new();

        let drones = self.drones.clone();
        let drone_loop = PollLoop {
            collection: Collection::Drones,
            state: self.state.clone(),
            slot: Snapshot::drones_mut,
            interval: self.config.poll_interval,
            events: self.event_tx.clone(),
            cancel: cancel.clone(),
        };
        tasks.push(tokio::spawn(drone_loop.run(move || {
            let drones = drones.clone();
            async move { drones.fetch_drones().await }
        })));

        if self.config.track_orders {
            let orders = self.orders.clone();
            let order_loop = PollLoop {
                collection: Collection::Orders,
                state: self.state.clone(),
                slot: Snapshot::orders_mut,
                interval: self.config.poll_interval,
                events: self.event_tx.clone(),
                cancel: cancel.clone(),
            };
            tasks.push(tokio::spawn(order_loop.run(move || {
                let orders = orders.clone();
                async move { orders.fetch_orders().await }
            })));
        }

        if let Some(count) = self.config.provision_drones {
            self.provision_drones(count);
        }

        DashboardHandle { cancel, tasks }
    }

    /// Initial map center
    pub fn center(&self) -> Position {
        self.config.center
    }

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    /// Markers for the current snapshot
    pub async fn markers(&self) -> Vec<Marker> {
        self.state.read().await.markers()
    }

    /// Push the current markers to the map
    pub async fn render<M: MapView + ?Sized>(&self, map: &mut M) {
        let markers = self.markers().await;
        map.render(self.config.center, &markers);
    }

    /// Forward a map click to the order service.
    ///
    /// Every click produces exactly one create request. The request runs in the
    /// background and its outcome is only reported through events.
    pub fn handle_click(&self, click: MapClick) {
        let id = match self.config.order_id_mode {
            OrderIdMode::ClientGenerated => Some(self.order_ids.next()),
            OrderIdMode::ServerAssigned => None,
        };
        let location = click.position;
        debug!("[ORDER] Click at {} (id={:?})", location, id);

        let orders = self.orders.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match orders.create_order(location, id.clone()).await {
                Ok(()) => {
                    info!("[ORDER] Created order at {}", location);
                    DashboardEvent::OrderSubmitted { location, id }
                }
                Err(e) => {
                    warn!("[ORDER] Failed to create order at {}: {}", location, e);
                    DashboardEvent::OrderFailed {
                        location,
                        reason: e.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
    }

    /// Ask the service for `count` drones without waiting for the answer
    pub fn provision_drones(&self, count: u32) {
        let drones = self.drones.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match drones.provision_drones(count).await {
                Ok(()) => {
                    info!("[FLEET] Requested {} drones", count);
                    DashboardEvent::DronesProvisioned { count }
                }
                Err(e) => {
                    warn!("[FLEET] Failed to provision {} drones: {}", count, e);
                    DashboardEvent::ProvisionFailed {
                        count,
                        reason: e.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
    }
}

/// Handle to the running poll loops
pub struct DashboardHandle {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardHandle {
    /// Stop all poll loops and wait for them to exit
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for result in futures::future::join_all(self.tasks).await {
            if let Err(e) = result {
                warn!("[POLL] Poll task ended abnormally: {}", e);
            }
        }
        info!("Dashboard stopped");
    }
}
