mod api;
mod config;
mod dashboard;
mod map;

use api::HttpServiceClient;
use config::DashboardConfig;
use dashboard::{DashboardController, DashboardEvent};
use map::TerminalMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut config = DashboardConfig::default();
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(base_url) = std::env::args().nth(1) {
        config.base_url = base_url;
    }

    let client = Arc::new(HttpServiceClient::new(
        &config.base_url,
        config.request_timeout,
    )?);

    info!("Drone dashboard starting");
    info!("  Fleet service: {}", client.base_url());
    info!("  Order ids: {:?}", config.order_id_mode);
    info!("  Track orders: {}", config.track_orders);
    if let Some(count) = config.provision_drones {
        info!("  Provisioning: {} drones", count);
    }

    let (controller, mut events) = DashboardController::new(config, client.clone(), client);
    info!("  Map center: {}", controller.center());
    let handle = controller.start();

    let mut map = TerminalMap::new();
    let (click_tx, mut click_rx) = mpsc::channel(32);
    // Reader thread is detached and never joined
    let _clicks = map::spawn_stdin_clicks(click_tx)?;
    controller.render(&mut map).await;
    info!("Type `lat long` and press enter to place an order");

    // Main event loop
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(DashboardEvent::SnapshotUpdated { collection, count }) => {
                    debug!("Received {} {}", count, collection);
                    controller.render(&mut map).await;
                }
                Some(DashboardEvent::FetchFailed { collection, reason }) => {
                    debug!("Keeping last {} snapshot: {}", collection, reason);
                }
                Some(DashboardEvent::OrderSubmitted { location, id }) => {
                    debug!("Order at {} accepted (id={:?})", location, id);
                }
                Some(DashboardEvent::OrderFailed { location, reason }) => {
                    warn!("Order at {} was not placed: {}", location, reason);
                }
                Some(DashboardEvent::DronesProvisioned { count }) => {
                    debug!("Provisioning of {} drones accepted", count);
                }
                Some(DashboardEvent::ProvisionFailed { count, reason }) => {
                    warn!("Provisioning of {} drones failed: {}", count, reason);
                }
                None => break,
            },
            Some(click) = click_rx.recv() => {
                controller.handle_click(click);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    handle.shutdown().await;

    let snapshot = controller.snapshot().await;
    info!(
        "Last snapshot: {} drones, {} orders",
        snapshot.drones.len(),
        snapshot.orders.len()
    );

    Ok(())
}
