//! Terminal map: markers go to the log, clicks come from stdin

use super::{parse_click, MapClick, MapView};
use dashboard_shared::{Marker, MarkerIcon, Position};
use std::io::{self, BufRead, BufReader};
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Renders each frame as a summary line plus one debug line per marker
#[derive(Debug, Default)]
pub struct TerminalMap {
    frames: u64,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapView for TerminalMap {
    fn render(&mut self, center: Position, markers: &[Marker]) {
        self.frames += 1;

        let drones = markers
            .iter()
            .filter(|m| matches!(m.icon, MarkerIcon::Drone(_)))
            .count();
        info!(
            "[MAP] frame={} center={} drones={} orders={}",
            self.frames,
            center,
            drones,
            markers.len() - drones
        );

        for marker in markers {
            debug!(
                "[MAP]   {} at {} icon={} opacity={:.2}",
                marker.title,
                marker.position,
                marker.icon.asset(),
                marker.opacity
            );
        }
    }
}

/// Read clicks from stdin until it closes or the receiver goes away.
///
/// Reads happen on a detached OS thread: a read blocked on stdin must not keep
/// the runtime alive after shutdown.
pub fn spawn_stdin_clicks(clicks: mpsc::Sender<MapClick>) -> io::Result<thread::JoinHandle<()>> {
    spawn_click_reader(BufReader::new(io::stdin()), clicks)
}

/// Read `lat long` lines from `reader` on a dedicated thread
pub fn spawn_click_reader<R>(
    reader: R,
    clicks: mpsc::Sender<MapClick>,
) -> io::Result<thread::JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("map-clicks".into())
        .spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("[MAP] Failed to read clicks: {}", e);
                        return;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_click(&line) {
                    Some(click) => {
                        if clicks.blocking_send(click).is_err() {
                            return;
                        }
                    }
                    None => warn!("[MAP] Ignoring click {:?}, expected `lat long`", line),
                }
            }
            debug!("[MAP] Click input closed");
        })
}
