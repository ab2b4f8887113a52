//! Map capability surface
//!
//! The rendering widget itself lives outside this crate; the orchestrator
//! only sees this handle. Camera commands queue behind a readiness signal
//! resolved once by the widget side, and user clicks flow back as a stream
//! of coordinates.

use crate::models::Coordinates;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// One camera movement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    pub target: Coordinates,
    pub zoom: f64,
}

impl CameraMove {
    pub fn new(target: Coordinates, zoom: f64) -> Self {
        Self { target, zoom }
    }
}

/// Create a connected map surface: the orchestrator keeps the handle and the
/// click stream, the widget glue keeps the driver.
pub fn channel() -> (MapHandle, MapEvents, MapDriver) {
    let (ready_tx, ready_rx) = watch::channel(false);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (click_tx, click_rx) = mpsc::unbounded_channel();

    (
        MapHandle {
            ready: ready_rx,
            commands: command_tx,
        },
        MapEvents { clicks: click_rx },
        MapDriver {
            ready: ready_tx,
            commands: command_rx,
            clicks: click_tx,
        },
    )
}

/// Orchestrator-side handle: pan/fly commands gated on widget readiness
#[derive(Debug, Clone)]
pub struct MapHandle {
    ready: watch::Receiver<bool>,
    commands: mpsc::UnboundedSender<CameraMove>,
}

impl MapHandle {
    /// Fly the camera to a location. Waits for the widget to finish
    /// initializing; a command issued against a dropped widget is discarded.
    pub async fn fly_to(&self, movement: CameraMove) {
        let mut ready = self.ready.clone();
        if ready.wait_for(|initialized| *initialized).await.is_err() {
            debug!("Map surface gone before readiness, dropping camera command");
            return;
        }

        if self.commands.send(movement).is_err() {
            debug!("Map surface gone, dropping camera command");
        }
    }
}

/// Orchestrator-side stream of click-reported coordinates
#[derive(Debug)]
pub struct MapEvents {
    clicks: mpsc::UnboundedReceiver<Coordinates>,
}

impl MapEvents {
    /// Next user click on the map; `None` once the widget side is gone
    pub async fn next_click(&mut self) -> Option<Coordinates> {
        self.clicks.recv().await
    }
}

/// Widget-side driver: resolves readiness, drains camera commands and
/// reports clicks
#[derive(Debug)]
pub struct MapDriver {
    ready: watch::Sender<bool>,
    commands: mpsc::UnboundedReceiver<CameraMove>,
    clicks: mpsc::UnboundedSender<Coordinates>,
}

impl MapDriver {
    /// Signal that the widget finished initializing; queued camera commands
    /// are released
    pub fn mark_ready(&self) {
        let _ = self.ready.send(true);
    }

    /// Next camera command to execute; `None` once the orchestrator is gone
    pub async fn next_command(&mut self) -> Option<CameraMove> {
        self.commands.recv().await
    }

    /// Non-blocking variant of [`Self::next_command`]
    pub fn try_next_command(&mut self) -> Option<CameraMove> {
        self.commands.try_recv().ok()
    }

    /// Report a user click at the given coordinates
    pub fn report_click(&self, coords: Coordinates) {
        if self.clicks.send(coords).is_err() {
            debug!("Orchestrator gone, dropping map click");
        }
    }
}
