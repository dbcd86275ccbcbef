//! The map surface seam.
//!
//! Rendering belongs to the browser widget; the core only needs to place
//! markers, draw straight line overlays and know which overlays listen for
//! pointer events. [`SceneSurface`] is the retained implementation the server
//! keeps and the page mirrors.

pub mod overlays;
pub mod scene;
pub mod selection;
pub mod session;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::LngLat;

pub use overlays::reconcile_trip_overlays;
pub use scene::{Scene, SceneSurface};
pub use selection::{RouteSelection, SelectionState};
pub use session::MapSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(String);

impl OverlayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerKind::Start => "#22c55e",
            MarkerKind::End => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dashed: bool,
}

/// A straight two-point line overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSpec {
    pub from: LngLat,
    pub to: LngLat,
    pub style: LineStyle,
}

pub trait MapSurface {
    fn place_marker(&mut self, kind: MarkerKind, at: LngLat) -> MarkerId;

    fn remove_marker(&mut self, id: MarkerId);

    /// Adds or replaces the overlay stored under `id`.
    fn add_line(&mut self, id: OverlayId, line: LineSpec);

    /// Removes the overlay and any event subscription attached to it.
    fn remove_line(&mut self, id: &OverlayId);

    fn line(&self, id: &OverlayId) -> Option<&LineSpec>;

    fn line_ids(&self) -> Vec<OverlayId>;

    /// Registers click and hover handling for an overlay. Subscribing twice is
    /// a no-op.
    fn subscribe(&mut self, id: &OverlayId);
}
