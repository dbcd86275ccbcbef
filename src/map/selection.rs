use tracing::debug;

use crate::geo::LngLat;
use crate::map::{LineSpec, LineStyle, MapSurface, MarkerId, MarkerKind, OverlayId};
use crate::models::trip::{PendingRoute, FALLBACK_COLOR};

pub const PREVIEW_OVERLAY: &str = "preview-route";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    Idle,
    StartChosen { start: LngLat, marker: MarkerId },
}

/// Two-click route picking against a map surface.
///
/// A completed selection leaves its markers and the preview line on the map
/// until the next first click or until [`RouteSelection::reset`].
#[derive(Debug, Clone)]
pub struct RouteSelection {
    state: SelectionState,
    shown: Vec<MarkerId>,
    preview: Option<OverlayId>,
}

impl Default for RouteSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSelection {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            shown: Vec::new(),
            preview: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn awaiting_destination(&self) -> bool {
        matches!(self.state, SelectionState::StartChosen { .. })
    }

    /// Feeds one map click. Returns the pending route when the click completes
    /// a selection.
    pub fn click<S>(&mut self, surface: &mut S, at: LngLat) -> Option<PendingRoute>
    where
        S: MapSurface + ?Sized,
    {
        match self.state {
            SelectionState::Idle => {
                self.clear_leftovers(surface);
                let marker = surface.place_marker(MarkerKind::Start, at);
                self.shown.push(marker);
                self.state = SelectionState::StartChosen { start: at, marker };
                debug!(lng = at.lng(), lat = at.lat(), "route start chosen");
                None
            }
            SelectionState::StartChosen { start, .. } => {
                let marker = surface.place_marker(MarkerKind::End, at);
                self.shown.push(marker);

                let preview = OverlayId::new(PREVIEW_OVERLAY);
                surface.add_line(preview.clone(), preview_line(start, at));
                self.preview = Some(preview);

                self.state = SelectionState::Idle;
                debug!(lng = at.lng(), lat = at.lat(), "route end chosen");
                Some(PendingRoute::new(start, at))
            }
        }
    }

    /// The "trip saved" signal: wipes markers and preview and returns to idle
    /// whatever the current state.
    pub fn reset<S>(&mut self, surface: &mut S)
    where
        S: MapSurface + ?Sized,
    {
        self.clear_leftovers(surface);
        self.state = SelectionState::Idle;
    }

    fn clear_leftovers<S>(&mut self, surface: &mut S)
    where
        S: MapSurface + ?Sized,
    {
        for marker in self.shown.drain(..) {
            surface.remove_marker(marker);
        }
        if let Some(preview) = self.preview.take() {
            surface.remove_line(&preview);
        }
    }
}

fn preview_line(from: LngLat, to: LngLat) -> LineSpec {
    LineSpec {
        from,
        to,
        style: LineStyle {
            color: FALLBACK_COLOR.to_string(),
            width: 3.0,
            dashed: true,
        },
    }
}
