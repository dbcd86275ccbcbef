use crate::geo::LngLat;
use crate::map::{reconcile_trip_overlays, RouteSelection, Scene, SceneSurface};
use crate::models::trip::{PendingRoute, Trip};

/// Everything the single map instance of the app holds between requests.
#[derive(Debug, Default)]
pub struct MapSession {
    surface: SceneSurface,
    selection: RouteSelection,
    pending: Option<PendingRoute>,
}

impl MapSession {
    pub fn new(trips: &[Trip]) -> Self {
        let mut session = Self::default();
        reconcile_trip_overlays(&mut session.surface, trips);
        session
    }

    pub fn click(&mut self, at: LngLat) -> Option<PendingRoute> {
        if let Some(route) = self.selection.click(&mut self.surface, at) {
            self.pending = Some(route);
        }
        self.pending
    }

    pub fn pending(&self) -> Option<PendingRoute> {
        self.pending
    }

    pub fn awaiting_destination(&self) -> bool {
        self.selection.awaiting_destination()
    }

    /// Drops markers, preview and the pending route.
    pub fn cancel(&mut self) {
        self.selection.reset(&mut self.surface);
        self.pending = None;
    }

    /// The trip-saved signal followed by an overlay refresh.
    pub fn trip_saved(&mut self, trips: &[Trip]) {
        self.cancel();
        self.sync_trips(trips);
    }

    pub fn sync_trips(&mut self, trips: &[Trip]) {
        reconcile_trip_overlays(&mut self.surface, trips);
    }

    pub fn surface(&self) -> &SceneSurface {
        &self.surface
    }

    pub fn scene(&self) -> Scene {
        self.surface.snapshot(self.awaiting_destination())
    }
}
