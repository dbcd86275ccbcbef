use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::geo::LngLat;
use crate::map::{LineSpec, MapSurface, MarkerId, MarkerKind, OverlayId};

#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    next_marker: u64,
    markers: BTreeMap<MarkerId, (MarkerKind, LngLat)>,
    lines: BTreeMap<OverlayId, LineSpec>,
    subscribed: BTreeSet<OverlayId>,
    registrations: u64,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerKind, LngLat)> + '_ {
        self.markers.values().copied()
    }

    pub fn is_subscribed(&self, id: &OverlayId) -> bool {
        self.subscribed.contains(id)
    }

    /// How many handler registrations have happened over the surface lifetime.
    pub fn registrations(&self) -> u64 {
        self.registrations
    }

    pub fn snapshot(&self, awaiting_destination: bool) -> Scene {
        Scene {
            markers: self
                .markers
                .iter()
                .map(|(id, (kind, at))| MarkerView {
                    id: *id,
                    kind: *kind,
                    color: kind.color(),
                    at: *at,
                })
                .collect(),
            lines: self
                .lines
                .iter()
                .map(|(id, spec)| LineView {
                    id: id.clone(),
                    coordinates: [spec.from, spec.to],
                    color: spec.style.color.clone(),
                    width: spec.style.width,
                    dashed: spec.style.dashed,
                    interactive: self.subscribed.contains(id),
                })
                .collect(),
            awaiting_destination,
        }
    }
}

impl MapSurface for SceneSurface {
    fn place_marker(&mut self, kind: MarkerKind, at: LngLat) -> MarkerId {
        self.next_marker += 1;
        let id = MarkerId(self.next_marker);
        self.markers.insert(id, (kind, at));
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn add_line(&mut self, id: OverlayId, line: LineSpec) {
        self.lines.insert(id, line);
    }

    fn remove_line(&mut self, id: &OverlayId) {
        self.lines.remove(id);
        self.subscribed.remove(id);
    }

    fn line(&self, id: &OverlayId) -> Option<&LineSpec> {
        self.lines.get(id)
    }

    fn line_ids(&self) -> Vec<OverlayId> {
        self.lines.keys().cloned().collect()
    }

    fn subscribe(&mut self, id: &OverlayId) {
        if self.lines.contains_key(id) && self.subscribed.insert(id.clone()) {
            self.registrations += 1;
        }
    }
}

/// What the browser widget needs to redraw the map.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub markers: Vec<MarkerView>,
    pub lines: Vec<LineView>,
    pub awaiting_destination: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    pub id: MarkerId,
    pub kind: MarkerKind,
    pub color: &'static str,
    pub at: LngLat,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    pub id: OverlayId,
    pub coordinates: [LngLat; 2],
    pub color: String,
    pub width: f64,
    pub dashed: bool,
    pub interactive: bool,
}
