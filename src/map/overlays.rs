use std::collections::BTreeMap;

use tracing::debug;

use crate::map::{LineSpec, LineStyle, MapSurface, OverlayId};
use crate::models::trip::Trip;

pub const TRIP_OVERLAY_PREFIX: &str = "route-";

pub fn trip_overlay_id(trip_id: &str) -> OverlayId {
    OverlayId::new(format!("{TRIP_OVERLAY_PREFIX}{trip_id}"))
}

/// Extracts the trip id from a trip overlay id.
pub fn trip_id_of(overlay: &OverlayId) -> Option<&str> {
    overlay.as_str().strip_prefix(TRIP_OVERLAY_PREFIX)
}

pub fn trip_line(trip: &Trip) -> LineSpec {
    LineSpec {
        from: trip.start_coords,
        to: trip.end_coords,
        style: LineStyle {
            color: trip.mode.color().to_string(),
            width: 4.0,
            dashed: false,
        },
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: usize,
    pub replaced: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// Brings the trip overlays on `surface` in line with `trips`.
///
/// Overlays not owned by trips (the route preview) are never touched. When
/// two trips share an id the later one wins.
pub fn reconcile_trip_overlays<S>(surface: &mut S, trips: &[Trip]) -> ReconcileReport
where
    S: MapSurface + ?Sized,
{
    let desired: BTreeMap<OverlayId, LineSpec> = trips
        .iter()
        .map(|trip| (trip_overlay_id(&trip.id), trip_line(trip)))
        .collect();

    let mut report = ReconcileReport::default();

    for existing in surface.line_ids() {
        if trip_id_of(&existing).is_some() && !desired.contains_key(&existing) {
            surface.remove_line(&existing);
            report.removed += 1;
        }
    }

    for (id, spec) in desired {
        let same = surface.line(&id).map(|current| *current == spec);
        match same {
            Some(true) => {
                report.unchanged += 1;
            }
            Some(false) => {
                surface.remove_line(&id);
                surface.add_line(id.clone(), spec);
                surface.subscribe(&id);
                report.replaced += 1;
            }
            None => {
                surface.add_line(id.clone(), spec);
                surface.subscribe(&id);
                report.added += 1;
            }
        }
    }

    debug!(
        added = report.added,
        replaced = report.replaced,
        removed = report.removed,
        unchanged = report.unchanged,
        "trip overlays reconciled"
    );
    report
}
