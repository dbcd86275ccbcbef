use serde::Serialize;

use crate::models::trip::{TransportMode, Trip};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeDistance {
    pub mode: TransportMode,
    pub label: String,
    pub color: &'static str,
    pub distance_km: f64,
    /// Bar length relative to the mode with the largest distance, 0..=100.
    pub share_of_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_distance_km: f64,
    pub trip_count: usize,
    /// Known modes in fixed order; modes with no distance are left out.
    pub by_mode: Vec<ModeDistance>,
}

impl TripSummary {
    pub fn total_rounded(&self) -> i64 {
        self.total_distance_km.round() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }
}

impl ModeDistance {
    pub fn rounded(&self) -> i64 {
        self.distance_km.round() as i64
    }
}

/// Recomputed from scratch on each call.
pub fn summarize(trips: &[Trip]) -> TripSummary {
    let total_distance_km = trips.iter().map(|trip| trip.distance).sum();

    let sums: Vec<(TransportMode, f64)> = TransportMode::ALL
        .into_iter()
        .map(|mode| {
            let km = trips
                .iter()
                .filter(|trip| trip.mode == mode)
                .map(|trip| trip.distance)
                .sum::<f64>();
            (mode, km)
        })
        .filter(|(_, km)| *km > 0.0)
        .collect();

    let max = sums.iter().map(|(_, km)| *km).fold(0.0_f64, f64::max);
    let by_mode = sums
        .into_iter()
        .map(|(mode, km)| ModeDistance {
            label: mode.label().to_string(),
            color: mode.color(),
            distance_km: km,
            share_of_max: if max > 0.0 { km / max * 100.0 } else { 0.0 },
            mode,
        })
        .collect();

    TripSummary {
        total_distance_km,
        trip_count: trips.len(),
        by_mode,
    }
}
