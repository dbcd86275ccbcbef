use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::{haversine_km, LngLat};

pub const FALLBACK_COLOR: &str = "#64748b";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportMode {
    Car,
    Walk,
    Bike,
    Bus,
    Train,
    Plane,
    /// Anything else found in persisted or imported data. Kept verbatim.
    Unrecognized(String),
}

impl TransportMode {
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Car,
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Plane,
    ];

    /// Parses one of the six known modes; unknown text yields `None`.
    pub fn parse_known(value: &str) -> Option<Self> {
        match value {
            "car" => Some(TransportMode::Car),
            "walk" => Some(TransportMode::Walk),
            "bike" => Some(TransportMode::Bike),
            "bus" => Some(TransportMode::Bus),
            "train" => Some(TransportMode::Train),
            "plane" => Some(TransportMode::Plane),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Plane => "plane",
            TransportMode::Unrecognized(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TransportMode::Unrecognized(_))
    }

    pub fn label(&self) -> &str {
        match self {
            TransportMode::Car => "Car",
            TransportMode::Walk => "Walk",
            TransportMode::Bike => "Bike",
            TransportMode::Bus => "Bus",
            TransportMode::Train => "Train",
            TransportMode::Plane => "Plane",
            TransportMode::Unrecognized(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TransportMode::Car => "🚗",
            TransportMode::Walk => "🚶",
            TransportMode::Bike => "🚴",
            TransportMode::Bus => "🚌",
            TransportMode::Train => "🚆",
            TransportMode::Plane => "✈️",
            TransportMode::Unrecognized(_) => "❔",
        }
    }

    /// Overlay colour on the map and in the analytics bars.
    pub fn color(&self) -> &'static str {
        match self {
            TransportMode::Car => "#ef4444",
            TransportMode::Walk => "#22c55e",
            TransportMode::Bike => "#f97316",
            TransportMode::Bus => "#eab308",
            TransportMode::Train => "#8b5cf6",
            TransportMode::Plane => "#3b82f6",
            TransportMode::Unrecognized(_) => FALLBACK_COLOR,
        }
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Unrecognized(String::new())
    }
}

impl From<String> for TransportMode {
    fn from(value: String) -> Self {
        TransportMode::parse_known(&value).unwrap_or(TransportMode::Unrecognized(value))
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Start and end of a route picked on the map but not yet logged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRoute {
    pub start_coords: LngLat,
    pub end_coords: LngLat,
}

impl PendingRoute {
    pub fn new(start_coords: LngLat, end_coords: LngLat) -> Self {
        Self {
            start_coords,
            end_coords,
        }
    }

    pub fn distance_km(&self) -> f64 {
        haversine_km(self.start_coords, self.end_coords)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default)]
    pub id: String,
    pub start_coords: LngLat,
    pub end_coords: LngLat,
    #[serde(default)]
    pub mode: TransportMode,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
    /// Kilometers, computed once from the coordinates when the trip is created.
    #[serde(default)]
    pub distance: f64,
}

impl Trip {
    pub fn new(
        route: PendingRoute,
        mode: TransportMode,
        date: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_coords: route.start_coords,
            end_coords: route.end_coords,
            mode,
            date: date.into(),
            notes: notes.into(),
            distance: route.distance_km(),
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}
