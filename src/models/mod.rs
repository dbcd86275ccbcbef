pub mod trip;
pub mod trip_form;

pub use trip::{PendingRoute, TransportMode, Trip};
pub use trip_form::TripForm;
