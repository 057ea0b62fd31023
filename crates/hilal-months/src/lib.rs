//! Islamic month sequencing.
//!
//! [`MonthSequencer`] walks successive new moons and names each lunar month,
//! anchoring only the first one on the Hijri calendar. [`route`] maps entries
//! to and from URL slugs.

pub mod route;
pub mod sequencer;

pub use route::{find_month_by_route, nearest_month, nearest_month_route, to_route_slug};
pub use sequencer::{MonthSequencer, NewMoons, SequencerConfig};
