//! Conversion of player records and server records into labeled samples
//!
//! The category-to-metric mapping lives in static lookup tables so the
//! transform is data-driven and testable in isolation.

pub mod families;
pub mod player;
pub mod server;

pub use families::{family, FamilySpec, FAMILIES};
pub use player::dispatch_player;
pub use server::dispatch_server;
