//! Player identity resolution
//!
//! This module maps opaque player identifiers to display names via a remote
//! profile service, with a process-lifetime cache that an external scheduler
//! flushes once per day.

pub mod cache;
pub mod mojang;

pub use cache::{IdentityCache, NameLookup, NameRecord};
pub use mojang::MojangLookup;
