//! Display-name cache backed by a remote lookup
//!
//! Entries persist across collection passes until the scheduled daily flush
//! clears the whole map. The cache itself is passive and owns no timer.

use crate::error::{ExporterError, Result};
use crate::types::DisplayName;
use crate::utils::canonicalize_identifier;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// One historical name assignment returned by the profile service
#[derive(Debug, Clone, Deserialize)]
pub struct NameRecord {
    pub name: String,
    /// Milliseconds since epoch of the change; absent for the original name
    #[serde(rename = "changedToAt")]
    pub changed_to_at: Option<i64>,
}

/// Remote lookup of the historical name list for a canonicalized identifier
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn history(&self, canonical_id: &str) -> Result<Vec<NameRecord>>;
}

/// Cache of identifier -> most recently observed display name
pub struct IdentityCache {
    lookup: Box<dyn NameLookup>,
    names: HashMap<String, DisplayName>,
}

impl IdentityCache {
    pub fn new(lookup: Box<dyn NameLookup>) -> Self {
        Self {
            lookup,
            names: HashMap::new(),
        }
    }

    /// Resolve an identifier to its current display name.
    ///
    /// A hit returns the stored value with no network access. A miss
    /// canonicalizes the identifier, fetches the name history, and keeps the
    /// name of the most recent entry.
    pub async fn resolve(&mut self, id: &str) -> Result<DisplayName> {
        let canonical = canonicalize_identifier(id);
        if let Some(name) = self.names.get(&canonical) {
            return Ok(name.clone());
        }

        debug!("resolving display name for {}", canonical);
        let history = self
            .lookup
            .history(&canonical)
            .await
            .map_err(|e| ExporterError::Resolution {
                player: id.to_string(),
                message: e.to_string(),
            })?;
        let latest = history.last().ok_or_else(|| ExporterError::Resolution {
            player: id.to_string(),
            message: "empty name history".to_string(),
        })?;

        self.names.insert(canonical, latest.name.clone());
        Ok(latest.name.clone())
    }

    /// Clear all entries unconditionally
    pub fn flush(&mut self) {
        info!("flushing player name cache");
        self.names.clear();
    }

    /// Number of cached names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
