//! One full collection pass over players and server state

use crate::config::{AppConfig, IntegrationSettings};
use crate::dispatch::{dispatch_player, dispatch_server};
use crate::error::Result;
use crate::identity::{IdentityCache, MojangLookup};
use crate::parser;
use crate::rcon::RconSession;
use crate::sources::PlayerRecordLoader;
use crate::types::Sample;
use tracing::{debug, warn};

/// Drives one collection pass per scrape.
///
/// Per-player failures degrade to "omit this player from this pass" and a
/// failing RCON command abandons the remainder of the server pass; a scrape
/// itself never fails.
pub struct Collector {
    loader: PlayerRecordLoader,
    identity: IdentityCache,
    session: Option<RconSession>,
    integrations: IntegrationSettings,
}

impl Collector {
    pub fn new(
        loader: PlayerRecordLoader,
        identity: IdentityCache,
        session: Option<RconSession>,
        integrations: IntegrationSettings,
    ) -> Self {
        Self {
            loader,
            identity,
            session,
            integrations,
        }
    }

    /// Wire up the production components from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let loader = PlayerRecordLoader::new(config.world.clone());
        let identity = IdentityCache::new(Box::new(MojangLookup::new()?));
        let session = config.rcon.clone().map(RconSession::with_settings);
        Ok(Self::new(
            loader,
            identity,
            session,
            config.integrations.clone(),
        ))
    }

    /// Clear the display-name cache; driven by the daily scheduler task
    pub fn flush_names(&mut self) {
        self.identity.flush();
    }

    /// Run one full collection pass and return every sample it produced
    pub async fn collect(&mut self) -> Vec<Sample> {
        let mut samples = Vec::new();
        self.collect_players(&mut samples).await;
        self.collect_server(&mut samples).await;
        debug!("collection pass produced {} samples", samples.len());
        samples
    }

    async fn collect_players(&mut self, samples: &mut Vec<Sample>) {
        let players = match self.loader.discover_players() {
            Ok(players) => players,
            Err(e) => {
                warn!("player discovery failed: {}", e);
                return;
            }
        };

        for id in players {
            let record = match self.loader.load(&id) {
                Ok(record) => record,
                Err(e) => {
                    warn!("skipping player {}: {}", id, e);
                    continue;
                }
            };
            let name = match self.identity.resolve(&id).await {
                Ok(name) => name,
                Err(e) => {
                    warn!("skipping player {}: {}", id, e);
                    continue;
                }
            };
            samples.extend(dispatch_player(&name, &record));
        }
    }

    /// Server-wide metrics, collected only when RCON is configured. The
    /// command sequence is strictly sequential over the shared session.
    async fn collect_server(&mut self, samples: &mut Vec<Sample>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if self.integrations.forge {
            match session.command("forge tps").await {
                Ok(response) => {
                    samples.extend(dispatch_server(&parser::parse_tick_report(&response)))
                }
                Err(e) => {
                    warn!("server metrics degraded for this pass: {}", e);
                    return;
                }
            }
            match session.command("forge entity list").await {
                Ok(response) => {
                    samples.extend(dispatch_server(&parser::parse_entity_list(&response)))
                }
                Err(e) => {
                    warn!("server metrics degraded for this pass: {}", e);
                    return;
                }
            }
        }

        if self.integrations.dynmap {
            match session.command("dynmap stats").await {
                Ok(response) => {
                    samples.extend(dispatch_server(&parser::parse_render_stats(&response)))
                }
                Err(e) => {
                    warn!("server metrics degraded for this pass: {}", e);
                    return;
                }
            }
        }

        match session.command("list").await {
            Ok(response) => samples.extend(dispatch_server(&parser::parse_player_list(&response))),
            Err(e) => warn!("server metrics degraded for this pass: {}", e),
        }
    }
}
