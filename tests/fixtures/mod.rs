//! Shared test fixtures: an on-disk world builder plus stub identity and
//! RCON implementations

use async_trait::async_trait;
use nbt::{Blob, Value};
use quarry_exporter::error::{ExporterError, Result};
use quarry_exporter::identity::{NameLookup, NameRecord};
use quarry_exporter::rcon::{Connector, Transport};
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Name lookup answering from a fixed canonical-id -> name table
pub struct StaticLookup {
    names: HashMap<String, String>,
}

impl StaticLookup {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            names: pairs
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl NameLookup for StaticLookup {
    async fn history(&self, canonical_id: &str) -> Result<Vec<NameRecord>> {
        match self.names.get(canonical_id) {
            Some(name) => Ok(vec![NameRecord {
                name: name.clone(),
                changed_to_at: None,
            }]),
            None => Err(ExporterError::Resolution {
                player: canonical_id.to_string(),
                message: "unknown profile".to_string(),
            }
            .into()),
        }
    }
}

/// Connector serving canned responses per command text
pub struct ScriptedConnector {
    responses: Arc<HashMap<String, String>>,
}

impl ScriptedConnector {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            responses: Arc::new(
                pairs
                    .iter()
                    .map(|(cmd, resp)| (cmd.to_string(), resp.to_string()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self) -> Result<Box<dyn Transport>> {
        Ok(Box::new(ScriptedTransport {
            responses: self.responses.clone(),
        }))
    }
}

struct ScriptedTransport {
    responses: Arc<HashMap<String, String>>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn exec(&mut self, command: &str) -> Result<String> {
        Ok(self.responses.get(command).cloned().unwrap_or_default())
    }
}

/// Connector whose connection attempts always fail
pub struct FailingConnector;

#[async_trait]
impl Connector for FailingConnector {
    async fn connect(&self) -> Result<Box<dyn Transport>> {
        Err(ExporterError::Connection {
            message: "connection refused".to_string(),
        }
        .into())
    }
}

/// Write a complete set of per-player sources under the given world root
pub fn write_player(root: &Path, id: &str, jumps: u64) {
    fs::create_dir_all(root.join("stats")).unwrap();
    fs::create_dir_all(root.join("playerdata")).unwrap();
    fs::create_dir_all(root.join("advancements")).unwrap();

    fs::write(
        root.join("stats").join(format!("{id}.json")),
        format!(r#"{{"stats":{{"minecraft:custom":{{"minecraft:jump":{jumps}}}}}}}"#),
    )
    .unwrap();

    let mut blob = Blob::new();
    blob.insert("XpTotal", Value::Int(100)).unwrap();
    blob.insert("XpLevel", Value::Int(7)).unwrap();
    blob.insert("Score", Value::Int(100)).unwrap();
    blob.insert("Health", Value::Float(20.0)).unwrap();
    blob.insert("foodLevel", Value::Int(20)).unwrap();
    let mut file = File::create(root.join("playerdata").join(format!("{id}.dat"))).unwrap();
    blob.to_gzip_writer(&mut file).unwrap();

    fs::write(
        root.join("advancements").join(format!("{id}.json")),
        r#"{"minecraft:story/mine_stone":{"done":true},"DataVersion":3465}"#,
    )
    .unwrap();
}
