//! Binary player state source (gzip-compressed named-tag tree)

use crate::error::{ExporterError, Result, SourceKind};
use nbt::{Blob, Value};
use std::fs::File;
use std::path::Path;

/// The five numeric fields extracted from a player's `.dat` file
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub xp_total: i64,
    pub xp_level: i64,
    pub score: i64,
    pub health: f64,
    pub food_level: i64,
}

/// Read the persisted player state for one player
pub fn read_playerdata(path: &Path, player: &str) -> Result<PlayerState> {
    let mut file = File::open(path).map_err(|e| ExporterError::SourceRead {
        source_kind: SourceKind::PlayerData,
        player: player.to_string(),
        message: e.to_string(),
    })?;
    let blob = Blob::from_gzip_reader(&mut file).map_err(|e| ExporterError::SourceFormat {
        source_kind: SourceKind::PlayerData,
        player: player.to_string(),
        message: e.to_string(),
    })?;

    Ok(PlayerState {
        xp_total: int_field(&blob, "XpTotal", player)?,
        xp_level: int_field(&blob, "XpLevel", player)?,
        score: int_field(&blob, "Score", player)?,
        health: float_field(&blob, "Health", player)?,
        food_level: int_field(&blob, "foodLevel", player)?,
    })
}

fn format_error(player: &str, message: String) -> ExporterError {
    ExporterError::SourceFormat {
        source_kind: SourceKind::PlayerData,
        player: player.to_string(),
        message,
    }
}

fn int_field(blob: &Blob, name: &'static str, player: &str) -> Result<i64> {
    match blob.get(name) {
        Some(Value::Byte(v)) => Ok(i64::from(*v)),
        Some(Value::Short(v)) => Ok(i64::from(*v)),
        Some(Value::Int(v)) => Ok(i64::from(*v)),
        Some(Value::Long(v)) => Ok(*v),
        Some(other) => Err(format_error(
            player,
            format!("field {} has non-integer tag {}", name, other.tag_name()),
        )
        .into()),
        None => Err(format_error(player, format!("missing field {}", name)).into()),
    }
}

fn float_field(blob: &Blob, name: &'static str, player: &str) -> Result<f64> {
    match blob.get(name) {
        Some(Value::Float(v)) => Ok(f64::from(*v)),
        Some(Value::Double(v)) => Ok(*v),
        // Older saves persisted Health as a short
        Some(Value::Byte(v)) => Ok(f64::from(*v)),
        Some(Value::Short(v)) => Ok(f64::from(*v)),
        Some(Value::Int(v)) => Ok(f64::from(*v)),
        Some(other) => Err(format_error(
            player,
            format!("field {} has non-numeric tag {}", name, other.tag_name()),
        )
        .into()),
        None => Err(format_error(player, format!("missing field {}", name)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_player_dat(path: &Path, health: f32) {
        let mut blob = Blob::new();
        blob.insert("XpTotal", Value::Int(1395)).unwrap();
        blob.insert("XpLevel", Value::Int(30)).unwrap();
        blob.insert("Score", Value::Int(1395)).unwrap();
        blob.insert("Health", Value::Float(health)).unwrap();
        blob.insert("foodLevel", Value::Int(20)).unwrap();
        let mut file = File::create(path).unwrap();
        blob.to_gzip_writer(&mut file).unwrap();
    }

    #[test]
    fn test_read_playerdata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.dat");
        write_player_dat(&path, 19.5);

        let state = read_playerdata(&path, "p").unwrap();
        assert_eq!(state.xp_total, 1395);
        assert_eq!(state.xp_level, 30);
        assert_eq!(state.score, 1395);
        assert!((state.health - 19.5).abs() < f64::EPSILON);
        assert_eq!(state.food_level, 20);
    }

    #[test]
    fn test_missing_field_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.dat");
        let mut blob = Blob::new();
        blob.insert("XpTotal", Value::Int(0)).unwrap();
        let mut file = File::create(&path).unwrap();
        blob.to_gzip_writer(&mut file).unwrap();

        let err = read_playerdata(&path, "p").unwrap_err();
        assert!(err.to_string().contains("XpLevel"));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = read_playerdata(Path::new("/nonexistent/p.dat"), "p").unwrap_err();
        assert!(err.to_string().contains("read playerdata"));
    }
}
