//! Raw payloads and the sources that produce them

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{PoolError, Result};
use crate::types::deserialize_id;

/// Everything the assembler needs from the outside world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBundle {
    pub market: MarketData,
    pub season: SeasonData,
    pub details: Vec<PlayerDetail>,
}

/// Top-level `{"data": ...}` wrapper used by every payload
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    #[serde(default)]
    pub round_players: Vec<MarketPlayer>,
    #[serde(default)]
    pub teams: Vec<MarketTeam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPlayer {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub pro_player_id: Option<String>,
    #[serde(default)]
    pub summoner_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketTeam {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonData {
    #[serde(default)]
    pub players: Vec<SeasonPlayer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonPlayer {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub pro_player_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_round_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_round_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min_round_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_round_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_round_price: Option<f64>,
}

/// Per-player detail payload (match history and schedule)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    #[serde(default)]
    pub player: DetailPlayer,
    #[serde(default)]
    pub recent_matches: Vec<DetailMatch>,
    #[serde(default)]
    pub games: Vec<DetailGame>,
    #[serde(default)]
    pub upcoming_matches: Vec<DetailUpcoming>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailPlayer {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailMatch {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score: Option<f64>,
    #[serde(default)]
    pub opponent_team: Option<TeamRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailGame {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub match_id: Option<String>,
    #[serde(default)]
    pub win: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailUpcoming {
    #[serde(default)]
    pub opponent_team: Option<TeamRef>,
}

/// Numbers sometimes arrive as strings or nulls; anything unparsable becomes `None`
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// File names inside a cache directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheLayout {
    pub market_file: String,
    pub season_file: String,
    /// Detail files are `<prefix>*.json`
    pub player_file_prefix: String,
}

impl Default for CacheLayout {
    fn default() -> Self {
        Self {
            market_file: "market.json".to_string(),
            season_file: "season.json".to_string(),
            player_file_prefix: "player-".to_string(),
        }
    }
}

/// Anything able to produce a fresh [`RawBundle`]
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn fetch(&self) -> Result<RawBundle>;
}

/// Reads payloads previously captured into a directory
#[derive(Debug, Clone)]
pub struct CacheDirSource {
    dir: PathBuf,
    layout: CacheLayout,
}

impl CacheDirSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_layout(dir, CacheLayout::default())
    }

    pub fn with_layout<P: AsRef<Path>>(dir: P, layout: CacheLayout) -> Self {
        Self { dir: dir.as_ref().to_path_buf(), layout }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_required<T: DeserializeOwned + Default>(&self, file_name: &str) -> Result<T> {
        let path = self.dir.join(file_name);
        if !tokio::fs::try_exists(&path).await? {
            return Err(PoolError::MissingFile(path));
        }
        read_envelope(&path).await
    }

    async fn read_details(&self) -> Result<Vec<PlayerDetail>> {
        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if file_name.starts_with(&self.layout.player_file_prefix) && file_name.ends_with(".json") {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut details = Vec::with_capacity(paths.len());
        for path in paths {
            match read_envelope::<PlayerDetail>(&path).await {
                Ok(detail) => details.push(detail),
                Err(e) => warn!("Failed to load player detail {:?}: {}", path, e),
            }
        }
        Ok(details)
    }
}

async fn read_envelope<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path).await?;
    let envelope: Envelope<T> = serde_json::from_str(&content)?;
    Ok(envelope.data)
}

#[async_trait]
impl PlayerSource for CacheDirSource {
    async fn fetch(&self) -> Result<RawBundle> {
        info!("Loading cached payloads from: {:?}", self.dir);

        let market: MarketData = self.read_required(&self.layout.market_file).await?;
        let season: SeasonData = self.read_required(&self.layout.season_file).await?;
        let details = self.read_details().await?;

        debug!(
            "Market lists {} players and {} teams, season lists {} players",
            market.round_players.len(),
            market.teams.len(),
            season.players.len()
        );
        info!("Loaded {} player detail files", details.len());

        Ok(RawBundle { market, season, details })
    }
}

/// Serves a fixed bundle
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    bundle: RawBundle,
}

impl InMemorySource {
    pub fn new(bundle: RawBundle) -> Self {
        Self { bundle }
    }
}

#[async_trait]
impl PlayerSource for InMemorySource {
    async fn fetch(&self) -> Result<RawBundle> {
        Ok(self.bundle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_json(dir: &Path, name: &str, value: serde_json::Value) {
        fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    fn write_market_and_season(dir: &Path) {
        write_json(
            dir,
            "market.json",
            json!({"data": {
                "roundPlayers": [
                    {"proPlayerId": 1, "summonerName": "Robo", "teamId": 10, "price": 12.5, "role": "top"},
                    {"proPlayerId": "2", "teamId": 11, "price": "8", "role": "mid"}
                ],
                "teams": [{"id": 10, "name": "LOUD"}, {"id": 11, "name": "paiN Gaming"}]
            }}),
        );
        write_json(
            dir,
            "season.json",
            json!({"data": {"players": [{"proPlayerId": 1, "averageRoundScore": 20.5, "maxRoundScore": 41.0}]}}),
        );
    }

    #[tokio::test]
    async fn test_cache_dir_fetch() {
        let dir = tempfile::tempdir().unwrap();
        write_market_and_season(dir.path());
        write_json(
            dir.path(),
            "player-1.json",
            json!({"data": {
                "player": {"id": 1, "name": "Robo"},
                "recentMatches": [{"matchId": 100, "score": 30.0, "opponentTeam": {"name": "paiN Gaming"}}],
                "games": [{"matchId": 100, "win": true}],
                "upcomingMatches": [{"opponentTeam": {"name": "FURIA"}}]
            }}),
        );
        fs::write(dir.path().join("player-broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = CacheDirSource::new(dir.path());
        assert_eq!(source.dir(), dir.path());
        let bundle = source.fetch().await.unwrap();

        assert_eq!(bundle.market.round_players.len(), 2);
        assert_eq!(bundle.market.round_players[0].pro_player_id.as_deref(), Some("1"));
        assert_eq!(bundle.market.round_players[1].price, Some(8.0));
        assert_eq!(bundle.market.teams[1].id.as_deref(), Some("11"));
        assert_eq!(bundle.season.players[0].max_round_score, Some(41.0));
        assert_eq!(bundle.details.len(), 1);
        assert_eq!(bundle.details[0].recent_matches[0].match_id.as_deref(), Some("100"));
        assert_eq!(bundle.details[0].games[0].win, Some(true));
    }

    #[tokio::test]
    async fn test_missing_market_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CacheDirSource::new(dir.path()).fetch().await.unwrap_err();
        assert!(matches!(err, PoolError::MissingFile(path) if path.ends_with("market.json")));
    }

    #[tokio::test]
    async fn test_custom_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_market_and_season(dir.path());
        fs::rename(dir.path().join("market.json"), dir.path().join("m.json")).unwrap();
        write_json(dir.path(), "detail_1.json", json!({"data": {"player": {"id": 1}}}));

        let layout = CacheLayout {
            market_file: "m.json".to_string(),
            season_file: "season.json".to_string(),
            player_file_prefix: "detail_".to_string(),
        };
        let bundle = CacheDirSource::with_layout(dir.path(), layout).fetch().await.unwrap();
        assert_eq!(bundle.market.round_players.len(), 2);
        assert_eq!(bundle.details.len(), 1);
    }

    #[test]
    fn test_lenient_numbers() {
        let player: MarketPlayer =
            serde_json::from_value(json!({"proPlayerId": 3, "price": "abc", "role": "top"})).unwrap();
        assert_eq!(player.price, None);
        let player: MarketPlayer = serde_json::from_value(json!({"price": null})).unwrap();
        assert_eq!(player.price, None);
        assert_eq!(player.pro_player_id, None);
    }
}
