//! Player Pool - the input side of the lineup engines
//!
//! Holds the player record types, the static team-to-region table, and the
//! data sources that feed the scoring engine. Sources are injected into a
//! [`PlayerPool`], which owns the only cached snapshot.

pub mod assemble;
pub mod error;
pub mod pool;
pub mod regions;
pub mod source;
pub mod types;

pub use assemble::{assemble, AssembledPool, SkippedPlayer};
pub use error::{PoolError, Result};
pub use pool::PlayerPool;
pub use regions::{RegionRule, RegionTable};
pub use source::{CacheDirSource, CacheLayout, InMemorySource, PlayerSource, RawBundle};
pub use types::{
    normalize_odds, normalize_price, GameResult, PlayerRecord, RecentMatch, Role, SeasonStats,
    UpcomingMatch, DEFAULT_TEAM_ODDS,
};
