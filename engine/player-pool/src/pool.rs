use std::sync::Arc;
use tracing::info;

use crate::assemble::{assemble, AssembledPool};
use crate::error::Result;
use crate::regions::RegionTable;
use crate::source::PlayerSource;

/// Explicit cache of the assembled players of one source
///
/// `load` fetches at most once; `refresh` always goes back to the source.
pub struct PlayerPool<S: PlayerSource> {
    source: S,
    regions: RegionTable,
    snapshot: Option<Arc<AssembledPool>>,
}

impl<S: PlayerSource> PlayerPool<S> {
    pub fn new(source: S, regions: RegionTable) -> Self {
        Self { source, regions, snapshot: None }
    }

    /// Cached snapshot, fetching it first if needed
    pub async fn load(&mut self) -> Result<Arc<AssembledPool>> {
        if let Some(snapshot) = &self.snapshot {
            return Ok(Arc::clone(snapshot));
        }
        self.refresh().await
    }

    /// Fetch from the source and replace the cached snapshot
    pub async fn refresh(&mut self) -> Result<Arc<AssembledPool>> {
        let bundle = self.source.fetch().await?;
        let snapshot = Arc::new(assemble(&bundle, &self.regions));
        info!("Player pool refreshed with {} players", snapshot.players.len());
        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Cached snapshot without touching the source
    pub fn snapshot(&self) -> Option<Arc<AssembledPool>> {
        self.snapshot.clone()
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
