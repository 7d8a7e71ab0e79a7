use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::freshness::is_stale;
use crate::model::{Coordinate, WeatherSnapshot};
use crate::provider::WeatherProvider;

/// The snapshot currently held, together with the coordinate it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldSnapshot {
    pub coordinate: Coordinate,
    pub snapshot: WeatherSnapshot,
}

/// JSON file holding the last snapshot between runs.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unreadable cache is treated as empty.
    pub fn load(&self) -> Option<HeldSnapshot> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Failed to read snapshot cache: {}", e
                );
                return None;
            }
        };

        match serde_json::from_str::<HeldSnapshot>(&contents) {
            Ok(held) => match held.snapshot.validate() {
                Ok(()) => Some(held),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        "Ignoring invalid snapshot cache: {}", e
                    );
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Ignoring corrupt snapshot cache: {}", e
                );
                None
            }
        }
    }

    pub fn save(&self, held: &HeldSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(held).context("Failed to serialize snapshot")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot cache: {}", self.path.display()))
    }
}

/// Holds at most one snapshot and decides between reuse and refetch.
///
/// A refetch replaces the held snapshot entirely; nothing is merged.
#[derive(Debug)]
pub struct SnapshotStore {
    held: Option<HeldSnapshot>,
    cooldown: Duration,
    cache: Option<SnapshotCache>,
}

impl SnapshotStore {
    pub fn new(cooldown: Duration) -> Self {
        Self { held: None, cooldown, cache: None }
    }

    /// Start from whatever the cache file holds and write every refetch back to it.
    pub fn with_cache(cooldown: Duration, cache: SnapshotCache) -> Self {
        Self { held: cache.load(), cooldown, cache: Some(cache) }
    }

    pub fn held(&self) -> Option<&HeldSnapshot> {
        self.held.as_ref()
    }

    /// True when nothing usable is held for `coordinate` at `utc_now`.
    ///
    /// Staleness is judged on the held snapshot's own local clock, since its
    /// observation time is in the location's time zone.
    pub fn needs_refresh(&self, coordinate: Coordinate, utc_now: DateTime<Utc>) -> bool {
        match &self.held {
            Some(held) if held.coordinate == coordinate => {
                let now = held.snapshot.local_time(utc_now);
                is_stale(&held.snapshot, now, self.cooldown)
            }
            _ => true,
        }
    }

    /// The held snapshot for `coordinate`, fetching a replacement when it is
    /// missing, for another place, or stale.
    pub async fn snapshot_for(
        &mut self,
        provider: &dyn WeatherProvider,
        coordinate: Coordinate,
        utc_now: DateTime<Utc>,
    ) -> Result<&WeatherSnapshot> {
        if self.needs_refresh(coordinate, utc_now) {
            let snapshot = provider.fetch(coordinate).await?;
            self.replace(coordinate, snapshot);
        } else {
            tracing::debug!(%coordinate, "Reusing held snapshot");
        }

        self.held
            .as_ref()
            .map(|held| &held.snapshot)
            .ok_or_else(|| anyhow!("No snapshot held for {coordinate}"))
    }

    pub fn replace(&mut self, coordinate: Coordinate, snapshot: WeatherSnapshot) {
        let held = HeldSnapshot { coordinate, snapshot };
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(&held) {
                tracing::warn!("Failed to persist snapshot: {:#}", e);
            }
        }
        self.held = Some(held);
    }
}
