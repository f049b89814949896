//! Hosts-table build pass.
//!
//! Runs once per proxy start, before any resolution traffic. The pass
//! combines an optional mirror source (with a freshness policy and a local
//! cache fallback) with the mandatory override file, then parses the joined
//! text into a [`HostsTable`].
//!
//! Source selection is a two-level fallback: the freshness decision picks
//! which source to try first, and each plan falls back to the other source,
//! so the pass only comes up empty-handed when both are unavailable.

use crate::config::{
    ConfigStore, MirrorInterval, LAST_MIRROR_LOAD_KEY, MIRROR_INTERVAL_KEY, MIRROR_KEY,
};
use crate::error::{HostsError, Result};
use crate::files::{FileStore, MIRROR_CACHE_FILE, OVERRIDE_FILE};
use crate::mirror::MirrorFetcher;
use crate::table::HostsTable;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Source of the current time, in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// [`Clock`] reading the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// The collaborators a build pass needs.
pub struct BuildEnv<'a> {
    /// Settings store holding the mirror URL, interval token, and timestamp.
    pub config: &'a mut dyn ConfigStore,

    /// Access to the override and cache files.
    pub files: &'a dyn FileStore,

    /// Mirror transport.
    pub fetcher: &'a dyn MirrorFetcher,

    /// Time source for the freshness decision.
    pub clock: &'a dyn Clock,
}

/// Which source a pass tries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshPlan {
    /// Mirror content is still fresh: use the cache, fetch only on a miss.
    CacheFirst,
    /// Mirror content is stale (or caching is disabled): fetch, fall back
    /// to the cache on failure.
    NetworkFirst,
}

/// Freshness decision.
///
/// The comparison is signed: a zero interval can never satisfy
/// `age < interval` for a non-negative age, so it always selects
/// `NetworkFirst`.
fn refresh_plan(age_millis: i64, interval_millis: i64) -> RefreshPlan {
    if age_millis < interval_millis {
        RefreshPlan::CacheFirst
    } else {
        RefreshPlan::NetworkFirst
    }
}

/// Builds the hosts table.
///
/// Returns `Ok(None)` when the resulting table is empty (the caller must not
/// register an interceptor) and `Err` only when the mandatory override file
/// cannot be read. Mirror and cache failures are recoverable and fall back
/// to the other source.
pub async fn build(env: &mut BuildEnv<'_>) -> Result<Option<HostsTable>> {
    let mut raw = String::new();

    if let Some(mirror) = env.config.get(MIRROR_KEY) {
        let mirror = mirror.trim();
        if !mirror.is_empty() {
            if let Some(content) = mirror_content(env, mirror).await {
                raw.push_str(&content);
                raw.push('\n');
            }
        }
    }

    match env.files.read_text(OVERRIDE_FILE) {
        Ok(contents) => raw.push_str(&contents),
        Err(source) => {
            return Err(HostsError::OverrideFile {
                name: OVERRIDE_FILE.to_string(),
                source,
            })
        }
    }

    let table = HostsTable::parse(&raw);
    if table.is_empty() {
        warn!("Hosts table is empty");
        return Ok(None);
    }

    Ok(Some(table))
}

/// Loads mirror content by whichever plan the freshness decision selects.
async fn mirror_content(env: &mut BuildEnv<'_>, mirror: &str) -> Option<String> {
    let interval =
        MirrorInterval::from_token(env.config.get(MIRROR_INTERVAL_KEY).as_deref()).as_millis();
    let age = env.clock.now_millis() - env.config.get_i64(LAST_MIRROR_LOAD_KEY, 0);
    let caching = interval != 0;

    match refresh_plan(age, interval) {
        RefreshPlan::CacheFirst => match load_cache(env.files) {
            Some(cached) => Some(cached),
            None => load_network(env, mirror, caching).await,
        },
        RefreshPlan::NetworkFirst => match load_network(env, mirror, caching).await {
            Some(fetched) => Some(fetched),
            None => load_cache(env.files),
        },
    }
}

/// Fetches the mirror over the network.
///
/// On success with caching enabled, persists the refresh timestamp and the
/// cache file; both writes are best-effort and never invalidate the fetched
/// content. On failure, returns `None` so the caller can fall back.
async fn load_network(env: &mut BuildEnv<'_>, mirror: &str, caching: bool) -> Option<String> {
    info!("Loading hosts from mirror");

    match env.fetcher.fetch(mirror).await {
        Ok(body) => {
            if caching {
                let now = env.clock.now_millis();
                env.config.set_i64(LAST_MIRROR_LOAD_KEY, now);
                if let Err(e) = env.config.save() {
                    warn!(error = %e, "Failed to persist mirror refresh timestamp");
                }
                if let Err(e) = env.files.write_text(MIRROR_CACHE_FILE, &body) {
                    warn!(error = %e, "Failed to write mirror cache file");
                }
            }
            Some(body)
        }
        Err(e) => {
            warn!(error = %e, "Failed to load hosts from mirror");
            None
        }
    }
}

/// Reads the most recently cached mirror content.
fn load_cache(files: &dyn FileStore) -> Option<String> {
    info!("Loading mirrored hosts from cache");

    match files.read_text(MIRROR_CACHE_FILE) {
        Ok(cached) => Some(cached),
        Err(e) => {
            warn!(error = %e, "Failed to read mirror cache file");
            None
        }
    }
}
