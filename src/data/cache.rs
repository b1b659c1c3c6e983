//! Local price-series caching
//!
//! Caches daily price history locally to reduce API calls and enable
//! offline reruns over the same history.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use super::PriceSeriesSource;
use crate::core::{HedgeError, HedgeResult, PricePoint};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_hours: 24,
            enabled: true,
        }
    }
}

/// Price-series cache manager
pub struct PriceCache {
    config: CacheConfig,
}

impl PriceCache {
    pub fn new(config: CacheConfig) -> HedgeResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn cache_key(&self, ticker: &str) -> PathBuf {
        self.config.cache_dir.join(format!("{}_dailies.json", ticker))
    }

    /// Check if the cached series is present and not expired.
    pub fn is_valid(&self, ticker: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_key(ticker);
        if !path.exists() {
            return false;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let modified: DateTime<Utc> = modified.into();
                let age = Utc::now() - modified;
                return age < Duration::hours(self.config.max_age_hours);
            }
        }

        false
    }

    /// Save a price series to cache.
    pub fn save(&self, ticker: &str, series: &[PricePoint]) -> HedgeResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_key(ticker);
        let json = serde_json::to_string_pretty(series)
            .map_err(|e| HedgeError::parse(e.to_string()))?;

        fs::write(&path, json)?;

        tracing::info!("Cached {} daily prices for {} at {:?}", series.len(), ticker, path);
        Ok(())
    }

    /// Load a price series from cache, if present and fresh.
    pub fn load(&self, ticker: &str) -> HedgeResult<Option<Vec<PricePoint>>> {
        if !self.config.enabled || !self.is_valid(ticker) {
            return Ok(None);
        }

        let path = self.cache_key(ticker);
        let json = fs::read_to_string(&path)?;

        let series: Vec<PricePoint> = serde_json::from_str(&json)
            .map_err(|e| HedgeError::parse(format!("cache file {:?}: {}", path, e)))?;

        tracing::info!("Loaded {} cached daily prices for {}", series.len(), ticker);
        Ok(Some(series))
    }

    /// Clear the cached series for a ticker.
    pub fn clear(&self, ticker: &str) -> HedgeResult<()> {
        let path = self.cache_key(ticker);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Cached price source - combines the cache with live fetching.
pub struct CachedPriceSource<S> {
    cache: PriceCache,
    source: S,
}

impl<S: PriceSeriesSource> CachedPriceSource<S> {
    pub fn new(config: CacheConfig, source: S) -> HedgeResult<Self> {
        Ok(Self {
            cache: PriceCache::new(config)?,
            source,
        })
    }

    /// Force refresh (bypass cache).
    pub fn refresh(&self, ticker: &str) -> HedgeResult<Vec<PricePoint>> {
        self.cache.clear(ticker)?;
        self.daily_prices(ticker)
    }
}

impl<S: PriceSeriesSource> PriceSeriesSource for CachedPriceSource<S> {
    fn daily_prices(&self, ticker: &str) -> HedgeResult<Vec<PricePoint>> {
        if let Some(series) = self.cache.load(ticker)? {
            return Ok(series);
        }

        tracing::info!("Fetching fresh daily prices for {}", ticker);
        let series = self.source.daily_prices(ticker)?;

        if !series.is_empty() {
            self.cache.save(ticker, &series)?;
        }

        Ok(series)
    }
}
