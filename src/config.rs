use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    ambient::{DEFAULT_AMBIENT_SEED, DEFAULT_FOLLOWER_RADIUS_PX, DEFAULT_SHAPE_COUNT},
    visibility::DEFAULT_VISIBILITY_THRESHOLD,
};

/// Attribute on the mount element carrying the serialised [`PageConfig`].
pub const PAGE_CONFIG_ATTRIBUTE: &str = "data-page-config";

const VISIBILITY_THRESHOLD_BOUNDS: (f64, f64) = (0.05, 1.0);
const AMBIENT_SHAPE_COUNT_BOUNDS: (usize, usize) = (0, 64);
const FOLLOWER_RADIUS_PX_BOUNDS: (f64, f64) = (16.0, 1_024.0);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("page config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PageConfig {
    pub visibility_threshold: f64,
    pub ambient_shape_count: usize,
    pub ambient_seed: u64,
    pub follower_radius_px: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            ambient_shape_count: DEFAULT_SHAPE_COUNT,
            ambient_seed: DEFAULT_AMBIENT_SEED,
            follower_radius_px: DEFAULT_FOLLOWER_RADIUS_PX,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawPageConfig {
    visibility_threshold: Option<f64>,
    ambient_shape_count: Option<usize>,
    ambient_seed: Option<u64>,
    follower_radius_px: Option<f64>,
}

fn within<T: PartialOrd + Copy>(value: Option<T>, default: T, bounds: (T, T), field: &str) -> T {
    match value {
        Some(value) if value >= bounds.0 && value <= bounds.1 => value,
        Some(_) => {
            warn!(field, "page config value out of bounds, using default");
            default
        }
        None => default,
    }
}

impl PageConfig {
    /// Missing fields take defaults; out-of-bounds fields fall back one by one.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let parsed: RawPageConfig = serde_json::from_str(raw)?;
        let defaults = Self::default();

        Ok(Self {
            visibility_threshold: within(
                parsed.visibility_threshold,
                defaults.visibility_threshold,
                VISIBILITY_THRESHOLD_BOUNDS,
                "visibility_threshold",
            ),
            ambient_shape_count: within(
                parsed.ambient_shape_count,
                defaults.ambient_shape_count,
                AMBIENT_SHAPE_COUNT_BOUNDS,
                "ambient_shape_count",
            ),
            ambient_seed: parsed.ambient_seed.unwrap_or(defaults.ambient_seed),
            follower_radius_px: within(
                parsed.follower_radius_px,
                defaults.follower_radius_px,
                FOLLOWER_RADIUS_PX_BOUNDS,
                "follower_radius_px",
            ),
        })
    }

    /// Like [`PageConfig::from_json`], but degrades to defaults on malformed input.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::default();
        };

        Self::from_json(raw).unwrap_or_else(|error| {
            warn!(%error, "ignoring page config");
            Self::default()
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
