//! # Asset State
//!
//! Loads the label font and watermark on first use and keeps them for the
//! rest of the process.
//!
//! A failed load is not cached: the next request tries again, so fixing a
//! path in a running session recovers without a restart.

use std::path::PathBuf;
use std::sync::OnceLock;

use etiquetas_render::{LabelAssets, RenderResult};
use tracing::debug;

use crate::config::AppConfig;

/// Lazily loaded label assets.
#[derive(Debug)]
pub struct AssetState {
    font_path: PathBuf,
    watermark_path: PathBuf,
    assets: OnceLock<LabelAssets>,
}

impl AssetState {
    /// Creates an empty state; nothing is read until [`AssetState::get`].
    pub fn new(config: &AppConfig) -> Self {
        AssetState {
            font_path: config.font_path.clone(),
            watermark_path: config.watermark_path.clone(),
            assets: OnceLock::new(),
        }
    }

    /// Creates a state with assets already in place.
    pub fn preloaded(assets: LabelAssets) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(assets);
        AssetState {
            font_path: PathBuf::new(),
            watermark_path: PathBuf::new(),
            assets: cell,
        }
    }

    /// Returns the assets, loading them on the first call.
    pub fn get(&self) -> RenderResult<&LabelAssets> {
        if let Some(assets) = self.assets.get() {
            return Ok(assets);
        }

        debug!(font = %self.font_path.display(), "Loading label assets");
        let loaded = LabelAssets::load(&self.font_path, &self.watermark_path)?;

        // a concurrent loader may have won; either copy is equivalent
        Ok(self.assets.get_or_init(|| loaded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etiquetas_render::RenderError;

    #[test]
    fn test_missing_assets_error_and_stay_unloaded() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            font_path: dir.path().join("missing.ttf"),
            watermark_path: dir.path().join("missing.jpg"),
            ..AppConfig::default()
        };

        let state = AssetState::new(&config);
        assert!(state.assets.get().is_none());
        assert!(matches!(state.get(), Err(RenderError::AssetLoad { .. })));
        assert!(state.assets.get().is_none());
    }
}
