// File: crates/chart-overlay/src/config.rs
// Summary: Per-instance overlay configuration (annotations + export defaults), loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::annotation::{Annotation, SlotAnnotation};
use crate::error::Result;
use crate::export::ExportSettings;
use crate::types::SlotKey;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub annotations: Vec<SlotAnnotation>,
    pub export: ExportSettings,
    /// Base directory for relative image paths (annotations and export backgrounds).
    pub asset_root: Option<PathBuf>,
}

impl OverlayConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file. A relative `asset_root` is taken relative to the file's directory;
    /// without one, the file's directory itself is used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&text)?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.asset_root = Some(match config.asset_root.take() {
            Some(root) if root.is_relative() => base.join(root),
            Some(root) => root,
            None => base,
        });
        debug!(path = %path.display(), annotations = config.annotations.len(), "loaded overlay config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add (or replace) the annotation for `slot`.
    pub fn annotate(&mut self, slot: SlotKey, annotation: Annotation) -> &mut Self {
        self.annotations.retain(|a| a.slot() != slot);
        self.annotations.push(SlotAnnotation::new(slot, annotation));
        self
    }

    pub fn annotation(&self, slot: SlotKey) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.slot() == slot).map(|a| &a.annotation)
    }
}
