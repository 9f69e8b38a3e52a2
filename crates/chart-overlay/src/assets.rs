// File: crates/chart-overlay/src/assets.rs
// Summary: Per-instance image cache with a deferred load queue; loads resolve between render passes.
// Notes:
// - `image()` never blocks: an unknown source is queued and reported as not ready.
// - `poll()` is the completion turn. A completion whose source was not referenced
//   by the latest render pass belongs to a slot that no longer exists and is dropped.

use base64::Engine as _;
use skia_safe as skia;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{OverlayError, Result};

/// Fetches raw encoded image bytes for a source reference.
pub trait AssetLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>>;
}

/// Loads filesystem paths (relative ones against an optional root) and base64 `data:` URIs.
#[derive(Clone, Debug, Default)]
pub struct FileLoader {
    root: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let p = Path::new(source);
        match &self.root {
            Some(root) if p.is_relative() => root.join(p),
            _ => p.to_path_buf(),
        }
    }
}

impl AssetLoader for FileLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>> {
        if source.starts_with("data:") {
            return decode_data_uri(source);
        }
        let path = self.resolve(source);
        std::fs::read(&path).map_err(|e| OverlayError::asset_load(source, e))
    }
}

/// Decode `data:[<mime>][;base64],<payload>`; only base64 payloads carry binary images.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| OverlayError::asset_load(short(uri), "not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| OverlayError::asset_load(short(uri), "missing ',' in data URI"))?;
    if !header.ends_with(";base64") {
        return Err(OverlayError::asset_load(short(uri), "only base64 data URIs are supported"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| OverlayError::asset_load(short(uri), e))
}

/// Decode encoded bytes (PNG, JPEG, ...) into a Skia image.
pub fn decode_image(source: &str, bytes: &[u8]) -> Result<skia::Image> {
    skia::Image::from_encoded(skia::Data::new_copy(bytes))
        .ok_or_else(|| OverlayError::Decode(short(source)))
}

// data URIs can be huge; keep log lines and errors readable
fn short(source: &str) -> String {
    const MAX: usize = 64;
    match source.char_indices().nth(MAX) {
        Some((i, _)) => format!("{}…", &source[..i]),
        None => source.to_string(),
    }
}

enum AssetState {
    Pending,
    Ready(skia::Image),
    Failed,
}

pub struct AssetStore {
    loader: Box<dyn AssetLoader>,
    entries: HashMap<String, AssetState>,
    queue: VecDeque<String>,
    referenced: HashSet<String>,
}

impl AssetStore {
    pub fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
            queue: VecDeque::new(),
            referenced: HashSet::new(),
        }
    }

    /// Start a render pass: forget which sources the previous pass referenced.
    pub fn begin_pass(&mut self) {
        self.referenced.clear();
    }

    /// Image for `source` if it has resolved; queues a load the first time it is seen.
    pub fn image(&mut self, source: &str) -> Option<skia::Image> {
        self.referenced.insert(source.to_string());
        match self.entries.get(source) {
            Some(AssetState::Ready(img)) => Some(img.clone()),
            Some(AssetState::Pending) | Some(AssetState::Failed) => None,
            None => {
                debug!(source = %short(source), "queueing image load");
                self.entries.insert(source.to_string(), AssetState::Pending);
                self.queue.push_back(source.to_string());
                None
            }
        }
    }

    pub fn is_ready(&self, source: &str) -> bool {
        matches!(self.entries.get(source), Some(AssetState::Ready(_)))
    }

    pub fn is_failed(&self, source: &str) -> bool {
        matches!(self.entries.get(source), Some(AssetState::Failed))
    }

    /// Number of loads waiting for the next [`AssetStore::poll`].
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Resolve every queued load. Returns how many images became ready for a
    /// source the latest pass still references (each warrants a redraw).
    pub fn poll(&mut self) -> usize {
        let mut ready = 0;
        while let Some(source) = self.queue.pop_front() {
            if !self.referenced.contains(&source) {
                debug!(source = %short(&source), "dropping load for a slot that is gone");
                self.entries.remove(&source);
                continue;
            }
            let state = match self.load_now(&source) {
                Ok(img) => {
                    ready += 1;
                    AssetState::Ready(img)
                }
                Err(e) => {
                    warn!("annotation image skipped: {e}");
                    AssetState::Failed
                }
            };
            self.entries.insert(source, state);
        }
        ready
    }

    pub fn loader(&self) -> &dyn AssetLoader {
        self.loader.as_ref()
    }

    /// Load and decode immediately, bypassing the cache.
    pub fn load_now(&self, source: &str) -> Result<skia::Image> {
        let bytes = self.loader.load(source)?;
        decode_image(source, &bytes)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
        self.referenced.clear();
    }
}
