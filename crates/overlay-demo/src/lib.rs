// File: crates/overlay-demo/src/lib.rs
// Summary: Demo host library; a small Skia chart that drives overlay plugins.

pub mod assets;
pub mod host;

pub use host::{dispatch, load_csv, DataSet, HostChart, HostKind, ListenerTable, SeriesData};
