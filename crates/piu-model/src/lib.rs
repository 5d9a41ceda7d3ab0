// Step chart data model: note intervals, per-lane timelines, chart decoding

mod chart;
mod error;
mod interval;
mod timeline;

pub use chart::{Chart, ChartDecoder};
pub use error::ChartError;
pub use interval::{NoteInterval, Samples};
pub use timeline::NoteTimeline;
