pub mod export;
pub mod journal;
pub mod trends;

pub use export::to_csv;
pub use journal::SqliteJournal;
pub use trends::{spiral_hotspot, SpiralHotspot, TrendReport};
