//! riffy - RIFF container parsing, starting with WAV.
//!
//! A [`WavParser`] is bound to one byte source. `parse()` walks the chunk
//! sequence, decodes `fmt `, locates `data` and stores the result; the
//! accessors, exporters and chunk editors all work from that stored
//! result.
//!
//! ```no_run
//! use riffy::WavParser;
//!
//! # fn main() -> riffy::Result<()> {
//! let mut parser = WavParser::new("audio.wav");
//! let info = parser.parse()?;
//! println!("{} Hz, {:.2}s", info.format.sample_rate(), info.duration_seconds);
//! parser.export_audio_data_to_file("audio.raw")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod riff;
mod utils;
pub mod wav;

pub use error::{Result, WavError};
pub use riff::{
    ChunkHeader, ChunkMap, ChunkRecord, ChunkSummary, ChunkWalker, ContainerHeader, RawChunk,
    DATA_CHUNK_ID, FMT_CHUNK_ID,
};
pub use wav::{AudioFormat, ParseResult, WavInfo, WavParser};
