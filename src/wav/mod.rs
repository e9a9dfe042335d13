// WAVE support: format interpretation, parsing, export and editing

pub mod edit;
pub mod export;
pub mod format;
pub mod parser;

pub use format::{AudioFormat, FMT_CORE_SIZE, FMT_EXTENDED_SIZE, WAVE_FORMAT_PCM};
pub use parser::{ParseResult, WavInfo, WavParser};
