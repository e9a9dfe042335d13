//! Error types for riffy

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for riffy operations
pub type Result<T> = std::result::Result<T, WavError>;

/// Every failure riffy can raise.
///
/// Content and usage problems each get their own variant so callers can
/// match on the kind. Source-side I/O is carried unchanged in
/// [`WavError::Source`]; destination-side I/O is wrapped in
/// [`WavError::Export`].
#[derive(Error, Debug)]
pub enum WavError {
    /// An operation needs a successful `parse()` first
    #[error("file not parsed yet, call parse() first")]
    NotParsed,

    /// Wrong magic bytes or a structurally invalid `fmt ` chunk
    #[error("invalid WAV format: {0}")]
    InvalidFormat(String),

    /// Declared sizes run past the available bytes
    #[error("corrupted file: {0}")]
    Corrupted(String),

    /// A recognized audio encoding that is not decoded
    #[error("unsupported audio format: {audio_format} (only PCM is supported)")]
    Unsupported { audio_format: u16 },

    /// A chunk id that is not four ASCII bytes
    #[error("invalid chunk: {0}")]
    InvalidChunk(String),

    /// A required or requested chunk is absent
    #[error("chunk '{id}' not found, available chunks: {available}")]
    MissingChunk { id: String, available: String },

    /// `add_chunk` on an id the map already holds
    #[error("chunk '{0}' already exists")]
    ChunkExists(String),

    /// `write_wav` refused to replace an existing file
    #[error("destination {0} already exists, set overwrite to replace it")]
    DestinationExists(PathBuf),

    /// Writing to an export or output destination failed
    #[error("failed to write {target}: {source}")]
    Export {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The input source could not be read
    #[error(transparent)]
    Source(#[from] io::Error),
}

impl WavError {
    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        WavError::InvalidFormat(msg.into())
    }

    /// Create a corrupted file error
    pub fn corrupted<S: Into<String>>(msg: S) -> Self {
        WavError::Corrupted(msg.into())
    }

    /// Create an invalid chunk error
    pub fn invalid_chunk<S: Into<String>>(msg: S) -> Self {
        WavError::InvalidChunk(msg.into())
    }

    /// Create a missing chunk error listing what the map does hold
    pub fn missing_chunk<'a, I>(id: &str, available: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        WavError::MissingChunk {
            id: id.to_string(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Create an export error for a failed destination write
    pub fn export<S: Into<String>>(target: S, source: io::Error) -> Self {
        WavError::Export {
            target: target.into(),
            source,
        }
    }

    /// True for the WAV-level content errors
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            WavError::InvalidFormat(_) | WavError::Corrupted(_) | WavError::Unsupported { .. }
        )
    }

    /// True for errors about individual chunks
    pub fn is_chunk_error(&self) -> bool {
        matches!(
            self,
            WavError::InvalidChunk(_) | WavError::MissingChunk { .. } | WavError::ChunkExists(_)
        )
    }

    /// True when the input source itself could not be read
    pub fn is_source_error(&self) -> bool {
        matches!(self, WavError::Source(_))
    }

    /// True when the input source does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, WavError::Source(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_chunk_lists_available_ids() {
        let err = WavError::missing_chunk("JUNK", ["fmt ", "data"]);
        assert_eq!(
            err.to_string(),
            "chunk 'JUNK' not found, available chunks: fmt , data"
        );
        assert!(err.is_chunk_error());
        assert!(!err.is_format_error());
    }

    #[test]
    fn source_errors_are_transparent() {
        let err = WavError::from(io::Error::new(io::ErrorKind::NotFound, "nope"));
        assert_eq!(err.to_string(), "nope");
        assert!(err.is_source_error());
        assert!(err.is_not_found());
    }

    #[test]
    fn export_errors_keep_their_cause() {
        use std::error::Error as _;

        let err = WavError::export("out.bin", io::Error::other("disk full"));
        assert!(err.source().is_some());
        assert!(!err.is_source_error());
    }
}
