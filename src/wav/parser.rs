// WAV parse orchestration and the parser's stored state

use super::format::AudioFormat;
use crate::error::{Result, WavError};
use crate::riff::{
    ChunkMap, ChunkRecord, ChunkSummary, ChunkWalker, ContainerHeader, DATA_CHUNK_ID,
    FMT_CHUNK_ID, RIFF_HEADER_SIZE, WAVE_FORM,
};
use log::{debug, warn};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Where a parser reads its bytes from
#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Bytes { name: String, bytes: Vec<u8> },
}

impl Source {
    fn name(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Bytes { name, .. } => name.clone(),
        }
    }

    fn read(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Source::Path(path) => Ok(Cow::Owned(std::fs::read(path)?)),
            Source::Bytes { bytes, .. } => Ok(Cow::Borrowed(bytes.as_slice())),
        }
    }
}

/// A fully parsed WAVE file.
///
/// Always holds a decoded `fmt ` chunk and a `data` chunk; there is no
/// partially populated state.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    file_size: u64,
    header: ContainerHeader,
    chunks: ChunkMap,
    format: AudioFormat,
    duration_seconds: f64,
    sample_count: u64,
}

impl ParseResult {
    /// Parse a complete WAVE image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RIFF_HEADER_SIZE {
            return Err(WavError::corrupted(format!(
                "file too small to be a valid WAV file: {} bytes",
                bytes.len()
            )));
        }

        let header = ContainerHeader::read(&mut Cursor::new(bytes))?;
        header.expect_form(WAVE_FORM)?;
        if header.declared_file_size() != bytes.len() as u64 {
            warn!(
                "RIFF header declares {} bytes but source has {}",
                header.declared_file_size(),
                bytes.len()
            );
        }
        debug!("RIFF/WAVE header accepted, declared size {}", header.declared_size);

        let mut chunks = ChunkMap::new();
        for raw in ChunkWalker::new(bytes, RIFF_HEADER_SIZE) {
            let raw = raw?;
            debug!(
                "chunk '{}' at offset {}, {} bytes",
                raw.header.id(),
                raw.header.offset,
                raw.header.size
            );
            if let Some(previous) = chunks.insert(raw.into_record()) {
                warn!(
                    "duplicate chunk '{}' at offset {} replaces the one at offset {}",
                    previous.id(),
                    chunks.get(previous.id()).map_or(0, ChunkRecord::offset),
                    previous.offset()
                );
            }
        }

        Self::assemble(bytes.len() as u64, header, chunks)
    }

    /// Decode `fmt `, locate `data` and derive the summary metrics
    pub(crate) fn assemble(
        file_size: u64,
        header: ContainerHeader,
        chunks: ChunkMap,
    ) -> Result<Self> {
        let fmt = chunks
            .get(FMT_CHUNK_ID)
            .ok_or_else(|| WavError::missing_chunk(FMT_CHUNK_ID, chunks.ids()))?;
        let format = AudioFormat::from_fmt_chunk(fmt.data())?;

        let data_size = chunks
            .get(DATA_CHUNK_ID)
            .ok_or_else(|| WavError::missing_chunk(DATA_CHUNK_ID, chunks.ids()))?
            .data()
            .len();

        let result = ParseResult {
            file_size,
            header,
            duration_seconds: format.duration_seconds(data_size),
            sample_count: format.sample_count(data_size),
            chunks,
            format,
        };
        debug!(
            "parsed {} chunks, {} audio bytes, {:.3}s",
            result.chunks.len(),
            data_size,
            result.duration_seconds
        );
        Ok(result)
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn chunks(&self) -> &ChunkMap {
        &self.chunks
    }

    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    /// Body of the `data` chunk
    pub fn audio_data(&self) -> &[u8] {
        self.chunks
            .get(DATA_CHUNK_ID)
            .map(ChunkRecord::data)
            .unwrap_or_default()
    }

    pub fn audio_data_size(&self) -> usize {
        self.audio_data().len()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }
}

/// Summary record returned by `parse()` and `info()`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavInfo {
    pub file_path: String,
    pub file_size: u64,
    pub format: AudioFormat,
    pub duration_seconds: f64,
    pub audio_data_size: usize,
    pub sample_count: u64,
    /// id → size, in map order
    #[serde(serialize_with = "chunk_sizes")]
    pub chunks: Vec<ChunkSummary>,
}

fn chunk_sizes<S: Serializer>(
    chunks: &[ChunkSummary],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(chunks.len()))?;
    for chunk in chunks {
        map.serialize_entry(&chunk.id, &chunk.size)?;
    }
    map.end()
}

/// WAV parser bound to one byte source.
///
/// Holds no derived state until [`WavParser::parse`] succeeds. Every
/// accessor fails with [`WavError::NotParsed`] before that. A failed
/// parse leaves the previous state untouched.
#[derive(Debug, Clone)]
pub struct WavParser {
    source: Source,
    pub(crate) state: Option<ParseResult>,
}

impl WavParser {
    /// Bind a parser to a file path. The file is read by `parse()`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        WavParser {
            source: Source::Path(path.as_ref().to_path_buf()),
            state: None,
        }
    }

    /// Bind a parser to bytes already in memory
    pub fn from_bytes<S: Into<String>>(name: S, bytes: Vec<u8>) -> Self {
        WavParser {
            source: Source::Bytes {
                name: name.into(),
                bytes,
            },
            state: None,
        }
    }

    /// Read the whole source and rebuild the parsed state from it
    pub fn parse(&mut self) -> Result<WavInfo> {
        let bytes = self.source.read()?;
        let result = ParseResult::from_bytes(&bytes)?;
        self.state = Some(result);
        self.info()
    }

    /// Path of a file-backed source
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Path(path) => Some(path.as_path()),
            Source::Bytes { .. } => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.state.is_some()
    }

    /// The stored parse result
    pub fn result(&self) -> Result<&ParseResult> {
        self.state.as_ref().ok_or(WavError::NotParsed)
    }

    /// Summary of the last successful parse
    pub fn info(&self) -> Result<WavInfo> {
        let result = self.result()?;
        Ok(WavInfo {
            file_path: self.source.name(),
            file_size: result.file_size,
            format: result.format,
            duration_seconds: result.duration_seconds,
            audio_data_size: result.audio_data_size(),
            sample_count: result.sample_count,
            chunks: result.chunks.summaries(),
        })
    }

    pub fn format(&self) -> Result<&AudioFormat> {
        Ok(self.result()?.format())
    }

    pub fn chunks(&self) -> Result<&ChunkMap> {
        Ok(self.result()?.chunks())
    }

    /// One chunk by id
    pub fn chunk(&self, id: &str) -> Result<&ChunkRecord> {
        let chunks = self.chunks()?;
        chunks.get(id).ok_or_else(|| WavError::missing_chunk(id, chunks.ids()))
    }

    pub fn audio_data(&self) -> Result<&[u8]> {
        Ok(self.result()?.audio_data())
    }

    /// id, size and offset of every chunk
    pub fn list_chunks(&self) -> Result<Vec<ChunkSummary>> {
        Ok(self.chunks()?.summaries())
    }
}
