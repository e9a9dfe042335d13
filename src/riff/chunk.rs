// RIFF chunk headers, records and the chunk walker

use super::CHUNK_HEADER_SIZE;
use crate::error::{Result, WavError};
use crate::utils::encoding::{decode_fourcc, encode_fourcc, escape_fourcc};
use crate::utils::io::le_u32_at;
use log::{trace, warn};

/// Chunk header as found in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    id: String,
    fourcc: [u8; 4],
    /// Body length, excluding the pad byte
    pub size: u32,
    /// Position of the id field
    pub offset: usize,
}

impl ChunkHeader {
    /// Chunk id as text
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Chunk id as the four bytes written to disk
    pub fn raw_id(&self) -> &[u8; 4] {
        &self.fourcc
    }

    /// Position of the first body byte
    pub fn body_offset(&self) -> usize {
        self.offset + CHUNK_HEADER_SIZE
    }
}

/// A chunk borrowed from the source bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub header: ChunkHeader,
    pub body: &'a [u8],
}

impl RawChunk<'_> {
    /// Copy the body out into an owned record
    pub fn into_record(self) -> ChunkRecord {
        ChunkRecord {
            header: self.header,
            data: self.body.to_vec(),
        }
    }
}

/// An owned chunk: header plus exactly `size` body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    header: ChunkHeader,
    data: Vec<u8>,
}

impl ChunkRecord {
    /// Build a record from a caller-supplied id and body.
    ///
    /// The id must be four ASCII characters and the body must fit a
    /// 32-bit size.
    pub fn new(id: &str, data: Vec<u8>, offset: usize) -> Result<Self> {
        let fourcc = encode_fourcc(id).map_err(|e| WavError::invalid_chunk(e.to_string()))?;
        let size = u32::try_from(data.len()).map_err(|_| {
            WavError::invalid_chunk(format!(
                "chunk '{}' body of {} bytes does not fit a 32-bit size",
                id,
                data.len()
            ))
        })?;

        Ok(ChunkRecord {
            header: ChunkHeader {
                id: id.to_string(),
                fourcc,
                size,
                offset,
            },
            data,
        })
    }

    /// The same chunk placed at another offset
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.header.offset = offset;
        self
    }

    pub fn header(&self) -> &ChunkHeader {
        &self.header
    }

    pub fn id(&self) -> &str {
        self.header.id()
    }

    pub fn size(&self) -> u32 {
        self.header.size
    }

    pub fn offset(&self) -> usize {
        self.header.offset
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes the chunk takes on disk: header, body and pad byte
    pub fn padded_len(&self) -> usize {
        CHUNK_HEADER_SIZE + self.data.len() + self.data.len() % 2
    }
}

/// Walks chunk headers over a fixed-length byte source.
///
/// Each step reads `<id:4><size:4 LE>`, then `size` body bytes, then skips
/// one pad byte when `size` is odd. The walker is a plain cursor over a
/// borrowed slice: cloning it, or building a new one at the same offset,
/// replays the exact same sequence. It stops after the first error.
#[derive(Debug, Clone)]
pub struct ChunkWalker<'a> {
    bytes: &'a [u8],
    cursor: usize,
    end: usize,
    done: bool,
}

impl<'a> ChunkWalker<'a> {
    /// Walk from `start` to the end of `bytes`
    pub fn new(bytes: &'a [u8], start: usize) -> Self {
        Self::with_extent(bytes, start, bytes.len())
    }

    /// Walk the extent `[start, end)`, clamped to the slice
    pub fn with_extent(bytes: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(bytes.len());
        ChunkWalker {
            bytes,
            cursor: start.min(end),
            end,
            done: false,
        }
    }

    /// Offset of the next chunk header
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn step(&mut self) -> Result<Option<RawChunk<'a>>> {
        let offset = self.cursor;
        let remaining = self.end - offset;
        if remaining == 0 {
            return Ok(None);
        }
        if remaining < CHUNK_HEADER_SIZE {
            return Err(WavError::corrupted(format!(
                "truncated chunk header at offset {}: {} of {} bytes",
                offset, remaining, CHUNK_HEADER_SIZE
            )));
        }

        let mut fourcc = [0u8; 4];
        fourcc.copy_from_slice(&self.bytes[offset..offset + 4]);
        let size = le_u32_at(self.bytes, offset + 4).ok_or_else(|| {
            WavError::corrupted(format!("truncated chunk size at offset {}", offset))
        })?;

        let body_start = offset + CHUNK_HEADER_SIZE;
        let body_end = body_start
            .checked_add(size as usize)
            .filter(|&end| end <= self.end)
            .ok_or_else(|| {
                WavError::corrupted(format!(
                    "incomplete chunk '{}' at offset {}: declares {} bytes, {} available",
                    escape_fourcc(&fourcc),
                    offset,
                    size,
                    self.end - body_start
                ))
            })?;

        let id = decode_fourcc(&fourcc).ok_or_else(|| {
            WavError::invalid_chunk(format!(
                "invalid chunk id (non-ASCII bytes) '{}' at offset {}",
                escape_fourcc(&fourcc),
                offset
            ))
        })?;

        let mut next = body_end;
        if size % 2 == 1 {
            if next < self.end {
                trace!("skipping pad byte after '{}' at offset {}", id, next);
                next += 1;
            } else {
                warn!("chunk '{}' has odd size {} but no pad byte before end of source", id, size);
            }
        }
        self.cursor = next;

        Ok(Some(RawChunk {
            header: ChunkHeader {
                id,
                fourcc,
                size,
                offset,
            },
            body: &self.bytes[body_start..body_end],
        }))
    }
}

impl<'a> Iterator for ChunkWalker<'a> {
    type Item = Result<RawChunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
