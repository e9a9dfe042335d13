// In-memory chunk editing and re-serialization of a parsed file

use super::parser::{ParseResult, WavParser};
use crate::error::{Result, WavError};
use crate::riff::{write_form, ChunkMap, ChunkRecord, WAVE_FORM};
use log::{debug, info};
use std::path::Path;

impl WavParser {
    /// Run an edit against a copy of the chunk map and rebuild the parsed
    /// state from it. The stored state only changes if the edit and the
    /// rebuild both succeed.
    fn edit_chunks<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut ChunkMap) -> Result<()>,
    {
        let current = self.result()?;
        let mut chunks = current.chunks().clone();
        edit(&mut chunks)?;
        chunks.relayout();

        let rebuilt = ParseResult::assemble(current.file_size(), *current.header(), chunks)?;
        self.state = Some(rebuilt);
        Ok(())
    }

    /// Replace the body of an existing chunk.
    ///
    /// Replacing `fmt ` re-decodes the format; replacing `data` updates the
    /// duration and sample count.
    pub fn replace_chunk(&mut self, id: &str, data: Vec<u8>) -> Result<()> {
        self.edit_chunks(|chunks| {
            let existing = chunks
                .get(id)
                .ok_or_else(|| WavError::missing_chunk(id, chunks.ids()))?;
            let record = ChunkRecord::new(id, data, existing.offset())?;
            chunks.insert(record);
            Ok(())
        })?;
        debug!("replaced chunk '{}'", id);
        Ok(())
    }

    /// Append a new chunk. The id must be four ASCII characters and must
    /// not already be present.
    pub fn add_chunk(&mut self, id: &str, data: Vec<u8>) -> Result<()> {
        self.edit_chunks(|chunks| {
            let record = ChunkRecord::new(id, data, 0)?;
            if chunks.contains(id) {
                return Err(WavError::ChunkExists(id.to_string()));
            }
            chunks.insert(record);
            Ok(())
        })?;
        debug!("added chunk '{}'", id);
        Ok(())
    }

    /// Replace the chunk if present, add it otherwise
    pub fn set_chunk(&mut self, id: &str, data: Vec<u8>) -> Result<()> {
        self.edit_chunks(|chunks| {
            let record = ChunkRecord::new(id, data, 0)?;
            chunks.insert(record);
            Ok(())
        })
    }

    /// Copy a chunk's body from another parsed file
    pub fn copy_chunk_from(&mut self, id: &str, source: &WavParser) -> Result<()> {
        let data = source.result()?;
        let chunk = data
            .chunks()
            .get(id)
            .ok_or_else(|| WavError::missing_chunk(id, data.chunks().ids()))?;
        self.set_chunk(id, chunk.data().to_vec())
    }

    /// The file image `write_wav` would produce: `fmt `, `data`, then the
    /// remaining chunks in map order, odd bodies padded
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let result = self.result()?;
        let mut out = Vec::new();
        write_form(&mut out, WAVE_FORM, result.chunks().write_order())?;
        Ok(out)
    }

    /// Write the current chunks as a WAVE file.
    ///
    /// An existing destination is refused unless `overwrite` is set.
    /// Returns the number of bytes written.
    pub fn write_wav<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> Result<usize> {
        let path = path.as_ref();
        let image = self.to_bytes()?;
        if !overwrite && path.exists() {
            return Err(WavError::DestinationExists(path.to_path_buf()));
        }

        std::fs::write(path, &image).map_err(|e| WavError::export(path.display().to_string(), e))?;
        info!("wrote {} bytes to {}", image.len(), path.display());
        Ok(image.len())
    }
}
