//! RIFF container plumbing: the 12-byte form header, the chunk walker and
//! the ordered chunk map.

pub mod chunk;
pub mod chunk_map;

pub use chunk::{ChunkHeader, ChunkRecord, ChunkWalker, RawChunk};
pub use chunk_map::{ChunkMap, ChunkSummary, DATA_CHUNK_ID, FMT_CHUNK_ID};

use crate::error::{Result, WavError};
use crate::utils::encoding::escape_fourcc;
use crate::utils::io::{read_fourcc, read_le_u32, write_le_u32};
use std::io::{Read, Write};

/// RIFF file signature
pub const RIFF_SIGNATURE: &[u8; 4] = b"RIFF";

/// WAVE form type
pub const WAVE_FORM: &[u8; 4] = b"WAVE";

/// Size of the `RIFF <size> <form>` header
pub const RIFF_HEADER_SIZE: usize = 12;

/// Size of a chunk's `<id> <size>` header
pub const CHUNK_HEADER_SIZE: usize = 8;

/// RIFF container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub riff_id: [u8; 4],
    /// Informational only; the walk is bounded by the source length
    pub declared_size: u32,
    pub form_type: [u8; 4],
}

impl ContainerHeader {
    /// Read the container header from a reader.
    ///
    /// Fewer than 12 bytes is a corrupted file. Identity is not checked
    /// here, see [`ContainerHeader::expect_form`].
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let eof = |_| WavError::corrupted("file too small to be a valid WAV file");

        let riff_id = read_fourcc(reader).map_err(eof)?;
        let declared_size = read_le_u32(reader).map_err(eof)?;
        let form_type = read_fourcc(reader).map_err(eof)?;

        Ok(ContainerHeader {
            riff_id,
            declared_size,
            form_type,
        })
    }

    /// Require `RIFF` and the given form type
    pub fn expect_form(&self, form: &[u8; 4]) -> Result<()> {
        if &self.riff_id != RIFF_SIGNATURE {
            return Err(WavError::invalid_format(format!(
                "not a valid RIFF file (found '{}')",
                escape_fourcc(&self.riff_id)
            )));
        }
        if &self.form_type != form {
            return Err(WavError::invalid_format(format!(
                "not a valid {} file (form type '{}')",
                escape_fourcc(form).trim_end(),
                escape_fourcc(&self.form_type)
            )));
        }
        Ok(())
    }

    /// File length the header claims
    pub fn declared_file_size(&self) -> u64 {
        self.declared_size as u64 + 8
    }
}

/// Serialize a form: header, then each chunk with its pad byte.
///
/// Returns the number of bytes written.
pub fn write_form<'a, W, I>(writer: &mut W, form: &[u8; 4], chunks: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ChunkRecord> + Clone,
{
    let body_size = chunks
        .clone()
        .into_iter()
        .try_fold(4u64, |acc, chunk| acc.checked_add(chunk.padded_len() as u64))
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(|| WavError::invalid_format("RIFF body does not fit a 32-bit size"))?;

    let io = |e| WavError::export("RIFF output", e);
    writer.write_all(RIFF_SIGNATURE).map_err(io)?;
    write_le_u32(writer, body_size).map_err(io)?;
    writer.write_all(form).map_err(io)?;

    for chunk in chunks {
        writer.write_all(chunk.header().raw_id()).map_err(io)?;
        write_le_u32(writer, chunk.size()).map_err(io)?;
        writer.write_all(chunk.data()).map_err(io)?;
        if chunk.size() % 2 == 1 {
            writer.write_all(&[0]).map_err(io)?;
        }
    }

    Ok(body_size as usize + 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_wave_header() {
        let header = ContainerHeader::read(&mut Cursor::new(b"RIFF\x64\x00\x00\x00WAVE")).unwrap();
        assert_eq!(header.declared_size, 100);
        assert_eq!(header.declared_file_size(), 108);
        assert!(header.expect_form(WAVE_FORM).is_ok());
    }

    #[test]
    fn short_header_is_corrupted() {
        let err = ContainerHeader::read(&mut Cursor::new(b"RIFF\x64\x00")).unwrap_err();
        assert!(matches!(err, WavError::Corrupted(_)));
    }

    #[test]
    fn wrong_magic_is_invalid_format() {
        let header = ContainerHeader::read(&mut Cursor::new(b"JUNK\x64\x00\x00\x00WAVE")).unwrap();
        let err = header.expect_form(WAVE_FORM).unwrap_err();
        assert!(err.to_string().contains("not a valid RIFF file"));

        let header = ContainerHeader::read(&mut Cursor::new(b"RIFF\x64\x00\x00\x00AVI ")).unwrap();
        let err = header.expect_form(WAVE_FORM).unwrap_err();
        assert!(err.to_string().contains("not a valid WAVE file"));
    }

    #[test]
    fn writes_padded_form() {
        let odd = ChunkRecord::new("abcd", vec![1, 2, 3], 12).unwrap();
        let even = ChunkRecord::new("data", vec![9, 9], 24).unwrap();
        let mut out = Vec::new();

        let written = write_form(&mut out, WAVE_FORM, [&odd, &even]).unwrap();

        assert_eq!(written, out.len());
        assert_eq!(out.len(), 12 + 8 + 4 + 8 + 2);
        assert_eq!(&out[4..8], &(out.len() as u32 - 8).to_le_bytes());
        assert_eq!(&out[20..24], &[1u8, 2, 3, 0]);
        assert_eq!(&out[24..28], b"data");
    }
}
