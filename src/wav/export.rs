// Chunk export
//
// Both public export paths go through `write_chunk`, so exporting "data"
// and exporting the audio payload always produce the same bytes.

use super::parser::WavParser;
use crate::error::{Result, WavError};
use crate::riff::DATA_CHUNK_ID;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl WavParser {
    fn write_chunk<W: Write>(&self, id: &str, sink: &mut W, target: &str) -> Result<usize> {
        let chunk = self.chunk(id)?;
        sink.write_all(chunk.data())
            .and_then(|()| sink.flush())
            .map_err(|e| WavError::export(target, e))?;
        debug!("exported chunk '{}' ({} bytes) to {}", id, chunk.data().len(), target);
        Ok(chunk.data().len())
    }

    /// Write one chunk's body to a sink, without header or pad byte.
    ///
    /// Returns the number of bytes written.
    pub fn export_chunk<W: Write>(&self, id: &str, sink: &mut W) -> Result<usize> {
        self.write_chunk(id, sink, &format!("sink for chunk '{}'", id))
    }

    /// Write the audio payload to a sink. Same as exporting `data`.
    pub fn export_audio_data<W: Write>(&self, sink: &mut W) -> Result<usize> {
        self.export_chunk(DATA_CHUNK_ID, sink)
    }

    /// Write one chunk's body to a file, replacing it if present.
    ///
    /// The chunk is looked up before the file is created, so a missing
    /// chunk leaves the filesystem untouched.
    pub fn export_chunk_to_file<P: AsRef<Path>>(&self, id: &str, path: P) -> Result<usize> {
        let path = path.as_ref();
        let target = path.display().to_string();
        self.chunk(id)?;

        let file = File::create(path).map_err(|e| WavError::export(target.as_str(), e))?;
        let mut writer = BufWriter::new(file);
        self.write_chunk(id, &mut writer, &target)
    }

    /// Write the audio payload to a file
    pub fn export_audio_data_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        self.export_chunk_to_file(DATA_CHUNK_ID, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Sink that rejects every write
    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parsed() -> WavParser {
        let mut bytes = b"RIFF\x00\x00\x00\x00WAVE".to_vec();
        bytes.extend_from_slice(b"fmt \x10\x00\x00\x00");
        bytes.extend_from_slice(&[1, 0, 1, 0, 0x40, 0x1F, 0, 0, 0x40, 0x1F, 0, 0, 1, 0, 8, 0]);
        bytes.extend_from_slice(b"data\x03\x00\x00\x00\x01\x02\x03\x00");
        let mut parser = WavParser::from_bytes("mem", bytes);
        parser.parse().unwrap();
        parser
    }

    #[test]
    fn exports_body_without_pad_byte() {
        let parser = parsed();
        let mut out = Vec::new();
        assert_eq!(parser.export_chunk("data", &mut out).unwrap(), 3);
        assert_eq!(out, [1u8, 2, 3]);
    }

    #[test]
    fn audio_export_matches_data_export() {
        let parser = parsed();
        let (mut a, mut b) = (Vec::new(), Vec::new());
        parser.export_audio_data(&mut a).unwrap();
        parser.export_chunk("data", &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sink_failure_is_wrapped() {
        let parser = parsed();
        let err = parser.export_audio_data(&mut ClosedSink).unwrap_err();
        assert!(matches!(err, WavError::Export { .. }));
    }

    #[test]
    fn missing_chunk_and_unparsed_are_reported() {
        let parser = parsed();
        let err = parser.export_chunk("JUNK", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, WavError::MissingChunk { .. }));
        assert!(err.to_string().contains("available chunks: fmt , data"));

        let unparsed = WavParser::from_bytes("mem", Vec::new());
        let err = unparsed.export_audio_data(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, WavError::NotParsed));
    }
}
