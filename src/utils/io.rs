// Little-endian byte helpers shared by the chunk walker, the format
// interpreter and the writer

use std::io::{Read, Write};

/// Read little-endian 16-bit integer
pub fn read_le_u16<R: Read>(reader: &mut R) -> std::io::Result<u16> {
    let mut buffer = [0u8; 2];
    reader.read_exact(&mut buffer)?;
    Ok(u16::from_le_bytes(buffer))
}

/// Read little-endian 32-bit integer
pub fn read_le_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Read a four-byte code
pub fn read_fourcc<R: Read>(reader: &mut R) -> std::io::Result<[u8; 4]> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Write little-endian 32-bit integer
pub fn write_le_u32<W: Write>(writer: &mut W, value: u32) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Little-endian u32 at `at`, or None when the slice is too short
pub fn le_u32_at(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at.checked_add(4)?)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_little_endian_fields() {
        let mut cursor = Cursor::new([0x01, 0x00, 0x44, 0xAC, 0x00, 0x00]);
        assert_eq!(read_le_u16(&mut cursor).unwrap(), 1);
        assert_eq!(read_le_u32(&mut cursor).unwrap(), 44100);
        assert!(read_le_u16(&mut cursor).is_err());
    }

    #[test]
    fn slice_helpers_respect_bounds() {
        let bytes = b"RIFF\x24\x00\x00\x00WAVE";
        assert_eq!(le_u32_at(bytes, 4), Some(36));
        assert_eq!(le_u32_at(bytes, 10), None);
        assert_eq!(le_u32_at(bytes, usize::MAX), None);
    }

    #[test]
    fn writes_little_endian_u32() {
        let mut out = Vec::new();
        write_le_u32(&mut out, 0x0001_0203).unwrap();
        assert_eq!(out, [0x03, 0x02, 0x01, 0x00]);
    }
}
