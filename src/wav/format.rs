// `fmt ` chunk interpretation

use crate::error::{Result, WavError};
use crate::utils::io::{read_le_u16, read_le_u32};
use log::trace;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::io::Cursor;

/// Format code for uncompressed PCM
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Length of the fields every `fmt ` chunk carries
pub const FMT_CORE_SIZE: usize = 16;

/// Core fields plus the `extension_size` field of non-PCM formats
pub const FMT_EXTENDED_SIZE: usize = 18;

/// Decoded `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
}

impl AudioFormat {
    /// Build a PCM descriptor, checking the field invariants. Any code
    /// other than PCM is `Unsupported`.
    pub fn new(
        audio_format: u16,
        channels: u16,
        sample_rate: u32,
        byte_rate: u32,
        block_align: u16,
        bits_per_sample: u16,
    ) -> Result<Self> {
        let format = AudioFormat {
            audio_format,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
        };
        format.validate()?;
        Ok(format)
    }

    /// Decode a `fmt ` chunk body.
    ///
    /// Layout, little-endian: `audio_format:2 channels:2 sample_rate:4
    /// byte_rate:4 block_align:2 bits_per_sample:2`, followed for non-PCM
    /// codes by `extension_size:2` and that many extension bytes.
    pub fn from_fmt_chunk(body: &[u8]) -> Result<Self> {
        if body.len() < FMT_CORE_SIZE {
            return Err(WavError::invalid_format(format!(
                "format chunk too small: {} bytes, need at least {}",
                body.len(),
                FMT_CORE_SIZE
            )));
        }

        let short = |_| WavError::invalid_format("format chunk ended early");
        let mut reader = Cursor::new(body);
        let audio_format = read_le_u16(&mut reader).map_err(short)?;
        let channels = read_le_u16(&mut reader).map_err(short)?;
        let sample_rate = read_le_u32(&mut reader).map_err(short)?;
        let byte_rate = read_le_u32(&mut reader).map_err(short)?;
        let block_align = read_le_u16(&mut reader).map_err(short)?;
        let bits_per_sample = read_le_u16(&mut reader).map_err(short)?;

        if audio_format != WAVE_FORMAT_PCM {
            if body.len() < FMT_EXTENDED_SIZE {
                return Err(WavError::invalid_format(format!(
                    "non-PCM format (type {}) requires at least {} bytes in format chunk, got {}",
                    audio_format,
                    FMT_EXTENDED_SIZE,
                    body.len()
                )));
            }
            let extension_size = read_le_u16(&mut reader).map_err(short)?;
            let expected = FMT_EXTENDED_SIZE + extension_size as usize;
            if body.len() < expected {
                return Err(WavError::invalid_format(format!(
                    "format chunk size ({} bytes) is smaller than expected ({} bytes) for format type {}",
                    body.len(),
                    expected,
                    audio_format
                )));
            }
            return Err(WavError::Unsupported { audio_format });
        }

        if body.len() > FMT_CORE_SIZE {
            trace!("ignoring {} trailing bytes in PCM format chunk", body.len() - FMT_CORE_SIZE);
        }

        Self::new(
            audio_format,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
        )
    }

    fn validate(&self) -> Result<()> {
        if self.audio_format != WAVE_FORMAT_PCM {
            return Err(WavError::Unsupported {
                audio_format: self.audio_format,
            });
        }
        if self.channels == 0 {
            return Err(WavError::invalid_format("invalid number of channels: 0"));
        }
        if self.sample_rate == 0 {
            return Err(WavError::invalid_format("invalid sample rate: 0"));
        }
        if self.block_align == 0 {
            return Err(WavError::invalid_format("invalid block align: 0"));
        }
        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(WavError::invalid_format(format!(
                "invalid bits per sample: {} (must be a positive multiple of 8)",
                self.bits_per_sample
            )));
        }
        Ok(())
    }

    pub fn audio_format(&self) -> u16 {
        self.audio_format
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bytes of audio per second of playback
    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    /// Bytes per multi-channel sample frame
    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn is_pcm(&self) -> bool {
        self.audio_format == WAVE_FORMAT_PCM
    }

    /// Playback length of `data_size` bytes, 0.0 when the byte rate is 0
    pub fn duration_seconds(&self, data_size: usize) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        data_size as f64 / self.byte_rate as f64
    }

    /// Whole sample frames in `data_size` bytes, 0 when block align is 0
    pub fn sample_count(&self, data_size: usize) -> u64 {
        if self.block_align == 0 {
            return 0;
        }
        (data_size / self.block_align as usize) as u64
    }
}

impl Serialize for AudioFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AudioFormat", 7)?;
        state.serialize_field("audio_format", &self.audio_format)?;
        state.serialize_field("channels", &self.channels)?;
        state.serialize_field("sample_rate", &self.sample_rate)?;
        state.serialize_field("byte_rate", &self.byte_rate)?;
        state.serialize_field("block_align", &self.block_align)?;
        state.serialize_field("bits_per_sample", &self.bits_per_sample)?;
        state.serialize_field("is_pcm", &self.is_pcm())?;
        state.end()
    }
}
