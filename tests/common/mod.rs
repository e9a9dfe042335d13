//! Shared WAV fixtures for the integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Encode one chunk with its pad byte
pub fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

/// Wrap encoded chunks in a RIFF header with a correct declared size
pub fn riff(riff_id: &[u8; 4], form: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut out = riff_id.to_vec();
    out.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    out.extend_from_slice(form);
    out.extend(body);
    out
}

/// 16-byte `fmt ` body
pub fn fmt_body(
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
) -> Vec<u8> {
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    let mut body = Vec::with_capacity(16);
    body.extend_from_slice(&audio_format.to_le_bytes());
    body.extend_from_slice(&channels.to_le_bytes());
    body.extend_from_slice(&sample_rate.to_le_bytes());
    body.extend_from_slice(&byte_rate.to_le_bytes());
    body.extend_from_slice(&block_align.to_le_bytes());
    body.extend_from_slice(&bits_per_sample.to_le_bytes());
    body
}

/// Upper-case four letter id unique for every `n` below 26^4
pub fn distinct_id(n: usize) -> [u8; 4] {
    let letter = |place: u32| b'A' + (n / 26usize.pow(place) % 26) as u8;
    [letter(3), letter(2), letter(1), letter(0)]
}

/// PCM WAV description
#[derive(Debug, Clone)]
pub struct PcmWav {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub num_samples: u32,
}

impl PcmWav {
    pub fn mono_8bit(sample_rate: u32, num_samples: u32) -> Self {
        PcmWav {
            channels: 1,
            sample_rate,
            bits_per_sample: 8,
            num_samples,
        }
    }

    pub fn stereo_16bit(sample_rate: u32, num_samples: u32) -> Self {
        PcmWav {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            num_samples,
        }
    }

    pub fn block_align(&self) -> usize {
        self.channels as usize * self.bits_per_sample as usize / 8
    }

    pub fn data_size(&self) -> usize {
        self.num_samples as usize * self.block_align()
    }

    /// Audio bytes following a simple ramp
    pub fn audio(&self) -> Vec<u8> {
        (0..self.data_size()).map(|i| (i % 256) as u8).collect()
    }

    pub fn fmt(&self) -> Vec<u8> {
        fmt_body(1, self.channels, self.sample_rate, self.bits_per_sample)
    }

    /// `fmt ` then `data`
    pub fn bytes(&self) -> Vec<u8> {
        riff(b"RIFF", b"WAVE", &[chunk(b"fmt ", &self.fmt()), chunk(b"data", &self.audio())])
    }

    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        write_file(dir, name, &self.bytes())
    }
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}
