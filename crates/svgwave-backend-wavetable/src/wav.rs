//! Deterministic WAV export of wavetables.
//!
//! Writes 16-bit mono PCM with a fixed 44-byte header and no metadata, so
//! identical wavetables always produce identical files. The BLAKE3 hash of
//! the PCM bytes is reported alongside for comparison across runs.

use std::io::{self, Write};

use crate::error::{WavetableError, WavetableResult};

/// Default header sample rate for exported wavetables.
pub const DEFAULT_WAV_RATE: u32 = 44_100;

/// Largest PCM payload whose RIFF chunk size still fits in 32 bits.
pub const MAX_PCM_BYTES: u32 = u32::MAX - 36;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy)]
pub struct WavFormat {
    /// Number of channels (always 1 here).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file to a writer.
///
/// Fails with `InvalidInput` if the data does not fit the 32-bit RIFF sizes.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .ok()
        .filter(|&size| size <= MAX_PCM_BYTES)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} bytes of PCM data exceed the WAV size limit", pcm_data.len()),
            )
        })?;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(44 + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Converts samples to little-endian PCM bytes, repeating the cycle `cycles` times.
pub fn wavetable_to_pcm16(samples: &[i16], cycles: usize) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2 * cycles);
    for _ in 0..cycles {
        for &sample in samples {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
    }
    pcm
}

/// Result of WAV export.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of PCM data only.
    pub pcm_hash: String,
    /// Header sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples written.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes a wavetable, repeated `cycles` times (at least once).
    ///
    /// # Errors
    /// [`WavetableError::InvalidParameter`] if the repeated cycle does not
    /// fit in a WAV file.
    pub fn from_wavetable(
        samples: &[i16],
        sample_rate: u32,
        cycles: usize,
    ) -> WavetableResult<Self> {
        let cycles = cycles.max(1);
        let pcm_bytes = samples
            .len()
            .checked_mul(2)
            .and_then(|bytes| bytes.checked_mul(cycles))
            .filter(|&bytes| bytes <= MAX_PCM_BYTES as usize);
        if pcm_bytes.is_none() {
            return Err(WavetableError::invalid_param(
                "cycles",
                format!(
                    "{} cycle(s) of {} samples exceed the WAV size limit",
                    cycles,
                    samples.len()
                ),
            ));
        }

        let pcm = wavetable_to_pcm16(samples, cycles);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let format = WavFormat::mono(sample_rate);
        let wav_data = write_wav_to_vec(&format, &pcm)?;

        Ok(Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len() * cycles,
        })
    }
}
