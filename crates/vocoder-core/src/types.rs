//! Core types for the vocoder library
//!
//! This module defines the decoder modes, the validated decoder
//! configuration, and the frame types that move through the decode pipeline.

use crate::error::{Result, VocoderError};

/// PCM samples produced per decoded frame, in both modes
pub const SAMPLES_PER_FRAME: usize = 160;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 8000;

/// Codeword size in bytes for AMBE mode
pub const AMBE_CODEWORD_BYTES: usize = 9;

/// Codeword size in bytes for IMBE mode
pub const IMBE_CODEWORD_BYTES: usize = 11;

/// Number of sub-frames in a deinterleaved AMBE bit-frame
pub const AMBE_SUBFRAMES: usize = 4;

/// Bit positions per AMBE sub-frame
pub const AMBE_SUBFRAME_BITS: usize = 24;

/// Bit positions in an IMBE bit-frame
pub const IMBE_FRAME_BITS: usize = 88;

/// Deinterleaved AMBE bit-frame: 4 sub-frames of 24 single-bit cells.
///
/// 72 cells are written from codeword data; the rest stay zero.
pub type AmbeFrame = [[u8; AMBE_SUBFRAME_BITS]; AMBE_SUBFRAMES];

/// Unpacked IMBE bit-frame: 88 single-bit values in transmission order
pub type ImbeFrame = [u8; IMBE_FRAME_BITS];

/// Codeword format decoded by a [`MbeDecoder`](crate::decoder::MbeDecoder)
///
/// Fixed per decoder instance at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoderMode {
    /// 72-bit interleaved codeword (DMR-class AMBE traffic)
    Ambe,
    /// 88-bit sequential codeword (P25-class IMBE traffic)
    Imbe,
}

impl DecoderMode {
    /// Codeword size in bytes for this mode
    pub fn codeword_bytes(self) -> usize {
        match self {
            Self::Ambe => AMBE_CODEWORD_BYTES,
            Self::Imbe => IMBE_CODEWORD_BYTES,
        }
    }

    /// Number of significant codeword bits for this mode
    pub fn codeword_bits(self) -> usize {
        match self {
            Self::Ambe => 72,
            Self::Imbe => IMBE_FRAME_BITS,
        }
    }

    /// Channel bitrate in bits per second
    pub fn bitrate(self) -> u32 {
        match self {
            Self::Ambe => 3600,
            Self::Imbe => 7200,
        }
    }

    /// Canonical mode name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ambe => "AMBE",
            Self::Imbe => "IMBE",
        }
    }
}

/// Deinterleaved bit-frame handed to the speech engine
///
/// Produced fresh by the deinterleaver on every decode call and consumed
/// once; it carries no state across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitFrame {
    /// AMBE 4x24 sub-frame layout
    Ambe(AmbeFrame),
    /// IMBE flat 88-bit layout
    Imbe(ImbeFrame),
}

impl BitFrame {
    /// Mode this bit-frame was unpacked for
    pub fn mode(&self) -> DecoderMode {
        match self {
            Self::Ambe(_) => DecoderMode::Ambe,
            Self::Imbe(_) => DecoderMode::Imbe,
        }
    }
}

/// Decoder configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Codeword format
    pub mode: DecoderMode,
    /// Enable the adaptive output gain trajectory
    pub auto_gain: bool,
    /// Gain scalar applied when `auto_gain` is off; also seeds the adaptive
    /// trajectory
    pub static_gain: f32,
    /// Unvoiced-synthesis quality level handed to the speech engine
    pub quality: u8,
}

/// Valid range for the engine quality level
const QUALITY_RANGE: std::ops::RangeInclusive<u8> = 1..=64;

impl DecoderConfig {
    /// Create a configuration with defaults for the given mode
    pub fn new(mode: DecoderMode) -> Self {
        Self {
            mode,
            auto_gain: true,
            static_gain: 1.0,
            quality: 3,
        }
    }

    /// Create an AMBE decoder configuration
    pub fn ambe() -> Self {
        Self::new(DecoderMode::Ambe)
    }

    /// Create an IMBE decoder configuration
    pub fn imbe() -> Self {
        Self::new(DecoderMode::Imbe)
    }

    /// Set the automatic gain control flag
    pub fn with_auto_gain(mut self, auto_gain: bool) -> Self {
        self.auto_gain = auto_gain;
        self
    }

    /// Set the static gain scalar
    pub fn with_static_gain(mut self, static_gain: f32) -> Self {
        self.static_gain = static_gain;
        self
    }

    /// Set the engine quality level
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.static_gain.is_finite() || self.static_gain <= 0.0 {
            return Err(VocoderError::invalid_config(format!(
                "static gain must be finite and positive, got {}",
                self.static_gain
            )));
        }

        if !QUALITY_RANGE.contains(&self.quality) {
            return Err(VocoderError::invalid_config(format!(
                "quality level {} outside {}..={}",
                self.quality,
                QUALITY_RANGE.start(),
                QUALITY_RANGE.end()
            )));
        }

        Ok(())
    }
}

/// Decoder information snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderInfo {
    /// Mode name ("AMBE" or "IMBE")
    pub name: &'static str,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Samples per decoded frame
    pub frame_size: usize,
    /// Channel bitrate in bits per second
    pub bitrate: u32,
    /// Codeword size in bytes
    pub codeword_bytes: usize,
}

/// One decoded frame of reconstructed float samples
///
/// Output of the float pipeline: no gain trajectory and no clipping applied.
#[derive(Debug, Clone)]
pub struct FloatFrame {
    /// Reconstructed samples
    pub samples: [f32; SAMPLES_PER_FRAME],
    /// Cumulative bit error count reported by the speech engine
    pub errors: u32,
}

/// One decoded frame of 16-bit PCM samples
#[derive(Debug, Clone)]
pub struct PcmFrame {
    /// Gain-adjusted, clipped output samples
    pub samples: [i16; SAMPLES_PER_FRAME],
    /// Cumulative bit error count reported by the speech engine
    pub errors: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_accessors() {
        assert_eq!(DecoderMode::Ambe.codeword_bytes(), 9);
        assert_eq!(DecoderMode::Imbe.codeword_bytes(), 11);
        assert_eq!(DecoderMode::Ambe.codeword_bits(), 72);
        assert_eq!(DecoderMode::Imbe.codeword_bits(), 88);
        assert_eq!(DecoderMode::Ambe.name(), "AMBE");
        assert_eq!(DecoderMode::Imbe.name(), "IMBE");
    }

    #[test]
    fn test_config_defaults() {
        let config = DecoderConfig::ambe();
        assert_eq!(config.mode, DecoderMode::Ambe);
        assert!(config.auto_gain);
        assert_eq!(config.static_gain, 1.0);
        assert_eq!(config.quality, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DecoderConfig::imbe()
            .with_auto_gain(false)
            .with_static_gain(2.5)
            .with_quality(6);
        assert_eq!(config.mode, DecoderMode::Imbe);
        assert!(!config.auto_gain);
        assert_eq!(config.static_gain, 2.5);
        assert_eq!(config.quality, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_static_gain() {
        assert!(DecoderConfig::ambe().with_static_gain(0.0).validate().is_err());
        assert!(DecoderConfig::ambe().with_static_gain(-1.0).validate().is_err());
        assert!(DecoderConfig::ambe()
            .with_static_gain(f32::NAN)
            .validate()
            .is_err());
        assert!(DecoderConfig::ambe()
            .with_static_gain(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_invalid_quality() {
        assert!(DecoderConfig::imbe().with_quality(0).validate().is_err());
        assert!(DecoderConfig::imbe().with_quality(65).validate().is_err());
        assert!(DecoderConfig::imbe().with_quality(64).validate().is_ok());
    }

    #[test]
    fn test_bit_frame_mode() {
        let ambe = BitFrame::Ambe([[0; AMBE_SUBFRAME_BITS]; AMBE_SUBFRAMES]);
        let imbe = BitFrame::Imbe([0; IMBE_FRAME_BITS]);
        assert_eq!(ambe.mode(), DecoderMode::Ambe);
        assert_eq!(imbe.mode(), DecoderMode::Imbe);
    }
}
