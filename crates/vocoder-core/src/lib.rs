//! # Vocoder-Core: MBE Voice Frame Decoding
//!
//! This library decodes fixed-size compressed voice codewords from digital
//! land-mobile-radio traffic into linear PCM audio. It covers the per-frame
//! receive pipeline around the speech-reconstruction math: table-driven bit
//! deinterleaving, adaptive output gain control with clipping, and the
//! persistent per-stream state that ties frames together.
//!
//! ## Features
//!
//! - **AMBE mode**: 9-byte / 72-bit interleaved codewords (DMR-class traffic)
//! - **IMBE mode**: 11-byte / 88-bit sequential codewords (P25-class traffic)
//! - **Adaptive gain**: fast-attack, rate-limited-release output trajectory
//!   with headroom-preserving clipping
//! - **Engine seam**: the spectral reconstruction math plugs in behind the
//!   [`MbeEngine`] trait; this crate ships no reconstruction engine
//!
//! Forward error correction, codeword transport, and audio output all sit
//! outside this crate: feed it codewords, take back 160-sample frames.
//!
//! ## Usage
//!
//! ```rust
//! use vocoder_core::{
//!     BitFrame, DecoderConfig, MbeDecoder, MbeEngine, ModelState, Reconstruction,
//! };
//!
//! // Reconstruction stand-in; a real engine implements the MBE math.
//! struct SilenceEngine;
//!
//! impl MbeEngine for SilenceEngine {
//!     type Params = ();
//!
//!     fn reconstruct(
//!         &mut self,
//!         _frame: &BitFrame,
//!         _model: &mut ModelState<()>,
//!         _quality: u8,
//!     ) -> Reconstruction {
//!         Reconstruction::silence()
//!     }
//! }
//!
//! let config = DecoderConfig::ambe();
//! let mut decoder = MbeDecoder::new(config, SilenceEngine)?;
//!
//! let frame = decoder.decode_to_pcm(&[0u8; 9])?;
//! assert_eq!(frame.samples.len(), 160);
//! assert_eq!(frame.errors, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod agc;
pub mod decoder;
pub mod deinterleave;
pub mod engine;
pub mod error;
pub mod types;

// Re-export commonly used types and traits
pub use decoder::MbeDecoder;
pub use engine::{MbeEngine, ModelState, Reconstruction};
pub use error::{Result, VocoderError};
pub use types::{
    BitFrame, DecoderConfig, DecoderInfo, DecoderMode, FloatFrame, PcmFrame, SAMPLES_PER_FRAME,
    SAMPLE_RATE,
};

/// Version information for the vocoder library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported decoder modes
pub const SUPPORTED_MODES: &[&str] = &["AMBE", "IMBE"];

/// Initialize the vocoder library
///
/// Installs a default tracing subscriber if none is set. Safe to call
/// multiple times.
pub fn init() {
    let _ = tracing_subscriber::fmt::try_init();

    tracing::info!("Vocoder-Core v{} initialized", VERSION);
    tracing::info!("Supported modes: {:?}", SUPPORTED_MODES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        init();
        init();
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_supported_modes() {
        assert!(SUPPORTED_MODES.contains(&"AMBE"));
        assert!(SUPPORTED_MODES.contains(&"IMBE"));
    }
}
