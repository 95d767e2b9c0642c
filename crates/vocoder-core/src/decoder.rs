//! Frame decoder
//!
//! [`MbeDecoder`] owns everything that persists across the frames of one
//! voice stream: the mode configuration, the speech engine, the engine's
//! model-parameter state, and the gain trajectory. Each decode call is one
//! atomic pipeline step: deinterleave, reconstruct, gain, PCM.
//!
//! A decoder instance serves exactly one logical stream and its calls must
//! be serialized by the caller; frames submitted out of order corrupt the
//! temporal model and the gain trajectory. Independent instances share
//! nothing and may run concurrently.

use tracing::{debug, trace};

use crate::agc::{write_pcm, GainControl};
use crate::deinterleave::{deinterleave_ambe, unpack_imbe};
use crate::engine::{MbeEngine, ModelState};
use crate::error::{Result, VocoderError};
use crate::types::{
    BitFrame, DecoderConfig, DecoderInfo, DecoderMode, FloatFrame, PcmFrame,
    AMBE_CODEWORD_BYTES, IMBE_CODEWORD_BYTES, SAMPLES_PER_FRAME, SAMPLE_RATE,
};

/// Voice frame decoder for one stream
///
/// Create one instance per conversation or channel and feed it codewords in
/// stream order. The mode is fixed for the instance's lifetime.
pub struct MbeDecoder<E: MbeEngine> {
    config: DecoderConfig,
    engine: E,
    model: ModelState<E::Params>,
    agc: GainControl,
}

impl<E: MbeEngine> MbeDecoder<E> {
    /// Create a decoder from a validated configuration and an engine
    pub fn new(config: DecoderConfig, engine: E) -> Result<Self> {
        config.validate()?;

        debug!(
            "Creating {} decoder: auto_gain={}, static_gain={}, quality={}",
            config.mode.name(),
            config.auto_gain,
            config.static_gain,
            config.quality
        );

        Ok(Self {
            agc: GainControl::new(config.auto_gain, config.static_gain),
            model: ModelState::new(),
            config,
            engine,
        })
    }

    /// Decode one codeword to reconstructed float samples
    ///
    /// The float path stops before the gain stage: samples come back exactly
    /// as the engine produced them and the gain trajectory does not advance.
    pub fn decode_to_float(&mut self, codeword: &[u8]) -> Result<FloatFrame> {
        let mut samples = [0.0f32; SAMPLES_PER_FRAME];
        let errors = self.decode_float_into(codeword, &mut samples)?;
        Ok(FloatFrame { samples, errors })
    }

    /// Decode one codeword to gain-adjusted, clipped 16-bit PCM
    pub fn decode_to_pcm(&mut self, codeword: &[u8]) -> Result<PcmFrame> {
        let mut samples = [0i16; SAMPLES_PER_FRAME];
        let errors = self.decode_pcm_into(codeword, &mut samples)?;
        Ok(PcmFrame { samples, errors })
    }

    /// Decode one codeword into a caller-provided float buffer
    ///
    /// Writes [`SAMPLES_PER_FRAME`] samples into the front of `output` and
    /// returns the engine's cumulative error count for the frame.
    pub fn decode_float_into(&mut self, codeword: &[u8], output: &mut [f32]) -> Result<u32> {
        if output.len() < SAMPLES_PER_FRAME {
            return Err(VocoderError::BufferTooSmall {
                needed: SAMPLES_PER_FRAME,
                actual: output.len(),
            });
        }

        let frame = self.unpack(codeword)?;
        let out = self
            .engine
            .reconstruct(&frame, &mut self.model, self.config.quality);

        if let Some(status) = &out.status {
            trace!("Engine diagnostic: {}", status);
        }
        trace!(
            "{} frame reconstructed: {} errors ({} this pass)",
            self.config.mode.name(),
            out.total_errors,
            out.frame_errors
        );

        output[..SAMPLES_PER_FRAME].copy_from_slice(&out.samples);
        Ok(out.total_errors)
    }

    /// Decode one codeword into a caller-provided PCM buffer
    ///
    /// Runs the full pipeline including the gain stage and clipping. Writes
    /// [`SAMPLES_PER_FRAME`] samples into the front of `output` and returns
    /// the engine's cumulative error count for the frame.
    pub fn decode_pcm_into(&mut self, codeword: &[u8], output: &mut [i16]) -> Result<u32> {
        if output.len() < SAMPLES_PER_FRAME {
            return Err(VocoderError::BufferTooSmall {
                needed: SAMPLES_PER_FRAME,
                actual: output.len(),
            });
        }

        let mut samples = [0.0f32; SAMPLES_PER_FRAME];
        let errors = self.decode_float_into(codeword, &mut samples)?;

        self.agc.process(&mut samples);

        let mut pcm = [0i16; SAMPLES_PER_FRAME];
        write_pcm(&samples, &mut pcm);
        output[..SAMPLES_PER_FRAME].copy_from_slice(&pcm);

        Ok(errors)
    }

    /// Drop all per-stream state, as for a stream discontinuity
    ///
    /// Model-parameter history and the gain trajectory return to their
    /// construction values. The mode and configuration are unchanged.
    pub fn reset(&mut self) {
        self.model.reset();
        self.agc.reset();
        debug!("{} decoder reset", self.config.mode.name());
    }

    /// Decoder information snapshot
    pub fn info(&self) -> DecoderInfo {
        DecoderInfo {
            name: self.config.mode.name(),
            sample_rate: SAMPLE_RATE,
            frame_size: SAMPLES_PER_FRAME,
            bitrate: self.config.mode.bitrate(),
            codeword_bytes: self.config.mode.codeword_bytes(),
        }
    }

    /// Codeword format this decoder accepts
    pub fn mode(&self) -> DecoderMode {
        self.config.mode
    }

    /// Samples produced per decoded frame
    pub fn frame_size(&self) -> usize {
        SAMPLES_PER_FRAME
    }

    /// Codeword size in bytes this decoder accepts
    pub fn codeword_size(&self) -> usize {
        self.config.mode.codeword_bytes()
    }

    /// Current gain multiplier, for diagnostics
    pub fn gain(&self) -> f32 {
        self.agc.gain()
    }

    /// Check the codeword length and build the mode's bit-frame
    fn unpack(&self, codeword: &[u8]) -> Result<BitFrame> {
        let expected = self.config.mode.codeword_bytes();
        if codeword.len() != expected {
            return Err(VocoderError::InvalidCodewordLength {
                expected,
                actual: codeword.len(),
            });
        }

        Ok(match self.config.mode {
            DecoderMode::Ambe => {
                let mut bytes = [0u8; AMBE_CODEWORD_BYTES];
                bytes.copy_from_slice(codeword);
                BitFrame::Ambe(deinterleave_ambe(&bytes))
            }
            DecoderMode::Imbe => {
                let mut bytes = [0u8; IMBE_CODEWORD_BYTES];
                bytes.copy_from_slice(codeword);
                BitFrame::Imbe(unpack_imbe(&bytes))
            }
        })
    }
}
