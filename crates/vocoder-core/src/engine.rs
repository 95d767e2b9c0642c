//! Speech engine interface
//!
//! The spectral reconstruction math that turns a bit-frame into audio lives
//! behind the [`MbeEngine`] trait. The decoder owns the engine's persistent
//! model-parameter state and threads the same instance through every call,
//! which is what lets the engine smooth parameters from one frame to the
//! next. This crate ships no engine implementation.

use crate::types::{BitFrame, SAMPLES_PER_FRAME};

/// Model-parameter state threaded through successive engine calls
///
/// The parameter type `P` is defined by the engine and opaque to the
/// decoder. One `ModelState` belongs to exactly one stream; sharing it
/// across streams corrupts the temporal model.
#[derive(Debug, Clone, Default)]
pub struct ModelState<P> {
    /// Parameters for the frame being reconstructed
    pub current: P,
    /// Parameters from the previous frame
    pub previous: P,
    /// Enhanced parameters from the previous frame
    pub previous_enhanced: P,
}

impl<P: Default> ModelState<P> {
    /// Create a fresh state with engine-default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all parameter history
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of one engine reconstruction call
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Reconstructed audio for the frame
    pub samples: [f32; SAMPLES_PER_FRAME],
    /// Cumulative bit error count for the frame; propagated to the caller
    pub total_errors: u32,
    /// Error count of the most recent reconstruction pass; informational
    pub frame_errors: u32,
    /// Engine diagnostic text, if any
    pub status: Option<String>,
}

impl Reconstruction {
    /// A silent, error-free frame
    pub fn silence() -> Self {
        Self {
            samples: [0.0; SAMPLES_PER_FRAME],
            total_errors: 0,
            frame_errors: 0,
            status: None,
        }
    }
}

/// Frame reconstruction engine
///
/// Implementations consume a deinterleaved bit-frame plus the persistent
/// model state and produce one frame of float audio with error diagnostics.
/// The engine mutates the model state in place on every call.
pub trait MbeEngine {
    /// Engine-defined model-parameter type
    type Params: Default;

    /// Reconstruct one frame of audio from a bit-frame
    ///
    /// `quality` is the unvoiced-synthesis quality level from the decoder
    /// configuration. Bit errors in the input surface as distortion and a
    /// nonzero error count, never as a failure.
    fn reconstruct(
        &mut self,
        frame: &BitFrame,
        model: &mut ModelState<Self::Params>,
        quality: u8,
    ) -> Reconstruction;
}
