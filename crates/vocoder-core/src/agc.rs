//! Output gain control
//!
//! Normalizes reconstructed audio toward a target level while keeping the
//! gain trajectory free of audible pumping: gain drops take effect within
//! the frame they are detected (fast attack), gain recovery is rate-limited
//! to a fraction of the current gain per frame (slow release). The final
//! stage clips to a headroom-preserving bound and truncates to 16-bit PCM.

use tracing::trace;

use crate::types::SAMPLES_PER_FRAME;

/// Frames of peak history considered when picking the gain target
pub const GAIN_HISTORY_FRAMES: usize = 25;

/// Upper bound on the gain multiplier
pub const GAIN_CEILING: f32 = 50.0;

/// Peak output level the trajectory steers toward
pub const GAIN_TARGET_LEVEL: f32 = 30000.0;

/// Maximum gain recovery per frame, as a fraction of the current gain
pub const GAIN_RELEASE_STEP: f32 = 0.05;

/// Clipping bound for PCM conversion; inside full scale to leave headroom
pub const CLIP_LEVEL: f32 = 32760.0;

/// Adaptive output gain state for one decoder instance
///
/// Tracks a ring of recent per-frame peaks and a smoothed gain scalar that
/// carries from frame to frame. With adaptation disabled it degrades to a
/// single static multiplier.
#[derive(Debug, Clone)]
pub struct GainControl {
    auto: bool,
    base_gain: f32,
    gain: f32,
    history: [f32; GAIN_HISTORY_FRAMES],
    cursor: usize,
}

impl GainControl {
    /// Create gain state seeded with the given scalar
    pub fn new(auto: bool, base_gain: f32) -> Self {
        Self {
            auto,
            base_gain,
            gain: base_gain,
            history: [0.0; GAIN_HISTORY_FRAMES],
            cursor: 0,
        }
    }

    /// Current gain multiplier
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Whether the adaptive trajectory is active
    pub fn is_adaptive(&self) -> bool {
        self.auto
    }

    /// Restore the seed gain and forget all peak history
    pub fn reset(&mut self) {
        self.gain = self.base_gain;
        self.history = [0.0; GAIN_HISTORY_FRAMES];
        self.cursor = 0;
    }

    /// Apply one frame of gain to the reconstructed samples in place
    ///
    /// With adaptation off, every sample is scaled by the static gain and
    /// the history is untouched.
    pub fn process(&mut self, samples: &mut [f32; SAMPLES_PER_FRAME]) {
        if !self.auto {
            for s in samples.iter_mut() {
                *s *= self.gain;
            }
            return;
        }

        let mut peak = 0.0f32;
        for &s in samples.iter() {
            let level = s.abs();
            if level > peak {
                peak = level;
            }
        }

        self.history[self.cursor] = peak;
        self.cursor = (self.cursor + 1) % GAIN_HISTORY_FRAMES;

        // The window max includes the peak just written.
        let mut max = peak;
        for &h in self.history.iter() {
            if h > max {
                max = h;
            }
        }

        let mut target = if max > 0.0 {
            GAIN_TARGET_LEVEL / max
        } else {
            GAIN_CEILING
        };

        let delta;
        if target < self.gain {
            // Headroom shrank: take the lower gain for the whole frame.
            self.gain = target;
            delta = 0.0;
        } else {
            if target > GAIN_CEILING {
                target = GAIN_CEILING;
            }

            let mut step = target - self.gain;
            if step > GAIN_RELEASE_STEP * self.gain {
                step = GAIN_RELEASE_STEP * self.gain;
            }
            delta = step;
        }

        let per_sample = delta / SAMPLES_PER_FRAME as f32;
        for (n, s) in samples.iter_mut().enumerate() {
            *s *= self.gain + n as f32 * per_sample;
        }

        self.gain += SAMPLES_PER_FRAME as f32 * per_sample;

        trace!(
            "Gain trajectory: peak={:.1} target={:.3} gain={:.3}",
            peak,
            target,
            self.gain
        );
    }
}

/// Clip gain-adjusted samples and truncate to 16-bit PCM
pub fn write_pcm(samples: &[f32; SAMPLES_PER_FRAME], out: &mut [i16; SAMPLES_PER_FRAME]) {
    for (s, o) in samples.iter().zip(out.iter_mut()) {
        *o = s.clamp(-CLIP_LEVEL, CLIP_LEVEL) as i16;
    }
}
