use std::f32::consts::TAU;

/// Phase-accumulating sine oscillator. Frequency changes take effect on
/// the next sample without touching the phase, so retuning never clicks.
#[derive(Clone, Copy)]
pub struct SineOsc {
    phase: f32,
    step: f32,
    sample_rate: f32,
}

impl SineOsc {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            step: 0.0,
            sample_rate,
        }
    }

    /// Zero the phase and adopt a new sample rate.
    pub fn initialise(&mut self, sample_rate: f32) {
        self.phase = 0.0;
        self.step = 0.0;
        self.sample_rate = sample_rate;
    }

    pub fn set_frequency(&mut self, freq: f32) {
        self.step = TAU * freq / self.sample_rate;
    }

    /// Emit the current sample, then advance one sample. The modulo
    /// wrap keeps the phase small and turns a non-finite frequency into
    /// NaN output instead of a runaway accumulator.
    pub fn process(&mut self) -> f32 {
        let sample = self.phase.sin();
        self.phase = (self.phase + self.step) % TAU;
        sample
    }
}

pub fn sine_fold(x: f32) -> f32 {
    x.sin()
}

/// Periodic triangular fold with period 4: reflects overshoot back into
/// [-1, 1] instead of clipping it.
/// https://www.desmos.com/calculator/ge2wvg2wgj
pub fn triangle_fold(x: f32) -> f32 {
    let q = x * 0.25;
    4.0 * ((q + 0.25 - (q + 0.25).round()).abs() - 0.25)
}
