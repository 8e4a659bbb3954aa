use crate::command::Command;
use crate::mix::{mix, FoldMode};
use crate::voices::{DroneVoice, NUM_VOICES};

/// Audio-rate owner of the voice bank and mix state. Lives inside the
/// audio callback; all mutation arrives as commands applied between
/// blocks, so a block is always rendered from one consistent parameter
/// set.
pub struct DroneEngine {
    voices: [DroneVoice; NUM_VOICES],
    fold: FoldMode,
    gain: f32,
}

impl DroneEngine {
    /// Boots silent: zero gain, zero amplitudes. The first control tick
    /// publishes the audible state.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: std::array::from_fn(|_| DroneVoice::new(sample_rate)),
            fold: FoldMode::default(),
            gain: 0.0,
        }
    }

    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Levels(levels) => {
                for (voice, level) in self.voices.iter_mut().zip(levels) {
                    voice.set_amplitude(level);
                }
            }
            Command::Gain(gain) => {
                self.gain = gain.clamp(0.0, 1.0);
            }
            Command::Fold(fold) => {
                self.fold = fold;
            }
            Command::Retune {
                base_frequency,
                semitones,
                cents,
            } => {
                for (voice, semitone) in self.voices.iter_mut().zip(semitones) {
                    voice.set_tuning(base_frequency, semitone as f32, cents);
                }
            }
        }
    }

    /// Render one interleaved stereo block. Never fails; a non-finite
    /// frame is replaced with silence.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        buffer.fill(0.0);
        let frames = buffer.len() / 2;
        for i in 0..frames {
            let mut outputs = [(0.0f32, 0.0f32); NUM_VOICES];
            for (out, voice) in outputs.iter_mut().zip(self.voices.iter_mut()) {
                *out = voice.process();
            }
            let (l, r) = mix(&outputs, self.fold, self.gain);
            buffer[i * 2] = if l.is_finite() { l } else { 0.0 };
            buffer[i * 2 + 1] = if r.is_finite() { r } else { 0.0 };
        }
    }

    pub fn fold(&self) -> FoldMode {
        self.fold
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn voices(&self) -> &[DroneVoice; NUM_VOICES] {
        &self.voices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::voice_semitones;

    fn retune(minor: bool) -> Command {
        Command::Retune {
            base_frequency: 55.0,
            semitones: voice_semitones(minor),
            cents: 2.0,
        }
    }

    #[test]
    fn boots_silent() {
        let mut engine = DroneEngine::new(48_000.0);
        let mut buffer = [1.0f32; 256];
        engine.process_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn commands_bring_the_drone_up() {
        let mut engine = DroneEngine::new(48_000.0);
        engine.handle_command(retune(false));
        engine.handle_command(Command::Levels([0.8; NUM_VOICES]));
        engine.handle_command(Command::Gain(1.0));
        let mut buffer = [0.0f32; 1024];
        engine.process_block(&mut buffer);
        assert!(buffer.iter().any(|&s| s.abs() > 1e-4));
        assert!(buffer.iter().all(|&s| s.is_finite()));
    }

    #[test]
    fn average_mode_stays_inside_gain_bound() {
        let mut engine = DroneEngine::new(48_000.0);
        engine.handle_command(retune(true));
        engine.handle_command(Command::Levels([1.0; NUM_VOICES]));
        engine.handle_command(Command::Gain(0.5));
        let mut buffer = [0.0f32; 2048];
        engine.process_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s.abs() <= 0.5 + 1e-5));
    }

    #[test]
    fn retune_applies_whole_chord() {
        let mut engine = DroneEngine::new(48_000.0);
        engine.handle_command(retune(true));
        let expected = voice_semitones(true);
        for (voice, semitone) in engine.voices().iter().zip(expected) {
            let hz = 55.0 * 2.0f32.powf(semitone as f32 / 12.0);
            assert!((voice.frequency() - hz).abs() < 1e-2);
        }
    }

    #[test]
    fn fold_and_gain_commands_update_mix_state() {
        let mut engine = DroneEngine::new(48_000.0);
        assert_eq!(engine.fold(), FoldMode::Average);
        engine.handle_command(Command::Fold(FoldMode::TriangleFold));
        assert_eq!(engine.fold(), FoldMode::TriangleFold);
        engine.handle_command(Command::Gain(1.5));
        assert!((engine.gain() - 1.0).abs() < 1e-6);
    }
}
