use crate::mix::FoldMode;
use crate::voices::NUM_VOICES;

/// Messages published by the control loop and drained by the audio
/// callback at the next block boundary. `Retune` carries the complete
/// per-voice parameter set so the audio side never sees a chord with
/// some voices on the old key.
#[derive(Debug)]
pub enum Command {
    Levels([f32; NUM_VOICES]),
    Gain(f32),
    Fold(FoldMode),
    Retune {
        base_frequency: f32,
        semitones: [i32; NUM_VOICES],
        cents: f32,
    },
}
