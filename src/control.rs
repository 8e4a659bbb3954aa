use std::time::Duration;

use crossbeam::channel::Receiver;
use ringbuf::traits::Producer;
use ringbuf::HeapProd;

use crate::command::Command;
use crate::config::CONFIG;
use crate::display::{Status, StatusDisplay};
use crate::mix::FoldMode;
use crate::tuning::TuningState;
use crate::voices::NUM_VOICES;

/// Smallest level/gain movement worth republishing; swallows ADC noise.
pub const LEVEL_EPSILON: f32 = 0.004;
/// Detune change below this many cents does not trigger a retune.
pub const CENTS_EPSILON: f32 = 0.01;

/// One control-tick reading of the surface, already normalized.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlFrame {
    /// Per-voice amplitude, each in [0, 1].
    pub levels: [f32; NUM_VOICES],
    /// Shared detune/gain source in [0, 1].
    pub drive: f32,
    /// Fold selection, "activated this tick" per switch.
    pub fold_average: bool,
    pub fold_sine: bool,
    pub fold_triangle: bool,
    /// Signed encoder delta for root/mode navigation.
    pub step: i32,
}

/// Source of control readings, polled once per tick.
pub trait ControlSurface {
    fn poll(&mut self) -> ControlFrame;
}

/// Control-rate half of the engine: owns the musical selection and the
/// last published values, and turns surface readings into commands. A
/// value only counts as published once its push succeeded, so a full
/// queue retries on the next tick instead of wedging stale.
pub struct ControlState {
    tuning: TuningState,
    fold: FoldMode,
    levels: [f32; NUM_VOICES],
    gain: f32,
    levels_published: bool,
    gain_published: bool,
    retune_pending: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            tuning: TuningState::new(CONFIG.initial_root, CONFIG.initial_minor),
            fold: FoldMode::default(),
            levels: [0.0; NUM_VOICES],
            gain: 0.0,
            levels_published: false,
            gain_published: false,
            retune_pending: true,
        }
    }

    /// Process one surface reading: publish whatever changed, then
    /// report the state the display should show.
    pub fn tick(&mut self, frame: &ControlFrame, commands: &mut HeapProd<Command>) -> Status {
        let levels = frame.levels.map(|l| l.clamp(0.0, 1.0));
        let moved = levels
            .iter()
            .zip(&self.levels)
            .any(|(new, old)| (new - old).abs() > LEVEL_EPSILON);
        if (!self.levels_published || moved) && commands.try_push(Command::Levels(levels)).is_ok() {
            self.levels = levels;
            self.levels_published = true;
        }

        let drive = frame.drive.clamp(0.0, 1.0);
        if (!self.gain_published || (drive - self.gain).abs() > LEVEL_EPSILON)
            && commands.try_push(Command::Gain(drive)).is_ok()
        {
            self.gain = drive;
            self.gain_published = true;
        }

        // Switch priority follows declaration order when several fire in
        // the same tick.
        let selected = if frame.fold_average {
            Some(FoldMode::Average)
        } else if frame.fold_sine {
            Some(FoldMode::SineFold)
        } else if frame.fold_triangle {
            Some(FoldMode::TriangleFold)
        } else {
            None
        };
        if let Some(fold) = selected {
            if fold != self.fold && commands.try_push(Command::Fold(fold)).is_ok() {
                self.fold = fold;
            }
        }

        if frame.step != 0 {
            self.tuning.navigate(frame.step);
            self.retune_pending = true;
        }
        let cents = drive * CONFIG.max_detune_cents;
        if (cents - self.tuning.cents()).abs() > CENTS_EPSILON {
            self.tuning.set_cents(cents);
            self.retune_pending = true;
        }
        if self.retune_pending {
            let tone_set = self.tuning.tone_set();
            let cmd = Command::Retune {
                base_frequency: tone_set.base_frequency,
                semitones: self.tuning.semitones(),
                cents: self.tuning.cents(),
            };
            if commands.try_push(cmd).is_ok() {
                self.retune_pending = false;
            }
        }

        let tone_set = self.tuning.tone_set();
        Status {
            note: tone_set.note,
            sharp: tone_set.is_sharp,
            minor: self.tuning.is_minor(),
            fold: self.fold,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll, publish, render, sleep; runs until the shutdown channel fires.
pub fn run_control_loop<S, D>(
    mut surface: S,
    mut display: D,
    mut commands: HeapProd<Command>,
    shutdown: Receiver<()>,
) where
    S: ControlSurface,
    D: StatusDisplay,
{
    let mut state = ControlState::new();
    let tick = Duration::from_millis(CONFIG.control_tick_ms.max(1));
    loop {
        if shutdown.try_recv().is_ok() {
            break;
        }
        let frame = surface.poll();
        let status = state.tick(&frame, &mut commands);
        display.render(&status);
        std::thread::sleep(tick);
    }
}
