use cpal::traits::{DeviceTrait, HostTrait};
use crossbeam::channel::unbounded;
use ringbuf::traits::Split;
use ringbuf::HeapRb;

use drone_engine::audio_io;
use drone_engine::command::Command;
use drone_engine::config::CONFIG;
use drone_engine::control::{self, ControlFrame, ControlSurface};
use drone_engine::display::ConsoleDisplay;
use drone_engine::engine::DroneEngine;

/// Fixed panel values from the config file, standing in for the
/// hardware pots/switches/encoder until a real surface is wired.
struct StaticPanel {
    frame: ControlFrame,
}

impl StaticPanel {
    fn from_config() -> Self {
        Self {
            frame: ControlFrame {
                levels: CONFIG.levels,
                drive: CONFIG.drive,
                ..Default::default()
            },
        }
    }
}

impl ControlSurface for StaticPanel {
    fn poll(&mut self) -> ControlFrame {
        self.frame
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let host = cpal::default_host();
    let device = host.default_output_device().ok_or("no output device")?;
    let stream_config = device.default_output_config()?;
    let sample_rate = stream_config.sample_rate().0;

    let engine = DroneEngine::new(sample_rate as f32);
    let queue = HeapRb::<Command>::new(CONFIG.command_queue.max(1));
    let (producer, consumer) = queue.split();

    let (audio_tx, audio_rx) = unbounded();
    let (control_tx, control_rx) = unbounded();

    std::thread::spawn(move || {
        audio_io::run_audio_stream(engine, consumer, audio_rx);
    });

    ctrlc::set_handler(move || {
        let _ = audio_tx.send(());
        let _ = control_tx.send(());
    })?;

    log::info!("drone engine running at {sample_rate} Hz, press Ctrl+C to stop");
    control::run_control_loop(
        StaticPanel::from_config(),
        ConsoleDisplay::new(),
        producer,
        control_rx,
    );
    Ok(())
}
