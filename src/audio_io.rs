use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use crossbeam::channel::{Receiver, RecvTimeoutError};
use ringbuf::traits::Consumer;
use ringbuf::HeapCons;
use std::time::Duration;

use crate::engine::DroneEngine;

/// Open the default output device and run the engine inside its
/// callback until the shutdown channel fires. The callback drains
/// pending commands at each block boundary, then renders; it takes no
/// locks and never fails.
pub fn run_audio_stream(
    mut engine: DroneEngine,
    mut commands: HeapCons<crate::command::Command>,
    shutdown: Receiver<()>,
) {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .expect("no output device available");
    let supported_config = device.default_output_config().expect("no default config");
    let sample_format = supported_config.sample_format();
    let config: StreamConfig = supported_config.into();

    let audio_callback = move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
        while let Some(cmd) = commands.try_pop() {
            engine.handle_command(cmd);
        }
        engine.process_block(data);
    };
    let err_fn = |err| log::error!("stream error: {err}");

    let stream = match sample_format {
        SampleFormat::F32 => device
            .build_output_stream(&config, audio_callback, err_fn, None)
            .unwrap(),
        _ => panic!("Unsupported sample format"),
    };
    stream.play().unwrap();

    // Keep the stream alive until asked to stop.
    loop {
        match shutdown.recv_timeout(Duration::from_millis(100)) {
            Err(RecvTimeoutError::Timeout) => {}
            _ => break,
        }
    }
}
