//! Drone - audio device setup and the control loop

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rand::{rngs::StdRng, SeedableRng};
use rtrb::RingBuffer;
use std::sync::Arc;

use super::ui::{StatusLine, UiApp, UiStateInit};

use drone_chance::{
    dsp::level::peak_level_interleaved,
    synth::{BlockStream, Composer, PieceConfig, SharedLevel},
    DEFAULT_BLOCK_SIZE,
};

/// Mixed samples kept for the scope view.
const SCOPE_QUEUE_SIZE: usize = 8192;

pub struct Drone {
    piece: PieceConfig,
    block_size: usize,
}

impl Drone {
    pub fn new(piece: PieceConfig) -> Self {
        Self {
            piece,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Open the devices and run the control surface until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let status = StatusLine::default();
        let mut rng = StdRng::from_entropy();
        let voices = self
            .piece
            .build_voices(sample_rate, &mut rng)
            .wrap_err_with(|| format!("failed to build voices for '{}'", self.piece.name))?;
        let frequencies: Vec<f32> = voices.iter().map(|voice| voice.frequency()).collect();

        let (composer, handle) = Composer::with_handle(voices, rand::random());
        let mut stream = BlockStream::new(composer, self.block_size);

        // Microphone level, written by the input callback, read by the output callback.
        let input_level = Arc::new(SharedLevel::default());
        let listening = self.piece.listens_to_input();
        let input_stream = if listening {
            open_input(&host, input_level.clone(), &status)
        } else {
            None
        };
        let listening = listening && input_stream.is_some();

        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
        let level_for_audio = input_level.clone();
        let output_status = status.clone();

        let output = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let level = listening.then(|| level_for_audio.load());
                stream.fill_interleaved(data, channels, level, |block| {
                    for &sample in block {
                        if scope_tx.push(sample).is_err() {
                            break;
                        }
                    }
                });
            },
            move |err| output_status.set(format!("Audio output error: {err}")),
            None,
        )?;
        output.play().wrap_err("failed to start output stream")?;

        let init = UiStateInit {
            piece: self.piece.name.clone(),
            sample_rate,
            block_size: self.block_size,
            frequencies,
            listening,
        };
        let mut app = UiApp::new(init, self.piece, handle, scope_rx, input_level, rng, status);

        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();
        result
    }
}

/// Open the default input device and keep `level` updated with its peak level.
///
/// Returns `None` (with the reason on the status line) when no usable input
/// exists; the drone then plays without feedback.
fn open_input(
    host: &cpal::Host,
    level: Arc<SharedLevel>,
    status: &StatusLine,
) -> Option<cpal::Stream> {
    let device = match host.default_input_device() {
        Some(device) => device,
        None => {
            status.set("No input device found; playing without input feedback");
            return None;
        }
    };
    let config = match device.default_input_config() {
        Ok(config) => config,
        Err(err) => {
            status.set(format!(
                "Failed to fetch input config ({err}); playing without input feedback"
            ));
            return None;
        }
    };
    let channels = config.channels() as usize;

    let stream = device.build_input_stream(
        &config.into(),
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            level.store(peak_level_interleaved(data, channels));
        },
        {
            let status = status.clone();
            move |err: cpal::StreamError| status.set(format!("Audio input error: {err}"))
        },
        None,
    );
    let stream = match stream {
        Ok(stream) => stream,
        Err(err) => {
            status.set(format!(
                "Failed to open input stream ({err}); playing without input feedback"
            ));
            return None;
        }
    };
    if let Err(err) = stream.play() {
        status.set(format!(
            "Failed to start input stream ({err}); playing without input feedback"
        ));
        return None;
    }
    Some(stream)
}
