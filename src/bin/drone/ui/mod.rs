//! TUI module for drone
//!
//! The performer's control surface: play/pause, cue-P fade out, a cue timer,
//! per-voice amplitude bars, and a scope of the mix.

mod meters;
pub mod state;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use drone_chance::{
    dsp::EnvelopeMode,
    synth::{ComposerHandle, PieceConfig, SharedLevel},
};

pub use state::{StatusLine, UiStateInit};
use state::{CueTimer, Transport};

use meters::render_meters;
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Scope buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    init: UiStateInit,
    piece: PieceConfig,
    handle: ComposerHandle,
    /// Ring buffer receiver for mixed samples
    audio_rx: Consumer<f32>,
    input_level: Arc<SharedLevel>,
    /// Draws fade-in amplitudes on restart
    rng: StdRng,
    status: StatusLine,
    audio_buffer: Vec<f32>,
    amplitudes: Vec<f32>,
    transport: Transport,
    timer: CueTimer,
    /// First quit key seen; the second one quits.
    confirm_quit: bool,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        init: UiStateInit,
        piece: PieceConfig,
        handle: ComposerHandle,
        audio_rx: Consumer<f32>,
        input_level: Arc<SharedLevel>,
        rng: StdRng,
        status: StatusLine,
    ) -> Self {
        let voices = handle.voice_count();
        Self {
            init,
            piece,
            handle,
            audio_rx,
            input_level,
            rng,
            status,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            amplitudes: vec![0.0; voices],
            transport: Transport::Paused,
            timer: CueTimer::default(),
            confirm_quit: false,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_meters();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~30fps is plenty for slow drifts
            if event::poll(Duration::from_millis(33))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        // Leave the stream silent while it is torn down.
        self.handle.set_all_modes(EnvelopeMode::Silent);
        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE mixed samples
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        let mut new_samples = Vec::with_capacity(available);
        while let Ok(sample) = self.audio_rx.pop() {
            new_samples.push(sample);
        }

        self.audio_buffer.extend(new_samples);
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn poll_meters(&mut self) {
        for (slot, amplitude) in self.amplitudes.iter_mut().zip(self.handle.meters().iter()) {
            *slot = amplitude;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let quit_key = matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc);
        if quit_key {
            self.should_quit = self.confirm_quit;
            self.confirm_quit = true;
            return;
        }
        self.confirm_quit = false;

        match key {
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.fade_out(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.timer.reset(Instant::now()),
            KeyCode::Char('c') | KeyCode::Char('C') => self.status.clear(),
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        if self.transport == Transport::Playing {
            if self.handle.set_all_modes(EnvelopeMode::Silent) {
                self.transport = Transport::Paused;
            } else {
                self.status.set("Control queue full; pause not sent, press Space again");
            }
            return;
        }

        // Negative starting amplitudes so each voice fades back in on its own time.
        for voice in 0..self.handle.voice_count() {
            let from = self.piece.restart_amplitude(&mut self.rng);
            if !self.handle.fade_in(voice, from) {
                self.status
                    .set(format!("Control queue full; voice {voice} did not restart"));
            }
        }
        self.transport = Transport::Playing;
        self.timer.start(Instant::now());
    }

    fn fade_out(&mut self) {
        if !self.handle.set_all_modes(EnvelopeMode::Releasing) {
            self.status.set("Control queue full; fade out not sent, press P again");
            return;
        }
        self.transport = Transport::FadingOut;
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                   // Transport bar
                Constraint::Length(self.amplitudes.len() as u16 + 2),    // Voice meters
                Constraint::Min(6),                                      // Scope
                Constraint::Length(1),                                   // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        let input_level = self.init.listening.then(|| self.input_level.load());
        render_transport(
            frame,
            chunks[0],
            &self.init,
            self.transport,
            self.timer.elapsed(Instant::now()),
            input_level,
            &stats,
        );
        render_meters(frame, chunks[1], &self.init.frequencies, &self.amplitudes);
        render_waveform(frame, chunks[2], &self.audio_buffer, self.amplitudes.len());

        let help = if self.confirm_quit {
            Paragraph::new(" Press Q again to quit, any other key to stay")
                .style(Style::default().fg(Color::Red))
        } else if let Some(message) = self.status.get() {
            Paragraph::new(format!(" {message}  [C] Clear"))
                .style(Style::default().fg(Color::Yellow))
        } else {
            Paragraph::new(" [Space] Play/Pause  [P] Cue P fade out  [R] Reset timer  [C] Clear  [Q] Quit")
                .style(Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(help, chunks[3]);
    }
}
