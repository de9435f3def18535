//! Transport bar widget - shows piece, play state, cue timer, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{format_elapsed, Transport, UiStateInit};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    init: &UiStateInit,
    transport: Transport,
    elapsed: std::time::Duration,
    input_level: Option<f32>,
    audio_stats: &AudioStats,
) {
    let block = Block::default()
        .title(format!(" drone: {} ", init.piece))
        .borders(Borders::ALL);

    let (symbol, label, color) = match transport {
        Transport::Playing => ("▶", "Playing", Color::Green),
        Transport::Paused => ("⏸", "Paused", Color::Yellow),
        Transport::FadingOut => ("◢", "Fading out", Color::Magenta),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} {}  ", symbol, label),
            Style::default().fg(color),
        ),
        Span::styled(
            format!("{}  ", format_elapsed(elapsed)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz / {}  ", init.sample_rate / 1000.0, init.block_size),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(level) = input_level {
        spans.push(Span::styled(
            format!("Input: {:.2}  ", level),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(
        format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
        Style::default().fg(Color::Magenta),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
