//! Per-voice amplitude bars

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// Render one bar per voice, labelled with its frequency.
pub fn render_meters(frame: &mut Frame, area: Rect, frequencies: &[f32], amplitudes: &[f32]) {
    let block = Block::default().title(" Voices ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if frequencies.is_empty() {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); frequencies.len()])
        .split(inner);

    for ((row, &frequency), &amplitude) in rows.iter().zip(frequencies).zip(amplitudes) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(bar_color(amplitude)))
            .ratio(f64::from(amplitude.clamp(0.0, 1.0)))
            .label(format!("{frequency:>8.2} Hz  {amplitude:.3}"));
        frame.render_widget(gauge, *row);
    }
}

fn bar_color(amplitude: f32) -> Color {
    if amplitude > 0.5 {
        Color::Red
    } else if amplitude > 0.2 {
        Color::Yellow
    } else {
        Color::Green
    }
}
