//! Swatch strip - one column per palette slot

use crate::app::state::AppState;
use crate::color::Rgb;
use crate::palette::Swatch;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, swatches: &[Swatch], state: &mut AppState, theme: &Theme, area: Rect) {
    if swatches.is_empty() {
        state.swatch_areas.clear();
        return;
    }

    let n = swatches.len() as u32;
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, n); swatches.len()])
        .horizontal_margin(1)
        .split(area);

    state.swatch_areas = columns.to_vec();

    for (swatch, col) in swatches.iter().zip(columns.iter()) {
        render_swatch(frame, swatch, swatch.index == state.selected, theme, *col);
    }
}

fn render_swatch(frame: &mut Frame, swatch: &Swatch, selected: bool, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    let rgb: Rgb = swatch.color.parse().unwrap_or(Rgb::BLACK);
    let fill = Color::Rgb(rgb.r, rgb.g, rgb.b);
    // Label contrast follows the swatch, not the theme
    let ink = if swatch.dark { Color::White } else { Color::Black };

    let mut block = Block::default().style(Style::default().bg(fill));
    if selected {
        block = block
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(ink).bg(fill));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let label_style = Style::default().fg(ink).bg(fill);
    let lock = if swatch.locked { icons.lock } else { icons.unlock };

    let label = vec![
        Line::from(Span::styled(
            truncate_str(&swatch.display, width),
            label_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(lock, label_style),
            Span::styled(format!(" {}", swatch.index + 1), label_style),
        ]),
        if selected {
            Line::from(Span::styled(icons.selected, label_style))
        } else {
            Line::default()
        },
    ];

    // Bottom-align the label
    let height = label.len() as u16;
    let label_area = Rect {
        y: inner.y + inner.height.saturating_sub(height),
        height: height.min(inner.height),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(label).alignment(Alignment::Center),
        label_area,
    );
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{truncated}…")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("#A1B2C3", 10), "#A1B2C3");
        assert_eq!(truncate_str("rgb(255, 0, 0)", 6), "rgb(2…");
        assert_eq!(truncate_str("#A1B2C3", 3), "#A1");
        assert_eq!(truncate_str("#A1B2C3", 0), "");
    }
}
