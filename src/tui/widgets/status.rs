//! Bottom status bar: palette summary, hints, toasts

use crate::app::state::{AppState, ToastKind};
use crate::app::Engine;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, engine: &Engine, state: &AppState, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    let palette = &theme.palette;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg_primary))
        .title(format!(" {} swatch ", icons.brush))
        .title_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let locked = engine.state().locked.len();
    let mut spans = vec![
        Span::styled(
            format!(" {} colors", engine.size()),
            Style::default().fg(palette.fg_primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · ", Style::default().fg(palette.fg_secondary)),
        Span::styled(
            engine.display_format().as_str().to_uppercase(),
            Style::default().fg(palette.fg_primary),
        ),
        Span::styled(
            format!(" · {locked} locked  "),
            Style::default().fg(palette.fg_secondary),
        ),
    ];

    match &state.toast {
        Some(toast) => {
            let (icon, color) = match toast.kind {
                ToastKind::Success => (icons.success, palette.success),
                ToastKind::Error => (icons.error, palette.error),
            };
            spans.push(Span::styled(
                format!("{icon} {}", toast.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            "space regenerate · L lock · c copy · +/- size · f format · ? help",
            Style::default().fg(palette.fg_secondary),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
