//! Help overlay showing keybindings

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help overlay centered over `area`
pub fn render(frame: &mut Frame, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    let area = centered(area, 64, 20);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .style(Style::default().bg(theme.palette.bg_primary))
        .title(format!(" {} Keybinds ", icons.help))
        .title_style(Style::default().fg(theme.palette.accent));

    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header("Palette", theme),
        keybind("Space / r", "Regenerate unlocked", theme),
        keybind("L / Enter", "Lock / unlock", theme),
        keybind("+ / =", "Add a color", theme),
        keybind("- / _", "Remove a color", theme),
        keybind("f", "Toggle HEX / RGB", theme),
        keybind("c / y", "Copy color", theme),
        keybind("s", "Save palette", theme),
    ];
    frame.render_widget(Paragraph::new(left_content).wrap(Wrap { trim: false }), cols[0]);

    let right_content = vec![
        section_header("Navigation", theme),
        keybind("h / Left", "Previous color", theme),
        keybind("l / Right", "Next color", theme),
        keybind("1-9", "Jump to color", theme),
        keybind("Click", "Copy color", theme),
        keybind("Right click", "Lock / unlock", theme),
        Line::default(),
        section_header("General", theme),
        keybind("b", "Toggle background", theme),
        keybind("?", "Close help", theme),
        keybind("q / Esc", "Quit", theme),
    ];
    frame.render_widget(Paragraph::new(right_content).wrap(Wrap { trim: false }), cols[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.palette.fg_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
