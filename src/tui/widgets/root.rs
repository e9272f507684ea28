//! Root layout widget
//!
//! ┌────────┬────────┬────────┬────────┬────────┐
//! │        │        │        │        │        │
//! │ swatch │ swatch │ swatch │ swatch │ swatch │
//! │  #HEX  │  #HEX  │  #HEX  │  #HEX  │  #HEX  │
//! │  lock  │  lock  │  lock  │  lock  │  lock  │
//! ├────────┴────────┴────────┴────────┴────────┤
//! │ 5 colors · HEX · 1 locked   hints / toast  │
//! └────────────────────────────────────────────┘

use crate::app::state::AppState;
use crate::app::Engine;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use super::{help, status, swatches};

pub fn render(frame: &mut Frame, engine: &Engine, state: &mut AppState) {
    let theme = get_theme(state.dark_background);
    let root = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.palette.bg_primary)),
        root,
    );

    let rows = Layout::vertical([
        Constraint::Min(6),    // Swatches
        Constraint::Length(3), // Status bar
    ])
    .margin(1)
    .split(root);

    swatches::render(frame, &engine.swatches(), state, &theme, rows[0]);
    status::render(frame, engine, state, &theme, rows[1]);

    if state.show_help {
        help::render(frame, &theme, root);
    }
}
