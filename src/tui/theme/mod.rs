//! Theme configuration

pub mod palette;

pub use palette::Palette;
use ratatui::symbols::border;

/// Nerd Font glyphs (https://www.nerdfonts.com)
#[derive(Debug, Clone)]
pub struct Icons {
    pub lock: &'static str,
    pub unlock: &'static str,
    pub brush: &'static str,
    pub help: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub selected: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            lock: "\u{f023}",     // nf-fa-lock
            unlock: "\u{f09c}",   // nf-fa-unlock
            brush: "\u{f1fc}",    // nf-fa-paint_brush
            help: "\u{f059}",     // nf-fa-question_circle
            success: "\u{f00c}",  // nf-fa-check
            error: "\u{f00d}",    // nf-fa-times
            selected: "\u{f0d8}", // nf-fa-caret_up
        }
    }
}

/// Active theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new(dark_background: bool) -> Self {
        Self {
            palette: if dark_background {
                Palette::MONO
            } else {
                Palette::PAPER
            },
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }
}

pub fn get_theme(dark_background: bool) -> Theme {
    Theme::new(dark_background)
}
