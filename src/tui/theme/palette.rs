//! UI chrome colors. The swatches themselves bring their own.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    /// Black backdrop
    pub const MONO: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),          // #000000 pure black
        fg_primary: Color::Rgb(255, 255, 255),   // #ffffff white
        fg_secondary: Color::Rgb(136, 136, 136), // #888888 medium gray
        accent: Color::Rgb(255, 255, 255),       // #ffffff white
        border: Color::Rgb(64, 64, 64),          // #404040 dark gray
        success: Color::Rgb(200, 200, 200),      // #c8c8c8 light gray
        error: Color::Rgb(255, 255, 255),        // #ffffff white
    };

    /// White backdrop
    pub const PAPER: Self = Self {
        bg_primary: Color::Rgb(250, 250, 250),   // #fafafa off white
        fg_primary: Color::Rgb(24, 24, 24),      // #181818 near black
        fg_secondary: Color::Rgb(110, 110, 110), // #6e6e6e gray
        accent: Color::Rgb(0, 0, 0),             // #000000 black
        border: Color::Rgb(200, 200, 200),       // #c8c8c8 light gray
        success: Color::Rgb(64, 64, 64),         // #404040 dark gray
        error: Color::Rgb(0, 0, 0),              // #000000 black
    };
}

