use ratatui::layout::Rect;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

pub struct AppState {
    pub should_quit: bool,

    /// Slot under the cursor
    pub selected: usize,
    pub show_help: bool,
    pub dark_background: bool,

    /// Where each swatch was drawn last frame, for mouse hit-testing
    pub swatch_areas: Vec<Rect>,

    pub toast: Option<Toast>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            selected: 0,
            show_help: false,
            dark_background: false,
            swatch_areas: Vec::new(),
            toast: None,
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, size: usize) {
        self.selected = (self.selected + 1).min(size.saturating_sub(1));
    }

    /// Keep the cursor on an existing slot after the palette shrinks.
    pub fn clamp_selection(&mut self, size: usize) {
        self.selected = self.selected.min(size.saturating_sub(1));
    }

    /// Index of the swatch drawn at a screen cell.
    pub fn swatch_at(&self, column: u16, row: u16) -> Option<usize> {
        self.swatch_areas.iter().position(|r| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
    }
}
