#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// Input poll timed out; lets expired toasts clear without a keypress.
    Tick,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}
