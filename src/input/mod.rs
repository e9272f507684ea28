use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::AppState;
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            let ev = if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => {
                        Event::Input(InputEvent::Key(k))
                    }
                    Ok(CtEvent::Mouse(m)) => Event::Input(InputEvent::Mouse(m)),
                    Ok(CtEvent::Resize(_, _)) => Event::Input(InputEvent::Resize),
                    Ok(_) | Err(_) => continue,
                }
            } else {
                Event::Tick
            };
            if tx.blocking_send(ev).is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Redraw),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                state.swatch_at(m.column, m.row).map(Action::Copy)
            }
            MouseEventKind::Down(MouseButton::Right) => {
                state.swatch_at(m.column, m.row).map(Action::ToggleLock)
            }
            MouseEventKind::ScrollUp => Some(Action::SelectPrev),
            MouseEventKind::ScrollDown => Some(Action::SelectNext),
            _ => None,
        },
        InputEvent::Key(k) if state.show_help => match k.code {
            KeyCode::Char('q') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            // Any key closes the help overlay
            _ => Some(Action::ToggleHelp),
        },
        InputEvent::Key(k) => handle_key(k),
    }
}

fn handle_key(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        // Palette
        KeyCode::Char(' ') | KeyCode::Char('r') => Some(Action::Regenerate),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Grow),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::Shrink),
        KeyCode::Char('f') => Some(Action::CycleFormat),
        KeyCode::Char('s') => Some(Action::Save),
        KeyCode::Char('L') | KeyCode::Enter => Some(Action::ToggleLockSelected),
        KeyCode::Char('c') | KeyCode::Char('y') => Some(Action::CopySelected),

        // Cursor - vim style
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SelectPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SelectNext),
        KeyCode::Char(d @ '1'..='9') => Some(Action::Select(d as usize - '1' as usize)),

        // View
        KeyCode::Char('b') => Some(Action::ToggleBackground),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(button: MouseButton, column: u16, row: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_palette_keys() {
        let s = AppState::new();
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char(' '))), Some(Action::Regenerate));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('+'))), Some(Action::Grow));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('-'))), Some(Action::Shrink));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('f'))), Some(Action::CycleFormat));
        assert_eq!(
            map_input_to_action(&s, key(KeyCode::Char('L'))),
            Some(Action::ToggleLockSelected)
        );
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('c'))), Some(Action::CopySelected));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('3'))), Some(Action::Select(2)));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let s = AppState::new();
        let ev = InputEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_input_to_action(&s, ev), Some(Action::Quit));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut s = AppState::new();
        s.show_help = true;
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char(' '))), Some(Action::ToggleHelp));
        assert_eq!(map_input_to_action(&s, key(KeyCode::Char('q'))), Some(Action::ToggleHelp));
    }

    #[test]
    fn test_mouse_hits_swatches() {
        let mut s = AppState::new();
        s.swatch_areas = vec![Rect::new(0, 0, 10, 10), Rect::new(10, 0, 10, 10)];
        assert_eq!(
            map_input_to_action(&s, click(MouseButton::Left, 12, 3)),
            Some(Action::Copy(1))
        );
        assert_eq!(
            map_input_to_action(&s, click(MouseButton::Right, 2, 3)),
            Some(Action::ToggleLock(0))
        );
        assert_eq!(map_input_to_action(&s, click(MouseButton::Left, 40, 3)), None);
    }
}
