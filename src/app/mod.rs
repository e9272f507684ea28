pub mod actions;
pub mod events;
pub mod state;

use crate::clipboard::{self, Clipboard, Notice};
use crate::config::Config;
use crate::input;
use crate::palette::PaletteEngine;
use crate::storage::SlotStore;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::Event;
use state::{AppState, Toast};
use tokio::sync::mpsc;

pub type Engine = PaletteEngine<Box<dyn SlotStore>>;

pub struct App {
    cfg: Config,
    config_path: std::path::PathBuf,
    state: AppState,
    engine: Engine,
    clipboard: Clipboard,
}

impl App {
    pub fn new(cfg: Config, config_path: std::path::PathBuf, engine: Engine) -> Self {
        let clipboard = Clipboard::detect(cfg.clipboard.backend);

        let mut state = AppState::new();
        state.dark_background = cfg.ui.dark_background;
        if let Some(err) = engine.last_persist_error() {
            state.toast = Some(Toast::error(format!("Palette not saved: {err}")));
        }

        Self {
            cfg,
            config_path,
            state,
            engine,
            clipboard,
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());

        tui::draw(terminal, &self.engine, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action);
                    }
                }
                Event::Tick => {
                    // Only redraw when a toast needs clearing.
                    if !self.state.toast.as_ref().is_some_and(Toast::is_expired) {
                        continue;
                    }
                }
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &self.engine, &mut self.state)?;
        }

        self.save_state_on_quit();

        Ok(())
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.ui.dark_background = self.state.dark_background;
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!(error = %format!("{e:#}"), "failed to save config");
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Redraw => {}
            Action::Regenerate => {
                self.engine.regenerate();
                self.report_persistence();
            }
            Action::Grow => match self.engine.grow() {
                Ok(()) => self.report_persistence(),
                Err(e) => self.state.toast = Some(Toast::error(e.to_string())),
            },
            Action::Shrink => match self.engine.shrink() {
                Ok(()) => {
                    self.state.clamp_selection(self.engine.size());
                    self.report_persistence();
                }
                Err(e) => self.state.toast = Some(Toast::error(e.to_string())),
            },
            Action::CycleFormat => {
                self.engine.cycle_display_format();
                self.report_persistence();
            }
            Action::Save => {
                self.state.toast = Some(if self.engine.save() {
                    Toast::success("Palette saved!")
                } else {
                    Toast::error(format!(
                        "Palette not saved: {}",
                        self.engine.last_persist_error().unwrap_or("unknown error")
                    ))
                });
            }
            Action::ToggleLock(index) => {
                self.state.selected = index;
                match self.engine.toggle_lock(index) {
                    Ok(_) => self.report_persistence(),
                    Err(e) => self.state.toast = Some(Toast::error(e.to_string())),
                }
            }
            Action::ToggleLockSelected => self.handle_action(Action::ToggleLock(self.state.selected)),
            Action::Copy(index) => {
                self.state.selected = index;
                let Some(color) = self.engine.colors().get(index).cloned() else {
                    return;
                };
                let notice = clipboard::copy_color(
                    &mut self.clipboard,
                    &color,
                    self.engine.display_format(),
                );
                self.state.toast = Some(match &notice {
                    Notice::Copied(_) => Toast::success(notice.message()),
                    Notice::Failed(_) => Toast::error(notice.message()),
                });
            }
            Action::CopySelected => self.handle_action(Action::Copy(self.state.selected)),
            Action::SelectPrev => self.state.select_prev(),
            Action::SelectNext => self.state.select_next(self.engine.size()),
            Action::Select(index) => {
                if index < self.engine.size() {
                    self.state.selected = index;
                }
            }
            Action::ToggleBackground => {
                self.state.dark_background = !self.state.dark_background;
            }
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
        }
    }

    /// Surface a failed write-through as a toast; the palette itself has
    /// already changed.
    fn report_persistence(&mut self) {
        if let Some(err) = self.engine.last_persist_error() {
            self.state.toast = Some(Toast::error(format!("Palette not saved: {err}")));
        }
    }
}
