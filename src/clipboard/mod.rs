//! Clipboard access for copying colors
//!
//! Two mechanisms:
//! - OSC 52: the terminal sets the clipboard from a base64 escape sequence
//! - External tools: `pbcopy`, `clip`, `wl-copy`, `xclip` / `xsel`

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::color::{self, DisplayFormat};
use crate::config::ClipboardPreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    Osc52,
    External(ExternalBackend),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalBackend {
    MacOS,
    Windows,
    Wayland,
    X11,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    NotAvailable,
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAvailable => write!(f, "clipboard not available"),
            Self::WriteError(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Anything that can take text for the clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone)]
pub struct Clipboard {
    backend: ClipboardBackend,
}

impl Clipboard {
    /// Pick a backend honoring the configured preference.
    pub fn detect(preference: ClipboardPreference) -> Self {
        let backend = match preference {
            ClipboardPreference::Off => ClipboardBackend::Unavailable,
            ClipboardPreference::Osc52 => ClipboardBackend::Osc52,
            ClipboardPreference::External => detect_external_backend()
                .map(ClipboardBackend::External)
                .unwrap_or(ClipboardBackend::Unavailable),
            ClipboardPreference::Auto => match detect_external_backend() {
                Some(ext) => ClipboardBackend::External(ext),
                None if env::var_os("TERM").is_some() => ClipboardBackend::Osc52,
                None => ClipboardBackend::Unavailable,
            },
        };
        tracing::info!(backend = ?backend, "clipboard backend selected");
        Self { backend }
    }

    #[cfg(test)]
    pub fn backend(&self) -> ClipboardBackend {
        self.backend
    }
}

impl ClipboardSink for Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        tracing::debug!(backend = ?self.backend, bytes = text.len(), "clipboard write");
        match self.backend {
            ClipboardBackend::Osc52 => {
                let mut stdout = io::stdout();
                stdout
                    .write_all(osc52_sequence(text).as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| ClipboardError::WriteError(e.to_string()))
            }
            ClipboardBackend::External(backend) => set_external_backend(backend, text),
            ClipboardBackend::Unavailable => Err(ClipboardError::NotAvailable),
        }
    }
}

/// Result of a copy request, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Copied(String),
    Failed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Copied(text) => format!("Copied: {text}"),
            Notice::Failed(reason) => format!("Copy failed: {reason}"),
        }
    }
}

/// Format a color and put it on the clipboard.
pub fn copy_color(sink: &mut impl ClipboardSink, color: &str, format: DisplayFormat) -> Notice {
    let text = color::format_color(color, format);
    match sink.write_text(&text) {
        Ok(()) => Notice::Copied(text),
        Err(e) => {
            tracing::warn!(error = %e, "copy failed");
            Notice::Failed(e.to_string())
        }
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

fn detect_external_backend() -> Option<ExternalBackend> {
    [
        ExternalBackend::MacOS,
        ExternalBackend::Windows,
        ExternalBackend::Wayland,
        ExternalBackend::X11,
    ]
    .into_iter()
    .find(|&b| external_backend_available(b))
}

fn external_backend_available(backend: ExternalBackend) -> bool {
    match backend {
        ExternalBackend::MacOS => cfg!(target_os = "macos") && command_exists("pbcopy"),
        ExternalBackend::Windows => cfg!(target_os = "windows") && command_exists("clip"),
        ExternalBackend::Wayland => {
            env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy")
        }
        ExternalBackend::X11 => {
            env::var_os("DISPLAY").is_some() && (command_exists("xclip") || command_exists("xsel"))
        }
    }
}

fn command_exists(command: &str) -> bool {
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(command).is_file();
    }
    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path_var).any(|dir| {
        dir.join(command).is_file()
            || (cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file())
    })
}

fn set_external_backend(backend: ExternalBackend, content: &str) -> Result<(), ClipboardError> {
    match backend {
        ExternalBackend::MacOS => run_command_with_input("pbcopy", &[], content),
        ExternalBackend::Windows => run_command_with_input("clip", &[], content),
        ExternalBackend::Wayland => run_command_with_input("wl-copy", &[], content),
        ExternalBackend::X11 => {
            if run_command_with_input("xclip", &["-selection", "clipboard"], content).is_ok() {
                Ok(())
            } else {
                run_command_with_input("xsel", &["--clipboard", "--input"], content)
            }
        }
    }
}

fn run_command_with_input(cmd: &str, args: &[&str], content: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| ClipboardError::WriteError(err.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|err| ClipboardError::WriteError(err.to_string()))?;
    }

    let status = child
        .wait()
        .map_err(|err| ClipboardError::WriteError(err.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::WriteError(format!(
            "clipboard command failed: {cmd}"
        )))
    }
}
