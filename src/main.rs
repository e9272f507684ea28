mod app;
mod clipboard;
mod color;
mod config;
mod input;
mod palette;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Mutex;

use app::Engine;
use clipboard::Clipboard;
use palette::PaletteEngine;
use storage::{MemorySlots, SlotStore, Storage};

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about = "Harmonious color palettes in the terminal")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Keep the palette in memory only; nothing is read or written.
    #[arg(long)]
    ephemeral: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print the current palette.
    Show,
    /// Regenerate unlocked colors and print the palette.
    Generate,
    /// Change the number of colors.
    Resize {
        size: usize,
    },
    /// Lock or unlock a color (1-based, as shown by `show`).
    Lock {
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        slot: u16,
    },
    /// Set the display format: hex or rgb.
    Format {
        format: String,
    },
    /// Copy a color (1-based) to the clipboard in the display format.
    Copy {
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        slot: u16,
    },
    /// Dump the stored palette record.
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };
    let command = cli.command.unwrap_or(Command::Tui);

    init_tracing(&cfg, matches!(command, Command::Tui), cli.verbose)?;

    let mut engine = open_engine(&cfg, cli.ephemeral)?;

    match command {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path, engine);
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Show => print_palette(&engine),
        Command::Generate => {
            engine.regenerate();
            print_palette(&engine);
        }
        Command::Resize { size } => {
            engine.resize(size).context("resize palette")?;
            print_palette(&engine);
        }
        Command::Lock { slot } => {
            let locked = engine
                .toggle_lock(usize::from(slot) - 1)
                .context("toggle lock")?;
            println!("Color {slot} {}.", if locked { "locked" } else { "unlocked" });
        }
        Command::Format { format } => {
            let format = engine
                .set_display_format_str(&format)
                .context("set display format")?;
            println!("Display format set to {format}.");
        }
        Command::Copy { slot } => {
            let index = usize::from(slot) - 1;
            let color = engine
                .colors()
                .get(index)
                .cloned()
                .with_context(|| format!("no color {slot} (palette has {})", engine.size()))?;
            let mut clip = Clipboard::detect(cfg.clipboard.backend);
            let notice = clipboard::copy_color(&mut clip, &color, engine.display_format());
            println!("{}", notice.message());
        }
        Command::Json => match engine.store().raw()? {
            Some(raw) => {
                let v: serde_json::Value =
                    serde_json::from_str(&raw).context("parse stored palette")?;
                println!("{}", serde_json::to_string_pretty(&v)?);
            }
            None => println!("null"),
        },
    }

    Ok(())
}

fn open_engine(cfg: &config::Config, ephemeral: bool) -> anyhow::Result<Engine> {
    let slots: Box<dyn SlotStore> = if ephemeral {
        Box::new(MemorySlots::new())
    } else {
        let path = cfg.database_path();
        Box::new(Storage::open(&path).with_context(|| format!("open palette store {}", path.display()))?)
    };
    Ok(PaletteEngine::open(slots, cfg.palette.bounds()))
}

/// The TUI owns the terminal, so it logs to a file; headless commands log
/// warnings to stderr.
fn init_tracing(cfg: &config::Config, tui: bool, verbose: bool) -> anyhow::Result<()> {
    let level = match (verbose, tui) {
        (true, _) => tracing::Level::DEBUG,
        (false, true) => tracing::Level::INFO,
        (false, false) => tracing::Level::WARN,
    };
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level);

    if tui {
        let path = cfg.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn print_palette(engine: &Engine) {
    for (i, line) in engine.swatches().iter().enumerate() {
        let lock = if line.locked { "  [locked]" } else { "" };
        println!("{:02}. {}{}", i + 1, line.display, lock);
    }
}
