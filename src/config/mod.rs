use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::palette::SizeBounds;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub palette: PaletteConfig,
    pub paths: PathsConfig,
    pub input: InputConfig,
    pub clipboard: ClipboardConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of colors in a freshly generated palette.
    pub default_size: usize,
    pub min_size: usize,
    pub max_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardPreference {
    /// OSC 52 when inside a terminal, else an external tool.
    #[default]
    Auto,
    Osc52,
    External,
    Off,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub backend: ClipboardPreference,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Dark backdrop behind the swatches (restored on startup)
    pub dark_background: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let b = SizeBounds::default();
        Self {
            default_size: b.default_size,
            min_size: b.min,
            max_size: b.max,
        }
    }
}

impl PaletteConfig {
    /// Size bounds with nonsense values repaired: min is at least 1, max is
    /// at least min, and the default sits inside.
    pub fn bounds(&self) -> SizeBounds {
        let min = self.min_size.max(1);
        let max = self.max_size.max(min);
        SizeBounds {
            min,
            max,
            default_size: self.default_size.clamp(min, max),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let proj = ProjectDirs::from("dev", "swatch", "swatch");
        let data_dir = proj
            .as_ref()
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("swatch"));
        Self { data_dir }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl Config {
    pub fn database_path(&self) -> PathBuf {
        self.paths.data_dir.join("palette.sqlite3")
    }

    pub fn log_path(&self) -> PathBuf {
        self.paths.data_dir.join("swatch.log")
    }
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    write_config(cfg, &path)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj =
        ProjectDirs::from("dev", "swatch", "swatch").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = Config::default();
        write_config(&cfg, &path)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn parse(raw: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str::<Config>(raw)?)
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial() {
        let cfg = parse(
            r#"
[palette]
default_size = 8

[clipboard]
backend = "osc52"
"#,
        )
        .unwrap();
        assert_eq!(cfg.palette.default_size, 8);
        assert_eq!(cfg.palette.max_size, 20);
        assert_eq!(cfg.clipboard.backend, ClipboardPreference::Osc52);
        assert!(cfg.input.mouse);
        assert!(!cfg.ui.dark_background);
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.palette.bounds(), SizeBounds::default());
        assert!(parse("[clipboard]\nbackend = \"carrier-pigeon\"").is_err());
    }

    #[test]
    fn test_bounds_repair() {
        let cfg = PaletteConfig {
            default_size: 50,
            min_size: 0,
            max_size: 12,
        };
        assert_eq!(
            cfg.bounds(),
            SizeBounds {
                min: 1,
                max: 12,
                default_size: 12
            }
        );

        let cfg = PaletteConfig {
            default_size: 1,
            min_size: 6,
            max_size: 3,
        };
        let b = cfg.bounds();
        assert_eq!((b.min, b.max, b.default_size), (6, 6, 6));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut cfg = Config::default();
        cfg.ui.dark_background = true;
        let raw = toml::to_string_pretty(&cfg).unwrap();
        let back = parse(&raw).unwrap();
        assert!(back.ui.dark_background);
        assert_eq!(back.paths.data_dir, cfg.paths.data_dir);
    }
}
