// SPDX-License-Identifier: MPL-2.0

use cosmic::cosmic_config::{self, cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application ID used for cosmic-config storage and window identification.
pub const APP_ID: &str = "io.github.hypr.ControlCenter";

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// Hyprland config directory (default `~/.config/hypr`)
    pub hypr_dir: Option<String>,
    /// Desktop theme assets directory (default `~/.config/Elysia`)
    pub elysia_dir: Option<String>,
    /// fastfetch config used by the About page
    pub fastfetch_config: Option<String>,
    /// swww transition type
    pub wallpaper_transition: Transition,
    /// swww transition step
    pub wallpaper_transition_step: u32,
    /// swww transition frame rate
    pub wallpaper_transition_fps: u32,
    /// Log at debug level instead of info
    pub debug_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hypr_dir: None,
            elysia_dir: None,
            fastfetch_config: None,
            wallpaper_transition: Transition::Grow,
            wallpaper_transition_step: 10,
            wallpaper_transition_fps: 60,
            debug_logging: false,
        }
    }
}

/// `swww img --transition-type` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    None,
    Simple,
    Fade,
    Left,
    Right,
    Top,
    Bottom,
    Wipe,
    Wave,
    #[default]
    Grow,
    Center,
    Any,
    Outer,
    Random,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::None => "none",
            Transition::Simple => "simple",
            Transition::Fade => "fade",
            Transition::Left => "left",
            Transition::Right => "right",
            Transition::Top => "top",
            Transition::Bottom => "bottom",
            Transition::Wipe => "wipe",
            Transition::Wave => "wave",
            Transition::Grow => "grow",
            Transition::Center => "center",
            Transition::Any => "any",
            Transition::Outer => "outer",
            Transition::Random => "random",
        }
    }
}

impl Config {
    /// Load the stored configuration, falling back to defaults on any error.
    pub fn load() -> Self {
        let handler = match cosmic_config::Config::new(APP_ID, Self::VERSION) {
            Ok(handler) => handler,
            Err(err) => {
                log::warn!("config unavailable, using defaults: {err}");
                return Self::default();
            }
        };
        match Self::get_entry(&handler) {
            Ok(config) => config,
            Err((errors, config)) => {
                for err in errors {
                    log::warn!("config entry error: {err}");
                }
                config
            }
        }
    }

    /// Resolve every filesystem location the pages use.
    pub fn paths(&self) -> Paths {
        let config_dir = dirs::config_dir().unwrap_or_else(|| home().join(".config"));
        Paths::resolve(self, &config_dir)
    }
}

/// Filesystem locations derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub hypr_dir: PathBuf,
    pub elysia_dir: PathBuf,
    pub fastfetch_config: PathBuf,
}

impl Paths {
    fn resolve(config: &Config, config_dir: &Path) -> Self {
        let pick = |value: &Option<String>, default: PathBuf| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(expand_home)
                .unwrap_or(default)
        };

        Self {
            hypr_dir: pick(&config.hypr_dir, config_dir.join("hypr")),
            elysia_dir: pick(&config.elysia_dir, config_dir.join("Elysia")),
            fastfetch_config: pick(
                &config.fastfetch_config,
                config_dir.join("fastfetch").join("sys-config.jsonc"),
            ),
        }
    }

    pub fn hyprland_conf(&self) -> PathBuf {
        self.hypr_dir.join("hyprland.conf")
    }

    pub fn wallpaper_root(&self) -> PathBuf {
        self.elysia_dir.join("wallpaper")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.elysia_dir.join("assets").join("assets")
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Expand a leading `~/` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None if value == "~" => home(),
        None => PathBuf::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_live_under_config_dir() {
        let paths = Paths::resolve(&Config::default(), Path::new("/cfg"));
        assert_eq!(
            paths,
            Paths {
                hypr_dir: PathBuf::from("/cfg/hypr"),
                elysia_dir: PathBuf::from("/cfg/Elysia"),
                fastfetch_config: PathBuf::from("/cfg/fastfetch/sys-config.jsonc"),
            }
        );
        assert_eq!(paths.hyprland_conf(), PathBuf::from("/cfg/hypr/hyprland.conf"));
        assert_eq!(paths.wallpaper_root(), PathBuf::from("/cfg/Elysia/wallpaper"));
        assert_eq!(paths.assets_dir(), PathBuf::from("/cfg/Elysia/assets/assets"));
    }

    #[test]
    fn overrides_win_and_blank_is_ignored() {
        let config = Config {
            hypr_dir: Some("/etc/hypr".into()),
            elysia_dir: Some("   ".into()),
            ..Config::default()
        };
        let paths = Paths::resolve(&config, Path::new("/cfg"));
        assert_eq!(paths.hypr_dir, PathBuf::from("/etc/hypr"));
        assert_eq!(paths.elysia_dir, PathBuf::from("/cfg/Elysia"));
    }

    #[test]
    fn transition_names_match_swww() {
        assert_eq!(Config::default().wallpaper_transition, Transition::Grow);
        assert_eq!(Transition::default().as_str(), "grow");
        assert_eq!(Transition::Wipe.as_str(), "wipe");
    }

    #[test]
    fn tilde_expands_to_home() {
        assert_eq!(expand_home("~/themes"), home().join("themes"));
        assert_eq!(expand_home("/abs"), PathBuf::from("/abs"));
    }
}
