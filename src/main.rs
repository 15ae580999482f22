// SPDX-License-Identifier: MPL-2.0

//! Hyprland Control Center
//!
//! A settings window for Hyprland desktops. Each page drives a system tool
//! (`bluetoothctl`, `hyprctl`, `nmcli`, `pactl`, `upower`, `df`, ...) or edits one of
//! the Hyprland include files in place.
//!
//! # Layout
//!
//! - `app`: window, home tiles, navigation and subscriptions
//! - `pages`: one controller per settings page
//! - `editor`: header-preserving editor for the Hyprland include files
//! - `command`: thin wrappers over `std::process::Command`
//! - `config`: cosmic-config entry and resolved paths
//! - `error`: crate error type
//! - `i18n`: Fluent localization

mod app;
mod command;
mod config;
mod editor;
mod error;
mod i18n;
mod pages;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// `<state dir>/hypr-control-center/control-center.log`, or under `/tmp`.
fn log_path() -> PathBuf {
    dirs::state_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("hypr-control-center")
        .join("control-center.log")
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Log to a file, or to stderr when the file cannot be opened.
///
/// `RUST_LOG` overrides the level chosen from config.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    let path = log_path();
    match open_log_file(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(err) => eprintln!("cannot open {}: {err}; logging to stderr", path.display()),
    }

    builder.init();
}

fn main() -> cosmic::iced::Result {
    let config = config::Config::load();
    init_logging(config.debug_logging);

    log::info!("starting hypr-control-center {}", env!("CARGO_PKG_VERSION"));

    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    i18n::init(&requested_languages);

    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(960.0, 720.0))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(480.0)
                .min_height(360.0),
        );

    cosmic::app::run::<app::ControlCenter>(settings, ())
}
