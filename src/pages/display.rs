// SPDX-License-Identifier: MPL-2.0

//! Display page: resolution/refresh mode, brightness and theme preview.
//!
//! The mode list comes from `hyprctl monitors`; the active mode is whatever
//! the first `monitor = ...@...` line of `hyprland.conf` says. Applying a mode
//! only rewrites that line, so Hyprland must be restarted (or reloaded) to
//! pick it up.

use crate::command;
use crate::error::{Error, Result};
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, settings, text};
use cosmic::{Element, Task};
use regex::{NoExpand, Regex};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `1920x1080@60`
static MODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3,4}x\d{3,4}@\d{2,3}").expect("mode pattern"));

const FALLBACK_BRIGHTNESS: u32 = 50;

/// Every mode mentioned by `hyprctl monitors`, unique and sorted.
pub fn parse_modes(monitors: &str) -> Vec<String> {
    MODE.find_iter(monitors)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Index of the first `monitor` line that carries a mode.
pub fn find_monitor_line<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    lines.iter().position(|line| {
        let line = line.as_ref().trim_start();
        line.starts_with("monitor") && line.contains('@')
    })
}

/// `monitor = DP-1, 2560x1440@144, 0x0, 1` -> `DP-1`
pub fn monitor_name(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix("monitor")?;
    let rest = rest.trim_start().strip_prefix('=').unwrap_or(rest);
    let name = rest.split(',').next()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

pub fn current_mode(line: &str) -> Option<String> {
    MODE.find(line).map(|m| m.as_str().to_string())
}

/// Replace every mode on `line` with `mode`.
pub fn replace_mode(line: &str, mode: &str) -> String {
    MODE.replace_all(line, NoExpand(mode)).into_owned()
}

/// `brightnessctl g` / `brightnessctl m` output as a percentage.
pub fn brightness_percent(current: &str, max: &str) -> Option<u32> {
    let current: u64 = current.trim().parse().ok()?;
    let max: u64 = max.trim().parse().ok()?;
    if max == 0 {
        return None;
    }
    u32::try_from(current.min(max) * 100 / max).ok()
}

/// Preview image for the colour scheme reported by `gsettings`.
pub fn theme_preview(assets_dir: &Path, color_scheme: &str) -> PathBuf {
    if color_scheme.contains("prefer-light") {
        assets_dir.join("light1.png")
    } else {
        assets_dir.join("dark1.png")
    }
}

/// The monitor line as currently configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorLine {
    pub name: Option<String>,
    pub mode: Option<String>,
}

pub fn read_monitor_line(conf: &Path) -> Result<Option<MonitorLine>> {
    let text = fs::read_to_string(conf).map_err(|err| Error::io(conf, err))?;
    let lines: Vec<&str> = text.lines().collect();
    Ok(find_monitor_line(&lines).map(|index| MonitorLine {
        name: monitor_name(lines[index]),
        mode: current_mode(lines[index]),
    }))
}

/// Rewrite the monitor line of `conf` to use `mode`.
pub fn apply_mode(conf: &Path, mode: &str) -> Result<()> {
    let text = fs::read_to_string(conf).map_err(|err| Error::io(conf, err))?;
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();

    let index = find_monitor_line(&lines).ok_or_else(|| Error::MonitorLineMissing(conf.into()))?;
    lines[index] = replace_mode(&lines[index], mode);

    let mut out = lines.join("\n");
    if text.ends_with('\n') {
        out.push('\n');
    }
    fs::write(conf, out).map_err(|err| Error::io(conf, err))?;
    log::info!("{}: monitor mode set to {mode}", conf.display());
    Ok(())
}

fn read_brightness() -> u32 {
    let current = command::output("brightnessctl", &["g"]);
    let max = command::output("brightnessctl", &["m"]);
    match (current, max) {
        (Ok(current), Ok(max)) => {
            brightness_percent(&current, &max).unwrap_or(FALLBACK_BRIGHTNESS)
        }
        (Err(err), _) | (_, Err(err)) => {
            log::debug!("brightness unavailable: {err}");
            FALLBACK_BRIGHTNESS
        }
    }
}

/// Display page state.
pub struct DisplayPage {
    /// `hyprland.conf` holding the `monitor = ...` line.
    hyprland_conf: PathBuf,
    /// Directory with the `light1.png` / `dark1.png` previews.
    assets_dir: PathBuf,
    /// Modes offered by `hyprctl monitors`, sorted.
    modes: Vec<String>,
    /// Index into `modes` shown in the dropdown.
    selected: Option<usize>,
    /// Output name from the monitor line, e.g. `DP-1`.
    monitor: Option<String>,
    /// Slider value in percent.
    brightness: u32,
    /// Slider is held; polling must not move it.
    dragging: bool,
    /// Preview image matching the current colour scheme.
    preview: PathBuf,
    /// Result of the last apply.
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Poll modes, brightness and colour scheme.
    Tick,
    /// Mode dropdown entry picked.
    SelectMode(usize),
    /// Write the selected mode to the monitor line.
    Apply,
    /// Slider moved.
    Brightness(u32),
    /// Slider let go; the value is written with brightnessctl.
    BrightnessReleased,
}

impl DisplayPage {
    pub fn new(hyprland_conf: PathBuf, assets_dir: PathBuf) -> Self {
        let preview = theme_preview(&assets_dir, "");
        Self {
            hyprland_conf,
            assets_dir,
            modes: Vec::new(),
            selected: None,
            monitor: None,
            brightness: FALLBACK_BRIGHTNESS,
            dragging: false,
            preview,
            status: None,
        }
    }

    pub fn set_paths(&mut self, hyprland_conf: PathBuf, assets_dir: PathBuf) {
        self.hyprland_conf = hyprland_conf;
        self.assets_dir = assets_dir;
    }

    fn configured(&self) -> Option<MonitorLine> {
        match read_monitor_line(&self.hyprland_conf) {
            Ok(line) => line,
            Err(err) => {
                log::warn!("{err}");
                None
            }
        }
    }

    /// Point the dropdown at the configured mode, if the monitor offers it.
    fn select_configured(&mut self, line: Option<&MonitorLine>) {
        let mode = line.and_then(|line| line.mode.as_deref());
        self.selected = mode.and_then(|mode| self.modes.iter().position(|m| m == mode));
    }

    fn set_modes(&mut self, modes: Vec<String>, force_select: bool) {
        let changed = modes != self.modes;
        if changed {
            log::debug!("display modes: {}", modes.join(" "));
            self.modes = modes;
        }

        let line = self.configured();
        self.monitor = line.as_ref().and_then(|line| line.name.clone());
        if changed || force_select {
            self.select_configured(line.as_ref());
        }
    }

    fn refresh(&mut self, force_select: bool) {
        let modes = parse_modes(&command::stdout_or_empty("hyprctl", &["monitors"]));
        self.set_modes(modes, force_select);

        if !self.dragging {
            self.brightness = read_brightness();
        }

        let scheme = command::stdout_or_empty(
            "gsettings",
            &["get", "org.gnome.desktop.interface", "color-scheme"],
        );
        self.preview = theme_preview(&self.assets_dir, &scheme);
    }

    pub fn on_show(&mut self) -> Task<Message> {
        self.status = None;
        self.refresh(true);
        Task::none()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.refresh(false),

            Message::SelectMode(index) => {
                if index < self.modes.len() {
                    self.selected = Some(index);
                }
            }

            Message::Apply => {
                let Some(mode) = self.selected.and_then(|i| self.modes.get(i)).cloned() else {
                    return Task::none();
                };
                self.status = Some(match apply_mode(&self.hyprland_conf, &mode) {
                    Ok(()) => fl!("display-applied", mode = mode),
                    Err(err @ Error::MonitorLineMissing(_)) => {
                        log::warn!("{err}");
                        fl!("display-no-monitor-line")
                    }
                    Err(err) => {
                        log::error!("{err}");
                        fl!("action-failed", error = err.to_string())
                    }
                });
            }

            Message::Brightness(value) => {
                self.dragging = true;
                self.brightness = value.min(100);
            }

            Message::BrightnessReleased => {
                self.dragging = false;
                let level = format!("{}%", self.brightness);
                log::info!("brightness {level}");
                if let Err(err) = command::spawn("brightnessctl", &["set", &level]) {
                    log::warn!("{err}");
                }
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let monitor = self
            .monitor
            .clone()
            .unwrap_or_else(|| fl!("display-unknown-monitor"));

        let mode_picker: Element<'_, Message> = if self.modes.is_empty() {
            text::body(fl!("display-no-modes")).into()
        } else {
            widget::row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(widget::dropdown(&self.modes, self.selected, Message::SelectMode))
                .push(
                    button::suggested(fl!("apply"))
                        .on_press_maybe(self.selected.map(|_| Message::Apply)),
                )
                .into()
        };

        let mut resolution = settings::section()
            .title(fl!("display-resolution"))
            .add(settings::item(fl!("display-monitor"), text::body(monitor)))
            .add(settings::item(fl!("display-mode"), mode_picker));
        if let Some(status) = &self.status {
            resolution = resolution.add(text::caption(status.as_str()));
        }

        let brightness = settings::section().title(fl!("display-brightness")).add(
            settings::item_row(vec![
                widget::slider(0..=100, self.brightness, Message::Brightness)
                    .on_release(Message::BrightnessReleased)
                    .width(Length::Fill)
                    .into(),
                text::body(format!("{}%", self.brightness)).into(),
            ]),
        );

        let theme = settings::section()
            .title(fl!("display-theme"))
            .add(widget::container(widget::image(self.preview.clone()).width(Length::Fixed(320.0))).center_x(Length::Fill));

        widget::column()
            .spacing(16)
            .push(resolution)
            .push(brightness)
            .push(theme)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MONITORS: &str = "\
Monitor DP-1 (ID 0):
\t2560x1440@143.97300 at 0x0
\tavailableModes: 2560x1440@144.00Hz 2560x1440@60.00Hz 1920x1080@60.00Hz 1920x1080@120.00Hz
Monitor HDMI-A-1 (ID 1):
\t1920x1080@60.00000 at 2560x0
";

    const CONF: &str = "\
# Monitors
monitorv2 = placeholder
monitor = DP-1, 2560x1440@144, 0x0, 1
monitor = HDMI-A-1, 1920x1080@60, 2560x0, 1
";

    fn scratch_conf(name: &str, text: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hypr-control-center-display-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hyprland.conf");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn modes_are_unique_and_sorted() {
        assert_eq!(
            parse_modes(MONITORS),
            vec![
                "1920x1080@120",
                "1920x1080@60",
                "2560x1440@143",
                "2560x1440@144",
                "2560x1440@60",
            ]
        );
        assert!(parse_modes("").is_empty());
    }

    #[test]
    fn monitor_line_is_first_with_a_mode() {
        let lines: Vec<&str> = CONF.lines().collect();
        let index = find_monitor_line(&lines).unwrap();
        assert_eq!(index, 2);
        assert_eq!(monitor_name(lines[index]).as_deref(), Some("DP-1"));
        assert_eq!(current_mode(lines[index]).as_deref(), Some("2560x1440@144"));
    }

    #[test]
    fn monitor_name_without_spaces() {
        assert_eq!(
            monitor_name("monitor=eDP-1,1920x1080@60,auto,1").as_deref(),
            Some("eDP-1")
        );
        assert_eq!(monitor_name("monitor = , preferred, auto, 1"), None);
    }

    #[test]
    fn replace_touches_only_modes() {
        assert_eq!(
            replace_mode("monitor = DP-1, 2560x1440@144, 0x0, 1", "1920x1080@60"),
            "monitor = DP-1, 1920x1080@60, 0x0, 1"
        );
    }

    #[test]
    fn apply_rewrites_first_monitor_line() {
        let conf = scratch_conf("apply", CONF);
        apply_mode(&conf, "1920x1080@120").unwrap();
        assert_eq!(
            fs::read_to_string(&conf).unwrap(),
            CONF.replace("2560x1440@144", "1920x1080@120")
        );
        assert_eq!(
            read_monitor_line(&conf).unwrap(),
            Some(MonitorLine {
                name: Some("DP-1".into()),
                mode: Some("1920x1080@120".into()),
            })
        );
        fs::remove_dir_all(conf.parent().unwrap()).ok();
    }

    #[test]
    fn apply_without_monitor_line_fails() {
        let conf = scratch_conf("missing", "exec-once = waybar\nmonitor = , preferred, auto, 1\n");
        let err = apply_mode(&conf, "1920x1080@60").unwrap_err();
        assert!(matches!(err, Error::MonitorLineMissing(_)));
        assert_eq!(
            fs::read_to_string(&conf).unwrap(),
            "exec-once = waybar\nmonitor = , preferred, auto, 1\n"
        );
        fs::remove_dir_all(conf.parent().unwrap()).ok();
    }

    #[test]
    fn brightness_math() {
        assert_eq!(brightness_percent("96000\n", "96000\n"), Some(100));
        assert_eq!(brightness_percent("48000", "96000"), Some(50));
        assert_eq!(brightness_percent("1", "3"), Some(33));
        assert_eq!(brightness_percent("5", "0"), None);
        assert_eq!(brightness_percent("n/a", "100"), None);
    }

    #[test]
    fn preview_follows_color_scheme() {
        let assets = Path::new("/a");
        assert_eq!(theme_preview(assets, "'prefer-light'\n"), PathBuf::from("/a/light1.png"));
        assert_eq!(theme_preview(assets, "'prefer-dark'\n"), PathBuf::from("/a/dark1.png"));
        assert_eq!(theme_preview(assets, ""), PathBuf::from("/a/dark1.png"));
    }

    #[test]
    fn selection_survives_polls_until_modes_change() {
        let conf = scratch_conf("select", CONF);
        let mut page = DisplayPage::new(conf.clone(), PathBuf::from("/a"));

        page.set_modes(parse_modes(MONITORS), true);
        assert_eq!(page.selected, Some(3));
        assert_eq!(page.monitor.as_deref(), Some("DP-1"));

        let _ = page.update(Message::SelectMode(0));
        page.set_modes(parse_modes(MONITORS), false);
        assert_eq!(page.selected, Some(0));

        page.set_modes(vec!["2560x1440@144".into()], false);
        assert_eq!(page.selected, Some(0));
        page.set_modes(vec!["1280x720@60".into()], false);
        assert_eq!(page.selected, None);

        fs::remove_dir_all(conf.parent().unwrap()).ok();
    }
}
