// SPDX-License-Identifier: MPL-2.0

//! # Appearance Page (Theme and Wallpaper)
//!
//! Wallpapers live in per-theme folders under the Elysia directory:
//!
//! ```text
//! ~/.config/Elysia/
//! ├── LightTheme.sh
//! ├── DarkTheme.sh
//! └── wallpaper/
//!     ├── Light/*.png|jpg|jpeg
//!     └── Dark/*.png|jpg|jpeg
//! ```
//!
//! Picking a theme runs its switch script. The GTK colour scheme is polled so
//! the page follows theme changes made elsewhere (without re-running scripts).

use crate::command;
use crate::config::Transition;
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, icon, settings, text};
use cosmic::{Element, Task};
use std::fs;
use std::path::{Path, PathBuf};

const WALLPAPER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    /// Folder and script prefix: `Light` / `Dark`.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    /// Classify `gsettings get org.gnome.desktop.interface color-scheme` output.
    pub fn detect(color_scheme: &str) -> Self {
        if color_scheme.to_lowercase().contains("light") {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    fn index(self) -> usize {
        match self {
            ThemeMode::Light => 0,
            ThemeMode::Dark => 1,
        }
    }

    fn label(self) -> String {
        match self {
            ThemeMode::Light => fl!("theme-light"),
            ThemeMode::Dark => fl!("theme-dark"),
        }
    }
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_wallpapers(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("{}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut wallpapers: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    WALLPAPER_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                })
        })
        .collect();
    wallpapers.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    wallpapers
}

fn detect_theme() -> ThemeMode {
    ThemeMode::detect(&command::stdout_or_empty(
        "gsettings",
        &["get", "org.gnome.desktop.interface", "color-scheme"],
    ))
}

/// swww arguments for `path` using the configured transition.
fn swww_args(path: &Path, transition: Transition, step: u32, fps: u32) -> Vec<String> {
    vec![
        "img".to_string(),
        path.display().to_string(),
        "--transition-type".to_string(),
        transition.as_str().to_string(),
        "--transition-step".to_string(),
        step.to_string(),
        "--transition-fps".to_string(),
        fps.to_string(),
    ]
}

/// swww transition settings from the app config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSettings {
    pub kind: Transition,
    pub step: u32,
    pub fps: u32,
}

/// Theme and wallpaper picker state.
pub struct AppearancePage {
    /// Root holding `wallpaper/<Theme>/` and the `<Theme>Theme.sh` scripts.
    elysia_dir: PathBuf,
    /// swww transition passed on apply.
    transition: TransitionSettings,
    /// Theme whose wallpapers are listed.
    selected: ThemeMode,
    /// Last colour scheme seen from gsettings.
    detected: Option<ThemeMode>,
    /// Localized theme labels for the dropdown, in `ThemeMode::ALL` order.
    theme_names: Vec<String>,
    /// Image files of the selected theme, sorted by name.
    wallpapers: Vec<PathBuf>,
    /// Index into `wallpapers` of the previewed image.
    current: usize,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Re-detect the system colour scheme.
    Tick,
    /// Theme dropdown entry picked by the user.
    SelectTheme(usize),
    /// Previous wallpaper, wrapping to the last.
    Previous,
    /// Next wallpaper, wrapping to the first.
    Next,
    /// Set the previewed wallpaper with swww.
    Apply,
    /// Open the wallpaper folder in the file manager.
    OpenFolder,
}

impl AppearancePage {
    pub fn new(elysia_dir: PathBuf, transition: TransitionSettings) -> Self {
        Self {
            elysia_dir,
            transition,
            selected: ThemeMode::default(),
            detected: None,
            theme_names: ThemeMode::ALL.iter().map(|mode| mode.label()).collect(),
            wallpapers: Vec::new(),
            current: 0,
        }
    }

    pub fn set_elysia_dir(&mut self, elysia_dir: PathBuf) {
        if self.elysia_dir != elysia_dir {
            self.elysia_dir = elysia_dir;
            self.load_wallpapers();
        }
    }

    pub fn set_transition(&mut self, transition: TransitionSettings) {
        self.transition = transition;
    }

    fn wallpaper_dir(&self) -> PathBuf {
        self.elysia_dir.join("wallpaper").join(self.selected.as_str())
    }

    fn load_wallpapers(&mut self) {
        self.wallpapers = list_wallpapers(&self.wallpaper_dir());
        self.current = 0;
        log::debug!(
            "{} wallpapers in {}",
            self.wallpapers.len(),
            self.wallpaper_dir().display()
        );
    }

    /// Follow an externally changed colour scheme.
    fn observe(&mut self, detected: ThemeMode) {
        if self.detected != Some(detected) {
            log::info!("colour scheme is now {}", detected.as_str());
            self.detected = Some(detected);
            self.selected = detected;
            self.load_wallpapers();
        }
    }

    fn run_theme_script(&self, mode: ThemeMode) {
        let script = self.elysia_dir.join(format!("{}Theme.sh", mode.as_str()));
        if !script.is_file() {
            log::warn!("theme script {} not found", script.display());
            return;
        }
        let script = script.display().to_string();
        if let Err(err) = command::spawn("bash", &[&script]) {
            log::error!("{err}");
        }
    }

    fn step(&mut self, forward: bool) {
        let len = self.wallpapers.len();
        if len == 0 {
            return;
        }
        self.current = if forward {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
    }

    pub fn on_show(&mut self) -> Task<Message> {
        self.observe(detect_theme());
        Task::none()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.observe(detect_theme()),

            Message::SelectTheme(index) => {
                let Some(mode) = ThemeMode::ALL.get(index).copied() else {
                    return Task::none();
                };
                log::info!("switching to {} theme", mode.as_str());
                self.selected = mode;
                self.load_wallpapers();
                self.run_theme_script(mode);
            }

            Message::Previous => self.step(false),
            Message::Next => self.step(true),

            Message::Apply => {
                let Some(path) = self.wallpapers.get(self.current) else {
                    return Task::none();
                };
                if !path.is_file() {
                    log::warn!("{} disappeared", path.display());
                    return Task::none();
                }
                let TransitionSettings { kind, step, fps } = self.transition;
                let args = swww_args(path, kind, step, fps);
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                log::info!("setting wallpaper {}", path.display());
                if let Err(err) = command::spawn("swww", &args) {
                    log::error!("{err}");
                }
            }

            Message::OpenFolder => {
                let folder = self.elysia_dir.join("wallpaper").display().to_string();
                if let Err(err) = command::spawn("xdg-open", &[&folder]) {
                    log::error!("{err}");
                }
            }
        }

        Task::none()
    }

    fn view_wallpaper(&self) -> Element<'_, Message> {
        let Some(path) = self.wallpapers.get(self.current) else {
            return widget::container(text::body(fl!("appearance-no-wallpapers")))
                .center_x(Length::Fill)
                .padding(32)
                .into();
        };

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        widget::column()
            .spacing(8)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .push(
                widget::row()
                    .spacing(12)
                    .align_y(Alignment::Center)
                    .push(
                        button::icon(icon::from_name("go-previous-symbolic"))
                            .on_press(Message::Previous),
                    )
                    .push(widget::image(path.clone()).width(Length::Fixed(420.0)))
                    .push(
                        button::icon(icon::from_name("go-next-symbolic")).on_press(Message::Next),
                    ),
            )
            .push(text::caption(format!(
                "{name} ({}/{})",
                self.current + 1,
                self.wallpapers.len()
            )))
            .into()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let theme = settings::section().title(fl!("appearance-theme")).add(settings::item(
            fl!("appearance-color-scheme"),
            widget::dropdown(
                &self.theme_names,
                Some(self.selected.index()),
                Message::SelectTheme,
            ),
        ));

        let actions = widget::row()
            .spacing(8)
            .push(widget::horizontal_space())
            .push(button::standard(fl!("appearance-open-folder")).on_press(Message::OpenFolder))
            .push(
                button::suggested(fl!("apply"))
                    .on_press_maybe((!self.wallpapers.is_empty()).then_some(Message::Apply)),
            );

        let wallpaper = settings::section()
            .title(fl!("appearance-wallpaper"))
            .add(self.view_wallpaper())
            .add(actions);

        widget::column()
            .spacing(16)
            .push(theme)
            .push(wallpaper)
            .into()
    }
}
