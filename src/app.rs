// SPDX-License-Identifier: MPL-2.0

//! Control Center Window
//!
//! A home panel of tiles; clicking a tile swaps the body for that page and
//! the header shows a back button.
//!
//! # Message Flow
//!
//! Each page owns its own `Message` enum. The app wraps them in a variant per
//! page, forwards them to the page's `update`, and maps the returned tasks
//! back into app messages.
//!
//! # Subscriptions
//!
//! - config changes from cosmic-config (always)
//! - a `Tick` timer for the visible page, at its own poll interval
//! - the Hyprland config directory watcher, while the Applications page is open
//!
//! Hidden pages never poll.

use crate::config::{APP_ID, Config, Paths};
use crate::editor::watch;
use crate::fl;
use crate::pages::appearance::TransitionSettings;
use crate::pages::{
    Page, about, appearance, applications, battery, bluetooth, display, network, sound, storage,
};
use cosmic::iced::{Alignment, Length, Subscription};
use cosmic::prelude::*;
use cosmic::widget::{self, button, icon, text};
use std::time::Duration;

const TILE_WIDTH: f32 = 168.0;
const TILE_HEIGHT: f32 = 128.0;

fn transition_settings(config: &Config) -> TransitionSettings {
    TransitionSettings {
        kind: config.wallpaper_transition,
        step: config.wallpaper_transition_step,
        fps: config.wallpaper_transition_fps,
    }
}

// ============================================================================
// Application Model
// ============================================================================

/// Main application state.
///
/// Every page keeps its state for the whole session, so switching back to a
/// page shows its last snapshot until the on-show refresh lands.
pub struct ControlCenter {
    /// COSMIC runtime core (window, theme, config watching).
    core: cosmic::Core,

    /// Preferences as last read from cosmic-config.
    config: Config,

    /// Filesystem locations resolved from `config`.
    paths: Paths,

    /// Visible page; `None` is the home panel.
    active: Option<Page>,

    /// fastfetch summary, loaded on first show.
    about: about::AboutPage,
    /// Monitor mode, brightness and theme preview.
    display: display::DisplayPage,
    /// Wi-Fi list and connection actions.
    network: network::NetworkPage,
    /// Adapter power and known devices.
    bluetooth: bluetooth::BluetoothPage,
    /// Output/input devices and per-application volume.
    sound: sound::SoundPage,
    /// upower readout for the first battery.
    battery: battery::BatteryPage,
    /// Mounted filesystem usage.
    storage: storage::StoragePage,
    /// Theme and wallpaper picker.
    appearance: appearance::AppearancePage,
    /// Hyprland include file editor.
    applications: applications::ApplicationsPage,
}

// ============================================================================
// Message Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum Message {
    /// A home tile was clicked.
    Open(Page),
    /// Header back button.
    Back,
    /// Poll timer for the visible page.
    Tick,
    /// Configuration changed on disk.
    UpdateConfig(Config),

    About(about::Message),
    Display(display::Message),
    Network(network::Message),
    Bluetooth(bluetooth::Message),
    Sound(sound::Message),
    Battery(battery::Message),
    Storage(storage::Message),
    Appearance(appearance::Message),
    Applications(applications::Message),
}

// ============================================================================
// Routing
// ============================================================================

/// The message a page receives on each poll tick.
fn tick_message(page: Page) -> Option<Message> {
    match page {
        Page::Display => Some(Message::Display(display::Message::Tick)),
        Page::Network => Some(Message::Network(network::Message::Refresh)),
        Page::Bluetooth => Some(Message::Bluetooth(bluetooth::Message::Refresh)),
        Page::Sound => Some(Message::Sound(sound::Message::Tick)),
        Page::Battery => Some(Message::Battery(battery::Message::Tick)),
        Page::Storage => Some(Message::Storage(storage::Message::Tick)),
        Page::Appearance => Some(Message::Appearance(appearance::Message::Tick)),
        Page::About | Page::Applications => None,
    }
}

/// Poll cadence for what is on screen. The home panel never polls.
fn timer_interval(active: Option<Page>) -> Option<Duration> {
    active.and_then(Page::poll_interval)
}

/// The config directory watcher only runs under the editor.
fn wants_watcher(active: Option<Page>) -> bool {
    active == Some(Page::Applications)
}

// ============================================================================
// Helper Methods
// ============================================================================

impl ControlCenter {
    /// Push new paths and transition settings into the pages.
    fn apply_config(&mut self, config: Config) {
        let paths = config.paths();
        if paths != self.paths {
            log::info!("paths changed: {paths:?}");
        }

        self.about.set_fastfetch_config(paths.fastfetch_config.clone());
        self.display
            .set_paths(paths.hyprland_conf(), paths.assets_dir());
        self.appearance.set_elysia_dir(paths.elysia_dir.clone());
        self.appearance.set_transition(transition_settings(&config));
        self.applications.set_hypr_dir(paths.hypr_dir.clone());

        self.paths = paths;
        self.config = config;
    }

    /// Run the page's show hook and wrap its task.
    fn show(&mut self, page: Page) -> Task<cosmic::Action<Message>> {
        let task = match page {
            Page::About => self.about.on_show().map(Message::About),
            Page::Display => self.display.on_show().map(Message::Display),
            Page::Network => self.network.on_show().map(Message::Network),
            Page::Bluetooth => self.bluetooth.on_show().map(Message::Bluetooth),
            Page::Sound => self.sound.on_show().map(Message::Sound),
            Page::Battery => self.battery.on_show().map(Message::Battery),
            Page::Storage => self.storage.on_show().map(Message::Storage),
            Page::Appearance => self.appearance.on_show().map(Message::Appearance),
            Page::Applications => self.applications.on_show().map(Message::Applications),
        };
        task.map(cosmic::Action::App)
    }

    fn view_tile(page: Page) -> Element<'static, Message> {
        let content = widget::column()
            .spacing(12)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .push(icon::from_name(page.icon_name()).size(48).icon())
            .push(text::heading(page.title()));

        button::custom(
            widget::container(content)
                .center(Length::Fill),
        )
        .width(Length::Fixed(TILE_WIDTH))
        .height(Length::Fixed(TILE_HEIGHT))
        .on_press(Message::Open(page))
        .into()
    }

    fn view_home(&self) -> Element<'_, Message> {
        let tiles: Vec<Element<'_, Message>> =
            Page::TILES.into_iter().map(Self::view_tile).collect();

        widget::column()
            .spacing(24)
            .push(text::title1(fl!("app-title")))
            .push(widget::flex_row(tiles).row_spacing(16).column_spacing(16))
            .into()
    }

    fn view_page(&self, page: Page) -> Element<'_, Message> {
        let body = match page {
            Page::About => self.about.view().map(Message::About),
            Page::Display => self.display.view().map(Message::Display),
            Page::Network => self.network.view().map(Message::Network),
            Page::Bluetooth => self.bluetooth.view().map(Message::Bluetooth),
            Page::Sound => self.sound.view().map(Message::Sound),
            Page::Battery => self.battery.view().map(Message::Battery),
            Page::Storage => self.storage.view().map(Message::Storage),
            Page::Appearance => self.appearance.view().map(Message::Appearance),
            Page::Applications => self.applications.view().map(Message::Applications),
        };

        widget::column()
            .spacing(24)
            .push(text::title1(page.title()))
            .push(body)
            .into()
    }
}

// ============================================================================
// COSMIC Application Implementation
// ============================================================================

impl cosmic::Application for ControlCenter {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Load configuration and build every page in its idle state.
    ///
    /// No system tool runs until a page is opened.
    fn init(core: cosmic::Core, _flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let config = Config::load();
        let paths = config.paths();
        log::info!("hyprland config dir: {}", paths.hypr_dir.display());

        let app = ControlCenter {
            core,
            about: about::AboutPage::new(paths.fastfetch_config.clone()),
            display: display::DisplayPage::new(paths.hyprland_conf(), paths.assets_dir()),
            network: network::NetworkPage::new(),
            bluetooth: bluetooth::BluetoothPage::new(),
            sound: sound::SoundPage::new(),
            battery: battery::BatteryPage::new(),
            storage: storage::StoragePage::new(),
            appearance: appearance::AppearancePage::new(
                paths.elysia_dir.clone(),
                transition_settings(&config),
            ),
            applications: applications::ApplicationsPage::new(paths.hypr_dir.clone()),
            active: None,
            paths,
            config,
        };

        (app, Task::none())
    }

    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        match self.active {
            Some(_) => vec![
                button::icon(icon::from_name("go-previous-symbolic"))
                    .on_press(Message::Back)
                    .into(),
            ],
            None => Vec::new(),
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let content = match self.active {
            Some(page) => self.view_page(page),
            None => self.view_home(),
        };

        widget::container(widget::scrollable(
            widget::container(content).padding(24).width(Length::Fill),
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = vec![
            self.core()
                .watch_config::<Config>(Self::APP_ID)
                .map(|update| Message::UpdateConfig(update.config)),
        ];

        if let Some(interval) = timer_interval(self.active) {
            subscriptions.push(cosmic::iced::time::every(interval).map(|_| Message::Tick));
        }
        if wants_watcher(self.active) {
            subscriptions.push(
                watch::subscription(self.applications.hypr_dir().to_path_buf())
                    .map(|path| Message::Applications(applications::Message::FileChanged(path))),
            );
        }

        Subscription::batch(subscriptions)
    }

    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::Open(page) => {
                log::info!("opening {page:?}");
                self.active = Some(page);
                return self.show(page);
            }

            Message::Back => self.active = None,

            Message::Tick => {
                if let Some(tick) = self.active.and_then(tick_message) {
                    return self.update(tick);
                }
            }

            Message::UpdateConfig(config) => {
                if config != self.config {
                    self.apply_config(config);
                }
            }

            Message::About(message) => {
                return self.about.update(message).map(Message::About).map(cosmic::Action::App);
            }
            Message::Display(message) => {
                return self
                    .display
                    .update(message)
                    .map(Message::Display)
                    .map(cosmic::Action::App);
            }
            Message::Network(message) => {
                return self
                    .network
                    .update(message)
                    .map(Message::Network)
                    .map(cosmic::Action::App);
            }
            Message::Bluetooth(message) => {
                return self
                    .bluetooth
                    .update(message)
                    .map(Message::Bluetooth)
                    .map(cosmic::Action::App);
            }
            Message::Sound(message) => {
                return self
                    .sound
                    .update(message)
                    .map(Message::Sound)
                    .map(cosmic::Action::App);
            }
            Message::Storage(message) => {
                return self
                    .storage
                    .update(message)
                    .map(Message::Storage)
                    .map(cosmic::Action::App);
            }
            Message::Battery(message) => {
                return self
                    .battery
                    .update(message)
                    .map(Message::Battery)
                    .map(cosmic::Action::App);
            }
            Message::Appearance(message) => {
                return self
                    .appearance
                    .update(message)
                    .map(Message::Appearance)
                    .map(cosmic::Action::App);
            }
            Message::Applications(message) => {
                return self
                    .applications
                    .update(message)
                    .map(Message::Applications)
                    .map(cosmic::Action::App);
            }
        }

        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ticks_reach_the_visible_page() {
        assert!(matches!(
            tick_message(Page::Display),
            Some(Message::Display(display::Message::Tick))
        ));
        assert!(matches!(
            tick_message(Page::Network),
            Some(Message::Network(network::Message::Refresh))
        ));
        assert!(matches!(
            tick_message(Page::Bluetooth),
            Some(Message::Bluetooth(bluetooth::Message::Refresh))
        ));
        assert!(matches!(
            tick_message(Page::Sound),
            Some(Message::Sound(sound::Message::Tick))
        ));
        assert!(matches!(
            tick_message(Page::Battery),
            Some(Message::Battery(battery::Message::Tick))
        ));
        assert!(matches!(
            tick_message(Page::Storage),
            Some(Message::Storage(storage::Message::Tick))
        ));
        assert!(matches!(
            tick_message(Page::Appearance),
            Some(Message::Appearance(appearance::Message::Tick))
        ));
        assert!(tick_message(Page::About).is_none());
        assert!(tick_message(Page::Applications).is_none());
    }

    #[test]
    fn polling_pages_have_a_tick_message() {
        for page in Page::TILES {
            assert_eq!(
                page.poll_interval().is_some(),
                tick_message(page).is_some(),
                "{page:?}"
            );
        }
    }

    #[test]
    fn home_panel_has_no_timer() {
        assert_eq!(timer_interval(None), None);
        assert_eq!(timer_interval(Some(Page::About)), None);
        assert_eq!(
            timer_interval(Some(Page::Bluetooth)),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            timer_interval(Some(Page::Display)),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn watcher_runs_only_under_the_editor() {
        assert!(!wants_watcher(None));
        for page in Page::TILES {
            assert_eq!(wants_watcher(Some(page)), page == Page::Applications, "{page:?}");
        }
    }
}
