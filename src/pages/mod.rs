// SPDX-License-Identifier: MPL-2.0

//! Settings pages opened from the home tiles.
//!
//! Every page is a small controller over one or two system tools and follows
//! the same shape:
//!
//! - `new(..)` builds an empty state (no tool calls)
//! - `on_show()` refreshes when the page becomes visible
//! - `update(message)` handles its own messages and returns follow-up tasks
//! - `view()` renders the page body
//! - `poll_interval()` says how often the page wants a `Tick` while visible

pub mod about;
pub mod appearance;
pub mod applications;
pub mod battery;
pub mod bluetooth;
pub mod display;
pub mod network;
pub mod sound;
pub mod storage;

use crate::fl;
use std::time::Duration;

/// A settings page reachable from the home panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    About,
    Display,
    Network,
    Bluetooth,
    Sound,
    Battery,
    Storage,
    Appearance,
    Applications,
}

impl Page {
    /// Home panel order.
    pub const TILES: [Page; 9] = [
        Page::About,
        Page::Display,
        Page::Network,
        Page::Bluetooth,
        Page::Sound,
        Page::Battery,
        Page::Storage,
        Page::Appearance,
        Page::Applications,
    ];

    pub fn title(self) -> String {
        match self {
            Page::About => fl!("tile-about"),
            Page::Display => fl!("tile-display"),
            Page::Network => fl!("tile-network"),
            Page::Bluetooth => fl!("tile-bluetooth"),
            Page::Sound => fl!("tile-sound"),
            Page::Battery => fl!("tile-battery"),
            Page::Storage => fl!("tile-storage"),
            Page::Appearance => fl!("tile-appearance"),
            Page::Applications => fl!("tile-applications"),
        }
    }

    /// Freedesktop symbolic icon shown on the tile.
    pub fn icon_name(self) -> &'static str {
        match self {
            Page::About => "help-about-symbolic",
            Page::Display => "video-display-symbolic",
            Page::Network => "network-wireless-symbolic",
            Page::Bluetooth => "bluetooth-active-symbolic",
            Page::Sound => "audio-volume-high-symbolic",
            Page::Battery => "battery-good-symbolic",
            Page::Storage => "drive-harddisk-symbolic",
            Page::Appearance => "preferences-desktop-wallpaper-symbolic",
            Page::Applications => "preferences-desktop-keyboard-shortcuts-symbolic",
        }
    }

    /// Refresh cadence while the page is visible.
    pub fn poll_interval(self) -> Option<Duration> {
        match self {
            Page::Bluetooth | Page::Network => Some(Duration::from_secs(5)),
            Page::Display => Some(Duration::from_secs(2)),
            Page::Appearance | Page::Battery | Page::Sound | Page::Storage => {
                Some(Duration::from_secs(1))
            }
            // The editor reloads from the file watcher instead.
            Page::Applications | Page::About => None,
        }
    }
}
