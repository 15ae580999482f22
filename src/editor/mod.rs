// SPDX-License-Identifier: MPL-2.0

//! # Hyprland Config Editor
//!
//! Line-oriented editing of the four Hyprland include files the desktop ships
//! with. Each file starts with a decorative header block (rows of `#` with a
//! title marker, sometimes followed by a hint comment). The header is kept
//! verbatim on every save; everything after it is editable body text.
//!
//! ```text
//! ########################        ┐
//! ########KEYBINDS########        │ header (preserved)
//! ########################        │
//! # See https://wiki.hyprland...  ┘
//! bind = $mainMod, Q, exec, kitty ┐ body (editable lines)
//! bind = $mainMod, E, exec, nemo  ┘
//! ```
//!
//! - [`document`]: header detection, parse/render, line edits, load/save
//! - [`summary`]: read-only views of applications and keybinds
//! - [`watch`]: notify-backed subscription for external edits

pub mod document;
pub mod summary;
pub mod watch;

pub use document::ConfigDocument;

use std::path::{Path, PathBuf};

/// The editable Hyprland include files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Applications,
    Keybinds,
    Autoruns,
    WindowRules,
}

/// What follows the marker rows of a header.
#[derive(Debug, Clone, Copy)]
enum HeaderTail {
    /// Body starts right after the last marker row.
    Nothing,
    /// One hint comment with this prefix may follow the markers.
    Hint(&'static str),
    /// Every comment or blank line after the markers belongs to the header.
    CommentBlock,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 4] = [
        ConfigKind::Applications,
        ConfigKind::Keybinds,
        ConfigKind::Autoruns,
        ConfigKind::WindowRules,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ConfigKind::Applications => "applications.conf",
            ConfigKind::Keybinds => "app_keybinds.conf",
            ConfigKind::Autoruns => "auto_start.conf",
            ConfigKind::WindowRules => "window_rules.conf",
        }
    }

    pub fn path_in(self, hypr_dir: &Path) -> PathBuf {
        hypr_dir.join(self.file_name())
    }

    /// Kind whose file has this name, if it is one of ours.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default()
    }

    fn header_markers(self) -> &'static [&'static str] {
        match self {
            ConfigKind::Applications => &["########", "##APPS##"],
            ConfigKind::Keybinds => &["########################", "########KEYBINDS########"],
            ConfigKind::Autoruns => &["########################", "########AUTORUNS########"],
            ConfigKind::WindowRules => &[
                "################################",
                "##TRANSPARENT BACKGROUND APP####",
            ],
        }
    }

    fn header_tail(self) -> HeaderTail {
        match self {
            ConfigKind::Applications => HeaderTail::Nothing,
            ConfigKind::Keybinds => {
                HeaderTail::Hint("# See https://wiki.hyprland.org/Configuring/Keywords/ for more")
            }
            ConfigKind::Autoruns => HeaderTail::Hint("# Execute your favorite apps at launch"),
            ConfigKind::WindowRules => HeaderTail::CommentBlock,
        }
    }

    /// Index of the first body line.
    ///
    /// The header ends after the *last* marker row anywhere in the file, so a
    /// file without markers has no header at all.
    pub fn header_len<S: AsRef<str>>(self, lines: &[S]) -> usize {
        let markers = self.header_markers();
        let mut end = lines
            .iter()
            .rposition(|line| {
                let line = line.as_ref().trim();
                markers.iter().any(|marker| line.starts_with(marker))
            })
            .map_or(0, |idx| idx + 1);

        match self.header_tail() {
            HeaderTail::Nothing => {}
            HeaderTail::Hint(prefix) => {
                if lines
                    .get(end)
                    .is_some_and(|line| line.as_ref().trim().starts_with(prefix))
                {
                    end += 1;
                }
            }
            HeaderTail::CommentBlock => {
                while lines.get(end).is_some_and(|line| {
                    let line = line.as_ref().trim();
                    line.is_empty() || line.starts_with('#')
                }) {
                    end += 1;
                }
            }
        }

        end
    }
}
