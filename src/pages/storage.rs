// SPDX-License-Identifier: MPL-2.0

//! # Storage Page
//!
//! Usage of mounted filesystems as reported by `df -T -B1`.
//!
//! Only real disk filesystems are listed; pseudo mounts (`tmpfs`, `proc`,
//! `overlay`, ...) are skipped.
//!
//! ```text
//! Filesystem     Type  1B-blocks         Used    Available Use% Mounted on
//! /dev/nvme0n1p2 ext4  502392610816 2150481920 ...              /
//! ```

use crate::command;
use crate::fl;
use cosmic::iced::Length;
use cosmic::iced::widget::progress_bar;
use cosmic::widget::{self, icon, settings, text};
use cosmic::{Element, Task};

/// Filesystem types shown on the page.
pub const FILESYSTEMS: [&str; 7] = ["ext4", "btrfs", "xfs", "vfat", "ntfs", "fuseblk", "exfat"];

const GB: f64 = 1024.0 * 1024.0 * 1024.0;

// ============================================================================
// Disk Rows
// ============================================================================

/// One mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    /// Block device (e.g. `/dev/nvme0n1p2`)
    pub device: String,
    /// Filesystem type as printed by `df -T`
    pub fs_type: String,
    /// Where it is mounted; may contain spaces
    pub mount_point: String,
    /// Capacity in bytes
    pub total: u64,
    /// Bytes in use
    pub used: u64,
    /// Bytes still available to unprivileged users
    pub available: u64,
}

impl Disk {
    /// Used share of the capacity, 0 to 100.
    pub fn used_percent(&self) -> f32 {
        (self.used as f64 * 100.0 / self.total as f64).clamp(0.0, 100.0) as f32
    }
}

/// `1073741824` -> `1.0 GB`
pub fn format_gb(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / GB)
}

/// Rows of `df -T -B1` for the filesystem types in [`FILESYSTEMS`].
///
/// Rows with unparsable sizes or zero capacity are dropped.
pub fn parse_df(output: &str) -> Vec<Disk> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            let [device, fs_type, total, used, available, _percent, mount @ ..] = cols.as_slice()
            else {
                return None;
            };
            if mount.is_empty() || !FILESYSTEMS.contains(fs_type) {
                return None;
            }

            let total: u64 = total.parse().ok()?;
            if total == 0 {
                return None;
            }

            Some(Disk {
                device: device.to_string(),
                fs_type: fs_type.to_string(),
                mount_point: mount.join(" "),
                total,
                used: used.parse().ok()?,
                available: available.parse().ok()?,
            })
        })
        .collect()
}

// ============================================================================
// Page
// ============================================================================

#[derive(Default)]
pub struct StoragePage {
    /// Filesystems from the last `df` run, in `df` order.
    disks: Vec<Disk>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
}

impl StoragePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&mut self) {
        let disks = parse_df(&command::stdout_or_empty("df", &["-T", "-B1"]));
        if disks.len() != self.disks.len() {
            log::debug!("storage: {} filesystems", disks.len());
        }
        self.disks = disks;
    }

    pub fn on_show(&mut self) -> Task<Message> {
        self.refresh();
        Task::none()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.refresh(),
        }
        Task::none()
    }

    fn view_disk(disk: &Disk) -> Element<'_, Message> {
        let info = widget::column()
            .spacing(4)
            .width(Length::Fill)
            .push(text::heading(format!("{} ({})", disk.device, disk.mount_point)))
            .push(text::body(fl!(
                "storage-usage",
                used = format_gb(disk.used),
                total = format_gb(disk.total)
            )))
            .push(progress_bar(0.0..=100.0, disk.used_percent()))
            .push(text::caption(fl!("storage-free", free = format_gb(disk.available))));

        widget::row()
            .spacing(16)
            .push(icon::from_name("drive-harddisk-symbolic").size(48).icon())
            .push(info)
            .into()
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.disks.is_empty() {
            return widget::container(text::body(fl!("storage-none")))
                .padding(32)
                .into();
        }

        self.disks
            .iter()
            .fold(settings::section(), |section, disk| {
                section.add(Self::view_disk(disk))
            })
            .into()
    }
}
