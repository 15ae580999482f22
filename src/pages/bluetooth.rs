// SPDX-License-Identifier: MPL-2.0

//! Bluetooth page backed by `bluetoothctl`.
//!
//! Every tool call runs on the blocking pool; a full refresh is one `show`,
//! one `devices` and one `info` per device, which is too slow for the UI
//! thread once a few devices are known.

use crate::command;
use crate::error::Result;
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, settings, text};
use cosmic::{Element, Task};

const BLUETOOTHCTL: &str = "bluetoothctl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub mac: String,
    pub name: String,
    pub connected: bool,
    pub paired: bool,
}

/// Adapter state plus known devices, as read in one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub powered: bool,
    pub devices: Vec<Device>,
}

/// The first `Powered:` line of `bluetoothctl show` output says `yes`.
pub fn parse_powered(show: &str) -> bool {
    show.lines()
        .find(|line| line.contains("Powered:"))
        .is_some_and(|line| line.to_lowercase().contains("yes"))
}

/// `Device <MAC> <Name...>` lines, first occurrence of each MAC wins.
pub fn parse_devices(devices: &str) -> Vec<(String, String)> {
    let mut found: Vec<(String, String)> = Vec::new();

    for line in devices.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let ["Device", mac, name @ ..] = parts.as_slice() else {
            continue;
        };
        if name.is_empty() || found.iter().any(|(known, _)| known == mac) {
            continue;
        }
        found.push((mac.to_string(), name.join(" ")));
    }

    found
}

/// Read a `Key: yes/no` flag from `bluetoothctl info` output.
pub fn parse_info_flag(info: &str, key: &str) -> bool {
    let prefix = format!("{key}:");
    info.lines()
        .map(str::trim)
        .find(|line| line.starts_with(&prefix))
        .is_some_and(|line| line.contains("yes"))
}

fn read_snapshot() -> Snapshot {
    let powered = parse_powered(&command::stdout_or_empty(BLUETOOTHCTL, &["show"]));
    if !powered {
        return Snapshot::default();
    }

    let devices = parse_devices(&command::stdout_or_empty(BLUETOOTHCTL, &["devices"]))
        .into_iter()
        .map(|(mac, name)| {
            let info = command::stdout_or_empty(BLUETOOTHCTL, &["info", &mac]);
            Device {
                connected: parse_info_flag(&info, "Connected"),
                paired: parse_info_flag(&info, "Paired"),
                mac,
                name,
            }
        })
        .collect();

    Snapshot { powered, devices }
}

fn set_power(on: bool) -> Result<()> {
    command::run(BLUETOOTHCTL, &["power", if on { "on" } else { "off" }])
}

/// Discover for a few seconds, then stop discovery.
fn scan() {
    // `--timeout` makes bluetoothctl exit non-zero when the timer fires.
    if let Err(err) = command::run(BLUETOOTHCTL, &["--timeout", "3", "scan", "on"]) {
        log::debug!("scan on: {err}");
    }
    if let Err(err) = command::run(BLUETOOTHCTL, &["--timeout", "2", "scan", "off"]) {
        log::debug!("scan off: {err}");
    }
}

fn pair_and_connect(mac: &str, paired: bool) -> Result<()> {
    if !paired {
        // Devices paired from another machine may refuse; connect decides.
        if let Err(err) = command::run(BLUETOOTHCTL, &["pair", mac]) {
            log::warn!("pair {mac}: {err}");
        }
    }
    command::run(BLUETOOTHCTL, &["connect", mac])
}

fn disconnect(mac: &str) -> Result<()> {
    command::run(BLUETOOTHCTL, &["disconnect", mac])
}

fn remove(mac: &str) -> Result<()> {
    command::run(BLUETOOTHCTL, &["remove", mac])
}

/// Run a device action off the UI thread and report the status line to show.
fn action<F>(job: F, done: String) -> Task<Message>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    Task::perform(
        command::blocking(move || match job() {
            Ok(()) => done,
            Err(err) => {
                log::warn!("bluetooth action failed: {err}");
                fl!("action-failed", error = err.to_string())
            }
        }),
        Message::ActionFinished,
    )
}

#[derive(Default)]
pub struct BluetoothPage {
    snapshot: Snapshot,
    refreshing: bool,
    scanning: bool,
    /// Outcome of the last user action.
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Refreshed(Snapshot),
    TogglePower(bool),
    Scan,
    ScanFinished,
    Connect(String),
    Disconnect(String),
    Remove(String),
    ActionFinished(String),
}

impl BluetoothPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn device_name(&self, mac: &str) -> String {
        self.snapshot
            .devices
            .iter()
            .find(|device| device.mac == mac)
            .map_or_else(|| mac.to_string(), |device| device.name.clone())
    }

    pub fn on_show(&mut self) -> Task<Message> {
        self.update(Message::Refresh)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh => {
                if self.refreshing {
                    return Task::none();
                }
                self.refreshing = true;
                return Task::perform(command::blocking(read_snapshot), Message::Refreshed);
            }

            Message::Refreshed(snapshot) => {
                self.refreshing = false;
                if snapshot != self.snapshot {
                    log::debug!(
                        "bluetooth: powered={} devices={}",
                        snapshot.powered,
                        snapshot.devices.len()
                    );
                    self.snapshot = snapshot;
                }
            }

            Message::TogglePower(on) => {
                log::info!("bluetooth power {}", if on { "on" } else { "off" });
                self.snapshot.powered = on;
                let done = if on {
                    fl!("bluetooth-powered-on")
                } else {
                    fl!("bluetooth-powered-off")
                };
                return action(move || set_power(on), done);
            }

            Message::Scan => {
                if self.scanning {
                    return Task::none();
                }
                log::info!("bluetooth scan started");
                self.scanning = true;
                return Task::perform(command::blocking(scan), |_| Message::ScanFinished);
            }

            Message::ScanFinished => {
                log::info!("bluetooth scan finished");
                self.scanning = false;
                return self.update(Message::Refresh);
            }

            Message::Connect(mac) => {
                let paired = self
                    .snapshot
                    .devices
                    .iter()
                    .any(|device| device.mac == mac && device.paired);
                log::info!("bluetooth connect {mac}");
                let done = fl!("bluetooth-connected-to", device = self.device_name(&mac));
                return action(move || pair_and_connect(&mac, paired), done);
            }

            Message::Disconnect(mac) => {
                log::info!("bluetooth disconnect {mac}");
                let done = fl!("bluetooth-disconnected-from", device = self.device_name(&mac));
                return action(move || disconnect(&mac), done);
            }

            Message::Remove(mac) => {
                log::info!("bluetooth remove {mac}");
                let done = fl!("bluetooth-removed", device = self.device_name(&mac));
                return action(move || remove(&mac), done);
            }

            Message::ActionFinished(status) => {
                self.status = Some(status);
                return self.update(Message::Refresh);
            }
        }

        Task::none()
    }

    fn view_device<'a>(&'a self, device: &'a Device) -> Element<'a, Message> {
        let status = match (device.connected, device.paired) {
            (true, _) => fl!("bluetooth-connected"),
            (false, true) => fl!("bluetooth-paired"),
            (false, false) => fl!("bluetooth-available"),
        };

        let mut buttons = widget::row().spacing(8).align_y(Alignment::Center);
        buttons = if device.connected {
            buttons.push(
                button::standard(fl!("bluetooth-disconnect"))
                    .on_press(Message::Disconnect(device.mac.clone())),
            )
        } else {
            buttons.push(
                button::suggested(fl!("bluetooth-connect"))
                    .on_press_maybe(self.snapshot.powered.then(|| Message::Connect(device.mac.clone()))),
            )
        };
        if device.paired {
            buttons = buttons.push(
                button::destructive(fl!("bluetooth-remove"))
                    .on_press(Message::Remove(device.mac.clone())),
            );
        }

        settings::item_row(vec![
            widget::column()
                .push(text::body(device.name.as_str()))
                .push(text::caption(format!("{} · {}", device.mac, status)))
                .width(Length::Fill)
                .into(),
            buttons.into(),
        ])
        .into()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let scan_label = if self.scanning {
            fl!("bluetooth-scanning")
        } else {
            fl!("bluetooth-scan")
        };

        let adapter = settings::section()
            .title(fl!("tile-bluetooth"))
            .add(settings::item(
                fl!("bluetooth-power"),
                widget::toggler(self.snapshot.powered).on_toggle(Message::TogglePower),
            ))
            .add(settings::item(
                fl!("bluetooth-discover"),
                button::standard(scan_label).on_press_maybe(
                    (self.snapshot.powered && !self.scanning).then_some(Message::Scan),
                ),
            ));

        let devices = if self.snapshot.devices.is_empty() {
            settings::section()
                .title(fl!("bluetooth-devices"))
                .add(text::body(fl!("bluetooth-no-devices")))
        } else {
            self.snapshot.devices.iter().fold(
                settings::section().title(fl!("bluetooth-devices")),
                |section, device| section.add(self.view_device(device)),
            )
        };

        let mut content = widget::column().spacing(16).push(adapter);
        if let Some(status) = &self.status {
            content = content.push(text::caption(status.as_str()));
        }
        content.push(devices).into()
    }
}
