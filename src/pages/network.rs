// SPDX-License-Identifier: MPL-2.0

//! Wi-Fi page backed by NetworkManager's `nmcli`.
//!
//! Scans use terse output (`-t`), where fields are separated by `:` and any
//! literal `:` or `\` inside a field is backslash-escaped.

use crate::command;
use crate::error::Result;
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, settings, text};
use cosmic::{Element, Task};
use std::collections::HashSet;

const NMCLI: &str = "nmcli";

/// Split one line of `nmcli -t` output into unescaped fields.
pub fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    field.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiNetwork {
    pub ssid: String,
    pub active: bool,
    pub signal: u8,
    pub saved: bool,
}

/// Networks from `nmcli -t -f ACTIVE,SSID,SIGNAL dev wifi`.
///
/// Hidden networks are skipped and access points sharing an SSID collapse
/// into one entry with the strongest signal. The active network sorts first.
pub fn parse_networks(scan: &str, saved: &HashSet<String>) -> Vec<WifiNetwork> {
    let mut networks: Vec<WifiNetwork> = Vec::new();

    for line in scan.lines().filter(|line| !line.trim().is_empty()) {
        let fields = split_terse(line);
        let [active, ssid, signal, ..] = fields.as_slice() else {
            continue;
        };
        if ssid.is_empty() {
            continue;
        }
        let active = active == "yes";
        let signal = signal.trim().parse().unwrap_or(0);

        match networks.iter_mut().find(|network| &network.ssid == ssid) {
            Some(known) => {
                known.signal = known.signal.max(signal);
                known.active |= active;
            }
            None => networks.push(WifiNetwork {
                ssid: ssid.clone(),
                active,
                signal,
                saved: saved.contains(ssid),
            }),
        }
    }

    networks.sort_by(|a, b| b.active.cmp(&a.active).then(b.signal.cmp(&a.signal)));
    networks
}

/// Connection names from `nmcli -t -f NAME connection show`.
pub fn parse_saved(connections: &str) -> HashSet<String> {
    connections
        .lines()
        .filter_map(|line| split_terse(line).into_iter().next())
        .filter(|name| !name.is_empty())
        .collect()
}

/// `nmcli radio wifi` prints `enabled` or `disabled`.
pub fn parse_radio(radio: &str) -> bool {
    radio.trim().eq_ignore_ascii_case("enabled")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub radio: bool,
    pub networks: Vec<WifiNetwork>,
}

fn read_snapshot() -> Snapshot {
    let radio = parse_radio(&command::stdout_or_empty(NMCLI, &["radio", "wifi"]));
    if !radio {
        return Snapshot::default();
    }

    let saved = parse_saved(&command::stdout_or_empty(
        NMCLI,
        &["-t", "-f", "NAME", "connection", "show"],
    ));
    let scan = command::stdout_or_empty(NMCLI, &["-t", "-f", "ACTIVE,SSID,SIGNAL", "dev", "wifi"]);

    Snapshot {
        radio,
        networks: parse_networks(&scan, &saved),
    }
}

fn connect_saved(ssid: &str) -> Result<()> {
    command::run(NMCLI, &["connection", "up", ssid])
}

fn connect_new(ssid: &str, password: &str) -> Result<()> {
    command::run(NMCLI, &["device", "wifi", "connect", ssid, "password", password])
}

fn forget(ssid: &str) -> Result<()> {
    command::run(NMCLI, &["connection", "delete", ssid])
}

/// Drop the current connection by cycling networking.
fn disconnect() -> Result<()> {
    command::run(NMCLI, &["networking", "off"])?;
    command::run(NMCLI, &["networking", "on"])
}

fn enable_radio() -> Result<()> {
    command::run(NMCLI, &["radio", "wifi", "on"])
}

fn action<F>(job: F, done: String) -> Task<Message>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    Task::perform(
        command::blocking(move || match job() {
            Ok(()) => done,
            Err(err) => {
                log::warn!("wifi action failed: {err}");
                fl!("action-failed", error = err.to_string())
            }
        }),
        Message::ActionFinished,
    )
}

/// Password prompt for a network without a saved connection.
#[derive(Debug, Clone, Default)]
struct PasswordPrompt {
    ssid: String,
    password: String,
}

#[derive(Default)]
pub struct NetworkPage {
    snapshot: Snapshot,
    refreshing: bool,
    prompt: Option<PasswordPrompt>,
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Refreshed(Snapshot),
    Connect(String),
    PasswordInput(String),
    SubmitPassword,
    CancelPassword,
    Forget(String),
    Disconnect,
    EnableWifi,
    ActionFinished(String),
}

impl NetworkPage {
    pub fn new() -> Self {
        Self::default()
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
                self.snapshot = snapshot;
            }

            Message::Connect(ssid) => {
                let saved = self
                    .snapshot
                    .networks
                    .iter()
                    .any(|network| network.ssid == ssid && network.saved);
                if saved {
                    log::info!("wifi: bringing up saved connection {ssid}");
                    let done = fl!("network-connected", ssid = ssid.clone());
                    return action(move || connect_saved(&ssid), done);
                }
                self.prompt = Some(PasswordPrompt {
                    ssid,
                    password: String::new(),
                });
            }

            Message::PasswordInput(value) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.password = value;
                }
            }

            Message::SubmitPassword => {
                let Some(prompt) = self.prompt.take() else {
                    return Task::none();
                };
                if prompt.password.is_empty() {
                    self.status = Some(fl!("network-password-required"));
                    self.prompt = Some(prompt);
                    return Task::none();
                }
                log::info!("wifi: connecting to {}", prompt.ssid);
                let done = fl!("network-connected", ssid = prompt.ssid.clone());
                let PasswordPrompt { ssid, password } = prompt;
                return action(move || connect_new(&ssid, &password), done);
            }

            Message::CancelPassword => self.prompt = None,

            Message::Forget(ssid) => {
                log::info!("wifi: forgetting {ssid}");
                let done = fl!("network-forgotten", ssid = ssid.clone());
                return action(move || forget(&ssid), done);
            }

            Message::Disconnect => {
                log::info!("wifi: disconnecting");
                return action(disconnect, fl!("network-disconnected"));
            }

            Message::EnableWifi => {
                log::info!("wifi: enabling radio");
                return action(enable_radio, fl!("network-enabled"));
            }

            Message::ActionFinished(status) => {
                self.status = Some(status);
                return self.update(Message::Refresh);
            }
        }

        Task::none()
    }

    fn view_network<'a>(&'a self, network: &'a WifiNetwork) -> Element<'a, Message> {
        let mut detail = format!("{}%", network.signal);
        if network.active {
            detail.push_str(&format!(" · {}", fl!("network-active")));
        } else if network.saved {
            detail.push_str(&format!(" · {}", fl!("network-saved")));
        }

        let mut buttons = widget::row().spacing(8).align_y(Alignment::Center);
        buttons = if network.active {
            buttons.push(button::standard(fl!("network-disconnect")).on_press(Message::Disconnect))
        } else {
            buttons.push(
                button::suggested(fl!("network-connect"))
                    .on_press(Message::Connect(network.ssid.clone())),
            )
        };
        if network.saved {
            buttons = buttons.push(
                button::destructive(fl!("network-forget"))
                    .on_press(Message::Forget(network.ssid.clone())),
            );
        }

        let row = settings::item_row(vec![
            widget::column()
                .push(text::body(network.ssid.as_str()))
                .push(text::caption(detail))
                .width(Length::Fill)
                .into(),
            buttons.into(),
        ]);

        match &self.prompt {
            Some(prompt) if prompt.ssid == network.ssid => widget::column()
                .spacing(8)
                .push(row)
                .push(
                    widget::row()
                        .spacing(8)
                        .align_y(Alignment::Center)
                        .push(
                            widget::secure_input(
                                fl!("network-password"),
                                prompt.password.as_str(),
                                None,
                                true,
                            )
                            .on_input(Message::PasswordInput)
                            .on_submit(|_| Message::SubmitPassword)
                            .width(Length::Fill),
                        )
                        .push(button::standard(fl!("cancel")).on_press(Message::CancelPassword))
                        .push(
                            button::suggested(fl!("network-connect"))
                                .on_press(Message::SubmitPassword),
                        ),
                )
                .into(),
            _ => row.into(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let section = if !self.snapshot.radio {
            settings::section().title(fl!("tile-network")).add(settings::item(
                fl!("network-radio-off"),
                button::suggested(fl!("network-enable")).on_press(Message::EnableWifi),
            ))
        } else if self.snapshot.networks.is_empty() {
            settings::section()
                .title(fl!("tile-network"))
                .add(text::body(fl!("network-none")))
        } else {
            self.snapshot.networks.iter().fold(
                settings::section().title(fl!("tile-network")),
                |section, network| section.add(self.view_network(network)),
            )
        };

        let mut content = widget::column().spacing(16);
        if let Some(status) = &self.status {
            content = content.push(text::caption(status.as_str()));
        }
        content.push(section).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn terse_fields_unescape() {
        assert_eq!(split_terse("yes:Home:82"), vec!["yes", "Home", "82"]);
        assert_eq!(
            split_terse(r"no:Cafe\: Free\\WiFi:40"),
            vec!["no", r"Cafe: Free\WiFi", "40"]
        );
        assert_eq!(split_terse("no::17"), vec!["no", "", "17"]);
    }

    #[test]
    fn networks_dedupe_and_sort() {
        let scan = "\
no:Office:55
no::70
yes:Home:64
no:Office:71
no:Guest\\:5G:30
garbage
";
        let saved: HashSet<String> = ["Office".to_string()].into();
        let networks = parse_networks(scan, &saved);
        assert_eq!(
            networks,
            vec![
                WifiNetwork {
                    ssid: "Home".into(),
                    active: true,
                    signal: 64,
                    saved: false,
                },
                WifiNetwork {
                    ssid: "Office".into(),
                    active: false,
                    signal: 71,
                    saved: true,
                },
                WifiNetwork {
                    ssid: "Guest:5G".into(),
                    active: false,
                    signal: 30,
                    saved: false,
                },
            ]
        );
    }

    #[test]
    fn saved_connections_and_radio() {
        let saved = parse_saved("Home\nWired connection 1\nlo\n\n");
        assert!(saved.contains("Home"));
        assert!(saved.contains("Wired connection 1"));
        assert_eq!(saved.len(), 3);

        assert!(parse_radio("enabled\n"));
        assert!(!parse_radio("disabled\n"));
        assert!(!parse_radio(""));
    }

    fn page_with(networks: Vec<WifiNetwork>) -> NetworkPage {
        let mut page = NetworkPage::new();
        page.snapshot = Snapshot {
            radio: true,
            networks,
        };
        page
    }

    #[test]
    fn unsaved_network_asks_for_password() {
        let mut page = page_with(vec![WifiNetwork {
            ssid: "Cafe".into(),
            active: false,
            signal: 40,
            saved: false,
        }]);

        let _ = page.update(Message::Connect("Cafe".into()));
        assert_eq!(page.prompt.as_ref().map(|p| p.ssid.as_str()), Some("Cafe"));

        // Empty password is refused and the prompt stays open.
        let _ = page.update(Message::SubmitPassword);
        assert!(page.prompt.is_some());
        assert!(page.status.is_some());

        let _ = page.update(Message::PasswordInput("hunter22".into()));
        let _ = page.update(Message::SubmitPassword);
        assert!(page.prompt.is_none());
    }

    #[test]
    fn saved_network_connects_without_prompt() {
        let mut page = page_with(vec![WifiNetwork {
            ssid: "Home".into(),
            active: false,
            signal: 80,
            saved: true,
        }]);
        let _ = page.update(Message::Connect("Home".into()));
        assert!(page.prompt.is_none());
    }
}
