// SPDX-License-Identifier: MPL-2.0

//! # Sound Page
//!
//! Output and input device selection, their volumes, and per-application
//! playback volume, all through `pactl`.
//!
//! ## Device Choices
//!
//! Each dropdown entry is one port of one device, so a sound card with
//! speakers and a headphone jack shows up twice:
//!
//! ```text
//! Built-in Audio - Speakers     -> set-default-sink <sink>; set-sink-port <sink> analog-output-speaker
//! Built-in Audio - Headphones   -> set-default-sink <sink>; set-sink-port <sink> analog-output-headphones
//! ```
//!
//! Source monitors (`*.monitor`) are not offered as inputs.
//!
//! ## Polling
//!
//! While visible, volumes and the playback client list are re-read every
//! second. The device lists are rebuilt only when the page is shown. Volumes
//! are written when a slider is released.

use crate::command;
use crate::error::Result;
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, settings, text};
use cosmic::{Element, Task};
use regex::Regex;
use std::sync::LazyLock;

const PACTL: &str = "pactl";

/// `65%` in `pactl get-sink-volume` and `Volume:` lines.
static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("percent pattern"));

/// Chipset boilerplate in ALSA card descriptions.
static CONTROLLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Family\s+[\w/]+?\s+HD\s+Audio\s+Controller").expect("controller pattern")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("quoted pattern"));

// ============================================================================
// Parsing
// ============================================================================

/// Playback or capture side of the sound server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Output,
    Input,
}

impl Direction {
    /// `pactl` object name: `sink` or `source`.
    pub fn noun(self) -> &'static str {
        match self {
            Direction::Output => "sink",
            Direction::Input => "source",
        }
    }

    /// First line of each block in `pactl list sinks|sources`.
    fn block_header(self) -> &'static str {
        match self {
            Direction::Output => "Sink #",
            Direction::Input => "Source #",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioDevice {
    /// `pactl` name, e.g. `alsa_output.pci-0000_00_1f.3.analog-stereo`
    pub name: String,
    /// Shortened human description; the name when there is none
    pub description: String,
    pub ports: Vec<Port>,
    pub active_port: Option<String>,
}

/// Drop `Analog Stereo`, chipset names and trailing dashes.
pub fn simplify_description(description: &str) -> String {
    let text = description.replace("Analog Stereo", "");
    let text = CONTROLLER.replace_all(&text, "");
    text.trim_end_matches(|c: char| c.is_whitespace() || c == '-')
        .trim()
        .to_string()
}

/// Device names from `pactl list short sinks|sources` (second tab field).
pub fn parse_short_names(short: &str) -> Vec<String> {
    short
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// `analog-output-speaker: Speakers (type: Speaker, priority: 10000)`
fn parse_port(line: &str) -> Option<Port> {
    let (name, rest) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let description = rest.split('(').next().unwrap_or_default().trim();
    Some(Port {
        name: name.to_string(),
        description: description.to_string(),
    })
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Name, description, ports and active port of every block in
/// `pactl list sinks|sources`.
pub fn parse_devices(full: &str, direction: Direction) -> Vec<AudioDevice> {
    let mut devices = Vec::new();
    let mut current: Option<AudioDevice> = None;
    // Indentation of the `Ports:` line while its entries are being read.
    let mut ports_indent: Option<usize> = None;

    for line in full.lines() {
        if line.starts_with(direction.block_header()) {
            devices.extend(current.take());
            current = Some(AudioDevice::default());
            ports_indent = None;
            continue;
        }
        let Some(device) = current.as_mut() else {
            continue;
        };

        let trimmed = line.trim();
        if let Some(outer) = ports_indent {
            if !trimmed.is_empty() && indent(line) > outer {
                device.ports.extend(parse_port(trimmed));
                continue;
            }
            ports_indent = None;
        }

        if let Some(name) = trimmed.strip_prefix("Name:") {
            device.name = name.trim().to_string();
        } else if let Some(description) = trimmed.strip_prefix("Description:") {
            device.description = simplify_description(description);
        } else if trimmed == "Ports:" {
            ports_indent = Some(indent(line));
        } else if let Some(port) = trimmed.strip_prefix("Active Port:") {
            let port = port.trim();
            device.active_port = (!port.is_empty()).then(|| port.to_string());
        }
    }
    devices.extend(current);

    devices.retain(|device| !device.name.is_empty());
    for device in &mut devices {
        if device.description.is_empty() {
            device.description = device.name.clone();
        }
    }
    devices
}

/// Devices in `pactl list short` order, detailed from the long listing.
pub fn list_devices(short: &str, full: &str, direction: Direction) -> Vec<AudioDevice> {
    let details = parse_devices(full, direction);

    parse_short_names(short)
        .into_iter()
        .filter(|name| direction == Direction::Output || !name.ends_with(".monitor"))
        .map(|name| {
            details
                .iter()
                .find(|device| device.name == name)
                .cloned()
                .unwrap_or_else(|| AudioDevice {
                    description: name.clone(),
                    name,
                    ..AudioDevice::default()
                })
        })
        .collect()
}

/// One dropdown entry: a device, and the port to switch it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOption {
    pub device: String,
    /// `None` for devices without ports (virtual sinks, Bluetooth profiles)
    pub port: Option<String>,
    pub label: String,
}

pub fn device_options(devices: &[AudioDevice]) -> Vec<DeviceOption> {
    let mut options = Vec::new();
    for device in devices {
        if device.ports.is_empty() {
            options.push(DeviceOption {
                device: device.name.clone(),
                port: None,
                label: device.description.clone(),
            });
            continue;
        }
        options.extend(device.ports.iter().map(|port| DeviceOption {
            device: device.name.clone(),
            port: Some(port.name.clone()),
            label: if port.description.is_empty() {
                device.description.clone()
            } else {
                format!("{} - {}", device.description, port.description)
            },
        }));
    }
    options
}

/// The entry matching the default device's active port.
///
/// Falls back to any entry of the default device, then any active port, then
/// the first entry.
pub fn active_option(
    options: &[DeviceOption],
    devices: &[AudioDevice],
    default: &str,
) -> Option<usize> {
    let is_active = |option: &DeviceOption| {
        devices
            .iter()
            .any(|device| device.name == option.device && device.active_port == option.port)
    };

    options
        .iter()
        .position(|option| option.device == default && is_active(option))
        .or_else(|| options.iter().position(|option| option.device == default))
        .or_else(|| options.iter().position(is_active))
        .or_else(|| (!options.is_empty()).then_some(0))
}

/// First percentage in `pactl get-sink-volume` output.
pub fn parse_volume(output: &str) -> Option<u32> {
    PERCENT
        .captures(output)
        .and_then(|caps| caps[1].parse().ok())
        .map(|volume: u32| volume.min(100))
}

/// An application stream from `pactl list sink-inputs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackClient {
    /// Sink input index for `set-sink-input-volume`
    pub index: u32,
    /// `application.name`, when the client sets one
    pub name: Option<String>,
    /// Mean of the channel volumes
    pub volume: u32,
}

pub fn parse_clients(output: &str) -> Vec<PlaybackClient> {
    let mut clients = Vec::new();
    let mut current: Option<PlaybackClient> = None;

    for line in output.lines().map(str::trim) {
        if let Some(index) = line.strip_prefix("Sink Input #") {
            clients.extend(current.take());
            current = index.trim().parse().ok().map(|index| PlaybackClient {
                index,
                name: None,
                volume: 0,
            });
            continue;
        }
        let Some(client) = current.as_mut() else {
            continue;
        };

        if line.starts_with("application.name") {
            if let Some(caps) = QUOTED.captures(line) {
                client.name = Some(caps[1].to_string());
            }
        } else if line.starts_with("Volume:") {
            let volumes: Vec<u32> = PERCENT
                .captures_iter(line)
                .filter_map(|caps| caps[1].parse().ok())
                .collect();
            if !volumes.is_empty() {
                client.volume = volumes.iter().sum::<u32>() / volumes.len() as u32;
            }
        }
    }
    clients.extend(current);

    clients
}

// ============================================================================
// pactl Commands
// ============================================================================

fn read_devices(direction: Direction) -> (Vec<AudioDevice>, String) {
    let plural = format!("{}s", direction.noun());
    let short = command::stdout_or_empty(PACTL, &["list", "short", &plural]);
    let full = command::stdout_or_empty(PACTL, &["list", &plural]);
    let get_default = format!("get-default-{}", direction.noun());
    let default = command::stdout_or_empty(PACTL, &[get_default.as_str()]);
    (
        list_devices(&short, &full, direction),
        default.trim().to_string(),
    )
}

fn read_volume(direction: Direction, device: &str) -> Option<u32> {
    let get_volume = format!("get-{}-volume", direction.noun());
    parse_volume(&command::stdout_or_empty(PACTL, &[get_volume.as_str(), device]))
}

fn select_device(direction: Direction, option: &DeviceOption) -> Result<()> {
    let noun = direction.noun();
    let set_default = format!("set-default-{noun}");
    command::run(PACTL, &[set_default.as_str(), option.device.as_str()])?;
    if let Some(port) = &option.port {
        let set_port = format!("set-{noun}-port");
        command::run(PACTL, &[set_port.as_str(), option.device.as_str(), port.as_str()])?;
    }
    Ok(())
}

fn set_volume(direction: Direction, device: &str, volume: u32) -> Result<()> {
    let set_volume = format!("set-{}-volume", direction.noun());
    let level = format!("{volume}%");
    command::run(PACTL, &[set_volume.as_str(), device, level.as_str()])
}

fn set_client_volume(index: u32, volume: u32) -> Result<()> {
    let index = index.to_string();
    let level = format!("{volume}%");
    command::run(PACTL, &["set-sink-input-volume", index.as_str(), level.as_str()])
}

// ============================================================================
// Page
// ============================================================================

/// One dropdown plus volume slider.
#[derive(Debug, Default)]
struct Endpoint {
    /// Device/port entries in dropdown order.
    options: Vec<DeviceOption>,
    /// `options[i].label`, kept for the dropdown widget.
    labels: Vec<String>,
    selected: Option<usize>,
    /// Volume of the selected device, 0 to 100.
    volume: u32,
}

impl Endpoint {
    fn load(direction: Direction) -> Self {
        let (devices, default) = read_devices(direction);
        let options = device_options(&devices);
        let selected = active_option(&options, &devices, &default);
        let labels = options.iter().map(|option| option.label.clone()).collect();
        let mut endpoint = Self {
            options,
            labels,
            selected,
            volume: 0,
        };
        endpoint.refresh_volume(direction);
        endpoint
    }

    fn current(&self) -> Option<&DeviceOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    fn refresh_volume(&mut self, direction: Direction) {
        if let Some(volume) = self
            .current()
            .and_then(|option| read_volume(direction, &option.device))
        {
            self.volume = volume;
        }
    }
}

/// A volume slider the user is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    Output,
    Input,
    /// Sink input index
    Client(u32),
}

#[derive(Default)]
pub struct SoundPage {
    output: Endpoint,
    input: Endpoint,
    /// Applications currently playing audio.
    clients: Vec<PlaybackClient>,
    /// Slider being dragged; polling leaves its value alone.
    held: Option<Held>,
    /// Outcome of the last failed `pactl` call.
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    SelectOutput(usize),
    SelectInput(usize),
    OutputVolume(u32),
    InputVolume(u32),
    /// Sink input index and new volume.
    ClientVolume(u32, u32),
    VolumeReleased,
}

impl SoundPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                log::warn!("pactl failed: {err}");
                self.status = Some(fl!("action-failed", error = err.to_string()));
            }
        }
    }

    fn refresh_clients(&mut self) {
        let mut clients = parse_clients(&command::stdout_or_empty(PACTL, &["list", "sink-inputs"]));
        if let Some(Held::Client(index)) = self.held {
            let held = self.clients.iter().find(|client| client.index == index);
            if let (Some(held), Some(client)) =
                (held, clients.iter_mut().find(|client| client.index == index))
            {
                client.volume = held.volume;
            }
        }
        if clients.len() != self.clients.len() {
            log::debug!("sound: {} playback clients", clients.len());
        }
        self.clients = clients;
    }

    fn poll(&mut self) {
        if self.held != Some(Held::Output) {
            self.output.refresh_volume(Direction::Output);
        }
        if self.held != Some(Held::Input) {
            self.input.refresh_volume(Direction::Input);
        }
        self.refresh_clients();
    }

    pub fn on_show(&mut self) -> Task<Message> {
        self.status = None;
        self.held = None;
        self.output = Endpoint::load(Direction::Output);
        self.input = Endpoint::load(Direction::Input);
        self.refresh_clients();
        Task::none()
    }

    fn select(&mut self, direction: Direction, index: usize) {
        let endpoint = match direction {
            Direction::Output => &mut self.output,
            Direction::Input => &mut self.input,
        };
        let Some(option) = endpoint.options.get(index).cloned() else {
            return;
        };
        endpoint.selected = Some(index);
        endpoint.refresh_volume(direction);

        log::info!("default {}: {}", direction.noun(), option.label);
        let result = select_device(direction, &option);
        self.report(result);
    }

    fn release(&mut self) {
        let Some(held) = self.held.take() else {
            return;
        };
        let result = match held {
            Held::Output | Held::Input => {
                let (direction, endpoint) = if held == Held::Output {
                    (Direction::Output, &self.output)
                } else {
                    (Direction::Input, &self.input)
                };
                match endpoint.current() {
                    Some(option) => {
                        log::info!("{} volume {}%", direction.noun(), endpoint.volume);
                        set_volume(direction, &option.device, endpoint.volume)
                    }
                    None => Ok(()),
                }
            }
            Held::Client(index) => {
                match self.clients.iter().find(|client| client.index == index) {
                    Some(client) => set_client_volume(index, client.volume),
                    None => Ok(()),
                }
            }
        };
        self.report(result);
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.poll(),
            Message::SelectOutput(index) => self.select(Direction::Output, index),
            Message::SelectInput(index) => self.select(Direction::Input, index),

            Message::OutputVolume(volume) => {
                self.held = Some(Held::Output);
                self.output.volume = volume.min(100);
            }
            Message::InputVolume(volume) => {
                self.held = Some(Held::Input);
                self.input.volume = volume.min(100);
            }
            Message::ClientVolume(index, volume) => {
                if let Some(client) = self.clients.iter_mut().find(|client| client.index == index) {
                    self.held = Some(Held::Client(index));
                    client.volume = volume.min(100);
                }
            }

            Message::VolumeReleased => self.release(),
        }

        Task::none()
    }

    fn volume_row<'a>(
        volume: u32,
        on_change: impl Fn(u32) -> Message + 'a,
    ) -> Element<'a, Message> {
        widget::row()
            .spacing(12)
            .align_y(Alignment::Center)
            .push(
                widget::slider(0..=100, volume, on_change)
                    .on_release(Message::VolumeReleased)
                    .width(Length::Fill),
            )
            .push(text::body(format!("{volume}%")))
            .into()
    }

    fn view_endpoint<'a>(
        title: String,
        endpoint: &'a Endpoint,
        on_select: fn(usize) -> Message,
        on_volume: fn(u32) -> Message,
    ) -> Element<'a, Message> {
        let section = settings::section().title(title);
        if endpoint.options.is_empty() {
            return section.add(text::body(fl!("sound-no-devices"))).into();
        }

        section
            .add(settings::item(
                fl!("sound-device"),
                widget::dropdown(&endpoint.labels, endpoint.selected, on_select),
            ))
            .add(settings::item(
                fl!("sound-volume"),
                Self::volume_row(endpoint.volume, on_volume),
            ))
            .into()
    }

    fn view_clients(&self) -> Element<'_, Message> {
        let section = settings::section().title(fl!("sound-apps"));
        if self.clients.is_empty() {
            return section.add(text::body(fl!("sound-no-apps"))).into();
        }

        self.clients
            .iter()
            .fold(section, |section, client| {
                let index = client.index;
                let name = client.name.clone().unwrap_or_else(|| fl!("sound-unknown-app"));
                section.add(settings::item(
                    name,
                    Self::volume_row(client.volume, move |volume| {
                        Message::ClientVolume(index, volume)
                    }),
                ))
            })
            .into()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut column = widget::column()
            .spacing(16)
            .push(Self::view_endpoint(
                fl!("sound-output"),
                &self.output,
                Message::SelectOutput,
                Message::OutputVolume,
            ))
            .push(Self::view_endpoint(
                fl!("sound-input"),
                &self.input,
                Message::SelectInput,
                Message::InputVolume,
            ))
            .push(self.view_clients());

        if let Some(status) = &self.status {
            column = column.push(text::caption(status.as_str()));
        }

        column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHORT_SINKS: &str = "\
47\talsa_output.pci-0000_00_1f.3.analog-stereo\tPipeWire\ts32le 2ch 48000Hz\tSUSPENDED
52\tbluez_output.AA_BB_CC_DD_EE_FF.1\tPipeWire\ts16le 2ch 48000Hz\tRUNNING
";

    const SINKS: &str = "\
Sink #47
\tState: SUSPENDED
\tName: alsa_output.pci-0000_00_1f.3.analog-stereo
\tDescription: Cannon Lake PCH cAVS Analog Stereo
\tDriver: PipeWire
\tProperties:
\t\tdevice.description = \"Cannon Lake PCH cAVS\"
\tPorts:
\t\tanalog-output-speaker: Speakers (type: Speaker, priority: 10000, availability unknown)
\t\tanalog-output-headphones: Headphones (type: Headphones, priority: 9900, not available)
\tActive Port: analog-output-speaker
\tFormats:
\t\tpcm

Sink #52
\tState: RUNNING
\tName: bluez_output.AA_BB_CC_DD_EE_FF.1
\tDescription: WH-1000XM4
\tDriver: PipeWire
\tFormats:
\t\tpcm
";

    const SHORT_SOURCES: &str = "\
46\talsa_output.pci-0000_00_1f.3.analog-stereo.monitor\tPipeWire\ts32le 2ch 48000Hz\tSUSPENDED
48\talsa_input.pci-0000_00_1f.3.analog-stereo\tPipeWire\ts32le 2ch 48000Hz\tSUSPENDED
";

    const SOURCES: &str = "\
Source #46
\tName: alsa_output.pci-0000_00_1f.3.analog-stereo.monitor
\tDescription: Monitor of Cannon Lake PCH cAVS Analog Stereo
\tPorts:
\t\tanalog-output-speaker: Speakers (type: Speaker, priority: 10000)
\tActive Port: analog-output-speaker

Source #48
\tName: alsa_input.pci-0000_00_1f.3.analog-stereo
\tDescription: Family 17h/19h HD Audio Controller Analog Stereo
\tPorts:
\t\tanalog-input-internal-mic: Internal Microphone (type: Mic, priority: 8900)
\t\tanalog-input-mic: Microphone (type: Mic, priority: 8700, not available)
\tActive Port: analog-input-mic
";

    const SINK_INPUTS: &str = "\
Sink Input #83
\tDriver: PipeWire
\tSink: 52
\tVolume: front-left: 42597 /  65% / -11.23 dB,   front-right: 39321 /  60% / -13.31 dB
\tProperties:
\t\tapplication.name = \"Firefox\"
\t\tmedia.name = \"YouTube\"
Sink Input #91
\tDriver: PipeWire
\tVolume: mono: 65536 / 100% / 0.00 dB
";

    #[test]
    fn descriptions_lose_boilerplate() {
        assert_eq!(
            simplify_description("Cannon Lake PCH cAVS Analog Stereo"),
            "Cannon Lake PCH cAVS"
        );
        assert_eq!(
            simplify_description("Family 17h/19h HD Audio Controller Analog Stereo"),
            ""
        );
        assert_eq!(simplify_description("USB Audio - "), "USB Audio");
    }

    #[test]
    fn sinks_keep_short_list_order_and_ports() {
        let devices = list_devices(SHORT_SINKS, SINKS, Direction::Output);
        assert_eq!(devices.len(), 2);

        let card = &devices[0];
        assert_eq!(card.description, "Cannon Lake PCH cAVS");
        assert_eq!(
            card.ports,
            vec![
                Port {
                    name: "analog-output-speaker".into(),
                    description: "Speakers".into(),
                },
                Port {
                    name: "analog-output-headphones".into(),
                    description: "Headphones".into(),
                },
            ]
        );
        assert_eq!(card.active_port.as_deref(), Some("analog-output-speaker"));

        assert_eq!(devices[1].description, "WH-1000XM4");
        assert!(devices[1].ports.is_empty());
    }

    #[test]
    fn monitors_are_not_inputs() {
        let devices = list_devices(SHORT_SOURCES, SOURCES, Direction::Input);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "alsa_input.pci-0000_00_1f.3.analog-stereo");
        // Nothing left of the description, so the name stands in.
        assert_eq!(devices[0].description, devices[0].name);
    }

    #[test]
    fn unknown_short_entries_use_their_name() {
        let devices = list_devices("3\tnull-sink\tPipeWire\n", "", Direction::Output);
        assert_eq!(devices[0].description, "null-sink");
    }

    #[test]
    fn one_option_per_port() {
        let devices = list_devices(SHORT_SINKS, SINKS, Direction::Output);
        let labels: Vec<String> = device_options(&devices)
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Cannon Lake PCH cAVS - Speakers",
                "Cannon Lake PCH cAVS - Headphones",
                "WH-1000XM4",
            ]
        );
    }

    #[test]
    fn default_device_picks_the_selection() {
        let devices = list_devices(SHORT_SINKS, SINKS, Direction::Output);
        let options = device_options(&devices);

        assert_eq!(
            active_option(&options, &devices, "alsa_output.pci-0000_00_1f.3.analog-stereo"),
            Some(0)
        );
        assert_eq!(
            active_option(&options, &devices, "bluez_output.AA_BB_CC_DD_EE_FF.1"),
            Some(2)
        );
        // Unknown default: the first active port.
        assert_eq!(active_option(&options, &devices, ""), Some(0));
        assert_eq!(active_option(&[], &[], ""), None);
    }

    #[test]
    fn volume_is_first_percentage() {
        assert_eq!(
            parse_volume("Volume: front-left: 32768 /  50% / -18.06 dB,   front-right: 32768 /  50%\n"),
            Some(50)
        );
        assert_eq!(parse_volume("Volume: mono: 98304 / 150% / 10.57 dB"), Some(100));
        assert_eq!(parse_volume("Failure: No such entity"), None);
    }

    #[test]
    fn clients_average_their_channels() {
        assert_eq!(
            parse_clients(SINK_INPUTS),
            vec![
                PlaybackClient {
                    index: 83,
                    name: Some("Firefox".into()),
                    volume: 62,
                },
                PlaybackClient {
                    index: 91,
                    name: None,
                    volume: 100,
                },
            ]
        );
        assert!(parse_clients("").is_empty());
    }

    #[test]
    fn dragging_a_client_slider_only_touches_that_client() {
        let mut page = SoundPage::new();
        page.clients = parse_clients(SINK_INPUTS);

        let _ = page.update(Message::ClientVolume(83, 30));
        assert_eq!(page.held, Some(Held::Client(83)));
        assert_eq!(page.clients[0].volume, 30);
        assert_eq!(page.clients[1].volume, 100);

        let _ = page.update(Message::ClientVolume(7, 10));
        assert_eq!(page.held, Some(Held::Client(83)));
    }
}
