// SPDX-License-Identifier: MPL-2.0

//! Battery page: a fixed set of `upower` properties for the first battery.

use crate::command;
use crate::fl;
use cosmic::widget::{self, settings, text};
use cosmic::{Element, Task};
use std::collections::HashMap;

/// `upower -i` keys shown on the page, in display order.
pub const KEYS: [&str; 10] = [
    "state",
    "warning-level",
    "energy-full",
    "energy-full-design",
    "energy-rate",
    "voltage",
    "charge-cycles",
    "percentage",
    "capacity",
    "technology",
];

const NOT_AVAILABLE: &str = "N/A";

/// First `upower -e` object path that is a battery.
pub fn find_battery_device(enumerate: &str) -> Option<String> {
    enumerate
        .lines()
        .map(str::trim)
        .find(|line| line.contains("battery_"))
        .map(str::to_string)
}

/// `energy-full-design` -> `ENERGY FULL DESIGN`
pub fn label(key: &str) -> String {
    key.replace('-', " ").to_uppercase()
}

/// One `(label, value)` pair per entry of [`KEYS`].
pub fn parse_info(info: &str) -> Vec<(String, String)> {
    let values: HashMap<&str, &str> = info
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    KEYS.iter()
        .map(|key| {
            let value = values
                .get(key)
                .filter(|value| !value.is_empty())
                .copied()
                .unwrap_or(NOT_AVAILABLE);
            (label(key), value.to_string())
        })
        .collect()
}

#[derive(Default)]
pub struct BatteryPage {
    device: Option<String>,
    rows: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
}

impl BatteryPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&mut self) {
        let device = find_battery_device(&command::stdout_or_empty("upower", &["-e"]));
        if device != self.device {
            log::info!("battery device: {}", device.as_deref().unwrap_or("none"));
        }

        self.rows = match &device {
            Some(device) => parse_info(&command::stdout_or_empty("upower", &["-i", device])),
            None => Vec::new(),
        };
        self.device = device;
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

    pub fn view(&self) -> Element<'_, Message> {
        if self.device.is_none() {
            return widget::container(text::body(fl!("battery-none")))
                .padding(32)
                .into();
        }

        self.rows
            .iter()
            .fold(
                settings::section().title(fl!("tile-battery")),
                |section, (label, value)| {
                    section.add(settings::item(label.as_str(), text::body(value.as_str())))
                },
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ENUMERATE: &str = "\
/org/freedesktop/UPower/devices/line_power_AC
/org/freedesktop/UPower/devices/battery_BAT0
/org/freedesktop/UPower/devices/battery_BAT1
/org/freedesktop/UPower/devices/DisplayDevice
";

    const INFO: &str = "\
  native-path:          BAT0
  vendor:               SMP
  power supply:         yes
  battery
    present:             yes
    state:               discharging
    warning-level:       none
    energy:              38.61 Wh
    energy-full:         48.96 Wh
    energy-full-design:  57.02 Wh
    energy-rate:         9.353 W
    voltage:             12.412 V
    charge-cycles:       N/A
    time to empty:       4.1 hours
    percentage:          78%
    capacity:            85.8648%
    technology:          lithium-polymer
    icon-name:          'battery-full-symbolic'
";

    #[test]
    fn first_battery_wins() {
        assert_eq!(
            find_battery_device(ENUMERATE).as_deref(),
            Some("/org/freedesktop/UPower/devices/battery_BAT0")
        );
        assert_eq!(
            find_battery_device("/org/freedesktop/UPower/devices/DisplayDevice\n"),
            None
        );
    }

    #[test]
    fn labels_are_upper_case_words() {
        assert_eq!(label("energy-full-design"), "ENERGY FULL DESIGN");
        assert_eq!(label("state"), "STATE");
    }

    #[test]
    fn info_is_ordered_with_placeholders() {
        let rows = parse_info(INFO);
        assert_eq!(rows.len(), KEYS.len());
        assert_eq!(rows[0], ("STATE".to_string(), "discharging".to_string()));
        assert_eq!(rows[4], ("ENERGY RATE".to_string(), "9.353 W".to_string()));
        assert_eq!(rows[6], ("CHARGE CYCLES".to_string(), "N/A".to_string()));
        assert_eq!(rows[7], ("PERCENTAGE".to_string(), "78%".to_string()));
        assert_eq!(rows[9], ("TECHNOLOGY".to_string(), "lithium-polymer".to_string()));
    }

    #[test]
    fn missing_keys_read_not_available() {
        let rows = parse_info("  state:  charging\n  percentage:\n");
        assert_eq!(rows[0].1, "charging");
        assert_eq!(rows[7].1, "N/A");
        assert!(rows[1..7].iter().all(|(_, value)| value == "N/A"));
    }
}
