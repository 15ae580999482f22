// SPDX-License-Identifier: MPL-2.0

//! About page: system summary from `fastfetch`, with a `sysinfo` fallback.

use crate::command;
use crate::fl;
use cosmic::iced::Length;
use cosmic::widget::{self, button, settings, text};
use cosmic::{Element, Task};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use sysinfo::System;

/// CSI sequences (colours, cursor movement) and OSC titles.
static ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[@-Z\\-_])")
        .expect("ansi pattern")
});

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn strip_ansi(input: &str) -> String {
    ANSI.replace_all(input, "").into_owned()
}

/// Trimmed, non-empty lines of fastfetch output with escapes removed.
pub fn fastfetch_lines(output: &str) -> Vec<String> {
    strip_ansi(output)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// What `sysinfo` could tell about the machine.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SystemFacts {
    pub os: Option<String>,
    pub kernel: Option<String>,
    pub host: Option<String>,
    pub cpu_brand: Option<String>,
    pub cpu_cores: usize,
    pub used_memory: u64,
    pub total_memory: u64,
}

impl SystemFacts {
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        Self {
            os: System::long_os_version(),
            kernel: System::kernel_version(),
            host: System::host_name(),
            cpu_brand: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .filter(|brand| !brand.is_empty()),
            cpu_cores: sys.cpus().len(),
            used_memory: sys.used_memory(),
            total_memory: sys.total_memory(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(os) = &self.os {
            lines.push(format!("{}: {os}", fl!("about-os")));
        }
        if let Some(kernel) = &self.kernel {
            lines.push(format!("{}: {kernel}", fl!("about-kernel")));
        }
        if let Some(host) = &self.host {
            lines.push(format!("{}: {host}", fl!("about-host")));
        }
        if let Some(brand) = &self.cpu_brand {
            lines.push(format!(
                "{}: {brand} ({})",
                fl!("about-cpu"),
                fl!("about-cores", count = self.cpu_cores)
            ));
        }
        if self.total_memory > 0 {
            lines.push(format!(
                "{}: {:.1} GiB / {:.1} GiB",
                fl!("about-memory"),
                self.used_memory as f64 / GIB,
                self.total_memory as f64 / GIB
            ));
        }
        lines
    }
}

fn load_lines(fastfetch_config: &Path) -> Vec<String> {
    let config = fastfetch_config.display().to_string();
    match command::output("fastfetch", &["-c", &config]) {
        Ok(output) => {
            let lines = fastfetch_lines(&output);
            if !lines.is_empty() {
                return lines;
            }
            log::warn!("fastfetch printed nothing");
        }
        Err(err) => log::warn!("{err}"),
    }

    SystemFacts::collect().lines()
}

pub struct AboutPage {
    fastfetch_config: PathBuf,
    lines: Vec<String>,
    loaded: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
}

impl AboutPage {
    pub fn new(fastfetch_config: PathBuf) -> Self {
        Self {
            fastfetch_config,
            lines: Vec::new(),
            loaded: false,
        }
    }

    pub fn set_fastfetch_config(&mut self, fastfetch_config: PathBuf) {
        self.fastfetch_config = fastfetch_config;
    }

    fn load(&mut self) {
        self.lines = load_lines(&self.fastfetch_config);
        self.loaded = true;
    }

    pub fn on_show(&mut self) -> Task<Message> {
        if !self.loaded {
            self.load();
        }
        Task::none()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh => self.load(),
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let section = if self.lines.is_empty() {
            settings::section().add(text::body(fl!("about-unavailable")))
        } else {
            self.lines
                .iter()
                .fold(settings::section(), |section, line| {
                    section.add(text::monotext(line.as_str()))
                })
        };

        widget::column()
            .spacing(16)
            .push(
                widget::row()
                    .push(text::title3(fl!("about-system")))
                    .push(widget::horizontal_space())
                    .push(button::standard(fl!("refresh")).on_press(Message::Refresh)),
            )
            .push(widget::container(section).width(Length::Fill))
            .into()
    }
}
