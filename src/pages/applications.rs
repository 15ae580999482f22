// SPDX-License-Identifier: MPL-2.0

//! # Applications Page (Hyprland Config Editor)
//!
//! Edits `applications.conf`, `app_keybinds.conf`, `auto_start.conf` and
//! `window_rules.conf` one line at a time. Arrows in the header cycle between
//! the four files.
//!
//! ## Editing Model
//!
//! - Typing into a row only changes its *draft*
//! - Pressing Enter commits the draft and rewrites the file
//! - `+` inserts an empty line below the row, `-` deletes it; both save immediately
//!
//! ## External Edits
//!
//! The app subscribes to [`crate::editor::watch`] while this page is open.
//! When the current file changes on disk it is reloaded; if the content is
//! identical to what is in memory (typically our own save) nothing happens,
//! so uncommitted drafts survive.

use crate::editor::summary::{self, AppEntry, KeybindSummary};
use crate::editor::{ConfigDocument, ConfigKind};
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, icon, settings, text};
use cosmic::{Element, Task};
use std::path::{Path, PathBuf};

pub struct ApplicationsPage {
    hypr_dir: PathBuf,
    kind: ConfigKind,
    document: ConfigDocument,
    /// Per-line text as currently typed; committed on submit.
    drafts: Vec<String>,
    /// Last save/load failure, shown under the header.
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    PreviousKind,
    NextKind,
    Edit(usize, String),
    Commit(usize),
    AddAfter(usize),
    AddFirst,
    Remove(usize),
    FileChanged(PathBuf),
}

impl ApplicationsPage {
    pub fn new(hypr_dir: PathBuf) -> Self {
        Self {
            hypr_dir,
            kind: ConfigKind::Applications,
            document: ConfigDocument::empty(ConfigKind::Applications),
            drafts: Vec::new(),
            status: None,
        }
    }

    pub fn hypr_dir(&self) -> &Path {
        &self.hypr_dir
    }

    pub fn set_hypr_dir(&mut self, hypr_dir: PathBuf) {
        if self.hypr_dir != hypr_dir {
            self.hypr_dir = hypr_dir;
            self.reload();
        }
    }

    fn current_path(&self) -> PathBuf {
        self.kind.path_in(&self.hypr_dir)
    }

    fn kind_title(kind: ConfigKind) -> String {
        match kind {
            ConfigKind::Applications => fl!("config-applications"),
            ConfigKind::Keybinds => fl!("config-keybinds"),
            ConfigKind::Autoruns => fl!("config-autoruns"),
            ConfigKind::WindowRules => fl!("config-window-rules"),
        }
    }

    /// Load the current file, replacing the document unless it is unchanged.
    fn reload(&mut self) {
        let path = self.current_path();
        match ConfigDocument::load(self.kind, &path) {
            Ok(document) => {
                self.status = None;
                if document != self.document {
                    log::debug!("loaded {} ({} lines)", path.display(), document.len());
                    self.document = document;
                    self.reset_drafts();
                }
            }
            Err(err) => {
                log::error!("failed to load config: {err}");
                self.status = Some(fl!("editor-load-failed", error = err.to_string()));
            }
        }
    }

    fn reset_drafts(&mut self) {
        self.drafts = self.document.lines.clone();
    }

    fn persist(&mut self) {
        let path = self.current_path();
        match self.document.save(&path) {
            Ok(()) => self.status = None,
            Err(err) => {
                log::error!("failed to save config: {err}");
                self.status = Some(fl!("editor-save-failed", error = err.to_string()));
            }
        }
    }

    fn switch_kind(&mut self, kind: ConfigKind) {
        self.kind = kind;
        self.document = ConfigDocument::empty(kind);
        self.drafts.clear();
        self.reload();
    }

    pub fn on_show(&mut self) -> Task<Message> {
        self.reload();
        Task::none()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PreviousKind => self.switch_kind(self.kind.previous()),
            Message::NextKind => self.switch_kind(self.kind.next()),

            Message::Edit(index, value) => {
                if let Some(draft) = self.drafts.get_mut(index) {
                    *draft = value;
                }
            }

            Message::Commit(index) => {
                let Some(draft) = self.drafts.get(index).cloned() else {
                    return Task::none();
                };
                if self.document.lines.get(index) == Some(&draft) {
                    return Task::none();
                }
                match self.document.set_line(index, draft) {
                    Ok(()) => self.persist(),
                    Err(err) => log::warn!("commit ignored: {err}"),
                }
            }

            Message::AddAfter(index) => match self.document.insert_after(index) {
                Ok(()) => {
                    self.persist();
                    self.reset_drafts();
                }
                Err(err) => log::warn!("add ignored: {err}"),
            },

            Message::AddFirst => {
                self.document.push_line();
                self.persist();
                self.reset_drafts();
            }

            Message::Remove(index) => match self.document.remove(index) {
                Ok(removed) => {
                    log::info!("removed line {index}: {removed}");
                    self.persist();
                    self.reset_drafts();
                }
                Err(err) => log::warn!("remove ignored: {err}"),
            },

            Message::FileChanged(path) => {
                if path == self.current_path() {
                    self.reload();
                }
            }
        }

        Task::none()
    }

    fn view_header(&self) -> Element<'_, Message> {
        widget::row()
            .align_y(Alignment::Center)
            .push(
                button::icon(icon::from_name("go-previous-symbolic"))
                    .on_press(Message::PreviousKind),
            )
            .push(widget::horizontal_space())
            .push(text::title3(Self::kind_title(self.kind)))
            .push(widget::horizontal_space())
            .push(button::icon(icon::from_name("go-next-symbolic")).on_press(Message::NextKind))
            .into()
    }

    fn view_lines(&self) -> Element<'_, Message> {
        if self.drafts.is_empty() {
            return widget::column()
                .spacing(12)
                .align_x(Alignment::Center)
                .width(Length::Fill)
                .push(text::body(fl!("editor-empty")))
                .push(button::standard(fl!("editor-add-line")).on_press(Message::AddFirst))
                .into();
        }

        let rows = self.drafts.iter().enumerate().map(|(index, draft)| {
            widget::row()
                .spacing(12)
                .align_y(Alignment::Center)
                .push(
                    widget::text_input("", draft.as_str())
                        .on_input(move |value| Message::Edit(index, value))
                        .on_submit(move |_| Message::Commit(index))
                        .width(Length::Fill),
                )
                .push(
                    button::icon(icon::from_name("list-add-symbolic"))
                        .on_press(Message::AddAfter(index)),
                )
                .push(
                    button::icon(icon::from_name("list-remove-symbolic"))
                        .on_press(Message::Remove(index)),
                )
                .into()
        });

        widget::column::with_children(rows.collect::<Vec<Element<'_, Message>>>())
            .spacing(8)
            .into()
    }

    fn view_summary(&self) -> Option<Element<'_, Message>> {
        match self.kind {
            ConfigKind::Applications => {
                let entries = summary::application_entries(&self.document);
                if entries.is_empty() {
                    return None;
                }
                let section = entries.into_iter().fold(
                    settings::section().title(fl!("editor-summary")),
                    |section, AppEntry { name, command }| {
                        section.add(settings::item(name, text::caption(command)))
                    },
                );
                Some(section.into())
            }
            ConfigKind::Keybinds => {
                let binds = summary::keybind_summaries(&self.document);
                if binds.is_empty() {
                    return None;
                }
                let section = binds.iter().fold(
                    settings::section().title(fl!("editor-summary")),
                    |section, bind: &KeybindSummary| section.add(text::monotext(bind.to_string())),
                );
                Some(section.into())
            }
            ConfigKind::Autoruns | ConfigKind::WindowRules => None,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut content = widget::column()
            .spacing(16)
            .push(self.view_header())
            .push(text::caption(self.current_path().display().to_string()));

        if let Some(status) = &self.status {
            content = content.push(text::body(status.clone()));
        }

        content = content.push(self.view_lines());

        if let Some(summary) = self.view_summary() {
            content = content.push(summary);
        }

        content.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hypr-control-center-apps-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const APPS: &str = "########\n##APPS##\n########\n$terminal = kitty\n$browser = firefox\n";

    #[test]
    fn commit_writes_file_and_keeps_header() {
        let dir = scratch_dir("commit");
        let path = dir.join("applications.conf");
        fs::write(&path, APPS).unwrap();

        let mut page = ApplicationsPage::new(dir.clone());
        let _ = page.on_show();
        assert_eq!(page.drafts, vec!["$terminal = kitty", "$browser = firefox"]);

        let _ = page.update(Message::Edit(0, "$terminal = foot".into()));
        // Not on disk until committed.
        assert_eq!(fs::read_to_string(&path).unwrap(), APPS);

        let _ = page.update(Message::Commit(0));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "########\n##APPS##\n########\n$terminal = foot\n$browser = firefox\n"
        );

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn add_and_remove_save_immediately() {
        let dir = scratch_dir("add-remove");
        let path = dir.join("applications.conf");
        fs::write(&path, APPS).unwrap();

        let mut page = ApplicationsPage::new(dir.clone());
        let _ = page.on_show();

        let _ = page.update(Message::AddAfter(0));
        assert_eq!(page.drafts, vec!["$terminal = kitty", "", "$browser = firefox"]);
        assert!(fs::read_to_string(&path).unwrap().contains("kitty\n\n$browser"));

        let _ = page.update(Message::Remove(2));
        let _ = page.update(Message::Remove(1));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "########\n##APPS##\n########\n$terminal = kitty\n"
        );

        // Stale indices from an old view are ignored.
        let _ = page.update(Message::Remove(7));
        assert_eq!(page.document.len(), 1);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn empty_file_can_gain_a_first_line() {
        let dir = scratch_dir("empty");
        let mut page = ApplicationsPage::new(dir.clone());
        let _ = page.on_show();
        assert!(page.drafts.is_empty());

        let _ = page.update(Message::AddFirst);
        let _ = page.update(Message::Edit(0, "$editor = nvim".into()));
        let _ = page.update(Message::Commit(0));
        assert_eq!(
            fs::read_to_string(dir.join("applications.conf")).unwrap(),
            "$editor = nvim\n"
        );

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn external_edit_reloads_but_own_save_keeps_drafts() {
        let dir = scratch_dir("watch");
        let path = dir.join("applications.conf");
        fs::write(&path, APPS).unwrap();

        let mut page = ApplicationsPage::new(dir.clone());
        let _ = page.on_show();

        // Unchanged content: the uncommitted draft survives.
        let _ = page.update(Message::Edit(1, "$browser = chromium".into()));
        let _ = page.update(Message::FileChanged(path.clone()));
        assert_eq!(page.drafts[1], "$browser = chromium");

        // Another file changing is irrelevant.
        fs::write(dir.join("app_keybinds.conf"), "bind = SUPER, Q, exec, kitty\n").unwrap();
        let _ = page.update(Message::FileChanged(dir.join("app_keybinds.conf")));
        assert_eq!(page.drafts[1], "$browser = chromium");

        // A real external edit replaces document and drafts.
        fs::write(&path, "##APPS##\n$music = spotify\n").unwrap();
        let _ = page.update(Message::FileChanged(path.clone()));
        assert_eq!(page.drafts, vec!["$music = spotify"]);
        assert_eq!(page.document.header, vec!["##APPS##"]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn arrows_cycle_files() {
        let dir = scratch_dir("cycle");
        fs::write(dir.join("window_rules.conf"), "windowrulev2 = float,class:^(pavucontrol)$\n")
            .unwrap();

        let mut page = ApplicationsPage::new(dir.clone());
        let _ = page.update(Message::PreviousKind);
        assert_eq!(page.kind, ConfigKind::WindowRules);
        assert_eq!(page.drafts, vec!["windowrulev2 = float,class:^(pavucontrol)$"]);

        let _ = page.update(Message::NextKind);
        assert_eq!(page.kind, ConfigKind::Applications);
        assert!(page.drafts.is_empty());

        fs::remove_dir_all(dir).ok();
    }
}
