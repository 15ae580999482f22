// SPDX-License-Identifier: MPL-2.0

//! Header-preserving document model for one config file.

use super::ConfigKind;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// One config file split into its preserved header and editable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub kind: ConfigKind,
    /// Raw header lines, including any `\r` before the newline.
    pub header: Vec<String>,
    /// Body lines without line terminators.
    pub lines: Vec<String>,
    /// The file uses `\r\n`; body lines are written back the same way.
    pub crlf: bool,
}

impl ConfigDocument {
    pub fn empty(kind: ConfigKind) -> Self {
        Self {
            kind,
            header: Vec::new(),
            lines: Vec::new(),
            crlf: false,
        }
    }

    pub fn parse(kind: ConfigKind, text: &str) -> Self {
        let mut lines: Vec<String> = text.split_terminator('\n').map(str::to_string).collect();
        let header_len = kind.header_len(&lines);
        let body = lines
            .split_off(header_len)
            .into_iter()
            .map(|mut line| {
                if line.ends_with('\r') {
                    line.pop();
                }
                line
            })
            .collect();

        Self {
            kind,
            header: lines,
            lines: body,
            crlf: text.split_once('\n').is_some_and(|(first, _)| first.ends_with('\r')),
        }
    }

    /// Read `path`. A missing file is an empty document, not an error.
    pub fn load(kind: ConfigKind, path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(kind, &text)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist yet", path.display());
                Ok(Self::empty(kind))
            }
            Err(err) => Err(Error::io(path, err)),
        }
    }

    /// Header lines as read, then body lines with the file's line ending.
    pub fn render(&self) -> String {
        let newline = if self.crlf { "\r\n" } else { "\n" };
        let mut out = String::new();
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }
        for line in &self.lines {
            out.push_str(line);
            out.push_str(newline);
        }
        out
    }

    /// Rewrite the whole file: header first, then the body.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|err| Error::io(path, err))?;
        log::info!("saved {} ({} lines)", path.display(), self.lines.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(Error::LineOutOfRange {
                index,
                len: self.lines.len(),
            })
        }
    }

    pub fn set_line(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check(index)?;
        self.lines[index] = text.into();
        Ok(())
    }

    /// Insert an empty line directly below `index`.
    pub fn insert_after(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        self.lines.insert(index + 1, String::new());
        Ok(())
    }

    pub fn push_line(&mut self) {
        self.lines.push(String::new());
    }

    pub fn remove(&mut self, index: usize) -> Result<String> {
        self.check(index)?;
        Ok(self.lines.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const KEYBINDS: &str = "\
########################
########KEYBINDS########
########################
# See https://wiki.hyprland.org/Configuring/Keywords/ for more
$mainMod = SUPER
bind = $mainMod, Q, exec, kitty
";

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hypr-control-center-doc-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir.join("app_keybinds.conf")
    }

    #[test]
    fn parse_splits_header_and_body() {
        let doc = ConfigDocument::parse(ConfigKind::Keybinds, KEYBINDS);
        assert_eq!(doc.header.len(), 4);
        assert_eq!(
            doc.lines,
            vec!["$mainMod = SUPER", "bind = $mainMod, Q, exec, kitty"]
        );
    }

    #[test]
    fn render_reproduces_input() {
        let doc = ConfigDocument::parse(ConfigKind::Keybinds, KEYBINDS);
        assert_eq!(doc.render(), KEYBINDS);
    }

    #[test]
    fn edits_never_touch_the_header() {
        let mut doc = ConfigDocument::parse(ConfigKind::Keybinds, KEYBINDS);
        let header = doc.header.clone();

        doc.remove(0).unwrap();
        doc.remove(0).unwrap();
        assert!(doc.is_empty());
        doc.push_line();
        doc.set_line(0, "bind = SUPER, E, exec, nemo").unwrap();

        assert_eq!(doc.header, header);
        assert!(doc.render().starts_with("########################\n"));
        assert!(doc.render().ends_with("bind = SUPER, E, exec, nemo\n"));
    }

    #[test]
    fn insert_after_places_blank_line_below() {
        let mut doc = ConfigDocument::parse(ConfigKind::Applications, "a = 1\nb = 2\n");
        doc.insert_after(0).unwrap();
        assert_eq!(doc.lines, vec!["a = 1", "", "b = 2"]);
        doc.insert_after(2).unwrap();
        assert_eq!(doc.lines, vec!["a = 1", "", "b = 2", ""]);
    }

    #[test]
    fn out_of_range_edits_fail_without_change() {
        let mut doc = ConfigDocument::parse(ConfigKind::Applications, "a = 1\n");
        let before = doc.clone();

        assert!(matches!(
            doc.set_line(1, "x"),
            Err(Error::LineOutOfRange { index: 1, len: 1 })
        ));
        assert!(doc.insert_after(5).is_err());
        assert!(doc.remove(1).is_err());
        assert_eq!(doc, before);

        let mut empty = ConfigDocument::empty(ConfigKind::Autoruns);
        assert!(empty.insert_after(0).is_err());
    }

    #[test]
    fn crlf_files_render_byte_for_byte() {
        let text = "########\r\n##APPS##\r\n$a = b\r\n";
        let mut doc = ConfigDocument::parse(ConfigKind::Applications, text);
        assert_eq!(doc.header, vec!["########\r", "##APPS##\r"]);
        assert_eq!(doc.lines, vec!["$a = b"]);
        assert_eq!(doc.render(), text);

        doc.set_line(0, "$a = c").unwrap();
        assert_eq!(doc.render(), "########\r\n##APPS##\r\n$a = c\r\n");
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = scratch_file("missing").with_file_name("does-not-exist.conf");
        let doc = ConfigDocument::load(ConfigKind::Keybinds, &path).unwrap();
        assert_eq!(doc, ConfigDocument::empty(ConfigKind::Keybinds));
    }

    #[test]
    fn save_then_load_keeps_header_and_edits() {
        let path = scratch_file("save");
        fs::write(&path, KEYBINDS).unwrap();

        let mut doc = ConfigDocument::load(ConfigKind::Keybinds, &path).unwrap();
        doc.set_line(1, "bind = $mainMod, T, exec, foot").unwrap();
        doc.save(&path).unwrap();

        let reloaded = ConfigDocument::load(ConfigKind::Keybinds, &path).unwrap();
        assert_eq!(reloaded, doc);
        assert_eq!(reloaded.header[1], "########KEYBINDS########");

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn unreadable_path_is_io_error() {
        let dir = scratch_file("dir").parent().unwrap().to_path_buf();
        let err = ConfigDocument::load(ConfigKind::Applications, &dir).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        fs::remove_dir_all(&dir).ok();
    }
}
