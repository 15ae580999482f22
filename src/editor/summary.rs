// SPDX-License-Identifier: MPL-2.0

//! Read-only summaries shown under the editor.
//!
//! `applications.conf` holds `$name = command` variables and
//! `app_keybinds.conf` holds `bind = MODS, KEY, dispatcher, args` lines that
//! reference those variables. The summaries resolve both into something a
//! person can scan quickly.

use super::ConfigDocument;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindSummary {
    /// 1-based position among the parsed binds
    pub ordinal: usize,
    pub modifiers: String,
    pub key: String,
    pub dispatcher: String,
    pub args: String,
}

impl KeybindSummary {
    /// What the bind does: the command for `exec`, the dispatcher otherwise.
    pub fn action(&self) -> &str {
        if self.dispatcher == "exec" {
            &self.args
        } else {
            &self.dispatcher
        }
    }
}

impl fmt::Display for KeybindSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BIND {:<3} {} KEY + {:<6} {}",
            self.ordinal,
            self.modifiers,
            self.key,
            self.action()
        )
    }
}

/// `$terminal` -> `Terminal`
fn display_name(key: &str) -> String {
    let key = key.trim().replace('$', "");
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn application_entries(doc: &ConfigDocument) -> Vec<AppEntry> {
    doc.lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, command)| AppEntry {
            name: display_name(key),
            command: command.trim().to_string(),
        })
        .collect()
}

/// `$var = value` definitions, longest name first so `$mainMod` is
/// substituted before a shorter `$main` could eat its prefix. A name defined
/// twice keeps its last value.
fn variables(doc: &ConfigDocument) -> Vec<(String, String)> {
    let defined: HashMap<String, String> = doc
        .header
        .iter()
        .chain(&doc.lines)
        .map(|line| line.trim())
        .filter(|line| line.starts_with('$'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();

    let mut vars: Vec<(String, String)> = defined.into_iter().collect();
    vars.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    vars
}

fn substitute(text: &str, vars: &[(String, String)]) -> String {
    vars.iter()
        .fold(text.to_string(), |acc, (name, value)| acc.replace(name.as_str(), value))
}

pub fn keybind_summaries(doc: &ConfigDocument) -> Vec<KeybindSummary> {
    let vars = variables(doc);
    let mut binds = Vec::new();

    for line in doc.lines.iter().map(|line| line.trim()) {
        if !line.starts_with("bind") {
            continue;
        }

        let line = line.split_once('#').map_or(line, |(code, _)| code).trim();
        let binding = line.split_once('=').map_or(line, |(_, binding)| binding).trim();
        let parts: Vec<&str> = binding.split(',').map(str::trim).collect();
        let [modifiers, key, dispatcher, rest @ ..] = parts.as_slice() else {
            continue;
        };

        binds.push(KeybindSummary {
            ordinal: binds.len() + 1,
            modifiers: substitute(modifiers, &vars),
            key: key.to_string(),
            dispatcher: dispatcher.to_string(),
            args: substitute(rest.join(",").trim(), &vars),
        });
    }

    binds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ConfigKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn applications_are_named_and_trimmed() {
        let doc = ConfigDocument::parse(
            ConfigKind::Applications,
            "########\n##APPS##\n########\n$TERMINAL =  kitty --single\n# $old = x\n\n$fileManager=nemo\nnot an assignment\n",
        );
        assert_eq!(
            application_entries(&doc),
            vec![
                AppEntry {
                    name: "Terminal".into(),
                    command: "kitty --single".into()
                },
                AppEntry {
                    name: "Filemanager".into(),
                    command: "nemo".into()
                },
            ]
        );
    }

    #[test]
    fn keybinds_resolve_variables_and_number_binds() {
        let doc = ConfigDocument::parse(
            ConfigKind::Keybinds,
            "\
$mainMod = SUPER
$main = ALT
$terminal = kitty
bind = $mainMod, Q, exec, $terminal # open a terminal
bind = $main SHIFT, C, killactive,
bindm = $mainMod, mouse:272, movewindow
bind = broken, line
bind = $mainMod, R, exec, rofi -show drun -theme a,b
",
        );
        let binds = keybind_summaries(&doc);
        assert_eq!(binds.len(), 4);

        assert_eq!(binds[0].modifiers, "SUPER");
        assert_eq!(binds[0].action(), "kitty");
        assert_eq!(binds[0].to_string(), "BIND 1   SUPER KEY + Q      kitty");

        assert_eq!(binds[1].modifiers, "ALT SHIFT");
        assert_eq!(binds[1].action(), "killactive");

        assert_eq!(binds[2].ordinal, 3);
        assert_eq!(binds[2].key, "mouse:272");
        assert_eq!(binds[2].action(), "movewindow");

        assert_eq!(binds[3].ordinal, 4);
        assert_eq!(binds[3].args, "rofi -show drun -theme a,b");
    }

    #[test]
    fn header_variables_are_visible_to_binds() {
        let doc = ConfigDocument {
            kind: ConfigKind::Keybinds,
            header: vec!["$mod = SUPER".into()],
            lines: vec!["bind = $mod, B, exec, firefox".into()],
            crlf: false,
        };
        assert_eq!(keybind_summaries(&doc)[0].modifiers, "SUPER");
    }

    #[test]
    fn redefined_variable_uses_last_value() {
        let doc = ConfigDocument::parse(
            ConfigKind::Keybinds,
            "$mainMod = ALT\n$term = foot\n$mainMod = SUPER\n$term = kitty\nbind = $mainMod, Return, exec, $term\n",
        );
        let binds = keybind_summaries(&doc);
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].modifiers, "SUPER");
        assert_eq!(binds[0].args, "kitty");
    }
}
