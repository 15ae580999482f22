// SPDX-License-Identifier: MPL-2.0

//! # External Tool Invocation
//!
//! Every page talks to the system through command-line tools (`bluetoothctl`,
//! `hyprctl`, `nmcli`, ...). These helpers wrap `std::process::Command` so the
//! pages only deal with stdout text and a typed error.
//!
//! - [`output`]: run, wait, and return stdout (non-zero exit is an error)
//! - [`stdout_or_empty`]: same, but failures are logged and yield `""`
//! - [`run`]: run and wait, discarding output
//! - [`spawn`]: start detached; a waiter thread reaps the child
//!
//! All calls block the caller. Pages that run slow tools wrap them in
//! `tokio::task::spawn_blocking` (see [`blocking`]).

use crate::error::{Error, Result};
use std::process::{Command, Stdio};
use std::thread;

/// Run `program` with `args`, wait for it, and return its stdout.
pub fn output(program: &str, args: &[&str]) -> Result<String> {
    log::debug!("exec: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::Status {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like [`output`], but a missing binary or failed run yields an empty string.
///
/// Used by pollers where "tool absent" just means "nothing to show".
pub fn stdout_or_empty(program: &str, args: &[&str]) -> String {
    match output(program, args) {
        Ok(stdout) => stdout,
        Err(err) => {
            log::debug!("{err}");
            String::new()
        }
    }
}

/// Run `program` to completion, ignoring its output.
pub fn run(program: &str, args: &[&str]) -> Result<()> {
    output(program, args).map(|_| ())
}

/// Start `program` without waiting for it to finish.
///
/// A waiter thread reaps the child so detached launches never linger as
/// zombies.
pub fn spawn(program: &str, args: &[&str]) -> Result<()> {
    log::debug!("spawn: {} {}", program, args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

    let name = program.to_string();
    let reaper = thread::Builder::new()
        .name(format!("reap-{name}"))
        .spawn(move || match child.wait() {
            Ok(status) if !status.success() => log::debug!("{name} exited with {status}"),
            Ok(_) => {}
            Err(err) => log::warn!("waiting for {name}: {err}"),
        });
    if let Err(err) = reaper {
        log::warn!("cannot start waiter for {program}: {err}");
    }

    Ok(())
}

/// Run a blocking closure on tokio's blocking pool.
///
/// A panicked or cancelled job yields `T::default()` so the UI keeps its
/// previous behavior of showing an empty state.
pub async fn blocking<T, F>(job: F) -> T
where
    T: Default + Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(value) => value,
        Err(err) => {
            log::error!("background job failed: {err}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_spawn_error() {
        let err = output("hypr-control-center-no-such-tool", &[]).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert!(err.to_string().contains("hypr-control-center-no-such-tool"));
    }

    #[test]
    fn missing_binary_reads_as_empty() {
        assert_eq!(stdout_or_empty("hypr-control-center-no-such-tool", &["x"]), "");
    }

    #[test]
    fn captures_stdout() {
        let out = output("sh", &["-c", "echo hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    /// Children of this process in state `Z` whose command is `comm`.
    fn zombie_children(comm: &str) -> usize {
        let Ok(tasks) = std::fs::read_dir("/proc/self/task") else {
            return 0;
        };
        tasks
            .flatten()
            .filter_map(|task| std::fs::read_to_string(task.path().join("children")).ok())
            .flat_map(|pids| {
                pids.split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter_map(|pid| std::fs::read_to_string(format!("/proc/{pid}/stat")).ok())
            .filter(|stat| {
                let name = format!("({comm})");
                stat.contains(&name)
                    && stat
                        .rsplit_once(')')
                        .is_some_and(|(_, rest)| rest.trim_start().starts_with('Z'))
            })
            .count()
    }

    #[test]
    fn spawned_children_are_reaped() {
        for _ in 0..5 {
            spawn("true", &[]).unwrap();
        }
        std::thread::sleep(std::time::Duration::from_millis(500));
        assert_eq!(zombie_children("true"), 0);
    }

    #[test]
    fn spawn_missing_binary_is_spawn_error() {
        let err = spawn("hypr-control-center-no-such-tool", &[]).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn nonzero_exit_is_status_error() {
        let err = run("sh", &["-c", "echo oops >&2; exit 3"]).unwrap_err();
        match err {
            Error::Status { stderr, status, .. } => {
                assert_eq!(stderr, "oops");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
