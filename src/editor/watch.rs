// SPDX-License-Identifier: MPL-2.0

//! External-edit detection for the editor files.
//!
//! The Hyprland directory is watched rather than the files themselves: editors
//! that save by rename replace the inode, and a per-file watch would go dead
//! after the first such save.

use super::ConfigKind;
use crate::error::Result;
use cosmic::iced::Subscription;
use futures_util::SinkExt;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Paths in `event` that belong to one of the editor files.
fn tracked_paths(event: &Event) -> Vec<PathBuf> {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = event
        .paths
        .iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(ConfigKind::from_file_name)
                .is_some()
        })
        .cloned()
        .collect();
    paths.dedup();
    paths
}

fn start_watcher(
    dir: &Path,
    tx: tokio::sync::mpsc::UnboundedSender<notify::Result<Event>>,
) -> Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res| {
        // Receiver gone means the subscription was dropped.
        let _ = tx.send(res);
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Emits the path of an editor file whenever it is created, modified or removed.
pub fn subscription(hypr_dir: PathBuf) -> Subscription<PathBuf> {
    struct ConfigWatcher;

    Subscription::run_with_id(
        (std::any::TypeId::of::<ConfigWatcher>(), hypr_dir.clone()),
        cosmic::iced::stream::channel(16, move |mut output| async move {
            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

            // Held for the lifetime of the stream; dropping it stops the watch.
            let _watcher = match start_watcher(&hypr_dir, tx) {
                Ok(watcher) => {
                    log::info!("watching {} for config edits", hypr_dir.display());
                    watcher
                }
                Err(err) => {
                    log::warn!("cannot watch {}: {err}", hypr_dir.display());
                    return futures_util::future::pending().await;
                }
            };

            while let Some(res) = rx.recv().await {
                match res {
                    Ok(event) => {
                        for path in tracked_paths(&event) {
                            log::debug!("config file changed: {}", path.display());
                            if output.send(path).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => log::error!("config watcher: {err}"),
                }
            }

            futures_util::future::pending().await
        }),
    )
}
