//! Shared test fixtures: a recording overlay host and store helpers.
#![allow(dead_code)]

use pixelpet_core::overlay::{
    DismissalPolicy, OverlayAttributes, OverlayContent, OverlayError, OverlayHost,
};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Request {
        id: Uuid,
        attributes: OverlayAttributes,
        content: OverlayContent,
    },
    Update {
        id: Uuid,
        content: OverlayContent,
    },
    End {
        id: Uuid,
        content: OverlayContent,
        dismissal: DismissalPolicy,
    },
}

/// Overlay host that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub enabled: bool,
    pub fail_requests: bool,
    pub fail_updates: bool,
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn enabled() -> Self {
        Self { enabled: true, ..Self::default() }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<&OverlayContent> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Update { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn last_end(&self) -> Option<&OverlayContent> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::End { content, .. } => Some(content),
            _ => None,
        })
    }

    /// Maximum number of sessions that were simultaneously live.
    pub fn max_live_sessions(&self) -> usize {
        let mut live = 0usize;
        let mut max = 0usize;
        for call in &self.calls {
            match call {
                HostCall::Request { .. } => live += 1,
                HostCall::End { .. } => live = live.saturating_sub(1),
                HostCall::Update { .. } => {}
            }
            max = max.max(live);
        }
        max
    }
}

impl OverlayHost for RecordingHost {
    fn overlays_enabled(&self) -> bool {
        self.enabled
    }

    fn request(
        &mut self,
        id: Uuid,
        attributes: &OverlayAttributes,
        content: &OverlayContent,
    ) -> Result<(), OverlayError> {
        if self.fail_requests {
            return Err(OverlayError::RequestFailed("host refused".into()));
        }
        self.calls.push(HostCall::Request {
            id,
            attributes: attributes.clone(),
            content: content.clone(),
        });
        Ok(())
    }

    fn update(&mut self, id: Uuid, content: &OverlayContent) -> Result<(), OverlayError> {
        if self.fail_updates {
            return Err(OverlayError::PushFailed("host busy".into()));
        }
        self.calls.push(HostCall::Update { id, content: content.clone() });
        Ok(())
    }

    fn end(
        &mut self,
        id: Uuid,
        content: &OverlayContent,
        dismissal: DismissalPolicy,
    ) -> Result<(), OverlayError> {
        self.calls.push(HostCall::End {
            id,
            content: content.clone(),
            dismissal,
        });
        Ok(())
    }
}

/// A unique on-disk database path under the system temp dir.
pub fn temp_db_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pixelpet-{tag}-{}.db", Uuid::new_v4()))
}

/// Remove a database file and its WAL side files.
pub fn remove_db(path: &PathBuf) {
    let base = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{base}{suffix}"));
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
