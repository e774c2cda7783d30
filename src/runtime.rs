//! Action log runtime.
//!
//! Bridges the sync game loop with an async JSONL writer. Each processed action
//! is sent over an unbounded channel and appended to the log file as one JSON
//! line. Writing is best effort: an I/O error ends the writer task and later
//! records are dropped, the game keeps running.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::ActionRecord;
use crate::types::Action;

/// Wire form of one action log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub seq: u64,
    pub at_ms: u64,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<usize>>,
}

impl From<&ActionRecord> for LogRecord {
    fn from(record: &ActionRecord) -> Self {
        let rows = match &record.action {
            Action::Remove(rows) => Some(rows.clone()),
            _ => None,
        };
        Self {
            seq: record.seq,
            at_ms: record.at_ms,
            action: record.action.as_str(),
            rows,
        }
    }
}

/// Action log configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub path: Option<PathBuf>,
}

impl LogConfig {
    /// `BLOCKFALL_LOG_PATH`: append target; logging is off when unset or empty
    pub fn from_env() -> Self {
        let path = std::env::var("BLOCKFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Self { path }
    }
}

/// Running action log.
pub struct ActionLog {
    rt: Runtime,
    tx: mpsc::UnboundedSender<LogRecord>,
    task: JoinHandle<()>,
}

impl ActionLog {
    /// Start the log from environment variables.
    ///
    /// Returns `Ok(None)` if `BLOCKFALL_LOG_PATH` is not set.
    pub fn start_from_env() -> Result<Option<Self>> {
        match LogConfig::from_env().path {
            Some(path) => Ok(Some(Self::start(path)?)),
            None => Ok(None),
        }
    }

    pub fn start(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();

        let rt = Runtime::new()?;
        let task = rt.spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(_) => return,
            };

            let mut buf: Vec<u8> = Vec::with_capacity(256);
            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Ok(Self { rt, tx, task })
    }

    pub fn send(&self, record: &ActionRecord) {
        let _ = self.tx.send(LogRecord::from(record));
    }

    /// Close the channel and wait for the writer to flush what it has.
    pub fn shutdown(self) {
        let Self { rt, tx, task } = self;
        drop(tx);
        let _ = rt.block_on(task);
    }
}
