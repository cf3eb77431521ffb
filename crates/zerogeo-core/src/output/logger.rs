//! Event Logger
//!
//! Append-only JSONL log of resolved interactions. The null logger keeps the
//! counters but writes nothing, so callers never branch on whether logging is
//! enabled.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use zerogeo_events::{generate_event_id, InteractionEvent};

struct Sink {
    path: PathBuf,
    out: BufWriter<File>,
}

/// One JSON line per interaction, ids `evt_00000001` onwards
#[derive(Default)]
pub struct EventLogger {
    sink: Option<Sink>,
    issued_ids: u64,
    logged: u64,
}

impl EventLogger {
    /// Truncate `path` and log to it.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(&path)?;
        Ok(Self {
            sink: Some(Sink {
                path,
                out: BufWriter::new(file),
            }),
            ..Self::default()
        })
    }

    /// Discard everything.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn is_null(&self) -> bool {
        self.sink.is_none()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|sink| sink.path.as_path())
    }

    pub fn next_id(&mut self) -> String {
        self.issued_ids += 1;
        generate_event_id(self.issued_ids)
    }

    /// Events passed to [`log`](Self::log), written or not.
    pub fn event_count(&self) -> u64 {
        self.logged
    }

    pub fn log(&mut self, event: &InteractionEvent) -> io::Result<()> {
        self.logged += 1;
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        serde_json::to_writer(&mut sink.out, event)?;
        sink.out.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.out.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogger")
            .field("path", &self.path())
            .field("logged", &self.logged)
            .finish()
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(path = ?self.path(), "event log flush failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use zerogeo_events::InteractionKind;

    #[test]
    fn test_logger_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.jsonl");

        let mut logger = EventLogger::new(&path).unwrap();
        assert_eq!(logger.path(), Some(path.as_path()));

        let merge = InteractionEvent::new(logger.next_id(), 0, InteractionKind::SingletonMerge, [0, 1], [0, 1])
            .with_transfer(0, 0, 1);
        logger.log(&merge).unwrap();
        let auction = InteractionEvent::new(logger.next_id(), 0, InteractionKind::Auction, [2, 3], [2, 3])
            .with_bids([1.0, 2.0, 3.0, 4.0]);
        logger.log(&auction).unwrap();
        drop(logger);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: InteractionEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, auction);
        assert_eq!(parsed.event_id, "evt_00000002");
    }

    #[test]
    fn test_null_logger_counts_only() {
        let mut logger = EventLogger::null();
        let event = InteractionEvent::new("evt_1", 1, InteractionKind::Auction, [0, 1], [0, 1]);

        logger.log(&event).unwrap();
        logger.flush().unwrap();

        assert!(logger.is_null());
        assert_eq!(logger.path(), None);
        assert_eq!(logger.event_count(), 1);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut logger = EventLogger::null();
        let ids: Vec<String> = (0..3).map(|_| logger.next_id()).collect();
        assert_eq!(ids, ["evt_00000001", "evt_00000002", "evt_00000003"]);
    }
}
