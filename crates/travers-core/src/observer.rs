//! Per-path observability hooks

use crate::error::Result;
use crate::path::Path;
use std::sync::Arc;

/// One-way destination for diagnostic messages
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str) -> Result<()>;
}

/// Sink that forwards messages to `tracing` at info level
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) -> Result<()> {
        tracing::info!(target: "travers::path", "{}", message);
        Ok(())
    }
}

/// Hook invoked by the engine once for every path it visits, before evaluation
///
/// Observers cannot influence the traversal.
pub trait PathObserver: Send + Sync {
    fn on_path_visited(&self, path: &Path);
}

/// Observer writing one record per visited path to a [`LogSink`]
///
/// Sink failures are swallowed.
#[derive(Clone)]
pub struct PathLogger {
    sink: Arc<dyn LogSink>,
}

impl PathLogger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Write the record for `path`
    pub fn record(&self, path: &Path) {
        if let Err(e) = self.sink.log(&path.to_string()) {
            tracing::debug!("Dropping path log record: {}", e);
        }
    }
}

impl Default for PathLogger {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl std::fmt::Debug for PathLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathLogger").finish_non_exhaustive()
    }
}

impl PathObserver for PathLogger {
    fn on_path_visited(&self, path: &Path) {
        self.record(path);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use crate::node::Node;
    use std::sync::Mutex;

    /// Sink collecting messages in memory
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        pub(crate) fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl LogSink for RecordingSink {
        fn log(&self, message: &str) -> Result<()> {
            self.messages.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    pub(crate) struct FailingSink;

    impl LogSink for FailingSink {
        fn log(&self, _message: &str) -> Result<()> {
            Err(Error::GraphAccess("log pipe closed".into()))
        }
    }

    #[test]
    fn test_path_logger_records_path() {
        let sink = Arc::new(RecordingSink::default());
        let logger = PathLogger::new(sink.clone());

        logger.on_path_visited(&Path::new(Node::new(4)));

        assert_eq!(sink.messages(), vec!["(4)"]);
    }

    #[test]
    fn test_path_logger_swallows_sink_failure() {
        let logger = PathLogger::new(Arc::new(FailingSink));
        logger.on_path_visited(&Path::new(Node::new(4)));
    }
}
