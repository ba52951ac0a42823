use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const FRONTEND_TARGET: &str = "frontend";

/// Console methods of the webview and the log level each one maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Log,
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleLevel {
    pub fn to_level(self) -> Level {
        match self {
            ConsoleLevel::Log => Level::Trace,
            ConsoleLevel::Debug => Level::Debug,
            ConsoleLevel::Info => Level::Info,
            ConsoleLevel::Warn => Level::Warn,
            ConsoleLevel::Error => Level::Error,
        }
    }
}

/// Logs a console message coming from the webview through the `log` facade,
/// so it reaches every installed sink.
pub fn forward_console(level: ConsoleLevel, message: &str) {
    log::log!(target: FRONTEND_TARGET, level.to_level(), "{message}");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl ForwardedRecord {
    fn from_record(record: &Record<'_>) -> Self {
        Self {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        }
    }
}

/// Receives a copy of every record the forwarding logger accepts. Must not
/// block; the host does its own I/O elsewhere.
pub trait HostLogSink: Send + Sync {
    fn forward(&self, record: ForwardedRecord);
}

#[derive(Debug, Clone)]
pub struct ChannelLogSink {
    tx: UnboundedSender<ForwardedRecord>,
}

impl ChannelLogSink {
    pub fn channel() -> (Self, UnboundedReceiver<ForwardedRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostLogSink for ChannelLogSink {
    fn forward(&self, record: ForwardedRecord) {
        // Receiver gone means the host shut down; local logging still works.
        let _ = self.tx.send(record);
    }
}

/// Drains forwarded records into `handler` until every sender is dropped.
/// Spawn it on whichever runtime the host owns.
pub async fn pump_logs<H>(mut rx: UnboundedReceiver<ForwardedRecord>, mut handler: H)
where
    H: FnMut(ForwardedRecord),
{
    while let Some(record) = rx.recv().await {
        handler(record);
    }
}

/// `log::Log` middleware: writes to the local logger and forwards the same
/// record to the host sink.
pub struct ForwardingLogger<S> {
    local: Option<Box<dyn Log>>,
    sink: S,
    level: LevelFilter,
}

impl<S: HostLogSink> ForwardingLogger<S> {
    pub fn new(sink: S, level: LevelFilter) -> Self {
        Self {
            local: None,
            sink,
            level,
        }
    }

    /// Uses env_logger (honouring `RUST_LOG`) as the local sink.
    pub fn with_env_logger(self) -> Self {
        let local = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.level.as_str()),
        )
        .build();
        self.with_local(Box::new(local))
    }

    pub fn with_local(mut self, local: Box<dyn Log>) -> Self {
        self.local = Some(local);
        self
    }

    pub fn install(self) -> Result<(), SetLoggerError>
    where
        S: 'static,
    {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl<S: HostLogSink> Log for ForwardingLogger<S> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(local) = &self.local {
            local.log(record);
        }
        self.sink.forward(ForwardedRecord::from_record(record));
    }

    fn flush(&self) {
        if let Some(local) = &self.local {
            local.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<ForwardedRecord>>>);

    impl HostLogSink for RecordingSink {
        fn forward(&self, record: ForwardedRecord) {
            self.0.lock().unwrap().push(record);
        }
    }

    #[derive(Default)]
    struct CountingLocal(Arc<Mutex<usize>>);

    impl Log for CountingLocal {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, _record: &Record<'_>) {
            *self.0.lock().unwrap() += 1;
        }

        fn flush(&self) {}
    }

    #[test]
    fn console_levels_map_onto_log_levels() {
        assert_eq!(ConsoleLevel::Log.to_level(), Level::Trace);
        assert_eq!(ConsoleLevel::Debug.to_level(), Level::Debug);
        assert_eq!(ConsoleLevel::Info.to_level(), Level::Info);
        assert_eq!(ConsoleLevel::Warn.to_level(), Level::Warn);
        assert_eq!(ConsoleLevel::Error.to_level(), Level::Error);
        assert_eq!(
            serde_json::from_str::<ConsoleLevel>("\"warn\"").unwrap(),
            ConsoleLevel::Warn
        );
    }

    #[test]
    fn records_reach_both_local_and_host_sinks() {
        let sink = RecordingSink::default();
        let local_count = Arc::new(Mutex::new(0));
        let logger = ForwardingLogger::new(sink.clone(), LevelFilter::Info)
            .with_local(Box::new(CountingLocal(Arc::clone(&local_count))));

        logger.log(
            &Record::builder()
                .args(format_args!("skin cargada"))
                .level(Level::Warn)
                .target(FRONTEND_TARGET)
                .build(),
        );

        let forwarded = sink.0.lock().unwrap();
        assert_eq!(*local_count.lock().unwrap(), 1);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].level, Level::Warn);
        assert_eq!(forwarded[0].target, "frontend");
        assert_eq!(forwarded[0].message, "skin cargada");
    }

    #[test]
    fn records_below_level_are_dropped() {
        let sink = RecordingSink::default();
        let logger = ForwardingLogger::new(sink.clone(), LevelFilter::Info);

        logger.log(
            &Record::builder()
                .args(format_args!("ruido"))
                .level(Level::Trace)
                .build(),
        );

        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn channel_sink_feeds_the_pump() {
        let (sink, rx) = ChannelLogSink::channel();
        let received = Arc::new(Mutex::new(Vec::new()));
        let pump = tokio::spawn(pump_logs(rx, {
            let received = Arc::clone(&received);
            move |record: ForwardedRecord| received.lock().unwrap().push(record.message)
        }));

        let logger = ForwardingLogger::new(sink, LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .args(format_args!("hola"))
                .level(Level::Info)
                .build(),
        );
        drop(logger);
        pump.await.unwrap();

        assert_eq!(*received.lock().unwrap(), vec!["hola".to_string()]);
    }
}
