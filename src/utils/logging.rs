// utils/logging.rs
use chrono::Local;
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::Path,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
}

/// Message text as every sink records it; debug entries carry a `[DEBUG]` tag.
fn entry(level: Level, message: &str) -> String {
    match level {
        Level::Info => message.to_string(),
        Level::Debug => format!("[DEBUG] {}", message),
    }
}

pub trait Logger: Send + Sync {
    fn write(&mut self, level: Level, message: &str);

    fn log(&mut self, message: &str) {
        self.write(Level::Info, message);
    }

    fn debug_log(&mut self, message: &str) {
        self.write(Level::Debug, message);
    }
}

/// Appends dated entries to a log file. Debug entries are dropped unless
/// `debug` is set.
#[derive(Debug)]
pub struct FileLogger {
    file: File,
    debug: bool,
}

impl FileLogger {
    pub fn new(path: &str, debug: bool) -> io::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file, debug })
    }
}

impl Logger for FileLogger {
    fn write(&mut self, level: Level, message: &str) {
        if level == Level::Debug && !self.debug {
            return;
        }
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Err(e) = writeln!(self.file, "{} {}", stamp, entry(level, message)) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }
}

/// Log lines kept for the in-app log view, optionally mirrored to a file.
pub struct LogBuffer {
    lines: Vec<String>,
    sink: Option<Box<dyn Logger>>,
    debug: bool,
}

impl LogBuffer {
    pub fn new(sink: Option<Box<dyn Logger>>, debug: bool) -> Self {
        Self {
            lines: Vec::new(),
            sink,
            debug,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Logger for LogBuffer {
    fn write(&mut self, level: Level, message: &str) {
        if level == Level::Info || self.debug {
            self.lines.push(format!(
                "[{}] {}",
                Local::now().format("%H:%M:%S"),
                entry(level, message)
            ));
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.write(level, message);
        }
    }
}
