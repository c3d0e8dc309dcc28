//! Logger module
//!
//! Provides logging utilities for the gateway including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Severity-filtered info/warning/error logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use chrono::Local;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::config::Config;

/// Log severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    /// Parse a configured level name; unknown names fall back to `info`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" | "trace" => Self::Debug,
            _ => Self::Info,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Error,
            1 => Self::Warn,
            3 => Self::Debug,
            _ => Self::Info,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    MAX_LEVEL.store(Level::parse(&config.logging.level) as u8, Ordering::Relaxed);
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

pub fn enabled(level: Level) -> bool {
    level <= Level::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
}

fn stamp(level: Level, message: &str) -> String {
    format!(
        "{} [{}] {message}",
        Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
        level.label()
    )
}

fn write(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    let line = stamp(level, message);
    match (writer::get(), level) {
        (Some(w), Level::Error | Level::Warn) => w.write_error(&line),
        (Some(w), _) => w.write_access(&line),
        (None, Level::Error | Level::Warn) => eprintln!("{line}"),
        (None, _) => println!("{line}"),
    }
}

pub fn log_error(message: &str) {
    write(Level::Error, message);
}

pub fn log_warning(message: &str) {
    write(Level::Warn, message);
}

pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write(Level::Debug, message);
}

/// Write a formatted access log entry (unstamped, unfiltered)
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    log_info("======================================");
    log_info("Contact gateway started");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!(
        "Submit endpoint: POST http://{addr}{}",
        config.routes.submit_path
    ));
    if config.routes.health.enabled {
        log_info(&format!(
            "Health probes: {} {}",
            config.routes.health.liveness_path, config.routes.health.readiness_path
        ));
    }
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info(&format!("Max body size: {} bytes", config.http.max_body_size));
    log_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("[Connection] Failed to serve connection: {err:?}"));
}

pub fn log_shutdown(active_connections: usize) {
    log_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still active"
    ));
}
