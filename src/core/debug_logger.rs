use std::collections::HashMap;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use chrono::Local;
use flate2::{write::GzEncoder, Compression};
use fs2::FileExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_ROTATION_BYTES: u64 = 8 * 1024 * 1024;
const MAX_ARCHIVES: usize = 5;
const ROTATION_CHECK_INTERVAL: u32 = 200;

const DEBUG_ENV: &str = "PROXYSCRAPE_DEBUG";
const DEBUG_LOG_ENV: &str = "PROXYSCRAPE_DEBUG_LOG";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,                          // RFC3339 local time
    pub level: String,                              // ERROR, FETCH, CHECK
    pub component: String,
    pub event: String,
    pub message: String,                            // redacted
    pub correlation_id: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
}

struct RotatingLogger {
    log_path: PathBuf,
    max_bytes: u64,
    write_count: AtomicU32,
}

impl RotatingLogger {
    fn new(log_path: PathBuf, max_bytes: u64) -> Self {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        Self {
            log_path,
            max_bytes,
            write_count: AtomicU32::new(0),
        }
    }

    fn write_with_rotation(&self, json_line: &str) -> Result<(), std::io::Error> {
        if self.write_count.fetch_add(1, Ordering::Relaxed) % ROTATION_CHECK_INTERVAL == 0 {
            let _ = self.rotate_if_needed();
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        writeln!(file, "{}", json_line)?;
        Ok(())
    }

    fn rotate_if_needed(&self) -> Result<(), std::io::Error> {
        if !self.needs_rotation()? {
            return Ok(());
        }

        // Another process may be rotating the same file
        let lock_path = self.log_path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        if lock_file.try_lock_exclusive().is_ok() {
            if self.needs_rotation()? {
                self.perform_rotation()?;
            }
            let _ = std::fs::remove_file(&lock_path);
        }
        Ok(())
    }

    fn needs_rotation(&self) -> Result<bool, std::io::Error> {
        if !self.log_path.exists() {
            return Ok(false);
        }
        Ok(std::fs::metadata(&self.log_path)?.len() >= self.max_bytes)
    }

    fn base_name(&self) -> String {
        self.log_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "proxyscrape-debug".to_string())
    }

    fn log_dir(&self) -> &Path {
        self.log_path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn perform_rotation(&self) -> Result<(), std::io::Error> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let archive_path = self
            .log_dir()
            .join(format!("{}.{}.gz", self.base_name(), timestamp));

        let temp_path = self.log_path.with_extension("rotating");
        std::fs::rename(&self.log_path, &temp_path)?;

        let source_file = File::open(&temp_path)?;
        let target_file = File::create(&archive_path)?;
        let mut encoder = GzEncoder::new(target_file, Compression::default());
        std::io::copy(&mut BufReader::new(source_file), &mut encoder)?;
        encoder.finish()?;

        std::fs::remove_file(&temp_path)?;

        let _ = self.cleanup_old_archives();
        Ok(())
    }

    fn cleanup_old_archives(&self) -> Result<(), std::io::Error> {
        let prefix = format!("{}.", self.base_name());

        let mut archives = Vec::new();
        for entry in std::fs::read_dir(self.log_dir())? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(&prefix) && name.ends_with(".gz") {
                archives.push((entry.path(), entry.metadata()?.modified()?));
            }
        }

        archives.sort_by_key(|(_, modified)| *modified);
        if archives.len() > MAX_ARCHIVES {
            let excess = archives.len() - MAX_ARCHIVES;
            for (path, _) in archives.iter().take(excess) {
                let _ = std::fs::remove_file(path);
            }
        }
        Ok(())
    }
}

/// Opt-in JSON Lines debug log for list fetches and liveness checks
///
/// Disabled unless `PROXYSCRAPE_DEBUG` is truthy or a file is given
/// explicitly. Logging failures are swallowed and never fail an operation.
pub struct DebugLogger {
    rotating_logger: Option<Mutex<RotatingLogger>>,
    session_id: String,
    redaction_patterns: Vec<Regex>,
}

impl std::fmt::Debug for DebugLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugLogger")
            .field("enabled", &self.is_enabled())
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DebugLogger {
    /// Build from `PROXYSCRAPE_DEBUG` / `PROXYSCRAPE_DEBUG_LOG`
    pub fn from_env() -> Self {
        if Self::parse_debug_enabled() {
            Self::to_file(Self::default_log_path())
        } else {
            Self::disabled()
        }
    }

    pub fn disabled() -> Self {
        Self::build(None)
    }

    /// Enabled logger writing to `log_path`
    pub fn to_file(log_path: impl Into<PathBuf>) -> Self {
        Self::build(Some(RotatingLogger::new(log_path.into(), DEFAULT_ROTATION_BYTES)))
    }

    /// Override the size at which the log is rotated
    pub fn with_rotation_bytes(mut self, max_bytes: u64) -> Self {
        if let Some(logger) = self.rotating_logger.as_mut() {
            if let Ok(inner) = logger.get_mut() {
                inner.max_bytes = max_bytes;
            }
        }
        self
    }

    fn build(rotating_logger: Option<RotatingLogger>) -> Self {
        Self {
            rotating_logger: rotating_logger.map(Mutex::new),
            session_id: Uuid::new_v4().to_string()[..8].to_string(),
            redaction_patterns: Self::compile_redaction_patterns(),
        }
    }

    /// Supports: true/false, 1/0, yes/no, on/off (case insensitive)
    fn parse_debug_enabled() -> bool {
        env::var(DEBUG_ENV)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
            .unwrap_or(false)
    }

    fn default_log_path() -> PathBuf {
        if let Ok(path) = env::var(DEBUG_LOG_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        let mut log_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        log_path.push(".proxyscrape");
        log_path.push("proxyscrape-debug.log");
        log_path
    }

    fn compile_redaction_patterns() -> Vec<Regex> {
        let patterns = [
            r"(?i)(://)[^/\s:@]+:[^/\s@]+@",
            r"(?i)authorization[:=\s]+[^\s&]+",
            r"(?i)api[_-]?key[:=\s]+[^\s&]+",
            r"(?i)token[:=\s]+[^\s&]+",
        ];

        patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    }

    /// Strip proxy credentials and secrets from a message
    pub fn redact(&self, text: &str) -> String {
        let mut redacted = text.to_string();
        for (index, regex) in self.redaction_patterns.iter().enumerate() {
            let replacement = if index == 0 { "${1}[REDACTED]@" } else { "[REDACTED]" };
            redacted = regex.replace_all(&redacted, replacement).to_string();
        }
        redacted
    }

    fn log(
        &self,
        level: &str,
        component: &str,
        event: &str,
        message: &str,
        correlation_id: Option<String>,
        fields: HashMap<String, serde_json::Value>,
    ) {
        let Some(logger) = &self.rotating_logger else {
            return;
        };

        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            level: level.to_string(),
            component: component.to_string(),
            event: event.to_string(),
            message: self.redact(message),
            correlation_id: correlation_id.or_else(|| Some(self.session_id.clone())),
            fields,
        };

        if let Ok(logger) = logger.lock() {
            if let Ok(json_line) = serde_json::to_string(&entry) {
                let _ = logger.write_with_rotation(&json_line);
            }
        }
    }

    // Typed events for the list client

    pub fn fetch_start(&self, url: &str, timeout_ms: u64, correlation_id: String) {
        let mut fields = HashMap::new();
        fields.insert("timeout_ms".to_string(), timeout_ms.into());

        self.log("FETCH", "ProxyScrapeClient", "fetch_start",
                 &format!("GET {}", url),
                 Some(correlation_id), fields);
    }

    pub fn fetch_end(&self, http_status: u16, records: usize, duration_ms: u64, correlation_id: String) {
        let mut fields = HashMap::new();
        fields.insert("http_status".to_string(), http_status.into());
        fields.insert("records".to_string(), records.into());
        fields.insert("duration_ms".to_string(), duration_ms.into());

        self.log("FETCH", "ProxyScrapeClient", "fetch_end",
                 &format!("Fetched {} proxies ({}ms)", records, duration_ms),
                 Some(correlation_id), fields);
    }

    pub fn fetch_failed(&self, reason: &str, correlation_id: String) {
        self.log("ERROR", "ProxyScrapeClient", "fetch_failed",
                 &format!("List fetch failed: {}", reason),
                 Some(correlation_id), HashMap::new());
    }

    pub fn malformed_response(&self, payload: &serde_json::Value, correlation_id: String) {
        let mut preview = payload.to_string();
        if preview.len() > 200 {
            let mut cut = 200;
            while !preview.is_char_boundary(cut) {
                cut -= 1;
            }
            preview.truncate(cut);
        }

        self.log("ERROR", "ProxyScrapeClient", "malformed_response",
                 &format!("Unexpected response payload: {}", preview),
                 Some(correlation_id), HashMap::new());
    }

    // Typed events for liveness checks

    pub fn check_start(&self, proxy: &str, timeout_ms: u64, correlation_id: String) {
        let mut fields = HashMap::new();
        fields.insert("timeout_ms".to_string(), timeout_ms.into());

        self.log("CHECK", "LivenessChecker", "check_start",
                 &format!("Checking {}", proxy),
                 Some(correlation_id), fields);
    }

    pub fn check_result(&self, proxy: &str, live: bool, reason: &str, correlation_id: Option<String>) {
        let mut fields = HashMap::new();
        fields.insert("live".to_string(), live.into());
        fields.insert("reason".to_string(), reason.into());

        self.log("CHECK", "LivenessChecker", "check_result",
                 &format!("{} live={} ({})", proxy, live, reason),
                 correlation_id, fields);
    }

    pub fn new_correlation_id(&self) -> String {
        Uuid::new_v4().to_string()[..8].to_string()
    }

    pub fn is_enabled(&self) -> bool {
        self.rotating_logger.is_some()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.rotating_logger
            .as_ref()
            .and_then(|logger| logger.lock().ok().map(|l| l.log_path.clone()))
    }
}
