use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";

// -------- level helpers --------
fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// Returns true if target == prefix or target starts with "prefix::"
fn matches_target_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

/// Console filter: the "default" section sets the fallback level, every other
/// section pins its own target.
fn console_targets(cfg: &LoggingConfig) -> Targets {
    let fallback = cfg
        .get(DEFAULT_SECTION)
        .map(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::OFF);

    subsystems(cfg).fold(Targets::new().with_default(fallback), |t, (name, s)| {
        t.with_target(name.clone(), parse_level(&s.console_level))
    })
}

/// File filter: like the console one, but a section without a file is OFF so
/// its records never leak into the default file.
fn file_targets(cfg: &LoggingConfig) -> Targets {
    let level_of = |s: &Section| {
        if s.file.trim().is_empty() {
            LevelFilter::OFF
        } else {
            parse_level(&s.file_level)
        }
    };
    let fallback = cfg
        .get(DEFAULT_SECTION)
        .map(level_of)
        .unwrap_or(LevelFilter::OFF);

    subsystems(cfg).fold(Targets::new().with_default(fallback), |t, (name, s)| {
        t.with_target(name.clone(), level_of(s))
    })
}

fn subsystems(cfg: &LoggingConfig) -> impl Iterator<Item = (&String, &Section)> {
    cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
}

// -------- rotating writer for files --------
type Rotating = Arc<Mutex<FileRotate<AppendTimestamp>>>;

#[derive(Clone)]
struct RotWriter(Rotating);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .flush()
    }
}

/// A writer that may be absent; writes are then dropped.
struct MaybeWriter(Option<RotWriter>);

impl Write for MaybeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to per-subsystem files by target prefix, falling back to
/// the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: HashMap<String, RotWriter>,
}

impl FileRouter {
    fn from_config(cfg: &LoggingConfig, base_dir: &Path) -> Self {
        let mut router = FileRouter::default();
        for (name, section) in cfg {
            let Some(writer) = open_section_writer(name, section, base_dir) else {
                continue;
            };
            if name == DEFAULT_SECTION {
                router.default = Some(writer);
            } else {
                router.by_prefix.insert(name.clone(), writer);
            }
        }
        router
    }

    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_target_prefix(target, prefix))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeWriter(self.resolve_for(meta.target()))
    }
}

// -------- path resolution helpers --------

/// Resolve a log file path against `base_dir` (home_dir).
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn open_section_writer(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let max_files = section.max_backups.unwrap_or(3);
    let log_path = resolve_log_path(&section.file, base_dir);

    match create_rotating_writer_at_path(&log_path, max_bytes as usize, max_files) {
        Ok(writer) => Some(writer),
        Err(e) => {
            eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.display(),
                e
            );
            None
        }
    }
}

/// Create a size-rotated writer, ensuring the parent directory exists.
fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    max_files: usize,
) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
///
/// Installing twice is a no-op; the first subscriber wins.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let router = FileRouter::from_config(cfg, base_dir);
    let file_layer = (!router.is_empty()).then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(router)
            .with_filter(file_targets(cfg))
    });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt::fmt()
        .with_target(true)
        .with_timer(UtcTime::rfc_3339())
        .try_init();
}

// =================== tests ===================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
            max_backups: Some(2),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(parse_level("trace"), LevelFilter::TRACE);
        assert_eq!(parse_level("DEBUG"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" Info "), LevelFilter::INFO);
        assert_eq!(parse_level("warn"), LevelFilter::WARN);
        assert_eq!(parse_level("ERROR"), LevelFilter::ERROR);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
        assert_eq!(parse_level("none"), LevelFilter::OFF);
        assert_eq!(parse_level("loud"), LevelFilter::INFO);
    }

    #[test]
    fn test_target_prefix_matching() {
        assert!(matches_target_prefix("election", "election"));
        assert!(matches_target_prefix("election::api::rest", "election"));
        assert!(!matches_target_prefix("election_extra", "election"));
        assert!(!matches_target_prefix("db", "election"));
    }

    #[test]
    fn test_console_targets_use_default_as_fallback() {
        let mut cfg = default_logging_config();
        cfg.insert("sqlx".into(), section("warn", "", ""));

        let targets = console_targets(&cfg);
        assert!(targets.would_enable("election::handlers", &tracing::Level::INFO));
        assert!(!targets.would_enable("election::handlers", &tracing::Level::DEBUG));
        assert!(!targets.would_enable("sqlx::query", &tracing::Level::INFO));
        assert!(targets.would_enable("sqlx::query", &tracing::Level::WARN));
    }

    #[test]
    fn test_file_targets_silence_sections_without_file() {
        let mut cfg = default_logging_config();
        cfg.insert("sqlx".into(), section("info", "", "trace"));

        let targets = file_targets(&cfg);
        assert!(targets.would_enable("election", &tracing::Level::DEBUG));
        assert!(!targets.would_enable("sqlx::query", &tracing::Level::ERROR));
    }

    #[test]
    fn test_file_paths_resolved_against_home_dir() {
        let tmp = tempdir().unwrap();
        let base_dir = tmp.path();

        let resolved = resolve_log_path("logs/test.log", base_dir);
        assert!(resolved.starts_with(base_dir));
        assert!(resolved.ends_with("logs/test.log"));

        let absolute = base_dir.join("abs.log");
        assert_eq!(resolve_log_path(&absolute.to_string_lossy(), Path::new("/other")), absolute);
    }

    #[test]
    fn test_router_prefers_subsystem_file() {
        let tmp = tempdir().unwrap();
        let mut cfg = default_logging_config();
        cfg.insert("api_ingress".into(), section("info", "logs/http.log", "debug"));

        let router = FileRouter::from_config(&cfg, tmp.path());
        assert!(!router.is_empty());
        assert!(router.default.is_some());
        assert!(router.by_prefix.contains_key("api_ingress"));

        let http = router.resolve_for("api_ingress::request_id").unwrap();
        let other = router.resolve_for("election").unwrap();
        assert!(!Arc::ptr_eq(&http.0, &other.0));
        assert!(tmp.path().join("logs").is_dir());
    }

    #[test]
    fn test_create_rotating_writer_creates_parent() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("nested/dir/app.log");

        let mut writer = create_rotating_writer_at_path(&p, 128 * 1024, 2).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert!(p.exists(), "log file must be created");
    }
}
