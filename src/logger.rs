use std::any::Any;
use std::path::PathBuf;
use std::sync::OnceLock;

pub const ENV_LOG: &str = "TOKEN_DETAIL_LOG";
const DEFAULT_DIRECTIVES: &str = "error,token_detail=debug";

static ACTIVE_LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

pub fn default_log_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map_or_else(fallback_log_dir, |home| home.join("Library/Logs/TokenDetail"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::data_local_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
            .map_or_else(fallback_log_dir, |dir| dir.join("token-detail").join("logs"))
    }
}

fn fallback_log_dir() -> PathBuf {
    std::env::temp_dir().join("token-detail").join("logs")
}

#[must_use]
pub fn active_log_dir() -> PathBuf {
    ACTIVE_LOG_DIR
        .get()
        .cloned()
        .unwrap_or_else(default_log_dir)
}

fn local_offset() -> time::UtcOffset {
    time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC)
}

fn directives(env: Option<String>) -> String {
    env.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

/// Install the file logger. The returned guard flushes pending lines on drop and
/// must be held until exit. stdout belongs to the TUI, so nothing is logged there.
pub fn init() -> anyhow::Result<impl Any> {
    use anyhow::Context;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let primary_log_dir = default_log_dir();
    let log_dir = if std::fs::create_dir_all(&primary_log_dir).is_ok() {
        primary_log_dir
    } else {
        let fallback = fallback_log_dir();
        let _ = std::fs::create_dir_all(&fallback);
        fallback
    };

    let _ = ACTIVE_LOG_DIR.set(log_dir.clone());

    let writer = RollingFileAppender::builder()
        .filename_prefix("token-detail")
        .filename_suffix("log")
        .max_log_files(5)
        .rotation(Rotation::DAILY)
        .build(&log_dir)
        .with_context(|| format!("日志初始化失败（目录: {}）", log_dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(writer);

    let timer = fmt::time::OffsetTime::new(
        local_offset(),
        time::format_description::well_known::Rfc3339,
    );
    let file_line = cfg!(debug_assertions);

    let layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer)
        .with_thread_ids(true)
        .with_file(file_line)
        .with_line_number(file_line)
        .with_writer(writer)
        .with_filter(tracing_subscriber::EnvFilter::new(directives(
            std::env::var(ENV_LOG).ok(),
        )));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("日志订阅器已初始化")?;
    Ok(guard)
}
