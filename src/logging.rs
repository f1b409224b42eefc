//! tracing の初期化
//!
//! ライブラリ自体はイベントを出すだけで、購読者の設定はホスト側の責務です。
//! ここでは典型的な構成をまとめて提供します。
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// フィルタ未指定かつ `RUST_LOG` も無いときのレベル
const DEFAULT_FILTER: &str = "info";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// グローバルな tracing subscriber をインストールする
///
/// # Arguments
/// * `filter` - `EnvFilter` 形式のフィルタ。`None` なら `RUST_LOG`、それも無ければ `info`
/// * `log_file` - 指定するとこのファイルへ非同期に書き出す。`None` なら stderr
///
/// # Returns
/// ファイル出力時は `WorkerGuard`。drop するとバッファがフラッシュされるので、
/// プロセス終了まで保持すること
pub fn init(
    filter: Option<&str>,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, LoggingError> {
    let env_filter = match filter {
        Some(filter) => EnvFilter::try_new(filter).map_err(|source| {
            LoggingError::InvalidFilter { filter: filter.to_string(), source }
        })?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| LoggingError::Install(e.to_string()))?;
        return Ok(None);
    };

    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_else(|| "l10n-resolver.log".as_ref());
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(Some(guard))
}
