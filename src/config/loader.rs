//! 設定ファイルの読み込み関数

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    LocalizerSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".l10n.json";

/// ディレクトリから設定を読み込む
///
/// `.l10n.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub fn load_from_dir(dir: &Path) -> Result<Option<LocalizerSettings>, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Configuration file not found");
            return Ok(None);
        }
        Err(source) => return Err(ConfigError::IoError { path, source }),
    };

    tracing::debug!(path = %path.display(), "Loading configuration");
    let settings = serde_json::from_str::<LocalizerSettings>(&content)
        .map_err(|source| ConfigError::ParseError { path, source })?;

    Ok(Some(settings))
}

/// 設定を読み込み、バリデーションする
///
/// 設定ファイルがない場合はデフォルト値を使う
pub fn load_settings(dir: &Path) -> Result<LocalizerSettings, ConfigError> {
    let settings = load_from_dir(dir)?.unwrap_or_default();

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}
