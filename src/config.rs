//! 実行時設定
//!
//! 設定ファイルは持たず、環境変数のみから構築する。
//! 不正な値は `ConfigError` として報告し、既定値で続行する。

use crate::error::ConfigError;
use crate::file::expand_path;
use std::path::PathBuf;

/// ウィンドウタイトルの末尾に付くアプリケーション名
pub const APP_NAME: &str = "Notepad Dev";
/// パス未設定時のタイトル表示
pub const UNTITLED_LABEL: &str = "Untitled";
/// 既定の印刷コマンド
pub const DEFAULT_PRINT_COMMAND: &str = "lpr";
/// 既定のタブ表示幅
pub const DEFAULT_TAB_WIDTH: usize = 4;

const MAX_TAB_WIDTH: usize = 16;

pub const ENV_DEBUG: &str = "NOTEPAD_DEV_DEBUG";
pub const ENV_LOG_FILE: &str = "NOTEPAD_DEV_LOG";
pub const ENV_PRINT_COMMAND: &str = "NOTEPAD_DEV_PRINT_COMMAND";
pub const ENV_WRAP: &str = "NOTEPAD_DEV_WRAP";
pub const ENV_TAB_WIDTH: &str = "NOTEPAD_DEV_TAB_WIDTH";
pub const ENV_SYSTEM_CLIPBOARD: &str = "NOTEPAD_DEV_SYSTEM_CLIPBOARD";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// デバッグログを有効にするか
    pub debug: bool,
    /// ログファイル
    pub log_file: Option<PathBuf>,
    /// 印刷に使うコマンドライン
    pub print_command: String,
    /// 起動時に折り返し表示を有効にするか
    pub wrap_text: bool,
    /// タブの表示幅
    pub tab_width: usize,
    /// システムクリップボードを使うか（無効なら内部クリップボードのみ）
    pub system_clipboard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_file: None,
            print_command: DEFAULT_PRINT_COMMAND.to_string(),
            wrap_text: false,
            tab_width: DEFAULT_TAB_WIDTH,
            system_clipboard: true,
        }
    }
}

impl AppConfig {
    /// プロセスの環境変数から設定を構築
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の検索関数から設定を構築
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = lookup(ENV_DEBUG) {
            match parse_flag(ENV_DEBUG, &value) {
                Ok(flag) => config.debug = flag,
                Err(err) => errors.push(err),
            }
        }

        if let Some(value) = lookup(ENV_LOG_FILE) {
            if !value.trim().is_empty() {
                match expand_path(&value) {
                    Ok(path) => config.log_file = Some(path),
                    Err(_) => errors.push(invalid(ENV_LOG_FILE, &value)),
                }
            }
        }

        if let Some(value) = lookup(ENV_PRINT_COMMAND) {
            if value.trim().is_empty() {
                errors.push(invalid(ENV_PRINT_COMMAND, &value));
            } else {
                config.print_command = value.trim().to_string();
            }
        }

        if let Some(value) = lookup(ENV_WRAP) {
            match parse_flag(ENV_WRAP, &value) {
                Ok(flag) => config.wrap_text = flag,
                Err(err) => errors.push(err),
            }
        }

        if let Some(value) = lookup(ENV_TAB_WIDTH) {
            match value.trim().parse::<usize>() {
                Ok(width) if (1..=MAX_TAB_WIDTH).contains(&width) => config.tab_width = width,
                _ => errors.push(invalid(ENV_TAB_WIDTH, &value)),
            }
        }

        if let Some(value) = lookup(ENV_SYSTEM_CLIPBOARD) {
            match parse_flag(ENV_SYSTEM_CLIPBOARD, &value) {
                Ok(flag) => config.system_clipboard = flag,
                Err(err) => errors.push(err),
            }
        }

        (config, errors)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
