//! エラーハンドリングシステム
//!
//! notepad-dev 全体で使用されるエラー型を定義する。
//! どのエラーもプロセスを終了させず、通知ダイアログで利用者に伝える。

use std::io;
use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotepadError {
    /// ファイル操作エラー
    #[error(transparent)]
    File(#[from] FileError),

    /// 端末・描画エラー
    #[error(transparent)]
    Ui(#[from] UiError),

    /// 印刷エラー
    #[error(transparent)]
    Print(#[from] PrintError),

    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// ファイル操作固有のエラー
///
/// いずれも「I/O失敗」という単一の分類に属し、メッセージ文字列だけが利用者に見える。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("No such file or directory: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Is a directory: {path}")]
    IsDirectory { path: String },

    #[error("{path} is not valid UTF-8 text (invalid byte at offset {offset})")]
    Encoding { path: String, offset: usize },

    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス付きのファイルエラーに変換
    pub fn from_io(path: &Path, error: &io::Error) -> Self {
        let path_label = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path: path_label },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path: path_label },
            _ => FileError::Io {
                message: format!("{}: {}", path_label, error),
            },
        }
    }
}

/// 端末操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Terminal operation failed ({context}): {message}")]
    Terminal { context: String, message: String },
}

/// 印刷固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("No print command configured")]
    EmptyCommand,

    #[error("Could not start print command `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("Print command `{command}` failed ({status}){detail}")]
    Failed {
        command: String,
        status: String,
        detail: String,
    },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl From<io::Error> for NotepadError {
    fn from(error: io::Error) -> Self {
        NotepadError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}

/// パニックハンドラの設定
///
/// 端末を通常モードへ戻してから発生位置を表示し、終了コード1で終了する。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        crate::frontend::tui::restore_terminal();

        let (file, line) = panic_info
            .location()
            .map(|location| (location.file(), location.line()))
            .unwrap_or(("<unknown>", 0));

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("panic at {}:{}: {}", file, line, message);
        eprintln!("PANIC at {}:{}: {}", file, line, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, NotepadError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let path = PathBuf::from("/tmp/missing.txt");
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(
            FileError::from_io(&path, &err),
            FileError::NotFound {
                path: "/tmp/missing.txt".to_string()
            }
        );
    }

    #[test]
    fn io_other_keeps_path_in_message() {
        let path = PathBuf::from("/tmp/full.txt");
        let err = io::Error::new(io::ErrorKind::Other, "disk full");
        let message = FileError::from_io(&path, &err).to_string();
        assert!(message.contains("/tmp/full.txt"));
        assert!(message.contains("disk full"));
    }

    #[test]
    fn transparent_display_uses_inner_message() {
        let error = NotepadError::from(FileError::PermissionDenied {
            path: "secret.txt".to_string(),
        });
        assert_eq!(error.to_string(), "Permission denied: secret.txt");
    }

    #[test]
    fn encoding_error_reports_offset() {
        let error = FileError::Encoding {
            path: "bin.dat".to_string(),
            offset: 3,
        };
        assert!(error.to_string().contains("offset 3"));
    }
}
