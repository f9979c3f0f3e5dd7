//! ファイルI/O操作
//!
//! UTF-8テキストファイル全体の読み込みと上書き保存。
//! 一時ファイル経由のリネームやバックアップは行わない。

use crate::error::{FileError, Result};
use std::fs;
use std::path::Path;

/// ファイル操作のトレイト
pub trait FileOperations {
    /// ファイル全体をテキストとして読み込み（内容は一切変換しない）
    fn read_text(&self, path: &Path) -> Result<String>;

    /// テキストでファイル全体を上書き
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;
}

/// 実ファイルシステムに対する実装
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileOperations;

impl FileOperations for DefaultFileOperations {
    fn read_text(&self, path: &Path) -> Result<String> {
        if path.is_dir() {
            return Err(FileError::IsDirectory {
                path: path.display().to_string(),
            }
            .into());
        }

        let bytes = fs::read(path).map_err(|err| FileError::from_io(path, &err))?;

        String::from_utf8(bytes).map_err(|err| {
            FileError::Encoding {
                path: path.display().to_string(),
                offset: err.utf8_error().valid_up_to(),
            }
            .into()
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::IsDirectory {
                path: path.display().to_string(),
            }
            .into());
        }

        fs::write(path, content.as_bytes()).map_err(|err| FileError::from_io(path, &err).into())
    }
}

/// ファイル読み込みの便利関数
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    DefaultFileOperations.read_text(path.as_ref())
}

/// ファイル書き込みの便利関数
pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    DefaultFileOperations.write_text(path.as_ref(), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotepadError;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let content = "Hello, World!\r\nこんにちは！\n";

        write_text(&file_path, content).unwrap();
        assert_eq!(read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn bom_and_line_endings_are_preserved() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("bom.txt");
        let content = "\u{feff}first\r\nsecond\r";
        fs::write(&file_path, content).unwrap();

        assert_eq!(read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn write_overwrites_longer_content() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("shrink.txt");
        fs::write(&file_path, "a much longer original body").unwrap();

        write_text(&file_path, "short").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short");
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("missing.txt");

        match read_text(&file_path) {
            Err(NotepadError::File(FileError::NotFound { path })) => {
                assert!(path.ends_with("missing.txt"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("latin1.txt");
        fs::write(&file_path, [b'o', b'k', 0xff, 0xfe]).unwrap();

        match read_text(&file_path) {
            Err(NotepadError::File(FileError::Encoding { offset, .. })) => assert_eq!(offset, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn directories_are_rejected_both_ways() {
        let temp_dir = tempdir().unwrap();

        assert!(matches!(
            read_text(temp_dir.path()),
            Err(NotepadError::File(FileError::IsDirectory { .. }))
        ));
        assert!(matches!(
            write_text(temp_dir.path(), "text"),
            Err(NotepadError::File(FileError::IsDirectory { .. }))
        ));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("no").join("such").join("dir.txt");

        assert!(write_text(&file_path, "text").is_err());
        assert!(!file_path.exists());
    }
}
