//! パス処理ユーティリティ
//!
//! ファイル選択ダイアログに入力されたパスの展開と、タイトル用のファイル名取得

use crate::error::{FileError, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// 入力文字列を絶対パスに展開（`~`、`$VAR`、`.`、`..` を解決）
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid_path(input, "empty path"));
    }

    let with_home = shellexpand::tilde_with_context(trimmed, || {
        dirs::home_dir().map(|home| home.display().to_string())
    });
    let with_env = shellexpand::env(with_home.as_ref())
        .map_err(|err| invalid_path(input, &err.to_string()))?;

    let absolute = to_absolute(Path::new(with_env.as_ref()))?;
    Ok(normalize_path(&absolute))
}

/// 相対パスをカレントディレクトリ基準の絶対パスに変換
pub fn to_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let current_dir = env::current_dir().map_err(|err| {
        invalid_path(
            &path.display().to_string(),
            &format!("current directory unavailable: {}", err),
        )
    })?;
    Ok(current_dir.join(path))
}

/// `.` と `..` を字句的に解決（ルートより上へは遡らない）
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// タイトル表示用のファイル名
pub fn file_name_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// ディレクトリ表示用の文字列（末尾に区切り文字を付ける）
pub fn directory_label(path: &Path) -> String {
    let mut label = path.display().to_string();
    if !label.ends_with(std::path::MAIN_SEPARATOR) {
        label.push(std::path::MAIN_SEPARATOR);
    }
    label
}

fn invalid_path(path: &str, reason: &str) -> crate::error::NotepadError {
    FileError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_expand_relative_path() {
        let expanded = expand_path("notes/./todo.txt").unwrap();
        assert!(expanded.is_absolute());
        assert!(expanded.ends_with("notes/todo.txt"));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path("~/documents/file.txt").unwrap();
            assert_eq!(expanded, normalize_path(&home.join("documents/file.txt")));
        }
    }

    #[test]
    fn test_expand_env() {
        env::set_var("NOTEPAD_DEV_PATH_TEST_DIR", "/workspace/project");
        let expanded = expand_path("$NOTEPAD_DEV_PATH_TEST_DIR/src/main.rs").unwrap();
        assert_eq!(expanded, PathBuf::from("/workspace/project/src/main.rs"));
    }

    #[test]
    fn test_unknown_variable_is_error() {
        assert!(expand_path("$NOTEPAD_DEV_SURELY_UNSET_VARIABLE/x").is_err());
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(expand_path("   ").is_err());
    }

    #[test]
    fn test_file_name_label() {
        assert_eq!(file_name_label(Path::new("/tmp/a.txt")), "a.txt");
        assert_eq!(file_name_label(Path::new("/")), "/");
    }

    #[test]
    fn test_directory_label() {
        assert_eq!(directory_label(Path::new("/tmp")), "/tmp/");
        assert_eq!(directory_label(Path::new("/")), "/");
    }
}
