//! ディレクトリ一覧と補完

use crate::file::FileFilter;
use std::fs;
use std::io;
use std::path::Path;

/// 親ディレクトリを表す項目名
pub const PARENT_ENTRY: &str = "..";

/// 一覧の1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_ENTRY
    }

    /// 表示名（ディレクトリは末尾に `/`）
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// ディレクトリの内容を列挙
///
/// `prefix` で始まる名前だけを残し、ファイルは `filter` で絞り込む
/// （ディレクトリは常に表示）。ドットで始まる名前は `prefix` もドットで
/// 始まる場合だけ表示する。並びはディレクトリ優先の名前順。
pub fn list_directory(
    dir: &Path,
    prefix: &str,
    filter: Option<&FileFilter>,
) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.starts_with('.') && !prefix.starts_with('.') {
            continue;
        }
        if !name.starts_with(prefix) {
            continue;
        }

        let is_dir = entry.path().is_dir();
        if !is_dir && filter.map_or(false, |filter| !filter.matches(&name)) {
            continue;
        }

        entries.push(DirEntry { name, is_dir });
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    if prefix.is_empty() && dir.parent().is_some() {
        entries.insert(
            0,
            DirEntry {
                name: PARENT_ENTRY.to_string(),
                is_dir: true,
            },
        );
    }

    Ok(entries)
}

/// 名前群の共通接頭辞
pub fn common_prefix<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = names.into_iter();
    let first = iter.next()?;
    let mut prefix_len = first.len();

    for name in iter {
        prefix_len = first
            .char_indices()
            .zip(name.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((index, ch), _)| index + ch.len_utf8())
            .unwrap_or(0)
            .min(prefix_len);
    }

    Some(first[..prefix_len].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::default_filters;
    use tempfile::tempdir;

    fn names(entries: &[DirEntry]) -> Vec<String> {
        entries.iter().map(|e| e.display_name()).collect()
    }

    #[test]
    fn directories_first_then_filtered_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("A.txt"), "").unwrap();
        fs::write(dir.path().join("main.py"), "").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "").unwrap();

        let filters = default_filters();
        let entries = list_directory(dir.path(), "", Some(&filters[0])).unwrap();
        assert_eq!(names(&entries), vec!["../", "src/", "A.txt", "b.txt"]);

        let all = list_directory(dir.path(), "", None).unwrap();
        assert_eq!(names(&all), vec!["../", "src/", "A.txt", "b.txt", "main.py"]);
    }

    #[test]
    fn prefix_narrows_and_reveals_hidden() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::write(dir.path().join("novel.md"), "").unwrap();
        fs::write(dir.path().join(".env"), "").unwrap();

        let entries = list_directory(dir.path(), "no", None).unwrap();
        assert_eq!(names(&entries), vec!["notes.md", "novel.md"]);

        let hidden = list_directory(dir.path(), ".", None).unwrap();
        assert_eq!(names(&hidden), vec![".env"]);
    }

    #[test]
    fn missing_directory_is_error() {
        let dir = tempdir().unwrap();
        assert!(list_directory(&dir.path().join("gone"), "", None).is_err());
    }

    #[test]
    fn common_prefix_of_names() {
        assert_eq!(
            common_prefix(["notes.md", "novel.md"]),
            Some("no".to_string())
        );
        assert_eq!(common_prefix(["same"]), Some("same".to_string()));
        assert_eq!(common_prefix(["abc", "xyz"]), Some(String::new()));
        assert_eq!(common_prefix(["日本語", "日本"]), Some("日本".to_string()));
        assert_eq!(common_prefix(Vec::<&str>::new()), None);
    }
}
