//! ファイル名フィルタ
//!
//! ファイル選択ダイアログの一覧表示に使う説明付きの拡張子リスト。
//! 入力されたパスそのものは制限しない。

use regex::Regex;

/// 既定のフィルタ定義（`;;` 区切り、`ラベル (パターン...)` 形式）
pub const DEFAULT_FILTER_SPEC: &str = "Text Document (*.txt);; Python (*.py);; Javascript (*.js);; \
Java (*.java);; HTML (*.html);; CSS (*.css);; Bash script (*.sh);; C (*.c);; C++ (*.cpp);; \
C# (*.cs);; Markdown (*.md)";

/// 単一のフィルタ
#[derive(Debug, Clone)]
pub struct FileFilter {
    label: String,
    patterns: Vec<String>,
    matcher: Regex,
}

impl FileFilter {
    /// ラベルとグロブパターンからフィルタを作成
    pub fn new(label: &str, patterns: &[&str]) -> Option<Self> {
        if patterns.is_empty() {
            return None;
        }

        let alternatives: Vec<String> = patterns.iter().map(|p| glob_to_regex(p)).collect();
        let matcher = Regex::new(&format!("(?i)^(?:{})$", alternatives.join("|"))).ok()?;

        Some(Self {
            label: label.trim().to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            matcher,
        })
    }

    /// `Text Document (*.txt);; Python (*.py)` 形式の定義を解析
    ///
    /// 解析できない項目は警告ログを出して読み飛ばす。
    pub fn parse_list(spec: &str) -> Vec<FileFilter> {
        let entry_pattern = Regex::new(r"^\s*(?P<label>[^()]+?)\s*\((?P<patterns>[^()]*)\)\s*$")
            .expect("filter entry pattern is valid");

        spec.split(";;")
            .filter(|entry| !entry.trim().is_empty())
            .filter_map(|entry| {
                let parsed = entry_pattern.captures(entry).and_then(|caps| {
                    let patterns: Vec<&str> = caps["patterns"].split_whitespace().collect();
                    FileFilter::new(&caps["label"], &patterns)
                });
                if parsed.is_none() {
                    log::warn!("ignoring malformed file filter entry: {:?}", entry);
                }
                parsed
            })
            .collect()
    }

    /// ラベル
    pub fn label(&self) -> &str {
        &self.label
    }

    /// ファイル名がパターンに一致するか
    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    /// 表示用文字列（例: `Python (*.py)`）
    pub fn display(&self) -> String {
        format!("{} ({})", self.label, self.patterns.join(" "))
    }
}

/// 既定のフィルタ一覧
pub fn default_filters() -> Vec<FileFilter> {
    FileFilter::parse_list(DEFAULT_FILTER_SPEC)
}

fn glob_to_regex(pattern: &str) -> String {
    regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".")
}
