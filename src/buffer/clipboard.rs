//! クリップボード
//!
//! システムクリップボード（`arboard`）を優先し、接続できない環境（ヘッドレス等）では
//! アプリケーション内部の単一スロットで代用する。端末からの貼り付け（bracketed paste）は
//! クリップボードを経由せず直接挿入される。

use std::fmt;

#[derive(Default)]
pub struct Clipboard {
    /// 最後にコピーした文字列
    content: Option<String>,
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    /// 内部スロットのみのクリップボード
    pub fn new() -> Self {
        Self::default()
    }

    /// システムクリップボードに接続（失敗時は内部スロットのみ）
    pub fn system() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                log::info!("system clipboard unavailable, using internal clipboard: {}", err);
                None
            }
        };
        Self {
            content: None,
            system,
        }
    }

    /// システムクリップボードに接続しているか
    pub fn is_system(&self) -> bool {
        self.system.is_some()
    }

    /// 文字列を格納（空文字は無視）
    pub fn set(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(system) = &mut self.system {
            if let Err(err) = system.set_text(text.as_str()) {
                log::warn!("failed to write system clipboard: {}", err);
            }
        }
        self.content = Some(text);
    }

    /// 貼り付ける文字列（システム側が空・読めない場合は内部スロット）
    pub fn get(&mut self) -> Option<String> {
        if let Some(system) = &mut self.system {
            match system.get_text() {
                Ok(text) if !text.is_empty() => return Some(text),
                Ok(_) => {}
                Err(err) => log::debug!("failed to read system clipboard: {}", err),
            }
        }
        self.content.clone()
    }
}

impl fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clipboard")
            .field("content", &self.content)
            .field("system", &self.system.is_some())
            .finish()
    }
}
