//! ドキュメントセッション
//!
//! 編集中のテキストがどのファイルに関連付いているか（または無題か）を保持し、
//! 開く・保存・名前を付けて保存の読み書き先を決める。
//! 失敗した操作はセッション状態を一切変更しない。

use crate::config::{APP_NAME, UNTITLED_LABEL};
use crate::error::Result;
use crate::file::{file_name_label, DefaultFileOperations, FileOperations};
use std::path::{Path, PathBuf};

/// セッションが読み書きするテキスト編集面
pub trait TextSurface {
    /// 現在の全文
    fn content(&self) -> String;

    /// 全文を置き換える
    fn replace_content(&mut self, content: String);

    /// 保存が完了したことを通知
    fn mark_saved(&mut self) {}
}

/// 開く・名前を付けて保存の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 利用者がファイル選択を取り消した
    Cancelled,
    /// 操作が完了し、パスが関連付けられた
    Completed(PathBuf),
}

/// 上書き保存の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 関連付け済みのパスへ書き込んだ
    Written(PathBuf),
    /// 無題のため保存先の選択（名前を付けて保存）が必要
    NeedsDestination,
}

/// ドキュメントセッション
#[derive(Debug, Clone, Default)]
pub struct DocumentSession<F: FileOperations = DefaultFileOperations> {
    path: Option<PathBuf>,
    files: F,
}

impl DocumentSession {
    /// 無題のセッションを作成
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: FileOperations> DocumentSession<F> {
    /// 任意のファイル操作実装でセッションを作成
    pub fn with_file_operations(files: F) -> Self {
        Self { path: None, files }
    }

    /// 関連付けられたパス
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }

    /// ウィンドウタイトル（`a.txt - Notepad Dev` / `Untitled - Notepad Dev`）
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_deref()
            .map(file_name_label)
            .unwrap_or_else(|| UNTITLED_LABEL.to_string());
        format!("{} - {}", name, APP_NAME)
    }

    /// ファイルを開く
    ///
    /// 読み込みに失敗した場合、パスも編集面の内容も変更しない。
    pub fn open<S: TextSurface>(
        &mut self,
        selected: Option<PathBuf>,
        surface: &mut S,
    ) -> Result<SessionOutcome> {
        let Some(path) = selected else {
            log::debug!("open cancelled");
            return Ok(SessionOutcome::Cancelled);
        };

        let text = self.files.read_text(&path).map_err(|err| {
            log::warn!("open {} failed: {}", path.display(), err);
            err
        })?;

        log::info!("opened {} ({} bytes)", path.display(), text.len());
        surface.replace_content(text);
        self.path = Some(path.clone());
        Ok(SessionOutcome::Completed(path))
    }

    /// 上書き保存
    ///
    /// 無題の場合は何も書き込まず `NeedsDestination` を返す。呼び出し側は
    /// 名前を付けて保存と同じ手順で保存先を選ばせ、`save_as` に渡す。
    pub fn save<S: TextSurface>(&mut self, surface: &mut S) -> Result<SaveOutcome> {
        let Some(path) = self.path.clone() else {
            log::debug!("save on untitled document delegates to save-as");
            return Ok(SaveOutcome::NeedsDestination);
        };

        self.write(&path, surface)?;
        Ok(SaveOutcome::Written(path))
    }

    /// 名前を付けて保存
    ///
    /// 取り消された場合は何も書き込まない。失敗した場合はパスを変更しない。
    pub fn save_as<S: TextSurface>(
        &mut self,
        selected: Option<PathBuf>,
        surface: &mut S,
    ) -> Result<SessionOutcome> {
        let Some(path) = selected else {
            log::debug!("save-as cancelled");
            return Ok(SessionOutcome::Cancelled);
        };

        self.write(&path, surface)?;
        self.path = Some(path.clone());
        Ok(SessionOutcome::Completed(path))
    }

    fn write<S: TextSurface>(&self, path: &Path, surface: &mut S) -> Result<()> {
        let content = surface.content();
        match self.files.write_text(path, &content) {
            Ok(()) => {
                log::info!("saved {} ({} bytes)", path.display(), content.len());
                surface.mark_saved();
                Ok(())
            }
            Err(err) => {
                log::warn!("save {} failed: {}", path.display(), err);
                Err(err)
            }
        }
    }
}
