//! notepad-dev - minimal terminal text editor
//!
//! 単一ドキュメントの編集面と、開く・保存・名前を付けて保存・印刷の操作

// コアモジュール
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;
pub mod session;

// ロジック層
pub mod input;
pub mod picker;
pub mod print;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use config::AppConfig;
pub use error::{NotepadError, Result};
pub use frontend::TuiApplication;
pub use session::{DocumentSession, SaveOutcome, SessionOutcome, TextSurface};
