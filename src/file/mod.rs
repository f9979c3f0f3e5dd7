//! ファイル操作モジュール
//!
//! - ファイル全体をメモリ上で読み書き（ストリーミングなし）
//! - 保存は上書きのみ（バックアップ・アトミック置換なし）
//! - 権限不足・文字コード不正はエラーとして通知（エディタは継続）

pub mod filter;
pub mod io;
pub mod path;

pub use filter::{default_filters, FileFilter};
pub use io::{read_text, write_text, DefaultFileOperations, FileOperations};
pub use path::{directory_label, expand_path, file_name_label, normalize_path};
