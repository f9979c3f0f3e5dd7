//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod confirm_dialog;
pub mod layout;
pub mod menu;
pub mod notification;
pub mod picker_view;
pub mod renderer;
pub mod text_area;
pub mod theme;
pub mod toolbar;

// 公開API
pub use confirm_dialog::{ConfirmDialog, DialogEvent};
pub use layout::{AreaType, LayoutManager};
pub use menu::{MenuEvent, MenuState};
pub use notification::{Notification, NotificationKind};
pub use renderer::{ModalView, RenderView, Renderer};
pub use text_area::{TextAreaContent, TextAreaView, VisualLine};
pub use theme::{ColorScheme, ComponentType, Theme};
