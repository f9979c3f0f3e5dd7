//! メインアプリケーション構造体
//!
//! ドキュメントセッション・テキストバッファ・モーダル状態を保持し、
//! キー・マウス・貼り付けイベントをアクションと編集操作へ振り分ける。

use crate::buffer::{Clipboard, Movement, TextBuffer};
use crate::config::AppConfig;
use crate::error::{NotepadError, Result};
use crate::file::expand_path;
use crate::input::actions::{Action, Menu};
use crate::input::keybinding::{EditCommand, Key, KeyCode, KeyMap, KeyProcessResult};
use crate::picker::{FilePicker, PickerEvent, PickerMode};
use crate::print::{PrintSink, SpoolerPrinter};
use crate::session::{DocumentSession, SaveOutcome, SessionOutcome};
use crate::ui::{
    confirm_dialog::{ConfirmDialog, DialogEvent},
    layout::{contains, AreaType},
    menu::{menu_at, MenuEvent, MenuState},
    notification::Notification,
    picker_view::entry_at,
    renderer::{ModalView, RenderView, Renderer},
    text_area::{cursor_location, layout_lines, offset_at_point, TextAreaContent, TextAreaView, VisualLine},
    toolbar::button_at,
};
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::env;
use std::path::{Path, PathBuf};

/// 名前を付けて保存の初期ファイル名（無題の場合）
const DEFAULT_SAVE_NAME: &str = "untitled.txt";
/// マウスホイール1回分のスクロール行数
const WHEEL_ROWS: isize = 3;

/// 前面のモーダル（同時に1つまで）
#[derive(Debug, Clone)]
enum Modal {
    None,
    Menu(MenuState),
    Picker(FilePicker),
    Confirm(ConfirmDialog, PendingAction),
}

/// 確認ダイアログで確定したときに実行する操作
#[derive(Debug, Clone)]
enum PendingAction {
    Print,
    /// 既存ファイルへの名前を付けて保存（取消時は選択ダイアログへ戻る）
    Overwrite { path: PathBuf, picker: FilePicker },
}

/// アプリケーション
pub struct App {
    running: bool,
    config: AppConfig,
    session: DocumentSession,
    buffer: TextBuffer,
    keymap: KeyMap,
    modal: Modal,
    /// 通知（表示中は他のモーダルより優先）
    notification: Option<Notification>,
    printer: Box<dyn PrintSink>,
    wrap: bool,
    title: String,
    status: String,
    renderer: Renderer,
    view: TextAreaView,
    lines: Vec<VisualLine>,
    /// 次の描画でカーソル位置までスクロールするか
    follow_cursor: bool,
    screen: Rect,
}

impl App {
    /// 新しいアプリケーションを作成
    pub fn new(config: AppConfig) -> Result<Self> {
        let printer = SpoolerPrinter::from_command_line(&config.print_command)?;
        let session = DocumentSession::new();
        let title = session.title();
        let mut buffer = TextBuffer::new();
        if config.system_clipboard {
            let clipboard = Clipboard::system();
            log::debug!("system clipboard connected: {}", clipboard.is_system());
            buffer.set_clipboard(clipboard);
        }

        log::debug!("starting with {:?}", config);
        Ok(Self {
            running: true,
            wrap: config.wrap_text,
            config,
            session,
            buffer,
            keymap: KeyMap::new(),
            modal: Modal::None,
            notification: None,
            printer: Box::new(printer),
            title,
            status: String::new(),
            renderer: Renderer::new(),
            view: TextAreaView::default(),
            lines: Vec::new(),
            follow_cursor: true,
            screen: Rect::new(0, 0, 80, 24),
        })
    }

    /// 印刷先を差し替える
    pub fn with_printer<P: PrintSink + 'static>(mut self, printer: P) -> Self {
        self.printer = Box::new(printer);
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn shutdown(&mut self) {
        self.running = false;
    }

    /// ウィンドウタイトル
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 編集中の全文
    pub fn content(&self) -> &str {
        self.buffer.text()
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_wrapping(&self) -> bool {
        self.wrap
    }

    pub fn status_message(&self) -> &str {
        &self.status
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn menu(&self) -> Option<&MenuState> {
        match &self.modal {
            Modal::Menu(state) => Some(state),
            _ => None,
        }
    }

    pub fn picker(&self) -> Option<&FilePicker> {
        match &self.modal {
            Modal::Picker(picker) => Some(picker),
            _ => None,
        }
    }

    pub fn picker_mut(&mut self) -> Option<&mut FilePicker> {
        match &mut self.modal {
            Modal::Picker(picker) => Some(picker),
            _ => None,
        }
    }

    /// 表示中の確認ダイアログ（印刷・上書き）
    pub fn confirm_dialog(&self) -> Option<&ConfirmDialog> {
        match &self.modal {
            Modal::Confirm(dialog, _) => Some(dialog),
            _ => None,
        }
    }

    /// 画面サイズを更新
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        self.follow_cursor = true;
    }

    /// 起動引数のパスを開く（失敗は通知）
    pub fn open_argument(&mut self, argument: &str) {
        match expand_path(argument) {
            Ok(path) => self.open_path(Some(path)),
            Err(err) => self.notify_error(err),
        }
    }

    /// 端末イベントを処理
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(width, height) => self.resize(width, height),
            Event::FocusGained | Event::FocusLost => {}
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        self.handle_key(Key::from(key_event));
    }

    /// キー入力を処理
    pub fn handle_key(&mut self, key: Key) {
        self.follow_cursor = true;

        if self.notification.is_some() {
            if Notification::is_dismiss_key(&key) {
                self.notification = None;
            }
            return;
        }

        match std::mem::replace(&mut self.modal, Modal::None) {
            Modal::Menu(mut state) => match state.handle_key(&key) {
                MenuEvent::Pending => self.modal = Modal::Menu(state),
                MenuEvent::Close => {}
                MenuEvent::Run(action) => self.run_action(action),
            },
            Modal::Picker(mut picker) => match picker.handle_key(&key) {
                PickerEvent::Pending => self.modal = Modal::Picker(picker),
                PickerEvent::Resolved(selected) => self.finish_picker(picker, selected),
            },
            Modal::Confirm(dialog, pending) => match dialog.handle_key(&key) {
                DialogEvent::Pending => self.modal = Modal::Confirm(dialog, pending),
                event => self.finish_confirm(pending, event == DialogEvent::Confirmed),
            },
            Modal::None => self.handle_editor_key(key),
        }
    }

    fn handle_editor_key(&mut self, key: Key) {
        if key.code == KeyCode::F(10) && !key.modifiers.ctrl && !key.modifiers.alt {
            self.open_menu(Menu::File);
            return;
        }

        match self.keymap.resolve(&key) {
            KeyProcessResult::Action(action) => self.run_action(action),
            KeyProcessResult::Edit(command) => self.apply_edit(command),
            KeyProcessResult::NoMatch => log::trace!("unbound key {}", key),
        }
    }

    fn apply_edit(&mut self, command: EditCommand) {
        match command {
            EditCommand::Insert(ch) => self.buffer.insert_char(ch),
            EditCommand::Newline => self.buffer.insert_newline(),
            EditCommand::DeleteBackward => {
                self.buffer.delete_backward();
            }
            EditCommand::DeleteForward => {
                self.buffer.delete_forward();
            }
            EditCommand::Move(movement, extend) => {
                let movement = match movement {
                    Movement::PageUp(_) => Movement::PageUp(self.page_rows()),
                    Movement::PageDown(_) => Movement::PageDown(self.page_rows()),
                    other => other,
                };
                self.buffer.move_cursor(movement, extend);
            }
        }
    }

    fn page_rows(&self) -> usize {
        let area = self.renderer.layout().text_area(self.screen);
        (area.height as usize).saturating_sub(1).max(1)
    }

    fn open_menu(&mut self, menu: Menu) {
        let state = MenuState::new(menu);
        self.modal = Modal::Menu(state);
    }

    /// アクションを実行
    pub fn run_action(&mut self, action: Action) {
        log::debug!("action {:?}", action);
        self.follow_cursor = true;

        match action {
            Action::OpenFile => self.start_picker(PickerMode::Open),
            Action::SaveFile => self.save(),
            Action::SaveFileAs => self.start_picker(PickerMode::SaveAs),
            Action::PrintFile => {
                let dialog = ConfirmDialog::print(self.printer.describe(), self.buffer.text().chars().count());
                self.modal = Modal::Confirm(dialog, PendingAction::Print);
            }
            Action::Quit => {
                log::info!("quit requested");
                self.running = false;
            }
            Action::Undo => {
                if !self.buffer.undo() {
                    self.status = "Nothing to undo".to_string();
                }
            }
            Action::Redo => {
                if !self.buffer.redo() {
                    self.status = "Nothing to redo".to_string();
                }
            }
            Action::Clear => {
                self.buffer.clear();
            }
            Action::Cut => {
                self.buffer.cut();
            }
            Action::Copy => {
                self.buffer.copy();
            }
            Action::Paste => {
                self.buffer.paste();
            }
            Action::SelectAll => self.buffer.select_all(),
            Action::ToggleWrap => {
                self.wrap = !self.wrap;
                self.view.scroll_col = 0;
                self.status = if self.wrap { "Wrap on" } else { "Wrap off" }.to_string();
            }
        }
    }

    /// 上書き保存（無題なら名前を付けて保存の選択へ）
    pub fn save(&mut self) {
        match self.session.save(&mut self.buffer) {
            Ok(SaveOutcome::Written(path)) => self.status = format!("Saved {}", path.display()),
            Ok(SaveOutcome::NeedsDestination) => self.start_picker(PickerMode::SaveAs),
            Err(err) => self.notify_error(err),
        }
    }

    /// ファイル選択を開始
    fn start_picker(&mut self, mode: PickerMode) {
        let start_dir = self
            .session
            .path()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let suggested = match mode {
            PickerMode::Open => None,
            PickerMode::SaveAs => Some(
                self.session
                    .path()
                    .and_then(Path::file_name)
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| DEFAULT_SAVE_NAME.to_string()),
            ),
        };

        self.modal = Modal::Picker(FilePicker::new(mode, &start_dir, suggested.as_deref()));
    }

    /// 選択結果を処理（既存ファイルへの名前を付けて保存は確認を挟む）
    fn finish_picker(&mut self, picker: FilePicker, selected: Option<PathBuf>) {
        match (picker.mode(), selected) {
            (PickerMode::SaveAs, Some(path)) if path.is_file() => {
                log::debug!("asking before replacing {}", path.display());
                let dialog = ConfirmDialog::overwrite(&path);
                self.modal = Modal::Confirm(dialog, PendingAction::Overwrite { path, picker });
            }
            (PickerMode::Open, selected) => self.open_path(selected),
            (PickerMode::SaveAs, selected) => self.save_as_path(selected),
        }
    }

    fn finish_confirm(&mut self, pending: PendingAction, confirmed: bool) {
        match (pending, confirmed) {
            (PendingAction::Print, true) => self.print_current(),
            (PendingAction::Print, false) => self.status = "Print cancelled".to_string(),
            (PendingAction::Overwrite { path, .. }, true) => self.save_as_path(Some(path)),
            (PendingAction::Overwrite { picker, .. }, false) => {
                self.status = "Choose another file name".to_string();
                self.modal = Modal::Picker(picker);
            }
        }
    }

    /// 選択結果でファイルを開く
    pub fn open_path(&mut self, selected: Option<PathBuf>) {
        match self.session.open(selected, &mut self.buffer) {
            Ok(SessionOutcome::Completed(path)) => {
                self.refresh_title();
                self.view = TextAreaView::default();
                self.status = format!("Opened {}", path.display());
            }
            Ok(SessionOutcome::Cancelled) => self.status = "Open cancelled".to_string(),
            Err(err) => self.notify_error(err),
        }
    }

    /// 選択結果で名前を付けて保存
    pub fn save_as_path(&mut self, selected: Option<PathBuf>) {
        match self.session.save_as(selected, &mut self.buffer) {
            Ok(SessionOutcome::Completed(path)) => {
                self.refresh_title();
                self.status = format!("Saved {}", path.display());
            }
            Ok(SessionOutcome::Cancelled) => self.status = "Save cancelled".to_string(),
            Err(err) => self.notify_error(err),
        }
    }

    fn print_current(&mut self) {
        match self.printer.print(self.buffer.text()) {
            Ok(()) => self.status = format!("Sent to {}", self.printer.describe()),
            Err(err) => self.notify_error(err),
        }
    }

    fn refresh_title(&mut self) {
        self.title = self.session.title();
    }

    /// エラーを通知ダイアログで表示
    pub fn notify_error(&mut self, error: NotepadError) {
        log::error!("{}", error);
        self.notification = Some(Notification::from_error(&error));
    }

    fn handle_paste(&mut self, text: &str) {
        if self.notification.is_some() {
            return;
        }
        match &mut self.modal {
            Modal::None => {
                self.buffer.insert_str(text);
                self.follow_cursor = true;
            }
            Modal::Picker(picker) => {
                let single_line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                let input = format!("{}{}", picker.input(), single_line);
                picker.set_input(input);
            }
            Modal::Menu(_) | Modal::Confirm(..) => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);

        if self.notification.is_some() {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                self.notification = None;
            }
            return;
        }

        self.refresh_layout();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            MouseEventKind::Drag(MouseButton::Left) => {
                if matches!(self.modal, Modal::None) {
                    if let Some(offset) = self.text_offset_at(x, y) {
                        self.buffer.set_cursor(offset, true);
                        self.follow_cursor = true;
                    }
                }
            }
            MouseEventKind::ScrollUp if matches!(self.modal, Modal::None) => {
                self.view.scroll_by(-WHEEL_ROWS, self.lines.len());
                self.follow_cursor = false;
            }
            MouseEventKind::ScrollDown if matches!(self.modal, Modal::None) => {
                self.view.scroll_by(WHEEL_ROWS, self.lines.len());
                self.follow_cursor = false;
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let areas = self.renderer.layout().calculate_areas(self.screen);
        let menu_bar = areas.get(&AreaType::MenuBar).copied();

        match std::mem::replace(&mut self.modal, Modal::None) {
            Modal::Menu(mut state) => {
                let Some(bar) = menu_bar else {
                    return;
                };
                if let Some(menu) = menu_at(bar, x, y) {
                    if menu != state.menu() {
                        state.switch_to(menu);
                        self.modal = Modal::Menu(state);
                    }
                } else if let Some(index) = state.item_at(bar, self.screen, x, y) {
                    if let Some(item) = state.items().get(index) {
                        self.run_action(item.action);
                    }
                }
            }
            Modal::Picker(mut picker) => {
                if let Some(index) = entry_at(&picker, self.screen, x, y) {
                    if picker.selected() == Some(index) {
                        match picker.confirm() {
                            PickerEvent::Pending => self.modal = Modal::Picker(picker),
                            PickerEvent::Resolved(selected) => self.finish_picker(picker, selected),
                        }
                        return;
                    }
                    picker.select(index);
                }
                self.modal = Modal::Picker(picker);
            }
            Modal::Confirm(dialog, pending) => match dialog.handle_click(self.screen, x, y) {
                DialogEvent::Pending => self.modal = Modal::Confirm(dialog, pending),
                event => self.finish_confirm(pending, event == DialogEvent::Confirmed),
            },
            Modal::None => {
                if let Some(menu) = menu_bar.and_then(|bar| menu_at(bar, x, y)) {
                    self.open_menu(menu);
                } else if let Some(action) = areas
                    .get(&AreaType::Toolbar)
                    .and_then(|bar| button_at(*bar, x, y))
                {
                    self.run_action(action);
                } else if let Some(offset) = self.text_offset_at(x, y) {
                    self.buffer.set_cursor(offset, false);
                    self.follow_cursor = true;
                }
            }
        }
    }

    /// 画面座標に対応するテキスト位置
    fn text_offset_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.renderer.layout().text_area(self.screen);
        if !contains(area, x, y) {
            return None;
        }
        let row = self.view.scroll_row + (y - area.y) as usize;
        let column = self.view.scroll_col + (x - area.x) as usize;
        Some(offset_at_point(
            &self.lines,
            self.buffer.text(),
            row,
            column,
            self.config.tab_width,
        ))
    }

    /// 表示行を再計算
    fn refresh_layout(&mut self) {
        let area = self.renderer.layout().text_area(self.screen);
        self.lines = layout_lines(
            self.buffer.text(),
            area.width as usize,
            self.wrap,
            self.config.tab_width,
        );
        let max_row = self.lines.len().saturating_sub(1);
        self.view.scroll_row = self.view.scroll_row.min(max_row);
    }

    /// 描画前の準備（表示行の計算とスクロール追従）
    pub fn prepare_frame(&mut self) {
        self.refresh_layout();
        if self.follow_cursor {
            let area = self.renderer.layout().text_area(self.screen);
            let (row, column) = cursor_location(
                &self.lines,
                self.buffer.text(),
                self.buffer.cursor(),
                self.config.tab_width,
            );
            self.view.ensure_visible(row, column, area, self.wrap);
            self.follow_cursor = false;
        }
    }

    /// 描画内容
    pub fn render_view(&self) -> RenderView<'_> {
        let modal = match &self.modal {
            Modal::None => ModalView::None,
            Modal::Menu(state) => ModalView::Menu(state),
            Modal::Picker(picker) => ModalView::Picker(picker),
            Modal::Confirm(dialog, _) => ModalView::Confirm(dialog),
        };

        // メニュー表示中は選択項目の説明を出す
        let status = match &self.modal {
            Modal::Menu(state) => state
                .items()
                .get(state.selected())
                .map_or(self.status.as_str(), |item| item.status_tip),
            _ => self.status.as_str(),
        };

        RenderView {
            title: &self.title,
            text: TextAreaContent {
                text: self.buffer.text(),
                lines: &self.lines,
                selection: self.buffer.selection(),
                cursor: self.buffer.cursor(),
                view: self.view,
                tab_width: self.config.tab_width,
            },
            cursor: self.buffer.cursor_position(),
            wrap: self.wrap,
            modified: self.buffer.is_modified(),
            status,
            modal,
            notification: self.notification.as_ref(),
        }
    }

    /// 1フレームを描画
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        if area != self.screen {
            self.resize(area.width, area.height);
        }
        self.prepare_frame();
        let view = self.render_view();
        self.renderer.render(frame, &view);
    }
}
