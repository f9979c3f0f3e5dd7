//! アプリケーション全体のワークフローテスト
//!
//! キー入力とファイル選択ダイアログを通して開く・保存・印刷を検証する。

use notepad_dev::config::AppConfig;
use notepad_dev::error::Result;
use notepad_dev::input::keybinding::{Key, KeyCode};
use notepad_dev::picker::PickerMode;
use notepad_dev::print::PrintSink;
use notepad_dev::App;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

fn new_app() -> App {
    let config = AppConfig {
        system_clipboard: false,
        ..AppConfig::default()
    };
    App::new(config).unwrap()
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        if ch == '\n' {
            app.handle_key(Key::plain(KeyCode::Enter));
        } else {
            app.handle_key(Key::plain(KeyCode::Char(ch)));
        }
    }
}

/// ダイアログにパスを入力して確定
fn choose_path(app: &mut App, path: &Path) {
    let picker = app.picker_mut().expect("file picker should be open");
    picker.set_input(path.display().to_string());
    app.handle_key(Key::plain(KeyCode::Enter));
    assert!(app.picker().is_none());
}

#[test]
fn untitled_save_behaves_like_save_as() {
    let dir = TempDir::new().unwrap();
    let via_save = dir.path().join("via-save.txt");
    let via_save_as = dir.path().join("via-save-as.txt");

    let mut saved = new_app();
    type_text(&mut saved, "same text");
    saved.handle_key(Key::ctrl('s'));
    assert_eq!(saved.picker().map(|p| p.mode()), Some(PickerMode::SaveAs));
    choose_path(&mut saved, &via_save);

    let mut saved_as = new_app();
    type_text(&mut saved_as, "same text");
    saved_as.handle_key(Key::ctrl_shift('s'));
    assert_eq!(saved_as.picker().map(|p| p.mode()), Some(PickerMode::SaveAs));
    choose_path(&mut saved_as, &via_save_as);

    assert_eq!(
        fs::read_to_string(&via_save).unwrap(),
        fs::read_to_string(&via_save_as).unwrap()
    );
    assert_eq!(saved.title(), "via-save.txt - Notepad Dev");
    assert_eq!(saved_as.title(), "via-save-as.txt - Notepad Dev");
    assert_eq!(saved.session().path(), Some(via_save.as_path()));
    assert_eq!(saved_as.session().path(), Some(via_save_as.as_path()));
}

#[test]
fn edit_then_save_overwrites_associated_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.txt");

    let mut app = new_app();
    type_text(&mut app, "hello");
    app.handle_key(Key::function(12));
    choose_path(&mut app, &path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    assert_eq!(app.title(), "a.txt - Notepad Dev");

    type_text(&mut app, " world");
    app.handle_key(Key::ctrl('s'));
    assert!(app.picker().is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
    assert_eq!(app.session().path(), Some(path.as_path()));
}

#[test]
fn open_through_picker_replaces_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "# Notes\n- one\n").unwrap();

    let mut app = new_app();
    type_text(&mut app, "scratch");
    app.handle_key(Key::ctrl('o'));
    assert_eq!(app.picker().map(|p| p.mode()), Some(PickerMode::Open));
    choose_path(&mut app, &path);

    assert_eq!(app.content(), "# Notes\n- one\n");
    assert_eq!(app.title(), "notes.md - Notepad Dev");

    // 開いた直後は Undo で前の文書に戻らない
    app.handle_key(Key::ctrl('z'));
    assert_eq!(app.content(), "# Notes\n- one\n");
}

#[test]
fn failed_open_shows_notification_and_keeps_document() {
    let dir = TempDir::new().unwrap();
    let binary = dir.path().join("image.bin");
    fs::write(&binary, [0x89, 0x50, 0x4e, 0x47, 0xff]).unwrap();

    let mut app = new_app();
    type_text(&mut app, "keep me");
    app.handle_key(Key::ctrl('o'));
    choose_path(&mut app, &binary);

    let notification = app.notification().expect("error should be reported");
    assert!(notification.message().contains("image.bin"));
    assert_eq!(app.content(), "keep me");
    assert_eq!(app.title(), "Untitled - Notepad Dev");

    app.handle_key(Key::plain(KeyCode::Esc));
    assert!(app.notification().is_none());
    assert!(app.is_running());
}

#[test]
fn open_picker_stays_open_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.txt");

    let mut app = new_app();
    type_text(&mut app, "keep me");
    app.handle_key(Key::ctrl('o'));
    app.picker_mut()
        .unwrap()
        .set_input(missing.display().to_string());
    app.handle_key(Key::plain(KeyCode::Enter));

    let picker = app.picker().expect("picker should stay open");
    assert!(picker.message().is_some_and(|m| m.contains("absent.txt")));
    assert!(app.notification().is_none());
    assert_eq!(app.content(), "keep me");
}

#[test]
fn save_as_over_existing_file_asks_first() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("important.txt");
    fs::write(&target, "precious data").unwrap();

    let mut app = new_app();
    type_text(&mut app, "x");
    app.handle_key(Key::ctrl_shift('s'));
    app.picker_mut()
        .unwrap()
        .set_input(target.display().to_string());
    app.handle_key(Key::plain(KeyCode::Enter));

    let dialog = app.confirm_dialog().expect("replace prompt should be shown");
    assert_eq!(dialog.subject(), target.display().to_string());
    assert_eq!(fs::read_to_string(&target).unwrap(), "precious data");

    // 取消すると選択ダイアログへ戻り、ファイルは変わらない
    app.handle_key(Key::plain(KeyCode::Char('n')));
    assert!(app.confirm_dialog().is_none());
    assert_eq!(app.picker().map(|p| p.mode()), Some(PickerMode::SaveAs));
    assert_eq!(fs::read_to_string(&target).unwrap(), "precious data");
    assert!(app.session().is_untitled());

    app.handle_key(Key::plain(KeyCode::Esc));
    assert!(app.picker().is_none());
    assert_eq!(fs::read_to_string(&target).unwrap(), "precious data");
}

#[test]
fn confirmed_replace_overwrites_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("old.txt");
    fs::write(&target, "old contents").unwrap();

    let mut app = new_app();
    type_text(&mut app, "new");
    app.handle_key(Key::ctrl('s'));
    app.picker_mut()
        .unwrap()
        .set_input(target.display().to_string());
    app.handle_key(Key::plain(KeyCode::Enter));

    // Enter は取消側なので、確定は明示的に
    assert!(app.confirm_dialog().is_some());
    app.handle_key(Key::plain(KeyCode::Char('y')));

    assert!(app.confirm_dialog().is_none());
    assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    assert_eq!(app.title(), "old.txt - Notepad Dev");
}

#[test]
fn cancelled_save_as_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app();
    type_text(&mut app, "draft");

    app.handle_key(Key::ctrl('s'));
    app.handle_key(Key::plain(KeyCode::Esc));

    assert!(app.picker().is_none());
    assert!(app.session().is_untitled());
    assert_eq!(app.title(), "Untitled - Notepad Dev");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(app.content(), "draft");
}

#[test]
fn failed_save_reports_and_keeps_title() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app();
    type_text(&mut app, "draft");

    app.handle_key(Key::ctrl('s'));
    choose_path(&mut app, &dir.path().join("missing-dir").join("x.txt"));

    assert!(app.notification().is_some());
    assert!(app.session().is_untitled());
    assert_eq!(app.title(), "Untitled - Notepad Dev");
}

#[test]
fn save_as_picker_suggests_current_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.txt");
    fs::write(&path, "body").unwrap();

    let mut app = new_app();
    app.open_argument(&path.display().to_string());
    assert_eq!(app.content(), "body");

    app.handle_key(Key::ctrl_shift('s'));
    let input = app.picker().map(|p| p.input().to_string()).unwrap();
    assert!(input.ends_with("report.txt"), "{}", input);
    assert!(input.starts_with(&dir.path().display().to_string()));
}

#[test]
fn open_argument_failure_is_notified() {
    let dir = TempDir::new().unwrap();
    let mut app = new_app();
    app.open_argument(&dir.path().join("nope.txt").display().to_string());
    assert!(app.notification().is_some());
    assert!(app.session().is_untitled());
}

#[derive(Clone, Default)]
struct FailingPrinter {
    attempts: Rc<RefCell<usize>>,
}

impl PrintSink for FailingPrinter {
    fn describe(&self) -> String {
        "offline-printer".to_string()
    }

    fn print(&mut self, _text: &str) -> Result<()> {
        *self.attempts.borrow_mut() += 1;
        Err(notepad_dev::error::PrintError::Failed {
            command: "offline-printer".to_string(),
            status: "exit status: 1".to_string(),
            detail: String::new(),
        }
        .into())
    }
}

#[test]
fn print_failure_is_reported_once() {
    let printer = FailingPrinter::default();
    let attempts = printer.attempts.clone();
    let mut app = new_app().with_printer(printer);
    type_text(&mut app, "to paper");

    app.handle_key(Key::ctrl('p'));
    app.handle_key(Key::plain(KeyCode::Enter));

    assert_eq!(*attempts.borrow(), 1);
    let notification = app.notification().expect("print error should be shown");
    assert!(notification.message().contains("offline-printer"));
    assert_eq!(app.content(), "to paper");
}
