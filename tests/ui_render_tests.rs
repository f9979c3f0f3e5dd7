//! TestBackend を使った画面描画の統合テスト

use notepad_dev::input::keybinding::{Key, KeyCode};
use notepad_dev::{App, AppConfig};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap()
}

fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) {
    terminal.draw(|frame| app.render(frame)).unwrap();
}

fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    (0..HEIGHT)
        .map(|y| row(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
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

#[test]
fn initial_screen_shows_chrome() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    draw(&mut terminal, &mut app);

    assert!(row(&terminal, 0).contains("Untitled - Notepad Dev"));
    assert!(row(&terminal, 1).contains("File"));
    assert!(row(&terminal, 1).contains("Edit"));
    assert!(row(&terminal, 2).contains("[Open]"));
    assert!(row(&terminal, 2).contains("[Save As]"));
    assert!(row(&terminal, HEIGHT - 1).contains("Ln 1, Col 1"));
}

#[test]
fn typed_text_appears_in_text_area() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    type_text(&mut app, "first line\nsecond");
    draw(&mut terminal, &mut app);

    assert!(row(&terminal, 3).starts_with("first line"));
    assert!(row(&terminal, 4).starts_with("second"));
    let status = row(&terminal, HEIGHT - 1);
    assert!(status.contains("Ln 2, Col 7"), "{}", status);
    assert!(status.contains("Modified"));
}

#[test]
fn long_line_wraps_only_when_enabled() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    let long = "x".repeat(WIDTH as usize + 10);
    type_text(&mut app, &long);

    if !app.is_wrapping() {
        app.handle_key(Key::alt('z'));
    }
    app.handle_key(Key::ctrl('a'));
    app.handle_key(Key::plain(KeyCode::Left));
    draw(&mut terminal, &mut app);
    assert!(row(&terminal, 4).starts_with("xxxxxxxxxx"));
    assert!(row(&terminal, HEIGHT - 1).contains("Wrap"));

    app.handle_key(Key::alt('z'));
    draw(&mut terminal, &mut app);
    assert!(row(&terminal, 4).trim().is_empty());
    assert!(row(&terminal, HEIGHT - 1).contains("No Wrap"));
}

#[test]
fn menu_dropdown_lists_items_and_shortcuts() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    app.handle_key(Key::function(10));
    draw(&mut terminal, &mut app);

    let text = screen(&terminal);
    assert!(text.contains("Open File"));
    assert!(text.contains("Ctrl+O"));
    assert!(text.contains("Save As File"));
    assert!(text.contains("Ctrl+Shift+S"));
    assert!(text.contains("Quit"));
}

#[test]
fn picker_dialog_is_drawn_over_editor() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    app.handle_key(Key::ctrl('o'));
    draw(&mut terminal, &mut app);

    let text = screen(&terminal);
    assert!(text.contains("Open File"));
    assert!(text.contains("Path: "));
    assert!(text.contains("Filter: "));
    assert!(text.contains("Esc: cancel"));
}

#[test]
fn notification_is_drawn_with_ok_button() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    app.open_argument(&dir.path().join("gone.txt").display().to_string());
    draw(&mut terminal, &mut app);

    let text = screen(&terminal);
    assert!(text.contains("File Error"));
    assert!(text.contains("[ OK ]"));

    app.handle_key(Key::plain(KeyCode::Enter));
    draw(&mut terminal, &mut app);
    assert!(!screen(&terminal).contains("[ OK ]"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    let mut app = App::new(AppConfig::default()).unwrap();
    type_text(&mut app, "some text that is longer than the screen");
    terminal.draw(|frame| app.render(frame)).unwrap();
    app.handle_key(Key::ctrl('o'));
    terminal.draw(|frame| app.render(frame)).unwrap();
}

#[test]
fn replace_prompt_is_drawn_over_picker() {
    let mut terminal = terminal();
    let mut app = App::new(AppConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("keep.txt");
    std::fs::write(&target, "old").unwrap();

    app.handle_key(Key::ctrl_shift('s'));
    app.picker_mut()
        .unwrap()
        .set_input(target.display().to_string());
    app.handle_key(Key::plain(KeyCode::Enter));
    draw(&mut terminal, &mut app);

    let text = screen(&terminal);
    assert!(text.contains("Confirm Save As"));
    assert!(text.contains("File already exists. Replace it?"));
    assert!(text.contains("[ Replace ]"));
    assert!(text.contains("[ Cancel ]"));
}
