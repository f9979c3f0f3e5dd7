//! TextBuffer の公開APIに対するプロパティテスト

use notepad_dev::buffer::{Movement, TextBuffer};
use notepad_dev::session::DocumentSession;
use proptest::test_runner::Config as ProptestConfig;
use proptest::{prelude::*, prop_oneof};
use std::path::PathBuf;

#[derive(Debug, Clone)]
enum Operation {
    Insert(char),
    InsertStr(String),
    Newline,
    Backspace,
    Delete,
    Move(Movement, bool),
    SelectAll,
    Cut,
    Copy,
    Paste,
    Clear,
}

fn movement_strategy() -> impl Strategy<Value = Movement> {
    prop_oneof![
        Just(Movement::Left),
        Just(Movement::Right),
        Just(Movement::Up),
        Just(Movement::Down),
        Just(Movement::LineStart),
        Just(Movement::LineEnd),
        Just(Movement::BufferStart),
        Just(Movement::BufferEnd),
        (1usize..5).prop_map(Movement::PageUp),
        (1usize..5).prop_map(Movement::PageDown),
    ]
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => any::<char>().prop_map(Operation::Insert),
        1 => "[a-zあ-ん \\n]{0,6}".prop_map(Operation::InsertStr),
        1 => Just(Operation::Newline),
        2 => Just(Operation::Backspace),
        1 => Just(Operation::Delete),
        3 => (movement_strategy(), any::<bool>()).prop_map(|(m, extend)| Operation::Move(m, extend)),
        1 => Just(Operation::SelectAll),
        1 => Just(Operation::Cut),
        1 => Just(Operation::Copy),
        1 => Just(Operation::Paste),
        1 => Just(Operation::Clear),
    ]
}

fn apply(buffer: &mut TextBuffer, operation: &Operation) {
    match operation {
        Operation::Insert(ch) => buffer.insert_char(*ch),
        Operation::InsertStr(text) => buffer.insert_str(text),
        Operation::Newline => buffer.insert_newline(),
        Operation::Backspace => {
            buffer.delete_backward();
        }
        Operation::Delete => {
            buffer.delete_forward();
        }
        Operation::Move(movement, extend) => buffer.move_cursor(*movement, *extend),
        Operation::SelectAll => buffer.select_all(),
        Operation::Cut => {
            buffer.cut();
        }
        Operation::Copy => {
            buffer.copy();
        }
        Operation::Paste => {
            buffer.paste();
        }
        Operation::Clear => {
            buffer.clear();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn cursor_and_selection_stay_on_char_boundaries(
        initial in "[a-z\\n日本]{0,20}",
        operations in proptest::collection::vec(operation_strategy(), 0..40),
    ) {
        let mut buffer = TextBuffer::with_text(initial);
        for operation in &operations {
            apply(&mut buffer, operation);
            prop_assert!(buffer.cursor() <= buffer.text().len());
            prop_assert!(buffer.text().is_char_boundary(buffer.cursor()));
            if let Some(range) = buffer.selection() {
                prop_assert!(range.start < range.end);
                prop_assert!(range.end <= buffer.text().len());
                prop_assert!(buffer.text().is_char_boundary(range.start));
                prop_assert!(buffer.text().is_char_boundary(range.end));
            }
        }
    }

    #[test]
    fn undoing_everything_restores_initial_text(
        initial in "[a-z\\n]{0,20}",
        operations in proptest::collection::vec(operation_strategy(), 0..40),
    ) {
        let mut buffer = TextBuffer::with_text(initial.clone());
        for operation in &operations {
            apply(&mut buffer, operation);
        }
        let edited = buffer.text().to_string();

        while buffer.undo() {}
        prop_assert_eq!(buffer.text(), initial.as_str());

        while buffer.redo() {}
        prop_assert_eq!(buffer.text(), edited.as_str());
    }

    #[test]
    fn select_all_then_cut_empties_and_fills_clipboard(text in "[^\\u{0}]{1,40}") {
        let mut buffer = TextBuffer::with_text(text.clone());
        buffer.select_all();
        prop_assert_eq!(buffer.selected_text(), Some(text.as_str()));
        prop_assert!(buffer.cut());
        prop_assert!(buffer.text().is_empty());
        prop_assert!(buffer.selection().is_none());

        buffer.paste();
        prop_assert_eq!(buffer.text(), text.as_str());
    }

    #[test]
    fn title_is_file_name_plus_suffix(name in "[A-Za-z0-9_-]{1,12}(\\.[a-z]{1,4})?") {
        let mut session = DocumentSession::new();
        let mut buffer = TextBuffer::with_text("x");
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join(&name);
        session.save_as(Some(path), &mut buffer).unwrap();
        prop_assert_eq!(session.title(), format!("{} - Notepad Dev", name));
    }
}
