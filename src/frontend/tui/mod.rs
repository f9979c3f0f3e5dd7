//! ターミナルフロントエンド
//!
//! 端末の初期化・後始末と、イベント取得から描画までの単一スレッドのループ。

use crate::app::App;
use crate::error::{NotepadError, Result, UiError};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

/// イベント待ちの間隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct TuiApplication {
    app: App,
    /// 端末に設定済みのタイトル
    applied_title: Option<String>,
}

impl TuiApplication {
    pub fn new(app: App) -> Self {
        Self {
            app,
            applied_title: None,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        log::info!("terminal session ended");
        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size().map_err(|err| terminal_error("terminal size", err))?;
        self.app.resize(size.width, size.height);

        while self.app.is_running() {
            self.sync_title()?;
            terminal
                .draw(|frame| self.app.render(frame))
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(POLL_INTERVAL).map_err(|err| terminal_error("event poll", err))? {
                let event = event::read().map_err(|err| terminal_error("event read", err))?;
                self.app.handle_event(event);
            }
        }

        Ok(())
    }

    /// タイトルが変わったときだけ端末タイトルを更新
    fn sync_title(&mut self) -> Result<()> {
        let title = self.app.title();
        if self.applied_title.as_deref() == Some(title) {
            return Ok(());
        }

        execute!(stdout(), SetTitle(title)).map_err(|err| terminal_error("set title", err))?;
        log::debug!("window title: {}", title);
        self.applied_title = Some(title.to_string());
        Ok(())
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
        .map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, DisableBracketedPaste, DisableMouseCapture, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

/// 端末を通常状態へ戻す（パニック時用、失敗は無視）
pub(crate) fn restore_terminal() {
    let mut out = stdout();
    let _ = execute!(out, DisableBracketedPaste, DisableMouseCapture, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> NotepadError {
    NotepadError::Ui(UiError::Terminal {
        context: context.to_string(),
        message: err.to_string(),
    })
}
