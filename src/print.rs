//! 印刷
//!
//! 現在のテキストを加工せずに印刷スプーラ（既定は `lpr`）の標準入力へ渡す。

use crate::error::{PrintError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// 印刷先
pub trait PrintSink {
    /// 確認ダイアログに表示する印刷先の説明
    fn describe(&self) -> String;

    /// テキストをそのまま印刷
    fn print(&mut self, text: &str) -> Result<()>;
}

/// 外部コマンドによる印刷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolerPrinter {
    program: String,
    args: Vec<String>,
}

impl SpoolerPrinter {
    /// 空白区切りのコマンドラインから作成
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(PrintError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command_label(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PrintSink for SpoolerPrinter {
    fn describe(&self) -> String {
        self.command_label()
    }

    fn print(&mut self, text: &str) -> Result<()> {
        let command = self.command_label();
        log::info!("printing {} bytes via `{}`", text.len(), command);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| PrintError::Spawn {
                command: command.clone(),
                message: err.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // 終了済みのコマンドへの書き込み失敗は終了ステータスで判定する
            if let Err(err) = stdin.write_all(text.as_bytes()) {
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(PrintError::Spawn {
                        command,
                        message: err.to_string(),
                    }
                    .into());
                }
            }
        }

        let output = child.wait_with_output().map_err(|err| PrintError::Spawn {
            command: command.clone(),
            message: err.to_string(),
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            String::new()
        } else {
            format!(": {}", stderr)
        };
        log::warn!("print command `{}` exited with {}", command, output.status);
        Err(PrintError::Failed {
            command,
            status: output.status.to_string(),
            detail,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotepadError;

    #[test]
    fn command_line_is_split_on_whitespace() {
        let printer = SpoolerPrinter::from_command_line("lp  -d office").unwrap();
        assert_eq!(printer.program, "lp");
        assert_eq!(printer.args, vec!["-d", "office"]);
        assert_eq!(printer.describe(), "lp -d office");
    }

    #[test]
    fn empty_command_is_rejected() {
        assert_eq!(
            SpoolerPrinter::from_command_line("  "),
            Err(NotepadError::Print(PrintError::EmptyCommand))
        );
    }

    #[cfg(unix)]
    #[test]
    fn text_is_forwarded_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("spool.txt");
        let mut printer =
            SpoolerPrinter::from_command_line(&format!("tee {}", target.display())).unwrap();

        printer.print("line one\n\tline two").unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "line one\n\tline two"
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_reported() {
        let mut printer = SpoolerPrinter::from_command_line("false").unwrap();
        assert!(matches!(
            printer.print("text"),
            Err(NotepadError::Print(PrintError::Failed { .. }))
        ));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let mut printer =
            SpoolerPrinter::from_command_line("notepad-dev-no-such-spooler").unwrap();
        assert!(matches!(
            printer.print("text"),
            Err(NotepadError::Print(PrintError::Spawn { .. }))
        ));
    }
}
