//! Operator input for the interactive menu.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::BufRead;
use tokio::sync::mpsc;

/// A source of operator lines
#[async_trait]
pub trait LineSource: Send {
    /// The next line without its terminator, or `None` once input is closed.
    async fn next_line(&mut self) -> Option<String>;
}

/// Lines from the process's stdin.
///
/// Terminal reads block, so they happen on a dedicated thread and reach the
/// runtime through a channel. An interrupt never waits on a pending read.
pub struct StdinLines {
    rx: mpsc::UnboundedReceiver<String>,
}

impl StdinLines {
    pub fn spawn() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let mut stdin = std::io::stdin().lock();
                while let Some(line) = read_line_lossy(&mut stdin) {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self { rx })
    }
}

/// One line without its `\n` or `\r\n`, or `None` at end of input or on a
/// read error. Bytes that are not UTF-8 are replaced, so such a line still
/// reaches the menu as (invalid) input.
fn read_line_lossy<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            Some(String::from_utf8_lossy(&buf).into_owned())
        }
    }
}

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

/// A fixed script of lines, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for ScriptedLines {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}
