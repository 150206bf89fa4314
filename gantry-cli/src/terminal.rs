//! Terminal raw mode and the operator keystroke stream.

use std::io;
use std::panic;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::{Stream, StreamExt};

/// Enables raw mode for per-keystroke reads and restores the terminal on
/// drop and on panic. No alternate screen: the child process shares the
/// operator's terminal.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            original_hook(panic_info);
        }));
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Operator keystrokes as a char stream.
///
/// Ctrl+c maps to the force-quit control char; raw mode swallows the signal,
/// so the loop has to handle it as a key.
pub fn key_stream() -> impl Stream<Item = char> + Unpin {
    EventStream::new()
        .filter_map(|event| async move {
            match event {
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char(c),
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                })) => {
                    if modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                        Some('\x03')
                    } else if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                        Some(c)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        })
        .boxed()
}
