/*!
## Rust Terminal Module

This Rust module is the interactive console: a line editor with history
feeding a line-buffered input stream, and Ctrl-C delivered to the machine
as an interrupt.

*/

use crate::lang::{LineSource, LineStream};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Console {
    interface: Interface<DefaultTerminal>,
}

impl Console {
    pub fn new() -> std::io::Result<Console> {
        let interface = Interface::new("mind")?;
        interface.set_prompt("> ")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(Console { interface })
    }

    /// Input stream reading from the console until Ctrl-D.
    pub fn stream(self) -> LineStream<Console> {
        LineStream::new(self)
    }
}

impl LineSource for Console {
    fn read_line(&mut self) -> Option<String> {
        match self.interface.read_line() {
            Ok(ReadResult::Input(line)) => {
                if !line.trim().is_empty() {
                    self.interface.add_history_unique(line.clone());
                }
                Some(line)
            }
            // Ctrl-C at the prompt throws the line away
            Ok(ReadResult::Signal(_)) => {
                let _ = self.interface.set_buffer("");
                Some(String::new())
            }
            Ok(ReadResult::Eof) => None,
            Err(error) => {
                log::warn!("console: {}", error);
                None
            }
        }
    }
}

/// Flag raised by Ctrl-C while a program is running.
pub fn interrupt_flag() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })?;
    Ok(interrupted)
}
