#![allow(dead_code)]

use mind::lang::{FileStream, TextStream};
use mind::mach::{Cell, Config, Event, Runtime};
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Output buffer shared with the runtime.
#[derive(Clone, Default)]
pub struct Output(Rc<RefCell<Vec<u8>>>);

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Output {
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8(bytes).unwrap()
    }
}

pub fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

pub fn boot_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("boot.mind")
}

pub fn boot_with(config: Config) -> (Runtime, Output) {
    let out = Output::default();
    let mut r = Runtime::with_output(config, Box::new(out.clone())).unwrap();
    let boot = FileStream::open(boot_path());
    assert!(boot.is_open());
    assert_eq!(r.evaluate(Box::new(boot)), Event::EndOfInput);
    assert_eq!(out.take(), "");
    assert!(r.stack().is_empty());
    (r, out)
}

pub fn boot() -> (Runtime, Output) {
    boot_with(Config::default())
}

pub fn eval(r: &mut Runtime, text: &str) -> Event {
    r.evaluate(Box::new(TextStream::new(text)))
}

/// Boot, evaluate `text`, return the stack and the output.
pub fn run(text: &str) -> (Vec<Cell>, String) {
    let (mut r, out) = boot();
    eval(&mut r, text);
    (r.stack(), out.take())
}
