use super::*;
use crate::lang::TextStream;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

mod runtime_test;

/// Shared output buffer the runtime writes into.
#[derive(Clone, Default)]
struct Output(Rc<RefCell<Vec<u8>>>);

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Output {
    fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8(bytes).unwrap()
    }
}

fn boot(config: Config) -> (Runtime, Output) {
    let out = Output::default();
    let r = Runtime::with_output(config, Box::new(out.clone())).unwrap();
    (r, out)
}

fn runtime() -> (Runtime, Output) {
    boot(Config::default())
}

fn eval(r: &mut Runtime, text: &str) -> Event {
    r.evaluate(Box::new(TextStream::new(text)))
}

fn body(r: &Runtime, name: &str) -> Vec<Cell> {
    let xt = r.lookup(name).unwrap().unwrap();
    let mut cells = vec![];
    let mut addr = xt + 2 * CELL;
    loop {
        let cell = r.memory().fetch(addr).unwrap();
        cells.push(cell);
        if cell == r.lookup(";;").unwrap().unwrap() as Cell {
            return cells;
        }
        addr += CELL;
    }
}
