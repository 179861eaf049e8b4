use std::fs::File;
use std::io::{BufReader, Bytes, Read};
use std::path::{Path, PathBuf};

/// ## Input stream
///
/// The outer interpreter never knows what kind of source it is reading.
/// It sees a lookahead byte, a way to move past it, and an end-of-stream
/// test. Everything else is the business of the concrete stream.
///
/// The line counter counts newlines that have entered the lookahead. A
/// form feed starts a new page and puts the line counter back to 0.

pub trait Stream {
    /// Move past the lookahead byte. May block on interactive sources.
    fn advance(&mut self);
    /// The lookahead byte, or `None` at end of stream.
    fn peek(&mut self) -> Option<u8>;
    fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }
    fn line(&self) -> usize;
    fn page(&self) -> usize;
    /// Release the underlying source. A closed stream is at end.
    fn close(&mut self);
    /// Path of the backing file, if any.
    fn path(&self) -> Option<&Path> {
        None
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Position {
    line: usize,
    page: usize,
}

impl Position {
    /// Account for `c` entering the lookahead.
    fn enter(&mut self, c: Option<u8>) {
        match c {
            Some(b'\n') => self.line += 1,
            Some(b'\x0c') => {
                self.line = 0;
                self.page += 1;
            }
            _ => {}
        }
    }
}

/// Text file read one byte at a time.
pub struct FileStream {
    path: PathBuf,
    input: Option<Bytes<BufReader<File>>>,
    current: Option<u8>,
    pos: Position,
}

impl FileStream {
    /// Opening never fails; a file that cannot be read yields a stream
    /// which is immediately at end. Use `is_open` to tell the difference.
    pub fn open<P: AsRef<Path>>(path: P) -> FileStream {
        let path = path.as_ref().to_path_buf();
        let input = match File::open(&path) {
            Ok(file) => Some(BufReader::new(file).bytes()),
            Err(error) => {
                log::warn!("cannot open {}: {}", path.display(), error);
                None
            }
        };
        let open = input.is_some();
        let mut stream = FileStream {
            path,
            input,
            current: None,
            pos: Position::default(),
        };
        if open {
            stream.fetch();
        }
        stream
    }

    pub fn is_open(&self) -> bool {
        self.input.is_some()
    }

    fn fetch(&mut self) {
        self.current = match self.input.as_mut().and_then(|bytes| bytes.next()) {
            Some(Ok(byte)) => Some(byte),
            Some(Err(error)) => {
                log::warn!("read error in {}: {}", self.path.display(), error);
                None
            }
            None => None,
        };
        self.pos.enter(self.current);
    }
}

impl Stream for FileStream {
    fn advance(&mut self) {
        if self.current.is_some() {
            self.fetch();
        }
    }
    fn peek(&mut self) -> Option<u8> {
        self.current
    }
    fn line(&self) -> usize {
        self.pos.line
    }
    fn page(&self) -> usize {
        self.pos.page
    }
    fn close(&mut self) {
        self.input = None;
        self.current = None;
    }
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-memory text, used for command line commands.
pub struct TextStream {
    text: Vec<u8>,
    at: usize,
    pos: Position,
}

impl TextStream {
    pub fn new(text: &str) -> TextStream {
        let text = text.as_bytes().to_vec();
        let mut pos = Position::default();
        pos.enter(text.first().copied());
        TextStream { text, at: 0, pos }
    }
}

impl Stream for TextStream {
    fn advance(&mut self) {
        if self.at < self.text.len() {
            self.at += 1;
            self.pos.enter(self.text.get(self.at).copied());
        }
    }
    fn peek(&mut self) -> Option<u8> {
        self.text.get(self.at).copied()
    }
    fn line(&self) -> usize {
        self.pos.line
    }
    fn page(&self) -> usize {
        self.pos.page
    }
    fn close(&mut self) {
        self.at = self.text.len();
    }
}

/// Supplier of whole lines for a `LineStream`.
pub trait LineSource {
    /// Next line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

impl LineSource for std::vec::IntoIter<String> {
    fn read_line(&mut self) -> Option<String> {
        self.next()
    }
}

/// Line-buffered stream. A new line is only requested when the
/// lookahead is needed and the current one is used up.
pub struct LineStream<S: LineSource> {
    source: S,
    buffer: Vec<u8>,
    at: usize,
    pos: Position,
    eof: bool,
}

impl<S: LineSource> LineStream<S> {
    pub fn new(source: S) -> LineStream<S> {
        LineStream {
            source,
            buffer: vec![],
            at: 0,
            pos: Position::default(),
            eof: false,
        }
    }

    fn fill(&mut self) {
        while self.at >= self.buffer.len() && !self.eof {
            match self.source.read_line() {
                Some(line) => {
                    self.buffer = line.into_bytes();
                    self.buffer.push(b'\n');
                    self.at = 0;
                    self.pos.enter(self.buffer.first().copied());
                }
                None => self.eof = true,
            }
        }
    }
}

impl<S: LineSource> Stream for LineStream<S> {
    fn advance(&mut self) {
        self.fill();
        if self.at < self.buffer.len() {
            self.at += 1;
            self.pos.enter(self.buffer.get(self.at).copied());
        }
    }
    fn peek(&mut self) -> Option<u8> {
        self.fill();
        self.buffer.get(self.at).copied()
    }
    fn line(&self) -> usize {
        self.pos.line
    }
    fn page(&self) -> usize {
        self.pos.page
    }
    fn close(&mut self) {
        self.at = self.buffer.len();
    }
}
