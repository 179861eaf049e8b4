use super::dictionary::{to_body, HEADER};
use super::heads::HEADS;
use super::kernel::{assemble, KERNEL};
use super::memory::{address, aligned};
use super::stack::GUARD_CELLS;
use super::{Address, Cell, Config, Dictionary, Memory, Opcode, Stack, CELL, FALSE, IMMEDIATE};
use crate::error;
use crate::lang::{next_token, Error, Stream, TextStream, MAX_TOKEN_LEN};
use ansi_term::Style;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// System variable: nonzero while compiling.
pub const STATE: Address = 3 * CELL;
/// System variable: parameter stack base.
pub const S0: Address = 4 * CELL;
/// System variable: return stack base.
pub const R0: Address = 5 * CELL;
/// System variable: number of guest arguments.
pub const ARGC: Address = 6 * CELL;
/// System variable: address of the guest argument vector.
pub const ARGV: Address = 7 * CELL;

const SYSTEM_END: Address = 8 * CELL;

/// Why the runtime handed control back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// `bye`, or an abort with the default abort hook.
    Bye,
    /// The outermost input stream ran dry.
    EndOfInput,
}

/// Threads the runtime jumps to on its own, laid down in the arena at boot.
#[derive(Debug, Clone, Copy)]
pub(super) struct Threads {
    /// `interpret branch <quit>`
    pub quit: Address,
    /// `abort? quit`
    pub abort: Address,
    /// `;;`, where words called by the outer interpreter return to.
    pub end: Address,
}

/// Deferred entries guest code may rebind.
#[derive(Debug, Clone, Copy)]
pub(super) struct Hooks {
    /// `word?`, called with the unknown token at `here`.
    pub word: Address,
    /// `abort?`, called after the stacks have been reset.
    pub abort: Address,
}

/// ## Virtual machine
///
/// Owns the memory arena and everything that lives in it. The inner
/// interpreter is `step`, one threaded call per invocation; the outer
/// interpreter is the `interpret` primitive looping in the quit thread.
///
/// Errors raised while running never leave `run`. They are reported on
/// the output with the current line number and followed by an abort.

pub struct Runtime {
    pub(super) mem: Memory,
    pub(super) dict: Dictionary,
    pub(super) s: Stack,
    pub(super) r: Stack,
    pub(super) ip: Address,
    pub(super) input: Box<dyn Stream>,
    pub(super) scopes: Vec<Box<dyn Stream>>,
    pub(super) out: Box<dyn Write>,
    pub(super) threads: Threads,
    pub(super) hooks: Hooks,
    config: Config,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Runtime {
    /// Boot a machine writing to standard output.
    pub fn new(config: Config) -> Result<Runtime> {
        Runtime::with_output(config, Box::new(std::io::stdout()))
    }

    pub fn with_output(config: Config, out: Box<dyn Write>) -> Result<Runtime> {
        // system | guard | rstack | guard | dictionary | guard | stack | guard
        let guard = GUARD_CELLS * CELL;
        let size = aligned(config.memory);
        let r0 = SYSTEM_END + guard + config.return_stack_cells * CELL;
        let start = r0 + guard;
        let limit = size
            .checked_sub(2 * guard + config.stack_cells * CELL)
            .ok_or_else(|| error!(DictionaryFull; "memory too small"))?;
        if start + HEADER > limit {
            return Err(error!(DictionaryFull; "memory too small"));
        }
        let s0 = size - guard;

        let mut mem = Memory::new(size);
        mem.store(S0, s0 as Cell)?;
        mem.store(R0, r0 as Cell)?;
        let dict = Dictionary::new(&mut mem, start, limit)?;

        for (name, op, flags) in HEADS {
            let xt = dict.create(&mut mem, name.as_bytes(), op.to_cell())?;
            if *flags != 0 {
                dict.patch_flags(&mut mem, xt, *flags)?;
            }
        }
        log::debug!("{} primitives", HEADS.len());
        for (name, flags, code) in KERNEL {
            assemble(&dict, &mut mem, name, *flags, code)?;
        }
        log::debug!("{} kernel words", KERNEL.len());

        let xt = |mem: &Memory, name: &str| -> Result<Address> {
            dict.find(mem, name.as_bytes())?
                .ok_or_else(|| error!(InvalidCode; "primitive missing"))
        };
        let word = dict.create(&mut mem, b"word?", Opcode::Dodefer.to_cell())?;
        let notfound = xt(&mem, "notfound")?;
        dict.patch_doer(&mut mem, word, notfound as Cell)?;
        let abort = dict.create(&mut mem, b"abort?", Opcode::Dodefer.to_cell())?;
        let bye = xt(&mem, "bye")?;
        dict.patch_doer(&mut mem, abort, bye as Cell)?;
        let hooks = Hooks { word, abort };

        let (interpret, branch) = (xt(&mem, "interpret")?, xt(&mem, "branch")?);
        dict.align(&mut mem)?;
        let quit = dict.here(&mem)?;
        for cell in [interpret, branch, quit] {
            dict.comma(&mut mem, cell as Cell)?;
        }
        let abort_thread = dict.here(&mem)?;
        let quit_xt = xt(&mem, "quit")?;
        dict.comma(&mut mem, abort as Cell)?;
        dict.comma(&mut mem, quit_xt as Cell)?;
        let end = dict.here(&mem)?;
        let exit = xt(&mem, ";;")?;
        dict.comma(&mut mem, exit as Cell)?;
        let threads = Threads {
            quit,
            abort: abort_thread,
            end,
        };

        log::debug!(
            "boot: {} bytes, dictionary {}..{}, {} bytes used",
            size,
            dict.start(),
            dict.limit(),
            dict.here(&mem)? - dict.start()
        );
        Ok(Runtime {
            mem,
            dict,
            s: Stack::new(s0, config.stack_cells, config.checked),
            r: Stack::new_return(r0, config.return_stack_cells, config.checked),
            ip: quit,
            input: Box::new(TextStream::new("")),
            scopes: vec![],
            out,
            threads,
            hooks,
            config,
            interrupt: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Polled by the dispatch loop; when set it raises `interrupted`.
    pub fn set_interrupt(&mut self, flag: Arc<AtomicBool>) {
        self.interrupt = Some(flag);
    }

    /// Newest entry with this name.
    pub fn lookup(&self, name: &str) -> Result<Option<Address>> {
        self.dict.find(&self.mem, name.as_bytes())
    }

    /// Point `abort?` at the named word.
    pub fn set_abort_hook(&mut self, name: &str) -> Result<()> {
        let xt = self
            .lookup(name)?
            .ok_or_else(|| error!(InvalidAddress; "no such word"))?;
        self.dict.patch_doer(&mut self.mem, self.hooks.abort, xt as Cell)
    }

    /// Copy the guest argument vector into the dictionary space: one
    /// counted string per argument, then an array of their addresses.
    pub fn set_args(&mut self, args: &[String]) -> Result<()> {
        let mut addrs = vec![];
        for arg in args {
            let bytes = arg.as_bytes();
            let bytes = &bytes[..bytes.len().min(MAX_TOKEN_LEN)];
            let addr = self.dict.here(&self.mem)?;
            self.dict.allot(&mut self.mem, bytes.len() as Cell + 1)?;
            self.mem.write_counted(addr, bytes)?;
            addrs.push(addr);
        }
        self.dict.align(&mut self.mem)?;
        let argv = self.dict.here(&self.mem)?;
        for addr in &addrs {
            self.dict.comma(&mut self.mem, *addr as Cell)?;
        }
        self.mem.store(ARGC, addrs.len() as Cell)?;
        self.mem.store(ARGV, argv as Cell)?;
        log::debug!("{} guest arguments", addrs.len());
        Ok(())
    }

    /// Run the outer interpreter over `stream` until it is exhausted or
    /// the machine says `bye`.
    pub fn evaluate(&mut self, stream: Box<dyn Stream>) -> Event {
        self.input = stream;
        self.scopes.clear();
        self.r.reset();
        self.ip = self.threads.quit;
        self.run()
    }

    /// Drive the inner interpreter from the current instruction pointer.
    pub fn run(&mut self) -> Event {
        loop {
            let result = match self.interrupted() {
                true => Err(error!(Interrupted)),
                false => self.step(),
            };
            match result {
                Ok(None) => {}
                Ok(Some(event)) => {
                    let _ = self.out.flush();
                    return event;
                }
                Err(error) => {
                    log::debug!("error at ip {}: {}", self.ip, error);
                    self.report(&error);
                    if let Err(error) = self.abort() {
                        self.report(&error);
                        return Event::Bye;
                    }
                }
            }
        }
    }

    fn interrupted(&self) -> bool {
        match &self.interrupt {
            Some(flag) if flag.load(Ordering::SeqCst) => {
                flag.store(false, Ordering::SeqCst);
                true
            }
            _ => false,
        }
    }

    /// Execute the cell at the instruction pointer.
    pub fn step(&mut self) -> Result<Option<Event>> {
        let w = address(self.mem.fetch(self.ip)?)?;
        self.ip += CELL;
        self.call(w)
    }

    /// Transfer control to the entry `w`.
    pub(super) fn call(&mut self, mut w: Address) -> Result<Option<Event>> {
        loop {
            if w == 0 {
                return Err(error!(InvalidAddress; "null execution token"));
            }
            match Opcode::from_cell(self.mem.fetch(w)?)? {
                Opcode::Docol => {
                    self.rpush(self.ip as Cell)?;
                    self.ip = to_body(w);
                }
                Opcode::Dodefer => {
                    if self.interrupted() {
                        return Err(error!(Interrupted));
                    }
                    w = address(self.dict.doer(&self.mem, w)?)?;
                    continue;
                }
                Opcode::Dovar => self.push(to_body(w) as Cell)?,
                Opcode::Dodoes => {
                    self.push(to_body(w) as Cell)?;
                    self.rpush(self.ip as Cell)?;
                    self.ip = address(self.dict.doer(&self.mem, w)?)?;
                }
                op => return self.primitive(op),
            }
            return Ok(None);
        }
    }

    /// Read one token and compile or execute it.
    pub(super) fn interpret(&mut self) -> Result<Option<Event>> {
        let token = self.parse()?;
        if token.is_empty() {
            return match self.scopes.pop() {
                Some(outer) => {
                    self.input.close();
                    self.input = outer;
                    log::debug!("back to line {}", self.input.line());
                    Ok(None)
                }
                None => Ok(Some(Event::EndOfInput)),
            };
        }
        match self.dict.find(&self.mem, &token)? {
            Some(xt) if self.compiling()? && !self.is_immediate(xt)? => {
                log::trace!("compile {}", String::from_utf8_lossy(&token));
                self.dict.comma(&mut self.mem, xt as Cell)?;
                Ok(None)
            }
            Some(xt) => {
                log::trace!("execute {}", String::from_utf8_lossy(&token));
                self.execute_from_outer(xt)
            }
            None => {
                log::trace!("unknown {}", String::from_utf8_lossy(&token));
                self.execute_from_outer(self.hooks.word)
            }
        }
    }

    /// Call `xt` with a return frame into the end thread, so that `;;`
    /// from any depth lands back in the outer loop.
    fn execute_from_outer(&mut self, xt: Address) -> Result<Option<Event>> {
        self.rpush(self.ip as Cell)?;
        self.ip = self.threads.end;
        self.call(xt)
    }

    /// Read the next token into a counted string at `here`. The growth
    /// pointer does not move.
    pub(super) fn parse(&mut self) -> Result<Vec<u8>> {
        self.out.flush()?;
        let token = next_token(self.input.as_mut())?;
        let here = self.dict.here(&self.mem)?;
        if here + MAX_TOKEN_LEN + 1 > self.dict.limit() {
            return Err(error!(DictionaryFull));
        }
        self.mem.write_counted(here, &token)?;
        Ok(token)
    }

    /// Reset both stacks, leave compile state, drop every open stream and
    /// continue with the abort thread.
    pub(super) fn abort(&mut self) -> Result<()> {
        log::debug!("abort with {} nested streams", self.scopes.len());
        self.s.reset();
        self.r.reset();
        self.mem.store(STATE, FALSE)?;
        self.input.close();
        if !self.scopes.is_empty() {
            let mut root = self.scopes.remove(0);
            for mut scope in self.scopes.drain(..) {
                scope.close();
            }
            root.close();
            self.input = root;
        }
        self.ip = self.threads.abort;
        Ok(())
    }

    /// Print `l<line>: <text>` on the output.
    pub(super) fn diagnostic(&mut self, text: &str) -> Result<()> {
        let text = format!("l{}: {}", self.input.line(), text);
        if self.config.styled {
            writeln!(self.out, "{}", Style::new().bold().paint(text))?;
        } else {
            writeln!(self.out, "{}", text)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, error: &Error) {
        if let Err(e) = self.diagnostic(&error.to_string()) {
            log::warn!("cannot report {}: {}", error, e);
        }
    }

    pub fn compiling(&self) -> Result<bool> {
        Ok(self.mem.fetch(STATE)? != FALSE)
    }

    pub(super) fn is_immediate(&self, xt: Address) -> Result<bool> {
        Ok(self.dict.flags(&self.mem, xt)? & IMMEDIATE != 0)
    }

    pub fn push(&mut self, val: Cell) -> Result<()> {
        self.s.push(&mut self.mem, val)
    }

    pub fn pop(&mut self) -> Result<Cell> {
        self.s.pop(&self.mem)
    }

    pub(super) fn peek(&self, n: usize) -> Result<Cell> {
        self.s.peek(&self.mem, n)
    }

    pub(super) fn poke(&mut self, n: usize, val: Cell) -> Result<()> {
        self.s.poke(&mut self.mem, n, val)
    }

    pub(super) fn rpush(&mut self, val: Cell) -> Result<()> {
        self.r.push(&mut self.mem, val)
    }

    pub(super) fn rpop(&mut self) -> Result<Cell> {
        self.r.pop(&self.mem)
    }

    /// Parameter stack from the bottom up.
    pub fn stack(&self) -> Vec<Cell> {
        let mut items = self.s.items(&self.mem).unwrap_or_default();
        items.reverse();
        items
    }

    /// Parameter stack depth, negative after an unchecked underflow.
    pub fn depth(&self) -> isize {
        self.s.depth()
    }
}
