use super::dictionary::{link_to, to_body, to_doer, to_name, DP, LATEST};
use super::memory::address;
use super::runtime::{ARGC, ARGV, STATE};
use super::{Address, Cell, Event, Opcode, Runtime, CELL, FALSE, IMMEDIATE, TRUE};
use crate::error;
use crate::lang::{parse_number, Error, FileStream, MAX_TOKEN_LEN};
use std::io::Write;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, Error>;

fn flag(b: bool) -> Cell {
    if b {
        TRUE
    } else {
        FALSE
    }
}

impl Runtime {
    fn binary<F: Fn(Cell, Cell) -> Cell>(&mut self, f: F) -> Result<()> {
        let b = self.pop()?;
        let a = self.peek(0)?;
        self.poke(0, f(a, b))
    }

    fn unary<F: Fn(Cell) -> Cell>(&mut self, f: F) -> Result<()> {
        let a = self.peek(0)?;
        self.poke(0, f(a))
    }

    fn pop_address(&mut self) -> Result<Address> {
        address(self.pop()?)
    }

    fn inline(&mut self) -> Result<Cell> {
        let val = self.mem.fetch(self.ip)?;
        self.ip += CELL;
        Ok(val)
    }

    fn include(&mut self) -> Result<()> {
        let token = self.parse()?;
        let name = PathBuf::from(String::from_utf8_lossy(&token).into_owned());
        let path = match self.input.path().and_then(|p| p.parent()) {
            Some(dir) => dir.join(&name),
            None => name,
        };
        let stream = FileStream::open(&path);
        if !stream.is_open() {
            return Err(error!(FileNotFound));
        }
        log::debug!("include {}", path.display());
        let outer = std::mem::replace(&mut self.input, Box::new(stream));
        self.scopes.push(outer);
        Ok(())
    }

    /// Compile the text up to `"` or a page break as a counted string.
    fn comma_quote(&mut self) -> Result<()> {
        self.input.advance();
        let mut text = vec![];
        while let Some(c) = self.input.peek() {
            self.input.advance();
            if c == b'"' || c == b'\x0c' {
                break;
            }
            text.push(c);
        }
        if text.len() > MAX_TOKEN_LEN {
            return Err(error!(TokenTooLong));
        }
        let here = self.dict.here(&self.mem)?;
        self.dict.allot(&mut self.mem, text.len() as Cell + 1)?;
        self.mem.write_counted(here, &text)?;
        Ok(())
    }

    fn words(&mut self) -> Result<()> {
        let mut names = vec![];
        for xt in self.dict.entries(&self.mem)? {
            let name = self.dict.name(&self.mem, xt)?;
            if !name.is_empty() {
                names.push(String::from_utf8_lossy(name).into_owned());
            }
        }
        writeln!(self.out, "{}", names.join(" "))?;
        Ok(())
    }

    /// Run one primitive. The instruction pointer already points past
    /// the cell that called it.
    pub(super) fn primitive(&mut self, op: Opcode) -> Result<Option<Event>> {
        use Opcode::*;
        match op {
            Docol | Dodefer | Dovar | Dodoes => {
                return Err(error!(InvalidCode; "not a primitive"));
            }

            // *** Starting and ending
            Abort => self.abort()?,
            Quit => {
                self.r.reset();
                self.ip = self.threads.quit;
            }
            Bye => return Ok(Some(Event::Bye)),

            // *** Inner interpreter
            Noop => {}
            Exit => self.ip = address(self.rpop()?)?,
            ZeroExit => {
                if self.peek(0)? == 0 {
                    self.s.drop_n(1)?;
                    self.ip = address(self.rpop()?)?;
                }
            }
            Execute => {
                let xt = self.pop_address()?;
                return self.call(xt);
            }
            DocolCode => self.push(Docol.to_cell())?,
            DodeferCode => self.push(Dodefer.to_cell())?,
            DovarCode => self.push(Dovar.to_cell())?,
            DodoesCode => self.push(Dodoes.to_cell())?,
            DoesRuntime => {
                let xt = self.dict.latest_xt(&self.mem)?;
                self.dict.patch_doer(&mut self.mem, xt, self.ip as Cell)?;
                self.ip = address(self.rpop()?)?;
            }

            // *** Outer interpreter
            Interpret => return self.interpret(),
            NotFound => {
                let here = self.dict.here(&self.mem)?;
                let token = String::from_utf8_lossy(self.mem.counted(here)?).into_owned();
                log::debug!("not found: {}", token);
                self.diagnostic(&format!("not found: {}", token))?;
                self.abort()?;
            }
            Tick => {
                let token = self.parse()?;
                let xt = match token.is_empty() {
                    true => None,
                    false => self.dict.find(&self.mem, &token)?,
                };
                self.push(xt.unwrap_or(0) as Cell)?;
            }
            Find => {
                let n = address(self.pop()?)?;
                let a = self.pop_address()?;
                let name = self.mem.slice(a, n)?.to_vec();
                match self.dict.find(&self.mem, &name)? {
                    Some(xt) => {
                        self.push(xt as Cell)?;
                        self.push(TRUE)?;
                    }
                    None => self.push(FALSE)?,
                }
            }
            LeftBracket => self.mem.store(STATE, FALSE)?,
            RightBracket => self.mem.store(STATE, TRUE)?,
            Parse => {
                self.parse()?;
                let here = self.dict.here(&self.mem)?;
                self.push(here as Cell)?;
            }
            Number => {
                let a = self.pop_address()?;
                match parse_number(self.mem.counted(a)?) {
                    Some(n) => {
                        self.push(n)?;
                        self.push(TRUE)?;
                    }
                    None => self.push(FALSE)?,
                }
            }

            // *** Dictionary
            Align => self.dict.align(&mut self.mem)?,
            Allot => {
                let n = self.pop()?;
                self.dict.allot(&mut self.mem, n)?;
            }
            Comma => {
                let val = self.pop()?;
                self.dict.comma(&mut self.mem, val)?;
            }
            CComma => {
                let val = self.pop()?;
                self.dict.c_comma(&mut self.mem, val as u8)?;
            }
            CommaQuote => self.comma_quote()?,
            EntryComma => {
                let code = self.pop()?;
                Opcode::from_cell(code)?;
                let name = self.pop_address()?;
                let xt = self.dict.append(&mut self.mem, name, code)?;
                log::trace!("entry {} at {}", String::from_utf8_lossy(self.mem.counted(name)?), xt);
            }
            LinkTo => {
                let lfa = self.pop_address()?;
                self.push(link_to(lfa) as Cell)?;
            }
            FlagsFetch => {
                let xt = self.pop_address()?;
                let flags = self.dict.flags(&self.mem, xt)?;
                self.push(flags)?;
            }
            FlagsStore => {
                let xt = self.pop_address()?;
                let flags = self.pop()?;
                self.dict.patch_flags(&mut self.mem, xt, flags)?;
            }
            ToName => {
                let xt = self.pop_address()?;
                let name = self.mem.fetch(to_name(xt)?)?;
                self.push(name)?;
            }
            ToDoer => {
                let xt = self.pop_address()?;
                self.push(to_doer(xt) as Cell)?;
            }
            ToBody => {
                let xt = self.pop_address()?;
                self.push(to_body(xt) as Cell)?;
            }
            NumImmediate => self.push(IMMEDIATE)?,
            Words => self.words()?,

            // *** Inline constants
            Branch => self.ip = address(self.mem.fetch(self.ip)?)?,
            ZeroBranch => {
                if self.pop()? != 0 {
                    self.ip += CELL;
                } else {
                    self.ip = address(self.mem.fetch(self.ip)?)?;
                }
            }
            Lit => {
                let val = self.inline()?;
                self.push(val)?;
            }

            // *** System variables
            S0 => self.push(super::runtime::S0 as Cell)?,
            R0 => self.push(super::runtime::R0 as Cell)?,
            Latest => self.push(LATEST as Cell)?,
            Dp => self.push(DP as Cell)?,
            Here => {
                let here = self.dict.here(&self.mem)?;
                self.push(here as Cell)?;
            }
            State => self.push(STATE as Cell)?,
            LineNumber => self.push(self.input.line() as Cell)?,
            PageNumber => self.push(self.input.page() as Cell)?,
            Argc => self.push(self.mem.fetch(ARGC)?)?,
            Argv => self.push(self.mem.fetch(ARGV)?)?,

            // *** Return stack
            RDrop => {
                self.rpop()?;
            }
            ToR => {
                let val = self.pop()?;
                self.rpush(val)?;
            }
            RFrom => {
                let val = self.rpop()?;
                self.push(val)?;
            }
            RFetch => {
                let val = self.r.peek(&self.mem, 0)?;
                self.push(val)?;
            }

            // *** Stack
            Drop => self.s.drop_n(1)?,
            Nip => {
                let b = self.pop()?;
                self.poke(0, b)?;
            }
            TwoDrop => self.s.drop_n(2)?,
            QDup => {
                let a = self.peek(0)?;
                if a != 0 {
                    self.push(a)?;
                }
            }
            Dup => {
                let a = self.peek(0)?;
                self.push(a)?;
            }
            Over => {
                let a = self.peek(1)?;
                self.push(a)?;
            }
            Under => {
                let b = self.peek(0)?;
                let a = self.peek(1)?;
                self.poke(1, b)?;
                self.poke(0, a)?;
                self.push(b)?;
            }
            Swap => {
                let b = self.peek(0)?;
                let a = self.peek(1)?;
                self.poke(0, a)?;
                self.poke(1, b)?;
            }
            Rot => {
                let c = self.peek(0)?;
                let b = self.peek(1)?;
                let a = self.peek(2)?;
                self.poke(2, b)?;
                self.poke(1, c)?;
                self.poke(0, a)?;
            }
            MinusRot => {
                let c = self.peek(0)?;
                let b = self.peek(1)?;
                let a = self.peek(2)?;
                self.poke(2, c)?;
                self.poke(1, a)?;
                self.poke(0, b)?;
            }
            SpFetch => {
                let sp = self.s.top();
                self.push(sp as Cell)?;
            }

            // *** Arithmetic
            Zero => self.push(0)?,
            One => self.push(1)?,
            MinusOne => self.push(-1)?,
            Two => self.push(2)?,
            OnePlus => self.unary(|a| a.wrapping_add(1))?,
            OneMinus => self.unary(|a| a.wrapping_sub(1))?,
            Minus => self.binary(|a, b| a.wrapping_sub(b))?,
            Plus => self.binary(|a, b| a.wrapping_add(b))?,
            Times => self.binary(|a, b| a.wrapping_mul(b))?,
            Divide => {
                if self.peek(0)? == 0 {
                    return Err(error!(DivisionByZero));
                }
                self.binary(|a, b| a.wrapping_div(b))?;
            }
            UTimes => self.binary(|a, b| (a as usize).wrapping_mul(b as usize) as Cell)?,
            Or => self.binary(|a, b| a | b)?,
            And => self.binary(|a, b| a & b)?,
            Equal => self.binary(|a, b| flag(a == b))?,
            ZeroEqual => self.unary(|a| flag(a == 0))?,
            ZeroLess => self.unary(|a| flag(a < 0))?,
            ULess => self.binary(|a, b| flag((a as usize) < (b as usize)))?,
            UGreater => self.binary(|a, b| flag((a as usize) > (b as usize)))?,

            // *** Memory
            Fetch => {
                let a = address(self.peek(0)?)?;
                let val = self.mem.fetch(a)?;
                self.poke(0, val)?;
            }
            CFetch => {
                let a = address(self.peek(0)?)?;
                let val = self.mem.cfetch(a)?;
                self.poke(0, val as Cell)?;
            }
            Store => {
                let a = self.pop_address()?;
                let val = self.pop()?;
                self.mem.store(a, val)?;
            }
            CStore => {
                let a = self.pop_address()?;
                let val = self.pop()?;
                self.mem.cstore(a, val as u8)?;
            }
            Cells => self.unary(|a| a.wrapping_mul(CELL as Cell))?,
            CellPlus => self.unary(|a| a.wrapping_add(CELL as Cell))?,
            CellMinus => self.unary(|a| a.wrapping_sub(CELL as Cell))?,
            Count => {
                let a = address(self.peek(0)?)?;
                let n = self.mem.cfetch(a)?;
                self.poke(0, a as Cell + 1)?;
                self.push(n as Cell)?;
            }

            // *** Output
            Emit => {
                let c = self.pop()?;
                self.out.write_all(&[c as u8])?;
            }
            Type => {
                let n = address(self.pop()?)?;
                let a = self.pop_address()?;
                self.out.write_all(self.mem.slice(a, n)?)?;
            }
            Puts => {
                let a = self.pop_address()?;
                self.out.write_all(self.mem.counted(a)?)?;
            }
            Cr => self.out.write_all(b"\n")?,
            HDot => {
                let n = self.pop()?;
                write!(self.out, "{:x} ", n)?;
            }
            Dot => {
                let n = self.pop()?;
                write!(self.out, "{} ", n)?;
            }
            Blank => self.push(b' ' as Cell)?,

            // *** Streams
            Forward => self.input.advance(),
            Current => {
                let c = self.input.peek().map_or(-1, Cell::from);
                self.push(c)?;
            }
            Eos => {
                let eos = self.input.at_end();
                self.push(flag(eos))?;
            }
            Include => self.include()?,
        }
        Ok(None)
    }
}
