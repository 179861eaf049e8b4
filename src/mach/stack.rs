use super::{Address, Cell, Memory, CELL};
use crate::error;
use crate::lang::{Error, ErrorCode};

type Result<T> = std::result::Result<T, Error>;

/// Unused cells kept on each side of a stack region.
pub const GUARD_CELLS: usize = 16;

/// ## Stack region in the memory arena
///
/// Grows toward lower addresses. `top` is the address of the top item;
/// an empty stack has `top == base`. In checked mode `top` stays within
/// `[base - capacity, base]`. Unchecked, it may run into the guard cells
/// on either side of that range, which belong to no one; leaving them
/// raises `invalid address`.

#[derive(Debug, Clone)]
pub struct Stack {
    base: Address,
    limit: Address,
    top: Address,
    checked: bool,
    overflow: ErrorCode,
    underflow: ErrorCode,
}

impl Stack {
    pub fn new(base: Address, cells: usize, checked: bool) -> Stack {
        debug_assert!(base >= cells * CELL);
        Stack {
            base,
            limit: base - cells * CELL,
            top: base,
            checked,
            overflow: ErrorCode::StackOverflow,
            underflow: ErrorCode::StackUnderflow,
        }
    }
    pub fn new_return(base: Address, cells: usize, checked: bool) -> Stack {
        Stack {
            overflow: ErrorCode::ReturnStackOverflow,
            underflow: ErrorCode::ReturnStackUnderflow,
            ..Stack::new(base, cells, checked)
        }
    }
    pub fn base(&self) -> Address {
        self.base
    }
    pub fn limit(&self) -> Address {
        self.limit
    }
    pub fn top(&self) -> Address {
        self.top
    }
    pub fn reset(&mut self) {
        self.top = self.base;
    }
    /// Number of items. Negative after an unchecked underflow.
    pub fn depth(&self) -> isize {
        (self.base as isize - self.top as isize) / CELL as isize
    }
    pub fn is_empty(&self) -> bool {
        self.top >= self.base
    }
    fn floor(&self) -> Address {
        self.limit.saturating_sub(GUARD_CELLS * CELL)
    }
    fn ceiling(&self) -> Address {
        self.base + GUARD_CELLS * CELL
    }
    fn underflow_check(&self, n: usize) -> Result<()> {
        let end = self.top + n * CELL;
        if self.checked && end > self.base {
            Err(Error::new(self.underflow))
        } else if end > self.ceiling() {
            Err(error!(InvalidAddress))
        } else {
            Ok(())
        }
    }
    pub fn push(&mut self, mem: &mut Memory, val: Cell) -> Result<()> {
        if self.checked && self.top < self.limit + CELL {
            return Err(Error::new(self.overflow));
        }
        if self.top < self.floor() + CELL {
            return Err(error!(InvalidAddress));
        }
        let top = self.top - CELL;
        mem.store(top, val)?;
        self.top = top;
        Ok(())
    }
    pub fn pop(&mut self, mem: &Memory) -> Result<Cell> {
        self.underflow_check(1)?;
        let val = mem.fetch(self.top)?;
        self.top += CELL;
        Ok(val)
    }
    /// Item `n` counted from the top, which is item 0.
    pub fn peek(&self, mem: &Memory, n: usize) -> Result<Cell> {
        self.underflow_check(n + 1)?;
        mem.fetch(self.top + n * CELL)
    }
    pub fn poke(&mut self, mem: &mut Memory, n: usize, val: Cell) -> Result<()> {
        self.underflow_check(n + 1)?;
        mem.store(self.top + n * CELL, val)
    }
    pub fn drop_n(&mut self, n: usize) -> Result<()> {
        self.underflow_check(n)?;
        self.top += n * CELL;
        Ok(())
    }
    /// Items from the top down.
    pub fn items(&self, mem: &Memory) -> Result<Vec<Cell>> {
        let mut v = vec![];
        let mut addr = self.top;
        while addr < self.base {
            v.push(mem.fetch(addr)?);
            addr += CELL;
        }
        Ok(v)
    }
}
