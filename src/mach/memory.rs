use super::{Address, Cell, CELL};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Memory arena
///
/// One contiguous block of bytes holding the system variables, both
/// stacks and the dictionary. Every access is bounds checked, so a wild
/// address is an error instead of corruption. Cells are stored in native
/// byte order.

pub struct Memory {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory({} bytes)", self.bytes.len())
    }
}

/// Round up to the next cell boundary.
pub fn aligned(addr: Address) -> Address {
    (addr + CELL - 1) & !(CELL - 1)
}

/// Reinterpret a cell as an address.
pub fn address(cell: Cell) -> Result<Address> {
    Address::try_from(cell).map_err(|_| error!(InvalidAddress))
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory {
            bytes: vec![0; aligned(size)],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn slice(&self, addr: Address, len: usize) -> Result<&[u8]> {
        match addr.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(&self.bytes[addr..end]),
            _ => Err(error!(InvalidAddress)),
        }
    }

    fn slice_mut(&mut self, addr: Address, len: usize) -> Result<&mut [u8]> {
        match addr.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(&mut self.bytes[addr..end]),
            _ => Err(error!(InvalidAddress)),
        }
    }

    pub fn fetch(&self, addr: Address) -> Result<Cell> {
        let mut raw = [0; CELL];
        raw.copy_from_slice(self.slice(addr, CELL)?);
        Ok(Cell::from_ne_bytes(raw))
    }

    pub fn store(&mut self, addr: Address, val: Cell) -> Result<()> {
        self.slice_mut(addr, CELL)?
            .copy_from_slice(&val.to_ne_bytes());
        Ok(())
    }

    pub fn cfetch(&self, addr: Address) -> Result<u8> {
        Ok(self.slice(addr, 1)?[0])
    }

    pub fn cstore(&mut self, addr: Address, val: u8) -> Result<()> {
        self.slice_mut(addr, 1)?[0] = val;
        Ok(())
    }

    /// Body of the counted string at `addr`.
    pub fn counted(&self, addr: Address) -> Result<&[u8]> {
        let len = self.cfetch(addr)? as usize;
        self.slice(addr + 1, len)
    }

    /// Store `s` as a counted string. Returns the address just past it.
    pub fn write_counted(&mut self, addr: Address, s: &[u8]) -> Result<Address> {
        debug_assert!(s.len() <= u8::MAX as usize);
        self.cstore(addr, s.len() as u8)?;
        self.slice_mut(addr + 1, s.len())?.copy_from_slice(s);
        Ok(addr + 1 + s.len())
    }
}
