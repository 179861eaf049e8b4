use super::memory::{address, aligned};
use super::{Address, Cell, Memory, CELL};
use crate::error;
use crate::lang::{Error, MAX_TOKEN_LEN};

type Result<T> = std::result::Result<T, Error>;

/// System variable holding the link address of the newest entry.
pub const LATEST: Address = CELL;
/// System variable holding the dictionary growth pointer.
pub const DP: Address = 2 * CELL;

const LINK: Address = 3 * CELL;
const NAME: Address = 2 * CELL;
const FLAGS: Address = CELL;
const DOER: Address = CELL;
const BODY: Address = 2 * CELL;

/// Size of an entry header in bytes.
pub const HEADER: Address = 5 * CELL;

/// ## Dictionary
///
/// Append-only chain of entries living in the memory arena. The head and
/// the growth pointer are kept in system variables so compiled code can
/// read and move them too. Entries are never relocated, which makes an
/// entry's execution token a stable handle for the life of the machine.
///
/// ```text
/// lfa -> | previous | name | flags | executor | doer | body ...
///                                   ^ xt
/// ```

#[derive(Debug, Clone)]
pub struct Dictionary {
    start: Address,
    limit: Address,
}

pub fn link_to(lfa: Address) -> Address {
    lfa + LINK
}

pub fn to_name(xt: Address) -> Result<Address> {
    xt.checked_sub(NAME).ok_or_else(|| error!(InvalidAddress))
}

pub fn to_flags(xt: Address) -> Result<Address> {
    xt.checked_sub(FLAGS).ok_or_else(|| error!(InvalidAddress))
}

pub fn to_doer(xt: Address) -> Address {
    xt + DOER
}

pub fn to_body(xt: Address) -> Address {
    xt + BODY
}

impl Dictionary {
    /// Empty dictionary growing from `start` up to, not including, `limit`.
    pub fn new(mem: &mut Memory, start: Address, limit: Address) -> Result<Dictionary> {
        if aligned(start) + HEADER > limit {
            return Err(error!(DictionaryFull));
        }
        mem.store(LATEST, 0)?;
        mem.store(DP, aligned(start) as Cell)?;
        Ok(Dictionary { start, limit })
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn limit(&self) -> Address {
        self.limit
    }

    /// Link address of the newest entry, 0 when empty.
    pub fn latest(&self, mem: &Memory) -> Result<Address> {
        address(mem.fetch(LATEST)?)
    }

    /// Execution token of the newest entry.
    pub fn latest_xt(&self, mem: &Memory) -> Result<Address> {
        match self.latest(mem)? {
            0 => Err(error!(InvalidAddress; "empty dictionary")),
            lfa => Ok(link_to(lfa)),
        }
    }

    pub fn here(&self, mem: &Memory) -> Result<Address> {
        address(mem.fetch(DP)?)
    }

    fn set_here(&self, mem: &mut Memory, addr: Address) -> Result<()> {
        if addr < self.start || addr > self.limit {
            return Err(error!(DictionaryFull));
        }
        mem.store(DP, addr as Cell)
    }

    /// Move the growth pointer by `n` bytes, which may be negative.
    pub fn allot(&self, mem: &mut Memory, n: Cell) -> Result<()> {
        let here = self.here(mem)? as Cell;
        let addr = here.checked_add(n).ok_or_else(|| error!(DictionaryFull))?;
        self.set_here(mem, address(addr).map_err(|_| error!(DictionaryFull))?)
    }

    pub fn align(&self, mem: &mut Memory) -> Result<()> {
        let here = self.here(mem)?;
        self.set_here(mem, aligned(here))
    }

    pub fn comma(&self, mem: &mut Memory, val: Cell) -> Result<()> {
        let here = self.here(mem)?;
        self.set_here(mem, here + CELL)?;
        mem.store(here, val)
    }

    pub fn c_comma(&self, mem: &mut Memory, val: u8) -> Result<()> {
        let here = self.here(mem)?;
        self.set_here(mem, here + 1)?;
        mem.cstore(here, val)
    }

    /// Link a new entry named by the counted string at `name`, with an
    /// empty body. Returns its execution token.
    pub fn append(&self, mem: &mut Memory, name: Address, code: Cell) -> Result<Address> {
        self.align(mem)?;
        let lfa = self.here(mem)?;
        if lfa + HEADER > self.limit {
            return Err(error!(DictionaryFull));
        }
        let latest = self.latest(mem)?;
        self.comma(mem, latest as Cell)?;
        self.comma(mem, name as Cell)?;
        self.comma(mem, 0)?;
        self.comma(mem, code)?;
        self.comma(mem, 0)?;
        mem.store(LATEST, lfa as Cell)?;
        Ok(link_to(lfa))
    }

    /// Lay down `name` as a counted string, then append an entry for it.
    pub fn create(&self, mem: &mut Memory, name: &[u8], code: Cell) -> Result<Address> {
        if name.len() > MAX_TOKEN_LEN {
            return Err(error!(TokenTooLong));
        }
        let addr = self.here(mem)?;
        self.allot(mem, name.len() as Cell + 1)?;
        mem.write_counted(addr, name)?;
        self.append(mem, addr, code)
    }

    pub fn flags(&self, mem: &Memory, xt: Address) -> Result<Cell> {
        mem.fetch(to_flags(xt)?)
    }

    pub fn patch_flags(&self, mem: &mut Memory, xt: Address, flags: Cell) -> Result<()> {
        mem.store(to_flags(xt)?, flags)
    }

    pub fn doer(&self, mem: &Memory, xt: Address) -> Result<Cell> {
        mem.fetch(to_doer(xt))
    }

    pub fn patch_doer(&self, mem: &mut Memory, xt: Address, doer: Cell) -> Result<()> {
        mem.store(to_doer(xt), doer)
    }

    /// Name of the entry, empty for an anonymous one.
    pub fn name<'a>(&self, mem: &'a Memory, xt: Address) -> Result<&'a [u8]> {
        match address(mem.fetch(to_name(xt)?)?)? {
            0 => Ok(&[]),
            addr => mem.counted(addr),
        }
    }

    /// Newest entry named exactly `name`.
    pub fn find(&self, mem: &Memory, name: &[u8]) -> Result<Option<Address>> {
        let mut lfa = self.latest(mem)?;
        while lfa != 0 {
            let xt = link_to(lfa);
            if !name.is_empty() && self.name(mem, xt)? == name {
                return Ok(Some(xt));
            }
            lfa = address(mem.fetch(lfa)?)?;
        }
        Ok(None)
    }

    /// Execution tokens from newest to oldest.
    pub fn entries(&self, mem: &Memory) -> Result<Vec<Address>> {
        let mut xts = vec![];
        let mut lfa = self.latest(mem)?;
        while lfa != 0 {
            xts.push(link_to(lfa));
            lfa = address(mem.fetch(lfa)?)?;
        }
        Ok(xts)
    }
}
