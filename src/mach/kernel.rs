use super::{Address, Cell, Dictionary, Memory, Opcode, IMMEDIATE};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// One step of a kernel definition.
#[derive(Debug, Clone, Copy)]
pub enum Asm {
    /// Compile a call to the named word.
    Call(&'static str),
    /// Compile an inline literal.
    Lit(Cell),
    /// Compile the execution token of the named word as a literal.
    Xt(&'static str),
    Branch(&'static str),
    ZBranch(&'static str),
    /// Define a branch target at this point.
    Mark(&'static str),
}

use Asm::*;

/// ## Kernel words
///
/// Colon definitions that are compiled from primitives at boot instead of
/// being read from source. They are needed before any source can be read
/// sensibly: comments and the defining words.
///
/// `eos 0= 0branch L` is "if at end of stream goto L".
pub const KERNEL: &[(&str, Cell, &[Asm])] = &[
    (
        "\\",
        IMMEDIATE,
        &[
            Mark("top"),
            Call("eos"),
            Call("0="),
            ZBranch("done"),
            Call("current"),
            Lit(10),
            Call("="),
            Call("current"),
            Lit(12),
            Call("="),
            Call("or"),
            Call("0="),
            ZBranch("done"),
            Call("forward"),
            Branch("top"),
            Mark("done"),
            Call(";;"),
        ],
    ),
    (
        "(",
        IMMEDIATE,
        &[
            Mark("top"),
            Call("eos"),
            Call("0="),
            ZBranch("done"),
            Call("current"),
            Lit(12),
            Call("="),
            Call("0="),
            ZBranch("done"),
            Call("current"),
            Lit(41),
            Call("="),
            Call("0="),
            ZBranch("close"),
            Call("forward"),
            Branch("top"),
            Mark("close"),
            Call("forward"),
            Mark("done"),
            Call(";;"),
        ],
    ),
    (
        ".(",
        0,
        &[
            Call("forward"),
            Mark("top"),
            Call("eos"),
            Call("0="),
            ZBranch("done"),
            Call("current"),
            Lit(12),
            Call("="),
            Call("0="),
            ZBranch("done"),
            Call("current"),
            Lit(41),
            Call("="),
            Call("0="),
            ZBranch("close"),
            Call("current"),
            Call("emit"),
            Call("forward"),
            Branch("top"),
            Mark("close"),
            Call("forward"),
            Mark("done"),
            Call(";;"),
        ],
    ),
    (
        "entry",
        0,
        &[
            Call("parse"),
            Call("dup"),
            Call("c@"),
            Call("1+"),
            Call("allot"),
            Call("swap"),
            Call("entry,"),
            Call(";;"),
        ],
    ),
    ("create", 0, &[Call("^dovar"), Call("entry"), Call(";;")]),
    (":", 0, &[Call("^docol"), Call("entry"), Call("]"), Call(";;")]),
    (";", IMMEDIATE, &[Xt(";;"), Call(","), Call("["), Call(";;")]),
    (
        "immediate",
        0,
        &[
            Call("#immediate"),
            Call("latest"),
            Call("@"),
            Call("link>"),
            Call("flags!"),
            Call(";;"),
        ],
    ),
    ("does>", IMMEDIATE, &[Xt("(does>)"), Call(","), Call(";;")]),
    (
        "[']",
        IMMEDIATE,
        &[Call("(')"), Xt("lit"), Call(","), Call(","), Call(";;")],
    ),
    (
        "literal",
        IMMEDIATE,
        &[Xt("lit"), Call(","), Call(","), Call(";;")],
    ),
];

/// Compile one kernel definition into the dictionary.
pub fn assemble(
    dict: &Dictionary,
    mem: &mut Memory,
    name: &str,
    flags: Cell,
    code: &[Asm],
) -> Result<Address> {
    let find = |mem: &Memory, word: &str| -> Result<Cell> {
        match dict.find(mem, word.as_bytes())? {
            Some(xt) => Ok(xt as Cell),
            None => Err(error!(InvalidCode; "kernel word missing")),
        }
    };
    let xt = dict.create(mem, name.as_bytes(), Opcode::Docol.to_cell())?;
    let mut labels: HashMap<&str, Address> = HashMap::new();
    let mut fixups: Vec<(Address, &str)> = vec![];
    for asm in code {
        match *asm {
            Call(word) => {
                let target = find(mem, word)?;
                dict.comma(mem, target)?;
            }
            Lit(n) => {
                let lit = find(mem, "lit")?;
                dict.comma(mem, lit)?;
                dict.comma(mem, n)?;
            }
            Xt(word) => {
                let lit = find(mem, "lit")?;
                let target = find(mem, word)?;
                dict.comma(mem, lit)?;
                dict.comma(mem, target)?;
            }
            Branch(label) | ZBranch(label) => {
                let op = if let Branch(_) = asm { "branch" } else { "0branch" };
                let op = find(mem, op)?;
                dict.comma(mem, op)?;
                fixups.push((dict.here(mem)?, label));
                dict.comma(mem, 0)?;
            }
            Mark(label) => {
                labels.insert(label, dict.here(mem)?);
            }
        }
    }
    for (at, label) in fixups {
        let target = labels
            .get(label)
            .ok_or_else(|| error!(InvalidAddress; "kernel label missing"))?;
        mem.store(at, *target as Cell)?;
    }
    dict.patch_flags(mem, xt, flags)?;
    log::trace!("kernel word {} at {}", name, xt);
    Ok(xt)
}
