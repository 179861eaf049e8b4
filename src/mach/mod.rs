/*!
## Rust Machine Module

This Rust module is the threaded code virtual machine: the memory arena,
the dictionary, both stacks, and the inner and outer interpreters.

*/

/// A machine word: integer, address or execution token.
pub type Cell = isize;
/// Byte offset into the memory arena.
pub type Address = usize;

/// Size of a cell in bytes.
pub const CELL: usize = std::mem::size_of::<Cell>();

pub const TRUE: Cell = -1;
pub const FALSE: Cell = 0;

mod config;
mod dictionary;
mod heads;
mod kernel;
mod memory;
mod opcode;
mod primitive;
mod runtime;
mod stack;

pub use config::Config;
pub use dictionary::Dictionary;
pub use heads::IMMEDIATE;
pub use memory::Memory;
pub use opcode::Opcode;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;

#[cfg(test)]
mod tests;
