//! # mind
//!
//! A small Forth that builds itself. The machine boots from a table of
//! primitives and a handful of kernel words, then reads `boot.mind` to
//! teach itself numbers, control structures and the rest of its
//! vocabulary. Anything a program defines afterwards is indistinguishable
//! from what was there at boot.
//!
//! ```text
//! $ mind -e ': square dup * ; 7 square . cr'
//! 49
//! ```
//!
//! Without `-e` the interpreter ends at a command prompt. Leave it with
//! `bye` or CTRL-D; stop a running word with CTRL-C.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/glossary.rs"]
#[allow(non_snake_case)]
pub mod __Glossary;

pub mod lang;
pub mod mach;
pub mod term;
