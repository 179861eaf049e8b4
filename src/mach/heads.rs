use super::{Cell, Opcode};

/// Flag bit: execute even while compiling.
pub const IMMEDIATE: Cell = 1;

/// ## Primitive head table
///
/// Name, executor code and flags of every built-in word, in the order
/// they are linked into a fresh dictionary. Later entries shadow earlier
/// ones, so the table is searched from the bottom up.
pub const HEADS: &[(&str, Opcode, Cell)] = &[
    // Starting and ending
    ("abort", Opcode::Abort, 0),
    ("quit", Opcode::Quit, 0),
    ("bye", Opcode::Bye, 0),
    // Inner interpreter
    ("noop", Opcode::Noop, 0),
    (";;", Opcode::Exit, 0),
    ("0;", Opcode::ZeroExit, 0),
    ("execute", Opcode::Execute, 0),
    ("^docol", Opcode::DocolCode, 0),
    ("^dodefer", Opcode::DodeferCode, 0),
    ("^dovar", Opcode::DovarCode, 0),
    ("^dodoes", Opcode::DodoesCode, 0),
    ("(does>)", Opcode::DoesRuntime, 0),
    // Outer interpreter
    ("interpret", Opcode::Interpret, 0),
    ("notfound", Opcode::NotFound, 0),
    ("(')", Opcode::Tick, 0),
    ("(find)", Opcode::Find, 0),
    ("[", Opcode::LeftBracket, IMMEDIATE),
    ("]", Opcode::RightBracket, 0),
    ("parse", Opcode::Parse, 0),
    ("(number)", Opcode::Number, 0),
    // Dictionary
    ("align", Opcode::Align, 0),
    ("allot", Opcode::Allot, 0),
    (",", Opcode::Comma, 0),
    ("c,", Opcode::CComma, 0),
    (",\"", Opcode::CommaQuote, 0),
    ("entry,", Opcode::EntryComma, 0),
    ("link>", Opcode::LinkTo, 0),
    ("flags@", Opcode::FlagsFetch, 0),
    ("flags!", Opcode::FlagsStore, 0),
    (">name", Opcode::ToName, 0),
    (">doer", Opcode::ToDoer, 0),
    (">body", Opcode::ToBody, 0),
    ("#immediate", Opcode::NumImmediate, 0),
    ("words", Opcode::Words, 0),
    // Inline constants
    ("branch", Opcode::Branch, 0),
    ("0branch", Opcode::ZeroBranch, 0),
    ("lit", Opcode::Lit, 0),
    // System variables
    ("s0", Opcode::S0, 0),
    ("r0", Opcode::R0, 0),
    ("latest", Opcode::Latest, 0),
    ("dp", Opcode::Dp, 0),
    ("here", Opcode::Here, 0),
    ("state", Opcode::State, 0),
    ("line#", Opcode::LineNumber, 0),
    ("page#", Opcode::PageNumber, 0),
    ("argc", Opcode::Argc, 0),
    ("argv", Opcode::Argv, 0),
    // Return stack
    ("rdrop", Opcode::RDrop, 0),
    (">r", Opcode::ToR, 0),
    ("r>", Opcode::RFrom, 0),
    ("r", Opcode::RFetch, 0),
    // Stack
    ("drop", Opcode::Drop, 0),
    ("nip", Opcode::Nip, 0),
    ("2drop", Opcode::TwoDrop, 0),
    ("?dup", Opcode::QDup, 0),
    ("dup", Opcode::Dup, 0),
    ("over", Opcode::Over, 0),
    ("under", Opcode::Under, 0),
    ("swap", Opcode::Swap, 0),
    ("rot", Opcode::Rot, 0),
    ("-rot", Opcode::MinusRot, 0),
    ("sp@", Opcode::SpFetch, 0),
    // Arithmetic
    ("0", Opcode::Zero, 0),
    ("1", Opcode::One, 0),
    ("-1", Opcode::MinusOne, 0),
    ("2", Opcode::Two, 0),
    ("1+", Opcode::OnePlus, 0),
    ("1-", Opcode::OneMinus, 0),
    ("-", Opcode::Minus, 0),
    ("+", Opcode::Plus, 0),
    ("*", Opcode::Times, 0),
    ("/", Opcode::Divide, 0),
    ("u*", Opcode::UTimes, 0),
    ("or", Opcode::Or, 0),
    ("and", Opcode::And, 0),
    ("=", Opcode::Equal, 0),
    ("0=", Opcode::ZeroEqual, 0),
    ("0<", Opcode::ZeroLess, 0),
    ("u<", Opcode::ULess, 0),
    ("u>", Opcode::UGreater, 0),
    // Memory
    ("@", Opcode::Fetch, 0),
    ("c@", Opcode::CFetch, 0),
    ("!", Opcode::Store, 0),
    ("c!", Opcode::CStore, 0),
    ("cells", Opcode::Cells, 0),
    ("cell+", Opcode::CellPlus, 0),
    ("cell-", Opcode::CellMinus, 0),
    ("count", Opcode::Count, 0),
    // Output
    ("emit", Opcode::Emit, 0),
    ("type", Opcode::Type, 0),
    ("puts", Opcode::Puts, 0),
    ("cr", Opcode::Cr, 0),
    ("h.", Opcode::HDot, 0),
    (".", Opcode::Dot, 0),
    ("blank", Opcode::Blank, 0),
    // Streams
    ("forward", Opcode::Forward, 0),
    ("current", Opcode::Current, 0),
    ("eos", Opcode::Eos, 0),
    ("include", Opcode::Include, 0),
];
