use super::Cell;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

macro_rules! opcodes {
    ($($(#[$doc:meta])* $op:ident,)*) => {
        /// ## Executor codes
        ///
        /// The executor cell of every dictionary entry holds one of these.
        /// The first four are the runtime behaviors shared by compiled
        /// words; every other code is a primitive with its own entry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Opcode {
            $($(#[$doc])* $op,)*
        }

        impl Opcode {
            const ALL: &'static [Opcode] = &[$(Opcode::$op,)*];
        }
    };
}

opcodes! {
    /// Colon call: save the instruction pointer, run the body.
    Docol,
    /// Deferred call: continue with the word in the doer slot.
    Dodefer,
    /// Variable: push the body address.
    Dovar,
    /// Closure: push the body address, then call the doer code.
    Dodoes,

    // *** Starting and ending
    Abort,
    Quit,
    Bye,

    // *** Inner interpreter
    Noop,
    Exit,
    ZeroExit,
    Execute,
    DocolCode,
    DodeferCode,
    DovarCode,
    DodoesCode,
    DoesRuntime,

    // *** Outer interpreter
    Interpret,
    NotFound,
    Tick,
    Find,
    LeftBracket,
    RightBracket,
    Parse,
    Number,

    // *** Dictionary
    Align,
    Allot,
    Comma,
    CComma,
    CommaQuote,
    EntryComma,
    LinkTo,
    FlagsFetch,
    FlagsStore,
    ToName,
    ToDoer,
    ToBody,
    NumImmediate,
    Words,

    // *** Inline constants
    Branch,
    ZeroBranch,
    Lit,

    // *** System variables
    S0,
    R0,
    Latest,
    Dp,
    Here,
    State,
    LineNumber,
    PageNumber,
    Argc,
    Argv,

    // *** Return stack
    RDrop,
    ToR,
    RFrom,
    RFetch,

    // *** Stack
    Drop,
    Nip,
    TwoDrop,
    QDup,
    Dup,
    Over,
    Under,
    Swap,
    Rot,
    MinusRot,
    SpFetch,

    // *** Arithmetic
    Zero,
    One,
    MinusOne,
    Two,
    OnePlus,
    OneMinus,
    Minus,
    Plus,
    Times,
    Divide,
    UTimes,
    Or,
    And,
    Equal,
    ZeroEqual,
    ZeroLess,
    ULess,
    UGreater,

    // *** Memory
    Fetch,
    CFetch,
    Store,
    CStore,
    Cells,
    CellPlus,
    CellMinus,
    Count,

    // *** Output
    Emit,
    Type,
    Puts,
    Cr,
    HDot,
    Dot,
    Blank,

    // *** Streams
    Forward,
    Current,
    Eos,
    Include,
}

impl Opcode {
    pub fn from_cell(cell: Cell) -> Result<Opcode> {
        usize::try_from(cell)
            .ok()
            .and_then(|n| Opcode::ALL.get(n))
            .copied()
            .ok_or_else(|| error!(InvalidCode))
    }

    pub fn to_cell(self) -> Cell {
        self as Cell
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_ascii_uppercase())
    }
}
