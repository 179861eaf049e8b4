pub struct Error {
    code: u16,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            message: "",
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    StackUnderflow = 1,
    StackOverflow = 2,
    ReturnStackUnderflow = 3,
    ReturnStackOverflow = 4,
    InvalidAddress = 5,
    InvalidCode = 6,
    DivisionByZero = 7,
    DictionaryFull = 8,
    FileNotFound = 9,
    Interrupted = 10,
    IoError = 11,
    TokenTooLong = 12,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "stack underflow",
            2 => "stack overflow",
            3 => "return stack underflow",
            4 => "return stack overflow",
            5 => "invalid address",
            6 => "invalid code",
            7 => "division by zero",
            8 => "dictionary full",
            9 => "file not found",
            10 => "interrupted",
            11 => "i/o error",
            12 => "token too long",
            _ => "",
        };
        if code_str.is_empty() {
            write!(f, "error {}", self.code)?;
        } else {
            write!(f, "{}", code_str)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Error::new(ErrorCode::IoError)
    }
}
