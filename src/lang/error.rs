use super::Location;

/// ## Toolchain error
///
/// Every stage reports failure with this one type. The stage that raised it
/// is known from the call that failed; the driver treats all of them as fatal.

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    location: Option<Location>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$loc:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_location($loc)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$loc:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_location($loc)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            location: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// Attach a location unless one is already present. Errors raised by
    /// collaborators without source knowledge get their location here.
    pub fn in_location(self, location: &Location) -> Error {
        if self.location.is_some() {
            return self;
        }
        Error {
            location: Some(location.clone()),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexing
    UnterminatedString,
    InvalidEscape,
    // Association
    UnmatchedEnd,
    UnterminatedBlock,
    MisplacedKeyword,
    MalformedFunction,
    MalformedBinding,
    MissingImport,
    ImportNotImplemented,
    ImportCycle,
    // Type checking
    StackImbalance,
    SignatureViolation,
    UnknownType,
    NonEmptyStack,
    // Shared by the checker and the runtime
    StackUnderflow,
    TypeMismatch,
    UndefinedName,
    // Runtime
    OutOfMemory,
    InvalidPointer,
    InvalidAllocation,
    UninitializedMemory,
    DivisionByZero,
    Overflow,
    InvalidNumber,
    Interrupted,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            UnterminatedString => "unterminated string",
            InvalidEscape => "invalid escape",
            UnmatchedEnd => "unmatched end",
            UnterminatedBlock => "unterminated block",
            MisplacedKeyword => "misplaced keyword",
            MalformedFunction => "malformed function",
            MalformedBinding => "malformed binding",
            MissingImport => "missing import",
            ImportNotImplemented => "not implemented",
            ImportCycle => "import cycle",
            StackImbalance => "stack imbalance",
            SignatureViolation => "signature violation",
            UnknownType => "unknown type",
            NonEmptyStack => "non-empty stack",
            StackUnderflow => "stack underflow",
            TypeMismatch => "type mismatch",
            UndefinedName => "undefined name",
            OutOfMemory => "out of memory",
            InvalidPointer => "invalid pointer",
            InvalidAllocation => "invalid allocation",
            UninitializedMemory => "uninitialized memory",
            DivisionByZero => "division by zero",
            Overflow => "overflow",
            InvalidNumber => "invalid number",
            Interrupted => "break",
            InternalError => "internal error",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(location) = &self.location {
            suffix.push_str(&format!(
                " at {}..{}",
                location.span.start, location.span.end
            ));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", self.code, suffix)
    }
}
