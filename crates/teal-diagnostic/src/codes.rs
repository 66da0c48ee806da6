//! Error codes for Teal diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnexpectedCharacter,
    InvalidNumber,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    ExpectedExpression,
    ExpectedDefinition,
    UnclosedDelimiter,
    DuplicateFunction,

    // Interpretation errors (E0300 - E0399)
    UndefinedFunction,
    ArityMismatch,
    UndefinedVariable,
    IntegerOverflow,
    CallDepthExceeded,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "E0001",
            ErrorCode::InvalidNumber => "E0002",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::ExpectedExpression => "E0101",
            ErrorCode::ExpectedDefinition => "E0102",
            ErrorCode::UnclosedDelimiter => "E0103",
            ErrorCode::DuplicateFunction => "E0104",

            // Interpretation
            ErrorCode::UndefinedFunction => "E0300",
            ErrorCode::ArityMismatch => "E0301",
            ErrorCode::UndefinedVariable => "E0302",
            ErrorCode::IntegerOverflow => "E0303",
            ErrorCode::CallDepthExceeded => "E0304",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "unexpected character in input",
            ErrorCode::InvalidNumber => "invalid integer literal",

            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::ExpectedExpression => "expected an expression",
            ErrorCode::ExpectedDefinition => "expected a function definition",
            ErrorCode::UnclosedDelimiter => "unclosed delimiter",
            ErrorCode::DuplicateFunction => "function is defined more than once",

            ErrorCode::UndefinedFunction => "call to an undefined function",
            ErrorCode::ArityMismatch => "wrong number of arguments",
            ErrorCode::UndefinedVariable => "variable is not the function's parameter",
            ErrorCode::IntegerOverflow => "integer addition overflowed",
            ErrorCode::CallDepthExceeded => "maximum call depth exceeded",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::InvalidNumber => Some("integer literals must fit in a signed 64-bit value"),
            ErrorCode::ExpectedDefinition => Some("definitions look like `name(param): expression`"),
            ErrorCode::UnclosedDelimiter => Some("add the matching `)`"),
            ErrorCode::DuplicateFunction => Some("rename or remove one of the definitions"),
            ErrorCode::ArityMismatch => Some("functions take exactly as many arguments as they declare, zero or one"),
            ErrorCode::UndefinedVariable => Some("a body can only refer to its own parameter"),
            _ => None,
        }
    }
}
