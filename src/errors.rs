use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum JSONPathErrorType {
    UnknownFunction,
    UnsupportedOperator,
    UnsupportedSlice,
}

/// A fatal evaluation error.
///
/// These abort the whole `execute` call. No-match conditions are not errors;
/// they contribute an empty result instead.
#[derive(Debug)]
pub struct JSONPathError {
    pub error: JSONPathErrorType,
    pub msg: String,
}

impl JSONPathError {
    pub fn new(error: JSONPathErrorType, msg: String) -> Self {
        Self { error, msg }
    }

    pub fn unknown_function(name: &str) -> Self {
        Self {
            error: JSONPathErrorType::UnknownFunction,
            msg: format!("no function named '{}' is registered", name),
        }
    }

    pub fn unsupported_operator(op: &str) -> Self {
        Self {
            error: JSONPathErrorType::UnsupportedOperator,
            msg: format!("comparison operator '{}' is not supported", op),
        }
    }

    pub fn unsupported_slice(step: i64) -> Self {
        Self {
            error: JSONPathErrorType::UnsupportedSlice,
            msg: format!("slice step {} is not supported, only 1", step),
        }
    }
}

impl std::error::Error for JSONPathError {}

impl fmt::Display for JSONPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error {
            JSONPathErrorType::UnknownFunction => {
                write!(f, "unknown function: {}", self.msg)
            }
            JSONPathErrorType::UnsupportedOperator => {
                write!(f, "unsupported operator: {}", self.msg)
            }
            JSONPathErrorType::UnsupportedSlice => {
                write!(f, "unsupported slice: {}", self.msg)
            }
        }
    }
}
