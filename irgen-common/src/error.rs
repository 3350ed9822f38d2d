//! Error handling for irgen
//!
//! A generation run is single-shot and fail-fast: every stage returns the
//! first rule it finds violated as a `GenError`, and the driver turns it into
//! a fatal message and a non-zero exit.

use crate::source_loc::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Which of the two input declarations an error is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Composite,
    Consumer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Composite => write!(f, "composite"),
            Role::Consumer => write!(f, "consumer"),
        }
    }
}

/// Every way a generation run can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("can't load package {package} from dir {dir:?}: {reason}")]
    Load {
        package: String,
        dir: String,
        reason: String,
    },

    #[error("syntax error at {location}: {message}")]
    Syntax {
        location: SourceLocation,
        message: String,
    },

    #[error("can't retrieve {role} type {name}: no type named {name} in package {package}")]
    NotFound {
        role: Role,
        name: String,
        package: String,
    },

    #[error("can't retrieve {role} type {name}: type {name} declared {} times in package {package}", .locations.len())]
    AmbiguousName {
        role: Role,
        name: String,
        package: String,
        locations: Vec<SourceLocation>,
    },

    #[error("{location}: {role} type {name} is not an interface")]
    Kind {
        role: Role,
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: {role} type {name} embeds {element} (only methods are allowed)")]
    EmbeddedElement {
        role: Role,
        name: String,
        element: String,
        location: SourceLocation,
    },

    #[error("{location}: the composite type {name} should have 1 method (has {count})")]
    MethodCount {
        name: String,
        count: usize,
        location: SourceLocation,
    },

    #[error("{location}: composite method {method} should have exactly 1 argument (has {count})")]
    Arity {
        method: String,
        count: usize,
        location: SourceLocation,
    },

    #[error("{location}: composite method {method} has wrong argument type {found} (should be {expected})")]
    ParamType {
        method: String,
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("{location}: {role} method {method} has {count} results (should have none)")]
    ResultCount {
        role: Role,
        method: String,
        count: usize,
        location: SourceLocation,
    },

    #[error("{location}: consumer method {method} has unnamed arguments")]
    UnnamedParam {
        method: String,
        location: SourceLocation,
    },

    #[error("{location}: consumer method {method} has argument {param} that can't be turned into an exported field name")]
    NonExportableName {
        method: String,
        param: String,
        location: SourceLocation,
    },

    #[error("{location}: consumer method {method} has argument {field} declared more than once")]
    DuplicateFieldName {
        method: String,
        field: String,
        location: SourceLocation,
    },

    #[error("{location}: consumer method {method} has variadic argument {param} (a struct field can't be variadic)")]
    VariadicParam {
        method: String,
        param: String,
        location: SourceLocation,
    },

    #[error("internal error while rendering generated code: {message}")]
    Render { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl GenError {
    /// Create a syntax error at the given location
    pub fn syntax(message: String, location: SourceLocation) -> Self {
        GenError::Syntax { location, message }
    }

    /// Create a render error
    pub fn render(message: String) -> Self {
        GenError::Render { message }
    }

    /// True for failures to read or parse the input package
    pub fn is_load_error(&self) -> bool {
        matches!(self, GenError::Load { .. } | GenError::Syntax { .. })
    }
}

impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> Self {
        GenError::Io {
            message: err.to_string(),
        }
    }
}

impl From<fmt::Error> for GenError {
    fn from(err: fmt::Error) -> Self {
        GenError::Render {
            message: err.to_string(),
        }
    }
}
