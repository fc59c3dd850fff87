// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::fmt;

use thiserror::Error;

/// Entity and method an error originates from. Rendered as a prefix of
/// every error message, so the text alone identifies the call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub entity: &'static str,
    pub method: &'static str,
}

impl CallSite {
    pub const fn new(entity: &'static str, method: &'static str) -> Self {
        Self { entity, method }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity, self.method)
    }
}

/// Everything that can go wrong while collecting or verifying a
/// subscription configuration.
///
/// Consumers discover invalid configuration by inspecting the rendered
/// message of a single error, so the exact wording of these variants is a
/// contract, not incidental text.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Fewer positional arguments than the call requires.
    #[error("{call}: Needs {min} args but given {given}")]
    TooFewArgs { call: CallSite, min: usize, given: usize },

    /// More positional arguments than the call accepts.
    #[error("{call}: Takes {max} args but given {given}")]
    TooManyArgs { call: CallSite, max: usize, given: usize },

    /// An argument whose runtime type or shape does not match the
    /// parameter; echoes the offending value.
    #[error("{call}: Wrong argument at {position}. given {given}")]
    WrongType { call: CallSite, position: usize, given: String },

    /// An argument of the right type violating a domain rule.
    #[error("{call}: Wrong argument at {position}. {reason}")]
    BadValue { call: CallSite, position: usize, reason: String },

    /// A cross-field invariant violated at verification time.
    #[error("{entity} verify: {reason}")]
    Inconsistent { entity: &'static str, reason: String },

    /// A dynamic configuration call naming no known method.
    #[error("{entity}: unknown configuration call '{method}'")]
    UnknownCall { entity: &'static str, method: String },
}
