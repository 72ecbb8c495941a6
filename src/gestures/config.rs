use std::fmt;

use thiserror::Error;

use crate::gestures::operation::Operation;
use crate::gestures::trigger::{Scheme, TriggerPosition};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{position:?} is not part of the schema version {} layout", .scheme.version())]
    SchemeMismatch {
        position: TriggerPosition,
        scheme: Scheme,
    },
    #[error("trigger configuration has {len} digits but position needs {required}")]
    ConfigurationTooShort { required: usize, len: usize },
    #[error("invalid operation digit {found:?} at index {index}")]
    InvalidDigit { index: usize, found: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("trigger configuration must have {expected} digits, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("{operation} cannot be stored under schema version {}", .scheme.version())]
    UnsupportedOperation { operation: Operation, scheme: Scheme },
    #[error("unknown trigger schema version {0}")]
    UnknownSchema(u32),
    #[error("trigger schema tag {0:?} is not a version number")]
    InvalidSchemaTag(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Persisted digit string together with the scheme it was written under.
///
/// One digit per position of the scheme, each naming an operation through
/// [`Operation::from_digit`]. Construction is unchecked so a corrupted stored
/// value still reaches the resolver, which fails open on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConfiguration {
    scheme: Scheme,
    code: String,
}

impl TriggerConfiguration {
    pub fn new(scheme: Scheme, code: impl Into<String>) -> Self {
        Self {
            scheme,
            code: code.into(),
        }
    }

    pub fn default_for(scheme: Scheme) -> Self {
        Self::new(scheme, scheme.default_code())
    }

    /// Builds a configuration and rejects it unless every digit is usable.
    pub fn parse(scheme: Scheme, code: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self::new(scheme, code);
        config.validate()?;
        Ok(config)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.scheme.position_count();
        let found = self.code.chars().count();
        if found != expected {
            return Err(ConfigError::WrongLength { expected, found });
        }
        for position in self.scheme.positions() {
            self.decode(*position)?;
        }
        Ok(())
    }

    pub fn decode(&self, position: TriggerPosition) -> Result<Operation, DecodeError> {
        decode(self, position)
    }

    /// Rewrites the digit for `position`. The rest of the string must already
    /// be valid so a corrupted value is never written back piecemeal.
    pub fn assign(
        &mut self,
        position: TriggerPosition,
        operation: Operation,
    ) -> Result<(), ConfigError> {
        self.validate()?;
        let index = self
            .scheme
            .index_of(position)
            .ok_or(DecodeError::SchemeMismatch {
                position,
                scheme: self.scheme,
            })?;
        let digit = operation
            .to_digit(self.scheme)
            .and_then(|d| char::from_digit(d, 10))
            .ok_or(ConfigError::UnsupportedOperation {
                operation,
                scheme: self.scheme,
            })?;
        self.code = self
            .code
            .chars()
            .enumerate()
            .map(|(idx, ch)| if idx == index { digit } else { ch })
            .collect();
        Ok(())
    }

    /// Every position of the scheme with the operation assigned to it.
    pub fn assignments(&self) -> Result<Vec<(TriggerPosition, Operation)>, DecodeError> {
        self.scheme
            .positions()
            .iter()
            .map(|position| Ok((*position, self.decode(*position)?)))
            .collect()
    }
}

impl Default for TriggerConfiguration {
    fn default() -> Self {
        Self::default_for(Scheme::CURRENT)
    }
}

impl fmt::Display for TriggerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Looks up the operation stored for `position`.
///
/// Context free: the double tap fallback to [`Operation::Like`] is applied by
/// the resolver, not here.
pub fn decode(
    config: &TriggerConfiguration,
    position: TriggerPosition,
) -> Result<Operation, DecodeError> {
    let scheme = config.scheme;
    let index = scheme
        .index_of(position)
        .ok_or(DecodeError::SchemeMismatch { position, scheme })?;
    let found = match config.code.chars().nth(index) {
        Some(ch) => ch,
        None => {
            return Err(DecodeError::ConfigurationTooShort {
                required: index + 1,
                len: config.code.chars().count(),
            })
        }
    };
    found
        .to_digit(10)
        .and_then(|digit| Operation::from_digit(scheme, digit))
        .ok_or(DecodeError::InvalidDigit { index, found })
}
