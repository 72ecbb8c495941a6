use std::fmt;

use crate::gestures::trigger::Scheme;

/// Semantic action a gesture resolves to.
///
/// The persisted digit for each variant comes from the per-scheme tables
/// below. Reordering variants here does not change stored configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Leave the native behaviour alone.
    Original,
    Like,
    Comment,
    Forward,
    Collect,
    Download,
    ModuleMenu,
    /// Digit 7 in [`Scheme::Regional`].
    VideoInfo,
    /// Digit 7 in [`Scheme::Legacy`].
    Pause,
}

const REGIONAL_DIGITS: [Operation; 8] = [
    Operation::Original,
    Operation::Like,
    Operation::Comment,
    Operation::Forward,
    Operation::Collect,
    Operation::Download,
    Operation::ModuleMenu,
    Operation::VideoInfo,
];

const LEGACY_DIGITS: [Operation; 8] = [
    Operation::Original,
    Operation::Like,
    Operation::Comment,
    Operation::Forward,
    Operation::Collect,
    Operation::Download,
    Operation::ModuleMenu,
    Operation::Pause,
];

impl Operation {
    /// Operations selectable under `scheme`, indexed by persisted digit.
    pub fn table(scheme: Scheme) -> &'static [Operation] {
        match scheme {
            Scheme::Legacy => &LEGACY_DIGITS,
            Scheme::Regional => &REGIONAL_DIGITS,
        }
    }

    pub fn variant_count(scheme: Scheme) -> usize {
        Self::table(scheme).len()
    }

    pub fn from_digit(scheme: Scheme, digit: u32) -> Option<Operation> {
        Self::table(scheme).get(digit as usize).copied()
    }

    pub fn to_digit(self, scheme: Scheme) -> Option<u32> {
        Self::table(scheme)
            .iter()
            .position(|op| *op == self)
            .map(|idx| idx as u32)
    }

    pub fn is_original(self) -> bool {
        matches!(self, Operation::Original)
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Original => "Original",
            Operation::Like => "Like",
            Operation::Comment => "Comment",
            Operation::Forward => "Forward",
            Operation::Collect => "Collect",
            Operation::Download => "Download",
            Operation::ModuleMenu => "Module menu",
            Operation::VideoInfo => "Video info",
            Operation::Pause => "Pause video",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
