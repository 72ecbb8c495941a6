use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("viewport {width}x{height} has a non-positive dimension")]
    InvalidViewport { width: i32, height: i32 },
    #[error("touch coordinate is not a number")]
    InvalidCoordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapKind {
    LongPress,
    DoubleTap,
}

impl TapKind {
    pub fn from_double_tap(is_double_tap: bool) -> Self {
        if is_double_tap {
            TapKind::DoubleTap
        } else {
            TapKind::LongPress
        }
    }

    pub fn is_double_tap(self) -> bool {
        matches!(self, TapKind::DoubleTap)
    }
}

/// Where on screen a gesture landed and how it was performed.
///
/// `DoubleClick` only exists in [`Scheme::Legacy`]; the quadrant-specific
/// double-tap variants only exist in [`Scheme::Regional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerPosition {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
    DoubleLeftTop,
    DoubleRightTop,
    DoubleLeftBottom,
    DoubleRightBottom,
    DoubleClick,
}

impl TriggerPosition {
    pub fn tap_kind(self) -> TapKind {
        match self {
            TriggerPosition::LeftTop
            | TriggerPosition::RightTop
            | TriggerPosition::LeftBottom
            | TriggerPosition::RightBottom => TapKind::LongPress,
            TriggerPosition::DoubleLeftTop
            | TriggerPosition::DoubleRightTop
            | TriggerPosition::DoubleLeftBottom
            | TriggerPosition::DoubleRightBottom
            | TriggerPosition::DoubleClick => TapKind::DoubleTap,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TriggerPosition::LeftTop => "Long press top left",
            TriggerPosition::RightTop => "Long press top right",
            TriggerPosition::LeftBottom => "Long press bottom left",
            TriggerPosition::RightBottom => "Long press bottom right",
            TriggerPosition::DoubleLeftTop => "Double tap top left",
            TriggerPosition::DoubleRightTop => "Double tap top right",
            TriggerPosition::DoubleLeftBottom => "Double tap bottom left",
            TriggerPosition::DoubleRightBottom => "Double tap bottom right",
            TriggerPosition::DoubleClick => "Double tap",
        }
    }
}

impl fmt::Display for TriggerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Versioned layout of the persisted trigger string.
///
/// Each scheme owns its own position table; the index a position occupies in
/// the digit string is listed explicitly here and never derived from enum
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Schema version 1: four long-press quadrants plus one undifferentiated
    /// double tap.
    Legacy,
    /// Schema version 2: four quadrants under long press and under double tap.
    Regional,
}

const LEGACY_POSITIONS: [TriggerPosition; 5] = [
    TriggerPosition::LeftTop,
    TriggerPosition::RightTop,
    TriggerPosition::LeftBottom,
    TriggerPosition::RightBottom,
    TriggerPosition::DoubleClick,
];

const REGIONAL_POSITIONS: [TriggerPosition; 8] = [
    TriggerPosition::LeftTop,
    TriggerPosition::RightTop,
    TriggerPosition::LeftBottom,
    TriggerPosition::RightBottom,
    TriggerPosition::DoubleLeftTop,
    TriggerPosition::DoubleRightTop,
    TriggerPosition::DoubleLeftBottom,
    TriggerPosition::DoubleRightBottom,
];

impl Scheme {
    pub const CURRENT: Scheme = Scheme::Regional;

    pub fn version(self) -> u32 {
        match self {
            Scheme::Legacy => 1,
            Scheme::Regional => 2,
        }
    }

    pub fn from_version(version: u32) -> Option<Self> {
        match version {
            1 => Some(Scheme::Legacy),
            2 => Some(Scheme::Regional),
            _ => None,
        }
    }

    /// Positions in persisted order.
    pub fn positions(self) -> &'static [TriggerPosition] {
        match self {
            Scheme::Legacy => &LEGACY_POSITIONS,
            Scheme::Regional => &REGIONAL_POSITIONS,
        }
    }

    pub fn position_count(self) -> usize {
        self.positions().len()
    }

    /// Digit index of `position`, or `None` when the position is not part of
    /// this scheme.
    pub fn index_of(self, position: TriggerPosition) -> Option<usize> {
        use TriggerPosition::*;
        match (self, position) {
            (_, LeftTop) => Some(0),
            (_, RightTop) => Some(1),
            (_, LeftBottom) => Some(2),
            (_, RightBottom) => Some(3),
            (Scheme::Legacy, DoubleClick) => Some(4),
            (Scheme::Regional, DoubleLeftTop) => Some(4),
            (Scheme::Regional, DoubleRightTop) => Some(5),
            (Scheme::Regional, DoubleLeftBottom) => Some(6),
            (Scheme::Regional, DoubleRightBottom) => Some(7),
            _ => None,
        }
    }

    pub fn position(self, quadrant: Quadrant, tap: TapKind) -> TriggerPosition {
        match (self, tap) {
            (_, TapKind::LongPress) => match quadrant {
                Quadrant::LeftTop => TriggerPosition::LeftTop,
                Quadrant::RightTop => TriggerPosition::RightTop,
                Quadrant::LeftBottom => TriggerPosition::LeftBottom,
                Quadrant::RightBottom => TriggerPosition::RightBottom,
            },
            (Scheme::Legacy, TapKind::DoubleTap) => TriggerPosition::DoubleClick,
            (Scheme::Regional, TapKind::DoubleTap) => match quadrant {
                Quadrant::LeftTop => TriggerPosition::DoubleLeftTop,
                Quadrant::RightTop => TriggerPosition::DoubleRightTop,
                Quadrant::LeftBottom => TriggerPosition::DoubleLeftBottom,
                Quadrant::RightBottom => TriggerPosition::DoubleRightBottom,
            },
        }
    }

    /// Whether an unassigned double tap falls back to a like.
    pub fn double_tap_falls_back_to_like(self) -> bool {
        matches!(self, Scheme::Regional)
    }

    /// All-zero string: every position keeps its native behaviour.
    pub fn default_code(self) -> String {
        "0".repeat(self.position_count())
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::CURRENT
    }
}

/// Picks the screen quadrant for a touch at `(x, y)`.
///
/// The midpoint belongs to the right and bottom halves. Coordinates outside
/// the viewport are accepted and land in whichever half their ratio falls.
pub fn classify_quadrant(
    x: f32,
    y: f32,
    width: i32,
    height: i32,
) -> Result<Quadrant, ClassificationError> {
    if width <= 0 || height <= 0 {
        return Err(ClassificationError::InvalidViewport { width, height });
    }
    let x_ratio = x / width as f32;
    let y_ratio = y / height as f32;
    if x_ratio.is_nan() || y_ratio.is_nan() {
        return Err(ClassificationError::InvalidCoordinate);
    }

    let left = x_ratio < 0.5;
    let top = y_ratio < 0.5;
    Ok(match (left, top) {
        (true, true) => Quadrant::LeftTop,
        (false, true) => Quadrant::RightTop,
        (true, false) => Quadrant::LeftBottom,
        (false, false) => Quadrant::RightBottom,
    })
}

/// Classifies a touch into a position of the canonical [`Scheme::Regional`]
/// layout.
pub fn classify(
    x: f32,
    y: f32,
    width: i32,
    height: i32,
    is_double_tap: bool,
) -> Result<TriggerPosition, ClassificationError> {
    let quadrant = classify_quadrant(x, y, width, height)?;
    Ok(Scheme::Regional.position(quadrant, TapKind::from_double_tap(is_double_tap)))
}
