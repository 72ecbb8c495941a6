use thiserror::Error;

use crate::gestures::config::{decode, DecodeError, TriggerConfiguration};
use crate::gestures::operation::Operation;
use crate::gestures::trigger::{classify_quadrant, ClassificationError, TapKind, TriggerPosition};
use crate::settings::GestureSettings;
use crate::store::KeyValueStore;

/// Final touch data handed over by the interception layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
    pub is_double_tap: bool,
}

impl TouchEvent {
    pub fn long_press(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_double_tap: false,
        }
    }

    pub fn double_tap(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self {
            is_double_tap: true,
            ..Self::long_press(x, y, width, height)
        }
    }

    pub fn tap_kind(&self) -> TapKind {
        TapKind::from_double_tap(self.is_double_tap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Native behaviour runs untouched.
    PassThrough,
    /// Native result must be discarded.
    Suppress,
    /// Dispatch this operation.
    Perform(Operation),
}

/// Every step taken for one event, for callers that want to log or display
/// more than the final action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub position: TriggerPosition,
    pub decoded: Operation,
    pub effective: Operation,
    pub action: ResolvedAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Resolves an event against a configuration, returning any failure as a
/// value. Does not consult the enabled flag.
pub fn try_resolve(
    event: &TouchEvent,
    config: &TriggerConfiguration,
) -> Result<Resolution, ResolveError> {
    let scheme = config.scheme();
    let tap = event.tap_kind();
    let quadrant = classify_quadrant(event.x, event.y, event.width, event.height)?;
    let position = scheme.position(quadrant, tap);
    let decoded = decode(config, position)?;

    let effective = if tap.is_double_tap()
        && decoded.is_original()
        && scheme.double_tap_falls_back_to_like()
    {
        Operation::Like
    } else {
        decoded
    };

    Ok(Resolution {
        position,
        decoded,
        effective,
        action: terminal_action(tap, effective),
    })
}

fn terminal_action(tap: TapKind, operation: Operation) -> ResolvedAction {
    match tap {
        // The native double tap already likes the video.
        TapKind::DoubleTap => match operation {
            Operation::Like | Operation::Original => ResolvedAction::PassThrough,
            _ => ResolvedAction::Suppress,
        },
        TapKind::LongPress => {
            if operation.is_original() {
                ResolvedAction::PassThrough
            } else {
                ResolvedAction::Perform(operation)
            }
        }
    }
}

/// Fail-open resolution: disabled remapping and every error yield
/// [`ResolvedAction::PassThrough`].
pub fn resolve(
    event: &TouchEvent,
    config: &TriggerConfiguration,
    setting_enabled: bool,
) -> ResolvedAction {
    if !setting_enabled {
        return ResolvedAction::PassThrough;
    }
    match try_resolve(event, config) {
        Ok(resolution) => {
            if resolution.action != ResolvedAction::PassThrough {
                tracing::debug!(
                    position = %resolution.position,
                    operation = %resolution.effective,
                    action = ?resolution.action,
                    "gesture remapped"
                );
            }
            resolution.action
        }
        Err(err) => {
            tracing::debug!(%err, config = %config, "gesture resolution failed, passing through");
            ResolvedAction::PassThrough
        }
    }
}

/// Resolves events against whatever the settings hold at call time.
pub struct GestureResolver<'a, S> {
    settings: &'a GestureSettings<S>,
}

impl<'a, S: KeyValueStore> GestureResolver<'a, S> {
    pub fn new(settings: &'a GestureSettings<S>) -> Self {
        Self { settings }
    }

    pub fn resolve(&self, event: &TouchEvent) -> ResolvedAction {
        if !self.settings.is_enabled() {
            return ResolvedAction::PassThrough;
        }
        match self.settings.trigger_configuration() {
            Ok(config) => resolve(event, &config, true),
            Err(err) => {
                tracing::warn!(%err, "unreadable trigger settings, passing through");
                ResolvedAction::PassThrough
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::trigger::Scheme;

    #[test]
    fn double_tap_without_assignment_reports_like_fallback() {
        let config = TriggerConfiguration::default();
        let resolution = try_resolve(&TouchEvent::double_tap(10.0, 10.0, 100, 100), &config)
            .unwrap();
        assert_eq!(resolution.position, TriggerPosition::DoubleLeftTop);
        assert_eq!(resolution.decoded, Operation::Original);
        assert_eq!(resolution.effective, Operation::Like);
        assert_eq!(resolution.action, ResolvedAction::PassThrough);
    }

    #[test]
    fn legacy_scheme_has_no_fallback() {
        let config = TriggerConfiguration::default_for(Scheme::Legacy);
        let resolution = try_resolve(&TouchEvent::double_tap(90.0, 90.0, 100, 100), &config)
            .unwrap();
        assert_eq!(resolution.position, TriggerPosition::DoubleClick);
        assert_eq!(resolution.effective, Operation::Original);
        assert_eq!(resolution.action, ResolvedAction::PassThrough);
    }

    #[test]
    fn terminal_policy_by_tap_kind() {
        assert_eq!(
            terminal_action(TapKind::LongPress, Operation::Like),
            ResolvedAction::Perform(Operation::Like)
        );
        assert_eq!(
            terminal_action(TapKind::DoubleTap, Operation::Like),
            ResolvedAction::PassThrough
        );
        assert_eq!(
            terminal_action(TapKind::DoubleTap, Operation::Comment),
            ResolvedAction::Suppress
        );
        assert_eq!(
            terminal_action(TapKind::LongPress, Operation::Original),
            ResolvedAction::PassThrough
        );
    }
}
