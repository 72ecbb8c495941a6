pub mod config;
pub mod hook;
pub mod operation;
pub mod resolver;
pub mod trigger;

pub use config::{decode, ConfigError, DecodeError, TriggerConfiguration};
pub use hook::{
    ActionDispatcher, HookOutcome, MockActionDispatcher, MockDispatchHandle, TouchInterceptor,
};
pub use operation::Operation;
pub use resolver::{
    resolve, try_resolve, GestureResolver, Resolution, ResolveError, ResolvedAction, TouchEvent,
};
pub use trigger::{
    classify, classify_quadrant, ClassificationError, Quadrant, Scheme, TapKind, TriggerPosition,
};
