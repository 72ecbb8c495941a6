use anyhow::anyhow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::gestures::operation::Operation;
use crate::gestures::resolver::{GestureResolver, ResolvedAction, TouchEvent};
use crate::settings::GestureSettings;
use crate::store::KeyValueStore;

/// Carries out a performed operation (download, comment panel, ...).
pub trait ActionDispatcher: Send + Sync {
    fn dispatch(&self, operation: Operation) -> anyhow::Result<()>;
}

/// What the hooked native method should do after [`TouchInterceptor::before`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Proceed,
    /// Skip the native method and null its result.
    NullResult,
}

/// Runs ahead of the host's touch handler and applies the resolved action.
pub struct TouchInterceptor<S> {
    settings: GestureSettings<S>,
    dispatcher: Arc<dyn ActionDispatcher>,
}

impl<S: KeyValueStore> TouchInterceptor<S> {
    pub fn new(settings: GestureSettings<S>, dispatcher: Arc<dyn ActionDispatcher>) -> Self {
        Self {
            settings,
            dispatcher,
        }
    }

    pub fn settings(&self) -> &GestureSettings<S> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GestureSettings<S> {
        &mut self.settings
    }

    pub fn before(&self, event: &TouchEvent) -> HookOutcome {
        match GestureResolver::new(&self.settings).resolve(event) {
            ResolvedAction::PassThrough => HookOutcome::Proceed,
            ResolvedAction::Suppress => HookOutcome::NullResult,
            ResolvedAction::Perform(operation) => {
                if let Err(err) = self.dispatcher.dispatch(operation) {
                    tracing::error!(?err, %operation, "failed to dispatch gesture operation");
                }
                // Long press has no native default to veto.
                HookOutcome::Proceed
            }
        }
    }

    /// Wraps a native call: `None` means its result was nulled.
    pub fn intercept<T>(&self, event: &TouchEvent, native: impl FnOnce() -> T) -> Option<T> {
        match self.before(event) {
            HookOutcome::Proceed => Some(native()),
            HookOutcome::NullResult => None,
        }
    }
}

#[derive(Clone)]
pub struct MockActionDispatcher {
    state: Arc<MockDispatchState>,
}

#[derive(Default)]
struct MockDispatchState {
    failing: AtomicBool,
    dispatched: Mutex<Vec<Operation>>,
}

impl MockActionDispatcher {
    pub fn new() -> (Self, MockDispatchHandle) {
        let state = Arc::new(MockDispatchState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            MockDispatchHandle { state },
        )
    }
}

impl ActionDispatcher for MockActionDispatcher {
    fn dispatch(&self, operation: Operation) -> anyhow::Result<()> {
        let mut guard = self.state.dispatched.lock().map_err(|_| anyhow!("lock"))?;
        guard.push(operation);
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("dispatch of {operation} failed"));
        }
        Ok(())
    }
}

pub struct MockDispatchHandle {
    state: Arc<MockDispatchState>,
}

impl MockDispatchHandle {
    pub fn dispatched(&self) -> Vec<Operation> {
        match self.state.dispatched.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatched().len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }
}
