use local_storage::SettingsStore;
use tracing::debug;

use crate::context::SettingsContext;
use crate::{Result, SettingsError};

/// Owns the session's settings and hands them out explicitly.
///
/// Created uninitialized around a store; [`SettingsProvider::init`] performs the
/// one-time load. Access before that is a composition error and is reported as
/// [`SettingsError::Uninitialized`].
pub struct SettingsProvider {
    pending: Option<SettingsStore>,
    context: Option<SettingsContext>,
}

impl SettingsProvider {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            pending: Some(store),
            context: None,
        }
    }

    /// Construct and initialize in one step.
    pub fn ready(store: SettingsStore) -> Self {
        Self {
            pending: None,
            context: Some(SettingsContext::load(store)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    /// Load settings once. Later calls return the existing context untouched.
    pub fn init(&mut self) -> &mut SettingsContext {
        if let Some(store) = self.pending.take() {
            return self.context.insert(SettingsContext::load(store));
        }
        debug!("settings already initialized");
        match &mut self.context {
            Some(context) => context,
            None => unreachable!("provider keeps its store pending until initialized"),
        }
    }

    pub fn context(&self) -> Result<&SettingsContext> {
        self.context.as_ref().ok_or(SettingsError::Uninitialized)
    }

    pub fn context_mut(&mut self) -> Result<&mut SettingsContext> {
        self.context.as_mut().ok_or(SettingsError::Uninitialized)
    }
}
