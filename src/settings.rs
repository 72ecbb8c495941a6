use crate::gestures::config::{ConfigError, TriggerConfiguration};
use crate::gestures::operation::Operation;
use crate::gestures::trigger::{Scheme, TriggerPosition};
use crate::store::KeyValueStore;

/// Whether gesture remapping is switched on.
pub const ENABLED_KEY: &str = "isTriggerType";
/// Digit string, one operation per trigger position.
pub const TRIGGER_KEY: &str = "triggerOperate";
/// Schema version the digit string was written under.
pub const SCHEMA_KEY: &str = "triggerSchema";

/// Immutable view of the gesture settings for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureSnapshot {
    pub enabled: bool,
    pub config: TriggerConfiguration,
}

/// Typed access to the gesture keys of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct GestureSettings<S> {
    store: S,
}

impl<S: KeyValueStore> GestureSettings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn is_enabled(&self) -> bool {
        self.store.get_bool(ENABLED_KEY, false)
    }

    pub fn set_enabled(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.store.put_bool(ENABLED_KEY, enabled)
    }

    /// Stored scheme. A store that never recorded one is on the current
    /// scheme.
    pub fn scheme(&self) -> Result<Scheme, ConfigError> {
        let current = Scheme::CURRENT.version().to_string();
        let raw = self.store.get_string(SCHEMA_KEY, &current);
        let version = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidSchemaTag(raw.clone()))?;
        Scheme::from_version(version).ok_or(ConfigError::UnknownSchema(version))
    }

    /// Stored digit string. Missing means every position keeps its native
    /// behaviour. A string whose length does not match the stored scheme was
    /// written under the other layout and is rejected; individual digits are
    /// left for the decoder to check.
    pub fn trigger_configuration(&self) -> Result<TriggerConfiguration, ConfigError> {
        let scheme = self.scheme()?;
        let code = self.store.get_string(TRIGGER_KEY, &scheme.default_code());
        let expected = scheme.position_count();
        let found = code.chars().count();
        if found != expected {
            return Err(ConfigError::WrongLength { expected, found });
        }
        Ok(TriggerConfiguration::new(scheme, code))
    }

    /// Validates `config` and persists it along with its schema version.
    pub fn set_trigger_configuration(
        &mut self,
        config: &TriggerConfiguration,
    ) -> anyhow::Result<()> {
        config.validate()?;
        let fallback = self.scheme().map(Scheme::default_code).unwrap_or_default();
        let previous = self.store.get_string(TRIGGER_KEY, &fallback);
        self.store.put_string(TRIGGER_KEY, config.code())?;
        if let Err(err) = self
            .store
            .put_string(SCHEMA_KEY, &config.scheme().version().to_string())
        {
            if let Err(rollback) = self.store.put_string(TRIGGER_KEY, &previous) {
                tracing::warn!(?rollback, "failed to restore trigger configuration");
            }
            return Err(err);
        }
        tracing::debug!(config = %config, scheme = ?config.scheme(), "saved trigger configuration");
        Ok(())
    }

    pub fn assign(
        &mut self,
        position: TriggerPosition,
        operation: Operation,
    ) -> anyhow::Result<()> {
        let mut config = self.trigger_configuration()?;
        config.assign(position, operation)?;
        self.set_trigger_configuration(&config)
    }

    /// Drops every assignment and records `scheme` as the stored layout.
    pub fn reset(&mut self, scheme: Scheme) -> anyhow::Result<()> {
        self.set_trigger_configuration(&TriggerConfiguration::default_for(scheme))
    }

    pub fn snapshot(&self) -> Result<GestureSnapshot, ConfigError> {
        Ok(GestureSnapshot {
            enabled: self.is_enabled(),
            config: self.trigger_configuration()?,
        })
    }

    /// One line per position, e.g. `Double tap top right: Download`.
    pub fn summary(&self) -> anyhow::Result<Vec<String>> {
        let config = self.trigger_configuration()?;
        Ok(config
            .assignments()?
            .into_iter()
            .map(|(position, operation)| format!("{position}: {operation}"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_when_store_is_empty() {
        let settings = GestureSettings::new(MemoryStore::new());
        let snapshot = settings.snapshot().unwrap();
        assert!(!snapshot.enabled);
        assert_eq!(snapshot.config, TriggerConfiguration::default());
        assert_eq!(snapshot.config.code(), "00000000");
    }

    #[test]
    fn garbage_schema_tag_is_reported() {
        let mut store = MemoryStore::new();
        store.put_string(SCHEMA_KEY, "two").unwrap();
        let settings = GestureSettings::new(store);
        assert_eq!(
            settings.scheme(),
            Err(ConfigError::InvalidSchemaTag("two".into()))
        );
    }
}
