//! Settings session
//!
//! A session snapshots every declared key from its target once, collects
//! staged edits, and pushes them back on `commit`. The snapshot is never
//! refreshed; open a new session to observe committed values.
//!
//! Commit is best-effort: a key the target rejects is reported in the
//! [`CommitReport`] and does not stop the remaining keys. Nothing is rolled
//! back, and the staging area is emptied whatever the outcome.
//!
//! Sessions hold the target by `&mut`, so two live sessions cannot share a
//! target. Coordinating targets across processes is up to the caller.

use crate::error::{Result, SettingsError};
use crate::persistence::{export_named, NamedSettingsData, PersistenceResult};
use crate::schema::SettingSchema;
use crate::target::ConfigTarget;
use crate::value::{SettingKey, SettingValue};
use std::collections::BTreeMap;

/// Outcome of a commit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitReport {
    /// Keys the target accepted
    pub applied: Vec<SettingKey>,
    /// Keys the target rejected, with [`SettingsError::TargetSetFailed`]
    pub failures: Vec<(SettingKey, SettingsError)>,
}

impl CommitReport {
    /// True when every staged key was applied
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.applied.len() + self.failures.len()
    }
}

/// Pending-change tracker bound to one target
pub struct SettingsSession<'a, T: ConfigTarget + ?Sized> {
    schema: &'a SettingSchema,
    target: &'a mut T,
    current: BTreeMap<SettingKey, SettingValue>,
    pending: BTreeMap<SettingKey, SettingValue>,
}

impl<'a, T: ConfigTarget + ?Sized> SettingsSession<'a, T> {
    /// Snapshots every declared key from `target`
    ///
    /// Keys the target cannot read are recorded as absent; they read as the
    /// schema's fallback value.
    pub fn new(schema: &'a SettingSchema, target: &'a mut T) -> Self {
        let mut current = BTreeMap::new();
        for key in schema.keys() {
            match target.get(key.as_str()) {
                Ok(value) => {
                    current.insert(key.clone(), value);
                }
                Err(err) => {
                    tracing::debug!(key = %key, error = %err, "target has no value, using fallback");
                }
            }
        }

        tracing::debug!(
            declared = schema.len(),
            snapshotted = current.len(),
            "settings session opened"
        );

        Self {
            schema,
            target,
            current,
            pending: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &'a SettingSchema {
        self.schema
    }

    /// Read access to the bound target
    pub fn target(&self) -> &T {
        &*self.target
    }

    /// Snapshot value, or the kind fallback when the target had none
    pub fn current_value(&self, key: &str) -> Result<SettingValue> {
        self.schema.describe(key)?;
        match self.current.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.schema.fallback_value(key),
        }
    }

    /// Raw snapshot entry; `None` when the target had no value
    pub fn snapshot_value(&self, key: &str) -> Option<&SettingValue> {
        self.current.get(key)
    }

    /// Staged value if any, otherwise the current value
    pub fn effective_value(&self, key: &str) -> Result<SettingValue> {
        match self.pending.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.current_value(key),
        }
    }

    /// Stages `value` for `key`, replacing any earlier staged value
    ///
    /// Only the key is validated; use [`stage_checked`](Self::stage_checked)
    /// to also reject values of the wrong kind.
    pub fn stage(&mut self, key: &str, value: SettingValue) -> Result<()> {
        let descriptor = self.schema.describe(key)?;
        if value.kind() != descriptor.kind() {
            tracing::warn!(
                key = %key,
                expected = %descriptor.kind(),
                found = %value.kind(),
                "staging value of a different kind"
            );
        }
        self.pending.insert(descriptor.key().clone(), value);
        Ok(())
    }

    /// Stages `value` after checking kind and choice membership
    pub fn stage_checked(&mut self, key: &str, value: SettingValue) -> Result<()> {
        self.schema.check_value(key, &value)?;
        self.stage(key, value)
    }

    /// Stages several values; stages nothing if any key is undeclared
    pub fn stage_all<K: AsRef<str>>(
        &mut self,
        values: impl IntoIterator<Item = (K, SettingValue)>,
    ) -> Result<usize> {
        let values: Vec<(K, SettingValue)> = values.into_iter().collect();
        for (key, _) in &values {
            self.schema.describe(key.as_ref())?;
        }
        let count = values.len();
        for (key, value) in values {
            self.stage(key.as_ref(), value)?;
        }
        Ok(count)
    }

    /// Drops the staged value for `key`, returning it
    pub fn unstage(&mut self, key: &str) -> Option<SettingValue> {
        self.pending.remove(key)
    }

    pub fn staged_value(&self, key: &str) -> Option<&SettingValue> {
        self.pending.get(key)
    }

    /// True when `key` has a staged value different from its current value
    pub fn is_modified(&self, key: &str) -> bool {
        match self.pending.get(key) {
            Some(staged) => self.current_value(key).map_or(true, |current| &current != staged),
            None => false,
        }
    }

    /// Number of distinct staged keys
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Staged entries in key order
    pub fn pending(&self) -> impl Iterator<Item = (&SettingKey, &SettingValue)> {
        self.pending.iter()
    }

    /// Applies every staged value to the target, then clears the staging area
    pub fn commit(&mut self) -> CommitReport {
        let mut report = CommitReport::default();

        for (key, value) in core::mem::take(&mut self.pending) {
            match self.target.set(key.as_str(), value) {
                Ok(()) => report.applied.push(key),
                Err(source) => {
                    tracing::warn!(key = %key, error = %source, "target rejected setting");
                    report.failures.push((
                        key.clone(),
                        SettingsError::TargetSetFailed { key, source },
                    ));
                }
            }
        }

        tracing::info!(
            applied = report.applied.len(),
            failed = report.failures.len(),
            "settings committed"
        );
        report
    }

    /// Drops every staged value without touching the target
    pub fn discard(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            tracing::debug!(dropped, "staged settings discarded");
        }
        dropped
    }

    /// Snapshot merged with fallbacks, for every declared key
    pub fn current_values(&self) -> Result<BTreeMap<SettingKey, SettingValue>> {
        self.schema
            .keys()
            .map(|key| -> Result<(SettingKey, SettingValue)> {
                Ok((key.clone(), self.current_value(key.as_str())?))
            })
            .collect()
    }

    /// Current values overlaid with staged values, for every declared key
    pub fn effective_values(&self) -> Result<BTreeMap<SettingKey, SettingValue>> {
        self.schema
            .keys()
            .map(|key| -> Result<(SettingKey, SettingValue)> {
                Ok((key.clone(), self.effective_value(key.as_str())?))
            })
            .collect()
    }

    /// Named document of the snapshot (with fallbacks)
    pub fn export_current(&self) -> PersistenceResult<NamedSettingsData> {
        export_named(self.schema, &self.current_values()?)
    }

    /// Named document of what the form shows, staged edits included
    pub fn export_effective(&self) -> PersistenceResult<NamedSettingsData> {
        export_named(self.schema, &self.effective_values()?)
    }
}
