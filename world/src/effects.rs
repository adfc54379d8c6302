//! Ledger of active power-up effects.

use std::time::Duration;

use bastion_core::{ActiveEffect, DefenderStats, PowerUpKind};

/// Insertion-ordered set of active effects, at most one per kind.
///
/// Effects are folded over base stats in the order they were first
/// activated. Refreshing an effect replaces its expiry in place and keeps its
/// position, so a refresh never reorders composition.
#[derive(Clone, Debug, Default)]
pub(crate) struct EffectLedger {
    entries: Vec<ActiveEffect>,
}

impl EffectLedger {
    /// Activates `kind` until `expires_at`, returning whether it was already active.
    pub(crate) fn activate(&mut self, kind: PowerUpKind, expires_at: Duration) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.kind == kind) {
            entry.expires_at = expires_at;
            return true;
        }

        self.entries.push(ActiveEffect { kind, expires_at });
        false
    }

    /// Removes `kind`, returning whether it was active.
    pub(crate) fn expire(&mut self, kind: PowerUpKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.kind != kind);
        self.entries.len() != before
    }

    pub(crate) fn entries(&self) -> &[ActiveEffect] {
        &self.entries
    }

    /// Folds every active effect over `base` in activation order.
    pub(crate) fn compose(&self, base: DefenderStats) -> DefenderStats {
        base.with_effects(self.entries.iter().map(|entry| entry.kind))
    }
}
