//! Channel-keyed modifier storage and resolution.

use super::types::{Modifier, ModifierSummary, ModifierTotals};
use std::collections::HashMap;

/// Holds every active modifier, grouped by channel.
///
/// A channel holds at most one modifier per source id; adding again from the
/// same source replaces the old one. Empty channels are dropped.
#[derive(Debug, Clone, Default)]
pub struct ModifierEngine {
    channels: HashMap<String, Vec<Modifier>>,
}

impl ModifierEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a modifier, replacing any existing one from the same source on this channel.
    pub fn add_modifier(&mut self, channel: &str, modifier: Modifier) {
        let list = self.channels.entry(channel.to_string()).or_default();
        match list.iter_mut().find(|m| m.source_id == modifier.source_id) {
            Some(existing) => *existing = modifier,
            None => list.push(modifier),
        }
    }

    /// Removes the modifier a source placed on a channel. No-op if absent.
    pub fn remove_modifier(&mut self, channel: &str, source_id: &str) {
        let Some(list) = self.channels.get_mut(channel) else {
            return;
        };
        list.retain(|m| m.source_id != source_id);
        if list.is_empty() {
            self.channels.remove(channel);
        }
    }

    /// Removes a source's modifiers from every channel.
    pub fn remove_all_from_source(&mut self, source_id: &str) {
        self.channels.retain(|_, list| {
            list.retain(|m| m.source_id != source_id);
            !list.is_empty()
        });
    }

    pub fn modifiers(&self, channel: &str) -> &[Modifier] {
        self.channels
            .get(channel)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn totals(&self, channel: &str) -> ModifierTotals {
        ModifierTotals::from_modifiers(self.modifiers(channel))
    }

    /// Final value of `base` after this channel's modifiers.
    pub fn resolve(&self, channel: &str, base: f64) -> f64 {
        self.totals(channel).apply(base)
    }

    /// Resolves `base` against the combined modifiers of several channels plus ad-hoc extras.
    pub fn resolve_channels(&self, channels: &[&str], base: f64, extra: &[Modifier]) -> f64 {
        let mut totals = ModifierTotals::default();
        for channel in channels {
            for modifier in self.modifiers(channel) {
                totals.add(modifier);
            }
        }
        for modifier in extra {
            totals.add(modifier);
        }
        totals.apply(base)
    }

    pub fn summary(&self, channel: &str) -> ModifierSummary {
        let modifiers = self.modifiers(channel).to_vec();
        ModifierSummary {
            channel: channel.to_string(),
            totals: ModifierTotals::from_modifiers(&modifiers),
            modifiers,
        }
    }

    /// Channels with at least one modifier, sorted by name.
    pub fn active_channels(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.channels.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }
}
