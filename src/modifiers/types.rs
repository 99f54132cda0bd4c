use serde::{Deserialize, Serialize};

/// How a modifier combines with a base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierKind {
    /// Added to the base before scaling
    Flat,
    /// Multiplies by `1 + sum`
    Percentage,
    /// Divides by `1 + sum` (speed-ups on durations)
    InversePercentage,
}

/// A named contribution to a channel. One per source per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub source_id: String,
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    pub value: f64,
}

impl Modifier {
    pub fn new(source_id: impl Into<String>, kind: ModifierKind, value: f64) -> Self {
        Self {
            source_id: source_id.into(),
            kind,
            value,
        }
    }

    pub fn flat(source_id: impl Into<String>, value: f64) -> Self {
        Self::new(source_id, ModifierKind::Flat, value)
    }

    pub fn percentage(source_id: impl Into<String>, value: f64) -> Self {
        Self::new(source_id, ModifierKind::Percentage, value)
    }

    pub fn inverse_percentage(source_id: impl Into<String>, value: f64) -> Self {
        Self::new(source_id, ModifierKind::InversePercentage, value)
    }
}

/// Per-kind sums for a set of modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifierTotals {
    pub flat: f64,
    pub percentage: f64,
    pub inverse_percentage: f64,
}

impl ModifierTotals {
    pub fn add(&mut self, modifier: &Modifier) {
        match modifier.kind {
            ModifierKind::Flat => self.flat += modifier.value,
            ModifierKind::Percentage => self.percentage += modifier.value,
            ModifierKind::InversePercentage => self.inverse_percentage += modifier.value,
        }
    }

    pub fn from_modifiers<'a>(modifiers: impl IntoIterator<Item = &'a Modifier>) -> Self {
        let mut totals = Self::default();
        for modifier in modifiers {
            totals.add(modifier);
        }
        totals
    }

    /// `(base + flat) * (1 + percentage) / (1 + inverse)` with the inverse sum floored at zero.
    pub fn apply(&self, base: f64) -> f64 {
        let inverse = if self.inverse_percentage < 0.0 {
            tracing::warn!(
                inverse_percentage = self.inverse_percentage,
                "negative inverse-percentage sum clamped to zero"
            );
            0.0
        } else {
            self.inverse_percentage
        };
        (base + self.flat) * (1.0 + self.percentage) / (1.0 + inverse)
    }
}

/// Breakdown of a channel for display and debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSummary {
    pub channel: String,
    pub totals: ModifierTotals,
    pub modifiers: Vec<Modifier>,
}
