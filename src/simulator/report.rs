//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one simulated run, accumulated from tick events.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub completions: u64,
    pub level_ups: u64,
    /// Queue entries dropped for a level or material shortfall
    pub dropped_entries: u64,
    /// Simulated time with nothing to do
    pub idle_ms: f64,
    pub final_levels: BTreeMap<String, u32>,
    pub final_inventory: BTreeMap<String, u64>,
    pub chests_earned: BTreeMap<String, u64>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub hours: f64,

    pub avg_completions: f64,
    pub avg_level_ups: f64,
    pub avg_dropped_entries: f64,
    pub avg_idle_ms: f64,

    pub avg_final_level: BTreeMap<String, f64>,
    pub min_final_level: BTreeMap<String, u32>,
    pub max_final_level: BTreeMap<String, u32>,
    pub avg_items: BTreeMap<String, f64>,
    pub avg_chests_earned: BTreeMap<String, f64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average_maps<V: Copy + Into<f64>>(
    maps: impl Iterator<Item = BTreeMap<String, V>>,
    runs: f64,
) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for map in maps {
        for (key, value) in map {
            *totals.entry(key).or_insert(0.0) += value.into();
        }
    }
    for total in totals.values_mut() {
        *total /= runs;
    }
    totals
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, hours: f64) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs.max(1) as f64;

        let avg_completions = runs.iter().map(|r| r.completions as f64).sum::<f64>() / n;
        let avg_level_ups = runs.iter().map(|r| r.level_ups as f64).sum::<f64>() / n;
        let avg_dropped_entries = runs.iter().map(|r| r.dropped_entries as f64).sum::<f64>() / n;
        let avg_idle_ms = runs.iter().map(|r| r.idle_ms).sum::<f64>() / n;

        let avg_final_level = average_maps(runs.iter().map(|r| r.final_levels.clone()), n);
        let avg_items = average_maps(
            runs.iter().map(|r| {
                r.final_inventory
                    .iter()
                    .map(|(k, v)| (k.clone(), *v as f64))
                    .collect::<BTreeMap<String, f64>>()
            }),
            n,
        );
        let avg_chests_earned = average_maps(
            runs.iter().map(|r| {
                r.chests_earned
                    .iter()
                    .map(|(k, v)| (k.clone(), *v as f64))
                    .collect::<BTreeMap<String, f64>>()
            }),
            n,
        );

        let mut min_final_level = BTreeMap::new();
        let mut max_final_level = BTreeMap::new();
        for run in &runs {
            for (skill, level) in &run.final_levels {
                let min = min_final_level.entry(skill.clone()).or_insert(*level);
                *min = (*min).min(*level);
                let max = max_final_level.entry(skill.clone()).or_insert(*level);
                *max = (*max).max(*level);
            }
        }

        Self {
            num_runs,
            hours,
            avg_completions,
            avg_level_ups,
            avg_dropped_entries,
            avg_idle_ms,
            avg_final_level,
            min_final_level,
            max_final_level,
            avg_items,
            avg_chests_earned,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}, {:.1} simulated hours each\n\n",
            self.num_runs, self.hours
        ));

        report.push_str("── Activity ──\n");
        report.push_str(&format!("  Completions:      {:.1}\n", self.avg_completions));
        report.push_str(&format!("  Level ups:        {:.1}\n", self.avg_level_ups));
        report.push_str(&format!("  Dropped entries:  {:.1}\n", self.avg_dropped_entries));
        report.push_str(&format!(
            "  Idle time:        {:.1} min\n\n",
            self.avg_idle_ms / 60_000.0
        ));

        report.push_str("── Skills (avg / min / max) ──\n");
        for (skill, avg) in &self.avg_final_level {
            let min = self.min_final_level.get(skill).copied().unwrap_or(0);
            let max = self.max_final_level.get(skill).copied().unwrap_or(0);
            report.push_str(&format!("  {:<16} {:>6.1} {:>4} {:>4}\n", skill, avg, min, max));
        }
        report.push('\n');

        report.push_str("── Inventory (avg held at end) ──\n");
        for (item, avg) in &self.avg_items {
            report.push_str(&format!("  {:<16} {:>10.1}\n", item, avg));
        }
        report.push('\n');

        if !self.avg_chests_earned.is_empty() {
            report.push_str("── Chests earned ──\n");
            for (chest, avg) in &self.avg_chests_earned {
                report.push_str(&format!("  {:<16} {:>10.1}\n", chest, avg));
            }
            report.push('\n');
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
