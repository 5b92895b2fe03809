//! Roster metrics for HXC Stats.
//!
//! Each metric consumes a [`GroupedView`] (or the whole roster) and returns a
//! fresh [`MetricResult`] keyed in grouping order. Sorting is left to the
//! renderer.

use hxc_core::models::{CharacterRecord, Column, DeadToLivingRatio, RecordStore, SurvivalRate};
use hxc_core::settings::Section;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::aggregator::{group_by, group_by_key, Group, GroupedView};

/// Group key paired with its metric value, in grouping order.
pub type MetricResult<V> = Vec<(String, V)>;

// ── By-player metrics ─────────────────────────────────────────────────────────

/// NC: number of characters per group.
pub fn number_of_characters(view: &GroupedView<'_>) -> MetricResult<u64> {
    per_group(view, |g| g.len() as u64)
}

/// GLG: sum of levels per group.
pub fn gross_levels_gained(view: &GroupedView<'_>) -> MetricResult<i128> {
    per_group(view, |g| level_sum(g.records.iter().copied()))
}

/// HLC: highest level reached per group.
pub fn highest_character_level(view: &GroupedView<'_>) -> MetricResult<i64> {
    per_group(view, |g| {
        g.records
            .iter()
            .map(|r| r.level)
            .max()
            .unwrap_or_default()
    })
}

/// ACL: mean level per group, rounded down.
pub fn average_character_life(view: &GroupedView<'_>) -> MetricResult<i128> {
    per_group(view, |g| {
        floored_mean(level_sum(g.records.iter().copied()), g.len())
    })
}

/// MDL: mean level of dead characters per group, rounded down.
///
/// Groups without a single dead character score 0.
pub fn mean_death_level(view: &GroupedView<'_>) -> MetricResult<i128> {
    per_group(view, |g| {
        let dead: Vec<&CharacterRecord> =
            g.records.iter().copied().filter(|r| r.is_dead()).collect();
        floored_mean(level_sum(dead.iter().copied()), dead.len())
    })
}

/// The five by-player metrics computed from one grouping.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStats {
    pub number_of_characters: MetricResult<u64>,
    pub gross_levels_gained: MetricResult<i128>,
    pub highest_character_level: MetricResult<i64>,
    pub average_character_life: MetricResult<i128>,
    pub mean_death_level: MetricResult<i128>,
}

/// Group by `Character Player` and compute NC, GLG, HLC, ACL and MDL.
pub fn player_stats(records: &[CharacterRecord]) -> PlayerStats {
    let by_player = group_by(records, Column::Player);
    PlayerStats {
        number_of_characters: number_of_characters(&by_player),
        gross_levels_gained: gross_levels_gained(&by_player),
        highest_character_level: highest_character_level(&by_player),
        average_character_life: average_character_life(&by_player),
        mean_death_level: mean_death_level(&by_player),
    }
}

// ── Death metrics ─────────────────────────────────────────────────────────────

/// Global cause-of-death breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct DeathStats {
    /// Dead characters per non-empty cause of death, in first-seen order.
    pub causes: MetricResult<u64>,
    pub total_deaths: u64,
    pub total_alive: u64,
    pub dead_to_living_ratio: DeadToLivingRatio,
}

impl DeathStats {
    /// Total dead : total living, or [`DeadToLivingRatio::Undefined`] when
    /// nobody is alive.
    pub fn dead_to_living_ratio(&self) -> DeadToLivingRatio {
        self.dead_to_living_ratio
    }
}

/// Count deaths per cause. Characters without a cause count as alive.
pub fn death_stats(records: &[CharacterRecord]) -> DeathStats {
    let by_cause = group_by_key(records, |r| r.cause_of_death.as_deref().map(Cow::Borrowed));
    let causes = number_of_characters(&by_cause);

    let total_deaths: u64 = causes.iter().map(|(_, n)| n).sum();
    let total_alive = records.len() as u64 - total_deaths;
    let dead_to_living_ratio = DeadToLivingRatio::new(total_deaths, total_alive);

    if dead_to_living_ratio == DeadToLivingRatio::Undefined {
        warn!(
            "No living characters among {} records; dead-to-living ratio is undefined",
            records.len()
        );
    }
    debug!(
        "{} deaths across {} causes, {} alive",
        total_deaths,
        causes.len(),
        total_alive
    );

    DeathStats {
        causes,
        total_deaths,
        total_alive,
        dead_to_living_ratio,
    }
}

// ── By-class metrics ──────────────────────────────────────────────────────────

/// Share of living characters per group.
pub fn survival_rate(view: &GroupedView<'_>) -> MetricResult<SurvivalRate> {
    per_group(view, |g| SurvivalRate {
        living: g.records.iter().filter(|r| r.is_alive()).count() as u64,
        total: g.len() as u64,
    })
}

/// By-class section results.
#[derive(Debug, Clone, Serialize)]
pub struct ClassStats {
    pub survival_rate: MetricResult<SurvivalRate>,
}

/// Group by `Class` and compute each class's survival rate.
pub fn class_stats(records: &[CharacterRecord]) -> ClassStats {
    let by_class = group_by(records, Column::Class);
    ClassStats {
        survival_rate: survival_rate(&by_class),
    }
}

// ── Full analysis ─────────────────────────────────────────────────────────────

/// The selected report sections computed for one roster.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub total_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<DeathStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassStats>,
}

/// Run the metrics of every section in `sections` over `store`.
///
/// Unselected sections stay `None`. Each section does its own grouping.
pub fn analyze(store: &RecordStore, sections: &[Section]) -> Analysis {
    if store.is_empty() {
        warn!("Roster has no character records");
    }
    let records = store.records();
    let selected = |section: Section| sections.contains(&section);
    Analysis {
        total_records: store.len(),
        player: selected(Section::Player).then(|| player_stats(records)),
        death: selected(Section::Death).then(|| death_stats(records)),
        class: selected(Section::Class).then(|| class_stats(records)),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn per_group<V>(view: &GroupedView<'_>, metric: impl Fn(&Group<'_>) -> V) -> MetricResult<V> {
    view.iter().map(|g| (g.key.clone(), metric(g))).collect()
}

/// Summed as `i128`, so `i64` levels never overflow.
fn level_sum<'a>(records: impl Iterator<Item = &'a CharacterRecord>) -> i128 {
    records.map(|r| i128::from(r.level)).sum()
}

/// `floor(sum / count)`, or 0 when `count` is zero.
fn floored_mean(sum: i128, count: usize) -> i128 {
    if count == 0 {
        return 0;
    }
    sum.div_euclid(count as i128)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hxc_core::models::Fraction;

    fn record(player: &str, class: &str, level: i64, cause: Option<&str>) -> CharacterRecord {
        CharacterRecord {
            player: player.to_string(),
            class: class.to_string(),
            level,
            cause_of_death: cause.map(str::to_string),
        }
    }

    fn example() -> Vec<CharacterRecord> {
        vec![
            record("A", "Rogue", 5, None),
            record("A", "Rogue", 10, Some("Orc")),
            record("B", "Mage", 3, None),
        ]
    }

    fn larger_roster() -> Vec<CharacterRecord> {
        vec![
            record("Kim", "Fighter", 4, Some("Troll")),
            record("Lee", "Wizard", 9, None),
            record("Kim", "Wizard", 7, None),
            record("Max", "Fighter", 2, Some("Pit trap")),
            record("Lee", "Fighter", 12, Some("Troll")),
            record("Kim", "Cleric", 1, Some("Troll")),
            record("Max", "Cleric", 6, None),
        ]
    }

    fn pairs<V: Copy>(result: &MetricResult<V>) -> Vec<(&str, V)> {
        result.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    fn value<V: Copy>(result: &MetricResult<V>, key: &str) -> V {
        result.iter().find(|(k, _)| k == key).map(|(_, v)| *v).unwrap()
    }

    // ── Worked example ───────────────────────────────────────────────────────

    #[test]
    fn test_example_player_stats() {
        let stats = player_stats(&example());
        assert_eq!(pairs(&stats.number_of_characters), vec![("A", 2), ("B", 1)]);
        assert_eq!(pairs(&stats.gross_levels_gained), vec![("A", 15), ("B", 3)]);
        assert_eq!(pairs(&stats.highest_character_level), vec![("A", 10), ("B", 3)]);
        assert_eq!(pairs(&stats.average_character_life), vec![("A", 7), ("B", 3)]);
        assert_eq!(pairs(&stats.mean_death_level), vec![("A", 10), ("B", 0)]);
    }

    #[test]
    fn test_example_death_stats() {
        let stats = death_stats(&example());
        assert_eq!(pairs(&stats.causes), vec![("Orc", 1)]);
        assert_eq!(stats.total_deaths, 1);
        assert_eq!(stats.total_alive, 2);
        assert_eq!(
            stats.dead_to_living_ratio(),
            DeadToLivingRatio::Defined(Fraction::new(1, 2).unwrap())
        );
    }

    #[test]
    fn test_example_class_stats() {
        let stats = class_stats(&example());
        let rates: Vec<(&str, f64)> = stats
            .survival_rate
            .iter()
            .map(|(k, v)| (k.as_str(), v.rate()))
            .collect();
        assert_eq!(rates, vec![("Rogue", 0.5), ("Mage", 1.0)]);
    }

    // ── Properties ───────────────────────────────────────────────────────────

    #[test]
    fn test_nc_sums_to_record_count() {
        let records = larger_roster();
        let stats = player_stats(&records);
        let total: u64 = stats.number_of_characters.iter().map(|(_, n)| n).sum();
        assert_eq!(total, records.len() as u64);
    }

    #[test]
    fn test_glg_independent_of_row_order() {
        let records = larger_roster();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = player_stats(&records).gross_levels_gained;
        let backward = player_stats(&reversed).gross_levels_gained;
        for (player, glg) in &forward {
            assert_eq!(value(&backward, player), *glg);
        }
        assert_eq!(value(&forward, "Kim"), 12);
        assert_eq!(value(&forward, "Lee"), 21);
        assert_eq!(value(&forward, "Max"), 8);
    }

    #[test]
    fn test_acl_never_exceeds_hlc() {
        let stats = player_stats(&larger_roster());
        for (player, acl) in &stats.average_character_life {
            assert!(*acl <= i128::from(value(&stats.highest_character_level, player)));
        }
    }

    #[test]
    fn test_acl_floors() {
        let stats = player_stats(&larger_roster());
        // Kim: (4 + 7 + 1) / 3 = 4, Lee: (9 + 12) / 2 = 10.5
        assert_eq!(value(&stats.average_character_life, "Kim"), 4);
        assert_eq!(value(&stats.average_character_life, "Lee"), 10);
    }

    #[test]
    fn test_mdl_only_counts_dead() {
        let stats = player_stats(&larger_roster());
        // Kim: dead at 4 and 1 → floor(5 / 2)
        assert_eq!(value(&stats.mean_death_level, "Kim"), 2);
        assert_eq!(value(&stats.mean_death_level, "Lee"), 12);
        assert_eq!(value(&stats.mean_death_level, "Max"), 2);
    }

    #[test]
    fn test_mdl_zero_when_nobody_died() {
        let records = vec![record("Sol", "Bard", 4, None), record("Sol", "Bard", 8, None)];
        let stats = player_stats(&records);
        assert_eq!(value(&stats.mean_death_level, "Sol"), 0);
    }

    #[test]
    fn test_cause_counts_sum_to_deaths() {
        let records = larger_roster();
        let stats = death_stats(&records);
        let sum: u64 = stats.causes.iter().map(|(_, n)| n).sum();
        assert_eq!(sum, stats.total_deaths);
        assert_eq!(stats.total_deaths + stats.total_alive, records.len() as u64);
        assert_eq!(pairs(&stats.causes), vec![("Troll", 3), ("Pit trap", 1)]);
        assert_eq!(stats.dead_to_living_ratio().to_string(), "4/3");
    }

    #[test]
    fn test_survival_rates_within_unit_interval() {
        let stats = class_stats(&larger_roster());
        for (_, rate) in &stats.survival_rate {
            assert!((0.0..=1.0).contains(&rate.rate()));
        }
    }

    #[test]
    fn test_survival_rate_zero_when_class_wiped_out() {
        let records = vec![
            record("A", "Fighter", 3, Some("Troll")),
            record("B", "Fighter", 5, Some("Orc")),
            record("C", "Mage", 2, None),
        ];
        let stats = class_stats(&records);
        assert_eq!(value(&stats.survival_rate, "Fighter").rate(), 0.0);
        assert_eq!(value(&stats.survival_rate, "Mage").rate(), 1.0);
    }

    // ── Edge cases ───────────────────────────────────────────────────────────

    #[test]
    fn test_ratio_undefined_when_everyone_died() {
        let records = vec![
            record("A", "Fighter", 3, Some("Troll")),
            record("B", "Mage", 5, Some("Orc")),
        ];
        let stats = death_stats(&records);
        assert_eq!(stats.total_alive, 0);
        assert_eq!(stats.dead_to_living_ratio(), DeadToLivingRatio::Undefined);
    }

    #[test]
    fn test_ratio_zero_when_nobody_died() {
        let records = vec![record("A", "Fighter", 3, None)];
        let stats = death_stats(&records);
        assert!(stats.causes.is_empty());
        assert_eq!(stats.dead_to_living_ratio().to_string(), "0/1");
    }

    #[test]
    fn test_analyze_empty_store() {
        let analysis = analyze(&RecordStore::default(), &Section::ALL);
        assert_eq!(analysis.total_records, 0);
        assert!(analysis.player.unwrap().number_of_characters.is_empty());
        assert!(analysis.class.unwrap().survival_rate.is_empty());
        assert_eq!(
            analysis.death.unwrap().dead_to_living_ratio(),
            DeadToLivingRatio::Undefined
        );
    }

    #[test]
    fn test_analyze_runs_every_section() {
        let store = RecordStore {
            headers: Vec::new(),
            records: example(),
        };
        let analysis = analyze(&store, &Section::ALL);
        assert_eq!(analysis.total_records, 3);
        assert_eq!(analysis.player.unwrap().number_of_characters.len(), 2);
        assert_eq!(analysis.death.unwrap().total_deaths, 1);
        assert_eq!(analysis.class.unwrap().survival_rate.len(), 2);
    }

    #[test]
    fn test_analyze_skips_unselected_sections() {
        let store = RecordStore {
            headers: Vec::new(),
            records: example(),
        };
        let analysis = analyze(&store, &[Section::Class]);
        assert!(analysis.player.is_none());
        assert!(analysis.death.is_none());
        assert_eq!(analysis.class.unwrap().survival_rate.len(), 2);
    }

    #[test]
    fn test_negative_levels_floor_toward_negative_infinity() {
        let records = vec![record("A", "Rogue", -1, None), record("A", "Rogue", -2, None)];
        let stats = player_stats(&records);
        assert_eq!(value(&stats.average_character_life, "A"), -2);
    }

    #[test]
    fn test_level_sums_beyond_i64_do_not_overflow() {
        let records = vec![
            record("A", "Rogue", i64::MAX, None),
            record("A", "Rogue", i64::MAX, Some("Orc")),
            record("A", "Rogue", 1, Some("Orc")),
        ];
        let stats = player_stats(&records);
        let max = i128::from(i64::MAX);
        assert_eq!(value(&stats.gross_levels_gained, "A"), 2 * max + 1);
        // (2 * MAX + 1) / 3 and (MAX + 1) / 2, both floored.
        assert_eq!(value(&stats.average_character_life, "A"), (2 * max + 1) / 3);
        assert_eq!(value(&stats.mean_death_level, "A"), (max + 1) / 2);
        assert_eq!(value(&stats.highest_character_level, "A"), i64::MAX);
    }
}
