use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::StatsError;

/// One character row from a GNK-HXC roster export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
    /// Name of the player who ran the character (`Character Player`).
    pub player: String,
    /// Character class (`Class`).
    pub class: String,
    /// Level the character reached (`Level`).
    pub level: i64,
    /// What killed the character; `None` while the character is alive.
    pub cause_of_death: Option<String>,
}

impl CharacterRecord {
    /// Whether the character has died.
    pub fn is_dead(&self) -> bool {
        self.cause_of_death.is_some()
    }

    /// Whether the character is still alive.
    pub fn is_alive(&self) -> bool {
        self.cause_of_death.is_none()
    }
}

/// The loaded roster: header row plus typed records in input order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Column names in the order they appeared in the header row.
    pub headers: Vec<String>,
    /// Character records in input row order.
    pub records: Vec<CharacterRecord>,
}

impl RecordStore {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CharacterRecord] {
        &self.records
    }
}

// ── Column ────────────────────────────────────────────────────────────────────

/// The roster columns the analysis understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Player,
    Class,
    Level,
    CauseOfDeath,
}

impl Column {
    /// Every column a roster must provide, in canonical order.
    pub const REQUIRED: [Column; 4] = [
        Column::Player,
        Column::Class,
        Column::Level,
        Column::CauseOfDeath,
    ];

    /// The header text used for this column in the CSV export.
    pub fn header(self) -> &'static str {
        match self {
            Column::Player => "Character Player",
            Column::Class => "Class",
            Column::Level => "Level",
            Column::CauseOfDeath => "Cause of Death",
        }
    }

    /// Resolve a header name to a column.
    pub fn from_header(name: &str) -> Result<Self, StatsError> {
        Self::REQUIRED
            .into_iter()
            .find(|c| c.header() == name)
            .ok_or_else(|| StatsError::UnknownColumn(name.to_string()))
    }

    /// The raw cell value of this column for `record`.
    ///
    /// Living characters yield an empty cause of death, as in the export.
    pub fn value(self, record: &CharacterRecord) -> Cow<'_, str> {
        match self {
            Column::Player => Cow::Borrowed(record.player.as_str()),
            Column::Class => Cow::Borrowed(record.class.as_str()),
            Column::Level => Cow::Owned(record.level.to_string()),
            Column::CauseOfDeath => Cow::Borrowed(record.cause_of_death.as_deref().unwrap_or("")),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ── Fraction ──────────────────────────────────────────────────────────────────

/// An exact ratio kept in lowest terms with a positive denominator.
///
/// Both parts are `i128`, so level sums over any number of `i64` levels fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction {
    pub numerator: i128,
    pub denominator: i128,
}

impl Fraction {
    /// Build a reduced fraction. Returns `None` when `denominator` is zero.
    pub fn new(numerator: i128, denominator: i128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i128;
        let sign = denominator.signum();
        Some(Self {
            numerator: sign * (numerator / divisor),
            denominator: sign * (denominator / divisor),
        })
    }

    /// Largest integer not greater than the fraction.
    pub fn floor(&self) -> i128 {
        self.numerator.div_euclid(self.denominator)
    }

    /// The fraction scaled by 100 and truncated toward zero.
    pub fn percent(&self) -> i128 {
        self.numerator.saturating_mul(100) / self.denominator
    }

    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl From<i128> for Fraction {
    fn from(value: i128) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Whole parts first, then the remainders, so large sums never overflow.
        self.floor().cmp(&other.floor()).then_with(|| {
            let lhs = self.numerator.rem_euclid(self.denominator) * other.denominator;
            let rhs = other.numerator.rem_euclid(other.denominator) * self.denominator;
            lhs.cmp(&rhs)
        })
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

// ── SurvivalRate ──────────────────────────────────────────────────────────────

/// Living and total character counts for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurvivalRate {
    pub living: u64,
    pub total: u64,
}

impl SurvivalRate {
    /// Share of living characters as an exact fraction (`0/1` for no members).
    pub fn fraction(&self) -> Fraction {
        Fraction::new(i128::from(self.living), i128::from(self.total)).unwrap_or(Fraction::from(0))
    }

    /// Share of living characters in `[0.0, 1.0]`.
    pub fn rate(&self) -> f64 {
        self.fraction().as_f64()
    }
}

// ── DeadToLivingRatio ─────────────────────────────────────────────────────────

/// Global dead : living ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeadToLivingRatio {
    Defined(Fraction),
    /// Nobody is alive, so the ratio has no finite value.
    Undefined,
}

impl DeadToLivingRatio {
    pub fn new(dead: u64, living: u64) -> Self {
        match Fraction::new(i128::from(dead), i128::from(living)) {
            Some(fraction) => DeadToLivingRatio::Defined(fraction),
            None => DeadToLivingRatio::Undefined,
        }
    }
}

impl fmt::Display for DeadToLivingRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadToLivingRatio::Defined(fraction) => fmt::Display::fmt(fraction, f),
            DeadToLivingRatio::Undefined => f.write_str("undefined"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
