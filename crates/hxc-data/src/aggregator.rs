//! Order-preserving grouping of roster records.
//!
//! Every report section partitions the roster by one column; all of them go
//! through [`group_by_key`] so the grouping rules live in one place.

use std::borrow::Cow;
use std::collections::HashMap;

use hxc_core::error::Result;
use hxc_core::models::{CharacterRecord, Column};
use tracing::debug;

// ── Group ─────────────────────────────────────────────────────────────────────

/// The records sharing one key, in input order.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: String,
    pub records: Vec<&'a CharacterRecord>,
}

impl Group<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── GroupedView ───────────────────────────────────────────────────────────────

/// Records partitioned by key.
///
/// Groups iterate in the order their key was first seen.
#[derive(Debug, Clone, Default)]
pub struct GroupedView<'a> {
    groups: Vec<Group<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> GroupedView<'a> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Group<'a>> {
        self.groups.iter()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// The records for `key`, if any record had that value.
    pub fn get(&self, key: &str) -> Option<&[&'a CharacterRecord]> {
        self.index
            .get(key)
            .map(|&i| self.groups[i].records.as_slice())
    }

    fn push(&mut self, key: Cow<'_, str>, record: &'a CharacterRecord) {
        if let Some(&i) = self.index.get(key.as_ref()) {
            self.groups[i].records.push(record);
            return;
        }
        let key = key.into_owned();
        self.index.insert(key.clone(), self.groups.len());
        self.groups.push(Group {
            key,
            records: vec![record],
        });
    }
}

impl<'v, 'a> IntoIterator for &'v GroupedView<'a> {
    type Item = &'v Group<'a>;
    type IntoIter = std::slice::Iter<'v, Group<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Group `records` by the value of `column`.
pub fn group_by(records: &[CharacterRecord], column: Column) -> GroupedView<'_> {
    let view = group_by_key(records, |r| Some(column.value(r)));
    debug!("Grouped {} records into {} {} groups", records.len(), view.len(), column);
    view
}

/// Group `records` by the column with header `name`.
///
/// Fails with [`StatsError::UnknownColumn`](hxc_core::error::StatsError::UnknownColumn)
/// when `name` is not a roster column.
pub fn group_by_header<'a>(records: &'a [CharacterRecord], name: &str) -> Result<GroupedView<'a>> {
    let column = Column::from_header(name)?;
    Ok(group_by(records, column))
}

/// Generic grouping driver.
///
/// `key_fn` maps a record to its group key; records mapped to `None` are left
/// out of the view entirely.
pub fn group_by_key<'a, F>(records: &'a [CharacterRecord], key_fn: F) -> GroupedView<'a>
where
    F: Fn(&'a CharacterRecord) -> Option<Cow<'a, str>>,
{
    let mut view = GroupedView::default();
    for record in records {
        if let Some(key) = key_fn(record) {
            view.push(key, record);
        }
    }
    view
}

// ── Tests ─────────────────────────────────────────────────────────────────────
