use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{DomainError, DomainResult};
use super::services::{next_month, previous_month};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A single habit entry inside a month bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub name: String,
    #[serde(default)]
    pub done: bool,
}

impl HabitRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
        }
    }
}

/// A (year, month) bucket identifier.
///
/// Rendered as `"<year>-<month>"` with no zero padding, which is also the
/// key format of the persisted JSON document.
///
/// # Examples
///
/// ```
/// use habitrack::domain::MonthKey;
///
/// let key = MonthKey::new(2025, 5).unwrap();
/// assert_eq!(key.to_string(), "2025-5");
/// assert_eq!("2025-5".parse::<MonthKey>().unwrap(), key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        let (year, month) = previous_month(self.year, self.month);
        Self { year, month }
    }

    pub fn next(&self) -> Self {
        let (year, month) = next_month(self.year, self.month);
        Self { year, month }
    }

    /// Human readable header text, e.g. `"May 2025"`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month() - 1) as usize], self.year())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonthKey(s.to_string());

        // Split on the last '-' so negative years still parse.
        let (year_str, month_str) = s.rsplit_once('-').ok_or_else(invalid)?;
        if month_str.is_empty() || month_str.starts_with('0') || month_str.starts_with('+') {
            return Err(invalid());
        }
        let year = year_str.parse::<i32>().map_err(|_| invalid())?;
        // Only the canonical spelling is a key; "+2025", "02025" and "-0" would alias another month.
        if year.to_string() != year_str {
            return Err(invalid());
        }
        let month = month_str.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Canonical string key for a (year, month) pair.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{}-{}", year, month)
}

/// In-memory mapping from month to its ordered habit list.
///
/// Mutators never fail: empty names and out-of-range indices are ignored and
/// reported through the returned `bool`. Reading a month that has never been
/// written yields an empty slice without creating a bucket.
///
/// # Examples
///
/// ```
/// use habitrack::domain::{HabitStore, MonthKey};
///
/// let mut store = HabitStore::default();
/// let may = MonthKey::new(2025, 5).unwrap();
///
/// store.add_habit(may, "Exercise");
/// store.mark_done(may, 0);
///
/// assert_eq!(store.list_habits(may).len(), 1);
/// assert!(store.list_habits(may)[0].done);
/// assert!(store.list_habits(may.next()).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitStore {
    months: BTreeMap<MonthKey, Vec<HabitRecord>>,
}

impl HabitStore {
    /// Appends a habit to the month, creating the bucket if needed.
    ///
    /// Returns `false` without touching the store when `name` is blank.
    pub fn add_habit(&mut self, key: MonthKey, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.months
            .entry(key)
            .or_default()
            .push(HabitRecord::new(name));
        true
    }

    /// Flags the record at `index` as done. Returns `false` if there is no such record.
    pub fn mark_done(&mut self, key: MonthKey, index: usize) -> bool {
        match self.months.get_mut(&key).and_then(|habits| habits.get_mut(index)) {
            Some(habit) => {
                habit.done = true;
                true
            }
            None => false,
        }
    }

    /// Removes the record at `index`, shifting later records up.
    pub fn delete_habit(&mut self, key: MonthKey, index: usize) -> Option<HabitRecord> {
        let habits = self.months.get_mut(&key)?;
        if index >= habits.len() {
            return None;
        }
        Some(habits.remove(index))
    }

    pub fn list_habits(&self, key: MonthKey) -> &[HabitRecord] {
        self.months.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_month(&self, key: MonthKey) -> bool {
        self.months.contains_key(&key)
    }

    /// Months that have a bucket, oldest first.
    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.months.keys().copied()
    }

    /// Number of month buckets.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

impl Serialize for HabitStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.months.len()))?;
        for (key, habits) in &self.months {
            map.serialize_entry(key, habits)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HabitStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{IgnoredAny, MapAccess, Visitor};

        struct MonthsVisitor;

        impl<'de> Visitor<'de> for MonthsVisitor {
            type Value = HabitStore;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of \"year-month\" keys to habit lists")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut months = BTreeMap::new();
                while let Some(raw_key) = access.next_key::<String>()? {
                    match raw_key.parse::<MonthKey>() {
                        Ok(key) => {
                            let habits = access.next_value::<Vec<HabitRecord>>()?;
                            months.insert(key, habits);
                        }
                        Err(e) => {
                            log::warn!("event=load_skip_key key={:?} reason={}", raw_key, e);
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(HabitStore { months })
            }
        }

        deserializer.deserialize_map(MonthsVisitor)
    }
}
