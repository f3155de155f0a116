use std::collections::{BTreeMap, HashSet};

use super::model::{Measure, Record, Series};

// ---------------------------------------------------------------------------
// YearGroups – year → records, keys in first-seen order
// ---------------------------------------------------------------------------

/// Records grouped by year.
///
/// `years` keeps keys in the order they first appear in the source; each
/// group keeps its records in source order.
#[derive(Debug, Clone, Default)]
pub struct YearGroups<'a> {
    years: Vec<i32>,
    groups: BTreeMap<i32, Vec<&'a Record>>,
}

impl<'a> YearGroups<'a> {
    pub fn from_records(records: &'a [Record]) -> Self {
        let mut out = YearGroups::default();
        for record in records {
            out.groups
                .entry(record.year)
                .or_insert_with(|| {
                    out.years.push(record.year);
                    Vec::new()
                })
                .push(record);
        }
        out
    }

    /// Years in first-seen order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn get(&self, year: i32) -> Option<&[&'a Record]> {
        self.groups.get(&year).map(Vec::as_slice)
    }

    /// `(year, records)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[&'a Record])> + '_ {
        self.years
            .iter()
            .map(|&year| (year, self.groups[&year].as_slice()))
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

// ---------------------------------------------------------------------------
// World mode
// ---------------------------------------------------------------------------

/// Sum `measure` over every record of each year, one value per year.
pub fn world_series(groups: &YearGroups<'_>, measure: Measure) -> Series {
    let mut series = Series::default();
    for (year, records) in groups.iter() {
        series.labels.push(year);
        series
            .values
            .push(records.iter().map(|r| measure.value(r)).sum());
    }
    series
}

// ---------------------------------------------------------------------------
// Country mode
// ---------------------------------------------------------------------------

/// Records whose `name` equals `name` exactly, in source order.
pub fn country_records<'a>(records: &'a [Record], name: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.name == name).collect()
}

/// One value per record, no summation.
pub fn country_series(records: &[&Record], measure: Measure) -> Series {
    Series {
        labels: records.iter().map(|r| r.year).collect(),
        values: records.iter().map(|r| measure.value(r)).collect(),
    }
}

/// Distinct country names in first-seen order, for the selector.
pub fn country_names(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect()
}
