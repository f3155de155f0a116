use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// RawRow – one tokenized line
// ---------------------------------------------------------------------------

/// Fields of one source line, in column order, untyped.
pub type RawRow = Vec<String>;

// ---------------------------------------------------------------------------
// Row policy and per-row errors
// ---------------------------------------------------------------------------

/// What the record builder does with a row whose rates do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Keep the row; unparseable rates become NaN and flow into the sums.
    #[default]
    Propagate,
    /// Drop the row and carry on.
    Skip,
    /// Fail the whole load on the first bad row.
    Reject,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("year {0:?} is not an integer")]
    InvalidYear(String),
    #[error("{column} rate {text:?} is not a number")]
    InvalidRate { column: &'static str, text: String },
}

/// A row that did not make it into the dataset as a complete record.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    /// 1-based line number in the source text (the header is line 1).
    pub line: usize,
    pub error: RowError,
}

// ---------------------------------------------------------------------------
// Record – one country-year observation
// ---------------------------------------------------------------------------

/// Death rates (per 100,000) for one country and year.
///
/// Totals are computed on access from the three components.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub code: String,
    pub year: i32,
    pub ozone: f64,
    pub pollution: f64,
    pub particulate: f64,
}

impl Record {
    /// Build a record from the six fields `name, code, year, ozone,
    /// pollution, particulate`. Missing trailing fields read as empty text.
    pub fn from_fields(fields: &[String], policy: RowPolicy) -> Result<Self, RowError> {
        let field = move |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

        let year_text = field(2).trim();
        let year = year_text
            .parse::<i32>()
            .map_err(|_| RowError::InvalidYear(year_text.to_string()))?;

        Ok(Record {
            name: field(0).to_string(),
            code: field(1).to_string(),
            year,
            ozone: parse_rate(field(3), "ozone", policy)?,
            pollution: parse_rate(field(4), "pollution", policy)?,
            particulate: parse_rate(field(5), "particulate", policy)?,
        })
    }

    pub fn total_pollution(&self) -> f64 {
        self.pollution + self.particulate
    }

    pub fn total(&self) -> f64 {
        self.ozone + self.pollution + self.particulate
    }

    /// Whether every rate parsed to a finite number.
    pub fn is_complete(&self) -> bool {
        self.ozone.is_finite() && self.pollution.is_finite() && self.particulate.is_finite()
    }
}

fn parse_rate(text: &str, column: &'static str, policy: RowPolicy) -> Result<f64, RowError> {
    match text.trim().parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) if policy == RowPolicy::Propagate => Ok(f64::NAN),
        Err(_) => Err(RowError::InvalidRate {
            column,
            text: text.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Measure – which number of a record is charted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Total,
    TotalPollution,
    Particulate,
    Ozone,
    Pollution,
}

impl Measure {
    /// The measures drawn on the chart, back to front.
    pub const CHARTED: [Measure; 3] = [Measure::Total, Measure::TotalPollution, Measure::Particulate];

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Measure::Total => record.total(),
            Measure::TotalPollution => record.total_pollution(),
            Measure::Particulate => record.particulate,
            Measure::Ozone => record.ozone,
            Measure::Pollution => record.pollution,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Measure::Total => "All sources",
            Measure::TotalPollution => "Air pollution",
            Measure::Particulate => "Particulate matter",
            Measure::Ozone => "Ozone",
            Measure::Pollution => "Household pollution",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Series – values aligned with year labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    /// X-axis labels (years), same length as `values`.
    pub labels: Vec<i32>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices of NaN or infinite values.
    pub fn non_finite(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_finite())
            .map(|(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable snapshot produced by one load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Records built from the data rows, in source order.
    pub records: Vec<Record>,
    /// Rows dropped or degraded while building records.
    pub issues: Vec<RowIssue>,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str) -> Vec<String> {
        line.split(',').map(str::to_string).collect()
    }

    #[test]
    fn derives_totals_from_components() {
        let r = Record::from_fields(&fields("World,WLD,1990,10,5,5"), RowPolicy::Propagate).unwrap();
        assert_eq!(r.year, 1990);
        assert_eq!(r.total_pollution(), 10.0);
        assert_eq!(r.total(), 20.0);
        assert!(r.is_complete());
    }

    #[test]
    fn propagate_turns_bad_rates_into_nan() {
        let r = Record::from_fields(&fields("World,WLD,1990,abc,5,"), RowPolicy::Propagate).unwrap();
        assert!(r.ozone.is_nan());
        assert!(r.particulate.is_nan());
        assert!(r.total().is_nan());
        assert!(!r.is_complete());
    }

    #[test]
    fn short_row_reads_missing_fields_as_nan() {
        let r = Record::from_fields(&fields("World,WLD,1990,1"), RowPolicy::Propagate).unwrap();
        assert_eq!(r.ozone, 1.0);
        assert!(r.pollution.is_nan());
        assert!(r.total_pollution().is_nan());
    }

    #[test]
    fn skip_reports_the_offending_column() {
        let err = Record::from_fields(&fields("World,WLD,1990,1,x,2"), RowPolicy::Skip).unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidRate {
                column: "pollution",
                text: "x".into()
            }
        );
    }

    #[test]
    fn year_must_be_an_integer_under_every_policy() {
        for policy in [RowPolicy::Propagate, RowPolicy::Skip, RowPolicy::Reject] {
            let err = Record::from_fields(&fields("World,WLD,,1,2,3"), policy).unwrap_err();
            assert_eq!(err, RowError::InvalidYear(String::new()));
        }
    }

    #[test]
    fn measure_selects_record_values() {
        let r = Record::from_fields(&fields("A,AAA,2000,1,2,4"), RowPolicy::Reject).unwrap();
        let values: Vec<f64> = Measure::CHARTED.iter().map(|m| m.value(&r)).collect();
        assert_eq!(values, vec![7.0, 6.0, 4.0]);
        assert_eq!(Measure::Ozone.value(&r), 1.0);
        assert_eq!(Measure::Pollution.value(&r), 2.0);
    }

    #[test]
    fn series_lists_non_finite_indices() {
        let s = Series {
            labels: vec![1990, 1991, 1992],
            values: vec![1.0, f64::NAN, 3.0],
        };
        assert_eq!(s.non_finite().collect::<Vec<_>>(), vec![1]);
    }
}
