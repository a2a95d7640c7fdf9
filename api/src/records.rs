//! Shared data model for the turnout dashboard.
//!
//! Everything here crosses the server/client boundary, so the types are plain
//! serde values. Dataset invariants are enforced on construction, and the
//! `try_from` round-trip on [`TurnoutDataset`] makes deserialization go
//! through the same checks.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The general elections covered by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Year {
    Y2014,
    Y2019,
    Y2024,
}

impl Year {
    pub const ALL: [Year; 3] = [Year::Y2014, Year::Y2019, Year::Y2024];

    pub fn as_u16(self) -> u16 {
        match self {
            Year::Y2014 => 2014,
            Year::Y2019 => 2019,
            Year::Y2024 => 2024,
        }
    }

    pub fn from_u16(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|year| year.as_u16() == value)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Raised when a year cell holds anything other than a covered election year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported election year {0}")]
pub struct UnknownYear(pub u16);

impl TryFrom<u16> for Year {
    type Error = UnknownYear;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Year::from_u16(value).ok_or(UnknownYear(value))
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.as_u16()
    }
}

/// Elector gender as tabulated by the Election Commission releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const BOTH: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Registered electors and votes polled for one constituency, year and gender.
///
/// Turnout ratios are never stored; they are derived at query time so that
/// aggregates stay elector-weighted instead of averaging percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnoutRecord {
    pub year: Year,
    pub constituency: String,
    pub gender: Gender,
    pub electors: u64,
    pub votes_polled: u64,
}

/// Why a record batch cannot be accepted as a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("dataset contains no records")]
    Empty,
    #[error("{constituency} {year}: duplicate {gender} record")]
    Duplicate {
        constituency: String,
        year: Year,
        gender: Gender,
    },
    #[error("{constituency} {year}: missing {gender} record")]
    MissingGender {
        constituency: String,
        year: Year,
        gender: Gender,
    },
    #[error("{constituency} {year} ({gender}): votes polled {votes_polled} exceed electors {electors}")]
    VotesExceedElectors {
        constituency: String,
        year: Year,
        gender: Gender,
        votes_polled: u64,
        electors: u64,
    },
}

/// A validated batch of [`TurnoutRecord`]s plus the selectable domains the
/// dashboard offers: constituencies in first-appearance order and the years
/// actually present, ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TurnoutRecord>", into = "Vec<TurnoutRecord>")]
pub struct TurnoutDataset {
    records: Vec<TurnoutRecord>,
    constituencies: Vec<String>,
    years: Vec<Year>,
}

impl TurnoutDataset {
    /// Validates and indexes a record batch.
    ///
    /// Accepted datasets are non-empty, have `votes_polled <= electors` on
    /// every record, and carry exactly one male and one female record per
    /// (constituency, year) pair.
    pub fn new(records: Vec<TurnoutRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut constituencies: Vec<String> = Vec::new();
        let mut years: Vec<Year> = Vec::new();
        let mut genders_seen: HashMap<(String, Year), [bool; 2]> = HashMap::new();

        for record in &records {
            if record.votes_polled > record.electors {
                return Err(DataError::VotesExceedElectors {
                    constituency: record.constituency.clone(),
                    year: record.year,
                    gender: record.gender,
                    votes_polled: record.votes_polled,
                    electors: record.electors,
                });
            }

            if !constituencies.contains(&record.constituency) {
                constituencies.push(record.constituency.clone());
            }
            if !years.contains(&record.year) {
                years.push(record.year);
            }

            let slot = match record.gender {
                Gender::Male => 0,
                Gender::Female => 1,
            };
            let seen = genders_seen
                .entry((record.constituency.clone(), record.year))
                .or_insert([false; 2]);
            if seen[slot] {
                return Err(DataError::Duplicate {
                    constituency: record.constituency.clone(),
                    year: record.year,
                    gender: record.gender,
                });
            }
            seen[slot] = true;
        }

        for ((constituency, year), seen) in &genders_seen {
            for (slot, gender) in Gender::BOTH.into_iter().enumerate() {
                if !seen[slot] {
                    return Err(DataError::MissingGender {
                        constituency: constituency.clone(),
                        year: *year,
                        gender,
                    });
                }
            }
        }

        years.sort();

        Ok(Self {
            records,
            constituencies,
            years,
        })
    }

    pub fn records(&self) -> &[TurnoutRecord] {
        &self.records
    }

    /// Constituency names in the order they first appear in the source file.
    pub fn constituencies(&self) -> &[String] {
        &self.constituencies
    }

    /// Election years present in the dataset, ascending.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn has_constituency(&self, name: &str) -> bool {
        self.constituencies.iter().any(|c| c == name)
    }

    pub fn has_year(&self, year: Year) -> bool {
        self.years.contains(&year)
    }
}

impl TryFrom<Vec<TurnoutRecord>> for TurnoutDataset {
    type Error = DataError;

    fn try_from(records: Vec<TurnoutRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<TurnoutDataset> for Vec<TurnoutRecord> {
    fn from(dataset: TurnoutDataset) -> Self {
        dataset.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(constituency: &str, year: Year, gender: Gender, electors: u64, votes: u64) -> TurnoutRecord {
        TurnoutRecord {
            year,
            constituency: constituency.to_string(),
            gender,
            electors,
            votes_polled: votes,
        }
    }

    fn pair(constituency: &str, year: Year) -> Vec<TurnoutRecord> {
        vec![
            rec(constituency, year, Gender::Male, 50_000, 30_000),
            rec(constituency, year, Gender::Female, 45_000, 29_000),
        ]
    }

    #[test]
    fn builds_domains_from_records() {
        let mut records = pair("Lucknow", Year::Y2019);
        records.extend(pair("Amethi", Year::Y2019));
        records.extend(pair("Lucknow", Year::Y2014));

        let dataset = TurnoutDataset::new(records).unwrap();
        // First-appearance order, not alphabetical.
        assert_eq!(dataset.constituencies(), ["Lucknow", "Amethi"]);
        // Ascending regardless of file order.
        assert_eq!(dataset.years(), [Year::Y2014, Year::Y2019]);
        assert!(dataset.has_constituency("Amethi"));
        assert!(!dataset.has_constituency("Jaipur"));
        assert!(!dataset.has_year(Year::Y2024));
    }

    #[test]
    fn rejects_empty_batch() {
        assert_eq!(TurnoutDataset::new(Vec::new()), Err(DataError::Empty));
    }

    #[test]
    fn rejects_votes_above_electors() {
        let mut records = pair("Lucknow", Year::Y2019);
        records.push(rec("Amethi", Year::Y2019, Gender::Male, 1_000, 1_001));
        records.push(rec("Amethi", Year::Y2019, Gender::Female, 1_000, 900));

        let err = TurnoutDataset::new(records).unwrap_err();
        assert!(matches!(err, DataError::VotesExceedElectors { votes_polled: 1_001, .. }));
    }

    #[test]
    fn rejects_duplicate_gender_rows() {
        let mut records = pair("Lucknow", Year::Y2019);
        records.push(rec("Lucknow", Year::Y2019, Gender::Male, 1, 0));

        let err = TurnoutDataset::new(records).unwrap_err();
        assert_eq!(
            err,
            DataError::Duplicate {
                constituency: "Lucknow".into(),
                year: Year::Y2019,
                gender: Gender::Male,
            }
        );
    }

    #[test]
    fn rejects_missing_gender_rows() {
        let records = vec![rec("Lucknow", Year::Y2019, Gender::Male, 1_000, 500)];

        let err = TurnoutDataset::new(records).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingGender {
                constituency: "Lucknow".into(),
                year: Year::Y2019,
                gender: Gender::Female,
            }
        );
    }

    #[test]
    fn deserialization_revalidates() {
        let dataset = TurnoutDataset::new(pair("Lucknow", Year::Y2019)).unwrap();
        let json = serde_json::to_string(&dataset).unwrap();
        let back: TurnoutDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);

        // A wire payload that breaks the per-record bound is refused.
        let bad = r#"[
            {"year":2019,"constituency":"Lucknow","gender":"male","electors":10,"votes_polled":20},
            {"year":2019,"constituency":"Lucknow","gender":"female","electors":10,"votes_polled":5}
        ]"#;
        assert!(serde_json::from_str::<TurnoutDataset>(bad).is_err());
    }

    #[test]
    fn year_wire_format_is_numeric() {
        assert_eq!(serde_json::to_string(&Year::Y2024).unwrap(), "2024");
        assert_eq!(serde_json::from_str::<Year>("2014").unwrap(), Year::Y2014);
        assert!(serde_json::from_str::<Year>("2021").is_err());
    }
}
