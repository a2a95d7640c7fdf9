//! Spreadsheet ingestion for the turnout dataset.
//!
//! Native-only: the server reads the workbook once at startup and every later
//! consumer works from the validated [`TurnoutDataset`]. Two formats are
//! accepted, `.xlsx` workbooks and `.csv` exports, both carrying the same
//! column layout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::{debug, info};
use thiserror::Error;

use crate::records::{DataError, Gender, TurnoutDataset, TurnoutRecord, Year};

/// Path used when [`DATA_PATH_ENV`] is unset.
pub const DEFAULT_DATA_PATH: &str = "data/election_turnout.csv";

/// Environment variable overriding the spreadsheet location.
pub const DATA_PATH_ENV: &str = "TURNOUT_DATA";

const COL_CONSTITUENCY: &str = "Constituency";
const COL_YEAR: &str = "Year";
const COL_ELECTORS_MALE: &str = "Electors_Male";
const COL_ELECTORS_FEMALE: &str = "Electors_Female";
const COL_VOTES_MALE: &str = "Votes_Polled_Male";
const COL_VOTES_FEMALE: &str = "Votes_Polled_Female";

/// Why the dataset could not be loaded. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },
    #[error("{path} has no worksheet to read")]
    NoWorksheet { path: PathBuf },
    #[error("cannot read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unsupported spreadsheet format `{extension}` (expected .csv or .xlsx)")]
    UnsupportedFormat { extension: String },
    #[error("spreadsheet has no header row")]
    NoHeader,
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {lineno}: {message}")]
    BadCell { lineno: usize, message: String },
    #[error(transparent)]
    Invalid(#[from] DataError),
}

impl LoadError {
    fn bad_cell(lineno: usize, message: impl Into<String>) -> Self {
        LoadError::BadCell {
            lineno,
            message: message.into(),
        }
    }
}

/// Resolves the spreadsheet path from the environment, falling back to the
/// bundled sample data.
pub fn data_path() -> PathBuf {
    std::env::var(DATA_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Reads, parses and validates the spreadsheet at `path`.
pub fn load_dataset(path: &Path) -> Result<TurnoutDataset, LoadError> {
    info!("loading turnout data from {}", path.display());

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let records = match extension.as_str() {
        "xlsx" | "xlsm" => read_xlsx(path)?,
        "csv" => read_csv(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };
    debug!("parsed {} turnout records", records.len());

    let dataset = TurnoutDataset::new(records)?;
    info!(
        "loaded {} constituencies across {} elections",
        dataset.constituencies().len(),
        dataset.years().len()
    );
    Ok(dataset)
}

/// Positions of the required columns within a header row. Matching is
/// case-insensitive; extra columns (state names, precomputed ratios) are
/// ignored.
#[derive(Debug)]
struct Columns {
    constituency: usize,
    year: usize,
    electors_male: usize,
    electors_female: usize,
    votes_male: usize,
    votes_female: usize,
}

impl Columns {
    fn locate<I>(header: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = String>,
    {
        let positions: HashMap<String, usize> = header
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_ascii_lowercase(), idx))
            .collect();
        debug!("header columns: {:?}", positions);

        let find = |name: &'static str| {
            positions
                .get(&name.to_ascii_lowercase())
                .copied()
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Columns {
            constituency: find(COL_CONSTITUENCY)?,
            year: find(COL_YEAR)?,
            electors_male: find(COL_ELECTORS_MALE)?,
            electors_female: find(COL_ELECTORS_FEMALE)?,
            votes_male: find(COL_VOTES_MALE)?,
            votes_female: find(COL_VOTES_FEMALE)?,
        })
    }
}

/// One spreadsheet row, still gender-wide. Expands into the male and female
/// records the dataset stores.
struct RawRow {
    constituency: String,
    year: Year,
    electors_male: u64,
    electors_female: u64,
    votes_male: u64,
    votes_female: u64,
}

impl RawRow {
    fn into_records(self) -> [TurnoutRecord; 2] {
        [
            TurnoutRecord {
                year: self.year,
                constituency: self.constituency.clone(),
                gender: Gender::Male,
                electors: self.electors_male,
                votes_polled: self.votes_male,
            },
            TurnoutRecord {
                year: self.year,
                constituency: self.constituency,
                gender: Gender::Female,
                electors: self.electors_female,
                votes_polled: self.votes_female,
            },
        ]
    }
}

fn parse_year(lineno: usize, text: &str) -> Result<Year, LoadError> {
    let value = text
        .trim()
        .parse::<u16>()
        .map_err(|_| LoadError::bad_cell(lineno, format!("`{text}` is not a year")))?;
    Year::from_u16(value)
        .ok_or_else(|| LoadError::bad_cell(lineno, format!("unsupported election year {value}")))
}

fn parse_count(lineno: usize, column: &'static str, text: &str) -> Result<u64, LoadError> {
    text.trim().parse::<u64>().map_err(|_| {
        LoadError::bad_cell(lineno, format!("`{text}` is not a count in {column}"))
    })
}

fn read_xlsx(path: &Path) -> Result<Vec<TurnoutRecord>, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| LoadError::Workbook {
        path: path.to_owned(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_owned(),
        })?
        .map_err(|source| LoadError::Workbook {
            path: path.to_owned(),
            source,
        })?;
    parse_sheet(&range)
}

/// Parses an in-memory worksheet. Split out of [`read_xlsx`] so tests can run
/// against a synthetic [`Range`].
fn parse_sheet(range: &Range<DataType>) -> Result<Vec<TurnoutRecord>, LoadError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::NoHeader)?;
    let columns = Columns::locate(header.iter().map(cell_text))?;

    let mut records = Vec::new();
    for (idx, row) in rows.enumerate() {
        // Header is row 1 in spreadsheet terms.
        let lineno = idx + 2;
        if row.iter().all(|cell| matches!(cell, DataType::Empty)) {
            continue;
        }
        let raw = RawRow {
            constituency: sheet_string(lineno, row, columns.constituency)?,
            year: sheet_year(lineno, row, columns.year)?,
            electors_male: sheet_count(lineno, row, columns.electors_male, COL_ELECTORS_MALE)?,
            electors_female: sheet_count(
                lineno,
                row,
                columns.electors_female,
                COL_ELECTORS_FEMALE,
            )?,
            votes_male: sheet_count(lineno, row, columns.votes_male, COL_VOTES_MALE)?,
            votes_female: sheet_count(lineno, row, columns.votes_female, COL_VOTES_FEMALE)?,
        };
        records.extend(raw.into_records());
    }
    Ok(records)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sheet_string(lineno: usize, row: &[DataType], idx: usize) -> Result<String, LoadError> {
    match row.get(idx) {
        Some(DataType::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        other => Err(LoadError::bad_cell(
            lineno,
            format!("expected a constituency name, found {other:?}"),
        )),
    }
}

fn sheet_year(lineno: usize, row: &[DataType], idx: usize) -> Result<Year, LoadError> {
    match row.get(idx) {
        Some(DataType::Int(v)) if u16::try_from(*v).is_ok() => {
            let value = *v as u16;
            Year::from_u16(value).ok_or_else(|| {
                LoadError::bad_cell(lineno, format!("unsupported election year {value}"))
            })
        }
        Some(DataType::Float(v)) if v.fract() == 0.0 && *v >= 0.0 => {
            let value = *v as u16;
            Year::from_u16(value).ok_or_else(|| {
                LoadError::bad_cell(lineno, format!("unsupported election year {value}"))
            })
        }
        Some(DataType::String(s)) => parse_year(lineno, s),
        other => Err(LoadError::bad_cell(
            lineno,
            format!("expected a year, found {other:?}"),
        )),
    }
}

fn sheet_count(
    lineno: usize,
    row: &[DataType],
    idx: usize,
    column: &'static str,
) -> Result<u64, LoadError> {
    match row.get(idx) {
        Some(DataType::Int(v)) if *v >= 0 => Ok(*v as u64),
        Some(DataType::Float(v)) if v.fract() == 0.0 && *v >= 0.0 => Ok(*v as u64),
        Some(DataType::String(s)) => parse_count(lineno, column, s),
        other => Err(LoadError::bad_cell(
            lineno,
            format!("expected a count in {column}, found {other:?}"),
        )),
    }
}

fn read_csv(path: &Path) -> Result<Vec<TurnoutRecord>, LoadError> {
    let reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_owned(),
        source,
    })?;
    parse_csv(reader).map_err(|err| match err {
        // from_reader paths have no file name to report; fill it in here.
        LoadError::Csv { source, .. } => LoadError::Csv {
            path: path.to_owned(),
            source,
        },
        other => other,
    })
}

/// Parses an already-open CSV stream. Split out of [`read_csv`] so tests can
/// run against in-memory bytes.
fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<TurnoutRecord>, LoadError> {
    let header = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: PathBuf::new(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let columns = Columns::locate(header)?;

    let mut records = Vec::new();
    for (idx, line) in reader.records().enumerate() {
        let lineno = idx + 2;
        let line = line.map_err(|source| LoadError::Csv {
            path: PathBuf::new(),
            source,
        })?;

        let field = |col: usize, name: &'static str| {
            line.get(col)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| LoadError::bad_cell(lineno, format!("missing value for {name}")))
        };

        let raw = RawRow {
            constituency: field(columns.constituency, COL_CONSTITUENCY)?.to_string(),
            year: parse_year(lineno, field(columns.year, COL_YEAR)?)?,
            electors_male: parse_count(
                lineno,
                COL_ELECTORS_MALE,
                field(columns.electors_male, COL_ELECTORS_MALE)?,
            )?,
            electors_female: parse_count(
                lineno,
                COL_ELECTORS_FEMALE,
                field(columns.electors_female, COL_ELECTORS_FEMALE)?,
            )?,
            votes_male: parse_count(
                lineno,
                COL_VOTES_MALE,
                field(columns.votes_male, COL_VOTES_MALE)?,
            )?,
            votes_female: parse_count(
                lineno,
                COL_VOTES_FEMALE,
                field(columns.votes_female, COL_VOTES_FEMALE)?,
            )?,
        };
        records.extend(raw.into_records());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_SAMPLE: &str = "\
State,Constituency,Year,Electors_Male,Electors_Female,Votes_Polled_Male,Votes_Polled_Female,Turnout_Ratio_Total
Uttar Pradesh,Lucknow,2014,950000,870000,550000,490000,57.14
Uttar Pradesh,Lucknow,2019,990000,920000,590000,560000,60.21
";

    fn csv_reader(data: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn locates_columns_case_insensitively() {
        let header = ["constituency", "YEAR", "Electors_Male", "electors_female", "Votes_Polled_Male", "votes_polled_female"];
        let columns = Columns::locate(header.iter().map(|s| s.to_string())).unwrap();
        assert_eq!(columns.constituency, 0);
        assert_eq!(columns.votes_female, 5);
    }

    #[test]
    fn reports_first_missing_column() {
        let header = ["Constituency", "Year", "Electors_Male", "Electors_Female"];
        let err = Columns::locate(header.iter().map(|s| s.to_string())).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_VOTES_MALE)));
    }

    #[test]
    fn parses_csv_rows_into_gender_records() {
        let records = parse_csv(csv_reader(CSV_SAMPLE)).unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].constituency, "Lucknow");
        assert_eq!(records[0].gender, Gender::Male);
        assert_eq!(records[0].year, Year::Y2014);
        assert_eq!(records[0].electors, 950_000);
        assert_eq!(records[0].votes_polled, 550_000);

        assert_eq!(records[1].gender, Gender::Female);
        assert_eq!(records[1].electors, 870_000);
        assert_eq!(records[1].votes_polled, 490_000);

        // Extra columns (State, precomputed ratio) are ignored.
        let dataset = TurnoutDataset::new(records).unwrap();
        assert_eq!(dataset.constituencies(), ["Lucknow"]);
        assert_eq!(dataset.years(), [Year::Y2014, Year::Y2019]);
    }

    #[test]
    fn rejects_unknown_year_in_csv() {
        let data = "\
Constituency,Year,Electors_Male,Electors_Female,Votes_Polled_Male,Votes_Polled_Female
Lucknow,2021,10,10,5,5
";
        let err = parse_csv(csv_reader(data)).unwrap_err();
        assert!(matches!(err, LoadError::BadCell { lineno: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_count_in_csv() {
        let data = "\
Constituency,Year,Electors_Male,Electors_Female,Votes_Polled_Male,Votes_Polled_Female
Lucknow,2014,10,10,many,5
";
        let err = parse_csv(csv_reader(data)).unwrap_err();
        match err {
            LoadError::BadCell { lineno, message } => {
                assert_eq!(lineno, 2);
                assert!(message.contains(COL_VOTES_MALE));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn sheet(rows: &[[DataType; 6]]) -> Range<DataType> {
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, 5));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn header_row() -> [DataType; 6] {
        [
            DataType::String("Constituency".into()),
            DataType::String("Year".into()),
            DataType::String("Electors_Male".into()),
            DataType::String("Electors_Female".into()),
            DataType::String("Votes_Polled_Male".into()),
            DataType::String("Votes_Polled_Female".into()),
        ]
    }

    #[test]
    fn parses_worksheet_rows_with_numeric_cells() {
        let range = sheet(&[
            header_row(),
            [
                DataType::String("Varanasi".into()),
                DataType::Float(2024.0),
                DataType::Float(1_000_000.0),
                DataType::Int(900_000),
                DataType::Float(620_000.0),
                DataType::Int(560_000),
            ],
        ]);

        let records = parse_sheet(&range).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, Year::Y2024);
        assert_eq!(records[0].electors, 1_000_000);
        assert_eq!(records[1].gender, Gender::Female);
        assert_eq!(records[1].votes_polled, 560_000);
    }

    #[test]
    fn rejects_negative_count_cell() {
        let range = sheet(&[
            header_row(),
            [
                DataType::String("Varanasi".into()),
                DataType::Int(2024),
                DataType::Int(-5),
                DataType::Int(10),
                DataType::Int(1),
                DataType::Int(1),
            ],
        ]);

        let err = parse_sheet(&range).unwrap_err();
        assert!(matches!(err, LoadError::BadCell { lineno: 2, .. }));
    }

    #[test]
    fn skips_fully_empty_worksheet_rows() {
        let range = sheet(&[
            header_row(),
            [
                DataType::Empty,
                DataType::Empty,
                DataType::Empty,
                DataType::Empty,
                DataType::Empty,
                DataType::Empty,
            ],
            [
                DataType::String("Varanasi".into()),
                DataType::Int(2014),
                DataType::Int(10),
                DataType::Int(10),
                DataType::Int(5),
                DataType::Int(5),
            ],
        ]);

        let records = parse_sheet(&range).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn load_dataset_rejects_unknown_extension() {
        let err = load_dataset(Path::new("data/turnout.ods")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn votes_above_electors_fail_validation_not_parsing() {
        let data = "\
Constituency,Year,Electors_Male,Electors_Female,Votes_Polled_Male,Votes_Polled_Female
Lucknow,2014,10,10,11,5
";
        let records = parse_csv(csv_reader(data)).unwrap();
        let err = TurnoutDataset::new(records).unwrap_err();
        assert!(matches!(err, DataError::VotesExceedElectors { .. }));
    }
}
