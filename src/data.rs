use crate::config::LoadOptions;
use crate::error::{CatalogError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use memchr::memmem::Finder;
use polars::prelude::*;
use regex::Regex;
use rustc_hash::FxHashSet as HashSet;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static DURATION_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)").expect("duration pattern is a valid regex"));

const DATE_FORMATS: [&str; 5] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShowType {
    Movie,
    TvShow,
    Other(String),
}

impl ShowType {
    /// Blank values have no type.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            "Movie" => Some(ShowType::Movie),
            "TV Show" => Some(ShowType::TvShow),
            other => Some(ShowType::Other(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ShowType::Movie => "Movie",
            ShowType::TvShow => "TV Show",
            ShowType::Other(other) => other,
        }
    }
}

impl fmt::Display for ShowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShowType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Source columns, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ShowId,
    ShowType,
    Title,
    Director,
    Casts,
    Country,
    DateAdded,
    ReleaseYear,
    Rating,
    Duration,
    ListedIn,
    ShowDescription,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::ShowId,
        Field::ShowType,
        Field::Title,
        Field::Director,
        Field::Casts,
        Field::Country,
        Field::DateAdded,
        Field::ReleaseYear,
        Field::Rating,
        Field::Duration,
        Field::ListedIn,
        Field::ShowDescription,
    ];

    /// Accepted column names; the first one is canonical.
    pub fn column_names(self) -> &'static [&'static str] {
        match self {
            Field::ShowId => &["show_id"],
            Field::ShowType => &["show_type"],
            Field::Title => &["title"],
            Field::Director => &["director"],
            Field::Casts => &["casts"],
            Field::Country => &["country"],
            Field::DateAdded => &["date_added"],
            Field::ReleaseYear => &["release_year"],
            Field::Rating => &["rating"],
            Field::Duration => &["duration"],
            Field::ListedIn => &["listed_in", "genre"],
            Field::ShowDescription => &["show_description"],
        }
    }

    fn required(self) -> bool {
        matches!(self, Field::ShowId | Field::ShowType)
    }
}

// show_id,show_type,title,director,casts,country,date_added,
// release_year,rating,duration,listed_in,show_description
//
// Every cell as read from the file, before any cleaning.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub show_id: Option<String>,
    pub show_type: Option<String>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub casts: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
    pub show_description: Option<String>,
}

impl RawRecord {
    pub fn new(show_id: &str, show_type: &str) -> Self {
        RawRecord {
            show_id: Some(show_id.to_string()),
            show_type: Some(show_type.to_string()),
            ..Default::default()
        }
    }

    pub fn set(mut self, field: Field, value: &str) -> Self {
        *self.cell_mut(field) = Some(value.to_string());
        self
    }

    fn cell_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::ShowId => &mut self.show_id,
            Field::ShowType => &mut self.show_type,
            Field::Title => &mut self.title,
            Field::Director => &mut self.director,
            Field::Casts => &mut self.casts,
            Field::Country => &mut self.country,
            Field::DateAdded => &mut self.date_added,
            Field::ReleaseYear => &mut self.release_year,
            Field::Rating => &mut self.rating,
            Field::Duration => &mut self.duration,
            Field::ListedIn => &mut self.listed_in,
            Field::ShowDescription => &mut self.show_description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCatalog {
    pub show_id: Vec<Option<String>>,
    pub show_type: Vec<Option<String>>,
    pub title: Vec<Option<String>>,
    pub director: Vec<Option<String>>,
    pub casts: Vec<Option<String>>,
    pub country: Vec<Option<String>>,
    pub date_added: Vec<Option<String>>,
    pub release_year: Vec<Option<String>>,
    pub rating: Vec<Option<String>>,
    pub duration: Vec<Option<String>>,
    pub listed_in: Vec<Option<String>>,
    pub show_description: Vec<Option<String>>,
}

impl RawCatalog {
    pub fn len(&self) -> usize {
        self.show_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.show_id.is_empty()
    }

    pub fn push(&mut self, record: RawRecord) {
        self.show_id.push(record.show_id);
        self.show_type.push(record.show_type);
        self.title.push(record.title);
        self.director.push(record.director);
        self.casts.push(record.casts);
        self.country.push(record.country);
        self.date_added.push(record.date_added);
        self.release_year.push(record.release_year);
        self.rating.push(record.rating);
        self.duration.push(record.duration);
        self.listed_in.push(record.listed_in);
        self.show_description.push(record.show_description);
    }

    pub fn from_records(records: impl IntoIterator<Item = RawRecord>) -> Self {
        let mut raw = RawCatalog::default();
        for record in records {
            raw.push(record);
        }
        raw
    }

    /// Pulls the known columns out of a frame as strings. Optional columns
    /// that are absent read as all-missing.
    pub fn from_frame(df: &DataFrame, options: &LoadOptions) -> Result<Self> {
        let mut raw = RawCatalog::default();
        for field in Field::ALL {
            let mut values = None;
            for name in field.column_names() {
                if let Ok(column) = df.column(name) {
                    values = Some(string_values(column, options.lenient_encoding)?);
                    break;
                }
            }
            let values = match values {
                Some(values) => values,
                None if field.required() => {
                    return Err(CatalogError::MissingColumn(field.column_names()[0]));
                }
                None => {
                    log::debug!("column `{}` absent, treating as missing", field.column_names()[0]);
                    vec![None; df.height()]
                }
            };
            *raw.column_mut(field) = values;
        }
        Ok(raw)
    }

    fn column_mut(&mut self, field: Field) -> &mut Vec<Option<String>> {
        match field {
            Field::ShowId => &mut self.show_id,
            Field::ShowType => &mut self.show_type,
            Field::Title => &mut self.title,
            Field::Director => &mut self.director,
            Field::Casts => &mut self.casts,
            Field::Country => &mut self.country,
            Field::DateAdded => &mut self.date_added,
            Field::ReleaseYear => &mut self.release_year,
            Field::Rating => &mut self.rating,
            Field::Duration => &mut self.duration,
            Field::ListedIn => &mut self.listed_in,
            Field::ShowDescription => &mut self.show_description,
        }
    }
}

fn string_values(column: &Column, strip_replacement: bool) -> Result<Vec<Option<String>>> {
    let column = match column.dtype() {
        // timestamps keep only their calendar date
        DataType::Datetime(_, _) => column.cast(&DataType::Date)?.cast(&DataType::String)?,
        _ => column.cast(&DataType::String)?,
    };
    Ok(column
        .str()?
        .into_iter()
        .map(|opt| {
            opt.map(|s| {
                if strip_replacement && s.contains('\u{FFFD}') {
                    s.replace('\u{FFFD}', "")
                } else {
                    s.to_string()
                }
            })
        })
        .collect())
}

/// Reads the file into a frame. `.parquet` files go through the Parquet
/// reader, everything else is treated as delimited text with a header row.
pub fn read_frame(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    // surface unreadable paths as IO errors rather than parser errors
    std::fs::metadata(path)?;

    let is_parquet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        return Ok(ParquetReader::new(std::fs::File::open(path)?).finish()?);
    }

    let encoding = if options.lenient_encoding {
        CsvEncoding::LossyUtf8
    } else {
        CsvEncoding::Utf8
    };
    let separator = options.separator;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        // everything as text; typing happens during cleaning
        .with_infer_schema_length(Some(0))
        .map_parse_options(move |parse| parse.with_separator(separator).with_encoding(encoding))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Read, validate and clean a catalog file.
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Catalog> {
    let path = path.as_ref();
    log::debug!(
        "polars is configured to use {} threads",
        polars_core::POOL.current_num_threads()
    );
    let df = read_frame(path, options)?;
    log::info!("read {} rows from {}", df.height(), path.display());
    let raw = RawCatalog::from_frame(&df, options)?;
    Ok(Catalog::from_raw(&raw))
}

/// Cleaned catalog, one column per field. Rows are in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub show_id: Vec<String>,
    pub show_type: Vec<Option<ShowType>>,
    pub title: Vec<Option<String>>,
    pub director: Vec<Option<String>>,
    pub casts: Vec<Option<String>>,
    pub country: Vec<Option<String>>,
    pub date_added: Vec<Option<NaiveDate>>,
    pub release_year: Vec<Option<i32>>,
    pub rating: Vec<Option<String>>,
    pub duration: Vec<Option<String>>,
    pub duration_num: Vec<Option<u32>>,
    pub listed_in: Vec<Option<String>>,
    pub show_description: Vec<Option<String>>,
}

/// Borrowed view of one catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogRecord<'a> {
    pub show_id: &'a str,
    pub show_type: Option<&'a ShowType>,
    pub title: Option<&'a str>,
    pub director: Option<&'a str>,
    pub casts: Option<&'a str>,
    pub country: Option<&'a str>,
    pub date_added: Option<NaiveDate>,
    pub release_year: Option<i32>,
    pub rating: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub duration_num: Option<u32>,
    pub listed_in: Option<&'a str>,
    pub show_description: Option<&'a str>,
}

impl Catalog {
    /// Drops rows without `show_id`, keeps the first row of each `show_id`,
    /// and types the date, year and duration columns. Malformed cells,
    /// including a blank `show_type`, become `None`.
    pub fn from_raw(raw: &RawCatalog) -> Self {
        let mut catalog = Catalog::default();
        let mut seen: HashSet<String> = HashSet::default();
        let (mut missing_id, mut duplicates) = (0usize, 0usize);
        let (mut untyped, mut bad_dates) = (0usize, 0usize);

        for i in 0..raw.len() {
            let Some(show_id) = present(&raw.show_id[i]).map(str::trim) else {
                missing_id += 1;
                continue;
            };
            if !seen.insert(show_id.to_string()) {
                duplicates += 1;
                continue;
            }
            let show_type = raw.show_type[i].as_deref().and_then(ShowType::parse);
            if show_type.is_none() {
                untyped += 1;
            }

            let date_added = present(&raw.date_added[i]).and_then(|s| {
                let parsed = parse_date_added(s);
                if parsed.is_none() {
                    bad_dates += 1;
                }
                parsed
            });
            let duration = text(&raw.duration[i]);

            catalog.show_id.push(show_id.to_string());
            catalog.show_type.push(show_type);
            catalog.title.push(text(&raw.title[i]));
            catalog.director.push(text(&raw.director[i]));
            catalog.casts.push(text(&raw.casts[i]));
            catalog.country.push(text(&raw.country[i]));
            catalog.date_added.push(date_added);
            catalog
                .release_year
                .push(present(&raw.release_year[i]).and_then(parse_release_year));
            catalog.rating.push(text(&raw.rating[i]));
            catalog
                .duration_num
                .push(duration.as_deref().and_then(parse_duration_num));
            catalog.duration.push(duration);
            catalog.listed_in.push(text(&raw.listed_in[i]));
            catalog.show_description.push(text(&raw.show_description[i]));
        }

        if missing_id > 0 {
            log::warn!("dropped {missing_id} rows without show_id");
        }
        if untyped > 0 {
            log::warn!("{untyped} rows have no show_type");
        }
        if duplicates > 0 {
            log::debug!("dropped {duplicates} duplicate show_id rows");
        }
        if bad_dates > 0 {
            log::debug!("{bad_dates} date_added values could not be parsed");
        }
        log::info!("catalog holds {} titles", catalog.len());
        catalog
    }

    /// Back to raw text, in a form `from_raw` reads to the same catalog.
    pub fn to_raw(&self) -> RawCatalog {
        let texts = |column: &Vec<Option<String>>| column.clone();
        RawCatalog {
            show_id: self.show_id.iter().map(|id| Some(id.clone())).collect(),
            show_type: self
                .show_type
                .iter()
                .map(|t| t.as_ref().map(|t| t.as_str().to_string()))
                .collect(),
            title: texts(&self.title),
            director: texts(&self.director),
            casts: texts(&self.casts),
            country: texts(&self.country),
            date_added: self
                .date_added
                .iter()
                .map(|d| d.map(|d| d.format("%Y-%m-%d").to_string()))
                .collect(),
            release_year: self
                .release_year
                .iter()
                .map(|y| y.map(|y| y.to_string()))
                .collect(),
            rating: texts(&self.rating),
            duration: texts(&self.duration),
            listed_in: texts(&self.listed_in),
            show_description: texts(&self.show_description),
        }
    }

    pub fn len(&self) -> usize {
        self.show_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.show_id.is_empty()
    }

    pub fn record(&self, i: usize) -> CatalogRecord<'_> {
        CatalogRecord {
            show_id: &self.show_id[i],
            show_type: self.show_type[i].as_ref(),
            title: self.title[i].as_deref(),
            director: self.director[i].as_deref(),
            casts: self.casts[i].as_deref(),
            country: self.country[i].as_deref(),
            date_added: self.date_added[i],
            release_year: self.release_year[i],
            rating: self.rating[i].as_deref(),
            duration: self.duration[i].as_deref(),
            duration_num: self.duration_num[i],
            listed_in: self.listed_in[i].as_deref(),
            show_description: self.show_description[i].as_deref(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = CatalogRecord<'_>> {
        (0..self.len()).map(|i| self.record(i))
    }

    /// New catalog holding the given rows, in the given order.
    pub fn take(&self, rows: &[usize]) -> Catalog {
        fn pick<T: Clone>(column: &[T], rows: &[usize]) -> Vec<T> {
            rows.iter().map(|&i| column[i].clone()).collect()
        }
        Catalog {
            show_id: pick(&self.show_id, rows),
            show_type: pick(&self.show_type, rows),
            title: pick(&self.title, rows),
            director: pick(&self.director, rows),
            casts: pick(&self.casts, rows),
            country: pick(&self.country, rows),
            date_added: pick(&self.date_added, rows),
            release_year: pick(&self.release_year, rows),
            rating: pick(&self.rating, rows),
            duration: pick(&self.duration, rows),
            duration_num: pick(&self.duration_num, rows),
            listed_in: pick(&self.listed_in, rows),
            show_description: pick(&self.show_description, rows),
        }
    }
}

/// Null-safe substring test: a missing cell never matches.
pub(crate) fn cell_contains(cell: &Option<String>, finder: &Finder<'_>) -> bool {
    cell.as_deref()
        .is_some_and(|s| finder.find(s.as_bytes()).is_some())
}

fn present(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().filter(|s| !s.trim().is_empty())
}

fn text(cell: &Option<String>) -> Option<String> {
    present(cell).map(str::to_string)
}

pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

pub fn parse_release_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>().ok().or_else(|| {
        // float-typed exports write years as "2020.0"
        raw.parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() < i32::MAX as f64)
            .map(|y| y as i32)
    })
}

/// First run of ASCII digits: "90 min" -> 90, "3 Seasons" -> 3. A run too
/// large for `u32` is unknown.
pub fn parse_duration_num(raw: &str) -> Option<u32> {
    DURATION_DIGITS
        .find(raw)
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
pub(crate) fn catalog(records: impl IntoIterator<Item = RawRecord>) -> Catalog {
    Catalog::from_raw(&RawCatalog::from_records(records))
}

#[cfg(test)]
mod test_data {
    use super::*;

    #[test]
    fn drops_missing_ids_and_duplicates() {
        let db = catalog([
            RawRecord::new("s1", "Movie").set(Field::Title, "First"),
            RawRecord::new("s1", "Movie").set(Field::Title, "Again"),
            RawRecord {
                show_id: None,
                show_type: Some("Movie".into()),
                ..Default::default()
            },
            RawRecord::new("  ", "Movie"),
            RawRecord::new("s2", ""),
            RawRecord::new("s3", "TV Show"),
        ]);
        assert_eq!(db.show_id, vec!["s1", "s2", "s3"]);
        assert_eq!(db.title[0].as_deref(), Some("First"));
        assert_eq!(
            db.show_type,
            vec![Some(ShowType::Movie), None, Some(ShowType::TvShow)]
        );
    }

    #[test]
    fn untyped_rows_are_kept() {
        let db = catalog([
            RawRecord {
                show_id: Some("s1".into()),
                show_type: None,
                ..Default::default()
            }
            .set(Field::ListedIn, "Documentaries"),
            RawRecord::new("s2", "  ").set(Field::Director, "Someone"),
        ]);
        assert_eq!(db.show_id, vec!["s1", "s2"]);
        assert_eq!(db.show_type, vec![None, None]);
        assert_eq!(db.record(0).show_type, None);
        assert_eq!(db.listed_in[0].as_deref(), Some("Documentaries"));
    }

    #[test]
    fn malformed_cells_become_unknown() {
        let db = catalog([
            RawRecord::new("s1", "Movie")
                .set(Field::DateAdded, "not a date")
                .set(Field::ReleaseYear, "twenty")
                .set(Field::Duration, "unknown")
                .set(Field::Director, "   "),
            RawRecord::new("s2", "TV Show")
                .set(Field::DateAdded, " September 25, 2021")
                .set(Field::ReleaseYear, "2019.0")
                .set(Field::Duration, "3 Seasons"),
        ]);
        assert_eq!(db.date_added, vec![None, NaiveDate::from_ymd_opt(2021, 9, 25)]);
        assert_eq!(db.release_year, vec![None, Some(2019)]);
        assert_eq!(db.duration_num, vec![None, Some(3)]);
        assert_eq!(db.director, vec![None, None]);
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 9, 5);
        for raw in ["September 5, 2021", "Sep 5, 2021", "2021-09-05", "09/05/2021", "05-Sep-21"] {
            assert_eq!(parse_date_added(raw), expected, "{raw}");
        }
        assert_eq!(parse_date_added(""), None);
    }

    #[test]
    fn timestamps_keep_their_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 9, 25);
        for raw in [
            "2025-09-25 00:00:00",
            "2025-09-25T10:00:00",
            "2025-09-25 00:00:00.000",
            "2025-09-25T23:59:59.123456",
        ] {
            assert_eq!(parse_date_added(raw), expected, "{raw}");
        }
        assert_eq!(parse_date_added("2025-09-25 25:00:00"), None);
    }

    #[test]
    fn duration_takes_first_number() {
        assert_eq!(parse_duration_num("90 min"), Some(90));
        assert_eq!(parse_duration_num("1 Season"), Some(1));
        assert_eq!(parse_duration_num("min"), None);
    }

    #[test]
    fn duration_reads_ascii_digits_only() {
        assert_eq!(parse_duration_num("\u{ff11}\u{ff12}\u{ff10} min"), None);
        assert_eq!(parse_duration_num("\u{ff11}\u{ff12} / 95 min"), Some(95));
        assert_eq!(parse_duration_num("99999999999 min"), None);
        assert_eq!(parse_duration_num("4294967295 min"), Some(u32::MAX));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = catalog([
            RawRecord::new("s1", "Movie")
                .set(Field::DateAdded, "January 1, 2020")
                .set(Field::ReleaseYear, "2019")
                .set(Field::Duration, "100 min"),
            RawRecord::new("s1", "TV Show"),
            RawRecord::new("s2", "Special").set(Field::DateAdded, "garbage"),
            RawRecord::new("s3", "").set(Field::DateAdded, "2024-02-29 08:30:00"),
        ]);
        let twice = Catalog::from_raw(&once.to_raw());
        assert_eq!(once, twice);
    }

    #[test]
    fn take_keeps_requested_order() {
        let db = catalog([
            RawRecord::new("a", "Movie"),
            RawRecord::new("b", "Movie"),
            RawRecord::new("c", "Movie"),
        ]);
        let picked = db.take(&[2, 0]);
        assert_eq!(picked.show_id, vec!["c", "a"]);
        assert_eq!(picked.record(1).show_id, "a");
    }
}
