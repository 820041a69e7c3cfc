use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";
const SHORT_HASH_LEN: usize = 7;

/// Subject prefixes of auto-generated merge and branch-deletion commits.
const HOUSEKEEPING_PREFIXES: [&str; 2] = ["Merge branch", "Delete branch"];

/// One commit as read from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub date: NaiveDate,
    pub author: String,
    pub subject: String,
}

impl CommitRecord {
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn is_housekeeping(&self) -> bool {
        HOUSEKEEPING_PREFIXES
            .iter()
            .any(|prefix| self.subject.starts_with(prefix))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Csv,
}

impl OutputMode {
    pub fn extension(self) -> &'static str {
        match self {
            OutputMode::Table => "txt",
            OutputMode::Csv => "csv",
        }
    }
}

/// Inclusive calendar range. `from <= to` is not checked; an inverted range
/// simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { from: date, to: date }
    }

    pub fn is_single_day(&self) -> bool {
        self.from == self.to
    }

    pub fn from_iso(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_iso(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Lower bound as passed to `git log --since`. Git applies it to the
    /// committer date, so results are narrowed again with [`Self::contains`]
    /// on the author date that ends up in the report.
    pub fn since_arg(&self) -> String {
        format!("{} 00:00:00", self.from_iso())
    }

    /// Upper bound as passed to `git log --until`.
    pub fn until_arg(&self) -> String {
        format!("{} 23:59:59", self.to_iso())
    }

    pub fn display(&self) -> String {
        let from = self.from.format(DISPLAY_DATE_FORMAT).to_string();
        if self.is_single_day() {
            from
        } else {
            format!("{} to {}", from, self.to.format(DISPLAY_DATE_FORMAT))
        }
    }
}

/// Everything one run needs, fixed before any git or filesystem work starts.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub project_path: PathBuf,
    pub project_name: String,
    pub username: String,
    pub range: DateRange,
    pub mode: OutputMode,
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

/// Diagnostic result of the fallback author search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorSuggestions {
    Matches(Vec<String>),
    AllAuthors(Vec<String>),
}

/// Parses a strict `YYYY-MM-DD` date. Shapes chrono would otherwise accept,
/// like `2025-1-5`, are rejected.
pub fn parse_report_date(input: &str) -> Result<NaiveDate> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ReportError::InvalidDate(input.to_string()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ReportError::InvalidDate(input.to_string()))
}
