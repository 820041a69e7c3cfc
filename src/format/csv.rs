use crate::error::{ReportError, Result};
use crate::model::CommitRecord;
use csv::{QuoteStyle, WriterBuilder};

pub const CSV_HEADER: [&str; 5] = ["No", "Commit", "Author", "Commit Date", "Hash"];

/// Renders commits as CSV, one row per commit. Fields holding a comma, a
/// quote or a line break are quoted, with inner quotes doubled.
pub fn format_csv(commits: &[CommitRecord]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for (idx, commit) in commits.iter().enumerate() {
        wtr.write_record([
            (idx + 1).to_string().as_str(),
            commit.subject.as_str(),
            commit.author.as_str(),
            commit.date_string().as_str(),
            commit.short_hash(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Io(std::io::Error::other(e)))
}
