//! `git log` invocation and the wire format it is asked to produce.
//!
//! Each commit is emitted as one NUL-terminated record (`-z`) whose fields
//! are separated by newlines, in the order hash, author date, author name,
//! subject. Git never puts a newline in an author name or in `%s`, and the
//! subject is the last field, so its content cannot shift field boundaries.

use crate::model::{CommitRecord, DateRange, DATE_FORMAT};
use crate::util::author_matches;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, warn};

const RECORD_END: char = '\0';
const FIELD_SEP: char = '\n';
const PLACEHOLDERS: [&str; 4] = ["%H", "%ad", "%an", "%s"];

#[derive(Debug, Clone, Copy)]
pub struct LogQuery<'a> {
    pub author: &'a str,
    pub range: DateRange,
    pub all_refs: bool,
}

/// The `--format` argument matching [`parse_log`].
pub fn pretty_arg() -> String {
    format!("--format={}", PLACEHOLDERS.join("%n"))
}

/// Writes `record` in the exact form `git log` emits for [`pretty_arg`].
pub fn encode_record(record: &CommitRecord) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}{end}",
        record.hash,
        record.date_string(),
        record.author,
        record.subject,
        sep = FIELD_SEP,
        end = RECORD_END,
    )
}

/// Decodes `git log` output. Malformed records are skipped.
pub fn parse_log(raw: &str) -> Vec<CommitRecord> {
    raw.split(RECORD_END)
        .map(|chunk| chunk.trim_start_matches(FIELD_SEP))
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| {
            let parsed = parse_record(chunk);
            if parsed.is_none() {
                warn!(record = ?chunk, "skipping malformed log record");
            }
            parsed
        })
        .collect()
}

fn parse_record(chunk: &str) -> Option<CommitRecord> {
    let mut fields = chunk.splitn(PLACEHOLDERS.len(), FIELD_SEP);
    let hash = fields.next()?;
    let date = fields.next()?;
    let author = fields.next()?;
    let subject = fields.next()?;

    if hash.len() < 7 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;

    Some(CommitRecord {
        hash: hash.to_string(),
        date,
        author: author.to_string(),
        subject: subject.to_string(),
    })
}

pub fn log_args(query: &LogQuery<'_>) -> Vec<String> {
    let mut args = vec!["log".to_string()];
    if query.all_refs {
        args.push("--all".to_string());
    }
    args.extend([
        "--regexp-ignore-case".to_string(),
        "--fixed-strings".to_string(),
        format!("--author={}", query.author),
        format!("--since={}", query.range.since_arg()),
        format!("--until={}", query.range.until_arg()),
        "--reverse".to_string(),
        "--date=short".to_string(),
        "-z".to_string(),
        pretty_arg(),
    ]);
    args
}

/// Runs the commit query against `repo`, oldest commit first.
///
/// A failing `git` is reported as a warning and yields no commits.
/// Housekeeping commits are dropped, and so are commits where only the
/// author email matched the search term or whose author date falls outside
/// the range (git's own date bounds apply to the committer date).
pub fn query_commits(repo: &Path, query: &LogQuery<'_>) -> Vec<CommitRecord> {
    let args = log_args(query);
    debug!(repo = %repo.display(), ?args, "running git log");

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Reading commit history...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    pb.finish_and_clear();

    let stdout = match output {
        Ok(out) if out.status.success() => out.stdout,
        Ok(out) => {
            warn!(
                status = %out.status,
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "git log failed; treating as no commits"
            );
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "could not run git log; treating as no commits");
            return Vec::new();
        }
    };

    let records: Vec<CommitRecord> = parse_log(&String::from_utf8_lossy(&stdout))
        .into_iter()
        .filter(|r| query.range.contains(r.date))
        .filter(|r| !r.is_housekeeping())
        .filter(|r| author_matches(&r.author, query.author))
        .collect();
    debug!(count = records.len(), "commits after filtering");
    records
}
