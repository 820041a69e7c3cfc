use crate::error::{ReportError, Result};
use crate::format::{format_csv, format_table, TableLayout};
use crate::git::log::{query_commits, LogQuery};
use crate::git::GitRepo;
use crate::model::{CommitRecord, OutputMode, ReportRequest};
use crate::suggest::{find_suggestions, print_suggestions};
use anyhow::Context;
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Values substituted into the report template.
#[derive(Debug, Clone)]
pub struct TemplateValues<'a> {
    pub username: &'a str,
    pub project_name: &'a str,
    pub date_range: String,
    pub from_date: String,
    pub to_date: String,
    pub commits: &'a str,
    pub commit_count: usize,
}

impl<'a> TemplateValues<'a> {
    pub fn new(request: &'a ReportRequest, commits: &'a str, commit_count: usize) -> Self {
        Self {
            username: &request.username,
            project_name: &request.project_name,
            date_range: request.range.display(),
            from_date: request.range.from_iso(),
            to_date: request.range.to_iso(),
            commits,
            commit_count,
        }
    }
}

impl TemplateValues<'_> {
    fn lookup(&self, name: &str) -> Option<String> {
        let value = match name {
            "USERNAME" => self.username.to_string(),
            "PROJECT_NAME" => self.project_name.to_string(),
            "DATE_RANGE" => self.date_range.clone(),
            "FROM_DATE" => self.from_date.clone(),
            "TO_DATE" => self.to_date.clone(),
            "COMMIT_COUNT" => self.commit_count.to_string(),
            "COMMITS" => self.commits.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Substitutes `{{NAME}}` placeholders in one pass over `template`.
///
/// Inserted values are never scanned again, so placeholder-looking text in a
/// username or commit subject stays literal. Unknown tokens are left alone.
pub fn render_template(template: &str, values: &TemplateValues<'_>) -> String {
    let mut out = String::with_capacity(template.len() + values.commits.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => match values.lookup(&after[..close]) {
                Some(value) => {
                    out.push_str(&value);
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            },
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// `<output_dir>/<project>/report_<user>_<project>_<from>[_to_<to>].<ext>`
pub fn output_path(request: &ReportRequest) -> PathBuf {
    let mut name = format!(
        "report_{}_{}_{}",
        file_safe(&request.username),
        file_safe(&request.project_name),
        request.range.from_iso()
    );
    if !request.range.is_single_day() {
        name.push_str(&format!("_to_{}", request.range.to_iso()));
    }
    name.push('.');
    name.push_str(request.mode.extension());

    request
        .output_dir
        .join(&request.project_name)
        .join(name)
}

fn file_safe(part: &str) -> String {
    part.replace(['/', '\\'], "_")
}

fn load_template(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ReportError::MissingTemplate(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Builds the file body for the requested mode.
pub fn render_report(
    request: &ReportRequest,
    commits: &[CommitRecord],
    template: Option<&str>,
) -> Result<String> {
    match (request.mode, template) {
        (OutputMode::Csv, _) => format_csv(commits),
        (OutputMode::Table, Some(template)) => {
            let table = format_table(commits, &TableLayout::default());
            let values = TemplateValues::new(request, &table, commits.len());
            Ok(render_template(template, &values))
        }
        (OutputMode::Table, None) => Err(ReportError::MissingTemplate(request.template.clone())),
    }
}

/// Creates the parent directory and truncates any previous report.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}

pub fn exec(request: &ReportRequest, repo: &GitRepo) -> anyhow::Result<()> {
    let template = match request.mode {
        OutputMode::Table => Some(load_template(&request.template)?),
        OutputMode::Csv => None,
    };

    let query = LogQuery {
        author: &request.username,
        range: request.range,
        all_refs: true,
    };
    let commits = query_commits(&request.project_path, &query);

    println!(
        "Found {} commit(s) by '{}' in {} ({})",
        style(commits.len()).cyan(),
        request.username,
        style(&request.project_name).bold(),
        style(request.range.display()).dim()
    );

    if commits.is_empty() {
        let suggestions = find_suggestions(repo, &request.username);
        print_suggestions(&suggestions, &request.username);
    }

    let body = render_report(request, &commits, template.as_deref())?;
    let path = output_path(request);
    write_report(&path, &body)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    println!(
        "{} {}",
        style("Report written to").green().bold(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NO_COMMITS;
    use crate::model::{DateRange, DATE_FORMAT};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "Report for {{USERNAME}} on {{PROJECT_NAME}}\n\
                            Period: {{DATE_RANGE}} ({{FROM_DATE}}..{{TO_DATE}})\n\
                            Commits: {{COMMIT_COUNT}}\n\n{{COMMITS}}\n";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn request(mode: OutputMode, from: &str, to: &str) -> ReportRequest {
        ReportRequest {
            project_path: PathBuf::from("/work/widget"),
            project_name: "widget".to_string(),
            username: "jane".to_string(),
            range: DateRange::new(date(from), date(to)),
            mode,
            template: PathBuf::from("/tool/report_template.txt"),
            output_dir: PathBuf::from("/tool"),
        }
    }

    fn commit(subject: &str) -> CommitRecord {
        CommitRecord {
            hash: "feedfacefeedfacefeedfacefeedfacefeedface".to_string(),
            date: date("2025-01-01"),
            author: "jane".to_string(),
            subject: subject.to_string(),
        }
    }

    #[test]
    fn single_day_report_name_has_no_to_suffix() {
        let req = request(OutputMode::Table, "2025-01-05", "2025-01-05");
        assert_eq!(
            output_path(&req),
            PathBuf::from("/tool/widget/report_jane_widget_2025-01-05.txt")
        );
    }

    #[test]
    fn range_report_name_has_to_suffix() {
        let req = request(OutputMode::Csv, "2025-01-01", "2025-01-03");
        assert_eq!(
            output_path(&req),
            PathBuf::from("/tool/widget/report_jane_widget_2025-01-01_to_2025-01-03.csv")
        );
    }

    #[test]
    fn path_separators_in_username_stay_in_file_name() {
        let mut req = request(OutputMode::Table, "2025-01-05", "2025-01-05");
        req.username = "team/jane".to_string();
        assert_eq!(
            output_path(&req),
            PathBuf::from("/tool/widget/report_team_jane_widget_2025-01-05.txt")
        );
    }

    #[test]
    fn template_placeholders_are_replaced() {
        let req = request(OutputMode::Table, "2025-01-01", "2025-01-03");
        let values = TemplateValues::new(&req, "TABLE", 2);
        assert_eq!(
            render_template(TEMPLATE, &values),
            "Report for jane on widget\n\
             Period: January 01, 2025 to January 03, 2025 (2025-01-01..2025-01-03)\n\
             Commits: 2\n\nTABLE\n"
        );
    }

    #[test]
    fn commit_text_is_inserted_verbatim() {
        let req = request(OutputMode::Table, "2025-01-01", "2025-01-01");
        let values = TemplateValues::new(&req, "mentions {{USERNAME}} & <b>", 1);
        assert_eq!(
            render_template("{{COMMITS}}", &values),
            "mentions {{USERNAME}} & <b>"
        );
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let mut req = request(OutputMode::Table, "2025-01-01", "2025-01-01");
        req.username = "{{PROJECT_NAME}}".to_string();
        let values = TemplateValues::new(&req, "TABLE", 0);
        assert_eq!(
            render_template("{{USERNAME}} on {{PROJECT_NAME}}", &values),
            "{{PROJECT_NAME}} on widget"
        );
    }

    #[test]
    fn unknown_and_unclosed_tokens_are_kept() {
        let req = request(OutputMode::Table, "2025-01-01", "2025-01-01");
        let values = TemplateValues::new(&req, "TABLE", 0);
        assert_eq!(
            render_template("{{OTHER}} {{USERNAME}} {{COMMITS", &values),
            "{{OTHER}} jane {{COMMITS"
        );
    }

    #[test]
    fn empty_table_report_carries_sentinel() {
        let req = request(OutputMode::Table, "2025-01-01", "2025-01-01");
        let body = render_report(&req, &[], Some("{{COMMIT_COUNT}}|{{COMMITS}}")).unwrap();
        assert_eq!(body, format!("0|{NO_COMMITS}"));
    }

    #[test]
    fn csv_report_ignores_template() {
        let req = request(OutputMode::Csv, "2025-01-01", "2025-01-01");
        let body = render_report(&req, &[commit("Fix bug")], None).unwrap();
        assert!(body.starts_with("No,Commit,Author,Commit Date,Hash\n"));
        assert!(body.contains("1,Fix bug,jane,2025-01-01,feedfac"));
    }

    #[test]
    fn table_mode_requires_template() {
        let req = request(OutputMode::Table, "2025-01-01", "2025-01-01");
        assert!(matches!(
            render_report(&req, &[], None),
            Err(ReportError::MissingTemplate(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_template(&dir.path().join("missing.txt")),
            Err(ReportError::MissingTemplate(_))
        ));
    }

    #[test]
    fn write_report_creates_directories_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget").join("report.txt");

        write_report(&path, "a much longer first report").unwrap();
        write_report(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
