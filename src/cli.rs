use crate::error::{ReportError, Result};
use crate::git::GitRepo;
use crate::model::{parse_report_date, DateRange, OutputMode, ReportRequest};
use crate::util::tool_dir;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_TEMPLATE: &str = "report_template.txt";

#[derive(Parser, Debug)]
#[command(name = "report-generator")]
#[command(about = "Work report of one author's commits over a date range, as a text table or CSV")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to the project's git repository")]
    pub project_dir: PathBuf,

    #[arg(help = "Author to report on (case-insensitive, partial names match)")]
    pub username: String,

    #[arg(help = "First day of the report, YYYY-MM-DD")]
    pub from_date: String,

    #[arg(help = "Last day of the report, YYYY-MM-DD (defaults to FROM_DATE)")]
    pub to_date: Option<String>,

    #[arg(long, help = "Write CSV instead of the templated text table")]
    pub csv: bool,

    #[arg(long, help = "Report template [default: report_template.txt next to the executable]")]
    pub template: Option<PathBuf>,

    #[arg(long, help = "Base directory for reports [default: directory of the executable]")]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,
}

/// First `report_template.txt` found in `dirs`, or the one in `dirs[0]` so a
/// missing template is reported against the executable's directory.
pub fn default_template(dirs: &[PathBuf]) -> PathBuf {
    let candidates: Vec<PathBuf> = dirs.iter().map(|dir| dir.join(DEFAULT_TEMPLATE)).collect();
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE))
}

/// Checkout the binary was built from; `cargo run` leaves the executable
/// under `target/`, away from the bundled template.
fn source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn mode(&self) -> OutputMode {
        if self.csv {
            OutputMode::Csv
        } else {
            OutputMode::Table
        }
    }

    pub fn date_range(&self) -> Result<DateRange> {
        let from = parse_report_date(&self.from_date)?;
        let to = match &self.to_date {
            Some(to) => parse_report_date(to)?,
            None => from,
        };
        Ok(DateRange::new(from, to))
    }

    /// Freezes the parsed arguments into the request the pipeline runs on.
    pub fn into_request(self, repo: &GitRepo) -> Result<ReportRequest> {
        let range = self.date_range()?;
        let mode = self.mode();
        let base = tool_dir();

        Ok(ReportRequest {
            project_name: repo.project_name(),
            project_path: self.project_dir,
            username: self.username,
            range,
            mode,
            template: self
                .template
                .unwrap_or_else(|| default_template(&[base.clone(), source_dir()])),
            output_dir: self.output_dir.unwrap_or(base),
        })
    }

    pub fn execute(self) -> anyhow::Result<()> {
        // Reject bad dates before touching git or the filesystem.
        self.date_range()?;

        which::which("git").map_err(|_| ReportError::GitNotFound)?;
        let repo = GitRepo::open(&self.project_dir)?;

        let request = self.into_request(&repo)?;
        crate::report::exec(&request, &repo)
    }
}
