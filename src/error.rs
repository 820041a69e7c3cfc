use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("`git` not found in PATH")]
    GitNotFound,
    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Template file not found: {} (pass --template, or use --csv)", .0.display())]
    MissingTemplate(PathBuf),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::find::existing::Error> for ReportError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        ReportError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for ReportError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        ReportError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for ReportError {
    fn from(err: gix::objs::decode::Error) -> Self {
        ReportError::ObjectDecode(Box::new(err))
    }
}
