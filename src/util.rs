use std::path::PathBuf;

/// Length in characters, which is what column widths are measured in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Case-insensitive "contains" used for every author lookup.
pub fn author_matches(author: &str, term: &str) -> bool {
    author.to_lowercase().contains(&term.to_lowercase())
}

/// Directory holding the running executable; default home of the template
/// and of generated reports.
pub fn tool_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
