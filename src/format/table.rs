use crate::model::CommitRecord;
use crate::util::char_len;

pub const NO_COMMITS: &str = "No commits found for this period.";

const HEADERS: [&str; 5] = ["No", "Commit", "Author", "Date", "Hash"];

/// Fixed geometry of the commit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub wrap_width: usize,
    pub date_width: usize,
    pub hash_width: usize,
    pub min_number_width: usize,
    pub min_author_width: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            wrap_width: 50,
            date_width: 10,
            hash_width: 7,
            min_number_width: 2,
            min_author_width: 6,
        }
    }
}

/// Column widths in display order: number, commit, author, date, hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub number: usize,
    pub commit: usize,
    pub author: usize,
    pub date: usize,
    pub hash: usize,
}

impl ColumnWidths {
    pub fn compute(commits: &[CommitRecord], layout: &TableLayout) -> Self {
        let number = commits
            .len()
            .to_string()
            .len()
            .max(layout.min_number_width);
        let author = commits
            .iter()
            .map(|c| char_len(&c.author))
            .max()
            .unwrap_or(0)
            .max(layout.min_author_width);

        Self {
            number,
            commit: layout.wrap_width,
            author,
            date: layout.date_width,
            hash: layout.hash_width,
        }
    }

    fn as_array(&self) -> [usize; 5] {
        [self.number, self.commit, self.author, self.date, self.hash]
    }
}

/// Greedy word wrap. Text that already fits comes back untouched; longer
/// text is broken on whitespace, and a word wider than `width` gets a line
/// to itself rather than being split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if char_len(text) <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = char_len(word);
        if line.is_empty() {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn pad(cell: &str, width: usize) -> String {
    let len = char_len(cell);
    if len >= width {
        cell.to_string()
    } else {
        format!("{}{}", cell, " ".repeat(width - len))
    }
}

fn row(cells: [&str; 5], widths: &ColumnWidths) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.as_array())
        .map(|(cell, width)| pad(cell, width))
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn separator() -> String {
    format!("| {} |", vec!["---"; HEADERS.len()].join(" | "))
}

/// Renders commits as a pipe-delimited table, one or more lines per commit.
pub fn format_table(commits: &[CommitRecord], layout: &TableLayout) -> String {
    if commits.is_empty() {
        return NO_COMMITS.to_string();
    }

    let widths = ColumnWidths::compute(commits, layout);
    let mut out = vec![row(HEADERS, &widths), separator()];

    for (idx, commit) in commits.iter().enumerate() {
        let number = (idx + 1).to_string();
        let date = commit.date_string();
        let lines = wrap_text(&commit.subject, layout.wrap_width);

        for (line_no, line) in lines.iter().enumerate() {
            if line_no == 0 {
                out.push(row(
                    [&number, line, &commit.author, &date, commit.short_hash()],
                    &widths,
                ));
            } else {
                out.push(row(["", line, "", "", ""], &widths));
            }
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DATE_FORMAT;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const LONG: &str =
        "Update very long documentation text that exceeds the fifty character wrap threshold for sure";

    fn commit(author: &str, subject: &str, day: &str) -> CommitRecord {
        CommitRecord {
            hash: "abcdef0123456789abcdef0123456789abcdef01".to_string(),
            date: NaiveDate::parse_from_str(day, DATE_FORMAT).unwrap(),
            author: author.to_string(),
            subject: subject.to_string(),
        }
    }

    #[test]
    fn short_text_is_not_wrapped() {
        let text = "Fix  bug with   odd spacing";
        assert_eq!(wrap_text(text, 50), vec![text.to_string()]);
    }

    #[test]
    fn long_text_wraps_on_word_boundaries() {
        let lines = wrap_text(LONG, 50);
        assert!(lines.len() >= 2);
        assert!(lines.iter().all(|l| char_len(l) <= 50));
        assert_eq!(lines.join(" "), LONG);
        for word in LONG.split(' ') {
            assert!(lines.iter().any(|l| l.split(' ').any(|w| w == word)));
        }
    }

    #[test]
    fn overlong_word_is_kept_whole() {
        let word = "x".repeat(60);
        let text = format!("short {word} tail");
        assert_eq!(wrap_text(&text, 50), vec!["short".to_string(), word, "tail".to_string()]);
    }

    #[test]
    fn wrap_fills_exactly_to_width() {
        // "aaaa bbbb" is 9 chars: fits a width of 9 but not 8.
        assert_eq!(wrap_text("aaaa bbbb cccc", 9), vec!["aaaa bbbb", "cccc"]);
        assert_eq!(wrap_text("aaaa bbbb cccc", 8), vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn widths_respect_minimums() {
        let commits = vec![commit("al", "x", "2025-01-01")];
        let widths = ColumnWidths::compute(&commits, &TableLayout::default());
        assert_eq!(widths.number, 2);
        assert_eq!(widths.author, 6);
        assert_eq!(widths.commit, 50);
        assert_eq!(widths.date, 10);
        assert_eq!(widths.hash, 7);
    }

    #[test]
    fn widths_grow_with_data() {
        let mut commits: Vec<CommitRecord> = (0..120)
            .map(|_| commit("jane", "x", "2025-01-01"))
            .collect();
        commits.push(commit("Zoë Ångström-Long", "x", "2025-01-01"));
        let widths = ColumnWidths::compute(&commits, &TableLayout::default());
        assert_eq!(widths.number, 3);
        assert_eq!(widths.author, char_len("Zoë Ångström-Long"));
    }

    #[test]
    fn empty_input_yields_sentinel() {
        assert_eq!(format_table(&[], &TableLayout::default()), NO_COMMITS);
    }

    #[test]
    fn renders_single_and_wrapped_rows() {
        let commits = vec![
            commit("jane", "Fix bug", "2025-01-01"),
            commit("jane", LONG, "2025-01-02"),
        ];
        let table = format_table(&commits, &TableLayout::default());

        let expected = [
            format!("| No | Commit{} | Author | Date       | Hash    |", " ".repeat(44)),
            "| --- | --- | --- | --- | --- |".to_string(),
            format!("| 1  | Fix bug{} | jane   | 2025-01-01 | abcdef0 |", " ".repeat(43)),
            format!(
                "| 2  | {} | jane   | 2025-01-02 | abcdef0 |",
                pad("Update very long documentation text that exceeds", 50)
            ),
            format!(
                "|    | {} |        |            |         |",
                pad("the fifty character wrap threshold for sure", 50)
            ),
        ]
        .join("\n");

        assert_eq!(table, expected);
    }

    #[test]
    fn continuation_rows_keep_column_alignment() {
        let commits = vec![commit("jane", LONG, "2025-01-02")];
        let table = format_table(&commits, &TableLayout::default());
        let lengths: Vec<usize> = table.lines().skip(2).map(char_len).collect();
        assert!(lengths.len() >= 2);
        assert!(lengths.windows(2).all(|w| w[0] == w[1]));
    }
}
