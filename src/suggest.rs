use crate::git::GitRepo;
use crate::model::AuthorSuggestions;
use crate::util::author_matches;
use console::style;
use tracing::warn;

/// Narrows `authors` to those containing `term`; falls back to the whole
/// list when nothing matches.
pub fn suggest_authors(authors: Vec<String>, term: &str) -> AuthorSuggestions {
    let matches: Vec<String> = authors
        .iter()
        .filter(|a| author_matches(a, term))
        .cloned()
        .collect();

    if matches.is_empty() {
        AuthorSuggestions::AllAuthors(authors)
    } else {
        AuthorSuggestions::Matches(matches)
    }
}

/// Walks the repository for author names. A failed walk is logged and
/// treated as a repository without authors.
pub fn find_suggestions(repo: &GitRepo, term: &str) -> AuthorSuggestions {
    let authors = repo.authors().unwrap_or_else(|e| {
        warn!(error = %e, "could not enumerate authors");
        Vec::new()
    });
    suggest_authors(authors, term)
}

pub fn print_suggestions(suggestions: &AuthorSuggestions, term: &str) {
    match suggestions {
        AuthorSuggestions::Matches(names) => {
            println!(
                "{}",
                style(format!("Authors matching '{term}':")).yellow().bold()
            );
            for name in names {
                println!("  {}", style(name).yellow());
            }
            println!(
                "{}",
                style("Re-run with one of the names above to narrow the search.").dim()
            );
        }
        AuthorSuggestions::AllAuthors(names) if names.is_empty() => {
            println!("{}", style("No authors found in this repository.").yellow());
        }
        AuthorSuggestions::AllAuthors(names) => {
            println!(
                "{}",
                style(format!("No author matches '{term}'. Known authors:"))
                    .yellow()
                    .bold()
            );
            for name in names {
                println!("  {name}");
            }
        }
    }
}
