//! Catalog search with relevance ranking
//!
//! Case-insensitive substring search over course-book title, category,
//! degree, major, and description. Multi-word queries match words in order
//! with anything in between. Results are capped at 50 and ranked by title
//! relevance: exact match, then starts-with, then contains, then the rest
//! in stored order.

use regex::RegexBuilder;

use crate::models::catalog::CatalogItem;

/// Maximum number of search results returned
const MAX_RESULTS: usize = 50;

/// Search the given course books for a query term
pub fn search_books(books: Vec<CatalogItem>, query: &str) -> Vec<CatalogItem> {
    let term = query.trim();
    if term.is_empty() {
        return Vec::new();
    }

    // Words may be separated by arbitrary text, like the original's
    // `split(/\s+/).join(".*")` regex; the words themselves are escaped.
    let pattern = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    let Ok(matcher) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return Vec::new();
    };

    let mut results: Vec<CatalogItem> = books
        .into_iter()
        .filter(|book| {
            matcher.is_match(&book.title)
                || book.category.as_deref().is_some_and(|v| matcher.is_match(v))
                || book.degree.as_deref().is_some_and(|v| matcher.is_match(v))
                || book.major.as_deref().is_some_and(|v| matcher.is_match(v))
                || book
                    .description
                    .as_deref()
                    .is_some_and(|v| matcher.is_match(v))
        })
        .take(MAX_RESULTS)
        .collect();

    let term_lower = term.to_lowercase();
    results.sort_by_key(|book| title_rank(&book.title, &term_lower));
    results
}

/// Relevance bucket of a title for a lowercased search term
fn title_rank(title: &str, term_lower: &str) -> u8 {
    let title_lower = title.to_lowercase();
    if title_lower == *term_lower {
        0
    } else if title_lower.starts_with(term_lower) {
        1
    } else if title_lower.contains(term_lower) {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn book(id: i32, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            price: Decimal::TEN,
            category: Some("Computer Science".to_string()),
            degree: Some("Bachelor of Science".to_string()),
            major: Some("Computer Science".to_string()),
            description: Some(format!("A book about {}", title)),
            ..Default::default()
        }
    }

    #[test]
    fn exact_title_match_ranks_first_and_contains_last() {
        let books = vec![
            book(1, "Data Structures"),
            book(2, "Intro to Algorithms"),
            book(3, "Algorithms"),
        ];

        let results = search_books(books, "Algorithms");

        let titles: Vec<&str> = results.iter().map(|b| b.title.as_str()).collect();
        // "Data Structures" still matches via its description, but ranks
        // after both title matches.
        assert_eq!(
            titles,
            vec!["Algorithms", "Intro to Algorithms", "Data Structures"]
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        let books = vec![book(1, "ALGORITHMS")];
        let results = search_books(books, "algorithms");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn multi_word_queries_match_words_in_order() {
        let books = vec![
            book(1, "Advanced Quantum Physics"),
            book(2, "Physics of Quantum Systems"),
        ];

        let results = search_books(books, "quantum physics");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn non_title_fields_are_searched() {
        let mut item = book(1, "COMPSCI101 Course Book");
        item.description = Some("Introduction to programming".to_string());

        let results = search_books(vec![item], "programming");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn blank_queries_return_nothing() {
        let books = vec![book(1, "Algorithms")];
        assert!(search_books(books.clone(), "").is_empty());
        assert!(search_books(books, "   ").is_empty());
    }

    #[test]
    fn regex_metacharacters_are_treated_literally() {
        let books = vec![book(1, "C++ (Advanced)")];
        let results = search_books(books, "C++ (Advanced)");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn results_are_capped_at_fifty() {
        let books: Vec<CatalogItem> = (1..=60)
            .map(|id| book(id, &format!("Algorithms volume {}", id)))
            .collect();

        let results = search_books(books, "Algorithms");
        assert_eq!(results.len(), 50);
    }
}
