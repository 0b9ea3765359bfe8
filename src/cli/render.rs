//! Rendering of catalog state for the shell.
//!
//! The domain hands over plain structured views; everything about how they
//! look — column layout, truncation, colors, the JSON export — lives here.

use biblio::domain::views::{BookView, LoanView};
use biblio::{Catalog, Config};

use super::terminal::{self, Style};

/// Column widths for book tables, adjusted for narrow terminals.
#[derive(Debug, Clone, Copy)]
struct Columns {
    title: usize,
    author: usize,
}

impl Columns {
    fn detect() -> Self {
        if terminal::is_narrow() {
            Self {
                title: 18,
                author: 12,
            }
        } else {
            Self {
                title: 32,
                author: 20,
            }
        }
    }
}

/// Prints every book in the catalog, or a notice when there are none.
pub fn print_books(catalog: &Catalog, config: &Config) {
    if catalog.book_count() == 0 {
        println!("The catalog has no books.");
        return;
    }
    let books: Vec<_> = catalog.books().collect();
    print_book_table(&books, config);
}

/// Prints search results, or a notice when nothing matched.
pub fn print_search_results(results: &[BookView<'_>], config: &Config) {
    if results.is_empty() {
        println!("No books found.");
        return;
    }
    print_book_table(results, config);
}

fn print_book_table(books: &[BookView<'_>], config: &Config) {
    let columns = Columns::detect();
    println!(
        "{}",
        format!(
            "{:<6} {:<title$} {:<author$} STATUS",
            "ID",
            "TITLE",
            "AUTHOR",
            title = columns.title,
            author = columns.author,
        )
        .strong()
    );
    println!(
        "{}",
        "─".repeat(columns.title + columns.author + 20).dim()
    );
    for book in books {
        println!("{}", book_row(book, config.digits(), columns));
    }
}

fn book_row(book: &BookView<'_>, digits: usize, columns: Columns) -> String {
    format!(
        "{:<6} {:<title$} {:<author$} {}",
        book.id.display(digits).to_string(),
        truncate(book.title, columns.title),
        truncate(book.author, columns.author),
        status(book, digits),
        title = columns.title,
        author = columns.author,
    )
}

fn status(book: &BookView<'_>, digits: usize) -> String {
    book.borrower.map_or_else(
        || "Available".to_string(),
        |holder| format!("On loan to {} ({})", holder.name, holder.id.display(digits)),
    )
}

/// Prints every registered member, or a notice when there are none.
pub fn print_members(catalog: &Catalog, config: &Config) {
    if catalog.member_count() == 0 {
        println!("No members are registered.");
        return;
    }
    println!("{}", format!("{:<6} NAME", "ID").strong());
    println!("{}", "─".repeat(40).dim());
    for member in catalog.members() {
        println!(
            "{:<6} {}",
            member.id.display(config.digits()).to_string(),
            member.name
        );
    }
}

/// Prints the borrow history of a single book, oldest loan first.
pub fn print_history(title: &str, history: &[LoanView<'_>], config: &Config) {
    println!("Borrow history for '{title}':");
    if history.is_empty() {
        println!("No borrow history.");
        return;
    }
    for loan in history {
        println!(
            "  - {} (member {}) on {}",
            loan.name,
            loan.member.display(config.digits()),
            loan.borrowed_at.format("%Y-%m-%d %H:%M"),
        );
    }
}

/// Prints every member currently holding books, with the held books nested
/// beneath them.
pub fn print_member_loans(catalog: &Catalog, config: &Config) {
    let loans = catalog.members_with_loans();
    if loans.is_empty() {
        println!("No books are currently on loan.");
        return;
    }
    for entry in &loans {
        println!(
            "{} (member {})",
            entry.member.name,
            entry.member.id.display(config.digits()),
        );
        for book in &entry.books {
            println!(
                "  - {} by {} (book {})",
                book.title,
                book.author,
                book.id.display(config.digits()),
            );
        }
    }
}

/// Writes a JSON snapshot of the whole catalog to stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_report(catalog: &Catalog) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&catalog.report())?);
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use biblio::domain::views::BorrowerRef;
    use biblio::{BookId, MemberId};

    use super::*;

    const COLUMNS: Columns = Columns {
        title: 32,
        author: 20,
    };

    fn book_id(id: usize) -> BookId {
        BookId::new(NonZeroUsize::new(id).unwrap())
    }

    fn member_id(id: usize) -> MemberId {
        MemberId::new(NonZeroUsize::new(id).unwrap())
    }

    #[test]
    fn available_book_row() {
        let view = BookView {
            id: book_id(1),
            title: "Dune",
            author: "Herbert",
            borrower: None,
        };

        let row = book_row(&view, 3, COLUMNS);
        assert!(row.starts_with("001 "));
        assert!(row.contains("Dune"));
        assert!(row.ends_with("Available"));
    }

    #[test]
    fn on_loan_book_row_names_the_holder() {
        let view = BookView {
            id: book_id(2),
            title: "Emma",
            author: "Austen",
            borrower: Some(BorrowerRef {
                id: member_id(7),
                name: "Ada",
            }),
        };

        let row = book_row(&view, 3, COLUMNS);
        assert!(row.ends_with("On loan to Ada (007)"));
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("Dune", 10), "Dune");
    }

    #[test]
    fn truncate_shortens_long_text_with_ellipsis() {
        let long = "A Very Long Subtitle Indeed";
        let truncated = truncate(long, 10);
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with('…'));
    }
}
