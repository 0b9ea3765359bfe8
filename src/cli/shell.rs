//! Interactive shell: the nested menu loop that drives the catalog.
//!
//! All domain outcomes are rendered here. Rejected requests — a book already
//! on loan, a return by the wrong member, an unknown id — print as warnings
//! and the loop carries on; only terminal I/O failures abort the session.

use std::str::FromStr;

use biblio::domain::ParseIdError;
use biblio::{Catalog, Config};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::instrument;

use super::{render, terminal::Style};

const MAIN_MENU: [&str; 7] = [
    "Books",
    "Members",
    "Circulation",
    "Search books",
    "Members with loans",
    "Export catalog (JSON)",
    "Quit",
];

/// Runs the main menu loop until the user quits.
#[instrument(skip_all)]
pub fn run(catalog: &mut Catalog, config: &Config) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    println!(
        "{}",
        "Library catalog. State lives in memory and is discarded on exit.".dim()
    );

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Library menu")
            .items(&MAIN_MENU)
            .default(0)
            .interact()?;

        match choice {
            0 => books_menu(catalog, config, &theme)?,
            1 => members_menu(catalog, config, &theme)?,
            2 => circulation_menu(catalog, config, &theme)?,
            3 => search(catalog, config, &theme)?,
            4 => render::print_member_loans(catalog, config),
            5 => render::print_report(catalog)?,
            _ => return Ok(()),
        }
    }
}

fn books_menu(catalog: &mut Catalog, config: &Config, theme: &ColorfulTheme) -> anyhow::Result<()> {
    loop {
        let choice = Select::with_theme(theme)
            .with_prompt("Books")
            .items(&[
                "Add a book",
                "Edit a book",
                "List books",
                "Borrow history",
                "Back",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => add_book(catalog, config, theme)?,
            1 => edit_book(catalog, config, theme)?,
            2 => render::print_books(catalog, config),
            3 => show_history(catalog, config, theme)?,
            _ => return Ok(()),
        }
    }
}

fn members_menu(
    catalog: &mut Catalog,
    config: &Config,
    theme: &ColorfulTheme,
) -> anyhow::Result<()> {
    loop {
        let choice = Select::with_theme(theme)
            .with_prompt("Members")
            .items(&["Add a member", "Edit a member", "List members", "Back"])
            .default(0)
            .interact()?;

        match choice {
            0 => add_member(catalog, config, theme)?,
            1 => edit_member(catalog, config, theme)?,
            2 => render::print_members(catalog, config),
            _ => return Ok(()),
        }
    }
}

fn circulation_menu(
    catalog: &mut Catalog,
    config: &Config,
    theme: &ColorfulTheme,
) -> anyhow::Result<()> {
    loop {
        let choice = Select::with_theme(theme)
            .with_prompt("Circulation")
            .items(&["Borrow a book", "Return a book", "Back"])
            .default(0)
            .interact()?;

        match choice {
            0 => borrow(catalog, config, theme)?,
            1 => return_loan(catalog, config, theme)?,
            _ => return Ok(()),
        }
    }
}

fn add_book(catalog: &mut Catalog, config: &Config, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let title = prompt(theme, "Title")?;
    let author = prompt(theme, "Author")?;

    match catalog.add_book(&title, &author) {
        Ok(id) => println!(
            "{}",
            format!("Added book {}.", id.display(config.digits())).success()
        ),
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn edit_book(catalog: &mut Catalog, config: &Config, theme: &ColorfulTheme) -> anyhow::Result<()> {
    if catalog.book_count() == 0 {
        println!("No books available to edit.");
        return Ok(());
    }
    render::print_books(catalog, config);

    let Some(id) = prompt_id(theme, "Book id to edit")? else {
        return Ok(());
    };
    let title = prompt(theme, "New title (leave blank to keep current)")?;
    let author = prompt(theme, "New author (leave blank to keep current)")?;

    match catalog.edit_book(id, Some(&title), Some(&author)) {
        Ok(true) => println!("{}", "Book details updated.".success()),
        Ok(false) => println!("Nothing to change."),
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn show_history(
    catalog: &Catalog,
    config: &Config,
    theme: &ColorfulTheme,
) -> anyhow::Result<()> {
    if catalog.book_count() == 0 {
        println!("The catalog has no books.");
        return Ok(());
    }
    let Some(id) = prompt_id(theme, "Book id")? else {
        return Ok(());
    };

    match catalog.history(id) {
        Ok(history) => {
            let title = catalog
                .book(id)
                .map(|book| book.title.to_string())
                .unwrap_or_default();
            render::print_history(&title, &history, config);
        }
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn add_member(catalog: &mut Catalog, config: &Config, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let name = prompt(theme, "Member name")?;

    match catalog.add_member(&name) {
        Ok(id) => println!(
            "{}",
            format!("Registered member {}.", id.display(config.digits())).success()
        ),
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn edit_member(
    catalog: &mut Catalog,
    config: &Config,
    theme: &ColorfulTheme,
) -> anyhow::Result<()> {
    if catalog.member_count() == 0 {
        println!("No members available to edit.");
        return Ok(());
    }
    render::print_members(catalog, config);

    let Some(id) = prompt_id(theme, "Member id to edit")? else {
        return Ok(());
    };
    let name = prompt(theme, "New name (leave blank to keep current)")?;

    match catalog.edit_member(id, Some(&name)) {
        Ok(true) => println!("{}", "Member details updated.".success()),
        Ok(false) => println!("Nothing to change."),
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn borrow(catalog: &mut Catalog, config: &Config, theme: &ColorfulTheme) -> anyhow::Result<()> {
    if catalog.book_count() == 0 {
        println!("The catalog has no books.");
        return Ok(());
    }
    if catalog.member_count() == 0 {
        println!("No members are registered.");
        return Ok(());
    }

    render::print_books(catalog, config);
    let Some(book) = prompt_id(theme, "Book id")? else {
        return Ok(());
    };
    render::print_members(catalog, config);
    let Some(member) = prompt_id(theme, "Member id")? else {
        return Ok(());
    };

    match catalog.borrow(book, member) {
        Ok(receipt) => println!(
            "{}",
            format!("{} borrowed '{}'.", receipt.member_name, receipt.title).success()
        ),
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn return_loan(
    catalog: &mut Catalog,
    config: &Config,
    theme: &ColorfulTheme,
) -> anyhow::Result<()> {
    if catalog.book_count() == 0 {
        println!("The catalog has no books.");
        return Ok(());
    }

    render::print_books(catalog, config);
    let Some(book) = prompt_id(theme, "Book id")? else {
        return Ok(());
    };
    render::print_members(catalog, config);
    let Some(member) = prompt_id(theme, "Member id")? else {
        return Ok(());
    };

    match catalog.return_book(book, member) {
        Ok(receipt) => println!(
            "{}",
            format!("{} returned '{}'.", receipt.member_name, receipt.title).success()
        ),
        Err(error) => println!("{}", error.to_string().warning()),
    }
    Ok(())
}

fn search(catalog: &Catalog, config: &Config, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let keyword = prompt(theme, "Search keyword")?;
    let results = catalog.search_books(&keyword);
    render::print_search_results(&results, config);
    Ok(())
}

fn prompt(theme: &ColorfulTheme, label: &str) -> anyhow::Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?)
}

/// Prompts for an id. A value that does not parse is reported as a warning
/// and `None` is returned, sending the caller back to its menu.
fn prompt_id<T>(theme: &ColorfulTheme, label: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr<Err = ParseIdError>,
{
    let raw = prompt(theme, label)?;
    match raw.parse::<T>() {
        Ok(id) => Ok(Some(id)),
        Err(error) => {
            println!("{}", error.to_string().warning());
            Ok(None)
        }
    }
}
