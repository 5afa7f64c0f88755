// PriceLens - app/prompt.rs
//
// Line-based search loop. Reads a phrase per line, prints matching records
// as a fixed-width table, and stops on the exit command or end of input.
// Generic over BufRead/Write so tests drive it with in-memory buffers.

use crate::core::model::{Catalog, PriceRecord};
use crate::core::search;
use crate::util::constants::{
    EXIT_COMMAND, LISTING_FILE_WIDTH, LISTING_INDEX_WIDTH, LISTING_NAME_WIDTH,
    LISTING_PRICE_WIDTH, LISTING_WEIGHT_WIDTH, SEARCH_PROMPT,
};
use std::io::{self, BufRead, Write};

/// Message printed when a search has no results.
pub const NOT_FOUND_MESSAGE: &str = "Товары не найдены";

/// Message printed when the loop ends.
pub const FAREWELL_MESSAGE: &str = "Работа программы завершена";

/// Run the interactive loop until `exit` or end of input.
///
/// Returns the number of searches answered.
pub fn run<R: BufRead, W: Write>(
    catalog: &Catalog,
    mut input: R,
    mut output: W,
) -> io::Result<usize> {
    writeln!(
        output,
        "Введите наименование позиции для поиска или \"{EXIT_COMMAND}\" для выхода"
    )?;

    let mut searches = 0;
    let mut line = String::new();

    loop {
        write!(output, "{SEARCH_PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let phrase = line.trim();
        if phrase.to_lowercase() == EXIT_COMMAND {
            break;
        }

        answer(catalog, phrase, &mut output)?;
        searches += 1;
    }

    writeln!(output, "{FAREWELL_MESSAGE}")?;
    tracing::debug!(searches, "Interactive search ended");
    Ok(searches)
}

/// Search the catalog and print the result listing.
pub fn answer<W: Write>(catalog: &Catalog, query: &str, mut output: W) -> io::Result<usize> {
    let results = search::find(catalog, query);
    if results.is_empty() {
        writeln!(output, "{NOT_FOUND_MESSAGE}")?;
    } else {
        write_listing(&results, &mut output)?;
    }
    Ok(results.len())
}

/// Print records as a fixed-width table numbered from 1.
pub fn write_listing<W: Write>(records: &[&PriceRecord], mut output: W) -> io::Result<()> {
    writeln!(
        output,
        "{:<iw$} {:<nw$} {:<pw$} {:<ww$} {:<fw$} {}",
        "№",
        "Наименование",
        "Цена",
        "Вес (кг)",
        "Файл",
        "Цена за кг.",
        iw = LISTING_INDEX_WIDTH,
        nw = LISTING_NAME_WIDTH,
        pw = LISTING_PRICE_WIDTH,
        ww = LISTING_WEIGHT_WIDTH,
        fw = LISTING_FILE_WIDTH,
    )?;

    for (index, record) in records.iter().enumerate() {
        writeln!(
            output,
            "{:<iw$} {:<nw$} {:<pw$} {:<ww$} {:<fw$} {:.2}",
            index + 1,
            record.name(),
            record.price(),
            record.weight(),
            record.source_file(),
            record.unit_price(),
            iw = LISTING_INDEX_WIDTH,
            nw = LISTING_NAME_WIDTH,
            pw = LISTING_PRICE_WIDTH,
            ww = LISTING_WEIGHT_WIDTH,
            fw = LISTING_FILE_WIDTH,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from(vec![
            PriceRecord::new("Яблоко", 100.0, 2.0, "price_list.csv").unwrap(),
            PriceRecord::new("Яблоко красное", 30.0, 1.0, "price_2.csv").unwrap(),
            PriceRecord::new("Груша", 90.0, 1.0, "price_list.csv").unwrap(),
        ])
    }

    fn session(input: &str) -> (usize, String) {
        let mut out = Vec::new();
        let searches = run(&catalog(), input.as_bytes(), &mut out).unwrap();
        (searches, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_command_stops_loop() {
        let (searches, output) = session("  EXIT \nгруша\n");
        assert_eq!(searches, 0);
        assert!(!output.contains("Груша"));
        assert!(output.trim_end().ends_with(FAREWELL_MESSAGE));
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let (searches, output) = session("груша\n");
        assert_eq!(searches, 1);
        assert!(output.contains("Груша"));
        assert!(output.contains(FAREWELL_MESSAGE));
    }

    #[test]
    fn test_results_listed_by_unit_price() {
        let (_, output) = session("ябл\nexit\n");
        let first = output.lines().find(|l| l.starts_with("1 ")).unwrap();
        let second = output.lines().find(|l| l.starts_with("2 ")).unwrap();
        assert!(first.contains("Яблоко красное"), "{first}");
        assert!(first.ends_with("30.00"), "{first}");
        assert!(second.contains("price_list.csv"), "{second}");
        assert!(second.ends_with("50.00"), "{second}");
        assert!(!output.contains("Груша"));
    }

    #[test]
    fn test_prompt_and_listing_labels() {
        let (_, output) = session("груша\nexit\n");
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("Введите наименование позиции для поиска или \"exit\" для выхода")
        );
        assert!(output.contains("Поиск: "));
        let header = output.lines().find(|l| l.contains("Наименование")).unwrap();
        assert!(header.starts_with("№"));
        assert!(header.ends_with("Цена за кг."));
    }

    #[test]
    fn test_not_found_message() {
        let (searches, output) = session("ананас\nexit\n");
        assert_eq!(searches, 1);
        assert!(output.contains("Товары не найдены"));
    }

    #[test]
    fn test_listing_columns_are_fixed_width() {
        let catalog = catalog();
        let results = search::find(&catalog, "груша");
        let mut out = Vec::new();
        write_listing(&results, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();

        let expected = format!(
            "{:<3} {:<40} {:<15} {:<15} {:<20} {}",
            1, "Груша", 90, 1, "price_list.csv", "90.00"
        );
        assert_eq!(row, expected);
        assert_eq!(row.chars().count(), 3 + 1 + 40 + 1 + 15 + 1 + 15 + 1 + 20 + 1 + 5);
    }
}
