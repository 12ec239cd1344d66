use crate::core::data::{Ledger, POINTS};
use crate::core::derive::{Totals, TotalsDisplay, MARKUP_RATE, VAT_RATE};
use crate::utils::format::{truncate_string, CurrencyFormat};
use colored::*;

const NAME_MIN_WIDTH: usize = 4;
const NAME_MAX_WIDTH: usize = 24;
const ID_WIDTH: usize = 8;

pub struct OutputStyle;

impl OutputStyle {
    pub fn number(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn total(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{}: {}", Self::label(&format!("{:>16}", label)), color_fn(value));
    }
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

/// Plain rendering of a raw input value: `2` rather than `2.0`
pub fn format_plain(value: f64) -> String {
    format!("{}", value)
}

/// Renders the worksheet grid and the markup/VAT cascade
pub struct WorksheetView<'a> {
    ledger: &'a Ledger,
    shown: TotalsDisplay,
}

impl<'a> WorksheetView<'a> {
    pub fn new(ledger: &'a Ledger, totals: &Totals, currency: &CurrencyFormat) -> Self {
        Self {
            ledger,
            shown: totals.display(currency),
        }
    }

    pub fn print(&self) {
        self.print_grid();
        println!();
        self.print_totals();
    }

    pub fn print_grid(&self) {
        let widths = self.column_widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}", left, segments.join(mid), right)
        };

        println!("{}", rule("┌", "┬", "┐"));
        let mut header = vec!["#".to_string(), "Name".to_string(), "Price".to_string()];
        header.extend((1..=POINTS).map(|p| format!("P{}", p)));
        header.push("Total".to_string());
        header.push("ID".to_string());
        self.print_line(&header, &widths, |text| OutputStyle::header(text));
        println!("{}", rule("├", "┼", "┤"));

        for (i, row) in self.ledger.rows().iter().enumerate() {
            let mut cells = vec![
                (i + 1).to_string(),
                truncate_string(&row.name, NAME_MAX_WIDTH),
                format_plain(row.unit_price),
            ];
            cells.extend(row.quantities.iter().map(|q| format_plain(*q)));
            cells.push(self.shown.row_totals[i].clone());
            cells.push(short_id(row.id.as_str()));
            self.print_line(&cells, &widths, |text| OutputStyle::number(text));
        }

        println!("{}", rule("├", "┼", "┤"));
        let mut sums = vec![String::new(), "Sum".to_string(), String::new()];
        sums.extend(self.shown.per_point.iter().cloned());
        sums.push(self.shown.base_rounded.clone());
        sums.push(String::new());
        self.print_line(&sums, &widths, |text| OutputStyle::total(text));
        println!("{}", rule("└", "┴", "┘"));
    }

    pub fn print_totals(&self) {
        OutputStyle::print_header("💰 Totals");
        OutputStyle::print_field_colored("Base total", &self.shown.base_total, OutputStyle::number);
        OutputStyle::print_field_colored(
            &format!("Markup {}%", percent(MARKUP_RATE)),
            &self.shown.markup,
            OutputStyle::number,
        );
        OutputStyle::print_field_colored(
            "With markup",
            &self.shown.subtotal_with_markup,
            OutputStyle::number,
        );
        OutputStyle::print_field_colored(
            &format!("VAT {}%", percent(VAT_RATE)),
            &self.shown.vat,
            OutputStyle::number,
        );
        OutputStyle::print_field_colored("Grand total", &self.shown.grand_total, OutputStyle::total);
    }

    fn print_line(&self, cells: &[String], widths: &[usize], style: impl Fn(&str) -> ColoredString) {
        let rendered: Vec<String> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                // name is left-aligned, everything else is numeric
                let padded = if col == 1 {
                    pad_right(cell, *width)
                } else {
                    pad_left(cell, *width)
                };
                style(&padded).to_string()
            })
            .collect();
        println!("│ {} │", rendered.join(" │ "));
    }

    fn column_widths(&self) -> Vec<usize> {
        let rows = self.ledger.rows();
        let mut widths = Vec::with_capacity(POINTS + 5);

        widths.push(rows.len().to_string().len().max(1));
        widths.push(
            rows.iter()
                .map(|r| r.name.chars().count().min(NAME_MAX_WIDTH))
                .max()
                .unwrap_or(0)
                .max(NAME_MIN_WIDTH),
        );
        widths.push(
            rows.iter()
                .map(|r| format_plain(r.unit_price).len())
                .max()
                .unwrap_or(0)
                .max("Price".len()),
        );
        for point in 0..POINTS {
            let widest_value = rows
                .iter()
                .map(|r| format_plain(r.quantities[point]).len())
                .max()
                .unwrap_or(0);
            widths.push(widest_value.max(self.shown.per_point[point].len()).max(2));
        }
        widths.push(
            self.shown
                .row_totals
                .iter()
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(self.shown.base_rounded.len())
                .max("Total".len()),
        );
        widths.push(ID_WIDTH);
        widths
    }
}

fn percent(rate: f64) -> String {
    format_plain((rate * 100.0).round())
}

fn short_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Field, SequentialIds};
    use crate::core::derive::recompute;

    #[test]
    fn test_format_plain_drops_trailing_zero() {
        assert_eq!(format_plain(2.0), "2");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(-3.0), "-3");
    }

    #[test]
    fn test_rate_labels() {
        assert_eq!(percent(MARKUP_RATE), "35");
        assert_eq!(percent(VAT_RATE), "7");
    }

    #[test]
    fn test_padding_counts_characters_not_bytes() {
        assert_eq!(pad_left("฿1", 4), "  ฿1");
        assert_eq!(pad_right("ทราย", 6), "ทราย  ");
    }

    #[test]
    fn test_column_widths_fit_content() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let id = ledger.rows()[0].id.clone();
        ledger.update_field(&id, Field::Name, "Portland cement");
        ledger.update_field(&id, Field::UnitPrice, "1250.75");
        ledger.update_field(&id, Field::Quantity(0), "1000");

        let totals = recompute(&ledger);
        let view = WorksheetView::new(&ledger, &totals, &CurrencyFormat::default());
        let widths = view.column_widths();

        assert_eq!(widths.len(), POINTS + 5);
        assert_eq!(widths[1], "Portland cement".len());
        assert_eq!(widths[2], "1250.75".len());
        assert_eq!(widths[3], "1,250,750".len());
        assert_eq!(widths[POINTS + 3], "1,250,750".len());
    }
}
