use chrono::NaiveDate;

use crate::core::money::format_amount;
use crate::modules::returns::models::{
    PageLayout, ReturnForm, ReturnFormPage, TextPlacement, COLUMN_HEADERS, COLUMN_X,
};
use crate::modules::transactions::models::{Transaction, DATE_FORMAT};

const TITLE_X: i64 = 100;
const PAGE_MARKER_X: i64 = 450;

/// Lays out the tax return summary as positioned text
#[derive(Debug, Clone)]
pub struct ReturnFormRenderer {
    title: String,
    layout: PageLayout,
}

impl ReturnFormRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            layout: PageLayout::default(),
        }
    }

    /// Place every transaction in order, starting a new page whenever the
    /// next row would cross the bottom margin. An empty ledger still
    /// yields one page carrying the header row.
    pub fn render(&self, transactions: &[Transaction], generated_on: NaiveDate) -> ReturnForm {
        let per_page = self.layout.rows_per_page().max(1);
        let chunks: Vec<&[Transaction]> = if transactions.is_empty() {
            vec![&[]]
        } else {
            transactions.chunks(per_page).collect()
        };
        let total_pages = chunks.len();

        let pages = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                let number = index + 1;
                ReturnFormPage {
                    number,
                    preamble: self.preamble(generated_on, number, total_pages),
                    header: self.header(),
                    rows: chunk
                        .iter()
                        .enumerate()
                        .map(|(slot, txn)| self.row(txn, self.layout.row_y(slot)))
                        .collect(),
                }
            })
            .collect();

        ReturnForm {
            title: self.title.clone(),
            generated_on,
            layout_width: self.layout.width,
            layout_height: self.layout.height,
            pages,
        }
    }

    fn preamble(&self, generated_on: NaiveDate, number: usize, total: usize) -> Vec<TextPlacement> {
        let mut placements = vec![
            TextPlacement::new(TITLE_X, self.layout.title_y, self.title.clone()),
            TextPlacement::new(
                TITLE_X,
                self.layout.date_y,
                format!("Date: {}", generated_on.format(DATE_FORMAT)),
            ),
        ];
        if total > 1 {
            placements.push(TextPlacement::new(
                PAGE_MARKER_X,
                self.layout.date_y,
                format!("Page {} of {}", number, total),
            ));
        }
        placements
    }

    fn header(&self) -> Vec<TextPlacement> {
        COLUMN_X
            .iter()
            .zip(COLUMN_HEADERS)
            .map(|(&x, title)| TextPlacement::new(x, self.layout.header_y, title))
            .collect()
    }

    fn row(&self, txn: &Transaction, y: i64) -> Vec<TextPlacement> {
        let cells = [
            txn.id.to_string(),
            txn.date.format(DATE_FORMAT).to_string(),
            txn.description.clone(),
            format_amount(txn.amount),
            format_amount(txn.vat),
        ];
        COLUMN_X
            .iter()
            .zip(cells)
            .map(|(&x, text)| TextPlacement::new(x, y, text))
            .collect()
    }
}
