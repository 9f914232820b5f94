use chrono::NaiveDate;
use serde::Serialize;

/// Column titles of the summary table
pub const COLUMN_HEADERS: [&str; 5] = ["ID", "Date", "Description", "Amount", "VAT"];

/// Left edge of each column, in points from the left of an A4 page
pub const COLUMN_X: [i64; 5] = [100, 150, 250, 450, 550];

/// A string drawn at a fixed position (PDF user space, origin bottom-left)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPlacement {
    pub x: i64,
    pub y: i64,
    pub text: String,
}

impl TextPlacement {
    pub fn new(x: i64, y: i64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Vertical geometry of a page, in points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: i64,
    pub height: i64,
    pub title_y: i64,
    pub date_y: i64,
    pub header_y: i64,
    pub row_step: i64,
    /// Rows are never placed below this baseline
    pub bottom_margin: i64,
}

impl Default for PageLayout {
    /// A4 portrait
    fn default() -> Self {
        Self {
            width: 595,
            height: 842,
            title_y: 800,
            date_y: 780,
            header_y: 750,
            row_step: 20,
            bottom_margin: 40,
        }
    }
}

impl PageLayout {
    /// How many table rows fit under the header row
    pub fn rows_per_page(&self) -> usize {
        let first_row_y = self.header_y - self.row_step;
        if first_row_y < self.bottom_margin || self.row_step <= 0 {
            return 0;
        }
        ((first_row_y - self.bottom_margin) / self.row_step + 1) as usize
    }

    pub fn row_y(&self, index_on_page: usize) -> i64 {
        self.header_y - self.row_step * (index_on_page as i64 + 1)
    }
}

/// One page of the return form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnFormPage {
    /// 1-based
    pub number: usize,
    /// Title, date line and page marker
    pub preamble: Vec<TextPlacement>,
    pub header: Vec<TextPlacement>,
    /// One entry per transaction, each with a cell per column
    pub rows: Vec<Vec<TextPlacement>>,
}

impl ReturnFormPage {
    /// Everything to draw on this page, top to bottom
    pub fn placements(&self) -> impl Iterator<Item = &TextPlacement> {
        self.preamble
            .iter()
            .chain(self.header.iter())
            .chain(self.rows.iter().flatten())
    }
}

/// The laid-out tax return summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnForm {
    pub title: String,
    pub generated_on: NaiveDate,
    pub layout_width: i64,
    pub layout_height: i64,
    pub pages: Vec<ReturnFormPage>,
}

impl ReturnForm {
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|page| page.rows.len()).sum()
    }

    /// Table rows across all pages, in order
    pub fn rows(&self) -> impl Iterator<Item = &Vec<TextPlacement>> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }
}
