mod receipt;

pub use receipt::{Align, Receipt, ReceiptItem, ReceiptLine, ReceiptTotals, Section, TextStyle};
