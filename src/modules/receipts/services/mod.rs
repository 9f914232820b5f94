pub mod printer;
pub mod receipt_composer;
pub mod receipt_job;

pub use printer::{open_printer, EscPosPrinter, PlainTextPrinter, ReceiptSink};
pub use receipt_composer::{ReceiptComposer, RECEIPT_WIDTH};
pub use receipt_job::{PrintOutcome, ReceiptJob};
