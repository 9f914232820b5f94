use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::{PrinterConfig, PrinterOutput};
use crate::core::PrintError;
use crate::modules::receipts::models::{Align, Receipt, ReceiptLine};
use crate::modules::receipts::services::receipt_composer::RECEIPT_WIDTH;

/// Something that can physically (or virtually) produce a receipt.
///
/// Implementations report how far they got when a write fails, so a caller
/// can tell a clean failure from a half-printed receipt.
pub trait ReceiptSink {
    fn print(&mut self, receipt: &Receipt) -> Result<(), PrintError>;
}

const ESC: u8 = 0x1b;
const GS: u8 = 0x1d;
const LF: u8 = 0x0a;

/// Thermal printer driven with the handful of ESC/POS commands a receipt
/// needs: initialize, alignment, emphasis, character size and cut.
pub struct EscPosPrinter<W: Write> {
    writer: W,
    device: String,
}

impl EscPosPrinter<File> {
    /// Open a printer device file (e.g. `/dev/usb/lp0`) and reset it
    pub fn open(path: &Path) -> Result<Self, PrintError> {
        let device = path.display().to_string();
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| PrintError::DeviceUnavailable {
                device: device.clone(),
                source,
            })?;

        Self::new(file, device)
    }
}

impl<W: Write> EscPosPrinter<W> {
    /// Wrap a writer and send the initialize command
    pub fn new(mut writer: W, device: impl Into<String>) -> Result<Self, PrintError> {
        let device = device.into();
        writer
            .write_all(&[ESC, b'@'])
            .and_then(|_| writer.flush())
            .map_err(|source| PrintError::DeviceUnavailable {
                device: device.clone(),
                source,
            })?;

        Ok(Self { writer, device })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &ReceiptLine) -> io::Result<()> {
        let align = match line.align {
            Align::Left => 0,
            Align::Center => 1,
            Align::Right => 2,
        };
        let size = if line.style.double_size { 0x11 } else { 0x00 };

        self.writer.write_all(&[ESC, b'a', align])?;
        self.writer.write_all(&[ESC, b'E', u8::from(line.style.bold)])?;
        self.writer.write_all(&[GS, b'!', size])?;
        self.writer.write_all(&encode_text(&line.text))?;
        self.writer.write_all(&[LF])
    }

    fn cut(&mut self) -> io::Result<()> {
        self.writer.write_all(&[GS, b'V', 0])?;
        self.writer.flush()
    }
}

impl<W: Write> ReceiptSink for EscPosPrinter<W> {
    fn print(&mut self, receipt: &Receipt) -> Result<(), PrintError> {
        let total_lines = receipt.lines.len();

        for (index, line) in receipt.lines.iter().enumerate() {
            self.write_line(line).map_err(|source| PrintError::Write {
                lines_written: index,
                total_lines,
                source,
            })?;
        }

        self.cut().map_err(PrintError::Cut)?;
        debug!(device = %self.device, lines = total_lines, "Receipt sent to printer");

        Ok(())
    }
}

/// The device code page is plain ASCII; anything else prints as `?`
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// Writes the receipt as aligned plain text, for dry runs and previews
pub struct PlainTextPrinter<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> PlainTextPrinter<W> {
    pub fn new(writer: W, width: usize) -> Self {
        Self { writer, width }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReceiptSink for PlainTextPrinter<W> {
    fn print(&mut self, receipt: &Receipt) -> Result<(), PrintError> {
        let text = receipt.to_plain_text(self.width);
        let total_lines = receipt.lines.len();

        for (index, line) in text.lines().enumerate() {
            writeln!(self.writer, "{}", line).map_err(|source| PrintError::Write {
                lines_written: index,
                total_lines,
                source,
            })?;
        }

        writeln!(self.writer, "{}", "-".repeat(self.width))
            .and_then(|_| self.writer.flush())
            .map_err(PrintError::Cut)
    }
}

/// Open the sink named by the configuration
pub fn open_printer(config: &PrinterConfig) -> Result<Box<dyn ReceiptSink + Send>, PrintError> {
    match &config.output {
        PrinterOutput::Usb { device, .. } => {
            info!(printer = %config.output, "Opening receipt printer");
            Ok(Box::new(EscPosPrinter::open(device)?))
        }
        PrinterOutput::Stdout => Ok(Box::new(PlainTextPrinter::new(io::stdout(), RECEIPT_WIDTH))),
    }
}
