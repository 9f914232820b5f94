use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::core::{AppError, Result};
use crate::modules::returns::models::ReturnForm;

const FONT_NAME: &str = "F1";
const FONT_SIZE: i64 = 12;
const PRODUCER: &str = "vatpos";

/// Encode the form as a PDF document, one page per form page
pub fn render_pdf(form: &ReturnForm) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_NAME => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(form.pages.len());
    for page in &form.pages {
        let mut operations = Vec::new();
        for placement in page.placements() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![FONT_NAME.into(), FONT_SIZE.into()],
            ));
            operations.push(Operation::new(
                "Td",
                vec![placement.x.into(), placement.y.into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(latin1(&placement.text))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations }
            .encode()
            .map_err(|e| AppError::export(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(form.layout_width),
            Object::Integer(form.layout_height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(latin1(&form.title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::export(format!("Failed to serialize PDF: {}", e)))?;
    Ok(bytes)
}

/// Render and write the PDF, replacing any existing file at `path`
pub fn write_pdf(form: &ReturnForm, path: &Path) -> Result<usize> {
    let bytes = render_pdf(form)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}

/// Standard Type1 fonts only cover a single-byte encoding
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) => byte,
            Err(_) => b'?',
        })
        .collect()
}
