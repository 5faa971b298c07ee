//! PDF serialization of laid-out resume pages.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;
use tracing::debug;

use crate::render::layout::{layout_text, Page, PageConfig, PlacedLine, PT_PER_MM};

const PDF_VERSION: &str = "1.5";
const FONT_RESOURCE: &str = "F1";
const DOCUMENT_TITLE: &str = "Resume";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF object error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write error: {0}")]
    Write(String),
}

/// A finished PDF document held in memory.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Lays out `text` and serializes it as a single-font PDF.
///
/// CPU-bound: async callers run this inside `spawn_blocking`.
pub fn render_pdf(text: &str, config: &PageConfig) -> Result<RenderedPdf, RenderError> {
    let pages = layout_text(text, config);
    let page_count = pages.len();

    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for page in &pages {
        let page_id = write_page(&mut doc, pages_id, page, config)?;
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (config.width_mm * PT_PER_MM).into(),
        (config.height_mm * PT_PER_MM).into(),
    ];
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(DOCUMENT_TITLE),
        "Producer" => Object::string_literal(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Write(e.to_string()))?;

    debug!("Rendered PDF: {} pages, {} bytes", page_count, bytes.len());

    Ok(RenderedPdf { bytes, page_count })
}

fn write_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page: &Page,
    config: &PageConfig,
) -> Result<ObjectId, RenderError> {
    let operations: Vec<Operation> = page
        .lines
        .iter()
        .filter(|placed| !placed.line.is_blank())
        .flat_map(|placed| line_operations(placed, config))
        .collect();

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Text operators for one line, positioned on the cell's vertical centre.
fn line_operations(placed: &PlacedLine, config: &PageConfig) -> Vec<Operation> {
    let x_mm = config.margin_left_mm + config.cell_margin_mm;
    let baseline_mm =
        placed.top_mm + 0.5 * config.line_height_mm + 0.3 * config.font_size_mm();

    let x_pt = x_mm * PT_PER_MM;
    let y_pt = (config.height_mm - baseline_mm) * PT_PER_MM;

    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), config.font_size_pt.into()],
        ),
        Operation::new(
            "Tw",
            vec![(placed.line.word_spacing_mm * PT_PER_MM).into()],
        ),
        Operation::new("Td", vec![x_pt.into(), y_pt.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(
                placed.line.bytes.clone(),
                StringFormat::Literal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}
