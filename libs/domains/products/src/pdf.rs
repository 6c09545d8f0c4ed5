//! Single-page PDF summary of a product.
//!
//! The page is laid out with `printpdf` using the standard Helvetica font,
//! which every PDF reader provides, so nothing is embedded. Rendering runs
//! on the blocking pool; the finished file is then handed to the response
//! body in chunks through a bounded channel.

use axum::body::Bytes;
use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point, Pt};
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::ExportError;
use crate::models::Product;

/// US Letter, in points
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;

const TITLE: &str = "Product Details";
const TITLE_SIZE: f32 = 20.0;
/// Helvetica advance of `TITLE`, in 1/1000 em
const TITLE_ADVANCE: f32 = 6780.0;
const BODY_SIZE: f32 = 14.0;
const LINE_GAP: f32 = 1.2;

const CHUNK_SIZE: usize = 8 * 1024;
const CHUNK_BUFFER: usize = 4;

/// One line of text on the page
#[derive(Debug, Clone, PartialEq)]
struct TextLine {
    text: String,
    size: f32,
    /// Length of the rule drawn under the text, in points
    underline: Option<f32>,
    /// Blank lines after this one
    space_after: f32,
}

impl TextLine {
    fn body(text: String) -> Self {
        Self {
            text,
            size: BODY_SIZE,
            underline: None,
            space_after: 0.0,
        }
    }
}

fn product_lines(product: &Product) -> Vec<TextLine> {
    vec![
        TextLine {
            text: TITLE.to_string(),
            size: TITLE_SIZE,
            underline: Some(TITLE_ADVANCE * TITLE_SIZE / 1000.0),
            space_after: 1.0,
        },
        TextLine::body(format!("ID: {}", product.product_id)),
        TextLine::body(format!("Name: {}", product.product_name)),
        TextLine::body(format!("Price: ${}", product.price)),
        TextLine::body(format!("Stock: {}", product.stock)),
    ]
}

fn pt(value: f32) -> Mm {
    Mm::from(Pt(value))
}

fn failed(err: impl std::fmt::Display) -> ExportError {
    ExportError::Failed(err.to_string())
}

fn render_document(product: &Product) -> Result<Vec<u8>, ExportError> {
    let (document, page, layer) = PdfDocument::new(
        format!("Product {}", product.product_id),
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
        "Details",
    );
    let font = document
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(failed)?;
    let layer = document.get_page(page).get_layer(layer);

    let mut cursor = PAGE_HEIGHT - MARGIN;
    for line in product_lines(product) {
        let baseline = cursor - line.size;
        layer.use_text(line.text, line.size, pt(MARGIN), pt(baseline), &font);

        if let Some(length) = line.underline {
            let y = pt(baseline - line.size * 0.1);
            layer.set_outline_thickness(line.size / 20.0);
            layer.add_line(Line {
                points: vec![
                    (Point::new(pt(MARGIN), y), false),
                    (Point::new(pt(MARGIN + length), y), false),
                ],
                is_closed: false,
            });
        }

        cursor -= line.size * LINE_GAP * (1.0 + line.space_after);
    }

    document.save_to_bytes().map_err(failed)
}

/// Render the PDF for `product` off the async runtime.
pub async fn render(product: Product) -> Result<Bytes, ExportError> {
    let product_id = product.product_id;
    let document = tokio::task::spawn_blocking(move || render_document(&product))
        .await
        .map_err(failed)??;

    tracing::debug!(product_id, bytes = document.len(), "Rendered product PDF");
    Ok(Bytes::from(document))
}

/// Feed `document` to a response body in chunks.
///
/// The sending task stops early when the receiver is dropped, e.g. because
/// the client disconnected.
pub fn stream(document: Bytes) -> ReceiverStream<Result<Bytes, Infallible>> {
    let (tx, rx) = mpsc::channel(CHUNK_BUFFER);

    tokio::spawn(async move {
        let mut offset = 0;
        while offset < document.len() {
            let end = (offset + CHUNK_SIZE).min(document.len());
            if tx.send(Ok(document.slice(offset..end))).await.is_err() {
                tracing::debug!(sent = offset, "PDF receiver dropped early");
                return;
            }
            offset = end;
        }
    });

    ReceiverStream::new(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, content::Content};
    use tokio_stream::StreamExt;

    fn lamp() -> Product {
        Product {
            product_id: 12,
            product_name: "Desk (Lamp)".to_string(),
            price: 19.99,
            stock: 4,
        }
    }

    /// Every string shown with `Tj` or `TJ` on the first page.
    fn shown_text(pdf: &[u8]) -> Vec<Vec<u8>> {
        let document = lopdf::Document::load_mem(pdf).unwrap();
        let page = *document.get_pages().values().next().unwrap();
        let content = Content::decode(&document.get_page_content(page).unwrap()).unwrap();

        let mut shown = Vec::new();
        for operation in content.operations {
            match operation.operator.as_str() {
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operation.operands.first() {
                        shown.push(bytes.clone());
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operation.operands.first() {
                        let mut joined = Vec::new();
                        for item in items {
                            if let Object::String(bytes, _) = item {
                                joined.extend_from_slice(bytes);
                            }
                        }
                        shown.push(joined);
                    }
                }
                _ => {}
            }
        }
        shown
    }

    #[test]
    fn test_lines_follow_the_product() {
        let texts: Vec<String> = product_lines(&lamp()).into_iter().map(|l| l.text).collect();
        assert_eq!(
            texts,
            [
                "Product Details",
                "ID: 12",
                "Name: Desk (Lamp)",
                "Price: $19.99",
                "Stock: 4"
            ]
        );
    }

    #[test]
    fn test_whole_price_has_no_fraction() {
        let product = Product {
            price: 10.0,
            ..lamp()
        };
        assert_eq!(product_lines(&product)[3].text, "Price: $10");
    }

    #[test]
    fn test_only_the_title_is_underlined_and_larger() {
        let lines = product_lines(&lamp());

        assert_eq!(lines[0].size, TITLE_SIZE);
        assert!(lines[0].underline.is_some());
        assert!(lines[1..].iter().all(|l| l.size == BODY_SIZE && l.underline.is_none()));
    }

    #[test]
    fn test_rendered_page_shows_every_line() {
        let pdf = render_document(&lamp()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let shown = shown_text(&pdf);
        for expected in ["Product Details", "ID: 12", "Name: Desk (Lamp)", "Price: $19.99", "Stock: 4"] {
            assert!(
                shown.iter().any(|s| s == expected.as_bytes()),
                "missing {expected:?} in {shown:?}"
            );
        }
    }

    #[test]
    fn test_text_uses_win_ansi_bytes() {
        let product = Product {
            product_name: "Mug €5 “Deluxe” – set".to_string(),
            ..lamp()
        };

        let shown = shown_text(&render_document(&product).unwrap());

        let expected: &[u8] = b"Name: Mug \x805 \x93Deluxe\x94 \x96 set";
        assert!(shown.iter().any(|s| s == expected), "got {shown:?}");
    }

    #[tokio::test]
    async fn test_render_off_runtime() {
        let pdf = render(lamp()).await.unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_stream_splits_and_preserves_bytes() {
        let document: Bytes = (0..CHUNK_SIZE * 2 + 5).map(|i| i as u8).collect::<Vec<_>>().into();

        let chunks: Vec<Bytes> = stream(document.clone())
            .map(|chunk| chunk.unwrap())
            .collect()
            .await;

        assert_eq!(
            chunks.iter().map(Bytes::len).collect::<Vec<_>>(),
            [CHUNK_SIZE, CHUNK_SIZE, 5]
        );
        assert_eq!(chunks.concat(), document.to_vec());
    }

    #[tokio::test]
    async fn test_stream_of_empty_document_ends_immediately() {
        let mut chunks = stream(Bytes::new());
        assert!(chunks.next().await.is_none());
    }
}
