//! Vector document composer – takes a [`DocumentLayout`] and produces PDF
//! bytes using `printpdf` (v0.8 ops-based API).
//!
//! This is Drawing Target A. It flips the region tree's top-left-origin
//! coordinates to the PDF's bottom-left origin while drawing, embeds the
//! fetched raster images as XObjects, and renders currency strings with the
//! fetched Unicode fallback font — or, when that font is unavailable,
//! substitutes the ASCII abbreviation and draws with the builtin face.

use std::collections::HashMap;

use printpdf::*;

use crate::assets::ResolvedAssets;
use crate::format::{ascii_currency, CURRENCY_GLYPH};
use crate::regions::{DocumentLayout, Region};

/// A printpdf XObject together with the pixel dimensions of the source image.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Render a DocumentLayout into PDF bytes.
///
/// Image regions whose asset did not resolve are silently skipped (a
/// `log::warn` is emitted); a missing currency font degrades currency
/// strings to the ASCII abbreviation. Neither aborts the render.
pub fn compose_pdf(layout: &DocumentLayout, assets: &ResolvedAssets) -> Result<Vec<u8>, String> {
    let page_w = Mm(layout.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(layout.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&layout.title);
    let mut img_warnings: Vec<PdfWarnMsg> = Vec::new();

    // ── Pre-register all referenced images ────────────────────────────────
    let mut keys: Vec<String> = Vec::new();
    layout.visit(|region| {
        if let Some(img) = &region.image {
            if !keys.contains(&img.key) {
                keys.push(img.key.clone());
            }
        }
    });

    let mut image_resources: HashMap<String, ImageResource> = HashMap::new();
    for key in &keys {
        let Some(resolved) = assets.image(key) else {
            log::warn!("layout references unresolved image {key:?}; skipping");
            continue;
        };
        if resolved.bytes.is_empty() {
            log::warn!("image {key:?} has no bytes; skipping");
            continue;
        }
        let raw = match RawImage::decode_from_bytes(&resolved.bytes, &mut img_warnings) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping image {key:?}: PDF encode error: {e}");
                continue;
            }
        };
        let xobj_id = doc.add_image(&raw);
        image_resources.insert(
            key.clone(),
            ImageResource {
                xobj_id,
                px_width: resolved.px_width,
                px_height: resolved.px_height,
            },
        );
    }

    // ── Currency fallback font ────────────────────────────────────────────
    let currency_font = assets.currency_font.as_deref().and_then(|bytes| {
        let mut font_warnings = Vec::new();
        match ParsedFont::from_bytes(bytes, 0, &mut font_warnings) {
            Some(parsed) => Some(doc.add_font(&parsed)),
            None => {
                log::warn!("currency font bytes unparseable; using ASCII abbreviation");
                None
            }
        }
    });

    // ── Render the single page ────────────────────────────────────────────
    let mut ops = Vec::new();
    for region in &layout.regions {
        render_region(
            &mut ops,
            region,
            layout.page_height_pt,
            &image_resources,
            currency_font.as_ref(),
        );
    }

    let page = PdfPage::new(page_w, page_h, ops);
    doc.with_pages(vec![page]);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

/// Re-encode a UTF-8 string as raw Windows-1252 bytes wrapped in a String.
/// The builtin faces use WinAnsiEncoding (one byte per glyph, 0x00–0xFF), and
/// printpdf copies these bytes into the content stream unchanged.
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: bytes in 0x80-0x9F are deliberately not valid UTF-8; the PDF
    // stream interprets them under WinAnsiEncoding, never as UTF-8.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn rgb(color: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

fn rect_points(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<LinePoint> {
    [(x1, y1), (x2, y1), (x2, y2), (x1, y2)]
        .into_iter()
        .map(|(x, y)| LinePoint {
            p: Point { x: Pt(x), y: Pt(y) },
            bezier: false,
        })
        .collect()
}

/// Recursively render a region and its children into PDF ops.
fn render_region(
    ops: &mut Vec<Op>,
    region: &Region,
    page_height: f32,
    images: &HashMap<String, ImageResource>,
    currency_font: Option<&FontId>,
) {
    // PDF coordinate system: origin at bottom-left. The region tree uses
    // origin at top-left. Convert:
    let pdf_y = page_height - region.y;

    if let Some(bg) = &region.background {
        ops.push(Op::SetFillColor { col: rgb(*bg) });
        ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: rect_points(
                        region.x,
                        pdf_y - region.height,
                        region.x + region.width,
                        pdf_y,
                    ),
                }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    if let Some(border) = &region.border {
        ops.push(Op::SetOutlineColor {
            col: rgb(border.color),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(border.width),
        });
        ops.push(Op::DrawLine {
            line: Line {
                points: rect_points(
                    region.x,
                    pdf_y - region.height,
                    region.x + region.width,
                    pdf_y,
                ),
                is_closed: true,
            },
        });
    }

    if let Some(text) = &region.text {
        let builtin = if text.bold {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        };

        for tline in &text.lines {
            if tline.text.is_empty() {
                continue;
            }
            let text_x = region.x + tline.x_offset;
            // Baseline ≈ top of line + ascender (approx 0.75 × font_size)
            let ascender_offset = text.font_size * 0.75;
            let text_y = pdf_y - tline.y_offset - ascender_offset;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(text_x),
                    y: Pt(text_y),
                },
            });
            ops.push(Op::SetFillColor {
                col: rgb(text.color),
            });

            let has_glyph = tline.text.contains(CURRENCY_GLYPH);
            match (has_glyph, currency_font) {
                (true, Some(font_id)) => {
                    // The fallback font covers the rupee glyph; draw the
                    // whole line with it so the glyph renders natively.
                    ops.push(Op::SetFontSize {
                        size: Pt(text.font_size),
                        font: font_id.clone(),
                    });
                    ops.push(Op::WriteText {
                        items: vec![TextItem::Text(tline.text.clone())],
                        font: font_id.clone(),
                    });
                }
                (true, None) => {
                    ops.push(Op::SetFontSizeBuiltinFont {
                        size: Pt(text.font_size),
                        font: builtin,
                    });
                    ops.push(Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(to_winlatin(&ascii_currency(&tline.text)))],
                        font: builtin,
                    });
                }
                (false, _) => {
                    ops.push(Op::SetFontSizeBuiltinFont {
                        size: Pt(text.font_size),
                        font: builtin,
                    });
                    ops.push(Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(to_winlatin(&tline.text))],
                        font: builtin,
                    });
                }
            }
            ops.push(Op::EndTextSection);
        }
    }

    // Image – embed from pre-registered XObject
    if let Some(img) = &region.image {
        if let Some(res) = images.get(&img.key) {
            // translate_y = bottom edge of image in PDF coordinates.
            let img_bottom_y = page_height - region.y - img.height;

            // At dpi=72 printpdf renders 1 px = 1 pt, so
            // scale = desired_pt / px_dim.
            let scale_x = if res.px_width > 0 {
                img.width / res.px_width as f32
            } else {
                1.0
            };
            let scale_y = if res.px_height > 0 {
                img.height / res.px_height as f32
            } else {
                1.0
            };

            ops.push(Op::UseXobject {
                id: res.xobj_id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(region.x)),
                    translate_y: Some(Pt(img_bottom_y)),
                    dpi: Some(72.0),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    rotate: None,
                },
            });
        }
    }

    for child in &region.children {
        render_region(ops, child, page_height, images, currency_font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::regions::TextContent;

    fn assert_valid_pdf(bytes: &[u8]) {
        assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
        assert_eq!(&bytes[0..5], b"%PDF-", "missing PDF header");
    }

    #[test]
    fn compose_empty_layout() {
        let layout = DocumentLayout::new("empty");
        let bytes = compose_pdf(&layout, &ResolvedAssets::none()).unwrap();
        assert_valid_pdf(&bytes);
    }

    #[test]
    fn compose_text_and_shapes() {
        let mut layout = DocumentLayout::new("shapes");
        let mut band = Region::new(40.0, 40.0, 200.0, 60.0).with_background(geometry::COLOR_SHADE);
        band.push(
            Region::new(48.0, 48.0, 180.0, 14.0).with_text(TextContent::single(
                "Subtotal ₹1,000.00",
                10.0,
                false,
                geometry::COLOR_INK,
            )),
        );
        layout.regions.push(band);

        // No currency font resolved: the rupee amount degrades to ASCII.
        let bytes = compose_pdf(&layout, &ResolvedAssets::none()).unwrap();
        assert_valid_pdf(&bytes);
    }

    #[test]
    fn unresolved_image_is_skipped_not_fatal() {
        let mut layout = DocumentLayout::new("img");
        layout
            .regions
            .push(Region::new(40.0, 40.0, 50.0, 50.0).with_image("logo", 50.0, 50.0));
        let bytes = compose_pdf(&layout, &ResolvedAssets::none()).unwrap();
        assert_valid_pdf(&bytes);
    }

    #[test]
    fn winlatin_maps_ellipsis_and_quotes() {
        let s = to_winlatin("a\u{2026}b\u{2019}c");
        let bytes = s.bytes().collect::<Vec<_>>();
        assert_eq!(bytes, vec![b'a', 0x85, b'b', 0x92, b'c']);
    }

    #[test]
    fn winlatin_replaces_unmappable_chars() {
        let s = to_winlatin("₹");
        assert_eq!(s.as_bytes(), b"?");
    }
}
