//! Section renderers – one pure function per band, each consuming the
//! immutable render input plus the resolved band plan and emitting a
//! positioned [`Region`] subtree.
//!
//! Geometry decisions live in [`crate::bands`] and [`crate::geometry`];
//! renderers only apply small intra-section offsets (padding, label/value
//! splits, alignment). Nothing here touches a drawing backend, so both
//! targets consume identical output.

use crate::assets::ResolvedAssets;
use crate::bands::BandPlan;
use crate::format;
use crate::geometry::{self, CELL_PAD, PAGE_MARGIN_PT};
use crate::metrics;
use crate::model::{RenderDefaults, RenderInput};
use crate::regions::{Region, TextContent, TextLine};

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// One line positioned within a cell of `width`, padding already applied.
fn aligned_line(text: String, width: f32, font_size: f32, align: Align, y_offset: f32) -> TextLine {
    let x_offset = match align {
        Align::Left => CELL_PAD,
        Align::Center => (width - metrics::measure(&text, font_size)) / 2.0,
        Align::Right => width - CELL_PAD - metrics::measure(&text, font_size),
    };
    TextLine {
        text,
        x_offset: x_offset.max(0.0),
        y_offset,
    }
}

fn text_region(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    lines: Vec<TextLine>,
    font_size: f32,
    bold: bool,
    color: [f32; 3],
) -> Region {
    Region::new(x, y, width, height).with_text(TextContent {
        lines,
        font_size,
        bold,
        color,
    })
}

/// Page-absolute top of a band frame.
fn band_y(top: f32) -> f32 {
    PAGE_MARGIN_PT + top
}

/// Truncate to a fixed character budget with an ellipsis.
fn truncate_chars(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut out: String = text.chars().take(budget).collect();
    out.push(metrics::ELLIPSIS);
    out
}

/// Scale natural pixel dimensions by the configured factor, then clamp to a
/// maximum box while preserving aspect ratio. At 72 dpi, 1 px = 1 pt.
fn fit_image(px_w: u32, px_h: u32, scale: f64, max_w: f32, max_h: f32) -> (f32, f32) {
    if px_w == 0 || px_h == 0 {
        return (0.0, 0.0);
    }
    let scale = if scale > 0.0 { scale.min(3.0) } else { 1.0 };
    let w = px_w as f32 * scale as f32;
    let h = px_h as f32 * scale as f32;
    let clamp = (max_w / w).min(max_h / h).min(1.0);
    (w * clamp, h * clamp)
}

// ── Header ────────────────────────────────────────────────────────────────

/// Left-aligned logo (when one resolved), right-aligned company identity
/// block occupying whatever inner width the logo leaves over.
pub fn render_header(input: &RenderInput, plan: &BandPlan, assets: &ResolvedAssets) -> Region {
    let inner = geometry::inner_width();
    let y0 = band_y(plan.header.top);
    let mut band = Region::new(PAGE_MARGIN_PT, y0, inner, plan.header.height);

    let mut logo_width = 0.0f32;
    if let Some(logo) = &assets.logo {
        let scale = input.settings().map(|s| s.logo_scale).unwrap_or(1.0);
        let (w, h) = fit_image(
            logo.px_width,
            logo.px_height,
            scale,
            geometry::LOGO_MAX_W,
            geometry::LOGO_MAX_H,
        );
        band.push(Region::new(PAGE_MARGIN_PT, y0, w, h).with_image("logo", w, h));
        logo_width = w + geometry::LOGO_GUTTER;
    }

    // Identity block: right-aligned against the right margin, truncated to
    // the width the logo leaves over.
    let block_x = PAGE_MARGIN_PT + logo_width;
    let block_w = inner - logo_width;

    let name = metrics::truncate_with_ellipsis(&input.company.name, block_w, geometry::FONT_LG);
    let name_line = TextLine {
        text: name.clone(),
        x_offset: (block_w - metrics::measure(&name, geometry::FONT_LG)).max(0.0),
        y_offset: 0.0,
    };
    band.push(text_region(
        block_x,
        y0,
        block_w,
        geometry::FONT_LG + 4.0,
        vec![name_line],
        geometry::FONT_LG,
        true,
        geometry::COLOR_INK,
    ));

    let mut detail_lines: Vec<TextLine> = Vec::new();
    let mut y = 0.0f32;
    for raw in input.company.address.lines() {
        let line = metrics::truncate_with_ellipsis(raw.trim(), block_w, geometry::FONT_SM);
        let x_offset = (block_w - metrics::measure(&line, geometry::FONT_SM)).max(0.0);
        detail_lines.push(TextLine {
            text: line,
            x_offset,
            y_offset: y,
        });
        y += geometry::LINE_H;
    }
    if let Some(gstin) = &input.company.gstin {
        let line = format!("GSTIN: {gstin}");
        let line = metrics::truncate_with_ellipsis(&line, block_w, geometry::FONT_SM);
        let x_offset = (block_w - metrics::measure(&line, geometry::FONT_SM)).max(0.0);
        detail_lines.push(TextLine {
            text: line,
            x_offset,
            y_offset: y,
        });
    }
    if !detail_lines.is_empty() {
        band.push(text_region(
            block_x,
            y0 + geometry::FONT_LG + 8.0,
            block_w,
            plan.header.height - geometry::FONT_LG - 8.0,
            detail_lines,
            geometry::FONT_SM,
            false,
            geometry::COLOR_MUTED,
        ));
    }

    band
}

// ── Bill-to ───────────────────────────────────────────────────────────────

/// Shaded client box on the left, invoice key/value mini-table on the right.
pub fn render_bill_to(input: &RenderInput, plan: &BandPlan, defaults: &RenderDefaults) -> Region {
    let inner = geometry::inner_width();
    let y0 = band_y(plan.bill_to.top);
    let mut band = Region::new(PAGE_MARGIN_PT, y0, inner, plan.bill_to.height);

    let box_w = inner * 0.55;
    let pad = 8.0f32;
    let text_w = box_w - 2.0 * pad;

    let mut client_box =
        Region::new(PAGE_MARGIN_PT, y0, box_w, plan.bill_to.height).with_background(geometry::COLOR_SHADE);

    let tx = PAGE_MARGIN_PT + pad;
    let mut ty = y0 + pad;

    client_box.push(text_region(
        tx,
        ty,
        text_w,
        geometry::FONT_XS + 2.0,
        vec![TextLine {
            text: "BILL TO".to_string(),
            x_offset: 0.0,
            y_offset: 0.0,
        }],
        geometry::FONT_XS,
        true,
        geometry::COLOR_ACCENT,
    ));
    ty += geometry::FONT_XS + 6.0;

    let client_name = truncate_chars(&input.client.name, geometry::CLIENT_NAME_CHAR_BUDGET);
    client_box.push(text_region(
        tx,
        ty,
        text_w,
        geometry::FONT_MD + 2.0,
        vec![TextLine {
            text: client_name,
            x_offset: 0.0,
            y_offset: 0.0,
        }],
        geometry::FONT_MD,
        true,
        geometry::COLOR_INK,
    ));
    ty += geometry::FONT_MD + 6.0;

    let mut detail_lines: Vec<TextLine> = Vec::new();
    let mut dy = 0.0f32;
    if let Some(address) = &input.client.address {
        // The band has fixed height; long addresses keep their first three
        // wrapped lines.
        for line in metrics::wrap_lines(address, text_w, geometry::FONT_SM).into_iter().take(3) {
            detail_lines.push(TextLine {
                text: line,
                x_offset: 0.0,
                y_offset: dy,
            });
            dy += geometry::LINE_H;
        }
    }
    if let Some(gstin) = &input.client.gstin {
        detail_lines.push(TextLine {
            text: format!("GSTIN: {gstin}"),
            x_offset: 0.0,
            y_offset: dy,
        });
        dy += geometry::LINE_H;
    }
    if let Some(project) = &input.invoice.project {
        let line = metrics::truncate_with_ellipsis(
            &format!("Project: {project}"),
            text_w,
            geometry::FONT_SM,
        );
        detail_lines.push(TextLine {
            text: line,
            x_offset: 0.0,
            y_offset: dy,
        });
    }
    if !detail_lines.is_empty() {
        client_box.push(text_region(
            tx,
            ty,
            text_w,
            plan.bill_to.height - (ty - y0) - pad,
            detail_lines,
            geometry::FONT_SM,
            false,
            geometry::COLOR_MUTED,
        ));
    }
    band.push(client_box);

    // Key/value mini-table with independent label and value columns.
    let table_x = PAGE_MARGIN_PT + inner * 0.60;
    let table_w = inner * 0.40;
    let label_w = 80.0f32;
    let value_w = table_w - label_w;
    let row_h = 16.0f32;

    let hsn = input
        .settings()
        .and_then(|s| s.hsn_code.clone())
        .unwrap_or_else(|| defaults.hsn_code.clone());
    let rows: Vec<(&str, String)> = vec![
        ("Invoice No.", input.invoice.code.clone()),
        ("Date", format::format_date(&input.invoice.issue_date)),
        ("HSN/SAC", hsn),
    ];

    for (i, (label, value)) in rows.into_iter().enumerate() {
        let row_y = y0 + i as f32 * row_h;
        band.push(text_region(
            table_x,
            row_y,
            label_w,
            row_h,
            vec![TextLine {
                text: label.to_string(),
                x_offset: 0.0,
                y_offset: 0.0,
            }],
            geometry::FONT_SM,
            true,
            geometry::COLOR_MUTED,
        ));
        let value = metrics::truncate_with_ellipsis(&value, value_w, geometry::FONT_SM);
        band.push(text_region(
            table_x + label_w,
            row_y,
            value_w,
            row_h,
            vec![TextLine {
                text: value,
                x_offset: 0.0,
                y_offset: 0.0,
            }],
            geometry::FONT_SM,
            false,
            geometry::COLOR_INK,
        ));
    }

    band
}

// ── Items table ───────────────────────────────────────────────────────────

/// Column header row, zebra-striped body rows from the cached wrap plan,
/// and a vertical rule per column boundary.
pub fn render_items(input: &RenderInput, plan: &BandPlan, defaults: &RenderDefaults) -> Region {
    let inner = geometry::inner_width();
    let y0 = band_y(plan.items.top);
    let widths = geometry::column_widths();
    let mut table = Region::new(PAGE_MARGIN_PT, y0, inner, plan.items.height)
        .with_border(geometry::RULE_THICKNESS, geometry::COLOR_RULE);

    let qty_label = input
        .settings()
        .and_then(|s| s.quantity_label.clone())
        .unwrap_or_else(|| defaults.quantity_label.clone());

    // Header row.
    let mut header = Region::new(PAGE_MARGIN_PT, y0, inner, geometry::ITEMS_HEADER_ROW_H)
        .with_background(geometry::COLOR_INK);
    let label_y = (geometry::ITEMS_HEADER_ROW_H - geometry::FONT_SM) / 2.0 - 1.0;
    let labels = [
        ("DESCRIPTION".to_string(), Align::Left),
        (qty_label.to_uppercase(), Align::Center),
        ("RATE".to_string(), Align::Right),
        ("AMOUNT".to_string(), Align::Right),
    ];
    for (col, (label, align)) in labels.into_iter().enumerate() {
        header.push(text_region(
            PAGE_MARGIN_PT + geometry::column_x(col),
            y0,
            widths[col],
            geometry::ITEMS_HEADER_ROW_H,
            vec![aligned_line(label, widths[col], geometry::FONT_SM, align, label_y)],
            geometry::FONT_SM,
            true,
            geometry::COLOR_WHITE,
        ));
    }
    table.push(header);

    // Body rows, heights and wraps taken verbatim from the band plan.
    let mut row_y = y0 + geometry::ITEMS_HEADER_ROW_H;
    for (visual_index, row) in plan.rows.iter().enumerate() {
        let item = &input.items[row.item_index];
        let mut row_region = Region::new(PAGE_MARGIN_PT, row_y, inner, row.height);
        if visual_index % 2 == 1 {
            row_region.background = Some(geometry::COLOR_STRIPE);
        }

        let desc_lines: Vec<TextLine> = row
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| TextLine {
                text: line.clone(),
                x_offset: CELL_PAD,
                y_offset: CELL_PAD + i as f32 * geometry::LINE_H,
            })
            .collect();
        row_region.push(text_region(
            PAGE_MARGIN_PT,
            row_y,
            widths[0],
            row.height,
            desc_lines,
            geometry::FONT_SM,
            false,
            geometry::COLOR_INK,
        ));

        let numeric = [
            (1, format::format_quantity(item.qty), Align::Center),
            (2, format::format_currency(item.unit_price), Align::Right),
            (3, format::format_currency(item.amount), Align::Right),
        ];
        for (col, value, align) in numeric {
            row_region.push(text_region(
                PAGE_MARGIN_PT + geometry::column_x(col),
                row_y,
                widths[col],
                row.height,
                vec![aligned_line(value, widths[col], geometry::FONT_SM, align, CELL_PAD)],
                geometry::FONT_SM,
                false,
                geometry::COLOR_INK,
            ));
        }

        table.push(row_region);
        row_y += row.height;
    }

    // Vertical rule at every interior column boundary.
    for col in 1..geometry::COLUMN_COUNT {
        table.push(Region::vertical_rule(
            PAGE_MARGIN_PT + geometry::column_x(col),
            y0,
            plan.items.height,
        ));
    }

    table
}

// ── Payment note + totals ─────────────────────────────────────────────────

fn amount_is_zero(amount: f64) -> bool {
    (amount.abs() * 100.0).round() as i64 == 0
}

/// Rows of the totals box, in render order: subtotal, regime-dependent tax
/// rows with zero-amount suppression, total.
fn totals_rows(input: &RenderInput) -> Vec<(String, String)> {
    let invoice = &input.invoice;
    let mut rows = vec![(
        "Subtotal".to_string(),
        format::format_currency(invoice.subtotal),
    )];

    if invoice.use_igst {
        if !amount_is_zero(invoice.igst) {
            rows.push((
                format!("IGST ({})", format::format_percent(invoice.igst_pct)),
                format::format_currency(invoice.igst),
            ));
        }
    } else {
        if !amount_is_zero(invoice.cgst) {
            rows.push((
                format!("CGST ({})", format::format_percent(invoice.cgst_pct)),
                format::format_currency(invoice.cgst),
            ));
        }
        if !amount_is_zero(invoice.sgst) {
            rows.push((
                format!("SGST ({})", format::format_percent(invoice.sgst_pct)),
                format::format_currency(invoice.sgst),
            ));
        }
    }

    rows.push(("Total".to_string(), format::format_currency(invoice.total)));
    rows
}

/// Free-text payment note (with optional QR) on the left, bordered totals
/// box with the emphasized grand-total row on the right.
pub fn render_payment(
    input: &RenderInput,
    plan: &BandPlan,
    assets: &ResolvedAssets,
    defaults: &RenderDefaults,
) -> Region {
    let inner = geometry::inner_width();
    let y0 = band_y(plan.payment.top);
    let mut band = Region::new(PAGE_MARGIN_PT, y0, inner, plan.payment.height);

    // Left half: note + QR.
    let left_w = inner * 0.50;
    let mut note_w = left_w;
    if let Some(qr) = &assets.payment_qr {
        let side = geometry::PAYMENT_QR_SIDE.min(qr.px_width.max(qr.px_height) as f32);
        band.push(
            Region::new(PAGE_MARGIN_PT + left_w - side, y0, side, side)
                .with_image("payment_qr", side, side),
        );
        note_w = left_w - side - geometry::LOGO_GUTTER;
    }

    band.push(text_region(
        PAGE_MARGIN_PT,
        y0,
        note_w,
        geometry::FONT_XS + 2.0,
        vec![TextLine {
            text: "PAYMENT DETAILS".to_string(),
            x_offset: 0.0,
            y_offset: 0.0,
        }],
        geometry::FONT_XS,
        true,
        geometry::COLOR_ACCENT,
    ));

    let note = input
        .settings()
        .and_then(|s| s.payment_note.clone())
        .unwrap_or_else(|| defaults.payment_note.clone());
    let note_top = geometry::FONT_XS + 8.0;
    let max_note_lines =
        ((plan.payment.height - note_top) / geometry::LINE_H).floor().max(1.0) as usize;
    let note_lines: Vec<TextLine> = metrics::wrap_lines(&note, note_w, geometry::FONT_SM)
        .into_iter()
        .take(max_note_lines)
        .enumerate()
        .map(|(i, line)| TextLine {
            text: line,
            x_offset: 0.0,
            y_offset: i as f32 * geometry::LINE_H,
        })
        .collect();
    band.push(text_region(
        PAGE_MARGIN_PT,
        y0 + note_top,
        note_w,
        plan.payment.height - note_top,
        note_lines,
        geometry::FONT_SM,
        false,
        geometry::COLOR_MUTED,
    ));

    // Right half: bordered totals box.
    let box_x = PAGE_MARGIN_PT + inner * 0.55;
    let box_w = inner * 0.45;
    let rows = totals_rows(input);
    let box_h = rows.len() as f32 * geometry::TOTALS_ROW_H + geometry::GRAND_TOTAL_ROW_H;
    let mut totals = Region::new(box_x, y0, box_w, box_h)
        .with_border(geometry::RULE_THICKNESS, geometry::COLOR_RULE);

    let mut row_y = y0;
    for (label, amount) in &rows {
        let baseline = (geometry::TOTALS_ROW_H - geometry::FONT_SM) / 2.0 - 1.0;
        totals.push(text_region(
            box_x,
            row_y,
            box_w,
            geometry::TOTALS_ROW_H,
            vec![aligned_line(label.clone(), box_w, geometry::FONT_SM, Align::Left, baseline)],
            geometry::FONT_SM,
            false,
            geometry::COLOR_MUTED,
        ));
        totals.push(text_region(
            box_x,
            row_y,
            box_w,
            geometry::TOTALS_ROW_H,
            vec![aligned_line(amount.clone(), box_w, geometry::FONT_SM, Align::Right, baseline)],
            geometry::FONT_SM,
            false,
            geometry::COLOR_INK,
        ));
        row_y += geometry::TOTALS_ROW_H;
    }

    // Emphasized grand-total row: filled background, larger bold type.
    let mut grand = Region::new(box_x, row_y, box_w, geometry::GRAND_TOTAL_ROW_H)
        .with_background(geometry::COLOR_GRAND_FILL);
    let baseline = (geometry::GRAND_TOTAL_ROW_H - geometry::FONT_MD) / 2.0 - 1.0;
    grand.push(text_region(
        box_x,
        row_y,
        box_w,
        geometry::GRAND_TOTAL_ROW_H,
        vec![aligned_line(
            "Grand Total".to_string(),
            box_w,
            geometry::FONT_MD,
            Align::Left,
            baseline,
        )],
        geometry::FONT_MD,
        true,
        geometry::COLOR_WHITE,
    ));
    grand.push(text_region(
        box_x,
        row_y,
        box_w,
        geometry::GRAND_TOTAL_ROW_H,
        vec![aligned_line(
            format::format_currency(input.invoice.total),
            box_w,
            geometry::FONT_MD,
            Align::Right,
            baseline,
        )],
        geometry::FONT_MD,
        true,
        geometry::COLOR_WHITE,
    ));
    totals.push(grand);

    band.push(totals);
    band
}

// ── Footer / signature ────────────────────────────────────────────────────

/// Thank-you line and company name on the left; on the right, the signature
/// image with its rule and issue-date caption — but only when a signature
/// was requested AND its image actually resolved.
pub fn render_footer(
    input: &RenderInput,
    plan: &BandPlan,
    assets: &ResolvedAssets,
    defaults: &RenderDefaults,
) -> Region {
    let inner = geometry::inner_width();
    let y0 = band_y(plan.footer.top);
    let mut band = Region::new(PAGE_MARGIN_PT, y0, inner, plan.footer.height);

    band.push(text_region(
        PAGE_MARGIN_PT,
        y0 + plan.footer.height - 2.0 * geometry::LINE_H,
        inner * 0.5,
        geometry::LINE_H,
        vec![TextLine {
            text: defaults.thank_you.clone(),
            x_offset: 0.0,
            y_offset: 0.0,
        }],
        geometry::FONT_SM,
        false,
        geometry::COLOR_MUTED,
    ));
    band.push(text_region(
        PAGE_MARGIN_PT,
        y0 + plan.footer.height - geometry::LINE_H,
        inner * 0.5,
        geometry::LINE_H,
        vec![TextLine {
            text: input.company.name.clone(),
            x_offset: 0.0,
            y_offset: 0.0,
        }],
        geometry::FONT_SM,
        true,
        geometry::COLOR_INK,
    ));

    if input.invoice.wants_signature() {
        if let Some(signature) = &assets.signature {
            let scale = input.settings().map(|s| s.signature_scale).unwrap_or(1.0);
            let (w, h) = fit_image(
                signature.px_width,
                signature.px_height,
                scale,
                geometry::SIGNATURE_MAX_W,
                geometry::SIGNATURE_MAX_H,
            );
            let rule_w = geometry::SIGNATURE_MAX_W;
            let block_x = PAGE_MARGIN_PT + inner - rule_w;
            let rule_y = y0 + h + 4.0;

            band.push(
                Region::new(block_x + (rule_w - w) / 2.0, y0, w, h).with_image("signature", w, h),
            );
            // Rule and caption accompany a placed image only.
            band.push(Region::horizontal_rule(block_x, rule_y, rule_w));
            let caption = format::format_date(&input.invoice.issue_date);
            let caption_x = (rule_w - metrics::measure(&caption, geometry::FONT_XS)) / 2.0;
            band.push(text_region(
                block_x,
                rule_y + 4.0,
                rule_w,
                geometry::FONT_XS + 2.0,
                vec![TextLine {
                    text: caption,
                    x_offset: caption_x.max(0.0),
                    y_offset: 0.0,
                }],
                geometry::FONT_XS,
                false,
                geometry::COLOR_MUTED,
            ));
        }
    }

    band
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ResolvedImage;
    use crate::bands;
    use crate::model::{Client, Company, CompanySettings, Invoice, LineItem};

    fn sample_input() -> RenderInput {
        RenderInput {
            invoice: Invoice {
                code: "INV-2026-0042".to_string(),
                issue_date: "2026-01-05".to_string(),
                project: Some("Warehouse revamp".to_string()),
                use_igst: false,
                cgst_pct: 9.0,
                sgst_pct: 9.0,
                igst_pct: 0.0,
                cgst: 9.0,
                sgst: 9.0,
                igst: 0.0,
                subtotal: 100.0,
                total: 118.0,
                show_my_signature: true,
                require_client_signature: false,
            },
            company: Company {
                name: "Acme Traders Pvt Ltd".to_string(),
                address: "14 Industrial Estate\nPune 411001".to_string(),
                gstin: Some("27AAACA1111A1Z5".to_string()),
            },
            settings: None,
            client: Client {
                name: "Globex Retail".to_string(),
                gstin: Some("29AAACG2222B1Z9".to_string()),
                address: Some("2nd Floor, MG Road\nBengaluru 560001".to_string()),
            },
            items: vec![LineItem {
                description: "Consulting".to_string(),
                qty: 2.0,
                unit_price: 50.0,
                amount: 100.0,
            }],
        }
    }

    fn fake_image(px_w: u32, px_h: u32) -> ResolvedImage {
        ResolvedImage {
            bytes: Vec::new(),
            px_width: px_w,
            px_height: px_h,
        }
    }

    fn collect_texts(region: &Region) -> Vec<String> {
        let mut texts = Vec::new();
        fn walk(r: &Region, out: &mut Vec<String>) {
            if let Some(t) = &r.text {
                for line in &t.lines {
                    out.push(line.text.clone());
                }
            }
            for c in &r.children {
                walk(c, out);
            }
        }
        walk(region, &mut texts);
        texts
    }

    #[test]
    fn header_reserves_no_gutter_without_logo() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let band = render_header(&input, &plan, &ResolvedAssets::none());
        // First text child is the company name block, flush with the margin.
        let name_block = band.children.iter().find(|r| r.text.is_some()).unwrap();
        assert!((name_block.x - PAGE_MARGIN_PT).abs() < 1e-4);
    }

    #[test]
    fn header_shifts_text_right_of_resolved_logo() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let mut assets = ResolvedAssets::none();
        assets.logo = Some(fake_image(100, 50));

        let band = render_header(&input, &plan, &assets);
        let logo = band.children.iter().find(|r| r.image.is_some()).unwrap();
        let name_block = band.children.iter().find(|r| r.text.is_some()).unwrap();
        let expected_x = PAGE_MARGIN_PT + logo.width + geometry::LOGO_GUTTER;
        assert!(
            (name_block.x - expected_x).abs() < 1e-3,
            "text at {} expected {expected_x}",
            name_block.x
        );
    }

    #[test]
    fn logo_clamps_to_band_box_preserving_aspect() {
        let (w, h) = fit_image(1000, 500, 1.0, geometry::LOGO_MAX_W, geometry::LOGO_MAX_H);
        assert!(w <= geometry::LOGO_MAX_W + 1e-3);
        assert!(h <= geometry::LOGO_MAX_H + 1e-3);
        assert!((w / h - 2.0).abs() < 1e-3, "aspect ratio must survive clamping");
    }

    #[test]
    fn oversized_scale_is_clamped() {
        let (w, _) = fit_image(40, 40, 99.0, geometry::LOGO_MAX_W, geometry::LOGO_MAX_H);
        // 40px × 3.0 (max scale) = 120pt, under the max box.
        assert!((w - 120.0).abs() < 1e-3);
    }

    #[test]
    fn bill_to_truncates_client_name_to_char_budget() {
        let mut input = sample_input();
        input.client.name = "X".repeat(geometry::CLIENT_NAME_CHAR_BUDGET + 20);
        let plan = bands::resolve(&input.items);
        let band = render_bill_to(&input, &plan, &RenderDefaults::default());
        let texts = collect_texts(&band);
        let name = texts
            .iter()
            .find(|t| t.starts_with('X'))
            .expect("client name rendered");
        assert_eq!(name.chars().count(), geometry::CLIENT_NAME_CHAR_BUDGET + 1);
        assert!(name.ends_with(metrics::ELLIPSIS));
    }

    #[test]
    fn bill_to_shows_invoice_number_and_formatted_date() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let band = render_bill_to(&input, &plan, &RenderDefaults::default());
        let texts = collect_texts(&band);
        assert!(texts.iter().any(|t| t == "INV-2026-0042"));
        assert!(texts.iter().any(|t| t == "05 Jan 2026"));
    }

    #[test]
    fn items_header_uses_quantity_label_override() {
        let mut input = sample_input();
        input.settings = Some(CompanySettings {
            quantity_label: Some("Pkg".to_string()),
            ..CompanySettings::default()
        });
        let plan = bands::resolve(&input.items);
        let table = render_items(&input, &plan, &RenderDefaults::default());
        let texts = collect_texts(&table);
        assert!(texts.iter().any(|t| t == "PKG"));
        assert!(!texts.iter().any(|t| t == "QTY"));
    }

    #[test]
    fn items_rows_emit_wrapped_sublines() {
        let mut input = sample_input();
        input.items[0].description = "A very long line item description that will \
            certainly not fit in the description column on one single line"
            .to_string();
        let plan = bands::resolve(&input.items);
        let table = render_items(&input, &plan, &RenderDefaults::default());

        let desc_region = table.children[1].children[0].text.as_ref().unwrap();
        assert_eq!(desc_region.lines.len(), plan.rows[0].lines.len());
        assert!(desc_region.lines.len() > 1);
    }

    #[test]
    fn items_table_draws_interior_column_rules() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let table = render_items(&input, &plan, &RenderDefaults::default());
        let rules = table
            .children
            .iter()
            .filter(|r| r.width == geometry::RULE_THICKNESS)
            .count();
        assert_eq!(rules, geometry::COLUMN_COUNT - 1);
    }

    #[test]
    fn totals_intrastate_emits_cgst_then_sgst() {
        let input = sample_input();
        let rows = totals_rows(&input);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Subtotal", "CGST (9%)", "SGST (9%)", "Total"]);
        assert_eq!(rows[1].1, "₹9.00");
        assert_eq!(rows[3].1, "₹118.00");
    }

    #[test]
    fn totals_interstate_emits_single_igst_row() {
        let mut input = sample_input();
        input.invoice.use_igst = true;
        input.invoice.igst_pct = 18.0;
        input.invoice.igst = 18.0;
        input.invoice.cgst = 0.0;
        input.invoice.sgst = 0.0;
        let rows = totals_rows(&input);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Subtotal", "IGST (18%)", "Total"]);
    }

    #[test]
    fn totals_suppresses_rows_rounding_to_zero() {
        let mut input = sample_input();
        input.invoice.cgst = 0.004; // rounds to ₹0.00
        input.invoice.sgst = 9.0;
        let rows = totals_rows(&input);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Subtotal", "SGST (9%)", "Total"]);
    }

    #[test]
    fn payment_band_falls_back_to_default_note() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let defaults = RenderDefaults::default();
        let band = render_payment(&input, &plan, &ResolvedAssets::none(), &defaults);
        let texts = collect_texts(&band);
        let first_note_line = defaults.payment_note.lines().next().unwrap();
        assert!(
            texts.iter().any(|t| t.contains(first_note_line)),
            "default payment note missing from {texts:?}"
        );
    }

    #[test]
    fn grand_total_row_is_emphasized() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let band = render_payment(&input, &plan, &ResolvedAssets::none(), &RenderDefaults::default());

        let mut grand_bg = None;
        fn walk(r: &Region, out: &mut Option<[f32; 3]>) {
            let has_grand_label = r.children.iter().any(|c| {
                c.text
                    .as_ref()
                    .is_some_and(|t| t.lines.iter().any(|l| l.text == "Grand Total"))
            });
            if has_grand_label {
                *out = r.background;
            }
            for c in &r.children {
                walk(c, out);
            }
        }
        for r in &band.children {
            walk(r, &mut grand_bg);
        }
        assert_eq!(grand_bg, Some(geometry::COLOR_GRAND_FILL));
    }

    #[test]
    fn footer_without_resolved_signature_draws_no_rule() {
        let input = sample_input(); // wants a signature
        let plan = bands::resolve(&input.items);
        let band = render_footer(&input, &plan, &ResolvedAssets::none(), &RenderDefaults::default());
        assert!(band.children.iter().all(|r| r.image.is_none()));
        let rules = band
            .children
            .iter()
            .filter(|r| r.height == geometry::RULE_THICKNESS)
            .count();
        assert_eq!(rules, 0, "rule must only accompany a placed image");
    }

    #[test]
    fn footer_with_signature_draws_image_rule_and_date() {
        let input = sample_input();
        let plan = bands::resolve(&input.items);
        let mut assets = ResolvedAssets::none();
        assets.signature = Some(fake_image(200, 80));
        let band = render_footer(&input, &plan, &assets, &RenderDefaults::default());

        assert!(band.children.iter().any(|r| r.image.is_some()));
        assert!(band
            .children
            .iter()
            .any(|r| r.height == geometry::RULE_THICKNESS));
        let texts = collect_texts(&band);
        assert!(texts.iter().any(|t| t == "05 Jan 2026"));
    }

    #[test]
    fn footer_without_signature_request_draws_nothing_extra() {
        let mut input = sample_input();
        input.invoice.show_my_signature = false;
        input.invoice.require_client_signature = false;
        let plan = bands::resolve(&input.items);
        let mut assets = ResolvedAssets::none();
        assets.signature = Some(fake_image(200, 80));
        let band = render_footer(&input, &plan, &assets, &RenderDefaults::default());
        assert!(band.children.iter().all(|r| r.image.is_none()));
    }
}
