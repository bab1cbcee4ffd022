//! Geometry & style model – the single source of truth for page dimensions,
//! band heights, font sizes, colors, spacing, and the items-table column
//! proportions.
//!
//! Both drawing targets (the preview region tree and the PDF composer) read
//! every constant from this module. Any value that exists in two places is a
//! correctness bug, so nothing here is duplicated elsewhere.

/// A4 portrait: 210mm × 297mm = 595.28 × 841.89 points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;

/// Page margin on all four sides, in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;

/// Usable width between the left and right margins.
pub fn inner_width() -> f32 {
    PAGE_WIDTH_PT - 2.0 * PAGE_MARGIN_PT
}

/// Usable height between the top and bottom margins.
pub fn inner_height() -> f32 {
    PAGE_HEIGHT_PT - 2.0 * PAGE_MARGIN_PT
}

// ── Band heights (points) ─────────────────────────────────────────────────

/// Header band: logo + company identity block.
pub const HEADER_BAND_H: f32 = 92.0;
/// Bill-to band: shaded client box + invoice key/value mini-table.
pub const BILL_TO_BAND_H: f32 = 112.0;
/// Items-table column header row.
pub const ITEMS_HEADER_ROW_H: f32 = 22.0;
/// Minimum height of one item row (single-line descriptions).
pub const MIN_ITEM_ROW_H: f32 = 24.0;
/// Payment note + totals band, anchored above the footer.
pub const PAYMENT_BAND_H: f32 = 118.0;
/// Footer band (thank-you line + signature block), anchored to the bottom margin.
pub const FOOTER_BAND_H: f32 = 96.0;
/// Vertical gap between stacked bands.
pub const BAND_GAP: f32 = 14.0;

// ── Typography (points) ───────────────────────────────────────────────────

pub const FONT_XS: f32 = 7.5;
pub const FONT_SM: f32 = 9.0;
pub const FONT_BASE: f32 = 10.0;
pub const FONT_MD: f32 = 11.0;
pub const FONT_LG: f32 = 14.0;
pub const FONT_XL: f32 = 20.0;

/// Baseline-to-baseline distance for wrapped body text.
pub const LINE_H: f32 = 12.0;

// ── Colors (linear RGB, 0.0–1.0) ──────────────────────────────────────────

pub const COLOR_INK: [f32; 3] = [0.13, 0.13, 0.15];
pub const COLOR_MUTED: [f32; 3] = [0.45, 0.45, 0.48];
pub const COLOR_ACCENT: [f32; 3] = [0.16, 0.32, 0.55];
pub const COLOR_WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// Bill-to shaded box background.
pub const COLOR_SHADE: [f32; 3] = [0.94, 0.95, 0.97];
/// Zebra stripe for alternating item rows.
pub const COLOR_STRIPE: [f32; 3] = [0.96, 0.97, 0.99];
/// Filled background of the emphasized grand-total row.
pub const COLOR_GRAND_FILL: [f32; 3] = [0.16, 0.32, 0.55];
/// Hairline rules and table borders.
pub const COLOR_RULE: [f32; 3] = [0.78, 0.78, 0.80];

// ── Spacing ───────────────────────────────────────────────────────────────

/// Horizontal and vertical padding inside table cells.
pub const CELL_PAD: f32 = 5.0;
/// Gap between the logo box and the company identity text.
pub const LOGO_GUTTER: f32 = 12.0;
/// Maximum box the logo may occupy inside the header band.
pub const LOGO_MAX_W: f32 = 140.0;
pub const LOGO_MAX_H: f32 = 72.0;
/// Maximum box for the signature image in the footer band.
pub const SIGNATURE_MAX_W: f32 = 120.0;
pub const SIGNATURE_MAX_H: f32 = 44.0;
/// Side of the square payment QR image.
pub const PAYMENT_QR_SIDE: f32 = 64.0;
/// Hairline rule thickness.
pub const RULE_THICKNESS: f32 = 0.6;
/// Height of one row in the totals box.
pub const TOTALS_ROW_H: f32 = 17.0;
/// Height of the emphasized grand-total row.
pub const GRAND_TOTAL_ROW_H: f32 = 22.0;
/// Fixed character budget for the client name in the bill-to box.
pub const CLIENT_NAME_CHAR_BUDGET: usize = 40;

// ── Items-table columns ───────────────────────────────────────────────────

/// Column order: description, quantity, rate, amount.
pub const COLUMN_COUNT: usize = 4;

/// Proportions of the inner width; must sum to exactly 1.0.
pub const COLUMN_RATIOS: [f32; COLUMN_COUNT] = [0.50, 0.14, 0.16, 0.20];

/// Absolute column widths in points.
pub fn column_widths() -> [f32; COLUMN_COUNT] {
    let inner = inner_width();
    let mut widths = [0.0; COLUMN_COUNT];
    for (w, r) in widths.iter_mut().zip(COLUMN_RATIOS.iter()) {
        *w = inner * r;
    }
    widths
}

/// X offset of a column's left edge, relative to the table's left edge.
pub fn column_x(index: usize) -> f32 {
    column_widths()[..index].iter().sum()
}
