//! Band layout resolver – converts the fixed band heights of the geometry
//! model plus the variable items-table content into concrete vertical frames
//! for every section.
//!
//! All frames use top-down coordinates where `0.0` is the printable top
//! (the page margin is excluded here and added back when regions are built).
//! The header and bill-to bands stack from the top; the payment and footer
//! bands anchor to the printable bottom; the items table takes the middle.
//!
//! Each item's description is wrapped exactly once here and cached in its
//! [`RenderedRow`], so the height planning and the drawing pass can never
//! disagree about line breaks.

use crate::geometry;
use crate::metrics;
use crate::model::LineItem;

/// A vertical strip of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandFrame {
    pub top: f32,
    pub height: f32,
}

impl BandFrame {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// A line item with its resolved wrap result and row height.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    /// Index into the render input's item slice.
    pub item_index: usize,
    /// Cached wrapped description lines.
    pub lines: Vec<String>,
    pub height: f32,
}

/// Resolved vertical frames for one render pass.
#[derive(Debug, Clone)]
pub struct BandPlan {
    pub header: BandFrame,
    pub bill_to: BandFrame,
    /// Items band: column header row plus all kept body rows.
    pub items: BandFrame,
    pub payment: BandFrame,
    pub footer: BandFrame,
    pub rows: Vec<RenderedRow>,
    /// Rows dropped because the table collided with the payment band.
    pub clipped_rows: usize,
}

/// Width available for wrapped description text inside its column.
pub fn description_wrap_width() -> f32 {
    geometry::column_widths()[0] - 2.0 * geometry::CELL_PAD
}

/// Resolve all band frames and per-row heights for the given items.
pub fn resolve(items: &[LineItem]) -> BandPlan {
    let printable_h = geometry::inner_height();

    let header = BandFrame {
        top: 0.0,
        height: geometry::HEADER_BAND_H,
    };
    let bill_to = BandFrame {
        top: header.bottom() + geometry::BAND_GAP,
        height: geometry::BILL_TO_BAND_H,
    };

    let footer = BandFrame {
        top: printable_h - geometry::FOOTER_BAND_H,
        height: geometry::FOOTER_BAND_H,
    };
    let payment = BandFrame {
        top: footer.top - geometry::PAYMENT_BAND_H,
        height: geometry::PAYMENT_BAND_H,
    };

    let items_top = bill_to.bottom() + geometry::BAND_GAP;
    let items_bottom_limit = payment.top - geometry::BAND_GAP;

    let wrap_width = description_wrap_width();
    let mut rows = Vec::with_capacity(items.len());
    let mut clipped_rows = 0usize;
    let mut used = geometry::ITEMS_HEADER_ROW_H;

    for (item_index, item) in items.iter().enumerate() {
        let lines = metrics::wrap_lines(&item.description, wrap_width, geometry::FONT_SM);
        let height = row_height(lines.len());

        // No pagination: rows that would cross into the payment band are
        // dropped from the plan so both targets clip identically.
        if items_top + used + height > items_bottom_limit {
            clipped_rows = items.len() - item_index;
            break;
        }
        used += height;
        rows.push(RenderedRow {
            item_index,
            lines,
            height,
        });
    }

    if clipped_rows > 0 {
        log::warn!(
            "items table overflows the page; clipping {clipped_rows} of {} rows",
            items.len()
        );
    }

    BandPlan {
        header,
        bill_to,
        items: BandFrame {
            top: items_top,
            height: used,
        },
        payment,
        footer,
        rows,
        clipped_rows,
    }
}

/// Row height for a wrapped description of `line_count` lines.
pub fn row_height(line_count: usize) -> f32 {
    let content = line_count as f32 * geometry::LINE_H + 2.0 * geometry::CELL_PAD;
    content.max(geometry::MIN_ITEM_ROW_H)
}
