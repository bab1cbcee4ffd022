//! Interactive preview surface – assembles the full region tree for
//! on-screen display.
//!
//! This is Drawing Target B: a tree of absolutely positioned regions in
//! top-left-origin page coordinates, built from the same band plan, metrics,
//! and formatting the PDF composer consumes. Visual fidelity with the
//! downloadable document follows from sharing the tree, not from parallel
//! reimplementation.

use crate::assets::ResolvedAssets;
use crate::bands;
use crate::model::{RenderDefaults, RenderInput};
use crate::regions::DocumentLayout;
use crate::sections;

/// Compose the complete single-page layout for an invoice.
pub fn compose_document(
    input: &RenderInput,
    assets: &ResolvedAssets,
    defaults: &RenderDefaults,
) -> DocumentLayout {
    let plan = bands::resolve(&input.items);

    let mut layout = DocumentLayout::new(format!("Invoice {}", input.invoice.code));
    layout
        .regions
        .push(sections::render_header(input, &plan, assets));
    layout
        .regions
        .push(sections::render_bill_to(input, &plan, defaults));
    layout
        .regions
        .push(sections::render_items(input, &plan, defaults));
    layout
        .regions
        .push(sections::render_payment(input, &plan, assets, defaults));
    layout
        .regions
        .push(sections::render_footer(input, &plan, assets, defaults));
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::model::{Client, Company, Invoice, LineItem};

    fn sample_input() -> RenderInput {
        RenderInput {
            invoice: Invoice {
                code: "INV-3".to_string(),
                issue_date: "2026-02-14".to_string(),
                project: None,
                use_igst: true,
                cgst_pct: 0.0,
                sgst_pct: 0.0,
                igst_pct: 18.0,
                cgst: 0.0,
                sgst: 0.0,
                igst: 36.0,
                subtotal: 200.0,
                total: 236.0,
                show_my_signature: false,
                require_client_signature: false,
            },
            company: Company {
                name: "Acme Traders".to_string(),
                address: "Pune".to_string(),
                gstin: None,
            },
            settings: None,
            client: Client {
                name: "Globex".to_string(),
                gstin: None,
                address: None,
            },
            items: vec![LineItem {
                description: "Service".to_string(),
                qty: 4.0,
                unit_price: 50.0,
                amount: 200.0,
            }],
        }
    }

    #[test]
    fn document_has_one_region_per_band() {
        let layout = compose_document(
            &sample_input(),
            &ResolvedAssets::none(),
            &RenderDefaults::default(),
        );
        assert_eq!(layout.regions.len(), 5);
        assert_eq!(layout.title, "Invoice INV-3");
    }

    #[test]
    fn all_regions_fit_inside_the_page() {
        let layout = compose_document(
            &sample_input(),
            &ResolvedAssets::none(),
            &RenderDefaults::default(),
        );
        layout.visit(|r| {
            assert!(r.x >= 0.0 && r.x + r.width <= geometry::PAGE_WIDTH_PT + 0.01);
            assert!(r.y >= 0.0 && r.y + r.height <= geometry::PAGE_HEIGHT_PT + 0.01);
        });
    }

    #[test]
    fn composition_is_deterministic() {
        let input = sample_input();
        let a = compose_document(&input, &ResolvedAssets::none(), &RenderDefaults::default());
        let b = compose_document(&input, &ResolvedAssets::none(), &RenderDefaults::default());
        assert_eq!(a.to_json(), b.to_json());
    }
}
