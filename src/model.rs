//! Invoice data model – the records a render pass consumes.
//!
//! Everything here arrives already loaded and validated by the data layer;
//! the engine treats a [`RenderInput`] as an immutable snapshot for the
//! duration of one render. Amounts are real numbers, never strings, and the
//! engine never recomputes discounts or tax derivations.

use serde::{Deserialize, Serialize};

/// One invoice document, taxes already derived by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Human-readable invoice code, e.g. `"INV-2026-0042"`. Also names the
    /// output PDF.
    pub code: String,
    /// ISO issue date (`YYYY-MM-DD`).
    pub issue_date: String,
    /// Optional project name shown under the client block.
    #[serde(default)]
    pub project: Option<String>,
    /// Selects the interstate regime (single IGST row) over the intrastate
    /// split (CGST + SGST rows).
    #[serde(default)]
    pub use_igst: bool,
    #[serde(default)]
    pub cgst_pct: f64,
    #[serde(default)]
    pub sgst_pct: f64,
    #[serde(default)]
    pub igst_pct: f64,
    /// Derived tax amounts. The engine renders these; it never derives them
    /// from the percentages.
    #[serde(default)]
    pub cgst: f64,
    #[serde(default)]
    pub sgst: f64,
    #[serde(default)]
    pub igst: f64,
    pub subtotal: f64,
    pub total: f64,
    #[serde(default)]
    pub show_my_signature: bool,
    #[serde(default)]
    pub require_client_signature: bool,
}

impl Invoice {
    /// Total tax under the active regime.
    pub fn tax_total(&self) -> f64 {
        if self.use_igst {
            self.igst
        } else {
            self.cgst + self.sgst
        }
    }

    /// Whether either signature flag requests a signature block.
    pub fn wants_signature(&self) -> bool {
        self.show_my_signature || self.require_client_signature
    }
}

/// The issuing company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Free-text postal address; newlines delimit display lines.
    #[serde(default)]
    pub address: String,
    /// Tax registration code (GSTIN).
    #[serde(default)]
    pub gstin: Option<String>,
}

/// Optional per-company presentation settings. A company has at most one;
/// renderers tolerate its absence and fall back to [`RenderDefaults`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Multiplier applied to the logo's natural pixel dimensions, in (0, ~3].
    #[serde(default = "default_scale")]
    pub logo_scale: f64,
    #[serde(default)]
    pub signature_url: Option<String>,
    #[serde(default = "default_scale")]
    pub signature_scale: f64,
    #[serde(default)]
    pub payment_note: Option<String>,
    #[serde(default)]
    pub payment_qr_url: Option<String>,
    /// Override for the quantity column label (e.g. `"PKG"`).
    #[serde(default)]
    pub quantity_label: Option<String>,
    /// Override for the HSN/SAC code shown in the bill-to mini-table.
    #[serde(default)]
    pub hsn_code: Option<String>,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            logo_url: None,
            logo_scale: 1.0,
            signature_url: None,
            signature_scale: 1.0,
            payment_note: None,
            payment_qr_url: None,
            quantity_label: None,
            hsn_code: None,
        }
    }
}

/// The billed client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub gstin: Option<String>,
    /// Free-text billing address; newlines delimit display lines.
    #[serde(default)]
    pub address: Option<String>,
}

/// One invoice line. `amount` is already net of any discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub qty: f64,
    pub unit_price: f64,
    pub amount: f64,
}

/// The full immutable snapshot one render pass operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderInput {
    pub invoice: Invoice,
    pub company: Company,
    #[serde(default)]
    pub settings: Option<CompanySettings>,
    pub client: Client,
    pub items: Vec<LineItem>,
}

impl RenderInput {
    /// Settings accessor that tolerates absence.
    pub fn settings(&self) -> Option<&CompanySettings> {
        self.settings.as_ref()
    }
}

/// Injected fallback strings used when optional data is absent. Modeled as
/// an explicit object rather than literals scattered through the renderers,
/// so fallback behavior is swappable and testable in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderDefaults {
    /// Shown in the payment band when the company configured no note.
    pub payment_note: String,
    /// Quantity column label when no override is configured.
    pub quantity_label: String,
    /// HSN/SAC code when no override is configured.
    pub hsn_code: String,
    /// Footer thank-you line.
    pub thank_you: String,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            payment_note: "Payment by bank transfer.\nA/C 0000 1111 2222, IFSC EXMP0001234"
                .to_string(),
            quantity_label: "QTY".to_string(),
            hsn_code: "998314".to_string(),
            thank_you: "Thank you for your business!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_invoice() -> Invoice {
        Invoice {
            code: "INV-1".to_string(),
            issue_date: "2026-01-05".to_string(),
            project: None,
            use_igst: false,
            cgst_pct: 9.0,
            sgst_pct: 9.0,
            igst_pct: 0.0,
            cgst: 9.0,
            sgst: 9.0,
            igst: 0.0,
            subtotal: 100.0,
            total: 118.0,
            show_my_signature: false,
            require_client_signature: false,
        }
    }

    #[test]
    fn tax_total_follows_regime() {
        let mut inv = sample_invoice();
        assert!((inv.tax_total() - 18.0).abs() < 1e-9);

        inv.use_igst = true;
        inv.igst = 18.0;
        assert!((inv.tax_total() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn total_invariant_holds_for_sample() {
        let inv = sample_invoice();
        assert!((inv.total - (inv.subtotal + inv.tax_total())).abs() < 1e-9);
    }

    #[test]
    fn render_input_deserializes_with_minimal_fields() {
        let json = r#"{
            "invoice": {
                "code": "INV-7",
                "issue_date": "2026-02-01",
                "subtotal": 50.0,
                "total": 50.0
            },
            "company": { "name": "Acme Traders" },
            "client": { "name": "Globex" },
            "items": [
                { "description": "Widget", "qty": 1, "unit_price": 50, "amount": 50 }
            ]
        }"#;
        let input: RenderInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.invoice.code, "INV-7");
        assert!(!input.invoice.use_igst);
        assert!(input.settings.is_none());
        assert_eq!(input.items.len(), 1);
    }

    #[test]
    fn settings_scale_defaults_to_one() {
        let settings: CompanySettings =
            serde_json::from_str(r#"{ "logo_url": "https://x/y.png" }"#).unwrap();
        assert!((settings.logo_scale - 1.0).abs() < 1e-9);
        assert!((settings.signature_scale - 1.0).abs() < 1e-9);
    }
}
