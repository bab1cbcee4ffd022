//! Pipeline – ties together asset resolution, band layout, section
//! rendering, and both drawing targets in a single call.

use std::path::PathBuf;

use crate::assets::{AssetFetcher, ResolvedAssets};
use crate::model::{RenderDefaults, RenderInput};
use crate::pdf::compose_pdf;
use crate::preview::compose_document;
use crate::regions::DocumentLayout;

/// Options for one render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Override for the PDF metadata title (default: `Invoice <code>`).
    pub title: Option<String>,
    /// Skip all asset fetching; every image degrades to absent and currency
    /// strings use the ASCII abbreviation. Renders become reproducible.
    pub offline: bool,
    /// Override for the fallback-font source URL.
    pub fallback_font_url: Option<String>,
}

/// Storage collaborator that receives the finished byte stream and returns
/// a retrievable location.
pub trait ArtifactStore {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<String, String>;
}

/// Filesystem-backed store used by the CLI.
pub struct FileStore {
    pub dir: PathBuf,
}

impl ArtifactStore for FileStore {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<String, String> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| format!("cannot create {}: {e}", self.dir.display()))?;
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        Ok(path.display().to_string())
    }
}

/// Deterministic output name derived from the invoice's human-readable
/// code: `"INV 2026/0042"` → `"invoice-inv-2026-0042.pdf"`.
pub fn document_file_name(code: &str) -> String {
    let mut slug = String::new();
    for c in code.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "invoice.pdf".to_string()
    } else {
        format!("invoice-{slug}.pdf")
    }
}

/// Full render: resolve assets once, compose the shared region tree, then
/// produce the PDF from it. Returns `(pdf_bytes, region_tree)` so callers
/// can serve the preview and the download from one pass.
pub fn render_invoice(
    input: &RenderInput,
    defaults: &RenderDefaults,
    options: &RenderOptions,
) -> Result<(Vec<u8>, DocumentLayout), String> {
    let assets = resolve_assets(input, options);

    let mut layout = compose_document(input, &assets, defaults);
    if let Some(title) = &options.title {
        layout.title = title.clone();
    }

    let bytes = compose_pdf(&layout, &assets)?;
    Ok((bytes, layout))
}

/// Render and hand the PDF to the storage collaborator; returns the stored
/// location and the preview tree.
pub fn render_and_store(
    input: &RenderInput,
    defaults: &RenderDefaults,
    options: &RenderOptions,
    store: &dyn ArtifactStore,
) -> Result<(String, DocumentLayout), String> {
    let (bytes, layout) = render_invoice(input, defaults, options)?;
    let name = document_file_name(&input.invoice.code);
    let location = store.store(&name, &bytes)?;
    log::info!("stored {name} at {location}");
    Ok((location, layout))
}

fn resolve_assets(input: &RenderInput, options: &RenderOptions) -> ResolvedAssets {
    if options.offline {
        return ResolvedAssets::none();
    }
    let mut fetcher = AssetFetcher::new();
    if let Some(url) = &options.fallback_font_url {
        fetcher = fetcher.with_fallback_font_url(url.clone());
    }
    fetcher.resolve(input.settings())
}
