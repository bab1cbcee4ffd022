//! # invoice-render – invoice document layout & rendering engine
//!
//! This crate turns an invoice's structured data (company, client, line
//! items, taxes, signature) into a fixed single-page document, twice, from
//! one layout pass:
//!
//! 1. **Model** – immutable render snapshot ([`model`])
//! 2. **Resolve** – band frames + per-row wrap cache ([`bands`])
//! 3. **Render** – section renderers emit a positioned region tree
//!    ([`sections`], [`regions`])
//! 4. **Target B** – the region tree itself, serialisable for on-screen
//!    preview ([`preview`])
//! 5. **Target A** – PDF bytes via printpdf, origin flipped, images and the
//!    currency fallback font embedded ([`pdf`])
//!
//! Geometry constants ([`geometry`]), text metrics ([`metrics`]), and
//! formatting ([`format`]) are shared by construction, so the preview and
//! the downloadable document cannot drift apart.

pub mod assets;
pub mod bands;
pub mod format;
pub mod geometry;
pub mod metrics;
pub mod model;
pub mod pdf;
pub mod pipeline;
pub mod preview;
pub mod regions;
pub mod sections;

// Re-exports for convenience
pub use pipeline::{render_invoice, render_and_store, RenderOptions};
