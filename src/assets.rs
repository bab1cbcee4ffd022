//! Best-effort asset resolution – logo, signature, payment QR, and the
//! Unicode fallback font for the currency glyph.
//!
//! Every fetch is independent and degradable: a failed image fetch means
//! "no image drawn" for that element, a failed font fetch means the PDF
//! composer substitutes the ASCII currency abbreviation. Failures are
//! logged with `log::warn!` at the point of failure and never propagate.
//!
//! Assets are resolved once, before either drawing target composes, so an
//! unavailable image is absent from the preview and the PDF alike.

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use std::time::Duration;

use crate::format::CURRENCY_GLYPH;
use crate::model::CompanySettings;

/// Default source for a Unicode-capable font covering the rupee glyph.
const FALLBACK_FONT_URL: &str =
    "https://raw.githubusercontent.com/googlefonts/noto-fonts/main/hinted/ttf/NotoSans/NotoSans-Regular.ttf";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched, decodable raster image with its natural pixel dimensions.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    pub px_width: u32,
    pub px_height: u32,
}

/// Everything the render pass managed to fetch. Absent entries degrade to
/// "element omitted" (images) or "ASCII currency" (font).
#[derive(Debug, Clone, Default)]
pub struct ResolvedAssets {
    pub logo: Option<ResolvedImage>,
    pub signature: Option<ResolvedImage>,
    pub payment_qr: Option<ResolvedImage>,
    /// Raw bytes of a font whose coverage includes the currency glyph.
    pub currency_font: Option<Vec<u8>>,
}

impl ResolvedAssets {
    /// No assets at all – offline renders and tests.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn image(&self, key: &str) -> Option<&ResolvedImage> {
        match key {
            "logo" => self.logo.as_ref(),
            "signature" => self.signature.as_ref(),
            "payment_qr" => self.payment_qr.as_ref(),
            _ => None,
        }
    }
}

/// Fetches remote assets over HTTP, decodes `data:` URIs inline, and reads
/// bare paths from the filesystem (CLI and test convenience).
pub struct AssetFetcher {
    client: reqwest::blocking::Client,
    fallback_font_url: String,
}

impl AssetFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
            fallback_font_url: FALLBACK_FONT_URL.to_string(),
        }
    }

    pub fn with_fallback_font_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_font_url = url.into();
        self
    }

    /// Resolve every asset the settings reference, plus the currency font.
    pub fn resolve(&self, settings: Option<&CompanySettings>) -> ResolvedAssets {
        let mut assets = ResolvedAssets::none();

        if let Some(settings) = settings {
            assets.logo = settings
                .logo_url
                .as_deref()
                .and_then(|url| self.fetch_image("logo", url));
            assets.signature = settings
                .signature_url
                .as_deref()
                .and_then(|url| self.fetch_image("signature", url));
            assets.payment_qr = settings
                .payment_qr_url
                .as_deref()
                .and_then(|url| self.fetch_image("payment QR", url));
        }

        assets.currency_font = self.fetch_currency_font();
        assets
    }

    /// Fetch and decode one image; `None` on any failure.
    pub fn fetch_image(&self, what: &str, url: &str) -> Option<ResolvedImage> {
        let (bytes, content_type) = match self.fetch_bytes(url) {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("skipping {what} image: {e}");
                return None;
            }
        };
        match decode_image(&bytes, content_type.as_deref(), url) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("skipping {what} image: {e}");
                None
            }
        }
    }

    /// Fetch the fallback font and verify it actually covers the currency
    /// glyph; `None` degrades to ASCII substitution downstream.
    fn fetch_currency_font(&self) -> Option<Vec<u8>> {
        let (bytes, _) = match self.fetch_bytes(&self.fallback_font_url) {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("currency font unavailable, using ASCII abbreviation: {e}");
                return None;
            }
        };
        match font_covers_currency_glyph(&bytes) {
            Ok(true) => Some(bytes),
            Ok(false) => {
                log::warn!("fetched font has no {CURRENCY_GLYPH} glyph, using ASCII abbreviation");
                None
            }
            Err(e) => {
                log::warn!("fetched font unparseable, using ASCII abbreviation: {e}");
                None
            }
        }
    }

    /// Raw bytes plus the declared content type, from a data URI, an
    /// http(s) URL, or a local path.
    fn fetch_bytes(&self, url: &str) -> Result<(Vec<u8>, Option<String>), String> {
        if url.starts_with("data:") {
            let (bytes, mime) = parse_data_uri(url)?;
            return Ok((bytes, mime));
        }

        if url.starts_with("http://") || url.starts_with("https://") {
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| format!("request failed for {url}: {e}"))?;
            if !response.status().is_success() {
                return Err(format!("{url} returned {}", response.status()));
            }
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let bytes = response
                .bytes()
                .map_err(|e| format!("read failed for {url}: {e}"))?;
            return Ok((bytes.to_vec(), content_type));
        }

        std::fs::read(url)
            .map(|bytes| (bytes, None))
            .map_err(|e| format!("cannot read {url}: {e}"))
    }
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `data:<mime>;base64,<data>` URI into raw bytes and the mime type.
pub fn parse_data_uri(src: &str) -> Result<(Vec<u8>, Option<String>), String> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URI".to_string())?;
    let comma_pos = rest
        .find(',')
        .ok_or_else(|| "invalid data URI: missing `,` separator".to_string())?;
    let header = &rest[..comma_pos];
    if !header.contains(";base64") {
        return Err("only base64-encoded data URIs are supported".to_string());
    }
    let mime = header.split(';').next().filter(|m| !m.is_empty());
    let bytes = BASE64_STD
        .decode(rest[comma_pos + 1..].trim())
        .map_err(|e| format!("base64 decode error: {e}"))?;
    Ok((bytes, mime.map(|m| m.to_string())))
}

/// Decode an image, preferring the codec declared by the content type or
/// file extension, falling back to format sniffing.
fn decode_image(
    bytes: &[u8],
    content_type: Option<&str>,
    url: &str,
) -> Result<ResolvedImage, String> {
    let declared = declared_format(content_type, url);

    let decoded = match declared {
        Some(format) => image::load_from_memory_with_format(bytes, format)
            .or_else(|_| image::load_from_memory(bytes)),
        None => image::load_from_memory(bytes),
    };

    let img = decoded.map_err(|e| format!("decode error: {e}"))?;
    Ok(ResolvedImage {
        px_width: img.width(),
        px_height: img.height(),
        bytes: bytes.to_vec(),
    })
}

/// Image codec declared by content type or file extension, if any.
fn declared_format(content_type: Option<&str>, url: &str) -> Option<image::ImageFormat> {
    if let Some(ct) = content_type {
        let ct = ct.split(';').next().unwrap_or(ct).trim();
        match ct {
            "image/png" => return Some(image::ImageFormat::Png),
            "image/jpeg" | "image/jpg" => return Some(image::ImageFormat::Jpeg),
            _ => {}
        }
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(image::ImageFormat::Png),
        "jpg" | "jpeg" => Some(image::ImageFormat::Jpeg),
        _ => None,
    }
}

/// Whether the font bytes contain a glyph for the currency symbol.
fn font_covers_currency_glyph(bytes: &[u8]) -> Result<bool, String> {
    let face = ttf_parser::Face::parse(bytes, 0).map_err(|e| format!("font parse error: {e}"))?;
    Ok(face.glyph_index(CURRENCY_GLYPH).is_some())
}
