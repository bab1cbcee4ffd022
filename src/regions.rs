//! Positioned-region model – the shared intermediate representation both
//! drawing targets consume.
//!
//! Coordinates are page-absolute points with the origin at the page's
//! top-left (the preview convention). The PDF composer flips to the PDF's
//! bottom-left origin while drawing; the preview serves the tree as-is.
//! Because every truncation, wrap, and offset is frozen into this tree
//! before either target runs, the two outputs cannot disagree.

use serde::{Deserialize, Serialize};

use crate::geometry;

/// A complete single-page invoice layout ready for either target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Top-level regions, one per band.
    pub regions: Vec<Region>,
}

/// A positioned rectangle with optional content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Position relative to page top-left, in points.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    pub background: Option<[f32; 3]>,
    pub border: Option<Stroke>,

    pub text: Option<TextContent>,
    pub image: Option<ImageContent>,

    pub children: Vec<Region>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// Pre-wrapped, pre-aligned lines.
    pub lines: Vec<TextLine>,
    pub font_size: f32,
    pub bold: bool,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    /// X offset within the region (alignment already applied).
    pub x_offset: f32,
    /// Y offset from the top of the region.
    pub y_offset: f32,
}

/// A placed raster image. `key` names the asset ("logo", "signature",
/// "payment_qr"); the PDF composer resolves it against the fetched assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageContent {
    pub key: String,
    pub width: f32,
    pub height: f32,
}

impl DocumentLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_width_pt: geometry::PAGE_WIDTH_PT,
            page_height_pt: geometry::PAGE_HEIGHT_PT,
            regions: Vec::new(),
        }
    }

    /// Serialise to JSON for the preview consumer.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Depth-first visit over every region in the tree.
    pub fn visit<F: FnMut(&Region)>(&self, mut f: F) {
        fn walk(region: &Region, f: &mut dyn FnMut(&Region)) {
            f(region);
            for child in &region.children {
                walk(child, f);
            }
        }
        for region in &self.regions {
            walk(region, &mut f);
        }
    }
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            background: None,
            border: None,
            text: None,
            image: None,
            children: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: [f32; 3]) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_border(mut self, width: f32, color: [f32; 3]) -> Self {
        self.border = Some(Stroke { width, color });
        self
    }

    /// A single-line text region, lines positioned by the caller.
    pub fn with_text(mut self, content: TextContent) -> Self {
        self.text = Some(content);
        self
    }

    pub fn with_image(mut self, key: impl Into<String>, width: f32, height: f32) -> Self {
        self.image = Some(ImageContent {
            key: key.into(),
            width,
            height,
        });
        self
    }

    pub fn push(&mut self, child: Region) {
        self.children.push(child);
    }

    /// A filled hairline rectangle standing in for a rule.
    pub fn horizontal_rule(x: f32, y: f32, width: f32) -> Self {
        Region::new(x, y, width, geometry::RULE_THICKNESS).with_background(geometry::COLOR_RULE)
    }

    pub fn vertical_rule(x: f32, y: f32, height: f32) -> Self {
        Region::new(x, y, geometry::RULE_THICKNESS, height).with_background(geometry::COLOR_RULE)
    }
}

impl TextContent {
    /// One left-aligned line at the region origin.
    pub fn single(text: impl Into<String>, font_size: f32, bold: bool, color: [f32; 3]) -> Self {
        Self {
            lines: vec![TextLine {
                text: text.into(),
                x_offset: 0.0,
                y_offset: 0.0,
            }],
            font_size,
            bold,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_json_roundtrip() {
        let mut layout = DocumentLayout::new("INV-1");
        let mut band = Region::new(40.0, 40.0, 100.0, 50.0);
        band.push(
            Region::new(40.0, 40.0, 80.0, 12.0).with_text(TextContent::single(
                "hello",
                10.0,
                false,
                geometry::COLOR_INK,
            )),
        );
        layout.regions.push(band);

        let json = layout.to_json();
        let parsed = DocumentLayout::from_json(&json).unwrap();
        assert_eq!(parsed.regions.len(), 1);
        assert_eq!(parsed.regions[0].children.len(), 1);
        assert!((parsed.page_width_pt - geometry::PAGE_WIDTH_PT).abs() < 1e-3);
    }

    #[test]
    fn visit_walks_children() {
        let mut layout = DocumentLayout::new("t");
        let mut parent = Region::new(0.0, 0.0, 10.0, 10.0);
        parent.push(Region::new(1.0, 1.0, 2.0, 2.0));
        parent.push(Region::new(3.0, 3.0, 2.0, 2.0));
        layout.regions.push(parent);

        let mut count = 0;
        layout.visit(|_| count += 1);
        assert_eq!(count, 3);
    }
}
