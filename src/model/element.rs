//! Positioned elements: text runs, ruling lines, and rectangles.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page coordinates (y grows upward).
///
/// Corners are reordered on construction and on deserialization, so
/// `x0 <= x1` and `y0 <= y1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawBBox")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl BBox {
    /// Create a well-formed box; swapped corners are reordered.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Check if `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &BBox) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }
}

#[derive(Deserialize)]
struct RawBBox {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl From<RawBBox> for BBox {
    fn from(raw: RawBBox) -> Self {
        BBox::new(raw.x0, raw.y0, raw.x1, raw.y1)
    }
}

/// Fill color of a glyph, as reported by the geometry engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// A color-space token such as `DeviceRGB` or `DeviceGray`
    Named(String),
    /// A gray level in 0.0..=1.0
    Gray(f32),
    /// An RGB triple in 0.0..=1.0
    Rgb(f32, f32, f32),
}

impl Color {
    /// Tolerance used when comparing color components.
    pub const TOLERANCE: f32 = 1e-3;

    /// Named color-space token.
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }

    /// RGB color.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Pure black in the gray space.
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    /// Compare two colors, treating `Gray(g)` as `Rgb(g, g, g)`.
    pub fn matches(&self, other: &Color) -> bool {
        match (self.components(), other.components()) {
            (Some(a), Some(b)) => a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| (x - y).abs() <= Self::TOLERANCE),
            _ => self == other,
        }
    }

    fn components(&self) -> Option<[f32; 3]> {
        match *self {
            Color::Named(_) => None,
            Color::Gray(g) => Some([g, g, g]),
            Color::Rgb(r, g, b) => Some([r, g, b]),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

/// A run of characters sharing font size and fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Run text (may contain line breaks)
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Fill color
    #[serde(default)]
    pub color: Color,
}

impl TextRun {
    /// Create a new run.
    pub fn new(text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
        }
    }
}

/// Kind of positioned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A text box
    Text,
    /// A drawn line (ruling)
    Line,
    /// A drawn rectangle
    Rectangle,
}

/// One atomic text box or graphical primitive on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedElement {
    /// Bounding box
    pub bbox: BBox,
    /// Element kind
    pub kind: ElementKind,
    /// Text runs in character order (empty for lines and rectangles)
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl PositionedElement {
    /// Create a text element with uniform font size and color.
    pub fn text(bbox: BBox, text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self::text_runs(bbox, vec![TextRun::new(text, font_size, color)])
    }

    /// Create a text element from several styled runs.
    pub fn text_runs(bbox: BBox, runs: Vec<TextRun>) -> Self {
        Self {
            bbox,
            kind: ElementKind::Text,
            runs,
        }
    }

    /// Create a line primitive.
    pub fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            bbox: BBox::new(x0, y0, x1, y1),
            kind: ElementKind::Line,
            runs: Vec::new(),
        }
    }

    /// Create a rectangle primitive.
    pub fn rect(bbox: BBox) -> Self {
        Self {
            bbox,
            kind: ElementKind::Rectangle,
            runs: Vec::new(),
        }
    }

    pub fn x0(&self) -> f32 {
        self.bbox.x0
    }

    pub fn y0(&self) -> f32 {
        self.bbox.y0
    }

    pub fn x1(&self) -> f32 {
        self.bbox.x1
    }

    pub fn y1(&self) -> f32 {
        self.bbox.y1
    }

    /// Check if this is a text element.
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    /// Check if this is a line primitive.
    pub fn is_line(&self) -> bool {
        self.kind == ElementKind::Line
    }

    /// Check if this is a line that runs wider than it is tall.
    pub fn is_horizontal_line(&self) -> bool {
        self.is_line() && self.bbox.width() >= self.bbox.height()
    }

    /// Check if this is a rectangle primitive.
    pub fn is_rect(&self) -> bool {
        self.kind == ElementKind::Rectangle
    }

    /// Raw text of the element.
    pub fn text_content(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Iterate characters with their font size and color.
    pub fn chars(&self) -> impl Iterator<Item = (char, f32, &Color)> + '_ {
        self.runs
            .iter()
            .flat_map(|run| run.text.chars().map(move |c| (c, run.font_size, &run.color)))
    }

    /// Distinct colors of the visible (non-whitespace) characters.
    pub fn colors(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = Vec::new();
        for (_, _, color) in self.chars().filter(|(c, _, _)| !c.is_whitespace()) {
            if !colors.iter().any(|c| c.matches(color)) {
                colors.push(color.clone());
            }
        }
        colors
    }

    /// Check if every visible character has exactly the given color.
    pub fn has_only_color(&self, color: &Color) -> bool {
        let colors = self.colors();
        colors.len() == 1 && colors[0].matches(color)
    }

    /// Largest font size of any visible character.
    pub fn max_font_size(&self) -> Option<f32> {
        self.chars()
            .filter(|(c, _, _)| !c.is_whitespace())
            .map(|(_, size, _)| size)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f32| a.max(s))))
    }

    /// Check if the raw text starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text_content().starts_with(prefix)
    }

    /// Check if the raw text contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.text_content().contains(needle)
    }

    /// Check if the element lies fully inside any of the rectangles.
    pub fn is_within_any(&self, rects: &[&PositionedElement]) -> bool {
        rects.iter().any(|r| r.bbox.contains(&self.bbox))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_reorders_corners() {
        let bbox = BBox::new(10.0, 20.0, 5.0, 2.0);
        assert_eq!(bbox.x0, 5.0);
        assert_eq!(bbox.y0, 2.0);
        assert_eq!(bbox.x1, 10.0);
        assert_eq!(bbox.y1, 20.0);
        assert!(bbox.width() >= 0.0 && bbox.height() >= 0.0);
    }

    #[test]
    fn test_bbox_deserialize_reorders_corners() {
        let bbox: BBox =
            serde_json::from_str(r#"{"x0": 300.0, "y0": 720.0, "x1": 40.0, "y1": 700.0}"#).unwrap();
        assert_eq!(bbox, BBox::new(40.0, 700.0, 300.0, 720.0));
        assert!(bbox.x0 <= bbox.x1 && bbox.y0 <= bbox.y1);
    }

    #[test]
    fn test_color_matches_gray_and_rgb() {
        assert!(Color::Gray(0.0).matches(&Color::rgb(0.0, 0.0, 0.0)));
        assert!(Color::rgb(0.222, 0.178, 0.509).matches(&Color::rgb(0.2221, 0.178, 0.509)));
        assert!(!Color::rgb(1.0, 0.0, 0.0).matches(&Color::black()));
        assert!(Color::named("DeviceRGB").matches(&Color::named("DeviceRGB")));
        assert!(!Color::named("DeviceRGB").matches(&Color::black()));
    }

    #[test]
    fn test_mixed_run_element() {
        let el = PositionedElement::text_runs(
            BBox::new(0.0, 0.0, 100.0, 20.0),
            vec![
                TextRun::new("Risks\n", 11.0, Color::named("DeviceRGB")),
                TextRun::new("Rates may rise.", 9.0, Color::named("DeviceGray")),
            ],
        );
        assert_eq!(el.text_content(), "Risks\nRates may rise.");
        assert_eq!(el.colors().len(), 2);
        assert_eq!(el.max_font_size(), Some(11.0));
        assert!(el.starts_with("Risks"));
        assert!(!el.has_only_color(&Color::named("DeviceRGB")));
    }

    #[test]
    fn test_whitespace_color_is_ignored() {
        let el = PositionedElement::text_runs(
            BBox::default(),
            vec![
                TextRun::new("Title", 14.0, Color::named("DeviceRGB")),
                TextRun::new(" \n", 14.0, Color::black()),
            ],
        );
        assert!(el.has_only_color(&Color::named("DeviceRGB")));
    }

    #[test]
    fn test_primitives() {
        let line = PositionedElement::line(10.0, 100.0, 300.0, 100.0);
        assert!(line.is_horizontal_line());
        assert!(line.text_content().is_empty());

        let rect = PositionedElement::rect(BBox::new(0.0, 0.0, 200.0, 200.0));
        let inner = PositionedElement::text(BBox::new(10.0, 10.0, 50.0, 20.0), "x", 9.0, Color::black());
        assert!(inner.is_within_any(&[&rect]));
    }
}
