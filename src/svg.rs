//! SVG visualization of a packed strip.
//!
//! Draws the strip as a panel with the origin at the bottom-left, every
//! placed rectangle on top of it, and the current skyline as an outline.
//!
//! # Example
//!
//! ```
//! use zenstrip::StripPacker;
//! use zenstrip::svg::{PackedRect, render_packing_svg};
//!
//! let mut strip = StripPacker::new(10).unwrap();
//! let mut rects = Vec::new();
//! for (w, h) in [(6, 2), (4, 3), (5, 1)] {
//!     let at = strip.insert(w, h).unwrap();
//!     rects.push(PackedRect::from_placement(at, w, h));
//! }
//!
//! let svg = render_packing_svg(
//!     strip.strip_width(),
//!     strip.packed_height(),
//!     &rects,
//!     strip.skyline(),
//! );
//! assert!(svg.starts_with("<svg"));
//! ```

use num_traits::ToPrimitive;

use crate::dimension::Dimension;
use crate::packer::Placement;
use crate::rotatable::OrientedPlacement;
use crate::skyline::SkylineSegment;

/// Maximum pixel width of the strip panel.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height of the strip panel.
const MAX_PANEL_H: f64 = 400.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top and bottom margin.
const MARGIN_Y: f64 = 30.0;
/// Height of the label text area above the panel.
const LABEL_H: f64 = 22.0;
/// Height of the annotation area below the panel.
const ANNOTATION_H: f64 = 22.0;

/// A placed rectangle in strip coordinates, `y` growing upward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedRect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> PackedRect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle from a fixed-orientation placement of a `width` × `height` input.
    pub fn from_placement(at: Placement<T>, width: T, height: T) -> Self {
        Self::new(at.x, at.y, width, height)
    }

    /// Rectangle from a rotatable placement; the footprint is swapped when turned.
    pub fn from_oriented(at: OrientedPlacement<T>, width: T, height: T) -> Self {
        if at.rotated {
            Self::new(at.x, at.y, height, width)
        } else {
            Self::new(at.x, at.y, width, height)
        }
    }
}

fn to_f64<T: Dimension>(v: T) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

/// Scale factor that fits the strip within MAX_PANEL_W × MAX_PANEL_H.
fn scale_to_fit(w: f64, h: f64) -> f64 {
    if w <= 0.0 {
        return 1.0;
    }
    let by_width = MAX_PANEL_W / w;
    if h <= 0.0 {
        by_width
    } else {
        by_width.min(MAX_PANEL_H / h)
    }
}

/// Render a strip, its placed rectangles and its skyline as an SVG document.
///
/// `packed_height` sets the panel height. Rectangles are drawn in the order
/// given; the skyline outline is drawn last.
pub fn render_packing_svg<T: Dimension>(
    strip_width: T,
    packed_height: T,
    rects: &[PackedRect<T>],
    skyline: impl IntoIterator<Item = SkylineSegment<T>>,
) -> String {
    let strip_w = to_f64(strip_width);
    let strip_h = to_f64(packed_height);
    let scale = scale_to_fit(strip_w, strip_h);
    let panel_w = strip_w * scale;
    let panel_h = strip_h * scale;

    let total_w = panel_w + 2.0 * MARGIN_X;
    let total_h = MARGIN_Y + LABEL_H + panel_h + ANNOTATION_H + MARGIN_Y;
    let panel_x = MARGIN_X;
    let panel_y = MARGIN_Y + LABEL_H;
    let bottom = panel_y + panel_h;
    let center_x = total_w / 2.0;

    let mut svg = String::with_capacity(1024 + rects.len() * 96);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    // Light/dark mode via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .strip { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .rect { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  .skyline { fill: none; stroke: #d9534f; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .strip { fill: #2d2d2d; stroke: #555; }
    .rect { fill: #3a72a4; stroke: #5a9fd4; }
    .skyline { stroke: #f0807c; }
  }
</style>
"##,
    );

    let label = format!("Strip  {strip_width}×{packed_height}");
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        center_x,
        MARGIN_Y + 14.0,
        escape_xml(&label)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="strip"/>"#,
        panel_x, panel_y, panel_w, panel_h
    ));
    svg.push('\n');

    for rect in rects {
        let w = to_f64(rect.width) * scale;
        let h = to_f64(rect.height) * scale;
        let x = panel_x + to_f64(rect.x) * scale;
        let y = bottom - to_f64(rect.y) * scale - h;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="rect"/>"#,
            x, y, w, h
        ));
        svg.push('\n');
    }

    let mut points = String::new();
    let mut segments = 0usize;
    for seg in skyline {
        let left = panel_x + to_f64(seg.x) * scale;
        let right = left + to_f64(seg.width) * scale;
        let y = bottom - to_f64(seg.height) * scale;
        points.push_str(&format!("{left:.1},{y:.1} {right:.1},{y:.1} "));
        segments += 1;
    }
    if segments > 0 {
        svg.push_str(&format!(
            r#"<polyline points="{}" class="skyline"/>"#,
            points.trim_end()
        ));
        svg.push('\n');
    }

    let annotation = format!("{} rects, {} skyline segments", rects.len(), segments);
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
        center_x,
        bottom + 16.0,
        escape_xml(&annotation)
    ));
    svg.push('\n');

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
