//! Stroke rasterisation and preview scaling.
//!
//! Strokes are drawn as round-capped, round-joined polylines on a white
//! background, which is how the editor canvas and the gallery previews look.
//! The same bitmap is what the moderation gate inspects.

use image::{Rgba, RgbaImage};

use crate::drawing::{Point, Stroke};

/// Editor canvas size in pixels.
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// Gallery preview size in pixels.
pub const PREVIEW_WIDTH: u32 = 300;
pub const PREVIEW_HEIGHT: u32 = 200;

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Colour used when a stroke carries an unparsable colour string.
pub const FALLBACK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Per-axis scale mapping one canvas size onto another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub sx: f64,
    pub sy: f64,
}

impl ScaleTransform {
    pub const IDENTITY: Self = Self { sx: 1.0, sy: 1.0 };

    /// Stretch `from` onto `to`, each axis independently.
    pub fn fit(from: (u32, u32), to: (u32, u32)) -> Self {
        Self {
            sx: f64::from(to.0) / f64::from(from.0),
            sy: f64::from(to.1) / f64::from(from.1),
        }
    }

    /// The editor canvas to gallery preview mapping.
    pub fn preview() -> Self {
        Self::fit(
            (CANVAS_WIDTH, CANVAS_HEIGHT),
            (PREVIEW_WIDTH, PREVIEW_HEIGHT),
        )
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.sx, p.y * self.sy)
    }

    /// Line widths shrink by the tighter of the two axes.
    pub fn scale_width(&self, width: f64) -> f64 {
        width * self.sx.min(self.sy)
    }
}

/// Parse `#rgb` or `#rrggbb` (case-insensitive) into an opaque colour.
pub fn parse_color(s: &str) -> Option<Rgba<u8>> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();
    match hex.len() {
        3 => {
            let r = channel(0, 1)?;
            let g = channel(1, 1)?;
            let b = channel(2, 1)?;
            Some(Rgba([r * 17, g * 17, b * 17, 255]))
        }
        6 => Some(Rgba([channel(0, 2)?, channel(2, 2)?, channel(4, 2)?, 255])),
        _ => None,
    }
}

/// Render `strokes` onto a fresh white `width`×`height` bitmap, mapping
/// every point and line width through `transform`.
pub fn render_strokes(
    strokes: &[Stroke],
    width: u32,
    height: u32,
    transform: ScaleTransform,
) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
    for stroke in strokes {
        let color = parse_color(&stroke.color).unwrap_or(FALLBACK_COLOR);
        draw_polyline(
            &mut img,
            &stroke.points,
            transform,
            transform.scale_width(stroke.width),
            color,
        );
    }
    img
}

/// Render a drawing's strokes at full editor size.
pub fn render_canvas(strokes: &[Stroke]) -> RgbaImage {
    render_strokes(strokes, CANVAS_WIDTH, CANVAS_HEIGHT, ScaleTransform::IDENTITY)
}

/// Render the scaled-down gallery thumbnail of a drawing's strokes.
pub fn render_preview(strokes: &[Stroke]) -> RgbaImage {
    render_strokes(
        strokes,
        PREVIEW_WIDTH,
        PREVIEW_HEIGHT,
        ScaleTransform::preview(),
    )
}

/// Draw a polyline of the given width. Fewer than two points draws nothing.
pub fn draw_polyline(
    img: &mut RgbaImage,
    points: &[Point],
    transform: ScaleTransform,
    width: f64,
    color: Rgba<u8>,
) {
    if points.len() < 2 {
        return;
    }
    // Hairlines still cover at least one pixel.
    let radius = (width / 2.0).max(0.5);
    for pair in points.windows(2) {
        let a = transform.apply(pair[0]);
        let b = transform.apply(pair[1]);
        fill_capsule(img, a, b, radius, color);
    }
}

/// Fill every pixel whose centre lies within `radius` of segment `a`-`b`.
fn fill_capsule(img: &mut RgbaImage, a: Point, b: Point, radius: f64, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let min_x = (a.x.min(b.x) - radius).floor().max(0.0);
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0);
    let max_x = (a.x.max(b.x) + radius).ceil().min(f64::from(w - 1));
    let max_y = (a.y.max(b.y) + radius).ceil().min(f64::from(h - 1));
    if min_x > max_x || min_y > max_y {
        return;
    }

    let r2 = radius * radius;
    for py in (min_y as u32)..=(max_y as u32) {
        for px in (min_x as u32)..=(max_x as u32) {
            let centre = Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
            if distance_sq_to_segment(centre, a, b) <= r2 {
                img.put_pixel(px, py, color);
            }
        }
    }
}

fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    (p.x - cx).powi(2) + (p.y - cy).powi(2)
}
