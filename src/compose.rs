//! Procedural drawing of the app icon
//!
//! The icon is a fixed composition: a vertical green gradient, a dimpled
//! golf ball in the middle, a magnifying glass over the ball's upper right
//! quarter and a small red flag in the top right corner. Every measurement
//! is derived from the edge length alone, so [`compose`] is a pure function
//! of the requested size.

use image::{Rgb, RgbImage};
use std::ops::RangeInclusive;

const BALL_WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const DIMPLE_GRAY: Rgb<u8> = Rgb([230, 230, 230]);
const GLASS_GREEN: Rgb<u8> = Rgb([30, 80, 30]);
const FLAG_RED: Rgb<u8> = Rgb([200, 50, 50]);

/// Pixel coordinate. Signed so shapes may hang off the canvas.
pub type Point = (i64, i64);

/// Every size-derived measurement of the composition
///
/// All fractions truncate toward zero. Stroke widths and the dimple
/// dimensions are clamped to a minimum so small icons still show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLayout {
    pub size: u32,
    pub center: Point,
    pub ball_radius: i64,
    pub dimple_radius: i64,
    pub dimple_spacing: i64,
    pub glass_center: Point,
    pub glass_radius: i64,
    pub glass_stroke: i64,
    /// Start and end of the magnifier handle
    pub handle: (Point, Point),
    /// Top of the flag pole
    pub flag: Point,
    pub pole_height: i64,
    pub pole_stroke: i64,
    pub pennant: [Point; 3],
}

fn scaled(value: i64, factor: f64) -> i64 {
    (value as f64 * factor) as i64
}

impl IconLayout {
    pub fn for_size(size: u32) -> Self {
        let edge = i64::from(size);
        let mid = edge / 2;

        let ball_radius = scaled(edge, 0.3);
        let glass_radius = scaled(edge, 0.15);
        let glass_offset = scaled(ball_radius, 0.5);
        let (gx, gy) = (mid + glass_offset, mid - glass_offset);

        let near = scaled(glass_radius, 0.7);
        let far = scaled(glass_radius, 1.5);

        let flag = (scaled(edge, 0.75), scaled(edge, 0.25));

        Self {
            size,
            center: (mid, mid),
            ball_radius,
            dimple_radius: scaled(edge, 0.02).max(2),
            dimple_spacing: scaled(edge, 0.05).max(8),
            glass_center: (gx, gy),
            glass_radius,
            glass_stroke: scaled(edge, 0.02).max(3),
            handle: ((gx + near, gy + near), (gx + far, gy + far)),
            flag,
            pole_height: scaled(edge, 0.15),
            pole_stroke: scaled(edge, 0.01).max(2),
            pennant: [
                flag,
                (flag.0 + scaled(edge, 0.08), flag.1 + scaled(edge, 0.03)),
                (flag.0, flag.1 + scaled(edge, 0.06)),
            ],
        }
    }

    /// Centres of the dimples that fit entirely inside the ball
    ///
    /// Grid points run from `center - ball_radius + spacing` up to (but not
    /// including) `center + ball_radius` on both axes.
    pub fn dimple_centers(&self) -> Vec<Point> {
        let (cx, cy) = self.center;
        let limit = self.ball_radius - self.dimple_radius;
        if limit <= 0 {
            return Vec::new();
        }

        let step = self.dimple_spacing as usize;
        let mut centers = Vec::new();
        for x in (cx - self.ball_radius + self.dimple_spacing..cx + self.ball_radius).step_by(step) {
            for y in
                (cy - self.ball_radius + self.dimple_spacing..cy + self.ball_radius).step_by(step)
            {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy < limit * limit {
                    centers.push((x, y));
                }
            }
        }
        centers
    }

    /// Bottom of the flag pole
    pub fn pole_foot(&self) -> Point {
        (self.flag.0, self.flag.1 + self.pole_height)
    }
}

/// Draw the icon at `size`×`size` pixels
pub fn compose(size: u32) -> RgbImage {
    let layout = IconLayout::for_size(size);
    let mut img = RgbImage::new(size, size);

    paint_gradient(&mut img);

    fill_circle(&mut img, layout.center, layout.ball_radius, BALL_WHITE);
    for dimple in layout.dimple_centers() {
        fill_circle(&mut img, dimple, layout.dimple_radius, DIMPLE_GRAY);
    }

    stroke_circle(
        &mut img,
        layout.glass_center,
        layout.glass_radius,
        layout.glass_stroke,
        GLASS_GREEN,
    );
    let (handle_start, handle_end) = layout.handle;
    draw_line(&mut img, handle_start, handle_end, layout.glass_stroke, GLASS_GREEN);

    draw_line(&mut img, layout.flag, layout.pole_foot(), layout.pole_stroke, FLAG_RED);
    fill_triangle(&mut img, layout.pennant, FLAG_RED);

    img
}

/// Green gradient: red rises 46 → 116, green falls 125 → 100 down the image
fn paint_gradient(img: &mut RgbImage) {
    let height = img.height();
    for y in 0..height {
        let t = f64::from(y) / f64::from(height);
        let color = Rgb([(46.0 + 70.0 * t) as u8, (125.0 - 25.0 * t) as u8, 50]);
        for x in 0..img.width() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Range of `lo..=hi` that lies on an axis of length `len`
fn clip(lo: i64, hi: i64, len: u32) -> RangeInclusive<i64> {
    lo.max(0)..=hi.min(i64::from(len) - 1)
}

fn fill_circle(img: &mut RgbImage, (cx, cy): Point, radius: i64, color: Rgb<u8>) {
    let r2 = radius * radius;
    for y in clip(cy - radius, cy + radius, img.height()) {
        for x in clip(cx - radius, cx + radius, img.width()) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Ring of `width` pixels drawn inward from `radius`
fn stroke_circle(img: &mut RgbImage, (cx, cy): Point, radius: i64, width: i64, color: Rgb<u8>) {
    let outer = radius * radius;
    let inner = radius - width;
    for y in clip(cy - radius, cy + radius, img.height()) {
        for x in clip(cx - radius, cx + radius, img.width()) {
            let (dx, dy) = (x - cx, y - cy);
            let d2 = dx * dx + dy * dy;
            if d2 <= outer && (inner < 0 || d2 > inner * inner) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Thick segment: every pixel within `width / 2` of the segment `a`–`b`
fn draw_line(img: &mut RgbImage, a: Point, b: Point, width: i64, color: Rgb<u8>) {
    let half = width as f64 / 2.0;
    let pad = half.ceil() as i64;
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let (ex, ey) = ((b.0 - a.0) as f64, (b.1 - a.1) as f64);
    let len2 = ex * ex + ey * ey;

    for y in clip(a.1.min(b.1) - pad, a.1.max(b.1) + pad, img.height()) {
        for x in clip(a.0.min(b.0) - pad, a.0.max(b.0) + pad, img.width()) {
            let (px, py) = (x as f64 - ax, y as f64 - ay);
            let t = if len2 == 0.0 {
                0.0
            } else {
                ((px * ex + py * ey) / len2).clamp(0.0, 1.0)
            };
            let (qx, qy) = (px - t * ex, py - t * ey);
            if qx * qx + qy * qy <= half * half {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

fn fill_triangle(img: &mut RgbImage, [p0, p1, p2]: [Point; 3], color: Rgb<u8>) {
    // Signed area of (a, b, p); zero on the edge itself.
    fn edge(a: Point, b: Point, p: Point) -> i64 {
        (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
    }

    let (min_x, max_x) = (p0.0.min(p1.0).min(p2.0), p0.0.max(p1.0).max(p2.0));
    let (min_y, max_y) = (p0.1.min(p1.1).min(p2.1), p0.1.max(p1.1).max(p2.1));

    for y in clip(min_y, max_y, img.height()) {
        for x in clip(min_x, max_x, img.width()) {
            let p = (x, y);
            let e = [edge(p0, p1, p), edge(p1, p2, p), edge(p2, p0, p)];
            if e.iter().all(|&v| v >= 0) || e.iter().all(|&v| v <= 0) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
