//! Particle simulation behind the decorative background.
//!
//! Points drift at constant velocity and bounce off the viewport edges;
//! every pair closer than `max_distance` is joined by a line whose opacity
//! falls off linearly with distance. Rendering lives in
//! `components::magnet_lines_background`; this module is pure math.

#[cfg(test)]
#[path = "magnet_lines_test.rs"]
mod magnet_lines_test;

pub const POINT_COUNT: usize = 30;
pub const POINT_RADIUS: f64 = 2.0;
const BASE_MAX_DISTANCE: f64 = 200.0;
const VELOCITY_SCALE: f64 = 5.0;

/// Look of the background.
#[derive(Clone, Debug, PartialEq)]
pub struct LinesStyle {
    /// `#rrggbb` base colour for points and lines.
    pub color: String,
    pub speed: f64,
    /// Scales the connection distance.
    pub intensity: f64,
}

impl Default for LinesStyle {
    fn default() -> Self {
        Self { color: "#4f46e5".to_owned(), speed: 0.2, intensity: 0.7 }
    }
}

impl LinesStyle {
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        BASE_MAX_DISTANCE * self.intensity
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// A line to draw between two particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    /// Opacity in `(0, 1]`.
    pub alpha: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub width: f64,
    pub height: f64,
    pub max_distance: f64,
    pub particles: Vec<Particle>,
}

impl Field {
    /// Scatter [`POINT_COUNT`] particles using `random` (uniform in `[0, 1)`).
    pub fn scatter(width: f64, height: f64, style: &LinesStyle, mut random: impl FnMut() -> f64) -> Self {
        let particles = (0..POINT_COUNT)
            .map(|_| Particle {
                x: random() * width,
                y: random() * height,
                vx: (random() - 0.5) * style.speed * VELOCITY_SCALE,
                vy: (random() - 0.5) * style.speed * VELOCITY_SCALE,
            })
            .collect();
        Self { width, height, max_distance: style.max_distance(), particles }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Advance one frame: move, then flip velocity for points outside the bounds.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if p.x < 0.0 || p.x > self.width {
                p.vx = -p.vx;
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy = -p.vy;
            }
        }
    }

    /// Pairs closer than `max_distance`, each pair once with `from < to`.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let dist = (a.x - b.x).hypot(a.y - b.y);
                if dist < self.max_distance {
                    links.push(Link { from: i, to: j, alpha: 1.0 - dist / self.max_distance });
                }
            }
        }
        links
    }
}

/// Two-digit lowercase hex alpha suffix for a `#rrggbb` colour.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn alpha_hex(alpha: f64) -> String {
    let byte = (alpha.clamp(0.0, 1.0) * 255.0).floor() as u8;
    format!("{byte:02x}")
}

/// Gradient stops for a link: transparent ends, `alpha` in the middle.
#[must_use]
pub fn gradient_stops(color: &str, alpha: f64) -> [(f32, String); 3] {
    [
        (0.0, format!("{color}00")),
        (0.5, format!("{color}{}", alpha_hex(alpha))),
        (1.0, format!("{color}00")),
    ]
}
