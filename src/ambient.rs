//! Decorative backdrop geometry: drifting rings and the cursor glow.
//!
//! Nothing here feeds back into page state. Ring placement is drawn from a
//! seeded generator so a given seed always yields the same backdrop.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::pointer::PointerPosition;

pub const DEFAULT_AMBIENT_SEED: u64 = 0x5eed_c1a0;
pub const DEFAULT_SHAPE_COUNT: usize = 15;
pub const DEFAULT_FOLLOWER_RADIUS_PX: f64 = 192.0;

const MIN_SHAPE_PX: f64 = 50.0;
const SHAPE_PX_SPREAD: f64 = 200.0;
const MIN_DRIFT_SECONDS: f64 = 10.0;
const DRIFT_SECONDS_SPREAD: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Option<Self> {
        (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
            .then_some(Self { width, height })
    }
}

/// One ring. Positions are fractions of the viewport, resolved at render time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientShape {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub size_px: f64,
    pub duration_s: f64,
}

impl AmbientShape {
    pub fn style(&self, viewport: Viewport) -> String {
        format!(
            "width: {size:.1}px; height: {size:.1}px; \
             --from-x: {fx:.1}px; --from-y: {fy:.1}px; \
             --to-x: {tx:.1}px; --to-y: {ty:.1}px; \
             animation-duration: {duration:.2}s;",
            size = self.size_px,
            fx = self.from.0 * viewport.width,
            fy = self.from.1 * viewport.height,
            tx = self.to.0 * viewport.width,
            ty = self.to.1 * viewport.height,
            duration = self.duration_s,
        )
    }
}

pub fn ambient_shapes(seed: u64, count: usize) -> Vec<AmbientShape> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| AmbientShape {
            from: (rng.gen::<f64>(), rng.gen::<f64>()),
            to: (rng.gen::<f64>(), rng.gen::<f64>()),
            size_px: rng.gen::<f64>() * SHAPE_PX_SPREAD + MIN_SHAPE_PX,
            duration_s: rng.gen::<f64>() * DRIFT_SECONDS_SPREAD + MIN_DRIFT_SECONDS,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFollower {
    pub radius_px: f64,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self {
            radius_px: DEFAULT_FOLLOWER_RADIUS_PX,
        }
    }
}

impl CursorFollower {
    /// Top-left corner that centres the glow on the pointer.
    pub fn origin(&self, pointer: PointerPosition) -> (f64, f64) {
        (pointer.x - self.radius_px, pointer.y - self.radius_px)
    }

    pub fn style(&self, pointer: PointerPosition) -> String {
        let (x, y) = self.origin(pointer);
        let diameter = self.radius_px * 2.0;
        format!(
            "width: {diameter:.0}px; height: {diameter:.0}px; transform: translate({x:.2}px, {y:.2}px); background: {};",
            crate::theme::glow_gradient()
        )
    }
}
