//! Closed colour palette shared by the utility classes and inline styles.
//!
//! `tailwind.config.js` declares the same sources and shades for class
//! generation; keep the two in step.

/// Globs scanned for utility class usage.
pub const STYLE_SOURCES: [&str; 3] = ["./index.html", "./src/**/*.rs", "./styles/**/*.css"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shade {
    pub step: u16,
    pub hex: &'static str,
}

impl Shade {
    pub fn rgb(self) -> Option<(u8, u8, u8)> {
        let digits = self.hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn rgba(self, alpha: f64) -> String {
        let (r, g, b) = self.rgb().unwrap_or((0, 0, 0));
        format!("rgba({r},{g},{b},{})", alpha.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScale {
    pub name: &'static str,
    pub shades: [Shade; 3],
}

impl ColorScale {
    pub fn shade(&self, step: u16) -> Option<Shade> {
        self.shades.iter().copied().find(|shade| shade.step == step)
    }
}

pub const CYAN: ColorScale = ColorScale {
    name: "cyan",
    shades: [
        Shade { step: 400, hex: "#22d3ee" },
        Shade { step: 500, hex: "#06b6d4" },
        Shade { step: 900, hex: "#164e63" },
    ],
};

pub const GRAY: ColorScale = ColorScale {
    name: "gray",
    shades: [
        Shade { step: 300, hex: "#d1d5db" },
        Shade { step: 400, hex: "#9ca3af" },
        Shade { step: 900, hex: "#111827" },
    ],
};

pub const PALETTE: [ColorScale; 2] = [CYAN, GRAY];

pub const GRID_LINE: &str = "rgba(0,255,255,0.1)";
pub const GRID_CELL_PX: u32 = 50;

pub fn grid_style() -> String {
    format!(
        "background-image: linear-gradient(to right, {GRID_LINE} 1px, transparent 1px), \
         linear-gradient(to bottom, {GRID_LINE} 1px, transparent 1px); \
         background-size: {GRID_CELL_PX}px {GRID_CELL_PX}px;"
    )
}

pub fn glow_gradient() -> String {
    let core = CYAN
        .shade(500)
        .map(|shade| shade.rgba(0.1))
        .unwrap_or_else(|| "transparent".to_string());
    format!("radial-gradient(circle, {core} 0%, rgba(0,0,0,0) 70%)")
}
