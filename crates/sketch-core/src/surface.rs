use crate::constants::{CLEAR_ALPHA, CLEAR_COLOR_HEX};

/// Measured inner size of the container, in CSS pixels, excluding border and padding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContentBox {
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whole-pixel size; negative or non-finite measurements collapse to zero.
    pub fn to_pixels(self) -> (u32, u32) {
        let px = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v.floor().min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        (px(self.width), px(self.height))
    }
}

/// How the renderer encodes its final color output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorEncoding {
    #[default]
    Srgb,
    Linear,
}

/// Clear color stored in sRGB space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::from_hex(CLEAR_COLOR_HEX, CLEAR_ALPHA)
    }
}

impl ClearColor {
    pub fn from_hex(hex: u32, alpha: f32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: alpha,
        }
    }

    /// Color to hand to the GPU for the given output encoding. An sRGB target
    /// re-encodes on write, so the stored color is linearized first.
    pub fn for_encoding(self, encoding: ColorEncoding) -> [f32; 4] {
        match encoding {
            ColorEncoding::Linear => [self.r, self.g, self.b, self.a],
            ColorEncoding::Srgb => [
                srgb_to_linear(self.r),
                srgb_to_linear(self.g),
                srgb_to_linear(self.b),
                self.a,
            ],
        }
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Non-positive or non-finite ratios fall back to 1.
pub fn normalize_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Drawable target state: CSS size, pixel ratio and output settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSurface {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
    pub clear_color: ClearColor,
    pub output_encoding: ColorEncoding,
}

impl RenderSurface {
    pub fn new(clear_color: ClearColor, output_encoding: ColorEncoding) -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
            clear_color,
            output_encoding,
        }
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = normalize_pixel_ratio(ratio);
    }

    pub fn matches(&self, width: u32, height: u32, ratio: f64) -> bool {
        self.width == width && self.height == height && self.pixel_ratio == ratio
    }

    /// Device-pixel size of the backing store, never below 1x1.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.pixel_ratio) as u32;
        let h = (self.height as f64 * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
