//! Filter presets.
//!
//! The editor offers seven mutually exclusive presets, addressed by the CSS
//! class tags `style1` through `style7`. In the browser the preset is applied
//! by the stylesheet; when the view is rasterized for export the same effect
//! is reproduced per pixel here, following the CSS Filter Effects definitions:
//!
//! | Tag    | Preset      | CSS                  |
//! |--------|-------------|----------------------|
//! | style1 | Sepia       | `sepia(100%)`        |
//! | style2 | Grayscale   | `grayscale(100%)`    |
//! | style3 | Blur        | `blur(3px)`          |
//! | style4 | Saturation  | `saturate(200%)`     |
//! | style5 | Brightness  | `brightness(150%)`   |
//! | style6 | Contrast    | `contrast(200%)`     |
//! | style7 | Hue Rotate  | `hue-rotate(90deg)`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::luminance::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// Gaussian standard deviation for `blur()`, in pixels.
pub const BLUR_RADIUS_PX: f32 = 3.0;
/// Factor for `saturate()`.
pub const SATURATE_AMOUNT: f32 = 2.0;
/// Factor for `brightness()`.
pub const BRIGHTNESS_AMOUNT: f32 = 1.5;
/// Factor for `contrast()`.
pub const CONTRAST_AMOUNT: f32 = 2.0;
/// Angle for `hue-rotate()`, in degrees.
pub const HUE_ROTATE_DEGREES: f32 = 90.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter style: {0:?}")]
    UnknownTag(String),
}

/// The active filter preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterStyle {
    /// No preset selected (empty class).
    #[default]
    None,
    Sepia,
    Grayscale,
    Blur,
    Saturation,
    Brightness,
    Contrast,
    HueRotate,
}

impl FilterStyle {
    /// The seven selectable presets, in toolbar order.
    pub const PRESETS: [FilterStyle; 7] = [
        FilterStyle::Sepia,
        FilterStyle::Grayscale,
        FilterStyle::Blur,
        FilterStyle::Saturation,
        FilterStyle::Brightness,
        FilterStyle::Contrast,
        FilterStyle::HueRotate,
    ];

    /// CSS class tag; empty for `None`.
    pub fn tag(self) -> &'static str {
        match self {
            FilterStyle::None => "",
            FilterStyle::Sepia => "style1",
            FilterStyle::Grayscale => "style2",
            FilterStyle::Blur => "style3",
            FilterStyle::Saturation => "style4",
            FilterStyle::Brightness => "style5",
            FilterStyle::Contrast => "style6",
            FilterStyle::HueRotate => "style7",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            FilterStyle::None => "None",
            FilterStyle::Sepia => "Sepia",
            FilterStyle::Grayscale => "Grayscale",
            FilterStyle::Blur => "Blur",
            FilterStyle::Saturation => "Saturation",
            FilterStyle::Brightness => "Brightness",
            FilterStyle::Contrast => "Contrast",
            FilterStyle::HueRotate => "Hue Rotate",
        }
    }

    /// Value for the CSS `filter` property.
    pub fn css_filter(self) -> &'static str {
        match self {
            FilterStyle::None => "none",
            FilterStyle::Sepia => "sepia(100%)",
            FilterStyle::Grayscale => "grayscale(100%)",
            FilterStyle::Blur => "blur(3px)",
            FilterStyle::Saturation => "saturate(200%)",
            FilterStyle::Brightness => "brightness(150%)",
            FilterStyle::Contrast => "contrast(200%)",
            FilterStyle::HueRotate => "hue-rotate(90deg)",
        }
    }

    fn color_op(self) -> Option<ColorOp> {
        match self {
            FilterStyle::None | FilterStyle::Blur => None,
            FilterStyle::Sepia => Some(ColorOp::Matrix(sepia_matrix(1.0))),
            FilterStyle::Grayscale => Some(ColorOp::Matrix(grayscale_matrix(1.0))),
            FilterStyle::Saturation => Some(ColorOp::Matrix(saturate_matrix(SATURATE_AMOUNT))),
            FilterStyle::HueRotate => Some(ColorOp::Matrix(hue_rotate_matrix(HUE_ROTATE_DEGREES))),
            FilterStyle::Brightness => Some(ColorOp::Linear {
                slope: BRIGHTNESS_AMOUNT,
                intercept: 0.0,
            }),
            FilterStyle::Contrast => Some(ColorOp::Linear {
                slope: CONTRAST_AMOUNT,
                intercept: 0.5 - 0.5 * CONTRAST_AMOUNT,
            }),
        }
    }
}

impl fmt::Display for FilterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FilterStyle {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(FilterStyle::None);
        }
        FilterStyle::PRESETS
            .into_iter()
            .find(|style| style.tag() == s)
            .ok_or_else(|| FilterError::UnknownTag(s.to_string()))
    }
}

impl TryFrom<String> for FilterStyle {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterStyle> for String {
    fn from(style: FilterStyle) -> Self {
        style.tag().to_string()
    }
}

/// Per-channel color operation on normalized values.
#[derive(Debug, Clone, Copy)]
enum ColorOp {
    Matrix([[f32; 3]; 3]),
    /// `C' = slope * C + intercept`
    Linear { slope: f32, intercept: f32 },
}

impl ColorOp {
    #[inline]
    fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            ColorOp::Matrix(m) => {
                let mut out = [0.0; 3];
                for (row, value) in m.iter().zip(out.iter_mut()) {
                    *value = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
                }
                out
            }
            ColorOp::Linear { slope, intercept } => rgb.map(|c| c * *slope + *intercept),
        }
    }
}

fn grayscale_matrix(amount: f32) -> [[f32; 3]; 3] {
    let inv = 1.0 - amount.clamp(0.0, 1.0);
    let (r, g, b) = (LUMINANCE_R, LUMINANCE_G, LUMINANCE_B);
    [
        [r + (1.0 - r) * inv, g - g * inv, b - b * inv],
        [r - r * inv, g + (1.0 - g) * inv, b - b * inv],
        [r - r * inv, g - g * inv, b + (1.0 - b) * inv],
    ]
}

fn sepia_matrix(amount: f32) -> [[f32; 3]; 3] {
    let inv = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * inv, 0.769 - 0.769 * inv, 0.189 - 0.189 * inv],
        [0.349 - 0.349 * inv, 0.686 + 0.314 * inv, 0.168 - 0.168 * inv],
        [0.272 - 0.272 * inv, 0.534 - 0.534 * inv, 0.131 + 0.869 * inv],
    ]
}

fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    let s = s.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// Apply a filter preset to an image in place.
pub fn apply_filter(image: &mut DecodedImage, style: FilterStyle) {
    if image.is_empty() {
        return;
    }

    if style == FilterStyle::Blur {
        if let Some(rgb) = image.to_rgb_image() {
            let blurred = image::imageops::blur(&rgb, BLUR_RADIUS_PX);
            *image = DecodedImage::from_rgb_image(blurred);
        }
        return;
    }

    if let Some(op) = style.color_op() {
        apply_color_op(&mut image.pixels, &op);
    }
}

fn apply_color_op(pixels: &mut [u8], op: &ColorOp) {
    for chunk in pixels.chunks_exact_mut(3) {
        let rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];
        let out = op.apply(rgb);
        for (dst, value) in chunk.iter_mut().zip(out) {
            *dst = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    }
}
