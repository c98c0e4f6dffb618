//! Rec.709 luma coefficients.
//!
//! `grayscale()` in CSS Filter Effects uses these exact values; the other
//! color matrices in [`crate::filter`] use rounded three-digit variants.

pub const LUMINANCE_R: f32 = 0.2126;
pub const LUMINANCE_G: f32 = 0.7152;
pub const LUMINANCE_B: f32 = 0.0722;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6);
    }
}
