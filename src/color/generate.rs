//! Random color generators

use rand::Rng;

use super::Rgb;

/// Harmonious band: any hue, saturated and mid-light.
pub const HUE_RANGE: std::ops::Range<u32> = 0..360;
pub const SATURATION_RANGE: std::ops::Range<u32> = 70..90;
pub const LIGHTNESS_RANGE: std::ops::Range<u32> = 50..70;

/// Number of distinct 24-bit colors.
const RGB_SPACE: u32 = 1 << 24;

/// Convert HSL (degrees, percent, percent) to RGB.
///
/// Hue wraps; saturation and lightness are clamped to `[0, 100]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(channel(r + m), channel(g + m), channel(b + m))
}

fn channel(v: f64) -> u8 {
    // NaN saturates to 0 in `as`
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Draw a color from the harmonious band.
pub fn harmonious<R: Rng>(rng: &mut R) -> String {
    let h = rng.random_range(HUE_RANGE);
    let s = rng.random_range(SATURATION_RANGE);
    let l = rng.random_range(LIGHTNESS_RANGE);
    hsl_to_hex(f64::from(h), f64::from(s), f64::from(l))
}

/// Draw a color uniformly over the whole RGB cube.
pub fn uniform<R: Rng>(rng: &mut R) -> String {
    Rgb::from_u32(rng.random_range(0..RGB_SPACE)).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::canonicalize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#FF0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00FF00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000FF");
        assert_eq!(hsl_to_hex(360.0, 100.0, 50.0), "#FF0000");
    }

    #[test]
    fn test_sectors() {
        assert_eq!(hsl_to_hex(60.0, 100.0, 50.0), "#FFFF00");
        assert_eq!(hsl_to_hex(180.0, 100.0, 50.0), "#00FFFF");
        assert_eq!(hsl_to_hex(300.0, 100.0, 50.0), "#FF00FF");
        assert_eq!(hsl_to_hex(30.0, 100.0, 50.0), "#FF8000");
    }

    #[test]
    fn test_achromatic_and_clamping() {
        assert_eq!(hsl_to_hex(200.0, 0.0, 0.0), "#000000");
        assert_eq!(hsl_to_hex(200.0, 0.0, 100.0), "#FFFFFF");
        assert_eq!(hsl_to_hex(10.0, 250.0, -5.0), "#000000");
        assert_eq!(hsl_to_hex(-120.0, 100.0, 50.0), "#0000FF");
    }

    #[test]
    fn test_nan_input_stays_well_formed() {
        let out = hsl_to_hex(f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(canonicalize(&out).as_deref(), Some(out.as_str()));
    }

    #[test]
    fn test_harmonious_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let c = harmonious(&mut rng);
            assert_eq!(canonicalize(&c).as_deref(), Some(c.as_str()));
            let rgb: Rgb = c.parse().unwrap();
            let max = rgb.r.max(rgb.g).max(rgb.b);
            let min = rgb.r.min(rgb.g).min(rgb.b);
            // l >= 50% keeps the brightest channel at full scale or near it
            assert!(max >= 200, "{c} too dim");
            // s >= 70% keeps a visible spread between channels
            assert!(max - min >= 60, "{c} too grey");
        }
    }

    #[test]
    fn test_uniform_is_canonical() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let c = uniform(&mut rng);
            assert_eq!(c.len(), 7);
            assert_eq!(canonicalize(&c).as_deref(), Some(c.as_str()));
        }
    }
}
