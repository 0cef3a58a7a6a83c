//! Color value well-formedness.
//!
//! Brand palettes are authored as `oklch(L% C H)`, the shared base palette as
//! hex. Only the textual form and channel ranges are checked.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static RE_OKLCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^oklch\((\d+(?:\.\d+)?)% (\d+(?:\.\d+)?) (\d+(?:\.\d+)?)\)$").unwrap()
});

static RE_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    Oklch { lightness: f64, chroma: f64, hue: f64 },
    Hex(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("`{0}` is neither oklch(L% C H) nor a hex color")]
    Malformed(String),

    #[error("{channel} {value} out of range in `{input}`")]
    OutOfRange {
        input: String,
        channel: &'static str,
        value: f64,
    },
}

impl ColorValue {
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        if RE_HEX.is_match(input) {
            return Ok(Self::Hex(input.to_string()));
        }

        let caps = RE_OKLCH
            .captures(input)
            .ok_or_else(|| ColorError::Malformed(input.to_string()))?;
        let channel = |i: usize| -> Result<f64, ColorError> {
            caps[i]
                .parse::<f64>()
                .map_err(|_| ColorError::Malformed(input.to_string()))
        };
        let (lightness, chroma, hue) = (channel(1)?, channel(2)?, channel(3)?);

        let out_of_range = |channel: &'static str, value: f64| ColorError::OutOfRange {
            input: input.to_string(),
            channel,
            value,
        };
        if !(0.0..=100.0).contains(&lightness) {
            return Err(out_of_range("lightness", lightness));
        }
        if !(0.0..=360.0).contains(&hue) {
            return Err(out_of_range("hue", hue));
        }
        // The pattern admits no sign, so chroma >= 0 holds already.

        Ok(Self::Oklch {
            lightness,
            chroma,
            hue,
        })
    }

    /// Perceptual lightness in percent, when known.
    pub fn lightness(&self) -> Option<f64> {
        match self {
            Self::Oklch { lightness, .. } => Some(*lightness),
            Self::Hex(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oklch() {
        let color = ColorValue::parse("oklch(55% 0.15 40.24)").unwrap();
        assert_eq!(
            color,
            ColorValue::Oklch {
                lightness: 55.0,
                chroma: 0.15,
                hue: 40.24
            }
        );
        assert_eq!(color.lightness(), Some(55.0));
    }

    #[test]
    fn test_parse_hex() {
        assert!(matches!(ColorValue::parse("#1E66F5"), Ok(ColorValue::Hex(_))));
        assert!(matches!(ColorValue::parse("#fff"), Ok(ColorValue::Hex(_))));
        assert!(matches!(ColorValue::parse("#1E66F580"), Ok(ColorValue::Hex(_))));
        assert!(ColorValue::parse("#12345").is_err());
    }

    #[test]
    fn test_out_of_range_channels() {
        assert!(matches!(
            ColorValue::parse("oklch(101% 0.1 40)"),
            Err(ColorError::OutOfRange { channel: "lightness", .. })
        ));
        assert!(matches!(
            ColorValue::parse("oklch(50% 0.1 361)"),
            Err(ColorError::OutOfRange { channel: "hue", .. })
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            ColorValue::parse("rgb(0, 0, 0)"),
            Err(ColorError::Malformed(_))
        ));
        assert!(ColorValue::parse("oklch(55 0.15 40)").is_err());
        assert!(ColorValue::parse("oklch(-5% 0.15 40)").is_err());
    }
}
