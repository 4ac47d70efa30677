use crate::foundation::error::{ReelError, ReelResult};
use std::fmt;

/// A color in the media tool's own syntax.
///
/// Hex input (`#00ff00`, `0x00FF00`, `00ff00`, optionally with an alpha byte) is normalized to
/// `0xRRGGBB[AA]`; bare keywords such as `white` pass through unchanged. Either form may carry an
/// `@alpha` suffix in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    /// Parse and normalize a user-supplied color.
    pub fn parse(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ReelError::validation("color must be non-empty"));
        }

        let (body, alpha) = match s.split_once('@') {
            Some((b, a)) => (b, Some(a)),
            None => (s, None),
        };

        let body = if let Some(hex) = body
            .strip_prefix('#')
            .or_else(|| body.strip_prefix("0x"))
            .or_else(|| body.strip_prefix("0X"))
        {
            parse_hex(hex)?
        } else if is_hex_body(body) {
            parse_hex(body)?
        } else if body.chars().all(|c| c.is_ascii_alphabetic()) {
            body.to_owned()
        } else {
            return Err(ReelError::validation(format!(
                "color \"{s}\" must be a hex value or a color keyword"
            )));
        };

        match alpha {
            Some(a) => {
                let v: f64 = a.trim().parse().map_err(|_| {
                    ReelError::validation(format!("color alpha in \"{s}\" must be a number"))
                })?;
                if !(0.0..=1.0).contains(&v) {
                    return Err(ReelError::validation(format!(
                        "color alpha in \"{s}\" must be within [0, 1]"
                    )));
                }
                Ok(Self(format!("{body}@{}", a.trim())))
            }
            None => Ok(Self(body)),
        }
    }

    /// Normalized spelling.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pure green, the usual chroma-key color.
    pub fn green() -> Self {
        Self("0x00FF00".to_owned())
    }

    /// Keyword color without validation; only for crate-internal constants.
    pub(crate) fn keyword(k: &'static str) -> Self {
        Self(k.to_owned())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Color {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn is_hex_body(s: &str) -> bool {
    matches!(s.len(), 6 | 8) && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_hex(s: &str) -> ReelResult<String> {
    if !is_hex_body(s) {
        return Err(ReelError::validation(format!(
            "hex color \"{s}\" must be RRGGBB or RRGGBBAA"
        )));
    }
    Ok(format!("0x{}", s.to_ascii_uppercase()))
}

#[cfg(test)]
#[path = "../../tests/unit/model/color.rs"]
mod tests;
