use crate::foundation::error::{ReelError, ReelResult};
use std::fmt;

/// Named reference point on a rectangle.
///
/// Used both as a placement keyword (where on the canvas) and as an anchor (which point of the
/// placed item sits on the resolved coordinate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    CenterLeft,
    /// Center.
    Center,
    /// Middle of the right edge.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Return `true` for the four corners.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    /// Horizontal fraction of the item width this anchor sits at (0, 0.5 or 1).
    pub(crate) fn fx(self) -> f64 {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => 0.0,
            Self::TopCenter | Self::Center | Self::BottomCenter => 0.5,
            Self::TopRight | Self::CenterRight | Self::BottomRight => 1.0,
        }
    }

    /// Vertical fraction of the item height this anchor sits at (0, 0.5 or 1).
    pub(crate) fn fy(self) -> f64 {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => 0.0,
            Self::CenterLeft | Self::Center | Self::CenterRight => 0.5,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => 1.0,
        }
    }

    /// Keyword spelling, e.g. `"bottom-right"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Parse a keyword spelling.
    pub fn parse(s: &str) -> ReelResult<Self> {
        let all = [
            Self::TopLeft,
            Self::TopCenter,
            Self::TopRight,
            Self::CenterLeft,
            Self::Center,
            Self::CenterRight,
            Self::BottomLeft,
            Self::BottomCenter,
            Self::BottomRight,
        ];
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        all.into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| ReelError::validation(format!("unknown position keyword \"{s}\"")))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One axis of an explicit position.
///
/// Serialized as a number (pixels) or a `"NN%"` string (fraction of the canvas).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coord {
    /// Absolute pixels, passed through verbatim.
    Px(f64),
    /// Percentage of the canvas dimension (`50.0` means half).
    Percent(f64),
}

impl Coord {
    /// Parse `"50%"` or `"120"`.
    pub fn parse(s: &str) -> ReelResult<Self> {
        let t = s.trim();
        if let Some(p) = t.strip_suffix('%') {
            let v: f64 = p
                .trim()
                .parse()
                .map_err(|_| ReelError::validation(format!("invalid percentage \"{s}\"")))?;
            return Ok(Self::Percent(v));
        }
        let v: f64 = t
            .parse()
            .map_err(|_| ReelError::validation(format!("invalid coordinate \"{s}\"")))?;
        Ok(Self::Px(v))
    }

    fn validate(self, axis: &str) -> ReelResult<()> {
        let v = match self {
            Self::Px(v) | Self::Percent(v) => v,
        };
        if !v.is_finite() {
            return Err(ReelError::validation(format!(
                "position {axis} must be finite"
            )));
        }
        Ok(())
    }
}

impl serde::Serialize for Coord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Px(v) => serializer.serialize_f64(*v),
            Self::Percent(v) => serializer.collect_str(&format_args!("{v}%")),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Coord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(Self::Px(v)),
            Repr::Str(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Where a layer is placed on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Position {
    /// Keyword placement (`"center"`, `"bottom-right"`, ...), inset by the layer margin.
    Keyword(Anchor),
    /// Explicit coordinates with an anchor on the placed item.
    Point {
        /// Horizontal coordinate.
        x: Coord,
        /// Vertical coordinate.
        y: Coord,
        /// Point of the item placed on `(x, y)`.
        #[serde(default)]
        anchor: Anchor,
    },
}

impl Position {
    /// Explicit point with the default top-left anchor.
    pub fn at(x: Coord, y: Coord) -> Self {
        Self::Point {
            x,
            y,
            anchor: Anchor::TopLeft,
        }
    }

    /// Explicit percentage point with an anchor.
    pub fn percent(x: f64, y: f64, anchor: Anchor) -> Self {
        Self::Point {
            x: Coord::Percent(x),
            y: Coord::Percent(y),
            anchor,
        }
    }

    pub(crate) fn validate(self) -> ReelResult<()> {
        if let Self::Point { x, y, .. } = self {
            x.validate("x")?;
            y.validate("y")?;
        }
        Ok(())
    }
}

impl From<Anchor> for Position {
    fn from(a: Anchor) -> Self {
        Self::Keyword(a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/position.rs"]
mod tests;
