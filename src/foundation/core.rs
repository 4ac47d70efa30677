use crate::foundation::error::{ReelError, ReelResult};
use std::fmt;

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Frame rate assumed when a timeline does not override it.
    pub const DEFAULT: Fps = Fps { num: 25, den: 1 };

    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert seconds to a frame count, rounding half-frames to even.
    pub fn secs_to_frames(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round_ties_even().max(0.0) as u64
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas used when nothing else determines the output size.
    pub const DEFAULT: Canvas = Canvas {
        width: 1920,
        height: 1080,
    };

    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Reduced aspect ratio of this canvas.
    pub fn aspect_ratio(self) -> AspectRatio {
        let g = gcd(self.width, self.height).max(1);
        AspectRatio {
            width: self.width / g,
            height: self.height / g,
        }
    }
}

/// Aspect ratio written as `W:H`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AspectRatio {
    /// Horizontal term.
    pub width: u32,
    /// Vertical term.
    pub height: u32,
}

impl AspectRatio {
    /// Short edge used when deriving a canvas from a bare ratio.
    pub const SHORT_EDGE_PX: u32 = 1080;

    /// Create a validated ratio.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("aspect ratio terms must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Parse `"W:H"` (also accepts `"W/H"`).
    pub fn parse(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        let (w, h) = s
            .split_once(':')
            .or_else(|| s.split_once('/'))
            .ok_or_else(|| {
                ReelError::validation(format!("aspect ratio \"{s}\" must look like \"W:H\""))
            })?;
        let parse_term = |t: &str| {
            t.trim().parse::<u32>().map_err(|_| {
                ReelError::validation(format!("aspect ratio \"{s}\" has a non-integer term"))
            })
        };
        Self::new(parse_term(w)?, parse_term(h)?)
    }

    /// Canvas with [`Self::SHORT_EDGE_PX`] on the short side and an even long side.
    pub fn canvas(self) -> Canvas {
        let short = Self::SHORT_EDGE_PX;
        let (long_terms, short_terms) = if self.width >= self.height {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        let long = f64::from(short) * f64::from(long_terms) / f64::from(short_terms);
        let long = ((long / 2.0).round() as u32).max(1) * 2;
        if self.width >= self.height {
            Canvas {
                width: long,
                height: short,
            }
        } else {
            Canvas {
                width: short,
                height: long,
            }
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl serde::Serialize for AspectRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for AspectRatio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
