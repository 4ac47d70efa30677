use crate::foundation::error::{ReelError, ReelResult};

/// How long a layer stays active.
///
/// Serialized as a number of seconds or the string `"full"`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LayerDuration {
    /// Explicit length in seconds (must be > 0).
    Seconds(f64),
    /// Natural length of the source when known, unbounded otherwise.
    #[default]
    Full,
}

impl LayerDuration {
    /// Explicit seconds, if any.
    pub fn seconds(self) -> Option<f64> {
        match self {
            Self::Seconds(s) => Some(s),
            Self::Full => None,
        }
    }

    pub(crate) fn validate(self, what: &str) -> ReelResult<()> {
        if let Self::Seconds(s) = self
            && (!s.is_finite() || s <= 0.0)
        {
            return Err(ReelError::validation(format!(
                "{what} duration must be finite and > 0 (got {s})"
            )));
        }
        Ok(())
    }
}

impl From<f64> for LayerDuration {
    fn from(v: f64) -> Self {
        Self::Seconds(v)
    }
}

impl serde::Serialize for LayerDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Seconds(s) => serializer.serialize_f64(*s),
            Self::Full => serializer.serialize_str("full"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for LayerDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Secs(f64),
            Word(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Secs(s) => Ok(Self::Seconds(s)),
            Repr::Word(w) if w == "full" => Ok(Self::Full),
            Repr::Word(w) => Err(serde::de::Error::custom(format!(
                "duration must be a number or \"full\", got \"{w}\""
            ))),
        }
    }
}

pub(crate) fn validate_start(start: f64, what: &str) -> ReelResult<()> {
    if !start.is_finite() || start < 0.0 {
        return Err(ReelError::validation(format!(
            "{what} start_time must be finite and >= 0 (got {start})"
        )));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(v: f64, field: &str) -> ReelResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(ReelError::validation(format!(
            "{field} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(())
}

pub(crate) fn validate_positive(v: f64, field: &str) -> ReelResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(ReelError::validation(format!(
            "{field} must be finite and > 0 (got {v})"
        )));
    }
    Ok(())
}

pub(crate) fn validate_unit(v: f64, field: &str) -> ReelResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(ReelError::validation(format!(
            "{field} must be within [0, 1] (got {v})"
        )));
    }
    Ok(())
}
