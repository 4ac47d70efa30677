use crate::foundation::error::{ReelError, ReelResult};
use crate::model::layer::Layer;
use crate::timeline::Timeline;
use crate::timeline::options::GlobalOptions;
use anyhow::Context as _;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Version written into every document; other versions are rejected.
const FORMAT_VERSION: u32 = 1;

#[derive(serde::Serialize)]
struct DocRef<'a> {
    version: u32,
    options: &'a GlobalOptions,
    layers: Vec<&'a Layer>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Doc {
    version: u32,
    #[serde(default)]
    options: GlobalOptions,
    #[serde(default)]
    layers: Vec<Layer>,
}

impl Doc {
    fn into_timeline(self) -> ReelResult<Timeline> {
        if self.version != FORMAT_VERSION {
            return Err(ReelError::serde(format!(
                "unsupported timeline document version {} (expected {FORMAT_VERSION})",
                self.version
            )));
        }
        Timeline::from_parts(self.layers, self.options)
    }
}

impl serde::Serialize for Timeline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DocRef {
            version: FORMAT_VERSION,
            options: self.options(),
            layers: self.layers().iter().map(AsRef::as_ref).collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Timeline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Doc::deserialize(deserializer)?
            .into_timeline()
            .map_err(serde::de::Error::custom)
    }
}

fn parse_err(e: serde_json::Error) -> ReelError {
    ReelError::serde(format!("parse timeline JSON: {e}"))
}

impl Timeline {
    /// Plain-data snapshot: `{"version": 1, "options": {..}, "layers": [..]}`.
    pub fn to_json(&self) -> ReelResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Pretty-printed [`Self::to_json`].
    pub fn to_json_string(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Rebuild a timeline from [`Self::to_json`] output, validating every layer again.
    pub fn from_json(value: serde_json::Value) -> ReelResult<Self> {
        serde_json::from_value::<Doc>(value)
            .map_err(parse_err)?
            .into_timeline()
    }

    /// Parse a JSON document string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str::<Doc>(s)
            .map_err(parse_err)?
            .into_timeline()
    }

    /// Parse a JSON document from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader::<_, Doc>(r)
            .map_err(parse_err)?
            .into_timeline()
    }

    /// Parse a JSON document from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open timeline JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/json.rs"]
mod tests;
