use crate::foundation::core::{AspectRatio, Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::timing::validate_positive;
use crate::platform::codec::CodecPreset;
use crate::platform::presets::{Platform, PlatformPreset};

/// Render settings that apply to the whole timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlobalOptions {
    /// Output frame rate; also used for frame-count math. Emitted as `-r` when set.
    pub fps: Option<Fps>,
    /// Explicit output duration in seconds (`-t`).
    pub duration: Option<f64>,
    /// Platform preset name, resolved at compile time.
    pub platform: Option<String>,
    /// Explicit aspect ratio; ignored when a platform preset resolves.
    pub aspect_ratio: Option<AspectRatio>,
    /// Canvas for generated backgrounds when no preset or aspect ratio applies.
    pub size: Option<Canvas>,
    /// Encoder preset.
    pub codec: Option<CodecPreset>,
    /// Seed for choices resolved at compile time (Ken Burns `random`).
    pub seed: u64,
    /// Overwrite the output (`-y`) or refuse (`-n`).
    pub overwrite: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            fps: None,
            duration: None,
            platform: None,
            aspect_ratio: None,
            size: None,
            codec: None,
            seed: 0,
            overwrite: true,
        }
    }
}

impl GlobalOptions {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        if let Some(fps) = self.fps {
            Fps::new(fps.num, fps.den)?;
        }
        if let Some(d) = self.duration {
            validate_positive(d, "timeline duration")?;
        }
        if let Some(p) = &self.platform
            && p.trim().is_empty()
        {
            return Err(ReelError::validation("platform name must be non-empty"));
        }
        if let Some(a) = self.aspect_ratio {
            AspectRatio::new(a.width, a.height)?;
        }
        if let Some(c) = self.size {
            Canvas::new(c.width, c.height)?;
        }
        Ok(())
    }

    /// Resolve the output geometry.
    ///
    /// An unknown platform name is logged and ignored.
    pub(crate) fn target(&self) -> OutputTarget {
        let fps = self.fps.unwrap_or(Fps::DEFAULT);
        let preset = self.platform.as_deref().and_then(|name| {
            let found = Platform::from_name(name);
            if found.is_none() {
                tracing::warn!(platform = name, "unknown platform preset, ignoring");
            }
            found.map(Platform::preset)
        });

        if let Some(p) = preset {
            return OutputTarget {
                canvas: p.canvas,
                aspect: p.aspect,
                fps,
                fit: true,
                preset: Some(p),
            };
        }
        if let Some(aspect) = self.aspect_ratio {
            let canvas = match self.size {
                Some(c) if c.aspect_ratio() == aspect => c,
                _ => aspect.canvas(),
            };
            return OutputTarget {
                canvas,
                aspect,
                fps,
                fit: true,
                preset: None,
            };
        }
        let canvas = self.size.unwrap_or(Canvas::DEFAULT);
        OutputTarget {
            canvas,
            aspect: canvas.aspect_ratio(),
            fps,
            fit: false,
            preset: None,
        }
    }
}

/// Output geometry resolved from [`GlobalOptions`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct OutputTarget {
    pub(crate) canvas: Canvas,
    pub(crate) aspect: AspectRatio,
    pub(crate) fps: Fps,
    /// Full-frame sources are scaled to cover the canvas and center-cropped.
    pub(crate) fit: bool,
    pub(crate) preset: Option<PlatformPreset>,
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/options.rs"]
mod tests;
