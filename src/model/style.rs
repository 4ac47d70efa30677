use crate::foundation::error::{ReelError, ReelResult};
use crate::model::color::Color;
use crate::model::timing::{validate_non_negative, validate_positive};

/// Font and decoration settings for text-bearing layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Fill color.
    pub font_color: Color,
    /// Font file path (`fontfile=`).
    pub font_file: Option<String>,
    /// Font family resolved by fontconfig (`font=`).
    pub font_family: Option<String>,
    /// Background box color; no box when `None`.
    pub box_color: Option<Color>,
    /// Box padding in pixels.
    pub box_padding: f64,
    /// Outline width in pixels.
    pub border_width: f64,
    /// Outline color (defaults to black when a border is drawn).
    pub border_color: Option<Color>,
    /// Drop shadow offset `[x, y]` in pixels.
    pub shadow_offset: Option<[f64; 2]>,
    /// Drop shadow color.
    pub shadow_color: Option<Color>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            font_color: Color::keyword("white"),
            font_file: None,
            font_family: None,
            box_color: None,
            box_padding: 0.0,
            border_width: 0.0,
            border_color: None,
            shadow_offset: None,
            shadow_color: None,
        }
    }
}

impl TextStyle {
    /// Default style (48px white).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font size in pixels.
    pub fn font_size(mut self, px: f64) -> Self {
        self.font_size = px;
        self
    }

    /// Set fill color.
    pub fn color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    /// Set font file path.
    pub fn font_file(mut self, path: impl Into<String>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Set font family name.
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Draw a background box.
    pub fn boxed(mut self, color: Color, padding: f64) -> Self {
        self.box_color = Some(color);
        self.box_padding = padding;
        self
    }

    /// Draw an outline.
    pub fn border(mut self, width: f64, color: Color) -> Self {
        self.border_width = width;
        self.border_color = Some(color);
        self
    }

    /// Draw a drop shadow.
    pub fn shadow(mut self, dx: f64, dy: f64, color: Color) -> Self {
        self.shadow_offset = Some([dx, dy]);
        self.shadow_color = Some(color);
        self
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_positive(self.font_size, "font_size")?;
        validate_non_negative(self.box_padding, "box_padding")?;
        validate_non_negative(self.border_width, "border_width")?;
        for (name, path) in [
            ("font_file", &self.font_file),
            ("font_family", &self.font_family),
        ] {
            if let Some(p) = path
                && p.trim().is_empty()
            {
                return Err(ReelError::validation(format!(
                    "{name} must be non-empty when set"
                )));
            }
        }
        if let Some([dx, dy]) = self.shadow_offset
            && !(dx.is_finite() && dy.is_finite())
        {
            return Err(ReelError::validation("shadow_offset must be finite"));
        }
        Ok(())
    }
}

/// Style applied to the active word of a word-highlight caption.
///
/// The named presets derive their look from the caption's base style; `Custom` replaces it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPreset {
    /// Yellow fill.
    Yellow,
    /// Black text on a yellow box.
    Box,
    /// White fill with a thick black outline.
    Outline,
    /// Larger, brighter text.
    Pop,
    /// Caller-supplied style.
    Custom(TextStyle),
}

impl HighlightPreset {
    /// Resolve the active-word style relative to `base`.
    pub fn style(&self, base: &TextStyle) -> TextStyle {
        match self {
            Self::Yellow => TextStyle {
                font_color: Color::keyword("yellow"),
                ..base.clone()
            },
            Self::Box => TextStyle {
                font_color: Color::keyword("black"),
                box_color: Some(Color::keyword("yellow")),
                box_padding: base.box_padding.max(8.0),
                ..base.clone()
            },
            Self::Outline => TextStyle {
                font_color: Color::keyword("white"),
                border_width: base.border_width.max(4.0),
                border_color: Some(Color::keyword("black")),
                ..base.clone()
            },
            Self::Pop => TextStyle {
                font_size: base.font_size * 1.25,
                font_color: Color::keyword("cyan"),
                ..base.clone()
            },
            Self::Custom(style) => style.clone(),
        }
    }
}
