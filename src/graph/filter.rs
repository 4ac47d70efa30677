use crate::foundation::core::{Canvas, Fps};
use crate::foundation::num::fmt_num;
use crate::graph::escape::{quote_expr, quote_text, quote_value};
use crate::model::color::Color;
use crate::model::style::TextStyle;
use std::fmt;

/// Direction of a `fade`/`afade`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FadeDir {
    In,
    Out,
}

impl FadeDir {
    fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// `drawtext` arguments.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DrawText {
    pub(crate) text: String,
    pub(crate) style: TextStyle,
    pub(crate) x: String,
    pub(crate) y: String,
    pub(crate) enable: Option<String>,
}

/// `sidechaincompress` arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Compressor {
    pub(crate) threshold: f64,
    pub(crate) ratio: f64,
    pub(crate) attack_ms: f64,
    pub(crate) release_ms: f64,
    pub(crate) makeup: f64,
}

/// One filter inside a chain.
///
/// Every filter the compiler emits is a variant here; [`fmt::Display`] is the single place where
/// filter syntax is produced.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Filter {
    /// Source: flat color frames.
    ColorSource {
        color: Color,
        size: Canvas,
        fps: Fps,
        duration: Option<f64>,
    },
    Overlay {
        x: String,
        y: String,
        enable: Option<String>,
        shortest: bool,
    },
    DrawText(Box<DrawText>),
    Scale {
        w: String,
        h: String,
        cover: bool,
    },
    Crop {
        w: u32,
        h: u32,
        x: String,
        y: String,
    },
    SetSar,
    SetPts(String),
    Format(&'static str),
    /// Multiply the alpha channel.
    Alpha(f64),
    Eq {
        param: &'static str,
        value: f64,
        enable: Option<String>,
    },
    GBlur {
        sigma: f64,
        enable: Option<String>,
    },
    Grayscale {
        enable: Option<String>,
    },
    Sepia {
        enable: Option<String>,
    },
    Unsharp {
        amount: f64,
        enable: Option<String>,
    },
    Vignette {
        enable: Option<String>,
    },
    Rotate {
        degrees: f64,
    },
    HFlip {
        enable: Option<String>,
    },
    VFlip {
        enable: Option<String>,
    },
    Fade {
        dir: FadeDir,
        start: f64,
        duration: f64,
    },
    XFade {
        transition: &'static str,
        duration: f64,
        offset: f64,
    },
    ZoomPan {
        z: String,
        x: String,
        y: String,
        frames: u64,
        size: Canvas,
        fps: Fps,
    },
    ChromaKey {
        color: Color,
        similarity: f64,
        blend: f64,
    },
    /// Keep only the first frame.
    FirstFrame,
    /// Repeat the buffered frame forever.
    LoopForever,
    Volume(f64),
    /// Per-frame volume expression.
    VolumeExpr(String),
    ADelay {
        ms: u64,
    },
    ATrim {
        duration: f64,
    },
    AFade {
        dir: FadeDir,
        start: f64,
        duration: f64,
    },
    AMix {
        inputs: usize,
    },
    ASplit(usize),
    SidechainCompress(Compressor),
    AGate {
        threshold: f64,
        attack_ms: f64,
        release_ms: f64,
    },
    /// Caller-supplied expression emitted verbatim.
    Raw(String),
}

impl Filter {
    /// Uniform scale by `factor`, keeping the height even.
    pub(crate) fn scale_by(factor: f64) -> Self {
        Self::Scale {
            w: format!("iw*{}", fmt_num(factor)),
            h: "-2".to_owned(),
            cover: false,
        }
    }

    /// Multiply the alpha channel, converting to a format that has one.
    pub(crate) fn opacity(alpha: f64) -> Vec<Self> {
        vec![Self::Format("rgba"), Self::Alpha(alpha)]
    }
}

fn push_enable(f: &mut fmt::Formatter<'_>, enable: &Option<String>) -> fmt::Result {
    match enable {
        Some(g) => write!(f, ":enable='{g}'"),
        None => Ok(()),
    }
}

/// Like [`push_enable`] for filters whose first option is the enable gate.
fn write_enable_only(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    enable: &Option<String>,
) -> fmt::Result {
    match enable {
        Some(g) => write!(f, "{name}=enable='{g}'"),
        None => f.write_str(name),
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColorSource {
                color,
                size,
                fps,
                duration,
            } => {
                write!(f, "color=c={color}:s={}x{}:r={fps}", size.width, size.height)?;
                if let Some(d) = duration {
                    write!(f, ":d={}", fmt_num(*d))?;
                }
                Ok(())
            }
            Self::Overlay {
                x,
                y,
                enable,
                shortest,
            } => {
                write!(f, "overlay=x={}:y={}", quote_expr(x), quote_expr(y))?;
                if *shortest {
                    f.write_str(":shortest=1")?;
                }
                push_enable(f, enable)
            }
            Self::DrawText(dt) => write_drawtext(f, dt),
            Self::Scale { w, h, cover } => {
                write!(f, "scale={w}:{h}")?;
                if *cover {
                    f.write_str(":force_original_aspect_ratio=increase")?;
                }
                Ok(())
            }
            Self::Crop { w, h, x, y } => write!(f, "crop={w}:{h}:{x}:{y}"),
            Self::SetSar => f.write_str("setsar=1"),
            Self::SetPts(expr) => write!(f, "setpts={}", quote_expr(expr)),
            Self::Format(fmt_name) => write!(f, "format={fmt_name}"),
            Self::Alpha(a) => write!(f, "colorchannelmixer=aa={}", fmt_num(*a)),
            Self::Eq {
                param,
                value,
                enable,
            } => {
                write!(f, "eq={param}={}", fmt_num(*value))?;
                push_enable(f, enable)
            }
            Self::GBlur { sigma, enable } => {
                write!(f, "gblur=sigma={}", fmt_num(*sigma))?;
                push_enable(f, enable)
            }
            Self::Grayscale { enable } => {
                f.write_str("hue=s=0")?;
                push_enable(f, enable)
            }
            Self::Sepia { enable } => {
                f.write_str(
                    "colorchannelmixer=rr=0.393:rg=0.769:rb=0.189:gr=0.349:gg=0.686:gb=0.168:br=0.272:bg=0.534:bb=0.131",
                )?;
                push_enable(f, enable)
            }
            Self::Unsharp { amount, enable } => {
                write!(f, "unsharp=5:5:{}", fmt_num(*amount))?;
                push_enable(f, enable)
            }
            Self::Vignette { enable } => write_enable_only(f, "vignette", enable),
            Self::Rotate { degrees } => {
                let rad = fmt_num(degrees.to_radians());
                write!(f, "rotate={rad}:ow='rotw({rad})':oh='roth({rad})':c=black")
            }
            Self::HFlip { enable } => write_enable_only(f, "hflip", enable),
            Self::VFlip { enable } => write_enable_only(f, "vflip", enable),
            Self::Fade {
                dir,
                start,
                duration,
            } => write!(
                f,
                "fade=t={}:st={}:d={}",
                dir.as_str(),
                fmt_num(*start),
                fmt_num(*duration)
            ),
            Self::XFade {
                transition,
                duration,
                offset,
            } => write!(
                f,
                "xfade=transition={transition}:duration={}:offset={}",
                fmt_num(*duration),
                fmt_num(*offset)
            ),
            Self::ZoomPan {
                z,
                x,
                y,
                frames,
                size,
                fps,
            } => write!(
                f,
                "zoompan=z='{z}':x='{x}':y='{y}':d={frames}:s={}x{}:fps={fps}",
                size.width, size.height
            ),
            Self::ChromaKey {
                color,
                similarity,
                blend,
            } => write!(
                f,
                "chromakey=color={color}:similarity={}:blend={}",
                fmt_num(*similarity),
                fmt_num(*blend)
            ),
            Self::FirstFrame => f.write_str("trim=end_frame=1"),
            Self::LoopForever => f.write_str("loop=loop=-1:size=1:start=0"),
            Self::Volume(v) => write!(f, "volume={}", fmt_num(*v)),
            Self::VolumeExpr(expr) => write!(f, "volume='{expr}':eval=frame"),
            Self::ADelay { ms } => write!(f, "adelay={ms}|{ms}"),
            Self::ATrim { duration } => write!(f, "atrim=duration={}", fmt_num(*duration)),
            Self::AFade {
                dir,
                start,
                duration,
            } => write!(
                f,
                "afade=t={}:st={}:d={}",
                dir.as_str(),
                fmt_num(*start),
                fmt_num(*duration)
            ),
            Self::AMix { inputs } => write!(f, "amix=inputs={inputs}:duration=longest"),
            Self::ASplit(n) => write!(f, "asplit={n}"),
            Self::SidechainCompress(c) => write!(
                f,
                "sidechaincompress=threshold={}:ratio={}:attack={}:release={}:makeup={}",
                fmt_num(c.threshold),
                fmt_num(c.ratio),
                fmt_num(c.attack_ms),
                fmt_num(c.release_ms),
                fmt_num(c.makeup)
            ),
            Self::AGate {
                threshold,
                attack_ms,
                release_ms,
            } => write!(
                f,
                "agate=threshold={}:attack={}:release={}",
                fmt_num(*threshold),
                fmt_num(*attack_ms),
                fmt_num(*release_ms)
            ),
            Self::Raw(expr) => f.write_str(expr),
        }
    }
}

fn write_drawtext(f: &mut fmt::Formatter<'_>, dt: &DrawText) -> fmt::Result {
    let s = &dt.style;
    write!(f, "drawtext=text={}", quote_text(&dt.text))?;
    if let Some(file) = &s.font_file {
        write!(f, ":fontfile={}", quote_value(file))?;
    }
    if let Some(family) = &s.font_family {
        write!(f, ":font={}", quote_value(family))?;
    }
    write!(
        f,
        ":fontsize={}:fontcolor={}",
        fmt_num(s.font_size),
        s.font_color
    )?;
    if let Some(box_color) = &s.box_color {
        write!(
            f,
            ":box=1:boxcolor={box_color}:boxborderw={}",
            fmt_num(s.box_padding)
        )?;
    }
    if s.border_width > 0.0 {
        let color = s.border_color.as_ref().map_or("black", |c| c.as_str());
        write!(
            f,
            ":borderw={}:bordercolor={color}",
            fmt_num(s.border_width)
        )?;
    }
    if let Some([dx, dy]) = s.shadow_offset {
        let color = s.shadow_color.as_ref().map_or("black", |c| c.as_str());
        write!(
            f,
            ":shadowx={}:shadowy={}:shadowcolor={color}",
            fmt_num(dx),
            fmt_num(dy)
        )?;
    }
    write!(f, ":x={}:y={}", quote_expr(&dt.x), quote_expr(&dt.y))?;
    push_enable(f, &dt.enable)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/filter.rs"]
mod tests;
