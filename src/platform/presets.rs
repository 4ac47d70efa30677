use crate::foundation::core::{AspectRatio, Canvas};
use std::fmt;

/// Publishing targets with a known canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// TikTok, 9:16.
    TikTok,
    /// Instagram Reels, 9:16.
    InstagramReels,
    /// Instagram feed, 1:1.
    InstagramSquare,
    /// Instagram feed, 4:5.
    InstagramPortrait,
    /// Instagram Stories, 9:16.
    InstagramStory,
    /// YouTube Shorts, 9:16.
    YoutubeShorts,
    /// YouTube, 16:9.
    Youtube,
    /// Twitter / X, 16:9 at 720p.
    Twitter,
    /// Facebook, 16:9 at 720p.
    Facebook,
    /// LinkedIn, 16:9.
    LinkedIn,
}

/// Target canvas and encoder hints for one platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformPreset {
    /// Output canvas.
    pub canvas: Canvas,
    /// Display aspect ratio.
    pub aspect: AspectRatio,
    /// Suggested video bitrate in kbit/s.
    pub video_kbps: u32,
    /// Suggested audio bitrate in kbit/s.
    pub audio_kbps: u32,
}

const fn preset(
    w: u32,
    h: u32,
    aw: u32,
    ah: u32,
    video_kbps: u32,
    audio_kbps: u32,
) -> PlatformPreset {
    PlatformPreset {
        canvas: Canvas {
            width: w,
            height: h,
        },
        aspect: AspectRatio {
            width: aw,
            height: ah,
        },
        video_kbps,
        audio_kbps,
    }
}

impl Platform {
    /// Every platform, in table order.
    pub const ALL: [Platform; 10] = [
        Self::TikTok,
        Self::InstagramReels,
        Self::InstagramSquare,
        Self::InstagramPortrait,
        Self::InstagramStory,
        Self::YoutubeShorts,
        Self::Youtube,
        Self::Twitter,
        Self::Facebook,
        Self::LinkedIn,
    ];

    /// Canonical name, e.g. `"youtube-shorts"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::TikTok => "tiktok",
            Self::InstagramReels => "instagram-reels",
            Self::InstagramSquare => "instagram-square",
            Self::InstagramPortrait => "instagram-portrait",
            Self::InstagramStory => "instagram-story",
            Self::YoutubeShorts => "youtube-shorts",
            Self::Youtube => "youtube",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::LinkedIn => "linkedin",
        }
    }

    /// Look a platform up by name.
    ///
    /// Case, spaces, `-` and `_` are ignored; a few common aliases (`reels`, `shorts`, `x`,
    /// `instagram`) are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let p = match key.as_str() {
            "tiktok" => Self::TikTok,
            "instagramreels" | "reels" => Self::InstagramReels,
            "instagram" | "instagramsquare" | "instagramfeed" => Self::InstagramSquare,
            "instagramportrait" => Self::InstagramPortrait,
            "instagramstory" | "instagramstories" | "story" => Self::InstagramStory,
            "youtubeshorts" | "shorts" => Self::YoutubeShorts,
            "youtube" => Self::Youtube,
            "twitter" | "x" => Self::Twitter,
            "facebook" => Self::Facebook,
            "linkedin" => Self::LinkedIn,
            _ => return None,
        };
        Some(p)
    }

    /// Static preset for this platform.
    pub fn preset(self) -> PlatformPreset {
        match self {
            Self::TikTok | Self::InstagramReels | Self::InstagramStory | Self::YoutubeShorts => {
                preset(1080, 1920, 9, 16, 6000, 192)
            }
            Self::InstagramSquare => preset(1080, 1080, 1, 1, 5000, 128),
            Self::InstagramPortrait => preset(1080, 1350, 4, 5, 5000, 128),
            Self::Youtube => preset(1920, 1080, 16, 9, 8000, 192),
            Self::Twitter => preset(1280, 720, 16, 9, 5000, 128),
            Self::Facebook => preset(1280, 720, 16, 9, 4000, 128),
            Self::LinkedIn => preset(1920, 1080, 16, 9, 5000, 192),
        }
    }
}

impl PlatformPreset {
    /// Bitrate flags used when no codec preset is chosen.
    pub(crate) fn bitrate_args(&self) -> Vec<String> {
        vec![
            "-b:v".to_owned(),
            format!("{}k", self.video_kbps),
            "-b:a".to_owned(),
            format!("{}k", self.audio_kbps),
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        p.name().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/presets.rs"]
mod tests;
