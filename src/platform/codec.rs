/// Named encoder settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecPreset {
    /// H.264 + AAC with fast start, for streaming on the web.
    #[default]
    Web,
    /// Low CRF H.264 for masters.
    HighQuality,
    /// Quick drafts.
    Fast,
    /// HEVC video with lossless audio.
    Archive,
}

impl CodecPreset {
    /// Encoder flags in emission order.
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Self::Web => &[
                "-c:v", "libx264", "-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p",
                "-c:a", "aac", "-b:a", "128k", "-movflags", "+faststart",
            ],
            Self::HighQuality => &[
                "-c:v", "libx264", "-preset", "slow", "-crf", "18", "-pix_fmt", "yuv420p",
                "-c:a", "aac", "-b:a", "320k",
            ],
            Self::Fast => &[
                "-c:v", "libx264", "-preset", "ultrafast", "-crf", "28", "-c:a", "aac", "-b:a",
                "128k",
            ],
            Self::Archive => &[
                "-c:v", "libx265", "-preset", "slow", "-crf", "20", "-c:a", "flac",
            ],
        }
    }

    /// Rough combined bitrate in kbit/s, for size estimates.
    pub fn approx_kbps(self) -> u32 {
        match self {
            Self::Web => 5000 + 128,
            Self::HighQuality => 12000 + 320,
            Self::Fast => 3000 + 128,
            Self::Archive => 8000 + 1000,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/codec.rs"]
mod tests;
