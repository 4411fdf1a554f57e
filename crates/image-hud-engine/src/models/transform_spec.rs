use serde::{Deserialize, Serialize};

/// Output container for a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    Png,
    #[default]
    Webp,
    Jpeg,
}

impl TargetFormat {
    /// File extension, also used as the name suffix (`_webp`).
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
        }
    }

    /// Whether `quality` affects the encoded output.
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::Webp | Self::Jpeg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    #[default]
    None,
    /// `resize_value` is a factor in (0, 1].
    Scale,
    /// `resize_value` is the target width in pixels.
    FixedWidth,
}

impl ResizeMode {
    /// Value a freshly selected mode starts from.
    pub const fn default_value(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Scale => 0.5,
            Self::FixedWidth => 800.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Original Size",
            Self::Scale => "Scale Percentage",
            Self::FixedWidth => "Fixed Width",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("quality must be between 0.1 and 1.0, got {0}")]
    Quality(f64),
    #[error("scale factor must be in (0, 1], got {0}")]
    Scale(f64),
    #[error("fixed width must be a positive whole number of pixels, got {0}")]
    Width(f64),
}

/// Declarative description of one image conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformSpec {
    pub target_format: TargetFormat,
    /// 0.1 to 1.0; ignored for png.
    pub quality: f64,
    #[serde(default)]
    pub resize_mode: ResizeMode,
    #[serde(default)]
    pub resize_value: f64,
    #[serde(default)]
    pub delete_original: bool,
    #[serde(default, alias = "use_md5")]
    pub use_content_hash: bool,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            target_format: TargetFormat::Webp,
            quality: 0.8,
            resize_mode: ResizeMode::None,
            resize_value: 0.0,
            delete_original: false,
            use_content_hash: false,
        }
    }
}

impl TransformSpec {
    /// Switches resize mode and resets the value to that mode's default.
    #[must_use]
    pub fn with_resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = mode;
        self.resize_value = mode.default_value();
        self
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        if !(0.1..=1.0).contains(&self.quality) {
            return Err(SpecError::Quality(self.quality));
        }
        match self.resize_mode {
            ResizeMode::None => Ok(()),
            ResizeMode::Scale => {
                if self.resize_value > 0.0 && self.resize_value <= 1.0 {
                    Ok(())
                } else {
                    Err(SpecError::Scale(self.resize_value))
                }
            }
            ResizeMode::FixedWidth => {
                if self.resize_value >= 1.0 && self.resize_value.fract() == 0.0 {
                    Ok(())
                } else {
                    Err(SpecError::Width(self.resize_value))
                }
            }
        }
    }

    /// Human-readable resize description, e.g. `Scale Percentage 50%`.
    pub fn resize_description(&self) -> String {
        match self.resize_mode {
            ResizeMode::None => ResizeMode::None.label().to_string(),
            ResizeMode::Scale => format!(
                "{} {}%",
                ResizeMode::Scale.label(),
                (self.resize_value * 100.0).round()
            ),
            ResizeMode::FixedWidth => {
                format!("{} {}px", ResizeMode::FixedWidth.label(), self.resize_value)
            }
        }
    }
}

/// A named, user-configured transform offered as a one-click action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub spec: TransformSpec,
}

impl Preset {
    pub fn new(name: impl Into<String>, spec: TransformSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    /// One-line summary shown next to the preset name.
    pub fn describe(&self) -> String {
        let spec = &self.spec;
        let mut desc = format!(
            "{} | {}% Quality | {}",
            spec.target_format.extension().to_uppercase(),
            (spec.quality * 100.0).round(),
            spec.resize_description()
        );
        if spec.delete_original {
            desc.push_str(" | Delete Original");
        }
        if spec.use_content_hash {
            desc.push_str(" | Use MD5 Naming");
        }
        desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn spec(mode: ResizeMode, value: f64) -> TransformSpec {
        TransformSpec {
            resize_mode: mode,
            resize_value: value,
            ..TransformSpec::default()
        }
    }

    #[rstest]
    #[case(spec(ResizeMode::None, 0.0))]
    #[case(spec(ResizeMode::Scale, 0.5))]
    #[case(spec(ResizeMode::Scale, 1.0))]
    #[case(spec(ResizeMode::FixedWidth, 800.0))]
    fn accepts_valid_specs(#[case] spec: TransformSpec) {
        assert_eq!(spec.validate(), Ok(()));
    }

    #[rstest]
    #[case(spec(ResizeMode::Scale, 0.0), SpecError::Scale(0.0))]
    #[case(spec(ResizeMode::Scale, 1.5), SpecError::Scale(1.5))]
    #[case(spec(ResizeMode::FixedWidth, 0.0), SpecError::Width(0.0))]
    #[case(spec(ResizeMode::FixedWidth, 100.5), SpecError::Width(100.5))]
    fn rejects_invalid_resize_values(#[case] spec: TransformSpec, #[case] err: SpecError) {
        assert_eq!(spec.validate(), Err(err));
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let spec = TransformSpec {
            quality: 0.05,
            ..TransformSpec::default()
        };
        assert_eq!(spec.validate(), Err(SpecError::Quality(0.05)));
    }

    #[test]
    fn switching_mode_resets_value() {
        let spec = TransformSpec::default().with_resize_mode(ResizeMode::FixedWidth);
        assert_eq!(spec.resize_value, 800.0);
        let spec = spec.with_resize_mode(ResizeMode::Scale);
        assert_eq!(spec.resize_value, 0.5);
        let spec = spec.with_resize_mode(ResizeMode::None);
        assert_eq!(spec.resize_value, 0.0);
    }

    #[test]
    fn describes_preset() {
        let preset = Preset::new(
            "Small",
            TransformSpec {
                quality: 0.9,
                resize_mode: ResizeMode::Scale,
                resize_value: 0.5,
                use_content_hash: true,
                ..TransformSpec::default()
            },
        );
        assert_eq!(
            preset.describe(),
            "WEBP | 90% Quality | Scale Percentage 50% | Use MD5 Naming"
        );

        let preset = Preset::new(
            "Wide",
            TransformSpec {
                target_format: TargetFormat::Jpeg,
                resize_mode: ResizeMode::FixedWidth,
                resize_value: 1200.0,
                delete_original: true,
                ..TransformSpec::default()
            },
        );
        assert_eq!(
            preset.describe(),
            "JPEG | 80% Quality | Fixed Width 1200px | Delete Original"
        );
    }
}
