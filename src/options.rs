//! Behavior configuration.
//!
//! Hosts hand over loose option records (JS objects, `data-fx-*` attributes).
//! [`OptionsPatch`] is the typed form: every field is optional, each behavior
//! reads only the fields it knows, and defaults fill whatever is absent.
//! Values of the wrong type are dropped while parsing, never reported.

use crate::constants::DATA_OPTION_PREFIX;
use crate::frame::FramePolicy;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("unknown reveal direction `{0}`")]
    UnknownDirection(String),
    #[error("unknown frame policy `{0}`")]
    UnknownPolicy(String),
    #[error("unknown behavior `{0}`")]
    UnknownBehavior(String),
}

/// Which way a revealed element travels in from; CSS picks the variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealDirection {
    Left,
    Right,
    #[default]
    Up,
    Down,
}

impl RevealDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            RevealDirection::Left => "left",
            RevealDirection::Right => "right",
            RevealDirection::Up => "up",
            RevealDirection::Down => "down",
        }
    }
}

impl fmt::Display for RevealDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevealDirection {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(RevealDirection::Left),
            "right" => Ok(RevealDirection::Right),
            "up" => Ok(RevealDirection::Up),
            "down" => Ok(RevealDirection::Down),
            other => Err(OptionError::UnknownDirection(other.to_string())),
        }
    }
}

impl FromStr for FramePolicy {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" | "throttle" => Ok(FramePolicy::Drop),
            "replace" => Ok(FramePolicy::Replace),
            other => Err(OptionError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A partial or full configuration record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsPatch {
    pub strength: Option<f64>,
    pub max_tilt: Option<f64>,
    pub scale: Option<f64>,
    pub hover_scale: Option<f64>,
    pub color: Option<String>,
    pub duration_ms: Option<f64>,
    pub direction: Option<RevealDirection>,
    pub once: Option<bool>,
    pub policy: Option<FramePolicy>,
}

impl OptionsPatch {
    /// Applies one `key = value` pair given as text.
    ///
    /// Keys accept both the camelCase and kebab-case spelling. Unknown keys and
    /// unparsable values leave the patch untouched.
    pub fn set_text(&mut self, key: &str, value: &str) {
        let value = value.trim();
        match key {
            "strength" => self.strength = number(value).or(self.strength),
            "maxTilt" | "max-tilt" => self.max_tilt = number(value).or(self.max_tilt),
            "scale" => self.scale = number(value).or(self.scale),
            "hoverScale" | "hover-scale" => self.hover_scale = number(value).or(self.hover_scale),
            "duration" => self.duration_ms = number(value).or(self.duration_ms),
            "color" if !value.is_empty() => self.color = Some(value.to_string()),
            "direction" => {
                if let Ok(direction) = value.parse() {
                    self.direction = Some(direction);
                }
            }
            "policy" => {
                if let Ok(policy) = value.parse() {
                    self.policy = Some(policy);
                }
            }
            "once" => match value {
                "true" | "" => self.once = Some(true),
                "false" => self.once = Some(false),
                _ => {}
            },
            _ => {}
        }
    }

    /// Builds a patch from element attributes, keeping only `data-fx-<key>`.
    pub fn from_data_attributes<'a>(
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::from_pairs(attributes.into_iter().filter_map(|(name, value)| {
            name.strip_prefix(DATA_OPTION_PREFIX).map(|key| (key, value))
        }))
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut patch = Self::default();
        for (key, value) in pairs {
            patch.set_text(key, value);
        }
        patch
    }
}

/// Accepts only finite numbers.
#[inline]
pub fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

#[inline]
fn number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().and_then(finite)
}
