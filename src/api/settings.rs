use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Zoom;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlsLocation {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl ControlsLocation {
    /// Toolbar is laid out before the chart panel.
    #[must_use]
    pub fn leads_chart(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlsLayout {
    pub location: ControlsLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(rename = "Controls", default)]
    pub controls: ControlsLayout,
}

/// User-facing chart settings.
///
/// Field names serialize as the keys hosts already use
/// (`Zoom`, `Layout.Controls.location`, `Controls`, `width`, `height`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(rename = "Zoom", default)]
    pub zoom: Zoom,
    #[serde(rename = "Layout", default)]
    pub layout: LayoutSettings,
    /// Toolbar control titles, e.g. `"Play"`.
    #[serde(rename = "Controls", default)]
    pub controls: Vec<String>,
    /// Window size used when a new window has to be opened.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl ChartSettings {
    #[must_use]
    pub fn with_zoom(mut self, zoom: Zoom) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_controls_location(mut self, location: ControlsLocation) -> Self {
        self.layout.controls.location = location;
        self
    }

    #[must_use]
    pub fn with_controls<I, S>(mut self, controls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controls = controls.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    Zoom,
    #[serde(rename = "Layout.Controls.location")]
    ControlsLocation,
    Controls,
    #[serde(rename = "width")]
    Width,
    #[serde(rename = "height")]
    Height,
}

impl SettingKey {
    pub const ALL: [Self; 5] = [
        Self::Zoom,
        Self::ControlsLocation,
        Self::Controls,
        Self::Width,
        Self::Height,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zoom => "Zoom",
            Self::ControlsLocation => "Layout.Controls.location",
            Self::Controls => "Controls",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Zoom => "a zoom factor",
            Self::ControlsLocation => "a controls location",
            Self::Controls => "a list of control titles",
            Self::Width | Self::Height => "an optional pixel size",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown setting key `{raw}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Zoom(Zoom),
    Location(ControlsLocation),
    Controls(Vec<String>),
    Size(Option<u32>),
}

pub type SettingsMap = IndexMap<SettingKey, SettingValue>;

/// Key-subset access over [`ChartSettings`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsStore {
    settings: ChartSettings,
}

impl SettingsStore {
    #[must_use]
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn replace(&mut self, settings: ChartSettings) {
        self.settings = settings;
    }

    #[must_use]
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Zoom => SettingValue::Zoom(self.settings.zoom),
            SettingKey::ControlsLocation => {
                SettingValue::Location(self.settings.layout.controls.location)
            }
            SettingKey::Controls => SettingValue::Controls(self.settings.controls.clone()),
            SettingKey::Width => SettingValue::Size(self.settings.width),
            SettingKey::Height => SettingValue::Size(self.settings.height),
        }
    }

    /// Values for `keys` in request order; every key when `keys` is empty.
    #[must_use]
    pub fn get_settings(&self, keys: &[SettingKey]) -> SettingsMap {
        let keys: &[SettingKey] = if keys.is_empty() {
            &SettingKey::ALL
        } else {
            keys
        };
        keys.iter().map(|&key| (key, self.get(key))).collect()
    }

    /// Applies every entry or none of them.
    pub fn set_settings(&mut self, values: SettingsMap) -> ChartResult<()> {
        let mut next = self.settings.clone();
        for (key, value) in values {
            match (key, value) {
                (SettingKey::Zoom, SettingValue::Zoom(zoom)) => next.zoom = zoom,
                (SettingKey::ControlsLocation, SettingValue::Location(location)) => {
                    next.layout.controls.location = location;
                }
                (SettingKey::Controls, SettingValue::Controls(controls)) => {
                    next.controls = controls;
                }
                (SettingKey::Width, SettingValue::Size(size)) => next.width = size,
                (SettingKey::Height, SettingValue::Size(size)) => next.height = size,
                (key, _) => {
                    return Err(ChartError::SettingTypeMismatch {
                        key: key.to_string(),
                        expected: key.expected(),
                    });
                }
            }
        }
        debug!(zoom = next.zoom.factor(), "settings updated");
        self.settings = next;
        Ok(())
    }
}
