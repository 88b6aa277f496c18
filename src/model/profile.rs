use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Normal,
    Large,
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Normal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub animations_enabled: bool,
    pub sound_enabled: bool,
    pub font_size: FontSize,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        AccessibilitySettings {
            high_contrast: false,
            animations_enabled: true,
            sound_enabled: true,
            font_size: FontSize::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub accessibility: AccessibilitySettings,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "Player".to_string(),
            theme: "light".to_string(),
            created_at: Utc::now(),
            accessibility: AccessibilitySettings::default(),
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub theme: Option<String>,
    pub accessibility: Option<AccessibilitySettings>,
}

impl Profile {
    /// Default profile stamped with an explicit creation time, for callers
    /// that own a clock.
    pub fn initial(created_at: DateTime<Utc>) -> Self {
        Profile {
            created_at,
            ..Profile::default()
        }
    }

    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(accessibility) = patch.accessibility {
            self.accessibility = accessibility;
        }
    }
}
