use serde::Serialize;

pub mod catalog;

/// Storage key holding the serialized preference set.
pub const SETTINGS_KEY: &str = "settings";

pub const DEFAULT_THEME: &str = "Basic Light";
pub const DEFAULT_LANGUAGE: &str = "Javascript";
pub const DEFAULT_FONT_SIZE: i64 = 16;
pub const DEFAULT_FONT_FAMILY: &str = "Space Mono";
pub const DEFAULT_SHOW_GITHUB_CORNER: bool = true;
pub const DEFAULT_IS_SETTINGS_MODIFIED: bool = false;
pub const DEFAULT_APP_THEME: &str = "LIGHT";

/// The complete set of user-configurable editor and display options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub theme: String,
    pub language: String,
    #[serde(rename = "fontSize")]
    pub font_size: i64,
    #[serde(rename = "fontFamily")]
    pub font_family: String,
    #[serde(rename = "showGitHubCorner")]
    pub show_github_corner: bool,
    #[serde(rename = "isSettingsModified")]
    pub is_settings_modified: bool,
    #[serde(rename = "appTheme")]
    pub app_theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            show_github_corner: DEFAULT_SHOW_GITHUB_CORNER,
            is_settings_modified: DEFAULT_IS_SETTINGS_MODIFIED,
            app_theme: DEFAULT_APP_THEME.to_owned(),
        }
    }
}

impl Preferences {
    /// Compact JSON snapshot, the exact form written under [`SETTINGS_KEY`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    Theme,
    Language,
    FontSize,
    FontFamily,
    ShowGitHubCorner,
    IsSettingsModified,
    AppTheme,
}

impl PreferenceField {
    pub const ALL: [PreferenceField; 7] = [
        PreferenceField::Theme,
        PreferenceField::Language,
        PreferenceField::FontSize,
        PreferenceField::FontFamily,
        PreferenceField::ShowGitHubCorner,
        PreferenceField::IsSettingsModified,
        PreferenceField::AppTheme,
    ];

    /// Key used for this field inside the stored JSON object.
    pub fn key(self) -> &'static str {
        match self {
            PreferenceField::Theme => "theme",
            PreferenceField::Language => "language",
            PreferenceField::FontSize => "fontSize",
            PreferenceField::FontFamily => "fontFamily",
            PreferenceField::ShowGitHubCorner => "showGitHubCorner",
            PreferenceField::IsSettingsModified => "isSettingsModified",
            PreferenceField::AppTheme => "appTheme",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PreferenceField::Theme => "Theme",
            PreferenceField::Language => "Language",
            PreferenceField::FontSize => "Font Size",
            PreferenceField::FontFamily => "Font Family",
            PreferenceField::ShowGitHubCorner => "Show GitHub corner",
            PreferenceField::IsSettingsModified => "Modified",
            PreferenceField::AppTheme => "Mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_storage_keys() {
        let prefs = Preferences {
            theme: "Dracula".to_owned(),
            language: "Python".to_owned(),
            font_size: 18,
            font_family: "Fira Code".to_owned(),
            show_github_corner: true,
            is_settings_modified: true,
            app_theme: "DARK".to_owned(),
        };
        assert_eq!(
            prefs.to_json().expect("serialize"),
            r#"{"theme":"Dracula","language":"Python","fontSize":18,"fontFamily":"Fira Code","showGitHubCorner":true,"isSettingsModified":true,"appTheme":"DARK"}"#
        );
    }

    #[test]
    fn field_keys_match_serialized_keys() {
        let value = serde_json::to_value(Preferences::default()).expect("to value");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), PreferenceField::ALL.len());
        for field in PreferenceField::ALL {
            assert!(object.contains_key(field.key()), "missing {}", field.key());
        }
    }
}
