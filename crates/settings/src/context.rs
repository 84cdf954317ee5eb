use core_types::{Preferences, SETTINGS_KEY};
use local_storage::SettingsStore;
use tracing::{info, warn};

use crate::merge::merge_with_defaults;
use crate::{Result, SettingsError};

/// Sole owner of the session's preference set.
///
/// Every mutation rewrites the complete set under [`SETTINGS_KEY`], one write per
/// call. Writes are best effort: when the store fails, memory stays authoritative.
pub struct SettingsContext {
    store: SettingsStore,
    prefs: Preferences,
}

impl SettingsContext {
    /// Read, merge over defaults, then persist the normalized set once.
    pub fn load(store: SettingsStore) -> Self {
        let raw = store.get(SETTINGS_KEY);
        let prefs = merge_with_defaults(raw.as_deref());
        info!(
            stored = raw.is_some(),
            theme = %prefs.theme,
            language = %prefs.language,
            "settings loaded"
        );
        let context = Self { store, prefs };
        context.write_back();
        context
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn theme(&self) -> &str {
        &self.prefs.theme
    }

    pub fn language(&self) -> &str {
        &self.prefs.language
    }

    pub fn font_size(&self) -> i64 {
        self.prefs.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.prefs.font_family
    }

    pub fn show_github_corner(&self) -> bool {
        self.prefs.show_github_corner
    }

    pub fn is_settings_modified(&self) -> bool {
        self.prefs.is_settings_modified
    }

    pub fn app_theme(&self) -> &str {
        &self.prefs.app_theme
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        let theme = theme.into();
        self.update(|prefs| prefs.theme = theme);
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        self.update(|prefs| prefs.language = language);
    }

    pub fn set_font_size(&mut self, font_size: i64) {
        self.update(|prefs| prefs.font_size = font_size);
    }

    /// Coerce textual input to an integer size. Input without leading digits is
    /// rejected and nothing is written.
    pub fn set_font_size_str(&mut self, raw: &str) -> Result<()> {
        let size =
            parse_font_size(raw).ok_or_else(|| SettingsError::InvalidFontSize(raw.to_owned()))?;
        self.set_font_size(size);
        Ok(())
    }

    pub fn set_font_family(&mut self, font_family: impl Into<String>) {
        let font_family = font_family.into();
        self.update(|prefs| prefs.font_family = font_family);
    }

    pub fn set_show_github_corner(&mut self, show: bool) {
        self.update(|prefs| prefs.show_github_corner = show);
    }

    pub fn set_is_settings_modified(&mut self, modified: bool) {
        self.update(|prefs| prefs.is_settings_modified = modified);
    }

    pub fn set_app_theme(&mut self, app_theme: impl Into<String>) {
        let app_theme = app_theme.into();
        self.update(|prefs| prefs.app_theme = app_theme);
    }

    /// Restore every field, the modified flag included, in a single write.
    pub fn reset_settings(&mut self) {
        self.update(|prefs| *prefs = Preferences::default());
        info!("settings reset to defaults");
    }

    fn update(&mut self, apply: impl FnOnce(&mut Preferences)) {
        apply(&mut self.prefs);
        self.write_back();
    }

    fn write_back(&self) {
        match self.prefs.to_json() {
            Ok(json) => self.store.set(SETTINGS_KEY, &json),
            Err(err) => warn!(error = %err, "failed to serialize settings"),
        }
    }
}

/// Integer prefix of `raw`: leading whitespace, an optional sign, then digits.
/// Anything after the digits is ignored, so `"20px"` and `"20.7"` both give 20.
pub fn parse_font_size(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
