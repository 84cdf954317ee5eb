//! View model behind the settings panel.
//!
//! Each `change_*` handler stores the picked value and then raises the modified flag,
//! so a user edit costs two writes. The panel never validates choices against the
//! catalogs; it only offers catalog entries.

use core_types::{PreferenceField, Preferences};
use core_types::catalog::{APP_THEMES, EDITOR_FONTS, EDITOR_THEMES, LANGUAGES, font_size_options};
use tracing::debug;

use crate::Result;
use crate::context::SettingsContext;

/// Highlight of the reset button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetEmphasis {
    Neutral,
    Danger,
}

/// Values offered for `field`, or `None` for fields edited as a toggle.
pub fn options_for(field: PreferenceField) -> Option<Vec<String>> {
    let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|item| (*item).to_owned()).collect() };
    match field {
        PreferenceField::FontFamily => Some(owned(EDITOR_FONTS)),
        PreferenceField::FontSize => Some(font_size_options()),
        PreferenceField::Theme => Some(owned(EDITOR_THEMES)),
        PreferenceField::Language => Some(owned(LANGUAGES)),
        PreferenceField::AppTheme => Some(owned(APP_THEMES)),
        PreferenceField::ShowGitHubCorner | PreferenceField::IsSettingsModified => None,
    }
}

/// Text shown for `field`; matches the catalog entry when the value is one.
pub fn display_value(prefs: &Preferences, field: PreferenceField) -> String {
    match field {
        PreferenceField::Theme => prefs.theme.clone(),
        PreferenceField::Language => prefs.language.clone(),
        PreferenceField::FontSize => prefs.font_size.to_string(),
        PreferenceField::FontFamily => prefs.font_family.clone(),
        PreferenceField::ShowGitHubCorner => prefs.show_github_corner.to_string(),
        PreferenceField::IsSettingsModified => prefs.is_settings_modified.to_string(),
        PreferenceField::AppTheme => prefs.app_theme.clone(),
    }
}

pub fn emphasis_for(prefs: &Preferences) -> ResetEmphasis {
    if prefs.is_settings_modified {
        ResetEmphasis::Danger
    } else {
        ResetEmphasis::Neutral
    }
}

/// Font stack applied to the editor surface.
pub fn font_stack_for(prefs: &Preferences) -> String {
    format!("{}, monospace", prefs.font_family)
}

pub struct SettingsPanel<'a> {
    context: &'a mut SettingsContext,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(context: &'a mut SettingsContext) -> Self {
        Self { context }
    }

    pub fn change_font_family(&mut self, font_family: &str) {
        self.context.set_font_family(font_family);
        self.mark_modified();
    }

    pub fn change_theme(&mut self, theme: &str) {
        self.context.set_theme(theme);
        self.mark_modified();
    }

    pub fn change_language(&mut self, language: &str) {
        self.context.set_language(language);
        self.mark_modified();
    }

    /// Rejected input leaves both the size and the modified flag alone.
    pub fn change_font_size(&mut self, raw: &str) -> Result<()> {
        self.context.set_font_size_str(raw)?;
        self.mark_modified();
        Ok(())
    }

    pub fn change_app_theme(&mut self, app_theme: &str) {
        self.context.set_app_theme(app_theme);
        self.mark_modified();
    }

    pub fn change_show_github_corner(&mut self, show: bool) {
        self.context.set_show_github_corner(show);
        self.mark_modified();
    }

    pub fn reset(&mut self) {
        self.context.reset_settings();
    }

    pub fn reset_emphasis(&self) -> ResetEmphasis {
        emphasis_for(self.context.preferences())
    }

    pub fn editor_font_stack(&self) -> String {
        font_stack_for(self.context.preferences())
    }

    pub fn current_value(&self, field: PreferenceField) -> String {
        display_value(self.context.preferences(), field)
    }

    /// Step `field` to the next catalog entry, wrapping around. A current value that
    /// is not in the catalog moves to the first entry. Toggle fields flip.
    pub fn cycle(&mut self, field: PreferenceField) -> Result<()> {
        let Some(options) = options_for(field) else {
            match field {
                PreferenceField::ShowGitHubCorner => {
                    let show = !self.context.show_github_corner();
                    self.change_show_github_corner(show);
                }
                _ => debug!(field = field.key(), "field is not user editable"),
            }
            return Ok(());
        };

        let current = self.current_value(field);
        let next = next_option(&options, &current).to_owned();
        match field {
            PreferenceField::FontFamily => self.change_font_family(&next),
            PreferenceField::FontSize => self.change_font_size(&next)?,
            PreferenceField::Theme => self.change_theme(&next),
            PreferenceField::Language => self.change_language(&next),
            PreferenceField::AppTheme => self.change_app_theme(&next),
            PreferenceField::ShowGitHubCorner | PreferenceField::IsSettingsModified => {}
        }
        Ok(())
    }

    fn mark_modified(&mut self) {
        self.context.set_is_settings_modified(true);
    }
}

fn next_option<'o>(options: &'o [String], current: &str) -> &'o str {
    let next = options
        .iter()
        .position(|option| option == current)
        .map_or(0, |index| (index + 1) % options.len());
    options.get(next).map(String::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use core_types::SETTINGS_KEY;
    use local_storage::{MemoryBackend, SettingsStore};

    use super::*;

    fn context_with(backend: &MemoryBackend) -> SettingsContext {
        SettingsContext::load(SettingsStore::new(backend.clone()))
    }

    #[test]
    fn change_sets_value_then_modified_flag() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);
        let baseline = backend.write_count();

        SettingsPanel::new(&mut context).change_theme("Dracula");

        assert_eq!(context.theme(), "Dracula");
        assert!(context.is_settings_modified());
        let writes = backend.writes();
        assert_eq!(writes.len() - baseline, 2);
        assert!(writes[baseline].1.contains(r#""isSettingsModified":false"#));
        assert!(writes[baseline + 1].1.contains(r#""isSettingsModified":true"#));
    }

    #[test]
    fn font_size_text_is_coerced() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);

        SettingsPanel::new(&mut context)
            .change_font_size("20")
            .expect("numeric");
        assert_eq!(context.font_size(), 20);
        assert!(context.is_settings_modified());
    }

    #[test]
    fn rejected_font_size_leaves_flag_clear() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);

        let result = SettingsPanel::new(&mut context).change_font_size("huge");
        assert!(result.is_err());
        assert!(!context.is_settings_modified());
    }

    #[test]
    fn reset_clears_emphasis() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);
        let mut panel = SettingsPanel::new(&mut context);

        assert_eq!(panel.reset_emphasis(), ResetEmphasis::Neutral);
        panel.change_app_theme("DARK");
        panel.change_font_family("Fira Code");
        assert_eq!(panel.reset_emphasis(), ResetEmphasis::Danger);

        panel.reset();
        assert_eq!(panel.reset_emphasis(), ResetEmphasis::Neutral);
        assert_eq!(context.preferences(), &Preferences::default());
        assert_eq!(
            backend.peek(SETTINGS_KEY),
            Some(Preferences::default().to_json().expect("json"))
        );
    }

    #[test]
    fn cycle_walks_catalog_and_wraps() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);
        let mut panel = SettingsPanel::new(&mut context);

        panel.cycle(PreferenceField::AppTheme).expect("cycle");
        assert_eq!(panel.current_value(PreferenceField::AppTheme), "DARK");
        panel.cycle(PreferenceField::AppTheme).expect("cycle");
        assert_eq!(panel.current_value(PreferenceField::AppTheme), "LIGHT");

        panel.cycle(PreferenceField::FontSize).expect("cycle");
        assert_eq!(context.font_size(), 17);
    }

    #[test]
    fn cycle_from_unknown_value_selects_first_entry() {
        let backend = MemoryBackend::with_entry(SETTINGS_KEY, r#"{"theme":"Retired Theme"}"#);
        let mut context = context_with(&backend);

        SettingsPanel::new(&mut context)
            .cycle(PreferenceField::Theme)
            .expect("cycle");
        assert_eq!(context.theme(), EDITOR_THEMES[0]);
    }

    #[test]
    fn cycle_toggles_github_corner() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);

        SettingsPanel::new(&mut context)
            .cycle(PreferenceField::ShowGitHubCorner)
            .expect("toggle");
        assert!(!context.show_github_corner());
        assert!(context.is_settings_modified());
    }

    #[test]
    fn editor_font_stack_falls_back_to_monospace() {
        let backend = MemoryBackend::new();
        let mut context = context_with(&backend);
        let panel = SettingsPanel::new(&mut context);
        assert_eq!(panel.editor_font_stack(), "Space Mono, monospace");
    }

    #[test]
    fn toggle_fields_have_no_options() {
        assert!(options_for(PreferenceField::ShowGitHubCorner).is_none());
        assert!(options_for(PreferenceField::IsSettingsModified).is_none());
        for field in [
            PreferenceField::Theme,
            PreferenceField::Language,
            PreferenceField::FontSize,
            PreferenceField::FontFamily,
            PreferenceField::AppTheme,
        ] {
            assert!(!options_for(field).expect("catalog").is_empty());
        }
    }
}
