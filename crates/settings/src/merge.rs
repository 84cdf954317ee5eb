use core_types::{PreferenceField, Preferences};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Build a fully populated preference set from the raw stored blob.
///
/// Each known field is extracted on its own; absent, `null` or wrongly typed values
/// keep the default. Unknown keys are ignored.
pub fn merge_with_defaults(raw: Option<&str>) -> Preferences {
    let stored = parse_object(raw);
    let mut prefs = Preferences::default();

    for field in PreferenceField::ALL {
        let Some(value) = stored.get(field.key()) else {
            continue;
        };
        let applied = match field {
            PreferenceField::Theme => assign_string(&mut prefs.theme, value),
            PreferenceField::Language => assign_string(&mut prefs.language, value),
            PreferenceField::FontFamily => assign_string(&mut prefs.font_family, value),
            PreferenceField::AppTheme => assign_string(&mut prefs.app_theme, value),
            PreferenceField::FontSize => match integer_of(value) {
                Some(size) => {
                    prefs.font_size = size;
                    true
                }
                None => false,
            },
            PreferenceField::ShowGitHubCorner => assign_bool(&mut prefs.show_github_corner, value),
            PreferenceField::IsSettingsModified => {
                assign_bool(&mut prefs.is_settings_modified, value)
            }
        };
        if !applied && !value.is_null() {
            debug!(field = field.key(), %value, "stored value has wrong type, using default");
        }
    }

    prefs
}

fn parse_object(raw: Option<&str>) -> Map<String, Value> {
    let Some(raw) = raw else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("stored settings are not a JSON object, using defaults");
            Map::new()
        }
        Err(err) => {
            warn!(error = %err, "stored settings are malformed, using defaults");
            Map::new()
        }
    }
}

fn assign_string(slot: &mut String, value: &Value) -> bool {
    match value.as_str() {
        Some(text) => {
            *slot = text.to_owned();
            true
        }
        None => false,
    }
}

fn assign_bool(slot: &mut bool, value: &Value) -> bool {
    match value.as_bool() {
        Some(flag) => {
            *slot = flag;
            true
        }
        None => false,
    }
}

fn integer_of(value: &Value) -> Option<i64> {
    if let Some(int) = value.as_i64() {
        return Some(int);
    }
    value
        .as_f64()
        .filter(|float| float.is_finite() && float.abs() < i64::MAX as f64)
        .map(|float| float.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entry_yields_defaults() {
        assert_eq!(merge_with_defaults(None), Preferences::default());
    }

    #[test]
    fn malformed_entry_behaves_like_absent() {
        for raw in ["{not json", "", "42", "[1,2]", "\"text\"", "null"] {
            assert_eq!(
                merge_with_defaults(Some(raw)),
                Preferences::default(),
                "raw {raw:?}"
            );
        }
    }

    #[test]
    fn single_field_overrides_only_itself() {
        let prefs = merge_with_defaults(Some(r#"{"fontSize":20}"#));
        assert_eq!(
            prefs,
            Preferences {
                font_size: 20,
                ..Preferences::default()
            }
        );
    }

    #[test]
    fn every_subset_of_fields_merges_per_field() {
        let full = Preferences {
            theme: "Dracula".to_owned(),
            language: "Python".to_owned(),
            font_size: 18,
            font_family: "Fira Code".to_owned(),
            show_github_corner: false,
            is_settings_modified: true,
            app_theme: "DARK".to_owned(),
        };
        let full_value = serde_json::to_value(&full).expect("to value");
        let full_object = full_value.as_object().expect("object");
        let defaults = Preferences::default();

        for mask in 0u32..(1 << PreferenceField::ALL.len()) {
            let mut partial = Map::new();
            for (bit, field) in PreferenceField::ALL.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    partial.insert(field.key().to_owned(), full_object[field.key()].clone());
                }
            }
            let raw = Value::Object(partial).to_string();
            let merged = merge_with_defaults(Some(&raw));

            let pick = |bit: usize| mask & (1 << bit) != 0;
            let expected = Preferences {
                theme: if pick(0) { full.theme.clone() } else { defaults.theme.clone() },
                language: if pick(1) { full.language.clone() } else { defaults.language.clone() },
                font_size: if pick(2) { full.font_size } else { defaults.font_size },
                font_family: if pick(3) {
                    full.font_family.clone()
                } else {
                    defaults.font_family.clone()
                },
                show_github_corner: if pick(4) {
                    full.show_github_corner
                } else {
                    defaults.show_github_corner
                },
                is_settings_modified: if pick(5) {
                    full.is_settings_modified
                } else {
                    defaults.is_settings_modified
                },
                app_theme: if pick(6) { full.app_theme.clone() } else { defaults.app_theme.clone() },
            };
            assert_eq!(merged, expected, "mask {mask:07b}");
        }
    }

    #[test]
    fn null_and_mistyped_fields_fall_back() {
        let prefs = merge_with_defaults(Some(
            r#"{"theme":null,"language":7,"fontSize":"big","showGitHubCorner":"yes","fontFamily":"Fira Code"}"#,
        ));
        assert_eq!(
            prefs,
            Preferences {
                font_family: "Fira Code".to_owned(),
                ..Preferences::default()
            }
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let prefs = merge_with_defaults(Some(r#"{"layout":"wide","theme":"Nord"}"#));
        assert_eq!(prefs.theme, "Nord");
        assert_eq!(prefs.language, Preferences::default().language);
    }

    #[test]
    fn float_font_size_is_truncated() {
        let prefs = merge_with_defaults(Some(r#"{"fontSize":18.9}"#));
        assert_eq!(prefs.font_size, 18);
    }
}
