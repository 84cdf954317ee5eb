//! Selectable values offered by the settings controls.
//!
//! Every list is non-empty and ordered. Nothing here is enforced against the stored
//! preferences; the controls simply only offer these entries.

use std::ops::RangeInclusive;

pub const FONT_SIZES: RangeInclusive<i64> = 12..=24;

pub const EDITOR_FONTS: &[&str] = &[
    "Cascadia Code",
    "Courier Prime",
    "Fira Code",
    "IBM Plex Mono",
    "Inconsolata",
    "JetBrains Mono",
    "Roboto Mono",
    "Source Code Pro",
    "Space Mono",
    "Ubuntu Mono",
];

pub const EDITOR_THEMES: &[&str] = &[
    "Abcdef",
    "Android Studio",
    "Atom One",
    "Basic Dark",
    "Basic Light",
    "Dracula",
    "Github Dark",
    "Github Light",
    "Material",
    "Monokai",
    "Nord",
    "Solarized Dark",
    "Solarized Light",
    "Tokyo Night",
    "VS Code Dark",
];

pub const LANGUAGES: &[&str] = &[
    "C",
    "Cpp",
    "Csharp",
    "Css",
    "Go",
    "Html",
    "Java",
    "Javascript",
    "Json",
    "Kotlin",
    "Markdown",
    "Php",
    "Python",
    "Ruby",
    "Rust",
    "Sql",
    "Swift",
    "Typescript",
];

pub const APP_THEMES: &[&str] = &["LIGHT", "DARK"];

pub fn font_size_options() -> Vec<String> {
    FONT_SIZES.map(|size| size.to_string()).collect()
}
