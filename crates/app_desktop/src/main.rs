use std::{fs, path::Path};

use config::{AppConfig, ConfigStore};
use core_types::PreferenceField;
use gpui::{
    App, Application, Bounds, Context, MouseButton, Rgba, SharedString, Window, WindowBounds,
    WindowOptions, div, prelude::*, px, rgb, size,
};
use local_storage::{FileBackend, SettingsStore};
use settings::panel::{ResetEmphasis, SettingsPanel, display_value, emphasis_for, font_stack_for};
use settings::SettingsProvider;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SELECT_FIELDS: [PreferenceField; 5] = [
    PreferenceField::FontFamily,
    PreferenceField::FontSize,
    PreferenceField::Theme,
    PreferenceField::Language,
    PreferenceField::AppTheme,
];

struct Palette {
    background: Rgba,
    text: Rgba,
    control: Rgba,
    muted: Rgba,
}

impl Palette {
    fn for_app_theme(app_theme: &str) -> Self {
        if app_theme == "DARK" {
            Self {
                background: rgb(0x121212),
                text: rgb(0xeeeeee),
                control: rgb(0x2d2d2d),
                muted: rgb(0x9a9a9a),
            }
        } else {
            Self {
                background: rgb(0xf8fafc),
                text: rgb(0x1e293b),
                control: rgb(0xe2e8f0),
                muted: rgb(0x64748b),
            }
        }
    }
}

struct SettingsView {
    provider: SettingsProvider,
    status: SharedString,
}

impl SettingsView {
    fn new(provider: SettingsProvider, status: impl Into<SharedString>) -> Self {
        Self {
            provider,
            status: status.into(),
        }
    }

    fn apply(&mut self, action: impl FnOnce(&mut SettingsPanel<'_>) -> settings::Result<()>) {
        match self.provider.context_mut() {
            Ok(context) => {
                let mut panel = SettingsPanel::new(context);
                if let Err(err) = action(&mut panel) {
                    self.status = format!("change rejected: {err}").into();
                }
            }
            Err(err) => {
                error!("settings panel used without settings: {err}");
                self.status = err.to_string().into();
            }
        }
    }
}

impl Render for SettingsView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let context = match self.provider.context() {
            Ok(context) => context,
            Err(err) => {
                return div()
                    .size_full()
                    .p_4()
                    .bg(rgb(0x121212))
                    .text_color(rgb(0xdc2626))
                    .child(err.to_string());
            }
        };
        let prefs = context.preferences().clone();
        let palette = Palette::for_app_theme(&prefs.app_theme);
        let reset_bg = match emphasis_for(&prefs) {
            ResetEmphasis::Danger => rgb(0xdc2626),
            ResetEmphasis::Neutral => palette.control,
        };

        let mut body = div()
            .bg(palette.background)
            .text_color(palette.text)
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .gap_2()
            .p_4()
            .child(div().text_xl().child("Settings"));

        for field in SELECT_FIELDS {
            let value = display_value(&prefs, field);
            body = body.child(
                div()
                    .w_full()
                    .flex()
                    .justify_between()
                    .bg(palette.control)
                    .rounded_md()
                    .px_4()
                    .py_2()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _event, _window, cx| {
                            this.apply(|panel| panel.cycle(field));
                            cx.notify();
                        }),
                    )
                    .child(field.title())
                    .child(value),
            );
        }

        let corner_label = if prefs.show_github_corner { "On" } else { "Off" };
        body.child(
            div()
                .w_full()
                .flex()
                .justify_between()
                .px_4()
                .py_2()
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _event, _window, cx| {
                        this.apply(|panel| panel.cycle(PreferenceField::ShowGitHubCorner));
                        cx.notify();
                    }),
                )
                .child(PreferenceField::ShowGitHubCorner.title())
                .child(corner_label),
        )
        .child(
            div()
                .mt_auto()
                .w_full()
                .bg(reset_bg)
                .rounded_md()
                .px_4()
                .py_2()
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _event, _window, cx| {
                        this.apply(|panel| {
                            panel.reset();
                            Ok(())
                        });
                        this.status = "Settings reset to defaults".into();
                        cx.notify();
                    }),
                )
                .child("Reset to default"),
        )
        .child(
            div()
                .text_sm()
                .text_color(palette.muted)
                .child(format!("Editor font: {}", font_stack_for(&prefs))),
        )
        .child(
            div()
                .text_sm()
                .text_color(palette.muted)
                .child(self.status.clone()),
        )
    }
}

fn main() {
    let data_dir = config::default_data_dir();
    if let Err(err) = fs::create_dir_all(&data_dir) {
        eprintln!("failed to prepare data dir: {err}");
    }

    let config_store = ConfigStore::from_dir(data_dir.join("config"));
    let (config, config_error) = match config_store.load_or_init() {
        Ok(cfg) => (cfg, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let _log_guard = init_local_logger(&data_dir.join("logs"), &config.log_filter);
    if let Some(err) = config_error {
        error!("failed to load config: {err:#}");
    }

    let storage_path = config.storage_path(&data_dir);
    info!(path = %storage_path.display(), "using local storage");
    let mut provider = SettingsProvider::new(SettingsStore::new(FileBackend::new(&storage_path)));
    provider.init();

    let status = format!("Stored in {}", storage_path.display());
    let window = config.window.clone();
    Application::new().run(move |cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(window.width), px(window.height)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Code Sync Settings".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            move |_, cx| cx.new(|_| SettingsView::new(provider, status)),
        )
        .expect("open settings window");
        cx.activate(true);
    });
}

fn init_local_logger(log_dir: &Path, filter: &str) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "code_sync.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    guard
}
