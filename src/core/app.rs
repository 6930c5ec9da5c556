//! Application initialization and configuration

use bevy::prelude::*;
use bevy::winit::WinitSettings;

use crate::core::cli::CliArgs;
use crate::core::prefs::{self, Preferences};
use crate::core::state::AppState;
use crate::panel::PreviewPanelPlugin;
use crate::ui::notifications::NotificationPlugin;
use crate::ui::panes::preview_pane::PreviewPanePlugin;
use crate::ui::theme::{
    BACKGROUND_COLOR, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH,
};

/// Creates a fully configured Bevy GUI application ready to run
pub fn create_app(cli_args: CliArgs) -> App {
    let mut app = App::new();
    configure_app_settings(&mut app, cli_args);
    add_all_plugins(&mut app);
    app
}

/// Sets up application resources and configuration
fn configure_app_settings(app: &mut App, cli_args: CliArgs) {
    let prefs_path = cli_args
        .prefs_file
        .clone()
        .or_else(prefs::default_path);
    let preferences = Preferences::load(prefs_path);
    let app_state = AppState::demo(&cli_args.text);

    app.insert_resource(app_state)
        .insert_resource(preferences)
        .insert_resource(cli_args)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(WinitSettings::desktop_app());
}

/// Adds all plugins to the application
fn add_all_plugins(app: &mut App) {
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: WINDOW_TITLE.to_string(),
                    resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                    ..default()
                }),
                ..default()
            })
            // Disable Bevy's default LogPlugin since we're using our own
            // custom logger
            .build()
            .disable::<bevy::log::LogPlugin>(),
    );

    app.add_plugins((
        PreviewPanelPlugin,
        PreviewPanePlugin,
        NotificationPlugin,
    ));
}
