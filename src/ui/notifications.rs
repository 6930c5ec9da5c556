//! User-visible error reporting
//!
//! The host surface for notifications is a fire-and-forget event. Failed
//! operations send one `Notify` each; a small toast in the lower right
//! shows it for a few seconds and the message is mirrored to the log.

use bevy::prelude::*;

use crate::ui::theme::*;

/// How long a toast stays on screen
const NOTIFICATION_SECONDS: f32 = 4.0;

/// A fire-and-forget user notification
#[derive(Event, Debug, Clone)]
pub struct Notify {
    pub title: String,
    pub message: String,
}

impl Notify {
    /// The standard failure notification for a refused operation
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self {
            title: "Operation failed".to_string(),
            message: message.into(),
        }
    }
}

/// Component marker for the toast container
#[derive(Component, Default)]
pub struct NotificationToast;

/// Component marker for the toast title text
#[derive(Component)]
pub struct NotificationTitleText;

/// Component marker for the toast message text
#[derive(Component)]
pub struct NotificationMessageText;

/// Countdown until the visible toast is dismissed
#[derive(Resource)]
struct NotificationTimer(Timer);

impl Default for NotificationTimer {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(NOTIFICATION_SECONDS, TimerMode::Once);
        // Nothing to dismiss until the first notification arrives.
        timer.pause();
        Self(timer)
    }
}

/// Plugin that adds the notification toast
pub struct NotificationPlugin;

impl Plugin for NotificationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Notify>()
            .init_resource::<NotificationTimer>()
            .add_systems(Startup, spawn_notification_toast)
            .add_systems(Update, (show_notifications, dismiss_notifications));
    }
}

/// Spawns the (initially hidden) toast in the lower right corner
fn spawn_notification_toast(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(WIDGET_MARGIN),
                bottom: Val::Px(WIDGET_MARGIN),
                padding: UiRect::all(Val::Px(WIDGET_PADDING)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                border: UiRect::all(Val::Px(WIDGET_BORDER_WIDTH)),
                max_width: Val::Px(360.0),
                ..default()
            },
            BackgroundColor(NOTIFICATION_BACKGROUND_COLOR),
            BorderColor(NOTIFICATION_BORDER_COLOR),
            Visibility::Hidden,
            NotificationToast,
            Name::new("NotificationToast"),
        ))
        .with_children(|parent| {
            parent.spawn((
                create_widget_text("", WIDGET_TEXT_FONT_SIZE, TEXT_COLOR),
                NotificationTitleText,
            ));
            parent.spawn((
                create_widget_text(
                    "",
                    WIDGET_TEXT_FONT_SIZE,
                    SECONDARY_TEXT_COLOR,
                ),
                NotificationMessageText,
            ));
        });
}

/// Shows incoming notifications and mirrors them to the log
fn show_notifications(
    mut events: EventReader<Notify>,
    mut timer: ResMut<NotificationTimer>,
    mut toast_query: Query<&mut Visibility, With<NotificationToast>>,
    mut title_query: Query<
        &mut Text,
        (With<NotificationTitleText>, Without<NotificationMessageText>),
    >,
    mut message_query: Query<
        &mut Text,
        (With<NotificationMessageText>, Without<NotificationTitleText>),
    >,
) {
    for event in events.read() {
        warn!("{}: {}", event.title, event.message);

        if let Ok(mut text) = title_query.single_mut() {
            *text = Text::new(event.title.clone());
        }
        if let Ok(mut text) = message_query.single_mut() {
            *text = Text::new(event.message.clone());
        }
        if let Ok(mut visibility) = toast_query.single_mut() {
            *visibility = Visibility::Visible;
        }

        timer.0.reset();
        timer.0.unpause();
    }
}

/// Hides the toast once its timer runs out
fn dismiss_notifications(
    time: Res<Time>,
    mut timer: ResMut<NotificationTimer>,
    mut toast_query: Query<&mut Visibility, With<NotificationToast>>,
) {
    if timer.0.tick(time.delta()).just_finished() {
        if let Ok(mut visibility) = toast_query.single_mut() {
            *visibility = Visibility::Hidden;
        }
    }
}
