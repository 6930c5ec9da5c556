use bevy::prelude::*;

// Font Sizes
pub const WIDGET_TEXT_FONT_SIZE: f32 = 16.0;

// Widget Visual Style Constants
pub const WIDGET_BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 1.0);
pub const WIDGET_BORDER_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 1.0);
pub const WIDGET_BORDER_RADIUS: f32 = 0.0;
pub const WIDGET_BORDER_WIDTH: f32 = 2.0;
pub const WIDGET_PADDING: f32 = 16.0;
pub const WIDGET_MARGIN: f32 = 24.0;
pub const WIDGET_ROW_GAP: f32 = 8.0;

// Window Configuration
pub const WINDOW_TITLE: &str = "Layerswap";
pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

// Button Colors
pub const NORMAL_BUTTON: Color = Color::srgb(0.1, 0.1, 0.1);
pub const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
pub const PRESSED_BUTTON: Color = Color::srgb(1.0, 0.4, 0.0);
pub const DISABLED_BUTTON: Color = Color::srgb(0.08, 0.08, 0.08);

// Button Outline Colors
pub const NORMAL_BUTTON_OUTLINE_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);
pub const HOVERED_BUTTON_OUTLINE_COLOR: Color = Color::srgb(0.75, 0.75, 0.75);
pub const PRESSED_BUTTON_OUTLINE_COLOR: Color = Color::srgb(1.0, 0.8, 0.3);
pub const DISABLED_BUTTON_OUTLINE_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);

// Background Color
pub const BACKGROUND_COLOR: Color = Color::srgb(0.05, 0.05, 0.05);

// UI Panel Colors
pub const TEXT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
pub const SECONDARY_TEXT_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);
pub const DISABLED_TEXT_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
pub const VALUE_TEXT_COLOR: Color = Color::srgb(0.0, 1.0, 0.5);

// Notification Colors
pub const NOTIFICATION_BACKGROUND_COLOR: Color = Color::srgba(0.2, 0.1, 0.05, 1.0);
pub const NOTIFICATION_BORDER_COLOR: Color = Color::srgb(1.0, 0.4, 0.0);

/// Creates a consistent styled container for UI widgets/panes
///
/// Returns a bundle of components that can be used to spawn a widget with
/// consistent styling across the application.
pub fn create_widget_style<T: Component + Default>(
    position: PositionType,
    position_props: UiRect,
    marker: T,
    name: &str,
) -> impl Bundle {
    (
        Node {
            position_type: position,
            left: position_props.left,
            right: position_props.right,
            top: position_props.top,
            bottom: position_props.bottom,
            padding: UiRect::all(Val::Px(WIDGET_PADDING)),
            margin: UiRect::all(Val::Px(0.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(WIDGET_ROW_GAP),
            border: UiRect::all(Val::Px(WIDGET_BORDER_WIDTH)),
            width: Val::Auto,
            height: Val::Auto,
            max_width: Val::Px(420.0),
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::FlexStart,
            ..default()
        },
        BackgroundColor(WIDGET_BACKGROUND_COLOR),
        BorderColor(WIDGET_BORDER_COLOR),
        BorderRadius::all(Val::Px(WIDGET_BORDER_RADIUS)),
        marker,
        Name::new(name.to_string()),
    )
}

/// Creates a text component with standard widget styling
pub fn create_widget_text(
    text: &str,
    font_size: f32,
    color: Color,
) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}
