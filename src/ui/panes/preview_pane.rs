//! Preview Layer Pane
//!
//! The floating panel in the upper left: a glyph combo-input with a reset
//! button, a layer choice input with a reset button, a "Replace selected
//! text" toggle and the Revert/Change buttons. All real decisions live in
//! `crate::panel`; these systems only translate widget interactions into
//! selector calls and paint the results back.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::ui::{Display, Overflow};

use crate::core::prefs::{Preferences, PREF_USE_SELECTED};
use crate::core::state::{AppState, GlyphName};
use crate::panel::glyph_selector::{GlyphSelector, SelectionChange};
use crate::panel::layer_selector::LayerSelector;
use crate::panel::substitute::{apply_preview, revert_preview};
use crate::panel::{
    commit_glyph_change, commit_layer_change, PendingRevert,
    ReplaceSelectedOnly,
};
use crate::ui::notifications::Notify;
use crate::ui::theme::*;

// ============================================================================
// DESIGN CONSTANTS
// ============================================================================

/// Width of the two combo inputs
const COMBO_WIDTH: f32 = 180.0;

/// Height of one input row
const ROW_HEIGHT: f32 = 28.0;

/// Size of the square reset buttons
const RESET_SIZE: f32 = 28.0;

/// Width of the labels in front of the combo inputs
const LABEL_WIDTH: f32 = 110.0;

/// Width of the Revert/Change buttons
const ACTION_WIDTH: f32 = 96.0;

/// Size of the checkbox square
const CHECKBOX_SIZE: f32 = 20.0;

/// Gap between widgets in a row
const ROW_ITEM_GAP: f32 = 8.0;

// ============================================================================
// COMPONENTS & RESOURCES
// ============================================================================

/// Component marker for the pane
#[derive(Component, Default)]
pub struct PreviewPane;

/// Marker for every interactive widget that gets hover/press feedback
#[derive(Component)]
pub struct PanelButton;

/// The glyph combo-input button
#[derive(Component)]
pub struct GlyphComboButton;

/// The text shown inside the glyph combo-input
#[derive(Component)]
pub struct GlyphComboText;

/// The glyph list reset button
#[derive(Component)]
pub struct GlyphResetButton;

/// Container for the expanded glyph option list
#[derive(Component)]
pub struct GlyphOptionsContainer;

/// One entry of the expanded glyph option list
#[derive(Component)]
pub struct GlyphOptionButton {
    pub glyph: GlyphName,
}

/// The layer choice button
#[derive(Component)]
pub struct LayerComboButton;

/// The text shown inside the layer choice button
#[derive(Component)]
pub struct LayerComboText;

/// The layer list reset button
#[derive(Component)]
pub struct LayerResetButton;

/// Container for the expanded layer option list
#[derive(Component)]
pub struct LayerOptionsContainer;

/// One entry of the expanded layer option list. Carries the raw dropdown
/// index because layer selection is by index (names may collide).
#[derive(Component)]
pub struct LayerOptionButton {
    pub index: usize,
}

/// The "Replace selected text" checkbox
#[derive(Component)]
pub struct UseSelectedCheckbox;

/// The check mark inside the checkbox
#[derive(Component)]
pub struct CheckboxMark;

/// The Revert button
#[derive(Component)]
pub struct RevertButton;

/// The Revert button label
#[derive(Component)]
pub struct RevertButtonText;

/// The Change button
#[derive(Component)]
pub struct ChangeButton;

/// Raw text of the glyph combo-input. Kept separate from the selector so a
/// typed name that matches nothing stays visible while the selection is
/// none.
#[derive(Resource, Default)]
pub struct GlyphComboInput {
    pub text: String,
    /// Whether keystrokes currently go into the combo text
    pub editing: bool,
}

/// Which option lists are currently expanded
#[derive(Resource, Default)]
pub struct DropdownState {
    pub glyph_open: bool,
    pub layer_open: bool,
}

/// Plugin that adds the preview layer pane
pub struct PreviewPanePlugin;

impl Plugin for PreviewPanePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlyphComboInput>()
            .init_resource::<DropdownState>()
            .add_systems(Startup, spawn_preview_pane)
            .add_systems(PostStartup, init_combo_text)
            .add_systems(
                Update,
                (
                    handle_glyph_combo_click,
                    glyph_text_entry,
                    handle_glyph_option_buttons,
                    handle_glyph_reset,
                    handle_layer_combo_click,
                    handle_layer_option_buttons,
                    handle_layer_reset,
                    handle_use_selected_toggle,
                    handle_change_button,
                    handle_revert_button,
                ),
            )
            .add_systems(
                Update,
                (
                    rebuild_glyph_options,
                    rebuild_layer_options,
                    update_glyph_combo_text,
                    update_layer_combo_text,
                    update_checkbox_mark,
                    update_revert_button_state,
                    update_dropdown_visibility,
                    panel_button_feedback,
                ),
            );
    }
}

// ============================================================================
// SPAWNING
// ============================================================================

/// Spawns the pane in the upper left corner
fn spawn_preview_pane(mut commands: Commands) {
    let position_props = UiRect {
        left: Val::Px(WIDGET_MARGIN),
        top: Val::Px(WIDGET_MARGIN),
        right: Val::Auto,
        bottom: Val::Auto,
    };

    commands
        .spawn(create_widget_style(
            PositionType::Absolute,
            position_props,
            PreviewPane,
            "PreviewPane",
        ))
        .with_children(|parent| {
            // Glyph row
            parent
                .spawn((Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(ROW_ITEM_GAP),
                    ..default()
                },))
                .with_children(|row| {
                    row.spawn((
                        Node {
                            width: Val::Px(LABEL_WIDTH),
                            ..default()
                        },
                        create_widget_text(
                            "Set preview of",
                            WIDGET_TEXT_FONT_SIZE,
                            SECONDARY_TEXT_COLOR,
                        ),
                    ));

                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(COMBO_WIDTH),
                            height: Val::Px(ROW_HEIGHT),
                            padding: UiRect::horizontal(Val::Px(6.0)),
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(NORMAL_BUTTON),
                        BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                        GlyphComboButton,
                        PanelButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            create_widget_text(
                                "",
                                WIDGET_TEXT_FONT_SIZE,
                                VALUE_TEXT_COLOR,
                            ),
                            GlyphComboText,
                        ));
                    });

                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(RESET_SIZE),
                            height: Val::Px(RESET_SIZE),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(NORMAL_BUTTON),
                        BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                        GlyphResetButton,
                        PanelButton,
                    ))
                    .with_children(|button| {
                        button.spawn(create_widget_text(
                            "↺",
                            WIDGET_TEXT_FONT_SIZE,
                            TEXT_COLOR,
                        ));
                    });
                });

            // Glyph option list (collapsed by default)
            parent.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    margin: UiRect::left(Val::Px(LABEL_WIDTH + ROW_ITEM_GAP)),
                    width: Val::Px(COMBO_WIDTH),
                    max_height: Val::Px(200.0),
                    overflow: Overflow::scroll_y(),
                    display: Display::None,
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(WIDGET_BACKGROUND_COLOR),
                BorderColor(WIDGET_BORDER_COLOR),
                GlyphOptionsContainer,
                Name::new("GlyphOptions"),
            ));

            // Layer row
            parent
                .spawn((Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(ROW_ITEM_GAP),
                    ..default()
                },))
                .with_children(|row| {
                    row.spawn((
                        Node {
                            width: Val::Px(LABEL_WIDTH),
                            ..default()
                        },
                        create_widget_text(
                            "to the layer",
                            WIDGET_TEXT_FONT_SIZE,
                            SECONDARY_TEXT_COLOR,
                        ),
                    ));

                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(COMBO_WIDTH),
                            height: Val::Px(ROW_HEIGHT),
                            padding: UiRect::horizontal(Val::Px(6.0)),
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(NORMAL_BUTTON),
                        BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                        LayerComboButton,
                        PanelButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            create_widget_text(
                                "",
                                WIDGET_TEXT_FONT_SIZE,
                                VALUE_TEXT_COLOR,
                            ),
                            LayerComboText,
                        ));
                    });

                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(RESET_SIZE),
                            height: Val::Px(RESET_SIZE),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(NORMAL_BUTTON),
                        BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                        LayerResetButton,
                        PanelButton,
                    ))
                    .with_children(|button| {
                        button.spawn(create_widget_text(
                            "↺",
                            WIDGET_TEXT_FONT_SIZE,
                            TEXT_COLOR,
                        ));
                    });
                });

            // Layer option list (collapsed by default)
            parent.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    margin: UiRect::left(Val::Px(LABEL_WIDTH + ROW_ITEM_GAP)),
                    width: Val::Px(COMBO_WIDTH),
                    max_height: Val::Px(200.0),
                    overflow: Overflow::scroll_y(),
                    display: Display::None,
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(WIDGET_BACKGROUND_COLOR),
                BorderColor(WIDGET_BORDER_COLOR),
                LayerOptionsContainer,
                Name::new("LayerOptions"),
            ));

            // Checkbox row
            parent
                .spawn((Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(ROW_ITEM_GAP),
                    ..default()
                },))
                .with_children(|row| {
                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(CHECKBOX_SIZE),
                            height: Val::Px(CHECKBOX_SIZE),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(NORMAL_BUTTON),
                        BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                        UseSelectedCheckbox,
                        PanelButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            create_widget_text(
                                "",
                                WIDGET_TEXT_FONT_SIZE - 4.0,
                                VALUE_TEXT_COLOR,
                            ),
                            CheckboxMark,
                        ));
                    });

                    row.spawn(create_widget_text(
                        "Replace selected text",
                        WIDGET_TEXT_FONT_SIZE,
                        TEXT_COLOR,
                    ));
                });

            // Action row
            parent
                .spawn((Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(ROW_ITEM_GAP),
                    margin: UiRect::top(Val::Px(ROW_ITEM_GAP)),
                    ..default()
                },))
                .with_children(|row| {
                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(ACTION_WIDTH),
                            height: Val::Px(ROW_HEIGHT),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(DISABLED_BUTTON),
                        BorderColor(DISABLED_BUTTON_OUTLINE_COLOR),
                        RevertButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            create_widget_text(
                                "Revert",
                                WIDGET_TEXT_FONT_SIZE,
                                DISABLED_TEXT_COLOR,
                            ),
                            RevertButtonText,
                        ));
                    });

                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(ACTION_WIDTH),
                            height: Val::Px(ROW_HEIGHT),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(NORMAL_BUTTON),
                        BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                        ChangeButton,
                        PanelButton,
                    ))
                    .with_children(|button| {
                        button.spawn(create_widget_text(
                            "Change",
                            WIDGET_TEXT_FONT_SIZE,
                            TEXT_COLOR,
                        ));
                    });
                });
        });
}

/// Seeds the combo text from whatever the startup restore selected
fn init_combo_text(
    glyphs: Res<GlyphSelector>,
    mut combo: ResMut<GlyphComboInput>,
) {
    combo.text = glyphs
        .current()
        .map(|name| name.to_string())
        .unwrap_or_default();
}

// ============================================================================
// GLYPH INPUT
// ============================================================================

/// Expands/collapses the glyph option list and starts text entry
fn handle_glyph_combo_click(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<GlyphComboButton>),
    >,
    mut dropdowns: ResMut<DropdownState>,
    mut combo: ResMut<GlyphComboInput>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            dropdowns.glyph_open = !dropdowns.glyph_open;
            dropdowns.layer_open = false;
            combo.editing = dropdowns.glyph_open;
        }
    }
}

/// Routes keystrokes into the glyph combo while it is being edited.
///
/// Enter commits the raw text through the selector: a known name becomes the
/// selection, an unknown one clamps the selection to none while the text
/// stays visible as typed.
fn glyph_text_entry(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut combo: ResMut<GlyphComboInput>,
    mut glyphs: ResMut<GlyphSelector>,
    mut layers: ResMut<LayerSelector>,
    mut prefs: ResMut<Preferences>,
    mut dropdowns: ResMut<DropdownState>,
    app_state: Res<AppState>,
) {
    if !combo.editing {
        keyboard_events.clear();
        return;
    }

    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match &event.logical_key {
            Key::Enter => {
                let change = glyphs.select(combo.text.as_str());
                commit_glyph_change(
                    &change,
                    &app_state.font,
                    &mut layers,
                    &mut prefs,
                );
                if let SelectionChange::Applied { glyph: Some(name) } = &change
                {
                    combo.text = name.to_string();
                }
                combo.editing = false;
                dropdowns.glyph_open = false;
            }
            Key::Backspace => {
                combo.text.pop();
            }
            Key::Escape => {
                combo.editing = false;
                dropdowns.glyph_open = false;
            }
            Key::Space => {
                combo.text.push(' ');
            }
            Key::Character(input) => {
                for ch in input.chars() {
                    if !ch.is_control() {
                        combo.text.push(ch);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Applies a click on one glyph option
fn handle_glyph_option_buttons(
    interaction_query: Query<
        (&Interaction, &GlyphOptionButton),
        Changed<Interaction>,
    >,
    mut glyphs: ResMut<GlyphSelector>,
    mut layers: ResMut<LayerSelector>,
    mut prefs: ResMut<Preferences>,
    mut combo: ResMut<GlyphComboInput>,
    mut dropdowns: ResMut<DropdownState>,
    app_state: Res<AppState>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            let change = glyphs.select(button.glyph.as_str());
            commit_glyph_change(
                &change,
                &app_state.font,
                &mut layers,
                &mut prefs,
            );
            combo.text = glyphs
                .current()
                .map(|name| name.to_string())
                .unwrap_or_default();
            combo.editing = false;
            dropdowns.glyph_open = false;
        }
    }
}

/// Recomputes the glyph list from the live tab (the ↺ button)
fn handle_glyph_reset(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<GlyphResetButton>),
    >,
    mut glyphs: ResMut<GlyphSelector>,
    mut layers: ResMut<LayerSelector>,
    mut prefs: ResMut<Preferences>,
    mut combo: ResMut<GlyphComboInput>,
    use_selected: Res<ReplaceSelectedOnly>,
    app_state: Res<AppState>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            let change = glyphs.repopulate(
                &app_state.font,
                app_state.tab.as_ref(),
                use_selected.0,
            );
            commit_glyph_change(
                &change,
                &app_state.font,
                &mut layers,
                &mut prefs,
            );
            combo.text = glyphs
                .current()
                .map(|name| name.to_string())
                .unwrap_or_default();
        }
    }
}

/// Rebuilds the glyph option entries whenever the selector list changes
fn rebuild_glyph_options(
    mut commands: Commands,
    glyphs: Res<GlyphSelector>,
    container_query: Query<Entity, With<GlyphOptionsContainer>>,
    existing: Query<Entity, With<GlyphOptionButton>>,
) {
    if !glyphs.is_changed() {
        return;
    }
    let Ok(container) = container_query.single() else {
        return;
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    commands.entity(container).with_children(|parent| {
        for name in glyphs.items() {
            parent
                .spawn((
                    Button,
                    Node {
                        height: Val::Px(ROW_HEIGHT),
                        padding: UiRect::horizontal(Val::Px(6.0)),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(NORMAL_BUTTON),
                    BorderColor(NORMAL_BUTTON),
                    GlyphOptionButton {
                        glyph: name.clone(),
                    },
                    PanelButton,
                ))
                .with_children(|button| {
                    button.spawn(create_widget_text(
                        name.as_str(),
                        WIDGET_TEXT_FONT_SIZE,
                        TEXT_COLOR,
                    ));
                });
        }
    });
}

// ============================================================================
// LAYER INPUT
// ============================================================================

/// Expands/collapses the layer option list
fn handle_layer_combo_click(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<LayerComboButton>),
    >,
    mut dropdowns: ResMut<DropdownState>,
    mut combo: ResMut<GlyphComboInput>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            dropdowns.layer_open = !dropdowns.layer_open;
            dropdowns.glyph_open = false;
            combo.editing = false;
        }
    }
}

/// Applies a click on one layer option
fn handle_layer_option_buttons(
    interaction_query: Query<
        (&Interaction, &LayerOptionButton),
        Changed<Interaction>,
    >,
    mut layers: ResMut<LayerSelector>,
    mut prefs: ResMut<Preferences>,
    mut dropdowns: ResMut<DropdownState>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            let change = layers.select(Some(button.index));
            commit_layer_change(&change, &mut prefs);
            dropdowns.layer_open = false;
        }
    }
}

/// Recomputes the layer list from the selected glyph (the ↺ button)
fn handle_layer_reset(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<LayerResetButton>),
    >,
    glyphs: Res<GlyphSelector>,
    mut layers: ResMut<LayerSelector>,
    mut prefs: ResMut<Preferences>,
    app_state: Res<AppState>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            let resolved = glyphs
                .current()
                .and_then(|name| app_state.font.glyph(name));
            let change = layers.refresh(resolved);
            commit_layer_change(&change, &mut prefs);
        }
    }
}

/// Rebuilds the layer option entries whenever the selector list changes
fn rebuild_layer_options(
    mut commands: Commands,
    layers: Res<LayerSelector>,
    container_query: Query<Entity, With<LayerOptionsContainer>>,
    existing: Query<Entity, With<LayerOptionButton>>,
) {
    if !layers.is_changed() {
        return;
    }
    let Ok(container) = container_query.single() else {
        return;
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    commands.entity(container).with_children(|parent| {
        for (index, name) in layers.names().iter().enumerate() {
            parent
                .spawn((
                    Button,
                    Node {
                        height: Val::Px(ROW_HEIGHT),
                        padding: UiRect::horizontal(Val::Px(6.0)),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(NORMAL_BUTTON),
                    BorderColor(NORMAL_BUTTON),
                    LayerOptionButton { index },
                    PanelButton,
                ))
                .with_children(|button| {
                    button.spawn(create_widget_text(
                        name,
                        WIDGET_TEXT_FONT_SIZE,
                        TEXT_COLOR,
                    ));
                });
        }
    });
}

// ============================================================================
// TOGGLE & ACTIONS
// ============================================================================

/// Toggles "Replace selected text" and persists the flag
fn handle_use_selected_toggle(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<UseSelectedCheckbox>),
    >,
    mut use_selected: ResMut<ReplaceSelectedOnly>,
    mut prefs: ResMut<Preferences>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            use_selected.0 = !use_selected.0;
            prefs.set_bool(PREF_USE_SELECTED, use_selected.0);
        }
    }
}

/// Performs the preview change for the current glyph/layer choice
fn handle_change_button(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<ChangeButton>),
    >,
    mut app_state: ResMut<AppState>,
    mut glyphs: ResMut<GlyphSelector>,
    mut layers: ResMut<LayerSelector>,
    mut prefs: ResMut<Preferences>,
    mut combo: ResMut<GlyphComboInput>,
    use_selected: Res<ReplaceSelectedOnly>,
    mut pending: ResMut<PendingRevert>,
    mut notify: EventWriter<Notify>,
) {
    for interaction in interaction_query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let (Some(glyph), Some(layer)) =
            (glyphs.current().cloned(), layers.current().cloned())
        else {
            debug!("Change pressed without a glyph/layer choice");
            continue;
        };
        if app_state.tab.is_none() {
            continue;
        }

        // Refresh both dropdowns from the live host state before deciding
        // anything; the engine re-validates against that same state.
        let change = glyphs.repopulate(
            &app_state.font,
            app_state.tab.as_ref(),
            use_selected.0,
        );
        commit_glyph_change(&change, &app_state.font, &mut layers, &mut prefs);
        combo.text = glyphs
            .current()
            .map(|name| name.to_string())
            .unwrap_or_default();

        let AppState { font, tab } = &mut *app_state;
        let Some(tab) = tab.as_mut() else {
            continue;
        };

        match apply_preview(font, tab, &glyph, &layer, use_selected.0) {
            Ok(snapshot) => {
                info!(
                    "Set preview of \"{}\" to layer \"{}\" ({} positions)",
                    glyph,
                    layer,
                    snapshot.replaced_count()
                );
                pending.0 = Some(snapshot);
            }
            Err(err) => {
                notify.write(Notify::operation_failed(err.to_string()));
            }
        }
    }
}

/// Replays the recorded preview change
fn handle_revert_button(
    interaction_query: Query<
        &Interaction,
        (Changed<Interaction>, With<RevertButton>),
    >,
    mut app_state: ResMut<AppState>,
    mut pending: ResMut<PendingRevert>,
    mut notify: EventWriter<Notify>,
) {
    for interaction in interaction_query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if pending.0.is_none() {
            // Disabled until a change succeeds.
            continue;
        }

        let AppState { font, tab } = &mut *app_state;
        let Some(tab) = tab.as_mut() else {
            continue;
        };
        let Some(snapshot) = pending.0.take() else {
            continue;
        };

        match revert_preview(font, tab, snapshot) {
            Ok(()) => info!("Reverted the last preview change"),
            Err(err) => {
                notify.write(Notify::operation_failed(err.to_string()));
            }
        }
    }
}

// ============================================================================
// DISPLAY REFRESH
// ============================================================================

/// Paints the glyph combo text
fn update_glyph_combo_text(
    combo: Res<GlyphComboInput>,
    mut text_query: Query<&mut Text, With<GlyphComboText>>,
) {
    if !combo.is_changed() {
        return;
    }
    if let Ok(mut text) = text_query.single_mut() {
        let display = if combo.editing {
            format!("{}_", combo.text)
        } else {
            combo.text.clone()
        };
        *text = Text::new(display);
    }
}

/// Paints the layer combo text
fn update_layer_combo_text(
    layers: Res<LayerSelector>,
    mut text_query: Query<&mut Text, With<LayerComboText>>,
) {
    if !layers.is_changed() {
        return;
    }
    if let Ok(mut text) = text_query.single_mut() {
        *text = Text::new(layers.current_name().unwrap_or_default());
    }
}

/// Paints the checkbox mark
fn update_checkbox_mark(
    use_selected: Res<ReplaceSelectedOnly>,
    mut mark_query: Query<&mut Text, With<CheckboxMark>>,
) {
    if !use_selected.is_changed() {
        return;
    }
    if let Ok(mut text) = mark_query.single_mut() {
        *text = Text::new(if use_selected.0 { "✓" } else { "" });
    }
}

/// Greys the Revert button out while there is nothing to revert
fn update_revert_button_state(
    pending: Res<PendingRevert>,
    mut button_query: Query<
        (&mut BackgroundColor, &mut BorderColor),
        With<RevertButton>,
    >,
    mut label_query: Query<&mut TextColor, With<RevertButtonText>>,
) {
    if !pending.is_changed() {
        return;
    }
    let enabled = pending.0.is_some();
    if let Ok((mut background, mut border)) = button_query.single_mut() {
        *background = BackgroundColor(if enabled {
            NORMAL_BUTTON
        } else {
            DISABLED_BUTTON
        });
        *border = BorderColor(if enabled {
            NORMAL_BUTTON_OUTLINE_COLOR
        } else {
            DISABLED_BUTTON_OUTLINE_COLOR
        });
    }
    if let Ok(mut color) = label_query.single_mut() {
        *color = TextColor(if enabled {
            TEXT_COLOR
        } else {
            DISABLED_TEXT_COLOR
        });
    }
}

/// Shows/hides the option lists
fn update_dropdown_visibility(
    dropdowns: Res<DropdownState>,
    mut glyph_container: Query<
        &mut Node,
        (With<GlyphOptionsContainer>, Without<LayerOptionsContainer>),
    >,
    mut layer_container: Query<
        &mut Node,
        (With<LayerOptionsContainer>, Without<GlyphOptionsContainer>),
    >,
) {
    if !dropdowns.is_changed() {
        return;
    }
    if let Ok(mut node) = glyph_container.single_mut() {
        node.display = if dropdowns.glyph_open {
            Display::Flex
        } else {
            Display::None
        };
    }
    if let Ok(mut node) = layer_container.single_mut() {
        node.display = if dropdowns.layer_open {
            Display::Flex
        } else {
            Display::None
        };
    }
}

/// Hover/press feedback for the pane's interactive widgets
fn panel_button_feedback(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<PanelButton>),
    >,
) {
    for (interaction, mut background, mut border) in
        interaction_query.iter_mut()
    {
        match *interaction {
            Interaction::Pressed => {
                *background = BackgroundColor(PRESSED_BUTTON);
                *border = BorderColor(PRESSED_BUTTON_OUTLINE_COLOR);
            }
            Interaction::Hovered => {
                *background = BackgroundColor(HOVERED_BUTTON);
                *border = BorderColor(HOVERED_BUTTON_OUTLINE_COLOR);
            }
            Interaction::None => {
                *background = BackgroundColor(NORMAL_BUTTON);
                *border = BorderColor(NORMAL_BUTTON_OUTLINE_COLOR);
            }
        }
    }
}
