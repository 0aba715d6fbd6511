//! Tap-to-play menu — `GameState` definition, the menu prompt overlay, and the
//! tap handler.
//!
//! ## States
//!
//! | State          | Description                                    |
//! |----------------|------------------------------------------------|
//! | `MenuWaiting`  | Initial state; menu scene and prompt shown     |
//! | `Playing`      | Level presented; cans and ball in play         |
//!
//! There is no way back from `Playing`: nothing detects a cleared shelf, so the
//! session ends when the app does.
//!
//! ## Systems
//!
//! | System               | Schedule                    | Purpose                         |
//! |----------------------|-----------------------------|---------------------------------|
//! | `setup_menu_prompt`  | `OnEnter(MenuWaiting)`      | Spawn the "tap to play" overlay |
//! | `cleanup_menu_prompt`| `OnExit(MenuWaiting)`       | Despawn the overlay             |
//! | `tap_to_play_system` | `Update`                    | Start the level on touch-begin  |

use bevy::prelude::*;

use crate::input::TouchSignal;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Menu scene shown; waiting for the first tap.
    #[default]
    MenuWaiting,
    /// Level presented.
    Playing,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the menu prompt UI; entire tree is despawned on
/// `OnExit(MenuWaiting)`.
#[derive(Component)]
pub struct MenuPromptRoot;

// ── Colour helpers ────────────────────────────────────────────────────────────

fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn prompt_color() -> Color {
    Color::srgb(0.85, 0.85, 0.92)
}

// ── OnEnter(MenuWaiting): spawn UI ────────────────────────────────────────────

/// Spawn the menu prompt over the menu scene.
///
/// Layout:
/// ```text
/// ┌───────────────────────┐
/// │                       │
/// │       CAN BULLY       │
/// │                       │
/// │                       │
/// │      TAP TO PLAY      │
/// │                       │
/// └───────────────────────┘
/// ```
pub fn setup_menu_prompt(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceEvenly,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            MenuPromptRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("CAN BULLY"),
                TextFont {
                    font_size: 44.0,
                    ..default()
                },
                TextColor(title_color()),
            ));
            root.spawn((
                Text::new("TAP TO PLAY"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(prompt_color()),
            ));
        });
}

// ── OnExit(MenuWaiting): despawn UI ───────────────────────────────────────────

/// Recursively despawn the menu prompt.
pub fn cleanup_menu_prompt(mut commands: Commands, query: Query<Entity, With<MenuPromptRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update: tap handling ──────────────────────────────────────────────────────

/// Start the level on the first touch-begin while the menu is waiting.
///
/// Touch-end signals, and every signal received while playing, are drained
/// and ignored.
pub fn tap_to_play_system(
    mut signals: MessageReader<TouchSignal>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let began = signals
        .read()
        .filter(|signal| **signal == TouchSignal::Began)
        .count()
        > 0;

    if began && *state.get() == GameState::MenuWaiting {
        info!("Tap received; starting level");
        next_state.set(GameState::Playing);
    }
}
