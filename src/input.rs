//! Touch input abstraction.
//!
//! [`collect_touch_input`] turns raw touches (and the left mouse button, so
//! the game is playable on desktop) into [`TouchSignal`] messages.  Game logic
//! only reads the messages; tests write them directly to simulate a tap
//! without a real input device.

use bevy::input::touch::Touches;
use bevy::prelude::*;

/// Start or end of a touch.  Position and velocity are not tracked.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchSignal {
    Began,
    Ended,
}

/// Forward this frame's touch and mouse presses as [`TouchSignal`]s.
pub fn collect_touch_input(
    touches: Res<Touches>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut signals: MessageWriter<TouchSignal>,
) {
    if touches.any_just_pressed() || mouse.just_pressed(MouseButton::Left) {
        signals.write(TouchSignal::Began);
    }
    if touches.any_just_released() || mouse.just_released(MouseButton::Left) {
        signals.write(TouchSignal::Ended);
    }
}
