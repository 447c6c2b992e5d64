use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerDragEvent, PointerMoveEvent,
};

/// Buttons that produce drag events, in priority order.
const DRAG_BUTTONS: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

/// Current input state for the window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an event to the current state and writes deltas to `frame`.
    ///
    /// A pointer move with a drag button held is followed in `frame.events`
    /// by a derived [`InputEvent::PointerDragged`].
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        let mut drag = None;

        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let (Some((px, py)), Some(button)) = (self.pointer_pos, self.drag_button()) {
                    drag = Some(PointerDragEvent {
                        button,
                        dx: x - px,
                        dy: y - py,
                    });
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::PointerDragged(_) => {}
        }

        frame.push_event(ev);
        if let Some(d) = drag {
            frame.push_event(InputEvent::PointerDragged(d));
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    fn drag_button(&self) -> Option<MouseButton> {
        DRAG_BUTTONS.into_iter().find(|b| self.button_down(*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn drags(frame: &InputFrame) -> Vec<PointerDragEvent> {
        frame
            .events
            .iter()
            .filter_map(|e| match e {
                InputEvent::PointerDragged(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn move_without_button_is_not_a_drag() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(1.0, 1.0));
        state.apply_event(&mut frame, moved(5.0, 3.0));
        assert!(drags(&frame).is_empty());
        assert_eq!(state.pointer_pos, Some((5.0, 3.0)));
    }

    #[test]
    fn held_button_turns_moves_into_drags() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            button(MouseButton::Right, MouseButtonState::Pressed, 10.0, 10.0),
        );
        state.apply_event(&mut frame, moved(14.0, 7.0));
        state.apply_event(
            &mut frame,
            button(MouseButton::Right, MouseButtonState::Released, 14.0, 7.0),
        );
        state.apply_event(&mut frame, moved(20.0, 20.0));

        assert_eq!(
            drags(&frame),
            vec![PointerDragEvent {
                button: MouseButton::Right,
                dx: 4.0,
                dy: -3.0
            }]
        );
        assert!(frame.buttons_pressed.contains(&MouseButton::Right));
        assert!(frame.buttons_released.contains(&MouseButton::Right));
    }

    #[test]
    fn left_button_wins_when_both_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            button(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0),
        );
        state.apply_event(
            &mut frame,
            button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0),
        );
        state.apply_event(&mut frame, moved(2.0, 0.0));
        assert_eq!(drags(&frame)[0].button, MouseButton::Left);
    }

    #[test]
    fn focus_loss_clears_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0),
        );
        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::Shift,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                code: 0,
                repeat: false,
            },
        );
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.button_down(MouseButton::Left));
        assert!(!state.key_down(Key::Shift));
        state.apply_event(&mut frame, moved(3.0, 3.0));
        assert!(drags(&frame).is_empty());
    }
}
