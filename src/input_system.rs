use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// Keys the screens care about
///
/// Everything else collapses into `Other`, which still counts as "any key"
/// for skipping the splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// Platform-independent input events delivered to screens
///
/// The SDL event stream is translated into this small vocabulary so screens
/// (and their tests) never touch SDL event types.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Window close request
    Quit,

    KeyDown(Key),

    /// Committed text from the platform text-input system
    TextInput(String),

    PointerDown {
        button: PointerButton,
        x: i32,
        y: i32,
    },

    PointerMotion {
        x: i32,
        y: i32,
    },
}

impl InputEvent {
    /// Primary button press, the only thing that activates buttons
    pub fn is_primary_press(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            }
        )
    }

    /// Any key or pointer press
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_) | InputEvent::PointerDown { .. })
    }
}

/// InputSystem polls SDL2 events and produces InputEvents
///
/// Events SDL2 reports that the screens never look at (window, joystick,
/// key releases) are dropped here.
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }

    /// Drains all pending SDL2 events for this frame
    pub fn poll_events(&mut self, event_pump: &mut EventPump) -> Vec<InputEvent> {
        event_pump.poll_iter().filter_map(translate_event).collect()
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(key), ..
        } => Some(InputEvent::KeyDown(translate_key(key))),
        Event::TextInput { text, .. } => Some(InputEvent::TextInput(text)),
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        } => Some(InputEvent::PointerDown {
            button: translate_button(mouse_btn),
            x,
            y,
        }),
        Event::MouseMotion { x, y, .. } => Some(InputEvent::PointerMotion { x, y }),
        _ => None,
    }
}

fn translate_key(key: Keycode) -> Key {
    match key {
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}

fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_translation() {
        assert_eq!(translate_key(Keycode::Return), Key::Enter);
        assert_eq!(translate_key(Keycode::KpEnter), Key::Enter);
        assert_eq!(translate_key(Keycode::Backspace), Key::Backspace);
        assert_eq!(translate_key(Keycode::Escape), Key::Other);
        assert_eq!(translate_key(Keycode::A), Key::Other);
    }

    #[test]
    fn test_button_translation() {
        assert_eq!(translate_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(translate_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(translate_button(MouseButton::Middle), PointerButton::Other);
    }

    #[test]
    fn test_only_primary_press_activates() {
        let primary = InputEvent::PointerDown {
            button: PointerButton::Primary,
            x: 1,
            y: 1,
        };
        let secondary = InputEvent::PointerDown {
            button: PointerButton::Secondary,
            x: 1,
            y: 1,
        };

        assert!(primary.is_primary_press());
        assert!(!secondary.is_primary_press());
        assert!(!InputEvent::PointerMotion { x: 1, y: 1 }.is_primary_press());
    }

    #[test]
    fn test_press_covers_keys_and_pointer() {
        assert!(InputEvent::KeyDown(Key::Other).is_press());
        assert!(InputEvent::PointerDown {
            button: PointerButton::Other,
            x: 0,
            y: 0
        }
        .is_press());
        assert!(!InputEvent::TextInput("a".to_string()).is_press());
        assert!(!InputEvent::Quit.is_press());
    }
}
