//! Button Widget
//!
//! The one interactive widget every screen is built from: a labeled
//! rectangle with hover highlighting, optional toggle state and a click
//! sound. Buttons are cheap to construct and are rebuilt whenever a screen
//! changes state or language.

use crate::audio::AudioContext;
use crate::input_system::InputEvent;
use crate::render::{Anchor, DrawCommand, TextSize};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

/// Pointer position in screen coordinates
pub type Point = (i32, i32);

/// Fill alpha for all buttons
const FILL_ALPHA: u8 = 200;

/// How much the toggled state brightens the base color (per channel)
const TOGGLE_LIGHTEN: u8 = 30;

const LABEL_COLOR: Color = Color::RGB(255, 255, 255);
const DISABLED_FILL: Color = Color::RGBA(90, 90, 90, 140);
const DISABLED_LABEL: Color = Color::RGBA(170, 170, 170, 200);

#[derive(Debug, Clone)]
pub struct Button {
    bounds: Rect,
    label: String,
    base_color: Color,
    hover_color: Color,
    selected_color: Option<Color>,
    is_hovered: bool,
    is_toggled: bool,
    toggleable: bool,
}

impl Button {
    pub fn new(bounds: Rect, label: impl Into<String>, base_color: Color, hover_color: Color) -> Self {
        Button {
            bounds,
            label: label.into(),
            base_color,
            hover_color,
            selected_color: None,
            is_hovered: false,
            is_toggled: false,
            toggleable: false,
        }
    }

    /// Successful clicks flip the toggled state
    pub fn toggleable(mut self) -> Self {
        self.toggleable = true;
        self
    }

    /// Color shown while toggled (default: base color lightened)
    pub fn with_selected_color(mut self, color: Color) -> Self {
        self.selected_color = Some(color);
        self
    }

    pub fn with_toggled(mut self, toggled: bool) -> Self {
        self.is_toggled = toggled;
        self
    }

    /// Sets the toggled state directly (radio-style groups)
    pub fn set_toggled(&mut self, toggled: bool) {
        self.is_toggled = toggled;
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds.contains_point(point)
    }

    /// Recomputes hover from the pointer; called once per frame
    pub fn set_hover(&mut self, point: Point) {
        self.is_hovered = self.hit_test(point);
    }

    /// Handles a potential click
    ///
    /// Returns true iff `event` is a primary press and `point` is inside the
    /// button. A successful click plays the shared click sound and flips the
    /// toggle state of toggleable buttons.
    pub fn try_click(&mut self, point: Point, event: &InputEvent, audio: &AudioContext) -> bool {
        if !event.is_primary_press() || !self.hit_test(point) {
            return false;
        }

        audio.play_click();
        if self.toggleable {
            self.is_toggled = !self.is_toggled;
        }
        true
    }

    /// Fill color for the current state (hover > toggled > base)
    pub fn current_color(&self) -> Color {
        if self.is_hovered {
            self.hover_color
        } else if self.is_toggled {
            self.selected_color
                .unwrap_or_else(|| lighten(self.base_color, TOGGLE_LIGHTEN))
        } else {
            self.base_color
        }
    }

    pub fn draw(&self, commands: &mut Vec<DrawCommand>) {
        let fill = self.current_color();
        commands.push(DrawCommand::FillRect {
            rect: self.bounds,
            color: Color::RGBA(fill.r, fill.g, fill.b, FILL_ALPHA),
        });
        commands.push(DrawCommand::OutlineRect {
            rect: self.bounds,
            color: Color::RGBA(255, 255, 255, FILL_ALPHA),
        });
        self.draw_label(LABEL_COLOR, commands);
    }

    /// Greyed-out rendering for a button that cannot be used yet
    pub fn draw_disabled(&self, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::FillRect {
            rect: self.bounds,
            color: DISABLED_FILL,
        });
        commands.push(DrawCommand::OutlineRect {
            rect: self.bounds,
            color: DISABLED_LABEL,
        });
        self.draw_label(DISABLED_LABEL, commands);
    }

    fn draw_label(&self, color: Color, commands: &mut Vec<DrawCommand>) {
        let center = self.bounds.center();
        commands.push(DrawCommand::Text {
            text: self.label.clone(),
            x: center.x(),
            y: center.y(),
            color,
            size: TextSize::Normal,
            anchor: Anchor::Center,
        });
    }

    #[cfg(test)]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[cfg(test)]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[cfg(test)]
    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    #[cfg(test)]
    pub fn is_toggled(&self) -> bool {
        self.is_toggled
    }
}

/// Brightens each channel by `amount`, saturating at 255
pub fn lighten(color: Color, amount: u8) -> Color {
    Color::RGBA(
        color.r.saturating_add(amount),
        color.g.saturating_add(amount),
        color.b.saturating_add(amount),
        color.a,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::input_system::{Key, PointerButton};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the volume of every click played
    pub(crate) struct RecordingSound(pub Rc<RefCell<Vec<f32>>>);

    impl SoundEffect for RecordingSound {
        fn play(&self, volume: f32) -> Result<(), String> {
            self.0.borrow_mut().push(volume);
            Ok(())
        }
    }

    pub(crate) fn recording_audio(volume: f32) -> (AudioContext, Rc<RefCell<Vec<f32>>>) {
        let plays = Rc::new(RefCell::new(Vec::new()));
        let audio = AudioContext::new(Some(Box::new(RecordingSound(plays.clone()))), volume);
        (audio, plays)
    }

    pub(crate) fn click_at(x: i32, y: i32) -> InputEvent {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            x,
            y,
        }
    }

    fn button() -> Button {
        Button::new(
            Rect::new(100, 100, 200, 50),
            "Play",
            Color::RGB(25, 25, 112),
            Color::RGB(70, 130, 180),
        )
    }

    #[test]
    fn test_hit_test() {
        let button = button();
        assert!(button.hit_test((100, 100)));
        assert!(button.hit_test((299, 149)));
        assert!(!button.hit_test((300, 120)));
        assert!(!button.hit_test((150, 99)));
    }

    #[test]
    fn test_click_requires_primary_press_inside() {
        let (audio, plays) = recording_audio(0.7);
        let mut button = button();

        assert!(button.try_click((150, 120), &click_at(150, 120), &audio));
        assert!(!button.try_click((10, 10), &click_at(10, 10), &audio));

        let secondary = InputEvent::PointerDown {
            button: PointerButton::Secondary,
            x: 150,
            y: 120,
        };
        assert!(!button.try_click((150, 120), &secondary, &audio));
        assert!(!button.try_click((150, 120), &InputEvent::KeyDown(Key::Enter), &audio));
        assert!(!button.try_click((150, 120), &InputEvent::PointerMotion { x: 150, y: 120 }, &audio));

        assert_eq!(*plays.borrow(), vec![0.7]);
    }

    #[test]
    fn test_click_reads_live_volume() {
        let (mut audio, plays) = recording_audio(0.7);
        let mut button = button();

        button.try_click((150, 120), &click_at(150, 120), &audio);
        audio.set_sfx_volume(0.3);
        button.try_click((150, 120), &click_at(150, 120), &audio);

        assert_eq!(*plays.borrow(), vec![0.7, 0.3]);
    }

    #[test]
    fn test_toggle_flips_only_when_toggleable() {
        let audio = AudioContext::silent();
        let mut plain = button();
        let mut toggle = button().toggleable();

        plain.try_click((150, 120), &click_at(150, 120), &audio);
        toggle.try_click((150, 120), &click_at(150, 120), &audio);
        assert!(!plain.is_toggled());
        assert!(toggle.is_toggled());

        toggle.try_click((150, 120), &click_at(150, 120), &audio);
        assert!(!toggle.is_toggled());
    }

    #[test]
    fn test_color_priority() {
        let mut button = button().toggleable().with_toggled(true);
        assert_eq!(button.current_color(), Color::RGB(55, 55, 142));

        button.set_hover((150, 120));
        assert!(button.is_hovered());
        assert_eq!(button.current_color(), Color::RGB(70, 130, 180));

        button.set_hover((0, 0));
        let button = button.with_selected_color(Color::RGB(1, 2, 3));
        assert_eq!(button.current_color(), Color::RGB(1, 2, 3));

        let button = button.with_toggled(false);
        assert_eq!(button.current_color(), Color::RGB(25, 25, 112));
    }

    #[test]
    fn test_lighten_saturates() {
        assert_eq!(lighten(Color::RGB(250, 0, 128), 30), Color::RGB(255, 30, 158));
    }

    #[test]
    fn test_draw_emits_fill_outline_and_centered_label() {
        let mut commands = Vec::new();
        button().draw(&mut commands);

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            DrawCommand::FillRect { color, .. } if color.a == FILL_ALPHA
        ));
        assert!(matches!(
            &commands[2],
            DrawCommand::Text { text, x: 200, y: 125, anchor: Anchor::Center, .. } if text == "Play"
        ));
    }
}
