//! Character Creation Screen
//!
//! Two steps, each with its own widgets:
//!
//! 1. `EnteringName`: a text box plus Confirm. Enter or Confirm advances once
//!    the trimmed name is non-empty.
//! 2. `ChoosingPath`: one button per Path on the left, a detail panel for the
//!    viewed Path on the right, Select to finish. Back returns to step 1 and
//!    clears the selection.
//!
//! The name survives going back to step 1; the selection does not.

use super::button::{lighten, Button, Point};
use super::screen::{CharacterData, Screen, ScreenContext, ScreenRequest};
use crate::assets::{fit_size, AssetSource, ImageInfo};
use crate::data::{format_text, get_text, PathDef, PATHS};
use crate::input_system::{InputEvent, Key};
use crate::render::{Anchor, DrawCommand, TextSize};
use crate::text::{wrap_text, TextMetrics};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::collections::HashMap;
use std::time::Duration;

/// Maximum name length in characters
pub const MAX_NAME_LEN: usize = 20;

const GOLD: Color = Color::RGB(255, 215, 0);
const WHITE: Color = Color::RGB(255, 255, 255);
const LIGHT_GREY: Color = Color::RGB(200, 200, 200);
const PLACEHOLDER: Color = Color::RGB(150, 150, 150);
const INPUT_BACKGROUND: Color = Color::RGBA(50, 50, 50, 200);
const INPUT_BORDER: Color = Color::RGB(100, 100, 100);
const INFO_BACKGROUND: Color = Color::RGBA(30, 30, 30, 220);
const INFO_BORDER: Color = Color::RGB(100, 100, 100);
const SKILL_DESCRIPTION: Color = Color::RGB(180, 180, 180);

const CONFIRM_COLOR: Color = Color::RGB(50, 150, 50);
const CONFIRM_HOVER: Color = Color::RGB(100, 255, 100);
const BACK_COLOR: Color = Color::RGB(100, 100, 100);
const BACK_HOVER: Color = Color::RGB(200, 200, 200);

const PATH_BUTTON_HEIGHT: u32 = 50;
const PATH_START_Y: i32 = 100;
const PATH_SPACING: i32 = 65;
const INFO_PADDING: i32 = 20;

enum CreationState {
    EnteringName {
        input_box: Rect,
        confirm: Button,
        back: Button,
        input_active: bool,
    },
    ChoosingPath {
        path_buttons: Vec<(&'static PathDef, Button)>,
        select: Button,
        back: Button,
        info_area: Rect,
    },
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPhase {
    EnteringName,
    ChoosingPath,
}

/// What a click or key resolved to, applied after the state borrow ends
enum Outcome {
    Advance,
    Request(ScreenRequest),
    ReturnToName,
}

pub struct CharacterCreation {
    state: CreationState,
    player_name: String,
    selected_path: Option<&'static PathDef>,
    viewing_path: Option<&'static PathDef>,
    illustrations: HashMap<&'static str, ImageInfo>,
}

/// Appends typed text to `name`, one character at a time
///
/// Control characters are dropped, the name stops growing at
/// [`MAX_NAME_LEN`] and may not start with a space.
fn push_name_text(name: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_control() || name.chars().count() >= MAX_NAME_LEN {
            continue;
        }
        if c == ' ' && name.is_empty() {
            continue;
        }
        name.push(c);
    }
}

fn back_button(ctx: &ScreenContext) -> Button {
    let (_, height) = ctx.screen_size;
    Button::new(
        Rect::new(50, height as i32 - 80, 150, 50),
        ctx.text("back"),
        BACK_COLOR,
        BACK_HOVER,
    )
}

fn entering_name(ctx: &ScreenContext) -> CreationState {
    let (width, _) = ctx.screen_size;
    let center_x = width as i32 / 2;

    CreationState::EnteringName {
        input_box: Rect::new(center_x - 200, 250, 400, 50),
        confirm: Button::new(
            Rect::new(center_x - 75, 350, 150, 50),
            ctx.text("confirm"),
            CONFIRM_COLOR,
            CONFIRM_HOVER,
        ),
        back: back_button(ctx),
        input_active: true,
    }
}

fn choosing_path(ctx: &ScreenContext) -> CreationState {
    let (width, height) = ctx.screen_size;
    let left_panel = (width as f32 * 0.4) as i32;
    let button_width = (left_panel - 40).max(1) as u32;
    let start_x = (left_panel - button_width as i32) / 2;

    let path_buttons = PATHS
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let bounds = Rect::new(
                start_x,
                PATH_START_Y + i as i32 * PATH_SPACING,
                button_width,
                PATH_BUTTON_HEIGHT,
            );
            let color = path.color();
            let button = Button::new(bounds, ctx.text(path.name_key), color, lighten(color, 30))
                .with_selected_color(lighten(color, 50));
            (path, button)
        })
        .collect();

    let right_x = left_panel + 20;
    let info_width = (width as i32 - right_x - 20).max(1) as u32;

    CreationState::ChoosingPath {
        path_buttons,
        select: Button::new(
            Rect::new(start_x, height as i32 - 150, button_width, 50),
            ctx.text("select"),
            CONFIRM_COLOR,
            CONFIRM_HOVER,
        ),
        back: back_button(ctx),
        info_area: Rect::new(right_x, 100, info_width, height.saturating_sub(200).max(1)),
    }
}

impl CharacterCreation {
    /// Creates a fresh screen, preloading every Path illustration it can find
    pub fn new(ctx: &ScreenContext, assets: &mut dyn AssetSource) -> Self {
        let mut illustrations = HashMap::new();
        for path in PATHS {
            match assets.load_image(path.illustration) {
                Ok(image) => {
                    illustrations.insert(path.id, image);
                }
                Err(e) => tracing::warn!("No illustration for path '{}': {}", path.id, e),
            }
        }

        CharacterCreation {
            state: entering_name(ctx),
            player_name: String::new(),
            selected_path: None,
            viewing_path: None,
            illustrations,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> CreationPhase {
        match self.state {
            CreationState::EnteringName { .. } => CreationPhase::EnteringName,
            CreationState::ChoosingPath { .. } => CreationPhase::ChoosingPath,
        }
    }

    #[cfg(test)]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[cfg(test)]
    pub fn selected_path(&self) -> Option<&'static PathDef> {
        self.selected_path
    }

    #[cfg(test)]
    pub fn viewing_path(&self) -> Option<&'static PathDef> {
        self.viewing_path
    }

    fn has_name(&self) -> bool {
        !self.player_name.trim().is_empty()
    }

    fn handle_entering_name(&mut self, event: &InputEvent, pointer: Point, ctx: &ScreenContext) -> Option<Outcome> {
        let has_name = self.has_name();
        let CreationState::EnteringName {
            input_box,
            confirm,
            back,
            input_active,
        } = &mut self.state
        else {
            return None;
        };

        match event {
            InputEvent::KeyDown(Key::Enter) if *input_active => has_name.then_some(Outcome::Advance),
            InputEvent::KeyDown(Key::Backspace) if *input_active => {
                self.player_name.pop();
                None
            }
            InputEvent::TextInput(text) if *input_active => {
                push_name_text(&mut self.player_name, text);
                None
            }
            InputEvent::PointerDown { .. } if event.is_primary_press() => {
                *input_active = input_box.contains_point(pointer);

                if confirm.try_click(pointer, event, ctx.audio) {
                    has_name.then_some(Outcome::Advance)
                } else if back.try_click(pointer, event, ctx.audio) {
                    Some(Outcome::Request(ScreenRequest::BackToMainMenu))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn handle_choosing_path(&mut self, event: &InputEvent, pointer: Point, ctx: &ScreenContext) -> Option<Outcome> {
        let has_name = self.has_name();
        let CreationState::ChoosingPath {
            path_buttons,
            select,
            back,
            ..
        } = &mut self.state
        else {
            return None;
        };

        if back.try_click(pointer, event, ctx.audio) {
            return Some(Outcome::ReturnToName);
        }

        if let Some(path) = self.selected_path {
            if select.try_click(pointer, event, ctx.audio) {
                return has_name.then(|| {
                    Outcome::Request(ScreenRequest::CharacterCreated(CharacterData {
                        name: self.player_name.trim().to_string(),
                        path_id: path.id,
                    }))
                });
            }
        }

        let clicked = path_buttons
            .iter_mut()
            .position(|(_, button)| button.try_click(pointer, event, ctx.audio))?;

        for (i, (_, button)) in path_buttons.iter_mut().enumerate() {
            button.set_toggled(i == clicked);
        }

        let path = path_buttons[clicked].0;
        tracing::debug!("Path selected: {}", path.id);
        self.selected_path = Some(path);
        self.viewing_path = Some(path);
        None
    }

    fn draw_entering_name(&self, ctx: &ScreenContext, commands: &mut Vec<DrawCommand>) {
        let CreationState::EnteringName {
            input_box,
            confirm,
            back,
            input_active,
        } = &self.state
        else {
            return;
        };

        commands.push(DrawCommand::Text {
            text: ctx.text("enter_name_title").to_string(),
            x: ctx.screen_size.0 as i32 / 2,
            y: 100,
            color: GOLD,
            size: TextSize::Large,
            anchor: Anchor::Center,
        });

        commands.push(DrawCommand::FillRect {
            rect: *input_box,
            color: INPUT_BACKGROUND,
        });
        commands.push(DrawCommand::OutlineRect {
            rect: *input_box,
            color: if *input_active { GOLD } else { INPUT_BORDER },
        });

        let (text, color) = if self.player_name.is_empty() && !*input_active {
            (ctx.text("enter_name_placeholder").to_string(), PLACEHOLDER)
        } else {
            (self.player_name.clone(), WHITE)
        };
        commands.push(DrawCommand::Text {
            text,
            x: input_box.x() + 10,
            y: input_box.center().y(),
            color,
            size: TextSize::Normal,
            anchor: Anchor::MidLeft,
        });

        confirm.draw(commands);
        back.draw(commands);
    }

    fn draw_choosing_path(&self, ctx: &ScreenContext, metrics: &dyn TextMetrics, commands: &mut Vec<DrawCommand>) {
        let CreationState::ChoosingPath {
            path_buttons,
            select,
            back,
            info_area,
        } = &self.state
        else {
            return;
        };

        let locale = ctx.settings.language.as_str();
        commands.push(DrawCommand::Text {
            text: format_text(locale, "choose_path_title", &[("name", self.player_name.trim())]),
            x: ctx.screen_size.0 as i32 / 2,
            y: 50,
            color: GOLD,
            size: TextSize::Large,
            anchor: Anchor::Center,
        });

        for (_, button) in path_buttons {
            button.draw(commands);
        }

        if self.selected_path.is_some() {
            select.draw(commands);
        } else {
            select.draw_disabled(commands);
        }
        back.draw(commands);

        if let Some(path) = self.viewing_path {
            let illustration = self.illustrations.get(path.id);
            draw_path_details(path, *info_area, locale, illustration, metrics, commands);
        }
    }
}

fn push_text(commands: &mut Vec<DrawCommand>, text: String, x: i32, y: i32, color: Color, size: TextSize) {
    commands.push(DrawCommand::Text {
        text,
        x,
        y,
        color,
        size,
        anchor: Anchor::TopLeft,
    });
}

/// Detail panel for one Path
///
/// Name, illustration, epithet, description, then skills. Sections with
/// nothing to show are skipped.
fn draw_path_details(
    path: &PathDef,
    area: Rect,
    locale: &str,
    illustration: Option<&ImageInfo>,
    metrics: &dyn TextMetrics,
    commands: &mut Vec<DrawCommand>,
) {
    commands.push(DrawCommand::FillRect {
        rect: area,
        color: INFO_BACKGROUND,
    });
    commands.push(DrawCommand::OutlineRect {
        rect: area,
        color: INFO_BORDER,
    });

    let x = area.x() + INFO_PADDING;
    let width = (area.width() as i32 - 2 * INFO_PADDING).max(1) as u32;
    let small_line = metrics.line_height(TextSize::Small) as i32 + 5;
    let normal_line = metrics.line_height(TextSize::Normal) as i32 + 5;
    let mut y = area.y() + INFO_PADDING;

    let name = get_text(locale, path.name_key).to_string();
    push_text(commands, name, x, y, path.color(), TextSize::Large);
    y += metrics.line_height(TextSize::Large) as i32 + 10;

    if let Some(image) = illustration {
        let (w, h) = fit_size(image.width, image.height, width, area.height() / 3);
        if w > 0 && h > 0 {
            commands.push(DrawCommand::Image {
                key: image.key.clone(),
                src: None,
                dest: Rect::new(x + (width - w) as i32 / 2, y, w, h),
            });
            y += h as i32 + 15;
        }
    }

    for line in wrap_text(get_text(locale, path.title_key), width, TextSize::Normal, metrics) {
        push_text(commands, line, x, y, LIGHT_GREY, TextSize::Normal);
        y += normal_line;
    }
    y += 10;

    for line in wrap_text(get_text(locale, path.description_key), width, TextSize::Small, metrics) {
        push_text(commands, line, x, y, WHITE, TextSize::Small);
        y += small_line;
    }

    if path.skills.is_empty() {
        return;
    }

    y += 20;
    let header = format!("{}:", get_text(locale, "path_skills"));
    push_text(commands, header, x, y, LIGHT_GREY, TextSize::Normal);
    y += normal_line + 5;

    let skill_width = width.saturating_sub(25).max(1);
    for skill in path.skills {
        let name = format!("- {}", get_text(locale, skill.name_key));
        push_text(commands, name, x + 10, y, WHITE, TextSize::Small);
        y += small_line;
        for line in wrap_text(get_text(locale, skill.description_key), skill_width, TextSize::Small, metrics) {
            push_text(commands, line, x + 25, y, SKILL_DESCRIPTION, TextSize::Small);
            y += small_line;
        }
    }
}

impl Screen for CharacterCreation {
    fn handle_event(
        &mut self,
        event: &InputEvent,
        pointer: Point,
        ctx: &ScreenContext,
    ) -> Option<ScreenRequest> {
        let outcome = match self.state {
            CreationState::EnteringName { .. } => self.handle_entering_name(event, pointer, ctx),
            CreationState::ChoosingPath { .. } => self.handle_choosing_path(event, pointer, ctx),
        }?;

        match outcome {
            Outcome::Advance => {
                tracing::debug!("Name entered: {}", self.player_name.trim());
                self.state = choosing_path(ctx);
                None
            }
            Outcome::ReturnToName => {
                self.selected_path = None;
                self.viewing_path = None;
                self.state = entering_name(ctx);
                None
            }
            Outcome::Request(request) => Some(request),
        }
    }

    fn update(&mut self, pointer: Point, _dt: Duration, _ctx: &ScreenContext) -> Option<ScreenRequest> {
        match &mut self.state {
            CreationState::EnteringName { confirm, back, .. } => {
                confirm.set_hover(pointer);
                back.set_hover(pointer);
            }
            CreationState::ChoosingPath {
                path_buttons,
                select,
                back,
                ..
            } => {
                for (_, button) in path_buttons {
                    button.set_hover(pointer);
                }
                select.set_hover(pointer);
                back.set_hover(pointer);
            }
        }
        None
    }

    fn draw(&self, ctx: &ScreenContext, metrics: &dyn TextMetrics, commands: &mut Vec<DrawCommand>) {
        match self.state {
            CreationState::EnteringName { .. } => self.draw_entering_name(ctx, commands),
            CreationState::ChoosingPath { .. } => self.draw_choosing_path(ctx, metrics, commands),
        }
    }
}
