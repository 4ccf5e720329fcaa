use super::button::{Button, Point};
use super::screen::{Screen, ScreenContext, ScreenRequest};
use crate::input_system::InputEvent;
use crate::render::{Anchor, DrawCommand, TextSize};
use crate::text::TextMetrics;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::time::Duration;

const BUTTON_WIDTH: u32 = 400;
const BUTTON_HEIGHT: u32 = 50;
const START_Y: i32 = 250;
const SPACING: i32 = 70;

const TITLE_Y: i32 = 100;
const SUBTITLE_Y: i32 = 160;
const TITLE_COLOR: Color = Color::RGB(255, 215, 0);
const SUBTITLE_COLOR: Color = Color::RGB(200, 200, 200);

/// Main Menu: New Game, Load Game, Settings, Exit
pub struct MainMenu {
    buttons: Vec<(Button, ScreenRequest)>,
}

impl MainMenu {
    pub fn new(ctx: &ScreenContext) -> Self {
        let (width, _) = ctx.screen_size;
        let x = width as i32 / 2 - BUTTON_WIDTH as i32 / 2;

        // (label key, base color, hover color, request), top to bottom
        let entries = [
            ("new_game", Color::RGB(25, 25, 112), Color::RGB(70, 130, 180), ScreenRequest::NewGame),
            ("load_game", Color::RGB(70, 130, 180), Color::RGB(100, 170, 220), ScreenRequest::LoadGame),
            ("settings", Color::RGB(180, 180, 180), Color::RGB(220, 220, 220), ScreenRequest::OpenSettings),
            ("exit", Color::RGB(178, 34, 34), Color::RGB(220, 20, 60), ScreenRequest::Exit),
        ];

        let buttons = entries
            .into_iter()
            .enumerate()
            .map(|(i, (key, base, hover, request))| {
                let bounds = Rect::new(x, START_Y + i as i32 * SPACING, BUTTON_WIDTH, BUTTON_HEIGHT);
                (Button::new(bounds, ctx.text(key), base, hover), request)
            })
            .collect();

        MainMenu { buttons }
    }

    #[cfg(test)]
    pub(crate) fn button_bounds(&self) -> Vec<Rect> {
        self.buttons.iter().map(|(button, _)| button.bounds()).collect()
    }
}

impl Screen for MainMenu {
    fn handle_event(
        &mut self,
        event: &InputEvent,
        pointer: Point,
        ctx: &ScreenContext,
    ) -> Option<ScreenRequest> {
        // Fixed order; only the first hit fires
        self.buttons
            .iter_mut()
            .find_map(|(button, request)| button.try_click(pointer, event, ctx.audio).then(|| request.clone()))
    }

    fn update(&mut self, pointer: Point, _dt: Duration, _ctx: &ScreenContext) -> Option<ScreenRequest> {
        for (button, _) in &mut self.buttons {
            button.set_hover(pointer);
        }
        None
    }

    fn draw(&self, ctx: &ScreenContext, _metrics: &dyn TextMetrics, commands: &mut Vec<DrawCommand>) {
        let center_x = ctx.screen_size.0 as i32 / 2;

        commands.push(DrawCommand::Text {
            text: ctx.text("title").to_string(),
            x: center_x,
            y: TITLE_Y,
            color: TITLE_COLOR,
            size: TextSize::Title,
            anchor: Anchor::Center,
        });
        commands.push(DrawCommand::Text {
            text: ctx.text("main_menu").to_string(),
            x: center_x,
            y: SUBTITLE_Y,
            color: SUBTITLE_COLOR,
            size: TextSize::Normal,
            anchor: Anchor::Center,
        });

        for (button, _) in &self.buttons {
            button.draw(commands);
        }
    }
}
