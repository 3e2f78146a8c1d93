use crate::core::display::{DisplayBackend, DisplayError, FONT_HEIGHT};
use crate::fractals::{gradient::Gradient, quadratic_map::FractalKind};

const TITLE: &str = "Fractal Generator";
const TITLE_Y: u32 = 10;
const BOX_PADDING: u32 = 10;
const FIRST_SELECT_BLOCK_Y: u32 = 80;
const SELECT_BLOCK_SPACING: u32 = 5 * FONT_HEIGHT;
const FOOTER_MESSAGES: [&str; 3] = ["Clear to exit", "<> to navigate", "Enter to start"];

const TEXT_COLOR: u8 = 222;
const VALUE_COLOR: u8 = 230;
const FOCUSED_TEXT_COLOR: u8 = 255;
const HEADER_LINE_COLOR: u8 = 24;

/// Wraps `value + direction` around `[0, max_value]`.
pub fn cyclic_shift(value: usize, direction: i32, max_value: usize) -> usize {
    if value == 0 && direction < 0 {
        max_value
    } else if value >= max_value && direction > 0 {
        0
    } else if direction < 0 {
        value - 1
    } else if direction > 0 {
        value + 1
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuField {
    #[default]
    FractalKind,
    Gradient,
}

impl MenuField {
    pub const ALL: [MenuField; 2] = [MenuField::FractalKind, MenuField::Gradient];

    pub fn description(&self) -> &'static str {
        match self {
            MenuField::FractalKind => "Select type",
            MenuField::Gradient => "Select gradient",
        }
    }
}

/// The choices the user confirmed; everything needed to start a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSelection {
    pub fractal_kind: FractalKind,
    pub gradient: Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Redraw,
    Start(RenderSelection),
    Exit,
}

/**
 * State of the selection menu. The menu owns nothing else; the caller feeds it
 * inputs, redraws it when asked to and starts a render on `Start`.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    fractal_index: usize,
    gradient_index: usize,
    focus: MenuField,
}

impl MenuState {
    pub fn new(fractal_kind: FractalKind, gradient: Gradient) -> MenuState {
        MenuState {
            fractal_index: FractalKind::ALL
                .iter()
                .position(|kind| *kind == fractal_kind)
                .unwrap_or(0),
            gradient_index: Gradient::MENU
                .iter()
                .position(|g| *g == gradient)
                .unwrap_or(0),
            focus: MenuField::default(),
        }
    }

    pub fn fractal_kind(&self) -> FractalKind {
        FractalKind::ALL[self.fractal_index]
    }

    pub fn gradient(&self) -> Gradient {
        Gradient::MENU[self.gradient_index]
    }

    pub fn focus(&self) -> MenuField {
        self.focus
    }

    pub fn selection(&self) -> RenderSelection {
        RenderSelection {
            fractal_kind: self.fractal_kind(),
            gradient: self.gradient(),
        }
    }

    pub fn value_name(&self, field: MenuField) -> &'static str {
        match field {
            MenuField::FractalKind => self.fractal_kind().display_name(),
            MenuField::Gradient => self.gradient().display_name(),
        }
    }

    pub fn handle_input(&mut self, input: MenuInput) -> MenuAction {
        match input {
            MenuInput::Left => self.shift_focused(-1),
            MenuInput::Right => self.shift_focused(1),
            MenuInput::Up | MenuInput::Down => {
                let direction = if input == MenuInput::Up { -1 } else { 1 };
                let index = MenuField::ALL
                    .iter()
                    .position(|field| *field == self.focus)
                    .unwrap_or(0);
                self.focus = MenuField::ALL[cyclic_shift(index, direction, MenuField::ALL.len() - 1)];
                MenuAction::Redraw
            }
            MenuInput::Confirm => MenuAction::Start(self.selection()),
            MenuInput::Exit => MenuAction::Exit,
        }
    }

    fn shift_focused(&mut self, direction: i32) -> MenuAction {
        match self.focus {
            MenuField::FractalKind => {
                self.fractal_index =
                    cyclic_shift(self.fractal_index, direction, FractalKind::ALL.len() - 1);
            }
            MenuField::Gradient => {
                self.gradient_index =
                    cyclic_shift(self.gradient_index, direction, Gradient::MENU.len() - 1);
            }
        }
        MenuAction::Redraw
    }

    /// One-line summary, used where the text cannot be drawn (window titles, logs).
    pub fn summary(&self) -> String {
        MenuField::ALL
            .iter()
            .map(|field| {
                let marker = if *field == self.focus { ">" } else { " " };
                format!("{}{}: {}", marker, field.description(), self.value_name(*field))
            })
            .collect::<Vec<_>>()
            .join("  |  ")
    }

    pub fn draw<D: DisplayBackend>(&self, display: &mut D) -> Result<(), DisplayError> {
        display.clear_screen()?;
        let resolution = display.resolution();
        let (width, height) = (resolution[0], resolution[1]);
        let centered = |display: &D, text: &str| width.saturating_sub(display.string_width(text)) / 2;

        // Header
        let header_line_y = TITLE_Y + BOX_PADDING + FONT_HEIGHT;
        for x in 0..width {
            display.set_pixel(x, header_line_y.min(height - 1), HEADER_LINE_COLOR)?;
        }
        let x = centered(&*display, TITLE);
        display.draw_text(TITLE, x, TITLE_Y, TEXT_COLOR)?;

        // Select blocks
        for (index, field) in MenuField::ALL.iter().enumerate() {
            let y_top = FIRST_SELECT_BLOCK_Y + (index as u32) * SELECT_BLOCK_SPACING;
            let description = format!("< {} >", field.description());
            let color = if *field == self.focus {
                FOCUSED_TEXT_COLOR
            } else {
                TEXT_COLOR
            };
            let x = centered(&*display, &description);
            display.draw_text(&description, x, y_top, color)?;

            let value = self.value_name(*field);
            let x = centered(&*display, value);
            display.draw_text(value, x, y_top + 2 * FONT_HEIGHT, VALUE_COLOR)?;
        }

        // Footer
        let footer_y = height.saturating_sub(FONT_HEIGHT);
        display.draw_text(FOOTER_MESSAGES[0], 0, footer_y, TEXT_COLOR)?;
        let x = centered(&*display, FOOTER_MESSAGES[1]);
        display.draw_text(FOOTER_MESSAGES[1], x, footer_y, TEXT_COLOR)?;
        let x = width.saturating_sub(display.string_width(FOOTER_MESSAGES[2]));
        display.draw_text(FOOTER_MESSAGES[2], x, footer_y, TEXT_COLOR)?;
        Ok(())
    }
}
