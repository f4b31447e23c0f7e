use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::app::AppState;
use crate::config::{GLYPH_CELL, GLYPH_FOOD, GLYPH_FOOD_FADING, GridSize, THEME, Theme};
use crate::food::FoodKind;
use crate::grid::Position;
use crate::snapshot::{FoodView, SessionView, Snapshot};
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{render_game_over_menu, render_main_menu, render_pause_menu};

/// Terminal columns per grid cell.
const CELL_WIDTH: u16 = 2;

/// Golden food starts blinking below this share of its lifetime.
const BLINK_THRESHOLD: f32 = 0.3;

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>) {
    let theme = &THEME;
    let (board_area, hud_area) = layout(frame.area(), snapshot.grid);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    if let Some(session) = snapshot.session.filter(|_| snapshot.state != AppState::Menu) {
        if let Some(food) = session.food {
            render_food(frame, inner, snapshot.grid, food, session.tick_count, theme);
        }
        render_snake(frame, inner, snapshot.grid, &session, theme);
        render_hud(frame, hud_area, snapshot, &session, theme);
    }

    match snapshot.state {
        AppState::Menu => render_main_menu(frame, board_area, snapshot, theme),
        AppState::Paused => render_pause_menu(frame, board_area, theme),
        AppState::GameOver => {
            if let Some(session) = snapshot.session {
                render_game_over_menu(frame, board_area, &session, theme);
            }
        }
        AppState::Playing => {}
    }
}

/// Splits the terminal into a centered board and the HUD rows below it.
fn layout(area: Rect, grid: GridSize) -> (Rect, Rect) {
    let board_width = grid.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let board_height = grid.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(area);
    let [board, hud] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(HUD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column);

    (board, hud)
}

fn render_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    food: FoodView,
    tick_count: u64,
    theme: &Theme,
) {
    let Some((x, y)) = logical_to_terminal(inner, grid, food.position) else {
        return;
    };

    let (glyph, color) = match food.kind {
        FoodKind::Normal => (GLYPH_FOOD, theme.food),
        FoodKind::Golden => {
            let fading = food
                .remaining
                .is_some_and(|remaining| remaining < BLINK_THRESHOLD);
            if fading && tick_count % 2 == 0 {
                (GLYPH_FOOD_FADING, theme.golden_food)
            } else {
                (GLYPH_FOOD, theme.golden_food)
            }
        }
    };

    frame
        .buffer_mut()
        .set_string(x, y, glyph, Style::new().fg(color).bg(theme.play_bg));
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    session: &SessionView<'_>,
    theme: &Theme,
) {
    let buffer = frame.buffer_mut();
    for (index, segment) in session.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else if index % 2 == 0 {
            Style::new().fg(theme.snake_body)
        } else {
            Style::new().fg(theme.snake_body_alt)
        };
        buffer.set_string(x, y, GLYPH_CELL, style.bg(theme.play_bg));
    }
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    let x_cell = u16::try_from(position.x).ok()?;
    let y_cell = u16::try_from(position.y).ok()?;
    if x_cell >= grid.width || y_cell >= grid.height {
        return None;
    }

    let x = inner.x.saturating_add(x_cell.saturating_mul(CELL_WIDTH));
    let y = inner.y.saturating_add(y_cell);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
