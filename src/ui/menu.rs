use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::MenuItem;
use crate::config::Theme;
use crate::game::DeathReason;
use crate::snapshot::{SessionView, Snapshot};

/// Width every menu row is padded to so the highlight bar lines up.
const MENU_ROW_WIDTH: usize = 18;

/// Draws the main menu as a centered popup.
pub fn render_main_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let popup = centered_popup(area, 80, 80);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(MenuItem::ALL.len() as u16 + 4),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut lines: Vec<Line<'_>> = MenuItem::ALL
        .iter()
        .map(|item| {
            let text = pad_row(&menu_row_text(*item, snapshot));
            if *item == snapshot.menu_selection {
                Line::styled(
                    format!("> {text} <"),
                    Style::default()
                        .bg(theme.menu_highlight)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("  {text}  "))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Best ({} / wrap {}): {}",
        snapshot.difficulty, snapshot.wrap, snapshot.record
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" menu ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("↑/↓ select  ←/→ change  Enter accept  Esc quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            "PAUSED",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Esc] Menu"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &SessionView<'_>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            "GAME OVER",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(death_text(session.death_reason)),
        Line::from(format!("Score: {}", session.score)),
        Line::from(format!("Best: {}", session.best)),
        Line::from(if session.new_record { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[R] Play again"),
        Line::from("[Esc] Menu"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn death_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::WallCollision) => "You hit the wall!",
        Some(DeathReason::SelfCollision) => "You bit yourself!",
        None => "",
    }
}

fn menu_row_text(item: MenuItem, snapshot: &Snapshot<'_>) -> String {
    match item {
        MenuItem::Start => "Start".to_owned(),
        MenuItem::Mode => format!("Mode: {}", snapshot.difficulty),
        MenuItem::Wrap => format!("Wrap: {}", snapshot.wrap),
        MenuItem::Sound => format!("Sound: {}", if snapshot.sound { "on" } else { "off" }),
        MenuItem::Quit => "Quit".to_owned(),
    }
}

fn pad_row(text: &str) -> String {
    let width = UnicodeWidthStr::width(text);
    let padding = MENU_ROW_WIDTH.saturating_sub(width);
    let left = padding / 2;
    format!(
        "{}{}{}",
        " ".repeat(left),
        text,
        " ".repeat(padding - left)
    )
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::{MENU_ROW_WIDTH, pad_row};

    #[test]
    fn rows_are_padded_to_a_fixed_width() {
        for text in ["Start", "Mode: normal", "Sound: off"] {
            assert_eq!(UnicodeWidthStr::width(pad_row(text).as_str()), MENU_ROW_WIDTH);
        }
    }
}
