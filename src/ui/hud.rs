use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::snapshot::{SessionView, Snapshot};

/// Rows reserved below the board.
pub const HUD_HEIGHT: u16 = 2;

/// Renders the score row and the mode row under the board.
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    session: &SessionView<'_>,
    theme: &Theme,
) {
    let [score_row, mode_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let [score_left, score_right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(score_row);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            label("Score ", theme),
            value(session.score.to_string(), theme),
            label("  Len ", theme),
            value(session.length.to_string(), theme),
            label("  Tier ", theme),
            value(session.speed_tier.to_string(), theme),
        ]))
        .alignment(Alignment::Left),
        score_left,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            label("Best ", theme),
            value(session.best.to_string(), theme),
        ]))
        .alignment(Alignment::Right),
        score_right,
    );

    frame.render_widget(
        Paragraph::new(Line::from(mode_line(snapshot)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_muted)),
        mode_row,
    );
}

fn mode_line(snapshot: &Snapshot<'_>) -> String {
    format!(
        "{} | wrap {} | sound {} | P pause  R restart  M sound  Esc menu",
        snapshot.difficulty.as_str().to_uppercase(),
        snapshot.wrap,
        if snapshot.sound { "on" } else { "off" },
    )
}

fn label(text: &'static str, theme: &Theme) -> Span<'static> {
    Span::styled(text, Style::default().fg(theme.hud_muted))
}

fn value(text: String, theme: &Theme) -> Span<'static> {
    Span::styled(
        text,
        Style::default()
            .fg(theme.hud_text)
            .add_modifier(Modifier::BOLD),
    )
}
