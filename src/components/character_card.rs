use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{Component, BG_PANEL, MORTY_YELLOW, PORTAL_GREEN, SUMMER_ROSE, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{Character, CharacterStatus};

/// Corner marker for a character's life state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusGlyph {
    pub symbol: &'static str,
    pub color: Color,
}

/// Alive, Dead and unknown each get a fixed glyph; any other status gets none.
pub fn status_glyph(status: &CharacterStatus) -> Option<StatusGlyph> {
    match status {
        CharacterStatus::Alive => Some(StatusGlyph {
            symbol: "☺",
            color: PORTAL_GREEN,
        }),
        CharacterStatus::Dead => Some(StatusGlyph {
            symbol: "☠",
            color: SUMMER_ROSE,
        }),
        CharacterStatus::Unknown => Some(StatusGlyph {
            symbol: "?",
            color: MORTY_YELLOW,
        }),
        CharacterStatus::Other(_) => None,
    }
}

pub struct CharacterCard;

pub struct CharacterCardProps<'a> {
    pub character: &'a Character,
    pub is_selected: bool,
}

impl Component<Action> for CharacterCard {
    type Props<'a> = CharacterCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 6 || area.height < 3 {
            return;
        }
        let character = props.character;

        let border = if props.is_selected {
            Style::default()
                .fg(PORTAL_GREEN)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MORTY_YELLOW)
        };
        let title = Span::styled(
            format!(" {} ", character.name),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if props.is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border)
            .title(title)
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} {}", character.gender, character.species),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("#{}", character.id),
                Style::default().fg(TEXT_DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

        if let Some(glyph) = status_glyph(&character.status) {
            if inner.height > 0 && inner.width > 1 {
                let corner = Rect::new(
                    inner.right().saturating_sub(2),
                    inner.bottom().saturating_sub(1),
                    1,
                    1,
                );
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        glyph.symbol,
                        Style::default().fg(glyph.color).add_modifier(Modifier::BOLD),
                    )),
                    corner,
                );
            }
        }
    }
}
