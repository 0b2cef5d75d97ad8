use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    spinner_frame, CharacterCard, CharacterCardProps, Component, BG_BASE, MORTY_YELLOW,
    PORTAL_GREEN, SUMMER_ROSE, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::reducer::{grid_columns, CARD_HEIGHT, CARD_WIDTH};
use crate::state::{AppState, Character};

/// Props for RosterView - read-only view of state
pub struct RosterViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Header, card grid and status bar.
///
/// Remembers where each card was drawn so clicks can be mapped back to cards.
#[derive(Default)]
pub struct RosterView {
    card_areas: Vec<(usize, Rect)>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.card_areas
            .iter()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(index, _)| *index)
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.card_areas.clear();
        let characters = state.characters();
        if characters.is_empty() || area.height == 0 {
            return;
        }

        let columns = grid_columns(area.width);
        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        let selected_row = state.selected / columns;
        let first_row = (selected_row + 1).saturating_sub(visible_rows);
        let grid_width = (columns as u16 * CARD_WIDTH).min(area.width);
        let left = area.x + (area.width - grid_width) / 2;

        let mut card = CharacterCard;
        for (index, character) in characters
            .iter()
            .enumerate()
            .skip(first_row * columns)
            .take(visible_rows * columns)
        {
            let row = (index / columns - first_row) as u16;
            let column = (index % columns) as u16;
            let cell = Rect::new(
                left + column * CARD_WIDTH,
                area.y + row * CARD_HEIGHT,
                CARD_WIDTH,
                CARD_HEIGHT,
            )
            .intersection(area);
            let card_area = Rect {
                width: cell.width.saturating_sub(2),
                height: cell.height.saturating_sub(1),
                ..cell
            };
            card.render(
                frame,
                card_area,
                CharacterCardProps {
                    character,
                    is_selected: index == state.selected,
                },
            );
            self.card_areas.push((index, card_area));
        }
    }
}

impl Component<Action> for RosterView {
    type Props<'a> = RosterViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => vec![Action::SampleStart],
                KeyCode::Char('s') => vec![Action::UiCycleStatus],
                KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
                KeyCode::Left | KeyCode::Char('h') => vec![Action::SelectionMove(-1)],
                KeyCode::Right | KeyCode::Char('l') => vec![Action::SelectionMove(1)],
                KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectionRow(-1)],
                KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectionRow(1)],
                KeyCode::Enter | KeyCode::Char(' ') => vec![Action::ModalOpen],
                _ => Vec::new(),
            },
            EventKind::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self
                    .card_at(mouse.column, mouse.row)
                    .map(|index| vec![Action::SelectionSet(index), Action::ModalOpen])
                    .unwrap_or_default(),
                _ => Vec::new(),
            },
            EventKind::Scroll { delta, .. } => vec![Action::SelectionRow(*delta as i16)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Cards
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_header(frame, chunks[0], state);

        match &state.roster {
            DataResource::Loaded(characters) if !characters.is_empty() => {
                self.render_grid(frame, chunks[1], state);
            }
            DataResource::Loaded(_) | DataResource::Empty => {
                self.card_areas.clear();
                render_message(
                    frame,
                    chunks[1],
                    vec![Line::from(vec![
                        Span::styled("Press ", Style::default().fg(TEXT_DIM)),
                        Span::styled("r", Style::default().fg(PORTAL_GREEN)),
                        Span::styled(" to sample characters", Style::default().fg(TEXT_DIM)),
                    ])],
                );
            }
            DataResource::Loading => {
                self.card_areas.clear();
                render_message(
                    frame,
                    chunks[1],
                    vec![Line::from(Span::styled(
                        format!(
                            "{} Sampling {} characters...",
                            spinner_frame(state.tick_count),
                            state.request.count
                        ),
                        Style::default().fg(PORTAL_GREEN),
                    ))],
                );
            }
            DataResource::Failed(error) => {
                self.card_areas.clear();
                render_message(
                    frame,
                    chunks[1],
                    vec![
                        Line::from(Span::styled(
                            "Error",
                            Style::default()
                                .fg(SUMMER_ROSE)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(error.clone(), Style::default().fg(TEXT_MAIN))),
                        Line::from(""),
                        Line::from(Span::styled(
                            "Press r to retry",
                            Style::default().fg(TEXT_DIM),
                        )),
                    ],
                );
            }
        }

        let summary = status_summary(state);
        let summary_items = [StatusBarItem::span(Span::styled(
            summary.as_str(),
            Style::default().fg(MORTY_YELLOW),
        ))];
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("←↑↓→", "move"),
                    StatusBarHint::new("enter", "details"),
                    StatusBarHint::new("r", "resample"),
                    StatusBarHint::new("s", "status"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::items(&summary_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            "RICK AND MORTY",
            Style::default()
                .fg(PORTAL_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  status: ", Style::default().fg(TEXT_DIM)),
        Span::styled(
            state.request.status.label(),
            Style::default().fg(MORTY_YELLOW),
        ),
        Span::styled("  ·  count: ", Style::default().fg(TEXT_DIM)),
        Span::styled(
            state.request.count.to_string(),
            Style::default().fg(MORTY_YELLOW),
        ),
    ];
    if state.is_loading() {
        spans.push(Span::styled(
            format!("  {}", spinner_frame(state.tick_count)),
            Style::default().fg(PORTAL_GREEN),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
}

fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

fn status_summary(state: &AppState) -> String {
    match &state.roster {
        DataResource::Loaded(characters) => selected_summary(state, characters),
        DataResource::Loading => "sampling...".to_string(),
        DataResource::Failed(error) => error.clone(),
        DataResource::Empty => String::new(),
    }
}

fn selected_summary(state: &AppState, characters: &[Character]) -> String {
    match state.selected_character() {
        Some(character) => format!(
            "{}/{} {}",
            state.selected + 1,
            characters.len(),
            character.name
        ),
        None => format!("{} characters", characters.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_handle_event_resample() {
        let mut component = RosterView::new();
        let state = AppState::default();
        let props = RosterViewProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SampleStart);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = RosterView::new();
        let state = AppState::default();
        let props = RosterViewProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_empty_prompts_for_sample() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = RosterView::new();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = RosterViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("to sample characters"), "{output}");
        assert!(output.contains("RICK AND MORTY"), "{output}");
    }
}
