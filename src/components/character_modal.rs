use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    centered_rect, BaseStyle, BorderStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::{
    spinner_frame, status_glyph, Component, BG_PANEL, MORTY_YELLOW, PORTAL_GREEN, SUMMER_ROSE,
    TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{Character, DetailView, Episode};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 22;

pub struct CharacterModalProps<'a> {
    pub detail: &'a DetailView,
    pub is_focused: bool,
    pub tick_count: u32,
}

/// Detail overlay for the character picked from the grid
pub struct CharacterModal {
    modal: Modal,
    last_area: Rect,
}

impl Default for CharacterModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
            last_area: Rect::default(),
        }
    }
}

impl CharacterModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the overlay sits inside `area`.
    pub fn area(area: Rect) -> Rect {
        centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area)
    }
}

fn modal_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(PORTAL_GREEN)),
            }),
            padding: Padding::xy(2, 1),
            bg: Some(BG_PANEL),
            fg: None,
        },
    }
}

fn modal_close() -> Action {
    Action::ModalClose
}

impl Component<Action> for CharacterModal {
    type Props<'a> = CharacterModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.detail.is_open() {
            return Vec::new();
        }

        // Backdrop clicks are judged against the last drawn frame.
        let mut noop_render = |_frame: &mut Frame, _area: Rect| {};
        let modal_props = ModalProps {
            is_open: true,
            is_focused: true,
            area: self.last_area,
            style: modal_style(),
            behavior: ModalBehavior {
                close_on_esc: true,
                close_on_backdrop: true,
            },
            on_close: modal_close,
            render_content: &mut noop_render,
        };
        let actions: Vec<_> = self
            .modal
            .handle_event(event, modal_props)
            .into_iter()
            .collect();
        if !actions.is_empty() {
            return actions;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc => vec![Action::ModalClose],
                KeyCode::Down | KeyCode::Char('j') => vec![Action::ModalScroll(1)],
                KeyCode::Up | KeyCode::Char('k') => vec![Action::ModalScroll(-1)],
                KeyCode::PageDown => vec![Action::ModalScroll(5)],
                KeyCode::PageUp => vec![Action::ModalScroll(-5)],
                _ => Vec::new(),
            },
            EventKind::Scroll { delta, .. } => vec![Action::ModalScroll(*delta as i16)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(character) = props.detail.character.as_ref() else {
            return;
        };
        if area.width < 20 || area.height < 8 {
            return;
        }

        self.last_area = Self::area(area);
        let detail = props.detail;
        let tick_count = props.tick_count;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let [info_area, episodes_area] =
                Layout::vertical([Constraint::Length(8), Constraint::Min(1)]).areas(content_area);

            frame.render_widget(
                Paragraph::new(info_lines(character)).wrap(Wrap { trim: false }),
                info_area,
            );
            frame.render_widget(
                Paragraph::new(episode_lines(&detail.episodes, tick_count))
                    .scroll((detail.scroll, 0)),
                episodes_area,
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: self.last_area,
                style: modal_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: true,
                },
                on_close: modal_close,
                render_content: &mut render_content,
            },
        );
    }
}

fn label_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(TEXT_DIM)),
        Span::styled(value, Style::default().fg(TEXT_MAIN)),
    ])
}

fn info_lines(character: &Character) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        character.name.clone(),
        Style::default()
            .fg(MORTY_YELLOW)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(glyph) = status_glyph(&character.status) {
        title.push(Span::raw(" "));
        title.push(Span::styled(glyph.symbol, Style::default().fg(glyph.color)));
    }

    let species = if character.kind.is_empty() {
        character.species.clone()
    } else {
        format!("{} ({})", character.species, character.kind)
    };

    vec![
        Line::from(title),
        Line::from(""),
        label_line("Status", character.status.as_str().to_string()),
        label_line("Species", species),
        label_line("Gender", character.gender.clone()),
        label_line("Origin", character.origin.name.clone()),
        label_line("Location", character.location.name.clone()),
        label_line("Image", character.image.clone()),
    ]
}

fn episode_lines(episodes: &DataResource<Vec<Episode>>, tick_count: u32) -> Vec<Line<'static>> {
    let header = Line::from(Span::styled(
        "Episodes",
        Style::default()
            .fg(PORTAL_GREEN)
            .add_modifier(Modifier::BOLD),
    ));

    let mut lines = vec![header];
    match episodes {
        DataResource::Loading | DataResource::Empty => lines.push(Line::from(Span::styled(
            format!("{} Loading episodes...", spinner_frame(tick_count)),
            Style::default().fg(TEXT_DIM),
        ))),
        DataResource::Failed(error) => lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(SUMMER_ROSE),
        ))),
        DataResource::Loaded(list) if list.is_empty() => lines.push(Line::from(Span::styled(
            "No episodes",
            Style::default().fg(TEXT_DIM),
        ))),
        DataResource::Loaded(list) => lines.extend(list.iter().map(|episode| {
            Line::from(vec![
                Span::styled(
                    format!("{:<8}", episode.code),
                    Style::default().fg(MORTY_YELLOW),
                ),
                Span::styled(episode.name.clone(), Style::default().fg(TEXT_MAIN)),
                Span::styled(
                    format!("  {}", episode.air_date),
                    Style::default().fg(TEXT_DIM),
                ),
            ])
        })),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterStatus, Place};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn rick() -> Character {
        Character {
            id: 1,
            name: "Rick Sanchez".into(),
            status: CharacterStatus::Alive,
            species: "Human".into(),
            kind: String::new(),
            gender: "Male".into(),
            image: "https://rickandmortyapi.com/api/character/avatar/1.jpeg".into(),
            origin: Place {
                name: "Earth (C-137)".into(),
                url: String::new(),
            },
            location: Place {
                name: "Citadel of Ricks".into(),
                url: String::new(),
            },
            episode: vec!["https://rickandmortyapi.com/api/episode/1".into()],
        }
    }

    fn open_detail() -> DetailView {
        let mut detail = DetailView::default();
        detail.show(rick());
        detail
    }

    fn events(modal: &mut CharacterModal, detail: &DetailView, event: EventKind) -> Vec<Action> {
        modal
            .handle_event(
                &event,
                CharacterModalProps {
                    detail,
                    is_focused: true,
                    tick_count: 0,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_close_keys() {
        let mut modal = CharacterModal::new();
        let detail = open_detail();

        let actions = events(&mut modal, &detail, EventKind::Key(key("q")));
        actions.assert_first(Action::ModalClose);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let actions = events(&mut modal, &detail, EventKind::Key(enter));
        actions.assert_first(Action::ModalClose);
    }

    #[test]
    fn test_scroll_keys() {
        let mut modal = CharacterModal::new();
        let detail = open_detail();

        events(&mut modal, &detail, EventKind::Key(key("j"))).assert_first(Action::ModalScroll(1));
        events(&mut modal, &detail, EventKind::Key(key("k"))).assert_first(Action::ModalScroll(-1));
    }

    #[test]
    fn test_closed_modal_ignores_events() {
        let mut modal = CharacterModal::new();
        let detail = DetailView::default();

        events(&mut modal, &detail, EventKind::Key(key("q"))).assert_empty();
    }

    #[test]
    fn test_render_details_and_episodes() {
        let mut render = RenderHarness::new(80, 30);
        let mut modal = CharacterModal::new();
        let mut detail = open_detail();
        detail.episodes = DataResource::Loaded(vec![Episode {
            code: "S01E01".into(),
            name: "Pilot".into(),
            air_date: "December 2, 2013".into(),
        }]);

        let output = render.render_to_string_plain(|frame| {
            modal.render(
                frame,
                frame.area(),
                CharacterModalProps {
                    detail: &detail,
                    is_focused: true,
                    tick_count: 0,
                },
            );
        });

        assert!(output.contains("Rick Sanchez"), "{output}");
        assert!(output.contains("Earth (C-137)"), "{output}");
        assert!(output.contains("Citadel of Ricks"), "{output}");
        assert!(output.contains("S01E01"), "{output}");
        assert!(output.contains("Pilot"), "{output}");
    }

    #[test]
    fn test_render_loading_episodes() {
        let mut render = RenderHarness::new(80, 30);
        let mut modal = CharacterModal::new();
        let detail = open_detail();

        let output = render.render_to_string_plain(|frame| {
            modal.render(
                frame,
                frame.area(),
                CharacterModalProps {
                    detail: &detail,
                    is_focused: true,
                    tick_count: 0,
                },
            );
        });

        assert!(output.contains("Loading episodes"), "{output}");
    }
}
