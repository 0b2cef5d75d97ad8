//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// Width of one card cell in the grid, including its gap.
pub const CARD_WIDTH: u16 = 30;
/// Height of one card cell in the grid, including its gap.
pub const CARD_HEIGHT: u16 = 7;

/// Columns the card grid uses at a given terminal width.
pub fn grid_columns(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Sample actions =====
        Action::SampleStart => start_sampling(state),

        Action::SampleDidComplete(characters) => {
            state.roster = DataResource::Loaded(characters);
            state.selected = 0;
            DispatchResult::changed()
        }

        Action::SampleDidExhaust {
            collected,
            attempts,
        } => {
            state.roster = DataResource::Failed(format!(
                "Only {collected} of {} distinct characters found after {attempts} attempts",
                state.request.count
            ));
            DispatchResult::changed()
        }

        Action::SampleDidError(msg) => {
            state.roster = DataResource::Failed(format!("Could not load characters: {msg}"));
            DispatchResult::changed()
        }

        // ===== Selection actions =====
        Action::SelectionMove(delta) => move_selection(state, delta as isize),

        Action::SelectionRow(delta) => {
            let columns = grid_columns(state.terminal_size.0) as isize;
            move_selection(state, delta as isize * columns)
        }

        Action::SelectionSet(index) => {
            if index < state.characters().len() && index != state.selected {
                state.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Modal actions =====
        Action::ModalOpen => {
            let Some(character) = state.selected_character().cloned() else {
                return DispatchResult::unchanged();
            };
            let character_id = character.id;
            let references = character.episode.clone();
            if !state.detail.show(character) {
                return DispatchResult::unchanged();
            }
            if references.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with(Effect::LoadEpisodes {
                    character_id,
                    references,
                })
            }
        }

        Action::ModalClose => {
            if state.detail.hide() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ModalScroll(delta) => {
            if !state.detail.is_open() {
                return DispatchResult::unchanged();
            }
            let max = state
                .detail
                .episodes
                .data()
                .map(|episodes| episodes.len().saturating_sub(1) as i32)
                .unwrap_or(0);
            let next = (state.detail.scroll as i32 + delta as i32).clamp(0, max.max(0)) as u16;
            if next == state.detail.scroll {
                DispatchResult::unchanged()
            } else {
                state.detail.scroll = next;
                DispatchResult::changed()
            }
        }

        Action::EpisodesDidLoad {
            character_id,
            episodes,
        } => {
            // Results for a character that is no longer shown are dropped.
            if state.detail.shown_id() != Some(character_id) {
                return DispatchResult::unchanged();
            }
            state.detail.episodes = DataResource::Loaded(episodes);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiCycleStatus => {
            state.request.status = state.request.status.next();
            start_sampling(state)
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() || state.detail.episodes.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn start_sampling(state: &mut AppState) -> DispatchResult<Effect> {
    state.roster = DataResource::Loading;
    state.selected = 0;
    state.detail.hide();
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::Sample(state.request.clone()))
}

fn move_selection(state: &mut AppState, delta: isize) -> DispatchResult<Effect> {
    let len = state.characters().len();
    if len == 0 || delta == 0 {
        return DispatchResult::unchanged();
    }
    let next = (state.selected as isize + delta).clamp(0, len as isize - 1) as usize;
    if next == state.selected {
        return DispatchResult::unchanged();
    }
    state.selected = next;
    DispatchResult::changed()
}
