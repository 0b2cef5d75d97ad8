//! Store + component flows with EffectStoreTestHarness

use rickmorty::{
    action::Action,
    components::{Component, RosterView, RosterViewProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Character, CharacterStatus, Episode, Place, StatusFilter},
};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};

fn character(id: u32, status: CharacterStatus) -> Character {
    Character {
        id,
        name: format!("Character {id}"),
        status,
        species: "Alien".into(),
        kind: String::new(),
        gender: "Female".into(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        origin: Place {
            name: "Gazorpazorp".into(),
            url: String::new(),
        },
        location: Place {
            name: "Earth (Replacement Dimension)".into(),
            url: String::new(),
        },
        episode: vec![
            "https://rickandmortyapi.com/api/episode/1".into(),
            "https://rickandmortyapi.com/api/episode/2".into(),
        ],
    }
}

fn roster(count: u32) -> Vec<Character> {
    (1..=count)
        .map(|id| character(id, CharacterStatus::Alive))
        .collect()
}

fn state_with_roster(count: u32) -> AppState {
    AppState {
        roster: DataResource::Loaded(roster(count)),
        ..Default::default()
    }
}

fn pilot() -> Vec<Episode> {
    vec![
        Episode {
            code: "S01E01".into(),
            name: "Pilot".into(),
            air_date: "December 2, 2013".into(),
        },
        Episode {
            code: "S01E02".into(),
            name: "Lawnmower Dog".into(),
            air_date: "December 9, 2013".into(),
        },
    ]
}

// ============================================================================
// Sampling flow
// ============================================================================

#[test]
fn test_sample_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SampleStart);
    harness.assert_state(|s| s.roster.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::Sample(request) if request.count == 12));

    harness.complete_action(Action::SampleDidComplete(roster(12)));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1);
    assert_eq!(changed, 1);
    harness.assert_state(|s| s.characters().len() == 12);
}

#[test]
fn test_sample_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SampleStart);
    harness.complete_action(Action::SampleDidError("request failed".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.roster.is_failed());
    harness.assert_state(|s| {
        s.roster
            .error()
            .is_some_and(|error| error.contains("request failed"))
    });
}

#[test]
fn test_resample_replaces_roster() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(3), reducer);

    harness.dispatch_collect(Action::SelectionMove(2));
    harness.dispatch_collect(Action::SampleStart);
    harness.assert_state(|s| s.roster.is_loading() && s.selected == 0);

    let second = vec![
        character(40, CharacterStatus::Dead),
        character(41, CharacterStatus::Unknown),
        character(42, CharacterStatus::Alive),
    ];
    harness.complete_action(Action::SampleDidComplete(second));
    harness.process_emitted();

    harness.assert_state(|s| s.characters().iter().map(|c| c.id).eq([40, 41, 42]));
}

#[test]
fn test_status_cycle_requests_filtered_sample() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(2), reducer);

    harness.dispatch_collect(Action::UiCycleStatus);
    harness.dispatch_collect(Action::UiCycleStatus);

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_all_match(|e| matches!(e, Effect::Sample(_)));
    harness.assert_state(|s| s.request.status == StatusFilter::Dead);
}

// ============================================================================
// Detail modal flow
// ============================================================================

#[test]
fn test_open_modal_and_load_episodes() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(4), reducer);

    harness.dispatch_collect(Action::SelectionSet(2));
    harness.dispatch_collect(Action::ModalOpen);
    harness.assert_state(|s| s.detail.shown_id() == Some(3));
    harness.assert_state(|s| s.detail.episodes.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadEpisodes { character_id: 3, references } if references.len() == 2)
    });

    harness.complete_action(Action::EpisodesDidLoad {
        character_id: 3,
        episodes: pilot(),
    });
    harness.process_emitted();

    harness.assert_state(|s| {
        s.detail
            .episodes
            .data()
            .is_some_and(|episodes| episodes[0].code == "S01E01")
    });
}

#[test]
fn test_close_then_open_other_character() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(3), reducer);

    harness.dispatch_collect(Action::ModalOpen);
    harness.dispatch_collect(Action::ModalClose);
    harness.dispatch_collect(Action::SelectionMove(1));
    harness.dispatch_collect(Action::ModalOpen);

    // A late answer for the first character must not land on the second.
    harness.complete_action(Action::EpisodesDidLoad {
        character_id: 1,
        episodes: pilot(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!((changed, total), (0, 1));
    harness.assert_state(|s| s.detail.shown_id() == Some(2));
    harness.assert_state(|s| s.detail.episodes.is_loading());
}

// ============================================================================
// Component + Store Integration
// ============================================================================

#[test]
fn test_keyboard_opens_selected_card() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(5), reducer);
    let mut component = RosterView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("l l", |state, event| {
        let props = RosterViewProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.dispatch_collect(Action::ModalOpen);

    harness.assert_state(|s| s.selected == 2);
    harness.assert_state(|s| s.detail.shown_id() == Some(3));
}

#[test]
fn test_render_loaded_grid() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(4), reducer);
    let mut component = RosterView::new();

    let output = harness.render_plain(120, 30, |frame, area, state| {
        let props = RosterViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    for id in 1..=4 {
        let name = format!("Character {id}");
        assert!(output.contains(&name), "{name} missing:\n{output}");
    }
}

#[test]
fn test_render_exhausted_message() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = RosterView::new();

    harness.dispatch_collect(Action::SampleStart);
    harness.complete_action(Action::SampleDidExhaust {
        collected: 1,
        attempts: 300,
    });
    harness.process_emitted();

    let output = harness.render_plain(100, 24, |frame, area, state| {
        let props = RosterViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Only 1 of 12"),
        "Exhausted message should be visible:\n{output}"
    );
}
