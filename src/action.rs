//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Character, Episode};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Sample category =====
    /// Intent: start a sampling cycle with the current request
    SampleStart,

    /// Result: the requested number of distinct characters was collected
    SampleDidComplete(Vec<Character>),

    /// Result: the attempt budget ran out before enough distinct characters were seen
    SampleDidExhaust { collected: usize, attempts: u32 },

    /// Result: a fetch failed and the cycle was abandoned
    SampleDidError(String),

    // ===== Selection category =====
    /// Move the selected card by a number of cards
    SelectionMove(i16),

    /// Move the selected card by a number of grid rows
    SelectionRow(i16),

    /// Select a card by index
    SelectionSet(usize),

    // ===== Modal category =====
    /// Show the detail modal for the selected card
    ModalOpen,

    /// Hide the detail modal
    ModalClose,

    /// Scroll the episode list
    ModalScroll(i16),

    /// Result: episodes resolved for a character, in request order
    EpisodesDidLoad { character_id: u32, episodes: Vec<Episode> },

    // ===== UI category =====
    /// Switch to the next status filter and sample again
    UiCycleStatus,

    UiTerminalResize(u16, u16),

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    Quit,
}
