//! Application state - single source of truth

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Number of characters sampled when nothing else is requested.
pub const DEFAULT_COUNT: u32 = 12;
/// Attempts allowed per requested character before a cycle gives up.
pub const ATTEMPTS_PER_CHARACTER: u32 = 25;

pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Life state reported by the API.
///
/// The wire values are matched exactly (`"Alive"`, `"Dead"`, `"unknown"`);
/// anything else is kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterStatus {
    Alive,
    Dead,
    Unknown,
    Other(String),
}

impl CharacterStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CharacterStatus::Alive => "Alive",
            CharacterStatus::Dead => "Dead",
            CharacterStatus::Unknown => "unknown",
            CharacterStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CharacterStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Alive" => CharacterStatus::Alive,
            "Dead" => CharacterStatus::Dead,
            "unknown" => CharacterStatus::Unknown,
            _ => CharacterStatus::Other(raw),
        }
    }
}

impl From<CharacterStatus> for String {
    fn from(status: CharacterStatus) -> Self {
        match status {
            CharacterStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl JsonSchema for CharacterStatus {
    fn schema_name() -> String {
        "CharacterStatus".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// A named place (origin or last known location)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A character record as returned by the character endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    /// Sub-species, often empty
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub image: String,
    pub origin: Place,
    pub location: Place,
    /// Episode URLs, in air order
    #[serde(default)]
    pub episode: Vec<String>,
}

/// A resolved episode reference
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Episode {
    pub code: String,
    pub name: String,
    pub air_date: String,
}

/// Status filter sent as the `status` query parameter
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    Any,
    Alive,
    Dead,
    Unknown,
}

impl StatusFilter {
    /// Value for the `status` query parameter; empty means unfiltered.
    pub fn as_query(&self) -> &'static str {
        match self {
            StatusFilter::Any => "",
            StatusFilter::Alive => "alive",
            StatusFilter::Dead => "dead",
            StatusFilter::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Any => "Any",
            StatusFilter::Alive => "Alive",
            StatusFilter::Dead => "Dead",
            StatusFilter::Unknown => "Unknown",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatusFilter::Any => StatusFilter::Alive,
            StatusFilter::Alive => StatusFilter::Dead,
            StatusFilter::Dead => StatusFilter::Unknown,
            StatusFilter::Unknown => StatusFilter::Any,
        }
    }
}

/// Parameters of one sampling cycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SampleRequest {
    pub count: u32,
    pub status: StatusFilter,
    pub max_attempts: u32,
}

impl SampleRequest {
    pub fn new(count: u32, status: StatusFilter) -> Self {
        let count = count.max(1);
        Self {
            count,
            status,
            max_attempts: count.saturating_mul(ATTEMPTS_PER_CHARACTER),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl Default for SampleRequest {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT, StatusFilter::Any)
    }
}

/// The single detail view shared by every card.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct DetailView {
    pub character: Option<Character>,
    /// Episodes for the shown character, re-fetched on every `show`
    pub episodes: DataResource<Vec<Episode>>,
    pub scroll: u16,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            character: None,
            episodes: DataResource::Empty,
            scroll: 0,
        }
    }
}

impl DetailView {
    pub fn is_open(&self) -> bool {
        self.character.is_some()
    }

    pub fn shown_id(&self) -> Option<u32> {
        self.character.as_ref().map(|character| character.id)
    }

    /// Show `character`, replacing whatever was shown before.
    ///
    /// Returns false when that character is already shown with episodes
    /// loading, so repeated calls do not restart the lookup.
    pub fn show(&mut self, character: Character) -> bool {
        if self.shown_id() == Some(character.id) && self.episodes.is_loading() {
            return false;
        }
        self.episodes = if character.episode.is_empty() {
            DataResource::Loaded(Vec::new())
        } else {
            DataResource::Loading
        };
        self.character = Some(character);
        self.scroll = 0;
        true
    }

    /// Hide the view. Returns false if it was already hidden.
    pub fn hide(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        *self = DetailView::default();
        true
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Request", label = "Parameters", debug_fmt)]
    pub request: SampleRequest,

    /// Roster lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Roster", label = "Characters", debug_fmt)]
    pub roster: DataResource<Vec<Character>>,

    #[debug(section = "Roster", label = "Selected", debug_fmt)]
    pub selected: usize,

    #[debug(section = "Detail", label = "Modal", debug_fmt)]
    pub detail: DetailView,

    #[debug(skip)]
    pub terminal_size: (u16, u16),

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(request: SampleRequest) -> Self {
        Self {
            request,
            roster: DataResource::Empty,
            selected: 0,
            detail: DetailView::default(),
            terminal_size: (80, 24),
            tick_count: 0,
        }
    }

    pub fn characters(&self) -> &[Character] {
        self.roster.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_character(&self) -> Option<&Character> {
        self.characters().get(self.selected)
    }

    pub fn is_loading(&self) -> bool {
        self.roster.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SampleRequest::default())
    }
}
