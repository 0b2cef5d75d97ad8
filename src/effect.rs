//! Effects - side effects declared by the reducer

use crate::state::SampleRequest;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Run a full sampling cycle (page count, then the draw loop)
    Sample(SampleRequest),
    /// Resolve every episode reference of the shown character
    LoadEpisodes {
        character_id: u32,
        references: Vec<String>,
    },
}
