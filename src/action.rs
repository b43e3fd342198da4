use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::PokemonDetailData;
use crate::state::SortField;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Roster category =====
    /// Intent: fetch the catalog (triggers async task)
    RosterFetch,

    /// Result: catalog names loaded; ids and sprites are assigned here
    RosterDidLoad(Vec<String>),

    /// Result: catalog fetch failed
    RosterDidError(String),

    // ===== Search category =====
    /// Open the search input
    SearchOpen,

    /// Close the input and clear the filter
    SearchClose,

    /// Search term changed (live filtering)
    SearchQueryChange(String),

    /// Submit the term: input closes, filter stays
    SearchQuerySubmit(String),

    // ===== Page category =====
    PageFirst,
    PageLast,
    PageNext,
    PagePrev,

    // ===== Table category =====
    /// Sort by a column; repeated on the same column flips the direction
    SortBy(SortField),

    /// Select a row of the visible page (by index)
    RowSelect(usize),

    // ===== Edit category =====
    /// Snapshot the row at the given visible-page index into the edit buffer
    EditOpen(usize),

    /// Buffer name changed
    EditNameChange(String),

    /// Commit the buffer back into the lists by id
    EditSubmit(String),

    /// Discard the buffer
    EditCancel,

    // ===== Detail category =====
    /// Request the detail view for the row at the given visible-page index
    DetailOpen(usize),

    /// Result: detail data loaded
    DetailDidLoad(PokemonDetailData),

    /// Result: detail fetch failed
    DetailDidError { id: u16, error: String },

    DetailClose,

    // ===== Delete category =====
    /// Ask for confirmation before deleting the row at the given index
    DeleteRequest(usize),

    /// User confirmed - remove the record
    DeleteConfirm,

    DeleteCancel,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Exit the application
    Quit,
}
