//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Records shown per page.
pub const PAGE_SIZE: usize = 5;

/// Sprite location derived from the 1-based dex id.
pub const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// One catalog entry as shown in the table
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pokemon {
    pub id: u16,
    pub name: String,
    pub image: String,
}

impl Pokemon {
    /// Build an entry from its 1-based position in the fetched sequence.
    /// Ids and sprite URLs are assigned here, not by the source.
    pub fn from_fetched(index: usize, name: String) -> Self {
        let id = (index + 1) as u16;
        Self {
            id,
            name,
            image: format!("{SPRITE_BASE}/{id}.png"),
        }
    }
}

/// A summary record enriched with detail-endpoint data
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetail {
    pub id: u16,
    pub name: String,
    pub image: String,
    pub abilities: Vec<String>,
    pub types: Vec<String>,
    pub height: u16,
    pub weight: u16,
}

impl PokemonDetail {
    pub fn type_label(&self) -> String {
        self.types.join(", ")
    }
}

/// Column the table is sorted by
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum SortField {
    #[default]
    Id,
    Name,
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// All records as originally loaded (ids assigned at load)
    #[debug(skip)]
    pub roster: Vec<Pokemon>,

    /// Records matching the current search term; edits and deletes land here
    /// first and are propagated to the roster by id
    #[debug(skip)]
    pub filtered: Vec<Pokemon>,

    /// 1-based page into the filtered list
    #[debug(section = "Table", label = "Page")]
    pub current_page: usize,

    #[debug(section = "Table", label = "Sort by", debug_fmt)]
    pub sort_by: SortField,

    #[debug(section = "Table", label = "Direction", debug_fmt)]
    pub sort_direction: SortDirection,

    /// Selected row within the visible page
    #[debug(section = "Table", label = "Row")]
    pub selected_row: usize,

    #[debug(section = "Search", label = "State", debug_fmt)]
    pub search: SearchState,

    /// Scratch copy of the record being edited, committed back by id
    #[debug(section = "Modals", label = "Edit", debug_fmt)]
    pub edit: Option<Pokemon>,

    /// Id of the record whose detail view is open
    #[debug(section = "Modals", label = "Detail id", debug_fmt)]
    pub detail_id: Option<u16>,

    /// Detail lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Modals", label = "Detail", debug_fmt)]
    pub detail: DataResource<PokemonDetail>,

    /// Id awaiting delete confirmation from the user
    #[debug(section = "Modals", label = "Pending delete", debug_fmt)]
    pub pending_delete: Option<u16>,

    /// How many records the initial fetch requests
    #[debug(skip)]
    pub fetch_limit: u32,

    #[debug(section = "Status", label = "Loading")]
    pub list_loading: bool,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,
}

impl AppState {
    pub fn new(fetch_limit: u32) -> Self {
        Self {
            roster: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
            selected_row: 0,
            search: SearchState::default(),
            edit: None,
            detail_id: None,
            detail: DataResource::Empty,
            pending_delete: None,
            fetch_limit,
            list_loading: false,
            message: None,
        }
    }

    /// Pages needed for the filtered list, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// 0-based offset of the current page into the filtered list.
    pub fn page_start(&self) -> usize {
        (self.current_page - 1) * PAGE_SIZE
    }

    pub fn page_end(&self) -> usize {
        (self.page_start() + PAGE_SIZE).min(self.filtered.len())
    }

    /// The sorted page slice currently shown. Derived on demand - the sort
    /// applies to this window only, never to the stored filtered order.
    pub fn visible_page(&self) -> Vec<Pokemon> {
        let start = self.page_start().min(self.filtered.len());
        let mut page: Vec<Pokemon> = self.filtered[start..self.page_end()].to_vec();
        match self.sort_by {
            SortField::Id => page.sort_by(|a, b| a.id.cmp(&b.id)),
            SortField::Name => {
                page.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
        if self.sort_direction == SortDirection::Desc {
            page.reverse();
        }
        page
    }

    pub fn visible_len(&self) -> usize {
        self.page_end().saturating_sub(self.page_start().min(self.filtered.len()))
    }

    /// Footer summary, e.g. "Showing 6 to 10 of 93 entries".
    pub fn showing_message(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.page_start() + 1,
            self.page_end(),
            self.filtered.len()
        )
    }

    /// Recompute the filtered list from the roster and the search term:
    /// case-insensitive substring over the name or the decimal id.
    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.to_lowercase();
        self.filtered = self
            .roster
            .iter()
            .filter(|entry| {
                query.is_empty()
                    || entry.name.to_lowercase().contains(&query)
                    || entry.id.to_string().contains(&query)
            })
            .cloned()
            .collect();
    }

    /// Keep the row selection inside the visible page.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_row = 0;
        } else {
            self.selected_row = self.selected_row.min(len - 1);
        }
    }

    pub fn detail_open(&self) -> bool {
        self.detail_id.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(100)
    }
}
