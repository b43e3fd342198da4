pub mod confirm_delete;
pub mod detail_overlay;
pub mod edit_overlay;
pub mod pokedex_table;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use confirm_delete::{ConfirmDelete, ConfirmDeleteProps};
pub use detail_overlay::{DetailOverlay, DetailOverlayProps};
pub use edit_overlay::{EditOverlay, EditOverlayProps};
pub use pokedex_table::{PokedexTable, PokedexTableProps};
pub use search_bar::{SearchBar, SearchBarProps};
