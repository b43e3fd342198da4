//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Pokemon, PokemonDetail, SortDirection};

/// The reducer handles all state transitions. Mutations follow one pipeline:
/// mutate source state, recompute the filtered list when the search or the
/// records changed, clamp the page, clamp the row selection. The visible
/// page itself is derived on read.
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Roster =====
        Action::RosterFetch => {
            state.list_loading = true;
            state.message = None;
            DispatchResult::changed_with(Effect::FetchRoster {
                limit: state.fetch_limit,
            })
        }

        Action::RosterDidLoad(names) => {
            state.roster = names
                .into_iter()
                .enumerate()
                .map(|(index, name)| Pokemon::from_fetched(index, name))
                .collect();
            state.filtered = state.roster.clone();
            state.current_page = 1;
            state.selected_row = 0;
            state.list_loading = false;
            DispatchResult::changed()
        }

        Action::RosterDidError(error) => {
            state.list_loading = false;
            state.message = Some(format!("Pokédex error: {error}"));
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchOpen => {
            state.search.active = true;
            state.search.query.clear();
            apply_search(state)
        }

        Action::SearchClose => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            apply_search(state)
        }

        Action::SearchQueryChange(query) => {
            state.search.query = query;
            apply_search(state)
        }

        Action::SearchQuerySubmit(query) => {
            state.search.query = query;
            state.search.active = false;
            apply_search(state)
        }

        // ===== Paging =====
        Action::PageFirst => go_to_page(state, 1),
        Action::PageLast => go_to_page(state, state.total_pages()),
        Action::PageNext => go_to_page(state, state.current_page + 1),
        Action::PagePrev => go_to_page(state, state.current_page.saturating_sub(1)),

        // ===== Table =====
        Action::SortBy(field) => {
            if state.sort_by == field {
                state.sort_direction = state.sort_direction.flip();
            } else {
                state.sort_by = field;
                state.sort_direction = SortDirection::Asc;
            }
            DispatchResult::changed()
        }

        Action::RowSelect(index) => {
            let len = state.visible_len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(len - 1);
            if bounded == state.selected_row {
                return DispatchResult::unchanged();
            }
            state.selected_row = bounded;
            DispatchResult::changed()
        }

        // ===== Edit =====
        Action::EditOpen(index) => {
            let Some(entry) = state.visible_page().get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.edit = Some(entry);
            DispatchResult::changed()
        }

        Action::EditNameChange(name) => {
            let Some(buffer) = state.edit.as_mut() else {
                return DispatchResult::unchanged();
            };
            buffer.name = name;
            DispatchResult::changed()
        }

        Action::EditSubmit(name) => {
            let Some(mut buffer) = state.edit.take() else {
                return DispatchResult::unchanged();
            };
            buffer.name = name;
            // Stale buffer (the record was deleted meanwhile): the lists
            // stay untouched and the buffer is simply dropped.
            if let Some(pos) = state.filtered.iter().position(|p| p.id == buffer.id) {
                state.filtered[pos] = buffer.clone();
                if let Some(pos) = state.roster.iter().position(|p| p.id == buffer.id) {
                    state.roster[pos] = buffer;
                }
            }
            DispatchResult::changed()
        }

        Action::EditCancel => {
            if state.edit.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        // ===== Detail =====
        Action::DetailOpen(index) => {
            let Some(entry) = state.visible_page().get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.detail_id = Some(entry.id);
            state.detail = DataResource::Loading;
            DispatchResult::changed_with(Effect::FetchDetail { id: entry.id })
        }

        Action::DetailDidLoad(data) => {
            if state.detail_id != Some(data.id) {
                return DispatchResult::unchanged();
            }
            // The record may have been deleted while the fetch was in
            // flight; close the view instead of showing a ghost entry.
            let Some(summary) = state.filtered.iter().find(|p| p.id == data.id).cloned() else {
                state.detail_id = None;
                state.detail = DataResource::Empty;
                state.message = Some(format!("#{} is no longer in the list", data.id));
                return DispatchResult::changed();
            };
            state.detail = DataResource::Loaded(PokemonDetail {
                id: summary.id,
                name: summary.name,
                image: summary.image,
                abilities: data.abilities,
                types: data.types,
                height: data.height,
                weight: data.weight,
            });
            DispatchResult::changed()
        }

        Action::DetailDidError { id, error } => {
            if state.detail_id != Some(id) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::DetailClose => {
            if !state.detail_open() {
                return DispatchResult::unchanged();
            }
            state.detail_id = None;
            state.detail = DataResource::Empty;
            DispatchResult::changed()
        }

        // ===== Delete =====
        Action::DeleteRequest(index) => {
            let Some(entry) = state.visible_page().get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.pending_delete = Some(entry.id);
            DispatchResult::changed()
        }

        Action::DeleteCancel => {
            if state.pending_delete.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::DeleteConfirm => {
            let Some(id) = state.pending_delete.take() else {
                return DispatchResult::unchanged();
            };
            state.filtered.retain(|p| p.id != id);
            state.roster.retain(|p| p.id != id);
            // Removing the last record of the last page steps back exactly
            // one page; the page is never left empty while records remain.
            if state.page_start() >= state.filtered.len() && state.current_page > 1 {
                state.current_page -= 1;
            }
            state.clamp_selection();
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn apply_search(state: &mut AppState) -> DispatchResult<Effect> {
    state.rebuild_filtered();
    state.current_page = 1;
    state.clamp_selection();
    DispatchResult::changed()
}

fn go_to_page(state: &mut AppState, page: usize) -> DispatchResult<Effect> {
    let target = page.clamp(1, state.total_pages());
    if target == state.current_page {
        return DispatchResult::unchanged();
    }
    state.current_page = target;
    state.clamp_selection();
    DispatchResult::changed()
}
