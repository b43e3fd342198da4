//! Render snapshot tests using RenderHarness

use poketable::{
    action::Action,
    components::{
        Component, ConfirmDelete, ConfirmDeleteProps, DetailOverlay, DetailOverlayProps,
        EditOverlay, EditOverlayProps, PokedexTable, PokedexTableProps, SearchBar, SearchBarProps,
    },
    reducer::reducer,
    state::{AppState, Pokemon, PokemonDetail, SortField},
};
use tui_dispatch::{testing::*, DataResource};

fn loaded_state(count: usize) -> AppState {
    let mut state = AppState::default();
    let names = (1..=count).map(|n| format!("P{n}")).collect();
    reducer(&mut state, Action::RosterDidLoad(names));
    state
}

#[test]
fn test_render_table_page() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = PokedexTable::new();

    let state = loaded_state(12);
    let output = render.render_to_string_plain(|frame| {
        let props = PokedexTableProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("P1"), "First page rows should be visible");
    assert!(output.contains("P5"), "Page holds five records");
    assert!(!output.contains("P6"), "Second page starts at P6");
    assert!(
        output.contains("Showing 1 to 5 of 12 entries"),
        "Footer summary should be visible:\n{}",
        output
    );
    assert!(output.contains("Page 1/3"), "Page indicator should be visible");
}

#[test]
fn test_render_table_sorted_desc() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = PokedexTable::new();

    let mut state = loaded_state(12);
    reducer(&mut state, Action::SortBy(SortField::Id)); // flips to desc

    let output = render.render_to_string_plain(|frame| {
        let props = PokedexTableProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    let p5 = output.find("P5").expect("P5 rendered");
    let p1 = output.find("P1").expect("P1 rendered");
    assert!(p5 < p1, "Descending id sort renders P5 before P1");
}

#[test]
fn test_render_empty_filter() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = PokedexTable::new();

    let mut state = loaded_state(12);
    reducer(&mut state, Action::SearchQueryChange("zzz".into()));

    let output = render.render_to_string_plain(|frame| {
        let props = PokedexTableProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("No matching entries"));
    assert!(output.contains("Showing 1 to 0 of 0 entries"));
}

#[test]
fn test_render_load_error_message() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = PokedexTable::new();

    let mut state = AppState::default();
    reducer(&mut state, Action::RosterDidError("connection refused".into()));

    let output = render.render_to_string_plain(|frame| {
        let props = PokedexTableProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("connection refused"));
}

#[test]
fn test_render_help_bar() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = PokedexTable::new();

    let state = loaded_state(6);
    let output = render.render_to_string_plain(|frame| {
        let props = PokedexTableProps {
            state: &state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("delete"), "Should show delete hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_search_bar() {
    let mut render = RenderHarness::new(80, 5);
    let mut component = SearchBar::new();

    let output = render.render_to_string_plain(|frame| {
        let props = SearchBarProps {
            query: "pika",
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Search"));
    assert!(output.contains("pika"));
}

#[test]
fn test_render_edit_overlay() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = EditOverlay::new();

    let buffer = Pokemon {
        id: 4,
        name: "charmander".into(),
        image: "4.png".into(),
    };
    let output = render.render_to_string_plain(|frame| {
        let props = EditOverlayProps {
            buffer: &buffer,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Edit #4"));
    assert!(output.contains("charmander"));
}

#[test]
fn test_render_detail_overlay_states() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = DetailOverlay::new();

    let loading = DataResource::Loading;
    let output = render.render_to_string_plain(|frame| {
        let props = DetailOverlayProps {
            detail: &loading,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });
    assert!(output.contains("Loading"));

    let failed: DataResource<PokemonDetail> = DataResource::Failed("timeout".into());
    let output = render.render_to_string_plain(|frame| {
        let props = DetailOverlayProps {
            detail: &failed,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });
    assert!(output.contains("Detail fetch failed"));
    assert!(output.contains("timeout"));

    let loaded = DataResource::Loaded(PokemonDetail {
        id: 25,
        name: "pikachu".into(),
        image: "25.png".into(),
        abilities: vec!["static".into(), "lightning-rod".into()],
        types: vec!["electric".into()],
        height: 4,
        weight: 60,
    });
    let output = render.render_to_string_plain(|frame| {
        let props = DetailOverlayProps {
            detail: &loaded,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });
    assert!(output.contains("pikachu"));
    assert!(output.contains("electric"));
    assert!(output.contains("static"));
}

#[test]
fn test_render_confirm_overlay() {
    let mut render = RenderHarness::new(80, 24);
    let mut component = ConfirmDelete::new();

    let output = render.render_to_string_plain(|frame| {
        let props = ConfirmDeleteProps {
            name: "pidgey",
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    });

    assert!(output.contains("Are you sure?"));
    assert!(output.contains("pidgey"));
}
