//! Pokédex table TUI - paginated, sortable, searchable catalog browser

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use poketable::action::Action;
use poketable::api;
use poketable::components::{
    Component, ConfirmDelete, ConfirmDeleteProps, DetailOverlay, DetailOverlayProps, EditOverlay,
    EditOverlayProps, PokedexTable, PokedexTableProps, SearchBar, SearchBarProps,
};
use poketable::effect::Effect;
use poketable::reducer::reducer;
use poketable::state::AppState;

/// Pokédex table TUI
#[derive(Parser, Debug)]
#[command(name = "poketable")]
#[command(about = "Browse the PokeAPI catalog in a paginated table")]
struct Args {
    /// How many records the initial fetch requests
    #[arg(long, short, default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum TableComponentId {
    Table,
    Search,
    Edit,
    Detail,
    Confirm,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum TableContext {
    Table,
    Search,
    Edit,
    Detail,
    Confirm,
}

impl EventRoutingState<TableComponentId, TableContext> for AppState {
    fn focused(&self) -> Option<TableComponentId> {
        Some(self.modal().unwrap_or(TableComponentId::Table))
    }

    fn modal(&self) -> Option<TableComponentId> {
        if self.pending_delete.is_some() {
            Some(TableComponentId::Confirm)
        } else if self.edit.is_some() {
            Some(TableComponentId::Edit)
        } else if self.detail_open() {
            Some(TableComponentId::Detail)
        } else if self.search.active {
            Some(TableComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: TableComponentId) -> TableContext {
        match id {
            TableComponentId::Table => TableContext::Table,
            TableComponentId::Search => TableContext::Search,
            TableComponentId::Edit => TableContext::Edit,
            TableComponentId::Detail => TableContext::Detail,
            TableComponentId::Confirm => TableContext::Confirm,
        }
    }

    fn default_context(&self) -> TableContext {
        TableContext::Table
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        limit,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(AppState::new(limit)) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct TableUi {
    table: PokedexTable,
    search: SearchBar,
    edit: EditOverlay,
    detail: DetailOverlay,
    confirm: ConfirmDelete,
}

impl TableUi {
    fn new() -> Self {
        Self {
            table: PokedexTable::new(),
            search: SearchBar::new(),
            edit: EditOverlay::new(),
            detail: DetailOverlay::new(),
            confirm: ConfirmDelete::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<TableComponentId>,
    ) {
        let overlay_open =
            state.edit.is_some() || state.detail_open() || state.pending_delete.is_some();

        self.search.set_open(state.search.active);
        let table_area = if state.search.active {
            let chunks =
                Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);
            event_ctx.set_component_area(TableComponentId::Search, chunks[0]);
            self.search.render(
                frame,
                chunks[0],
                SearchBarProps {
                    query: &state.search.query,
                    is_focused: render_ctx.is_focused() && !overlay_open,
                },
            );
            chunks[1]
        } else {
            event_ctx
                .component_areas
                .remove(&TableComponentId::Search);
            area
        };

        event_ctx.set_component_area(TableComponentId::Table, table_area);
        self.table.render(
            frame,
            table_area,
            PokedexTableProps {
                state,
                is_focused: render_ctx.is_focused() && !state.search.active && !overlay_open,
            },
        );

        self.edit.set_open(state.edit.is_some());
        if let Some(buffer) = &state.edit {
            event_ctx.set_component_area(TableComponentId::Edit, centered_rect(44, 8, area));
            self.edit.render(
                frame,
                area,
                EditOverlayProps {
                    buffer,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&TableComponentId::Edit);
        }

        if state.detail_open() {
            event_ctx.set_component_area(TableComponentId::Detail, centered_rect(64, 12, area));
            self.detail.render(
                frame,
                area,
                DetailOverlayProps {
                    detail: &state.detail,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx
                .component_areas
                .remove(&TableComponentId::Detail);
        }

        if let Some(id) = state.pending_delete {
            let name = state
                .filtered
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.name.as_str())
                .unwrap_or("this record");
            event_ctx.set_component_area(TableComponentId::Confirm, centered_rect(46, 7, area));
            self.confirm.render(
                frame,
                area,
                ConfirmDeleteProps {
                    name,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx
                .component_areas
                .remove(&TableComponentId::Confirm);
        }
    }

    fn handle_table_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = PokedexTableProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.table.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search.active);
        let props = SearchBarProps {
            query: &state.search.query,
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_edit_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(buffer) = &state.edit else {
            return HandlerResponse::ignored();
        };
        let props = EditOverlayProps {
            buffer,
            is_focused: true,
        };
        let actions: Vec<_> = self.edit.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailOverlayProps {
            detail: &state.detail,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_confirm_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(id) = state.pending_delete else {
            return HandlerResponse::ignored();
        };
        let name = state
            .filtered
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let props = ConfirmDeleteProps {
            name: &name,
            is_focused: true,
        };
        let actions: Vec<_> = self.confirm.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(TableUi::new()));
    let mut bus: EventBus<AppState, Action, TableComponentId, TableContext> = EventBus::new();
    let keybindings: Keybindings<TableContext> = Keybindings::new();

    let ui_table = Rc::clone(&ui);
    bus.register(TableComponentId::Table, move |event, state| {
        ui_table.borrow_mut().handle_table_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(TableComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_edit = Rc::clone(&ui);
    bus.register(TableComponentId::Edit, move |event, state| {
        ui_edit.borrow_mut().handle_edit_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(TableComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_confirm = Rc::clone(&ui);
    bus.register(TableComponentId::Confirm, move |event, state| {
        ui_confirm
            .borrow_mut()
            .handle_confirm_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::RosterFetch),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchRoster { limit } => {
            ctx.tasks().spawn(TaskKey::new("roster"), async move {
                match api::fetch_pokemon_list(limit).await {
                    Ok(names) => Action::RosterDidLoad(names),
                    Err(error) => Action::RosterDidError(error),
                }
            });
        }
        Effect::FetchDetail { id } => {
            let key = format!("detail_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_pokemon_detail(id).await {
                    Ok(data) => Action::DetailDidLoad(data),
                    Err(error) => Action::DetailDidError { id, error },
                }
            });
        }
    }
}
