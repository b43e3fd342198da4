use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use super::Component;
use crate::action::Action;
use crate::state::{AppState, SortField};

const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);

/// Props for the table - read-only view of state
pub struct PokedexTableProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The paginated catalog table
pub struct PokedexTable {
    list: SelectList,
    status_bar: StatusBar,
}

impl Default for PokedexTable {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl PokedexTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn row_items(state: &AppState) -> Vec<Line<'static>> {
        state
            .visible_page()
            .into_iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(format!(" #{:<4}", entry.id), Style::default().fg(ACCENT_GOLD)),
                    Span::raw(format!(" {:<16}", entry.name)),
                    Span::styled(entry.image, Style::default().fg(TEXT_DIM)),
                ])
            })
            .collect()
    }

    fn header_line(state: &AppState) -> Line<'static> {
        let arrow = |field: SortField| {
            if state.sort_by == field {
                state.sort_direction.arrow()
            } else {
                " "
            }
        };
        Line::from(vec![
            Span::styled(
                format!(" ID {:<3}", arrow(SortField::Id)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("NAME {:<12}", arrow(SortField::Name)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("SPRITE", Style::default().add_modifier(Modifier::BOLD)),
        ])
    }

    fn title_line(state: &AppState) -> Line<'static> {
        let mut spans = vec![Span::styled(
            " Pokédex ",
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        )];
        if state.list_loading {
            spans.push(Span::styled("loading…", Style::default().fg(TEXT_DIM)));
        } else if !state.search.query.is_empty() {
            spans.push(Span::styled(
                format!("filter: {}", state.search.query),
                Style::default().fg(TEXT_DIM),
            ));
        }
        if let Some(message) = &state.message {
            spans.push(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            ));
        }
        Line::from(spans)
    }

    fn footer_line(state: &AppState) -> Line<'static> {
        Line::from(vec![
            Span::styled(state.showing_message(), Style::default().fg(TEXT_DIM)),
            Span::raw("  ·  "),
            Span::styled(
                format!("Page {}/{}", state.current_page, state.total_pages()),
                Style::default().fg(ACCENT_GOLD),
            ),
        ])
    }
}

impl Component<Action> for PokedexTable {
    type Props<'a> = PokedexTableProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        let row = props.state.selected_row;
        match key.code {
            KeyCode::Char('/') => vec![Action::SearchOpen],
            KeyCode::Left => vec![Action::PagePrev],
            KeyCode::Right => vec![Action::PageNext],
            KeyCode::Home => vec![Action::PageFirst],
            KeyCode::End => vec![Action::PageLast],
            KeyCode::Char('i') => vec![Action::SortBy(SortField::Id)],
            KeyCode::Char('n') => vec![Action::SortBy(SortField::Name)],
            KeyCode::Char('e') => vec![Action::EditOpen(row)],
            KeyCode::Char('d') => vec![Action::DeleteRequest(row)],
            KeyCode::Enter | KeyCode::Char('v') => vec![Action::DetailOpen(row)],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            KeyCode::Up | KeyCode::Down => {
                let items = Self::row_items(props.state);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.state.selected_row,
                    is_focused: true,
                    style: SelectListStyle {
                        base: BaseStyle {
                            border: None,
                            padding: Padding::default(),
                            bg: None,
                            fg: None,
                        },
                        selection: SelectionStyle::default(),
                        scrollbar: ScrollbarStyle::default(),
                    },
                    behavior: SelectListBehavior::default(),
                    on_select: Action::RowSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Column header
            Constraint::Min(1),    // Rows
            Constraint::Length(1), // Showing x to y of z
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        frame.render_widget(Paragraph::new(Self::title_line(props.state)), chunks[0]);
        frame.render_widget(Paragraph::new(Self::header_line(props.state)), chunks[1]);

        let items = Self::row_items(props.state);
        if items.is_empty() && !props.state.list_loading {
            let empty = Paragraph::new(Line::from(Span::styled(
                " No matching entries",
                Style::default().fg(TEXT_DIM),
            )));
            frame.render_widget(empty, chunks[2]);
        } else {
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.state.selected_row,
                is_focused: props.is_focused,
                style: SelectListStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::default(),
                        bg: None,
                        fg: None,
                    },
                    selection: SelectionStyle::default(),
                    scrollbar: ScrollbarStyle::default(),
                },
                behavior: SelectListBehavior::default(),
                on_select: Action::RowSelect,
                render_item: &|item| item.clone(),
            };
            self.list.render(frame, chunks[2], list_props);
        }

        frame.render_widget(Paragraph::new(Self::footer_line(props.state)), chunks[3]);

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("←/→", "page"),
                    StatusBarHint::new("i/n", "sort"),
                    StatusBarHint::new("e", "edit"),
                    StatusBarHint::new("d", "delete"),
                    StatusBarHint::new("↵", "view"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer;
    use tui_dispatch::testing::*;

    fn loaded_state(count: usize) -> AppState {
        let mut state = AppState::default();
        let names = (1..=count).map(|n| format!("P{n}")).collect();
        reducer(&mut state, Action::RosterDidLoad(names));
        state
    }

    #[test]
    fn test_keys_map_to_actions() {
        let mut component = PokedexTable::new();
        let state = loaded_state(6);

        for (ch, expected) in [
            ('/', Action::SearchOpen),
            ('i', Action::SortBy(SortField::Id)),
            ('n', Action::SortBy(SortField::Name)),
            ('e', Action::EditOpen(0)),
            ('d', Action::DeleteRequest(0)),
            ('v', Action::DetailOpen(0)),
            ('q', Action::Quit),
        ] {
            let props = PokedexTableProps {
                state: &state,
                is_focused: true,
            };
            let actions: Vec<_> = component
                .handle_event(&EventKind::Key(key(&ch.to_string())), props)
                .into_iter()
                .collect();
            actions.assert_first(expected);
        }
    }

    #[test]
    fn test_actions_target_selected_row() {
        let mut component = PokedexTable::new();
        let mut state = loaded_state(6);
        state.selected_row = 3;

        let props = PokedexTableProps {
            state: &state,
            is_focused: true,
        };
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("e")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::EditOpen(3));
    }

    #[test]
    fn test_ignores_keys_when_unfocused() {
        let mut component = PokedexTable::new();
        let state = loaded_state(6);

        let props = PokedexTableProps {
            state: &state,
            is_focused: false,
        };
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("d")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
