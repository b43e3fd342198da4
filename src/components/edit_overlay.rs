use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, TextInput,
    TextInputProps, TextInputStyle,
};

use super::Component;
use crate::action::Action;
use crate::state::Pokemon;

/// Modal for renaming a record; the id stays fixed
pub struct EditOverlay {
    input: TextInput,
    modal: Modal,
    was_open: bool,
}

pub struct EditOverlayProps<'a> {
    pub buffer: &'a Pokemon,
    pub is_focused: bool,
}

impl Default for EditOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }
}

impl Component<Action> for EditOverlay {
    type Props<'a> = EditOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Esc {
                return vec![Action::EditCancel];
            }
        }

        let input_props = TextInputProps {
            value: &props.buffer.name,
            placeholder: "Name",
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::default(),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::EditNameChange,
            on_submit: Action::EditSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 30 || area.height < 8 {
            return;
        }

        let EditOverlay { input, modal, .. } = self;
        let modal_area = centered_rect(44, 8, area);
        let buffer = props.buffer;
        let is_focused = props.is_focused;

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Heading
                Constraint::Length(3), // Input
                Constraint::Length(1), // Hints
            ])
            .split(content_area);

            let heading = Line::from(vec![
                Span::styled(
                    format!(" Edit #{}", buffer.id),
                    Style::default().fg(Color::Rgb(228, 176, 88)),
                ),
                Span::styled(
                    "  (id is fixed)",
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            frame.render_widget(Paragraph::new(heading), chunks[0]);

            let input_props = TextInputProps {
                value: &buffer.name,
                placeholder: "Name",
                is_focused,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: Some(Color::Rgb(50, 50, 60)),
                        fg: None,
                    },
                    placeholder_style: None,
                    cursor_style: None,
                },
                on_change: Action::EditNameChange,
                on_submit: Action::EditSubmit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[1], input_props);

            let hints = Line::from(Span::styled(
                " ↵ save · esc cancel",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(Paragraph::new(hints), chunks[2]);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::EditCancel,
                render_content: &mut render_content,
            },
        );
    }
}
