use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::Component;
use crate::action::Action;

/// Confirmation prompt shown before a delete; the only source of
/// `DeleteConfirm`
pub struct ConfirmDelete {
    modal: Modal,
}

pub struct ConfirmDeleteProps<'a> {
    /// Name of the record about to be removed
    pub name: &'a str,
    pub is_focused: bool,
}

impl Default for ConfirmDelete {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl ConfirmDelete {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ConfirmDelete {
    type Props<'a> = ConfirmDeleteProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::DeleteConfirm),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::DeleteCancel),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 30 || area.height < 7 {
            return;
        }

        let modal_area = centered_rect(46, 7, area);
        let name = props.name.to_string();
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let lines = vec![
                Line::from(Span::styled(
                    " Are you sure?",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(" Delete {name}. You won't be able to revert this!")),
                Line::from(""),
                Line::from(Span::styled(
                    " y delete · n cancel",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), content_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(45, 30, 30)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DeleteCancel,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_confirm_and_cancel_keys() {
        let mut component = ConfirmDelete::new();

        for (ch, expected) in [
            ("y", Action::DeleteConfirm),
            ("n", Action::DeleteCancel),
        ] {
            let props = ConfirmDeleteProps {
                name: "pidgey",
                is_focused: true,
            };
            let actions: Vec<_> = component
                .handle_event(&EventKind::Key(key(ch)), props)
                .into_iter()
                .collect();
            actions.assert_first(expected);
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut component = ConfirmDelete::new();
        let props = ConfirmDeleteProps {
            name: "pidgey",
            is_focused: true,
        };
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("x")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
