use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::Component;
use crate::action::Action;
use crate::state::PokemonDetail;

/// Modal showing the enriched record
pub struct DetailOverlay {
    modal: Modal,
}

pub struct DetailOverlayProps<'a> {
    pub detail: &'a DataResource<PokemonDetail>,
    pub is_focused: bool,
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    fn content_lines(detail: &DataResource<PokemonDetail>) -> Vec<Line<'static>> {
        let dim = Style::default().fg(Color::DarkGray);
        match detail {
            DataResource::Loading => vec![
                Line::from(""),
                Line::from(Span::styled(" Loading…", dim)),
            ],
            DataResource::Failed(error) => vec![
                Line::from(Span::styled(
                    " Detail fetch failed",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(" {error}")),
                Line::from(""),
                Line::from(Span::styled(" esc close · v retry from the table", dim)),
            ],
            DataResource::Loaded(d) => {
                let label = Style::default().fg(Color::Rgb(72, 204, 184));
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!(" {} ", d.name),
                            Style::default()
                                .fg(Color::Rgb(228, 176, 88))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("#{}", d.id), dim),
                    ]),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(" Type      ", label),
                        Span::raw(d.type_label()),
                    ]),
                    Line::from(vec![
                        Span::styled(" Abilities ", label),
                        Span::raw(d.abilities.join(", ")),
                    ]),
                    Line::from(vec![
                        Span::styled(" Height    ", label),
                        Span::raw(d.height.to_string()),
                    ]),
                    Line::from(vec![
                        Span::styled(" Weight    ", label),
                        Span::raw(d.weight.to_string()),
                    ]),
                    Line::from(vec![
                        Span::styled(" Sprite    ", label),
                        Span::styled(d.image.clone(), dim),
                    ]),
                    Line::from(""),
                    Line::from(Span::styled(" esc close", dim)),
                ]
            }
            DataResource::Empty => vec![Line::from("")],
        }
    }
}

impl Component<Action> for DetailOverlay {
    type Props<'a> = DetailOverlayProps<'a>;

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
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::DetailClose),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 40 || area.height < 12 {
            return;
        }

        let modal_area = centered_rect(64, 12, area);
        let lines = Self::content_lines(props.detail);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            frame.render_widget(
                Paragraph::new(lines.clone()).wrap(Wrap { trim: false }),
                content_area,
            );
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
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DetailClose,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn test_escape_closes_detail() {
        let mut component = DetailOverlay::new();
        let detail = DataResource::Loading;
        let props = DetailOverlayProps {
            detail: &detail,
            is_focused: true,
        };
        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::DetailClose]);
    }

    #[test]
    fn test_loaded_lines_show_merged_fields() {
        let detail = DataResource::Loaded(PokemonDetail {
            id: 25,
            name: "pikachu".into(),
            image: "25.png".into(),
            abilities: vec!["static".into()],
            types: vec!["electric".into()],
            height: 4,
            weight: 60,
        });
        let text: Vec<String> = DetailOverlay::content_lines(&detail)
            .iter()
            .map(|line| line.to_string())
            .collect();
        let joined = text.join("\n");
        assert!(joined.contains("pikachu"));
        assert!(joined.contains("electric"));
        assert!(joined.contains("static"));
    }
}
