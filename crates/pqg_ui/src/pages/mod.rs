//! Views.

pub mod dialogs;
pub mod edit_files;
pub mod input_files;
pub mod main_window;
pub mod parameters;
pub mod paths;
pub mod run_log;

use iced::widget::{center, container, opaque, stack};
use iced::Element;

use crate::app::Message;
use crate::theme::colors;

/// Show `content` centered over a dimmed, click-blocking `base`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(center(opaque(content)).style(|_theme| container::Style {
            background: Some(colors::BACKDROP.into()),
            ..container::Style::default()
        }))
    ]
    .into()
}
