//! Error and close confirmation dialogs.

use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Element, Length};

use crate::app::Message;
use crate::theme::{colors, font, spacing};

pub fn error(message: &str) -> Element<Message> {
    let content = column![
        text("Error").size(font::LG).color(colors::ERROR),
        text(message).size(font::NORMAL),
        row![
            horizontal_space(),
            button(text("OK").size(font::NORMAL))
                .on_press(Message::DismissError)
                .padding([spacing::XS, spacing::LG]),
        ],
    ]
    .spacing(spacing::MD);

    container(content)
        .width(Length::Fixed(460.0))
        .padding(spacing::LG)
        .style(container::rounded_box)
        .into()
}

pub fn close_prompt<'a>() -> Element<'a, Message> {
    let content = column![
        text("Unsaved Changes").size(font::LG),
        text("The project has changes that have not been saved.").size(font::NORMAL),
        row![
            horizontal_space(),
            button(text("Save and Exit").size(font::NORMAL))
                .on_press(Message::SaveAndExit)
                .padding([spacing::XS, spacing::MD]),
            button(text("Discard and Exit").size(font::NORMAL))
                .on_press(Message::DiscardAndExit)
                .style(button::danger)
                .padding([spacing::XS, spacing::MD]),
            button(text("Cancel").size(font::NORMAL))
                .on_press(Message::CancelExit)
                .style(button::secondary)
                .padding([spacing::XS, spacing::MD]),
        ]
        .spacing(spacing::SM),
    ]
    .spacing(spacing::MD);

    container(content)
        .width(Length::Fixed(520.0))
        .padding(spacing::LG)
        .style(container::rounded_box)
        .into()
}
