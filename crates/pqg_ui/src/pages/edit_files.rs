//! Edit panel for the selected input files: group and identifications.

use iced::alignment::Vertical;
use iced::widget::{button, column, container, horizontal_space, row, text, text_input};
use iced::{Element, Length};

use crate::app::{App, EditFilesState, Message};
use crate::handlers::display_name;
use crate::theme::{colors, font, spacing};

pub fn view<'a>(app: &'a App, dialog: &'a EditFilesState) -> Element<'a, Message> {
    let selected = dialog
        .indices
        .iter()
        .filter_map(|&i| app.session.input_files().get(i))
        .map(|f| display_name(&f.raw_path))
        .collect::<Vec<_>>()
        .join(", ");

    let candidates = if dialog.candidates.is_empty() {
        text("No identification files selected").color(colors::TEXT_SECONDARY)
    } else {
        text(
            dialog
                .candidates
                .iter()
                .map(|p| display_name(p))
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    let content = column![
        text("Edit Files").size(font::HEADER),
        text(selected).size(font::SM).color(colors::TEXT_SECONDARY),
        row![
            text("Group").size(font::NORMAL).width(Length::Fixed(120.0)),
            text_input("No group", &dialog.group)
                .on_input(Message::EditGroupChanged)
                .size(font::NORMAL),
        ]
        .spacing(spacing::SM)
        .align_y(Vertical::Center),
        row![
            text("Identification").size(font::NORMAL).width(Length::Fixed(120.0)),
            candidates.size(font::NORMAL).width(Length::Fill),
            button(text("Browse").size(font::SM))
                .on_press(Message::BrowseIdentifications)
                .padding([spacing::XS, spacing::SM]),
        ]
        .spacing(spacing::SM)
        .align_y(Vertical::Center),
        text("One file for one selected entry is attached as is. Otherwise files are matched by name.")
            .size(font::SM)
            .color(colors::TEXT_SECONDARY),
        row![
            horizontal_space(),
            button(text("Cancel").size(font::NORMAL))
                .on_press(Message::EditCancelled)
                .style(button::secondary)
                .padding([spacing::XS, spacing::LG]),
            button(text("OK").size(font::NORMAL))
                .on_press(Message::EditConfirmed)
                .padding([spacing::XS, spacing::LG]),
        ]
        .spacing(spacing::SM),
    ]
    .spacing(spacing::MD);

    container(content)
        .width(Length::Fixed(620.0))
        .padding(spacing::LG)
        .style(container::rounded_box)
        .into()
}
