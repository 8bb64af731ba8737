//! Input files tab: the raw file table and its actions.

use iced::alignment::Vertical;
use iced::widget::{
    button, checkbox, column, container, horizontal_space, row, scrollable, text, Column,
};
use iced::{Element, Length};

use pqg_core::project::InputFile;

use crate::app::{App, Message};
use crate::handlers::display_name;
use crate::theme::{colors, font, spacing};

pub fn view(app: &App) -> Element<Message> {
    if !app.session.is_open() {
        return placeholder("Create or open a project to add input files.");
    }

    let editable = app.can_edit();
    let has_selection = !app.selected_files.is_empty();
    let has_files = !app.session.input_files().is_empty();

    let toolbar = row![
        toolbar_button("Add", editable.then_some(Message::AddFiles)),
        toolbar_button(
            "Edit",
            (editable && has_selection).then_some(Message::EditFiles)
        ),
        toolbar_button(
            "Remove",
            (editable && has_selection).then_some(Message::RemoveFiles)
        ),
        toolbar_button(
            "Remove All",
            (editable && has_files).then_some(Message::RemoveAllFiles)
        ),
        horizontal_space(),
        text(format!(
            "{} file(s), {} selected",
            app.session.input_files().len(),
            app.selected_files.len()
        ))
        .size(font::SM)
        .color(colors::TEXT_SECONDARY),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center);

    let table: Element<Message> = if has_files {
        let rows = app
            .session
            .input_files()
            .iter()
            .enumerate()
            .map(|(index, file)| {
                file_row(
                    index,
                    file,
                    app.selected_files.contains(&index),
                    editable,
                )
            });

        scrollable(Column::with_children(rows).spacing(spacing::XS))
            .height(Length::Fill)
            .into()
    } else {
        placeholder("Add .mzML or .mzXML files, or drop them onto the window.")
    };

    column![toolbar, header_row(), table]
        .spacing(spacing::SM)
        .padding([spacing::MD, 0])
        .into()
}

fn toolbar_button(label: &str, message: Option<Message>) -> Element<Message> {
    button(text(label).size(font::NORMAL))
        .on_press_maybe(message)
        .padding([spacing::XS, spacing::LG])
        .into()
}

fn header_row<'a>() -> Element<'a, Message> {
    row![
        horizontal_space().width(Length::Fixed(24.0)),
        text("Raw file").size(font::SM).width(Length::FillPortion(4)),
        text("Identification").size(font::SM).width(Length::FillPortion(3)),
        text("Group").size(font::SM).width(Length::FillPortion(1)),
        text("Reference").size(font::SM).width(Length::Fixed(72.0)),
    ]
    .spacing(spacing::SM)
    .into()
}

fn file_row(index: usize, file: &InputFile, selected: bool, editable: bool) -> Element<Message> {
    let select = checkbox("", selected)
        .on_toggle(move |value| Message::FileSelectionToggled(index, value));

    let reference = checkbox("", file.reference);
    let reference = if editable {
        reference.on_toggle(move |value| Message::ReferenceToggled(index, value))
    } else {
        reference
    };

    let ident = match &file.ident_path {
        Some(path) => text(display_name(path)),
        None => text("-").color(colors::TEXT_SECONDARY),
    };

    let cells = row![
        container(select).width(Length::Fixed(24.0)),
        text(file.raw_path.display().to_string())
            .size(font::NORMAL)
            .width(Length::FillPortion(4)),
        ident.size(font::NORMAL).width(Length::FillPortion(3)),
        text(file.group.as_deref().unwrap_or("-"))
            .size(font::NORMAL)
            .width(Length::FillPortion(1)),
        container(reference).width(Length::Fixed(72.0)),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center);

    container(cells).padding([spacing::XS, 0]).into()
}

fn placeholder<'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).size(font::NORMAL).color(colors::TEXT_SECONDARY))
        .center_x(Length::Fill)
        .padding(spacing::XL)
        .into()
}
