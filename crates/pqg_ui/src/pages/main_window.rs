//! The main window.
//!
//! Header with project actions, the tab bar, the active tab and a status
//! bar. Panels and dialogs are stacked on top as modals.

use iced::alignment::Vertical;
use iced::widget::{
    button, checkbox, column, container, horizontal_rule, horizontal_space, row, text, text_input,
    Row,
};
use iced::{Element, Length, Theme};

use super::{dialogs, edit_files, input_files, modal, parameters, paths, run_log};
use crate::app::{App, Message, Modal, Tab};
use crate::theme::{colors, font, spacing};

/// Whole window, including whichever modal is open.
pub fn view(app: &App) -> Element<Message> {
    let body = match app.tab {
        Tab::InputFiles => input_files::view(app),
        Tab::Parameters => parameters::view(app),
        Tab::Paths => paths::view(app),
    };

    let content = column![
        header_row(app),
        project_row(app),
        horizontal_rule(1),
        tab_bar(app),
        container(body).width(Length::Fill).height(Length::Fill),
        status_bar(app),
    ]
    .spacing(spacing::SM)
    .padding(spacing::LG);

    let mut view: Element<Message> = container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    if let Some(dialog) = &app.edit_dialog {
        view = modal(view, edit_files::view(app, dialog));
    }
    if let Some(run) = app.run.as_ref().filter(|run| !run.hidden) {
        view = modal(view, run_log::view(run));
    }
    match &app.modal {
        Some(Modal::Error(message)) => view = modal(view, dialogs::error(message)),
        Some(Modal::ClosePrompt) => view = modal(view, dialogs::close_prompt()),
        None => {}
    }

    view
}

/// Project actions, appearance toggle and the Run button.
fn header_row(app: &App) -> Element<Message> {
    let editable = app.can_edit();
    let idle = !app.is_running();

    row![
        action_button("New Project", idle.then_some(Message::NewProject)),
        action_button("Open Project", idle.then_some(Message::OpenProject)),
        action_button("Save", editable.then_some(Message::SaveProject)),
        action_button("Save As", editable.then_some(Message::SaveProjectAs)),
        action_button(
            "Reset Parameters",
            (editable && !app.loading_defaults).then_some(Message::ResetParameters)
        ),
        horizontal_space(),
        checkbox("Dark mode", app.config.settings().ui.dark_mode)
            .on_toggle(Message::DarkModeToggled)
            .text_size(font::NORMAL),
        button(text("Run").size(font::LG))
            .on_press_maybe(editable.then_some(Message::RunPipeline))
            .style(button::success)
            .padding([spacing::SM, spacing::XL]),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center)
    .into()
}

fn action_button(label: &str, message: Option<Message>) -> Element<Message> {
    button(text(label).size(font::NORMAL))
        .on_press_maybe(message)
        .padding([spacing::SM, spacing::LG])
        .into()
}

/// Project name and description.
fn project_row(app: &App) -> Element<Message> {
    let project = app.session.project();

    let name = text_input("Project name", &project.project_name).size(font::NORMAL);
    let description =
        text_input("Project description", &project.project_description).size(font::NORMAL);

    let (name, description) = if app.can_edit() {
        (
            name.on_input(Message::ProjectNameChanged),
            description.on_input(Message::ProjectDescriptionChanged),
        )
    } else {
        (name, description)
    };

    row![
        text("Name:").size(font::NORMAL),
        name.width(Length::FillPortion(1)),
        text("Description:").size(font::NORMAL),
        description.width(Length::FillPortion(3)),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center)
    .into()
}

fn tab_bar(app: &App) -> Element<Message> {
    let tabs = Tab::ALL.into_iter().map(|tab| {
        let style: fn(&Theme, button::Status) -> button::Style = if tab == app.tab {
            button::primary
        } else {
            button::secondary
        };
        button(text(tab.label()).size(font::NORMAL))
            .on_press(Message::TabSelected(tab))
            .style(style)
            .padding([spacing::XS, spacing::LG])
            .into()
    });

    Row::with_children(tabs).spacing(spacing::XS).into()
}

/// Project path and unsaved marker.
fn status_bar(app: &App) -> Element<Message> {
    let project = match app.session.path() {
        Some(path) => text(path.display().to_string()).size(font::SM),
        None => text("No project open")
            .size(font::SM)
            .color(colors::TEXT_SECONDARY),
    };

    let mut bar = row![text(&app.status_text).size(font::SM), horizontal_space(), project]
        .spacing(spacing::MD)
        .align_y(Vertical::Center);

    if app.session.is_dirty() {
        bar = bar.push(text("Unsaved changes").size(font::SM).color(colors::WARNING));
    }
    if app.run.as_ref().is_some_and(|run| run.hidden) {
        bar = bar.push(
            button(text("Show run").size(font::SM))
                .on_press(Message::ShowRunPanel)
                .style(button::secondary)
                .padding([2, spacing::SM]),
        );
    }

    bar.into()
}
