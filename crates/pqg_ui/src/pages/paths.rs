//! Paths tab: external tools used to convert `.mgf` identifications.

use iced::alignment::Vertical;
use iced::widget::{button, column, row, text, text_input, Column};
use iced::{Element, Length};

use pqg_core::identification::ToolKind;

use crate::app::{App, Message};
use crate::theme::{colors, font, spacing, status_color};

pub fn view(app: &App) -> Element<Message> {
    let settings = app.config.settings();
    let idle = !app.is_running();

    let rows = ToolKind::ALL
        .into_iter()
        .map(|kind| tool_row(app, kind, idle));

    let programs = column![
        text(format!(
            "Java: {} (-Xmx{})",
            settings.tools.java, settings.tools.java_max_heap
        ))
        .size(font::SM),
        text(format!("Python: {}", settings.tools.python)).size(font::SM),
        text(format!("Config file: {}", app.config.path().display())).size(font::SM),
    ]
    .spacing(spacing::XS);

    column![
        text("Only needed when identification files are in .mgf format.")
            .size(font::NORMAL)
            .color(colors::TEXT_SECONDARY),
        Column::with_children(rows).spacing(spacing::SM),
        programs,
    ]
    .spacing(spacing::LG)
    .padding([spacing::MD, 0])
    .into()
}

fn tool_row(app: &App, kind: ToolKind, enabled: bool) -> Element<Message> {
    let value = app.tool_inputs.get(&kind).map(String::as_str).unwrap_or("");

    let input = text_input("Drop file here or browse...", value)
        .size(font::NORMAL)
        .width(Length::Fill);
    let input = if enabled {
        input.on_input(move |s| Message::ToolPathChanged(kind, s))
    } else {
        input
    };

    let confirmed = app.tools.get(kind).confirmed;
    let status = text(if confirmed { "Confirmed" } else { "Not confirmed" })
        .color(status_color(confirmed));

    row![
        text(kind.label())
            .size(font::NORMAL)
            .width(Length::Fixed(180.0)),
        input,
        button(text("Browse").size(font::SM))
            .on_press_maybe(enabled.then_some(Message::BrowseTool(kind)))
            .padding([spacing::XS, spacing::SM]),
        button(text("Confirm").size(font::SM))
            .on_press_maybe(enabled.then_some(Message::ConfirmTool(kind)))
            .padding([spacing::XS, spacing::SM]),
        status.size(font::SM).width(Length::Fixed(100.0)),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center)
    .into()
}
