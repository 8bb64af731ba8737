//! Parameters tab, rendered from the field registry.

use iced::alignment::Vertical;
use iced::widget::{
    checkbox, column, container, pick_list, row, scrollable, text, text_input, tooltip, Column,
};
use iced::{Element, Length};

use pqg_core::parameters::{FieldKind, FieldSpec, FieldValue, ParameterGroup};

use crate::app::{App, Message};
use crate::theme::{colors, font, spacing};

const LABEL_WIDTH: f32 = 300.0;
const EDITOR_WIDTH: f32 = 220.0;

pub fn view(app: &App) -> Element<Message> {
    if !app.session.is_open() {
        return container(
            text("Create or open a project to edit parameters.")
                .size(font::NORMAL)
                .color(colors::TEXT_SECONDARY),
        )
        .center_x(Length::Fill)
        .padding(spacing::XL)
        .into();
    }

    let sections = ParameterGroup::ALL
        .into_iter()
        .map(|group| group_section(app, group));

    scrollable(
        Column::with_children(sections)
            .spacing(spacing::LG)
            .padding([spacing::MD, spacing::LG]),
    )
    .height(Length::Fill)
    .into()
}

fn group_section(app: &App, group: ParameterGroup) -> Element<Message> {
    let rows = group.fields().map(|spec| field_row(app, spec));

    column![
        text(group.label()).size(font::LG),
        Column::with_children(rows).spacing(spacing::XS),
    ]
    .spacing(spacing::SM)
    .into()
}

fn field_row<'a>(app: &'a App, spec: &'static FieldSpec) -> Element<'a, Message> {
    let label = tooltip(
        text(spec.label)
            .size(font::NORMAL)
            .width(Length::Fixed(LABEL_WIDTH)),
        container(text(spec.tooltip).size(font::SM))
            .padding(spacing::SM)
            .max_width(420)
            .style(container::rounded_box),
        tooltip::Position::Bottom,
    );

    let mut line = row![label, editor(app, spec)]
        .spacing(spacing::MD)
        .align_y(Vertical::Center);

    if let Some(error) = app.field_errors.get(spec.key) {
        line = line.push(text(error).size(font::SM).color(colors::ERROR));
    }

    line.into()
}

fn editor<'a>(app: &'a App, spec: &'static FieldSpec) -> Element<'a, Message> {
    let key = spec.key;
    let editable = app.can_edit();
    let current = app.session.parameters().field(key);

    match spec.kind {
        FieldKind::Integer { .. } | FieldKind::Float { .. } => {
            let input = text_input("", &app.field_text(key))
                .size(font::NORMAL)
                .width(Length::Fixed(EDITOR_WIDTH));
            let input = if editable {
                input.on_input(move |value| Message::FieldTextChanged(key, value))
            } else {
                input
            };
            input.into()
        }
        FieldKind::Toggle => {
            let checked = matches!(current, Ok(FieldValue::Toggle(true)));
            let toggle = checkbox("", checked);
            let toggle = if editable {
                toggle.on_toggle(move |value| Message::FieldToggled(key, value))
            } else {
                toggle
            };
            toggle.into()
        }
        FieldKind::Choice(values) => {
            let selected = match &current {
                Ok(FieldValue::Choice(value)) => values.iter().copied().find(|v| v == value),
                _ => None,
            };
            pick_list(values, selected, move |value: &'static str| {
                Message::FieldChoiceSelected(key, value.to_string())
            })
            .text_size(font::NORMAL)
            .width(Length::Fixed(EDITOR_WIDTH))
            .into()
        }
    }
}
