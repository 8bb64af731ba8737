//! Run panel: pipeline log, progress and the run's buttons.
//!
//! While running the panel can be hidden; the status bar brings it back.

use iced::alignment::Vertical;
use iced::widget::{button, column, container, horizontal_space, progress_bar, row, scrollable, text};
use iced::{Element, Font, Length};

use pqg_core::orchestrator::RunOutcome;

use crate::app::{Message, RunPanel};
use crate::theme::{colors, font, spacing};

pub fn view(run: &RunPanel) -> Element<Message> {
    let status = match &run.outcome {
        Some(RunOutcome::Succeeded) => text(&run.status).color(colors::SUCCESS),
        Some(RunOutcome::Failed(_)) => text(&run.status).color(colors::ERROR),
        _ if run.step.is_empty() => text(&run.status),
        _ => text(format!("{}: {}", run.step, run.status)),
    };

    let log = scrollable(
        container(text(&run.log).font(Font::MONOSPACE).size(font::SM))
            .padding(spacing::SM)
            .width(Length::Fill),
    )
    .anchor_bottom()
    .height(Length::Fixed(380.0));

    let actions = if run.is_finished() {
        row![
            horizontal_space(),
            button(text("OK").size(font::NORMAL))
                .on_press(Message::CloseRunPanel)
                .padding([spacing::XS, spacing::XL]),
        ]
    } else {
        let label = if run.cancel_requested {
            "Cancelling..."
        } else {
            "Cancel"
        };
        row![
            text("Cancel stops the run once the current step returns.")
                .size(font::SM)
                .color(colors::TEXT_SECONDARY),
            horizontal_space(),
            button(text("Hide").size(font::NORMAL))
                .on_press(Message::HideRunPanel)
                .style(button::secondary)
                .padding([spacing::XS, spacing::XL]),
            button(text(label).size(font::NORMAL))
                .on_press_maybe((!run.cancel_requested).then_some(Message::CancelRun))
                .style(button::secondary)
                .padding([spacing::XS, spacing::XL]),
        ]
    };

    let content = column![
        text("PASTAQ: DDA Pipeline (Running)").size(font::HEADER),
        status.size(font::NORMAL),
        progress_bar(0.0..=100.0, run.progress).height(8),
        container(log).style(container::bordered_box),
        actions.spacing(spacing::SM).align_y(Vertical::Center),
    ]
    .spacing(spacing::MD);

    container(content)
        .width(Length::Fixed(820.0))
        .padding(spacing::LG)
        .style(container::rounded_box)
        .into()
}
