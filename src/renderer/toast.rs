// SPDX-License-Identifier: GPL-3.0-only

//! Toast notification rendering.

use cosmic::Element;
use cosmic::Theme;
use cosmic::iced::{Border, Color, Length, Padding, Shadow, alignment};
use cosmic::widget::{self, container};

use crate::renderer::message::RendererMessage;
use crate::renderer::state::{Toast, ToastQueue};
use crate::renderer::theme::{toast_background_color, toast_text_color};

/// Default height for the toast display area in pixels.
pub const TOAST_HEIGHT: f32 = 40.0;

const TOAST_PADDING_HORIZONTAL: f32 = 16.0;
const TOAST_PADDING_VERTICAL: f32 = 8.0;
const TOAST_BORDER_RADIUS: f32 = 8.0;

/// Renders a toast. Clicking it dismisses it.
pub fn render_toast<'a>(toast: &Toast, theme: &Theme) -> Element<'a, RendererMessage> {
    let bg_color = toast_background_color(theme);
    let text_color = toast_text_color(theme, toast.severity);

    let message_text = widget::text::body(toast.message.clone())
        .width(Length::Shrink)
        .height(Length::Shrink);

    let toast_container = container(message_text)
        .width(Length::Shrink)
        .height(Length::Fixed(TOAST_HEIGHT))
        .padding(
            Padding::new(TOAST_PADDING_VERTICAL)
                .left(TOAST_PADDING_HORIZONTAL)
                .right(TOAST_PADDING_HORIZONTAL),
        )
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .class(cosmic::style::Container::custom(move |_theme| container::Style {
            background: Some(cosmic::iced::Background::Color(bg_color)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: TOAST_BORDER_RADIUS.into(),
            },
            icon_color: None,
            text_color: Some(text_color),
            shadow: Shadow::default(),
        }));

    let dismiss = widget::button::custom(toast_container)
        .padding(0)
        .class(cosmic::style::Button::Text)
        .on_press(RendererMessage::DismissToast);

    container(dismiss)
        .width(Length::Fill)
        .height(Length::Fixed(TOAST_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

/// Stacks `content` over the toast area. The area collapses when no toast
/// is shown.
pub fn with_toast<'a, Message: 'a>(
    content: Element<'a, Message>,
    toast: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    match toast {
        Some(toast_element) => widget::column::column()
            .push(container(content).width(Length::Fill).height(Length::Fill))
            .push(toast_element)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    }
}

/// Renders the toast currently on screen, if any.
pub fn render_current_toast<'a>(
    toasts: &ToastQueue,
    theme: &Theme,
) -> Option<Element<'a, RendererMessage>> {
    toasts.current().map(|toast| render_toast(toast, theme))
}
