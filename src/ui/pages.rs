/// Page layouts: the landing page with the portfolio, and the login page
use iced::widget::{button, column, container, row, text, text_input, Column, Space};
use iced::{Alignment, Background, Color, Element, Length};

use super::auth::AuthUi;
use super::elements::{make_text_element, TextTag};
use super::filters::FilterBar;
use super::gallery::Gallery;
use crate::app::{Message, TITLE};
use crate::media::ImageStore;
use crate::state::form::LoginForm;

fn header<'a>(auth: &AuthUi) -> Element<'a, Message> {
    row![
        button(text(TITLE).size(24))
            .style(button::text)
            .on_press(Message::NavigateHome),
        Space::with_width(Length::Fill),
        button(text(auth.login_control.label()))
            .style(button::text)
            .on_press(Message::LoginControlPressed),
    ]
    .align_y(Alignment::Center)
    .padding([20, 40])
    .into()
}

fn admin_bar<'a>() -> Element<'a, Message> {
    container(text("✎ Mode édition").color(Color::WHITE))
        .width(Length::Fill)
        .padding(12)
        .center_x(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color::BLACK)),
            ..container::Style::default()
        })
        .into()
}

pub fn home<'a>(
    auth: &'a AuthUi,
    filters: &'a FilterBar,
    gallery: &'a Gallery,
    images: &'a ImageStore,
    status: Option<&'a str>,
) -> Element<'a, Message> {
    let mut page = Column::new();

    if auth.admin_bar.is_visible() {
        page = page.push(admin_bar());
    }
    page = page.push(header(auth));

    let mut title_row = row![make_text_element(TextTag::Heading, "Mes Projets").into_element()]
        .spacing(20)
        .align_y(Alignment::Center);
    if auth.edit_button.is_some_and(|v| v.is_visible()) {
        title_row = title_row.push(
            button(text("✎ modifier"))
                .style(button::text)
                .on_press(Message::OpenModal),
        );
    }

    let mut portfolio = column![title_row].spacing(30).align_x(Alignment::Center);

    if auth.filter_bar.is_visible() {
        portfolio = portfolio.push(filters.view());
    }
    if let Some(status) = status {
        portfolio = portfolio.push(make_text_element(TextTag::Paragraph, status).into_element());
    }
    portfolio = portfolio.push(gallery.view(images));

    page.push(container(portfolio).padding([20, 40]).height(Length::Fill))
        .into()
}

pub fn login<'a>(auth: &'a AuthUi, form: &'a LoginForm) -> Element<'a, Message> {
    let email = text_input("", &form.email)
        .on_input(Message::EmailChanged)
        .on_submit(Message::LoginSubmitted)
        .padding(12);

    let password = text_input("", &form.password)
        .on_input(Message::PasswordChanged)
        .on_submit(Message::LoginSubmitted)
        .secure(true)
        .padding(12);

    let mut fields = column![
        make_text_element(TextTag::Heading, "Log In").into_element(),
        column![text("E-mail"), email].spacing(8),
        column![text("Mot de passe"), password].spacing(8),
        button(text("Se connecter"))
            .padding([10, 50])
            .style(button::success)
            .on_press_maybe((!form.submitting).then_some(Message::LoginSubmitted)),
    ]
    .spacing(24)
    .width(Length::Fixed(380.0))
    .align_x(Alignment::Center);

    if let Some(error) = &form.error {
        fields = fields.push(make_text_element(TextTag::Error, error.as_str()).into_element());
    }

    column![
        header(auth),
        container(fields)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .padding(40),
    ]
    .into()
}
