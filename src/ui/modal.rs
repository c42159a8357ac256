/// Edit modal views: overlay, gallery list panel and add-photo form panel
use iced::widget::{
    button, center, column, container, horizontal_rule, image, mouse_area, opaque, pick_list,
    row, stack, text, text_input, Space,
};
use iced::{Alignment, Color, Element, Length, Pixels};
use iced_aw::Wrap;

use super::elements::{make_text_element, TextTag};
use crate::app::Message;
use crate::media::ImageStore;
use crate::state::data::Category;
use crate::state::modal::{Modal, Panel};

const PANEL_WIDTH: f32 = 630.0;

/// Lay `content` over `base`; a press on the backdrop sends `on_blur`
pub fn overlay<'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(Color { a: 0.6, ..Color::BLACK }.into()),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// The open modal's panel, or nothing while closed
pub fn view<'a>(
    modal: &'a Modal,
    categories: &'a [Category],
    images: &'a ImageStore,
) -> Option<Element<'a, Message>> {
    let panel = match modal.visible_panel()? {
        Panel::Gallery => list_panel(modal, images),
        Panel::Form => form_panel(modal, categories),
    };

    Some(
        container(panel)
            .width(Length::Fixed(PANEL_WIDTH))
            .padding(30)
            .style(container::rounded_box)
            .into(),
    )
}

fn top_bar<'a>(back: Option<Message>) -> Element<'a, Message> {
    let back: Element<'a, Message> = match back {
        Some(message) => button(text("←").size(20))
            .style(button::text)
            .on_press(message)
            .into(),
        None => Space::with_width(Length::Shrink).into(),
    };

    row![
        back,
        Space::with_width(Length::Fill),
        button(text("✕").size(20))
            .style(button::text)
            .on_press(Message::CloseModal),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn list_panel<'a>(modal: &'a Modal, images: &'a ImageStore) -> Element<'a, Message> {
    let thumbnails: Vec<Element<'a, Message>> = modal
        .thumbnails()
        .iter()
        .map(|thumbnail| thumbnail.view(images))
        .collect();

    column![
        top_bar(None),
        text("Galerie photo").size(26),
        Wrap::with_elements(thumbnails)
            .spacing(Pixels(10.0))
            .line_spacing(Pixels(20.0)),
        horizontal_rule(1),
        button(text("Ajouter une photo"))
            .padding([10, 40])
            .style(button::success)
            .on_press(Message::ShowAddForm),
    ]
    .spacing(24)
    .align_x(Alignment::Center)
    .into()
}

fn form_panel<'a>(modal: &'a Modal, categories: &'a [Category]) -> Element<'a, Message> {
    let form = &modal.form;

    let picker: Element<'a, Message> = match &form.preview {
        // Pressing the preview picks another file
        Some(preview) => mouse_area(image(preview.handle.clone()).height(Length::Fixed(170.0)))
            .on_press(Message::PickImage)
            .into(),
        None => column![
            text("🖼").size(60),
            button(text("+ Ajouter photo"))
                .padding([8, 24])
                .style(button::secondary)
                .on_press(Message::PickImage),
            text("jpg, png : 4mo max").size(12),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
    };

    let picker = container(picker)
        .width(Length::Fill)
        .padding(16)
        .center_x(Length::Fill)
        .style(container::rounded_box);

    let title = text_input("", &form.title)
        .on_input(Message::TitleChanged)
        .padding(10);

    let category = pick_list(categories, form.category.clone(), Message::CategorySelected)
        .width(Length::Fill)
        .padding(10);

    let mut body = column![
        top_bar(Some(Message::BackToList)),
        text("Ajout photo").size(26),
        picker,
        column![text("Titre"), title].spacing(6),
        column![text("Catégorie"), category].spacing(6),
        horizontal_rule(1),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    if let Some(error) = &form.error {
        body = body.push(make_text_element(TextTag::Error, error.clone()).into_element());
    }
    if form.success {
        body = body.push(text("✔ Photo ajoutée").style(text::success));
    }

    let submit = button(text("Valider"))
        .padding([10, 40])
        .style(if form.is_complete() { button::success } else { button::secondary })
        .on_press_maybe(form.can_submit().then_some(Message::SubmitWork));

    body.push(submit).into()
}
