/// Element factory: plain data records turned into drawable pieces
use iced::widget::{button, column, container, image, text, Space};
use iced::{Alignment, ContentFit, Element, Length};

use crate::app::Message;
use crate::media::ImageStore;
use crate::state::data::{Work, WorkId};

/// Edge of a gallery tile picture
pub const TILE_WIDTH: f32 = 300.0;
const TILE_HEIGHT: f32 = 400.0;
/// Edge of a modal thumbnail
pub const THUMBNAIL_WIDTH: f32 = 76.0;
const THUMBNAIL_HEIGHT: f32 = 102.0;

/// Kinds of textual elements the client draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTag {
    Heading,
    Paragraph,
    Caption,
    Button,
    Error,
}

impl TextTag {
    fn size(self) -> u16 {
        match self {
            TextTag::Heading => 30,
            TextTag::Paragraph | TextTag::Button => 16,
            TextTag::Caption => 14,
            TextTag::Error => 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    pub tag: TextTag,
    pub text: String,
}

/// Create a text element of the given kind
pub fn make_text_element(tag: TextTag, text: impl Into<String>) -> TextElement {
    TextElement {
        tag,
        text: text.into(),
    }
}

impl TextElement {
    pub fn view<'a>(&'a self) -> Element<'a, Message> {
        let label = text(&self.text).size(self.tag.size());
        match self.tag {
            TextTag::Error => label.style(text::danger).into(),
            _ => label.into(),
        }
    }

    /// Same as `view`, for elements built on the fly inside a view
    pub fn into_element<'a>(self) -> Element<'a, Message> {
        let label = text(self.text).size(self.tag.size());
        match self.tag {
            TextTag::Error => label.style(text::danger).into(),
            _ => label.into(),
        }
    }
}

/// A rendered work in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Id of the source work
    pub id: WorkId,
    pub image_url: String,
    pub caption: TextElement,
}

/// Build the gallery tile for a work
pub fn make_work_tile(work: &Work) -> Tile {
    Tile {
        id: work.id,
        image_url: work.image_url.clone(),
        caption: make_text_element(TextTag::Caption, work.title.clone()),
    }
}

impl Tile {
    pub fn view<'a>(&'a self, images: &'a ImageStore) -> Element<'a, Message> {
        column![
            picture(images, &self.image_url, TILE_WIDTH, TILE_HEIGHT),
            self.caption.view(),
        ]
        .spacing(6)
        .width(Length::Fixed(TILE_WIDTH))
        .into()
    }
}

/// A modal grid entry: picture plus delete affordance, tagged with the work id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub id: WorkId,
    pub image_url: String,
}

impl Thumbnail {
    pub fn from_tile(tile: &Tile) -> Self {
        Thumbnail {
            id: tile.id,
            image_url: tile.image_url.clone(),
        }
    }

    pub fn view<'a>(&'a self, images: &'a ImageStore) -> Element<'a, Message> {
        let delete = button(text("🗑").size(12))
            .padding([2, 6])
            .style(button::danger)
            .on_press(Message::DeleteRequested(self.id));

        column![
            picture(images, &self.image_url, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT),
            delete,
        ]
        .spacing(4)
        .align_x(Alignment::End)
        .width(Length::Fixed(THUMBNAIL_WIDTH))
        .into()
    }
}

/// The picture for `url`, or a placeholder box while it loads
fn picture<'a>(images: &'a ImageStore, url: &str, width: f32, height: f32) -> Element<'a, Message> {
    match images.get(url) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fixed(width), Length::Fixed(height)))
            .style(container::rounded_box)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::alpha_beta;

    #[test]
    fn test_make_text_element() {
        let element = make_text_element(TextTag::Button, "Tous");
        assert_eq!(element.tag, TextTag::Button);
        assert_eq!(element.text, "Tous");
    }

    #[test]
    fn test_make_work_tile() {
        let works = alpha_beta();

        let tile = make_work_tile(&works[1]);

        assert_eq!(tile.id, 2);
        assert_eq!(tile.image_url, "b.png");
        assert_eq!(tile.caption, make_text_element(TextTag::Caption, "Beta"));
    }

    #[test]
    fn test_thumbnail_keeps_tile_id() {
        let tile = make_work_tile(&alpha_beta()[0]);
        let thumbnail = Thumbnail::from_tile(&tile);

        assert_eq!(thumbnail.id, tile.id);
        assert_eq!(thumbnail.image_url, tile.image_url);
    }
}
