use iced::widget::{scrollable, text};
use iced::{Element, Length, Pixels};
use iced_aw::Wrap;

use super::elements::{make_work_tile, Tile};
use crate::app::Message;
use crate::media::ImageStore;
use crate::state::data::{Work, WorkId};

/// The display surface holding one tile per shown work
#[derive(Debug, Default)]
pub struct Gallery {
    tiles: Vec<Tile>,
}

impl Gallery {
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Clear the surface, then add one tile per work in input order
    pub fn render(&mut self, works: &[Work]) {
        self.tiles.clear();
        self.tiles.extend(works.iter().map(make_work_tile));
    }

    /// Drop the tile tagged with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: WorkId) -> bool {
        match self.tiles.iter().position(|tile| tile.id == id) {
            Some(index) => {
                self.tiles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Append a tile unless one with the same id is already shown
    pub fn append(&mut self, tile: Tile) -> bool {
        if self.tiles.iter().any(|t| t.id == tile.id) {
            return false;
        }
        self.tiles.push(tile);
        true
    }

    pub fn view<'a>(&'a self, images: &'a ImageStore) -> Element<'a, Message> {
        if self.tiles.is_empty() {
            return text("Aucun projet à afficher").size(16).into();
        }

        let tiles: Vec<Element<'a, Message>> =
            self.tiles.iter().map(|tile| tile.view(images)).collect();

        scrollable(
            Wrap::with_elements(tiles)
                .spacing(Pixels(20.0))
                .line_spacing(Pixels(30.0)),
        )
        .height(Length::Fill)
        .into()
    }
}
