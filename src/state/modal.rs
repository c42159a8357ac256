/// Edit modal state machine
///
/// Closed -> List on open (the thumbnail grid is rebuilt from the gallery),
/// List -> AddForm on "add photo", AddForm -> List on "back",
/// List | AddForm -> Closed on close. Other transitions are ignored.

use tracing::debug;

use super::data::WorkId;
use super::form::AddWorkForm;
use crate::ui::elements::{Thumbnail, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalView {
    #[default]
    Closed,
    List,
    AddForm,
}

/// The sub-panel shown while the modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Gallery,
    Form,
}

#[derive(Debug, Default)]
pub struct Modal {
    view: ModalView,
    thumbnails: Vec<Thumbnail>,
    pub form: AddWorkForm,
}

impl Modal {
    pub fn view(&self) -> ModalView {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.view != ModalView::Closed
    }

    /// Exactly one panel while open, none while closed
    pub fn visible_panel(&self) -> Option<Panel> {
        match self.view {
            ModalView::Closed => None,
            ModalView::List => Some(Panel::Gallery),
            ModalView::AddForm => Some(Panel::Form),
        }
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    /// Open on the list panel with a grid derived from the current gallery
    pub fn open(&mut self, gallery: &[Tile]) {
        self.thumbnails = gallery.iter().map(Thumbnail::from_tile).collect();
        self.view = ModalView::List;
        debug!(thumbnails = self.thumbnails.len(), "modal opened");
    }

    pub fn close(&mut self) {
        if self.is_open() {
            self.view = ModalView::Closed;
            debug!("modal closed");
        }
    }

    pub fn show_add_form(&mut self) {
        if self.view == ModalView::List {
            self.view = ModalView::AddForm;
        }
    }

    pub fn back_to_list(&mut self) {
        if self.view == ModalView::AddForm {
            self.view = ModalView::List;
        }
    }

    /// Drop the thumbnail tagged with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: WorkId) -> bool {
        match self.thumbnails.iter().position(|t| t.id == id) {
            Some(index) => {
                self.thumbnails.remove(index);
                true
            }
            None => false,
        }
    }

    /// Append a thumbnail unless one with the same id is already there
    pub fn append(&mut self, tile: &Tile) -> bool {
        if self.thumbnails.iter().any(|t| t.id == tile.id) {
            return false;
        }
        self.thumbnails.push(Thumbnail::from_tile(tile));
        true
    }

    /// After a successful upload: clear the form, close, and come back on the list
    pub fn finish_upload(&mut self) {
        self.form.reset();
        self.view = ModalView::Closed;
    }
}
