/// Keeping the copies of a work consistent after an edit
///
/// A displayed work lives in the in-memory list, the gallery and (once the
/// modal has been opened) the modal grid. Nothing syncs them on its own, so
/// each confirmed mutation patches all of them here.
use tracing::debug;

use crate::state::data::{Work, WorkId};
use crate::state::modal::Modal;
use crate::ui::elements::make_work_tile;
use crate::ui::filters::FilterBar;
use crate::ui::gallery::Gallery;

/// What a patch touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Patched {
    pub gallery: bool,
    pub modal: bool,
}

/// Everything a work can appear in
pub struct Surfaces<'a> {
    pub works: &'a mut Vec<Work>,
    pub gallery: &'a mut Gallery,
    pub modal: &'a mut Modal,
    pub filters: &'a mut FilterBar,
}

/// The backend confirmed the deletion of `id`
pub fn apply_deletion(id: WorkId, surfaces: Surfaces<'_>) -> Patched {
    let before = surfaces.works.len();
    surfaces.works.retain(|work| work.id != id);
    if surfaces.works.len() != before {
        surfaces.filters.build(surfaces.works.as_slice());
    }

    let patched = Patched {
        gallery: surfaces.gallery.remove(id),
        modal: surfaces.modal.remove(id),
    };
    debug!(id, ?patched, "deletion applied");
    patched
}

/// The backend returned a freshly created work
pub fn apply_creation(work: Work, surfaces: Surfaces<'_>) -> Patched {
    let tile = make_work_tile(&work);
    let patched = Patched {
        gallery: surfaces.gallery.append(tile.clone()),
        modal: surfaces.modal.append(&tile),
    };

    if !surfaces.works.iter().any(|w| w.id == work.id) {
        surfaces.works.push(work);
        surfaces.filters.build(surfaces.works.as_slice());
    }

    debug!(id = tile.id, ?patched, "creation applied");
    patched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::{alpha_beta, work};

    struct World {
        works: Vec<Work>,
        gallery: Gallery,
        modal: Modal,
        filters: FilterBar,
    }

    impl World {
        fn loaded() -> Self {
            let works = alpha_beta();
            let mut gallery = Gallery::default();
            gallery.render(&works);
            let mut filters = FilterBar::default();
            filters.build(&works);
            let mut modal = Modal::default();
            modal.open(gallery.tiles());
            World { works, gallery, modal, filters }
        }

        fn surfaces(&mut self) -> Surfaces<'_> {
            Surfaces {
                works: &mut self.works,
                gallery: &mut self.gallery,
                modal: &mut self.modal,
                filters: &mut self.filters,
            }
        }

        fn gallery_ids(&self) -> Vec<WorkId> {
            self.gallery.tiles().iter().map(|t| t.id).collect()
        }

        fn modal_ids(&self) -> Vec<WorkId> {
            self.modal.thumbnails().iter().map(|t| t.id).collect()
        }
    }

    #[test]
    fn test_delete_removes_from_both_surfaces() {
        let mut world = World::loaded();

        let patched = apply_deletion(1, world.surfaces());

        assert_eq!(patched, Patched { gallery: true, modal: true });
        assert_eq!(world.gallery_ids(), vec![2]);
        assert_eq!(world.modal_ids(), vec![2]);
        assert_eq!(world.filters.labels(), vec!["Tous", "Photos"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut world = World::loaded();

        let patched = apply_deletion(42, world.surfaces());

        assert_eq!(patched, Patched::default());
        assert_eq!(world.gallery_ids(), vec![1, 2]);
        assert_eq!(world.modal_ids(), vec![1, 2]);
        assert_eq!(world.works.len(), 2);
    }

    #[test]
    fn test_create_appears_once_everywhere() {
        let mut world = World::loaded();
        let gamma = work(3, "Gamma", 3, "Hotels");

        apply_creation(gamma.clone(), world.surfaces());
        let again = apply_creation(gamma, world.surfaces());

        assert_eq!(again, Patched::default());
        assert_eq!(world.gallery_ids(), vec![1, 2, 3]);
        assert_eq!(world.modal_ids(), vec![1, 2, 3]);
        assert_eq!(world.works.len(), 3);
        assert_eq!(world.filters.labels(), vec!["Tous", "Objets", "Photos", "Hotels"]);
    }
}
