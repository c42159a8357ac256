use iced::widget::{button, row};
use iced::{Element, Length};
use tracing::debug;

use super::elements::{make_text_element, TextElement, TextTag};
use super::gallery::Gallery;
use crate::app::Message;
use crate::state::data::Work;

/// Label of the button that shows every work
pub const ALL_LABEL: &str = "Tous";

/// What a filter button shows when pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    /// Exact category name (no case or whitespace normalization)
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, work: &Work) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => work.category.name == *name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub label: TextElement,
    pub filter: CategoryFilter,
}

#[derive(Debug, Default)]
pub struct FilterBar {
    buttons: Vec<FilterButton>,
    active: Option<CategoryFilter>,
}

impl FilterBar {
    /// "Tous" first, then one button per distinct category name, first-seen order
    pub fn build(&mut self, works: &[Work]) {
        self.buttons.clear();
        self.buttons.push(FilterButton {
            label: make_text_element(TextTag::Button, ALL_LABEL),
            filter: CategoryFilter::All,
        });

        for work in works {
            let name = &work.category.name;
            let seen = self
                .buttons
                .iter()
                .any(|b| b.filter == CategoryFilter::Named(name.clone()));
            if !seen {
                self.buttons.push(FilterButton {
                    label: make_text_element(TextTag::Button, name.clone()),
                    filter: CategoryFilter::Named(name.clone()),
                });
            }
        }

        // A rebuilt bar keeps its selection only if that category survived
        let survived = self
            .active
            .as_ref()
            .map_or(true, |active| self.buttons.iter().any(|b| &b.filter == active));
        if !survived {
            self.active = None;
        }
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.label.text.as_str()).collect()
    }

    pub fn active(&self) -> Option<&CategoryFilter> {
        self.active.as_ref()
    }

    /// Re-render the gallery with the works matching `filter`
    pub fn select(&mut self, filter: CategoryFilter, works: &[Work], gallery: &mut Gallery) {
        let shown: Vec<Work> = works
            .iter()
            .filter(|work| filter.matches(work))
            .cloned()
            .collect();
        debug!(?filter, shown = shown.len(), "filter selected");
        gallery.render(&shown);
        self.active = Some(filter);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let buttons = self.buttons.iter().map(|b| -> Element<'_, Message> {
            let is_active = self.active.as_ref() == Some(&b.filter)
                || (self.active.is_none() && b.filter == CategoryFilter::All);
            button(b.label.view())
                .padding([8, 20])
                .style(if is_active { button::primary } else { button::secondary })
                .on_press(Message::FilterSelected(b.filter.clone()))
                .into()
        });

        row(buttons)
            .spacing(10)
            .width(Length::Shrink)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::{alpha_beta, work};

    fn shown_ids(gallery: &Gallery) -> Vec<i64> {
        gallery.tiles().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_scenario_buttons_and_objets_filter() {
        let works = alpha_beta();
        let mut bar = FilterBar::default();
        let mut gallery = Gallery::default();
        gallery.render(&works);

        bar.build(&works);
        assert_eq!(bar.labels(), vec!["Tous", "Objets", "Photos"]);

        bar.select(CategoryFilter::Named("Objets".to_string()), &works, &mut gallery);
        assert_eq!(shown_ids(&gallery), vec![1]);
    }

    #[test]
    fn test_all_restores_full_list() {
        let works = alpha_beta();
        let mut bar = FilterBar::default();
        let mut gallery = Gallery::default();
        bar.build(&works);

        bar.select(CategoryFilter::Named("Photos".to_string()), &works, &mut gallery);
        assert_eq!(shown_ids(&gallery), vec![2]);

        bar.select(CategoryFilter::All, &works, &mut gallery);
        assert_eq!(shown_ids(&gallery), vec![1, 2]);
        assert_eq!(bar.active(), Some(&CategoryFilter::All));
    }

    #[test]
    fn test_matching_is_exact() {
        let works = vec![
            work(1, "A", 1, "Objets"),
            work(2, "B", 1, "objets"),
            work(3, "C", 1, "Objets "),
        ];
        let mut bar = FilterBar::default();
        let mut gallery = Gallery::default();

        bar.build(&works);
        assert_eq!(bar.labels(), vec!["Tous", "Objets", "objets", "Objets "]);

        bar.select(CategoryFilter::Named("Objets".to_string()), &works, &mut gallery);
        assert_eq!(shown_ids(&gallery), vec![1]);
    }

    #[test]
    fn test_rebuild_is_not_cumulative() {
        let works = alpha_beta();
        let mut bar = FilterBar::default();

        bar.build(&works);
        bar.build(&works);

        assert_eq!(bar.buttons().len(), 3);
    }

    #[test]
    fn test_rebuild_drops_vanished_selection() {
        let works = alpha_beta();
        let mut bar = FilterBar::default();
        let mut gallery = Gallery::default();
        bar.build(&works);
        bar.select(CategoryFilter::Named("Photos".to_string()), &works, &mut gallery);

        bar.build(&works[..1]);

        assert_eq!(bar.active(), None);
    }

    #[test]
    fn test_empty_works_only_has_all() {
        let mut bar = FilterBar::default();
        bar.build(&[]);
        assert_eq!(bar.labels(), vec![ALL_LABEL]);
    }
}
