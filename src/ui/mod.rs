/// User interface module
///
/// - `elements.rs` - text elements, gallery tiles and modal thumbnails
/// - `gallery.rs` - the portfolio display surface
/// - `filters.rs` - category filter bar
/// - `auth.rs` - session-dependent chrome (admin bar, edit button, login link)
/// - `modal.rs` - edit modal overlay and its two panels
/// - `pages.rs` - landing and login page layouts

pub mod auth;
pub mod elements;
pub mod filters;
pub mod gallery;
pub mod modal;
pub mod pages;
