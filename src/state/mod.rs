/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The local key/value session store (session.rs)
/// - Login and add-photo forms (form.rs)
/// - The edit modal state machine (modal.rs)

pub mod data;
pub mod form;
pub mod modal;
pub mod session;
