/// Form state for the login page and the "add photo" sub-panel
use std::path::PathBuf;
use thiserror::Error;

use super::data::{Category, Credentials, NewWork};
use crate::media::preview::Preview;

/// Shown under the login form when the backend refuses the credentials
pub const LOGIN_ERROR: &str = "Identifiant ou mot de passe incorrect";

/// Client-side validation failures of the add form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Veuillez sélectionner une image")]
    MissingImage,
    #[error("Veuillez saisir un titre")]
    MissingTitle,
    #[error("Veuillez choisir une catégorie")]
    MissingCategory,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// The "add photo" form inside the modal
#[derive(Debug, Clone, Default)]
pub struct AddWorkForm {
    pub image_path: Option<PathBuf>,
    pub preview: Option<Preview>,
    pub title: String,
    pub category: Option<Category>,
    /// Inline error line
    pub error: Option<String>,
    /// Success indicator, cleared after a fixed delay
    pub success: bool,
    /// An upload is in flight
    pub submitting: bool,
}

impl AddWorkForm {
    /// Check that image, title and category are all present.
    /// No size or type checks are made on the picked file.
    pub fn validate(&self) -> Result<NewWork, FormError> {
        let image_path = self
            .image_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(FormError::MissingImage)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let category = self.category.clone().ok_or(FormError::MissingCategory)?;

        Ok(NewWork {
            image_path,
            title: title.to_string(),
            category,
        })
    }

    /// Every required field is filled (drives the submit button's look)
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// No upload in flight and none waiting out its success delay
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.success
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AddWorkForm {
        AddWorkForm {
            image_path: Some(PathBuf::from("/tmp/lamp.png")),
            title: "  Lamp ".to_string(),
            category: Some(Category { id: 1, name: "Objets".to_string() }),
            ..AddWorkForm::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let new_work = filled().validate().unwrap();

        assert_eq!(new_work.title, "Lamp");
        assert_eq!(new_work.category.id, 1);
        assert_eq!(new_work.image_path, PathBuf::from("/tmp/lamp.png"));
    }

    #[test]
    fn test_missing_fields() {
        let mut form = filled();
        form.image_path = None;
        assert_eq!(form.validate(), Err(FormError::MissingImage));

        let mut form = filled();
        form.title = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingTitle));

        let mut form = filled();
        form.category = None;
        assert_eq!(form.validate(), Err(FormError::MissingCategory));
        assert!(!form.is_complete());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled();
        form.success = true;
        form.error = Some("boom".to_string());

        form.reset();

        assert!(form.image_path.is_none());
        assert!(form.title.is_empty());
        assert!(!form.success);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_no_submit_while_in_flight_or_succeeded() {
        let mut form = filled();
        assert!(form.can_submit());

        form.submitting = true;
        assert!(!form.can_submit());

        form.submitting = false;
        form.success = true;
        assert!(!form.can_submit());
    }
}
