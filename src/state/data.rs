/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a work, assigned by the backend
pub type WorkId = i64;

/// A category a work belongs to (embedded in every work)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A single portfolio item as served by `GET /api/works`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    /// Unique backend ID
    pub id: WorkId,
    /// Absolute URL of the picture
    pub image_url: String,
    pub title: String,
    pub category: Category,
}

/// Body returned by `POST /api/works`
///
/// Some backends echo the full work, others only the `categoryId`,
/// so the embedded category is optional here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWork {
    pub id: WorkId,
    pub image_url: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl CreatedWork {
    /// Turn the creation response into a full work, using the category
    /// the user picked when the backend did not embed one
    pub fn into_work(self, selected: &Category) -> Work {
        Work {
            id: self.id,
            image_url: self.image_url,
            title: self.title,
            category: self.category.unwrap_or_else(|| selected.clone()),
        }
    }
}

/// Credentials posted to `/api/users/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i64,
    pub token: String,
}

/// The authenticated session, mirrored from local storage
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Stringified user id, as stored
    pub user_id: Option<String>,
    /// Opaque bearer token
    pub token: String,
}

/// Everything the multipart upload needs, validated by the add form
#[derive(Debug, Clone, PartialEq)]
pub struct NewWork {
    pub image_path: std::path::PathBuf,
    pub title: String,
    pub category: Category,
}

/// Distinct categories of the given works, in first-seen order.
/// Distinctness is by exact `name`, like the filter bar.
pub fn distinct_categories(works: &[Work]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    for work in works {
        if !categories.iter().any(|c| c.name == work.category.name) {
            categories.push(work.category.clone());
        }
    }
    categories
}
