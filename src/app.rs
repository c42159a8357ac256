use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError, JsonResponse};
use crate::config::Config;
use crate::media::preview::{load_preview, Preview};
use crate::media::ImageStore;
use crate::state::data::{distinct_categories, Category, LoginResponse, Session, Work, WorkId};
use crate::state::form::{LoginForm, LOGIN_ERROR};
use crate::state::modal::Modal;
use crate::state::session::SessionStore;
use crate::ui::auth::{logout, sync_auth_ui, AuthUi, LoginControl};
use crate::ui::filters::{CategoryFilter, FilterBar};
use crate::ui::gallery::Gallery;
use crate::ui::{modal, pages};
use crate::workflows::{apply_creation, apply_deletion, Surfaces};

pub const TITLE: &str = "Portfolio";

/// Shown when the upload is refused or the backend cannot be reached
const UPLOAD_ERROR: &str = "Une erreur est survenue lors de l'ajout du projet";
const LOAD_ERROR: &str = "Impossible de charger les projets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
}

/// Main application state
pub struct Portfolio {
    config: Config,
    api: ApiClient,
    /// Local key/value storage holding the session
    store: SessionStore,
    page: Page,
    /// Works as fetched at load, patched by edits
    works: Vec<Work>,
    /// Choices of the add form, derived from the works
    categories: Vec<Category>,
    gallery: Gallery,
    filters: FilterBar,
    auth: AuthUi,
    modal: Modal,
    images: ImageStore,
    login: LoginForm,
    /// Status line under the filters (load failures)
    status: Option<String>,
    /// Bumped on every successful upload; tags its success timer
    upload_generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Page navigation
    NavigateHome,
    LoginControlPressed,

    /// Loading
    WorksLoaded(Result<Vec<Work>, ApiError>),
    ImageLoaded(String, Result<Vec<u8>, ApiError>),
    FilterSelected(CategoryFilter),

    /// Login page
    EmailChanged(String),
    PasswordChanged(String),
    LoginSubmitted,
    LoginFinished(Result<JsonResponse, ApiError>),

    /// Modal
    OpenModal,
    CloseModal,
    ShowAddForm,
    BackToList,

    /// Deleting a work from the modal grid
    DeleteRequested(WorkId),
    WorkDeleted(WorkId, Result<(), ApiError>),

    /// Add-photo form
    PickImage,
    PreviewLoaded(PathBuf, Result<Preview, String>),
    TitleChanged(String),
    CategorySelected(Category),
    SubmitWork,
    WorkCreated(Result<Work, ApiError>),
    /// The success delay of the given upload ran out
    SuccessElapsed(u64),
}

impl Portfolio {
    /// Create a new instance of the application and start loading the works
    pub fn new(config: Config, store: SessionStore) -> (Self, Task<Message>) {
        let api = ApiClient::new(config.api_base_url.clone());

        let mut app = Portfolio {
            config,
            api,
            store,
            page: Page::Home,
            works: Vec::new(),
            categories: Vec::new(),
            gallery: Gallery::default(),
            filters: FilterBar::default(),
            auth: AuthUi::default(),
            modal: Modal::default(),
            images: ImageStore::default(),
            login: LoginForm::default(),
            status: None,
            upload_generation: 0,
        };

        info!("🎨 {} starting against {}", TITLE, app.config.api_base_url);
        let task = app.load_landing_page();
        (app, task)
    }

    /// Bring up the landing page from scratch, as a page load would:
    /// fresh state, session checked once, works fetched again.
    fn load_landing_page(&mut self) -> Task<Message> {
        self.page = Page::Home;
        self.works.clear();
        self.categories.clear();
        self.gallery = Gallery::default();
        self.filters = FilterBar::default();
        self.modal = Modal::default();
        self.login = LoginForm::default();
        self.status = None;

        let session = self.session();
        if let Some(user_id) = session.as_ref().and_then(|s| s.user_id.as_deref()) {
            info!(user_id, "session found");
        }
        self.auth = sync_auth_ui(session.as_ref().map(|s| s.token.as_str()));

        let api = self.api.clone();
        Task::perform(async move { api.fetch_works().await }, Message::WorksLoaded)
    }

    /// The stored session. A storage failure reads as logged out.
    fn session(&self) -> Option<Session> {
        self.store.session().unwrap_or_else(|e| {
            error!("could not read session: {}", e);
            None
        })
    }

    /// Bearer token for authenticated calls, read at call time
    fn token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    fn surfaces(&mut self) -> Surfaces<'_> {
        Surfaces {
            works: &mut self.works,
            gallery: &mut self.gallery,
            modal: &mut self.modal,
            filters: &mut self.filters,
        }
    }

    /// Download every picture not already decoded
    fn load_images<'a>(&self, urls: impl IntoIterator<Item = &'a str>) -> Task<Message> {
        let mut tasks = Vec::new();
        for url in urls {
            if self.images.contains(url) {
                continue;
            }
            let api = self.api.clone();
            let url = url.to_string();
            let target = url.clone();
            tasks.push(Task::perform(
                async move { api.fetch_image(&target).await },
                move |result| Message::ImageLoaded(url.clone(), result),
            ));
        }
        Task::batch(tasks)
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NavigateHome => self.load_landing_page(),
            Message::LoginControlPressed => match self.auth.login_control {
                LoginControl::Login => {
                    self.page = Page::Login;
                    Task::none()
                }
                LoginControl::Logout => {
                    if let Err(e) = logout(&self.store) {
                        error!("logout failed: {}", e);
                    }
                    self.load_landing_page()
                }
            },

            Message::WorksLoaded(Ok(works)) => {
                self.gallery.render(&works);
                self.filters.build(&works);
                self.categories = distinct_categories(&works);
                self.works = works;

                let urls: Vec<String> = self.works.iter().map(|w| w.image_url.clone()).collect();
                self.load_images(urls.iter().map(String::as_str))
            }
            Message::WorksLoaded(Err(e)) => {
                error!("could not load works: {}", e);
                self.status = Some(LOAD_ERROR.to_string());
                Task::none()
            }
            Message::ImageLoaded(url, Ok(bytes)) => {
                self.images.insert(url, bytes);
                Task::none()
            }
            Message::ImageLoaded(url, Err(e)) => {
                warn!("could not load picture {}: {}", url, e);
                Task::none()
            }
            Message::FilterSelected(filter) => {
                self.filters.select(filter, &self.works, &mut self.gallery);
                Task::none()
            }

            Message::EmailChanged(email) => {
                self.login.email = email;
                Task::none()
            }
            Message::PasswordChanged(password) => {
                self.login.password = password;
                Task::none()
            }
            Message::LoginSubmitted => {
                if self.login.submitting {
                    return Task::none();
                }
                self.login.submitting = true;
                self.login.error = None;

                let api = self.api.clone();
                let credentials = self.login.credentials();
                Task::perform(
                    async move { api.login(&credentials).await },
                    Message::LoginFinished,
                )
            }
            Message::LoginFinished(result) => {
                self.login.submitting = false;
                match result.map(accepted_login) {
                    Ok(Some(login)) => match self.store.save_session(login.user_id, &login.token) {
                        Ok(()) => {
                            info!(user_id = login.user_id, "user logged in");
                            return self.load_landing_page();
                        }
                        Err(e) => error!("could not store session: {}", e),
                    },
                    Ok(None) => info!("login refused"),
                    Err(e) => warn!("login request failed: {}", e),
                }
                self.login.error = Some(LOGIN_ERROR.to_string());
                Task::none()
            }

            Message::OpenModal => {
                self.modal.open(self.gallery.tiles());
                Task::none()
            }
            Message::CloseModal => {
                // Closing during the success delay ends that upload now
                if self.modal.form.success {
                    self.modal.finish_upload();
                } else {
                    self.modal.close();
                }
                Task::none()
            }
            Message::ShowAddForm => {
                self.modal.show_add_form();
                Task::none()
            }
            Message::BackToList => {
                self.modal.back_to_list();
                Task::none()
            }

            Message::DeleteRequested(id) => {
                let Some(token) = self.token() else {
                    warn!(id, "delete requested without a session");
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { api.delete_work(&token, id).await },
                    move |result| Message::WorkDeleted(id, result),
                )
            }
            Message::WorkDeleted(id, Ok(())) => {
                apply_deletion(id, self.surfaces());
                Task::none()
            }
            Message::WorkDeleted(id, Err(e)) => {
                // Both copies stay as they were
                warn!(id, "delete failed: {}", e);
                Task::none()
            }

            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Choisir une photo")
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file();

                if let Some(path) = file {
                    self.modal.form.image_path = Some(path.clone());
                    self.modal.form.preview = None;
                    return Task::perform(load_preview(path.clone()), move |result| {
                        Message::PreviewLoaded(path.clone(), result)
                    });
                }
                Task::none()
            }
            Message::PreviewLoaded(path, result) => {
                // Ignore previews of a file the user has since replaced
                if self.modal.form.image_path.as_ref() != Some(&path) {
                    return Task::none();
                }
                match result {
                    Ok(preview) => self.modal.form.preview = Some(preview),
                    Err(e) => warn!("no preview for {}: {}", path.display(), e),
                }
                Task::none()
            }
            Message::TitleChanged(title) => {
                self.modal.form.title = title;
                Task::none()
            }
            Message::CategorySelected(category) => {
                self.modal.form.category = Some(category);
                Task::none()
            }
            Message::SubmitWork => {
                if !self.modal.form.can_submit() {
                    return Task::none();
                }
                let new_work = match self.modal.form.validate() {
                    Ok(new_work) => new_work,
                    Err(e) => {
                        self.modal.form.error = Some(e.to_string());
                        return Task::none();
                    }
                };
                let Some(token) = self.token() else {
                    warn!("upload requested without a session");
                    self.modal.form.error = Some(UPLOAD_ERROR.to_string());
                    return Task::none();
                };

                self.modal.form.error = None;
                self.modal.form.submitting = true;
                let api = self.api.clone();
                Task::perform(
                    async move { api.create_work(&token, &new_work).await },
                    Message::WorkCreated,
                )
            }
            Message::WorkCreated(Ok(work)) => {
                self.modal.form.submitting = false;
                self.modal.form.error = None;
                self.modal.form.success = true;

                let url = work.image_url.clone();
                apply_creation(work, self.surfaces());
                self.categories = distinct_categories(&self.works);

                self.upload_generation += 1;
                let generation = self.upload_generation;
                let delay = self.config.success_delay;
                Task::batch([
                    self.load_images([url.as_str()]),
                    Task::perform(
                        async move { tokio::time::sleep(delay).await },
                        move |_| Message::SuccessElapsed(generation),
                    ),
                ])
            }
            Message::WorkCreated(Err(e)) => {
                error!("upload failed: {}", e);
                self.modal.form.submitting = false;
                self.modal.form.error = Some(UPLOAD_ERROR.to_string());
                Task::none()
            }
            Message::SuccessElapsed(generation) => {
                // A timer outliving its upload must not touch a newer form
                if generation != self.upload_generation || !self.modal.form.success {
                    debug!(generation, "stale success timer ignored");
                    return Task::none();
                }
                self.modal.finish_upload();
                Task::none()
            }
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let page = match self.page {
            Page::Home => pages::home(
                &self.auth,
                &self.filters,
                &self.gallery,
                &self.images,
                self.status.as_deref(),
            ),
            Page::Login => pages::login(&self.auth, &self.login),
        };

        match modal::view(&self.modal, &self.categories, &self.images) {
            Some(panel) => modal::overlay(page, panel, Message::CloseModal),
            None => page,
        }
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// The login payload, when the backend accepted the credentials (status 200)
fn accepted_login(response: JsonResponse) -> Option<LoginResponse> {
    if response.status != 200 {
        return None;
    }
    serde_json::from_value(response.data)
        .map_err(|e| warn!("unexpected login payload: {}", e))
        .ok()
}
