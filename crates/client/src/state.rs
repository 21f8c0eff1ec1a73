//! # Client State Machine
//!
//! `ClientState` is everything the client knows: the local cache, the view
//! filter, the edit session with its form, and the status shown to the user.
//! Every user action and every server response is an `Action`, and `reduce`
//! is the only way state changes. Nothing here performs I/O.

use crate::{
    api_client::ApiError,
    cache::Listing,
    form::{validate_form, EditSession, FormError, FormFields, FormRules},
    view::ViewFilter,
};
use roster::{Field, Student, StudentFields, StudentPatch};

/// A message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

pub const LOAD_FAILED_MESSAGE: &str =
    "Could not load the student list. Check that the server is running.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    /// Last-known server state. Changed only by load responses and confirmed mutations.
    pub cache: Vec<Student>,
    pub filter: ViewFilter,
    pub session: EditSession,
    pub form: FormFields,
    pub rules: FormRules,
    pub loading: bool,
    /// Set while a create or update is in flight.
    pub submitting: bool,
    pub load_error: Option<String>,
    pub notice: Option<Notice>,
}

/// A request produced by a successful `begin_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(StudentFields),
    Update { id: String, patch: StudentPatch },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetKeyword(String),
    ToggleSort,
    EditField(Field, String),
    SelectForEdit(String),
    CancelEdit,
    LoadStarted,
    /// Response to the initial load or a manual reload.
    LoadSucceeded(Listing),
    /// The initial load failed: the cache is emptied.
    LoadFailed(ApiError),
    /// A manual reload failed: the previous cache is kept.
    ReloadFailed(ApiError),
    SubmitRejected(FormError),
    Created(Student),
    Updated(Student),
    /// `id` is the update target; creates have none.
    SubmitFailed { id: Option<String>, error: ApiError },
    Deleted(String),
    DeleteFailed { id: String, error: ApiError },
}

impl ClientState {
    pub fn new(rules: FormRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn find(&self, id: &str) -> Option<&Student> {
        self.cache.iter().find(|s| s.id == id)
    }

    fn reset_form(&mut self) {
        self.session = EditSession::Creating;
        self.form = FormFields::default();
    }

    /// Drops a record the server no longer has, along with any edit session on it.
    fn forget(&mut self, id: &str) {
        self.cache.retain(|s| s.id != id);
        if self.session.target() == Some(id) {
            self.reset_form();
        }
    }
}

/// Applies one action and returns the next state.
pub fn reduce(mut state: ClientState, action: Action) -> ClientState {
    match action {
        Action::SetKeyword(keyword) => state.filter.keyword = keyword,
        Action::ToggleSort => state.filter.direction = state.filter.direction.toggled(),
        Action::EditField(field, value) => state.form.set(field, value),
        Action::SelectForEdit(id) => match state.find(&id) {
            Some(student) => {
                state.form = FormFields::from_student(student);
                state.session = EditSession::Editing(id);
                state.notice = Some(Notice::info("Editing student…"));
            }
            None => {
                state.notice = Some(Notice::error("That student is no longer in the list."));
            }
        },
        Action::CancelEdit => {
            state.reset_form();
            state.notice = None;
        }
        Action::LoadStarted => {
            state.loading = true;
            state.load_error = None;
        }
        Action::LoadSucceeded(listing) => {
            state.loading = false;
            state.cache = listing.students;
            if listing.discarded > 0 {
                state.notice = Some(Notice::error(format!(
                    "Ignored {} malformed record(s) from the server.",
                    listing.discarded
                )));
            }
        }
        Action::LoadFailed(_) => {
            state.loading = false;
            state.cache.clear();
            state.load_error = Some(LOAD_FAILED_MESSAGE.to_string());
        }
        Action::ReloadFailed(_) => {
            state.loading = false;
            state.load_error = Some(LOAD_FAILED_MESSAGE.to_string());
        }
        Action::SubmitRejected(err) => {
            state.notice = Some(Notice::error(err.to_string()));
        }
        Action::Created(student) => {
            state.submitting = false;
            state.cache.push(student);
            // The user may have moved on to editing someone while the request ran.
            if state.session == EditSession::Creating {
                state.reset_form();
            }
            state.notice = Some(Notice::info("Student added."));
        }
        Action::Updated(student) => {
            state.submitting = false;
            if state.session.target() == Some(student.id.as_str()) {
                state.reset_form();
            }
            match state.cache.iter_mut().find(|s| s.id == student.id) {
                Some(cached) => *cached = student,
                None => state.cache.push(student),
            }
            state.notice = Some(Notice::info("Student updated."));
        }
        Action::SubmitFailed { id, error } => {
            state.submitting = false;
            if let (Some(id), ApiError::NotFound(_)) = (&id, &error) {
                state.forget(id);
            }
            state.notice = Some(Notice::error(error.user_message()));
        }
        Action::Deleted(id) => {
            state.forget(&id);
            state.notice = Some(Notice::info("Student deleted."));
        }
        Action::DeleteFailed { id, error } => {
            if let ApiError::NotFound(_) = error {
                state.forget(&id);
            }
            state.notice = Some(Notice::error(error.user_message()));
        }
    }
    state
}

/// Starts a submit: validates the form and marks the submit as in flight.
///
/// Returns no request when a submit is already pending or the form is invalid;
/// in the latter case the state carries the field message.
pub fn begin_submit(state: ClientState) -> (ClientState, Option<SubmitRequest>) {
    if state.submitting {
        let mut state = state;
        state.notice = Some(Notice::error("A save is already in progress."));
        return (state, None);
    }

    match validate_form(&state.form, state.rules) {
        Err(err) => (reduce(state, Action::SubmitRejected(err)), None),
        Ok(fields) => {
            let request = match &state.session {
                EditSession::Creating => SubmitRequest::Create(fields),
                EditSession::Editing(id) => SubmitRequest::Update {
                    id: id.clone(),
                    patch: fields.into(),
                },
            };
            let mut state = state;
            state.submitting = true;
            state.notice = None;
            (state, Some(request))
        }
    }
}
