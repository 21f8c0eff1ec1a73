//! # Synchronizer
//!
//! Couples a `StudentApi` with the pure state machine in `state`. Each async
//! operation dispatches a request-side action, awaits the server, and then
//! dispatches the response as another action. The cache only ever changes in
//! response to a confirmed server result.

use crate::{
    api_client::StudentApi,
    collation::Collator,
    form::FormRules,
    state::{reduce, Action, ClientState, SubmitRequest},
    view::{derive_view, summarize, ViewSummary},
};
use roster::Student;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Synchronizer<A: StudentApi> {
    api: A,
    collator: Arc<dyn Collator>,
    state: ClientState,
}

impl<A: StudentApi> Synchronizer<A> {
    pub fn new(api: A, collator: Arc<dyn Collator>, rules: FormRules) -> Self {
        Self {
            api,
            collator,
            state: ClientState::new(rules),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn view(&self) -> Vec<&Student> {
        derive_view(&self.state.cache, &self.state.filter, self.collator.as_ref())
    }

    pub fn summary(&self) -> ViewSummary {
        summarize(&self.state.cache, &self.state.filter, self.view().len())
    }

    /// Initial load. A failure leaves an empty cache.
    pub async fn load(&mut self) {
        self.dispatch(Action::LoadStarted);
        let action = match self.api.list(None).await {
            Ok(listing) => Action::LoadSucceeded(listing),
            Err(e) => {
                warn!("Initial load failed: {}", e);
                Action::LoadFailed(e)
            }
        };
        self.dispatch(action);
    }

    /// Manual reload. A failure keeps the previous cache.
    pub async fn reload(&mut self) {
        self.dispatch(Action::LoadStarted);
        let action = match self.api.list(None).await {
            Ok(listing) => Action::LoadSucceeded(listing),
            Err(e) => {
                warn!("Reload failed: {}", e);
                Action::ReloadFailed(e)
            }
        };
        self.dispatch(action);
    }

    /// Validates the form and marks a submit as in flight.
    ///
    /// The caller sends the returned request (see `execute`) and hands the
    /// outcome to `dispatch`; the state accepts other actions in between.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        let (state, request) = crate::state::begin_submit(std::mem::take(&mut self.state));
        self.state = state;
        request
    }

    /// Validates and sends the form. Returns the saved student on success.
    pub async fn submit(&mut self) -> Option<Student> {
        let request = self.begin_submit()?;
        let action = execute(&self.api, request).await;
        let saved = match &action {
            Action::Created(s) | Action::Updated(s) => Some(s.clone()),
            _ => None,
        };
        self.dispatch(action);
        saved
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(deleted) => {
                self.dispatch(Action::Deleted(deleted));
                true
            }
            Err(e) => {
                warn!("Delete of {} failed: {}", id, e);
                self.dispatch(Action::DeleteFailed {
                    id: id.to_string(),
                    error: e,
                });
                false
            }
        }
    }
}

/// Sends a submit request and turns the outcome into the matching response action.
pub async fn execute<A: StudentApi + ?Sized>(api: &A, request: SubmitRequest) -> Action {
    match request {
        SubmitRequest::Create(fields) => match api.create(&fields).await {
            Ok(student) => Action::Created(student),
            Err(error) => Action::SubmitFailed { id: None, error },
        },
        SubmitRequest::Update { id, patch } => {
            let result = api.update(&id, &patch).await;
            match result {
                Ok(student) => Action::Updated(student),
                Err(error) => Action::SubmitFailed {
                    id: Some(id),
                    error,
                },
            }
        }
    }
}
