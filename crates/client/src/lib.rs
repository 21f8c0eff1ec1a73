//! # roster-client
//!
//! Keeps a local copy of the student roster in sync with a roster server and
//! derives the filtered, collated view the user works with.

pub mod api_client;
pub mod cache;
pub mod collation;
pub mod form;
pub mod state;
pub mod sync;
pub mod ui;
pub mod view;

pub use api_client::{ApiClient, ApiError, StudentApi};
pub use collation::{collator_for, default_collator, Collator};
pub use form::{EditSession, FormError, FormFields, FormRules};
pub use state::{begin_submit, reduce, Action, ClientState, Notice, SubmitRequest};
pub use sync::Synchronizer;
pub use view::{SortDirection, ViewFilter, ViewSummary};
