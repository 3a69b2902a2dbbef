//! Orçamentos Core
//!
//! Target-independent half of the admin UI:
//! - domain: records exchanged with the REST API
//! - editor: the nested budget editor (tools → parts → operation usages)
//! - forms / masks / validation: single-level entity forms and field masks
//! - selection / session / list: view-state machines without any DOM
//! - api: HTTP client, repository seam and auth session

pub mod api;
pub mod domain;
pub mod editor;
pub mod forms;
pub mod list;
pub mod masks;
pub mod selection;
pub mod session;
pub mod validation;

pub use api::{ApiClient, ApiConfig, ApiError, ApiResult, AuthSession, Repository};
pub use domain::{Budget, Client, Entity, Material, RecordId, Resource};
pub use editor::{BudgetDraft, FieldPath};
pub use forms::RecordForm;
pub use session::{Capabilities, EditSession};
pub use validation::ValidationErrors;
