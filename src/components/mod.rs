//! UI Components
//!
//! Reusable Leptos components and the screens built from them.

mod budget_editor;
mod budget_page;
mod dashboard;
mod delete_confirm_button;
mod entity_page;
mod log_panel;
mod login_form;
mod nav_bar;
mod notice_banner;
mod record_form_fields;
mod record_modal;
mod selection_field;

pub use budget_editor::{BudgetEditor, BudgetLookups};
pub use budget_page::BudgetPage;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use entity_page::EntityPage;
pub use log_panel::LogPanel;
pub use login_form::LoginForm;
pub use nav_bar::NavBar;
pub use notice_banner::NoticeBanner;
pub use record_form_fields::FormFields;
pub use record_modal::{ModalView, RecordModal};
pub use selection_field::{OptionSource, SelectionField, SharedOptions};
