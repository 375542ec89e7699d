//! UI Components
//!
//! Views and the reusable Leptos components they are built from.

mod dashboard;
mod feedback;
mod form_field;
mod modal;
mod project_card;
mod project_detail;
mod project_form;
mod task_board;
mod task_card;
mod task_column;
mod task_form;

pub use dashboard::Dashboard;
pub use feedback::{ErrorBanner, ErrorPage, LoadingSkeleton, ProgressBar};
pub use form_field::{SelectField, TextAreaField, TextField};
pub use modal::Modal;
pub use project_card::{ProjectCard, StatusBadge};
pub use project_detail::ProjectDetail;
pub use project_form::ProjectFormModal;
pub use task_board::{BoardActions, TaskBoard};
pub use task_card::TaskCard;
pub use task_column::TaskColumn;
pub use task_form::TaskFormModal;
