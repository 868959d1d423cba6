pub mod date;
pub mod dropdown;
pub mod orchestrator;
pub mod plan;
pub mod text;

pub use dropdown::fill_dropdown;
pub use orchestrator::Orchestrator;
pub use plan::{DropdownFill, FieldFill, FillPlan};
pub use text::fill_question;

/// What one fill attempt did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Value written / option clicked.
    Filled,
    /// The control already carried the target value; nothing was dispatched.
    AlreadySet,
    /// No target value configured; the fill was suppressed.
    Skipped,
    /// Question, control, or option did not resolve (yet).
    NotFound,
}
