//! UI events routed into the form controller, and submission outcomes.

/// Key that confirms an interest tag in the text field.
pub const CONFIRM_KEY: &str = "Enter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    BudgetClicked(String),
    /// A key pressed inside the interest text field.
    InterestKey(String),
    ChipRemoveClicked(String),
    Submit,
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::BudgetClicked(_) => "budget_clicked",
            FormEvent::InterestKey(_) => "interest_key",
            FormEvent::ChipRemoveClicked(_) => "chip_remove_clicked",
            FormEvent::Submit => "submit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub accommodations: usize,
    pub days: usize,
    pub activities: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rendered(RenderSummary),
    /// The service answered with an `error` message, shown verbatim.
    ApiError(String),
    /// Transport or decode failure; the generic message was shown.
    Failed,
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered(_))
    }
}
