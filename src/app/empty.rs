use crate::app::field::FieldSpec;
use crate::app::SushiApp;

/// Shown when the session's application id has no sidebar
pub struct EmptyApp;

impl SushiApp for EmptyApp {
    fn title(&self) -> &'static str {
        "Unknown application"
    }

    fn class_name(&self) -> &'static str {
        ""
    }

    fn description(&self) -> &'static str {
        "No Sushi application is registered for this environment and application id."
    }

    fn is_runnable(&self) -> bool {
        false
    }

    fn has_alerts(&self) -> bool {
        false
    }

    fn fields(&self) -> Vec<FieldSpec> {
        Vec::new()
    }
}
