//! Terminal rendering of dashboard views

use super::{DashboardState, View};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

/// Page header printed once per session
pub const PAGE_HEADER: &str = "📈 Stock Investment Analysis Tool\n\
    Get AI-powered investment insights for any stock!\n\n\
    ### 💵 Investment Report";

/// Renders views as markdown text, comparisons as two columns
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    width: Option<u16>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the table width instead of detecting the terminal
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Text for a state; idle renders nothing
    pub fn render_state(&self, state: &DashboardState) -> Option<String> {
        match state {
            DashboardState::Idle => None,
            DashboardState::Submitted(view) => Some(self.render(view)),
        }
    }

    pub fn render(&self, view: &View) -> String {
        match view {
            View::Message(message) => message.clone(),
            View::Report(outcome) => outcome.to_markdown(),
            View::Comparison(comparison) => {
                let [left, right, analysis] = comparison.regions();

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .add_row(vec![left, right]);
                if let Some(width) = self.width {
                    table.set_width(width);
                }

                format!("{table}\n\n{analysis}")
            },
        }
    }
}
