//! Prompt templates sent to the language model

use crate::error::Result;
use minijinja::{Environment, context};

const EXTRACT_COMPANIES: &str = "extract_companies";
const INVESTMENT_SUGGESTION: &str = "investment_suggestion";
const COMPARE_REPORTS: &str = "compare_reports";

const EXTRACT_COMPANIES_TEMPLATE: &str = "List only the company names mentioned in the following query, separated by commas, without any extra text: {{ query }}.";

const INVESTMENT_SUGGESTION_TEMPLATE: &str =
    "Based on the following stock data: {{ report_data }}, provide an investment suggestion.";

const COMPARE_REPORTS_TEMPLATE: &str = "Compare these two stock reports side by side:\n{{ report1 }}\n\n{{ report2 }}\n\nProvide a comparative investment suggestion.";

/// Compiled prompt templates
pub struct Prompts {
    env: Environment<'static>,
}

impl Prompts {
    /// Compile all templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(EXTRACT_COMPANIES, EXTRACT_COMPANIES_TEMPLATE)?;
        env.add_template(INVESTMENT_SUGGESTION, INVESTMENT_SUGGESTION_TEMPLATE)?;
        env.add_template(COMPARE_REPORTS, COMPARE_REPORTS_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Prompt asking for the company names in `query`
    pub fn extraction(&self, query: &str) -> Result<String> {
        Ok(self
            .env
            .get_template(EXTRACT_COMPANIES)?
            .render(context! { query })?)
    }

    /// Prompt asking for commentary on one company's figures
    pub fn suggestion(&self, report_data: &str) -> Result<String> {
        Ok(self
            .env
            .get_template(INVESTMENT_SUGGESTION)?
            .render(context! { report_data })?)
    }

    /// Prompt asking for a comparison of two rendered reports
    pub fn comparison(&self, report1: &str, report2: &str) -> Result<String> {
        Ok(self
            .env
            .get_template(COMPARE_REPORTS)?
            .render(context! { report1, report2 })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt() {
        let prompts = Prompts::new().unwrap();
        assert_eq!(
            prompts.extraction("Compare Apple and Tesla stocks").unwrap(),
            "List only the company names mentioned in the following query, separated by commas, \
             without any extra text: Compare Apple and Tesla stocks."
        );
    }

    #[test]
    fn test_suggestion_prompt_is_not_escaped() {
        let prompts = Prompts::new().unwrap();
        let prompt = prompts
            .suggestion("{Company Name: AT&T <Inc.>, Beta: 0.5}")
            .unwrap();
        assert_eq!(
            prompt,
            "Based on the following stock data: {Company Name: AT&T <Inc.>, Beta: 0.5}, \
             provide an investment suggestion."
        );
    }

    #[test]
    fn test_comparison_prompt_layout() {
        let prompts = Prompts::new().unwrap();
        let prompt = prompts.comparison("# A", "# B").unwrap();
        assert_eq!(
            prompt,
            "Compare these two stock reports side by side:\n# A\n\n# B\n\nProvide a comparative investment suggestion."
        );
    }
}
