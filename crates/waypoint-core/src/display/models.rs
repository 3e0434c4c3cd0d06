//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalMillis;
use crate::models::{Credentials, Provider, SavedProject, Step, Suggestion, SuggestionSource};

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A nested list item, indented by level.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(usize::from(self.level));
        writeln!(f, "{indent}- {} `{}`", self.text, self.id)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.id, self.text)?;
        if let Some(confidence) = self.confidence {
            write!(f, " *({:.0}%)*", confidence * 100.0)?;
        }
        if let Some(reasoning) = &self.reasoning {
            write!(f, " - {reasoning}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for SavedProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** `{}`", self.name, self.id)?;
        if self.is_template {
            write!(f, " (template)")?;
        } else {
            write!(f, " - {} steps", self.steps.len())?;
        }
        writeln!(f, ", modified {}", LocalMillis(self.last_modified))
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Credentials")?;
        writeln!(f)?;
        writeln!(f, "- Provider: {}", self.provider)?;
        for provider in [Provider::OpenAi, Provider::Anthropic] {
            match self.masked_key(provider) {
                Some(masked) => writeln!(f, "- {provider} key: `{masked}`")?,
                None => writeln!(f, "- {provider} key: not set")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    #[test]
    fn test_step_indents_by_level() {
        let root = Step::root("1", "Context: Bank", Timestamp::UNIX_EPOCH);
        let child = Step::child_of(&root, "2", "Log in", Timestamp::UNIX_EPOCH);
        assert_eq!(root.to_string(), "- Context: Bank `1`\n");
        assert_eq!(child.to_string(), "  - Log in `2`\n");
    }

    #[test]
    fn test_suggestion_display() {
        let generated = Suggestion::generated(2, "Add item to cart", 0.9);
        assert_eq!(generated.to_string(), "2. Add item to cart *(90%)*\n");

        let fallback = Suggestion::fallback(1, "Configure OpenAI or Anthropic API");
        assert_eq!(fallback.to_string(), "1. Configure OpenAI or Anthropic API\n");
    }

    #[test]
    fn test_credentials_display_masks_keys() {
        let credentials = Credentials::new(Provider::Anthropic, "sk-ant-123456");
        let output = credentials.to_string();
        assert!(output.contains("- Provider: Anthropic"));
        assert!(output.contains("- Anthropic key: `*********3456`"));
        assert!(output.contains("- OpenAI key: not set"));
        assert!(!output.contains("sk-ant"));
    }

    #[test]
    fn test_project_display() {
        let template = &crate::models::template_projects(Timestamp::UNIX_EPOCH)[0];
        let output = template.to_string();
        assert!(output.starts_with("- **E-commerce** `ecommerce` (template)"));
    }
}
