//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{SavedProject, Step, Suggestion};

/// The live journey: its context and step tree.
pub struct Journey<'a> {
    pub context: &'a str,
    pub steps: &'a [Step],
}

impl<'a> Journey<'a> {
    pub fn new(context: &'a str, steps: &'a [Step]) -> Self {
        Self { context, steps }
    }
}

impl fmt::Display for Journey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return writeln!(f, "No journey yet. Start one with `wp start <context>`.");
        }

        if self.context.is_empty() {
            writeln!(f, "# Journey")?;
        } else {
            writeln!(f, "# Journey: {}", self.context)?;
        }
        writeln!(f)?;
        for step in self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a suggestion list.
#[derive(Debug, Clone, Default)]
pub struct Suggestions(pub Vec<Suggestion>);

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.0.iter()
    }
}

impl Index<usize> for Suggestions {
    type Output = Suggestion;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Suggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No suggestions.");
        }
        for suggestion in &self.0 {
            write!(f, "{suggestion}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying saved projects.
#[derive(Debug, Clone, Default)]
pub struct Projects(pub Vec<SavedProject>);

impl Projects {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Projects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Projects")?;
        writeln!(f)?;
        if self.0.is_empty() {
            return writeln!(f, "No saved projects.");
        }
        for project in &self.0 {
            write!(f, "{project}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    #[test]
    fn test_empty_journey() {
        let output = Journey::new("", &[]).to_string();
        assert!(output.starts_with("No journey yet."));
    }

    #[test]
    fn test_journey_lists_steps_in_order() {
        let root = Step::root("1", "Context: Bank", Timestamp::UNIX_EPOCH);
        let next = Step::child_of(&root, "2", "Log in", Timestamp::UNIX_EPOCH);
        let steps = vec![root, next];

        let output = Journey::new("Bank", &steps).to_string();
        assert_eq!(
            output,
            "# Journey: Bank\n\n- Context: Bank `1`\n  - Log in `2`\n"
        );
    }

    #[test]
    fn test_suggestions_wrapper() {
        let suggestions = Suggestions(vec![
            Suggestion::fallback(1, "Setup AI credentials for smart suggestions"),
            Suggestion::fallback(2, "Configure OpenAI or Anthropic API"),
        ]);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].id, 2);
        assert!(suggestions.to_string().contains("2. Configure OpenAI"));
        assert_eq!(Suggestions::default().to_string(), "No suggestions.\n");
    }

    #[test]
    fn test_projects_wrapper() {
        let projects = Projects(crate::models::template_projects(Timestamp::UNIX_EPOCH));
        let output = projects.to_string();
        assert!(output.starts_with("# Projects\n\n"));
        assert_eq!(output.matches("(template)").count(), 4);
    }
}
