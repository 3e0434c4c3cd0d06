//! Saved project model and the seeded journey templates.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Step;

/// Prefix that marks the single auto-saved snapshot of the live journey.
pub const CURRENT_PROJECT_PREFIX: &str = "current_";

/// Longest project name derived from a context before it is ellipsized.
const PROJECT_NAME_MAX_CHARS: usize = 30;

/// A snapshot of a past journey. Independent copy; never aliases the live
/// step sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub id: String,
    pub name: String,
    pub context: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Milliseconds since the Unix epoch
    pub last_modified: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_template: bool,
}

impl SavedProject {
    /// Snapshot of the live journey, named after its context.
    pub fn current(context: &str, steps: &[Step], now: Timestamp) -> Self {
        let millis = now.as_millisecond();
        Self {
            id: format!("{CURRENT_PROJECT_PREFIX}{millis}"),
            name: project_name(context),
            context: context.to_string(),
            steps: steps.to_vec(),
            last_modified: millis,
            is_template: false,
        }
    }

    pub fn is_current(&self) -> bool {
        self.id.starts_with(CURRENT_PROJECT_PREFIX)
    }
}

/// A built-in starting point for a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub context: &'static str,
}

/// Templates seeded into the project list on first run.
pub const TEMPLATES: [JourneyTemplate; 4] = [
    JourneyTemplate {
        id: "ecommerce",
        name: "E-commerce",
        description: "Shopping experience",
        context: "E-commerce platform for online shopping with product catalog, cart, and checkout",
    },
    JourneyTemplate {
        id: "saas",
        name: "SaaS App",
        description: "Software onboarding",
        context: "SaaS application with user registration, setup wizard, and feature introduction",
    },
    JourneyTemplate {
        id: "mobile",
        name: "Mobile App",
        description: "Mobile user journey",
        context: "Mobile application with splash screen, login, and core feature navigation",
    },
    JourneyTemplate {
        id: "website",
        name: "Website",
        description: "Marketing website",
        context: "Marketing website with landing pages, content sections, and conversion funnels",
    },
];

/// Builds the template entries for a fresh project list.
pub fn template_projects(now: Timestamp) -> Vec<SavedProject> {
    TEMPLATES
        .iter()
        .map(|template| SavedProject {
            id: template.id.to_string(),
            name: template.name.to_string(),
            context: template.context.to_string(),
            steps: Vec::new(),
            last_modified: now.as_millisecond(),
            is_template: true,
        })
        .collect()
}

fn project_name(context: &str) -> String {
    if context.chars().count() > PROJECT_NAME_MAX_CHARS {
        let head: String = context.chars().take(PROJECT_NAME_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        context.to_string()
    }
}
