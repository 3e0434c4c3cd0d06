//! Prompt templates sent to the language model.

use crate::models::Step;

/// Which question to ask the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// One to five candidates for the next step
    NextStep,
    /// A full 8–15 step journey covering the whole experience
    CompleteJourney,
}

/// Renders `steps` as `1. text` lines.
pub fn numbered_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| format!("{}. {}", idx + 1, step.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the prompt text for `kind`.
pub fn build_prompt(kind: PromptKind, context: &str, steps: &[Step]) -> String {
    match kind {
        PromptKind::NextStep => next_step_prompt(context, steps),
        PromptKind::CompleteJourney => complete_journey_prompt(context, steps),
    }
}

fn next_step_prompt(context: &str, steps: &[Step]) -> String {
    format!(
        "You are an AI assistant tasked with helping users map out the user journey for an \
application or experience through an interactive, stepwise process. Your goal is to provide \
intelligent, concise suggestions at each step, allowing the user to build and refine the journey \
iteratively.

Instructions:
- Generate 1 to 5 suggestions for starting points or next steps in the user journey
- Each suggestion should be LIMITED TO 6 WORDS MAXIMUM
- Be numbered from 1 to 5
- Capture key actions, decisions, or transitions in the user journey
- Be highly relevant and insightful, considering the logical flow and potential pain points
- Think critically about the user journey, aiming for suggestions that are concise yet informative
- Focus on the essence of each step

Context: {context}

Current Journey Steps:
{steps}

Generate 1-5 numbered suggestions (6 words max each) for the next logical steps in this user journey:",
        steps = numbered_steps(steps)
    )
}

fn complete_journey_prompt(context: &str, steps: &[Step]) -> String {
    format!(
        "Based on the current user journey context and steps, generate a COMPLETE end-to-end user \
journey from start to finish. Include ALL logical steps needed to fully complete this user \
experience.

Context: {context}

Current Journey Steps:
{steps}

Generate a comprehensive, complete user journey with 8-15 numbered steps (6 words max each) that \
covers the entire experience from beginning to end. Include the current steps and add all missing \
steps to create a full journey:",
        steps = numbered_steps(steps)
    )
}
