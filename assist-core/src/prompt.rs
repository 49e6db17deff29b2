//! Prompt builder: deterministic task templates plus the default system
//! instruction.
//!
//! [`build_user_prompt`] is pure and total: identical inputs always produce
//! the identical string, so prompt construction is testable without ever
//! invoking the model. The system instruction is managed separately and
//! passed through unchanged.

use serde::{Deserialize, Serialize};

/// Focus areas used by the Refactor template when the caller supplies none.
pub const DEFAULT_REFACTOR_FOCUS: &[&str] = &["clarity", "maintainability", "performance"];

/// Default system instruction describing the three task behaviors.
///
/// Operator-editable at runtime; the builder never reads it, it is handed to
/// the completion boundary alongside every user message.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful and concise AI code assistant. Your primary goal is to analyze user-submitted Python code and respond accurately and effectively based on the specified task.

- **Explaining Code**:
  Provide a clear and beginner-friendly explanation. Your explanation should cover:
  1. The overall purpose and functionality of the code.
  2. A breakdown of key components (functions, classes, significant logic blocks).
  3. The expected input(s) and output(s).
  4. Any potential edge cases or notable behaviors you observe.
  Be thorough yet concise.

- **Refactoring Code**:
  Your goal is to improve the code based on specified focus areas (e.g., clarity, maintainability, performance, Pythonic idioms).
  Please provide:
  1. A clear explanation of the changes you made and the reasoning behind them.
  2. The complete, revised Python code block.
  3. Ensure the code block includes concise inline comments (`#`) for significant changes.
  Ensure the refactored code remains functionally equivalent to the original.

- **Debugging Code**:
  Analyze the code for bugs, errors, and potential issues. Present your findings in a structured manner:
  1.  **Bug Identification**: Clearly list each bug or issue found. Explain *why* it is an issue (e.g., syntax error, logical flaw, runtime risk, deviation from best practices).
  2.  **Proposed Fixes**: For each identified bug, describe the necessary changes to correct it.
  3.  **Corrected Code**: Provide the complete Python code block with all identified bugs fixed.

Always use Markdown for formatting your response. Code blocks must be enclosed in triple backticks (```python ... ```)."#;

/// Fixed choice of intent driving template selection.
///
/// `Freeform` means the accompanying instruction text is the prompt and any
/// code is appended as context; the other variants use fixed templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSelector {
    Explain,
    Refactor,
    Debug,
    Freeform,
}

/// The pair handed to the completion service for one request.
#[derive(Debug, Clone, Serialize)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_message: String,
}

/// Builds the user-turn message for the selected task.
///
/// Priority order: a non-empty `instruction` always wins (free-form mode,
/// the task selector is ignored); otherwise the task template applies; with
/// neither, the result is empty.
///
/// # Example
/// ```
/// # use assist_core::prompt::{build_user_prompt, TaskSelector};
/// let p = build_user_prompt(Some(TaskSelector::Explain), "print('hi')", "", None);
/// assert!(p.starts_with("Explain the following Python code:"));
/// assert!(p.contains("print('hi')"));
/// ```
pub fn build_user_prompt(
    task: Option<TaskSelector>,
    code: &str,
    instruction: &str,
    focus_areas: Option<&[String]>,
) -> String {
    if !instruction.is_empty() {
        return if code.is_empty() {
            instruction.to_string()
        } else {
            format!("{instruction}\n\n```python\n{code}\n```")
        };
    }

    match task {
        Some(TaskSelector::Explain) => {
            format!("Explain the following Python code:\n\n```python\n{code}\n```")
        }
        Some(TaskSelector::Refactor) => {
            let focus = match focus_areas {
                Some(areas) if !areas.is_empty() => areas.join(", "),
                _ => DEFAULT_REFACTOR_FOCUS.join(", "),
            };
            let mut prompt = format!(
                "Please refactor the following Python code. Your primary goals are to improve: {focus}.\n"
            );
            prompt.push_str(
                "First, provide an explanation of the changes made and why they improve the code.\n",
            );
            prompt.push_str(
                "Then, provide the complete, revised Python code block with concise inline comments (#) for significant changes.\n\n",
            );
            prompt.push_str("Original Code:\n");
            prompt.push_str(&format!("```python\n{code}\n```\n\n"));
            prompt.push_str("Explanation and Refactored Code:\n");
            prompt
        }
        Some(TaskSelector::Debug) => {
            format!("Analyze and debug the following Python code:\n\n```python\n{code}\n```")
        }
        // Freeform with an empty instruction, or no task at all.
        Some(TaskSelector::Freeform) | None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_is_deterministic_and_embeds_code() {
        let code = "print('hi')";
        let a = build_user_prompt(Some(TaskSelector::Explain), code, "", None);
        let b = build_user_prompt(Some(TaskSelector::Explain), code, "", None);
        assert_eq!(a, b);
        assert!(a.starts_with("Explain the following Python code:"));
        assert!(a.contains("```python\nprint('hi')\n```"));
    }

    #[test]
    fn refactor_defaults_focus_areas() {
        let p = build_user_prompt(Some(TaskSelector::Refactor), "x = 1", "", None);
        assert!(p.contains("clarity, maintainability, performance"));
        assert!(p.contains("Original Code:\n```python\nx = 1\n```"));
        assert!(p.ends_with("Explanation and Refactored Code:\n"));
    }

    #[test]
    fn refactor_uses_explicit_focus_areas_in_order() {
        let areas = vec!["speed".to_string(), "style".to_string()];
        let p = build_user_prompt(Some(TaskSelector::Refactor), "x = 1", "", Some(&areas));
        assert!(p.contains("improve: speed, style."));
        assert!(!p.contains("clarity, maintainability, performance"));
    }

    #[test]
    fn explain_and_debug_never_mention_focus_areas() {
        for task in [TaskSelector::Explain, TaskSelector::Debug] {
            let p = build_user_prompt(Some(task), "x = 1", "", None);
            assert!(!p.contains("clarity, maintainability, performance"));
        }
    }

    #[test]
    fn freeform_with_code_appends_fenced_block() {
        let p = build_user_prompt(None, "x=1", "Summarize", None);
        assert_eq!(p, "Summarize\n\n```python\nx=1\n```");
    }

    #[test]
    fn freeform_without_code_is_instruction_alone() {
        let p = build_user_prompt(None, "", "What is a closure?", None);
        assert_eq!(p, "What is a closure?");
    }

    #[test]
    fn instruction_overrides_task_selector() {
        let p = build_user_prompt(Some(TaskSelector::Debug), "x=1", "Summarize", None);
        assert_eq!(p, "Summarize\n\n```python\nx=1\n```");
    }

    #[test]
    fn no_task_no_instruction_is_empty() {
        assert_eq!(build_user_prompt(None, "x=1", "", None), "");
        assert_eq!(
            build_user_prompt(Some(TaskSelector::Freeform), "x=1", "", None),
            ""
        );
    }
}
