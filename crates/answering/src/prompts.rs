//! Prompt templates, one per question category.

use shotwire_core::QuestionCategory;

/// System instruction sent with every chat request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

fn instruction(category: QuestionCategory) -> &'static str {
    match category {
        QuestionCategory::MultipleChoice => {
            "Provide the correct answer for the following multiple-choice question, \
             then briefly explain why it is correct."
        }
        QuestionCategory::DragAndDrop => {
            "The following is a drag-and-drop exercise. State which item belongs to \
             which target, then explain each pairing."
        }
        QuestionCategory::CodeInterpretation => {
            "Read the following code and explain what it does, then give the output \
             or result it produces."
        }
        QuestionCategory::Networking => {
            "Answer the following networking question, showing any addressing or \
             subnetting work."
        }
        QuestionCategory::Security => {
            "Answer the following security question and explain the underlying \
             concept or mitigation."
        }
        QuestionCategory::General => {
            "Provide the correct answer followed by an explanation. If the question \
             is long-form, just provide the explanation."
        }
    }
}

/// Build the chat prompt for `text` using the template for `category`.
///
/// Pure function: identical inputs always produce identical prompts.
pub fn compose(text: &str, category: QuestionCategory) -> String {
    format!(
        "{}\n\nText from screenshot:\n{}",
        instruction(category),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn compose_is_pure() {
        let a = compose("What is 2 + 2?", QuestionCategory::General);
        let b = compose("What is 2 + 2?", QuestionCategory::General);
        assert_eq!(a, b);
    }

    #[test]
    fn prompt_contains_template_phrase_and_text() {
        let prompt = compose("Pick A, B, or C", QuestionCategory::MultipleChoice);
        assert!(prompt.contains("correct answer for the following multiple-choice question"));
        assert!(prompt.contains("Pick A, B, or C"));
    }

    #[test]
    fn multiple_choice_scenario_end_to_end() {
        let text = "Which of the following is a multiple choice answer?";
        let category = classify(text);
        assert_eq!(category, QuestionCategory::MultipleChoice);
        let prompt = compose(text, category);
        assert!(prompt.contains("correct answer for the following multiple-choice question"));
        assert!(prompt.contains(text));
    }

    #[test]
    fn every_category_has_a_distinct_template() {
        let categories = [
            QuestionCategory::MultipleChoice,
            QuestionCategory::DragAndDrop,
            QuestionCategory::CodeInterpretation,
            QuestionCategory::Networking,
            QuestionCategory::Security,
            QuestionCategory::General,
        ];
        for (i, a) in categories.iter().enumerate() {
            for b in &categories[i + 1..] {
                assert_ne!(instruction(*a), instruction(*b));
            }
        }
    }
}
