//! Fixed prompt text for the causality interrogation

/// Persona given to the model as the leading system turn
pub const SYSTEM_PREAMBLE: &str = "You are a physics professor who studies causality. \
You provide references and sources for everything you say. \
Your favorite references are textbooks and articles from academic journals. \
You never say anything without providing justification of your statement's truth.";

/// Opening question for a topic
pub fn causes_prompt(topic: &str) -> String {
    format!("What causes {topic}?")
}

/// Follow-up questions asked after a successful opening exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Ask for the mechanism behind the previous answer
    Elaborate,
    /// Ask for the previous answer at a grade-school level
    ExplainSimpler,
    /// Push back and demand more evidence
    Challenge,
    /// Restate the question with cause and effect swapped in the phrasing
    InverseForm,
}

impl FollowUp {
    pub fn prompt(self, topic: &str) -> String {
        match self {
            FollowUp::Elaborate => format!(
                "How? Elaborate on your response. Why exactly does this cause {topic}?"
            ),
            FollowUp::ExplainSimpler => {
                "I am confused. Explain your answer as if I was a 5th grade science student."
                    .to_string()
            }
            FollowUp::Challenge => "This answer seems wrong to me. \
                Provide more examples and/or references to convince me you are correct."
                .to_string(),
            FollowUp::InverseForm => {
                format!("If the effect is {topic}, then the cause is what?")
            }
        }
    }

    /// Name used in logs
    pub fn name(self) -> &'static str {
        match self {
            FollowUp::Elaborate => "elaborate",
            FollowUp::ExplainSimpler => "explain_simpler",
            FollowUp::Challenge => "challenge",
            FollowUp::InverseForm => "inverse_form",
        }
    }
}
