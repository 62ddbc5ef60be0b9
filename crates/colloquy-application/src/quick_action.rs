//! Quick actions: canned prompts dispatched from the view layer.

/// A one-click canned exchange with a specialized system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    /// Code-generation persona.
    Code,
    /// Content-writing persona.
    Content,
}

impl QuickAction {
    /// The system prompt this action runs under.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Code => {
                "You are an expert software engineer. Provide high-quality, clean code snippets with explanations."
            }
            Self::Content => {
                "You are a professional writer. Create engaging, well-structured content for the user."
            }
        }
    }

    /// The canned user message submitted by this action.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Code => "Generate a React component for a dashboard",
            Self::Content => "Write a professional email about project status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_carry_distinct_prompts() {
        assert_ne!(
            QuickAction::Code.system_prompt(),
            QuickAction::Content.system_prompt()
        );
        assert_ne!(QuickAction::Code.message(), QuickAction::Content.message());
    }
}
