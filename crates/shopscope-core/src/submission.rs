use super::answers::AnswerStore;

/// Document text installed when the collaborator answers without any text.
pub const NO_RESPONSE_TEXT: &str = "No response generated.";

/// User-facing message installed for every failed generation call.
pub const GENERATION_ERROR_TEXT: &str =
    "Error generating scope. Please try again later or check your API key.";

const PROMPT_PREAMBLE: &str = "Act as a Senior E-commerce Solutions Architect. Analyze the following client questionnaire data for a new e-commerce project and generate a professional \"Project Scope & Estimation Brief\".";

const PROMPT_INSTRUCTIONS: &str = "Please format the response using Markdown. The response should include:
1. **Executive Summary**: A brief overview of what the client needs.
2. **Technical Complexity Assessment**: Rate as Low, Medium, or High complexity with a justification.
3. **Key Features & Modules**: Bullet points of required functionality based on their answers.
4. **Potential Challenges**: Identify any risks (e.g., if they have no content, or complex shipping needs).
5. **Next Steps Recommendation**: What should the developer ask for next?

Keep the tone professional, encouraging, and clear.";

/// Outcome of one submission attempt. Either variant switches the UI into
/// result mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Document(String),
    Error(String),
}

impl SubmissionResult {
    pub fn text(&self) -> &str {
        match self {
            Self::Document(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The fixed failure result shown for any transport or collaborator error.
    pub fn failure() -> Self {
        Self::Error(GENERATION_ERROR_TEXT.to_string())
    }

    /// Maps the collaborator's text to a document, substituting the fallback
    /// when the text is absent or empty.
    pub fn from_response_text(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.is_empty() => Self::Document(text),
            _ => Self::Document(NO_RESPONSE_TEXT.to_string()),
        }
    }
}

/// Payload handed to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Pretty-printed JSON of the whole answer store, every field included.
    pub answers_json: String,
    /// Instruction template with `answers_json` embedded.
    pub prompt: String,
}

impl GenerationRequest {
    pub fn from_answers(answers: &AnswerStore) -> Result<Self, serde_json::Error> {
        let answers_json = serde_json::to_string_pretty(answers)?;
        let prompt = format!(
            "{PROMPT_PREAMBLE}\n\nClient Data:\n{answers_json}\n\n{PROMPT_INSTRUCTIONS}\n"
        );
        Ok(Self {
            answers_json,
            prompt,
        })
    }
}
