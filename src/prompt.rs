//! Topic-scoped prompt construction
//!
//! One prompt template keeps the model on the active topic: related
//! questions (people, events, history, sub-fields) are in scope, anything
//! clearly unrelated must be answered with a fixed refusal phrase so
//! off-topic drift is detectable verbatim.

/// Prompt template; `{topic}` and `{message}` are substituted per exchange
const PROMPT_TEMPLATE: &str = r#"You are an AI assistant focused on discussing a specific topic.
The current topic is: "{topic}".

Your goal is to answer the user's questions helpfully and accurately, as long as they are reasonably related to "{topic}".
Questions about people, events, concepts, history, or sub-fields within "{topic}" are considered on-topic.

However, if the user asks a question that is clearly *not* related to "{topic}", you MUST respond *exactly* with the following phrase and nothing else:
"Sorry, that question is outside my current expertise on {topic}."

Do not apologize further or offer to discuss other things if the question is off-topic. Just use the specified refusal phrase.

User Question: "{message}"

Your Answer:"#;

/// Build the full prompt for one exchange on `topic`.
pub fn topic_prompt(topic: &str, message: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{message}", message)
}
