//! Fixed prompt template for article generation.
//!
//! The relay sends the same two-message prompt on every request; only the
//! topic varies. Tuning lives here, not in the client.

/// System message establishing the encyclopedic register.
pub const SYSTEM_PROMPT: &str = "You are an expert encyclopedia writer. \
Create well-structured, informative articles similar to Wikipedia entries. \
Use clear formatting with proper headings and comprehensive content.";

/// Build the Wikipedia-style article prompt for a topic.
///
/// The topic is embedded verbatim; no escaping is applied.
pub fn article_prompt(topic: &str) -> String {
    format!(
        "Write a comprehensive, well-structured Wikipedia-style article about \"{topic}\".\n\n\
         Structure the article with:\n\
         1. Start with a clear introductory paragraph defining/explaining the topic\n\
         2. Use proper section headers (use ## for main sections, ### for subsections)\n\
         3. Include relevant historical background, key concepts, and important details\n\
         4. Write in an encyclopedic, neutral tone\n\
         5. Make it factually accurate and informative\n\
         6. Use bullet points for lists where appropriate\n\
         7. Include interesting facts and current relevance\n\n\
         Format the content clearly with proper headings and paragraphs. \
         Avoid using asterisks (*) for emphasis - instead write naturally with clear, \
         informative content."
    )
}
