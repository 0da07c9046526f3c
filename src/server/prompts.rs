// Prompt construction for everything sent upstream

use crate::config::AssistantConfig;
use crate::lang::Language;
use crate::models::api::{ConversationTurn, TurnRole};
use crate::models::gemini::Content;

/// Token separating batch segments inside a single prompt and inside the
/// model's reply. Never appears in site copy, and low-temperature
/// translation reliably carries it through.
pub const BATCH_SEPARATOR: &str = "|||";

/// The assistant persona. All organization specifics are interpolated
/// from configuration so a deployment never forks the prompt text.
pub fn chat_system_prompt(assistant: &AssistantConfig, response_lang: Language) -> String {
    let mut about = String::new();
    for line in &assistant.about {
        about.push_str("- ");
        about.push_str(line);
        about.push('\n');
    }
    about.push_str("- Contact: ");
    about.push_str(&assistant.contact_email);
    if !assistant.whatsapp.is_empty() {
        about.push_str(" | WhatsApp: ");
        about.push_str(&assistant.whatsapp);
    }
    if !assistant.website.is_empty() {
        about.push_str("\n- Website: ");
        about.push_str(&assistant.website);
    }

    format!(
        r#"You are "{name}" - a warm, friendly, and helpful AI assistant for {organization}.

🏢 About {organization}:
{about}

🎯 Your Personality & Style:
- Be WARM, FRIENDLY and CONVERSATIONAL - like chatting with a helpful friend
- Use simple, easy-to-understand language
- Add appropriate emojis to make responses feel friendly (but not too many) 😊
- Keep responses SHORT and CLEAR (2-3 sentences for simple questions, max 4-5 for complex ones)
- Be encouraging and positive
- Show genuine care for the visitor

📝 Response Guidelines:
- Start with a friendly acknowledgment of their question
- Give helpful, specific information
- End with an offer to help more OR a relevant follow-up suggestion
- If you don't know something specific, warmly guide them to contact {organization} directly
- For volunteer/donation questions, be enthusiastic and welcoming!

🗣️ IMPORTANT LANGUAGE RULES:
- The user may type in English, Sinhala (සිංහල), or Tamil (தமிழ்)
- ALWAYS respond in the SAME language the user typed in
- If user types in Sinhala script, reply FULLY in Sinhala
- If user types in Tamil script, reply FULLY in Tamil
- Current UI language preference: {lang_code}

{lang_instruction}

Remember: You're not just an information bot - you're a friendly helper who makes visitors feel welcome! 🌟"#,
        name = assistant.name,
        organization = assistant.organization,
        about = about.trim_end(),
        lang_code = response_lang.code(),
        lang_instruction = response_lang.instruction(),
    )
}

/// Full contents for one chat call: persona, canned greeting primer, the
/// prior turns, then the current message.
pub fn chat_contents(
    assistant: &AssistantConfig,
    message: &str,
    history: &[ConversationTurn],
    response_lang: Language,
) -> Vec<Content> {
    let mut contents = Vec::with_capacity(history.len() + 3);
    contents.push(Content::user(chat_system_prompt(assistant, response_lang)));
    contents.push(Content::model(response_lang.greeting(&assistant.name)));

    for turn in history {
        contents.push(match turn.role {
            TurnRole::User => Content::user(turn.content.clone()),
            TurnRole::Assistant => Content::model(turn.content.clone()),
        });
    }

    contents.push(Content::user(message));
    contents
}

/// Single-text translation prompt.
pub fn translate_prompt(text: &str, target_language: &str, organization: &str) -> String {
    format!(
        r#"You are a professional translator for an NGO website. Translate the following text to {target_language}.

Rules:
- Return ONLY the translated text, nothing else
- Maintain the same tone and formality
- Keep proper nouns unchanged (like "{organization}", names of places)
- If the text is already in the target language, return it as-is

Text to translate:
{text}"#
    )
}

/// Batch translation prompt. Segments travel joined by
/// [`BATCH_SEPARATOR`] and must come back the same way, same count,
/// same order.
pub fn batch_translate_prompt(texts: &[String], target_language: &str, organization: &str) -> String {
    let count = texts.len();
    let joined = texts.join(BATCH_SEPARATOR);
    format!(
        r#"You are a professional translator for an NGO website. Translate each of the {count} text segments below to {target_language}. The segments are separated by the token {BATCH_SEPARATOR}.

Rules:
- Return ONLY the translated segments, nothing else
- Separate the translated segments with the same {BATCH_SEPARATOR} token
- Return exactly {count} segments, in the same order
- Maintain the same tone and formality
- Keep proper nouns unchanged (like "{organization}", names of places)
- If a segment is already in the target language, return it as-is

Text segments:
{joined}"#
    )
}
