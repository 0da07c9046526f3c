// Language detection and per-language canned strings

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Script detection is intentionally simple: one Unicode block per
// language. Sinhala is tested before Tamil, so mixed-script text
// classifies as Sinhala.
static SINHALA_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0D80}-\u{0DFF}]").unwrap());
static TAMIL_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0B80}-\u{0BFF}]").unwrap());

/// The three languages the site serves. `En` is the site default and the
/// fallback for every unknown code arriving over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Si,
    Ta,
}

impl Language {
    /// Two-letter wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Si => "si",
            Language::Ta => "ta",
        }
    }

    /// Parses a wire code. Unknown codes are the caller's problem; most
    /// call sites use `.unwrap_or_default()` to land on English.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "si" => Some(Language::Si),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }

    /// English display name carrying the native script, as used in
    /// translation prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Si => "Sinhala (සිංහල)",
            Language::Ta => "Tamil (தமிழ்)",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Language::En
    }

    /// Response-style instruction appended to the assistant system prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::En => {
                "Respond in friendly, conversational English. Use simple words that everyone can understand."
            }
            Language::Si => {
                "ප්‍රතිචාර දැක්වීම සිංහල භාෂාවෙන් කරන්න. මිත්‍රශීලී සහ සරල භාෂාවක් භාවිතා කරන්න. Respond ONLY in Sinhala (සිංහල). Use warm, friendly Sinhala language."
            }
            Language::Ta => {
                "நட்புரீதியான தமிழில் பதிலளிக்கவும். எளிய மொழியைப் பயன்படுத்தவும். Respond ONLY in Tamil (தமிழ்). Use warm, friendly Tamil language."
            }
        }
    }

    /// Canned assistant greeting, used as the primer model turn.
    pub fn greeting(&self, assistant_name: &str) -> String {
        match self {
            Language::En => format!(
                "Hello! 😊 I'm {assistant_name}. Happy to assist you! What would you like to know?"
            ),
            Language::Si => format!(
                "ආයුබෝවන්! 😊 මම {assistant_name}. ඔබට උදව් කිරීමට සතුටුයි! කුමක්ද දැන ගන්න ඕන?"
            ),
            Language::Ta => format!(
                "வணக்கம்! 😊 நான் {assistant_name}. உங்களுக்கு உதவ மகிழ்ச்சி! என்ன தெரிந்து கொள்ள விரும்புகிறீர்கள்?"
            ),
        }
    }

    /// Apology shown when the assistant cannot reach its upstream. Always
    /// carries a way to reach a human.
    pub fn fallback_message(&self, contact: &str) -> String {
        match self {
            Language::En => format!(
                "I'm sorry, I'm having trouble connecting right now. Please try again or contact us directly at {contact}"
            ),
            Language::Si => format!(
                "සමාවන්න, මට දැන් සම්බන්ධ වීමේ ගැටලුවක් තිබේ. කරුණාකර නැවත උත්සාහ කරන්න හෝ {contact} වෙත අප හා සම්බන්ධ වන්න"
            ),
            Language::Ta => format!(
                "மன்னிக்கவும், இப்போது இணைப்பதில் சிக்கல் உள்ளது. மீண்டும் முயற்சிக்கவும் அல்லது {contact} இல் எங்களை தொடர்பு கொள்ளவும்"
            ),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Classifies text by script: Sinhala first, then Tamil, else English.
pub fn detect(text: &str) -> Language {
    if SINHALA_SCRIPT.is_match(text) {
        return Language::Si;
    }
    if TAMIL_SCRIPT.is_match(text) {
        return Language::Ta;
    }
    Language::En
}

/// Picks the language the assistant should answer in. The script of the
/// message wins; English-script messages defer to the stored UI choice.
pub fn response_language(message: &str, ui_language: Language) -> Language {
    let detected = detect(message);
    if detected.is_default() {
        ui_language
    } else {
        detected
    }
}
