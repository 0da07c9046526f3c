// Script detection tests

use proptest::prelude::*;
use trilingo::lang::{self, Language};

#[test]
fn test_detects_each_site_language() {
    assert_eq!(lang::detect("Hello, how can we help?"), Language::En);
    assert_eq!(lang::detect("ඔබට උදව් අවශ්‍යද?"), Language::Si);
    assert_eq!(lang::detect("உங்களுக்கு உதவி தேவையா?"), Language::Ta);
}

#[test]
fn test_sinhala_outranks_tamil_in_either_order() {
    assert_eq!(lang::detect("ආයුබෝවන් வணக்கம்"), Language::Si);
    assert_eq!(lang::detect("வணக்கம் ආයුබෝවන්"), Language::Si);
}

#[test]
fn test_numbers_punctuation_and_emoji_stay_english() {
    assert_eq!(lang::detect("2024-08-25 10:30"), Language::En);
    assert_eq!(lang::detect("!!! ??? ..."), Language::En);
    assert_eq!(lang::detect("😊🎉"), Language::En);
}

#[test]
fn test_sinhala_punctuation_counts_as_sinhala() {
    // Kunddaliya (U+0DF4) sits inside the Sinhala block
    assert_eq!(lang::detect("෴"), Language::Si);
}

#[test]
fn test_response_language_prefers_message_script() {
    // A Sinhala question on the Tamil UI gets a Sinhala answer
    assert_eq!(
        lang::response_language("ඔබ කවුද?", Language::Ta),
        Language::Si
    );
    // An English question defers to the stored UI choice
    assert_eq!(
        lang::response_language("Who are you?", Language::Ta),
        Language::Ta
    );
}

#[test]
fn test_unknown_wire_codes_have_no_language() {
    assert_eq!(Language::from_code("fr"), None);
    assert_eq!(Language::from_code("EN"), None);
    assert_eq!(Language::from_code(""), None);
}

proptest! {
    #[test]
    fn prop_latin_text_is_always_english(s in "[a-zA-Z0-9 .,!?']{0,80}") {
        prop_assert_eq!(lang::detect(&s), Language::En);
    }

    #[test]
    fn prop_one_sinhala_char_decides_sinhala(
        prefix in "[a-zA-Z0-9 ]{0,40}",
        ch in prop::sample::select(vec!['අ', 'ම', 'ස', 'ක', '෴']),
        suffix in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let text = format!("{}{}{}", prefix, ch, suffix);
        prop_assert_eq!(lang::detect(&text), Language::Si);
    }

    #[test]
    fn prop_one_tamil_char_amid_latin_noise_decides_tamil(
        prefix in "[a-zA-Z0-9 ]{0,40}",
        ch in prop::sample::select(vec!['அ', 'த', 'ம', 'ழ']),
        suffix in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let text = format!("{}{}{}", prefix, ch, suffix);
        prop_assert_eq!(lang::detect(&text), Language::Ta);
    }

    #[test]
    fn prop_latin_messages_keep_the_ui_choice(
        s in "[a-zA-Z ?!]{1,40}",
        ui in prop::sample::select(vec![Language::En, Language::Si, Language::Ta]),
    ) {
        prop_assert_eq!(lang::response_language(&s, ui), ui);
    }
}
