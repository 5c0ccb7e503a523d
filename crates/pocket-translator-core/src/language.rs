//! Binary Chinese / non-Chinese direction heuristic.

use crate::config::{CHINESE_LANG, ENGLISH_LANG, Lang};

/// Whether `text` contains a CJK unified ideograph (U+4E00..=U+9FA5)
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}

/// Chinese text goes to English, everything else goes to Chinese
pub fn detect_direction(text: &str) -> (Lang, Lang) {
    if contains_chinese(text) {
        (Lang::new(CHINESE_LANG), Lang::new(ENGLISH_LANG))
    } else {
        (Lang::new(ENGLISH_LANG), Lang::new(CHINESE_LANG))
    }
}
