use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical comparison key for a team or league display name.
///
/// Decomposes to NFD and drops combining marks, so precomposed and decomposed
/// spellings agree. Letters with no decomposition (`đ`, `ł`, `ß`, ...) are
/// folded by hand. Apostrophes vanish and every other run of non-alphanumeric
/// characters becomes a single space. The output never has leading or
/// trailing spaces, so the function is idempotent.
pub fn normalize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;
    for ch in input.nfd().flat_map(char::to_lowercase) {
        if is_combining_mark(ch) || is_apostrophe(ch) {
            continue;
        }

        let mapped = match fold_latin(ch) {
            Some(s) => Some(s),
            None if ch.is_alphanumeric() => None,
            None => {
                pending_sep = true;
                continue;
            }
        };

        if pending_sep && !out.is_empty() {
            out.push(' ');
        }
        pending_sep = false;
        match mapped {
            Some(s) => out.push_str(s),
            None => out.push(ch),
        }
    }
    out
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '`' | '\u{2018}' | '\u{2019}' | '\u{00B4}')
}

// Letters NFD leaves intact. Input is already lower-cased.
fn fold_latin(ch: char) -> Option<&'static str> {
    let s = match ch {
        'æ' | 'ǽ' => "ae",
        'đ' | 'ð' | 'ɖ' => "d",
        'ħ' => "h",
        'ı' => "i",
        'ł' | 'ŀ' | 'ƚ' => "l",
        'ø' | 'ǿ' => "o",
        'œ' => "oe",
        'ß' => "ss",
        'ŧ' => "t",
        'þ' => "th",
        _ => return None,
    };
    Some(s)
}
