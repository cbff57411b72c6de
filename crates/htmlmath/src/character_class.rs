use phf::{Set, phf_set};

/// Marks that are drawn raised even without superscript markup.
pub static PSEUDO_SUPERSCRIPTS: Set<char> = phf_set! {
    '\u{0022}', '\u{0027}', '\u{002A}', '\u{0060}', '\u{00AA}', '\u{00B0}', '\u{00B2}', '\u{00B3}',
    '\u{00B4}', '\u{00B9}', '\u{00BA}', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{201D}',
    '\u{201E}', '\u{201F}', '\u{2032}', '\u{2033}', '\u{2034}', '\u{2035}', '\u{2036}', '\u{2037}',
    '\u{2057}',
};

/// Integral signs that start an integral-with-limits layout.
pub static INTEGRAL_SIGNS: Set<char> = phf_set! {
    '∫', '∬', '∭', '∮', '∯', '∰', '∲', '∳',
};

/// Part of a number: a digit or a decimal/thousands separator.
#[inline]
pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || is_separator(c)
}

#[inline]
pub fn is_separator(c: char) -> bool {
    matches!(c, ',' | '.')
}

/// A character of a word or variable name.
///
/// Alphabetic characters, less the letter-like numerals (`Ⅻ`, `〇`, ...) and the enclosed
/// letters (`Ⓐ`, `🄰`, ...), which are symbols rather than letters. Combining vowel signs
/// still count.
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
        && !matches!(
            c,
            '\u{16EE}'..='\u{16F0}'
                | '\u{2160}'..='\u{2182}'
                | '\u{2185}'..='\u{2188}'
                | '\u{24B6}'..='\u{24E9}'
                | '\u{3007}'
                | '\u{3021}'..='\u{3029}'
                | '\u{3038}'..='\u{303A}'
                | '\u{A6E6}'..='\u{A6EF}'
                | '\u{10140}'..='\u{10174}'
                | '\u{10341}'
                | '\u{1034A}'
                | '\u{103D1}'..='\u{103D5}'
                | '\u{12400}'..='\u{1246E}'
                | '\u{1F130}'..='\u{1F149}'
                | '\u{1F150}'..='\u{1F169}'
                | '\u{1F170}'..='\u{1F189}'
        )
}

#[inline]
pub fn is_pseudo_superscript(c: char) -> bool {
    PSEUDO_SUPERSCRIPTS.contains(&c)
}

/// How a literal token is presented in MathML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// `<mi>`
    Identifier,
    /// `<mn>`
    Number,
    /// `<mo>`
    Operator,
}

impl Class {
    /// Anything with a letter in it is an identifier; anything else with a digit or separator
    /// is a number, unless it is a lone separator. The rest are operators.
    pub fn of(token: &str) -> Self {
        if token.chars().any(is_letter) {
            return Class::Identifier;
        }
        let mut chars = token.chars();
        let lone_separator = matches!((chars.next(), chars.next()), (Some(c), None) if is_separator(c));
        if !lone_separator && token.chars().any(is_numeric) {
            Class::Number
        } else {
            Class::Operator
        }
    }
}
