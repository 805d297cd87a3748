//! Kana to romaji conversion (modified Hepburn).
//!
//! Used as the reading of last resort when the dictionary does not supply
//! one. Characters that are not kana (kanji, Latin, punctuation) pass
//! through unchanged.

const SMALL_Y: [char; 3] = ['ゃ', 'ゅ', 'ょ'];
const SMALL_VOWELS: [char; 5] = ['ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ'];

/// Folds katakana into the matching hiragana code point.
fn to_hiragana(c: char) -> char {
    match c {
        '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

fn syllable(c: char) -> Option<&'static str> {
    let romaji = match c {
        'あ' | 'ぁ' => "a",
        'い' | 'ぃ' => "i",
        'う' | 'ぅ' => "u",
        'え' | 'ぇ' => "e",
        'お' | 'ぉ' => "o",
        'か' | 'ゕ' => "ka",
        'き' => "ki",
        'く' => "ku",
        'け' | 'ゖ' => "ke",
        'こ' => "ko",
        'が' => "ga",
        'ぎ' => "gi",
        'ぐ' => "gu",
        'げ' => "ge",
        'ご' => "go",
        'さ' => "sa",
        'し' => "shi",
        'す' => "su",
        'せ' => "se",
        'そ' => "so",
        'ざ' => "za",
        'じ' | 'ぢ' => "ji",
        'ず' | 'づ' => "zu",
        'ぜ' => "ze",
        'ぞ' => "zo",
        'た' => "ta",
        'ち' => "chi",
        'つ' => "tsu",
        'て' => "te",
        'と' => "to",
        'だ' => "da",
        'で' => "de",
        'ど' => "do",
        'な' => "na",
        'に' => "ni",
        'ぬ' => "nu",
        'ね' => "ne",
        'の' => "no",
        'は' => "ha",
        'ひ' => "hi",
        'ふ' => "fu",
        'へ' => "he",
        'ほ' => "ho",
        'ば' => "ba",
        'び' => "bi",
        'ぶ' => "bu",
        'べ' => "be",
        'ぼ' => "bo",
        'ぱ' => "pa",
        'ぴ' => "pi",
        'ぷ' => "pu",
        'ぺ' => "pe",
        'ぽ' => "po",
        'ま' => "ma",
        'み' => "mi",
        'む' => "mu",
        'め' => "me",
        'も' => "mo",
        'や' | 'ゃ' => "ya",
        'ゆ' | 'ゅ' => "yu",
        'よ' | 'ょ' => "yo",
        'ら' => "ra",
        'り' => "ri",
        'る' => "ru",
        'れ' => "re",
        'ろ' => "ro",
        'わ' | 'ゎ' => "wa",
        'ゐ' => "wi",
        'ゑ' => "we",
        'を' => "o",
        'ん' => "n",
        'ゔ' => "vu",
        _ => return None,
    };
    Some(romaji)
}

/// Combines a base syllable with a following small kana, e.g. き+ゃ or フ+ァ.
fn combine(base: &str, small: char) -> Option<String> {
    let small_romaji = syllable(small)?;

    if SMALL_Y.contains(&small) {
        let stem = base.strip_suffix('i')?;
        return Some(match stem {
            "sh" | "ch" | "j" => format!("{}{}", stem, &small_romaji[1..]),
            _ => format!("{}{}", stem, small_romaji),
        });
    }

    let combined = match (base, small_romaji) {
        ("fu", v) | ("vu", v) => format!("{}{}", &base[..1], v),
        ("shi", "e") | ("chi", "e") | ("ji", "e") => format!("{}e", &base[..base.len() - 1]),
        ("te", "i") | ("de", "i") => format!("{}i", &base[..1]),
        ("to", "u") | ("do", "u") => format!("{}u", &base[..1]),
        ("u", v @ ("i" | "e" | "o")) => format!("w{}", v),
        _ => return None,
    };
    Some(combined)
}

/// Romanizes hiragana and katakana in `text`.
///
/// # Example
///
/// ```rust
/// use kotoba_core::romanize;
///
/// assert_eq!(romanize("にほんご"), "nihongo");
/// assert_eq!(romanize("トウキョウ"), "toukyou");
/// assert_eq!(romanize("きっぷ"), "kippu");
/// assert_eq!(romanize("コーヒー"), "koohii");
/// ```
pub fn romanize(text: &str) -> String {
    let chars: Vec<char> = text.chars().map(to_hiragana).collect();
    let mut output = String::with_capacity(text.len() * 2);
    let mut geminate = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == 'っ' {
            geminate = true;
            i += 1;
            continue;
        }

        if c == 'ー' {
            if let Some(vowel) = output.chars().last().filter(|v| "aeiou".contains(*v)) {
                output.push(vowel);
            }
            i += 1;
            continue;
        }

        let Some(base) = syllable(c) else {
            geminate = false;
            output.push(c);
            i += 1;
            continue;
        };

        let next = chars.get(i + 1).copied();
        let (romaji, consumed) = match next
            .filter(|n| SMALL_Y.contains(n) || SMALL_VOWELS.contains(n))
            .and_then(|n| combine(base, n))
        {
            Some(pair) => (pair, 2),
            None => (base.to_string(), 1),
        };

        if geminate {
            if romaji.starts_with("ch") {
                output.push('t');
            } else if let Some(first) = romaji.chars().next().filter(|f| !"aeioun".contains(*f)) {
                output.push(first);
            }
            geminate = false;
        }

        output.push_str(&romaji);
        i += consumed;
    }

    output
}
