//! Pinyin tone-number to diacritic conversion.
//!
//! Turns `ni3 hao3` into `nǐ hǎo`. A syllable is a run of Latin letters,
//! `ü` and `:` followed by a single tone digit. `0` and `5` are the neutral
//! tone and only drop the digit. `v` and `u:` are accepted as spellings of
//! `ü`. Text that does not look like a numbered syllable is copied as is,
//! so converting already-accented text is a no-op.

/// Marked forms of each vowel for tones 1-4.
const TONE_MARKS: [(char, [char; 4]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
];

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Neutral,
    /// Tones 1-4, stored as an index into the mark table.
    Marked(usize),
}

impl Tone {
    fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' | '5' => Some(Self::Neutral),
            '1'..='4' => Some(Self::Marked(c as usize - '1' as usize)),
            _ => None,
        }
    }
}

/// Convert every numbered syllable in `input` to its diacritic form.
pub fn to_accents(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if !is_syllable_char(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_syllable_char(chars[i]) {
            i += 1;
        }
        let syllable = &chars[start..i];

        match tone_at(&chars, i) {
            Some(tone) => {
                // A syllable with no vowel still consumes its digit
                match apply_tone(syllable, tone) {
                    Some(marked) => out.push_str(&marked),
                    None => out.extend(syllable),
                }
                i += 1;
            }
            None => out.extend(syllable),
        }
    }

    out
}

/// Replace every tone-marked vowel with its bare letter, keeping `ü`.
pub fn strip_tone_marks(input: &str) -> String {
    input
        .chars()
        .map(|c| bare_vowel(c).unwrap_or(c))
        .collect()
}

fn is_syllable_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'ü' | 'Ü' | ':')
}

/// The tone digit at `pos`, unless it is part of a longer number.
fn tone_at(chars: &[char], pos: usize) -> Option<Tone> {
    let tone = Tone::from_digit(*chars.get(pos)?)?;
    match chars.get(pos + 1) {
        Some(next) if next.is_ascii_digit() => None,
        _ => Some(tone),
    }
}

/// Mark one syllable. `None` means there was no vowel to carry the tone.
fn apply_tone(syllable: &[char], tone: Tone) -> Option<String> {
    let mut letters = normalize_umlaut(syllable);

    let index = match tone {
        Tone::Neutral => return Some(letters.into_iter().collect()),
        Tone::Marked(index) => index,
    };

    let lower: Vec<char> = letters.iter().map(|&c| to_lower(c)).collect();
    let pos = mark_position(&lower)?;
    let (_, marks) = TONE_MARKS.iter().find(|(vowel, _)| *vowel == lower[pos])?;

    letters[pos] = if letters[pos].is_uppercase() {
        to_upper(marks[index])
    } else {
        marks[index]
    };
    Some(letters.into_iter().collect())
}

/// Rewrite `v` and `u:` as `ü`, keeping case.
fn normalize_umlaut(syllable: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(syllable.len());
    let mut iter = syllable.iter().copied().peekable();

    while let Some(c) = iter.next() {
        match c {
            'v' => out.push('ü'),
            'V' => out.push('Ü'),
            'u' | 'U' if iter.peek() == Some(&':') => {
                iter.next();
                out.push(if c == 'U' { 'Ü' } else { 'ü' });
            }
            _ => out.push(c),
        }
    }

    out
}

/// Index of the vowel that carries the tone mark.
fn mark_position(lower: &[char]) -> Option<usize> {
    if let Some(pos) = lower.iter().position(|&c| c == 'a') {
        return Some(pos);
    }
    if let Some(pos) = lower.iter().position(|&c| c == 'e') {
        return Some(pos);
    }
    if let Some(pos) = lower.windows(2).position(|w| matches!(w, ['o', 'u'])) {
        return Some(pos);
    }
    if let Some(pos) = lower
        .windows(2)
        .position(|w| matches!(w, ['i', 'u'] | ['u', 'i']))
    {
        return Some(pos + 1);
    }
    // uo, io: the o is marked (guó, xióng)
    if let Some(pos) = lower.iter().position(|&c| c == 'o') {
        return Some(pos);
    }
    lower.iter().position(|c| VOWELS.contains(c))
}

fn bare_vowel(c: char) -> Option<char> {
    let lower = to_lower(c);
    let (base, _) = TONE_MARKS
        .iter()
        .find(|(_, marks)| marks.contains(&lower))?;
    Some(if c.is_uppercase() { to_upper(*base) } else { *base })
}

fn to_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn to_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}
