//! The `normalize` module prepares free-text address input for tokenization.  Expansion operates
//! on a space-padded, upper-cased copy of the input so that substitutions only land on whole
//! tokens, never inside a word.
static EXPANSIONS: [(&str, &str); 38] = [
    (" ST ", " STREET "),
    (" ST.", " STREET"),
    (" AVE ", " AVENUE "),
    (" AVE.", " AVENUE"),
    (" RD ", " ROAD "),
    (" RD.", " ROAD"),
    (" BLVD ", " BOULEVARD "),
    (" BLVD.", " BOULEVARD"),
    (" DR ", " DRIVE "),
    (" DR.", " DRIVE"),
    (" LN ", " LANE "),
    (" LN.", " LANE"),
    (" CT ", " COURT "),
    (" CT.", " COURT"),
    (" PKY ", " PARKWAY "),
    (" PKWY ", " PARKWAY "),
    (" HWY ", " HIGHWAY "),
    (" HWY.", " HIGHWAY"),
    (" PL ", " PLACE "),
    (" PL.", " PLACE"),
    (" SQ ", " SQUARE "),
    (" SQ.", " SQUARE"),
    (" CIR ", " CIRCLE "),
    (" CIR.", " CIRCLE"),
    (" TER ", " TERRACE "),
    (" TER.", " TERRACE"),
    (" APT ", " APARTMENT "),
    (" APT.", " APARTMENT"),
    (" STE ", " SUITE "),
    (" STE.", " SUITE"),
    (" N ", " NORTH "),
    (" S ", " SOUTH "),
    (" E ", " EAST "),
    (" W ", " WEST "),
    (" NE ", " NORTHEAST "),
    (" NW ", " NORTHWEST "),
    (" SE ", " SOUTHEAST "),
    (" SW ", " SOUTHWEST "),
];

static ORDINAL_STREETS: [(&str, &str); 50] = [
    (" 1ST ", " FIRST "),
    (" 2ND ", " SECOND "),
    (" 3RD ", " THIRD "),
    (" 4TH ", " FOURTH "),
    (" 5TH ", " FIFTH "),
    (" 6TH ", " SIXTH "),
    (" 7TH ", " SEVENTH "),
    (" 8TH ", " EIGHTH "),
    (" 9TH ", " NINTH "),
    (" 10TH ", " TENTH "),
    (" 11TH ", " ELEVENTH "),
    (" 12TH ", " TWELFTH "),
    (" 13TH ", " THIRTEENTH "),
    (" 14TH ", " FOURTEENTH "),
    (" 15TH ", " FIFTEENTH "),
    (" 16TH ", " SIXTEENTH "),
    (" 17TH ", " SEVENTEENTH "),
    (" 18TH ", " EIGHTEENTH "),
    (" 19TH ", " NINETEENTH "),
    (" 20TH ", " TWENTIETH "),
    (" 21ST ", " TWENTY-FIRST "),
    (" 22ND ", " TWENTY-SECOND "),
    (" 23RD ", " TWENTY-THIRD "),
    (" 24TH ", " TWENTY-FOURTH "),
    (" 25TH ", " TWENTY-FIFTH "),
    (" 26TH ", " TWENTY-SIXTH "),
    (" 27TH ", " TWENTY-SEVENTH "),
    (" 28TH ", " TWENTY-EIGHTH "),
    (" 29TH ", " TWENTY-NINTH "),
    (" 30TH ", " THIRTIETH "),
    (" 31ST ", " THIRTY-FIRST "),
    (" 32ND ", " THIRTY-SECOND "),
    (" 33RD ", " THIRTY-THIRD "),
    (" 34TH ", " THIRTY-FOURTH "),
    (" 35TH ", " THIRTY-FIFTH "),
    (" 36TH ", " THIRTY-SIXTH "),
    (" 37TH ", " THIRTY-SEVENTH "),
    (" 38TH ", " THIRTY-EIGHTH "),
    (" 39TH ", " THIRTY-NINTH "),
    (" 40TH ", " FORTIETH "),
    (" 41ST ", " FORTY-FIRST "),
    (" 42ND ", " FORTY-SECOND "),
    (" 43RD ", " FORTY-THIRD "),
    (" 44TH ", " FORTY-FOURTH "),
    (" 45TH ", " FORTY-FIFTH "),
    (" 46TH ", " FORTY-SIXTH "),
    (" 47TH ", " FORTY-SEVENTH "),
    (" 48TH ", " FORTY-EIGHTH "),
    (" 49TH ", " FORTY-NINTH "),
    (" 50TH ", " FIFTIETH "),
];

/// The `expand` function wraps the input in single spaces, upper-cases it, and applies the
/// abbreviation and ordinal substitution tables in order.  Each substitution repeats until no
/// further match remains, resuming the scan after the replaced text.  The returned string keeps
/// the space padding; the tokenizer discards it.
pub fn expand(source: &str) -> String {
    let mut buffer = format!(" {} ", source).to_uppercase();
    for (needle, replacement) in EXPANSIONS {
        replace_tokens(&mut buffer, needle, replacement);
    }
    for (needle, replacement) in ORDINAL_STREETS {
        replace_tokens(&mut buffer, needle, replacement);
    }
    buffer
}

fn replace_tokens(buffer: &mut String, needle: &str, replacement: &str) {
    let mut from = 0;
    while let Some(found) = buffer[from..].find(needle) {
        let start = from + found;
        buffer.replace_range(start..start + needle.len(), replacement);
        from = start + replacement.len();
    }
}

/// The `canonicalize_zip` function reduces a postal code to its digits, keeping at most one
/// hyphen, which may only appear once five digits have accumulated.
pub fn canonicalize_zip(postal: &str) -> String {
    let mut filtered = String::with_capacity(postal.len());
    for c in postal.chars() {
        if c.is_ascii_digit() {
            filtered.push(c);
        } else if c == '-' && filtered.len() >= 5 && !filtered.contains('-') {
            filtered.push(c);
        }
    }
    filtered
}

/// The `trim_ordinal` function drops a trailing ST, ND, RD or TH from a token when at least one
/// digit precedes the two-letter tail, so `1ST` reads as `1` and `42ND` as `42`.  Tokens without
/// an ordinal tail pass through unchanged.
pub fn trim_ordinal(token: &str) -> &str {
    if !token.is_ascii() || token.len() < 3 {
        return token;
    }
    let offset = token.len() - 2;
    let bytes = token.as_bytes();
    if matches!(&token[offset..], "ST" | "ND" | "RD" | "TH")
        && bytes[0].is_ascii_digit()
        && bytes[offset - 1].is_ascii_digit()
    {
        &token[..offset]
    } else {
        token
    }
}

/// The `ordinal_street_name` function converts a street-name token to its canonical ordinal word.
/// The token is first trimmed of an ordinal tail; if what remains is a bare numeral from 1 to 50,
/// the matching ordinal word replaces it, so `1 AVE`, `1ST AVE` and `FIRST AVE` all carry the
/// street name `FIRST`.
pub fn ordinal_street_name(token: &str) -> String {
    let trimmed = trim_ordinal(token);
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = trimmed.parse::<usize>() {
            if (1..=ORDINAL_STREETS.len()).contains(&value) {
                return ORDINAL_STREETS[value - 1].1.trim().to_string();
            }
        }
    }
    trimmed.to_string()
}
