//! The `parser` module contains functions for parsing unstructured text into address components.
//! Extraction is ordered: postal code, state, unit, house number, directional, suffix, then the
//! street name and city partition.  Each step consumes the tokens it claims; later steps only see
//! what remains.
use crate::address::AddressComponents;
use crate::address_components::{StateCode, StreetDirection, StreetSuffix, UnitDesignator};
use crate::error::{GazetteerError, GazetteerResult};
use crate::normalize;
use nom::IResult;
use nom::Parser as _;
use nom::bytes::complete::take_while1;

/// Upper bound on tokens considered per address; input beyond the bound is ignored.
pub const MAX_TOKENS: usize = 64;
/// Upper bound on the length of a single token.
pub const MAX_TOKEN_LENGTH: usize = 128;

/// The `Parser` struct holds methods for parsing addresses.
#[derive(Debug, Copy, Clone)]
pub struct Parser;

impl Parser {
    /// The `parse` function reads a complete free-text address into its constituent components.
    /// Fails when the input is empty or produces no tokens; every other input parses, with
    /// unrecognized fields left empty.
    pub fn parse(input: &str) -> GazetteerResult<AddressComponents> {
        if input.trim().is_empty() {
            return Err(GazetteerError::EmptyAddress);
        }

        let expanded = normalize::expand(input);
        let mut tokens: Vec<String> = expanded
            .split([' ', ','])
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .take(MAX_TOKENS)
            .map(|token| token.chars().take(MAX_TOKEN_LENGTH).collect())
            .collect();
        if tokens.is_empty() {
            return Err(GazetteerError::EmptyAddress);
        }
        let mut active = vec![true; tokens.len()];
        let mut out = AddressComponents::default();

        // Postal code: rightmost token shaped like a ZIP.
        for idx in (0..tokens.len()).rev() {
            if !active[idx] {
                continue;
            }
            if Self::is_zip_token(&tokens[idx]) {
                out.postal_code = normalize::canonicalize_zip(&tokens[idx]);
                active[idx] = false;
                break;
            }
        }
        tracing::trace!("Postal code: {:?}", out.postal_code);

        // State: rightmost token holding a valid two-letter code.
        for idx in (0..tokens.len()).rev() {
            if !active[idx] {
                continue;
            }
            if let Some(code) = StateCode::match_token(&tokens[idx]) {
                out.state = code.to_string();
                active[idx] = false;
                break;
            }
        }
        tracing::trace!("State: {:?}", out.state);

        // Unit: first designator token, then followups while they keep the unit shape.
        let unit_start = (0..tokens.len()).find(|&idx| {
            active[idx]
                && (UnitDesignator::match_token(&tokens[idx]).is_some()
                    || tokens[idx].starts_with('#'))
        });
        if let Some(start) = unit_start {
            let mut parts = Vec::new();
            let mut idx = start;
            loop {
                parts.push(tokens[idx].clone());
                active[idx] = false;
                if idx + 1 >= tokens.len()
                    || !active[idx + 1]
                    || !Self::is_unit_followup(&tokens[idx + 1])
                {
                    break;
                }
                idx += 1;
            }
            out.unit = parts.join(" ");
        }
        tracing::trace!("Unit: {:?}", out.unit);

        // House number: leading run of digits and hyphens on the first token that has one.  A
        // surviving remainder (601A) stays active for the street name pass.
        for idx in 0..tokens.len() {
            if !active[idx] {
                continue;
            }
            let token = tokens[idx].clone();
            if let Ok((remainder, run)) = Self::house_number(&token) {
                out.street_number = run.trim_end_matches('-').to_string();
                let remainder = remainder.trim_start_matches('-');
                if remainder.is_empty() {
                    active[idx] = false;
                } else {
                    tokens[idx] = remainder.to_string();
                }
                break;
            }
        }
        tracing::trace!("Street number: {:?}", out.street_number);

        // Directional: only the first still-active token is considered, matched or not.
        if let Some(idx) = (0..tokens.len()).find(|&idx| active[idx]) {
            if let Some(direction) = StreetDirection::match_token(&tokens[idx]) {
                out.street_direction = direction.abbreviate().to_string();
                active[idx] = false;
            }
        }
        tracing::trace!("Street direction: {:?}", out.street_direction);

        // Suffix: first token in the suffix vocabulary, stored expanded.
        let mut suffix_index = None;
        for idx in 0..tokens.len() {
            if !active[idx] {
                continue;
            }
            if let Some(suffix) = StreetSuffix::match_token(&tokens[idx]) {
                out.street_suffix = suffix.to_string();
                suffix_index = Some(idx);
                active[idx] = false;
                break;
            }
        }
        tracing::trace!("Street suffix: {:?}", out.street_suffix);

        // Remaining tokens split around the suffix: street name before, city after.  Without a
        // suffix everything reads as street name.
        let mut street_name = Vec::new();
        let mut city = Vec::new();
        for idx in 0..tokens.len() {
            if !active[idx] {
                continue;
            }
            match suffix_index {
                Some(boundary) if idx > boundary => city.push(tokens[idx].clone()),
                _ => street_name.push(normalize::ordinal_street_name(&tokens[idx])),
            }
        }
        out.street_name = street_name.join(" ");
        out.city = city.join(" ");
        tracing::trace!("Street name: {:?}", out.street_name);
        tracing::trace!("City: {:?}", out.city);

        out.compute_canonical_key();
        Ok(out)
    }

    /// The `house_number` function takes the leading run of digits and hyphens from a token,
    /// returning the remainder and the run.  Errs when the token does not start with a digit or
    /// hyphen.
    pub fn house_number(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c.is_ascii_digit() || c == '-').parse(input)
    }

    /// The `is_zip_token` function returns true for tokens of five or more digits, optionally
    /// hyphenated past the fifth position.
    pub fn is_zip_token(token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let mut digits = 0;
        for (idx, c) in token.chars().enumerate() {
            if c.is_ascii_digit() {
                digits += 1;
                continue;
            }
            if c == '-' && idx >= 5 {
                continue;
            }
            return false;
        }
        digits >= 5
    }

    /// The `is_unit_followup` function decides whether a token continues a unit element: it
    /// starts with `#`, starts with a digit, or is at most three characters long.
    pub fn is_unit_followup(token: &str) -> bool {
        token.starts_with('#')
            || token.starts_with(|c: char| c.is_ascii_digit())
            || token.chars().count() <= 3
    }
}
