//! # Formula parser
//!
//! Turns a condensed chemical formula into a [`Composition`]:
//! `"Fe25Co25Cr25Ni25"`, `"Al0.3CoCrFeNi"`, `"(FeCo)2(CrNi)0.5"`, `"Fe2(SO4)3(2+)"`.
//!
//! 1. square brackets are dropped, then a trailing ionic charge is cut off:
//!    a bracketed charge at the very end (`(2+)`, `(-3)`, `(+)`), otherwise
//!    everything from the first `+` or `-`;
//! 2. the rest is tokenized left to right into element symbols (one upper-case
//!    letter, optionally one lower-case letter), numbers (integer or decimal)
//!    and parentheses; any other character is skipped;
//! 3. tokens are folded over a stack of groups. `(` opens a group, `)` merges it
//!    into a single map appended to the enclosing group, a symbol appends `{symbol: 1}`,
//!    a number multiplies the map appended last, so `(CrNi)2` doubles the whole group.
//!
//! With checking on (the default), letters that did not end up in any token mean the
//! input is not a formula, e.g. `"Fex"` or `"iron"`. This is a plausibility check only:
//! symbols are not checked against the periodic table here.
use super::composition::Composition;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    #[error("'{0}' may not be a formula: extra letters were detected")]
    NotAFormula(String),
    #[error("unbalanced parentheses in '{0}'")]
    UnbalancedParentheses(String),
    #[error("number {number} in '{formula}' does not follow an element or a group")]
    DanglingNumber { formula: String, number: String },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("formula contains no elements")]
    Empty,
    #[error("amount of {element} must be positive, got {amount}")]
    NonPositiveAmount { element: String, amount: f64 },
}

/// one group of the parse stack: the maps appended so far, in encounter order
type Group = Vec<Vec<(String, f64)>>;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"[A-Z][a-z]?|(?:\d*[.])?\d+|\d+|[()]").expect("token pattern is valid")
    })
}

fn charge_regex() -> &'static Regex {
    static CHARGE: OnceLock<Regex> = OnceLock::new();
    CHARGE.get_or_init(|| {
        Regex::new(r"\([+-]?\d+\)$|\(\d+[+-]?\)$|\([+-]+\)$").expect("charge pattern is valid")
    })
}

/// Removes brackets and a trailing ionic charge annotation
pub fn strip_charge(formula: &str) -> String {
    let formula: String = formula.chars().filter(|c| *c != '[' && *c != ']').collect();
    if let Some(charge) = charge_regex().find(&formula) {
        return formula[..charge.start()].to_string();
    }
    match formula.find(['+', '-']) {
        Some(idx) => formula[..idx].to_string(),
        None => formula,
    }
}

/// Parses with the letter check enabled
pub fn parse_formula(formula: &str) -> Result<Composition, FormulaError> {
    parse_formula_with(formula, true)
}

pub fn parse_formula_with(formula: &str, check: bool) -> Result<Composition, FormulaError> {
    let stripped = strip_charge(formula);
    let tokens: Vec<&str> = token_regex()
        .find_iter(&stripped)
        .map(|m| m.as_str())
        .collect();
    debug!("formula '{}' tokenized as {:?}", formula, tokens);

    if check {
        let token_letters: BTreeSet<char> = tokens
            .iter()
            .flat_map(|t| t.chars())
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        let formula_letters: BTreeSet<char> = stripped
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        if token_letters != formula_letters {
            return Err(FormulaError::NotAFormula(formula.to_string()));
        }
    }

    let mut stack: Vec<Group> = vec![Vec::new()];
    for token in tokens {
        match token {
            "(" => stack.push(Vec::new()),
            ")" => {
                if stack.len() < 2 {
                    return Err(FormulaError::UnbalancedParentheses(formula.to_string()));
                }
                let closed = stack.pop().unwrap_or_default();
                let merged = merge_group(closed);
                if let Some(parent) = stack.last_mut() {
                    parent.push(merged);
                }
            }
            _ if token.starts_with(|c: char| c.is_ascii_uppercase()) => {
                if let Some(current) = stack.last_mut() {
                    current.push(vec![(token.to_string(), 1.0)]);
                }
            }
            _ => {
                let multiplier: f64 = token
                    .parse()
                    .map_err(|_| FormulaError::InvalidNumber(token.to_string()))?;
                let last = stack
                    .last_mut()
                    .and_then(|current| current.last_mut())
                    .ok_or_else(|| FormulaError::DanglingNumber {
                        formula: formula.to_string(),
                        number: token.to_string(),
                    })?;
                for (_, count) in last.iter_mut() {
                    *count *= multiplier;
                }
            }
        }
    }
    if stack.len() != 1 {
        return Err(FormulaError::UnbalancedParentheses(formula.to_string()));
    }
    let base = stack.pop().unwrap_or_default();
    Composition::from_pairs(merge_group(base))
}

/// sums counts per element, first-encounter order preserved
fn merge_group(group: Group) -> Vec<(String, f64)> {
    let mut merged: Vec<(String, f64)> = Vec::new();
    for (element, count) in group.into_iter().flatten() {
        match merged.iter_mut().find(|(e, _)| *e == element) {
            Some((_, total)) => *total += count,
            None => merged.push((element, count)),
        }
    }
    merged
}
