use super::formula_parser::FormulaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element symbol -> molar amount, kept in first-encounter order so that every
/// derived list (fractions, pairs, radii) iterates the same way on every run.
/// Amounts are positive and finite; there is at least one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    amounts: Vec<(String, f64)>,
}

impl Composition {
    /// Builds a composition; repeated symbols are summed into the first occurrence.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, FormulaError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut amounts: Vec<(String, f64)> = Vec::new();
        for (symbol, amount) in pairs {
            let symbol = symbol.into();
            match amounts.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, total)) => *total += amount,
                None => amounts.push((symbol, amount)),
            }
        }
        if amounts.is_empty() {
            return Err(FormulaError::Empty);
        }
        if let Some((symbol, amount)) = amounts.iter().find(|(_, a)| !(a.is_finite() && *a > 0.0)) {
            return Err(FormulaError::NonPositiveAmount {
                element: symbol.clone(),
                amount: *amount,
            });
        }
        Ok(Self { amounts })
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.amounts
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, a)| *a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.amounts.iter().map(|(s, a)| (s.as_str(), *a))
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.amounts.iter().map(|(s, _)| s.as_str())
    }

    pub fn total_amount(&self) -> f64 {
        self.amounts.iter().map(|(_, a)| a).sum()
    }

    /// amount / total amount for every element, same order as the composition
    pub fn atomic_fractions(&self) -> Vec<(String, f64)> {
        let total = self.total_amount();
        self.amounts
            .iter()
            .map(|(s, a)| (s.clone(), a / total))
            .collect()
    }

    /// all 2-combinations of distinct elements, C(n, 2) of them
    pub fn element_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.len() * self.len().saturating_sub(1) / 2);
        for (i, (a, _)) in self.amounts.iter().enumerate() {
            for (b, _) in &self.amounts[i + 1..] {
                pairs.push((a.clone(), b.clone()));
            }
        }
        pairs
    }

    /// Condensed formula, every element followed by its amount (`Fe1Co1.5`).
    /// Parsing the result gives back the same composition.
    pub fn to_formula(&self) -> String {
        self.amounts
            .iter()
            .map(|(s, a)| format!("{}{}", s, a))
            .collect()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_formula())
    }
}
