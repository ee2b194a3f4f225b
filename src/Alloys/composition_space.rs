//! # Composition space
//!
//! Enumerates candidate alloys over a fixed set of elements for range screening.
//! Each element takes a value from the grid `start, start + step, ...` (strictly below
//! `end`); a candidate is any assignment whose values are all non-zero and add up to
//! 100 at.%. Multisets of grid values are found first, then expanded into their
//! distinct permutations, so `Fe10Ni90` and `Fe90Ni10` are both candidates but no
//! candidate appears twice.
//!
//! Screening runs one independent calculator per candidate on the rayon pool; the
//! reference tables are shared read-only and results come back in candidate order.
use super::HEA_calculator::{HEACalculator, HEAError};
use super::alloy_result::AlloyResult;
use super::composition::Composition;
use super::formula_parser::parse_formula;
use crate::Data::data_tables::DataTables;
use log::info;
use rayon::prelude::*;

const SUM_TOLERANCE: f64 = 1e-9;
/// upper bound on grid values per element
pub const MAX_GRID_POINTS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct CompositionSpace {
    elements: Vec<String>,
    start: f64,
    end: f64,
    step: f64,
}

impl CompositionSpace {
    /// `elements` is read as a formula, only its symbols are used ("AlCoCrFeNi").
    pub fn new(elements: &str, start: f64, end: f64, step: f64) -> Result<Self, HEAError> {
        let symbols: Vec<String> = parse_formula(elements)?
            .elements()
            .map(str::to_string)
            .collect();
        if symbols.len() < 2 {
            return Err(HEAError::SingleElement(elements.to_string()));
        }
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(HEAError::InvalidRange(
                "start, end and step must be finite numbers".to_string(),
            ));
        }
        if !(0.0 <= start && start <= end && end <= 100.0) {
            return Err(HEAError::InvalidRange(format!(
                "expected 0 <= start <= end <= 100, got start = {}, end = {}",
                start, end
            )));
        }
        if step <= 0.0 {
            return Err(HEAError::InvalidRange(format!(
                "step must be positive, got {}",
                step
            )));
        }
        let points = ((end - start) / step).ceil();
        if points > MAX_GRID_POINTS as f64 {
            return Err(HEAError::InvalidRange(format!(
                "step {} gives {} grid values, at most {} are allowed",
                step, points, MAX_GRID_POINTS
            )));
        }
        Ok(Self {
            elements: symbols,
            start,
            end,
            step,
        })
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// grid values start + k·step below end, zero excluded
    pub fn grid(&self) -> Vec<f64> {
        let mut grid = Vec::new();
        let mut k = 0usize;
        loop {
            let value = self.start + k as f64 * self.step;
            if value >= self.end - SUM_TOLERANCE {
                break;
            }
            if value > 0.0 {
                grid.push(value);
            }
            k += 1;
        }
        grid
    }

    /// Candidate at.% vectors, one value per element, ordered lexicographically
    pub fn compositions(&self) -> Vec<Vec<f64>> {
        let grid = self.grid();
        let n = self.elements.len();
        let mut multisets: Vec<Vec<usize>> = Vec::new();
        let mut current = Vec::with_capacity(n);
        collect_multisets(&grid, n, 0, 0.0, &mut current, &mut multisets);

        let mut candidates: Vec<Vec<usize>> = Vec::new();
        for mut indices in multisets {
            // multisets come out sorted, which is the first permutation
            loop {
                candidates.push(indices.clone());
                if !next_permutation(&mut indices) {
                    break;
                }
            }
        }
        candidates.sort();
        candidates.dedup();
        info!(
            "{} candidate compositions over {:?}",
            candidates.len(),
            self.elements
        );
        candidates
            .into_iter()
            .map(|indices| indices.into_iter().map(|i| grid[i]).collect())
            .collect()
    }

    pub fn formulas(&self) -> Vec<String> {
        self.compositions()
            .iter()
            .map(|values| self.formula_of(values))
            .collect()
    }

    fn formula_of(&self, values: &[f64]) -> String {
        self.elements
            .iter()
            .zip(values)
            .map(|(symbol, value)| format!("{}{}", symbol, format_amount(*value)))
            .collect()
    }

    /// Calculates every candidate in parallel; one entry per candidate, in order.
    pub fn screen(&self, tables: &DataTables) -> Vec<Result<AlloyResult, HEAError>> {
        let candidates = self.compositions();
        candidates
            .par_iter()
            .map(|values| self.calculate_candidate(values, tables))
            .collect()
    }

    fn calculate_candidate(
        &self,
        values: &[f64],
        tables: &DataTables,
    ) -> Result<AlloyResult, HEAError> {
        let formula = self.formula_of(values);
        let composition =
            Composition::from_pairs(self.elements.iter().cloned().zip(values.iter().copied()))?;
        HEACalculator::from_composition(&formula, composition, tables)?.calculate()
    }
}

/// non-decreasing index sequences of length `n` whose grid values sum to 100
fn collect_multisets(
    grid: &[f64],
    n: usize,
    from: usize,
    partial: f64,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == n {
        if (partial - 100.0).abs() <= SUM_TOLERANCE {
            out.push(current.clone());
        }
        return;
    }
    for i in from..grid.len() {
        let sum = partial + grid[i];
        // the grid is increasing, nothing further can fit
        if sum > 100.0 + SUM_TOLERANCE {
            break;
        }
        current.push(i);
        collect_multisets(grid, n, i, sum, current, out);
        current.pop();
    }
}

/// Rearranges into the next lexicographic permutation; false once the last one is reached
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

/// shortest decimal form, float noise from the grid arithmetic trimmed
fn format_amount(value: f64) -> String {
    let text = format!("{:.6}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validation() {
        assert!(matches!(
            CompositionSpace::new("FeNi", 10.0, 5.0, 5.0),
            Err(HEAError::InvalidRange(_))
        ));
        assert!(matches!(
            CompositionSpace::new("FeNi", 0.0, 120.0, 5.0),
            Err(HEAError::InvalidRange(_))
        ));
        assert!(matches!(
            CompositionSpace::new("FeNi", 0.0, 100.0, 0.0),
            Err(HEAError::InvalidRange(_))
        ));
        assert!(matches!(
            CompositionSpace::new("FeNi", 0.0, 100.0, 1e-12),
            Err(HEAError::InvalidRange(_))
        ));
        assert!(matches!(
            CompositionSpace::new("FeNi", 0.0, 100.0, 1e-3),
            Err(HEAError::InvalidRange(_))
        ));
        assert_eq!(
            CompositionSpace::new("FeNi", 0.0, 100.0, 0.01)
                .unwrap()
                .grid()
                .len(),
            MAX_GRID_POINTS - 1
        );
        assert!(matches!(
            CompositionSpace::new("Fe", 0.0, 100.0, 10.0),
            Err(HEAError::SingleElement(_))
        ));
        assert!(matches!(
            CompositionSpace::new("fe ni", 0.0, 100.0, 10.0),
            Err(HEAError::Formula(_))
        ));
    }

    #[test]
    fn test_grid_is_half_open_without_zero() {
        let space = CompositionSpace::new("FeNi", 0.0, 30.0, 10.0).unwrap();
        assert_eq!(space.grid(), vec![10.0, 20.0]);
        let space = CompositionSpace::new("FeNi", 5.0, 20.0, 2.5).unwrap();
        assert_eq!(space.grid().len(), 6);
    }

    #[test]
    fn test_binary_candidates() {
        let space = CompositionSpace::new("FeNi", 0.0, 100.0, 10.0).unwrap();
        let candidates = space.compositions();
        // 10 + 90 ... 90 + 10
        assert_eq!(candidates.len(), 9);
        assert_eq!(candidates[0], vec![10.0, 90.0]);
        assert_eq!(candidates[8], vec![90.0, 10.0]);
        assert_eq!(space.formulas()[4], "Fe50Ni50");
    }

    #[test]
    fn test_candidates_sum_to_100_without_duplicates() {
        let space = CompositionSpace::new("AlCoCrFe", 5.0, 50.0, 5.0).unwrap();
        let candidates = space.compositions();
        assert!(!candidates.is_empty());
        for values in &candidates {
            assert_eq!(values.len(), 4);
            assert_relative_eq!(values.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
            assert!(values.iter().all(|v| *v > 0.0 && *v < 50.0));
        }
        let mut sorted = candidates.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), candidates.len());
        assert!(candidates.contains(&vec![25.0, 25.0, 25.0, 25.0]));
        assert!(candidates.contains(&vec![45.0, 5.0, 5.0, 45.0]));
    }

    #[test]
    fn test_fractional_step_formulas() {
        let space = CompositionSpace::new("FeNiCo", 30.0, 40.0, 0.1).unwrap();
        let formulas = space.formulas();
        assert!(formulas.iter().all(|f| !f.contains("0000")));
        assert!(formulas.contains(&"Fe33.3Ni33.3Co33.4".to_string()));
    }

    #[test]
    fn test_next_permutation() {
        let mut v = vec![0, 1, 1];
        let mut seen = vec![v.clone()];
        while next_permutation(&mut v) {
            seen.push(v.clone());
        }
        assert_eq!(seen, vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]);
    }

    #[test]
    fn test_parallel_screening_matches_sequential() {
        let tables = DataTables::builtin().unwrap();
        let space = CompositionSpace::new("FeCoNi", 10.0, 60.0, 10.0).unwrap();
        let parallel = space.screen(&tables);
        let sequential: Vec<Result<AlloyResult, HEAError>> = space
            .formulas()
            .iter()
            .map(|f| HEACalculator::with_tables(f, &tables).and_then(|mut c| c.calculate()))
            .collect();
        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            let (p, s) = (p.as_ref().unwrap(), s.as_ref().unwrap());
            assert_eq!(p.formula, s.formula);
            assert_relative_eq!(p.mixing_enthalpy, s.mixing_enthalpy, epsilon = 1e-12);
            assert_eq!(p.models, s.models);
        }
    }
}
