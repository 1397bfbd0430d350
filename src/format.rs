//! Render solved exponents as a power-law formula.
//!
//! `E = Π × m×v^2`, `t = Π × √L/√a`, `x = Π × 1/(a×b)`: Π is the undetermined
//! dimensionless constant. Half and third powers use root notation, other
//! fractions are written as `^p/q`.

use num_traits::{Signed, Zero};

use crate::dimension::Exponent;
use crate::matrix::QuantitySet;
use crate::solver::SolutionExponents;

/// Closest rational to `value` whose denominator does not exceed `max_denominator`.
///
/// Continued-fraction walk; on a tie between the two final candidates the
/// convergent wins. Returns `value` unchanged when it already qualifies.
pub fn limit_denominator(value: Exponent, max_denominator: i64) -> Exponent {
    let max_denominator = max_denominator.max(1);
    if *value.denom() <= max_denominator {
        return value;
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0i128, 1i128, 1i128, 0i128);
    let (mut n, mut d) = (*value.numer() as i128, *value.denom() as i128);
    let max = max_denominator as i128;
    loop {
        let a = n.div_euclid(d);
        let q2 = q0 + a * q1;
        if q2 > max {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max - q0) / q1;
    let bound1 = (p0 + k * p1, q0 + k * q1);
    let bound2 = (p1, q1);

    // |p/q - x| compared exactly: x = xn/xd.
    let (xn, xd) = (*value.numer() as i128, *value.denom() as i128);
    let distance = |(p, q): (i128, i128)| ((p * xd - xn * q).abs(), q * xd);
    let (e1n, e1d) = distance(bound1);
    let (e2n, e2d) = distance(bound2);
    let (p, q) = if e2n * e1d <= e1n * e2d { bound2 } else { bound1 };
    Exponent::new(p as i64, q as i64)
}

/// Lossy conversion used for magnitude checks.
pub fn exponent_to_f64(value: Exponent) -> f64 {
    *value.numer() as f64 / *value.denom() as f64
}

/// Formats solutions as `<out> = Π × numerator/denominator`.
#[derive(Debug, Clone, Copy)]
pub struct FormulaFormatter {
    pub max_denominator: i64,
    pub zero_tolerance: f64,
}

impl Default for FormulaFormatter {
    fn default() -> Self {
        Self {
            max_denominator: 100,
            zero_tolerance: 1e-10,
        }
    }
}

impl FormulaFormatter {
    pub fn format(&self, set: &QuantitySet<'_>, exponents: &SolutionExponents) -> String {
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();

        for (quantity, &exp) in set.predictors().iter().zip(exponents.predictors()) {
            if exponent_to_f64(exp).abs() < self.zero_tolerance {
                continue;
            }
            let frac = limit_denominator(exp, self.max_denominator);
            if frac.is_zero() {
                continue;
            }
            let term = render_term(quantity.symbol(), frac.abs());
            if frac.is_positive() {
                numerator.push(term);
            } else {
                denominator.push(term);
            }
        }

        join_formula(set.output().symbol(), &numerator, &denominator)
    }

    /// `out = Π × a×b×…` for sets where nothing carries a dimension.
    pub fn format_dimensionless(&self, set: &QuantitySet<'_>) -> String {
        let symbols: Vec<String> = set
            .predictors()
            .iter()
            .map(|q| q.symbol().to_string())
            .collect();
        join_formula(set.output().symbol(), &symbols, &[])
    }
}

fn render_term(symbol: &str, exp: Exponent) -> String {
    let numer = *exp.numer();
    match *exp.denom() {
        2 if numer == 1 => format!("√{symbol}"),
        2 => format!("√({symbol}^{numer})"),
        3 if numer == 1 => format!("∛{symbol}"),
        3 => format!("∛({symbol}^{numer})"),
        1 if numer == 1 => symbol.to_string(),
        1 => format!("{symbol}^{numer}"),
        _ => format!("{symbol}^{exp}"),
    }
}

fn join_formula(target: &str, numerator: &[String], denominator: &[String]) -> String {
    if numerator.is_empty() && denominator.is_empty() {
        return format!("{target} = Π");
    }
    let num = if numerator.is_empty() {
        "1".to_string()
    } else {
        numerator.join("×")
    };
    match denominator {
        [] => format!("{target} = Π × {num}"),
        [single] => format!("{target} = Π × {num}/{single}"),
        many => format!("{target} = Π × {num}/({})", many.join("×")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuantityCatalog;

    const NONE: [&str; 0] = [];

    fn exps(values: &[(i64, i64)]) -> SolutionExponents {
        SolutionExponents::from_predictors(values.iter().map(|&(n, d)| Exponent::new(n, d)))
    }

    #[test]
    fn integer_powers_never_use_roots() {
        let catalog = QuantityCatalog::builtin();
        let set = QuantitySet::resolve(&catalog, "energy", &["mass", "velocity"], &NONE).unwrap();
        let formula = FormulaFormatter::default().format(&set, &exps(&[(1, 1), (2, 1)]));
        assert_eq!(formula, "E = Π × m×v^2");
        assert!(!formula.contains('√'));
    }

    #[test]
    fn roots_and_single_denominator() {
        let catalog = QuantityCatalog::builtin();
        let set = QuantitySet::resolve(&catalog, "time", &["length", "acceleration"], &NONE)
            .unwrap();
        let formula = FormulaFormatter::default().format(&set, &exps(&[(1, 2), (-1, 2)]));
        assert_eq!(formula, "t = Π × √L/√a");
    }

    #[test]
    fn multiple_denominator_terms_are_parenthesized() {
        let catalog = QuantityCatalog::builtin();
        let set = QuantitySet::resolve(&catalog, "frequency", &["mass", "velocity"], &NONE)
            .unwrap();
        let formula = FormulaFormatter::default().format(&set, &exps(&[(-3, 2), (-1, 3)]));
        assert_eq!(formula, "f = Π × 1/(√(m^3)×∛v)");
    }

    #[test]
    fn other_fractions_use_explicit_power() {
        let catalog = QuantityCatalog::builtin();
        let set = QuantitySet::resolve(&catalog, "power", &["mass", "velocity"], &NONE).unwrap();
        let formula = FormulaFormatter::default().format(&set, &exps(&[(3, 4), (2, 3)]));
        assert_eq!(formula, "P = Π × m^3/4×∛(v^2)");
    }

    #[test]
    fn zero_exponents_are_skipped() {
        let catalog = QuantityCatalog::builtin();
        let set = QuantitySet::resolve(&catalog, "fine_structure", &["mass"], &NONE).unwrap();
        let formula = FormulaFormatter::default().format(&set, &exps(&[(0, 1)]));
        assert_eq!(formula, "α = Π");
    }

    #[test]
    fn dimensionless_set_joins_every_symbol() {
        let catalog = QuantityCatalog::builtin();
        let set = QuantitySet::resolve(&catalog, "fine_structure", &["dimensionless"], &NONE)
            .unwrap();
        assert_eq!(FormulaFormatter::default().format_dimensionless(&set), "α = Π × D");
    }

    #[test]
    fn limit_denominator_matches_best_approximation() {
        assert_eq!(limit_denominator(Exponent::new(3, 4), 100), Exponent::new(3, 4));
        // 314159/100000 → 311/99 with denominator ≤ 100.
        assert_eq!(
            limit_denominator(Exponent::new(314_159, 100_000), 100),
            Exponent::new(311, 99)
        );
        assert_eq!(
            limit_denominator(Exponent::new(-1, 1000), 100),
            Exponent::new(0, 1)
        );
        assert_eq!(limit_denominator(Exponent::new(1, 201), 100), Exponent::new(0, 1));
        assert_eq!(limit_denominator(Exponent::new(1, 199), 100), Exponent::new(1, 100));
    }
}
