//! Elementary operations.
//!
//! Each function computes the primal value and records one [`Contribution`]
//! per operand. Operator overloads on [`Node`] and the rules in
//! [`crate::rule`] both call into here.

use crate::error::{DiffError, Result};
use crate::float::Float;
use crate::node::{Contribution, Node};
use crate::rule::Rule;

// ── Arithmetic ──

#[inline]
pub fn add<F: Float>(a: &Node<F>, b: &Node<F>) -> Node<F> {
    Node::from_op(
        a.value() + b.value(),
        vec![
            Contribution::new(a.clone(), Rule::Identity),
            Contribution::new(b.clone(), Rule::Identity),
        ],
    )
}

/// `a + (−b)`.
#[inline]
pub fn sub<F: Float>(a: &Node<F>, b: &Node<F>) -> Node<F> {
    add(a, &neg(b))
}

#[inline]
pub fn mul<F: Float>(a: &Node<F>, b: &Node<F>) -> Node<F> {
    Node::from_op(
        a.value() * b.value(),
        vec![
            Contribution::new(a.clone(), Rule::ScaledBy(b.clone())),
            Contribution::new(b.clone(), Rule::ScaledBy(a.clone())),
        ],
    )
}

/// `a / b`. Fails if `b` is exactly zero; nothing is recorded in that case.
pub fn div<F: Float>(a: &Node<F>, b: &Node<F>) -> Result<Node<F>> {
    if b.value() == F::zero() {
        log::debug!("division of {} by a zero-valued node", a.value());
        return Err(DiffError::DivisionByZero {
            numerator: a.value().to_f64_lossy(),
        });
    }
    Ok(Node::from_op(
        a.value() / b.value(),
        vec![
            Contribution::new(a.clone(), Rule::DividedBy(b.clone())),
            Contribution::new(
                b.clone(),
                Rule::Quotient {
                    numerator: a.clone(),
                },
            ),
        ],
    ))
}

/// `a × (−1)`.
#[inline]
pub fn neg<F: Float>(a: &Node<F>) -> Node<F> {
    mul(a, &Node::constant(-F::one()))
}

// ── Powers ──

/// Integer power as `n` repeated multiplications starting from the leaf `1`.
///
/// Negative exponents are rejected.
pub fn powi<F: Float>(base: &Node<F>, n: i32) -> Result<Node<F>> {
    if n < 0 {
        log::debug!("rejected negative exponent {n}");
        return Err(DiffError::InvalidExponent {
            exponent: f64::from(n),
        });
    }
    let mut result = Node::one();
    for _ in 0..n {
        result = mul(&result, base);
    }
    Ok(result)
}

/// Float-typed entry point to [`powi`]: the exponent must be a non-negative
/// integer that fits in an `i32`.
pub fn powf<F: Float>(base: &Node<F>, exponent: F) -> Result<Node<F>> {
    let integral = exponent >= F::zero() && exponent.fract() == F::zero();
    match exponent.to_i32() {
        Some(n) if integral => powi(base, n),
        _ => {
            log::debug!("rejected exponent {exponent}");
            Err(DiffError::InvalidExponent {
                exponent: exponent.to_f64_lossy(),
            })
        }
    }
}

// ── Trig / Exp / Log ──

#[inline]
pub fn sin<F: Float>(a: &Node<F>) -> Node<F> {
    Node::from_op(a.value().sin(), vec![Contribution::new(a.clone(), Rule::Cos)])
}

#[inline]
pub fn cos<F: Float>(a: &Node<F>) -> Node<F> {
    Node::from_op(
        a.value().cos(),
        vec![Contribution::new(a.clone(), Rule::NegSin)],
    )
}

#[inline]
pub fn exp<F: Float>(a: &Node<F>) -> Node<F> {
    Node::from_op(a.value().exp(), vec![Contribution::new(a.clone(), Rule::Exp)])
}

/// Natural logarithm. `ln(0)` and negative arguments follow IEEE semantics;
/// the derivative rule divides by `a` and fails during accumulation if `a`
/// is zero.
#[inline]
pub fn ln<F: Float>(a: &Node<F>) -> Node<F> {
    Node::from_op(
        a.value().ln(),
        vec![Contribution::new(a.clone(), Rule::DividedBy(a.clone()))],
    )
}

// Method forms, so expressions read as `x.sin() * y.exp()`.
impl<F: Float> Node<F> {
    #[inline]
    pub fn sin(&self) -> Self {
        sin(self)
    }

    #[inline]
    pub fn cos(&self) -> Self {
        cos(self)
    }

    #[inline]
    pub fn exp(&self) -> Self {
        exp(self)
    }

    #[inline]
    pub fn ln(&self) -> Self {
        ln(self)
    }

    #[inline]
    pub fn powi(&self, n: i32) -> Result<Self> {
        powi(self, n)
    }

    #[inline]
    pub fn powf(&self, exponent: F) -> Result<Self> {
        powf(self, exponent)
    }

    /// Same as the `/` operator.
    #[inline]
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        div(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleKind;

    fn kinds(n: &Node<f64>) -> Vec<RuleKind> {
        n.contributions().iter().map(|c| c.rule().kind()).collect()
    }

    #[test]
    fn add_records_identity_edges() {
        let a = Node::constant(1.0);
        let b = Node::constant(2.0);
        let c = add(&a, &b);
        assert_eq!(c.value(), 3.0);
        assert_eq!(kinds(&c), vec![RuleKind::Identity, RuleKind::Identity]);
        assert!(c.contributions()[0].predecessor().ptr_eq(&a));
        assert!(c.contributions()[1].predecessor().ptr_eq(&b));
    }

    #[test]
    fn mul_scales_by_other_operand() {
        let a = Node::constant(3.0);
        let b = Node::constant(4.0);
        let c = mul(&a, &b);
        assert_eq!(c.value(), 12.0);
        assert!(c.contributions()[0].rule().operand().unwrap().ptr_eq(&b));
        assert!(c.contributions()[1].rule().operand().unwrap().ptr_eq(&a));
    }

    #[test]
    fn div_records_quotient_rule() {
        let c = div(&Node::constant(1.0), &Node::constant(4.0)).unwrap();
        assert_eq!(c.value(), 0.25);
        assert_eq!(kinds(&c), vec![RuleKind::DividedBy, RuleKind::Quotient]);
    }

    #[test]
    fn neg_is_mul_by_minus_one() {
        let a = Node::constant(5.0);
        let n = neg(&a);
        assert_eq!(n.value(), -5.0);
        assert_eq!(n.contributions()[0].rule().operand().unwrap().value(), -1.0);
    }

    #[test]
    fn powi_zero_is_one_leaf() {
        let p = powi(&Node::constant(7.0), 0).unwrap();
        assert_eq!(p.value(), 1.0);
        assert!(p.is_leaf());
    }

    #[test]
    fn powi_repeats_multiplication() {
        let p = powi(&Node::constant(2.0), 3).unwrap();
        assert_eq!(p.value(), 8.0);
        assert_eq!(kinds(&p), vec![RuleKind::ScaledBy, RuleKind::ScaledBy]);
    }

    #[test]
    fn powf_accepts_integral_values_only() {
        assert_eq!(powf(&Node::constant(3.0), 2.0).unwrap().value(), 9.0);
        assert!(powf(&Node::constant(3.0), 0.5).is_err());
        assert!(powf(&Node::constant(3.0), -2.0).is_err());
        assert!(powf(&Node::constant(3.0), f64::NAN).is_err());
        assert!(powf(&Node::constant(3.0), 1e12).is_err());
    }
}
