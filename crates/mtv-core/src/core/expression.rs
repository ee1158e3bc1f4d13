use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Sub};

/// An affine expression `constant + Σ coeff·x[index]` over binary variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    pub constant: f64,
    pub terms: BTreeMap<usize, f64>,
}

impl LinearExpr {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_const(constant: f64) -> Self {
        Self {
            constant,
            terms: BTreeMap::new(),
        }
    }

    pub fn from_var(index: usize, coeff: f64) -> Self {
        let mut expr = Self::zero();
        expr.add_term(index, coeff);
        expr
    }

    pub fn add_term(&mut self, index: usize, coeff: f64) {
        *self.terms.entry(index).or_insert(0.0) += coeff;
    }

    pub fn scale(mut self, s: f64) -> Self {
        self.constant *= s;
        for v in self.terms.values_mut() {
            *v *= s;
        }
        self
    }

    pub fn evaluate(&self, bits: &[u8]) -> f64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|(&i, &c)| c * f64::from(bits[i]))
                .sum::<f64>()
    }
}

impl Add for LinearExpr {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for LinearExpr {
    fn add_assign(&mut self, rhs: Self) {
        self.constant += rhs.constant;
        for (i, c) in rhs.terms {
            self.add_term(i, c);
        }
    }
}

impl Sub for LinearExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.scale(-1.0)
    }
}

/// A quadratic expression over binary variables.
///
/// Quadratic keys are canonical `(i, j)` pairs with `i <= j`; diagonal entries are
/// kept as `x[i]·x[i]` rather than folded into the linear part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadraticExpr {
    pub constant: f64,
    pub linear: BTreeMap<usize, f64>,
    pub quadratic: BTreeMap<(usize, usize), f64>,
}

impl QuadraticExpr {
    pub fn zero() -> Self {
        Self::default()
    }

    fn add_linear(&mut self, index: usize, coeff: f64) {
        *self.linear.entry(index).or_insert(0.0) += coeff;
    }

    fn add_quadratic(&mut self, i: usize, j: usize, coeff: f64) {
        let key = if i <= j { (i, j) } else { (j, i) };
        *self.quadratic.entry(key).or_insert(0.0) += coeff;
    }

    /// Adds `weight · expr²`, expanded exactly.
    pub fn add_squared(&mut self, expr: &LinearExpr, weight: f64) {
        let c = expr.constant;
        self.constant += weight * c * c;

        let terms: Vec<(usize, f64)> = expr
            .terms
            .iter()
            .filter(|&(_, &a)| a != 0.0)
            .map(|(&i, &a)| (i, a))
            .collect();

        for (k, &(i, a)) in terms.iter().enumerate() {
            if c != 0.0 {
                self.add_linear(i, weight * 2.0 * c * a);
            }
            self.add_quadratic(i, i, weight * a * a);
            for &(j, b) in &terms[k + 1..] {
                self.add_quadratic(i, j, weight * 2.0 * a * b);
            }
        }
    }

    /// Adds `scale · other`.
    pub fn add_scaled(&mut self, other: &QuadraticExpr, scale: f64) {
        self.constant += scale * other.constant;
        for (&i, &c) in &other.linear {
            self.add_linear(i, scale * c);
        }
        for (&(i, j), &c) in &other.quadratic {
            self.add_quadratic(i, j, scale * c);
        }
    }

    /// The largest variable index referenced, if any.
    pub fn max_index(&self) -> Option<usize> {
        let linear = self.linear.keys().next_back().copied();
        let quadratic = self.quadratic.keys().map(|&(_, j)| j).max();
        linear.max(quadratic)
    }

    pub fn evaluate(&self, bits: &[u8]) -> f64 {
        let x = |i: usize| f64::from(bits[i]);
        let linear: f64 = self.linear.iter().map(|(&i, &c)| c * x(i)).sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|(&(i, j), &c)| c * x(i) * x(j))
            .sum();
        self.constant + linear + quadratic
    }
}
