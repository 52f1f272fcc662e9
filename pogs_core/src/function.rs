//! Separable objective terms and their proximal operators

use num_traits::Float;
use crate::lambertw::{lambertw_exp, newton_bracket};

//

/// Scalar convex function \\(h\\)
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// The discriminants are the numeric codes accepted by [`Function::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function
{
    /// \\(|x|\\)
    Abs = 0,
    /// \\(e^x\\)
    Exp = 1,
    /// \\(x^2/2\\) if \\(|x| \le 1\\), \\(|x| - 1/2\\) otherwise
    Huber = 2,
    /// \\(x\\)
    Identity = 3,
    /// \\(I(0 \le x \le 1)\\)
    IndBox01 = 4,
    /// \\(I(x = 0)\\)
    IndEq0 = 5,
    /// \\(I(x \ge 0)\\)
    IndGe0 = 6,
    /// \\(I(x \le 0)\\)
    IndLe0 = 7,
    /// \\(\log(1 + e^x)\\)
    Logistic = 8,
    /// \\(\max(0, -x)\\)
    MaxNeg0 = 9,
    /// \\(\max(0, x)\\)
    MaxPos0 = 10,
    /// \\(x \log x\\)
    NegEntr = 11,
    /// \\(-\log x\\)
    NegLog = 12,
    /// \\(1/x\\)
    Recipr = 13,
    /// \\(x^2/2\\)
    Square = 14,
    /// \\(0\\)
    Zero = 15,
}

impl Function
{
    const ALL: [Function; 16] = [
        Function::Abs, Function::Exp, Function::Huber, Function::Identity,
        Function::IndBox01, Function::IndEq0, Function::IndGe0, Function::IndLe0,
        Function::Logistic, Function::MaxNeg0, Function::MaxPos0, Function::NegEntr,
        Function::NegLog, Function::Recipr, Function::Square, Function::Zero,
    ];

    /// Converts a numeric code.
    /// 
    /// Returns the [`Function`], or `None` if `code` is not an integral code.
    pub fn from_code(code: f64) -> Option<Function>
    {
        if code.is_finite() && code >= 0. && code == Float::trunc(code) {
            Self::ALL.get(code as usize).copied()
        }
        else {
            None
        }
    }

    /// Numeric code of the function.
    pub fn code(&self) -> u8
    {
        *self as u8
    }

    /// Evaluates \\(h(x)\\).
    /// 
    /// Indicator functions are evaluated as zero regardless of `x`.
    pub fn eval<F: Float>(&self, x: F) -> F
    {
        let f0 = F::zero();
        let f1 = F::one();
        let f2 = f1 + f1;

        match self {
            Function::Abs => x.abs(),
            Function::Exp => x.exp(),
            Function::Huber => {
                if x.abs() <= f1 {
                    x * x / f2
                }
                else {
                    x.abs() - f1 / f2
                }
            },
            Function::Identity => x,
            Function::IndBox01 | Function::IndEq0 | Function::IndGe0 | Function::IndLe0 => f0,
            Function::Logistic => {
                if x > f0 {
                    x + (-x).exp().ln_1p()
                }
                else {
                    x.exp().ln_1p()
                }
            },
            Function::MaxNeg0 => (-x).max(f0),
            Function::MaxPos0 => x.max(f0),
            Function::NegEntr => {
                if x > f0 {
                    x * x.ln()
                }
                else {
                    f0
                }
            },
            Function::NegLog => -x.ln(),
            Function::Recipr => x.recip(),
            Function::Square => x * x / f2,
            Function::Zero => f0,
        }
    }

    /// Calculates \\({\bf prox}_{h,\rho}(v) = \arg\min_x h(x) + {\rho \over 2}(x - v)^2\\).
    /// 
    /// * `v` is \\(v\\).
    /// * `rho` is \\(\rho > 0\\).
    pub fn prox<F: Float>(&self, v: F, rho: F) -> F
    {
        let f0 = F::zero();
        let f1 = F::one();
        let f2 = f1 + f1;
        let f4 = f2 + f2;
        let rho_inv = rho.recip();

        match self {
            Function::Abs => {
                (v - rho_inv).max(f0) + (v + rho_inv).min(f0)
            },
            Function::Exp => {
                v - lambertw_exp(v - rho.ln())
            },
            Function::Huber => {
                if v.abs() <= f1 + rho_inv {
                    rho * v / (f1 + rho)
                }
                else {
                    v - v.signum() * rho_inv
                }
            },
            Function::Identity => v - rho_inv,
            Function::IndBox01 => v.max(f0).min(f1),
            Function::IndEq0 => f0,
            Function::IndGe0 => v.max(f0),
            Function::IndLe0 => v.min(f0),
            Function::Logistic => {
                // sigmoid(x) + rho (x - v) = 0, root in [v - 1/rho, v]
                let sigmoid = |x: F| (f1 + (-x).exp()).recip();
                newton_bracket(
                    |x| sigmoid(x) + rho * (x - v),
                    |x| {
                        let s = sigmoid(x);
                        s * (f1 - s) + rho
                    },
                    v - rho_inv, v
                )
            },
            Function::MaxNeg0 => {
                if v < -rho_inv {
                    v + rho_inv
                }
                else if v > f0 {
                    v
                }
                else {
                    f0
                }
            },
            Function::MaxPos0 => {
                if v > rho_inv {
                    v - rho_inv
                }
                else if v < f0 {
                    v
                }
                else {
                    f0
                }
            },
            Function::NegEntr => {
                lambertw_exp(rho * v - f1 + rho.ln()) * rho_inv
            },
            Function::NegLog => {
                let sq = (v * v + f4 * rho_inv).sqrt();
                if v < f0 {
                    // avoids cancellation of v + sq
                    f2 / (rho * (sq - v))
                }
                else {
                    (v + sq) / f2
                }
            },
            Function::Recipr => {
                // rho (x - v) - 1/x^2 = 0, root in (0, max(v, 0) + rho^(-1/3)]
                let hi = v.max(f0) + rho_inv.cbrt();
                newton_bracket(
                    |x| rho * (x - v) - (x * x).recip(),
                    |x| rho + f2 / (x * x * x),
                    F::min_positive_value(), hi
                )
            },
            Function::Square => rho * v / (f1 + rho),
            Function::Zero => v,
        }
    }
}

//

/// Objective term
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\[
/// f(x) = c\ h(a x - b) + d x + {1 \over 2} e x^2
/// \\]
/// with \\(c > 0\\), \\(a \ne 0\\) and \\(e \ge 0\\).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionObj<F: Float>
{
    /// \\(h\\)
    pub h: Function,
    /// \\(a\\), default 1.
    pub a: F,
    /// \\(b\\), default 0.
    pub b: F,
    /// \\(c\\), default 1.
    pub c: F,
    /// \\(d\\), default 0.
    pub d: F,
    /// \\(e\\), default 0.
    pub e: F,
}

impl<F: Float> FunctionObj<F>
{
    /// Creates an instance with default parameters.
    pub fn new(h: Function) -> Self
    {
        FunctionObj {
            h,
            a: F::one(),
            b: F::zero(),
            c: F::one(),
            d: F::zero(),
            e: F::zero(),
        }
    }

    /// Creates an instance with all parameters.
    pub fn with_params(h: Function, a: F, b: F, c: F, d: F, e: F) -> Self
    {
        FunctionObj {
            h, a, b, c, d, e,
        }
    }

    /// Changes parameters.
    /// 
    /// Returns [`FunctionObj`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut Self)
    {
        f(&mut self);
        self
    }

    /// Checks \\(c > 0\\), \\(a \ne 0\\), \\(e \ge 0\\) and finiteness.
    pub fn is_valid(&self) -> bool
    {
        let f0 = F::zero();

        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
            && self.d.is_finite() && self.e.is_finite()
            && self.a != f0 && self.c > f0 && self.e >= f0
    }

    /// Evaluates \\(f(x)\\).
    pub fn eval(&self, x: F) -> F
    {
        let f2 = F::one() + F::one();

        self.c * self.h.eval(self.a * x - self.b) + self.d * x + self.e * x * x / f2
    }

    /// Calculates \\({\bf prox}_{f,\rho}(v) = \arg\min_x f(x) + {\rho \over 2}(x - v)^2\\).
    pub fn prox(&self, v: F, rho: F) -> F
    {
        let v_h = self.a * (v * rho - self.d) / (self.e + rho) - self.b;
        let rho_h = (self.e + rho) / (self.c * self.a * self.a);

        (self.h.prox(v_h, rho_h) + self.b) / self.a
    }

    /// Term of a scaled variable, \\(x \mapsto f(s x)\\).
    pub fn scaled(&self, s: F) -> Self
    {
        FunctionObj {
            h: self.h,
            a: self.a * s,
            b: self.b,
            c: self.c,
            d: self.d * s,
            e: self.e * s * s,
        }
    }
}

//

#[cfg(test)]
fn prox_brute(f: &FunctionObj<f64>, v: f64, rho: f64, lo: f64, hi: f64) -> f64
{
    // golden section search on a bracket inside the domain
    let obj = |x: f64| f.eval(x) + rho / 2. * (x - v) * (x - v);
    let gr = (5_f64.sqrt() - 1.) / 2.;
    let (mut a, mut b) = (lo, hi);
    for _ in 0.. 200 {
        let c = b - gr * (b - a);
        let d = a + gr * (b - a);
        if obj(c) < obj(d) {
            b = d;
        }
        else {
            a = c;
        }
    }
    (a + b) / 2.
}

#[test]
fn test_function_code1()
{
    assert_eq!(Function::from_code(0.), Some(Function::Abs));
    assert_eq!(Function::from_code(6.), Some(Function::IndGe0));
    assert_eq!(Function::from_code(14.), Some(Function::Square));
    assert_eq!(Function::from_code(15.), Some(Function::Zero));
    assert_eq!(Function::from_code(16.), None);
    assert_eq!(Function::from_code(1.5), None);
    assert_eq!(Function::from_code(-1.), None);
    assert_eq!(Function::from_code(f64::NAN), None);

    for c in 0.. 16 {
        assert_eq!(Function::from_code(c as f64).unwrap().code(), c);
    }
}

#[test]
fn test_prox_unconstrained1()
{
    use float_eq::assert_float_eq;

    let funcs = [
        Function::Abs, Function::Exp, Function::Huber, Function::Identity,
        Function::Logistic, Function::MaxNeg0, Function::MaxPos0, Function::Square, Function::Zero,
    ];

    for h in funcs {
        for &(v, rho) in &[(-3., 0.5), (-0.2, 1.), (0.7, 2.), (4., 10.)] {
            let f = FunctionObj::new(h);
            let x = f.prox(v, rho);
            let x_ref = prox_brute(&f, v, rho, -50., 50.);
            assert_float_eq!(x, x_ref, abs <= 1e-6, "{:?} v={} rho={}", h, v, rho);
        }
    }
}

#[test]
fn test_prox_positive_domain1()
{
    use float_eq::assert_float_eq;

    for h in [Function::NegEntr, Function::NegLog, Function::Recipr] {
        for &(v, rho) in &[(-3., 0.5), (-0.2, 1.), (0.7, 2.), (4., 10.)] {
            let f = FunctionObj::new(h);
            let x = f.prox(v, rho);
            assert!(x > 0.);
            let x_ref = prox_brute(&f, v, rho, 1e-9, 50.);
            assert_float_eq!(x, x_ref, abs <= 1e-6, "{:?} v={} rho={}", h, v, rho);
        }
    }
}

#[test]
fn test_prox_neglog1()
{
    use float_eq::assert_float_eq;

    let f = FunctionObj::<f64>::new(Function::NegLog);

    // x = 1 / (rho |v|) asymptotically for v -> -inf
    assert_float_eq!(f.prox(-1e8, 1.), 1e-8, rmax <= 1e-12);
    assert_float_eq!(f.prox(-1e8, 4.), 2.5e-9, rmax <= 1e-12);

    // -1/x + rho (x - v) = 0
    for &(v, rho) in &[(-1e4, 0.1), (-2., 3.), (0., 1.), (5., 0.5)] {
        let x = f.prox(v, rho);
        assert_float_eq!(-x.recip() + rho * (x - v), 0., abs <= 1e-9 * (1. + rho * v.abs()));
    }
}

#[test]
fn test_prox_indicator1()
{
    let f = FunctionObj::<f64>::new(Function::IndBox01);
    assert_eq!(f.prox(-1., 1.), 0.);
    assert_eq!(f.prox(0.3, 1.), 0.3);
    assert_eq!(f.prox(2., 1.), 1.);

    assert_eq!(FunctionObj::<f64>::new(Function::IndEq0).prox(5., 1.), 0.);
    assert_eq!(FunctionObj::<f64>::new(Function::IndGe0).prox(-5., 1.), 0.);
    assert_eq!(FunctionObj::<f64>::new(Function::IndLe0).prox(-5., 1.), -5.);
}

#[test]
fn test_prox_params1()
{
    use float_eq::assert_float_eq;

    // 2 |3x - 1| + 0.5 x + 0.4 x^2 / 2
    let f = FunctionObj::with_params(Function::Abs, 3., 1., 2., 0.5, 0.4);
    for &v in &[-2., 0., 0.3, 1., 5.] {
        let x = f.prox(v, 1.5);
        let x_ref = prox_brute(&f, v, 1.5, -50., 50.);
        assert_float_eq!(x, x_ref, abs <= 1e-6);
    }

    // (1/2)(x - 4)^2 with a negative a
    let f = FunctionObj::with_params(Function::Square, -1., -4., 1., 0., 0.);
    assert_float_eq!(f.prox(0., 1.), 2., abs <= 1e-12);
}

#[test]
fn test_scaled1()
{
    use float_eq::assert_float_eq;

    let f = FunctionObj::with_params(Function::Huber, 2., 1., 3., -1., 0.5);
    let fs = f.scaled(0.25);
    for &x in &[-4., -1., 0., 2., 8.] {
        assert_float_eq!(fs.eval(x), f.eval(0.25 * x), abs <= 1e-12);
    }
}

#[test]
fn test_is_valid1()
{
    assert!(FunctionObj::<f64>::new(Function::Abs).is_valid());
    assert!(!FunctionObj::<f64>::new(Function::Abs).par(|f| f.c = 0.).is_valid());
    assert!(!FunctionObj::<f64>::new(Function::Abs).par(|f| f.a = 0.).is_valid());
    assert!(!FunctionObj::<f64>::new(Function::Abs).par(|f| f.e = -1.).is_valid());
    assert!(!FunctionObj::<f64>::new(Function::Abs).par(|f| f.b = f64::NAN).is_valid());
}
