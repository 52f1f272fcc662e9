use num_traits::Float;

const MAX_NEWTON: usize = 64;

/// Calculates \\(W(e^t)\\), the principal branch of Lambert W function at \\(e^t\\).
/// 
/// Solves \\(w + \log w = t\\) by Newton's method,
/// which avoids overflow of \\(e^t\\) for large \\(t\\).
pub(crate) fn lambertw_exp<F: Float>(t: F) -> F
{
    let f1 = F::one();

    if t.is_nan() {
        return t;
    }
    if t == F::infinity() {
        return t;
    }

    let mut w = if t > f1 {
        t - t.ln()
    }
    else {
        t.exp()
    };

    if w <= F::min_positive_value() {
        // W(x) ~ x for tiny x
        return w;
    }

    for _ in 0.. MAX_NEWTON {
        let r = w + w.ln() - t;
        let w_next = w - r * w / (w + f1);
        let w_next = w_next.max(w * F::epsilon());

        let conv = (w_next - w).abs() <= F::epsilon() * F::from(4).unwrap() * w_next;
        w = w_next;
        if conv {
            break;
        }
    }

    w
}

/// Finds a root of an increasing function `fun` in `[lo, hi]`.
/// 
/// Newton steps by `dfun` are taken inside the bracket,
/// otherwise bisection.
pub(crate) fn newton_bracket<F, G, D>(fun: G, dfun: D, mut lo: F, mut hi: F) -> F
where F: Float, G: Fn(F) -> F, D: Fn(F) -> F
{
    let f2 = F::one() + F::one();
    let mut x = (lo + hi) / f2;

    for _ in 0.. MAX_NEWTON * 2 {
        let fx = fun(x);
        if fx == F::zero() {
            return x;
        }
        else if fx > F::zero() {
            hi = x;
        }
        else {
            lo = x;
        }

        let dfx = dfun(x);
        let x_newton = x - fx / dfx;
        let x_next = if dfx > F::zero() && x_newton > lo && x_newton < hi {
            x_newton
        }
        else {
            (lo + hi) / f2
        };

        if (x_next - x).abs() <= F::epsilon() * F::from(4).unwrap() * (F::one() + x.abs()) {
            return x_next;
        }
        x = x_next;
    }

    x
}

//

#[test]
fn test_lambertw1()
{
    use float_eq::assert_float_eq;

    for &t in &[-30., -2., 0., 1., 2.5, 40., 700., 1e6] {
        let t: f64 = t;
        let w = lambertw_exp(t);
        // w e^w = e^t  <=>  w + ln w = t
        assert_float_eq!(w + w.ln(), t, abs <= 1e-9 * (1. + t.abs()));
    }

    assert_float_eq!(lambertw_exp(1_f64), 1., abs <= 1e-12); // W(e) = 1
}

#[test]
fn test_newton_bracket1()
{
    use float_eq::assert_float_eq;

    // x^3 = 2
    let x = newton_bracket(|x: f64| x * x * x - 2., |x| 3. * x * x, 0., 2.);
    assert_float_eq!(x, 2_f64.cbrt(), abs <= 1e-12);
}
