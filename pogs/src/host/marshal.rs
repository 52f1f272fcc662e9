use core::fmt::{Debug, LowerExp};
use pogs_core::solver::SolverParam;
use pogs_core::{LinAlgEx, FloatGeneric, Function, FunctionObj};
use crate::{MatBuild, PogsData};
use super::{HostValue, HostError, get_list_element};

//

/// Converts a column-major matrix into a freshly allocated row-major one.
/// 
/// * `a` is column-major data, of which length shall be `m * n`.
/// * `m` and `n` are a number of rows and columns.
pub fn col_to_row_major(a: &[f64], m: usize, n: usize) -> Vec<f64>
{
    assert_eq!(a.len(), m * n);

    let mut arm = vec![0.; m * n];
    for c in 0.. n {
        for r in 0.. m {
            arm[r * n + c] = a[c * m + r];
        }
    }
    arm
}

fn real_field(params: &HostValue, name: &str) -> Result<Option<f64>, HostError>
{
    let v = get_list_element(params, name);
    if v.is_null() {
        Ok(None)
    }
    else {
        v.real_at(0).map(Some).ok_or_else(|| HostError::WrongType {
            field: name.to_string(),
            expected: "a numeric scalar",
        })
    }
}

fn count_field(params: &HostValue, name: &str) -> Result<Option<usize>, HostError>
{
    match real_field(params, name)? {
        Some(v) if v.is_finite() && v >= 0. => Ok(Some(v as usize)),
        Some(_) => Err(HostError::WrongType {
            field: name.to_string(),
            expected: "a non-negative count",
        }),
        None => Ok(None),
    }
}

fn logical_field(params: &HostValue, name: &str) -> Result<Option<bool>, HostError>
{
    let v = get_list_element(params, name);
    if v.is_null() {
        Ok(None)
    }
    else {
        v.logical_at(0).map(Some).ok_or_else(|| HostError::WrongType {
            field: name.to_string(),
            expected: "a logical scalar",
        })
    }
}

/// Overrides solver parameters present in a settings list.
/// 
/// Recognized fields are `rel_tol`, `abs_tol`, `rho`, `max_iter`, `quiet`,
/// `adaptive_rho`, `alpha`, `gap_stop` and `equil_iter`.
/// Absent fields, or all of them if `params` is [`HostValue::Null`], keep their values.
/// `max_iter` and `equil_iter` are truncated to integers.
pub fn populate_params(params: &HostValue, par: &mut SolverParam<f64>) -> Result<(), HostError>
{
    if let Some(v) = real_field(params, "rel_tol")? {
        par.rel_tol = v;
    }
    if let Some(v) = real_field(params, "abs_tol")? {
        par.abs_tol = v;
    }
    if let Some(v) = real_field(params, "rho")? {
        par.rho = v;
    }
    if let Some(v) = count_field(params, "max_iter")? {
        par.max_iter = v;
    }
    if let Some(v) = logical_field(params, "quiet")? {
        par.quiet = v;
    }
    if let Some(v) = logical_field(params, "adaptive_rho")? {
        par.adaptive_rho = v;
    }
    if let Some(v) = real_field(params, "alpha")? {
        par.alpha = v;
    }
    if let Some(v) = logical_field(params, "gap_stop")? {
        par.gap_stop = v;
    }
    if let Some(v) = count_field(params, "equil_iter")? {
        par.equil_iter = v;
    }

    Ok(())
}

/// Builds a list of [`FunctionObj`] from a function description list.
/// 
/// Returns a `Vec` of length `n`.
/// * `f` is a list with fields `h` (function code, required) and `a`, `b`, `c`, `d`, `e`
///   (defaults 1, 0, 1, 0, 0).
///   A length-one field is repeated for every term; a length-`n` field gives each term its own value.
/// * `n` is the number of terms.
pub fn populate_function_obj(f: &HostValue, n: usize) -> Result<Vec<FunctionObj<f64>>, HostError>
{
    const NAMES: [&str; 6] = ["h", "a", "b", "c", "d", "e"];

    if !matches!(f, HostValue::List(_)) {
        return Err(HostError::WrongType {
            field: "f".to_string(),
            expected: "a list",
        });
    }

    // per-term vectors; scalar fields overwrite the defaults in place
    let mut scalars = [f64::NAN, 1., 0., 1., 0., 0.];
    let mut vectors: [Option<&HostValue>; 6] = [None; 6];

    for (k, name) in NAMES.iter().enumerate() {
        let v = get_list_element(f, name);
        if v.is_null() {
            if k == 0 {
                return Err(HostError::MissingField(name.to_string()));
            }
            continue;
        }
        if !matches!(v, HostValue::Real(_) | HostValue::Integer(_) | HostValue::Logical(_)) {
            return Err(HostError::WrongType {
                field: name.to_string(),
                expected: "a numeric vector",
            });
        }

        if v.len() == 1 {
            scalars[k] = v.real_at(0).unwrap_or(f64::NAN);
        }
        else if v.len() == n {
            vectors[k] = Some(v);
        }
        else {
            return Err(HostError::LengthMismatch {
                field: name.to_string(),
                len: v.len(),
                expected: n,
            });
        }
    }

    let mut f_pogs = Vec::with_capacity(n);
    let mut params = scalars;
    for i in 0.. n {
        for (k, vec) in vectors.iter().enumerate() {
            if let Some(v) = vec {
                params[k] = v.real_at(i).unwrap_or(f64::NAN);
            }
        }

        let h = Function::from_code(params[0]).ok_or(HostError::BadFunctionCode(params[0]))?;
        f_pogs.push(FunctionObj::with_params(h, params[1], params[2], params[3], params[4], params[5]));
    }

    Ok(f_pogs)
}

//

/// Status of [`solver_wrap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapStatus
{
    /// Objective value.
    pub optval: f64,
    /// Number of iterations run.
    pub iter: usize,
    /// `false` if the iterations stopped by the limit.
    pub converged: bool,
}

/// Runs the solver on host objects, writing results into pre-allocated storage.
/// 
/// * `a` is a [`HostValue::Matrix`] \\(A\\) with \\(m\\) rows and \\(n\\) columns.
/// * `f` and `g` are function description lists (see [`populate_function_obj`]).
/// * `params` is a settings list or [`HostValue::Null`] (see [`populate_params`]).
/// * `x`, `y` and `l` receive \\(x\\), \\(y\\) and \\(\lambda\\),
///   of which lengths shall be \\(n\\), \\(m\\) and \\(m\\), otherwise [`HostError::LengthMismatch`].
pub fn solver_wrap<L>(a: &HostValue, f: &HostValue, g: &HostValue, params: &HostValue,
    x: &mut[f64], y: &mut[f64], l: &mut[f64]) -> Result<WrapStatus, HostError>
where L: LinAlgEx<F=f64>, L::F: Debug + LowerExp
{
    let (m, n, data) = match a {
        HostValue::Matrix {nrow, ncol, data} => (*nrow, *ncol, data),
        _ => return Err(HostError::NotMatrix),
    };
    if data.len() != m * n {
        return Err(HostError::LengthMismatch {
            field: "A".to_string(),
            len: data.len(),
            expected: m * n,
        });
    }
    for (name, len, expected) in [("x", x.len(), n), ("y", y.len(), m), ("l", l.len(), m)] {
        if len != expected {
            return Err(HostError::LengthMismatch {
                field: name.to_string(),
                len,
                expected,
            });
        }
    }

    log::debug!("A: {} x {}", m, n);

    let arm = col_to_row_major(data, m, n);
    let a_build = MatBuild::<L>::from_vec(m, n, arm).ok_or(HostError::NotMatrix)?;

    let mut pogs_data = PogsData::new(a_build);

    populate_params(params, &mut pogs_data.par)?;

    pogs_data.f = populate_function_obj(f, m)?;
    pogs_data.g = populate_function_obj(g, n)?;

    pogs_data.solve()?;

    x.copy_from_slice(&pogs_data.x);
    y.copy_from_slice(&pogs_data.y);
    l.copy_from_slice(&pogs_data.l);

    Ok(WrapStatus {
        optval: pogs_data.optval,
        iter: pogs_data.iter,
        converged: pogs_data.converged,
    })
}

/// Entry point from the host.
/// 
/// Returns a named list of `x` (length \\(n\\)), `y` (length \\(m\\)), `optval`,
/// `l` (length \\(m\\)), `iterations` and `converged`,
/// or `Err` with [`HostError`] type.
/// See [`solver_wrap`] about the arguments.
pub fn pogs_wrapper(a: &HostValue, f: &HostValue, g: &HostValue, params: &HostValue) -> Result<HostValue, HostError>
{
    let (m, n) = a.dim().ok_or(HostError::NotMatrix)?;

    let mut x = vec![0.; n];
    let mut y = vec![0.; m];
    let mut l = vec![0.; m];

    let status = solver_wrap::<FloatGeneric<f64>>(a, f, g, params, &mut x, &mut y, &mut l)?;

    if !status.converged {
        log::warn!("not converged in {} iterations", status.iter);
    }

    Ok(HostValue::list([
        ("x", HostValue::Real(x)),
        ("y", HostValue::Real(y)),
        ("optval", HostValue::scalar(status.optval)),
        ("l", HostValue::Real(l)),
        ("iterations", HostValue::Integer(vec![status.iter.min(i32::MAX as usize) as i32])),
        ("converged", HostValue::Logical(vec![status.converged])),
    ]))
}

//

#[test]
fn test_col_to_row_major1()
{
    let a = [ // column-major 2x3
        1., 4.,
        2., 5.,
        3., 6.,
    ];
    assert_eq!(col_to_row_major(&a, 2, 3), vec![1., 2., 3., 4., 5., 6.]);
    assert_eq!(col_to_row_major(&[], 0, 3), Vec::<f64>::new());
}
