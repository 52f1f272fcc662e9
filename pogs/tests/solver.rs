use float_eq::assert_float_eq;
use pogs::prelude::*;
use pogs_core::{LinAlgEx, MatOp};

type La = FloatGeneric<f64>;
type ASolver = Solver<La>;
type AMatOp<'a> = MatOp<'a, La>;

//

fn tight(p: &mut SolverParam<f64>)
{
    p.abs_tol = 1e-7;
    p.rel_tol = 1e-7;
    p.max_iter = 20_000;
}

#[test]
fn test_solver1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // least squares, m >= n
    let a = &[
        1., 2.,
        3., 4.,
        5., 7.,
    ];
    let b = [1., -1., 2.];

    let f: Vec<_> = b.iter().map(|bi| FunctionObj::with_params(Function::Square, 1., *bi, 1., 0., 0.)).collect();
    let g = vec![FunctionObj::new(Function::Zero); 2];

    let op_a = AMatOp::new(3, 2, a);
    let s = ASolver::new().par(tight);
    let mut work = vec![0.; ASolver::query_worklen(op_a.size())];
    let sol = s.solve((op_a, &f, &g, &mut work)).unwrap();
    println!("{:?}", sol);

    // reference by normal equations
    let mut ata = [0.; 4];
    La::gram(true, 3, 2, 1., a, 0., &mut ata);
    let mut x_ref = [0.; 2];
    La::transform_ge(true, 3, 2, 1., a, &b, 0., &mut x_ref);
    La::chol_factor(2, &mut ata, 1e-12).unwrap();
    La::chol_solve(2, &ata, &mut x_ref);

    assert!(sol.converged);
    assert_float_eq!(sol.x, x_ref.as_ref(), abs_all <= 1e-3);

    // l = y - b
    for i in 0.. 3 {
        assert_float_eq!(sol.l[i], sol.y[i] - b[i], abs <= 1e-3);
    }
}

#[test]
fn test_solver2()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // LP, m < n
    //   minimize x0 + x1
    //   subject to x0 + 2 x1 >= 2, x >= 0
    let a = &[
        1., 2.,
    ];
    let f = vec![FunctionObj::with_params(Function::IndGe0, 1., 2., 1., 0., 0.)];
    let g = vec![FunctionObj::new(Function::IndGe0).par(|g| g.d = 1.); 2];

    let op_a = AMatOp::new(1, 2, a);
    let s = ASolver::new().par(tight);
    let mut work = vec![0.; ASolver::query_worklen(op_a.size())];
    let sol = s.solve((op_a, &f, &g, &mut work)).unwrap();
    println!("{:?}", sol);

    assert!(sol.converged);
    assert_float_eq!(sol.x, [0., 1.].as_ref(), abs_all <= 1e-3);
    assert_float_eq!(sol.optval, 1., abs <= 1e-3);
}

#[test]
fn test_solver3()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let a = &[
        1., 0.,
        0., 1.,
    ];
    let f = vec![FunctionObj::new(Function::Square); 2];
    let g = vec![FunctionObj::new(Function::Zero); 2];

    // function list length
    let s = ASolver::new();
    let mut work = vec![0.; ASolver::query_worklen((2, 2))];
    let rslt = s.solve((AMatOp::new(2, 2, a), &f[0..1], &g, &mut work)).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidOp);

    // work length
    let s = ASolver::new();
    let mut work = vec![0.; ASolver::query_worklen((2, 2)) - 1];
    let rslt = s.solve((AMatOp::new(2, 2, a), &f, &g, &mut work)).unwrap_err();
    assert_eq!(rslt, SolverError::WorkShortage);

    // c must be positive
    let f_bad = vec![FunctionObj::new(Function::Square).par(|f| f.c = 0.); 2];
    let s = ASolver::new();
    let mut work = vec![0.; ASolver::query_worklen((2, 2))];
    let rslt = s.solve((AMatOp::new(2, 2, a), &f_bad, &g, &mut work)).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidFunc);

    // over-relaxation range
    let s = ASolver::new().par(|p| p.alpha = 2.);
    let mut work = vec![0.; ASolver::query_worklen((2, 2))];
    let rslt = s.solve((AMatOp::new(2, 2, a), &f, &g, &mut work)).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidParam);
    println!("{}", rslt);
}

#[test]
fn test_solver4()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // iteration limit is not an error
    let a = &[
        1., 2.,
        3., 4.,
    ];
    let f = vec![FunctionObj::with_params(Function::Abs, 1., 1., 1., 0., 0.); 2];
    let g = vec![FunctionObj::new(Function::Square); 2];

    let s = ASolver::new().par(|p| {
        p.max_iter = 3;
        p.abs_tol = 0.;
        p.rel_tol = 0.;
        p.quiet = true;
    });
    let mut work = vec![0.; ASolver::query_worklen((2, 2))];
    let sol = s.solve((AMatOp::new(2, 2, a), &f, &g, &mut work)).unwrap();

    assert!(!sol.converged);
    assert_eq!(sol.iter, 3);
    assert!(sol.optval.is_finite());
}

//

// non-negative least squares
//   minimize (1/2)||Ax - b||^2 subject to x >= 0
// with A = [[1, 2], [3, 4]], b = (1, 1), of which solution is x = (0, 0.3)
fn nonneg_l2_2x2<P>(par: P) -> (Vec<f64>, Vec<f64>, f64, bool)
where P: FnOnce(&mut SolverParam<f64>)
{
    let a = &[
        1., 2.,
        3., 4.,
    ];
    let f = vec![FunctionObj::with_params(Function::Square, 1., 1., 1., 0., 0.); 2];
    let g = vec![FunctionObj::new(Function::IndGe0); 2];

    let s = ASolver::new().par(tight).par(par);
    let mut work = vec![0.; ASolver::query_worklen((2, 2))];
    let sol = s.solve((AMatOp::new(2, 2, a), &f, &g, &mut work)).unwrap();
    println!("{:?}", sol);

    (sol.x.to_vec(), sol.y.to_vec(), sol.optval, sol.converged)
}

#[test]
fn test_solver5()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let pars: [fn(&mut SolverParam<f64>); 4] = [
        |p| p.gap_stop = true,
        |p| p.adaptive_rho = false,
        |p| p.equil_iter = 0,
        |p| {
            p.gap_stop = true;
            p.adaptive_rho = false;
            p.equil_iter = 0;
        },
    ];

    for par in pars {
        let (x, y, optval, converged) = nonneg_l2_2x2(par);

        assert!(converged);
        assert_float_eq!(x.as_slice(), [0., 0.3].as_ref(), abs_all <= 1e-3);
        assert_float_eq!(y.as_slice(), [0.6, 1.2].as_ref(), abs_all <= 1e-3);
        assert_float_eq!(optval, 0.1, abs <= 1e-3);
    }
}

#[test]
fn test_solver6()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // unbounded: minimize y subject to y = x
    let a = &[1.];
    let f = vec![FunctionObj::new(Function::Identity)];
    let g = vec![FunctionObj::new(Function::Zero)];

    let s = ASolver::new().par(|p| {
        p.max_iter = 5000;
        p.quiet = true;
    });
    let mut work = vec![0.; ASolver::query_worklen((1, 1))];
    let rslt = s.solve((AMatOp::new(1, 1, a), &f, &g, &mut work)).unwrap_err();
    assert_eq!(rslt, SolverError::NotFinite);
}

#[test]
fn test_solver7()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // zero iteration limit returns the initial point
    let a = &[
        1., 2.,
        3., 4.,
    ];
    let f = vec![FunctionObj::with_params(Function::Square, 1., 1., 1., 0., 0.); 2];
    let g = vec![FunctionObj::new(Function::Zero); 2];

    let s = ASolver::new().par(|p| p.max_iter = 0);
    let mut work = vec![f64::NAN; ASolver::query_worklen((2, 2))];
    let sol = s.solve((AMatOp::new(2, 2, a), &f, &g, &mut work)).unwrap();

    assert!(!sol.converged);
    assert_eq!(sol.iter, 0);
    assert_eq!(sol.x, &[0., 0.]);
    assert_eq!(sol.y, &[0., 0.]);
    assert_eq!(sol.l, &[0., 0.]);
    assert_float_eq!(sol.optval, 1., abs <= 1e-12);
}
