use float_eq::assert_float_eq;
use pogs::host::*;
use pogs::prelude::*;

//

fn real(v: &[f64]) -> HostValue
{
    HostValue::Real(v.to_vec())
}

fn get_real<'a>(list: &'a HostValue, name: &str) -> &'a [f64]
{
    match get_list_element(list, name) {
        HostValue::Real(v) => v,
        other => panic!("{} is {:?}", name, other),
    }
}

//

#[test]
fn test_get_list_element1()
{
    let list = HostValue::list([
        ("a", HostValue::scalar(1.)),
        ("b", HostValue::scalar(2.)),
        ("a", HostValue::scalar(3.)),
    ]);

    assert_eq!(get_list_element(&list, "a"), &HostValue::scalar(1.));
    assert_eq!(get_list_element(&list, "b"), &HostValue::scalar(2.));
    assert!(get_list_element(&list, "c").is_null());
    assert!(get_list_element(&HostValue::scalar(1.), "a").is_null());
    assert!(get_list_element(&HostValue::Null, "a").is_null());
}

#[test]
fn test_populate_params1()
{
    let mut par = SolverParam::<f64>::default();
    populate_params(&HostValue::Null, &mut par).unwrap();
    assert_eq!(par, SolverParam::default());
    assert_eq!(par.max_iter, 1000);
    assert_float_eq!(par.abs_tol, 1e-4, abs <= 1e-16);
    assert_float_eq!(par.rel_tol, 1e-3, abs <= 1e-16);
    assert_float_eq!(par.rho, 1., abs <= 1e-16);
    assert!(!par.quiet);
    assert!(par.adaptive_rho);

    let params = HostValue::list([
        ("rel_tol", HostValue::scalar(1e-5)),
        ("abs_tol", HostValue::scalar(1e-6)),
        ("rho", HostValue::scalar(2.)),
        ("max_iter", HostValue::scalar(500.9)),
        ("quiet", HostValue::Logical(vec![true])),
        ("adaptive_rho", HostValue::Logical(vec![false])),
        ("unknown", HostValue::Str(vec!["ignored".to_string()])),
    ]);
    populate_params(&params, &mut par).unwrap();
    assert_float_eq!(par.rel_tol, 1e-5, abs <= 1e-16);
    assert_float_eq!(par.abs_tol, 1e-6, abs <= 1e-16);
    assert_float_eq!(par.rho, 2., abs <= 1e-16);
    assert_eq!(par.max_iter, 500);
    assert!(par.quiet);
    assert!(!par.adaptive_rho);
    assert_float_eq!(par.alpha, 1.7, abs <= 1e-16);

    // integers are accepted as numbers
    populate_params(&HostValue::list([("max_iter", HostValue::Integer(vec![20]))]), &mut par).unwrap();
    assert_eq!(par.max_iter, 20);

    let rslt = populate_params(&HostValue::list([("rho", HostValue::Str(vec!["1".to_string()]))]), &mut par);
    assert!(matches!(rslt, Err(HostError::WrongType {..})));

    let rslt = populate_params(&HostValue::list([("max_iter", HostValue::scalar(-1.))]), &mut par);
    assert!(matches!(rslt, Err(HostError::WrongType {..})));
}

#[test]
fn test_populate_function_obj1()
{
    // scalar h, vector b, defaults otherwise
    let f = HostValue::list([
        ("h", HostValue::scalar(Function::Square.code() as f64)),
        ("b", real(&[1., 2., 3.])),
    ]);
    let fo = populate_function_obj(&f, 3).unwrap();
    assert_eq!(fo.len(), 3);
    for (i, o) in fo.iter().enumerate() {
        assert_eq!(*o, FunctionObj::with_params(Function::Square, 1., (i + 1) as f64, 1., 0., 0.));
    }

    // vector h, scalar c and e
    let f = HostValue::list([
        ("h", real(&[0., 6.])),
        ("c", HostValue::scalar(2.)),
        ("e", HostValue::Integer(vec![3])),
    ]);
    let fo = populate_function_obj(&f, 2).unwrap();
    assert_eq!(fo[0], FunctionObj::with_params(Function::Abs, 1., 0., 2., 0., 3.));
    assert_eq!(fo[1], FunctionObj::with_params(Function::IndGe0, 1., 0., 2., 0., 3.));

    // zero terms
    let fo = populate_function_obj(&HostValue::list([("h", HostValue::scalar(15.))]), 0).unwrap();
    assert!(fo.is_empty());
}

#[test]
fn test_populate_function_obj2()
{
    let rslt = populate_function_obj(&HostValue::list([("a", HostValue::scalar(1.))]), 2);
    assert_eq!(rslt, Err(HostError::MissingField("h".to_string())));

    let rslt = populate_function_obj(&HostValue::list([
        ("h", HostValue::scalar(0.)),
        ("d", real(&[1., 2.])),
    ]), 3);
    assert_eq!(rslt, Err(HostError::LengthMismatch {field: "d".to_string(), len: 2, expected: 3}));

    let rslt = populate_function_obj(&HostValue::list([("h", HostValue::scalar(16.))]), 1);
    assert_eq!(rslt, Err(HostError::BadFunctionCode(16.)));

    let rslt = populate_function_obj(&HostValue::scalar(0.), 1);
    assert!(matches!(rslt, Err(HostError::WrongType {..})));

    let rslt = populate_function_obj(&HostValue::Null, 1);
    assert!(matches!(rslt, Err(HostError::WrongType {..})));
}

#[test]
fn test_pogs_wrapper1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // non-negative least squares with A = [[1, 1], [0, 1], [1, 0]] given in column-major
    //   minimize (1/2)||Ax - b||^2 subject to x >= 0
    let a = HostValue::Matrix {
        nrow: 3,
        ncol: 2,
        data: vec![
            1., 0., 1.,
            1., 1., 0.,
        ],
    };
    let f = HostValue::list([
        ("h", HostValue::scalar(Function::Square.code() as f64)),
        ("b", real(&[2., -1., 3.])),
    ]);
    let g = HostValue::list([
        ("h", HostValue::scalar(Function::IndGe0.code() as f64)),
    ]);
    let params = HostValue::list([
        ("abs_tol", HostValue::scalar(1e-7)),
        ("rel_tol", HostValue::scalar(1e-7)),
        ("max_iter", HostValue::scalar(20_000.)),
        ("quiet", HostValue::Logical(vec![true])),
    ]);

    let ans = pogs_wrapper(&a, &f, &g, &params).unwrap();

    // x1 = 0 is active: x0 minimizes (x0 - 2)^2 + (x0 - 3)^2
    let x = get_real(&ans, "x");
    let y = get_real(&ans, "y");
    let optval = get_real(&ans, "optval");
    assert_eq!(x.len(), 2);
    assert_eq!(y.len(), 3);
    assert_eq!(optval.len(), 1);
    assert_float_eq!(x, [2.5, 0.].as_ref(), abs_all <= 1e-3);
    assert_float_eq!(y, [2.5, 0., 2.5].as_ref(), abs_all <= 1e-3);
    assert_float_eq!(optval[0], (0.25 + 1. + 0.25) / 2., abs <= 1e-3);

    assert_eq!(get_list_element(&ans, "converged"), &HostValue::Logical(vec![true]));
    assert_eq!(get_real(&ans, "l").len(), 3);
}

#[test]
fn test_pogs_wrapper2()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let f = HostValue::list([("h", HostValue::scalar(14.))]);
    let g = HostValue::list([("h", HostValue::scalar(15.))]);

    let rslt = pogs_wrapper(&real(&[1., 2.]), &f, &g, &HostValue::Null);
    assert_eq!(rslt, Err(HostError::NotMatrix));

    let a = HostValue::Matrix {nrow: 2, ncol: 2, data: vec![1., 2., 3.]};
    let rslt = pogs_wrapper(&a, &f, &g, &HostValue::Null);
    assert!(matches!(rslt, Err(HostError::LengthMismatch {..})));

    // invalid parameter is reported by the solver
    let a = HostValue::Matrix {nrow: 1, ncol: 1, data: vec![1.]};
    let params = HostValue::list([("rho", HostValue::scalar(-1.))]);
    let rslt = pogs_wrapper(&a, &f, &g, &params);
    assert_eq!(rslt, Err(HostError::Solver(SolverError::InvalidParam)));
    println!("{}", rslt.unwrap_err());
}

#[test]
fn test_solver_wrap1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    type La = FloatGeneric<f64>;

    let a = HostValue::Matrix {nrow: 2, ncol: 1, data: vec![1., 2.]};
    let f = HostValue::list([("h", HostValue::scalar(14.))]);
    let g = HostValue::list([("h", HostValue::scalar(15.))]);

    // output slices must be sized n, m and m
    let (mut x, mut y, mut l) = (vec![0.; 2], vec![0.; 2], vec![0.; 2]);
    let rslt = solver_wrap::<La>(&a, &f, &g, &HostValue::Null, &mut x, &mut y, &mut l);
    assert_eq!(rslt, Err(HostError::LengthMismatch {field: "x".to_string(), len: 2, expected: 1}));

    let (mut x, mut y, mut l) = (vec![0.; 1], vec![0.; 2], vec![0.; 3]);
    let rslt = solver_wrap::<La>(&a, &f, &g, &HostValue::Null, &mut x, &mut y, &mut l);
    assert_eq!(rslt, Err(HostError::LengthMismatch {field: "l".to_string(), len: 3, expected: 2}));

    let (mut x, mut y, mut l) = (vec![0.; 1], vec![0.; 2], vec![0.; 2]);
    let status = solver_wrap::<La>(&a, &f, &g, &HostValue::Null, &mut x, &mut y, &mut l).unwrap();
    assert!(status.converged);
    assert_float_eq!(x[0], 0., abs <= 1e-2);
}

#[test]
fn test_pogs_wrapper3()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // default settings still give a usable answer
    //   minimize (1/2)(x - 1)^2 + (1/2)(2x - 1)^2 + |x|
    let a = HostValue::Matrix {nrow: 2, ncol: 1, data: vec![1., 2.]};
    let f = HostValue::list([
        ("h", HostValue::scalar(14.)),
        ("b", real(&[1., 1.])),
        ("a", real(&[1., 1.])),
    ]);
    let g = HostValue::list([("h", HostValue::scalar(0.))]);

    let ans = pogs_wrapper(&a, &f, &g, &HostValue::Null).unwrap();

    // 5x - 3 + 1 = 0
    let x = get_real(&ans, "x");
    assert_float_eq!(x[0], 0.4, abs <= 1e-2);
}
