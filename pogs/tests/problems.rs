use float_eq::assert_float_eq;
use pogs::prelude::*;
use pogs::*;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type APogsData = PogsData<La>;

//

fn tight(pogs_data: &mut APogsData)
{
    pogs_data.par.abs_tol = 1e-7;
    pogs_data.par.rel_tol = 1e-7;
    pogs_data.par.max_iter = 20_000;
}

#[test]
fn test_ridge1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize (1/2)||Ax - b||^2 + (1/2)||x||^2, m < n
    //   solution: x = A^T (I + A A^T)^-1 b
    let a = AMatBuild::new(2, 3).iter_rowmaj(&[
        1., 0., 2.,
        0., 3., 1.,
    ]);
    let b = [4., -2.];

    let mut pogs_data = APogsData::new(a);
    for bi in b {
        pogs_data.f.push(FunctionObj::with_params(Function::Square, 1., bi, 1., 0., 0.));
    }
    for _ in 0.. 3 {
        pogs_data.g.push(FunctionObj::new(Function::Square));
    }
    tight(&mut pogs_data);

    pogs_data.solve().unwrap();
    println!("{:?}", pogs_data.x);

    // (I + A A^T) = [[6, 2], [2, 11]], w = (I + A A^T)^-1 b = (48, -20) / 62
    let w = [48. / 62., -20. / 62.];
    let x_ref = [w[0], 3. * w[1], 2. * w[0] + w[1]];

    assert!(pogs_data.converged);
    assert_float_eq!(pogs_data.x.as_slice(), x_ref.as_ref(), abs_all <= 1e-3);

    let mut ax = [0.; 2];
    pogs_data.a.op(1., &pogs_data.x, 0., &mut ax);
    assert_float_eq!(pogs_data.y.as_slice(), ax.as_ref(), abs_all <= 1e-3);
}

#[test]
fn test_lasso1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize (1/2)(x0 - 3)^2 + (1/2)(x1 - 0.5)^2 + |x0| + |x1|
    //   solution: soft thresholding, x = (2, 0)
    let a = AMatBuild::new(2, 2).iter_rowmaj(&[
        1., 0.,
        0., 1.,
    ]);

    let mut pogs_data = APogsData::new(a);
    pogs_data.f.push(FunctionObj::with_params(Function::Square, 1., 3., 1., 0., 0.));
    pogs_data.f.push(FunctionObj::with_params(Function::Square, 1., 0.5, 1., 0., 0.));
    pogs_data.g.push(FunctionObj::new(Function::Abs));
    pogs_data.g.push(FunctionObj::new(Function::Abs));
    tight(&mut pogs_data);

    pogs_data.solve().unwrap();

    assert_float_eq!(pogs_data.x.as_slice(), [2., 0.].as_ref(), abs_all <= 1e-3);
    assert_float_eq!(pogs_data.optval, 0.5 + 0.125 + 2., abs <= 1e-3);
}

#[test]
fn test_nonneg_l2_1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let m = 30;
    let n = 10;

    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    let a = AMatBuild::new(m, n).by_fn(|_, _| rng.gen::<f64>() / n as f64);
    let b: Vec<f64> = (0.. m).map(|i| {
        let mut b_i = 0.;
        for j in 0.. n {
            b_i += if 3 * j < 2 * n {a[(i, j)]} else {-a[(i, j)]};
        }
        b_i + 0.01 * (rng.gen::<f64>() - 0.5)
    }).collect();

    let mut pogs_data = APogsData::new(a.clone());
    for b_i in b.iter() {
        pogs_data.f.push(FunctionObj::with_params(Function::Square, 1., *b_i, 1., 0., 0.));
    }
    for _ in 0.. n {
        pogs_data.g.push(FunctionObj::new(Function::IndGe0));
    }
    tight(&mut pogs_data);

    pogs_data.solve().unwrap();
    assert!(pogs_data.converged);

    // reference by projected gradient
    let obj = |x: &[f64]| {
        let mut r = vec![0.; m];
        a.op(1., x, 0., &mut r);
        r.iter().zip(&b).map(|(ri, bi)| (ri - bi) * (ri - bi) / 2.).sum::<f64>()
    };
    let lip: f64 = a.as_ref().iter().map(|e| e * e).sum();
    let mut x_ref = vec![0.; n];
    let mut r = vec![0.; m];
    let mut grad = vec![0.; n];
    for _ in 0.. 200_000 {
        r.copy_from_slice(&b);
        a.op(1., &x_ref, -1., &mut r);
        a.as_op().trans_op(1., &r, 0., &mut grad);
        for j in 0.. n {
            x_ref[j] = (x_ref[j] - grad[j] / lip).max(0.);
        }
    }

    assert!(pogs_data.x.iter().all(|x| *x >= 0.));
    assert_float_eq!(pogs_data.optval, obj(&x_ref), abs <= 1e-4);
    assert_float_eq!(pogs_data.optval, obj(&pogs_data.x), abs <= 1e-6);
}

#[test]
fn test_logistic1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize log(1 + e^x) - 0.25 x + x^2 / 2
    //   optimality: sigmoid(x) - 0.25 + x = 0
    let a = AMatBuild::new(1, 1).iter_rowmaj(&[1.]);

    let mut pogs_data = APogsData::new(a);
    pogs_data.f.push(FunctionObj::new(Function::Logistic).par(|f| f.d = -0.25));
    pogs_data.g.push(FunctionObj::new(Function::Square));
    tight(&mut pogs_data);

    pogs_data.solve().unwrap();

    let x = pogs_data.x[0];
    assert_float_eq!(1. / (1. + (-x).exp()) - 0.25 + x, 0., abs <= 1e-3);
}
