use num_traits::Float;
use core::marker::PhantomData;
use core::ops::Index;
use crate::solver::LinAlg;
use crate::LinAlgEx;

/// `num::Float`-generic [`LinAlgEx`] implementation
/// 
/// All numeric operations are written in pure Rust, but slow.
#[derive(Clone)]
pub struct FloatGeneric<F>
{
    ph_f: PhantomData<F>,
}

impl<F: Float> LinAlg for FloatGeneric<F>
{
    type F = F;

    fn norm(x: &[F]) -> F
    {
        Self::dot(x, x).sqrt()
    }

    fn dot(x: &[F], y: &[F]) -> F
    {
        assert_eq!(x.len(), y.len());

        let mut sum = F::zero();
        for (u, v) in x.iter().zip(y) {
            sum = sum + *u * *v;
        }
        sum
    }
    
    fn copy(x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());
    
        for (u, v) in x.iter().zip(y) {
            *v = *u;
        }
    }

    fn scale(alpha: F, x: &mut[F])
    {
        for u in x {
            *u = alpha * *u;
        }
    }
    
    fn add(alpha: F, x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());
    
        for (u, v) in x.iter().zip(y) {
            *v = *v + alpha * *u;
        }
    }
}

//

struct MatIdx<'a, F: Float>
{
    n_row: usize,
    n_col: usize,
    mat: &'a[F],
    transpose: bool,
}

impl<'a, F: Float> MatIdx<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        let (r, c) = if !self.transpose {(r, c)} else {(c, r)};
        
        assert!(r < self.n_row);
        assert!(c < self.n_col);

        r * self.n_col + c
    }
}

impl<'a, F: Float> Index<(usize, usize)> for MatIdx<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

//

impl<F: Float> LinAlgEx for FloatGeneric<F>
{
    // y = a*mat*x + b*y
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);
        if transpose {
            assert_eq!(x.len(), n_row);
            assert_eq!(y.len(), n_col);
        } else {
            assert_eq!(x.len(), n_col);
            assert_eq!(y.len(), n_row);
        };

        let mat = MatIdx {
            n_row, n_col, mat, transpose,
        };

        for r in 0.. y.len() {
            let mut mat_x = F::zero();
            for c in 0.. x.len() {
                mat_x = mat_x + mat[(r, c)] * x[c];
            }
            y[r] = alpha * mat_x + beta * y[r];
        }
    }

    // g = a*mat*mat^T + b*g
    fn gram(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], beta: F, gram: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);

        let (k, l) = if transpose {(n_col, n_row)} else {(n_row, n_col)};
        assert_eq!(gram.len(), k * k);

        // rows of op(A) are columns of A if transposed
        let mat = MatIdx {
            n_row, n_col, mat, transpose,
        };

        for r in 0.. k {
            for c in 0..= r {
                let mut sum = F::zero();
                for i in 0.. l {
                    sum = sum + mat[(r, i)] * mat[(c, i)];
                }
                let v = alpha * sum + beta * gram[r * k + c];
                gram[r * k + c] = v;
                gram[c * k + r] = v;
            }
        }
    }

    fn chol_factor(n: usize, mat: &mut[F], eps_zero: F) -> Result<(), ()>
    {
        assert_eq!(mat.len(), n * n);

        for j in 0.. n {
            let mut diag = mat[j * n + j];
            for k in 0.. j {
                diag = diag - mat[j * n + k] * mat[j * n + k];
            }
            if !(diag > eps_zero) {
                return Err(());
            }
            let diag = diag.sqrt();
            mat[j * n + j] = diag;

            for i in j + 1.. n {
                let mut v = mat[i * n + j];
                for k in 0.. j {
                    v = v - mat[i * n + k] * mat[j * n + k];
                }
                mat[i * n + j] = v / diag;
            }
        }

        Ok(())
    }

    fn chol_solve(n: usize, mat: &[F], x: &mut[F])
    {
        assert_eq!(mat.len(), n * n);
        assert_eq!(x.len(), n);

        // L z = b
        for i in 0.. n {
            let mut v = x[i];
            for k in 0.. i {
                v = v - mat[i * n + k] * x[k];
            }
            x[i] = v / mat[i * n + i];
        }

        // L^T x = z
        for i in (0.. n).rev() {
            let mut v = x[i];
            for k in i + 1.. n {
                v = v - mat[k * n + i] * x[k];
            }
            x[i] = v / mat[i * n + i];
        }
    }
}

//

#[test]
fn test_chol1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let a = &[ // row-major 2x3
        1., 2., 0.,
        0., 1., 3.,
    ];

    // I + A^T A
    let mut g = [0.; 9];
    for i in 0.. 3 {
        g[i * 3 + i] = 1.;
    }
    L::gram(true, 2, 3, 1., a, 1., &mut g);
    assert_float_eq!(g.as_ref(), [
        2., 2., 0.,
        2., 6., 3.,
        0., 3., 10.,
    ].as_ref(), abs_all <= 1e-12);

    let b = [1., 2., 3.];
    let mut x = b;
    L::chol_factor(3, &mut g, 1e-12).unwrap();
    L::chol_solve(3, &g, &mut x);

    // check (I + A^T A) x = b
    let mut ax = [0.; 2];
    L::transform_ge(false, 2, 3, 1., a, &x, 0., &mut ax);
    let mut r = x;
    L::transform_ge(true, 2, 3, 1., a, &ax, 1., &mut r);
    assert_float_eq!(r.as_ref(), b.as_ref(), abs_all <= 1e-9);
}

#[test]
fn test_chol2()
{
    type L = FloatGeneric<f64>;

    let mut g = [
        1., 2.,
        2., 1.,
    ];
    assert!(L::chol_factor(2, &mut g, 1e-12).is_err());
}
