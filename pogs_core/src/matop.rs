use num_traits::{Float, Zero, One};
use crate::LinAlgEx;

//

/// Matrix operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Dense matrix \\(A \in \mathbb{R}^{m \times n}\\) which borrows a slice of row-major data array.
#[derive(Debug)]
pub struct MatOp<'a, L: LinAlgEx>
{
    n_row: usize,
    n_col: usize,
    array: &'a[L::F],
}

impl<'a, L: LinAlgEx> MatOp<'a, L>
{
    /// Creates an instance
    /// 
    /// Returns [`MatOp`] instance.
    /// * `n_row` and `n_col` are a number of rows and columns.
    /// * `array`: row-major data array slice, of which length shall be `n_row * n_col`.
    pub fn new(n_row: usize, n_col: usize, array: &'a[L::F]) -> Self
    {
        assert_eq!(n_row * n_col, array.len());

        MatOp {
            n_row, n_col, array,
        }
    }

    /// Size of the matrix.
    /// 
    /// Returns a tuple of \\(m\\) and \\(n\\).
    pub fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    /// Calculate \\(\alpha A x + \beta y\\).
    pub fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_impl(false, alpha, x, beta, y);
    }

    /// Calculate \\(\alpha A^T x + \beta y\\).
    pub fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_impl(true, alpha, x, beta, y);
    }

    fn op_impl(&self, transpose: bool, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        if self.n_row > 0 && self.n_col > 0 {
            L::transform_ge(transpose, self.n_row, self.n_col, alpha, self.array, x, beta, y)
        }
        else {
            L::scale(beta, y);
        }
    }

    /// Copies the matrix and equilibrates the copy.
    /// 
    /// Row and column 2-norms are balanced alternately, `n_iter` sweeps,
    /// so that \\(\tilde{A} = D A E\\) with diagonal \\(D={\bf diag}(d)\\) and \\(E={\bf diag}(e)\\).
    /// A zero row or column keeps its factor one.
    /// 
    /// Returns [`MatOp`] of \\(\tilde{A}\\).
    /// * `n_iter` is a number of sweeps.
    /// * `eps_zero` is a norm below which a row or column is regarded as zero.
    /// * `work` is a slice to store \\(\tilde{A}\\), of which length shall be `n_row * n_col`.
    /// * `d` is \\(d\\) on exit, of which length shall be `n_row`.
    /// * `e` is \\(e\\) on exit, of which length shall be `n_col`.
    pub fn copy_equil<'b>(&self, n_iter: usize, eps_zero: L::F, work: &'b mut[L::F], d: &mut[L::F], e: &mut[L::F]) -> MatOp<'b, L>
    {
        let (m, n) = self.size();
        assert_eq!(work.len(), m * n);
        assert_eq!(d.len(), m);
        assert_eq!(e.len(), n);

        L::copy(self.array, work);
        d.fill(L::F::one());
        e.fill(L::F::one());

        for _ in 0.. n_iter {
            for (r, row) in work.chunks_mut(n.max(1)).take(m).enumerate() {
                let nrm = L::norm(row);
                if nrm > eps_zero {
                    L::scale(nrm.recip(), row);
                    d[r] = d[r] / nrm;
                }
            }

            for c in 0.. n {
                let mut sq = L::F::zero();
                for r in 0.. m {
                    sq = sq + work[r * n + c] * work[r * n + c];
                }
                let nrm = sq.sqrt();
                if nrm > eps_zero {
                    for r in 0.. m {
                        work[r * n + c] = work[r * n + c] / nrm;
                    }
                    e[c] = e[c] / nrm;
                }
            }
        }

        MatOp::new(m, n, work)
    }
}

impl<'a, L: LinAlgEx> AsRef<[L::F]> for MatOp<'a, L>
{
    fn as_ref(&self) -> &[L::F]
    {
        self.array
    }
}

//

#[test]
fn test_matop1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let array = &[ // row-major
        1., 2., 3.,
        4., 5., 6.,
    ];
    let m = MatOp::<L>::new(2, 3, array);

    let mut y = [1., 1.];
    m.op(1., &[1., 0., -1.], 2., &mut y);
    assert_float_eq!(y.as_ref(), [0., 0.].as_ref(), abs_all <= 1e-12);

    let mut x = [0.; 3];
    m.trans_op(1., &[1., 1.], 0., &mut x);
    assert_float_eq!(x.as_ref(), [5., 7., 9.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_matop2()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let array = &[ // row-major, second row is zero
        3., 0., 4.,
        0., 0., 0.,
        1., 2., 2.,
    ];
    let m = MatOp::<L>::new(3, 3, array);

    let mut work = [0.; 9];
    let mut d = [0.; 3];
    let mut e = [0.; 3];
    let me = m.copy_equil(10, 1e-12, &mut work, &mut d, &mut e);

    assert_float_eq!(d[1], 1., abs <= 1e-12);

    // D A E == A~
    let a_eq = me.as_ref();
    for r in 0.. 3 {
        for c in 0.. 3 {
            assert_float_eq!(a_eq[r * 3 + c], d[r] * array[r * 3 + c] * e[c], abs <= 1e-12);
        }
    }

    // columns are unit after the last sweep
    for c in 0.. 3 {
        let sq: f64 = (0.. 3).map(|r| a_eq[r * 3 + c] * a_eq[r * 3 + c]).sum();
        assert_float_eq!(sq, 1., abs <= 1e-9);
    }
}
