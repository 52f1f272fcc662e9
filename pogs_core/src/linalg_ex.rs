use crate::solver::LinAlg;

/// Linear algebra extended subtrait
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
/// 
/// Matrices are dense and stored in row-major.
pub trait LinAlgEx: LinAlg + Clone
{
    /// Calculates \\(\alpha A x + \beta y\\).
    /// 
    /// * If `transpose` is `true`, Calculate \\(\alpha A^T x + \beta y\\) instead.
    /// * `n_row` is a number of rows of \\(A\\).
    /// * `n_col` is a number of columns of \\(A\\).
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `mat` is a matrix \\(A\\), stored in row-major.
    ///   The length of `mat` shall be `n_row * n_col`.
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be `n_col` (or `n_row` if `transpose` is `true`).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha A x + \beta y\\) (or \\(\alpha A^T x + \beta y\\) if `transpose` is `true`) on exit.
    ///   The length of `y` shall be `n_row` (or `n_col` if `transpose` is `true`).
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: Self::F, mat: &[Self::F], x: &[Self::F], beta: Self::F, y: &mut[Self::F]);

    /// Calculates \\(\alpha A A^T + \beta G\\).
    /// 
    /// * If `transpose` is `true`, Calculate \\(\alpha A^T A + \beta G\\) instead.
    /// * `n_row`, `n_col`, `alpha` and `mat` are the same as [`LinAlgEx::transform_ge`].
    /// * `beta` is a scalar \\(\beta\\).
    /// * `gram` is a square matrix \\(G\\) in row-major before entry, the result on exit.
    ///   Its size shall be `n_row` (or `n_col` if `transpose` is `true`).
    fn gram(transpose: bool, n_row: usize, n_col: usize, alpha: Self::F, mat: &[Self::F], beta: Self::F, gram: &mut[Self::F]);

    /// Cholesky factorization \\(G = L L^T\\) of a symmetric positive definite matrix.
    /// 
    /// Returns `Ok`, or `Err` if a pivot is not greater than `eps_zero`.
    /// * `n` is a number of rows and columns of \\(G\\).
    /// * `mat` is \\(G\\) in row-major before entry.
    ///   Its lower-triangular part is replaced with \\(L\\) on exit.
    fn chol_factor(n: usize, mat: &mut[Self::F], eps_zero: Self::F) -> Result<(), ()>;

    /// Solves \\(L L^T x = b\\) with a factor given by [`LinAlgEx::chol_factor`].
    /// 
    /// * `n` is a number of rows and columns of \\(L\\).
    /// * `mat` holds \\(L\\) in its lower-triangular part.
    /// * `x` is \\(b\\) before entry, \\(x\\) on exit.
    fn chol_solve(n: usize, mat: &[Self::F], x: &mut[Self::F]);
}
