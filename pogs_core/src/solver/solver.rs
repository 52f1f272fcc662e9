//! Proximal operator graph solver

use num_traits::{Float, NumCast, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::SolverError;
use crate::{LinAlgEx, MatOp, FunctionObj};

//

/// Solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParam<F: Float>
{
    /// Initial penalty parameter \\(\rho\\) of ADMM.
    pub rho: F,
    /// Absolute tolerance of the primal and dual residuals.
    pub abs_tol: F,
    /// Relative tolerance of the primal and dual residuals.
    pub rel_tol: F,
    /// Max iteration number of ADMM. Zero returns the initial point without iterating.
    pub max_iter: usize,
    /// Suppresses progress log at info level.
    pub quiet: bool,
    /// Balances the primal and dual residuals by adapting \\(\rho\\).
    pub adaptive_rho: bool,
    /// Over-relaxation parameter \\(0 < \alpha < 2\\).
    pub alpha: F,
    /// Requires the duality gap as well as the residuals to be within tolerance.
    pub gap_stop: bool,
    /// Number of equilibration sweeps of the matrix.
    pub equil_iter: usize,
    /// Period of iterations to output progress log.
    pub log_period: usize,
    /// Tolerance of small positive value to avoid division by zero.
    pub eps_zero: F,
}

impl<F: Float> Default for SolverParam<F>
{
    fn default() -> Self
    {
        let ten = F::from(10).unwrap();

        SolverParam {
            rho: F::one(),
            abs_tol: ten.powi(-4),
            rel_tol: ten.powi(-3),
            max_iter: 1000,
            quiet: false,
            adaptive_rho: true,
            alpha: F::from(1.7).unwrap(),
            gap_stop: false,
            equil_iter: 10,
            log_period: 10,
            eps_zero: ten.powi(-12),
        }
    }
}

impl<F: Float> SolverParam<F>
{
    fn is_valid(&self) -> bool
    {
        let f0 = F::zero();
        let f2 = F::one() + F::one();

        self.rho > f0 && self.rho.is_finite()
            && self.abs_tol >= f0 && self.rel_tol >= f0
            && self.alpha > f0 && self.alpha < f2
            && self.eps_zero > f0
    }
}

//

/// Result of [`Solver::solve`], borrowing the work slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<'a, F: Float>
{
    /// Primal variable \\(x\\).
    pub x: &'a[F],
    /// Primal variable \\(y = A x\\).
    pub y: &'a[F],
    /// Dual variable \\(\lambda\\) of the constraint \\(y = A x\\), \\(\lambda \in \partial f(y)\\).
    pub l: &'a[F],
    /// Objective value \\(f(y) + g(x)\\).
    pub optval: F,
    /// Number of iterations run.
    pub iter: usize,
    /// `false` if the iterations stopped by [`SolverParam::max_iter`].
    pub converged: bool,
}

//

/// Proximal operator graph solver struct.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// This struct abstracts a solver of a problem in graph form:
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & \sum_{i=0}^{m-1} f_i(y_i) + \sum_{j=0}^{n-1} g_j(x_j) \\\\
/// {\rm subject \ to} & y = A x,
/// \end{array}
/// \\]
/// where
/// * variables \\( x \in \mathbb{R}^n,\ y \in \mathbb{R}^m \\)
/// * \\( A \in \mathbb{R}^{m \times n} \\) as a dense matrix
/// * \\( f_i, g_j \\) as closed proper convex [`FunctionObj`]s.
/// 
/// The matrix is equilibrated, and then ADMM alternates
/// proximal steps of \\(f, g\\) and euclidean projections onto the graph \\(\lbrace (x, y) \mid y = A x \rbrace\\).
/// The projection uses a cholesky factor of \\(I + A^T A\\) (or \\(I + A A^T\\) if \\(m < n\\)) computed once.
pub struct Solver<L: LinAlgEx>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlgEx> Solver<L>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`Solver::solve`] requires.
    /// * `op_a_size` is a number of rows and columns of \\(A\\).
    pub fn query_worklen(op_a_size: (usize, usize)) -> usize
    {
        let (m, n) = op_a_size;
        let k = m.min(n);

        (n + m) * 5 + // z12, zt, z, zprev, tmp
        m + n +       // d, e
        m * n +       // equilibrated A
        k * k         // cholesky factor
    }

    /// Creates an instance.
    /// 
    /// Returns [`Solver`] instance.
    pub fn new() -> Self
    {
        Solver {
            par: SolverParam::default(),
        }
    }

    /// Changes solver parameters.
    /// 
    /// Returns [`Solver`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut SolverParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlgEx> Default for Solver<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlgEx> Solver<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve a problem in graph form.
    /// 
    /// Returns `Ok` with [`Solution`] or `Err` with [`SolverError`] type.
    /// Reaching [`SolverParam::max_iter`] is not an error; see [`Solution::converged`].
    /// * `op_a` is \\(A\\) as [`MatOp`].
    /// * `f` is \\(f_0, \ldots, f_{m-1}\\).
    /// * `g` is \\(g_0, \ldots, g_{n-1}\\).
    /// * `work` slice is used for temporal variables. [`Solver::solve`] does not rely on dynamic heap allocation.
    pub fn solve<'w>(self,
        (op_a, f, g, work): (MatOp<'_, L>, &[FunctionObj<L::F>], &[FunctionObj<L::F>], &'w mut[L::F])
    ) -> Result<Solution<'w, L::F>, SolverError>
    {
        let (m, n) = op_a.size();

        if f.len() != m || g.len() != n {
            log::error!("Size mismatch: op_a{:?}, f({}), g({})", op_a.size(), f.len(), g.len());
            return Err(SolverError::InvalidOp);
        }

        if Self::query_worklen((m, n)) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen((m, n)));
            return Err(SolverError::WorkShortage);
        }

        if let Some(i) = f.iter().position(|fo| !fo.is_valid()) {
            log::error!("Invalid f[{}]: {:?}", i, f[i]);
            return Err(SolverError::InvalidFunc);
        }
        if let Some(j) = g.iter().position(|fo| !fo.is_valid()) {
            log::error!("Invalid g[{}]: {:?}", j, g[j]);
            return Err(SolverError::InvalidFunc);
        }

        if !self.par.is_valid() {
            log::error!("Invalid {:?}", self.par);
            return Err(SolverError::InvalidParam);
        }

        log::debug!("{:?}", self.par);

        let (optval, iter, converged) = {
            log::info!("----- Initializing");
            let k = m.min(n);

            let (z12, rest) = work.split_at_mut(n + m);
            let (zt, rest) = rest.split_at_mut(n + m);
            let (z, rest) = rest.split_at_mut(n + m);
            let (zprev, rest) = rest.split_at_mut(n + m);
            let (tmp, rest) = rest.split_at_mut(n + m);
            let (d, rest) = rest.split_at_mut(m);
            let (e, rest) = rest.split_at_mut(n);
            let (a_eq, rest) = rest.split_at_mut(m * n);
            let (gram, _) = rest.split_at_mut(k * k);

            let a = op_a.copy_equil(self.par.equil_iter, self.par.eps_zero, a_eq, d, e);

            // I + A^T A or I + A A^T
            gram.fill(L::F::zero());
            for i in 0.. k {
                gram[i * k + i] = L::F::one();
            }
            L::gram(m >= n, m, n, L::F::one(), a.as_ref(), L::F::one(), gram);
            if L::chol_factor(k, gram, self.par.eps_zero).is_err() {
                log::error!("Cholesky factorization failed");
                return Err(SolverError::FactorFailure);
            }

            let core = SolverCore {
                par: self.par,
                a,
                d, e,
                gram,
                f, g,
            };

            core.solve(z12, zt, z, zprev, tmp)?
        };

        let (sol_x, rest) = work.split_at(n);
        let (sol_y, rest) = rest.split_at(m);
        let (_, rest) = rest.split_at(n);
        let (sol_l, _) = rest.split_at(m);

        Ok(Solution {
            x: sol_x,
            y: sol_y,
            l: sol_l,
            optval,
            iter,
            converged,
        })
    }
}

//

struct SolverCore<'a, L>
where L: LinAlgEx, L::F: Float + Debug + LowerExp
{
    par: SolverParam<L::F>,

    a: MatOp<'a, L>,
    d: &'a[L::F],
    e: &'a[L::F],
    gram: &'a[L::F],

    f: &'a[FunctionObj<L::F>],
    g: &'a[FunctionObj<L::F>],
}

impl<'a, L> SolverCore<'a, L>
where L: LinAlgEx, L::F: Float + Debug + LowerExp
{
    fn solve(&self, z12: &mut[L::F], zt: &mut[L::F], z: &mut[L::F], zprev: &mut[L::F], tmp: &mut[L::F])
    -> Result<(L::F, usize, bool), SolverError>
    {
        let (m, n) = self.a.size();

        let f0 = L::F::zero();
        let f1 = L::F::one();
        let alpha = self.par.alpha;

        let sqrt_m = <L::F as NumCast>::from(m).unwrap().sqrt();
        let sqrt_n = <L::F as NumCast>::from(n).unwrap().sqrt();
        let sqrt_mn = <L::F as NumCast>::from(m + n).unwrap().sqrt();

        let mut rho = self.par.rho;

        z12.fill(f0);
        z.fill(f0);
        zt.fill(f0);

        log::info!("----- Started");
        if !self.par.quiet {
            log::info!("iter: pri_res eps_pri dual_res eps_dual gap eps_gap objective");
        }

        let mut i = 0;
        let converged = loop {
            if i >= self.par.max_iter {
                // max_iter == 0: the initial point is returned
                log::warn!("----- ExcessIter");
                break false;
            }

            let excess_iter = i + 1 >= self.par.max_iter;

            let log_trig = if self.par.log_period > 0 {
                i % self.par.log_period == 0
            }
            else {
                false
            };

            // Proximal step z12 := prox(z - zt)
            L::copy(z, tmp);
            L::add(-f1, zt, tmp);
            self.prox(tmp, rho, z12);

            // Over-relaxed projection z := Pi(alpha z12 + (1 - alpha) z + zt)
            L::copy(z, zprev);
            L::copy(zt, z);
            L::add(alpha, z12, z);
            L::add(f1 - alpha, zprev, z);
            L::copy(z, tmp);
            self.project(z);

            // Dual update zt := zt + (alpha z12 + (1 - alpha) zprev) - z
            L::copy(tmp, zt);
            L::add(-f1, z, zt);

            // Termination criteria
            let (nrm_r, nrm_s, gap) = self.residuals(z12, zt, z, zprev, rho, tmp);
            let optval = self.objective(z12);

            let eps_pri = sqrt_m * self.par.abs_tol + self.par.rel_tol * L::norm(z12);
            let eps_dual = sqrt_n * self.par.abs_tol + self.par.rel_tol * rho * L::norm(zt);
            let eps_gap = sqrt_mn * self.par.abs_tol + self.par.rel_tol * optval.abs();

            if !(nrm_r.is_finite() && nrm_s.is_finite()) {
                log::error!("{}: pri_res {:?} dual_res {:?}", i, nrm_r, nrm_s);
                return Err(SolverError::NotFinite);
            }

            let term_conv = (nrm_r <= eps_pri) && (nrm_s <= eps_dual) && (!self.par.gap_stop || gap <= eps_gap);

            if !self.par.quiet && (log_trig || excess_iter || term_conv) {
                log::info!("{}: {:.2e} {:.2e} {:.2e} {:.2e} {:.2e} {:.2e} {:.4e}", i, nrm_r, eps_pri, nrm_s, eps_dual, gap, eps_gap, optval);
            }
            else {
                log::trace!("{}: {:.2e} {:.2e} {:.2e} {:.2e} {:.2e} {:.2e} {:.4e}", i, nrm_r, eps_pri, nrm_s, eps_dual, gap, eps_gap, optval);
            }

            i += 1;

            if term_conv {
                log::info!("----- Converged");
                break true;
            }
            else if excess_iter {
                log::warn!("----- ExcessIter");
                break false;
            }

            if self.par.adaptive_rho {
                rho = self.adapt_rho(rho, nrm_r / eps_pri, nrm_s / eps_dual, zt);
            }
        };

        self.unscale(z12, zt, rho);

        // f(y) + g(x) with the unscaled terms
        let (x, y) = z12.split_at(n);
        let mut optval = f0;
        for (fo, v) in self.f.iter().zip(y) {
            optval = optval + fo.eval(*v);
        }
        for (go, v) in self.g.iter().zip(x) {
            optval = optval + go.eval(*v);
        }

        log::debug!("optval {:.4e}, {} iterations", optval, i);

        Ok((optval, i, converged))
    }

    fn prox(&self, v: &[L::F], rho: L::F, z12: &mut[L::F])
    {
        let (_, n) = self.a.size();

        let (v_x, v_y) = v.split_at(n);
        let (x12, y12) = z12.split_at_mut(n);

        for (j, x) in x12.iter_mut().enumerate() {
            *x = self.g[j].scaled(self.e[j]).prox(v_x[j], rho);
        }
        for (i, y) in y12.iter_mut().enumerate() {
            *y = self.f[i].scaled(self.d[i].recip()).prox(v_y[i], rho);
        }
    }

    fn project(&self, z: &mut[L::F])
    {
        let (m, n) = self.a.size();

        let f0 = L::F::zero();
        let f1 = L::F::one();

        let (z_x, z_y) = z.split_at_mut(n);

        if m >= n {
            // x := (I + A^T A)^-1 (c + A^T d)
            self.a.trans_op(f1, z_y, f1, z_x);
            L::chol_solve(n, self.gram, z_x);
        }
        else {
            // x := c - A^T (I + A A^T)^-1 (A c - d)
            self.a.op(f1, z_x, -f1, z_y);
            L::chol_solve(m, self.gram, z_y);
            self.a.trans_op(-f1, z_y, f1, z_x);
        }

        // y := A x
        self.a.op(f1, z_x, f0, z_y);
    }

    fn residuals(&self, z12: &[L::F], zt: &[L::F], z: &[L::F], zprev: &[L::F], rho: L::F, tmp: &mut[L::F])
    -> (L::F, L::F, L::F)
    {
        let (_, n) = self.a.size();

        let f1 = L::F::one();

        // primal: ||A x12 - y12||
        let nrm_r = {
            let (x12, y12) = z12.split_at(n);
            let (_, t_y) = tmp.split_at_mut(n);
            L::copy(y12, t_y);
            self.a.op(f1, x12, -f1, t_y);
            L::norm(t_y)
        };

        // dual: rho ||z - zprev||
        let nrm_s = {
            L::copy(z, tmp);
            L::add(-f1, zprev, tmp);
            rho * L::norm(tmp)
        };

        // zt approaches -(dual variables) / rho, which are orthogonal to the graph
        let gap = rho * L::dot(zt, z12).abs();

        (nrm_r, nrm_s, gap)
    }

    fn objective(&self, z12: &[L::F]) -> L::F
    {
        let (_, n) = self.a.size();
        let (x12, y12) = z12.split_at(n);

        let mut sum = L::F::zero();
        for (j, x) in x12.iter().enumerate() {
            sum = sum + self.g[j].scaled(self.e[j]).eval(*x);
        }
        for (i, y) in y12.iter().enumerate() {
            sum = sum + self.f[i].scaled(self.d[i].recip()).eval(*y);
        }
        sum
    }

    fn adapt_rho(&self, rho: L::F, rel_r: L::F, rel_s: L::F, zt: &mut[L::F]) -> L::F
    {
        let mu = <L::F as NumCast>::from(10).unwrap();
        let tau = L::F::one() + L::F::one();

        // zt is scaled by 1/rho
        if rel_r > mu * rel_s {
            L::scale(tau.recip(), zt);
            log::trace!("rho {:.2e} -> {:.2e}", rho, rho * tau);
            rho * tau
        }
        else if rel_s > mu * rel_r {
            L::scale(tau, zt);
            log::trace!("rho {:.2e} -> {:.2e}", rho, rho / tau);
            rho / tau
        }
        else {
            rho
        }
    }

    fn unscale(&self, z12: &mut[L::F], zt: &mut[L::F], rho: L::F)
    {
        let (_, n) = self.a.size();

        // x = E x~, y = D^-1 y~
        let (x12, y12) = z12.split_at_mut(n);
        for (x, e) in x12.iter_mut().zip(self.e) {
            *x = *x * *e;
        }
        for (y, d) in y12.iter_mut().zip(self.d) {
            *y = *y / *d;
        }

        // l = -rho D yt
        let (_, yt) = zt.split_at_mut(n);
        for (l, d) in yt.iter_mut().zip(self.d) {
            *l = -rho * *d * *l;
        }
    }
}
