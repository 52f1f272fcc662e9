use num_traits::{Float, Zero};
use core::fmt::{Debug, LowerExp};
use pogs_core::solver::{Solver, SolverError, SolverParam};
use pogs_core::{LinAlgEx, FunctionObj};
use crate::MatBuild;

//

/// Problem data and results of the graph-form solver
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & \sum_{i=0}^{m-1} f_i(y_i) + \sum_{j=0}^{n-1} g_j(x_j) \\\\
/// {\rm subject \ to} & y = A x
/// \end{array}
/// \\]
/// 
/// Fill `f` and `g` and optionally change `par`, then call [`PogsData::solve`].
/// Results are stored in `x`, `y`, `l`, `optval`, `iter` and `converged`.
#[derive(Debug, Clone)]
pub struct PogsData<L: LinAlgEx>
{
    /// \\(A \in \mathbb{R}^{m \times n}\\).
    pub a: MatBuild<L>,
    /// \\(f_0, \ldots, f_{m-1}\\).
    pub f: Vec<FunctionObj<L::F>>,
    /// \\(g_0, \ldots, g_{n-1}\\).
    pub g: Vec<FunctionObj<L::F>>,
    /// Solver parameters.
    pub par: SolverParam<L::F>,

    /// Resulted \\(x\\).
    pub x: Vec<L::F>,
    /// Resulted \\(y\\).
    pub y: Vec<L::F>,
    /// Resulted dual variable \\(\lambda\\) of \\(y = A x\\).
    pub l: Vec<L::F>,
    /// Resulted objective value.
    pub optval: L::F,
    /// Number of iterations run.
    pub iter: usize,
    /// `false` if the iterations stopped by [`SolverParam::max_iter`].
    pub converged: bool,
}

impl<L: LinAlgEx> PogsData<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`PogsData`] with empty function lists, default parameters and zero results.
    /// * `a` is \\(A\\).
    pub fn new(a: MatBuild<L>) -> Self
    {
        let (m, n) = a.size();
        let f0 = L::F::zero();

        PogsData {
            a,
            f: Vec::with_capacity(m),
            g: Vec::with_capacity(n),
            par: SolverParam::default(),
            x: vec![f0; n],
            y: vec![f0; m],
            l: vec![f0; m],
            optval: f0,
            iter: 0,
            converged: false,
        }
    }

    /// Size of \\(A\\).
    /// 
    /// Returns a tuple of \\(m\\) and \\(n\\).
    pub fn size(&self) -> (usize, usize)
    {
        self.a.size()
    }
}

impl<L: LinAlgEx> PogsData<L>
where L::F: Float + Debug + LowerExp
{
    /// Runs the solver.
    /// 
    /// Returns `Ok` when the results are stored, or `Err` with [`SolverError`] type.
    /// Reaching the iteration limit stores the last iterate with `converged` being `false`.
    pub fn solve(&mut self) -> Result<(), SolverError>
    {
        let (m, n) = self.size();

        let mut work = vec![L::F::zero(); Solver::<L>::query_worklen((m, n))];
        let par = self.par.clone();
        let s = Solver::<L>::new().par(|p| *p = par);

        let sol = s.solve((self.a.as_op(), &self.f[..], &self.g[..], &mut work[..]))?;

        self.x.resize(n, L::F::zero());
        self.y.resize(m, L::F::zero());
        self.l.resize(m, L::F::zero());
        self.x.copy_from_slice(sol.x);
        self.y.copy_from_slice(sol.y);
        self.l.copy_from_slice(sol.l);
        self.optval = sol.optval;
        self.iter = sol.iter;
        self.converged = sol.converged;

        Ok(())
    }
}
