/*!
POGS, proximal operator graph solver.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate for Rust provides **convex optimization problems in graph form**
that can be solved by [`pogs_core`], and the [`host`] layer which marshals
list/matrix objects of a host statistical environment into them.

# General usage

1. An optimization problem you want to solve is assumed to be expressed in graph form
   \\[
   \begin{array}{ll}
   {\rm minimize} & \sum_i f_i(y_i) + \sum_j g_j(x_j) \\\\
   {\rm subject \ to} & y = A x,
   \end{array}
   \\]
   where each term is \\(c\ h(a t - b) + d t + {1 \over 2} e t^2\\) of a [`prelude::Function`] \\(h\\).
1. Construct \\(A\\) using [`MatBuild`] and wrap it into [`PogsData`].
1. Push [`prelude::FunctionObj`]s to `f` and `g`, and optionally change `par`.
1. Invoke [`PogsData::solve`] and read the results.

# Examples

Non-negative least squares:
\\[
\begin{array}{ll}
{\rm minimize} & {1 \over 2} \\|A x - b\\|_2^2 \\\\
{\rm subject \ to} & x \ge 0
\end{array}
\\]
with \\(A = I\\) and \\(b = (1, -2)\\), of which solution is \\(x = (1, 0)\\).

```
use float_eq::assert_float_eq;
use pogs::prelude::*;
use pogs::*;

//env_logger::init(); // Use any logger crate as `pogs` uses `log` crate.

type La = FloatGeneric<f64>;

let a = MatBuild::<La>::new(2, 2).iter_rowmaj(&[
    1., 0.,
    0., 1.,
]);

let mut pogs_data = PogsData::new(a);
pogs_data.f.push(FunctionObj::with_params(Function::Square, 1., 1., 1., 0., 0.));
pogs_data.f.push(FunctionObj::with_params(Function::Square, 1., -2., 1., 0., 0.));
pogs_data.g.push(FunctionObj::new(Function::IndGe0));
pogs_data.g.push(FunctionObj::new(Function::IndGe0));
pogs_data.par.abs_tol = 1e-6;
pogs_data.par.rel_tol = 1e-6;
pogs_data.par.max_iter = 10_000;

pogs_data.solve().unwrap();

assert_float_eq!(pogs_data.x.as_slice(), [1., 0.].as_ref(), abs_all <= 1e-3);
```
*/

mod matbuild;

pub use matbuild::*;

//

mod pogsdata;

pub use pogsdata::*;

//

pub mod host;

//

/// Prelude
pub mod prelude
{
   pub use pogs_core::solver::{Solver, SolverError, SolverParam, Solution};
   pub use pogs_core::{FloatGeneric, Function, FunctionObj};
}
