/*!
Core of POGS, a proximal operator graph solver.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate solves convex optimization problems in graph form
\\[
\begin{array}{ll}
{\rm minimize} & f(y) + g(x) \\\\
{\rm subject \ to} & y = A x,
\end{array}
\\]
where \\(f\\) and \\(g\\) are separable sums of [`FunctionObj`] terms,
by ADMM (alternating direction method of multipliers).

[`solver::Solver`] does not rely on dynamic heap allocation;
all temporal variables live in a work slice given by the caller.
*/

#![no_std]

pub mod solver;

//

mod linalg_ex;

pub use linalg_ex::*;

//

mod floatgeneric;

pub use floatgeneric::*;

//

mod matop;

pub use matop::*;

//

mod function;
mod lambertw;

pub use function::*;
