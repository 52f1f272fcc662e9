use pogs::prelude::*;
use pogs::{MatBuild, PogsData};

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use anyhow::Result;
use std::time::Instant;

type La = FloatGeneric<f64>;
type AMatBuild = MatBuild<La>;
type APogsData = PogsData<La>;

/// standard normal by Box-Muller
fn randn<R: Rng>(rng: &mut R) -> f64
{
    let u1: f64 = 1. - rng.gen::<f64>(); // (0, 1]
    let u2: f64 = rng.gen();
    (-2. * u1.ln()).sqrt() * (2. * std::f64::consts::PI * u2).cos()
}

/// non-negative least squares
///   minimize    (1/2) ||Ax - b||_2^2
///   subject to  x >= 0
fn nonneg_l2(m: usize, n: usize) -> Result<f64>
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);

    //----- A = rand(m, n) / n

    let a = AMatBuild::new(m, n)
            .by_fn(|_, _| rng.gen::<f64>() / n as f64);

    //----- b = A * [ones(2n/3); -ones(n - 2n/3)] + 0.01 * randn(m)

    let mut b = vec![0.; m];
    for (i, bi) in b.iter_mut().enumerate() {
        for j in 0.. n {
            *bi += if 3 * j < 2 * n {a[(i, j)]} else {-a[(i, j)]};
        }
        *bi += 0.01 * randn(&mut rng);
    }

    let mut pogs_data = APogsData::new(a);
    pogs_data.f = b.iter()
                   .map(|&bi| FunctionObj::new(Function::Square).par(|f| f.b = bi))
                   .collect();
    pogs_data.g = vec![FunctionObj::new(Function::IndGe0); n];

    if let Ok(max_iter) = std::env::var("POGS_MAX_ITER") {
        pogs_data.par.max_iter = max_iter.parse()?;
    }

    let t = Instant::now();
    pogs_data.solve()?;
    let elapsed = t.elapsed().as_secs_f64();

    log::info!("optval {:.6e}, {} iterations, converged {}", pogs_data.optval, pogs_data.iter, pogs_data.converged);
    log::debug!("x {:?}", pogs_data.x);

    Ok(elapsed)
}

/// main
fn main() -> Result<()> {
    env_logger::init();

    let (m, n) = (1000, 100);
    let t = nonneg_l2(m, n)?;
    println!("Solver Time: {:e} s", t);

    Ok(())
}
