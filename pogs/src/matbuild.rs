use std::ops::{Index, IndexMut, Deref};
use num_traits::{Float, Zero};
use pogs_core::{LinAlgEx, MatOp};

//

/// Matrix builder
/// 
/// Dense matrix struct which owns a `Vec` of row-major data array and is able to be converted as [`pogs_core::MatOp`].
/// This struct relies on dynamic heap allocation.
#[derive(Debug, Clone)]
pub struct MatBuild<L: LinAlgEx>
{
    n_row: usize,
    n_col: usize,
    array: Vec<L::F>,
}

impl<L: LinAlgEx> MatBuild<L>
{
    /// Creates an instance.
    /// 
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `n_row` and `n_col` are a number of rows and columns.
    pub fn new(n_row: usize, n_col: usize) -> Self
    {
        MatBuild {
            n_row, n_col,
            array: vec![L::F::zero(); n_row * n_col],
        }
    }

    /// Creates an instance taking a row-major data array.
    /// 
    /// Returns the [`MatBuild`] instance, or `None` if the length of `array` is not `n_row * n_col`.
    pub fn from_vec(n_row: usize, n_col: usize, array: Vec<L::F>) -> Option<Self>
    {
        if array.len() == n_row * n_col {
            Some(MatBuild {
                n_row, n_col, array,
            })
        }
        else {
            None
        }
    }

    /// Size of the matrix.
    /// 
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    /// Converted as [`pogs_core::MatOp`].
    /// 
    /// Returns the [`pogs_core::MatOp`] borrowing the internal data array.
    pub fn as_op(&self) -> MatOp<'_, L>
    {
        MatOp::new(self.n_row, self.n_col, &self.array)
    }

    /// Data by a function.
    /// 
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> L::F
    {
        for r in 0.. self.n_row {
            for c in 0.. self.n_col {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> L::F
    {
        self.set_by_fn(func);
        self
    }

    /// Data by an iterator in column-major.
    /// 
    /// * `iter` iterates matrix data in column-major.
    ///   Elements left over after the iterator ends keep their values.
    pub fn set_iter_colmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        let mut i = iter.into_iter();

        for c in 0.. self.n_col {
            for r in 0.. self.n_row {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    return;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_colmaj`].
    pub fn iter_colmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_colmaj(iter);
        self
    }

    /// Data by an iterator in row-major.
    /// 
    /// * `iter` iterates matrix data in row-major.
    ///   Elements left over after the iterator ends keep their values.
    pub fn set_iter_rowmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        for (e, v) in self.array.iter_mut().zip(iter) {
            *e = *v;
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_rowmaj`].
    pub fn iter_rowmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_rowmaj(iter);
        self
    }

    /// Scales by \\(\alpha\\).
    pub fn set_scale(&mut self, alpha: L::F)
    {
        L::scale(alpha, &mut self.array);
    }
    /// Builder pattern of [`MatBuild::set_scale`].
    pub fn scale(mut self, alpha: L::F) -> Self
    {
        self.set_scale(alpha);
        self
    }

    /// Calculates \\(\alpha A x + \beta y\\).
    pub fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.as_op().op(alpha, x, beta, y);
    }

    fn index(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n_row);
        assert!(c < self.n_col);

        r * self.n_col + c
    }
}

//

impl<L: LinAlgEx> Index<(usize, usize)> for MatBuild<L>
{
    type Output = L::F;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.index(index);

        &self.array[i]
    }
}

impl<L: LinAlgEx> IndexMut<(usize, usize)> for MatBuild<L>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.index(index);

        &mut self.array[i]
    }
}

//

impl<L: LinAlgEx> AsRef<[L::F]> for MatBuild<L>
{
    fn as_ref(&self) -> &[L::F]
    {
        &self.array
    }
}

impl<L: LinAlgEx> AsMut<[L::F]> for MatBuild<L>
{
    fn as_mut(&mut self) -> &mut[L::F]
    {
        &mut self.array
    }
}

//

impl<L: LinAlgEx> core::fmt::Display for MatBuild<L>
where L::F: Float + core::fmt::LowerExp
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error>
    {
        let (nr, nc) = self.size();
        if nr == 0 || nc == 0 {
            write!(f, "[ ]")?;
        }
        else {
            write!(f, "[ {:.3e}", self[(0, 0)])?;
            if nc > 2 {
                write!(f, " ...")?;
            }
            if nc > 1 {
                write!(f, " {:.3e}", self[(0, nc - 1)])?;
            }

            if nr > 2 {
                writeln!(f)?;
                write!(f, "  ...")?;
            }

            if nr > 1 {
                writeln!(f)?;
                write!(f, "  {:.3e}", self[(nr - 1, 0)])?;
                if nc > 2 {
                    write!(f, " ...")?;
                }
                if nc > 1 {
                    write!(f, " {:.3e}", self[(nr - 1, nc - 1)])?;
                }
            }
            write!(f, " ]")?;
        }

        write!(f, " ({} x {})", nr, nc)
    }
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;
    use pogs_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let m = MatBuild::<L>::new(2, 3)
            .iter_colmaj(&[
                1., 4.,
                2., 5.,
                3., 6.,
            ])
            .scale(2.);

    assert_float_eq!(m.as_ref(), [2., 4., 6., 8., 10., 12.].as_ref(), abs_all <= 1e-12);
    assert_float_eq!(m[(1, 0)], 8., abs <= 1e-12);

    let mut y = [0.; 2];
    m.op(1., &[1., 1., 1.], 0., &mut y);
    assert_float_eq!(y.as_ref(), [12., 30.].as_ref(), abs_all <= 1e-12);

    assert_eq!(format!("{}", m), "[ 2.000e0 ... 6.000e0\n  8.000e0 ... 1.200e1 ] (2 x 3)");
}

#[test]
fn test_matbuild2()
{
    use pogs_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    assert!(MatBuild::<L>::from_vec(2, 2, vec![1., 2., 3.]).is_none());

    let m = MatBuild::<L>::new(2, 2).by_fn(|r, c| (r * 10 + c) as f64);
    assert_eq!(m.as_ref(), &[0., 1., 10., 11.]);
}
