/// Host object.
/// 
/// Vectors are always typed and may have length one for scalars.
/// Matrices carry their dimensions and column-major data.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue
{
    /// Absent value.
    Null,
    /// Double precision vector.
    Real(Vec<f64>),
    /// Integer vector.
    Integer(Vec<i32>),
    /// Logical vector.
    Logical(Vec<bool>),
    /// Character vector.
    Str(Vec<String>),
    /// Named list.
    List(Vec<(String, HostValue)>),
    /// Double precision matrix in column-major.
    Matrix {
        /// Number of rows.
        nrow: usize,
        /// Number of columns.
        ncol: usize,
        /// Column-major data.
        data: Vec<f64>,
    },
}

static NULL: HostValue = HostValue::Null;

impl HostValue
{
    /// Named list from pairs of names and values.
    pub fn list<'a, I>(items: I) -> Self
    where I: IntoIterator<Item=(&'a str, HostValue)>
    {
        HostValue::List(items.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Length-one double vector.
    pub fn scalar(v: f64) -> Self
    {
        HostValue::Real(vec![v])
    }

    /// Checks if [`HostValue::Null`].
    pub fn is_null(&self) -> bool
    {
        matches!(self, HostValue::Null)
    }

    /// Number of elements, or of list entries.
    pub fn len(&self) -> usize
    {
        match self {
            HostValue::Null => 0,
            HostValue::Real(v) => v.len(),
            HostValue::Integer(v) => v.len(),
            HostValue::Logical(v) => v.len(),
            HostValue::Str(v) => v.len(),
            HostValue::List(v) => v.len(),
            HostValue::Matrix {data, ..} => data.len(),
        }
    }

    /// Checks if [`HostValue::len`] is zero.
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Dimensions of a matrix.
    /// 
    /// Returns a tuple of a number of rows and columns, or `None` if not a matrix.
    pub fn dim(&self) -> Option<(usize, usize)>
    {
        match self {
            HostValue::Matrix {nrow, ncol, ..} => Some((*nrow, *ncol)),
            _ => None,
        }
    }

    /// Element as a double, coercing integers and logicals.
    /// 
    /// Returns `None` if out of range or not numeric.
    pub fn real_at(&self, i: usize) -> Option<f64>
    {
        match self {
            HostValue::Real(v) => v.get(i).copied(),
            HostValue::Integer(v) => v.get(i).map(|e| *e as f64),
            HostValue::Logical(v) => v.get(i).map(|e| if *e {1.} else {0.}),
            HostValue::Matrix {data, ..} => data.get(i).copied(),
            _ => None,
        }
    }

    /// Element as a logical, coercing numbers by non-zero.
    /// 
    /// Returns `None` if out of range or not logical nor numeric.
    pub fn logical_at(&self, i: usize) -> Option<bool>
    {
        match self {
            HostValue::Logical(v) => v.get(i).copied(),
            HostValue::Real(v) => v.get(i).map(|e| *e != 0.),
            HostValue::Integer(v) => v.get(i).map(|e| *e != 0),
            _ => None,
        }
    }
}

impl From<Vec<f64>> for HostValue
{
    fn from(v: Vec<f64>) -> Self
    {
        HostValue::Real(v)
    }
}

/// Looks up a list element by its name.
/// 
/// Returns the first element named `name`,
/// or [`HostValue::Null`] if not found or `list` is not a list.
pub fn get_list_element<'a>(list: &'a HostValue, name: &str) -> &'a HostValue
{
    if let HostValue::List(items) = list {
        items.iter()
             .find(|(k, _)| k == name)
             .map(|(_, v)| v)
             .unwrap_or(&NULL)
    }
    else {
        &NULL
    }
}
