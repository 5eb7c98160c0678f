use lpsolvers_types::StandardForm;
use nalgebra::DMatrix;

/// Compressed sparse column arrays, handed to backend-specific matrix types
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CscParts {
    pub nrows: usize,
    pub ncols: usize,
    pub colptr: Vec<usize>,
    pub rowval: Vec<usize>,
    pub nzval: Vec<f64>,
}

/// Convert DMatrix to CSC (full matrix)
pub(crate) fn dense_to_csc(mat: &DMatrix<f64>) -> CscParts {
    to_csc(mat, |_, _| true)
}

/// Convert DMatrix to CSC keeping the upper triangle only (for P)
pub(crate) fn dense_to_csc_upper(mat: &DMatrix<f64>) -> CscParts {
    to_csc(mat, |row, col| row <= col)
}

fn to_csc(mat: &DMatrix<f64>, keep: impl Fn(usize, usize) -> bool) -> CscParts {
    let mut colptr = Vec::with_capacity(mat.ncols() + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    colptr.push(0);

    for col in 0..mat.ncols() {
        for row in 0..mat.nrows() {
            let val = mat[(row, col)];
            if val != 0.0 && keep(row, col) {
                rowval.push(row);
                nzval.push(val);
            }
        }
        colptr.push(nzval.len());
    }

    CscParts {
        nrows: mat.nrows(),
        ncols: mat.ncols(),
        colptr,
        rowval,
        nzval,
    }
}

/// Dense constraint rows accumulated block by block, each row with its own
/// lower and upper bound.
pub(crate) struct RowStack {
    ncols: usize,
    rows: Vec<Vec<f64>>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl RowStack {
    pub fn new(ncols: usize) -> Self {
        RowStack {
            ncols,
            rows: Vec::new(),
            lower: Vec::new(),
            upper: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Append the rows of `mat` with per-row bounds
    pub fn push_block(
        &mut self,
        mat: &DMatrix<f64>,
        lower: impl IntoIterator<Item = f64>,
        upper: impl IntoIterator<Item = f64>,
    ) {
        for r in 0..mat.nrows() {
            self.rows.push(mat.row(r).iter().copied().collect());
        }
        self.lower.extend(lower);
        self.upper.extend(upper);
    }

    /// Append a signed unit row selecting variable `var`
    pub fn push_unit(&mut self, var: usize, sign: f64, lower: f64, upper: f64) {
        let mut row = vec![0.0; self.ncols];
        row[var] = sign;
        self.rows.push(row);
        self.lower.push(lower);
        self.upper.push(upper);
    }

    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows.len(), self.ncols, |r, c| self.rows[r][c])
    }
}

/// Stack `[G; A]` with `-inf <= G x <= h` and `b <= A x <= b`.
pub(crate) fn stack_constraints(form: &StandardForm<'_>) -> RowStack {
    let mut stack = RowStack::new(form.num_vars());
    if let Some((g, h)) = form.inequalities() {
        stack.push_block(
            g,
            std::iter::repeat(f64::NEG_INFINITY).take(h.len()),
            h.iter().copied(),
        );
    }
    if let Some((a, b)) = form.equalities() {
        stack.push_block(a, b.iter().copied(), b.iter().copied());
    }
    stack
}
