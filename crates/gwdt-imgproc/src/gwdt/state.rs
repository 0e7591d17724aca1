use gwdt_image::Image;

/// Distance assigned to cells no seed has reached yet.
pub const SENTINEL: f32 = f32::INFINITY;

/// Per-cell state of the transform.
///
/// A cell only advances `Far -> Trial`. Seeds start `Alive` and stay so, since no
/// relaxation can produce a cost below a seed's own intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelState {
    /// Seed cell.
    Alive,
    /// Cell with a tentative distance that has been queued on the frontier.
    Trial,
    /// Cell not reached yet.
    #[default]
    Far,
}

/// Per-cell state buffer.
pub type StateMap = Image<PixelState, 1>;

/// Per-cell distance buffer, [`SENTINEL`] where unreached.
pub type DistanceMap = Image<f32, 1>;

/// One of the eight moves of the 8-connected neighborhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Row offset.
    pub di: isize,
    /// Column offset.
    pub dj: isize,
    /// Geometric step length, `hypot(di, dj)`.
    pub step: f64,
}

impl Offset {
    const fn new(di: isize, dj: isize, step: f64) -> Self {
        Self { di, dj, step }
    }
}

/// The 8-connected neighborhood, orthogonal moves first.
pub const NEIGHBORHOOD: [Offset; 8] = [
    Offset::new(-1, 0, 1.0),
    Offset::new(1, 0, 1.0),
    Offset::new(0, -1, 1.0),
    Offset::new(0, 1, 1.0),
    Offset::new(-1, -1, std::f64::consts::SQRT_2),
    Offset::new(-1, 1, std::f64::consts::SQRT_2),
    Offset::new(1, -1, std::f64::consts::SQRT_2),
    Offset::new(1, 1, std::f64::consts::SQRT_2),
];

/// Iterate over the in-bounds neighbors of `(row, col)` as `(row, col, step)`.
#[inline]
pub fn neighbors(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize, f64)> {
    let offsets: &'static [Offset; 8] = &NEIGHBORHOOD;
    offsets.iter().filter_map(move |o| {
        let ni = row.checked_add_signed(o.di)?;
        let nj = col.checked_add_signed(o.dj)?;
        (ni < rows && nj < cols).then_some((ni, nj, o.step))
    })
}

/// Whether `(row, col)` lies on the outer ring of a `rows x cols` grid.
#[inline]
pub fn is_border(row: usize, col: usize, rows: usize, cols: usize) -> bool {
    row == 0 || col == 0 || row + 1 == rows || col + 1 == cols
}
