use glam::Vec2;

/// Uniform 2D hash grid for neighbor queries.
///
/// Built with a counting sort: count particles per cell -> prefix sum -> scatter.
/// With `cell_size` equal to the query radius, every neighbor within range
/// lives in the 3x3 block of cells around a particle.
pub struct SpatialGrid {
    cell_size: f32,
    inv_cell_size: f32,
    cols: usize,
    rows: usize,
    /// Number of particles per cell (reused as scatter offsets)
    cell_count: Vec<u32>,
    /// cell_start[c] = first slot of cell c in sorted_indices
    cell_start: Vec<u32>,
    /// Particle indices sorted by cell
    sorted_indices: Vec<u32>,
    /// Cell per particle (used during build)
    particle_cells: Vec<u32>,
}

impl SpatialGrid {
    /// Grid covering a `width` x `height` canvas.
    /// Positions on the far edge land in the last column/row.
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let cols = ((width.max(0.0) / cell_size).floor() as usize + 1).max(1);
        let rows = ((height.max(0.0) / cell_size).floor() as usize + 1).max(1);
        let cells = cols * rows;
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cols,
            rows,
            cell_count: vec![0; cells],
            cell_start: vec![0; cells],
            sorted_indices: Vec::new(),
            particle_cells: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Build the grid from current positions. O(N + cells).
    pub fn build(&mut self, positions: &[Vec2]) {
        let count = positions.len();
        self.sorted_indices.resize(count, 0);
        self.particle_cells.resize(count, 0);

        self.cell_count.iter_mut().for_each(|v| *v = 0);

        for (i, &p) in positions.iter().enumerate() {
            let (cx, cy) = self.cell_coords(p);
            let c = cy * self.cols + cx;
            self.particle_cells[i] = c as u32;
            self.cell_count[c] += 1;
        }

        self.cell_start[0] = 0;
        for k in 1..self.cell_count.len() {
            self.cell_start[k] = self.cell_start[k - 1] + self.cell_count[k - 1];
        }

        self.cell_count.iter_mut().for_each(|v| *v = 0);

        for i in 0..count {
            let c = self.particle_cells[i] as usize;
            let slot = self.cell_start[c] + self.cell_count[c];
            self.sorted_indices[slot as usize] = i as u32;
            self.cell_count[c] += 1;
        }
    }

    /// Calls `callback(j)` for every particle in the 3x3 cells around `pos`.
    /// The caller does the distance check.
    pub fn query_neighbors<F: FnMut(u32)>(&self, pos: Vec2, mut callback: F) {
        let (cx, cy) = self.cell_coords(pos);
        let x0 = cx.saturating_sub(1);
        let y0 = cy.saturating_sub(1);
        let x1 = (cx + 1).min(self.cols - 1);
        let y1 = (cy + 1).min(self.rows - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let c = y * self.cols + x;
                let start = self.cell_start[c] as usize;
                let end = start + self.cell_count[c] as usize;
                for &idx in &self.sorted_indices[start..end] {
                    callback(idx);
                }
            }
        }
    }

    /// Visit every unordered pair `(i, j)`, `i < j`, closer than `max_distance`.
    /// `max_distance` must not exceed the cell size.
    pub fn for_each_pair_within<F: FnMut(usize, usize, f32)>(
        &self,
        positions: &[Vec2],
        max_distance: f32,
        mut callback: F,
    ) {
        debug_assert!(max_distance <= self.cell_size);
        for (i, &pi) in positions.iter().enumerate() {
            self.query_neighbors(pi, |j| {
                let j = j as usize;
                if j <= i {
                    return;
                }
                let d = pi.distance(positions[j]);
                if d < max_distance {
                    callback(i, j, d);
                }
            });
        }
    }

    #[inline]
    fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let cx = (pos.x * self.inv_cell_size).floor().max(0.0) as usize;
        let cy = (pos.y * self.inv_cell_size).floor().max(0.0) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }
}
