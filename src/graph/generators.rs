use rand::prelude::*;

use crate::graph::weighted::DEFAULT_NO_EDGE;

/// Generates an n x n matrix where each off-diagonal cell holds an edge with
/// probability `edge_probability`, weighted uniformly in `1.0..100.0`.
/// Missing edges use [`DEFAULT_NO_EDGE`].
pub fn generate_random_matrix(n: usize, edge_probability: f64) -> Vec<Vec<f64>> {
    let mut rng = rand::thread_rng();
    generate_random_matrix_with_rng(&mut rng, n, edge_probability)
}

/// Same as [`generate_random_matrix`] with a caller supplied generator
pub fn generate_random_matrix_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    edge_probability: f64,
) -> Vec<Vec<f64>> {
    let p = edge_probability.clamp(0.0, 1.0);
    let mut matrix = vec![vec![DEFAULT_NO_EDGE; n]; n];

    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            if i == j {
                *cell = 0.0;
            } else if rng.gen_bool(p) {
                *cell = rng.gen_range(1.0..100.0);
            }
        }
    }

    matrix
}

/// Generates a width*height grid with unit-weight edges in both directions
/// between 4-connected cells. Cell (x, y) is vertex `y * width + x`.
pub fn generate_grid_matrix(width: usize, height: usize) -> Vec<Vec<f64>> {
    let n = width * height;
    let mut matrix = vec![vec![DEFAULT_NO_EDGE; n]; n];

    let get_index = |x: usize, y: usize| -> usize { y * width + x };

    for y in 0..height {
        for x in 0..width {
            let current = get_index(x, y);
            matrix[current][current] = 0.0;

            if x > 0 {
                matrix[current][get_index(x - 1, y)] = 1.0;
            }
            if x + 1 < width {
                matrix[current][get_index(x + 1, y)] = 1.0;
            }
            if y > 0 {
                matrix[current][get_index(x, y - 1)] = 1.0;
            }
            if y + 1 < height {
                matrix[current][get_index(x, y + 1)] = 1.0;
            }
        }
    }

    matrix
}

/// Generates a random geometric matrix in the unit square
/// n: number of vertices
/// r: connection radius (vertices within distance r are connected)
pub fn generate_geometric_matrix(n: usize, r: f64) -> Vec<Vec<f64>> {
    let mut rng = rand::thread_rng();

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    let mut matrix = vec![vec![DEFAULT_NO_EDGE; n]; n];
    for i in 0..n {
        matrix[i][i] = 0.0;
        for j in 0..n {
            if i != j {
                let (x1, y1) = points[i];
                let (x2, y2) = points[j];
                let dist = f64::hypot(x1 - x2, y1 - y2);

                // A zero distance would read as "no edge"
                if dist <= r && dist > 0.0 {
                    matrix[i][j] = dist;
                }
            }
        }
    }

    matrix
}
