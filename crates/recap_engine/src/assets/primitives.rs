//! Built-in meshes

use crate::assets::{MeshData, Vertex};

/// Unit cube centred on the origin, 36 non-indexed vertices
pub fn cube() -> MeshData {
    // (normal, tangent u, tangent v) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ];
    const CORNERS: [[f32; 2]; 6] = [
        [0.0, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [1.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.0],
    ];

    let vertices = FACES
        .iter()
        .flat_map(|&(normal, u, v)| {
            CORNERS.iter().map(move |&[s, t]| {
                let position = std::array::from_fn(|axis| {
                    0.5 * normal[axis] + (s - 0.5) * u[axis] + (t - 0.5) * v[axis]
                });
                Vertex::new(position, normal, [s, t])
            })
        })
        .collect();

    MeshData {
        vertices,
        indices: Vec::new(),
    }
}

/// Full-screen quad in normalized device coordinates
pub fn screen_quad() -> MeshData {
    let normal = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            Vertex::new([1.0, 1.0, 0.0], normal, [1.0, 1.0]),
            Vertex::new([1.0, -1.0, 0.0], normal, [1.0, 0.0]),
            Vertex::new([-1.0, -1.0, 0.0], normal, [0.0, 0.0]),
            Vertex::new([-1.0, 1.0, 0.0], normal, [0.0, 1.0]),
        ],
        indices: vec![0, 1, 2, 0, 3, 2],
    }
}
