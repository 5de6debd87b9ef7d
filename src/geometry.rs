//! Procedural mesh generators for the demo scenes: grid, box, sphere,
//! geosphere and cylinder, all centered at the origin.

use glam::{Vec2, Vec3};

/// Full-fat generator vertex; the scenes pick out the attributes they need.
#[derive(Debug, Clone, Copy)]
pub struct GeoVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub texcoord: Vec2,
}

/// Generated triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<GeoVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// An m x n vertex grid in the xz-plane with the given world extents.
/// Produces (m-1)*(n-1)*2 triangles wound counter-clockwise seen from +y.
pub fn grid(width: f32, depth: f32, m: usize, n: usize) -> MeshData {
    let half_width = 0.5 * width;
    let half_depth = 0.5 * depth;
    let dx = width / (n - 1) as f32;
    let dz = depth / (m - 1) as f32;
    let du = 1.0 / (n - 1) as f32;
    let dv = 1.0 / (m - 1) as f32;

    let mut mesh = MeshData::default();
    mesh.vertices.reserve(m * n);
    for i in 0..m {
        let z = half_depth - i as f32 * dz;
        for j in 0..n {
            let x = -half_width + j as f32 * dx;
            mesh.vertices.push(GeoVertex {
                position: Vec3::new(x, 0.0, z),
                normal: Vec3::Y,
                tangent: Vec3::X,
                texcoord: Vec2::new(j as f32 * du, i as f32 * dv),
            });
        }
    }

    let stride = n as u32;
    mesh.indices.reserve((m - 1) * (n - 1) * 6);
    for i in 0..m - 1 {
        for j in 0..n - 1 {
            let k = (i * n + j) as u32;
            mesh.indices.extend_from_slice(&[
                k,
                k + 1,
                k + stride,
                k + stride,
                k + 1,
                k + stride + 1,
            ]);
        }
    }
    mesh
}

/// An axis-aligned box with per-face normals (24 vertices, 36 indices).
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let (w2, h2, d2) = (0.5 * width, 0.5 * height, 0.5 * depth);
    let mut mesh = MeshData::default();

    // Each face: four corners counter-clockwise seen from outside.
    let faces: [([Vec3; 4], Vec3, Vec3); 6] = [
        (
            [
                Vec3::new(-w2, -h2, d2),
                Vec3::new(w2, -h2, d2),
                Vec3::new(w2, h2, d2),
                Vec3::new(-w2, h2, d2),
            ],
            Vec3::Z,
            Vec3::X,
        ),
        (
            [
                Vec3::new(w2, -h2, -d2),
                Vec3::new(-w2, -h2, -d2),
                Vec3::new(-w2, h2, -d2),
                Vec3::new(w2, h2, -d2),
            ],
            Vec3::NEG_Z,
            Vec3::NEG_X,
        ),
        (
            [
                Vec3::new(w2, -h2, d2),
                Vec3::new(w2, -h2, -d2),
                Vec3::new(w2, h2, -d2),
                Vec3::new(w2, h2, d2),
            ],
            Vec3::X,
            Vec3::NEG_Z,
        ),
        (
            [
                Vec3::new(-w2, -h2, -d2),
                Vec3::new(-w2, -h2, d2),
                Vec3::new(-w2, h2, d2),
                Vec3::new(-w2, h2, -d2),
            ],
            Vec3::NEG_X,
            Vec3::Z,
        ),
        (
            [
                Vec3::new(-w2, h2, d2),
                Vec3::new(w2, h2, d2),
                Vec3::new(w2, h2, -d2),
                Vec3::new(-w2, h2, -d2),
            ],
            Vec3::Y,
            Vec3::X,
        ),
        (
            [
                Vec3::new(-w2, -h2, -d2),
                Vec3::new(w2, -h2, -d2),
                Vec3::new(w2, -h2, d2),
                Vec3::new(-w2, -h2, d2),
            ],
            Vec3::NEG_Y,
            Vec3::X,
        ),
    ];

    let uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    for (corners, normal, tangent) in faces {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            mesh.vertices.push(GeoVertex {
                position: *corner,
                normal,
                tangent,
                texcoord: uv,
            });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// A UV sphere built from stacked rings between two pole vertices.
pub fn sphere(radius: f32, slice_count: usize, stack_count: usize) -> MeshData {
    let mut mesh = MeshData::default();

    mesh.vertices.push(GeoVertex {
        position: Vec3::new(0.0, radius, 0.0),
        normal: Vec3::Y,
        tangent: Vec3::X,
        texcoord: Vec2::ZERO,
    });

    let phi_step = std::f32::consts::PI / stack_count as f32;
    let theta_step = std::f32::consts::TAU / slice_count as f32;

    // Interior rings; the first and last ring column is duplicated so the
    // texture seam gets its own vertices.
    for i in 1..stack_count {
        let phi = i as f32 * phi_step;
        for j in 0..=slice_count {
            let theta = j as f32 * theta_step;
            let position = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
            let tangent = Vec3::new(-phi.sin() * theta.sin(), 0.0, phi.sin() * theta.cos());
            mesh.vertices.push(GeoVertex {
                position,
                normal: position.normalize(),
                tangent: tangent.normalize_or_zero(),
                texcoord: Vec2::new(
                    theta / std::f32::consts::TAU,
                    phi / std::f32::consts::PI,
                ),
            });
        }
    }

    mesh.vertices.push(GeoVertex {
        position: Vec3::new(0.0, -radius, 0.0),
        normal: Vec3::NEG_Y,
        tangent: Vec3::X,
        texcoord: Vec2::new(0.0, 1.0),
    });

    // Top fan.
    for j in 1..=slice_count as u32 {
        mesh.indices.extend_from_slice(&[0, j + 1, j]);
    }

    // Ring quads.
    let ring = slice_count as u32 + 1;
    let base = 1u32;
    for i in 0..stack_count as u32 - 2 {
        for j in 0..slice_count as u32 {
            mesh.indices.extend_from_slice(&[
                base + i * ring + j,
                base + i * ring + j + 1,
                base + (i + 1) * ring + j,
                base + (i + 1) * ring + j,
                base + i * ring + j + 1,
                base + (i + 1) * ring + j + 1,
            ]);
        }
    }

    // Bottom fan.
    let south = mesh.vertices.len() as u32 - 1;
    let base = south - ring;
    for j in 0..slice_count as u32 {
        mesh.indices.extend_from_slice(&[south, base + j, base + j + 1]);
    }
    mesh
}

/// A geodesic sphere: subdivided icosahedron with vertices projected onto
/// the sphere surface.
pub fn geosphere(radius: f32, subdivisions: usize) -> MeshData {
    const X: f32 = 0.525731;
    const Z: f32 = 0.850651;

    let positions = [
        Vec3::new(-X, 0.0, Z),
        Vec3::new(X, 0.0, Z),
        Vec3::new(-X, 0.0, -Z),
        Vec3::new(X, 0.0, -Z),
        Vec3::new(0.0, Z, X),
        Vec3::new(0.0, Z, -X),
        Vec3::new(0.0, -Z, X),
        Vec3::new(0.0, -Z, -X),
        Vec3::new(Z, X, 0.0),
        Vec3::new(-Z, X, 0.0),
        Vec3::new(Z, -X, 0.0),
        Vec3::new(-Z, -X, 0.0),
    ];
    let indices: [u32; 60] = [
        1, 4, 0, 4, 9, 0, 4, 5, 9, 8, 5, 4, 1, 8, 4, 1, 10, 8, 10, 3, 8, 8, 3, 5, 3, 2, 5, 3, 7,
        2, 3, 10, 7, 10, 6, 7, 6, 11, 7, 6, 0, 11, 6, 1, 0, 10, 1, 6, 11, 0, 9, 2, 11, 9, 5, 2,
        9, 11, 2, 7,
    ];

    let mut mesh = MeshData {
        vertices: positions
            .iter()
            .map(|&position| GeoVertex {
                position,
                normal: position,
                tangent: Vec3::X,
                texcoord: Vec2::ZERO,
            })
            .collect(),
        indices: indices.to_vec(),
    };

    for _ in 0..subdivisions.min(6) {
        mesh = subdivide(&mesh);
    }

    // Project onto the sphere and derive the spherical attributes.
    for vertex in &mut mesh.vertices {
        let normal = vertex.position.normalize();
        let position = radius * normal;
        let theta = normal.z.atan2(normal.x).rem_euclid(std::f32::consts::TAU);
        let phi = (normal.y).acos();
        vertex.position = position;
        vertex.normal = normal;
        vertex.tangent = Vec3::new(-phi.sin() * theta.sin(), 0.0, phi.sin() * theta.cos())
            .normalize_or_zero();
        vertex.texcoord = Vec2::new(
            theta / std::f32::consts::TAU,
            phi / std::f32::consts::PI,
        );
    }
    mesh
}

/// Split every triangle into four by its edge midpoints.
fn subdivide(input: &MeshData) -> MeshData {
    let mut mesh = MeshData::default();
    for tri in input.indices.chunks_exact(3) {
        let v0 = input.vertices[tri[0] as usize];
        let v1 = input.vertices[tri[1] as usize];
        let v2 = input.vertices[tri[2] as usize];
        let m0 = midpoint(&v0, &v1);
        let m1 = midpoint(&v1, &v2);
        let m2 = midpoint(&v0, &v2);

        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(&[v0, v1, v2, m0, m1, m2]);
        mesh.indices.extend_from_slice(&[
            base,
            base + 3,
            base + 5,
            base + 3,
            base + 4,
            base + 5,
            base + 3,
            base + 1,
            base + 4,
            base + 5,
            base + 4,
            base + 2,
        ]);
    }
    mesh
}

fn midpoint(a: &GeoVertex, b: &GeoVertex) -> GeoVertex {
    GeoVertex {
        position: 0.5 * (a.position + b.position),
        normal: 0.5 * (a.normal + b.normal),
        tangent: 0.5 * (a.tangent + b.tangent),
        texcoord: 0.5 * (a.texcoord + b.texcoord),
    }
}

/// A y-axis cylinder (or cone frustum when the radii differ) with end caps.
pub fn cylinder(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    slice_count: usize,
    stack_count: usize,
) -> MeshData {
    let mut mesh = MeshData::default();

    let stack_height = height / stack_count as f32;
    let radius_step = (top_radius - bottom_radius) / stack_count as f32;
    let theta_step = std::f32::consts::TAU / slice_count as f32;

    // Side rings, bottom to top.
    for i in 0..=stack_count {
        let y = -0.5 * height + i as f32 * stack_height;
        let r = bottom_radius + i as f32 * radius_step;
        for j in 0..=slice_count {
            let theta = j as f32 * theta_step;
            let (s, c) = theta.sin_cos();
            let tangent = Vec3::new(-s, 0.0, c);
            // Slope the normal by the radius change across the height.
            let dr = bottom_radius - top_radius;
            let bitangent = Vec3::new(dr * c, -height, dr * s);
            mesh.vertices.push(GeoVertex {
                position: Vec3::new(r * c, y, r * s),
                normal: tangent.cross(bitangent).normalize(),
                tangent,
                texcoord: Vec2::new(
                    j as f32 / slice_count as f32,
                    1.0 - i as f32 / stack_count as f32,
                ),
            });
        }
    }

    let ring = slice_count as u32 + 1;
    for i in 0..stack_count as u32 {
        for j in 0..slice_count as u32 {
            mesh.indices.extend_from_slice(&[
                i * ring + j,
                (i + 1) * ring + j,
                (i + 1) * ring + j + 1,
                i * ring + j,
                (i + 1) * ring + j + 1,
                i * ring + j + 1,
            ]);
        }
    }

    build_cap(&mut mesh, top_radius, 0.5 * height, slice_count, true);
    build_cap(&mut mesh, bottom_radius, -0.5 * height, slice_count, false);
    mesh
}

fn build_cap(mesh: &mut MeshData, radius: f32, y: f32, slice_count: usize, top: bool) {
    let base = mesh.vertices.len() as u32;
    let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
    let theta_step = std::f32::consts::TAU / slice_count as f32;

    // Cap ring duplicates the side ring so the cap can have its own normal.
    for j in 0..=slice_count {
        let theta = j as f32 * theta_step;
        let (s, c) = theta.sin_cos();
        let (x, z) = (radius * c, radius * s);
        mesh.vertices.push(GeoVertex {
            position: Vec3::new(x, y, z),
            normal,
            tangent: Vec3::X,
            texcoord: Vec2::new(x / (2.0 * radius) + 0.5, z / (2.0 * radius) + 0.5),
        });
    }
    mesh.vertices.push(GeoVertex {
        position: Vec3::new(0.0, y, 0.0),
        normal,
        tangent: Vec3::X,
        texcoord: Vec2::new(0.5, 0.5),
    });

    let center = mesh.vertices.len() as u32 - 1;
    for j in 0..slice_count as u32 {
        if top {
            mesh.indices.extend_from_slice(&[center, base + j + 1, base + j]);
        } else {
            mesh.indices.extend_from_slice(&[center, base + j, base + j + 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_bounds(mesh: &MeshData) {
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_grid_counts_and_extents() {
        let mesh = grid(160.0, 160.0, 50, 50);
        assert_eq!(mesh.vertices.len(), 2500);
        assert_eq!(mesh.triangle_count(), 49 * 49 * 2);
        assert_indices_in_bounds(&mesh);

        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.position.x).collect();
        let zs: Vec<f32> = mesh.vertices.iter().map(|v| v.position.z).collect();
        assert!((xs.iter().cloned().fold(f32::MAX, f32::min) + 80.0).abs() < 1e-3);
        assert!((xs.iter().cloned().fold(f32::MIN, f32::max) - 80.0).abs() < 1e-3);
        assert!((zs.iter().cloned().fold(f32::MAX, f32::min) + 80.0).abs() < 1e-3);
        assert!((zs.iter().cloned().fold(f32::MIN, f32::max) - 80.0).abs() < 1e-3);
        assert!(mesh.vertices.iter().all(|v| v.position.y == 0.0));
    }

    #[test]
    fn test_box_counts() {
        let mesh = box_mesh(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_indices_in_bounds(&mesh);

        // Every normal points away from the center.
        for v in &mesh.vertices {
            assert!(v.position.dot(v.normal) > 0.0);
        }
    }

    #[test]
    fn test_sphere_counts_and_radius() {
        let mesh = sphere(0.5, 20, 20);
        assert_eq!(mesh.vertices.len(), 2 + 19 * 21);
        assert_indices_in_bounds(&mesh);

        for v in &mesh.vertices {
            assert!((v.position.length() - 0.5).abs() < 1e-5);
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_geosphere_counts_and_radius() {
        let mesh = geosphere(2.0, 2);
        assert_eq!(mesh.triangle_count(), 20 * 4 * 4);
        assert_indices_in_bounds(&mesh);

        for v in &mesh.vertices {
            assert!((v.position.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = cylinder(0.5, 0.3, 3.0, 20, 20);
        // 21 side rings of 21, two cap rings of 21 plus centers.
        assert_eq!(mesh.vertices.len(), 21 * 21 + 2 * 22);
        assert_eq!(mesh.triangle_count(), 20 * 20 * 2 + 2 * 20);
        assert_indices_in_bounds(&mesh);

        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position.y).collect();
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -1.5);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.5);
    }
}
