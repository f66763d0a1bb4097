use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// UV sphere with `segments` slices and `segments` stacks.
    pub fn sphere(radius: f32, segments: u32) -> Self {
        let seg = segments.max(3);
        let mut vertices = Vec::with_capacity(((seg + 1) * (seg + 1)) as usize);
        for stack in 0..=seg {
            let v = stack as f32 / seg as f32;
            let theta = v * PI;
            for slice in 0..=seg {
                let u = slice as f32 / seg as f32;
                let phi = u * TAU;
                let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
                vertices.push(Vertex {
                    position: (n * radius).to_array(),
                    normal: n.to_array(),
                });
            }
        }
        Self {
            vertices,
            indices: grid_indices(seg, seg),
        }
    }

    /// Sphere pushed out by a smooth trigonometric noise field.
    pub fn blob(segments: u32) -> Self {
        let mut mesh = Self::sphere(1.0, segments);
        for v in &mut mesh.vertices {
            let [x, y, z] = v.position;
            let n = (x * 3.0).sin() * (y * 3.0).cos() * (z * 3.0).sin() * 0.15;
            v.position = [x * (1.0 + n), y * (1.0 + n * 0.8), z * (1.0 + n)];
        }
        mesh.recompute_normals();
        mesh
    }

    /// Rounded cube built from the same sphere topology as [`MeshData::blob`].
    pub fn squared(segments: u32) -> Self {
        let mut mesh = Self::sphere(1.0, segments);
        for v in &mut mesh.vertices {
            let p = Vec3::from_array(v.position);
            let m = p.abs().max_element().max(1e-4);
            let cube = p / m * 0.85;
            v.position = p.lerp(cube, 0.75).to_array();
        }
        mesh.recompute_normals();
        mesh
    }

    /// Axis-aligned box centered on the origin with flat-shaded faces.
    pub fn cuboid(half: Vec3) -> Self {
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::NEG_Z, Vec3::X),
            (Vec3::Z, Vec3::Y, Vec3::NEG_X),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        let mut mesh = Self::default();
        for (normal, up, right) in faces {
            let base = mesh.vertices.len() as u32;
            for (su, sr) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)] {
                let p = (normal + up * su + right * sr) * half;
                mesh.vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh.fix_winding();
        mesh
    }

    /// Capped cylinder along +Y, centered on the origin.
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let seg = segments.max(3);
        let h = height * 0.5;
        let mut mesh = Self::default();
        for i in 0..=seg {
            let a = i as f32 / seg as f32 * TAU;
            let n = Vec3::new(a.cos(), 0.0, a.sin());
            for y in [-h, h] {
                mesh.vertices.push(Vertex {
                    position: [n.x * radius, y, n.z * radius],
                    normal: n.to_array(),
                });
            }
        }
        for i in 0..seg {
            let a = i * 2;
            mesh.indices
                .extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
        }
        for (y, ny) in [(-h, -1.0f32), (h, 1.0)] {
            let center = mesh.vertices.len() as u32;
            mesh.vertices.push(Vertex {
                position: [0.0, y, 0.0],
                normal: [0.0, ny, 0.0],
            });
            for i in 0..=seg {
                let a = i as f32 / seg as f32 * TAU;
                mesh.vertices.push(Vertex {
                    position: [a.cos() * radius, y, a.sin() * radius],
                    normal: [0.0, ny, 0.0],
                });
            }
            for i in 0..seg {
                mesh.indices
                    .extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
            }
        }
        mesh.fix_winding();
        mesh
    }

    /// Half torus in the XY plane (an arc from angle 0 to PI).
    pub fn half_torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> Self {
        let radial = radial.max(3);
        let tubular = tubular.max(3);
        let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * PI;
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                let p = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: (p - center).normalize_or_zero().to_array(),
                });
            }
        }
        Self {
            vertices,
            indices: grid_indices(radial, tubular),
        }
    }

    /// Smooth normals accumulated from face normals.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from_array(self.vertices[a].position);
            let pb = Vec3::from_array(self.vertices[b].position);
            let pc = Vec3::from_array(self.vertices[c].position);
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            let n = n.normalize_or_zero();
            // Seam and pole vertices can end up degenerate; keep the radial direction
            let n = if n == Vec3::ZERO {
                Vec3::from_array(v.position).normalize_or_zero()
            } else {
                n
            };
            v.normal = n.to_array();
        }
    }

    /// Flip triangles whose winding disagrees with their vertex normals so
    /// every front face is counter-clockwise.
    fn fix_winding(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            let pa = Vec3::from_array(self.vertices[tri[0] as usize].position);
            let pb = Vec3::from_array(self.vertices[tri[1] as usize].position);
            let pc = Vec3::from_array(self.vertices[tri[2] as usize].position);
            let face = (pb - pa).cross(pc - pa);
            let normal = Vec3::from_array(self.vertices[tri[0] as usize].normal);
            if face.dot(normal) < 0.0 {
                tri.swap(1, 2);
            }
        }
    }
}

/// Two-triangle quads over a `(rows + 1) x (cols + 1)` vertex grid, wound
/// counter-clockwise when viewed from outside a sphere built row by row
/// from the north pole.
fn grid_indices(rows: u32, cols: u32) -> Vec<u32> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity((rows * cols * 6) as usize);
    for r in 0..rows {
        for c in 0..cols {
            let a = r * stride + c;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    indices
}

/// Two shapes with identical topology and a buffer holding their blend.
#[derive(Clone, Debug)]
pub struct MorphMesh {
    from: MeshData,
    to: MeshData,
    blended: Vec<Vertex>,
    factor: Option<f32>,
}

impl MorphMesh {
    /// Returns `None` if the shapes do not share a topology.
    pub fn new(from: MeshData, to: MeshData) -> Option<Self> {
        if from.vertices.len() != to.vertices.len() || from.indices != to.indices {
            return None;
        }
        let blended = from.vertices.clone();
        Some(Self {
            from,
            to,
            blended,
            factor: None,
        })
    }

    pub fn indices(&self) -> &[u32] {
        &self.from.indices
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.blended
    }

    /// Blend every vertex toward the second shape by `factor` in [0, 1].
    /// Returns `false` when the factor is unchanged and nothing was rewritten.
    pub fn apply(&mut self, factor: f32) -> bool {
        let t = factor.clamp(0.0, 1.0);
        if self.factor.is_some_and(|f| (f - t).abs() < 1e-4) {
            return false;
        }
        for ((out, a), b) in self
            .blended
            .iter_mut()
            .zip(&self.from.vertices)
            .zip(&self.to.vertices)
        {
            let pa = Vec3::from_array(a.position);
            let pb = Vec3::from_array(b.position);
            let na = Vec3::from_array(a.normal);
            let nb = Vec3::from_array(b.normal);
            out.position = pa.lerp(pb, t).to_array();
            out.normal = na.lerp(nb, t).normalize_or_zero().to_array();
        }
        self.factor = Some(t);
        true
    }

    pub fn factor(&self) -> Option<f32> {
        self.factor
    }
}
