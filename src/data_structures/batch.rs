//! Immutable vertex batches and the store that owns them.
//!
//! A [`Batch`] is created once by the primitive factory and never changes
//! afterwards. Models refer to their batches through a [`BatchHandle`] into a
//! shared [`BatchStore`], which also collapses batches built from identical
//! parameters into one entry (a wheel has 48 spokes but only one spoke batch).

use std::collections::HashMap;

use crate::data_structures::model::ModelVertex;

/// How the indices of a batch are to be assembled into primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    TriangleFan,
    LineLoop,
}

impl Topology {
    /// The primitive topology a batch of this kind is drawn with after
    /// [`Batch::gpu_indices`] expanded fans and loops.
    pub fn gpu_topology(&self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleList | Topology::TriangleFan => wgpu::PrimitiveTopology::TriangleList,
            Topology::LineLoop => wgpu::PrimitiveTopology::LineList,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    name: String,
    topology: Topology,
    vertices: Vec<ModelVertex>,
    indices: Vec<u32>,
}

impl Batch {
    pub fn new(
        name: impl Into<String>,
        topology: Topology,
        vertices: Vec<ModelVertex>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            topology,
            vertices,
            indices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertices(&self) -> &[ModelVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Indices rewritten for a list topology: fans become triangle lists and
    /// loops become closed line lists.
    pub fn gpu_indices(&self) -> Vec<u32> {
        match self.topology {
            Topology::TriangleList => self.indices.clone(),
            Topology::TriangleFan => {
                if self.indices.len() < 3 {
                    return Vec::new();
                }
                let hub = self.indices[0];
                self.indices[1..]
                    .windows(2)
                    .flat_map(|pair| [hub, pair[0], pair[1]])
                    .collect()
            }
            Topology::LineLoop => {
                let n = self.indices.len();
                if n < 2 {
                    return Vec::new();
                }
                (0..n)
                    .flat_map(|i| [self.indices[i], self.indices[(i + 1) % n]])
                    .collect()
            }
        }
    }
}

const WELD_SCALE: f32 = 1.0e5;

type VertexKey = [i64; 8];

fn quantize(value: f32) -> i64 {
    (value * WELD_SCALE).round() as i64
}

fn vertex_key(v: &ModelVertex) -> VertexKey {
    [
        quantize(v.position[0]),
        quantize(v.position[1]),
        quantize(v.position[2]),
        quantize(v.normal[0]),
        quantize(v.normal[1]),
        quantize(v.normal[2]),
        quantize(v.tex_coords[0]),
        quantize(v.tex_coords[1]),
    ]
}

fn position_key(v: &ModelVertex) -> [i64; 3] {
    [
        quantize(v.position[0]),
        quantize(v.position[1]),
        quantize(v.position[2]),
    ]
}

/// Accumulates triangles into an indexed batch, sharing vertices that agree
/// in position, normal and texture coordinate.
#[derive(Default)]
pub struct BatchBuilder {
    vertices: Vec<ModelVertex>,
    indices: Vec<u32>,
    lookup: HashMap<VertexKey, u32>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex(&mut self, vertex: ModelVertex) -> u32 {
        let key = vertex_key(&vertex);
        if let Some(idx) = self.lookup.get(&key) {
            return *idx;
        }
        let idx = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.lookup.insert(key, idx);
        idx
    }

    /// Adds a triangle unless two of its corners coincide.
    pub fn triangle(&mut self, a: ModelVertex, b: ModelVertex, c: ModelVertex) {
        let (pa, pb, pc) = (position_key(&a), position_key(&b), position_key(&c));
        if pa == pb || pb == pc || pa == pc {
            return;
        }
        let ia = self.vertex(a);
        let ib = self.vertex(b);
        let ic = self.vertex(c);
        self.indices.extend_from_slice(&[ia, ib, ic]);
    }

    /// Adds a quad given counter-clockwise corners, split along `p00`-`p11`.
    pub fn quad(&mut self, p00: ModelVertex, p10: ModelVertex, p11: ModelVertex, p01: ModelVertex) {
        self.triangle(p00, p10, p11);
        self.triangle(p00, p11, p01);
    }

    pub fn build(self, name: impl Into<String>) -> Batch {
        Batch::new(name, Topology::TriangleList, self.vertices, self.indices)
    }
}

/// Index of a batch inside a [`BatchStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchHandle(pub(crate) usize);

impl BatchHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owns every batch of the scene. Batches are keyed by name, and the
/// primitive factory names batches after their full parameter list, so
/// inserting an identical batch twice yields the first handle.
#[derive(Debug, Default)]
pub struct BatchStore {
    batches: Vec<Batch>,
    by_name: HashMap<String, BatchHandle>,
}

impl BatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, batch: Batch) -> BatchHandle {
        if let Some(handle) = self.by_name.get(batch.name()) {
            return *handle;
        }
        let handle = BatchHandle(self.batches.len());
        self.by_name.insert(batch.name().to_string(), handle);
        self.batches.push(batch);
        handle
    }

    pub fn get(&self, handle: BatchHandle) -> Option<&Batch> {
        self.batches.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BatchHandle, &Batch)> {
        self.batches
            .iter()
            .enumerate()
            .map(|(idx, batch)| (BatchHandle(idx), batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> ModelVertex {
        ModelVertex::new([x, y, z], [0.0, 0.0, 1.0], [0.0, 0.0])
    }

    #[test]
    fn builder_welds_shared_corners() {
        let mut builder = BatchBuilder::new();
        builder.quad(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0));
        let batch = builder.build("quad");
        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn builder_drops_degenerate_triangles() {
        let mut builder = BatchBuilder::new();
        builder.triangle(v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        assert!(builder.build("empty").is_empty());
    }

    #[test]
    fn fan_expands_to_triangles() {
        let fan = Batch::new(
            "fan",
            Topology::TriangleFan,
            vec![v(0.0, 0.0, 0.0); 4],
            vec![0, 1, 2, 3],
        );
        assert_eq!(fan.gpu_indices(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn loop_closes_back_to_the_start() {
        let line = Batch::new("loop", Topology::LineLoop, vec![v(0.0, 0.0, 0.0); 3], vec![0, 1, 2]);
        assert_eq!(line.gpu_indices(), vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn store_dedups_by_name() {
        let mut store = BatchStore::new();
        let a = store.insert(Batch::new("spoke", Topology::TriangleList, vec![], vec![]));
        let b = store.insert(Batch::new("spoke", Topology::TriangleList, vec![], vec![]));
        let c = store.insert(Batch::new("ring", Topology::TriangleList, vec![], vec![]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.len(), 2);
    }
}
