//! Placement capability and an in-memory scene

use ahash::AHashMap;
use glam::Vec3;

use crate::core::types::{Direction, PlacedHandle, SegmentKind};

/// Materializes placed objects in whatever scene consumes the network
///
/// This is the only side-effecting collaborator the generator calls into.
/// Orientation math stays on the implementor's side.
pub trait PlacementSink {
    /// Place a road piece centered at `position`, facing `facing`
    fn place_segment(&mut self, kind: SegmentKind, position: Vec3, facing: Direction)
        -> PlacedHandle;

    /// Place a decoration at `position` rotated `yaw_degrees` about the up axis
    fn place_decoration(&mut self, position: Vec3, yaw_degrees: f32) -> PlacedHandle;

    /// Destroy everything this sink placed
    fn clear_all(&mut self);
}

/// What a scene object is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneObjectKind {
    Road { kind: SegmentKind, facing: Direction },
    Decoration { yaw_degrees: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub handle: PlacedHandle,
    pub position: Vec3,
    pub kind: SceneObjectKind,
}

/// Sink that records placements instead of rendering them
#[derive(Debug, Clone)]
pub struct SceneRecorder {
    objects: AHashMap<PlacedHandle, SceneObject>,
    next_handle: u64,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self {
            objects: AHashMap::new(),
            next_handle: 1,
        }
    }

    fn insert(&mut self, position: Vec3, kind: SceneObjectKind) -> PlacedHandle {
        let handle = PlacedHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(handle, SceneObject { handle, position, kind });
        handle
    }

    pub fn get(&self, handle: PlacedHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Iterate over all objects
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn road_count(&self) -> usize {
        self.iter()
            .filter(|o| matches!(o.kind, SceneObjectKind::Road { .. }))
            .count()
    }

    pub fn decoration_count(&self) -> usize {
        self.iter()
            .filter(|o| matches!(o.kind, SceneObjectKind::Decoration { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for SceneRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementSink for SceneRecorder {
    fn place_segment(
        &mut self,
        kind: SegmentKind,
        position: Vec3,
        facing: Direction,
    ) -> PlacedHandle {
        self.insert(position, SceneObjectKind::Road { kind, facing })
    }

    fn place_decoration(&mut self, position: Vec3, yaw_degrees: f32) -> PlacedHandle {
        self.insert(position, SceneObjectKind::Decoration { yaw_degrees })
    }

    fn clear_all(&mut self) {
        self.objects.clear();
        self.next_handle = 1;
    }
}
