use crate::material::PlaneObject;

/// Opaque id of a mesh created by a [`crate::Renderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub handle: MeshHandle,
    pub plane: PlaneObject,
}

/// Flat list of drawable objects, drawn in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, handle: MeshHandle, plane: PlaneObject) {
        self.objects.push(SceneObject { handle, plane });
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&PlaneObject> {
        self.objects
            .iter()
            .find(|o| o.handle == handle)
            .map(|o| &o.plane)
    }

    pub fn get_mut(&mut self, handle: MeshHandle) -> Option<&mut PlaneObject> {
        self.objects
            .iter_mut()
            .find(|o| o.handle == handle)
            .map(|o| &mut o.plane)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
