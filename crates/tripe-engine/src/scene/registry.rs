use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{ObjectId, SceneObject};

/// Flat id-keyed set of scene objects.
///
/// The registry owns its objects. Ids are unique: registering an id that is
/// already present leaves the registry untouched. Iteration order is
/// unspecified.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: HashMap<ObjectId, Box<dyn SceneObject>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `obj` under its own id.
    ///
    /// Returns `false` (and drops `obj`) if the id is already registered.
    pub fn register(&mut self, obj: Box<dyn SceneObject>) -> bool {
        let id = obj.id();
        if self.objects.contains_key(&id) {
            log::warn!("scene object {id} is already registered; ignoring");
            return false;
        }

        self.objects.insert(id, obj);
        log::debug!("registered scene object {id}");
        true
    }

    /// Removes and returns the object registered under `id`.
    pub fn unregister(&mut self, id: ObjectId) -> Option<Box<dyn SceneObject>> {
        self.objects.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn SceneObject> {
        self.objects.get(&id).map(|obj| obj.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn SceneObject + 'static)> {
        self.objects.get_mut(&id).map(|obj| obj.as_mut())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Visits every object exactly once, in unspecified order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&dyn SceneObject),
    {
        for obj in self.objects.values() {
            action(obj.as_ref());
        }
    }

    /// Mutable variant of [`for_each`](Self::for_each).
    pub fn for_each_mut<F>(&mut self, mut action: F)
    where
        F: FnMut(&mut dyn SceneObject),
    {
        for obj in self.objects.values_mut() {
            action(obj.as_mut());
        }
    }
}

/// Registry handle shared between the simulation and render threads.
///
/// Every access goes through one mutex, so an object is never drawn while
/// it is being updated.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ObjectRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, obj: Box<dyn SceneObject>) -> bool {
        self.inner.lock().register(obj)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(&dyn SceneObject),
    {
        self.inner.lock().for_each(action);
    }

    pub fn for_each_mut<F>(&self, action: F)
    where
        F: FnMut(&mut dyn SceneObject),
    {
        self.inner.lock().for_each_mut(action);
    }

    /// Runs `f` with the registry locked.
    pub fn with<R>(&self, f: impl FnOnce(&ObjectRegistry) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with the registry locked for mutation.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut ObjectRegistry) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<ObjectRegistry> for SharedRegistry {
    fn from(registry: ObjectRegistry) -> Self {
        Self { inner: Arc::new(Mutex::new(registry)) }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::{DrawCmd, DrawList, ZIndex};

    struct Dot {
        id: ObjectId,
        radius: f32,
        age: Duration,
    }

    impl Dot {
        fn boxed(id: i32, radius: f32) -> Box<dyn SceneObject> {
            Box::new(Dot { id: ObjectId(id), radius, age: Duration::ZERO })
        }
    }

    impl SceneObject for Dot {
        fn id(&self) -> ObjectId {
            self.id
        }

        fn draw(&self, list: &mut DrawList) {
            let shade = (self.age.as_millis() as f32 / 100.0).min(1.0);
            let fill = Color::from_straight(shade, shade, shade, 1.0);
            list.push_circle(ZIndex::default(), Vec2::splat(0.0), self.radius, fill);
        }

        fn update(&mut self, elapsed: Duration) {
            self.age += elapsed;
        }
    }

    #[test]
    fn fresh_id_registers_and_repeat_is_rejected() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.register(Dot::boxed(1, 1.0)));

        for other in 2..10 {
            assert!(registry.register(Dot::boxed(other, 4.0)));
            assert!(!registry.register(Dot::boxed(1, 3.0)));
        }
    }

    #[test]
    fn duplicate_keeps_first_object() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.register(Dot::boxed(1, 1.0)));
        assert!(!registry.register(Dot::boxed(1, 2.0)));

        assert_eq!(registry.len(), 1);

        let mut list = DrawList::new();
        registry.get(ObjectId(1)).unwrap().draw(&mut list);
        let radii: Vec<f32> = list
            .iter_in_paint_order()
            .map(|DrawCmd::Circle(c)| c.radius)
            .collect();
        assert_eq!(radii, vec![1.0]);
    }

    #[test]
    fn for_each_visits_every_object_once() {
        let mut registry = ObjectRegistry::new();
        for id in 0..25 {
            registry.register(Dot::boxed(id, 1.0));
        }

        let mut seen = Vec::new();
        registry.for_each(|obj| seen.push(obj.id()));

        assert_eq!(seen.len(), 25);
        let unique: HashSet<ObjectId> = seen.into_iter().collect();
        assert_eq!(unique, registry.ids().collect::<HashSet<_>>());
    }

    #[test]
    fn for_each_mut_updates_all() {
        let mut registry = ObjectRegistry::new();
        registry.register(Dot::boxed(1, 1.0));
        registry.register(Dot::boxed(2, 2.0));

        registry.for_each_mut(|obj| obj.update(Duration::from_millis(100)));

        let mut list = DrawList::new();
        registry.for_each(|obj| obj.draw(&mut list));
        assert_eq!(list.len(), 2);
        assert!(list
            .iter_in_paint_order()
            .all(|DrawCmd::Circle(c)| c.fill == Color::from_straight(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn unregister_frees_the_id() {
        let mut registry = ObjectRegistry::new();
        registry.register(Dot::boxed(3, 1.0));

        let removed = registry.unregister(ObjectId(3)).unwrap();
        assert_eq!(removed.id(), ObjectId(3));
        assert!(registry.is_empty());
        assert!(registry.register(removed));
        assert!(registry.contains(ObjectId(3)));
        assert!(registry.unregister(ObjectId(4)).is_none());
    }

    #[test]
    fn shared_registry_is_visible_across_clones() {
        let shared = SharedRegistry::new();
        let other = shared.clone();

        assert!(shared.register(Dot::boxed(1, 1.0)));
        assert!(!other.register(Dot::boxed(1, 2.0)));
        assert!(other.contains(ObjectId(1)));
        assert_eq!(other.len(), 1);

        let handle = std::thread::spawn(move || {
            other.for_each_mut(|obj| obj.update(Duration::from_millis(5)));
            other.len()
        });
        assert_eq!(handle.join().unwrap(), 1);
    }
}
