/// Culling strategies.
///
/// A Culler filters the frame's collected draw entries down to the ones
/// worth drawing. Implementations range from brute-force (keep all) to the
/// per-entity bounding sphere test against the camera frustum.

use crate::camera::{Containment, Frustum};
use crate::{engine_error, engine_warn};
use crate::error::{Error, Result};
use crate::resource::{Model, ResourceManager};
use crate::scene::{Entity, Scene};
use super::renderer::DrawEntry;

/// Strategy for removing invisible draw entries.
///
/// Called once per frame between collection and sorting. Order of the
/// surviving entries must be preserved.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait Culler: Send + Sync {
    fn cull(
        &mut self,
        entries: Vec<DrawEntry>,
        scene: &Scene,
        resources: &ResourceManager,
        frustum: &Frustum,
    ) -> Result<Vec<DrawEntry>>;
}

/// Look up an entry's entity and model, warning when either is gone.
pub(crate) fn resolve<'a>(
    entry: &DrawEntry,
    scene: &'a Scene,
    resources: &'a ResourceManager,
) -> Option<(&'a Entity, &'a Model)> {
    let Some(entity) = scene.entity(entry.entity) else {
        engine_warn!("aquarite::Culler", "Dropping draw entry for destroyed entity {:?}", entry.entity);
        return None;
    };
    let model = entity.model().and_then(|key| resources.model(key));
    match model {
        Some(model) => Some((entity, model)),
        None => {
            engine_warn!("aquarite::Culler",
                "Dropping entity '{}' (id {}): model is missing", entity.name(), entity.id());
            None
        }
    }
}

/// Brute-force culler - keeps every resolvable entry (no actual culling).
///
/// Suitable for small scenes or as a baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Culler for BruteForceCuller {
    fn cull(
        &mut self,
        entries: Vec<DrawEntry>,
        scene: &Scene,
        resources: &ResourceManager,
        _frustum: &Frustum,
    ) -> Result<Vec<DrawEntry>> {
        Ok(entries
            .into_iter()
            .filter(|entry| resolve(entry, scene, resources).is_some())
            .collect())
    }
}

/// Frustum culler - tests each entity's bounding sphere, centered on its
/// global position, against the camera frustum.
///
/// The authored `sphere_radius` is used as-is. Models flagged
/// `ignore_frustum` always pass. Only `Outside` is dropped; `Intersect`
/// counts as visible. An entity whose bounds are not finite (NaN position,
/// negative radius) is logged and dropped without failing the frame.
#[derive(Debug, Default)]
pub struct FrustumCuller;

impl FrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Culler for FrustumCuller {
    fn cull(
        &mut self,
        entries: Vec<DrawEntry>,
        scene: &Scene,
        resources: &ResourceManager,
        frustum: &Frustum,
    ) -> Result<Vec<DrawEntry>> {
        let mut visible = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some((entity, model)) = resolve(&entry, scene, resources) else { continue };

            if !model.ignore_frustum {
                match frustum.sphere_in_frustum(entity.global_position(), model.sphere_radius) {
                    Ok(Containment::Outside) => continue,
                    Ok(_) => {}
                    Err(Error::InvalidGeometry(reason)) => {
                        engine_error!("aquarite::Culler",
                            "Culling entity '{}' (id {}): {}", entity.name(), entity.id(), reason);
                        continue;
                    }
                    Err(err) => return Err(err),
                }
            }
            visible.push(entry);
        }
        Ok(visible)
    }
}
