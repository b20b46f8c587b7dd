use crate::bounds::{fit_half_extents, Bounds};
use crate::constants::{BoundsFit, CollisionChannel, MAX_ATTACH_ATTEMPTS, OVERLAP_TOLERANCE};
use crate::doorway::{Doorway, DoorwayId};
use crate::error::GenerationError;
use crate::room::{RoomId, RoomTemplate};
use crate::room_catalog::RoomCatalog;
use crate::rotate_point_around_pivot::{rotate_point_around_pivot, yaw_rotation};
use crate::signed_yaw_between::signed_yaw_between;
use crate::world_registry::{Instantiate, WorldRegistry};
use nalgebra::Vector3;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct AttachConfig {
    pub max_attempts: usize, // Random candidates tried before the filler is used
    pub overlap_tolerance: f32,
    pub bounds_fit: BoundsFit,
}

impl Default for AttachConfig {
    fn default() -> Self {
        AttachConfig {
            max_attempts: MAX_ATTACH_ATTEMPTS,
            overlap_tolerance: OVERLAP_TOLERANCE,
            bounds_fit: BoundsFit::Unrotated,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Placement {
    Placed(RoomId),
    Rejected,
}

/// Where a template would land if attached through one of its doorways.
#[derive(Clone, Copy, Debug)]
pub struct CandidatePose {
    pub doorway_index: usize,
    pub yaw: f32,
    pub position: Vector3<f32>,
    pub bounds: Bounds,
}

pub struct PlacementEngine<'a, C, W> {
    catalog: &'a C,
    world: &'a mut W,
    config: &'a AttachConfig,
}

impl<'a, C, W> PlacementEngine<'a, C, W>
where
    C: RoomCatalog,
    W: WorldRegistry + Instantiate,
{
    pub fn new(catalog: &'a C, world: &'a mut W, config: &'a AttachConfig) -> Self {
        PlacementEngine {
            catalog,
            world,
            config,
        }
    }

    pub fn world(&self) -> &W {
        &*self.world
    }

    pub fn config(&self) -> &AttachConfig {
        self.config
    }

    pub fn candidate_pose(
        &self,
        anchor: &Doorway,
        template: &RoomTemplate,
        doorway_index: usize,
    ) -> Result<CandidatePose, GenerationError> {
        let doorway = template.doorways.get(doorway_index).ok_or_else(|| {
            GenerationError::TemplateWithoutDoorways {
                name: template.name.clone(),
            }
        })?;

        // turn the candidate so both doorways face each other
        let yaw = -signed_yaw_between(&anchor.world_forward, &-doorway.local_forward);
        let pivot = anchor.world_position;
        let unrotated_center = pivot - doorway.local_position + template.bounds.center;
        let center =
            rotate_point_around_pivot(&unrotated_center, &pivot, &Vector3::new(0.0, yaw, 0.0));
        let half_extents =
            fit_half_extents(&template.bounds.half_extents, yaw, self.config.bounds_fit);

        Ok(CandidatePose {
            doorway_index,
            yaw,
            position: center - yaw_rotation(yaw) * template.bounds.center,
            bounds: Bounds::new(center, half_extents),
        })
    }

    /// Tries `template` against the unconnected `anchor`. A rejection leaves the world untouched.
    pub fn attempt_attach_room<R: Rng>(
        &mut self,
        anchor_id: DoorwayId,
        template: &RoomTemplate,
        rng: &mut R,
    ) -> Result<Placement, GenerationError> {
        if template.doorways.is_empty() {
            return Err(GenerationError::TemplateWithoutDoorways {
                name: template.name.clone(),
            });
        }
        let anchor = self
            .world
            .doorway(anchor_id)
            .ok_or(GenerationError::UnknownDoorway(anchor_id))?;
        let doorway_index = rng.gen_range(0..template.doorways.len());
        let pose = self.candidate_pose(anchor, template, doorway_index)?;

        if self
            .world
            .query_overlap(&pose.bounds, CollisionChannel::RoomBounds)
        {
            log::debug!(
                "rejected '{}' at doorway {:?}: overlaps placed rooms",
                template.name,
                anchor_id
            );
            return Ok(Placement::Rejected);
        }

        let room_id = self
            .world
            .instantiate(template, pose.position, pose.yaw, Some(anchor_id))?;
        self.world.mark_doorway_connected(anchor_id)?;
        self.world.register_placed_room(room_id)?;
        log::debug!(
            "placed '{}' as {:?} at doorway {:?}",
            template.name,
            room_id,
            anchor_id
        );
        Ok(Placement::Placed(room_id))
    }

    /// Draws a template uniformly, with replacement, and tries it.
    pub fn attempt_random_candidate<R: Rng>(
        &mut self,
        anchor_id: DoorwayId,
        rng: &mut R,
    ) -> Result<Placement, GenerationError> {
        let catalog = self.catalog;
        let templates = catalog.candidate_templates();
        if templates.is_empty() {
            return Err(GenerationError::EmptyCatalog);
        }
        let template = &templates[rng.gen_range(0..templates.len())];
        self.attempt_attach_room(anchor_id, template, rng)
    }

    pub fn attempt_filler<R: Rng>(
        &mut self,
        anchor_id: DoorwayId,
        rng: &mut R,
    ) -> Result<Placement, GenerationError> {
        let catalog = self.catalog;
        let filler = catalog
            .filler_template()
            .ok_or(GenerationError::MissingFillerTemplate)?;
        self.attempt_attach_room(anchor_id, filler, rng)
    }
}
