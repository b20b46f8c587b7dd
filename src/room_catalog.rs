use crate::bounds::Bounds;
use crate::doorway::DoorwayTemplate;
use crate::error::GenerationError;
use crate::room::RoomTemplate;
use nalgebra::Vector3;

/// Source of room templates for the placement engine.
pub trait RoomCatalog {
    fn candidate_templates(&self) -> &[RoomTemplate];

    /// Dead-end module used when no candidate fits.
    fn filler_template(&self) -> Option<&RoomTemplate>;

    fn template(&self, index: usize) -> Result<&RoomTemplate, GenerationError> {
        self.candidate_templates()
            .get(index)
            .ok_or(GenerationError::MissingTemplate { index })
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if self.candidate_templates().is_empty() {
            return Err(GenerationError::EmptyCatalog);
        }
        let filler = self
            .filler_template()
            .ok_or(GenerationError::MissingFillerTemplate)?;
        if let Some(template) = self
            .candidate_templates()
            .iter()
            .chain(std::iter::once(filler))
            .find(|template| template.doorways.is_empty())
        {
            return Err(GenerationError::TemplateWithoutDoorways {
                name: template.name.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    pub templates: Vec<RoomTemplate>,
    pub filler: Option<RoomTemplate>,
}

impl RoomCatalog for Catalog {
    fn candidate_templates(&self) -> &[RoomTemplate] {
        &self.templates
    }

    fn filler_template(&self) -> Option<&RoomTemplate> {
        self.filler.as_ref()
    }
}

// Rooms sit on the floor (y = 0) and doorways lie on the faces of the bounding box.
// Footprints are square so the unrotated bounds fit stays exact for quarter turns.
fn room(
    name: &str,
    width: f32,
    height: f32,
    depth: f32,
    doorways: Vec<DoorwayTemplate>,
) -> RoomTemplate {
    RoomTemplate::new(
        name,
        Bounds::from_size(
            Vector3::new(0.0, height / 2.0, 0.0),
            Vector3::new(width, height, depth),
        ),
        doorways,
    )
}

fn north(z: f32) -> DoorwayTemplate {
    DoorwayTemplate::new(Vector3::new(0.0, 0.0, z), Vector3::z())
}

fn south(z: f32) -> DoorwayTemplate {
    DoorwayTemplate::new(Vector3::new(0.0, 0.0, -z), -Vector3::z())
}

fn east(x: f32) -> DoorwayTemplate {
    DoorwayTemplate::new(Vector3::new(x, 0.0, 0.0), Vector3::x())
}

fn west(x: f32) -> DoorwayTemplate {
    DoorwayTemplate::new(Vector3::new(-x, 0.0, 0.0), -Vector3::x())
}

impl Default for Catalog {
    fn default() -> Self {
        let templates = vec![
            // cross
            room(
                "cross",
                6.0,
                3.0,
                6.0,
                vec![north(3.0), south(3.0), east(3.0), west(3.0)],
            ),
            // straight
            room("corridor", 4.0, 3.0, 4.0, vec![north(2.0), south(2.0)]),
            // L corner
            room("corner", 4.0, 3.0, 4.0, vec![south(2.0), east(2.0)]),
            // T junction
            room("junction", 6.0, 3.0, 6.0, vec![south(3.0), east(3.0), west(3.0)]),
            // large hall
            room("hall", 10.0, 4.0, 10.0, vec![north(5.0), south(5.0), east(5.0)]),
        ];
        // zero footprint, so it fits in any doorway whose neighbours do not overlap
        let filler = room("blocked_entrance", 0.0, 3.0, 0.0, vec![south(0.0)]);
        Catalog {
            templates,
            filler: Some(filler),
        }
    }
}
