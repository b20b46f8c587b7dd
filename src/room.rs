use crate::bounds::Bounds;
use crate::constants::BoundsFit;
use crate::doorway::{Doorway, DoorwayId, DoorwayTemplate};
use nalgebra::Vector3;

/// Room prefab: doorways and a bounding box, both in the template's local frame.
#[derive(Clone, Debug)]
pub struct RoomTemplate {
    pub name: String,
    pub doorways: Vec<DoorwayTemplate>,
    pub bounds: Bounds,
}

impl RoomTemplate {
    pub fn new(name: impl Into<String>, bounds: Bounds, doorways: Vec<DoorwayTemplate>) -> Self {
        RoomTemplate {
            name: name.into(),
            doorways,
            bounds,
        }
    }
}

#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub template_name: String,
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub world_bounds: Bounds,
    pub doorways: Vec<Doorway>,
    pub attached_to: Option<DoorwayId>,
}

impl Room {
    pub fn new(
        id: RoomId,
        template: &RoomTemplate,
        position: Vector3<f32>,
        yaw: f32,
        fit: BoundsFit,
        attached_to: Option<DoorwayId>,
    ) -> Self {
        let doorways = template
            .doorways
            .iter()
            .enumerate()
            .map(|(index, doorway)| {
                Doorway::place(DoorwayId::new(id, index), doorway, &position, yaw)
            })
            .collect();
        Room {
            id,
            template_name: template.name.clone(),
            position,
            yaw,
            world_bounds: template.bounds.to_world(&position, yaw, fit),
            doorways,
            attached_to,
        }
    }

    pub fn doorway(&self, index: usize) -> Option<&Doorway> {
        self.doorways.get(index)
    }

    pub fn doorway_mut(&mut self, index: usize) -> Option<&mut Doorway> {
        self.doorways.get_mut(index)
    }

    pub fn unconnected_doorways(&self) -> impl Iterator<Item = &Doorway> {
        self.doorways.iter().filter(|doorway| !doorway.is_connected())
    }
}

#[derive(Ord, PartialOrd, PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct RoomId(u64);

impl RoomId {
    pub fn first() -> Self {
        RoomId(1)
    }

    pub fn gen_id(&mut self) -> Self {
        let ret = *self;
        self.0 += 1;
        ret
    }

    pub fn inner(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::bounds::Bounds;
    use crate::constants::BoundsFit;
    use crate::doorway::DoorwayTemplate;
    use crate::room::{Room, RoomId, RoomTemplate};
    use nalgebra::Vector3;
    use std::f32::consts::PI;

    fn corridor() -> RoomTemplate {
        RoomTemplate::new(
            "corridor",
            Bounds::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 1.0, 2.0)),
            vec![
                DoorwayTemplate::new(Vector3::new(0.0, 0.0, 2.0), Vector3::z()),
                DoorwayTemplate::new(Vector3::new(0.0, 0.0, -2.0), -Vector3::z()),
            ],
        )
    }

    #[test]
    fn test_gen_id() {
        let mut id = RoomId::first();
        assert_eq!(id.gen_id().inner(), 1);
        assert_eq!(id.gen_id().inner(), 2);
        assert_eq!(id.inner(), 3);
    }

    #[test]
    fn test_new_room_places_doorways_and_bounds() {
        let room = Room::new(
            RoomId::first(),
            &corridor(),
            Vector3::new(0.0, 0.0, 5.0),
            PI,
            BoundsFit::Unrotated,
            None,
        );
        assert_eq!(room.template_name, "corridor");
        assert_eq!(room.doorways.len(), 2);
        let front = room.doorway(0).unwrap();
        assert!((front.world_position - Vector3::new(0.0, 0.0, 3.0)).norm() < 1e-5);
        assert!((front.world_forward + Vector3::z()).norm() < 1e-5);
        assert!((room.world_bounds.center - Vector3::new(0.0, 1.0, 5.0)).norm() < 1e-5);
        assert_eq!(room.unconnected_doorways().count(), 2);
    }
}
