//! Floor plan and two-axis directions

/// Width of the floor plan in map units
pub const MAP_WIDTH: f32 = 500.0;

/// Height of the floor plan in map units
pub const MAP_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

/// Fixed user position
pub const USER_START: MapPoint = MapPoint { x: 150.0, y: 200.0 };

/// Rectangle on the floor plan; y grows southwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRoom {
    pub id: &'static str,
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub const MAP_ROOMS: [MapRoom; 5] = [
    MapRoom { id: "living_room", name: "Living Room", x: 50.0, y: 150.0, width: 200.0, height: 150.0 },
    MapRoom { id: "kitchen", name: "Kitchen", x: 300.0, y: 150.0, width: 150.0, height: 100.0 },
    MapRoom { id: "bathroom", name: "Bathroom", x: 300.0, y: 280.0, width: 100.0, height: 80.0 },
    MapRoom { id: "hallway", name: "Hallway", x: 250.0, y: 150.0, width: 50.0, height: 210.0 },
    MapRoom { id: "entrance", name: "Entrance", x: 50.0, y: 320.0, width: 100.0, height: 40.0 },
];

pub fn find_map_room(id: &str) -> Option<&'static MapRoom> {
    MAP_ROOMS.iter().find(|room| room.id == id)
}

impl MapRoom {
    /// Bounds are inclusive on every side
    pub fn contains(&self, point: MapPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> MapPoint {
        MapPoint {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn selection_announcement(&self) -> String {
        format!(
            "{} selected. This room is located at coordinates {}, {} on the map.",
            self.name, self.x, self.y
        )
    }
}

/// First room containing `point`, in table order
pub fn room_at(point: MapPoint) -> Option<&'static MapRoom> {
    MAP_ROOMS.iter().find(|room| room.contains(point))
}

pub fn location_announcement(point: MapPoint) -> String {
    match room_at(point) {
        Some(room) => format!("You are currently in the {}.", room.name),
        None => "You are currently between rooms.".to_string(),
    }
}

/// Compass legs from `from` to the centre of `target`
///
/// The axis with the larger delta goes first; a tie counts as vertical.
pub fn route_legs(from: MapPoint, target: &MapRoom) -> Vec<&'static str> {
    let center = target.center();
    let dx = center.x - from.x;
    let dy = center.y - from.y;

    let mut legs = Vec::with_capacity(2);
    if dx.abs() > dy.abs() {
        legs.push(if dx > 0.0 { "head east" } else { "head west" });
        if dy > 0.0 {
            legs.push("then go south");
        } else if dy < 0.0 {
            legs.push("then go north");
        }
    } else {
        legs.push(if dy > 0.0 { "head south" } else { "head north" });
        if dx > 0.0 {
            legs.push("then go east");
        } else if dx < 0.0 {
            legs.push("then go west");
        }
    }
    legs
}

pub fn directions_announcement(from: MapPoint, target: &MapRoom) -> String {
    if room_at(from).is_some_and(|current| current.id == target.id) {
        return format!("You are already in the {}.", target.name);
    }
    format!(
        "To reach the {}, {}.",
        target.name,
        route_legs(from, target).join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_starts_in_living_room() {
        assert_eq!(room_at(USER_START).unwrap().id, "living_room");
        assert_eq!(
            location_announcement(USER_START),
            "You are currently in the Living Room."
        );
    }

    #[test]
    fn test_between_rooms() {
        let outside = MapPoint { x: 480.0, y: 20.0 };
        assert_eq!(location_announcement(outside), "You are currently between rooms.");
    }

    #[test]
    fn test_inclusive_bounds_and_table_order() {
        // (250, 200) sits on the shared edge of living room and hallway
        let edge = MapPoint { x: 250.0, y: 200.0 };
        assert_eq!(room_at(edge).unwrap().id, "living_room");
    }

    #[test]
    fn test_directions() {
        let kitchen = find_map_room("kitchen").unwrap();
        assert_eq!(
            directions_announcement(USER_START, kitchen),
            "To reach the Kitchen, head east."
        );

        let bathroom = find_map_room("bathroom").unwrap();
        assert_eq!(
            directions_announcement(USER_START, bathroom),
            "To reach the Bathroom, head east then go south."
        );

        let entrance = find_map_room("entrance").unwrap();
        assert_eq!(
            directions_announcement(USER_START, entrance),
            "To reach the Entrance, head south then go west."
        );

        let living = find_map_room("living_room").unwrap();
        assert_eq!(
            directions_announcement(USER_START, living),
            "You are already in the Living Room."
        );
    }

    #[test]
    fn test_selection_announcement() {
        let hallway = find_map_room("hallway").unwrap();
        assert_eq!(
            hallway.selection_announcement(),
            "Hallway selected. This room is located at coordinates 250, 150 on the map."
        );
    }
}
