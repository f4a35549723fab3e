use helpers::geometry::Point3d;

/// Pose is a position in world coordinates plus a heading.
///
/// * `position` - (m) Position in world coordinates
/// * `heading` - (deg) Heading on the map plane, 0 is north, counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Point3d,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64, heading: f64) -> Pose {
        Pose {
            position: Point3d::new(x, y, z),
            heading,
        }
    }
}

/// * `name` - Race name as shown in the menu
/// * `start` - Pose the player and the race vehicle are placed at when the race (re)starts
/// * `finish` - Pose of the finish point, its heading is kept for completeness but unused
#[derive(Debug, Clone, PartialEq)]
pub struct RaceDef {
    pub name: String,
    pub start: Pose,
    pub finish: Pose,
}

impl RaceDef {
    /// course_length returns the straight-line distance between start and finish.
    pub fn course_length(&self) -> f64 {
        self.start.position.distance_to(&self.finish.position)
    }
}

/// RaceCatalog holds all race definitions in file order, which is also the menu order. An index
/// into the catalog is the only way the rest of the mod refers to a race.
#[derive(Debug, Clone, Default)]
pub struct RaceCatalog {
    races: Vec<RaceDef>,
}

impl RaceCatalog {
    pub fn new(races: Vec<RaceDef>) -> RaceCatalog {
        RaceCatalog { races }
    }

    pub fn get(&self, idx: usize) -> Option<&RaceDef> {
        self.races.get(idx)
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    pub fn contains_idx(&self, idx: usize) -> bool {
        idx < self.races.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.races.iter().map(|race| race.name.as_str()).collect()
    }
}
