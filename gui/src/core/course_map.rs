use helpers::geometry::Point2d;
use qohwah::core::race_catalog::RaceDef;

/// CourseMap is the top-down view of a race: the straight line from the start to the finish point
/// on the map plane.
#[derive(Debug, Clone)]
pub struct CourseMap {
    pub name: String,
    pub start: Point2d,
    pub finish: Point2d,
}

impl CourseMap {
    pub fn new(race: &RaceDef) -> CourseMap {
        CourseMap {
            name: race.name.to_owned(),
            start: race.start.position.as_point2d(),
            finish: race.finish.position.as_point2d(),
        }
    }

    /// get_axes_expansion returns [x_min, x_max, y_min, y_max] of a square area that contains the
    /// course plus the inserted padding on all sides.
    pub fn get_axes_expansion(&self, padding_size: f64) -> [f64; 4] {
        let mut x_min = self.start.x.min(self.finish.x) - padding_size;
        let mut x_max = self.start.x.max(self.finish.x) + padding_size;
        let mut y_min = self.start.y.min(self.finish.y) - padding_size;
        let mut y_max = self.start.y.max(self.finish.y) + padding_size;

        // update min and max values such that its a square shape
        let width = x_max - x_min;
        let height = y_max - y_min;

        if width > height {
            let diff = width - height;
            y_min -= diff / 2.0;
            y_max += diff / 2.0;
        } else {
            let diff = height - width;
            x_min -= diff / 2.0;
            x_max += diff / 2.0;
        }

        [x_min, x_max, y_min, y_max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;
    use qohwah::core::race_catalog::Pose;

    #[test]
    fn test_axes_expansion_is_square() {
        let course_map = CourseMap::new(&RaceDef {
            name: String::from("Sprint"),
            start: Pose::new(0.0, 0.0, 10.0, 0.0),
            finish: Pose::new(40.0, 100.0, 0.0, 0.0),
        });
        let [x_min, x_max, y_min, y_max] = course_map.get_axes_expansion(10.0);

        assert_ulps_eq!(y_min, -10.0);
        assert_ulps_eq!(y_max, 110.0);
        assert_ulps_eq!(x_max - x_min, y_max - y_min);
        assert_ulps_eq!((x_min + x_max) / 2.0, 20.0);
    }
}
