use approx::ulps_eq;
use serde::Deserialize;

// 2D ----------------------------------------------------------------------------------------------
/// Point2d is a point on the map plane, i.e. a world point with its height dropped.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Point2d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.x, other.x) && ulps_eq!(self.y, other.y)
    }
}

// 3D ----------------------------------------------------------------------------------------------
/// Point3d is a position in game world coordinates (z is the height).
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub fn new(x: f64, y: f64, z: f64) -> Point3d {
        Point3d { x, y, z }
    }
    pub fn as_point2d(&self) -> Point2d {
        Point2d {
            x: self.x,
            y: self.y,
        }
    }
    pub fn as_vector3d(&self) -> Vector3d {
        Vector3d {
            dx: self.x,
            dy: self.y,
            dz: self.z,
        }
    }
    pub fn shift(&self, other: &Vector3d) -> Point3d {
        self.as_vector3d().add(other).as_point3d()
    }
    /// vector_to returns the vector pointing from this point to the other point.
    pub fn vector_to(&self, other: &Point3d) -> Vector3d {
        other.as_vector3d().sub(&self.as_vector3d())
    }
    /// distance_to returns the straight-line (euclidean) distance between two points.
    pub fn distance_to(&self, other: &Point3d) -> f64 {
        self.vector_to(other).abs()
    }
    /// step_toward moves the point by at most max_step toward the target. The target is returned
    /// unchanged if it is closer than max_step.
    pub fn step_toward(&self, target: &Point3d, max_step: f64) -> Point3d {
        let dist = self.distance_to(target);

        if dist <= max_step || ulps_eq!(dist, 0.0) {
            return *target;
        }
        self.shift(&self.vector_to(target).normalized().mult(max_step))
    }
}

impl PartialEq for Point3d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.x, other.x) && ulps_eq!(self.y, other.y) && ulps_eq!(self.z, other.z)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Vector3d {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Vector3d {
    pub fn as_point3d(&self) -> Point3d {
        Point3d {
            x: self.dx,
            y: self.dy,
            z: self.dz,
        }
    }
    pub fn sub(&self, other: &Self) -> Vector3d {
        Vector3d {
            dx: self.dx - other.dx,
            dy: self.dy - other.dy,
            dz: self.dz - other.dz,
        }
    }
    pub fn add(&self, other: &Self) -> Vector3d {
        Vector3d {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
            dz: self.dz + other.dz,
        }
    }
    pub fn mult(&self, k: f64) -> Vector3d {
        Vector3d {
            dx: self.dx * k,
            dy: self.dy * k,
            dz: self.dz * k,
        }
    }
    pub fn abs(&self) -> f64 {
        (self.dx.powf(2.0) + self.dy.powf(2.0) + self.dz.powf(2.0)).sqrt()
    }
    pub fn normalized(&self) -> Vector3d {
        self.mult(1.0 / self.abs())
    }
    /// heading_deg returns the heading of the vector on the map plane in degrees, measured
    /// counter-clockwise from the positive y axis (the game's convention, north = 0).
    pub fn heading_deg(&self) -> f64 {
        let heading = (-self.dx).atan2(self.dy).to_degrees();
        if heading < 0.0 {
            heading + 360.0
        } else {
            heading
        }
    }
}

impl PartialEq for Vector3d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.dx, other.dx) && ulps_eq!(self.dy, other.dy) && ulps_eq!(self.dz, other.dz)
    }
}
