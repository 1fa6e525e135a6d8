//! Body model geometry: named sphere and capsule parts with ray intersection.
//!
//! Part names carry a gender token (`male_torso`, `female_bust_left`) so a model file that
//! bundles both bodies can be filtered down to the active one.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::camera::Ray;
use crate::state::Gender;

const HIT_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PartShape {
    Sphere { center: [f32; 3], radius: f32 },
    Capsule { start: [f32; 3], end: [f32; 3], radius: f32 },
}

impl PartShape {
    /// Capsule around a vertical segment of `length`, rotated about Z by `tilt` radians.
    pub fn capsule(center: Vec3, radius: f32, length: f32, tilt: f32) -> Self {
        let axis = Vec3::new(-tilt.sin(), tilt.cos(), 0.0) * (length * 0.5);
        PartShape::Capsule {
            start: (center - axis).to_array(),
            end: (center + axis).to_array(),
            radius,
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        PartShape::Sphere {
            center: center.to_array(),
            radius,
        }
    }

    pub fn radius(&self) -> f32 {
        match *self {
            PartShape::Sphere { radius, .. } | PartShape::Capsule { radius, .. } => radius,
        }
    }

    /// Representative point used for back-to-front ordering.
    pub fn center(&self) -> Vec3 {
        match *self {
            PartShape::Sphere { center, .. } => Vec3::from_array(center),
            PartShape::Capsule { start, end, .. } => {
                (Vec3::from_array(start) + Vec3::from_array(end)) * 0.5
            }
        }
    }

    /// Distance along the ray to the first surface hit in front of its origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            PartShape::Sphere { center, radius } => {
                ray_sphere(ray, Vec3::from_array(center), radius)
            }
            PartShape::Capsule { start, end, radius } => {
                ray_capsule(ray, Vec3::from_array(start), Vec3::from_array(end), radius)
            }
        }
    }
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let h = b * b - c;
    if h < 0.0 {
        return None;
    }
    let h = h.sqrt();
    [-b - h, -b + h].into_iter().find(|t| *t > HIT_EPSILON)
}

fn ray_capsule(ray: &Ray, a: Vec3, b: Vec3, radius: f32) -> Option<f32> {
    let ba = b - a;
    let oa = ray.origin - a;
    let baba = ba.length_squared();
    if baba <= f32::EPSILON {
        return ray_sphere(ray, a, radius);
    }
    let bard = ba.dot(ray.direction);
    let baoa = ba.dot(oa);
    let k2 = baba - bard * bard;
    let mut best: Option<f32> = None;

    if k2.abs() > f32::EPSILON {
        let k1 = baba * oa.dot(ray.direction) - baoa * bard;
        let k0 = baba * oa.length_squared() - baoa * baoa - radius * radius * baba;
        let h = k1 * k1 - k2 * k0;
        if h >= 0.0 {
            let t = (-k1 - h.sqrt()) / k2;
            let y = baoa + t * bard;
            if t > HIT_EPSILON && y > 0.0 && y < baba {
                best = Some(t);
            }
        }
    }

    for cap in [a, b] {
        if let Some(t) = ray_sphere(ray, cap, radius) {
            if best.map_or(true, |current| t < current) {
                best = Some(t);
            }
        }
    }
    best
}

/// Gender named by a part, matched on whole name tokens.
pub fn part_gender(name: &str) -> Option<Gender> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .find_map(|token| match token.to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    pub name: String,
    #[serde(flatten)]
    pub shape: PartShape,
}

impl BodyPart {
    pub fn new(name: impl Into<String>, shape: PartShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyModel {
    pub parts: Vec<BodyPart>,
}

impl BodyModel {
    /// Built-in low-poly figure: capsule torso, limbs and a spherical head.
    pub fn stylized(gender: Gender) -> Self {
        let prefix = gender.as_str();
        let torso_radius = match gender {
            Gender::Male => 0.25,
            Gender::Female => 0.2,
        };
        let tilt = PI / 12.0;
        let mut parts = vec![
            BodyPart::new(
                format!("{prefix}_torso"),
                PartShape::capsule(Vec3::new(0.0, 1.2, 0.0), torso_radius, 0.6, 0.0),
            ),
            BodyPart::new(
                format!("{prefix}_head"),
                PartShape::sphere(Vec3::new(0.0, 1.8, 0.0), 0.15),
            ),
            BodyPart::new(
                format!("{prefix}_arm_right"),
                PartShape::capsule(Vec3::new(-0.35, 1.3, 0.0), 0.06, 0.6, tilt),
            ),
            BodyPart::new(
                format!("{prefix}_arm_left"),
                PartShape::capsule(Vec3::new(0.35, 1.3, 0.0), 0.06, 0.6, -tilt),
            ),
            BodyPart::new(
                format!("{prefix}_leg_right"),
                PartShape::capsule(Vec3::new(-0.15, 0.45, 0.0), 0.08, 0.8, 0.0),
            ),
            BodyPart::new(
                format!("{prefix}_leg_left"),
                PartShape::capsule(Vec3::new(0.15, 0.45, 0.0), 0.08, 0.8, 0.0),
            ),
        ];
        if gender == Gender::Female {
            parts.push(BodyPart::new(
                "female_bust_right",
                PartShape::sphere(Vec3::new(-0.1, 1.35, 0.15), 0.08),
            ));
            parts.push(BodyPart::new(
                "female_bust_left",
                PartShape::sphere(Vec3::new(0.1, 1.35, 0.15), 0.08),
            ));
        }
        Self { parts }
    }

    /// Drop parts that belong to the other gender. Untagged parts are kept.
    pub fn visible_for(&self, gender: Gender) -> Self {
        let parts = self
            .parts
            .iter()
            .filter(|part| part_gender(&part.name).map_or(true, |g| g == gender))
            .cloned()
            .collect();
        Self { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Nearest surface point hit by the ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        self.parts
            .iter()
            .filter_map(|part| part.shape.intersect(ray))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| ray.at(t))
    }
}
