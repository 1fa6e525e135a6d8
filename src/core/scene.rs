//! Scene adapter: turns viewport pointer input into interaction intents.
//!
//! The renderer only has to answer two questions, where a ray meets the body
//! ([`SceneSurface`]) and whether a press was a click or a drag ([`PointerTracker`]).
//! Everything else is plain geometry over the camera, so the controller never sees
//! renderer events.

use glam::{Vec2, Vec3};
use uuid::Uuid;

use super::body::{BodyModel, PartShape};
use super::camera::{OrbitCamera, Ray, Viewport};
use crate::constants::{MARKER_IDLE_COLOR, MARKER_SELECTED_COLOR};
use crate::state::{Marker, SceneIntent};

/// Pointer travel below this many pixels still counts as a click.
pub const CLICK_THRESHOLD_PX: f32 = 5.0;
/// World-space radius of a marker glyph.
pub const MARKER_RADIUS: f32 = 0.04;
const MIN_GLYPH_PICK_RADIUS_PX: f32 = 8.0;
const OCCLUSION_EPSILON: f32 = 0.02;

/// Surface picking capability provided by the renderer.
pub trait SceneSurface {
    /// Nearest point where the ray meets the surface.
    fn surface_hit(&self, ray: &Ray) -> Option<Vec3>;
}

impl SceneSurface for BodyModel {
    fn surface_hit(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect(ray)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGesture {
    Click,
    Drag,
}

/// Accumulates pointer travel between press and release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    pressed: bool,
    last: Vec2,
    travel: f32,
    last_gesture: Option<PointerGesture>,
}

impl PointerTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.pressed = true;
        self.last = pos;
        self.travel = 0.0;
    }

    /// Record movement; returns the delta while the button is held.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.pressed {
            return None;
        }
        let delta = pos - self.last;
        self.travel += delta.abs().element_sum();
        self.last = pos;
        Some(delta)
    }

    /// Finish the press. `None` if the button was not held.
    pub fn release(&mut self, pos: Vec2) -> Option<PointerGesture> {
        if !self.pressed {
            return None;
        }
        self.move_to(pos);
        self.pressed = false;
        let gesture = if self.travel < CLICK_THRESHOLD_PX {
            PointerGesture::Click
        } else {
            PointerGesture::Drag
        };
        self.last_gesture = Some(gesture);
        Some(gesture)
    }

    /// Drop an in-progress press (pointer left the viewport).
    pub fn cancel(&mut self) {
        self.pressed = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the most recent press ended as a click.
    pub fn last_was_click(&self) -> bool {
        self.last_gesture == Some(PointerGesture::Click)
    }
}

/// A marker glyph as it appears on screen this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphView {
    pub id: Uuid,
    pub title: String,
    pub center: Vec2,
    /// Unscaled on-screen radius in pixels.
    pub radius: f32,
    pub depth: f32,
}

/// Maps viewport pixels to intents for one frame of camera and marker state.
pub struct SceneAdapter<'a> {
    pub camera: &'a OrbitCamera,
    pub viewport: Viewport,
    pub surface: &'a dyn SceneSurface,
    pub markers: &'a [Marker],
}

impl<'a> SceneAdapter<'a> {
    /// Whether the surface hides a point from the camera.
    fn occluded(&self, point: Vec3) -> bool {
        let eye = self.camera.eye();
        let ray = Ray::new(eye, point - eye);
        let distance = eye.distance(point);
        self.surface
            .surface_hit(&ray)
            .is_some_and(|hit| eye.distance(hit) < distance - OCCLUSION_EPSILON)
    }

    /// Projected glyphs that the body does not hide, ordered back to front.
    pub fn visible_glyphs(&self) -> Vec<GlyphView> {
        let mut glyphs: Vec<GlyphView> = self
            .markers
            .iter()
            .filter_map(|marker| {
                let world = marker.position.to_vec3();
                if self.occluded(world) {
                    return None;
                }
                let point = self.camera.project(world, self.viewport)?;
                Some(GlyphView {
                    id: marker.id,
                    title: marker.title.clone(),
                    center: point.pos,
                    radius: self
                        .camera
                        .projected_radius(MARKER_RADIUS, point.depth, self.viewport),
                    depth: point.depth,
                })
            })
            .collect();
        glyphs.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        glyphs
    }

    /// Marker glyph under the pixel, nearest to the camera.
    pub fn glyph_at(&self, pixel: Vec2) -> Option<Uuid> {
        self.visible_glyphs()
            .into_iter()
            .rev()
            .find(|glyph| glyph.center.distance(pixel) <= glyph.radius.max(MIN_GLYPH_PICK_RADIUS_PX))
            .map(|glyph| glyph.id)
    }

    pub fn surface_at(&self, pixel: Vec2) -> Option<Vec3> {
        let ray = self.camera.ray_through(pixel, self.viewport);
        self.surface.surface_hit(&ray)
    }

    /// Single click: toggle a glyph, ignore the body, clear on empty space.
    pub fn on_click(&self, pixel: Vec2) -> Option<SceneIntent> {
        if let Some(id) = self.glyph_at(pixel) {
            return Some(SceneIntent::ToggleMarker(id));
        }
        if self.surface_at(pixel).is_some() {
            return None;
        }
        Some(SceneIntent::ClearSelection)
    }

    /// Double click: place a marker on the body unless a glyph is in the way.
    pub fn on_double_click(&self, pixel: Vec2) -> Option<SceneIntent> {
        if self.glyph_at(pixel).is_some() {
            return None;
        }
        self.surface_at(pixel)
            .map(|point| SceneIntent::PlaceMarker(point.into()))
    }
}

/// Presentational emphasis of a marker glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub color: &'static str,
    pub glow: f32,
    pub scale: f32,
    pub show_label: bool,
}

pub fn glyph_style(selected: bool, hovered: bool, modal_open: bool) -> GlyphStyle {
    let hovered = hovered && !modal_open;
    GlyphStyle {
        color: if selected { MARKER_SELECTED_COLOR } else { MARKER_IDLE_COLOR },
        glow: if selected || hovered { 2.0 } else { 0.5 },
        scale: if selected { 1.5 } else { 1.0 },
        show_label: selected || hovered,
    }
}

/// A body part flattened to 2D for drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectedShape {
    Circle { center: Vec2, radius: f32 },
    Stroke { from: Vec2, to: Vec2, width: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPart {
    pub name: String,
    pub shape: ProjectedShape,
    pub depth: f32,
}

/// Project every visible part, ordered back to front.
pub fn project_body(
    camera: &OrbitCamera,
    viewport: Viewport,
    model: &BodyModel,
) -> Vec<ProjectedPart> {
    let mut parts: Vec<ProjectedPart> = model
        .parts
        .iter()
        .filter_map(|part| {
            let depth = camera.project(part.shape.center(), viewport)?.depth;
            let radius = part.shape.radius();
            let shape = match part.shape {
                PartShape::Sphere { center, .. } => {
                    let point = camera.project(Vec3::from_array(center), viewport)?;
                    ProjectedShape::Circle {
                        center: point.pos,
                        radius: camera.projected_radius(radius, point.depth, viewport),
                    }
                }
                PartShape::Capsule { start, end, .. } => {
                    let from = camera.project(Vec3::from_array(start), viewport)?;
                    let to = camera.project(Vec3::from_array(end), viewport)?;
                    ProjectedShape::Stroke {
                        from: from.pos,
                        to: to.pos,
                        width: 2.0 * camera.projected_radius(radius, depth, viewport),
                    }
                }
            };
            Some(ProjectedPart {
                name: part.name.clone(),
                shape,
                depth,
            })
        })
        .collect();
    parts.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Entry, Gender, Position};

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn marker_at(position: Vec3) -> Marker {
        Marker::new(Position::from(position), "Spot", Entry::new("note", None))
    }

    #[test]
    fn test_small_motion_is_click() {
        let mut tracker = PointerTracker::default();
        tracker.press(Vec2::new(100.0, 100.0));
        tracker.move_to(Vec2::new(101.0, 102.0));
        assert_eq!(tracker.release(Vec2::new(101.0, 101.0)), Some(PointerGesture::Click));
        assert!(tracker.last_was_click());
    }

    #[test]
    fn test_accumulated_motion_is_drag() {
        let mut tracker = PointerTracker::default();
        tracker.press(Vec2::new(100.0, 100.0));
        tracker.move_to(Vec2::new(103.0, 100.0));
        tracker.move_to(Vec2::new(100.0, 100.0));
        assert_eq!(tracker.release(Vec2::new(100.0, 100.0)), Some(PointerGesture::Drag));
        assert!(!tracker.last_was_click());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.release(Vec2::ZERO), None);
        assert_eq!(tracker.move_to(Vec2::ONE), None);
    }

    #[test]
    fn test_double_click_on_body_places_marker() {
        let camera = OrbitCamera::default();
        let body = BodyModel::stylized(Gender::Male);
        let adapter = SceneAdapter {
            camera: &camera,
            viewport: viewport(),
            surface: &body,
            markers: &[],
        };
        let target = Vec3::new(0.0, 1.2, 0.25);
        let pixel = camera.project(target, viewport()).unwrap().pos;
        match adapter.on_double_click(pixel) {
            Some(SceneIntent::PlaceMarker(position)) => {
                assert!(position.to_vec3().distance(target) < 0.01, "{position:?}");
            }
            other => panic!("unexpected intent {other:?}"),
        }
        assert_eq!(adapter.on_click(pixel), None);
    }

    #[test]
    fn test_click_on_empty_space_clears() {
        let camera = OrbitCamera::default();
        let body = BodyModel::stylized(Gender::Male);
        let adapter = SceneAdapter {
            camera: &camera,
            viewport: viewport(),
            surface: &body,
            markers: &[],
        };
        let pixel = Vec2::new(20.0, 20.0);
        assert_eq!(adapter.on_click(pixel), Some(SceneIntent::ClearSelection));
        assert_eq!(adapter.on_double_click(pixel), None);
    }

    #[test]
    fn test_glyph_takes_priority_over_body() {
        let camera = OrbitCamera::default();
        let body = BodyModel::stylized(Gender::Male);
        let marker = marker_at(Vec3::new(0.0, 1.2, 0.25));
        let markers = vec![marker.clone()];
        let adapter = SceneAdapter {
            camera: &camera,
            viewport: viewport(),
            surface: &body,
            markers: &markers,
        };
        let pixel = camera.project(marker.position.to_vec3(), viewport()).unwrap().pos;
        assert_eq!(adapter.on_click(pixel), Some(SceneIntent::ToggleMarker(marker.id)));
        assert_eq!(adapter.on_double_click(pixel), None);
    }

    #[test]
    fn test_nearest_glyph_wins() {
        let camera = OrbitCamera::default();
        let body = BodyModel::default();
        let far = marker_at(Vec3::new(0.0, 1.2, -0.25));
        let near = marker_at(Vec3::new(0.0, 1.2, 0.25));
        let markers = vec![far, near.clone()];
        let adapter = SceneAdapter {
            camera: &camera,
            viewport: viewport(),
            surface: &body,
            markers: &markers,
        };
        let pixel = camera.project(near.position.to_vec3(), viewport()).unwrap().pos;
        assert_eq!(adapter.glyph_at(pixel), Some(near.id));
    }

    #[test]
    fn test_glyph_behind_body_is_hidden() {
        let camera = OrbitCamera::default();
        let body = BodyModel::stylized(Gender::Male);
        let front = marker_at(Vec3::new(0.0, 1.2, 0.25));
        let back = marker_at(Vec3::new(0.0, 1.2, -0.25));
        let markers = vec![front.clone(), back.clone()];
        let adapter = SceneAdapter {
            camera: &camera,
            viewport: viewport(),
            surface: &body,
            markers: &markers,
        };
        let visible: Vec<Uuid> = adapter.visible_glyphs().iter().map(|g| g.id).collect();
        assert_eq!(visible, vec![front.id]);
    }

    #[test]
    fn test_glyph_style() {
        let idle = glyph_style(false, false, false);
        assert_eq!(idle.color, MARKER_IDLE_COLOR);
        assert!(!idle.show_label);

        let hovered = glyph_style(false, true, false);
        assert!(hovered.show_label);
        assert!(hovered.glow > idle.glow);

        assert!(!glyph_style(false, true, true).show_label);

        let selected = glyph_style(true, false, true);
        assert_eq!(selected.color, MARKER_SELECTED_COLOR);
        assert_eq!(selected.scale, 1.5);
        assert!(selected.show_label);
    }

    #[test]
    fn test_projected_parts_are_back_to_front() {
        let camera = OrbitCamera::default();
        let parts = project_body(&camera, viewport(), &BodyModel::stylized(Gender::Female));
        assert_eq!(parts.len(), 8);
        assert!(parts.windows(2).all(|w| w[0].depth >= w[1].depth));
        assert!(parts.last().unwrap().name.starts_with("female_bust"));
    }
}
