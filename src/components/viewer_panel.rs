//! 3D body viewport.
//!
//! The body primitives are projected through the orbit camera and drawn as SVG, back to
//! front. Pointer events land on the host div (the SVG ignores them) so element
//! coordinates are viewport pixels.

use std::rc::Rc;
use std::time::{Duration, Instant};

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use glam::Vec2;
use uuid::Uuid;

use crate::constants::*;
use crate::core::body::BodyModel;
use crate::core::camera::{OrbitCamera, Viewport};
use crate::core::frame_counter::FrameCounter;
use crate::core::scene::{
    glyph_style, project_body, PointerGesture, PointerTracker, ProjectedShape, SceneAdapter,
};
use crate::state::{Marker, SceneIntent};

fn pointer_pos(e: &MouseEvent) -> Vec2 {
    let point = e.element_coordinates();
    Vec2::new(point.x as f32, point.y as f32)
}

/// Only the primary button orbits, selects and places markers.
fn is_primary(button: Option<MouseButton>) -> bool {
    button == Some(MouseButton::Primary)
}

#[component]
pub fn ViewerPanel(
    body: BodyModel,
    markers: Vec<Marker>,
    selected: Option<Uuid>,
    modal_open: bool,
    on_intent: EventHandler<SceneIntent>,
    on_fps: EventHandler<f64>,
) -> Element {
    let mut camera = use_signal(OrbitCamera::default);
    let mut viewport = use_signal(|| None::<Viewport>);
    let mut tracker = use_signal(PointerTracker::default);
    let mut hovered = use_signal(|| None::<Uuid>);

    use_future(move || async move {
        loop {
            let mut eval = document::eval(VIEWPORT_SIZE_SCRIPT);
            while let Ok(size) = eval.recv::<Viewport>().await {
                if size.width >= 1.0 && size.height >= 1.0 && viewport() != Some(size) {
                    viewport.set(Some(size));
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    use_future(move || async move {
        let mut counter = FrameCounter::default();
        loop {
            let mut eval = document::eval(FRAME_TICK_SCRIPT);
            while eval.recv::<u8>().await.is_ok() {
                if let Some(fps) = counter.tick(Instant::now()) {
                    on_fps.call(fps);
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    let body = Rc::new(body);
    let markers = Rc::new(markers);

    let scene_body = body.clone();
    let scene_markers = markers.clone();
    let with_adapter = move |f: &mut dyn FnMut(&SceneAdapter)| {
        let Some(viewport) = viewport() else {
            return;
        };
        let camera = camera();
        let adapter = SceneAdapter {
            camera: &camera,
            viewport,
            surface: scene_body.as_ref(),
            markers: scene_markers.as_slice(),
        };
        f(&adapter);
    };
    let with_adapter = Rc::new(with_adapter);

    let on_mousemove = {
        let with_adapter = with_adapter.clone();
        move |e: MouseEvent| {
            let pos = pointer_pos(&e);
            if let Some(delta) = tracker.write().move_to(pos) {
                camera.write().orbit(delta.x, delta.y);
                return;
            }
            let mut next = None;
            with_adapter(&mut |adapter: &SceneAdapter| next = adapter.glyph_at(pos));
            if hovered() != next {
                hovered.set(next);
            }
        }
    };

    let on_mouseup = {
        let with_adapter = with_adapter.clone();
        move |e: MouseEvent| {
            if !is_primary(e.trigger_button()) {
                return;
            }
            let pos = pointer_pos(&e);
            if tracker.write().release(pos) != Some(PointerGesture::Click) {
                return;
            }
            let mut intent = None;
            with_adapter(&mut |adapter: &SceneAdapter| intent = adapter.on_click(pos));
            if let Some(intent) = intent {
                on_intent.call(intent);
            }
        }
    };

    let on_doubleclick = {
        let with_adapter = with_adapter.clone();
        move |e: MouseEvent| {
            if !is_primary(e.trigger_button()) || !tracker.read().last_was_click() {
                return;
            }
            let pos = pointer_pos(&e);
            let mut intent = None;
            with_adapter(&mut |adapter: &SceneAdapter| intent = adapter.on_double_click(pos));
            if let Some(intent) = intent {
                on_intent.call(intent);
            }
        }
    };

    let frame = viewport().map(|size| {
        let camera = camera();
        let parts = project_body(&camera, size, &body);
        let adapter = SceneAdapter {
            camera: &camera,
            viewport: size,
            surface: body.as_ref(),
            markers: markers.as_slice(),
        };
        (size, parts, adapter.visible_glyphs())
    });
    let cursor = if tracker.read().is_pressed() {
        "grabbing"
    } else if hovered().is_some() && !modal_open {
        "pointer"
    } else {
        "grab"
    };

    rsx! {
        div {
            id: VIEWPORT_HOST_ID,
            style: "
                position: relative; flex: 1; overflow: hidden; user-select: none;
                background: linear-gradient(180deg, {VIEWPORT_BG_TOP} 0%, {VIEWPORT_BG_BOTTOM} 100%);
                cursor: {cursor};
            ",
            onmousedown: move |e: MouseEvent| {
                if is_primary(e.trigger_button()) {
                    tracker.write().press(pointer_pos(&e));
                }
            },
            onmousemove: on_mousemove,
            onmouseup: on_mouseup,
            ondoubleclick: on_doubleclick,
            onmouseleave: move |_| {
                tracker.write().cancel();
                hovered.set(None);
            },
            onwheel: move |e: WheelEvent| {
                e.prevent_default();
                let delta = e.delta().strip_units().y as f32;
                camera.write().zoom(delta);
            },

            if let Some((size, parts, glyphs)) = frame {
                svg {
                    width: "{size.width}",
                    height: "{size.height}",
                    style: "position: absolute; top: 0; left: 0; pointer-events: none;",
                    for (i, part) in parts.into_iter().enumerate() {
                        {match part.shape {
                            ProjectedShape::Circle { center, radius } => rsx! {
                                circle {
                                    key: "part-{i}",
                                    cx: "{center.x}",
                                    cy: "{center.y}",
                                    r: "{radius}",
                                    fill: BODY_FILL,
                                    stroke: BODY_SHADE,
                                    stroke_width: "1.5",
                                }
                            },
                            ProjectedShape::Stroke { from, to, width } => rsx! {
                                g {
                                    key: "part-{i}",
                                    line {
                                        x1: "{from.x}", y1: "{from.y}", x2: "{to.x}", y2: "{to.y}",
                                        stroke: BODY_SHADE,
                                        stroke_width: "{width + 3.0}",
                                        stroke_linecap: "round",
                                    }
                                    line {
                                        x1: "{from.x}", y1: "{from.y}", x2: "{to.x}", y2: "{to.y}",
                                        stroke: BODY_FILL,
                                        stroke_width: "{width}",
                                        stroke_linecap: "round",
                                    }
                                }
                            },
                        }}
                    }
                    for glyph in glyphs {
                        {
                            let style = glyph_style(
                                selected == Some(glyph.id),
                                hovered() == Some(glyph.id),
                                modal_open,
                            );
                            let radius = (glyph.radius * style.scale).max(4.0);
                            let blur = style.glow * 3.0;
                            let label_y = glyph.center.y - radius - 8.0;
                            rsx! {
                                g {
                                    key: "{glyph.id}",
                                    circle {
                                        cx: "{glyph.center.x}",
                                        cy: "{glyph.center.y}",
                                        r: "{radius}",
                                        fill: style.color,
                                        stroke: "white",
                                        stroke_width: "1",
                                        style: "filter: drop-shadow(0 0 {blur}px {style.color});",
                                    }
                                    if style.show_label {
                                        text {
                                            x: "{glyph.center.x}",
                                            y: "{label_y}",
                                            text_anchor: "middle",
                                            fill: TEXT_PRIMARY,
                                            font_size: "12",
                                            style: "paint-order: stroke; stroke: rgba(0,0,0,0.7); stroke-width: 3px;",
                                            "{glyph.title}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if markers.is_empty() && !modal_open {
                div {
                    style: "
                        position: absolute; bottom: 16px; left: 50%; transform: translateX(-50%);
                        padding: 6px 12px; border-radius: 999px; background: rgba(0,0,0,0.5);
                        font-size: 12px; color: {TEXT_SECONDARY}; pointer-events: none;
                    ",
                    "Double-click the body to place a marker"
                }
            }
        }
    }
}
