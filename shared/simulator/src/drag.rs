use crate::angle::{self, distance, normalize_angle};
use crate::layout::{clamp_speed, clamp_zoom, VectorLayout, Viewport, DRAG_HANDLE_RADIUS};
use crate::wind::WindState;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Moves shorter than this from the drag start are treated as click jitter.
pub const MIN_DRAG_DISTANCE: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragType {
    TrueWind,
    InducedWind,
    Boat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    TrueWind {
        start: Point2<f64>,
    },
    InducedWind {
        start: Point2<f64>,
        start_boat_direction: f64,
        start_boat_speed: f64,
    },
    Boat {
        start: Point2<f64>,
        start_offset: Vector2<f64>,
    },
}

impl DragState {
    pub fn drag_type(&self) -> Option<DragType> {
        match self {
            DragState::Idle => None,
            DragState::TrueWind { .. } => Some(DragType::TrueWind),
            DragState::InducedWind { .. } => Some(DragType::InducedWind),
            DragState::Boat { .. } => Some(DragType::Boat),
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    fn start(&self) -> Option<Point2<f64>> {
        match *self {
            DragState::Idle => None,
            DragState::TrueWind { start }
            | DragState::InducedWind { start, .. }
            | DragState::Boat { start, .. } => Some(start),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PinchState {
    initial_distance: f64,
    initial_zoom: f64,
    last_midpoint: Point2<f64>,
}

/// Top-left corner of the drawing surface in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
}

impl SurfaceRect {
    fn to_local(self, client_x: f64, client_y: f64) -> Point2<f64> {
        Point2::new(client_x - self.left, client_y - self.top)
    }
}

/// What the host needs to pick a cursor and highlight arrows.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct DragFeedback {
    pub is_dragging: bool,
    pub drag_type: Option<DragType>,
    pub is_hovering_handle: bool,
    pub is_pinching: bool,
}

#[derive(Clone, Debug)]
pub struct DragController {
    surface: Option<SurfaceRect>,
    state: DragState,
    pinch: Option<PinchState>,
    hovering_handle: bool,
    handles_locked: bool,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(Some(SurfaceRect::default()))
    }
}

fn hits(pointer: &Point2<f64>, handle: &Point2<f64>) -> bool {
    distance(pointer.x, pointer.y, handle.x, handle.y) < DRAG_HANDLE_RADIUS
}

impl DragController {
    pub fn new(surface: Option<SurfaceRect>) -> Self {
        Self {
            surface,
            state: DragState::Idle,
            pinch: None,
            hovering_handle: false,
            handles_locked: false,
        }
    }

    pub fn set_surface(&mut self, surface: Option<SurfaceRect>) {
        self.surface = surface;
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// While locked, pointer-down never grabs a wind handle and falls through
    /// to panning the boat.
    pub fn set_handles_locked(&mut self, locked: bool) {
        self.handles_locked = locked;
        if locked {
            self.hovering_handle = false;
        }
    }

    pub fn feedback(&self) -> DragFeedback {
        DragFeedback {
            is_dragging: self.state.is_dragging(),
            drag_type: self.state.drag_type(),
            is_hovering_handle: self.hovering_handle,
            is_pinching: self.pinch.is_some(),
        }
    }

    /// Picks the handle under the pointer. Returns false if there is no
    /// surface to interact with.
    pub fn on_pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        wind: &WindState,
        viewport: &Viewport,
    ) -> bool {
        let Some(surface) = self.surface else {
            return false;
        };
        let pointer = surface.to_local(client_x, client_y);
        let layout = VectorLayout::compute(viewport, wind);

        self.state = if !self.handles_locked && hits(&pointer, &layout.true_wind_tail) {
            DragState::TrueWind { start: pointer }
        } else if !self.handles_locked && hits(&pointer, &layout.induced_start) {
            DragState::InducedWind {
                start: pointer,
                start_boat_direction: wind.boat_direction,
                start_boat_speed: wind.boat_speed,
            }
        } else {
            DragState::Boat {
                start: pointer,
                start_offset: viewport.boat_offset(),
            }
        };
        log::debug!("drag start {:?}", self.state.drag_type());
        true
    }

    pub fn on_pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        wind: &mut WindState,
        viewport: &mut Viewport,
    ) -> DragFeedback {
        let Some(surface) = self.surface else {
            return self.feedback();
        };
        let pointer = surface.to_local(client_x, client_y);

        let Some(start) = self.state.start() else {
            let layout = VectorLayout::compute(viewport, wind);
            self.hovering_handle = !self.handles_locked
                && (hits(&pointer, &layout.true_wind_tail) || hits(&pointer, &layout.induced_start));
            return self.feedback();
        };

        if distance(pointer.x, pointer.y, start.x, start.y) < MIN_DRAG_DISTANCE {
            return self.feedback();
        }

        let scale = viewport.scale();
        match self.state {
            DragState::Idle => {}
            DragState::TrueWind { .. } => {
                let layout = VectorLayout::compute(viewport, wind);
                let polar = angle::vector_to_polar(&(layout.induced_start - pointer));
                wind.true_wind_speed = clamp_speed(polar.speed / scale);
                wind.true_wind_angle = polar.angle;
            }
            DragState::InducedWind {
                start_boat_direction,
                ..
            } => {
                let boat_front = viewport.boat_front_for(start_boat_direction);
                let arrow = angle::vector_to_polar(&(boat_front - pointer));
                // The arrow points against the direction of travel.
                wind.boat_speed = clamp_speed(arrow.speed / scale);
                wind.boat_direction = normalize_angle(arrow.angle + 180.0);
            }
            DragState::Boat { start_offset, .. } => {
                viewport.set_boat_offset(start_offset + (pointer - start));
            }
        }
        self.feedback()
    }

    pub fn on_pointer_up(&mut self) -> DragFeedback {
        if self.state.is_dragging() {
            log::debug!("drag end {:?}", self.state.drag_type());
        }
        self.state = DragState::Idle;
        self.feedback()
    }

    pub fn on_pointer_leave(&mut self) -> DragFeedback {
        self.on_pointer_up();
        self.hovering_handle = false;
        self.feedback()
    }

    /// Ends any gesture without touching wind state.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
        self.pinch = None;
    }

    /// Returns true when the host should suppress default touch handling.
    pub fn on_touch_start(
        &mut self,
        touches: &[Point2<f64>],
        wind: &WindState,
        viewport: &Viewport,
    ) -> bool {
        let Some(surface) = self.surface else {
            return false;
        };
        match touches {
            [a, b] => {
                let a = surface.to_local(a.x, a.y);
                let b = surface.to_local(b.x, b.y);
                self.pinch = Some(PinchState {
                    initial_distance: distance(a.x, a.y, b.x, b.y),
                    initial_zoom: viewport.zoom(),
                    last_midpoint: nalgebra::center(&a, &b),
                });
                self.state = DragState::Idle;
                true
            }
            [t] => self.on_pointer_down(t.x, t.y, wind, viewport),
            _ => false,
        }
    }

    pub fn on_touch_move(
        &mut self,
        touches: &[Point2<f64>],
        wind: &mut WindState,
        viewport: &mut Viewport,
    ) -> DragFeedback {
        let Some(surface) = self.surface else {
            return self.feedback();
        };
        match touches {
            [a, b] => {
                if let Some(pinch) = self.pinch.as_mut() {
                    let a = surface.to_local(a.x, a.y);
                    let b = surface.to_local(b.x, b.y);
                    let current_distance = distance(a.x, a.y, b.x, b.y);
                    if pinch.initial_distance > 0.0 {
                        viewport.set_zoom(clamp_zoom(
                            pinch.initial_zoom * current_distance / pinch.initial_distance,
                        ));
                    }
                    let midpoint = nalgebra::center(&a, &b);
                    viewport.pan(midpoint - pinch.last_midpoint);
                    pinch.last_midpoint = midpoint;
                }
                self.feedback()
            }
            [t] if self.state.is_dragging() => self.on_pointer_move(t.x, t.y, wind, viewport),
            _ => self.feedback(),
        }
    }

    /// `remaining` is the number of touches still on the surface.
    pub fn on_touch_end(&mut self, remaining: usize) -> DragFeedback {
        if self.pinch.is_some() && remaining < 2 {
            self.pinch = None;
        }
        if remaining == 0 {
            return self.on_pointer_up();
        }
        self.feedback()
    }
}
