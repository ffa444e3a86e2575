use crate::angle::Polar;
use crate::drag::DragFeedback;
use crate::layout::VectorLayout;
use crate::simulation::SimulationProgress;
use crate::wind::{NoSailZone, WindState};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw one frame.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub wind: WindState,
    pub apparent: Polar,
    pub apparent_to_induced_angle: f64,
    pub no_sail_zone: NoSailZone,
    pub layout: VectorLayout,
    pub zoom: f64,
    pub drag: DragFeedback,
    pub progress: SimulationProgress,
}
