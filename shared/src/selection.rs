//! Map interaction controller.
//!
//! Owns the UI-local selection state and turns widget events into state
//! changes plus optional camera commands. The controller never talks to the
//! map widget itself; callers hand [`CameraCommand`]s to a [`CameraSink`].

use crate::dataset::Dataset;
use crate::province::{LngLat, ProvinceId, ProvinceRecord};

pub const DEFAULT_CENTER: LngLat = LngLat::new(45.0792, 23.8859);
pub const DEFAULT_ZOOM: f64 = 4.5;
pub const SELECTED_ZOOM: f64 = 7.0;
pub const FLY_DURATION_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Camera {
    pub const OVERVIEW: Camera = Camera {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
        pitch: 0.0,
        bearing: 0.0,
    };
}

impl Default for Camera {
    fn default() -> Self {
        Self::OVERVIEW
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub u64);

/// Animated camera transition handed to the map widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraCommand {
    pub id: CommandId,
    pub target: Camera,
    pub duration_ms: u32,
}

/// Adapter over the map widget's camera.
pub trait CameraSink {
    fn fly_to(&mut self, command: &CameraCommand);

    /// Stop an in-flight transition. Widgets without cancellation ignore it.
    fn cancel(&mut self, _id: CommandId) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    MarkerClicked(ProvinceId),
    BackgroundClicked,
    HoverEntered(ProvinceId),
    HoverLeft(ProvinceId),
    PopupClosed,
    ViewportMoved(Camera),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    ProvinceSelected(ProvinceId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionState {
    pub selected: Option<ProvinceId>,
    pub hovered: Option<ProvinceId>,
    pub popup: Option<ProvinceId>,
    pub viewport: Camera,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: None,
            hovered: None,
            popup: None,
            viewport: Camera::OVERVIEW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Unchanged,
    Changed(Option<ProvinceId>),
}

/// What the view has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub camera: Option<CameraCommand>,
    pub selection: SelectionChange,
}

impl Outcome {
    fn quiet() -> Self {
        Self {
            camera: None,
            selection: SelectionChange::Unchanged,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    dataset: Dataset,
    state: SelectionState,
    next_command: u64,
}

impl InteractionController {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            state: SelectionState::default(),
            next_command: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        match self.selected_province() {
            Some(province) => InteractionMode::ProvinceSelected(province.id),
            None => InteractionMode::Idle,
        }
    }

    /// Selected province, or `None` if nothing is selected or the id is stale.
    pub fn selected_province(&self) -> Option<&'static ProvinceRecord> {
        self.state.selected.and_then(|id| self.dataset.province(id))
    }

    pub fn popup_province(&self) -> Option<&'static ProvinceRecord> {
        self.state.popup.and_then(|id| self.dataset.province(id))
    }

    pub fn is_hovered(&self, id: ProvinceId) -> bool {
        self.state.hovered == Some(id)
    }

    pub fn is_selected(&self, id: ProvinceId) -> bool {
        self.state.selected == Some(id)
    }

    pub fn handle(&mut self, event: MapEvent) -> Outcome {
        match event {
            MapEvent::MarkerClicked(id) => match self.dataset.province(id) {
                Some(province) => self.select(province),
                None => self.reset(true),
            },
            MapEvent::BackgroundClicked => self.reset(true),
            MapEvent::PopupClosed => self.reset(false),
            MapEvent::HoverEntered(id) => {
                self.state.hovered = Some(id);
                Outcome::quiet()
            }
            MapEvent::HoverLeft(id) => {
                if self.state.hovered == Some(id) {
                    self.state.hovered = None;
                }
                Outcome::quiet()
            }
            MapEvent::ViewportMoved(camera) => {
                self.state.viewport = camera;
                Outcome::quiet()
            }
        }
    }

    fn select(&mut self, province: &ProvinceRecord) -> Outcome {
        let previous = self.state.selected;
        self.state.selected = Some(province.id);
        self.state.popup = Some(province.id);
        let target = Camera {
            center: province.center,
            zoom: SELECTED_ZOOM,
            ..self.state.viewport
        };
        Outcome {
            camera: Some(self.command(target)),
            selection: changed(previous, self.state.selected),
        }
    }

    fn reset(&mut self, fly_home: bool) -> Outcome {
        let previous = self.state.selected;
        self.state.selected = None;
        self.state.popup = None;
        let camera = fly_home.then(|| self.command(Camera::OVERVIEW));
        Outcome {
            camera,
            selection: changed(previous, None),
        }
    }

    fn command(&mut self, target: Camera) -> CameraCommand {
        self.next_command += 1;
        self.state.viewport = target;
        CameraCommand {
            id: CommandId(self.next_command),
            target,
            duration_ms: FLY_DURATION_MS,
        }
    }
}

fn changed(previous: Option<ProvinceId>, next: Option<ProvinceId>) -> SelectionChange {
    if previous == next {
        SelectionChange::Unchanged
    } else {
        SelectionChange::Changed(next)
    }
}
