//! Zoom and pan state kept independently of the rendered steps.

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Factor applied by one zoom-in or zoom-out command.
pub const ZOOM_STEP: f64 = 1.2;
/// Margin added around the content on each axis when fitting.
pub const FIT_PADDING: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle in diagram coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    origin: Point,
    pan_start: Point,
}

/// Current zoom factor and pan offset. Zoom stays within
/// [`MIN_ZOOM`]..=[`MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    drag: Option<Drag>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            drag: None,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn zoom_in(&mut self) {
        self.scale_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.scale_by(1.0 / ZOOM_STEP);
    }

    /// Wheel zoom: scrolling down (`delta_y > 0`) zooms out by 10%,
    /// anything else zooms in by 10%.
    pub fn wheel(&mut self, delta_y: f64) {
        self.scale_by(if delta_y > 0.0 { 0.9 } else { 1.1 });
    }

    /// Pinch gesture with the given scale ratio.
    pub fn pinch(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale_by(scale);
        }
    }

    fn scale_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn begin_drag(&mut self, at: Point) {
        self.drag = Some(Drag {
            origin: at,
            pan_start: self.pan,
        });
    }

    /// Pans by the screen distance from the drag origin, divided by zoom.
    /// Ignored when no drag is in progress.
    pub fn drag_to(&mut self, at: Point) {
        if let Some(drag) = self.drag {
            self.pan = Point {
                x: drag.pan_start.x + (at.x - drag.origin.x) / self.zoom,
                y: drag.pan_start.y + (at.y - drag.origin.y) / self.zoom,
            };
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scales `content` to fit in `container` without ever zooming past 1×,
    /// and recenters.
    pub fn fit_to_screen(&mut self, container: Size, content: Size) {
        let scale_x = container.width / (content.width + FIT_PADDING);
        let scale_y = container.height / (content.height + FIT_PADDING);
        let scale = scale_x.min(scale_y).min(1.0);
        if scale.is_finite() {
            self.zoom = scale.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self.pan = Point::default();
    }

    /// Visible window over `content` at the current zoom and pan.
    pub fn view_box(&self, content: Bounds) -> Bounds {
        let half_pad = FIT_PADDING / 2.0;
        let scale = 1.0 / self.zoom;
        Bounds {
            x: (content.x - half_pad) - self.pan.x * scale,
            y: (content.y - half_pad) - self.pan.y * scale,
            width: (content.width + FIT_PADDING) * scale,
            height: (content.height + FIT_PADDING) * scale,
        }
    }
}
