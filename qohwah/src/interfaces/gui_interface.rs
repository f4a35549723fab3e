use helpers::geometry::Point3d;

pub const MAX_GUI_UPDATE_FREQUENCY: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> RgbaColor {
        RgbaColor { r, g, b, a }
    }
    pub const fn opaque(r: u8, g: u8, b: u8) -> RgbaColor {
        RgbaColor { r, g, b, a: 255 }
    }
}

/// ScreenRect is a rectangle in normalized screen coordinates ([0, 1] on both axes, origin top
/// left). As for the host's rectangle primitive, x and y denote the rectangle's center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// TextLabel contains a text and all parameters the host needs to draw it. x and y are normalized
/// screen coordinates, `wrap` limits the text horizontally to [left, right].
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub color: RgbaColor,
    pub font: u8,
    pub centre: bool,
    pub outline: bool,
    pub wrap: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect { rect: ScreenRect, color: RgbaColor },
    Text(TextLabel),
    Marker { at: Point3d, scale: f64, color: RgbaColor },
}

/// MapState is a top-down snapshot of the relevant world entities of a frame.
#[derive(Debug, Clone, Default)]
pub struct MapState {
    pub player: Point3d,
    pub player_heading: f64,
    pub vehicles: Vec<Point3d>,
    pub beacons: Vec<Point3d>,
    pub markers: Vec<Point3d>,
}

/// HudFrame is everything that was put on screen during one frame. It is sent from the session
/// runner to the viewer.
#[derive(Debug, Clone, Default)]
pub struct HudFrame {
    pub frame_idx: u32,
    pub draw_cmds: Vec<DrawCmd>,
    pub subtitle: Option<String>,
    pub menu: Option<Vec<String>>,
    pub map: MapState,
}
