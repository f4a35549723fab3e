use crate::core::course_map::CourseMap;
use crate::interfaces::qohwah_interface::QohwahInterface;
use eframe::{egui, epi};
use flume::Receiver;
use helpers::buffer::RingBuffer;
use qohwah::core::race_catalog::RaceDef;
use qohwah::interfaces::gui_interface::{DrawCmd, HudFrame, MapState, RgbaColor, TextLabel};
use std::fmt::Write;
use std::time::Instant;

// inset map in normalized screen coordinates (right bottom corner)
const MAP_MIN: [f32; 2] = [0.74, 0.62];
const MAP_MAX: [f32; 2] = [0.98, 0.98];
const MAP_PADDING: f64 = 20.0;

// (px) text outline
const OUTLINE_OFFSETS: [[f32; 2]; 4] = [[-1.0, 0.0], [1.0, 0.0], [0.0, -1.0], [0.0, 1.0]];

#[derive(Debug)]
pub struct HudPlot {
    pub qohwah_interface: QohwahInterface,
    pub course_map: Option<CourseMap>,
    pub prev_update: Instant,
    pub prev_update_durations: RingBuffer<u32>,
}

impl HudPlot {
    pub fn new(rx: Receiver<HudFrame>, race: Option<&RaceDef>) -> HudPlot {
        HudPlot {
            qohwah_interface: QohwahInterface::new(rx),
            course_map: race.map(CourseMap::new),
            prev_update: Instant::now(),
            prev_update_durations: RingBuffer::new(10),
        }
    }

    pub fn set_ui_content(&mut self, ui: &mut egui::Ui) -> egui::Response {
        // PREPARATIONS ----------------------------------------------------------------------------
        // get UI handles
        let (response, painter) =
            ui.allocate_painter(ui.available_size_before_wrap_finite(), egui::Sense::hover());

        // get transformation from normalized screen coordinates to pixels in the window
        let to_screen = egui::emath::RectTransform::from_to(
            egui::emath::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            response.rect,
        );

        // create vector for drawn shapes
        let mut shapes = vec![];
        let hud_frame = &self.qohwah_interface.hud_frame;

        // HUD DRAWING -----------------------------------------------------------------------------
        for draw_cmd in hud_frame.draw_cmds.iter() {
            match draw_cmd {
                DrawCmd::Rect { rect, color } => {
                    let tmp_rect = egui::Rect::from_center_size(
                        egui::pos2(rect.x as f32, rect.y as f32),
                        egui::vec2(rect.width as f32, rect.height as f32),
                    );
                    shapes.push(egui::Shape::rect_filled(
                        to_screen.transform_rect(tmp_rect),
                        0.0,
                        to_color32(color),
                    ));
                }
                DrawCmd::Text(label) => push_text(&mut shapes, ui, &to_screen, label),
                // markers live in the world, they are shown in the map
                DrawCmd::Marker { .. } => {}
            }
        }

        // subtitle at the bottom of the screen
        if let Some(subtitle) = &hud_frame.subtitle {
            shapes.push(egui::Shape::text(
                ui.fonts(),
                to_screen * egui::pos2(0.5, 0.85),
                egui::Align2::CENTER_CENTER,
                subtitle,
                egui::TextStyle::Heading,
                egui::Color32::WHITE,
            ));
        }

        // MENU DRAWING ----------------------------------------------------------------------------
        if let Some(items) = &hud_frame.menu {
            let mut menu_text = String::from("Qohwah - Race System\n");

            for (i, item) in items.iter().enumerate() {
                writeln!(&mut menu_text, "{:2}  {}", i, item).unwrap();
            }

            let menu_pos = to_screen * egui::pos2(0.02, 0.25);
            let galley_rect = egui::Rect::from_min_size(
                menu_pos,
                egui::vec2(
                    0.22 * response.rect.width(),
                    (items.len() + 2) as f32 * 18.0,
                ),
            );

            shapes.push(egui::Shape::rect_filled(
                galley_rect.expand(6.0),
                4.0,
                egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            ));
            shapes.push(egui::Shape::text(
                ui.fonts(),
                menu_pos,
                egui::Align2::LEFT_TOP,
                &menu_text,
                egui::TextStyle::Monospace,
                egui::Color32::WHITE,
            ));
        }

        // MAP DRAWING -----------------------------------------------------------------------------
        if let Some(course_map) = &self.course_map {
            push_map(&mut shapes, ui, &to_screen, course_map, &hud_frame.map);
        }

        // UPDATE GENERAL INFORMATION TEXT IN GUI --------------------------------------------------
        let mut gen_info_text = format!("Frame: {}\n", hud_frame.frame_idx);

        if !self.qohwah_interface.is_connected() {
            writeln!(&mut gen_info_text, "Session finished").unwrap();
        }

        // calculate current UI update duration, append it to the buffer, and set update time
        self.prev_update_durations
            .push(self.prev_update.elapsed().as_millis() as u32);
        self.prev_update = Instant::now();

        // add update frequency
        if let Some(avg_duration) = self.prev_update_durations.get_avg() {
            if avg_duration > 0.0 {
                write!(
                    &mut gen_info_text,
                    "GUI update frequency: {:.0} Hz",
                    1000.0 / avg_duration
                )
                .unwrap();
            }
        }

        // show general informations text in the GUI
        shapes.push(egui::Shape::text(
            ui.fonts(),
            to_screen * egui::pos2(0.01, 0.01),
            egui::Align2::LEFT_TOP,
            &gen_info_text,
            egui::TextStyle::Small,
            egui::Color32::GRAY,
        ));

        // DRAWING ---------------------------------------------------------------------------------
        // update shapes in UI painter and return response
        painter.extend(shapes);
        response
    }
}

fn to_color32(color: &RgbaColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// push_text adds a HUD text label, including a black outline if requested.
fn push_text(
    shapes: &mut Vec<egui::Shape>,
    ui: &egui::Ui,
    to_screen: &egui::emath::RectTransform,
    label: &TextLabel,
) {
    let pos = *to_screen * egui::pos2(label.x as f32, label.y as f32);
    let anchor = if label.centre {
        egui::Align2::CENTER_TOP
    } else {
        egui::Align2::LEFT_TOP
    };
    let text_style = if label.scale > 1.1 {
        egui::TextStyle::Heading
    } else if label.scale < 0.6 {
        egui::TextStyle::Small
    } else {
        egui::TextStyle::Body
    };

    if label.outline {
        for &[dx, dy] in OUTLINE_OFFSETS.iter() {
            shapes.push(egui::Shape::text(
                ui.fonts(),
                pos + egui::vec2(dx, dy),
                anchor,
                &label.text,
                text_style,
                egui::Color32::BLACK,
            ));
        }
    }

    shapes.push(egui::Shape::text(
        ui.fonts(),
        pos,
        anchor,
        &label.text,
        text_style,
        to_color32(&label.color),
    ));
}

/// push_map adds the top-down inset map: course line, start, beacons, finish markers, vehicles
/// and the player with its heading.
fn push_map(
    shapes: &mut Vec<egui::Shape>,
    ui: &egui::Ui,
    to_screen: &egui::emath::RectTransform,
    course_map: &CourseMap,
    map: &MapState,
) {
    let map_rect = to_screen.transform_rect(egui::Rect::from_min_max(
        egui::pos2(MAP_MIN[0], MAP_MIN[1]),
        egui::pos2(MAP_MAX[0], MAP_MAX[1]),
    ));

    // get transformation from x/y to pixels in the inset (y axis must be inverted)
    let [x_min, x_max, y_min, y_max] = course_map.get_axes_expansion(MAP_PADDING);
    let to_map = egui::emath::RectTransform::from_to(
        egui::emath::Rect::from_min_max(
            egui::pos2(x_min as f32, y_max as f32),
            egui::pos2(x_max as f32, y_min as f32),
        ),
        map_rect,
    );
    let map_pos = |x: f64, y: f64| to_map * egui::pos2(x as f32, y as f32);

    shapes.push(egui::Shape::rect_filled(
        map_rect,
        2.0,
        egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220),
    ));

    // course
    shapes.push(egui::Shape::line_segment(
        [
            map_pos(course_map.start.x, course_map.start.y),
            map_pos(course_map.finish.x, course_map.finish.y),
        ],
        egui::Stroke::new(2.0, egui::Color32::from_gray(120)),
    ));
    shapes.push(egui::Shape::circle_filled(
        map_pos(course_map.start.x, course_map.start.y),
        4.0,
        egui::Color32::from_rgb(0, 200, 0),
    ));
    shapes.push(egui::Shape::text(
        ui.fonts(),
        map_rect.left_top() + egui::vec2(4.0, 4.0),
        egui::Align2::LEFT_TOP,
        &course_map.name,
        egui::TextStyle::Small,
        egui::Color32::WHITE,
    ));

    // entities
    for beacon in map.beacons.iter() {
        shapes.push(egui::Shape::circle_stroke(
            map_pos(beacon.x, beacon.y),
            7.0,
            egui::Stroke::new(2.0, egui::Color32::from_rgb(93, 182, 229)),
        ));
    }

    for marker in map.markers.iter() {
        shapes.push(egui::Shape::circle_filled(
            map_pos(marker.x, marker.y),
            4.0,
            egui::Color32::from_rgb(0, 0, 255),
        ));
    }

    for vehicle in map.vehicles.iter() {
        shapes.push(egui::Shape::rect_filled(
            egui::Rect::from_center_size(map_pos(vehicle.x, vehicle.y), egui::vec2(6.0, 6.0)),
            1.0,
            egui::Color32::from_rgb(255, 165, 0),
        ));
    }

    // player with heading (0 deg = +y, counter-clockwise)
    let player_pos = map_pos(map.player.x, map.player.y);
    let heading = map.player_heading.to_radians();
    let heading_dir = egui::vec2(-heading.sin() as f32, -heading.cos() as f32);

    shapes.push(egui::Shape::line_segment(
        [player_pos, player_pos + heading_dir * 10.0],
        egui::Stroke::new(2.0, egui::Color32::WHITE),
    ));
    shapes.push(egui::Shape::circle_filled(player_pos, 3.0, egui::Color32::WHITE));
}

impl epi::App for HudPlot {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::CtxRef, _frame: &mut epi::Frame) {
        // update qohwah interface
        self.qohwah_interface.update();

        // update UI content
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                self.set_ui_content(ui);
            });
        });

        // request repaint of the UI
        ctx.request_repaint();
    }

    fn name(&self) -> &str {
        "Qohwah HUD"
    }
}
