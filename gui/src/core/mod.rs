pub mod course_map;
pub mod gui;
