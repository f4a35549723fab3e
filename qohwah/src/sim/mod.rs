pub mod sim_host;
pub mod sim_menu;
