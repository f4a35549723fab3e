pub mod qohwah_interface;
