pub mod session_result;
pub mod win_counter;
