mod garden_centre_handler;

pub use garden_centre_handler::*;
