mod garden_centre_dto;

pub use garden_centre_dto::*;
