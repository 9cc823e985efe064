mod garden_centre;

pub use garden_centre::{CreateGardenCentre, GardenCentre, GardenCentreDetail};
