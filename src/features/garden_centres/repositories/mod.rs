mod garden_centre_repository;

pub use garden_centre_repository::GardenCentreRepository;
