use sqlx::FromRow;

use crate::shared::region::Region;

/// Database model for garden centre
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GardenCentre {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    #[sqlx(try_from = "String")]
    pub region: Region,
}

/// Garden centre joined with the name of its location
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GardenCentreDetail {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    #[sqlx(try_from = "String")]
    pub region: Region,
    pub location_name: String,
}

/// Data for creating a garden centre
#[derive(Debug, Clone)]
pub struct CreateGardenCentre {
    pub name: String,
    pub location_id: i64,
    pub region: Region,
}
