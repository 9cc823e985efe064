use sqlx::FromRow;

use crate::shared::region::Region;

/// Database model for location
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub region: Region,
}

/// Data for creating or replacing a location
#[derive(Debug, Clone)]
pub struct LocationInput {
    pub name: String,
    pub region: Region,
}
