//! Dog record type.

use serde::{Deserialize, Serialize};

use super::DogId;

/// A dog as returned by the batch lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    /// Unique identifier.
    pub id: DogId,
    /// Image URI.
    pub img: String,
    /// Name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Postal code of the shelter.
    pub zip_code: String,
    /// Breed name.
    pub breed: String,
}
