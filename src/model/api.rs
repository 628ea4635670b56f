use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Authenticated Discord user as stored in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUserDto {
    pub id: u64,
    pub name: String,
}
