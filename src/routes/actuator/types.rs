use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::readings::LedState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActuatorRequest {
    /// New command bit, 0 or 1
    #[serde(alias = "LED_Status", alias = "ledCommand")]
    #[schema(example = 1)]
    pub led_status: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LedStatusResponse {
    #[schema(value_type = i16, example = 1)]
    pub led_status: LedState,
}
