mod handlers;
mod types;

pub use handlers::{get_led_status, update_led_status};
pub use types::{ActuatorRequest, LedStatusResponse};

pub use handlers::{__path_get_led_status, __path_update_led_status};
