// Domain layer: event model and the backup service port.

pub mod model;
pub mod ports;
