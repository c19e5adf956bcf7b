// Domain layer: the draft model and the ports the adapters and host implement.

pub mod model;
pub mod ports;
