// Domain layer: view-model records and ports. No HTTP or file system here.

pub mod model;
pub mod ports;
