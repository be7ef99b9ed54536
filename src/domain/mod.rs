// Domain layer: API records, lead payloads and ports. No HTTP or CLI code here.

pub mod lead;
pub mod model;
pub mod normalize;
pub mod ports;
