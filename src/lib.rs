//! Interactive scale notation: a rotating note wheel selecting the tonic of a major or minor scale, rendered as staff notation and as a code listing.

pub mod code;
pub mod geometry;
pub mod key_signature;
pub mod math;
pub mod note;
pub mod scale;
pub mod staff;
pub mod surface;
pub mod synth;
pub mod wheel;
pub mod widget;
