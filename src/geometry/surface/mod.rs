mod oriented_box;
mod plane;

pub use oriented_box::OrientedBox;
pub use plane::Plane;
