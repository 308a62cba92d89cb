pub mod hit;
pub mod surface;
pub mod transform;

pub use hit::{cell_at, element_at};
pub use surface::{DisplayList, Element, ElementKind};
pub use transform::{Preview, to_norm_point, to_pixel_rect};
