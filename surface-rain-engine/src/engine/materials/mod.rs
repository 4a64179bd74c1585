//! Surface materials.
//!
//! One material per surface type is derived from the current effect parameters and the
//! latest rain texture. Entities share it by reference, so rebuilding after a parameter
//! change or a new frame costs four materials regardless of scene size.

pub mod binding;
pub mod material_cache;

pub use binding::{BoundMaterials, bind_surface_materials};
pub use material_cache::{MaterialCache, MaterialInputs, SurfaceMaterial};
