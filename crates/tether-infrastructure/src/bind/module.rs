//! Modules

use std::any::TypeId;

use tether_domain::error::Result;

use super::bindings::Bindings;

/// A unit of declarations
///
/// Each module type is declared once per bootstrap unless it reports
/// itself as multimodal, in which case every instance is declared.
pub trait Module: Send + Sync + 'static {
    fn declare(&self, bindings: &mut Bindings) -> Result<()>;

    fn is_multimodal(&self) -> bool {
        false
    }

    fn module_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
