//! Container
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Bootstrap`] | Builds containers from modules |
//! | [`Container`] | Resolves dependencies |
//! | [`Resource`] | A binding combined with its scope |
//! | [`InjectionSite`] | Pre-resolved arguments of constructors and methods |
//! | [`ProviderHandle`] | Lazy handle for `Provider<T>` dependencies |

pub mod bootstrap;
pub mod injection_site;
pub mod injector;
pub mod provider;
pub mod resource;

pub use bootstrap::{Bootstrap, injector};
pub use injection_site::InjectionSite;
pub use injector::Container;
pub use provider::ProviderHandle;
pub use resource::Resource;
