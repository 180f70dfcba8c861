//! Domain types: versions, pre-release grammar, modules, tag templates

pub mod bump;
pub mod module;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use bump::BumpKind;
pub use module::Module;
pub use prerelease::{extract_pre_release_base, increment_pre_release};
pub use tag::TagTemplate;
pub use version::{BumpLabel, SemanticVersion};
