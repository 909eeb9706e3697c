// Kernel - collaborator traits and their implementations
//
// Domain code talks to the identity provider only through the Base* traits,
// so tests can swap in the mocks from test_dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{IdentityToolkitAdapter, ServerDeps};
pub use test_dependencies::{test_server_deps, ListCallArgs, MockIdentityProvider};
pub use traits::*;
