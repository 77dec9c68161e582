//! Framework-independent data-interaction controllers for the admin console.
//!
//! Every CRUD page in the console is built from the same three pieces: a
//! [`CollectionQuery`] that fetches a remote collection and derives a
//! searched/paginated view over it, a [`MutationOrchestrator`] that performs
//! create/update/delete calls and keeps the collection coherent, and one
//! [`FormController`] per dialog that owns form values and field-level
//! validation. None of them know anything about rendering; pages observe
//! their state snapshots and call their operations.
//!
//! Remote I/O always goes through the [`EntityGateway`] collaborator trait,
//! and user-facing outcome messages through [`NotificationSink`], so the
//! whole layer is testable with in-process doubles.

pub mod collection;
pub mod form;
pub mod mutation;
pub mod notify;
pub mod page;
pub mod remote;
pub mod session;
pub mod validation;

pub use collection::{search_fields, CollectionQuery, SearchPredicate};
pub use form::{FormController, SubmitHandler, SubmitOutcome};
pub use mutation::MutationOrchestrator;
pub use notify::{NotificationKind, NotificationSink, SilentNotifier, TracingNotifier};
pub use page::EntityPage;
pub use remote::{CollectionSource, EntityGateway, GatewaySource, MissingGateway};
pub use session::{SessionContext, SessionError, SessionUser};
pub use validation::{validate, ValidationSchema};
