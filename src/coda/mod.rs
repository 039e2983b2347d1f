pub mod event;
pub mod rubato;
pub mod symbol;

pub use event::{ActorId, CodaEvent, RawRow};
pub use rubato::{RubatoClassifier, RubatoMarker};
pub use symbol::{Symbol, SymbolEncoder};
