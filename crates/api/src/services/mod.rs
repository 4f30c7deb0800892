//! Orchestration services bridging HTTP handlers, repositories and the
//! domain core.

pub mod clock;
pub mod insights;
pub mod matching;
pub mod placement;
pub mod places;

pub use clock::{Clock, SystemClock};
pub use insights::InsightsService;
pub use matching::MatchingService;
pub use placement::RandomFencePlacement;
pub use places::{HttpPlaceProvider, PlaceError, PlaceProvider, StaticPlaceProvider};
