//! Domain services
//!
//! Pure functions over field definitions: ordering, grouping, visibility,
//! preview rendering and submission validation.

pub mod grouping;
pub mod ordering;
pub mod renderer;
pub mod validator;
pub mod visibility;

pub use grouping::{group_by_category, in_display_order, CategoryGroup};
pub use ordering::Direction;
pub use renderer::{ChoiceItem, InputType, PreviewRenderer, RenderMode, RenderedControl, Widget};
pub use validator::SubmissionValidator;
pub use visibility::is_visible;
