//! Pure projections from tasks to renderable fragments.
//!
//! Nothing here draws. A front end asks for a fragment, draws it, and asks
//! again after a mutation; projecting the same task twice yields the same
//! fragment.

pub mod board;
pub mod card;
pub mod panels;

pub use board::{BoardView, BucketCounts, ColumnView};
pub use card::{CardAction, CardView, Indicator};
pub use panels::{
    ChecklistPanel, ChecklistRow, CommentPanel, CommentRow, ImagePanel, ImageTile, ModalView,
};
