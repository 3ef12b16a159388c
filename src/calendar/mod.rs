pub mod cache;
pub mod date;
pub mod grid;
pub mod nav;
pub mod scroll;

pub use cache::{GridCache, GridVariant};
pub use grid::{compute_mini_grid, compute_month_grid, days_between, DayCell, MonthGrid};
pub use nav::{NavEvent, Navigator, ViewLevel};
pub use scroll::AutoScroll;
