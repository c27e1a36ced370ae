pub mod index;
pub mod slots;

pub use index::AvailabilityIndex;
pub use slots::{bookable_dates, bookable_dates_after, time_slots, BookableDate, BookableDates};
