pub mod clock;
pub mod locale;

pub use clock::{format_12h, format_24h, format_hour_label, one_hour_later, parse_hour_field};
pub use locale::{title_case, Locale};
