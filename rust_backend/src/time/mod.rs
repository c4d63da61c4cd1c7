pub mod timestamps;

pub use timestamps::{month_key, parse_donki_timestamp, parse_json_timestamp};
