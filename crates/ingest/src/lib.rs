mod parser;

pub use parser::{ParsedRoll, parse_roll_event, parse_successes};
