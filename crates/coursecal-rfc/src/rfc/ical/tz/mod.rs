//! Timezone identifier resolution and localization.

mod resolver;

pub use resolver::{
    AMBIGUOUS_ABBREVIATIONS, DEFAULT_ALIASES, TimeZoneResolver, TimezoneResolutionError, localize,
};
