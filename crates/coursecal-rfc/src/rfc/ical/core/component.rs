//! iCalendar component types (RFC 5545 §3.4-3.6).

use std::collections::HashSet;

use super::{Property, names};
use crate::error::{RfcError, RfcResult};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VALARM component (nested within VEVENT).
    Alarm,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Alarm => "VALARM",
        }
    }
}

/// An iCalendar component.
///
/// Components can contain properties and nested sub-components.
/// A VCALENDAR contains VEVENTs, which may contain VALARMs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    /// Component name as written between `BEGIN:` and `END:`.
    pub name: String,
    /// Properties in order of insertion.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: kind.as_str().to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    /// Creates a VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    /// Creates a VALARM component.
    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns the UID property value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property(names::UID)?.as_text()
    }
}

/// Top-level iCalendar object.
///
/// A convenience wrapper around a VCALENDAR component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Creates a new empty iCalendar with the required VERSION and PRODID.
    #[must_use]
    pub fn new(version: impl Into<String>, prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text(names::VERSION, version));
        root.add_property(Property::text(names::PRODID, prodid));
        Self { root }
    }

    /// Sets the `X-WR-CALNAME` display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.root
            .properties
            .retain(|p| !p.name.eq_ignore_ascii_case(names::CALNAME));
        self.root.add_property(Property::text(names::CALNAME, name));
    }

    /// Adds a VEVENT component.
    pub fn add_event(&mut self, event: Component) {
        self.root.add_child(event);
    }

    /// ## Summary
    /// Checks that no two events share a UID.
    ///
    /// Events without a UID are ignored.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` naming the first repeated UID.
    pub fn ensure_unique_uids(&self) -> RfcResult<()> {
        let mut seen = HashSet::new();
        let uids = self
            .root
            .children
            .iter()
            .filter(|c| c.kind == ComponentKind::Event)
            .filter_map(Component::uid);
        for uid in uids {
            if !seen.insert(uid) {
                return Err(RfcError::ValidationError(format!("duplicate UID {uid}")));
            }
        }
        Ok(())
    }
}
