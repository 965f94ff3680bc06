//! Region rule definition

use crate::player::KitId;
use crate::query::Filter;
use crate::Scope;
use glam::DVec3;
use region::Region;
use std::fmt;
use std::rc::Rc;

/// A rule binding a region to a scope, a filter and optional side effects.
///
/// Rules are built once when match content loads and are read-only
/// afterwards. A rule without a filter never decides an event; such rules
/// exist for their effects only.
#[derive(Clone)]
pub struct RegionRule {
    region: Region,
    scope: Scope,
    filter: Option<Rc<dyn Filter>>,
    message: Option<String>,

    /// Halt legacy scope passes once this rule decides
    use_region_priority: bool,

    /// Also evaluate on block damage, before the block breaks
    early_warning: bool,

    velocity: Option<DVec3>,
    kit: Option<KitId>,
    lend_kit: bool,
}

impl RegionRule {
    pub fn new(scope: Scope, region: Region) -> Self {
        RegionRule {
            region,
            scope,
            filter: None,
            message: None,
            use_region_priority: false,
            early_warning: false,
            velocity: None,
            kit: None,
            lend_kit: false,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn filter(&self) -> Option<&dyn Filter> {
        self.filter.as_deref()
    }

    /// Message shown to the player when the rule denies an event
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn use_region_priority(&self) -> bool {
        self.use_region_priority
    }

    pub fn early_warning(&self) -> bool {
        self.early_warning
    }

    pub fn velocity(&self) -> Option<DVec3> {
        self.velocity
    }

    pub fn kit(&self) -> Option<&KitId> {
        self.kit.as_ref()
    }

    /// Whether the kit is taken back when the player leaves the region
    pub fn lend_kit(&self) -> bool {
        self.lend_kit
    }

    /// Set the rule's filter (builder pattern)
    pub fn with_filter(self, filter: impl Filter + 'static) -> Self {
        self.with_shared_filter(Rc::new(filter))
    }

    /// Set a filter shared with other rules (builder pattern)
    pub fn with_shared_filter(mut self, filter: Rc<dyn Filter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the deny message (builder pattern)
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Mark the rule as priority-aware (builder pattern)
    pub fn with_region_priority(mut self, enabled: bool) -> Self {
        self.use_region_priority = enabled;
        self
    }

    /// Evaluate the rule on block damage too (builder pattern)
    pub fn with_early_warning(mut self, enabled: bool) -> Self {
        self.early_warning = enabled;
        self
    }

    /// Launch players entering the region (builder pattern)
    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Give a kit on entry, optionally taking it back on exit (builder pattern)
    pub fn with_kit(mut self, kit: KitId, lend: bool) -> Self {
        self.kit = Some(kit);
        self.lend_kit = lend;
        self
    }

    /// Check if the rule carries any entry/exit side effect
    pub fn has_effects(&self) -> bool {
        self.velocity.is_some() || self.kit.is_some()
    }
}

impl fmt::Debug for RegionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionRule")
            .field("scope", &self.scope)
            .field("region", &self.region)
            .field("filter", &self.filter.is_some())
            .field("message", &self.message)
            .field("use_region_priority", &self.use_region_priority)
            .field("early_warning", &self.early_warning)
            .field("velocity", &self.velocity)
            .field("kit", &self.kit)
            .field("lend_kit", &self.lend_kit)
            .finish()
    }
}
