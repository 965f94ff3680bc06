//! Rule dispatcher: applies region rules to gameplay events
//!
//! Two evaluation regimes exist, fixed per match:
//!
//! - **Priority**: every scope relevant to an event is walked in one pass over
//!   all rules in declaration order, halting at the first decisive rule.
//! - **Legacy**: each relevant scope gets its own pass. A later pass may
//!   override an earlier one for the same physical event. Content predating
//!   the priority regime relies on this, so it is reproduced as is.
//!
//! Both regimes share [`RuleDispatcher::process_query`] for the per-rule decision.
//!
//! Every entry point ignores events that are already cancelled.

use crate::event::{
    BlockDamageEvent, BlockPhysicsEvent, BlockTransformEvent, CoarseMoveEvent,
    EntityDamageEvent, Event, FlagPickupEvent, HangingBreakEvent, HangingEntity,
    HangingPlaceEvent, InteractAction, InteractEntityEvent, InteractEvent, TransformCause,
    UseResult,
};
use crate::player::MatchPlayer;
use crate::query::{BlockState, Material, PlayerState, Query, QueryResponse};
use crate::{DispatchConfig, RegionRule, RuleSet, Scope};
use glam::DVec3;

/// Evaluates the rules of one match against its gameplay events
#[derive(Debug)]
pub struct RuleDispatcher {
    rules: RuleSet,
    use_region_priority: bool,
    owned_explosions: bool,
    max_build_height: Option<i32>,
}

impl RuleDispatcher {
    /// Create a dispatcher for content of the latest format, in the given regime
    pub fn new(rules: RuleSet, use_region_priority: bool) -> Self {
        tracing::debug!(
            "Dispatching {} region rules, priority regime: {}",
            rules.len(),
            use_region_priority
        );
        RuleDispatcher {
            rules,
            use_region_priority,
            owned_explosions: true,
            max_build_height: None,
        }
    }

    pub fn from_config(rules: RuleSet, config: &DispatchConfig) -> Self {
        let mut dispatcher = RuleDispatcher::new(rules, config.use_region_priority());
        dispatcher.owned_explosions = config.owned_explosions();
        dispatcher.max_build_height = config.max_build_height;
        dispatcher
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn use_region_priority(&self) -> bool {
        self.use_region_priority
    }

    pub fn max_build_height(&self) -> Option<i32> {
        self.max_build_height
    }

    /// Only touched from the game update thread
    pub fn set_max_build_height(&mut self, height: Option<i32>) {
        self.max_build_height = height;
    }

    /// Apply one rule's filter to an event.
    ///
    /// `Allow` un-cancels the event and `Deny` cancels it with the rule's
    /// message. Returns false if the rule has no filter or the filter abstains.
    pub fn process_query(rule: &RegionRule, query: &Query, event: &mut dyn Event) -> bool {
        let Some(filter) = rule.filter() else {
            return false;
        };

        let response = filter.query(query);
        match response {
            QueryResponse::Allow => event.set_cancelled(false),
            QueryResponse::Deny => event.deny(rule.message()),
            QueryResponse::Abstain => return false,
        }

        tracing::trace!(
            "{:?} rule decided {:?} for {:?}",
            rule.scope(),
            response,
            query.event()
        );
        true
    }

    /// Run enter/leave rules for a player moving from `from` to `to`.
    ///
    /// An unknown origin counts as outside every region for entering and
    /// inside every region for leaving.
    pub fn check_enter_leave(
        &self,
        event: &mut dyn Event,
        player: Option<&dyn MatchPlayer>,
        from: Option<DVec3>,
        to: DVec3,
    ) {
        if event.is_cancelled() {
            return;
        }
        let Some(player) = player.filter(|p| p.can_interact()) else {
            return;
        };

        let query = Query::new(event.kind()).with_player(Some(player.state()));

        if self.use_region_priority {
            // Both scopes in one pass, since declaration order can interleave them
            for rule in self.rules.all() {
                let crossed = match rule.scope() {
                    Scope::PlayerEnter => rule.region().enters(from, to),
                    Scope::PlayerLeave => rule.region().exits(from, to),
                    _ => false,
                };
                if crossed && Self::process_query(rule, &query, event) {
                    break;
                }
            }
        } else {
            for rule in self.rules.get(Scope::PlayerEnter) {
                if rule.region().enters(from, to)
                    && Self::process_query(rule, &query, event)
                    && rule.use_region_priority()
                {
                    break;
                }
            }

            for rule in self.rules.get(Scope::PlayerLeave) {
                if rule.region().exits(from, to)
                    && Self::process_query(rule, &query, event)
                    && rule.use_region_priority()
                {
                    break;
                }
            }
        }
    }

    /// Handle a block-to-block player move: enter/leave rules, then effects
    pub fn on_coarse_move(
        &self,
        event: &mut CoarseMoveEvent,
        player: Option<&mut dyn MatchPlayer>,
    ) {
        let (from, to) = (event.from, event.to);
        self.check_enter_leave(event, player.as_deref(), Some(from), to);
        self.apply_effects(event, player);
    }

    /// Handle a flag pickup as a move with no known origin
    pub fn on_flag_pickup(&self, event: &mut FlagPickupEvent, carrier: &dyn MatchPlayer) {
        self.check_enter_leave(event, Some(carrier), None, carrier.location());
    }

    /// Apply velocity and kit effects for regions the move enters or exits.
    ///
    /// Effects fire only when the move crosses a region boundary. Velocity
    /// also applies to players who cannot interact.
    pub fn apply_effects(&self, event: &CoarseMoveEvent, player: Option<&mut dyn MatchPlayer>) {
        if event.is_cancelled() {
            return;
        }
        let Some(player) = player else {
            return;
        };

        let (from, to) = (Some(event.from), event.to);
        let query = Query::new(event.kind()).with_player(Some(player.state()));

        for rule in self.rules.get(Scope::Effect) {
            if !rule.has_effects() {
                continue;
            }

            let enters = rule.region().enters(from, to);
            let exits = rule.region().exits(from, to);
            if !enters && !exits {
                continue;
            }

            let can_interact = player.can_interact();
            let denied = can_interact
                && rule
                    .filter()
                    .is_some_and(|f| f.query(&query) == QueryResponse::Deny);
            if denied {
                continue;
            }

            if enters {
                if let Some(velocity) = rule.velocity() {
                    player.set_velocity(velocity);
                }
            }

            if let Some(kit) = rule.kit() {
                if can_interact {
                    if enters {
                        player.apply_kit(kit, false);
                    }
                    if exits && rule.lend_kit() {
                        player.remove_kit(kit);
                    }
                }
            }
        }
    }

    /// Run break/place rules for a block changing state
    pub fn check_block_transform(&self, event: &mut BlockTransformEvent) {
        if event.is_cancelled() {
            return;
        }

        let actor = self.actor(event);
        let kind = event.kind();
        let (old_state, new_state) = (event.old_state, event.new_state);
        let (is_break, is_place) = (event.is_break(), event.is_place());

        let break_query = Query::new(kind).with_player(actor).with_block(old_state);
        let place_query = Query::new(kind).with_player(actor).with_block(new_state);
        let against = event
            .cause
            .against()
            .map(|block| (block, Query::new(kind).with_player(actor).with_block(block)));

        if self.use_region_priority {
            // The event may belong to several scopes, so they share one pass
            for rule in self.rules.all() {
                let decided = match rule.scope() {
                    Scope::BlockBreak => {
                        is_break
                            && rule.region().contains_block(old_state.position)
                            && Self::process_query(rule, &break_query, event)
                    }
                    Scope::BlockPlace => {
                        is_place
                            && rule.region().contains_block(new_state.position)
                            && Self::process_query(rule, &place_query, event)
                    }
                    Scope::BlockPlaceAgainst => match &against {
                        Some((block, query)) => {
                            rule.region().contains_block(block.position)
                                && Self::process_query(rule, query, event)
                        }
                        None => false,
                    },
                    _ => false,
                };
                if decided {
                    break;
                }
            }
        } else {
            // Legacy content checks a single scope at the new block's position
            let (scope, query) = if is_place {
                (Scope::BlockPlace, &place_query)
            } else {
                (Scope::BlockBreak, &break_query)
            };
            for rule in self.rules.get(scope) {
                if rule.region().contains_block(new_state.position)
                    && Self::process_query(rule, query, event)
                    && rule.use_region_priority()
                {
                    break;
                }
            }
        }
    }

    /// Run physics rules for a block update; no actor is involved
    pub fn check_block_physics(&self, event: &mut BlockPhysicsEvent) {
        if event.is_cancelled() {
            return;
        }

        let block = event.block;
        let query = Query::new(event.kind()).with_block(block);
        for rule in self.rules.get(Scope::BlockPhysics) {
            if rule.region().contains_block(block.position)
                && Self::process_query(rule, &query, event)
            {
                break;
            }
        }
    }

    /// Warn a participant early when they start breaking a protected block.
    ///
    /// Only break rules flagged for early warning take part.
    pub fn check_block_damage(
        &self,
        event: &mut BlockDamageEvent,
        participant: Option<&mut dyn MatchPlayer>,
    ) {
        if event.is_cancelled() {
            return;
        }
        let Some(player) = participant else {
            return;
        };

        let block = event.block;
        let query = Query::new(event.kind())
            .with_player(Some(player.state()))
            .with_block(block);

        for rule in self.rules.get(Scope::BlockBreak) {
            if rule.early_warning()
                && rule.region().contains_block(block.position)
                && Self::process_query(rule, &query, event)
            {
                if event.is_cancelled() {
                    if let Some(message) = rule.message() {
                        player.send_warning(message);
                    }
                }
                if self.halts(rule) {
                    break;
                }
            }
        }
    }

    /// Run use rules for a right-clicked block
    pub fn check_use(&self, event: &mut InteractEvent, participant: Option<&mut dyn MatchPlayer>) {
        if event.is_cancelled() || event.action != InteractAction::RightClickBlock {
            return;
        }
        let Some(block) = event.clicked else {
            return;
        };

        self.handle_use(event, block, None, participant);
    }

    /// Run place rules for a hanging entity being put up
    pub fn check_hanging_place(
        &self,
        event: &mut HangingPlaceEvent,
        placer: Option<&mut dyn MatchPlayer>,
    ) {
        if event.is_cancelled() {
            return;
        }

        let entity = event.entity;
        self.handle_hanging_place(event, entity.block, entity.item_material(), placer);
    }

    /// Run break rules for a hanging entity broken by another entity
    pub fn check_hanging_break(
        &self,
        event: &mut HangingBreakEvent,
        remover: Option<&mut dyn MatchPlayer>,
    ) {
        if event.is_cancelled() {
            return;
        }

        let (entity, remover_block) = (event.entity, event.remover_block);
        self.handle_hanging_break(event, &entity, remover_block, remover);
    }

    /// Popping an item out of a frame, without breaking the frame, counts as a break
    pub fn check_item_frame_item_remove(
        &self,
        event: &mut EntityDamageEvent,
        damager: Option<&mut dyn MatchPlayer>,
    ) {
        if event.is_cancelled() {
            return;
        }
        let Some(frame) = event.target.filter(|t| t.framed_item().is_some()) else {
            return;
        };

        let damager_block = event.damager_block;
        self.handle_hanging_break(event, &frame, damager_block, damager);
    }

    /// Right-clicking an item frame rotates its item (a use) or, when empty,
    /// puts the held item in it (a place)
    pub fn check_item_frame_rotate(
        &self,
        event: &mut InteractEntityEvent,
        player: Option<&mut dyn MatchPlayer>,
    ) {
        if event.is_cancelled() {
            return;
        }
        let Some(frame) = event.target.filter(HangingEntity::is_item_frame) else {
            return;
        };

        if frame.framed_item().is_some() {
            self.handle_use(event, frame.block, frame.item_material(), player);
        } else if let Some(item) = player.as_ref().and_then(|p| p.item_in_hand()) {
            self.handle_hanging_place(event, frame.block, Some(item), player);
        }
    }

    fn handle_use(
        &self,
        event: &mut dyn Event,
        block: BlockState,
        material: Option<Material>,
        player: Option<&mut dyn MatchPlayer>,
    ) {
        let Some(player) = player.filter(|p| p.can_interact()) else {
            return;
        };

        let query = Query::new(event.kind())
            .with_player(Some(player.state()))
            .with_block(block)
            .with_material(material);

        for rule in self.rules.get(Scope::Use) {
            if rule.region().contains_block(block.position)
                && Self::process_query(rule, &query, event)
            {
                // Denying the block use must not also swallow the item use
                if let Some(interact) = event.as_interact_mut() {
                    if interact.is_cancelled() {
                        interact.set_cancelled(false);
                        interact.use_item = UseResult::Allow;
                        interact.use_block = UseResult::Deny;

                        if let Some(message) = rule.message() {
                            player.send_warning(message);
                        }
                    }
                }
                if self.halts(rule) {
                    break;
                }
            }
        }
    }

    fn handle_hanging_place(
        &self,
        event: &mut dyn Event,
        block: BlockState,
        material: Option<Material>,
        placer: Option<&mut dyn MatchPlayer>,
    ) {
        let mut placer = placer.filter(|p| p.can_interact());
        let query = Query::new(event.kind())
            .with_player(placer.as_ref().map(|p| p.state()))
            .with_block(block)
            .with_material(material);

        for rule in self.rules.get(Scope::BlockPlace) {
            if rule.region().contains_block(block.position)
                && Self::process_query(rule, &query, event)
            {
                Self::send_cancel_message(rule, event, placer.as_deref_mut());
                if self.halts(rule) {
                    break;
                }
            }
        }
    }

    fn handle_hanging_break(
        &self,
        event: &mut dyn Event,
        entity: &HangingEntity,
        breaker_block: BlockState,
        breaker: Option<&mut dyn MatchPlayer>,
    ) {
        let Some(material) = entity.item_material() else {
            return;
        };

        let mut breaker = breaker.filter(|p| p.can_interact());
        let query = Query::new(event.kind())
            .with_player(breaker.as_ref().map(|p| p.state()))
            .with_block(breaker_block)
            .with_material(Some(material));

        for rule in self.rules.get(Scope::BlockBreak) {
            if rule.region().contains_block(breaker_block.position)
                && Self::process_query(rule, &query, event)
            {
                Self::send_cancel_message(rule, event, breaker.as_deref_mut());
                if self.halts(rule) {
                    break;
                }
            }
        }
    }

    fn send_cancel_message(
        rule: &RegionRule,
        event: &dyn Event,
        player: Option<&mut (dyn MatchPlayer + '_)>,
    ) {
        if !event.is_cancelled() {
            return;
        }
        if let (Some(message), Some(player)) = (rule.message(), player) {
            player.send_warning(message);
        }
    }

    /// Halting rule for the damage, use and hanging handlers
    fn halts(&self, rule: &RegionRule) -> bool {
        self.use_region_priority || rule.use_region_priority()
    }

    fn actor(&self, event: &BlockTransformEvent) -> Option<PlayerState> {
        // Legacy content treats all explosion damage as done by the world
        if !self.owned_explosions && event.cause == TransformCause::Explosion {
            return None;
        }
        event.actor
    }
}
