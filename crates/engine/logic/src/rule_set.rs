//! Ordered rule registry

use crate::{RegionRule, Scope};
use std::collections::HashMap;

/// Rules of a match in declaration order, also indexed by scope.
///
/// Built once at match start and never mutated during gameplay.
#[derive(Debug, Default)]
pub struct RuleSet {
    /// All rules, in declaration order
    rules: Vec<RegionRule>,

    /// Indices into `rules` per scope, ascending
    by_scope: HashMap<Scope, Vec<usize>>,
}

impl RuleSet {
    pub fn new(rules: Vec<RegionRule>) -> Self {
        let mut by_scope: HashMap<Scope, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            by_scope.entry(rule.scope()).or_default().push(index);
        }
        RuleSet { rules, by_scope }
    }

    /// Rules of one scope, in declaration order; empty for unused scopes
    pub fn get(&self, scope: Scope) -> impl Iterator<Item = &RegionRule> + '_ {
        self.by_scope
            .get(&scope)
            .into_iter()
            .flatten()
            .map(move |&index| &self.rules[index])
    }

    /// Every rule across all scopes, in declaration order
    pub fn all(&self) -> &[RegionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<RegionRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RegionRule>>(iter: I) -> Self {
        RuleSet::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use region::Region;

    fn rule(scope: Scope, message: &str) -> RegionRule {
        RegionRule::new(scope, Region::block(IVec3::ZERO)).with_message(message)
    }

    #[test]
    fn test_scope_order_preserved() {
        let rules: RuleSet = [
            rule(Scope::BlockPlace, "a"),
            rule(Scope::BlockBreak, "b"),
            rule(Scope::BlockPlace, "c"),
            rule(Scope::PlayerEnter, "d"),
        ]
        .into_iter()
        .collect();

        let place: Vec<_> = rules.get(Scope::BlockPlace).map(|r| r.message()).collect();
        assert_eq!(place, vec![Some("a"), Some("c")]);

        let all: Vec<_> = rules.all().iter().map(|r| r.message()).collect();
        assert_eq!(all, vec![Some("a"), Some("b"), Some("c"), Some("d")]);
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_absent_scope_is_empty() {
        let rules = RuleSet::new(vec![rule(Scope::Use, "x")]);
        assert_eq!(rules.get(Scope::Effect).count(), 0);
        assert!(RuleSet::default().is_empty());
    }
}
