//! Per-rule activation over byte positions.
//!
//! Each [`RuleKind`] has an [`ActivationState`]: whether it starts active and
//! the sorted offsets where it flips. Directives are collected first by a
//! [`LedgerBuilder`] and folded into the ledger in offset order, after which
//! the ledger is read-only.

use std::collections::HashMap;

use crate::RuleKind;

/// On/off history of one rule over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationState {
    initial_active: bool,
    /// Offsets where the state flips, non-decreasing.
    transitions: Vec<usize>,
    /// Disabled for the whole run regardless of directives.
    pinned: bool,
}

impl Default for ActivationState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ActivationState {
    /// Creates a state with no transitions.
    #[must_use]
    pub const fn new(initial_active: bool) -> Self {
        Self {
            initial_active,
            transitions: Vec::new(),
            pinned: false,
        }
    }

    /// Returns true if the rule is active at `offset`.
    ///
    /// Transitions at or after `offset` do not count, so a directive at
    /// position `p` affects only positions strictly after `p`.
    #[must_use]
    pub fn is_active(&self, offset: usize) -> bool {
        if self.pinned {
            return false;
        }
        let flips = self.transitions.partition_point(|&t| t < offset);
        self.initial_active ^ (flips % 2 == 1)
    }

    /// Returns the state after every recorded transition.
    fn current(&self) -> bool {
        self.initial_active ^ (self.transitions.len() % 2 == 1)
    }

    /// Records a disable at `offset`; no-op if already disabled.
    pub fn record_disable(&mut self, offset: usize) {
        if self.current() {
            self.transitions.push(offset);
        }
    }

    /// Records an enable at `offset`; no-op if already enabled.
    pub fn record_enable(&mut self, offset: usize) {
        if !self.current() {
            self.transitions.push(offset);
        }
    }

    /// Disables the rule for the whole run.
    pub fn pin_disabled(&mut self) {
        self.initial_active = false;
        self.pinned = true;
    }

    /// Returns the recorded transitions.
    #[must_use]
    pub fn transitions(&self) -> &[usize] {
        &self.transitions
    }

    /// Returns true if the rule was disabled for the whole run.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// Direction of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// `NOLINT(...)`
    Disable,
    /// `LINT(...)`
    Enable,
}

/// One rule toggled at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveEvent {
    /// Position the toggle takes effect after.
    pub offset: usize,
    /// Whether the rule is turned off or on.
    pub toggle: Toggle,
    /// The affected rule.
    pub kind: RuleKind,
}

/// Answers "is rule K active at offset P" for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationLedger {
    states: HashMap<RuleKind, ActivationState>,
}

impl ActivationLedger {
    /// Creates a ledger where every rule is active everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// Returns true if `kind` is active at `offset`.
    #[must_use]
    pub fn is_active(&self, kind: RuleKind, offset: usize) -> bool {
        self.states
            .get(&kind)
            .map_or(true, |state| state.is_active(offset))
    }

    /// Returns the state of `kind`, if any directive or config touched it.
    #[must_use]
    pub fn state(&self, kind: RuleKind) -> Option<&ActivationState> {
        self.states.get(&kind)
    }
}

/// Collects directive events in any order and folds them into a ledger.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct LedgerBuilder {
    events: Vec<DirectiveEvent>,
    disabled: Vec<RuleKind>,
}

impl LedgerBuilder {
    /// Adds one directive event.
    pub fn event(mut self, event: DirectiveEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Adds several directive events.
    pub fn events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = DirectiveEvent>,
    {
        self.events.extend(events);
        self
    }

    /// Disables `kind` for the whole run; directives cannot re-enable it.
    pub fn disable_for_run(mut self, kind: RuleKind) -> Self {
        self.disabled.push(kind);
        self
    }

    /// Folds the events into a ledger.
    ///
    /// Events are stably sorted by offset, so events at the same offset keep
    /// their insertion order.
    #[must_use]
    pub fn build(mut self) -> ActivationLedger {
        self.events.sort_by_key(|event| event.offset);

        let mut states: HashMap<RuleKind, ActivationState> = HashMap::new();
        for event in &self.events {
            let state = states.entry(event.kind).or_default();
            match event.toggle {
                Toggle::Disable => state.record_disable(event.offset),
                Toggle::Enable => state.record_enable(event.offset),
            }
        }
        for kind in self.disabled {
            states.entry(kind).or_default().pin_disabled();
        }

        ActivationLedger { states }
    }
}
