//! Form state and the transitions user input drives through it.

use std::collections::BTreeMap;
use std::rc::Rc;

use yew::Reducible;

use crate::api::{CalculationRequest, CalculationResult, OutcomeInput, StakeDriver};
use crate::fields::{self, FieldSnapshot, SlotInputs};
use crate::outcome::{Letter, OutcomeCount};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinState {
    Automatic,
    Pinned { letter: Letter, stake: f64 },
}

impl PinState {
    pub fn letter(self) -> Option<Letter> {
        match self {
            PinState::Automatic => None,
            PinState::Pinned { letter, .. } => Some(letter),
        }
    }
}

/// Effect of a stake edit on the pin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StakeEdit {
    Pinned(Letter),
    Unpinned(Letter),
    Ignored,
}

/// Why no request can be built yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Insufficient {
    MissingOdd(Letter),
    MissingStake,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    Guidance,
    Ready(CalculationResult),
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    count: OutcomeCount,
    slots: Vec<SlotInputs>,
    /// Bumped whenever the slot inputs are rebuilt; keys the field set.
    generation: u32,
    base_stake: String,
    pin: PinState,
    /// Text shown in each per-outcome stake field.
    stake_inputs: BTreeMap<Letter, String>,
    /// Bumped whenever a recomputation is due.
    recompute_seq: u64,
    result: ResultView,
}

impl Default for FormState {
    fn default() -> Self {
        let count = OutcomeCount::default();
        Self {
            count,
            slots: vec![SlotInputs::default(); count.get() as usize],
            generation: 0,
            base_stake: String::new(),
            pin: PinState::Automatic,
            stake_inputs: BTreeMap::new(),
            recompute_seq: 0,
            result: ResultView::Guidance,
        }
    }
}

impl FormState {
    pub fn count(&self) -> OutcomeCount {
        self.count
    }

    pub fn letters(&self) -> &'static [Letter] {
        self.count.letters()
    }

    pub fn slot(&self, letter: Letter) -> Option<&SlotInputs> {
        self.slots.get(letter.index())
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn base_stake(&self) -> &str {
        &self.base_stake
    }

    pub fn pin(&self) -> PinState {
        self.pin
    }

    pub fn stake_input(&self, letter: Letter) -> Option<&str> {
        self.stake_inputs.get(&letter).map(String::as_str)
    }

    pub fn recompute_seq(&self) -> u64 {
        self.recompute_seq
    }

    pub fn result(&self) -> &ResultView {
        &self.result
    }

    pub fn increase(&mut self) -> bool {
        match self.count.increased() {
            Some(next) => {
                self.resize(next);
                true
            }
            None => false,
        }
    }

    pub fn decrease(&mut self) -> bool {
        match self.count.decreased() {
            Some(next) => {
                self.resize(next);
                true
            }
            None => false,
        }
    }

    /// Rebuilds every slot from scratch for the new count.
    fn resize(&mut self, count: OutcomeCount) {
        self.count = count;
        self.slots = vec![SlotInputs::default(); count.get() as usize];
        self.generation = self.generation.wrapping_add(1);
        self.stake_inputs.retain(|l, _| count.contains(*l));
        if let Some(letter) = self.pin.letter() {
            if !count.contains(letter) {
                self.pin = PinState::Automatic;
            }
        }
        self.request_recompute();
    }

    pub fn set_odd(&mut self, letter: Letter, raw: String) {
        if let Some(slot) = self.slots.get_mut(letter.index()) {
            slot.odd = raw;
            self.request_recompute();
        }
    }

    pub fn set_cashback(&mut self, letter: Letter, raw: String) {
        if let Some(slot) = self.slots.get_mut(letter.index()) {
            slot.cashback = raw;
            self.request_recompute();
        }
    }

    /// Edits the legacy base stake field. It drives the computation again,
    /// so any pin is released.
    pub fn set_base_stake(&mut self, raw: String) {
        if let Some(letter) = self.pin.letter() {
            self.stake_inputs.remove(&letter);
        }
        self.pin = PinState::Automatic;
        self.base_stake = raw;
    }

    pub fn edit_stake(&mut self, letter: Letter, raw: String) -> StakeEdit {
        if !self.count.contains(letter) {
            return StakeEdit::Ignored;
        }
        let parsed = fields::positive(&raw);
        self.stake_inputs.insert(letter, raw.clone());
        match parsed {
            Some(stake) => {
                self.pin = PinState::Pinned { letter, stake };
                if letter == Letter::BASE {
                    self.base_stake = raw;
                } else {
                    self.base_stake.clear();
                }
                StakeEdit::Pinned(letter)
            }
            None if self.pin.letter() == Some(letter) => {
                self.pin = PinState::Automatic;
                StakeEdit::Unpinned(letter)
            }
            None => StakeEdit::Ignored,
        }
    }

    pub fn reset_to_automatic(&mut self) {
        self.pin = PinState::Automatic;
        self.stake_inputs.clear();
        self.request_recompute();
    }

    pub fn request_recompute(&mut self) {
        self.recompute_seq = self.recompute_seq.wrapping_add(1);
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        let mut snap = FieldSnapshot {
            base_stake: fields::coerce(&self.base_stake),
            ..FieldSnapshot::default()
        };
        for (letter, slot) in self.letters().iter().zip(&self.slots) {
            snap.odds.insert(*letter, fields::coerce(&slot.odd));
            snap.cashbacks.insert(*letter, fields::coerce(&slot.cashback));
        }
        for (letter, raw) in &self.stake_inputs {
            snap.stakes.insert(*letter, fields::coerce(raw));
        }
        snap
    }

    /// Checks the request preconditions and builds the payload.
    pub fn prepare_request(&self) -> Result<CalculationRequest, Insufficient> {
        let snap = self.snapshot();
        let mut outcomes = Vec::with_capacity(self.letters().len());
        for letter in self.letters() {
            let odd = snap.odd(*letter);
            if odd <= 0.0 {
                return Err(Insufficient::MissingOdd(*letter));
            }
            outcomes.push(OutcomeInput {
                letter: *letter,
                odd,
                cashback_percent: snap.cashback(*letter),
            });
        }
        let driver = match self.pin {
            PinState::Pinned { letter, stake } if stake > 0.0 => StakeDriver::Pinned { letter, stake },
            PinState::Automatic if snap.base_stake > 0.0 => StakeDriver::Base(snap.base_stake),
            _ => return Err(Insufficient::MissingStake),
        };
        Ok(CalculationRequest { count: self.count, outcomes, driver })
    }

    /// Merges a server answer. Fields of non-pinned outcomes take the
    /// server's stake; the pinned field keeps what the user typed.
    pub fn apply_result(&mut self, result: CalculationResult) {
        let pinned = self.pin.letter();
        for letter in self.letters() {
            if Some(*letter) == pinned {
                continue;
            }
            match result.stake(*letter) {
                Some(stake) => {
                    self.stake_inputs.insert(*letter, format!("{stake:.2}"));
                }
                None => {
                    self.stake_inputs.remove(letter);
                }
            }
        }
        self.result = ResultView::Ready(result);
    }

    pub fn show_guidance(&mut self) {
        self.result = ResultView::Guidance;
    }

    pub fn show_failure(&mut self) {
        self.result = ResultView::Failed;
    }
}

pub enum FormAction {
    Increase,
    Decrease,
    EditOdd(Letter, String),
    EditCashback(Letter, String),
    EditBaseStake(String),
    EditStake(Letter, String),
    ResetToAutomatic,
    Recompute,
    Guidance,
    Calculated(CalculationResult),
    Failed,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Increase => {
                next.increase();
            }
            FormAction::Decrease => {
                next.decrease();
            }
            FormAction::EditOdd(l, raw) => next.set_odd(l, raw),
            FormAction::EditCashback(l, raw) => next.set_cashback(l, raw),
            FormAction::EditBaseStake(raw) => next.set_base_stake(raw),
            FormAction::EditStake(l, raw) => {
                next.edit_stake(l, raw);
            }
            FormAction::ResetToAutomatic => next.reset_to_automatic(),
            FormAction::Recompute => next.request_recompute(),
            FormAction::Guidance => next.show_guidance(),
            FormAction::Calculated(result) => next.apply_result(result),
            FormAction::Failed => next.show_failure(),
        }
        next.into()
    }
}
