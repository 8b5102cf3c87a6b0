//! Core domain types for the memory board: pair identities, card slots, and the deal.

use crate::rng::GameRng;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of matching pairs in a game.
///
/// Always positive. The board holds `2 * pairs` cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PairCount(u16);

impl PairCount {
    /// Pair counts offered by the game's size selector.
    pub const PRESETS: [u16; 6] = [6, 8, 12, 16, 18, 20];

    /// Creates a pair count.
    ///
    /// # Errors
    ///
    /// Returns [`PairCountError::Zero`] if `pairs` is zero.
    pub fn new(pairs: u16) -> Result<Self, PairCountError> {
        if pairs == 0 {
            return Err(PairCountError::Zero);
        }
        Ok(Self(pairs))
    }

    /// Number of distinct identities.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Number of cards on the board.
    pub fn card_count(self) -> usize {
        usize::from(self.0) * 2
    }

    /// The preset pair counts.
    pub fn presets() -> Vec<Self> {
        Self::PRESETS.iter().map(|&p| Self(p)).collect()
    }

    /// Moves after which a game with no win is lost.
    ///
    /// Saturates at `u32::MAX`, which no game can reach.
    pub fn move_limit(self, factor: u32) -> u32 {
        u32::from(self.0).saturating_mul(factor)
    }
}

impl Default for PairCount {
    fn default() -> Self {
        Self(8)
    }
}

impl TryFrom<u16> for PairCount {
    type Error = PairCountError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PairCount> for u16 {
    fn from(value: PairCount) -> Self {
        value.0
    }
}

impl std::fmt::Display for PairCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error constructing a [`PairCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PairCountError {
    /// A game needs at least one pair.
    #[display("Pair count must be positive")]
    Zero,
}

impl std::error::Error for PairCountError {}

/// The value two card slots share when they form a pair.
///
/// Identities are compared by construction index; the hue is derived from it
/// and only matters for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    index: u16,
    hue: u16,
}

impl Identity {
    /// Construction index, `0..pairs`.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Hue in degrees on the color wheel, `0..360`.
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// CSS color string for this identity.
    pub fn css_color(&self) -> String {
        format!("hsl({}, 80%, 55%)", self.hue)
    }

    /// RGB color for this identity at 80% saturation and 55% lightness.
    pub fn rgb(&self) -> (u8, u8, u8) {
        const SATURATION: f64 = 0.8;
        const LIGHTNESS: f64 = 0.55;

        let chroma = (1.0 - (2.0 * LIGHTNESS - 1.0).abs()) * SATURATION;
        let sector = f64::from(self.hue) / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match self.hue / 60 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = LIGHTNESS - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

/// Generates `pairs` pairwise-distinct identities, evenly spaced around the color wheel.
#[instrument]
pub fn generate_identities(pairs: PairCount) -> Vec<Identity> {
    let n = u32::from(pairs.get());
    (0..pairs.get())
        .map(|index| {
            let hue = ((f64::from(u32::from(index) * 360) / f64::from(n)).round() as u32) % 360;
            Identity {
                index,
                hue: hue as u16,
            }
        })
        .collect()
}

/// One face-down/face-up position on the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CardSlot {
    /// Pair key shared with exactly one other slot.
    identity: Identity,
    /// Index in the dealt deck.
    position: usize,
    /// Whether the card is currently revealed.
    face_up: bool,
    /// Whether the pair has been found. Terminal.
    matched: bool,
    /// Whether the slot stopped accepting selections because the game was lost.
    disabled: bool,
}

impl CardSlot {
    fn new(identity: Identity, position: usize) -> Self {
        Self {
            identity,
            position,
            face_up: false,
            matched: false,
            disabled: false,
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.face_up = true;
    }

    pub(crate) fn conceal(&mut self) {
        self.face_up = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }

    pub(crate) fn disable(&mut self) {
        self.disabled = true;
    }
}

/// The dealt cards of one game, in position order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    slots: Vec<CardSlot>,
}

impl Board {
    /// Returns the slot at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&CardSlot> {
        self.slots.get(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut CardSlot> {
        self.slots.get_mut(position)
    }

    /// All slots in position order.
    pub fn slots(&self) -> &[CardSlot] {
        &self.slots
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Positions holding `identity`.
    pub fn positions_of(&self, identity: Identity) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|slot| slot.identity == identity)
            .map(|slot| slot.position)
            .collect()
    }

    pub(crate) fn disable_all(&mut self) {
        self.slots.iter_mut().for_each(CardSlot::disable);
    }
}

/// Deals a fresh board: every identity twice, in uniformly random order, all face down.
#[instrument(skip(rng), fields(seed = rng.seed()))]
pub fn build_board(pairs: PairCount, rng: &mut GameRng) -> Board {
    let identities = generate_identities(pairs);
    let mut deck: Vec<Identity> = identities
        .iter()
        .chain(identities.iter())
        .copied()
        .collect();
    rng.shuffle(&mut deck);

    let slots = deck
        .into_iter()
        .enumerate()
        .map(|(position, identity)| CardSlot::new(identity, position))
        .collect::<Vec<_>>();

    debug!(pairs = pairs.get(), cards = slots.len(), "Board dealt");
    Board { slots }
}
