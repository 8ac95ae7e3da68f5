//! Per-hole mole state and the fixed registry of moles.

use glam::Vec3;

use crate::animation::Transition;
use crate::config::GameConfig;
use crate::words::PickedWord;

/// Stable index of a mole's hole. Never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoleId(pub usize);

impl std::fmt::Display for MoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mole#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Mole {
    id: MoleId,
    /// Centre of the hole; the mole's height is added on top of `slot.y`.
    slot: Vec3,
    pub(crate) offset: f32,
    pub(crate) is_up: bool,
    pub(crate) word: Option<PickedWord>,
    /// In-flight rise or fall. Its presence is the `is_moving` flag, so a mole
    /// can never carry two transitions at once.
    pub(crate) transition: Option<Transition>,
}

impl Mole {
    pub fn new(id: MoleId, slot: Vec3, lowered_offset: f32) -> Self {
        Self { id, slot, offset: lowered_offset, is_up: false, word: None, transition: None }
    }

    pub fn id(&self) -> MoleId {
        self.id
    }

    pub fn slot(&self) -> Vec3 {
        self.slot
    }

    /// Current vertical offset relative to the hole.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// World position of the mole's head right now.
    pub fn position(&self) -> Vec3 {
        self.slot + Vec3::Y * self.offset
    }

    pub fn is_up(&self) -> bool {
        self.is_up
    }

    pub fn is_moving(&self) -> bool {
        self.transition.is_some()
    }

    /// Idle moles are eligible to be spawned.
    pub fn is_idle(&self) -> bool {
        !self.is_up && !self.is_moving()
    }

    /// Hittable moles are fully up and not animating.
    pub fn is_hittable(&self) -> bool {
        self.is_up && !self.is_moving()
    }

    /// Assigned word, empty while the mole is down or falling.
    pub fn word(&self) -> &'static str {
        self.word.map(|w| w.text).unwrap_or("")
    }

    /// Only meaningful while a word is assigned.
    pub fn is_target_word(&self) -> bool {
        self.word.is_some_and(|w| w.is_target)
    }
}

/// All moles of a game, allocated once and laid out in a centred row.
#[derive(Clone, Debug)]
pub struct MoleRegistry {
    moles: Vec<Mole>,
}

impl MoleRegistry {
    pub fn new(config: &GameConfig) -> Self {
        let n = config.mole_count;
        let centre = (n as f32 - 1.0) / 2.0;
        let moles = (0..n)
            .map(|i| {
                let slot = Vec3::new((i as f32 - centre) * config.slot_spacing, 0.0, 0.0);
                Mole::new(MoleId(i), slot, config.lowered_offset)
            })
            .collect();
        Self { moles }
    }

    pub fn len(&self) -> usize {
        self.moles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moles.is_empty()
    }

    pub fn get(&self, id: MoleId) -> Option<&Mole> {
        self.moles.get(id.0)
    }

    pub fn get_mut(&mut self, id: MoleId) -> Option<&mut Mole> {
        self.moles.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mole> {
        self.moles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Mole> {
        self.moles.iter_mut()
    }

    pub fn idle_ids(&self) -> Vec<MoleId> {
        self.moles.iter().filter(|m| m.is_idle()).map(Mole::id).collect()
    }

    pub fn as_slice(&self) -> &[Mole] {
        &self.moles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_layout_is_centred() {
        let reg = MoleRegistry::new(&GameConfig::default());
        assert_eq!(reg.len(), 4);
        let xs: Vec<f32> = reg.iter().map(|m| m.slot().x).collect();
        assert!((xs.iter().sum::<f32>()).abs() < 1e-5);
        assert!(xs.windows(2).all(|w| (w[1] - w[0] - 2.5).abs() < 1e-5));
    }

    #[test]
    fn test_new_mole_is_idle_and_blank() {
        let reg = MoleRegistry::new(&GameConfig::default());
        for m in reg.iter() {
            assert!(m.is_idle());
            assert!(!m.is_hittable());
            assert_eq!(m.word(), "");
            assert!(!m.is_target_word());
            assert_eq!(m.offset(), -1.0);
        }
        assert_eq!(reg.idle_ids().len(), 4);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let reg = MoleRegistry::new(&GameConfig::default());
        assert!(reg.get(MoleId(4)).is_none());
        assert_eq!(reg.get(MoleId(2)).map(Mole::id), Some(MoleId(2)));
    }
}
