//! Bounded pool of multi-precision integers with a lock/unlock session lifetime.
//!
//! Every live integer occupies one slot of a fixed-capacity table and reserves a number of bytes,
//! rounded up to the session word size, against a shared byte budget. Handles carry the
//! generation of the allocation that produced them, so a handle that outlived its slot (destroyed,
//! or allocated in a previous session) is rejected instead of aliasing whatever reuses the slot.

use std::ops::{Deref, DerefMut};

use cx_common::{warn_file, ArenaConfig, CxError, CxResult};
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::codec::{from_be, write_be_fixed};

/// Identifier of a live integer of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u8,
    generation: u32,
}

impl Handle {
    /// Raw value of the "no slot" sentinel on the flat surface
    pub const INVALID_RAW: u32 = u32::MAX;

    const GENERATION_MASK: u32 = 0x007F_FFFF;

    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Packs the handle as `generation << 8 | index`
    pub fn to_raw(self) -> u32 {
        (self.generation << 8) | self.index as u32
    }

    /// Unpacks a raw handle. The sentinel maps to `None`; anything else is only validated when
    /// it is used against an arena.
    pub fn from_raw(raw: u32) -> Option<Handle> {
        if raw == Self::INVALID_RAW {
            return None;
        }
        Some(Handle { index: (raw & 0xFF) as u8, generation: raw >> 8 })
    }
}

#[derive(Debug)]
struct Slot {
    value: BigUint,
    size: u32,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Unlocked,
    Locked { word_size: u32 },
}

/// The MPI arena. One value is one independent "process" worth of coprocessor state.
#[derive(Debug)]
pub struct Arena {
    cfg: ArenaConfig,
    state: SessionState,
    slots: Vec<Option<Slot>>,
    total_bytes: u32,
    next_generation: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl Arena {
    pub fn new(cfg: ArenaConfig) -> Self {
        let slots = (0..cfg.max_slots).map(|_| None).collect();
        Self { cfg, state: SessionState::Unlocked, slots, total_bytes: 0, next_generation: 1 }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.cfg
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, SessionState::Locked { .. })
    }

    /// Opens a session. The word size is rounded up to the minimum alignment; `flags` is accepted
    /// for interface compatibility and otherwise ignored.
    pub fn lock(&mut self, word_size: u32, flags: u32) -> CxResult<()> {
        if self.is_locked() {
            warn_file!("Arena::lock() called while a session is already open");
            return Err(CxError::NotUnlocked);
        }
        let word_size = round_up(word_size.max(1), self.cfg.min_word_size);
        if word_size > self.cfg.max_bn_size {
            return Err(CxError::InvalidParameterSize);
        }

        self.total_bytes = 0;
        self.state = SessionState::Locked { word_size };
        debug!("Arena locked: word_size={} flags=0x{:x}", word_size, flags);
        Ok(())
    }

    /// Closes the session, freeing every live integer. Always succeeds.
    pub fn unlock(&mut self) {
        let live = self.live_handles();
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.total_bytes = 0;
        self.state = SessionState::Unlocked;
        debug!("Arena unlocked: released {} live handles", live);
    }

    /// Runs `f` inside a dedicated session, unlocking on every exit path. Fails with `NotUnlocked`
    /// if the caller already holds a session.
    pub fn with_session<T>(
        &mut self,
        word_size: u32,
        f: impl FnOnce(&mut Arena) -> CxResult<T>,
    ) -> CxResult<T> {
        self.lock(word_size, 0)?;
        let result = f(self);
        self.unlock();
        result
    }

    pub fn word_size(&self) -> CxResult<u32> {
        match self.state {
            SessionState::Locked { word_size } => Ok(word_size),
            SessionState::Unlocked => Err(CxError::NotLocked),
        }
    }

    /// Bytes currently reserved by live handles
    pub fn total_bytes(&self) -> u32 {
        self.total_bytes
    }

    pub fn live_handles(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Reserves an integer of `nbytes` bytes, rounded up to the session word size, initialized
    /// to zero.
    pub fn alloc(&mut self, nbytes: u32) -> CxResult<Handle> {
        let word_size = self.word_size()?;
        let size = round_up(nbytes.max(1), word_size);
        if size > self.cfg.max_bn_size {
            return Err(CxError::InvalidParameterSize);
        }

        let Some(index) = self.slots.iter().position(|s| s.is_none()) else {
            warn_file!("Arena::alloc() no free slot left (capacity {})", self.cfg.max_slots);
            return Err(CxError::MemoryFull);
        };
        if self.total_bytes + size > self.cfg.max_bytes {
            warn_file!(
                "Arena::alloc() budget exceeded: {} reserved + {} requested > {}",
                self.total_bytes, size, self.cfg.max_bytes
            );
            return Err(CxError::MemoryFull);
        }

        let generation = self.next_generation;
        self.next_generation = (self.next_generation + 1) & Handle::GENERATION_MASK;
        if self.next_generation == 0 {
            self.next_generation = 1;
        }

        self.slots[index] = Some(Slot { value: BigUint::zero(), size, generation });
        self.total_bytes += size;
        trace!("Arena::alloc() slot={} size={} total={}", index, size, self.total_bytes);
        Ok(Handle { index: index as u8, generation })
    }

    /// Allocates `max(nbytes, bytes.len())` bytes and imports `bytes` as a big-endian value
    pub fn alloc_init(&mut self, nbytes: u32, bytes: &[u8]) -> CxResult<Handle> {
        let len = u32::try_from(bytes.len()).map_err(|_| CxError::InvalidParameterSize)?;
        let h = self.alloc(nbytes.max(len))?;
        if let Err(e) = self.init(h, bytes) {
            self.destroy(h)?;
            return Err(e);
        }
        Ok(h)
    }

    /// Frees a handle. Destroying an already freed handle is a no-op.
    pub fn destroy(&mut self, h: Handle) -> CxResult<()> {
        self.word_size()?;
        if let Some(slot) = self.slots.get_mut(h.index()) {
            if slot.as_ref().is_some_and(|s| s.generation == h.generation) {
                if let Some(freed) = slot.take() {
                    self.total_bytes -= freed.size;
                }
            }
        }
        Ok(())
    }

    /// Reserved (rounded) size of a handle in bytes
    pub fn nbytes(&self, h: Handle) -> CxResult<u32> {
        Ok(self.slot(h)?.size)
    }

    /// Current value of a handle
    pub fn value(&self, h: Handle) -> CxResult<&BigUint> {
        Ok(&self.slot(h)?.value)
    }

    /// Replaces the value of a handle; the value must fit its reserved size
    pub fn store(&mut self, h: Handle, value: BigUint) -> CxResult<()> {
        let slot = self.slot_mut(h)?;
        if value.bits() > u64::from(slot.size) * 8 {
            return Err(CxError::InvalidParameterSize);
        }
        slot.value = value;
        Ok(())
    }

    /// Imports a big-endian buffer into an allocated handle
    pub fn init(&mut self, h: Handle, bytes: &[u8]) -> CxResult<()> {
        self.store(h, from_be(bytes))
    }

    /// Exports a handle into `out`, left-padded with zeros or truncated from the left
    pub fn export(&self, h: Handle, out: &mut [u8]) -> CxResult<()> {
        write_be_fixed(self.value(h)?, out);
        Ok(())
    }

    pub fn copy(&mut self, dst: Handle, src: Handle) -> CxResult<()> {
        let value = self.value(src)?.clone();
        self.store(dst, value)
    }

    pub fn set_u32(&mut self, h: Handle, value: u32) -> CxResult<()> {
        self.store(h, BigUint::from(value))
    }

    /// Low 32 bits of the value
    pub fn get_u32(&self, h: Handle) -> CxResult<u32> {
        Ok(self.value(h)?.iter_u32_digits().next().unwrap_or(0))
    }

    fn slot(&self, h: Handle) -> CxResult<&Slot> {
        self.word_size()?;
        match self.slots.get(h.index()) {
            Some(Some(slot)) if slot.generation == h.generation => Ok(slot),
            _ => Err(CxError::InvalidParameter),
        }
    }

    fn slot_mut(&mut self, h: Handle) -> CxResult<&mut Slot> {
        self.word_size()?;
        match self.slots.get_mut(h.index()) {
            Some(Some(slot)) if slot.generation == h.generation => Ok(slot),
            _ => Err(CxError::InvalidParameter),
        }
    }
}

/// Scoped temporaries: every handle allocated through the guard is destroyed when it drops, on
/// every exit path.
pub struct Temps<'a> {
    arena: &'a mut Arena,
    handles: Vec<Handle>,
}

impl<'a> Temps<'a> {
    pub fn new(arena: &'a mut Arena) -> Self {
        Self { arena, handles: Vec::new() }
    }

    pub fn alloc(&mut self, nbytes: u32) -> CxResult<Handle> {
        let h = self.arena.alloc(nbytes)?;
        self.handles.push(h);
        Ok(h)
    }

    pub fn alloc_init(&mut self, nbytes: u32, bytes: &[u8]) -> CxResult<Handle> {
        let h = self.arena.alloc_init(nbytes, bytes)?;
        self.handles.push(h);
        Ok(h)
    }

    /// Stops tracking `h` so it survives the guard
    pub fn keep(&mut self, h: Handle) {
        self.handles.retain(|t| *t != h);
    }
}

impl Deref for Temps<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        self.arena
    }
}

impl DerefMut for Temps<'_> {
    fn deref_mut(&mut self) -> &mut Arena {
        self.arena
    }
}

impl Drop for Temps<'_> {
    fn drop(&mut self) {
        for h in self.handles.drain(..) {
            // Only fails once the session is gone, and then the slot is already free
            let _ = self.arena.destroy(h);
        }
    }
}

fn round_up(value: u32, multiple: u32) -> u32 {
    value.div_ceil(multiple) * multiple
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked() -> Arena {
        let mut arena = Arena::default();
        arena.lock(32, 0).unwrap();
        arena
    }

    #[test]
    fn test_lock_discipline() {
        let mut arena = Arena::default();
        assert!(!arena.is_locked());
        assert_eq!(arena.alloc(32), Err(CxError::NotLocked));
        arena.lock(0, 0).unwrap();
        assert_eq!(arena.word_size(), Ok(16));
        assert_eq!(arena.lock(32, 0), Err(CxError::NotUnlocked));
        arena.unlock();
        arena.unlock();
        arena.lock(20, 0).unwrap();
        assert_eq!(arena.word_size(), Ok(32));
    }

    #[test]
    fn test_alloc_rounds_to_word_size() {
        let mut arena = locked();
        let a = arena.alloc(1).unwrap();
        let b = arena.alloc(33).unwrap();
        let c = arena.alloc(0).unwrap();
        assert_eq!(arena.nbytes(a), Ok(32));
        assert_eq!(arena.nbytes(b), Ok(64));
        assert_eq!(arena.nbytes(c), Ok(32));
        assert_eq!(arena.total_bytes(), 128);
    }

    #[test]
    fn test_budget_invariant() {
        let mut arena = locked();
        let mut handles = Vec::new();
        loop {
            match arena.alloc(100) {
                Ok(h) => handles.push(h),
                Err(e) => {
                    assert_eq!(e, CxError::MemoryFull);
                    break;
                }
            }
            assert!(arena.total_bytes() <= arena.config().max_bytes);
        }
        // 2048 / 128
        assert_eq!(handles.len(), 16);
        assert_eq!(arena.total_bytes(), 2048);

        arena.destroy(handles[3]).unwrap();
        assert_eq!(arena.total_bytes(), 2048 - 128);
        assert!(arena.alloc(128).is_ok());
        assert_eq!(arena.alloc(32), Err(CxError::MemoryFull));
    }

    #[test]
    fn test_slot_capacity() {
        let mut arena = Arena::new(ArenaConfig { max_slots: 4, ..ArenaConfig::default() });
        arena.lock(16, 0).unwrap();
        for _ in 0..4 {
            arena.alloc(16).unwrap();
        }
        assert_eq!(arena.alloc(16), Err(CxError::MemoryFull));
        assert_eq!(arena.live_handles(), 4);
        assert_eq!(arena.total_bytes(), 64);
    }

    #[test]
    fn test_unlock_clears_all() {
        let mut arena = locked();
        let h = arena.alloc_init(0, &[1, 2, 3]).unwrap();
        arena.alloc(64).unwrap();
        arena.unlock();
        arena.lock(32, 0).unwrap();
        assert_eq!(arena.live_handles(), 0);
        assert_eq!(arena.total_bytes(), 0);
        // Handles from the previous session are stale even if the slot is reused
        let fresh = arena.alloc(32).unwrap();
        assert_eq!(fresh.index(), h.index());
        assert_eq!(arena.value(h), Err(CxError::InvalidParameter));
    }

    #[test]
    fn test_idempotent_destroy() {
        let mut arena = locked();
        let a = arena.alloc(32).unwrap();
        let b = arena.alloc(32).unwrap();
        arena.destroy(a).unwrap();
        arena.destroy(a).unwrap();
        assert_eq!(arena.total_bytes(), 32);

        // The reused slot is not freed through the stale handle
        let c = arena.alloc(32).unwrap();
        assert_eq!(c.index(), a.index());
        arena.destroy(a).unwrap();
        assert_eq!(arena.nbytes(c), Ok(32));
        assert_eq!(arena.total_bytes(), 64);

        arena.unlock();
        assert_eq!(arena.destroy(b), Err(CxError::NotLocked));
    }

    #[test]
    fn test_export_pads_and_truncates() {
        let mut arena = locked();
        let bytes = [0x12, 0x34, 0x56, 0x78, 0x9a];
        let h = arena.alloc_init(0, &bytes).unwrap();

        let mut wide = [0xffu8; 8];
        arena.export(h, &mut wide).unwrap();
        assert_eq!(wide, [0, 0, 0, 0x12, 0x34, 0x56, 0x78, 0x9a]);

        let mut narrow = [0u8; 3];
        arena.export(h, &mut narrow).unwrap();
        assert_eq!(narrow, [0x56, 0x78, 0x9a]);

        let mut exact = [0u8; 5];
        arena.export(h, &mut exact).unwrap();
        assert_eq!(exact, bytes);
    }

    #[test]
    fn test_alloc_init_grows_to_input() {
        let mut arena = locked();
        let h = arena.alloc_init(8, &[0xAA; 40]).unwrap();
        assert_eq!(arena.nbytes(h), Ok(64));
        assert_eq!(arena.store(h, BigUint::from(1u8) << 512), Err(CxError::InvalidParameterSize));
    }

    #[test]
    fn test_u32_accessors() {
        let mut arena = locked();
        let h = arena.alloc(32).unwrap();
        arena.set_u32(h, 0xDEADBEEF).unwrap();
        assert_eq!(arena.get_u32(h), Ok(0xDEADBEEF));
        arena.init(h, &[0x01, 0x00, 0x00, 0x00, 0x07]).unwrap();
        assert_eq!(arena.get_u32(h), Ok(7));
    }

    #[test]
    fn test_temps_release_on_drop() {
        let mut arena = locked();
        let kept;
        {
            let mut temps = Temps::new(&mut arena);
            temps.alloc(32).unwrap();
            temps.alloc(64).unwrap();
            kept = temps.alloc(32).unwrap();
            temps.keep(kept);
            assert_eq!(temps.total_bytes(), 128);
        }
        assert_eq!(arena.total_bytes(), 32);
        assert_eq!(arena.live_handles(), 1);
        assert!(arena.nbytes(kept).is_ok());
    }

    #[test]
    fn test_temps_release_on_error_path() {
        fn failing(arena: &mut Arena) -> CxResult<()> {
            let mut temps = Temps::new(arena);
            temps.alloc(512)?;
            temps.alloc(512)?;
            temps.alloc(512)?;
            temps.alloc(512)?;
            temps.alloc(512)?;
            Ok(())
        }
        let mut arena = locked();
        assert_eq!(failing(&mut arena), Err(CxError::MemoryFull));
        assert_eq!(arena.total_bytes(), 0);
    }

    #[test]
    fn test_with_session() {
        let mut arena = Arena::default();
        let v = arena
            .with_session(32, |arena| {
                let h = arena.alloc_init(0, &[0x2a])?;
                arena.get_u32(h)
            })
            .unwrap();
        assert_eq!(v, 0x2a);
        assert!(!arena.is_locked());

        let failed: CxResult<()> = arena.with_session(32, |arena| {
            arena.alloc(4096)?;
            Ok(())
        });
        assert_eq!(failed, Err(CxError::InvalidParameterSize));
        assert!(!arena.is_locked());

        arena.lock(16, 0).unwrap();
        assert_eq!(arena.with_session(16, |_| Ok(())), Err(CxError::NotUnlocked));
        assert!(arena.is_locked());
    }

    #[test]
    fn test_raw_handles() {
        let mut arena = locked();
        let h = arena.alloc(32).unwrap();
        assert_eq!(Handle::from_raw(h.to_raw()), Some(h));
        assert_eq!(Handle::from_raw(Handle::INVALID_RAW), None);
    }
}
